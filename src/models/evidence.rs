use serde::{Deserialize, Serialize};

/// 一条检索结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
}

impl SearchHit {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
        }
    }

    /// 以问答形式生成 finding，问题为原始主题
    pub fn to_finding(&self, topic: &str) -> String {
        format!("Q: {}\nA: {}", topic, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_embeds_topic_and_content() {
        let hit = SearchHit::new("标题", "https://example.com", "答案内容");
        assert_eq!(hit.to_finding("主题"), "Q: 主题\nA: 答案内容");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let hit: SearchHit = serde_json::from_str(r#"{"url": "https://a.com"}"#).unwrap();
        assert_eq!(hit.url, "https://a.com");
        assert!(hit.title.is_empty());
        assert!(hit.content.is_empty());
    }
}
