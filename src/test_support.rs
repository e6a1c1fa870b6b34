//! 单元测试用的内存协作者

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{LlmError, SearchError};
use crate::models::SearchHit;
use crate::services::{EvidenceSource, LanguageModel};

/// 返回固定结果的检索源
pub struct StaticSource {
    pub hits: Vec<SearchHit>,
    pub queries: Mutex<Vec<(String, usize)>>,
}

impl StaticSource {
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// 按内容生成结果，URL 为 https://source/{序号}
    pub fn with_contents(contents: &[&str]) -> Self {
        Self::new(
            contents
                .iter()
                .enumerate()
                .map(|(i, c)| SearchHit::new(format!("title {}", i), format!("https://source/{}", i), *c))
                .collect(),
        )
    }
}

#[async_trait]
impl EvidenceSource for StaticSource {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));
        Ok(self.hits.clone())
    }
}

/// 总是失败的检索源
pub struct FailingSource;

#[async_trait]
impl EvidenceSource for FailingSource {
    async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        Err(SearchError::Other("检索服务不可达".to_string()))
    }
}

/// 按提示词类型返回脚本化响应的模型
pub struct ScriptedModel {
    pub summary: String,
    pub rating: String,
    pub report: String,
    pub executive_summary: String,
    /// finding 包含该标记时摘要调用失败
    pub fail_summary_marker: Option<String>,
    /// finding 包含该标记时摘要任务 panic
    pub panic_summary_marker: Option<String>,
    pub fail_rating: bool,
    pub fail_report: bool,
    pub prompts: Mutex<Vec<String>>,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl Default for ScriptedModel {
    fn default() -> Self {
        Self {
            summary: "fixed summary".to_string(),
            rating: "80".to_string(),
            report: "fixed report".to_string(),
            executive_summary: "fixed executive summary".to_string(),
            fail_summary_marker: None,
            panic_summary_marker: None,
            fail_rating: false,
            fail_report: false,
            prompts: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }
}

impl ScriptedModel {
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn prompts_starting_with(&self, prefix: &str) -> Vec<String> {
        self.prompts()
            .into_iter()
            .filter(|p| p.starts_with(prefix))
            .collect()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if prompt.starts_with("Summarize this research note") {
            if let Some(marker) = &self.panic_summary_marker {
                if prompt.contains(marker.as_str()) {
                    panic!("scripted panic");
                }
            }
            if let Some(marker) = &self.fail_summary_marker {
                if prompt.contains(marker.as_str()) {
                    return Err(LlmError::Other("scripted summary failure".to_string()));
                }
            }
            Ok(self.summary.clone())
        } else if prompt.starts_with("Rate your confidence") {
            if self.fail_rating {
                return Err(LlmError::Other("scripted rating failure".to_string()));
            }
            Ok(self.rating.clone())
        } else if prompt.starts_with("Based on the following summaries") {
            if self.fail_report {
                return Err(LlmError::Other("scripted report failure".to_string()));
            }
            Ok(self.report.clone())
        } else {
            Ok(self.executive_summary.clone())
        }
    }
}
