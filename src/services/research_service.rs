//! 研究服务 - 业务能力层
//!
//! 只负责"单条"能力：摘要一条 finding、给一段摘要打分、写报告、写执行摘要。
//! 不关心流程顺序，也不知道有多少条 finding。

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{ConfidenceError, LlmError};
use crate::services::LanguageModel;
use crate::utils::text::take_chars;

/// 评分失败时使用的中性分数
pub const NEUTRAL_CONFIDENCE: f64 = 50.0;

/// 送入摘要提示词的单条 finding 最大字符数
pub const FINDING_PROMPT_CHARS: usize = 4000;

/// 研究服务
#[derive(Clone)]
pub struct ResearchService {
    llm: Arc<dyn LanguageModel>,
}

impl ResearchService {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }

    /// 摘要一条 finding
    pub async fn summarize(&self, finding: &str, topic: &str) -> Result<String, LlmError> {
        let prompt = build_summary_prompt(finding, topic);
        let summary = self.llm.complete(&prompt).await?;
        Ok(summary.trim().to_string())
    }

    /// 让模型给摘要的事实准确度打分（0-100）
    pub async fn rate_confidence(&self, text: &str) -> Result<f64, ConfidenceError> {
        let prompt = build_confidence_prompt(text);
        let response = self.llm.complete(&prompt).await?;
        parse_confidence(&response)
    }

    /// 打分，任何失败都回退到中性分数
    pub async fn confidence_or_neutral(&self, text: &str) -> f64 {
        match self.rate_confidence(text).await {
            Ok(score) => score,
            Err(ConfidenceError::Call(e)) => {
                warn!("置信度评分调用失败，使用中性分数 {}: {}", NEUTRAL_CONFIDENCE, e);
                NEUTRAL_CONFIDENCE
            }
            Err(ConfidenceError::Unparseable { response }) => {
                warn!(
                    "置信度评分无法解析 {:?}，使用中性分数 {}",
                    response, NEUTRAL_CONFIDENCE
                );
                NEUTRAL_CONFIDENCE
            }
        }
    }

    /// 根据合并后的摘要生成详细报告
    pub async fn write_report(&self, topic: &str, combined: &str) -> Result<String, LlmError> {
        debug!("生成详细报告，输入长度: {} 字符", combined.chars().count());
        let report = self.llm.complete(&build_report_prompt(topic, combined)).await?;
        Ok(report.trim().to_string())
    }

    /// 根据报告生成一段话的执行摘要
    pub async fn write_executive_summary(&self, report: &str) -> Result<String, LlmError> {
        let summary = self
            .llm
            .complete(&build_executive_summary_prompt(report))
            .await?;
        Ok(summary.trim().to_string())
    }
}

/// 解析模型返回的置信度
///
/// 允许前后空白；非数字、NaN、无穷大都视为无法解析。
/// 超出 [0, 100] 的有限值会被截断到范围内。
pub fn parse_confidence(response: &str) -> Result<f64, ConfidenceError> {
    let trimmed = response.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value.clamp(0.0, 100.0)),
        _ => Err(ConfidenceError::Unparseable {
            response: trimmed.to_string(),
        }),
    }
}

// ========== 提示词 ==========

fn build_summary_prompt(finding: &str, topic: &str) -> String {
    format!(
        "Summarize this research note on '{}':\n\n{}",
        topic,
        take_chars(finding, FINDING_PROMPT_CHARS)
    )
}

fn build_confidence_prompt(text: &str) -> String {
    format!(
        "Rate your confidence (0-100) in the factual accuracy of the following answer. \
         Respond with just a number:\n\n{}",
        text
    )
}

fn build_report_prompt(topic: &str, combined: &str) -> String {
    format!(
        "Based on the following summaries and any provided PDF context, provide a very detailed, \
         structured research report on '{}':\n\n{}",
        topic, combined
    )
}

fn build_executive_summary_prompt(report: &str) -> String {
    format!(
        "Create a concise, one-paragraph executive summary for the following report:\n\n{}",
        report
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// 总是返回固定文本的模型
    struct FixedModel(&'static str);

    #[async_trait]
    impl LanguageModel for FixedModel {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    /// 总是失败的模型
    struct FailingModel;

    #[async_trait]
    impl LanguageModel for FailingModel {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Other("服务不可用".to_string()))
        }
    }

    fn service(llm: impl LanguageModel + 'static) -> ResearchService {
        ResearchService::new(Arc::new(llm))
    }

    #[test]
    fn test_parse_confidence_tolerates_whitespace() {
        assert_eq!(parse_confidence("80").unwrap(), 80.0);
        assert_eq!(parse_confidence("  72.5\n").unwrap(), 72.5);
    }

    #[test]
    fn test_parse_confidence_rejects_non_numeric() {
        assert!(matches!(
            parse_confidence("not a number"),
            Err(ConfidenceError::Unparseable { .. })
        ));
        assert!(matches!(
            parse_confidence("NaN"),
            Err(ConfidenceError::Unparseable { .. })
        ));
        assert!(matches!(
            parse_confidence("inf"),
            Err(ConfidenceError::Unparseable { .. })
        ));
        assert!(parse_confidence("").is_err());
        assert!(parse_confidence("80%").is_err());
    }

    #[test]
    fn test_parse_confidence_clamps_out_of_range() {
        assert_eq!(parse_confidence("150").unwrap(), 100.0);
        assert_eq!(parse_confidence("-3").unwrap(), 0.0);
    }

    #[test]
    fn test_summary_prompt_truncates_finding() {
        let finding = "x".repeat(FINDING_PROMPT_CHARS + 100);
        let prompt = build_summary_prompt(&finding, "主题");
        assert!(prompt.starts_with("Summarize this research note on '主题':\n\n"));
        assert_eq!(prompt.matches('x').count(), FINDING_PROMPT_CHARS);
    }

    #[tokio::test]
    async fn test_unparseable_rating_falls_back_to_neutral() {
        let service = service(FixedModel("not a number"));
        assert!(matches!(
            service.rate_confidence("摘要").await,
            Err(ConfidenceError::Unparseable { .. })
        ));
        assert_eq!(service.confidence_or_neutral("摘要").await, NEUTRAL_CONFIDENCE);
    }

    #[tokio::test]
    async fn test_failed_rating_call_falls_back_to_neutral() {
        let service = service(FailingModel);
        assert!(matches!(
            service.rate_confidence("摘要").await,
            Err(ConfidenceError::Call(_))
        ));
        assert_eq!(service.confidence_or_neutral("摘要").await, NEUTRAL_CONFIDENCE);
    }

    #[test]
    fn test_report_and_summary_prompts_carry_inputs() {
        let service = service(FixedModel("  report  "));
        let report =
            tokio_test::block_on(service.write_report("主题", "combined text")).unwrap();
        assert_eq!(report, "report");

        let prompt = build_report_prompt("主题", "combined text");
        assert!(prompt.contains("research report on '主题':\n\ncombined text"));
        assert!(build_executive_summary_prompt("R").ends_with("following report:\n\nR"));
    }

    #[tokio::test]
    async fn test_summarize_trims_model_output() {
        let service = service(FixedModel("  一段摘要 \n"));
        assert_eq!(service.summarize("Q: a\nA: b", "a").await.unwrap(), "一段摘要");
    }
}
