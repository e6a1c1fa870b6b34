//! Synthesizer 阶段 - 流程层
//!
//! 流程顺序：
//! 1. 文档上下文（如果有）作为第一条部分摘要，不打分
//! 2. 每条 finding 并发执行"摘要 → 打分"，结果按原始顺序收集
//! 3. 合并部分摘要 → 详细报告 → 执行摘要
//!
//! 单条 finding 的失败在本阶段内吸收；报告和执行摘要的失败直接向上传播。

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use crate::error::WorkflowError;
use crate::models::{StateUpdate, WorkflowState};
use crate::services::{ResearchService, NEUTRAL_CONFIDENCE};
use crate::utils::text::take_chars;
use crate::workflow::stage::{Stage, StageKind};

/// 文档上下文最多取的字符数
pub const CONTEXT_CHARS: usize = 4000;

/// 送入报告生成的合并文本最大字符数
pub const COMBINED_MAX_CHARS: usize = 8000;

/// 单条 finding 的处理结果
#[derive(Debug, Clone, PartialEq)]
struct FindingOutcome {
    summary: String,
    confidence: f64,
}

impl FindingOutcome {
    fn failed(reason: impl std::fmt::Display) -> Self {
        Self {
            summary: format!("[Error summarizing one finding: {}]", reason),
            confidence: NEUTRAL_CONFIDENCE,
        }
    }
}

pub struct SynthesizerStage {
    service: ResearchService,
    max_concurrent: usize,
}

impl SynthesizerStage {
    pub fn new(service: ResearchService, max_concurrent: usize) -> Self {
        Self {
            service,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// 并发处理所有 finding，返回值与输入顺序一致
    async fn summarize_findings(&self, topic: &str, findings: &[String]) -> Vec<FindingOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut handles = Vec::with_capacity(findings.len());

        for (index, finding) in findings.iter().enumerate() {
            let semaphore = semaphore.clone();
            let service = self.service.clone();
            let topic = topic.to_string();
            let finding = finding.clone();

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                (index, process_finding(&service, &topic, &finding).await)
            });
            handles.push(handle);
        }

        let mut outcomes: Vec<(usize, FindingOutcome)> = join_all(handles)
            .await
            .into_iter()
            .enumerate()
            .map(|(index, joined)| match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("第 {} 条 finding 的任务异常退出: {}", index + 1, e);
                    (index, FindingOutcome::failed(e))
                }
            })
            .collect();

        outcomes.sort_by_key(|(index, _)| *index);
        outcomes.into_iter().map(|(_, outcome)| outcome).collect()
    }
}

async fn process_finding(service: &ResearchService, topic: &str, finding: &str) -> FindingOutcome {
    match service.summarize(finding, topic).await {
        Ok(summary) => {
            let confidence = service.confidence_or_neutral(&summary).await;
            debug!("finding 摘要完成，置信度 {:.1}", confidence);
            FindingOutcome {
                summary,
                confidence,
            }
        }
        Err(e) => {
            warn!("⚠️ finding 摘要失败，使用占位文本: {}", e);
            FindingOutcome::failed(e)
        }
    }
}

/// 文档上下文条目
fn context_entry(pdf_text: &str) -> String {
    format!("Context from PDF:\n{}", take_chars(pdf_text, CONTEXT_CHARS))
}

/// 用空行连接所有部分摘要，截断到 [`COMBINED_MAX_CHARS`] 个字符
pub fn combine_summaries(partials: &[String]) -> String {
    take_chars(&partials.join("\n\n"), COMBINED_MAX_CHARS).to_string()
}

#[async_trait]
impl Stage for SynthesizerStage {
    fn kind(&self) -> StageKind {
        StageKind::Synthesizer
    }

    async fn run(&self, state: &WorkflowState) -> Result<StateUpdate, WorkflowError> {
        let topic = &state.topic;
        if topic.trim().is_empty() {
            return Err(WorkflowError::EmptyTopic);
        }
        let findings = state
            .findings
            .as_deref()
            .ok_or(WorkflowError::MissingField {
                stage: StageKind::Synthesizer.name(),
                field: "findings",
            })?;

        let mut partials = Vec::with_capacity(findings.len() + 1);
        if !state.pdf_text.is_empty() {
            partials.push(context_entry(&state.pdf_text));
        }

        info!(
            "🤖 正在摘要 {} 条 finding (并发上限 {})",
            findings.len(),
            self.max_concurrent
        );
        let outcomes = self.summarize_findings(topic, findings).await;

        let mut confidence_scores = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            partials.push(outcome.summary);
            confidence_scores.push(outcome.confidence);
        }

        let combined = combine_summaries(&partials);

        info!("📝 正在生成详细报告...");
        let report = self.service.write_report(topic, &combined).await?;

        info!("📝 正在生成执行摘要...");
        let summary = self.service.write_executive_summary(&report).await?;

        Ok(StateUpdate {
            summary: Some(summary),
            report: Some(report),
            citations: Some(state.citations().to_vec()),
            confidence_scores: Some(confidence_scores),
            ..Default::default()
        })
    }
}
