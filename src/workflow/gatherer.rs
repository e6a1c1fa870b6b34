//! Gatherer 阶段 - 流程层
//!
//! 用主题做一次检索，把每条结果变成一个问答形式的 finding，并记录来源 URL。
//! 检索失败直接向上传播，本阶段不做部分结果兜底。

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::WorkflowError;
use crate::models::{StateUpdate, WorkflowState};
use crate::services::EvidenceSource;
use crate::workflow::stage::{Stage, StageKind};

/// 单次检索结果上限，配置只能在 1..=5 内取值
pub const DEFAULT_MAX_RESULTS: usize = 5;

pub struct GathererStage {
    source: Arc<dyn EvidenceSource>,
    max_results: usize,
}

impl GathererStage {
    /// `max_results` 会被限制在 1..=[`DEFAULT_MAX_RESULTS`]
    pub fn new(source: Arc<dyn EvidenceSource>, max_results: usize) -> Self {
        Self {
            source,
            max_results: max_results.clamp(1, DEFAULT_MAX_RESULTS),
        }
    }
}

#[async_trait]
impl Stage for GathererStage {
    fn kind(&self) -> StageKind {
        StageKind::Gatherer
    }

    async fn run(&self, state: &WorkflowState) -> Result<StateUpdate, WorkflowError> {
        let topic = &state.topic;
        if topic.trim().is_empty() {
            return Err(WorkflowError::EmptyTopic);
        }

        info!("🔍 正在检索: {}", topic);
        let mut hits = self.source.search(topic, self.max_results).await?;

        if hits.len() > self.max_results {
            warn!(
                "检索返回 {} 条结果，超过上限 {}，已截断",
                hits.len(),
                self.max_results
            );
            hits.truncate(self.max_results);
        }

        let findings: Vec<String> = hits.iter().map(|hit| hit.to_finding(topic)).collect();
        let citations: Vec<String> = hits.into_iter().map(|hit| hit.url).collect();

        if findings.is_empty() {
            warn!("⚠️ 检索没有返回任何结果");
        } else {
            info!("✓ 检索完成，得到 {} 条 finding", findings.len());
        }

        Ok(StateUpdate {
            topic: Some(topic.clone()),
            pdf_text: Some(state.pdf_text.clone()),
            findings: Some(findings),
            citations: Some(citations),
            ..Default::default()
        })
    }
}
