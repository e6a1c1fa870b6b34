//! 研究代理 - 编排层
//!
//! 只做两件事：构建一次 `Gatherer → Synthesizer` 工作流，按调用方输入运行它。
//! 不做重试，不做重新规划；任一阶段未吸收的错误直接交给调用方。

use std::sync::Arc;

use crate::clients::{LlmClient, TavilyClient};
use crate::config::Config;
use crate::error::{AppResult, WorkflowError};
use crate::models::WorkflowState;
use crate::orchestrator::graph::{CompiledWorkflow, WorkflowBuilder, END};
use crate::services::{EvidenceSource, LanguageModel, ResearchService};
use crate::utils::logging::{log_run_complete, log_run_start};
use crate::workflow::gatherer::DEFAULT_MAX_RESULTS;
use crate::workflow::{GathererStage, StageKind, SynthesizerStage};

/// 工作流参数
#[derive(Debug, Clone, Copy)]
pub struct AgentOptions {
    /// 单次检索结果上限
    pub max_results: usize,
    /// finding 并发上限
    pub max_concurrent_findings: usize,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            max_concurrent_findings: 4,
        }
    }
}

impl From<&Config> for AgentOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_results: config.search_max_results,
            max_concurrent_findings: config.max_concurrent_findings,
        }
    }
}

/// 研究代理
pub struct ResearchAgent {
    workflow: CompiledWorkflow,
}

impl ResearchAgent {
    /// 用给定的协作者构建工作流
    pub fn new(
        source: Arc<dyn EvidenceSource>,
        llm: Arc<dyn LanguageModel>,
        options: AgentOptions,
    ) -> Result<Self, WorkflowError> {
        let gatherer = GathererStage::new(source, options.max_results);
        let synthesizer =
            SynthesizerStage::new(ResearchService::new(llm), options.max_concurrent_findings);

        let mut builder = WorkflowBuilder::new();
        builder
            .add_node(StageKind::Gatherer.name(), Arc::new(gatherer))
            .add_node(StageKind::Synthesizer.name(), Arc::new(synthesizer))
            .set_entry_point(StageKind::Gatherer.name())
            .add_edge(StageKind::Gatherer.name(), StageKind::Synthesizer.name())
            .add_edge(StageKind::Synthesizer.name(), END);

        Ok(Self {
            workflow: builder.compile()?,
        })
    }

    /// 用真实的检索与 LLM 客户端构建
    pub fn from_config(config: &Config) -> AppResult<Self> {
        config.validate()?;

        let source = TavilyClient::new(config).map_err(WorkflowError::from)?;
        let llm = LlmClient::new(config);

        Ok(Self::new(
            Arc::new(source),
            Arc::new(llm),
            AgentOptions::from(config),
        )?)
    }

    /// 运行一次研究，返回最终状态
    pub async fn run(&self, topic: &str, pdf_text: &str) -> Result<WorkflowState, WorkflowError> {
        if topic.trim().is_empty() {
            return Err(WorkflowError::EmptyTopic);
        }

        log_run_start(topic, pdf_text.chars().count());

        let state = self
            .workflow
            .invoke(WorkflowState::new(topic, pdf_text))
            .await?;

        log_run_complete(&state);
        Ok(state)
    }
}
