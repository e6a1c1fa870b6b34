//! # Research Assistant
//!
//! 给定一个研究主题（以及可选的文档上下文），检索网络证据，逐条摘要并打置信度，
//! 最后生成详细报告和执行摘要。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 持有网络资源，只暴露能力
//! - `TavilyClient` - 检索
//! - `LlmClient` - 文本生成
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单条数据
//! - `EvidenceSource` / `LanguageModel` - 外部协作者接口
//! - `ResearchService` - 摘要、打分、写报告
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义每个阶段读什么、产出什么
//! - `GathererStage` - 主题 → findings + citations
//! - `SynthesizerStage` - findings → 摘要、置信度、报告
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 把阶段连成工作流并运行
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

#[cfg(test)]
mod test_support;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, WorkflowError};
pub use models::{SearchHit, StateUpdate, WorkflowState};
pub use orchestrator::{AgentOptions, ResearchAgent};
pub use services::{EvidenceSource, LanguageModel};
