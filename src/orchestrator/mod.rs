//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `graph` - 工作流图
//! - 命名节点、入口、无条件边、`END`
//! - `compile` 时校验：入口存在、无多出边、无环、无孤立节点
//! - `invoke` 按顺序执行并合并每个阶段返回的部分状态
//!
//! ### `phase` - 运行状态机
//! - START → GATHERED → SYNTHESIZED → DONE，任一阶段失败进入 FAILED
//!
//! ### `research_agent` - 研究代理
//! - 构建一次 Gatherer → Synthesizer 工作流
//! - 对外只暴露 `run(topic, pdf_text)`
//!
//! ## 层次关系
//!
//! ```text
//! research_agent (构建并运行工作流)
//!     ↓
//! graph::CompiledWorkflow (按顺序执行节点、合并状态)
//!     ↓
//! workflow::{GathererStage, SynthesizerStage}
//!     ↓
//! services (能力层：检索 / 摘要 / 打分 / 写报告)
//!     ↓
//! clients (基础设施：Tavily / LLM)
//! ```

pub mod graph;
pub mod phase;
pub mod research_agent;

pub use graph::{CompiledWorkflow, WorkflowBuilder, END};
pub use phase::Phase;
pub use research_agent::{AgentOptions, ResearchAgent};
