//! 阶段接口
//!
//! 每个阶段读取累积状态，返回自己产生的部分状态，由编排层负责合并。

use std::fmt::Display;

use async_trait::async_trait;

use crate::error::WorkflowError;
use crate::models::{StateUpdate, WorkflowState};

/// 阶段类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// 检索证据
    Gatherer,
    /// 摘要、打分、写报告
    Synthesizer,
}

impl StageKind {
    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Gatherer => "Gatherer",
            StageKind::Synthesizer => "Synthesizer",
        }
    }
}

impl Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[async_trait]
pub trait Stage: Send + Sync {
    fn kind(&self) -> StageKind;

    async fn run(&self, state: &WorkflowState) -> Result<StateUpdate, WorkflowError>;
}
