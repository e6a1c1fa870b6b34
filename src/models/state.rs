//! 工作流状态
//!
//! 在各阶段之间传递的累积记录。每个阶段只返回自己产生的部分字段（`StateUpdate`），
//! 由编排层调用 [`WorkflowState::merge`] 合并进来。

use serde::{Deserialize, Serialize};

/// 工作流状态
///
/// 每次运行新建一份，运行结束后交还调用方，不在多次运行间共享。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    /// 研究主题（启动时非空）
    pub topic: String,

    /// 文档上下文（可以为空）
    #[serde(default)]
    pub pdf_text: String,

    /// Gatherer 产生的问答片段
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<Vec<String>>,

    /// 与检索结果一一对应的来源 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<String>>,

    /// 每个 finding 一个分数，范围 [0, 100]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_scores: Option<Vec<f64>>,

    /// 一段话的执行摘要
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// 详细报告
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,

    /// 预留字段，当前没有任何阶段读写它
    #[serde(default)]
    pub attempted_replanning: bool,
}

/// 阶段返回的部分状态，`None` 表示不修改该字段
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub topic: Option<String>,
    pub pdf_text: Option<String>,
    pub findings: Option<Vec<String>>,
    pub citations: Option<Vec<String>>,
    pub confidence_scores: Option<Vec<f64>>,
    pub summary: Option<String>,
    pub report: Option<String>,
    pub attempted_replanning: Option<bool>,
}

impl WorkflowState {
    /// 用调用方输入创建初始状态
    pub fn new(topic: impl Into<String>, pdf_text: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            pdf_text: pdf_text.into(),
            ..Default::default()
        }
    }

    /// 合并部分状态：更新中出现的字段覆盖旧值，其余保持不变
    pub fn merge(&mut self, update: StateUpdate) {
        if let Some(topic) = update.topic {
            self.topic = topic;
        }
        if let Some(pdf_text) = update.pdf_text {
            self.pdf_text = pdf_text;
        }
        if update.findings.is_some() {
            self.findings = update.findings;
        }
        if update.citations.is_some() {
            self.citations = update.citations;
        }
        if update.confidence_scores.is_some() {
            self.confidence_scores = update.confidence_scores;
        }
        if update.summary.is_some() {
            self.summary = update.summary;
        }
        if update.report.is_some() {
            self.report = update.report;
        }
        if let Some(flag) = update.attempted_replanning {
            self.attempted_replanning = flag;
        }
    }

    pub fn findings(&self) -> &[String] {
        self.findings.as_deref().unwrap_or_default()
    }

    pub fn citations(&self) -> &[String] {
        self.citations.as_deref().unwrap_or_default()
    }

    pub fn confidence_scores(&self) -> &[f64] {
        self.confidence_scores.as_deref().unwrap_or_default()
    }

    pub fn summary(&self) -> &str {
        self.summary.as_deref().unwrap_or_default()
    }

    pub fn report(&self) -> &str {
        self.report.as_deref().unwrap_or_default()
    }
}
