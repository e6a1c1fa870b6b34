//! 报告写入服务 - 业务能力层
//!
//! 只负责"把报告写到文件"能力，不关心流程

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::WorkflowState;

/// 报告写入服务
pub struct ReportWriter {
    report_file_path: PathBuf,
}

impl ReportWriter {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            report_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.report_file_path
    }

    /// 写入详细报告（覆盖已有文件）
    pub async fn write(&self, state: &WorkflowState) -> AppResult<()> {
        debug!(
            "写入报告: {} | 报告长度: {}",
            self.report_file_path.display(),
            state.report().len()
        );

        tokio::fs::write(&self.report_file_path, render_report_file(state))
            .await
            .map_err(|e| AppError::file(self.report_file_path.display().to_string(), e))
    }
}

/// 报告文件内容：带时间戳的头部 + 报告正文 + 引用列表
pub fn render_report_file(state: &WorkflowState) -> String {
    let mut content = format!(
        "{}\n研究报告 - {}\n主题: {}\n{}\n\n{}\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        state.topic,
        "=".repeat(60),
        state.report()
    );

    if !state.citations().is_empty() {
        content.push_str("\n引用:\n");
        for (i, url) in state.citations().iter().enumerate() {
            content.push_str(&format!("[{}] {}\n", i + 1, url));
        }
    }

    content
}
