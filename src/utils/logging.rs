/// 日志工具模块
///
/// 提供运行横幅和日志预览的辅助函数
use tracing::info;

use crate::models::WorkflowState;

/// 记录一次研究运行的开始
///
/// # 参数
/// - `topic`: 研究主题
/// - `context_chars`: 文档上下文字符数
pub fn log_run_start(topic: &str, context_chars: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 开始研究: {}", truncate_text(topic, 80));
    if context_chars > 0 {
        info!("📄 附带文档上下文: {} 字符", context_chars);
    }
    info!("{}", "=".repeat(60));
}

/// 记录一次研究运行的完成统计
///
/// # 参数
/// - `state`: 最终状态
pub fn log_run_complete(state: &WorkflowState) {
    let scores = state.confidence_scores();
    info!("\n{}", "─".repeat(60));
    info!("📊 研究完成");
    info!("🔗 引用数量: {}", state.citations().len());
    info!("📝 报告长度: {} 字符", state.report().chars().count());
    if !scores.is_empty() {
        let average = scores.iter().sum::<f64>() / scores.len() as f64;
        info!("✅ 平均置信度: {:.1} ({} 条)", average, scores.len());
    }
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
