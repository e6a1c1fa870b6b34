//! 外部协作者接口 - 业务能力层
//!
//! 核心流程只通过这两个接口访问外部世界，具体实现在 `clients/` 中，
//! 测试中可以替换为内存替身。

use async_trait::async_trait;

use crate::error::{LlmError, SearchError};
use crate::models::SearchHit;

/// 检索能力：给定查询返回若干检索结果
#[async_trait]
pub trait EvidenceSource: Send + Sync {
    /// 执行一次检索，最多返回 `max_results` 条结果；空结果不是错误
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError>;
}

/// 文本生成能力：给定提示词返回补全文本
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}
