/// Tavily 检索 API 客户端
///
/// 封装所有与检索 API 相关的调用逻辑
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::SearchError;
use crate::models::SearchHit;
use crate::services::EvidenceSource;

/// 检索请求体
#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
    include_answer: bool,
    include_raw_content: bool,
    include_images: bool,
}

/// 检索响应体（只保留用到的字段）
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// 检索 API 客户端
pub struct TavilyClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TavilyClient {
    /// 创建新的检索客户端
    pub fn new(config: &Config) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|source| SearchError::RequestFailed {
                endpoint: config.tavily_api_base_url.clone(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: config.tavily_api_base_url.trim_end_matches('/').to_string(),
            api_key: config.tavily_api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

#[async_trait]
impl EvidenceSource for TavilyClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        let endpoint = self.endpoint();
        debug!("检索: {} (最多 {} 条)", query, max_results);

        let body = SearchRequest {
            query,
            max_results,
            include_answer: true,
            include_raw_content: false,
            include_images: false,
        };

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| SearchError::RequestFailed {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("检索服务返回错误状态 {}: {}", status, body);
            return Err(SearchError::BadResponse {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchResponse =
            response
                .json()
                .await
                .map_err(|source| SearchError::JsonParseFailed {
                    endpoint: endpoint.clone(),
                    source,
                })?;

        Ok(limit_results(parsed, max_results))
    }
}

/// 保证结果数量不超过上限，并保持服务端返回的顺序
fn limit_results(response: SearchResponse, max_results: usize) -> Vec<SearchHit> {
    let mut results = response.results;
    if results.len() > max_results {
        debug!("检索返回 {} 条，截断为 {} 条", results.len(), max_results);
        results.truncate(max_results);
    }
    results
}
