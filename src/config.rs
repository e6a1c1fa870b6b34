use crate::error::ConfigError;
use crate::workflow::gatherer::DEFAULT_MAX_RESULTS;
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    // --- 检索 API 配置 ---
    pub tavily_api_key: String,
    pub tavily_api_base_url: String,
    /// 每次检索返回的最大结果数
    pub search_max_results: usize,
    /// 同时处理的 finding 数量
    pub max_concurrent_findings: usize,
    /// 外部请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.groq.com/openai/v1".to_string(),
            llm_model_name: "llama-3.1-8b-instant".to_string(),
            llm_temperature: 0.3,
            llm_max_tokens: 2048,
            tavily_api_key: String::new(),
            tavily_api_base_url: "https://api.tavily.com".to_string(),
            search_max_results: DEFAULT_MAX_RESULTS,
            max_concurrent_findings: 4,
            request_timeout_secs: 60,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，文件中缺失的项使用默认值
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// 先读配置文件（如果有），再用环境变量覆盖
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_env_overrides()
    }

    fn from_toml_str(content: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_string(),
            source,
        })
    }

    fn with_env_overrides(self) -> Result<Self, ConfigError> {
        Ok(Self {
            llm_api_key: env_string("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: env_string("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: env_string("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            llm_temperature: env_parse("LLM_TEMPERATURE", "f32")?.unwrap_or(self.llm_temperature),
            llm_max_tokens: env_parse("LLM_MAX_TOKENS", "u32")?.unwrap_or(self.llm_max_tokens),
            tavily_api_key: env_string("TAVILY_API_KEY").unwrap_or(self.tavily_api_key),
            tavily_api_base_url: env_string("TAVILY_API_BASE_URL")
                .unwrap_or(self.tavily_api_base_url),
            search_max_results: env_parse("SEARCH_MAX_RESULTS", "usize")?
                .unwrap_or(self.search_max_results),
            max_concurrent_findings: env_parse("MAX_CONCURRENT_FINDINGS", "usize")?
                .unwrap_or(self.max_concurrent_findings),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", "u64")?
                .unwrap_or(self.request_timeout_secs),
            verbose_logging: env_parse("VERBOSE_LOGGING", "bool")?
                .unwrap_or(self.verbose_logging),
        })
    }

    /// 校验配置是否可用于真实调用
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::MissingValue("LLM_API_KEY"));
        }
        if self.tavily_api_key.trim().is_empty() {
            return Err(ConfigError::MissingValue("TAVILY_API_KEY"));
        }
        if !(1..=DEFAULT_MAX_RESULTS).contains(&self.search_max_results) {
            return Err(ConfigError::InvalidValue {
                key: "search_max_results",
                reason: format!(
                    "{} 不在 1..={} 范围内",
                    self.search_max_results, DEFAULT_MAX_RESULTS
                ),
            });
        }
        if self.max_concurrent_findings == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_concurrent_findings",
                reason: "必须至少为 1".to_string(),
            });
        }
        Ok(())
    }
}

fn env_string(var_name: &str) -> Option<String> {
    std::env::var(var_name).ok().filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(
    var_name: &str,
    expected_type: &str,
) -> Result<Option<T>, ConfigError> {
    match env_string(var_name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        None => Ok(None),
    }
}
