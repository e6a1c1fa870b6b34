use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 工作流错误
    #[error("工作流错误: {0}")]
    Workflow(#[from] WorkflowError),
    /// 文件操作错误
    #[error("文件错误 ({path}): {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 检索服务错误
#[derive(Debug, Error)]
pub enum SearchError {
    /// 网络请求失败
    #[error("检索请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务端返回错误状态码
    #[error("检索服务返回错误响应 ({endpoint}): status={status}, body={body}")]
    BadResponse {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// 响应 JSON 解析失败
    #[error("检索响应解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 其他检索错误（测试替身等）
    #[error("检索失败: {0}")]
    Other(String),
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 请求构建失败
    #[error("LLM 请求构建失败 (模型: {model}): {message}")]
    RequestBuildFailed { model: String, message: String },
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {message}")]
    ApiCallFailed { model: String, message: String },
    /// 调用超时
    #[error("LLM API调用超时 (模型: {model}, {timeout_secs}秒)")]
    Timeout { model: String, timeout_secs: u64 },
    /// 返回结果为空
    #[error("LLM返回结果为空 (模型: {model})")]
    EmptyResponse { model: String },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 其他 LLM 错误（测试替身等）
    #[error("LLM错误: {0}")]
    Other(String),
}

/// 置信度评分错误
///
/// 区分"调用失败"和"调用成功但返回内容无法解析"两种情况，
/// 两者目前都会回退到中性分数。
#[derive(Debug, Error)]
pub enum ConfidenceError {
    /// 评分调用本身失败
    #[error("置信度评分调用失败: {0}")]
    Call(#[from] LlmError),
    /// 返回内容不是合法数字
    #[error("无法解析置信度评分: {response:?}")]
    Unparseable { response: String },
}

/// 工作流错误
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// 研究主题为空
    #[error("研究主题不能为空")]
    EmptyTopic,
    /// 状态中缺少阶段所需字段
    #[error("阶段 {stage} 缺少必需字段: {field}")]
    MissingField {
        stage: &'static str,
        field: &'static str,
    },
    /// 工作流图结构不合法
    #[error("工作流图不合法: {0}")]
    InvalidGraph(String),
    /// 阶段执行顺序不合法
    #[error("非法的阶段转换: {from:?} 之后执行了 {stage}")]
    InvalidTransition {
        from: crate::orchestrator::Phase,
        stage: String,
    },
    /// 检索失败
    #[error(transparent)]
    Search(#[from] SearchError),
    /// LLM 调用失败
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 缺少必需配置项
    #[error("缺少必需配置项: {0}")]
    MissingValue(&'static str),
    /// 配置值不合法
    #[error("配置项 {key} 不合法: {reason}")]
    InvalidValue { key: &'static str, reason: String },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件错误
    pub fn file(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File {
            path: path.into(),
            source,
        }
    }
}

impl LlmError {
    /// 创建LLM API调用错误
    pub fn api_failed(model: impl Into<String>, source: impl std::fmt::Display) -> Self {
        LlmError::ApiCallFailed {
            model: model.into(),
            message: source.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_error_wraps_search_error_transparently() {
        let err: WorkflowError = SearchError::Other("连接被拒绝".to_string()).into();
        assert_eq!(err.to_string(), "检索失败: 连接被拒绝");
    }

    #[test]
    fn test_confidence_error_kinds_are_distinct() {
        let call: ConfidenceError = LlmError::Other("timeout".to_string()).into();
        let parse = ConfidenceError::Unparseable {
            response: "not a number".to_string(),
        };
        assert!(matches!(call, ConfidenceError::Call(_)));
        assert!(matches!(parse, ConfidenceError::Unparseable { .. }));
        assert!(parse.to_string().contains("not a number"));
    }
}
