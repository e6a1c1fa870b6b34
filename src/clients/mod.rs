pub mod llm_client;
pub mod tavily_client;

pub use llm_client::LlmClient;
pub use tavily_client::TavilyClient;
