pub mod config;
pub mod logger;
pub mod qiita_client;
pub mod response_filter;
pub mod tool_executor;
pub mod validation;
