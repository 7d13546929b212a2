use crate::errors::ToolError;
use crate::services::logger::Logger;
use crate::services::qiita_client::QiitaClient;
use crate::services::tool_executor::ToolHandler;
use serde_json::Value;
use std::sync::Arc;

pub const TOOL_NAME: &str = "get_qiita_markdown_rules";

/// Serves the Qiita markdown cheat sheet so the agent can follow house style.
#[derive(Clone)]
pub struct MarkdownGuideManager {
    logger: Logger,
    client: Arc<QiitaClient>,
}

impl MarkdownGuideManager {
    pub fn new(logger: Logger, client: Arc<QiitaClient>) -> Self {
        Self {
            logger: logger.child("guide"),
            client,
        }
    }

    pub async fn markdown_rules(&self) -> Result<String, ToolError> {
        let body = self.client.get_markdown_guide().await?;
        self.logger.debug(
            "markdown guide fetched",
            Some(&serde_json::json!({"chars": body.chars().count()})),
        );
        Ok(body)
    }
}

#[async_trait::async_trait]
impl ToolHandler for MarkdownGuideManager {
    async fn handle(&self, _args: Value) -> Result<String, ToolError> {
        self.markdown_rules().await
    }
}
