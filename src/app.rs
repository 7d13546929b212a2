use crate::errors::ToolError;
use crate::managers::articles::{ArticleAction, ArticleManager, ArticleTool};
use crate::managers::{clock, guide};
use crate::mcp::catalog::tool_catalog;
use crate::services::config::ClientConfig;
use crate::services::logger::Logger;
use crate::services::qiita_client::QiitaClient;
use crate::services::tool_executor::{ToolExecutor, ToolHandler};
use crate::services::validation::Validation;
use std::collections::HashMap;
use std::sync::Arc;

pub struct App {
    pub logger: Logger,
    pub client: Arc<QiitaClient>,
    pub tool_executor: Arc<ToolExecutor>,
}

impl App {
    fn validate_tool_wiring(handlers: &HashMap<String, Arc<dyn ToolHandler>>) -> Result<(), ToolError> {
        let mut missing: Vec<String> = tool_catalog()
            .iter()
            .filter(|tool| !handlers.contains_key(&tool.name))
            .map(|tool| tool.name.clone())
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort();
        Err(ToolError::internal("Tool wiring is incomplete")
            .with_hint("Every tool in tool_catalog.json must have a registered handler.")
            .with_details(serde_json::json!({ "missing_tools": missing })))
    }

    /// Builds the app from the process environment.
    pub fn initialize() -> Result<Self, ToolError> {
        let logger = Logger::new("qiita-mcp");
        let config = ClientConfig::from_env()?;
        Self::with_config(logger, config)
    }

    pub fn with_config(logger: Logger, config: ClientConfig) -> Result<Self, ToolError> {
        if config.credential.is_none() {
            logger.warn(
                "QIITA_API_TOKEN is not set; Qiita tools will fail until it is provided",
                None,
            );
        }
        let validation = Validation::new();
        let client = Arc::new(QiitaClient::new(logger.clone(), config)?);

        let article_manager = Arc::new(ArticleManager::new(
            logger.clone(),
            validation,
            client.clone(),
        ));
        let guide_manager = Arc::new(guide::MarkdownGuideManager::new(
            logger.clone(),
            client.clone(),
        ));

        let mut handlers: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();
        for action in ArticleAction::ALL {
            handlers.insert(
                action.tool_name().to_string(),
                Arc::new(ArticleTool::new(article_manager.clone(), action)),
            );
        }
        handlers.insert(guide::TOOL_NAME.to_string(), guide_manager);
        handlers.insert(
            clock::TOOL_NAME.to_string(),
            Arc::new(clock::ClockManager::new()),
        );

        Self::validate_tool_wiring(&handlers)?;

        let tool_executor = Arc::new(ToolExecutor::new(logger.clone(), handlers));
        Ok(Self {
            logger,
            client,
            tool_executor,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.client.has_credential()
    }
}
