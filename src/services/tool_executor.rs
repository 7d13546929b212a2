use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::errors::ToolError;
use crate::services::logger::Logger;

#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn handle(&self, args: Value) -> Result<String, ToolError>;
}

/// Outcome of one tool call. Failures are values, never panics or protocol
/// errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolResponse {
    Success(String),
    Failure(String),
}

impl ToolResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, ToolResponse::Failure(_))
    }

    pub fn text(&self) -> &str {
        match self {
            ToolResponse::Success(text) | ToolResponse::Failure(text) => text,
        }
    }
}

impl From<Result<String, ToolError>> for ToolResponse {
    fn from(result: Result<String, ToolError>) -> Self {
        match result {
            Ok(text) => ToolResponse::Success(text),
            Err(err) => ToolResponse::Failure(err.render()),
        }
    }
}

#[derive(Clone)]
pub struct ToolExecutor {
    logger: Logger,
    handlers: Arc<HashMap<String, Arc<dyn ToolHandler>>>,
}

impl ToolExecutor {
    pub fn new(logger: Logger, handlers: HashMap<String, Arc<dyn ToolHandler>>) -> Self {
        Self {
            logger: logger.child("executor"),
            handlers: Arc::new(handlers),
        }
    }

    pub fn has_handler(&self, tool: &str) -> bool {
        self.handlers.contains_key(tool)
    }

    pub fn handler_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn execute(&self, tool: &str, args: Value) -> ToolResponse {
        let trace_id = uuid::Uuid::new_v4().to_string();
        let Some(handler) = self.handlers.get(tool).cloned() else {
            self.logger.warn(
                "unknown tool",
                Some(&serde_json::json!({"tool": tool, "trace_id": trace_id})),
            );
            return ToolResponse::from(Err::<String, _>(ToolError::not_found(format!(
                "Unknown tool: {}",
                tool
            ))));
        };

        let started = Instant::now();
        let result = handler.handle(args).await;
        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(text) => self.logger.info(
                "tool call succeeded",
                Some(&serde_json::json!({
                    "tool": tool,
                    "trace_id": trace_id,
                    "duration_ms": duration_ms,
                    "result_chars": text.chars().count(),
                })),
            ),
            Err(err) => self.logger.warn(
                "tool call failed",
                Some(&serde_json::json!({
                    "tool": tool,
                    "trace_id": trace_id,
                    "duration_ms": duration_ms,
                    "kind": err.kind,
                    "code": err.code,
                    "retryable": err.retryable,
                })),
            ),
        }
        result.into()
    }
}
