use crate::constants::clock::JST_OFFSET_SECONDS;
use crate::errors::ToolError;
use crate::services::tool_executor::ToolHandler;
use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Value;

pub const TOOL_NAME: &str = "get_current_datetime";

/// Reports wall-clock time in Japan so articles can be dated correctly.
#[derive(Clone, Default)]
pub struct ClockManager;

impl ClockManager {
    pub fn new() -> Self {
        Self
    }

    pub fn describe(&self, now: DateTime<Utc>) -> Result<String, ToolError> {
        let offset = FixedOffset::east_opt(JST_OFFSET_SECONDS)
            .ok_or_else(|| ToolError::internal("Invalid JST offset"))?;
        let local = now.with_timezone(&offset);
        Ok(format!(
            "Current date and time (JST): {}",
            local.format("%Y/%m/%d %H:%M:%S")
        ))
    }
}

#[async_trait::async_trait]
impl ToolHandler for ClockManager {
    async fn handle(&self, _args: Value) -> Result<String, ToolError> {
        self.describe(Utc::now())
    }
}
