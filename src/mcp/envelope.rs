use crate::services::tool_executor::ToolResponse;
use serde_json::Value;

/// MCP `CallToolResult` for a tool response. `isError` is only present on
/// failure.
pub fn build_call_result(response: &ToolResponse) -> Value {
    let mut result = serde_json::json!({
        "content": [ { "type": "text", "text": response.text() } ]
    });
    if response.is_error() {
        if let Some(obj) = result.as_object_mut() {
            obj.insert("isError".to_string(), Value::Bool(true));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_has_no_error_flag() {
        let result = build_call_result(&ToolResponse::Success("ok".to_string()));
        assert_eq!(result["content"][0]["type"], "text");
        assert_eq!(result["content"][0]["text"], "ok");
        assert!(result.get("isError").is_none());
    }

    #[test]
    fn failure_sets_error_flag() {
        let result = build_call_result(&ToolResponse::Failure("Error: boom".to_string()));
        assert_eq!(result["isError"], true);
        assert_eq!(result["content"][0]["text"], "Error: boom");
    }
}
