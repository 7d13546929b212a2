use crate::errors::ApiError;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    InvalidParams,
    Denied,
    NotFound,
    Timeout,
    Retryable,
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub retryable: bool,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            hint: None,
            details: None,
            retryable: matches!(kind, ToolErrorKind::Timeout | ToolErrorKind::Retryable),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidParams, "INVALID_PARAMS", message)
    }

    pub fn denied(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Denied, "DENIED", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound, "NOT_FOUND", message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Timeout, "TIMEOUT", message)
    }

    pub fn retryable(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Retryable, "RETRYABLE", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Internal, "INTERNAL", message)
    }

    /// Text shown to the agent when a tool call fails.
    pub fn render(&self) -> String {
        let mut out = format!("Error: {}", self.message);
        if let Some(hint) = &self.hint {
            out.push_str("\nHint: ");
            out.push_str(hint);
        }
        out
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ToolError {}

impl From<std::io::Error> for ToolError {
    fn from(err: std::io::Error) -> Self {
        ToolError::internal(err.to_string())
    }
}

impl From<ApiError> for ToolError {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        match err {
            ApiError::MissingCredential => ToolError::invalid_params(message)
                .with_code("MISSING_CREDENTIAL")
                .with_hint("Export QIITA_API_TOKEN with a Qiita personal access token."),
            ApiError::Transport { timed_out: true, .. } => {
                ToolError::timeout(message).with_code("TRANSPORT_TIMEOUT")
            }
            ApiError::Transport { .. } => ToolError::retryable(message).with_code("TRANSPORT"),
            ApiError::RemoteApi { status, .. } => {
                let details = serde_json::json!({ "status": status });
                let err = match status {
                    401 | 403 => ToolError::denied(message)
                        .with_hint("Check that QIITA_API_TOKEN is valid and has the required scopes."),
                    404 => ToolError::not_found(message),
                    429 | 500..=599 => ToolError::retryable(message),
                    _ => ToolError::invalid_params(message),
                };
                err.with_code("REMOTE_API").with_details(details)
            }
            ApiError::Decode(_) => ToolError::internal(message).with_code("DECODE"),
        }
    }
}
