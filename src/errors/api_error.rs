use thiserror::Error;

/// Failure of a single Qiita API call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Qiita API token is not provided. Set QIITA_API_TOKEN before using this tool.")]
    MissingCredential,

    #[error("Qiita API request failed: {message}")]
    Transport { message: String, timed_out: bool },

    #[error("Qiita API returned {status}: {status_text}\n{body}")]
    RemoteApi {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Qiita API returned a malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RemoteApi { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport {
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }
}
