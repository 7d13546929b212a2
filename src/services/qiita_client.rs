use crate::constants::{articles, network, server};
use crate::errors::{ApiError, ToolError};
use crate::services::config::{ClientConfig, Credential};
use crate::services::logger::Logger;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};
use url::Url;

/// Opaque Qiita item id. Never rewritten: blank ids and ids with
/// surrounding whitespace are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemId(String);

impl ItemId {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || raw.trim() != raw {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions: Option<Vec<String>>,
}

/// Body of `POST /items`. Unset options are left out of the JSON entirely;
/// Qiita treats an explicit `null` differently from an absent key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewArticle {
    pub title: String,
    pub body: String,
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweet: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_url_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide: Option<bool>,
}

/// Body of `PATCH /items/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleUpdate {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_url_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide: Option<bool>,
}

/// Thin client for the Qiita v2 API. One call, one request; nothing is
/// retried or cached.
#[derive(Clone)]
pub struct QiitaClient {
    logger: Logger,
    client: Client,
    base_url: Url,
    credential: Option<Credential>,
}

impl QiitaClient {
    pub fn new(logger: Logger, config: ClientConfig) -> Result<Self, ToolError> {
        let connect_timeout_ms = config.timeout_ms.min(network::TIMEOUT_CONNECTION_MS);
        let client = Client::builder()
            .user_agent(format!("{}/{}", server::NAME, server::VERSION))
            .connect_timeout(Duration::from_millis(connect_timeout_ms))
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| ToolError::internal(format!("Failed to build HTTP client: {}", err)))?;
        Ok(Self {
            logger: logger.child("qiita"),
            client,
            base_url: config.base_url,
            credential: config.credential,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    fn credential(&self) -> Result<&Credential, ApiError> {
        self.credential.as_ref().ok_or(ApiError::MissingCredential)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Value, ApiError> {
        let credential = self.credential()?;
        let authorization =
            HeaderValue::from_str(&credential.bearer()).map_err(|err| ApiError::Transport {
                message: format!("Authorization header could not be built: {}", err),
                timed_out: false,
            })?;

        let path = url.path().to_string();
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            request = request.json(body);
        }

        let started = Instant::now();
        let response = request.send().await.map_err(|err| {
            self.logger.warn(
                "request failed",
                Some(&serde_json::json!({
                    "method": method.as_str(),
                    "path": path,
                    "timed_out": err.is_timeout(),
                })),
            );
            ApiError::from(err)
        })?;
        let status = response.status();
        self.logger.debug(
            "response",
            Some(&serde_json::json!({
                "method": method.as_str(),
                "path": path,
                "status": status.as_u16(),
                "duration_ms": started.elapsed().as_millis() as u64,
            })),
        );

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    self.logger.warn(
                        "error body unreadable",
                        Some(&serde_json::json!({
                            "method": method.as_str(),
                            "path": path,
                            "status": status.as_u16(),
                            "error": err.to_string(),
                        })),
                    );
                    format!("<body unavailable: {}>", err)
                }
            };
            return Err(ApiError::RemoteApi {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn get(&self, url: Url) -> Result<Value, ApiError> {
        self.send::<Value>(Method::GET, url, None).await
    }

    pub async fn list_authenticated_user_items(
        &self,
        page: NonZeroU32,
        per_page: NonZeroU32,
    ) -> Result<Vec<Value>, ApiError> {
        let mut url = self.endpoint(&["authenticated_user", "items"]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());
        match self.get(url).await? {
            Value::Array(items) => Ok(items),
            other => Err(ApiError::Decode(format!(
                "expected a JSON array of items, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub async fn get_item(&self, id: &ItemId) -> Result<Value, ApiError> {
        let url = self.endpoint(&["items", id.as_str()]);
        self.get(url).await
    }

    pub async fn create_item(&self, article: &NewArticle) -> Result<Value, ApiError> {
        let url = self.endpoint(&["items"]);
        self.send(Method::POST, url, Some(article)).await
    }

    pub async fn update_item(&self, id: &ItemId, update: &ArticleUpdate) -> Result<Value, ApiError> {
        let url = self.endpoint(&["items", id.as_str()]);
        self.send(Method::PATCH, url, Some(update)).await
    }

    /// Markdown body of the fixed syntax-guide article.
    pub async fn get_markdown_guide(&self) -> Result<String, ApiError> {
        let url = self.endpoint(&["items", articles::MARKDOWN_GUIDE_ITEM_ID]);
        let item = self.get(url).await?;
        Ok(item
            .get("body")
            .and_then(|v| v.as_str())
            .filter(|body| !body.is_empty())
            .unwrap_or(articles::MARKDOWN_GUIDE_FALLBACK)
            .to_string())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
