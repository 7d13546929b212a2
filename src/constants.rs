pub mod server {
    pub const PROTOCOL_VERSION: &str = "2025-06-18";
    pub const NAME: &str = "qiita-mcp";
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

pub mod env {
    pub const API_TOKEN: &str = "QIITA_API_TOKEN";
    pub const API_BASE_URL: &str = "QIITA_API_BASE_URL";
    pub const API_TIMEOUT_MS: &str = "QIITA_API_TIMEOUT_MS";
    pub const LOG_LEVEL: &str = "QIITA_MCP_LOG_LEVEL";
    pub const LOG_LEVEL_FALLBACK: &str = "LOG_LEVEL";
    pub const LOG_FORMAT: &str = "QIITA_MCP_LOG_FORMAT";
}

pub mod network {
    pub const QIITA_API_BASE_URL: &str = "https://qiita.com/api/v2";
    pub const TIMEOUT_API_REQUEST_MS: u64 = 30_000;
    pub const TIMEOUT_CONNECTION_MS: u64 = 5_000;
}

pub mod pagination {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_PER_PAGE: u32 = 20;
    pub const MAX_PAGE: u32 = 100;
    pub const MAX_PER_PAGE: u32 = 100;
}

pub mod articles {
    /// Qiita article holding the markdown syntax reference.
    pub const MARKDOWN_GUIDE_ITEM_ID: &str = "c686397e4a0f4f11683d";
    pub const MARKDOWN_GUIDE_FALLBACK: &str = "Markdown content was not found.";
    pub const DEFAULT_PRIVATE: bool = true;
}

pub mod clock {
    /// Asia/Tokyo has no daylight saving time.
    pub const JST_OFFSET_SECONDS: i32 = 9 * 3600;
}
