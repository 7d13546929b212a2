#![allow(dead_code)]

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub fn restore_env(key: &str, previous: Option<String>) {
    match previous {
        Some(value) => std::env::set_var(key, value),
        None => std::env::remove_var(key),
    }
}

#[derive(Clone, Debug)]
pub enum StubBehavior {
    Reply {
        status: u16,
        reason: &'static str,
        content_type: &'static str,
        body: String,
    },
    /// Promise a longer body than is sent, then close the connection.
    Truncated {
        status: u16,
        reason: &'static str,
        partial_body: &'static str,
    },
    /// Accept the connection and never answer.
    Hang,
}

impl StubBehavior {
    pub fn json(status: u16, reason: &'static str, body: serde_json::Value) -> Self {
        StubBehavior::Reply {
            status,
            reason,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, reason: &'static str, body: &str) -> Self {
        StubBehavior::Reply {
            status,
            reason,
            content_type: "text/plain",
            body: body.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body must be JSON")
    }
}

/// Minimal HTTP/1.1 server answering every request with the same behavior.
pub struct StubServer {
    addr: std::net::SocketAddr,
    connections: Arc<AtomicUsize>,
    requests: Arc<StdMutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start(behavior: StubBehavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let addr = listener.local_addr().expect("stub addr");
        let connections = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(StdMutex::new(Vec::new()));

        let conn_counter = connections.clone();
        let recorded = requests.clone();
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                conn_counter.fetch_add(1, Ordering::SeqCst);
                let behavior = behavior.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let mut reader = BufReader::new(stream);
                    let Some(request) = read_request(&mut reader).await else {
                        return;
                    };
                    recorded.lock().expect("requests lock").push(request);
                    match behavior {
                        StubBehavior::Reply {
                            status,
                            reason,
                            content_type,
                            body,
                        } => {
                            let payload = format!(
                                "HTTP/1.1 {} {}\r\ncontent-type: {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                                status,
                                reason,
                                content_type,
                                body.len(),
                                body
                            );
                            let mut stream = reader.into_inner();
                            let _ = stream.write_all(payload.as_bytes()).await;
                            let _ = stream.shutdown().await;
                        }
                        StubBehavior::Truncated {
                            status,
                            reason,
                            partial_body,
                        } => {
                            let payload = format!(
                                "HTTP/1.1 {} {}\r\ncontent-type: text/plain\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                                status,
                                reason,
                                partial_body.len() + 64,
                                partial_body
                            );
                            let mut stream = reader.into_inner();
                            let _ = stream.write_all(payload.as_bytes()).await;
                            let _ = stream.shutdown().await;
                        }
                        StubBehavior::Hang => {
                            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
                        }
                    }
                });
            }
        });

        Self {
            addr,
            connections,
            requests,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().expect("one request")
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn read_request(reader: &mut BufReader<tokio::net::TcpStream>) -> Option<RecordedRequest> {
    let mut request_line = String::new();
    reader.read_line(&mut request_line).await.ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        let read = reader.read_line(&mut line).await.ok()?;
        if read == 0 || line == "\r\n" || line == "\n" {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_lowercase(), value.trim().to_string());
        }
    }

    let length = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).await.ok()?;

    Some(RecordedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    })
}

/// A port nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{}", addr)
}

pub fn sample_article(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("Article {}", id),
        "body": "# Heading\n\nText",
        "rendered_body": "<h1>Heading</h1><p>Text</p>",
        "url": format!("https://qiita.com/alice/items/{}", id),
        "private": true,
        "tags": [{"name": "Rust", "versions": []}],
        "created_at": "2024-05-01T10:00:00+09:00",
        "updated_at": "2024-05-02T10:00:00+09:00",
        "likes_count": 4,
        "user": {
            "id": "alice",
            "name": "Alice",
            "items_count": 10,
            "facebook_id": "",
            "followees_count": 1,
            "followers_count": 2,
            "github_login_name": "alice",
            "profile_image_url": "https://example.com/alice.png",
            "team_only": false,
            "twitter_screen_name": "alice",
            "website_url": "https://alice.dev"
        }
    })
}
