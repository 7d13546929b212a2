#[tokio::main]
async fn main() {
    if let Err(err) = qiita_mcp::mcp::server::run_stdio().await {
        eprintln!("qiita-mcp: {}", err);
        std::process::exit(1);
    }
}
