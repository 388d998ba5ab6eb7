#[tokio::main]
async fn main() {
    if let Err(e) = hoops_league_be::start_server().await {
        tracing::error!("Server failed: {}", e);
        eprintln!("Server failed: {e}");
        std::process::exit(1);
    }
}
