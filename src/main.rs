#[tokio::main]
async fn main() {
    // Delegate to the server framework entry point.
    if cluster_probe::run_with_config().await.is_err() {
        std::process::exit(1);
    }
}
