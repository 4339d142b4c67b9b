use dalle_gateway::server;

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    // Every startup failure is fatal; the exit-code mapping lives here so
    // the boot sequence itself stays testable.
    if let Err(e) = server::run().await {
        tracing::error!("Fatal error during startup: {:#}", e);
        std::process::exit(1);
    }
}
