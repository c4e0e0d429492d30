use std::sync::Arc;

use outlay::{api, init, utils::settings::load_config, OutlayError};
use outlay_storage_json::JsonBookStorage;

#[tokio::main]
async fn main() {
    init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "server stopped");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), OutlayError> {
    let (_, config) = load_config()?;
    let data_dir = config.resolve_data_dir();
    let storage = JsonBookStorage::new(&data_dir)?;
    tracing::info!(path = %data_dir.display(), "storage ready");

    let addr = config.socket_addr();
    let router = api::build_router(api::AppState::new(Arc::new(storage), config));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Starting Outlay API server on {}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}
