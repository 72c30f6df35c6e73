use sectorcap::dashboard::{self, DashboardConfig};
use sectorcap::logging::{self, LogFormat};
use sectorcap::AsyncSectorTracker;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = logging::init_logging(LogFormat::from_env()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let tracker = AsyncSectorTracker::builder().build();
    let config = DashboardConfig::default();
    info!(
        data_file = sectorcap::config::DEFAULT_DATA_FILE,
        "Seguimiento de Market Cap por Sector (CoinGecko)"
    );

    if let Err(e) = dashboard::run_server(tracker.clone(), config).await {
        error!(error = %e, "Dashboard server failed");
    }

    if let Err(e) = tracker.close().await {
        error!(error = %e, "Failed to release tracker");
    }
}
