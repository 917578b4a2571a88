use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pendelkoll::alerts::AlertLedger;
use pendelkoll::cache::CacheConfig;
use pendelkoll::config::AppConfig;
use pendelkoll::feed::SnapshotFeed;
use pendelkoll::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pendelkoll=info,tower_http=info".into()),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(
        SnapshotFeed::new(&config.snapshot_path),
        &CacheConfig::for_refresh(config.refresh_interval()),
        config.catalog.clone(),
        config.directory(),
    );

    // Rebuild on a fixed interval and log each critical journey once
    let refresh_state = state.clone();
    let refresh_interval = config.refresh_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_interval);
        let mut ledger = AlertLedger::new();
        loop {
            interval.tick().await;
            match refresh_state.refresh().await {
                Ok(catalog) => {
                    for journey in ledger.record_new(catalog.live(), &refresh_state.config.policy) {
                        warn!(
                            journey = journey.id(),
                            reason = %journey.reason_or_delay_summary(),
                            "critical journey"
                        );
                    }
                }
                Err(e) => warn!("refresh failed: {e}"),
            }
        }
    });

    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(addr = %config.bind, snapshot = %config.snapshot_path.display(), "pendelkoll listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
