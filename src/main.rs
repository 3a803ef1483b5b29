// src/main.rs
//
// radiokeep [catalog.json]
//
// Opens the station database, optionally refreshes both catalogs from a
// JSON file, and prints what is stored.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use radiokeep::application::AppState;
use radiokeep::config::AppConfig;
use radiokeep::db::{create_connection_pool, get_connection, initialize_database};
use radiokeep::integrations::JsonFileStationSource;
use radiokeep::{AppOperationEvent, AppToastEvent, CancellationSource};

const DEFAULT_CATALOG: &str = "stations.json";
const BUS_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

async fn log_operation(event: AppOperationEvent) -> anyhow::Result<()> {
    if event.succeeded {
        log::info!("[{}/{}] {}", event.category, event.action, event.message);
    } else {
        log::warn!("[{}/{}] {}", event.category, event.action, event.message);
    }
    Ok(())
}

async fn log_toast(event: AppToastEvent) -> anyhow::Result<()> {
    log::info!("toast: {}", event.message);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. LOGGING
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. INFRASTRUCTURE
    let config = AppConfig::from_env()?;
    let catalog_path = std::env::args_os().nth(1).map(PathBuf::from);

    log::info!("Using database at {}", config.database_path.display());
    let pool = Arc::new(create_connection_pool(&config)?);
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
    }

    let source = Arc::new(JsonFileStationSource::new(
        catalog_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG)),
    ));
    let state = AppState::new(config, pool.clone(), source);

    // 3. SUBSCRIBERS
    state.event_bus.subscribe_operations(log_operation);
    state.event_bus.subscribe_toasts(log_toast);

    // 4. CANCELLATION
    let cancel_source = CancellationSource::new();
    let cancel = cancel_source.signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling");
            cancel_source.cancel();
        }
    });

    // 5. REFRESH
    let service = state.station_catalog_service.clone();
    if let Some(path) = &catalog_path {
        log::info!("Refreshing station catalogs from {}", path.display());

        if let Err(err) = service.refresh_radiko_stations(&cancel).await {
            eprintln!("radiko: {}", state.error_response(&err).message);
        }
        if let Err(err) = service.refresh_radiru_stations(&cancel).await {
            eprintln!("radiru: {}", state.error_response(&err).message);
        }
    }

    // 6. SUMMARY
    let summary = state.catalog_summary().await;
    state.event_bus.shutdown(BUS_DRAIN_TIMEOUT).await;
    let summary = summary?;

    println!("radiko stations: {}", summary.radiko.len());
    for station in &summary.radiko {
        println!("  {:<12} {}", station.station_id, station.station_name);
    }
    println!("NHK stations:    {}", summary.radiru.len());
    for station in &summary.radiru {
        println!(
            "  {} {:<10} {}",
            station.area_id, station.station_kind, station.station_name
        );
    }
    log::debug!("Database stats: {:?}", summary.stats);

    Ok(())
}
