// src/application/state.rs

use std::sync::Arc;

use crate::application::error_handling::ErrorResponse;
use crate::cancellation::CancellationSignal;
use crate::config::AppConfig;
use crate::db::{get_connection, get_database_stats, ConnectionPool, DatabaseStats};
use crate::domain::{NhkRadiruStation, RadikoStation};
use crate::error::{AppError, AppResult};
use crate::events::{create_event_bus, EventBus};
use crate::integrations::StationCatalogSource;
use crate::repositories::SqliteStationRepository;
use crate::services::StationCatalogService;

/// Everything a host needs to serve station catalog requests.
/// All fields are Arc-wrapped for sharing across request handlers.
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: Arc<ConnectionPool>,
    pub event_bus: Arc<EventBus>,
    pub station_catalog_service: Arc<StationCatalogService>,
}

/// What is stored right now
#[derive(Debug)]
pub struct CatalogSummary {
    pub radiko: Vec<RadikoStation>,
    pub radiru: Vec<NhkRadiruStation>,
    pub stats: DatabaseStats,
}

impl AppState {
    /// Wires the bus, repository and service over an initialized pool.
    ///
    /// Must run inside a Tokio runtime.
    pub fn new(
        config: AppConfig,
        pool: Arc<ConnectionPool>,
        source: Arc<dyn StationCatalogSource>,
    ) -> Self {
        let event_bus = Arc::new(create_event_bus(config.bus.clone()));
        let station_repo = Arc::new(SqliteStationRepository::new(Arc::clone(&pool)));

        let station_catalog_service = Arc::new(StationCatalogService::new(
            station_repo,
            source,
            event_bus.clone(),
            event_bus.clone(),
        ));

        Self {
            config: Arc::new(config),
            pool,
            event_bus,
            station_catalog_service,
        }
    }

    /// Reads both catalogs and storage stats. Not cancellable, so a host can
    /// still report state after an interrupted refresh.
    pub async fn catalog_summary(&self) -> AppResult<CatalogSummary> {
        let none = CancellationSignal::none();
        let radiko = self.station_catalog_service.get_radiko_stations(&none).await?;
        let radiru = self.station_catalog_service.get_radiru_stations(&none).await?;

        let pool = Arc::clone(&self.pool);
        let stats = tokio::task::spawn_blocking(move || {
            let conn = get_connection(&pool)?;
            get_database_stats(&conn)
        })
        .await??;

        Ok(CatalogSummary {
            radiko,
            radiru,
            stats,
        })
    }

    /// Maps an error for the boundary using the configured environment.
    pub fn error_response(&self, error: &AppError) -> ErrorResponse {
        ErrorResponse::from_app_error(error, self.config.environment)
    }
}
