// src/services/station_catalog_service.rs
//
// Station catalog orchestration.
//
// Flow of a refresh: fetch from the source, persist with the catalog's own
// write semantics, then report the outcome on the notification bus.
// Failures are reported AND returned to the caller.

use std::sync::Arc;

use crate::cancellation::CancellationSignal;
use crate::domain::{
    CodeIdentified, NhkRadiruStation, RadikoStation, RadiruAreaKind, RadiruStationEntry,
    RadiruStationKind,
};
use crate::error::{AppError, AppResult};
use crate::events::{
    AppOperationEvent, AppOperationEventPublisher, AppToastEvent, AppToastEventPublisher,
};
use crate::integrations::StationCatalogSource;
use crate::repositories::StationRepository;

pub const STATION_CATEGORY: &str = "station";
pub const ACTION_REFRESH_RADIKO: &str = "refresh_radiko";
pub const ACTION_REFRESH_RADIRU: &str = "refresh_radiru";

/// Shown in place of internal error detail
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to update the station list.";

/// Counts reported by a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    pub fetched: usize,
    /// Rows inserted (radiko) or upserted (radiru)
    pub written: usize,
}

pub struct StationCatalogService {
    station_repo: Arc<dyn StationRepository>,
    source: Arc<dyn StationCatalogSource>,
    operation_publisher: Arc<dyn AppOperationEventPublisher>,
    toast_publisher: Arc<dyn AppToastEventPublisher>,
}

impl StationCatalogService {
    pub fn new(
        station_repo: Arc<dyn StationRepository>,
        source: Arc<dyn StationCatalogSource>,
        operation_publisher: Arc<dyn AppOperationEventPublisher>,
        toast_publisher: Arc<dyn AppToastEventPublisher>,
    ) -> Self {
        Self {
            station_repo,
            source,
            operation_publisher,
            toast_publisher,
        }
    }

    pub async fn is_radiko_catalog_initialized(&self, cancel: &CancellationSignal) -> AppResult<bool> {
        self.station_repo.has_any_radiko_stations(cancel).await
    }

    pub async fn is_radiru_catalog_initialized(&self, cancel: &CancellationSignal) -> AppResult<bool> {
        self.station_repo.has_any_radiru_stations(cancel).await
    }

    /// Adds commercial stations not seen before. Known stations keep their
    /// stored values.
    pub async fn refresh_radiko_stations(&self, cancel: &CancellationSignal) -> AppResult<RefreshSummary> {
        match self.sync_radiko(cancel).await {
            Ok(summary) => {
                log::info!(
                    "radiko refresh: {} fetched, {} added",
                    summary.fetched,
                    summary.written
                );
                let message = format!("Added {} new stations", summary.written);
                self.operation_publisher
                    .publish_operation(
                        AppOperationEvent::succeeded(STATION_CATEGORY, ACTION_REFRESH_RADIKO, message),
                        cancel,
                    )
                    .await?;
                Ok(summary)
            }
            Err(err) => {
                self.report_failure(ACTION_REFRESH_RADIKO, &err, cancel).await;
                Err(err)
            }
        }
    }

    /// Overwrites the public-broadcaster catalog with the source's view.
    pub async fn refresh_radiru_stations(&self, cancel: &CancellationSignal) -> AppResult<RefreshSummary> {
        match self.sync_radiru(cancel).await {
            Ok(summary) => {
                log::info!("radiru refresh: {} stations upserted", summary.written);
                let message = format!("Updated {} NHK stations", summary.written);
                self.operation_publisher
                    .publish_operation(
                        AppOperationEvent::succeeded(
                            STATION_CATEGORY,
                            ACTION_REFRESH_RADIRU,
                            message.clone(),
                        ),
                        cancel,
                    )
                    .await?;
                self.toast_publisher
                    .publish_toast(AppToastEvent::success(message), cancel)
                    .await?;
                Ok(summary)
            }
            Err(err) => {
                self.report_failure(ACTION_REFRESH_RADIRU, &err, cancel).await;
                Err(err)
            }
        }
    }

    pub async fn get_radiko_stations(&self, cancel: &CancellationSignal) -> AppResult<Vec<RadikoStation>> {
        self.station_repo.get_radiko_stations(cancel).await
    }

    /// Commercial stations a listener in `area` can play.
    ///
    /// Stations of the listener's own area are always playable. With the
    /// area-free subscription enabled, stations flagged `area_free` are added
    /// regardless of their area. An empty area yields nothing.
    pub async fn get_available_radiko_stations(
        &self,
        area: &str,
        area_free_enabled: bool,
        cancel: &CancellationSignal,
    ) -> AppResult<Vec<RadikoStation>> {
        if area.trim().is_empty() {
            log::debug!("No listening area known; no radiko stations available");
            return Ok(Vec::new());
        }

        let stations = self.station_repo.get_radiko_stations(cancel).await?;
        Ok(stations
            .into_iter()
            .filter(|station| station.area == area || (area_free_enabled && station.area_free))
            .collect())
    }

    pub async fn get_radiru_stations(&self, cancel: &CancellationSignal) -> AppResult<Vec<NhkRadiruStation>> {
        self.station_repo.get_radiru_stations(cancel).await
    }

    pub async fn get_radiru_station(
        &self,
        area: RadiruAreaKind,
        kind: RadiruStationKind,
        cancel: &CancellationSignal,
    ) -> AppResult<NhkRadiruStation> {
        self.station_repo
            .get_radiru_station_by_area(area.code_id(), kind, cancel)
            .await
    }

    /// Every selectable (area, kind) pair, independent of what is stored.
    pub fn list_radiru_station_entries(&self) -> Vec<RadiruStationEntry> {
        RadiruStationEntry::all()
    }

    async fn sync_radiko(&self, cancel: &CancellationSignal) -> AppResult<RefreshSummary> {
        cancel.check()?;
        let stations = self.source.fetch_radiko_stations().await?;
        let written = self
            .station_repo
            .add_radiko_stations_if_missing(&stations, cancel)
            .await?;

        Ok(RefreshSummary {
            fetched: stations.len(),
            written,
        })
    }

    async fn sync_radiru(&self, cancel: &CancellationSignal) -> AppResult<RefreshSummary> {
        cancel.check()?;
        let stations = self.source.fetch_radiru_stations().await?;
        self.station_repo.upsert_radiru_stations(&stations, cancel).await?;

        Ok(RefreshSummary {
            fetched: stations.len(),
            written: stations.len(),
        })
    }

    async fn report_failure(&self, action: &str, err: &AppError, cancel: &CancellationSignal) {
        if err.is_cancelled() {
            log::info!("{}: cancelled", action);
            return;
        }

        let message = match err.as_domain() {
            Some(domain) => {
                log::warn!("{}: {}", action, domain);
                domain.user_message().to_string()
            }
            None => {
                log::error!("{} failed: {:?}", action, err);
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        };

        let event = AppOperationEvent::failed(STATION_CATEGORY, action, message);
        if let Err(publish_err) = self.operation_publisher.publish_operation(event, cancel).await {
            log::warn!("{}: failure event not published: {}", action, publish_err);
        }
    }
}
