// src/repositories/station_repository.rs
//
// Station catalog persistence.
//
// The two catalogs get two distinct write paths on purpose:
// - radiko:  add-if-missing, existing rows are never touched
// - radiru:  upsert on (area_id, station_kind_id), last write wins
//
// Every write batch runs in one IMMEDIATE transaction, so a batch is
// all-or-nothing even when cancelled half-way.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

use crate::cancellation::CancellationSignal;
use crate::db::{get_connection, ConnectionPool};
use crate::domain::{
    validate_radiko_station, validate_radiru_station, DomainError, Enumeration, NhkRadiruStation,
    RadikoStation, RadiruStationKind,
};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StationRepository: Send + Sync {
    /// True once the commercial catalog has been seeded
    async fn has_any_radiko_stations(&self, cancel: &CancellationSignal) -> AppResult<bool>;

    /// Full commercial catalog in insertion order
    async fn get_radiko_stations(&self, cancel: &CancellationSignal) -> AppResult<Vec<RadikoStation>>;

    /// Inserts stations whose id is not stored yet and returns how many were
    /// inserted. Existing rows are never modified.
    async fn add_radiko_stations_if_missing(
        &self,
        stations: &[RadikoStation],
        cancel: &CancellationSignal,
    ) -> AppResult<usize>;

    async fn has_any_radiru_stations(&self, cancel: &CancellationSignal) -> AppResult<bool>;

    /// Inserts or overwrites one row per (area, kind).
    async fn upsert_radiru_stations(
        &self,
        stations: &[NhkRadiruStation],
        cancel: &CancellationSignal,
    ) -> AppResult<()>;

    /// Fails with a `DomainError` when nothing is stored for the pair.
    async fn get_radiru_station_by_area(
        &self,
        area_id: &str,
        kind: RadiruStationKind,
        cancel: &CancellationSignal,
    ) -> AppResult<NhkRadiruStation>;

    /// Full public-broadcaster catalog ordered by area, then kind
    async fn get_radiru_stations(&self, cancel: &CancellationSignal) -> AppResult<Vec<NhkRadiruStation>>;
}

const RADIKO_COLUMNS: &str = "station_id, region_id, region_name, region_order, area, station_name,
     station_url, logo_path, area_free, time_free, station_order";

// station_kind_id must stay at index 1, see row_to_radiru_station
const RADIRU_COLUMNS: &str = "area_id, station_kind_id, area_name, station_id, station_name, api_key,
     hls_url, program_now_on_air_api_url, program_detail_api_url_template,
     daily_program_api_url_template";

pub struct SqliteStationRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteStationRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Runs blocking SQLite work off the async executor.
    async fn run<T, F>(&self, cancel: &CancellationSignal, work: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection, &CancellationSignal) -> AppResult<T> + Send + 'static,
    {
        cancel.check()?;

        let pool = Arc::clone(&self.pool);
        let cancel = cancel.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = get_connection(&pool)?;
            work(&mut conn, &cancel)
        })
        .await?
    }

    fn row_to_radiko_station(row: &Row) -> Result<RadikoStation, rusqlite::Error> {
        Ok(RadikoStation {
            station_id: row.get("station_id")?,
            region_id: row.get("region_id")?,
            region_name: row.get("region_name")?,
            region_order: row.get("region_order")?,
            area: row.get("area")?,
            station_name: row.get("station_name")?,
            station_url: row.get("station_url")?,
            logo_path: row.get("logo_path")?,
            area_free: row.get("area_free")?,
            time_free: row.get("time_free")?,
            station_order: row.get("station_order")?,
        })
    }

    fn row_to_radiru_station(row: &Row) -> Result<NhkRadiruStation, rusqlite::Error> {
        let kind_id: i32 = row.get("station_kind_id")?;
        let station_kind = RadiruStationKind::from_id(kind_id).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                1,
                Type::Integer,
                Box::new(DomainError::invalid(format!("Unknown station kind id {}", kind_id))),
            )
        })?;

        Ok(NhkRadiruStation {
            area_id: row.get("area_id")?,
            area_name: row.get("area_name")?,
            station_kind,
            station_id: row.get("station_id")?,
            station_name: row.get("station_name")?,
            api_key: row.get("api_key")?,
            hls_url: row.get("hls_url")?,
            program_now_on_air_api_url: row.get("program_now_on_air_api_url")?,
            program_detail_api_url_template: row.get("program_detail_api_url_template")?,
            daily_program_api_url_template: row.get("daily_program_api_url_template")?,
        })
    }
}

#[async_trait]
impl StationRepository for SqliteStationRepository {
    async fn has_any_radiko_stations(&self, cancel: &CancellationSignal) -> AppResult<bool> {
        self.run(cancel, |conn, _| {
            let exists: bool =
                conn.query_row("SELECT EXISTS(SELECT 1 FROM radiko_stations)", [], |row| row.get(0))?;
            Ok(exists)
        })
        .await
    }

    async fn get_radiko_stations(&self, cancel: &CancellationSignal) -> AppResult<Vec<RadikoStation>> {
        self.run(cancel, |conn, _| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM radiko_stations ORDER BY rowid",
                RADIKO_COLUMNS
            ))?;

            let stations = stmt
                .query_map([], Self::row_to_radiko_station)?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(stations)
        })
        .await
    }

    async fn add_radiko_stations_if_missing(
        &self,
        stations: &[RadikoStation],
        cancel: &CancellationSignal,
    ) -> AppResult<usize> {
        for station in stations {
            validate_radiko_station(station)?;
        }
        if stations.is_empty() {
            return Ok(0);
        }

        let stations = stations.to_vec();
        let count = stations.len();
        let inserted = self
            .run(cancel, move |conn, cancel| {
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
                let mut inserted = 0;
                {
                    let mut stmt = tx.prepare(&format!(
                        "INSERT INTO radiko_stations ({})
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                         ON CONFLICT(station_id) DO NOTHING",
                        RADIKO_COLUMNS
                    ))?;

                    for station in &stations {
                        cancel.check()?;
                        inserted += stmt.execute(params![
                            station.station_id,
                            station.region_id,
                            station.region_name,
                            station.region_order,
                            station.area,
                            station.station_name,
                            station.station_url,
                            station.logo_path,
                            station.area_free,
                            station.time_free,
                            station.station_order,
                        ])?;
                    }
                }
                tx.commit()?;
                Ok(inserted)
            })
            .await?;

        log::debug!(
            "radiko catalog: {} of {} stations were new",
            inserted,
            count
        );
        Ok(inserted)
    }

    async fn has_any_radiru_stations(&self, cancel: &CancellationSignal) -> AppResult<bool> {
        self.run(cancel, |conn, _| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM nhk_radiru_stations)",
                [],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
    }

    async fn upsert_radiru_stations(
        &self,
        stations: &[NhkRadiruStation],
        cancel: &CancellationSignal,
    ) -> AppResult<()> {
        for station in stations {
            validate_radiru_station(station)?;
        }
        if stations.is_empty() {
            return Ok(());
        }

        let stations = stations.to_vec();
        let count = stations.len();
        self.run(cancel, move |conn, cancel| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            {
                let mut stmt = tx.prepare(&format!(
                    "INSERT INTO nhk_radiru_stations ({})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                     ON CONFLICT(area_id, station_kind_id) DO UPDATE SET
                        area_name = excluded.area_name,
                        station_id = excluded.station_id,
                        station_name = excluded.station_name,
                        api_key = excluded.api_key,
                        hls_url = excluded.hls_url,
                        program_now_on_air_api_url = excluded.program_now_on_air_api_url,
                        program_detail_api_url_template = excluded.program_detail_api_url_template,
                        daily_program_api_url_template = excluded.daily_program_api_url_template",
                    RADIRU_COLUMNS
                ))?;

                for station in &stations {
                    cancel.check()?;
                    stmt.execute(params![
                        station.area_id,
                        station.station_kind.id(),
                        station.area_name,
                        station.station_id,
                        station.station_name,
                        station.api_key,
                        station.hls_url,
                        station.program_now_on_air_api_url,
                        station.program_detail_api_url_template,
                        station.daily_program_api_url_template,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(())
        })
        .await?;

        log::debug!("radiru catalog: upserted {} stations", count);
        Ok(())
    }

    async fn get_radiru_station_by_area(
        &self,
        area_id: &str,
        kind: RadiruStationKind,
        cancel: &CancellationSignal,
    ) -> AppResult<NhkRadiruStation> {
        let area_id = area_id.to_string();
        self.run(cancel, move |conn, _| {
            let station = conn
                .query_row(
                    &format!(
                        "SELECT {} FROM nhk_radiru_stations
                         WHERE area_id = ?1 AND station_kind_id = ?2",
                        RADIRU_COLUMNS
                    ),
                    params![area_id, kind.id()],
                    Self::row_to_radiru_station,
                )
                .optional()?;

            match station {
                Some(station) => Ok(station),
                None => Err(DomainError::not_found(format!(
                    "{} station for area '{}'",
                    kind, area_id
                ))
                .into()),
            }
        })
        .await
    }

    async fn get_radiru_stations(&self, cancel: &CancellationSignal) -> AppResult<Vec<NhkRadiruStation>> {
        self.run(cancel, |conn, _| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM nhk_radiru_stations ORDER BY area_id, station_kind_id",
                RADIRU_COLUMNS
            ))?;

            let stations = stmt
                .query_map([], Self::row_to_radiru_station)?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(stations)
        })
        .await
    }
}
