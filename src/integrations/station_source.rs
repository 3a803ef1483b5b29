// src/integrations/station_source.rs
//
// Where station catalogs come from.
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Returns domain values only, never touches persistence
// - Network fetchers plug in behind the same trait

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{NhkRadiruStation, RadikoStation};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StationCatalogSource: Send + Sync {
    async fn fetch_radiko_stations(&self) -> AppResult<Vec<RadikoStation>>;

    async fn fetch_radiru_stations(&self) -> AppResult<Vec<NhkRadiruStation>>;
}

/// On-disk catalog document
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogDocument {
    radiko: Vec<RadikoStation>,
    radiru: Vec<NhkRadiruStation>,
}

/// Reads both catalogs from one JSON file of the form
/// `{ "radiko": [...], "radiru": [...] }`.
///
/// The file is re-read on every fetch so edits are picked up by the next
/// refresh.
pub struct JsonFileStationSource {
    path: PathBuf,
}

impl JsonFileStationSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> AppResult<CatalogDocument> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read catalog {}: {}", self.path.display(), e),
            ))
        })?;

        let document = serde_json::from_str(&raw)?;
        Ok(document)
    }
}

#[async_trait]
impl StationCatalogSource for JsonFileStationSource {
    async fn fetch_radiko_stations(&self) -> AppResult<Vec<RadikoStation>> {
        let stations = self.load().await?.radiko;
        log::debug!("Loaded {} radiko stations from {}", stations.len(), self.path.display());
        Ok(stations)
    }

    async fn fetch_radiru_stations(&self) -> AppResult<Vec<NhkRadiruStation>> {
        let stations = self.load().await?.radiru;
        log::debug!("Loaded {} radiru stations from {}", stations.len(), self.path.display());
        Ok(stations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RadiruStationKind;
    use tempfile::TempDir;

    fn write_catalog(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn test_reads_both_catalogs() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog(
            &dir,
            r#"{
                "radiko": [
                    {"station_id": "TBS", "station_name": "TBSラジオ", "area_free": true}
                ],
                "radiru": [
                    {"area_id": "130", "area_name": "東京", "station_kind": "r3",
                     "station_id": "s3", "station_name": "NHK-FM"}
                ]
            }"#,
        );
        let source = JsonFileStationSource::new(path);

        let radiko = source.fetch_radiko_stations().await.unwrap();
        assert_eq!(radiko.len(), 1);
        assert_eq!(radiko[0].station_id, "TBS");
        assert!(radiko[0].area_free);
        assert!(!radiko[0].time_free);

        let radiru = source.fetch_radiru_stations().await.unwrap();
        assert_eq!(radiru.len(), 1);
        assert_eq!(radiru[0].station_kind, RadiruStationKind::FM);
        assert_eq!(radiru[0].hls_url, "");
    }

    #[tokio::test]
    async fn test_missing_section_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog(&dir, r#"{"radiko": []}"#);

        let radiru = JsonFileStationSource::new(path).fetch_radiru_stations().await.unwrap();
        assert!(radiru.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_kind_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog(
            &dir,
            r#"{"radiru": [{"area_id": "130", "station_kind": "r9"}]}"#,
        );

        let err = JsonFileStationSource::new(path).fetch_radiru_stations().await.unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let source = JsonFileStationSource::new(dir.path().join("absent.json"));

        let err = source.fetch_radiko_stations().await.unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert!(!err.is_domain());
    }
}
