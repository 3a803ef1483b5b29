use serde::{Deserialize, Serialize};

use super::{RadiruAreaKind, RadiruStationKind};
use crate::domain::{CodeIdentified, Enumeration};

/// A station of the commercial streaming network.
///
/// Reference data: written once when first observed, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RadikoStation {
    /// Network-assigned station code (identity)
    pub station_id: String,

    /// Region code, e.g. "JP13"
    pub region_id: String,

    pub region_name: String,

    pub region_order: i32,

    /// Listening area id
    pub area: String,

    pub station_name: String,

    pub station_url: String,

    pub logo_path: String,

    /// Listenable from outside its area
    pub area_free: bool,

    /// Past programs can be replayed
    pub time_free: bool,

    pub station_order: i32,
}

impl RadikoStation {
    pub fn new(station_id: impl Into<String>, station_name: impl Into<String>) -> Self {
        Self {
            station_id: station_id.into(),
            station_name: station_name.into(),
            ..Self::default()
        }
    }

    pub fn with_region(mut self, region_id: impl Into<String>, region_name: impl Into<String>) -> Self {
        self.region_id = region_id.into();
        self.region_name = region_name.into();
        self
    }
}

/// A public-broadcaster station, identified by `(area_id, station_kind)`.
///
/// The upstream catalog drifts, so every refresh overwrites the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NhkRadiruStation {
    /// 3-digit area code, e.g. "130"
    pub area_id: String,

    #[serde(default)]
    pub area_name: String,

    pub station_kind: RadiruStationKind,

    #[serde(default)]
    pub station_id: String,

    #[serde(default)]
    pub station_name: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub hls_url: String,

    #[serde(default)]
    pub program_now_on_air_api_url: String,

    #[serde(default)]
    pub program_detail_api_url_template: String,

    #[serde(default)]
    pub daily_program_api_url_template: String,
}

impl NhkRadiruStation {
    pub fn new(
        area_id: impl Into<String>,
        station_kind: RadiruStationKind,
        station_id: impl Into<String>,
        station_name: impl Into<String>,
    ) -> Self {
        Self {
            area_id: area_id.into(),
            area_name: String::new(),
            station_kind,
            station_id: station_id.into(),
            station_name: station_name.into(),
            api_key: String::new(),
            hls_url: String::new(),
            program_now_on_air_api_url: String::new(),
            program_detail_api_url_template: String::new(),
            daily_program_api_url_template: String::new(),
        }
    }

    /// The composite identity
    pub fn key(&self) -> (&str, RadiruStationKind) {
        (&self.area_id, self.station_kind)
    }

    /// Resolves `area_id` against the known areas.
    pub fn area_kind(&self) -> Option<RadiruAreaKind> {
        RadiruAreaKind::from_code_id(&self.area_id)
    }
}

/// One selectable (area, kind) pair for station pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiruStationEntry {
    pub area_id: String,
    pub area_name: String,
    pub station_id: String,
    pub station_name: String,
}

impl RadiruStationEntry {
    pub fn new(area: RadiruAreaKind, kind: RadiruStationKind) -> Self {
        Self {
            area_id: area.code_id().to_string(),
            area_name: area.jp_name().to_string(),
            station_id: kind.service_id().to_string(),
            station_name: kind.name().to_string(),
        }
    }

    /// Every area crossed with every kind, areas outermost.
    pub fn all() -> Vec<RadiruStationEntry> {
        RadiruAreaKind::ALL
            .iter()
            .flat_map(|area| {
                RadiruStationKind::all()
                    .iter()
                    .map(move |kind| RadiruStationEntry::new(*area, *kind))
            })
            .collect()
    }
}
