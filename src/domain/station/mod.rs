pub mod area_kind;
pub mod entity;
pub mod invariants;
pub mod station_kind;

pub use area_kind::RadiruAreaKind;
pub use entity::{NhkRadiruStation, RadikoStation, RadiruStationEntry};
pub use invariants::{validate_radiko_station, validate_radiru_station};
pub use station_kind::RadiruStationKind;
