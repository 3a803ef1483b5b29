// src/integrations/mod.rs
//
// External integrations

pub mod station_source;

pub use station_source::{JsonFileStationSource, StationCatalogSource};

#[cfg(test)]
pub use station_source::MockStationCatalogSource;
