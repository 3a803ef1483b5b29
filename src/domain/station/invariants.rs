use super::entity::{NhkRadiruStation, RadikoStation};
use crate::domain::{DomainError, DomainResult};

/// Validates RadikoStation invariants
pub fn validate_radiko_station(station: &RadikoStation) -> DomainResult<()> {
    if station.station_id.trim().is_empty() {
        return Err(DomainError::invalid(format!(
            "Radiko station '{}' has no station id",
            station.station_name
        )));
    }
    Ok(())
}

/// Validates NhkRadiruStation invariants
///
/// The area id only has to be present; areas outside the known set are
/// accepted so that an upstream addition does not block a refresh.
pub fn validate_radiru_station(station: &NhkRadiruStation) -> DomainResult<()> {
    if station.area_id.trim().is_empty() {
        return Err(DomainError::invalid(format!(
            "NHK station '{}' has no area id",
            station.station_name
        )));
    }
    Ok(())
}
