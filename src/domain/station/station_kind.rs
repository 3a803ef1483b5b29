use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{CodeIdentified, DomainError, Enumeration};

/// Service kind of a public-broadcaster station.
///
/// Exactly three values exist; they are the associated constants below.
/// Equality, hashing and ordering use `id` only.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(into = "String")]
pub struct RadiruStationKind {
    id: i32,
    name: &'static str,
    service_id: &'static str,
}

impl RadiruStationKind {
    pub const R1: RadiruStationKind = RadiruStationKind {
        id: 1,
        name: "NHKラジオ第1",
        service_id: "r1",
    };

    pub const R2: RadiruStationKind = RadiruStationKind {
        id: 2,
        name: "NHKラジオ第2",
        service_id: "r2",
    };

    pub const FM: RadiruStationKind = RadiruStationKind {
        id: 3,
        name: "NHK-FM",
        service_id: "r3",
    };

    pub const ALL: [RadiruStationKind; 3] = [Self::R1, Self::R2, Self::FM];

    /// Code used when calling the broadcaster's API
    pub fn service_id(&self) -> &'static str {
        self.service_id
    }
}

impl Enumeration for RadiruStationKind {
    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn all() -> &'static [Self] {
        &Self::ALL
    }
}

impl CodeIdentified for RadiruStationKind {
    fn code_id(&self) -> &'static str {
        self.service_id
    }

    fn variants() -> &'static [Self] {
        &Self::ALL
    }
}

impl PartialEq for RadiruStationKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RadiruStationKind {}

impl Hash for RadiruStationKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for RadiruStationKind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RadiruStationKind {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::fmt::Display for RadiruStationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl TryFrom<String> for RadiruStationKind {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_code_id(&value)
            .ok_or_else(|| DomainError::invalid(format!("Unknown NHK station kind '{}'", value)))
    }
}

impl<'de> Deserialize<'de> for RadiruStationKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Self::try_from(code).map_err(serde::de::Error::custom)
    }
}

impl From<RadiruStationKind> for String {
    fn from(kind: RadiruStationKind) -> Self {
        kind.service_id.to_string()
    }
}
