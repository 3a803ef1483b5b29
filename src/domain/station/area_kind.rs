use serde::{Deserialize, Serialize};

use crate::domain::CodeIdentified;

/// Broadcast areas of the public broadcaster's streaming service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiruAreaKind {
    Sapporo,
    Sendai,
    Tokyo,
    Nagoya,
    Osaka,
    Hiroshima,
    Matsuyama,
    Fukuoka,
}

impl RadiruAreaKind {
    pub const ALL: [RadiruAreaKind; 8] = [
        RadiruAreaKind::Sapporo,
        RadiruAreaKind::Sendai,
        RadiruAreaKind::Tokyo,
        RadiruAreaKind::Nagoya,
        RadiruAreaKind::Osaka,
        RadiruAreaKind::Hiroshima,
        RadiruAreaKind::Matsuyama,
        RadiruAreaKind::Fukuoka,
    ];

    /// Name as shown in the broadcaster's own UI
    pub fn jp_name(&self) -> &'static str {
        match self {
            RadiruAreaKind::Sapporo => "札幌",
            RadiruAreaKind::Sendai => "仙台",
            RadiruAreaKind::Tokyo => "東京",
            RadiruAreaKind::Nagoya => "名古屋",
            RadiruAreaKind::Osaka => "大阪",
            RadiruAreaKind::Hiroshima => "広島",
            RadiruAreaKind::Matsuyama => "松山",
            RadiruAreaKind::Fukuoka => "福岡",
        }
    }
}

impl CodeIdentified for RadiruAreaKind {
    fn code_id(&self) -> &'static str {
        match self {
            RadiruAreaKind::Sapporo => "010",
            RadiruAreaKind::Sendai => "040",
            RadiruAreaKind::Tokyo => "130",
            RadiruAreaKind::Nagoya => "230",
            RadiruAreaKind::Osaka => "270",
            RadiruAreaKind::Hiroshima => "340",
            RadiruAreaKind::Matsuyama => "380",
            RadiruAreaKind::Fukuoka => "400",
        }
    }

    fn variants() -> &'static [Self] {
        &Self::ALL
    }
}

impl std::fmt::Display for RadiruAreaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.jp_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique_three_digit() {
        let codes: HashSet<&str> = RadiruAreaKind::ALL.iter().map(|a| a.code_id()).collect();
        assert_eq!(codes.len(), 8);
        assert!(codes.iter().all(|c| c.len() == 3 && c.chars().all(|ch| ch.is_ascii_digit())));
    }

    #[test]
    fn test_lookup_by_code() {
        assert_eq!(RadiruAreaKind::from_code_id("130"), Some(RadiruAreaKind::Tokyo));
        assert_eq!(RadiruAreaKind::from_code_id("400"), Some(RadiruAreaKind::Fukuoka));
        assert_eq!(RadiruAreaKind::from_code_id("999"), None);
        assert_eq!(RadiruAreaKind::from_code_id(""), None);
    }

    #[test]
    fn test_every_area_round_trips_through_its_code() {
        for area in RadiruAreaKind::ALL {
            assert_eq!(RadiruAreaKind::from_code_id(area.code_id()), Some(area));
        }
    }
}
