//! Stations offered by the browser. Identifiers are ACIS ThreadEx ("thr")
//! stations, which stitch together the long-term record of a city.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Station {
    /// ACIS station identifier (`sid`), e.g. "DFWthr".
    pub id: &'static str,
    /// Human readable name, e.g. "Dallas/Fort Worth, TX".
    pub name: &'static str,
}

pub const STATIONS: [Station; 4] = [
    Station {
        id: "BTRthr",
        name: "Baton Rouge, LA",
    },
    Station {
        id: "DFWthr",
        name: "Dallas/Fort Worth, TX",
    },
    Station {
        id: "FAIthr",
        name: "Fairbanks, AK",
    },
    Station {
        id: "SJCthr",
        name: "San Jose, CA",
    },
];

impl Station {
    pub fn by_name(name: &str) -> Option<Station> {
        STATIONS.iter().copied().find(|s| s.name == name)
    }

    pub fn by_id(id: &str) -> Option<Station> {
        STATIONS.iter().copied().find(|s| s.id.eq_ignore_ascii_case(id))
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
