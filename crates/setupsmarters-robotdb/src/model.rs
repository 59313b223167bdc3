use serde::{Deserialize, Serialize};

/// Top level of `robots.json`: `{ "robots": { "robot": [ ... ] } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub robots: RobotList,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotList {
    pub robot: Vec<CatalogEntry>,
}

/// One preset as stored in the catalog file. Extra keys are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub speed: f64,
    #[serde(rename = "cut diameter")]
    pub cut_diameter: f64,
    pub autonomy: f64,
}

/// Hardware values of a robot model, ready for a robot configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotSpec {
    pub speed: f64,
    pub cutting_diameter: f64,
    /// Minutes of operation on one charge
    pub autonomy: u32,
}

impl From<&CatalogEntry> for RobotSpec {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            speed: entry.speed,
            cutting_diameter: entry.cut_diameter,
            // Fractional autonomy is truncated, negative saturates to zero
            autonomy: entry.autonomy.trunc() as u32,
        }
    }
}
