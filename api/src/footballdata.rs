/// Wire types for the football-data.org v4 standings endpoint.
/// Table rows already use the canonical StandingRow shape.
use serde::Deserialize;

use crate::StandingRow;

#[derive(Debug, Deserialize, Default)]
pub struct StandingsResponse {
    #[serde(default)]
    pub standings: Vec<StandingsEntry>,
}

/// One standings block per type ("TOTAL", "HOME", "AWAY").
#[derive(Debug, Deserialize, Default)]
pub struct StandingsEntry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub table: Vec<StandingRow>,
}
