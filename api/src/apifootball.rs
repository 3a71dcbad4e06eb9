/// Wire type for the primary fixtures provider (API-Football v3).
/// Fixture elements already match the canonical shape, so the envelope
/// wraps the domain type directly.
use serde::Deserialize;

use crate::Fixture;

#[derive(Debug, Deserialize, Default)]
pub struct FixturesResponse {
    #[serde(default)]
    pub response: Vec<Fixture>,
}
