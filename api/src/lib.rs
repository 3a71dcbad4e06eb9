pub mod apifootball;
pub mod badges;
pub mod client;
pub mod dates;
pub mod footballdata;
pub mod newsapi;
pub mod reconcile;
pub mod resolver;
pub mod sportsdb;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types — the canonical shapes handed to the presentation layer
// ---------------------------------------------------------------------------

/// A single scheduled or completed match in the canonical fixture shape.
///
/// The shape mirrors the primary provider's wire format, so live/results
/// passthrough and reconciled upcoming fixtures share one type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub fixture: FixtureMeta,
    pub league: League,
    pub teams: TeamPair,
    pub goals: Goals,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureMeta {
    pub id: i64,
    pub status: FixtureStatus,
    pub date: String, // ISO 8601
    pub venue: Venue,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureStatus {
    pub elapsed: Option<i64>,
    pub short: String,
    pub long: String,
}

impl FixtureStatus {
    /// Status synthesized for fixtures discovered through the fallback
    /// provider, which only lists matches that have not kicked off.
    pub fn not_started() -> Self {
        Self {
            elapsed: Some(0),
            short: "NS".into(),
            long: "Not Started".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Venue {
    pub name: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct League {
    pub id: i64,
    pub name: String,
    pub logo: String,
    pub round: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamPair {
    pub home: TeamSide,
    pub away: TeamSide,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamSide {
    pub name: String,
    pub logo: String,
    pub winner: Option<bool>,
}

/// `None` = not yet played, or the provider sent an unparseable score.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Goals {
    pub home: Option<i64>,
    pub away: Option<i64>,
}

/// A configured team of interest driving upcoming-fixture discovery.
#[derive(Debug, Clone)]
pub struct WatchedTeam {
    pub name: String,
    pub country: String,
}

impl WatchedTeam {
    pub fn new(name: &str, country: &str) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
        }
    }
}

/// A watched team's identity on the fallback provider, cached per name.
#[derive(Debug, Clone)]
pub struct ResolvedTeam {
    pub name: String,
    pub team_id: String,
    pub badge_url: Option<String>,
    pub resolved_at_ms: i64,
}

/// A normalized news article. De-duplicated by `url`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsArticle {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub published_at: String,
    pub source: String,
}

// ---------------------------------------------------------------------------
// Standings — rows of a competition's overall table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StandingRow {
    pub position: i64,
    pub team: StandingTeam,
    pub played_games: i64,
    pub won: i64,
    pub draw: i64,
    pub lost: i64,
    pub points: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub goal_difference: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StandingTeam {
    pub id: i64,
    pub name: String,
    pub short_name: String,
    pub tla: String,
    pub crest: String,
}
