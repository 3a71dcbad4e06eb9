/// Wire types for TheSportsDB fallback provider.
/// Endpoints: searchteams.php, lookupteam.php, eventsnext.php, eventsday.php
use serde::Deserialize;

/// Returned by both searchteams.php and lookupteam.php.
/// The provider sends `"teams": null` rather than an empty array.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamsResponse {
    pub teams: Option<Vec<SportsDbTeam>>,
}

/// Returned by eventsnext.php and eventsday.php. `"events": null` on no data.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct EventsResponse {
    pub events: Option<Vec<SportsDbEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SportsDbTeam {
    pub id_team: Option<String>,
    pub str_team: Option<String>,
    pub str_country: Option<String>,
    pub str_team_badge: Option<String>,
}

/// A raw event record. Scores arrive as strings ("2") or null.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SportsDbEvent {
    pub id_event: Option<String>,
    pub date_event: Option<String>,
    pub str_time: Option<String>,
    pub str_home_team: Option<String>,
    pub str_away_team: Option<String>,
    pub id_home_team: Option<String>,
    pub id_away_team: Option<String>,
    pub id_league: Option<String>,
    pub str_league: Option<String>,
    pub int_home_score: Option<String>,
    pub int_away_score: Option<String>,
    pub str_venue: Option<String>,
    pub str_city: Option<String>,
}
