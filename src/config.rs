//! Environment configuration and the watched-team roster.

use football_api::WatchedTeam;
use football_api::client::ProviderKeys;

/// Address the HTTP server binds when `GOALSTRKR_BIND` is unset.
pub const DEFAULT_BIND: &str = "0.0.0.0:8800";

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub keys: ProviderKeys,
    pub bind: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            keys: ProviderKeys {
                football: env_nonempty("FOOTBALL_API_KEY"),
                sportsdb: env_nonempty("SPORTSDB_API_KEY").unwrap_or_else(|| "123".to_owned()),
                news: env_nonempty("NEWS_API_KEY"),
                standings: env_nonempty("STANDINGS_API_KEY"),
            },
            bind: env_nonempty("GOALSTRKR_BIND").unwrap_or_else(|| DEFAULT_BIND.to_owned()),
        }
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// The clubs whose upcoming matches the service tracks. Countries
/// disambiguate name collisions in the fallback provider's search.
pub fn watched_teams() -> Vec<WatchedTeam> {
    [
        ("Manchester City", "England"),
        ("Liverpool", "England"),
        ("Real Madrid", "Spain"),
        ("Bayern Munich", "Germany"),
        ("Barcelona", "Spain"),
        ("Arsenal", "England"),
        ("Manchester United", "England"),
        ("Chelsea", "England"),
        ("Paris Saint-Germain", "France"),
        ("Juventus", "Italy"),
        ("AC Milan", "Italy"),
    ]
    .into_iter()
    .map(|(name, country)| WatchedTeam::new(name, country))
    .collect()
}
