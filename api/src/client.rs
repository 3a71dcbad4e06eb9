use crate::apifootball::FixturesResponse;
use crate::footballdata::StandingsResponse;
use crate::newsapi::NewsResponse;
use crate::sportsdb::{EventsResponse, SportsDbEvent, SportsDbTeam, TeamsResponse};
use crate::{Fixture, NewsArticle, StandingRow};
use reqwest::Client;
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const API_FOOTBALL_BASE: &str = "https://v3.football.api-sports.io";
const SPORTSDB_BASE: &str = "https://www.thesportsdb.com/api/v1/json";
const NEWSAPI_BASE: &str = "https://newsapi.org/v2";
const FOOTBALL_DATA_BASE: &str = "https://api.football-data.org/v4";

const NEWS_QUERY: &str = "football OR soccer OR \"transfer rumors\"";

/// Client for the upstream football data providers.
///
/// Primary fixtures come from API-Football (header-key auth); team search,
/// upcoming events and badges from TheSportsDB (key in the URL path);
/// standings from football-data.org; news from NewsAPI.
#[derive(Debug, Clone)]
pub struct FootballApi {
    client: Client,
    timeout: Duration,
    keys: ProviderKeys,
    endpoints: Endpoints,
}

/// Credentials per provider. `football`, `news` and `standings` are optional;
/// the endpoints needing them fail with `ApiError::MissingKey` when absent.
#[derive(Debug, Clone)]
pub struct ProviderKeys {
    pub football: Option<String>,
    pub sportsdb: String,
    pub news: Option<String>,
    pub standings: Option<String>,
}

impl Default for ProviderKeys {
    fn default() -> Self {
        Self {
            football: None,
            // TheSportsDB public demo key.
            sportsdb: "123".into(),
            news: None,
            standings: None,
        }
    }
}

/// Provider base URLs, overridable so tests can point at a local server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub primary: String,
    pub sportsdb: String,
    pub news: String,
    pub standings: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            primary: API_FOOTBALL_BASE.into(),
            sportsdb: SPORTSDB_BASE.into(),
            news: NEWSAPI_BASE.into(),
            standings: FOOTBALL_DATA_BASE.into(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Status(reqwest::Error, String),
    Parsing(serde_json::Error, String),
    MissingKey(&'static str),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Status(e, url) => write!(f, "Upstream error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::MissingKey(provider) => write!(f, "Missing API key for {provider}"),
        }
    }
}

impl FootballApi {
    pub fn new(keys: ProviderKeys) -> Self {
        Self::with_endpoints(keys, Endpoints::default())
    }

    pub fn with_endpoints(keys: ProviderKeys, endpoints: Endpoints) -> Self {
        Self {
            client: Client::builder()
                .user_agent("goalstrkr/0.1 (football scores backend)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            keys,
            endpoints,
        }
    }

    /// Fixtures currently in play, straight from the primary provider.
    pub async fn live_fixtures(&self) -> ApiResult<Vec<Fixture>> {
        let raw: FixturesResponse = self.primary_get("/fixtures", &[("live", "all")]).await?;
        Ok(raw.response)
    }

    /// Full-time results for one day (`YYYY-MM-DD`), primary provider.
    pub async fn finished_fixtures(&self, date: &str) -> ApiResult<Vec<Fixture>> {
        let raw: FixturesResponse = self
            .primary_get("/fixtures", &[("date", date), ("status", "FT")])
            .await?;
        Ok(raw.response)
    }

    /// Fuzzy team search on the fallback provider.
    pub async fn search_teams(&self, name: &str) -> ApiResult<Vec<SportsDbTeam>> {
        let raw: TeamsResponse = self.sportsdb_get("searchteams.php", &[("t", name)]).await?;
        Ok(raw.teams.unwrap_or_default())
    }

    /// Full team record by fallback-provider id. Used for badge enrichment.
    pub async fn lookup_team(&self, team_id: &str) -> ApiResult<Vec<SportsDbTeam>> {
        let raw: TeamsResponse = self.sportsdb_get("lookupteam.php", &[("id", team_id)]).await?;
        Ok(raw.teams.unwrap_or_default())
    }

    /// A team's next scheduled events.
    pub async fn next_events(&self, team_id: &str) -> ApiResult<Vec<SportsDbEvent>> {
        let raw: EventsResponse = self.sportsdb_get("eventsnext.php", &[("id", team_id)]).await?;
        Ok(raw.events.unwrap_or_default())
    }

    /// Every soccer event on one day (`YYYY-MM-DD`).
    pub async fn events_on_day(&self, date: &str) -> ApiResult<Vec<SportsDbEvent>> {
        let raw: EventsResponse = self
            .sportsdb_get("eventsday.php", &[("d", date), ("s", "Soccer")])
            .await?;
        Ok(raw.events.unwrap_or_default())
    }

    /// Latest football news, de-duplicated by article URL.
    pub async fn football_news(&self) -> ApiResult<Vec<NewsArticle>> {
        let Some(key) = self.keys.news.as_deref().filter(|k| !k.is_empty()) else {
            return Err(ApiError::MissingKey("NewsAPI"));
        };
        let url = format!("{}/everything", self.endpoints.news);
        let request = self.client.get(&url).query(&[
            ("q", NEWS_QUERY),
            ("language", "en"),
            ("sortBy", "publishedAt"),
            ("pageSize", "40"),
            ("apiKey", key),
        ]);
        let raw: NewsResponse = self.get_json(request, &url).await?;
        Ok(map_news_articles(raw))
    }

    /// A competition's overall table (the "TOTAL" standings block).
    pub async fn standings_table(&self, code: &str) -> ApiResult<Vec<StandingRow>> {
        let Some(key) = self.keys.standings.as_deref().filter(|k| !k.is_empty()) else {
            return Err(ApiError::MissingKey("football-data.org"));
        };
        let url = format!("{}/competitions/{code}/standings", self.endpoints.standings);
        let request = self.client.get(&url).header("X-Auth-Token", key);
        let raw: StandingsResponse = self.get_json(request, &url).await?;
        Ok(total_table(raw))
    }

    async fn primary_get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let Some(key) = self.keys.football.as_deref().filter(|k| !k.is_empty()) else {
            return Err(ApiError::MissingKey("API-Football"));
        };
        let url = format!("{}{path}", self.endpoints.primary);
        let request = self
            .client
            .get(&url)
            .query(query)
            .header("x-apisports-key", key);
        self.get_json(request, &url).await
    }

    async fn sportsdb_get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let url = format!("{}/{}/{path}", self.endpoints.sportsdb, self.keys.sportsdb);
        let request = self.client.get(&url).query(query);
        self.get_json(request, &url).await
    }

    /// Shared fetch path: enforce the timeout, fail on non-2xx, parse the
    /// body. Every failure mode maps to a typed error; nothing panics.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> ApiResult<T> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;
        let response = response
            .error_for_status()
            .map_err(|e| ApiError::Status(e, url.to_owned()))?;
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Mapping: provider wire types → clean domain types
// ---------------------------------------------------------------------------

/// Normalize NewsAPI articles. Articles without a URL are dropped (the URL is
/// the identity), duplicates keep the first occurrence — the provider sorts
/// newest-first, so the first copy is the one worth keeping.
fn map_news_articles(raw: NewsResponse) -> Vec<NewsArticle> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(raw.articles.len());
    for article in raw.articles {
        let Some(url) = article.url.filter(|u| !u.is_empty()) else {
            continue;
        };
        if !seen.insert(url.clone()) {
            continue;
        }
        out.push(NewsArticle {
            title: article.title.unwrap_or_default(),
            description: article.description,
            url,
            image_url: article.url_to_image,
            published_at: article.published_at.unwrap_or_default(),
            source: article
                .source
                .and_then(|s| s.name)
                .unwrap_or_default(),
        });
    }
    out
}

/// Pick the overall table out of a standings response; empty when the
/// competition has no "TOTAL" block.
fn total_table(raw: StandingsResponse) -> Vec<StandingRow> {
    raw.standings
        .into_iter()
        .find(|entry| entry.kind == "TOTAL")
        .map(|entry| entry.table)
        .unwrap_or_default()
}
