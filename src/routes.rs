//! HTTP surface: request parameters, the response envelope and handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use football_api::client::{ApiError, ApiResult};
use football_api::reconcile::reconcile_upcoming;
use football_api::{Fixture, NewsArticle, StandingRow};

use crate::state::AppState;

/// Response body shared by every endpoint. `error` is omitted on success.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub response: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    fn ok(response: Vec<T>) -> Self {
        Self {
            response,
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            response: Vec::new(),
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FixturesParams {
    view: Option<String>,
    date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StandingsParams {
    league: Option<String>,
}

pub async fn fixtures(
    State(state): State<AppState>,
    Query(params): Query<FixturesParams>,
) -> (StatusCode, Json<Envelope<Fixture>>) {
    let view = params.view.as_deref().filter(|v| !v.is_empty()).unwrap_or("live");
    match view {
        "live" => passthrough("live fixtures", state.api.live_fixtures().await),
        "results" => {
            let Some(date) = params.date.as_deref().filter(|d| !d.is_empty()) else {
                return (StatusCode::BAD_REQUEST, Json(Envelope::failed("Missing date")));
            };
            passthrough("results", state.api.finished_fixtures(date).await)
        }
        "upcoming" => upcoming_fixtures(&state).await,
        other => {
            warn!("rejected unknown fixtures view {other:?}");
            (StatusCode::BAD_REQUEST, Json(Envelope::failed("Unknown view")))
        }
    }
}

pub async fn news(State(state): State<AppState>) -> (StatusCode, Json<Envelope<NewsArticle>>) {
    passthrough("news", state.api.football_news().await)
}

pub async fn standings(
    State(state): State<AppState>,
    Query(params): Query<StandingsParams>,
) -> (StatusCode, Json<Envelope<StandingRow>>) {
    let Some(league) = params.league.as_deref().filter(|l| !l.is_empty()) else {
        return (StatusCode::BAD_REQUEST, Json(Envelope::failed("Missing league")));
    };

    if let Some(rows) = state.standings.fresh(league).await {
        return (StatusCode::OK, Json(Envelope::ok(rows)));
    }

    match state.api.standings_table(league).await {
        Ok(rows) => {
            state.standings.store(league, rows.clone()).await;
            (StatusCode::OK, Json(Envelope::ok(rows)))
        }
        Err(err) => failure("standings", err),
    }
}

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Run one reconciliation pass and serve its published result.
///
/// A pass that produced nothing while every upstream call failed reports an
/// error in the envelope without touching the stored snapshot, so one bad
/// window cannot blank out data a concurrent refresh just published.
async fn upcoming_fixtures(state: &AppState) -> (StatusCode, Json<Envelope<Fixture>>) {
    let generation = state.generations.begin();
    let outcome = reconcile_upcoming(&state.api, &state.identities, &state.roster).await;

    if outcome.fixtures.is_empty() && outcome.upstream_ok == 0 && outcome.upstream_failed > 0 {
        warn!(
            "upcoming refresh {generation}: all {} upstream calls failed",
            outcome.upstream_failed
        );
        return (
            StatusCode::OK,
            Json(Envelope::failed("Upstream sources unavailable")),
        );
    }

    info!(
        "upcoming refresh {generation}: {} fixtures, {} upstream failures",
        outcome.fixtures.len(),
        outcome.upstream_failed
    );
    let fixtures = state.publish_upcoming(generation, outcome.fixtures).await;
    (StatusCode::OK, Json(Envelope::ok(fixtures)))
}

fn passthrough<T>(label: &str, result: ApiResult<Vec<T>>) -> (StatusCode, Json<Envelope<T>>) {
    match result {
        Ok(items) => (StatusCode::OK, Json(Envelope::ok(items))),
        Err(err) => failure(label, err),
    }
}

fn failure<T>(label: &str, err: ApiError) -> (StatusCode, Json<Envelope<T>>) {
    error!("{label} fetch failed: {err}");
    let (status, message) = match &err {
        ApiError::MissingKey(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Missing API key".to_owned(),
        ),
        ApiError::Status(e, _) => (
            StatusCode::BAD_GATEWAY,
            match e.status() {
                Some(code) => format!("Upstream error {}", code.as_u16()),
                None => "Upstream error".to_owned(),
            },
        ),
        ApiError::Network(..) => (StatusCode::BAD_GATEWAY, "Upstream fetch failed".to_owned()),
        ApiError::Parsing(..) => (StatusCode::BAD_GATEWAY, "Invalid upstream response".to_owned()),
    };
    (status, Json(Envelope::failed(message)))
}
