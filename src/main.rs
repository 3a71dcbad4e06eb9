mod config;
mod routes;
mod state;

use axum::Router;
use axum::routing::get;
use football_api::client::FootballApi;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    // Local env files are optional; deployments set the variables directly.
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let api = FootballApi::new(config.keys.clone());
    let state = AppState::new(api, config::watched_teams());

    let app = Router::new()
        .route("/fixtures", get(routes::fixtures))
        .route("/news", get(routes::news))
        .route("/standings", get(routes::standings))
        .route("/healthz", get(routes::healthz))
        .with_state(state);

    info!("goalstrkr listening on http://{}/", config.bind);
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("goalstrkr {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "goalstrkr - football live-scores backend

Usage:
  goalstrkr
  goalstrkr --help
  goalstrkr --version

Environment:
  FOOTBALL_API_KEY    API-Football key, used by the live and results views
  SPORTSDB_API_KEY    TheSportsDB key (default: public demo key 123)
  NEWS_API_KEY        NewsAPI key, used by the news endpoint
  STANDINGS_API_KEY   football-data.org key, used by the standings endpoint
  GOALSTRKR_BIND      Listen address (default 0.0.0.0:8800)"
}
