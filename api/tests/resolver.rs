use football_api::ResolvedTeam;
use football_api::client::{Endpoints, FootballApi, ProviderKeys};
use football_api::resolver::{TEAM_ID_CACHE_TTL_MS, TeamIdentityCache, resolve_team};
use mockito::{Matcher, Server};
use serde_json::json;

fn api_for(server: &Server) -> FootballApi {
    let url = server.url();
    FootballApi::with_endpoints(
        ProviderKeys {
            football: Some("test-key".into()),
            sportsdb: "123".into(),
            news: None,
            standings: None,
        },
        Endpoints {
            primary: url.clone(),
            sportsdb: url.clone(),
            news: url.clone(),
            standings: url,
        },
    )
}

fn search_body(teams: serde_json::Value) -> String {
    json!({ "teams": teams }).to_string()
}

fn fixed_clock() -> i64 {
    1_000_000_000
}

#[tokio::test]
async fn resolution_is_cached_within_the_ttl() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/123/searchteams.php")
        .match_query(Matcher::UrlEncoded("t".into(), "Liverpool".into()))
        .with_body(search_body(json!([{
            "idTeam": "133602",
            "strTeam": "Liverpool",
            "strCountry": "England",
            "strTeamBadge": "https://img.example/liverpool.png"
        }])))
        .expect(1)
        .create_async()
        .await;

    let api = api_for(&server);
    let cache = TeamIdentityCache::default();

    let first = resolve_team(&api, &cache, "Liverpool", Some("England"))
        .await
        .expect("should resolve");
    let second = resolve_team(&api, &cache, "Liverpool", Some("England"))
        .await
        .expect("should resolve from cache");

    mock.assert_async().await;
    assert_eq!(first.team_id, "133602");
    assert_eq!(second.team_id, "133602");
}

#[tokio::test]
async fn expired_entries_trigger_a_fresh_search() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/123/searchteams.php")
        .match_query(Matcher::UrlEncoded("t".into(), "Liverpool".into()))
        .with_body(search_body(json!([{
            "idTeam": "133602",
            "strTeam": "Liverpool",
            "strCountry": "England",
            "strTeamBadge": "https://img.example/liverpool.png"
        }])))
        .expect(1)
        .create_async()
        .await;

    let api = api_for(&server);
    let cache = TeamIdentityCache::with_clock(TEAM_ID_CACHE_TTL_MS, fixed_clock);
    cache.insert(ResolvedTeam {
        name: "Liverpool".into(),
        team_id: "999".into(),
        badge_url: None,
        resolved_at_ms: fixed_clock() - TEAM_ID_CACHE_TTL_MS - 1,
    });

    let resolved = resolve_team(&api, &cache, "Liverpool", Some("England"))
        .await
        .expect("should resolve");

    mock.assert_async().await;
    assert_eq!(resolved.team_id, "133602");
    let cached = cache.fresh("Liverpool").expect("refreshed entry is cached");
    assert_eq!(cached.team_id, "133602");
    assert_eq!(cached.resolved_at_ms, fixed_clock());
}

#[tokio::test]
async fn country_breaks_ties_between_same_named_teams() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/123/searchteams.php")
        .match_query(Matcher::UrlEncoded("t".into(), "Arsenal".into()))
        .with_body(search_body(json!([
            { "idTeam": "2", "strTeam": "Arsenal", "strCountry": "Argentina" },
            { "idTeam": "1", "strTeam": "Arsenal", "strCountry": "England" }
        ])))
        .create_async()
        .await;

    let api = api_for(&server);
    let cache = TeamIdentityCache::default();
    let resolved = resolve_team(&api, &cache, "Arsenal", Some("England"))
        .await
        .expect("should resolve");
    assert_eq!(resolved.team_id, "1");
}

#[tokio::test]
async fn empty_results_are_not_cached() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/123/searchteams.php")
        .match_query(Matcher::UrlEncoded("t".into(), "Nobody FC".into()))
        .with_body(r#"{"teams":null}"#)
        .expect(2)
        .create_async()
        .await;

    let api = api_for(&server);
    let cache = TeamIdentityCache::default();
    assert!(resolve_team(&api, &cache, "Nobody FC", None).await.is_none());
    assert!(resolve_team(&api, &cache, "Nobody FC", None).await.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn gateway_failures_resolve_to_none() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/123/searchteams.php")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let api = api_for(&server);
    let cache = TeamIdentityCache::default();
    assert!(resolve_team(&api, &cache, "Liverpool", None).await.is_none());
    assert!(cache.fresh("Liverpool").is_none());
}

#[tokio::test]
async fn results_without_a_team_id_resolve_to_none() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/123/searchteams.php")
        .match_query(Matcher::Any)
        .with_body(search_body(json!([
            { "strTeam": "Liverpool", "strCountry": "England" }
        ])))
        .create_async()
        .await;

    let api = api_for(&server);
    let cache = TeamIdentityCache::default();
    assert!(resolve_team(&api, &cache, "Liverpool", None).await.is_none());
}

#[tokio::test]
async fn insecure_badge_urls_are_upgraded_on_the_identity() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/123/searchteams.php")
        .match_query(Matcher::Any)
        .with_body(search_body(json!([{
            "idTeam": "133602",
            "strTeam": "Liverpool",
            "strCountry": "England",
            "strTeamBadge": "http://img.example/liverpool.png"
        }])))
        .create_async()
        .await;

    let api = api_for(&server);
    let cache = TeamIdentityCache::default();
    let resolved = resolve_team(&api, &cache, "Liverpool", None)
        .await
        .expect("should resolve");
    assert_eq!(
        resolved.badge_url.as_deref(),
        Some("https://img.example/liverpool.png")
    );
}
