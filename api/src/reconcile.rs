use crate::badges::{BadgeIndex, collect_missing_team_ids, enrich_badges};
use crate::client::FootballApi;
use crate::dates::{parse_kickoff, scan_window};
use crate::resolver::{TeamIdentityCache, resolve_team};
use crate::sportsdb::SportsDbEvent;
use crate::{
    Fixture, FixtureMeta, FixtureStatus, Goals, League, TeamPair, TeamSide, Venue, WatchedTeam,
};
use chrono::{NaiveDateTime, Utc};
use futures_util::future::join_all;
use std::collections::HashSet;

/// Days scanned by the day-by-day fallback when no per-team events exist.
pub const UPCOMING_FALLBACK_DAYS: u32 = 7;

/// The engine's output. The call counters let the caller tell a valid empty
/// list apart from "every upstream call failed"; the engine itself never
/// errors on partial data.
#[derive(Debug, Default)]
pub struct Reconciliation {
    pub fixtures: Vec<Fixture>,
    pub upstream_ok: usize,
    pub upstream_failed: usize,
}

/// Insertion-ordered event pool keyed by event id. The first record seen for
/// an id wins; duplicates come from two watched teams sharing a fixture and
/// carry identical data.
#[derive(Debug, Default)]
pub struct EventPool {
    events: Vec<SportsDbEvent>,
    seen: HashSet<String>,
}

impl EventPool {
    pub fn insert(&mut self, event: SportsDbEvent) {
        let Some(id) = event.id_event.clone().filter(|id| !id.is_empty()) else {
            return;
        };
        if self.seen.insert(id) {
            self.events.push(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn events(&self) -> &[SportsDbEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<SportsDbEvent> {
        self.events
    }
}

/// Build the upcoming-fixtures list for a roster of watched teams.
///
/// 1. Resolve every roster entry's fallback-provider identity (cached).
/// 2. Seed the badge index from the resolutions.
/// 3. Fetch each distinct resolved team's next events, merging first-seen.
/// 4. If that yields nothing, scan the next week day by day and keep events
///    naming a watched team.
/// 5. Enrich badges for event teams the index doesn't cover yet.
/// 6. Normalize to canonical fixtures and sort by kickoff.
///
/// Every step tolerates partial failure in the one before it; a roster entry
/// that fails to resolve simply contributes nothing downstream.
pub async fn reconcile_upcoming(
    api: &FootballApi,
    cache: &TeamIdentityCache,
    roster: &[WatchedTeam],
) -> Reconciliation {
    let resolved = join_all(
        roster
            .iter()
            .map(|team| resolve_team(api, cache, &team.name, Some(&team.country))),
    )
    .await;

    // The name index is keyed by the watched name, paired positionally with
    // its resolution, so fallback-scan events match by name alone.
    let mut badges = BadgeIndex::default();
    for (team, resolution) in roster.iter().zip(&resolved) {
        if let Some(info) = resolution
            && let Some(badge) = &info.badge_url
        {
            badges.seed_id(&info.team_id, badge);
            badges.seed_name(&team.name, badge);
        }
    }

    let mut seen_ids: HashSet<String> = HashSet::new();
    let team_ids: Vec<&str> = resolved
        .iter()
        .flatten()
        .map(|info| info.team_id.as_str())
        .filter(|id| seen_ids.insert((*id).to_owned()))
        .collect();

    let mut ok = 0;
    let mut failed = 0;
    let mut pool = EventPool::default();

    if !team_ids.is_empty() {
        let batches = join_all(team_ids.iter().map(|id| api.next_events(id))).await;
        for batch in batches {
            match batch {
                Ok(events) => {
                    ok += 1;
                    for event in events {
                        pool.insert(event);
                    }
                }
                Err(_) => failed += 1,
            }
        }
    }

    if pool.is_empty() {
        let names: HashSet<String> = roster.iter().map(|t| t.name.to_lowercase()).collect();
        let days = scan_window(Utc::now().date_naive(), UPCOMING_FALLBACK_DAYS);
        let batches = join_all(days.iter().map(|day| api.events_on_day(day))).await;
        for batch in batches {
            match batch {
                Ok(events) => {
                    ok += 1;
                    for event in events {
                        if involves_watched_team(&event, &names) {
                            pool.insert(event);
                        }
                    }
                }
                Err(_) => failed += 1,
            }
        }
    }

    let missing = collect_missing_team_ids(pool.events(), &badges);
    let (lookups_ok, lookups_failed) = enrich_badges(api, &mut badges, &missing).await;
    ok += lookups_ok;
    failed += lookups_failed;

    let mut fixtures: Vec<Fixture> = pool
        .into_events()
        .iter()
        .filter_map(|event| fixture_from_event(event, &badges))
        .collect();
    sort_by_kickoff(&mut fixtures);

    Reconciliation {
        fixtures,
        upstream_ok: ok,
        upstream_failed: failed,
    }
}

fn involves_watched_team(event: &SportsDbEvent, names: &HashSet<String>) -> bool {
    let side_matches =
        |side: Option<&str>| side.is_some_and(|name| names.contains(&name.to_lowercase()));
    side_matches(event.str_home_team.as_deref()) || side_matches(event.str_away_team.as_deref())
}

/// Map a raw event to the canonical fixture shape.
///
/// Events missing an id, a numeric id, or a date are dropped. Kickoff is the
/// event date plus its time of day, midnight when absent. The status is
/// always synthesized as not-started; this path only produces future
/// fixtures.
pub fn fixture_from_event(event: &SportsDbEvent, badges: &BadgeIndex) -> Option<Fixture> {
    let id = event
        .id_event
        .as_deref()
        .filter(|id| !id.is_empty())?
        .parse::<i64>()
        .ok()?;
    let date = event.date_event.as_deref().filter(|d| !d.is_empty())?;
    let time = event
        .str_time
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or("00:00:00");

    let home_logo = badges.logo_for(event.id_home_team.as_deref(), event.str_home_team.as_deref());
    let away_logo = badges.logo_for(event.id_away_team.as_deref(), event.str_away_team.as_deref());

    Some(Fixture {
        fixture: FixtureMeta {
            id,
            status: FixtureStatus::not_started(),
            date: format!("{date}T{time}"),
            venue: Venue {
                name: event.str_venue.clone().filter(|v| !v.is_empty()),
                city: event.str_city.clone().filter(|c| !c.is_empty()),
            },
        },
        league: League {
            id: parse_number(event.id_league.as_deref()).unwrap_or(0),
            name: event
                .str_league
                .clone()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| "Unknown League".into()),
            logo: String::new(),
            round: String::new(),
        },
        teams: TeamPair {
            home: TeamSide {
                name: event.str_home_team.clone().unwrap_or_default(),
                logo: home_logo,
                winner: None,
            },
            away: TeamSide {
                name: event.str_away_team.clone().unwrap_or_default(),
                logo: away_logo,
                winner: None,
            },
        },
        goals: Goals {
            home: parse_number(event.int_home_score.as_deref()),
            away: parse_number(event.int_away_score.as_deref()),
        },
    })
}

/// Scores and league ids arrive as strings; `None` for absent, empty, or
/// non-numeric values rather than anything lossy.
fn parse_number(value: Option<&str>) -> Option<i64> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    value.parse().ok()
}

/// Ascending by kickoff instant; fixtures whose date fails to parse sort
/// last, keeping their merge order.
pub fn sort_by_kickoff(fixtures: &mut [Fixture]) {
    fixtures.sort_by_key(|f| parse_kickoff(&f.fixture.date).unwrap_or(NaiveDateTime::MAX));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, date: &str, time: &str, home: &str, away: &str) -> SportsDbEvent {
        SportsDbEvent {
            id_event: Some(id.into()),
            date_event: Some(date.into()),
            str_time: Some(time.into()),
            str_home_team: Some(home.into()),
            str_away_team: Some(away.into()),
            ..Default::default()
        }
    }

    #[test]
    fn pool_keeps_the_first_record_per_event_id() {
        let mut pool = EventPool::default();
        let mut first = event("55", "2026-03-01", "15:00:00", "Liverpool", "Chelsea");
        first.str_venue = Some("Anfield".into());
        pool.insert(first);
        pool.insert(event("55", "2026-03-01", "15:00:00", "Liverpool", "Chelsea"));
        pool.insert(event("56", "2026-03-02", "17:30:00", "Arsenal", "Juventus"));

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.events()[0].str_venue.as_deref(), Some("Anfield"));
    }

    #[test]
    fn pool_ignores_events_without_an_id() {
        let mut pool = EventPool::default();
        let mut missing = event("", "2026-03-01", "", "A", "B");
        pool.insert(missing.clone());
        missing.id_event = None;
        pool.insert(missing);
        assert!(pool.is_empty());
    }

    #[test]
    fn event_maps_to_a_not_started_fixture() {
        let mut badges = BadgeIndex::default();
        badges.seed_id("133602", "https://img/liverpool.png");

        let mut raw = event("55", "2026-03-01", "15:00:00", "Liverpool", "Chelsea");
        raw.id_home_team = Some("133602".into());
        raw.id_league = Some("4328".into());
        raw.str_league = Some("Premier League".into());
        raw.str_venue = Some("Anfield".into());

        let fixture = fixture_from_event(&raw, &badges).expect("should map");
        assert_eq!(fixture.fixture.id, 55);
        assert_eq!(fixture.fixture.date, "2026-03-01T15:00:00");
        assert_eq!(fixture.fixture.status.short, "NS");
        assert_eq!(fixture.fixture.status.elapsed, Some(0));
        assert_eq!(fixture.fixture.venue.name.as_deref(), Some("Anfield"));
        assert_eq!(fixture.league.id, 4328);
        assert_eq!(fixture.league.name, "Premier League");
        assert_eq!(fixture.teams.home.logo, "https://img/liverpool.png");
        assert_eq!(fixture.teams.away.logo, "");
        assert_eq!(fixture.goals.home, None);
        assert_eq!(fixture.goals.away, None);
    }

    #[test]
    fn missing_time_defaults_to_midnight() {
        let raw = event("55", "2026-03-01", "", "A", "B");
        let fixture = fixture_from_event(&raw, &BadgeIndex::default()).unwrap();
        assert_eq!(fixture.fixture.date, "2026-03-01T00:00:00");
    }

    #[test]
    fn events_without_id_or_date_are_dropped() {
        let badges = BadgeIndex::default();
        assert!(fixture_from_event(&event("", "2026-03-01", "", "A", "B"), &badges).is_none());
        assert!(fixture_from_event(&event("55", "", "", "A", "B"), &badges).is_none());
        assert!(
            fixture_from_event(&event("not-a-number", "2026-03-01", "", "A", "B"), &badges)
                .is_none()
        );
    }

    #[test]
    fn unknown_league_fields_get_placeholders() {
        let raw = event("55", "2026-03-01", "", "A", "B");
        let fixture = fixture_from_event(&raw, &BadgeIndex::default()).unwrap();
        assert_eq!(fixture.league.id, 0);
        assert_eq!(fixture.league.name, "Unknown League");
        assert_eq!(fixture.league.logo, "");
        assert_eq!(fixture.league.round, "");
    }

    #[test]
    fn scores_parse_numbers_and_nothing_else() {
        assert_eq!(parse_number(Some("2")), Some(2));
        assert_eq!(parse_number(Some("0")), Some(0));
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(Some("  ")), None);
        assert_eq!(parse_number(Some("abc")), None);
        assert_eq!(parse_number(None), None);
    }

    #[test]
    fn fixtures_sort_ascending_by_kickoff() {
        let badges = BadgeIndex::default();
        let mut fixtures: Vec<Fixture> = [
            event("3", "2026-03-03", "12:00:00", "A", "B"),
            event("1", "2026-03-01", "12:00:00", "C", "D"),
            event("2", "2026-03-02", "12:00:00", "E", "F"),
        ]
        .iter()
        .filter_map(|e| fixture_from_event(e, &badges))
        .collect();

        sort_by_kickoff(&mut fixtures);
        let ids: Vec<i64> = fixtures.iter().map(|f| f.fixture.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn unparseable_kickoffs_sort_last_in_merge_order() {
        let badges = BadgeIndex::default();
        let mut fixtures: Vec<Fixture> = [
            event("9", "garbage", "25:99:99", "A", "B"),
            event("8", "also-bad", "", "C", "D"),
            event("1", "2026-03-01", "12:00:00", "E", "F"),
        ]
        .iter()
        .filter_map(|e| fixture_from_event(e, &badges))
        .collect();

        sort_by_kickoff(&mut fixtures);
        let ids: Vec<i64> = fixtures.iter().map(|f| f.fixture.id).collect();
        assert_eq!(ids, vec![1, 9, 8]);
    }

    #[test]
    fn day_scan_filter_matches_either_side_case_insensitively() {
        let names: HashSet<String> = ["liverpool".to_owned()].into_iter().collect();
        assert!(involves_watched_team(
            &event("1", "2026-03-01", "", "LIVERPOOL", "Everton"),
            &names
        ));
        assert!(involves_watched_team(
            &event("2", "2026-03-01", "", "Everton", "Liverpool"),
            &names
        ));
        assert!(!involves_watched_team(
            &event("3", "2026-03-01", "", "Everton", "Fulham"),
            &names
        ));
    }
}
