use crate::badges::normalize_badge_url;
use crate::client::FootballApi;
use crate::sportsdb::SportsDbTeam;
use crate::ResolvedTeam;
use std::collections::HashMap;
use std::sync::Mutex;

/// Resolved team identities stay valid for a week; club ids and badges
/// effectively never change, so the TTL mostly bounds memory of renames.
pub const TEAM_ID_CACHE_TTL_MS: i64 = 7 * 24 * 60 * 60 * 1000;

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Name-keyed cache of resolved team identities.
///
/// Shared across concurrent reconciliation runs; writes are idempotent per
/// name, so a plain mutex-guarded map insertion is all the coordination
/// needed. The clock is injectable so TTL behavior is testable without
/// wall-clock sleeps.
#[derive(Debug)]
pub struct TeamIdentityCache {
    entries: Mutex<HashMap<String, ResolvedTeam>>,
    ttl_ms: i64,
    clock: fn() -> i64,
}

impl Default for TeamIdentityCache {
    fn default() -> Self {
        Self::new(TEAM_ID_CACHE_TTL_MS)
    }
}

impl TeamIdentityCache {
    pub fn new(ttl_ms: i64) -> Self {
        Self::with_clock(ttl_ms, now_ms)
    }

    pub fn with_clock(ttl_ms: i64, clock: fn() -> i64) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl_ms,
            clock,
        }
    }

    pub fn now_ms(&self) -> i64 {
        (self.clock)()
    }

    /// The cached identity for `name`, only while within the TTL. Stale
    /// entries are not removed; the next successful resolution overwrites
    /// them.
    pub fn fresh(&self, name: &str) -> Option<ResolvedTeam> {
        let entries = self.entries.lock().expect("team cache lock poisoned");
        let entry = entries.get(name)?;
        if self.now_ms() - entry.resolved_at_ms < self.ttl_ms {
            Some(entry.clone())
        } else {
            None
        }
    }

    pub fn insert(&self, entry: ResolvedTeam) {
        let mut entries = self.entries.lock().expect("team cache lock poisoned");
        entries.insert(entry.name.clone(), entry);
    }
}

/// Resolve a watched team's fallback-provider identity, serving from the
/// cache when fresh.
///
/// `None` means "could not resolve this round": no search results, no usable
/// id in the chosen result, or a gateway failure. Negative outcomes are not
/// cached, so the next run retries.
pub async fn resolve_team(
    api: &FootballApi,
    cache: &TeamIdentityCache,
    name: &str,
    country: Option<&str>,
) -> Option<ResolvedTeam> {
    if let Some(hit) = cache.fresh(name) {
        return Some(hit);
    }

    let results = api.search_teams(name).await.ok()?;
    let chosen = select_search_result(&results, name, country)?;
    let team_id = chosen.id_team.clone().filter(|id| !id.is_empty())?;

    let badge = normalize_badge_url(chosen.str_team_badge.as_deref());
    let entry = ResolvedTeam {
        name: name.to_owned(),
        team_id,
        badge_url: Some(badge).filter(|b| !b.is_empty()),
        resolved_at_ms: cache.now_ms(),
    };
    cache.insert(entry.clone());
    Some(entry)
}

/// Tie-break among fuzzy search results, strongest signal first:
/// exact name match in the requested country, then exact name match
/// anywhere, then whatever the provider ranked first.
pub fn select_search_result<'a>(
    results: &'a [SportsDbTeam],
    name: &str,
    country: Option<&str>,
) -> Option<&'a SportsDbTeam> {
    let lower_name = name.to_lowercase();
    let name_matches = |team: &SportsDbTeam| {
        team.str_team
            .as_deref()
            .is_some_and(|t| t.to_lowercase() == lower_name)
    };

    if let Some(want) = country.map(str::to_lowercase) {
        let hit = results.iter().find(|team| {
            name_matches(team)
                && team
                    .str_country
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase() == want)
        });
        if hit.is_some() {
            return hit;
        }
    }

    results
        .iter()
        .find(|team| name_matches(team))
        .or_else(|| results.first())
}
