use crate::client::FootballApi;
use crate::sportsdb::SportsDbEvent;
use futures_util::future::join_all;
use std::collections::{HashMap, HashSet};

/// Badge URLs gathered for one reconciliation run, indexed two ways: by the
/// fallback provider's team id, and by lowercased team name for events that
/// reference teams by name only.
#[derive(Debug, Clone, Default)]
pub struct BadgeIndex {
    by_team_id: HashMap<String, String>,
    by_name: HashMap<String, String>,
}

impl BadgeIndex {
    pub fn seed_id(&mut self, team_id: &str, badge: &str) {
        self.by_team_id.insert(team_id.to_owned(), badge.to_owned());
    }

    pub fn seed_name(&mut self, name: &str, badge: &str) {
        self.by_name.insert(name.to_lowercase(), badge.to_owned());
    }

    pub fn has_id(&self, team_id: &str) -> bool {
        self.by_team_id.contains_key(team_id)
    }

    /// Resolve a logo for a fixture side: id-indexed badge first, then the
    /// name index, then empty.
    pub fn logo_for(&self, team_id: Option<&str>, name: Option<&str>) -> String {
        if let Some(id) = team_id.filter(|id| !id.is_empty())
            && let Some(badge) = self.by_team_id.get(id)
        {
            return badge.clone();
        }
        let key = name.unwrap_or_default().to_lowercase();
        self.by_name.get(&key).cloned().unwrap_or_default()
    }
}

/// Badge image URLs are served over https; the provider still returns some
/// as plain http.
pub fn normalize_badge_url(url: Option<&str>) -> String {
    let Some(url) = url else {
        return String::new();
    };
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_owned(),
    }
}

/// Team ids referenced by `events` that have no badge in the index yet,
/// de-duplicated in first-seen order.
pub fn collect_missing_team_ids(events: &[SportsDbEvent], index: &BadgeIndex) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut missing = Vec::new();
    for event in events {
        let sides = [event.id_home_team.as_deref(), event.id_away_team.as_deref()];
        for id in sides.into_iter().flatten() {
            if id.is_empty() || index.has_id(id) || !seen.insert(id.to_owned()) {
                continue;
            }
            missing.push(id.to_owned());
        }
    }
    missing
}

/// Fill in badges for `team_ids` with one concurrent lookup per id. Lookups
/// that fail or return a record without a badge are skipped; a missing badge
/// degrades to an empty logo, never an error. Returns (ok, failed) call
/// counts.
pub async fn enrich_badges(
    api: &FootballApi,
    index: &mut BadgeIndex,
    team_ids: &[String],
) -> (usize, usize) {
    if team_ids.is_empty() {
        return (0, 0);
    }

    let results = join_all(team_ids.iter().map(|id| api.lookup_team(id))).await;

    let mut ok = 0;
    let mut failed = 0;
    for result in results {
        match result {
            Ok(teams) => {
                ok += 1;
                let Some(team) = teams.first() else { continue };
                if let (Some(id), Some(badge)) =
                    (team.id_team.as_deref(), team.str_team_badge.as_deref())
                    && !id.is_empty()
                    && !badge.is_empty()
                {
                    index.seed_id(id, &normalize_badge_url(Some(badge)));
                }
            }
            Err(_) => failed += 1,
        }
    }
    (ok, failed)
}
