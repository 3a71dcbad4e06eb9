//! Shared service state: the API gateway, caches and refresh bookkeeping.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use football_api::client::FootballApi;
use football_api::resolver::TeamIdentityCache;
use football_api::{Fixture, StandingRow, WatchedTeam};

/// How long a fetched standings table is served before refetching.
pub const STANDINGS_TTL: Duration = Duration::from_secs(3600);

/// Monotonic counter handing out one generation number per upcoming refresh.
/// A refresh that finishes after a newer one started is detectably stale.
#[derive(Debug, Default)]
pub struct GenerationGate {
    latest: AtomicU64,
}

impl GenerationGate {
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == generation
    }
}

/// The fixtures produced by one upcoming refresh, tagged with its generation.
#[derive(Debug, Clone)]
pub struct UpcomingSnapshot {
    pub generation: u64,
    pub fixtures: Vec<Fixture>,
}

#[derive(Debug)]
struct CachedTable {
    fetched_at: Instant,
    rows: Vec<StandingRow>,
}

/// Per-competition standings cache with a fixed TTL.
#[derive(Debug)]
pub struct StandingsCache {
    ttl: Duration,
    entries: tokio::sync::RwLock<HashMap<String, CachedTable>>,
}

impl StandingsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: tokio::sync::RwLock::new(HashMap::new()),
        }
    }

    pub async fn fresh(&self, code: &str) -> Option<Vec<StandingRow>> {
        let entries = self.entries.read().await;
        let entry = entries.get(code)?;
        if entry.fetched_at.elapsed() < self.ttl {
            Some(entry.rows.clone())
        } else {
            None
        }
    }

    pub async fn store(&self, code: &str, rows: Vec<StandingRow>) {
        let mut entries = self.entries.write().await;
        entries.insert(
            code.to_owned(),
            CachedTable {
                fetched_at: Instant::now(),
                rows,
            },
        );
    }
}

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<FootballApi>,
    pub identities: Arc<TeamIdentityCache>,
    pub roster: Arc<Vec<WatchedTeam>>,
    pub generations: Arc<GenerationGate>,
    pub upcoming: Arc<tokio::sync::Mutex<Option<UpcomingSnapshot>>>,
    pub standings: Arc<StandingsCache>,
}

impl AppState {
    pub fn new(api: FootballApi, roster: Vec<WatchedTeam>) -> Self {
        Self {
            api: Arc::new(api),
            identities: Arc::new(TeamIdentityCache::default()),
            roster: Arc::new(roster),
            generations: Arc::new(GenerationGate::default()),
            upcoming: Arc::new(tokio::sync::Mutex::new(None)),
            standings: Arc::new(StandingsCache::new(STANDINGS_TTL)),
        }
    }

    /// Record a finished refresh and return the fixtures to serve for it.
    ///
    /// The current generation always overwrites the stored snapshot. A
    /// superseded refresh keeps a newer stored snapshot intact and serves
    /// that instead, so callers never see results older than the slot.
    pub async fn publish_upcoming(&self, generation: u64, fixtures: Vec<Fixture>) -> Vec<Fixture> {
        let mut slot = self.upcoming.lock().await;
        if !self.generations.is_current(generation)
            && let Some(snapshot) = slot.as_ref()
            && snapshot.generation > generation
        {
            return snapshot.fixtures.clone();
        }
        *slot = Some(UpcomingSnapshot {
            generation,
            fixtures: fixtures.clone(),
        });
        fixtures
    }
}
