use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{OmdbMovie, TmdbMovie};

/// State for one interactive session (one browser tab). Exactly four slots:
/// the two catalog records, the derived summary, and the guide flag. The
/// three data slots move together: cleared as a unit when a fetch starts,
/// set as a unit when one succeeds. `summary` is only ever set alongside a
/// TMDB record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub tmdb: Option<TmdbMovie>,
    pub omdb: Option<OmdbMovie>,
    pub summary: Option<String>,
    pub guide_displayed: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tmdb: None,
            omdb: None,
            summary: None,
            guide_displayed: true,
        }
    }

    /// A new lookup starts from a clean slate; the guide flag is untouched.
    pub fn begin_fetch(&mut self) {
        self.tmdb = None;
        self.omdb = None;
        self.summary = None;
    }

    /// Store the results of a successful lookup in one step and dismiss the
    /// guide permanently. A missing OMDB record does not fail the fetch.
    pub fn complete_fetch(
        &mut self,
        tmdb: TmdbMovie,
        omdb: Option<OmdbMovie>,
        summary: Option<String>,
    ) {
        self.tmdb = Some(tmdb);
        self.omdb = omdb;
        self.summary = summary;
        self.guide_displayed = false;
    }

    /// Questions are only answerable once at least one record is present.
    pub fn has_movie_data(&self) -> bool {
        self.tmdb.is_some() || self.omdb.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for storing and retrieving sessions
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn save(&self, session: Session) -> anyhow::Result<()>;
    async fn get(&self, id: &str) -> anyhow::Result<Option<Session>>;
    async fn delete(&self, id: &str) -> anyhow::Result<()>;
}

/// In-memory implementation of SessionStorage. Sessions live for the
/// process lifetime at most; nothing is persisted.
pub struct InMemorySessionStorage {
    sessions: Arc<DashMap<String, Session>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemorySessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn save(&self, session: Session) -> anyhow::Result<()> {
        self.sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn get(&self, id: &str) -> anyhow::Result<Option<Session>> {
        Ok(self.sessions.get(id).map(|entry| entry.clone()))
    }

    async fn delete(&self, id: &str) -> anyhow::Result<()> {
        self.sessions.remove(id);
        Ok(())
    }
}
