use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

use crate::models::{Event, Session};

struct SessionEntry {
    session: Session,
    events: Arc<[Event]>,
    created_at: Instant,
}

/// Live sessions keyed by an opaque token. Each session owns the event sample
/// generated when it was created, so every view it opens aggregates the same
/// data.
#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<DashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        SessionStore {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn create(&self, session: Session, events: Vec<Event>) -> String {
        self.create_at(session, events, Instant::now())
    }

    /// Stores a new session. Sessions that have outlived the ttl are dropped
    /// first, so abandoned logins do not pile up.
    pub fn create_at(&self, session: Session, events: Vec<Event>, now: Instant) -> String {
        let purged = self.purge_expired(now);
        if purged > 0 {
            tracing::debug!(purged, "dropped expired sessions");
        }

        let token = Uuid::new_v4().simple().to_string();
        self.entries.insert(
            token.clone(),
            SessionEntry {
                session,
                events: events.into(),
                created_at: now,
            },
        );
        token
    }

    pub fn get(&self, token: &str) -> Option<(Session, Arc<[Event]>)> {
        self.get_at(token, Instant::now())
    }

    /// Looks a session up, dropping it instead when it has outlived the ttl.
    pub fn get_at(&self, token: &str, now: Instant) -> Option<(Session, Arc<[Event]>)> {
        let found = self.entries.get(token).map(|entry| {
            let expired = now.saturating_duration_since(entry.created_at) >= self.ttl;
            (expired, entry.session.clone(), Arc::clone(&entry.events))
        });

        match found {
            Some((false, session, events)) => Some((session, events)),
            Some((true, session, _)) => {
                tracing::debug!(username = %session.username, "session expired");
                self.entries.remove(token);
                None
            }
            None => None,
        }
    }

    /// Drops every session older than the ttl and returns how many went.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.created_at) < self.ttl);
        before.saturating_sub(self.entries.len())
    }

    /// Swaps the cached sample of a live session. Returns false when the
    /// token is unknown.
    pub fn replace_events(&self, token: &str, events: Vec<Event>) -> bool {
        match self.entries.get_mut(token) {
            Some(mut entry) => {
                entry.events = events.into();
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, token: &str) -> Option<Session> {
        self.entries.remove(token).map(|(_, entry)| entry.session)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
