// ── Session registry ──
//
// Explicit, host-owned registry of active device sessions. The host
// collaborator holds one of these and passes it by handle; core code
// never reaches into ambient global state.

use dashmap::DashMap;

use crate::session::Session;

/// Registry of active sessions, keyed by device host.
///
/// Thread-safe; one entry per configured device. Removal tears the
/// session down.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session under its host key. Returns the previously
    /// registered session for that host, if any, without tearing it
    /// down -- the caller decides what to do with it.
    pub fn insert(&self, session: Session) -> Option<Session> {
        self.sessions.insert(session.host().to_owned(), session)
    }

    /// Look up the session for `host`.
    pub fn get(&self, host: &str) -> Option<Session> {
        self.sessions.get(host).map(|s| s.clone())
    }

    /// Remove and tear down the session for `host`. Returns `true` if
    /// one existed.
    pub async fn remove(&self, host: &str) -> bool {
        if let Some((_, session)) = self.sessions.remove(host) {
            session.teardown().await;
            true
        } else {
            false
        }
    }

    /// Tear down every registered session.
    pub async fn teardown_all(&self) {
        let hosts: Vec<String> = self.sessions.iter().map(|s| s.key().clone()).collect();
        for host in hosts {
            self.remove(&host).await;
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
