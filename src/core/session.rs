use super::ledger::Ledger;
use anyhow::{Result, anyhow};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, RwLock},
};
use tracing::debug;

pub type SharedLedger = Arc<Mutex<Ledger>>;

/// Keeps one ledger per session. Ledgers are never shared between
/// sessions; callers lock a session's ledger for each read-modify-write.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SharedLedger>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session's ledger, creating an empty one on first use.
    pub fn open(&self, session_id: &str) -> Result<SharedLedger> {
        if let Some(ledger) = self
            .sessions
            .read()
            .map_err(|_| anyhow!("Session registry lock poisoned"))?
            .get(session_id)
        {
            return Ok(Arc::clone(ledger));
        }

        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| anyhow!("Session registry lock poisoned"))?;
        let ledger = sessions.entry(session_id.to_string()).or_insert_with(|| {
            debug!("Opening new session: {session_id}");
            Arc::new(Mutex::new(Ledger::new()))
        });
        Ok(Arc::clone(ledger))
    }

    /// Runs `f` with exclusive access to the session's ledger.
    pub fn with_ledger<T>(&self, session_id: &str, f: impl FnOnce(&mut Ledger) -> T) -> Result<T> {
        let shared = self.open(session_id)?;
        let mut ledger = shared
            .lock()
            .map_err(|_| anyhow!("Ledger lock poisoned for session {session_id}"))?;
        Ok(f(&mut ledger))
    }

    pub fn remove(&self, session_id: &str) -> Result<bool> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| anyhow!("Session registry lock poisoned"))?;
        Ok(sessions.remove(session_id).is_some())
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
