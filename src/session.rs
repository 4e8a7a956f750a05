//! Calculator sessions.
//!
//! A [`Session`] owns one calculator state and feeds intents through the
//! reducer. A [`SessionRegistry`] keeps any number of independent sessions
//! for hosts that serve more than one display.

use crate::calculator::{CalculatorState, Grouping, Intent, Operation, reduce};
use crate::error::CalcError;
use crate::items::DisplayLines;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// A single calculator, starting from the empty state.
#[derive(Clone, Debug, Default)]
pub struct Session {
    state: CalculatorState,
    grouping: Grouping,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that formats its display with `grouping`.
    pub fn with_grouping(grouping: Grouping) -> Self {
        Self {
            state: CalculatorState::default(),
            grouping,
        }
    }

    /// Feed one intent and return the resulting state.
    pub fn dispatch(&mut self, intent: Intent) -> &CalculatorState {
        self.state = reduce(&self.state, &intent);
        &self.state
    }

    /// Feed several intents in order.
    pub fn dispatch_all(&mut self, intents: impl IntoIterator<Item = Intent>) -> &CalculatorState {
        for intent in intents {
            self.dispatch(intent);
        }
        &self.state
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// The pending operation, for showing next to the previous operand.
    pub fn operation(&self) -> Option<Operation> {
        self.state.operation
    }

    pub fn display(&self) -> DisplayLines {
        DisplayLines::from_state_with(&self.state, &self.grouping)
    }

    pub fn reset(&mut self) {
        self.state = CalculatorState::default();
    }
}

/// Identifies a session inside a [`SessionRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Independent sessions keyed by id.
///
/// Each session sits behind its own lock, so intents for different sessions
/// never contend and never observe each other's state.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
    next_id: AtomicU64,
    grouping: Grouping,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose new sessions format with `grouping`.
    pub fn with_grouping(grouping: Grouping) -> Self {
        Self {
            grouping,
            ..Self::default()
        }
    }

    /// Start a fresh session and return its id.
    pub fn create(&self) -> SessionId {
        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let session = Session::with_grouping(self.grouping.clone());
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(Mutex::new(session)));
        tracing::debug!(%id, "created calculator session");
        id
    }

    /// Feed one intent into a session and return a snapshot of its new state.
    pub fn dispatch(&self, id: SessionId, intent: Intent) -> Result<CalculatorState, CalcError> {
        let session = self.get(id)?;
        let mut session = session.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(session.dispatch(intent).clone())
    }

    pub fn state(&self, id: SessionId) -> Result<CalculatorState, CalcError> {
        let session = self.get(id)?;
        let session = session.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(session.state().clone())
    }

    pub fn display(&self, id: SessionId) -> Result<DisplayLines, CalcError> {
        let session = self.get(id)?;
        let session = session.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(session.display())
    }

    /// Drop a session. Returns whether it existed.
    pub fn remove(&self, id: SessionId) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some();
        if removed {
            tracing::debug!(%id, "removed calculator session");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, id: SessionId) -> Result<Arc<Mutex<Session>>, CalcError> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(CalcError::UnknownSession(id.0))
    }
}
