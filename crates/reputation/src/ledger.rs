//! Reputation ledger behind a single reader/writer lock.

use std::collections::{HashMap, HashSet, VecDeque};

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::events::{EventEmitter, LedgerEvent};
use crate::{Record, Reputation};

/// Ledger configuration.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Broadcast channel capacity for ledger events.
    pub event_channel_capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: 256,
        }
    }
}

/// One peer's reputation and log ranges, read under a single guard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerSnapshot {
    pub reputation: Option<Reputation>,
    pub history: Vec<Record>,
    pub violations: Vec<Record>,
}

#[derive(Debug, Default)]
struct LedgerState {
    reputations: HashMap<String, Reputation>,
    /// Newest first.
    history: HashMap<String, VecDeque<Record>>,
    /// Newest first.
    violations: HashMap<String, VecDeque<Record>>,
    pending: HashSet<String>,
    blocked: HashSet<String>,
}

/// Trust state for every tracked peer.
///
/// Mutations take the writer lock for their whole duration and reads take
/// the reader lock, so no caller sees a score updated without its history
/// entry or a flag set without its index entry. Operations on untracked
/// peers are no-ops; queries on them return `None` or an empty `Vec`.
///
/// Logs grow without bound. Callers that replay records must cap the
/// `replica` count themselves.
#[derive(Debug)]
pub struct ReputationLedger {
    state: RwLock<LedgerState>,
    events: EventEmitter,
}

impl Default for ReputationLedger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl ReputationLedger {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            state: RwLock::new(LedgerState::default()),
            events: EventEmitter::new(config.event_channel_capacity),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    /// Start tracking `id` with a zero score. No-op if already tracked.
    pub fn add_peer(&self, id: &str) {
        let mut state = self.state.write();
        if state.reputations.contains_key(id) {
            trace!(id, "peer already tracked");
            return;
        }

        state.reputations.insert(id.to_string(), Reputation::new(id));
        state.history.insert(id.to_string(), VecDeque::new());
        state.violations.insert(id.to_string(), VecDeque::new());

        debug!(id, "peer added to ledger");
        self.events.emit(LedgerEvent::PeerAdded { id: id.to_string() });
    }

    /// Drop the entry, both logs and any flag index membership for `id`.
    pub fn remove_peer(&self, id: &str) {
        let mut state = self.state.write();
        if state.reputations.remove(id).is_none() {
            return;
        }

        state.history.remove(id);
        state.violations.remove(id);
        state.pending.remove(id);
        state.blocked.remove(id);

        debug!(id, "peer removed from ledger");
        self.events.emit(LedgerEvent::PeerRemoved { id: id.to_string() });
    }

    /// IDs of all tracked peers, in no particular order.
    pub fn list_peers(&self) -> Vec<String> {
        self.state.read().reputations.keys().cloned().collect()
    }

    pub fn get_peer_reputation(&self, id: &str) -> Option<Reputation> {
        self.state.read().reputations.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.state.read().reputations.contains_key(id)
    }

    pub fn peer_count(&self) -> usize {
        self.state.read().reputations.len()
    }

    /// Apply `record` to `id` exactly `replica + 1` times.
    ///
    /// Each application adds the record's point to the score and logs a copy
    /// at the head of the history, and of the violation log if it is a
    /// violation. Scores saturate at the `i64` bounds.
    pub fn update_peer_record(&self, id: &str, record: &Record, replica: usize) {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let Some(reputation) = state.reputations.get_mut(id) else {
            trace!(id, reason = record.reason(), "record for untracked peer ignored");
            return;
        };

        let applications = replica.saturating_add(1);
        let history = state.history.entry(id.to_string()).or_default();
        let violations = state.violations.entry(id.to_string()).or_default();

        for _ in 0..applications {
            reputation.add_points(record.point());
            history.push_front(record.clone());
            if record.is_violation() {
                violations.push_front(record.clone());
            }
        }

        let score = reputation.score();
        debug!(
            id,
            reason = record.reason(),
            point = record.point(),
            applications,
            score,
            "record applied"
        );
        self.events.emit(LedgerEvent::RecordApplied {
            id: id.to_string(),
            reason: record.reason().to_string(),
            point: record.point(),
            applications,
            score,
        });
    }

    pub fn pend_peer(&self, id: &str) {
        self.set_flag(id, Flag::Pending, true);
    }

    pub fn resume_peer(&self, id: &str) {
        self.set_flag(id, Flag::Pending, false);
    }

    pub fn block_peer(&self, id: &str) {
        self.set_flag(id, Flag::Blocked, true);
    }

    pub fn unblock_peer(&self, id: &str) {
        self.set_flag(id, Flag::Blocked, false);
    }

    pub fn get_pending_peers(&self) -> Vec<String> {
        self.state.read().pending.iter().cloned().collect()
    }

    pub fn get_blocked_peers(&self) -> Vec<String> {
        self.state.read().blocked.iter().cloned().collect()
    }

    /// History entries in `[from, to)`, newest first.
    pub fn get_peer_history(&self, id: &str, from: usize, to: usize) -> Vec<Record> {
        range(self.state.read().history.get(id), from, to)
    }

    /// Violation entries in `[from, to)`, newest first.
    pub fn get_peer_violations(&self, id: &str, from: usize, to: usize) -> Vec<Record> {
        range(self.state.read().violations.get(id), from, to)
    }

    /// Reputation, history and violations in `[from, to)` from one read.
    pub fn inspect(&self, id: &str, from: usize, to: usize) -> PeerSnapshot {
        let state = self.state.read();
        PeerSnapshot {
            reputation: state.reputations.get(id).cloned(),
            history: range(state.history.get(id), from, to),
            violations: range(state.violations.get(id), from, to),
        }
    }

    /// Sets a flag and its index entry together, emitting an event on change.
    fn set_flag(&self, id: &str, flag: Flag, value: bool) {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let Some(reputation) = state.reputations.get_mut(id) else {
            trace!(id, ?flag, value, "flag change for untracked peer ignored");
            return;
        };

        let (index, current) = match flag {
            Flag::Pending => (&mut state.pending, reputation.is_pending()),
            Flag::Blocked => (&mut state.blocked, reputation.is_blocked()),
        };
        if current == value {
            return;
        }

        match flag {
            Flag::Pending => reputation.set_pending(value),
            Flag::Blocked => reputation.set_blocked(value),
        }
        if value {
            index.insert(id.to_string());
        } else {
            index.remove(id);
        }

        debug!(id, ?flag, value, "peer flag changed");
        let id = id.to_string();
        self.events.emit(match (flag, value) {
            (Flag::Pending, true) => LedgerEvent::Pended { id },
            (Flag::Pending, false) => LedgerEvent::Resumed { id },
            (Flag::Blocked, true) => LedgerEvent::Blocked { id },
            (Flag::Blocked, false) => LedgerEvent::Unblocked { id },
        });
    }
}

#[derive(Debug, Clone, Copy)]
enum Flag {
    Pending,
    Blocked,
}

fn range(log: Option<&VecDeque<Record>>, from: usize, to: usize) -> Vec<Record> {
    match log {
        Some(log) if from < to => log.iter().skip(from).take(to - from).cloned().collect(),
        _ => Vec::new(),
    }
}
