use serde::{Deserialize, Serialize};

/// Snapshot of one peer's standing.
///
/// Values handed out by the ledger are copies; changing them has no effect
/// on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reputation {
    peer_id: String,
    score: i64,
    pending: bool,
    blocked: bool,
}

impl Reputation {
    pub(crate) fn new(peer_id: impl Into<String>) -> Self {
        Self {
            peer_id: peer_id.into(),
            score: 0,
            pending: false,
            blocked: false,
        }
    }

    pub fn peer_id(&self) -> &str {
        &self.peer_id
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub(crate) fn add_points(&mut self, point: i64) {
        self.score = self.score.saturating_add(point);
    }

    pub(crate) fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    pub(crate) fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reputation_is_neutral() {
        let rep = Reputation::new("peer");
        assert_eq!(rep.peer_id(), "peer");
        assert_eq!(rep.score(), 0);
        assert!(!rep.is_pending());
        assert!(!rep.is_blocked());
    }

    #[test]
    fn test_add_points_saturates() {
        let mut rep = Reputation::new("peer");
        rep.add_points(i64::MAX);
        rep.add_points(10);
        assert_eq!(rep.score(), i64::MAX);

        rep.add_points(i64::MIN);
        rep.add_points(i64::MIN);
        assert_eq!(rep.score(), i64::MIN);
    }
}
