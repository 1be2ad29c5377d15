//! Ledger events and non-blocking broadcast emitter.

use tokio::sync::broadcast;

/// State changes made by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    PeerAdded {
        id: String,
    },
    PeerRemoved {
        id: String,
    },
    RecordApplied {
        id: String,
        reason: String,
        point: i64,
        /// How many times the record was applied.
        applications: usize,
        /// Score after all applications.
        score: i64,
    },
    Pended {
        id: String,
    },
    Resumed {
        id: String,
    },
    Blocked {
        id: String,
    },
    Unblocked {
        id: String,
    },
}

impl LedgerEvent {
    pub fn peer_id(&self) -> &str {
        match self {
            Self::PeerAdded { id }
            | Self::PeerRemoved { id }
            | Self::RecordApplied { id, .. }
            | Self::Pended { id }
            | Self::Resumed { id }
            | Self::Blocked { id }
            | Self::Unblocked { id } => id,
        }
    }

    pub fn is_status_event(&self) -> bool {
        matches!(
            self,
            Self::Pended { .. } | Self::Resumed { .. } | Self::Blocked { .. } | Self::Unblocked { .. }
        )
    }
}

/// Non-blocking broadcast emitter. Slow subscribers drop events independently.
#[derive(Debug)]
pub(crate) struct EventEmitter {
    tx: broadcast::Sender<LedgerEvent>,
}

impl EventEmitter {
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Returns immediately whether or not anyone is listening.
    pub(crate) fn emit(&self, event: LedgerEvent) {
        let _ = self.tx.send(event);
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_emitter_basic() {
        let emitter = EventEmitter::new(8);
        let mut rx = emitter.subscribe();

        emitter.emit(LedgerEvent::PeerAdded { id: "a".into() });

        let event = rx.recv().await.unwrap();
        assert_eq!(event, LedgerEvent::PeerAdded { id: "a".into() });
        assert_eq!(event.peer_id(), "a");
    }

    #[tokio::test]
    async fn test_event_emitter_multiple_subscribers() {
        let emitter = EventEmitter::new(8);
        let mut rx1 = emitter.subscribe();
        let mut rx2 = emitter.subscribe();

        emitter.emit(LedgerEvent::Blocked { id: "b".into() });

        let event1 = rx1.recv().await.unwrap();
        let event2 = rx2.recv().await.unwrap();
        assert_eq!(event1, event2);
        assert!(event1.is_status_event());
    }

    #[test]
    fn test_event_emitter_no_subscribers() {
        let emitter = EventEmitter::new(1);
        emitter.emit(LedgerEvent::PeerRemoved { id: "c".into() });

        // A lagging subscriber loses the oldest events, the emitter never waits
        let mut rx = emitter.subscribe();
        emitter.emit(LedgerEvent::PeerAdded { id: "d".into() });
        emitter.emit(LedgerEvent::PeerAdded { id: "e".into() });
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(1))
        ));
        assert_eq!(rx.try_recv().unwrap().peer_id(), "e");
    }
}
