//! Deferred opponent turn with a cancellation ticket

use std::time::{Duration, Instant};

/// Caller-side handle to a scheduled opponent turn
///
/// Only the handle matching the session's live ticket can fire; once the
/// turn runs or the session is aborted the handle goes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentTurnHandle {
    pub(crate) ticket: u64,
    due_at: Instant,
}

impl OpponentTurnHandle {
    pub fn due_at(&self) -> Instant {
        self.due_at
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due_at
    }

    /// Time left before the turn is due (zero once due)
    pub fn remaining(&self, now: Instant) -> Duration {
        self.due_at.saturating_duration_since(now)
    }
}

/// Session-side record of the scheduled opponent turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingOpponentTurn {
    ticket: u64,
    due_at: Instant,
}

impl PendingOpponentTurn {
    pub(crate) fn new(ticket: u64, now: Instant, delay: Duration) -> Self {
        PendingOpponentTurn {
            ticket,
            due_at: now + delay,
        }
    }

    pub(crate) fn handle(&self) -> OpponentTurnHandle {
        OpponentTurnHandle {
            ticket: self.ticket,
            due_at: self.due_at,
        }
    }

    pub(crate) fn matches(&self, handle: &OpponentTurnHandle) -> bool {
        self.ticket == handle.ticket
    }

    pub(crate) fn is_due(&self, now: Instant) -> bool {
        now >= self.due_at
    }

    pub(crate) fn remaining(&self, now: Instant) -> Duration {
        self.due_at.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_time() {
        let now = Instant::now();
        let pending = PendingOpponentTurn::new(1, now, Duration::from_millis(1500));
        let handle = pending.handle();

        assert!(!handle.is_due(now));
        assert_eq!(handle.remaining(now), Duration::from_millis(1500));
        assert!(handle.is_due(now + Duration::from_millis(1500)));
        assert_eq!(
            handle.remaining(now + Duration::from_secs(10)),
            Duration::ZERO
        );
        assert!(pending.is_due(now + Duration::from_secs(2)));
    }

    #[test]
    fn test_ticket_matching() {
        let now = Instant::now();
        let first = PendingOpponentTurn::new(1, now, Duration::ZERO);
        let second = PendingOpponentTurn::new(2, now, Duration::ZERO);
        assert!(first.matches(&first.handle()));
        assert!(!second.matches(&first.handle()));
    }
}
