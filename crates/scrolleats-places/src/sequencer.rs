//! Request sequencing so late responses from superseded queries are dropped.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic ticket handed out when a query starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A result paired with the ticket of the request that produced it.
#[derive(Debug, Clone)]
pub struct Tracked<T> {
    pub ticket: RequestTicket,
    pub value: T,
}

/// Issues tickets; only the most recent one is current.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every earlier ticket.
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the newest request issued so far.
    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
