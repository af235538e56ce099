//! Search generations.
//!
//! Each search takes a [`SearchTicket`] from a [`SearchSession`]. Starting a
//! newer search (or invalidating the session) makes older tickets stale, and
//! results carrying a stale ticket are dropped instead of displayed.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared generation counter. Clones observe the same counter.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    generation: Arc<AtomicU64>,
}

/// Marks the generation a search was started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
}

impl SearchTicket {
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search, superseding all earlier tickets.
    #[must_use]
    pub fn begin(&self) -> SearchTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        SearchTicket { generation }
    }

    /// Supersede all outstanding tickets without starting a search.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }
}
