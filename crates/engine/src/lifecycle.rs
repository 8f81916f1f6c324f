//! Request generations and stale-outcome rejection.
//!
//! Every dispatched query captures the generation current at dispatch time.
//! When its outcome arrives, the outcome may only be applied if that captured
//! generation is still the current one. Anything older is a stale response and
//! is dropped without touching visible state.
//!
//! Input changes and clears also advance the generation through
//! [`RequestLifecycle::supersede`], so a keystroke invalidates a request that
//! is already in flight even before the next debounced dispatch happens.

use quicksearch_types::Generation;

#[derive(Debug, Default)]
pub struct RequestLifecycle {
    current: Generation,
    outstanding: usize,
}

impl RequestLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new logical request and return its generation.
    pub fn begin(&mut self) -> Generation {
        self.current = self.current.next();
        self.outstanding += 1;
        self.current
    }

    /// Invalidate every request issued so far without starting a new one.
    pub fn supersede(&mut self) -> Generation {
        self.current = self.current.next();
        self.current
    }

    /// Record that the request tagged `generation` has settled.
    ///
    /// Returns whether its outcome may be applied.
    pub fn finish(&mut self, generation: Generation) -> bool {
        self.outstanding = self.outstanding.saturating_sub(1);
        self.is_current(generation)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation == self.current
    }

    pub fn current(&self) -> Generation {
        self.current
    }

    /// Number of requests that were dispatched and have not settled yet,
    /// stale ones included.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }
}
