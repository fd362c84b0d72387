//! Shared one-shot flag.

#[cfg(test)]
#[path = "latch_test.rs"]
mod latch_test;

use std::cell::Cell;
use std::rc::Rc;

/// A flag that can be claimed exactly once. Clones share the same flag.
///
/// Used to run page initialization once and to send the browser to the
/// login page once even when several requests fail with 401 concurrently.
#[derive(Clone, Debug, Default)]
pub struct Latch {
    claimed: Rc<Cell<bool>>,
}

impl Latch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` for the first caller only.
    pub fn claim(&self) -> bool {
        !self.claimed.replace(true)
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed.get()
    }
}
