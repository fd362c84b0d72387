//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! These helpers carry no DOM dependencies so the policies they encode
//! (run-once, stale-work cancellation) are testable natively.

pub mod latch;
pub mod task;

#[cfg(feature = "hydrate")]
pub mod dom;
