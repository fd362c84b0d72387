//! Bindings to third-party JS widgets loaded by the page.
//!
//! The portal ships Bootstrap's bundle in every layout; alerts and modals
//! are driven through its JS API rather than reimplemented here.

#[cfg(feature = "hydrate")]
pub mod bootstrap;

/// Event fired by Bootstrap after an alert has been closed and removed.
pub const ALERT_CLOSED_EVENT: &str = "closed.bs.alert";
/// Event fired by Bootstrap after a modal finished hiding.
pub const MODAL_HIDDEN_EVENT: &str = "hidden.bs.modal";
