//! Networking for page scripts.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` builds requests and normalizes responses, `transport` performs the
//! fetch, `types` defines the request/response shapes, and `error` the
//! failure taxonomy surfaced to callers.

pub mod api;
pub mod error;
pub mod transport;
pub mod types;
