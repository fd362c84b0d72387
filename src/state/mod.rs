//! Client-side state.
//!
//! DESIGN
//! ======
//! The only state this crate owns is the auth context. It is injected into
//! the request helper instead of being read from globals so tests can swap
//! in memory-backed stores.

pub mod auth;
