//! Page widgets wired onto server-rendered markup.
//!
//! Each initializer only touches elements carrying its own marker and keeps
//! no state shared with the others. `notification` is also exported to page
//! scripts for surfacing request failures.

pub mod file_preview;
pub mod form_validation;
pub mod image_preview;
pub mod notification;
pub mod status_badge;
