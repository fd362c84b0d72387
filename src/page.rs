//! Page bootstrap.
//!
//! Runs every initializer once the document is parsed. Loading the module
//! twice (or calling [`boot`] again) does not wire duplicate listeners.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use crate::components::{file_preview, form_validation, image_preview, status_badge};
use crate::config::UiConfig;
use crate::util::latch::Latch;

thread_local! {
    static BOOTED: Latch = Latch::new();
}

/// The latch guarding page initialization.
pub fn boot_latch() -> Latch {
    BOOTED.with(Clone::clone)
}

/// Run all initializers unless `latch` was already claimed.
///
/// Returns whether this call did the work.
pub fn boot_with(latch: &Latch, config: &UiConfig) -> bool {
    if !latch.claim() {
        log::debug!("page already initialized");
        return false;
    }
    status_badge::init_status_badges();
    image_preview::init_image_previews();
    file_preview::init_file_upload_previews(config);
    form_validation::init_form_validation();
    log::debug!("page initialized");
    true
}

/// Run all initializers once per page.
pub fn boot(config: &UiConfig) -> bool {
    boot_with(&boot_latch(), config)
}

/// Whether boot has to wait for `DOMContentLoaded`, given `document.readyState`.
pub fn must_defer(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Boot now if the document is parsed, otherwise on `DOMContentLoaded`.
#[cfg(feature = "hydrate")]
pub fn schedule(config: UiConfig) {
    use crate::util::dom;

    let Some(doc) = dom::document() else {
        return;
    };
    if must_defer(&doc.ready_state()) {
        dom::listen_once(&doc, "DOMContentLoaded", move |_| {
            boot(&config);
        });
    } else {
        boot(&config);
    }
}
