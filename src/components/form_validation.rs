//! Submit guard for forms using Bootstrap's validation styles.
//!
//! Forms opt in with `class="needs-validation"`. An invalid form does not
//! submit; either way it gets `was-validated` so field feedback shows.

#[cfg(test)]
#[path = "form_validation_test.rs"]
mod form_validation_test;

pub const FORM_SELECTOR: &str = ".needs-validation";
pub const VALIDATED_CLASS: &str = "was-validated";

/// What the guard does for one submit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitVerdict {
    /// Cancel the submission and stop propagation.
    pub block: bool,
    /// Add [`VALIDATED_CLASS`] to the form.
    pub mark_validated: bool,
}

impl SubmitVerdict {
    pub fn for_validity(valid: bool) -> Self {
        Self { block: !valid, mark_validated: true }
    }
}

/// Attach the submit guard to every opted-in form.
pub fn init_form_validation() {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::HtmlFormElement;

        use crate::util::dom;

        let Some(doc) = dom::document() else {
            return;
        };
        for el in dom::query_all(&doc, FORM_SELECTOR) {
            let Ok(form) = el.dyn_into::<HtmlFormElement>() else {
                continue;
            };
            let target = form.clone();
            dom::listen(&form, "submit", move |event| {
                let verdict = SubmitVerdict::for_validity(target.check_validity());
                if verdict.block {
                    event.prevent_default();
                    event.stop_propagation();
                }
                if verdict.mark_validated {
                    if let Err(err) = target.class_list().add_1(VALIDATED_CLASS) {
                        log::debug!("validated class rejected: {err:?}");
                    }
                }
            });
        }
    }
}
