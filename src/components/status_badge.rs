//! Submission status badges.
//!
//! Templates render `<span data-status="graded"></span>`; this module adds
//! the badge classes and the localized label.

#[cfg(test)]
#[path = "status_badge_test.rs"]
mod status_badge_test;

pub const STATUS_SELECTOR: &str = "[data-status]";
pub const STATUS_ATTR: &str = "data-status";
pub const BADGE_CLASS: &str = "status-badge";

/// Lifecycle of a homework submission as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Submitted,
    Graded,
    NeedsRevision,
    Revised,
    NotSubmitted,
}

impl SubmissionStatus {
    pub const ALL: [Self; 5] = [
        Self::Submitted,
        Self::Graded,
        Self::NeedsRevision,
        Self::Revised,
        Self::NotSubmitted,
    ];

    /// Known status for `code`, `None` for anything else.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "submitted" => Some(Self::Submitted),
            "graded" => Some(Self::Graded),
            "needs_revision" => Some(Self::NeedsRevision),
            "revised" => Some(Self::Revised),
            "not_submitted" => Some(Self::NotSubmitted),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Graded => "graded",
            Self::NeedsRevision => "needs_revision",
            Self::Revised => "revised",
            Self::NotSubmitted => "not_submitted",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Submitted => "已提交",
            Self::Graded => "已批改",
            Self::NeedsRevision => "需要修改",
            Self::Revised => "已修改",
            Self::NotSubmitted => "未提交",
        }
    }
}

/// What to apply to one badge element, on top of [`BADGE_CLASS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    /// `status-<code>`; `None` when the code cannot form a class token.
    pub status_class: Option<String>,
    /// Replacement text; `None` keeps the element's text.
    pub label: Option<&'static str>,
}

impl Badge {
    pub fn for_code(code: &str) -> Self {
        // Class list tokens may not contain whitespace.
        let status_class = (!code.contains(char::is_whitespace)).then(|| format!("status-{code}"));
        Self {
            status_class,
            label: SubmissionStatus::from_code(code).map(SubmissionStatus::label),
        }
    }
}

/// Decorate every `[data-status]` element in the document.
pub fn init_status_badges() {
    #[cfg(feature = "hydrate")]
    {
        let Some(doc) = crate::util::dom::document() else {
            return;
        };
        for el in crate::util::dom::query_all(&doc, STATUS_SELECTOR) {
            let code = el.get_attribute(STATUS_ATTR).unwrap_or_default();
            let badge = Badge::for_code(&code);
            let classes = el.class_list();
            if let Err(err) = classes.add_1(BADGE_CLASS) {
                log::debug!("badge class rejected: {err:?}");
            }
            match &badge.status_class {
                Some(class) => {
                    if let Err(err) = classes.add_1(class) {
                        log::debug!("status class {class} rejected: {err:?}");
                    }
                }
                None => log::debug!("status code {code:?} is not a class token"),
            }
            if let Some(label) = badge.label {
                el.set_text_content(Some(label));
            }
        }
    }
}
