//! Transient toast notifications.
//!
//! A toast is a dismissible Bootstrap alert pinned to the top-right corner.
//! It closes itself after its duration; the user can close it earlier with
//! its close button.

#[cfg(test)]
#[path = "notification_test.rs"]
mod notification_test;

#[cfg(feature = "hydrate")]
use leptos::prelude::*;

use crate::config::DEFAULT_NOTIFICATION_DURATION_MS;
use crate::util::latch::Latch;

pub const NOTIFICATION_STYLE: &str = "position: fixed; top: 20px; right: 20px; z-index: 1050; \
     min-width: 250px; box-shadow: 0 0.5rem 1rem rgba(0, 0, 0, 0.15);";

/// Toast severity, mapped onto Bootstrap's contextual alert classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    Success,
    #[default]
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    /// Parse a severity name; anything unrecognized is `Info`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "warning" => Self::Warning,
            "danger" => Self::Danger,
            "info" => Self::Info,
            other => {
                log::debug!("unknown notification type '{other}', using info");
                Self::Info
            }
        }
    }

    pub fn alert_class(self) -> String {
        format!("alert alert-{} alert-dismissible fade show notification-toast", self.as_str())
    }
}

/// One toast to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub duration_ms: u32,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::default(),
            duration_ms: DEFAULT_NOTIFICATION_DURATION_MS,
        }
    }

    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Display the toast. A no-op outside the browser.
    pub fn show(self) {
        #[cfg(feature = "hydrate")]
        mount_toast(self);
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = self;
        }
    }
}

/// Who gets to close a toast: the user's close button or the timer.
///
/// Bootstrap disposes the alert instance once it is closed, so the timer
/// must not touch an alert the user already dismissed.
#[derive(Debug, Clone, Default)]
pub struct ToastClose {
    closed: Latch,
}

impl ToastClose {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the alert closed (by the user or by Bootstrap after the timer).
    pub fn closed(&self) {
        self.closed.claim();
    }

    /// Returns `true` if the timer should close the alert.
    pub fn timer_fired(&self) -> bool {
        self.closed.claim()
    }
}

/// Show `message` with `severity` for `duration_ms`.
pub fn show_notification(message: &str, severity: Severity, duration_ms: u32) {
    Notification::new(message).severity(severity).duration_ms(duration_ms).show();
}

#[cfg(feature = "hydrate")]
fn toast_view(node: NodeRef<leptos::html::Div>, message: String, severity: Severity) -> impl IntoView {
    view! {
        <div node_ref=node class={severity.alert_class()} style=NOTIFICATION_STYLE role="alert">
            {message}
            <button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>
        </div>
    }
}

#[cfg(feature = "hydrate")]
fn mount_toast(notification: Notification) {
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::util::dom;
    use crate::widgets::{ALERT_CLOSED_EVENT, bootstrap::Alert};

    let Some(body) = dom::document().and_then(|doc| doc.body()) else {
        return;
    };
    let Notification { message, severity, duration_ms } = notification;

    let node = NodeRef::<leptos::html::Div>::new();
    let handle = leptos::mount::mount_to(body, move || toast_view(node, message, severity));
    // Dropping the handle unmounts the toast.
    let mounted: Rc<RefCell<Option<Box<dyn Any>>>> = Rc::new(RefCell::new(Some(Box::new(handle))));

    let close = ToastClose::new();
    let alert = node.get_untracked().and_then(|el| {
        let alert = Alert::attach(&el)?;
        let mounted = Rc::clone(&mounted);
        let close = close.clone();
        dom::listen_once(&el, ALERT_CLOSED_EVENT, move |_| {
            close.closed();
            mounted.borrow_mut().take();
        });
        Some(alert)
    });

    gloo_timers::callback::Timeout::new(duration_ms, move || {
        if !close.timer_fired() {
            return;
        }
        match alert {
            Some(alert) => {
                if let Err(err) = alert.close() {
                    log::debug!("toast close failed: {err:?}");
                }
            }
            None => {
                mounted.borrow_mut().take();
            }
        }
    })
    .forget();
}
