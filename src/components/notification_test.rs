use super::*;

#[test]
fn severity_defaults_to_info() {
    assert_eq!(Severity::default(), Severity::Info);
}

#[test]
fn severity_parses_known_names() {
    assert_eq!(Severity::parse("success"), Severity::Success);
    assert_eq!(Severity::parse("WARNING"), Severity::Warning);
    assert_eq!(Severity::parse(" danger "), Severity::Danger);
    assert_eq!(Severity::parse("info"), Severity::Info);
}

#[test]
fn unknown_severity_falls_back_to_info() {
    assert_eq!(Severity::parse("primary"), Severity::Info);
    assert_eq!(Severity::parse(""), Severity::Info);
}

#[test]
fn alert_class_includes_severity_and_dismiss_classes() {
    assert_eq!(
        Severity::Danger.alert_class(),
        "alert alert-danger alert-dismissible fade show notification-toast"
    );
}

#[test]
fn notification_defaults() {
    let n = Notification::new("已保存");
    assert_eq!(n.message, "已保存");
    assert_eq!(n.severity, Severity::Info);
    assert_eq!(n.duration_ms, 3000);
}

#[test]
fn notification_builder_overrides() {
    let n = Notification::new("上传失败").severity(Severity::Danger).duration_ms(8000);
    assert_eq!(n.severity, Severity::Danger);
    assert_eq!(n.duration_ms, 8000);
}

#[test]
fn style_pins_toast_top_right() {
    assert!(NOTIFICATION_STYLE.contains("position: fixed"));
    assert!(NOTIFICATION_STYLE.contains("top: 20px"));
    assert!(NOTIFICATION_STYLE.contains("right: 20px"));
    assert!(NOTIFICATION_STYLE.contains("z-index: 1050"));
}

// =============================================================
// ToastClose
// =============================================================

#[test]
fn timer_closes_toast_left_open() {
    let close = ToastClose::new();
    assert!(close.timer_fired());
}

#[test]
fn timer_skips_toast_dismissed_by_user() {
    let close = ToastClose::new();
    let listener = close.clone();
    listener.closed();
    assert!(!close.timer_fired());
}

#[test]
fn closed_event_after_timer_is_harmless() {
    let close = ToastClose::new();
    assert!(close.timer_fired());
    close.closed();
    assert!(!close.timer_fired());
}
