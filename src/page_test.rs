use super::*;

#[test]
fn boot_runs_once_per_latch() {
    let latch = Latch::new();
    let config = UiConfig::default();
    assert!(boot_with(&latch, &config));
    assert!(!boot_with(&latch, &config));
    assert!(latch.is_claimed());
}

#[test]
fn page_latch_is_shared() {
    let config = UiConfig::default();
    let first = boot(&config);
    let second = boot(&config);
    assert!(first);
    assert!(!second);
    assert!(boot_latch().is_claimed());
}

#[test]
fn boot_waits_only_while_loading() {
    assert!(must_defer("loading"));
    assert!(!must_defer("interactive"));
    assert!(!must_defer("complete"));
}
