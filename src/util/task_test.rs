use super::*;

use futures::executor::block_on;
use futures::future::{self, Aborted};

#[test]
fn tracked_future_completes_normally() {
    let mut tasks = TaskSet::new();
    let fut = tasks.track(async { 7 });
    assert_eq!(block_on(fut), Ok(7));
}

#[test]
fn restart_aborts_pending_work() {
    let mut tasks = TaskSet::new();
    let stale = tasks.track(future::pending::<()>());
    tasks.restart();
    assert_eq!(block_on(stale), Err(Aborted));
}

#[test]
fn restart_bumps_generation_and_clears_handles() {
    let mut tasks = TaskSet::new();
    assert_eq!(tasks.generation(), 0);
    let _a = tasks.track(future::ready(()));
    let _b = tasks.track(future::ready(()));
    assert_eq!(tasks.tracked(), 2);

    assert_eq!(tasks.restart(), 1);
    assert_eq!(tasks.tracked(), 0);
    assert_eq!(tasks.generation(), 1);
}

#[test]
fn work_tracked_after_restart_is_not_aborted() {
    let mut tasks = TaskSet::new();
    tasks.restart();
    let fresh = tasks.track(async { "fresh" });
    assert_eq!(block_on(fresh), Ok("fresh"));
}
