use super::*;

// =============================================================
// PreviewRequest
// =============================================================

#[test]
fn missing_title_uses_default() {
    let req = PreviewRequest::from_attrs(Some("/uploads/a.png".into()), None).unwrap();
    assert_eq!(req.image_url, "/uploads/a.png");
    assert_eq!(req.title, DEFAULT_TITLE);
}

#[test]
fn blank_title_uses_default() {
    let req = PreviewRequest::from_attrs(Some("/uploads/a.png".into()), Some("  ".into())).unwrap();
    assert_eq!(req.title, "图片预览");
}

#[test]
fn explicit_title_is_kept() {
    let req = PreviewRequest::from_attrs(Some("/u/b.jpg".into()), Some("第二题".into())).unwrap();
    assert_eq!(req.title, "第二题");
}

#[test]
fn missing_url_is_ignored() {
    assert_eq!(PreviewRequest::from_attrs(None, Some("t".into())), None);
    assert_eq!(PreviewRequest::from_attrs(Some(String::new()), None), None);
}

// =============================================================
// DialogSlot
// =============================================================

#[test]
fn slot_opens_and_releases() {
    let mut slot = DialogSlot::new();
    let id = slot.reserve().unwrap();
    slot.attach(id, "dialog").unwrap();
    assert!(slot.is_open());
    assert_eq!(slot.current(), Some(id));

    assert_eq!(slot.release(id), Some("dialog"));
    assert!(!slot.is_open());
}

#[test]
fn second_reserve_is_rejected_while_open() {
    let mut slot = DialogSlot::new();
    let id = slot.reserve().unwrap();
    slot.attach(id, 1).unwrap();
    assert_eq!(slot.reserve(), None);
    assert_eq!(slot.reserve(), None);
    assert_eq!(slot.current(), Some(id));
}

#[test]
fn reservation_alone_blocks_new_dialogs() {
    let mut slot: DialogSlot<()> = DialogSlot::new();
    let _id = slot.reserve().unwrap();
    assert_eq!(slot.reserve(), None);
}

#[test]
fn ids_are_fresh_after_release() {
    let mut slot = DialogSlot::new();
    let first = slot.reserve().unwrap();
    slot.attach(first, ()).unwrap();
    slot.release(first);

    let second = slot.reserve().unwrap();
    assert_ne!(first, second);
}

#[test]
fn stale_release_does_not_close_newer_dialog() {
    let mut slot = DialogSlot::new();
    let first = slot.reserve().unwrap();
    slot.attach(first, "old").unwrap();
    slot.release(first);

    let second = slot.reserve().unwrap();
    slot.attach(second, "new").unwrap();

    assert_eq!(slot.release(first), None);
    assert!(slot.is_open());
    assert_eq!(slot.release(second), Some("new"));
}

#[test]
fn attach_with_wrong_id_hands_back_handle() {
    let mut slot = DialogSlot::new();
    let first = slot.reserve().unwrap();
    slot.release(first);
    let second = slot.reserve().unwrap();

    assert_eq!(slot.attach(first, "late"), Err("late"));
    assert_eq!(slot.attach(second, "ok"), Ok(()));
}

#[test]
fn releasing_reservation_without_handle_frees_slot() {
    let mut slot: DialogSlot<&str> = DialogSlot::new();
    let id = slot.reserve().unwrap();
    assert_eq!(slot.release(id), None);
    assert!(!slot.is_open());
}

// =============================================================
// PreviewController
// =============================================================

use std::rc::Rc;

/// Stands in for the page: holds the ids of dialogs currently mounted.
#[derive(Default)]
struct FakeMount {
    nodes: Rc<RefCell<Vec<DialogId>>>,
    titles: RefCell<Vec<String>>,
    fail: bool,
}

struct FakeDialog {
    id: DialogId,
    nodes: Rc<RefCell<Vec<DialogId>>>,
}

impl Drop for FakeDialog {
    fn drop(&mut self) {
        self.nodes.borrow_mut().retain(|id| *id != self.id);
    }
}

impl DialogMount for FakeMount {
    type Handle = FakeDialog;

    fn mount(&self, id: DialogId, request: &PreviewRequest) -> Option<FakeDialog> {
        if self.fail {
            return None;
        }
        self.titles.borrow_mut().push(request.title.clone());
        self.nodes.borrow_mut().push(id);
        Some(FakeDialog { id, nodes: Rc::clone(&self.nodes) })
    }
}

fn request(url: &str) -> PreviewRequest {
    PreviewRequest::from_attrs(Some(url.into()), None).unwrap()
}

#[test]
fn open_mounts_one_dialog_with_default_title() {
    let mount = FakeMount::default();
    let nodes = Rc::clone(&mount.nodes);
    let controller = PreviewController::new(mount);

    let id = controller.open(&request("/uploads/a.png")).unwrap();
    assert_eq!(*nodes.borrow(), vec![id]);
    assert!(controller.is_open());
    assert_eq!(*controller.mount.titles.borrow(), vec!["图片预览".to_owned()]);
}

#[test]
fn close_event_removes_dialog_node() {
    let mount = FakeMount::default();
    let nodes = Rc::clone(&mount.nodes);
    let controller = PreviewController::new(mount);

    let id = controller.open(&request("/uploads/a.png")).unwrap();
    assert!(controller.close(id));
    assert!(nodes.borrow().is_empty());
    assert!(!controller.is_open());
}

#[test]
fn click_while_open_is_ignored() {
    let mount = FakeMount::default();
    let nodes = Rc::clone(&mount.nodes);
    let controller = PreviewController::new(mount);

    let id = controller.open(&request("/uploads/a.png")).unwrap();
    assert_eq!(controller.open(&request("/uploads/b.png")), None);
    assert_eq!(*nodes.borrow(), vec![id]);
}

#[test]
fn stale_close_event_keeps_newer_dialog() {
    let mount = FakeMount::default();
    let nodes = Rc::clone(&mount.nodes);
    let controller = PreviewController::new(mount);

    let first = controller.open(&request("/uploads/a.png")).unwrap();
    controller.close(first);
    let second = controller.open(&request("/uploads/b.png")).unwrap();

    assert!(!controller.close(first));
    assert_eq!(*nodes.borrow(), vec![second]);
}

#[test]
fn failed_mount_frees_the_slot() {
    let controller = PreviewController::new(FakeMount { fail: true, ..FakeMount::default() });
    assert_eq!(controller.open(&request("/uploads/a.png")), None);
    assert!(!controller.is_open());
}
