//! Full-size image preview dialogs.
//!
//! Triggers look like
//! `<button class="image-preview-btn" data-image-url="/uploads/a.png" data-title="...">`.
//! A click mounts a Bootstrap modal showing the image; the modal is unmounted
//! once Bootstrap reports it hidden.
//!
//! DESIGN
//! ======
//! Dialog identity is explicit. A page-wide [`DialogSlot`] reserves a
//! [`DialogId`] before anything is mounted, and only one preview can be open:
//! clicks while a preview is showing are ignored. Hidden events carry the id
//! they were registered for, so a late event from an old dialog cannot tear
//! down a newer one.
//!
//! [`PreviewController`] owns the slot and drives a [`DialogMount`]; the
//! browser build mounts a Leptos view, and dropping the mount handle removes
//! the modal node again.

#[cfg(test)]
#[path = "image_preview_test.rs"]
mod image_preview_test;

use std::cell::RefCell;

#[cfg(feature = "hydrate")]
use leptos::prelude::*;

pub const TRIGGER_SELECTOR: &str = ".image-preview-btn";
pub const IMAGE_URL_ATTR: &str = "data-image-url";
pub const TITLE_ATTR: &str = "data-title";
pub const DEFAULT_TITLE: &str = "图片预览";
pub const MODAL_ID: &str = "imagePreviewModal";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogId(u64);

#[derive(Debug)]
enum SlotState<H> {
    Empty,
    Reserved(DialogId),
    Open(DialogId, H),
}

/// Holds at most one open dialog.
#[derive(Debug)]
pub struct DialogSlot<H> {
    state: SlotState<H>,
    next_id: u64,
}

impl<H> Default for DialogSlot<H> {
    fn default() -> Self {
        Self { state: SlotState::Empty, next_id: 1 }
    }
}

impl<H> DialogSlot<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the slot for a new dialog. `None` while another dialog is open.
    pub fn reserve(&mut self) -> Option<DialogId> {
        if !matches!(self.state, SlotState::Empty) {
            return None;
        }
        let id = DialogId(self.next_id);
        self.next_id += 1;
        self.state = SlotState::Reserved(id);
        Some(id)
    }

    /// Store the handle for a reserved dialog.
    ///
    /// Returns the handle back if `id` does not hold the reservation.
    pub fn attach(&mut self, id: DialogId, handle: H) -> Result<(), H> {
        match self.state {
            SlotState::Reserved(reserved) if reserved == id => {
                self.state = SlotState::Open(id, handle);
                Ok(())
            }
            _ => Err(handle),
        }
    }

    /// Free the slot if it belongs to `id`, returning its handle.
    pub fn release(&mut self, id: DialogId) -> Option<H> {
        let owned = match &self.state {
            SlotState::Reserved(current) | SlotState::Open(current, _) => *current == id,
            SlotState::Empty => false,
        };
        if !owned {
            return None;
        }
        match std::mem::replace(&mut self.state, SlotState::Empty) {
            SlotState::Open(_, handle) => Some(handle),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, SlotState::Empty)
    }

    pub fn current(&self) -> Option<DialogId> {
        match self.state {
            SlotState::Reserved(id) | SlotState::Open(id, _) => Some(id),
            SlotState::Empty => None,
        }
    }
}

/// What a trigger asks to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub image_url: String,
    pub title: String,
}

impl PreviewRequest {
    /// Build from the trigger's attributes. A missing or blank URL yields `None`.
    pub fn from_attrs(image_url: Option<String>, title: Option<String>) -> Option<Self> {
        let image_url = image_url.filter(|url| !url.trim().is_empty())?;
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_owned());
        Some(Self { image_url, title })
    }
}

/// Renders a preview dialog.
pub trait DialogMount {
    /// Owns the mounted dialog; dropping it removes the dialog from the page.
    type Handle;

    /// Mount the dialog for `request`. `None` if nothing could be shown.
    fn mount(&self, id: DialogId, request: &PreviewRequest) -> Option<Self::Handle>;
}

/// Opens and closes preview dialogs through one [`DialogSlot`].
pub struct PreviewController<M: DialogMount> {
    slot: RefCell<DialogSlot<M::Handle>>,
    mount: M,
}

impl<M: DialogMount> PreviewController<M> {
    pub fn new(mount: M) -> Self {
        Self { slot: RefCell::new(DialogSlot::new()), mount }
    }

    /// Show `request`. `None` while another preview is open or when the
    /// dialog could not be mounted.
    pub fn open(&self, request: &PreviewRequest) -> Option<DialogId> {
        let Some(id) = self.slot.borrow_mut().reserve() else {
            log::debug!("image preview already open, ignoring click");
            return None;
        };
        // Not borrowed while mounting: the mount may register listeners
        // that call back into the controller.
        let Some(handle) = self.mount.mount(id, request) else {
            self.slot.borrow_mut().release(id);
            return None;
        };
        let attached = self.slot.borrow_mut().attach(id, handle);
        match attached {
            Ok(()) => Some(id),
            Err(_superseded) => None,
        }
    }

    /// Handle the close event of dialog `id`. Stale ids are ignored.
    pub fn close(&self, id: DialogId) -> bool {
        // Bind first so the borrow ends before the handle is dropped.
        let released = self.slot.borrow_mut().release(id);
        let closed = released.is_some();
        drop(released);
        closed
    }

    pub fn is_open(&self) -> bool {
        self.slot.borrow().is_open()
    }
}

/// Wire click handlers on every preview trigger.
pub fn init_image_previews() {
    #[cfg(feature = "hydrate")]
    browser::init();
}

#[cfg(feature = "hydrate")]
fn preview_modal_view(node: NodeRef<leptos::html::Div>, request: PreviewRequest) -> impl IntoView {
    let PreviewRequest { image_url, title } = request;
    let alt = title.clone();
    view! {
        <div node_ref=node class="modal fade" id=MODAL_ID tabindex="-1" aria-hidden="true">
            <div class="modal-dialog modal-lg">
                <div class="modal-content">
                    <div class="modal-header">
                        <h5 class="modal-title">{title}</h5>
                        <button type="button" class="btn-close" data-bs-dismiss="modal" aria-label="Close"></button>
                    </div>
                    <div class="modal-body text-center">
                        <img src=image_url class="img-fluid" alt=alt/>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(feature = "hydrate")]
mod browser {
    use std::any::Any;
    use std::rc::{Rc, Weak};

    use leptos::prelude::*;
    use web_sys::Element;

    use super::*;
    use crate::util::dom;
    use crate::widgets::{MODAL_HIDDEN_EVENT, bootstrap::Modal};

    /// A mounted preview. Dropping it unmounts the view.
    pub(super) struct OpenPreview {
        _mounted: Box<dyn Any>,
        modal: Modal,
    }

    impl Drop for OpenPreview {
        fn drop(&mut self) {
            self.modal.dispose();
        }
    }

    /// Mounts the modal at the end of `<body>`.
    pub(super) struct BodyMount {
        controller: Weak<PreviewController<BodyMount>>,
    }

    impl DialogMount for BodyMount {
        type Handle = OpenPreview;

        fn mount(&self, id: DialogId, request: &PreviewRequest) -> Option<OpenPreview> {
            let body = dom::document().and_then(|doc| doc.body())?;
            let node = NodeRef::<leptos::html::Div>::new();
            let request = request.clone();
            let mounted = leptos::mount::mount_to(body, move || preview_modal_view(node, request));
            let el = node.get_untracked()?;
            // Without Bootstrap there is no close control; show nothing.
            let modal = Modal::attach(&el)?;

            let controller = Weak::clone(&self.controller);
            dom::listen_once(&el, MODAL_HIDDEN_EVENT, move |_| {
                if let Some(controller) = controller.upgrade() {
                    controller.close(id);
                }
            });
            modal.show();
            Some(OpenPreview { _mounted: Box::new(mounted), modal })
        }
    }

    pub(super) fn init() {
        let Some(doc) = dom::document() else {
            return;
        };
        let controller = Rc::new_cyclic(|weak| {
            PreviewController::new(BodyMount { controller: Weak::clone(weak) })
        });
        for trigger in dom::query_all(&doc, TRIGGER_SELECTOR) {
            let controller = Rc::clone(&controller);
            let source = trigger.clone();
            dom::listen(&trigger, "click", move |_| open_from(&source, &controller));
        }
    }

    fn open_from(trigger: &Element, controller: &PreviewController<BodyMount>) {
        let Some(request) = PreviewRequest::from_attrs(
            trigger.get_attribute(IMAGE_URL_ATTR),
            trigger.get_attribute(TITLE_ATTR),
        ) else {
            log::debug!("preview trigger without {IMAGE_URL_ATTR}");
            return;
        };
        controller.open(&request);
    }
}
