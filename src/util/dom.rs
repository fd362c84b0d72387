//! Thin DOM helpers over `web-sys`.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget};

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Collect every element matching `selector`. An invalid selector yields none.
pub fn query_all(doc: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = doc.query_selector_all(selector) else {
        log::debug!("invalid selector: {selector}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Attach a listener that lives as long as the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let cb = Closure::<dyn FnMut(Event)>::new(handler);
    if target
        .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        .is_err()
    {
        log::debug!("failed to attach {event} listener");
        return;
    }
    cb.forget();
}

/// Attach a listener that fires at most once and frees itself afterwards.
pub fn listen_once<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnOnce(Event) + 'static,
{
    let cb = Closure::once_into_js(handler);
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    if target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            cb.unchecked_ref(),
            &options,
        )
        .is_err()
    {
        log::debug!("failed to attach one-shot {event} listener");
    }
}
