//! `wasm-bindgen` externs for `bootstrap.Alert` and `bootstrap.Modal`.
//!
//! Constructors catch JS exceptions so a page that failed to load the
//! Bootstrap bundle degrades to plain DOM removal instead of trapping.

use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    /// `bootstrap.Alert` instance bound to one alert element.
    #[wasm_bindgen(js_namespace = bootstrap)]
    #[derive(Debug, Clone)]
    pub type Alert;

    #[wasm_bindgen(constructor, catch, js_namespace = bootstrap)]
    fn new(element: &Element) -> Result<Alert, JsValue>;

    /// Fade out and remove the alert, then fire `closed.bs.alert`.
    ///
    /// Throws if the instance was already disposed.
    #[wasm_bindgen(method, catch)]
    pub fn close(this: &Alert) -> Result<(), JsValue>;
}

#[wasm_bindgen]
extern "C" {
    /// `bootstrap.Modal` instance bound to one modal element.
    #[wasm_bindgen(js_namespace = bootstrap)]
    #[derive(Debug, Clone)]
    pub type Modal;

    #[wasm_bindgen(constructor, catch, js_namespace = bootstrap)]
    fn new(element: &Element) -> Result<Modal, JsValue>;

    #[wasm_bindgen(method)]
    pub fn show(this: &Modal);

    #[wasm_bindgen(method)]
    pub fn hide(this: &Modal);

    /// Release Bootstrap's listeners and instance data for the element.
    #[wasm_bindgen(method)]
    pub fn dispose(this: &Modal);
}

impl Alert {
    /// Attach `bootstrap.Alert` to `element`, or `None` when Bootstrap is missing.
    pub fn attach(element: &Element) -> Option<Self> {
        match Self::new(element) {
            Ok(alert) => Some(alert),
            Err(err) => {
                log::warn!("bootstrap.Alert unavailable: {err:?}");
                None
            }
        }
    }
}

impl Modal {
    /// Attach `bootstrap.Modal` to `element`, or `None` when Bootstrap is missing.
    pub fn attach(element: &Element) -> Option<Self> {
        match Self::new(element) {
            Ok(modal) => Some(modal),
            Err(err) => {
                log::warn!("bootstrap.Modal unavailable: {err:?}");
                None
            }
        }
    }
}
