//! Functions exposed to page scripts.
//!
//! The portal's templates use classic inline scripts, which cannot import
//! module exports, so [`install_globals`] also registers both functions on
//! `window` at start-up:
//!
//! ```js
//! apiRequest('/api/submissions', 'POST', new FormData(form), true)
//!     .then(data => showNotification('提交成功', 'success'))
//!     .catch(err => showNotification(err.message, 'danger'));
//! ```
//!
//! Module scripts can import the same functions from the generated package.
//! Argument coercion is plain Rust so it can be tested off the browser.

#[cfg(test)]
#[path = "bindings_test.rs"]
mod bindings_test;

#[cfg(feature = "hydrate")]
use std::cell::OnceCell;

#[cfg(feature = "hydrate")]
use serde_json::Value;
#[cfg(feature = "hydrate")]
use wasm_bindgen::JsCast;
#[cfg(feature = "hydrate")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "hydrate")]
use crate::components::notification::{Severity, show_notification};
#[cfg(feature = "hydrate")]
use crate::config::UiConfig;
#[cfg(feature = "hydrate")]
use crate::net::api::BrowserApiClient;
#[cfg(feature = "hydrate")]
use crate::net::error::ApiError;
#[cfg(feature = "hydrate")]
use crate::net::types::{FormBody, Payload};
use crate::net::types::{Method, UnknownMethod};
#[cfg(feature = "hydrate")]
use crate::util::latch::Latch;

pub const API_REQUEST_GLOBAL: &str = "apiRequest";
pub const SHOW_NOTIFICATION_GLOBAL: &str = "showNotification";

/// The `method` argument; absent or empty means `GET`.
///
/// # Errors
///
/// Returns [`UnknownMethod`] for methods the helper does not send.
pub fn method_arg(raw: Option<&str>) -> Result<Method, UnknownMethod> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Method::default()),
        Some(raw) => raw.parse(),
    }
}

/// The `duration` argument in ms; anything that is not a finite,
/// non-negative number uses `default`.
pub fn duration_arg(raw: Option<f64>, default: u32) -> u32 {
    match raw {
        Some(ms) if ms.is_finite() && ms >= 0.0 => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let ms = ms.min(f64::from(u32::MAX)) as u32;
            ms
        }
        _ => default,
    }
}

#[cfg(feature = "hydrate")]
thread_local! {
    static CONFIG: OnceCell<UiConfig> = const { OnceCell::new() };
    static LOGIN_REDIRECT: Latch = Latch::new();
}

#[cfg(feature = "hydrate")]
fn config() -> UiConfig {
    CONFIG.with(|cell| {
        cell.get_or_init(|| UiConfig::or_defaults(UiConfig::load())).clone()
    })
}

#[cfg(feature = "hydrate")]
fn js_error(name: &str, message: &str) -> JsValue {
    let err = js_sys::Error::new(message);
    err.set_name(name);
    err.into()
}

#[cfg(feature = "hydrate")]
fn api_error(err: &ApiError) -> JsValue {
    js_error(err.js_name(), &err.to_string())
}

/// Convert the JS `data` argument into a payload. Falsy values mean no body.
#[cfg(feature = "hydrate")]
fn payload_from_js(data: JsValue, use_form_data: bool) -> Result<Option<Payload>, JsValue> {
    if data.is_falsy() {
        return Ok(None);
    }
    if use_form_data {
        let form = data
            .dyn_into::<web_sys::FormData>()
            .map_err(|_| js_error("TypeError", "useFormData requires a FormData body"))?;
        return Ok(Some(Payload::Multipart(FormBody::Browser(form))));
    }
    let text: String = js_sys::JSON::stringify(&data)?.into();
    let value: Value =
        serde_json::from_str(&text).map_err(|e| js_error("TypeError", &e.to_string()))?;
    Ok(Some(Payload::Json(value)))
}

#[cfg(feature = "hydrate")]
fn value_to_js(value: &Value) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(|e| js_error("SyntaxError", &e.to_string()))?;
    js_sys::JSON::parse(&text)
}

/// `apiRequest(url, method = 'GET', data = null, useFormData = false)`.
///
/// Resolves with the parsed JSON body; rejects with an `Error` whose `name`
/// is `AuthenticationError`, `RequestError`, `NetworkError` or `SyntaxError`.
///
/// # Errors
///
/// Rejects as described above, or with a `TypeError` for bad arguments.
#[cfg(feature = "hydrate")]
#[wasm_bindgen(js_name = apiRequest)]
pub async fn api_request(
    url: String,
    method: Option<String>,
    data: JsValue,
    use_form_data: Option<bool>,
) -> Result<JsValue, JsValue> {
    request_json(url, method, data, use_form_data.unwrap_or(false)).await
}

#[cfg(feature = "hydrate")]
async fn request_json(
    url: String,
    method: Option<String>,
    data: JsValue,
    use_form_data: bool,
) -> Result<JsValue, JsValue> {
    let method =
        method_arg(method.as_deref()).map_err(|e| js_error("TypeError", &e.to_string()))?;
    let payload = payload_from_js(data, use_form_data)?;

    let redirect = LOGIN_REDIRECT.with(Clone::clone);
    let client = BrowserApiClient::from_config(&config(), redirect);
    let value = client
        .request(&url, method, payload)
        .await
        .map_err(|e| api_error(&e))?;
    value_to_js(&value)
}

/// `showNotification(message, type = 'info', duration = 3000)`.
#[cfg(feature = "hydrate")]
#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification_js(message: String, kind: Option<String>, duration: Option<u32>) {
    notify(&message, kind.as_deref(), duration.map(f64::from));
}

#[cfg(feature = "hydrate")]
fn notify(message: &str, kind: Option<&str>, duration: Option<f64>) {
    let severity = kind.map_or_else(Severity::default, Severity::parse);
    let duration = duration_arg(duration, config().notification_duration_ms);
    show_notification(message, severity, duration);
}

/// Register `apiRequest` and `showNotification` on `window`.
#[cfg(feature = "hydrate")]
pub fn install_globals() {
    let Some(window) = web_sys::window() else {
        return;
    };

    let api = Closure::<dyn Fn(JsValue, JsValue, JsValue, JsValue) -> js_sys::Promise>::new(
        |url: JsValue, method: JsValue, data: JsValue, use_form_data: JsValue| {
            wasm_bindgen_futures::future_to_promise(request_json(
                url.as_string().unwrap_or_default(),
                method.as_string(),
                data,
                use_form_data.is_truthy(),
            ))
        },
    );
    set_global(&window, API_REQUEST_GLOBAL, api.as_ref());
    api.forget();

    let show = Closure::<dyn Fn(JsValue, JsValue, JsValue)>::new(
        |message: JsValue, kind: JsValue, duration: JsValue| {
            let message = message.as_string().unwrap_or_default();
            notify(&message, kind.as_string().as_deref(), duration.as_f64());
        },
    );
    set_global(&window, SHOW_NOTIFICATION_GLOBAL, show.as_ref());
    show.forget();
}

#[cfg(feature = "hydrate")]
fn set_global(window: &web_sys::Window, name: &str, value: &JsValue) {
    if js_sys::Reflect::set(window, &JsValue::from_str(name), value).is_err() {
        log::warn!("failed to register window.{name}");
    }
}
