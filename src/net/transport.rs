//! Transports execute prepared requests.
//!
//! Browser (hydrate): `fetch` via `gloo-net`, with an `AbortController`
//! tied to the request future so dropping the future cancels the fetch.
//! Native builds get no transport; tests supply their own.

use super::error::ApiError;
use super::types::{HttpRequest, HttpResponse};

/// Sends a prepared request and returns the raw response.
///
/// Implementations must not interpret the status code; that is the client's job.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[cfg(feature = "hydrate")]
pub use browser::FetchTransport;

#[cfg(feature = "hydrate")]
mod browser {
    use gloo_net::http::Request;
    use web_sys::AbortController;

    use super::Transport;
    use crate::net::error::ApiError;
    use crate::net::types::{Body, HttpRequest, HttpResponse, Method};

    /// `fetch`-backed transport.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct FetchTransport;

    /// Aborts the in-flight fetch unless the response arrived.
    struct AbortOnDrop {
        controller: AbortController,
        finished: bool,
    }

    impl Drop for AbortOnDrop {
        fn drop(&mut self) {
            if !self.finished {
                self.controller.abort();
            }
        }
    }

    fn network(err: impl ToString) -> ApiError {
        ApiError::Network(err.to_string())
    }

    fn js_network(err: &wasm_bindgen::JsValue) -> ApiError {
        ApiError::Network(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }

    impl Transport for FetchTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let controller = AbortController::new().map_err(|e| js_network(&e))?;
            let mut guard = AbortOnDrop { controller, finished: false };
            let signal = guard.controller.signal();

            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Put => Request::put(&request.url),
                Method::Patch => Request::patch(&request.url),
                Method::Delete => Request::delete(&request.url),
            }
            .abort_signal(Some(&signal));
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let prepared = match request.body {
                Body::Empty => builder.build(),
                Body::Json(text) => builder.body(text),
                Body::Multipart(form) => {
                    let form = form.into_form_data().map_err(|e| js_network(&e))?;
                    builder.body(form)
                }
            }
            .map_err(network)?;

            let response = prepared.send().await.map_err(network)?;
            let status = response.status();
            let body = response.text().await.map_err(network)?;
            guard.finished = true;

            Ok(HttpResponse { status, body })
        }
    }
}
