//! JSON request helper for page scripts.
//!
//! Every call goes through [`ApiClient::request`]:
//!
//! 1. build the request (bearer header when a token is stored, JSON or
//!    multipart body),
//! 2. send it through the injected [`Transport`],
//! 3. normalize the response: 2xx resolves with the parsed JSON body, 401
//!    clears the token and sends the browser to the login page, anything
//!    else fails with the server's `message` or a generic fallback.
//!
//! ERROR HANDLING
//! ==============
//! Failures come back as [`ApiError`]; nothing is retried and nothing panics.
//! Several requests can fail with 401 at once, so the login redirect is
//! guarded by a shared [`Latch`] and happens once per page, while the token
//! is cleared on every 401.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde_json::Value;

use super::error::{ApiError, GENERIC_FAILURE_MESSAGE};
use super::transport::Transport;
use super::types::{
    AUTHORIZATION, Body, CONTENT_TYPE, FormBody, HttpRequest, JSON_CONTENT_TYPE, Method, Payload,
};
use crate::config::DEFAULT_LOGIN_PATH;
use crate::state::auth::{Navigator, TokenStore};
use crate::util::latch::Latch;

const UNAUTHORIZED: u16 = 401;

/// Request helper with injected transport, token store and navigator.
#[derive(Debug, Clone)]
pub struct ApiClient<T, S, N> {
    transport: T,
    tokens: S,
    navigator: N,
    login_path: String,
    redirect: Latch,
}

impl<T, S, N> ApiClient<T, S, N>
where
    T: Transport,
    S: TokenStore,
    N: Navigator,
{
    pub fn new(transport: T, tokens: S, navigator: N) -> Self {
        Self {
            transport,
            tokens,
            navigator,
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            redirect: Latch::new(),
        }
    }

    #[must_use]
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Share the redirect guard with other clients on the same page.
    #[must_use]
    pub fn with_redirect_latch(mut self, latch: Latch) -> Self {
        self.redirect = latch;
        self
    }

    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    /// Build the outgoing request without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if a JSON payload cannot be serialized.
    pub fn prepare(
        &self,
        path: &str,
        method: Method,
        payload: Option<Payload>,
    ) -> Result<HttpRequest, ApiError> {
        let mut headers = Vec::new();
        if let Some(token) = self.tokens.token() {
            headers.push((AUTHORIZATION.to_owned(), format!("Bearer {token}")));
        }

        let body = match payload {
            None => Body::Empty,
            Some(Payload::Json(value)) => {
                let text = serde_json::to_string(&value).map_err(|e| ApiError::Encode(e.to_string()))?;
                headers.push((CONTENT_TYPE.to_owned(), JSON_CONTENT_TYPE.to_owned()));
                Body::Json(text)
            }
            Some(Payload::Multipart(form)) => Body::Multipart(form),
        };

        Ok(HttpRequest { method, url: path.to_owned(), headers, body })
    }

    /// Send a request and resolve with the parsed JSON response body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]. On 401 the token is cleared and the browser is sent
    /// to the login page before the error is returned.
    pub async fn request(
        &self,
        path: &str,
        method: Method,
        payload: Option<Payload>,
    ) -> Result<Value, ApiError> {
        let request = self.prepare(path, method, payload)?;
        let response = self.transport.send(request).await?;
        log::debug!("{method} {path} -> {}", response.status);

        let result = normalize_response(response.status, &response.body);
        if matches!(result, Err(ApiError::Unauthorized)) {
            self.on_unauthorized();
        }
        result
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(path, Method::Get, None).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        self.request(path, Method::Post, Some(json_payload(body)?)).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        self.request(path, Method::Put, Some(json_payload(body)?)).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(path, Method::Delete, None).await
    }

    /// `POST path` with a multipart form, e.g. a homework upload.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn upload(&self, path: &str, form: FormBody) -> Result<Value, ApiError> {
        self.request(path, Method::Post, Some(Payload::Multipart(form))).await
    }

    fn on_unauthorized(&self) {
        self.tokens.clear();
        if self.redirect.claim() {
            log::warn!("unauthorized response, redirecting to {}", self.login_path);
            self.navigator.navigate(&self.login_path);
        } else {
            log::debug!("unauthorized response, login redirect already issued");
        }
    }
}

#[cfg(feature = "hydrate")]
pub type BrowserApiClient = ApiClient<
    super::transport::FetchTransport,
    crate::state::auth::LocalStorageTokens,
    crate::state::auth::BrowserNavigator,
>;

#[cfg(feature = "hydrate")]
impl BrowserApiClient {
    /// Client backed by `fetch`, `localStorage` and `window.location`.
    pub fn from_config(config: &crate::config::UiConfig, redirect: Latch) -> Self {
        ApiClient::new(
            super::transport::FetchTransport,
            crate::state::auth::LocalStorageTokens::new(config.token_key.clone()),
            crate::state::auth::BrowserNavigator,
        )
        .with_login_path(config.login_path.clone())
        .with_redirect_latch(redirect)
    }
}

fn json_payload<B: Serialize>(body: &B) -> Result<Payload, ApiError> {
    serde_json::to_value(body)
        .map(Payload::Json)
        .map_err(|e| ApiError::Encode(e.to_string()))
}

/// Map a status code and body text to the caller-visible result.
///
/// # Errors
///
/// - 401: [`ApiError::Unauthorized`], whatever the body.
/// - other non-2xx: [`ApiError::Request`] carrying [`error_message`].
/// - 2xx with a body that is not JSON: [`ApiError::Decode`].
pub fn normalize_response(status: u16, body: &str) -> Result<Value, ApiError> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()));
    }
    if status == UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    Err(ApiError::Request { status, message: error_message(body) })
}

/// The server's `message` field when present and non-empty, else the fallback.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .filter(|msg| !msg.is_empty())
        .unwrap_or(GENERIC_FAILURE_MESSAGE)
        .to_owned()
}
