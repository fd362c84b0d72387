//! Request/response shapes shared by the client and its transports.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP method accepted by the request helper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported http method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(UnknownMethod(raw.to_owned())),
        }
    }
}

/// Multipart form contents, handed to the transport untouched.
#[derive(Debug, Clone)]
pub enum FormBody {
    /// A `FormData` built by the page, e.g. `new FormData(form)`.
    #[cfg(feature = "hydrate")]
    Browser(web_sys::FormData),
    /// Plain text fields assembled in Rust.
    Fields(Vec<(String, String)>),
}

impl FormBody {
    /// Convert into a browser `FormData`.
    ///
    /// # Errors
    ///
    /// Returns the JS exception if `FormData` cannot be built.
    #[cfg(feature = "hydrate")]
    pub fn into_form_data(self) -> Result<web_sys::FormData, wasm_bindgen::JsValue> {
        match self {
            Self::Browser(form) => Ok(form),
            Self::Fields(fields) => {
                let form = web_sys::FormData::new()?;
                for (name, value) in &fields {
                    form.append_with_str(name, value)?;
                }
                Ok(form)
            }
        }
    }
}

/// Caller-supplied request payload.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Serialized as JSON with a JSON content type.
    Json(Value),
    /// Sent as-is; the browser picks the multipart content type and boundary.
    Multipart(FormBody),
}

/// Body of a prepared request.
#[derive(Debug, Clone)]
pub enum Body {
    Empty,
    Json(String),
    Multipart(FormBody),
}

/// A fully prepared request, ready for a [`crate::net::transport::Transport`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response as seen by the client: status plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
