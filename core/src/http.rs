//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network. The host executes the actual I/O through a
//! `Transport` implementation (ureq in the CLI, a recording fake in tests).
//!
//! Request bodies stay as a structured `MultipartForm` until the host encodes
//! them, so tests can assert on field names and values directly.

use crate::error::ApiError;
use crate::multipart::MultipartForm;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// Built by `PraxisClient::build_*` methods. Every body the backend accepts
/// is `multipart/form-data`; `form` is `None` for bodiless `GET`s.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub form: Option<MultipartForm>,
}

impl HttpRequest {
    /// Content-Type header value for the encoded body, if there is one.
    pub fn content_type(&self) -> Option<String> {
        self.form.as_ref().map(MultipartForm::content_type)
    }

    /// Encoded body bytes, ready to put on the wire.
    pub fn body_bytes(&self) -> Option<Vec<u8>> {
        self.form.as_ref().map(MultipartForm::encode)
    }
}

/// An HTTP response described as plain data.
///
/// The body is kept as raw bytes: most endpoints answer JSON, but the PDF
/// export returns a binary document that must reach the caller untouched.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body as text, replacing invalid UTF-8. Used for error reporting.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Executes an `HttpRequest` against the network on behalf of the core.
///
/// Implementations must return non-2xx responses as `Ok(HttpResponse)` so
/// the client can interpret the status; `Err` is reserved for transport
/// failures.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}
