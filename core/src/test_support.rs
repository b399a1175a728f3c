//! Fake transport shared by the unit tests.

use std::cell::RefCell;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};

pub fn json_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: body.as_bytes().to_vec(),
    }
}

/// Records every request and answers each one with the same canned outcome.
pub struct RecordingTransport {
    requests: RefCell<Vec<HttpRequest>>,
    outcome: Result<HttpResponse, String>,
}

impl RecordingTransport {
    pub fn new(response: HttpResponse) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            outcome: Ok(response),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            outcome: Err(message.to_string()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.outcome.clone().map_err(ApiError::Transport)
    }
}
