//! Blocking HTTP transport backed by ureq.

use praxis_core::{ApiError, ClientConfig, HttpMethod, HttpRequest, HttpResponse, Transport};
use tracing::debug;

/// Slide decks with embedded images come back as large PDFs.
const MAX_RESPONSE_BYTES: u64 = 64 * 1024 * 1024;

/// Executes core requests with a shared ureq agent.
///
/// Status codes are returned as data (`http_status_as_error(false)`) so the
/// core client decides what a 4xx/5xx means.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout()))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = ?req.method, path = %req.path, "sending");
        let content_type = req.content_type();
        let body = req.body_bytes();
        let result = match (req.method, content_type, body) {
            (HttpMethod::Get, _, _) => self.agent.get(&req.path).call(),
            (HttpMethod::Post, Some(content_type), Some(body)) => {
                self.agent.post(&req.path).content_type(content_type).send(&body[..])
            }
            (HttpMethod::Post, _, _) => self.agent.post(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_RESPONSE_BYTES)
            .read_to_vec()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!(status, bytes = body.len(), "received");

        Ok(HttpResponse { status, headers, body })
    }
}
