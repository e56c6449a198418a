//! In-process fake transport for unit tests
//!
//! [`FakeTransport`] replays one scripted outcome for every request and
//! records each request it receives, so tests can assert on what the code
//! under test sent without touching the network.
//!
//! ```text
//! code under test --send()--> FakeTransport --records--> requests()
//!                                   |
//!                                   +--returns--> scripted outcome
//! ```

use std::sync::Mutex;

use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

/// Deterministic [`Transport`] test double.
#[derive(Debug)]
pub struct FakeTransport {
    outcome: Result<HttpResponse, TransportError>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    /// A fake that answers every request with `status` and `body`.
    pub fn responding(status: u16, body: impl Into<String>) -> Self {
        Self::with_outcome(Ok(HttpResponse::new(status, body)))
    }

    /// A fake that fails every request with `error`.
    pub fn failing(error: TransportError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<HttpResponse, TransportError>) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("FakeTransport: request log poisoned")
            .clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests().pop()
    }
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .expect("FakeTransport: request log poisoned")
            .push(request);
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Method;

    fn request() -> HttpRequest {
        HttpRequest::new(Method::GET, "https://uaa.example.com/info")
    }

    #[tokio::test]
    async fn test_fake_records_requests_and_replays_response() {
        let fake = FakeTransport::responding(204, "");
        let first = fake.send(request()).await.unwrap();
        let second = fake.send(request()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.status, 204);
        assert_eq!(fake.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_fake_replays_error() {
        let fake = FakeTransport::failing(TransportError::Timeout("slow".to_string()));
        let err = fake.send(request()).await.unwrap_err();
        assert_eq!(err, TransportError::Timeout("slow".to_string()));
        assert!(fake.last_request().is_some());
    }
}
