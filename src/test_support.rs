//! Scripted transport and fixtures shared by unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::client::CcaiClient;
use crate::config::ClientConfig;
use crate::transport::{HttpClient, HttpRequest, HttpResponse, TransportError};

pub const CLIENT_ID: &str = "1231";
pub const API_KEY: &str = "abc123";

/// Mock HTTP client that replays a configurable sequence of responses.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
    delay: Option<Duration>,
    echo: bool,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    /// One response with the given status and JSON body.
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(vec![Ok(json_response(status, body))])
    }

    /// One response with the given status and raw body.
    pub fn raw(status: u16, body: &str) -> Self {
        Self::new(vec![Ok(raw_response(status, body))])
    }

    /// Answers every request with 200 and the request's own body.
    pub fn echo() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    /// Holds every response back for `delay`.
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.captured_requests()
            .pop()
            .expect("no request was sent")
    }

    /// Body of the last request, parsed as JSON.
    pub fn last_json(&self) -> serde_json::Value {
        let body = self.last_request().body.expect("request had no body");
        serde_json::from_slice(&body).unwrap()
    }
}

impl HttpClient for MockTransport {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let echoed = self.echo.then(|| req.body.clone().unwrap_or_default());
        self.requests.lock().unwrap().push(req);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(body) = echoed {
            return Ok(HttpResponse::new(
                http::StatusCode::OK,
                http::HeaderMap::new(),
                body,
            ));
        }
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| {
            Err(TransportError::InvalidRequest(
                "no scripted response left".to_string(),
            ))
        })
    }
}

pub fn json_response(status: u16, body: &serde_json::Value) -> HttpResponse {
    raw_response(status, &body.to_string())
}

pub fn raw_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse::new(
        http::StatusCode::from_u16(status).unwrap(),
        http::HeaderMap::new(),
        body.as_bytes().to_vec(),
    )
}

pub fn test_config() -> ClientConfig {
    ClientConfig::new(CLIENT_ID, API_KEY).unwrap()
}

/// A client sharing `mock` with the test so captured requests stay visible.
pub fn client_with(mock: MockTransport) -> (CcaiClient<MockTransport>, Arc<MockTransport>) {
    let mock = Arc::new(mock);
    let client = CcaiClient::with_shared_transport(test_config(), Arc::clone(&mock));
    (client, mock)
}
