//! Production transport implementation using reqwest.

use std::time::Duration;

use super::{HttpClient, HttpRequest, HttpResponse, TransportError};

/// `User-Agent` sent with every request from [`ReqwestClient::new`].
pub const USER_AGENT: &str = concat!("ccai/", env!("CARGO_PKG_VERSION"));

/// Upper bound on establishing a connection. Whole-call deadlines come
/// from the per-request timeout instead.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Production transport over a pooled `reqwest::Client`.
///
/// Clones share the connection pool.
///
/// # Example
///
/// ```no_run
/// use ccai::transport::{HttpClient, HttpRequest, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::try_new()?;
/// let url = Url::parse("https://core.cloudcontactai.com/api/webhooks")?;
/// let response = client.request(HttpRequest::get(url)).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates the SDK transport, identified by [`USER_AGENT`].
    ///
    /// Falls back to reqwest's default client if the TLS backend cannot be
    /// initialised with these settings.
    #[must_use]
    pub fn new() -> Self {
        Self::try_new().unwrap_or_else(|e| {
            tracing::warn!("Using default HTTP client settings: {e}");
            Self::from_client(reqwest::Client::new())
        })
    }

    /// Like [`Self::new`], but reports a client that cannot be built.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidRequest`] if reqwest rejects the
    /// configuration.
    pub fn try_new() -> Result<Self, TransportError> {
        reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map(Self::from_client)
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))
    }

    /// Wraps a caller-configured reqwest client (proxy, TLS roots, pool).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.inner.request(req.method, req.url).headers(req.headers);
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(classify)?;

        Ok(HttpResponse::new(status, headers, body.to_vec()))
    }
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_builder() {
        TransportError::InvalidRequest(error.to_string())
    } else {
        TransportError::Connection(Box::new(error))
    }
}
