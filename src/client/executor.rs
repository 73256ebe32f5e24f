//! The authenticated request executor shared by every service.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::{ApiRequest, ClientError, SendOptions};
use crate::config::ClientConfig;
use crate::email::EmailService;
use crate::sms::{MmsService, SmsService};
use crate::transport::{HttpClient, HttpRequest, HttpResponse, ReqwestClient};
use crate::webhook::WebhookService;

const APPLICATION_JSON: &str = "application/json";

/// Who holds the transport: the client alone, or the client and others.
enum Transport<H> {
    Owned(H),
    Shared(Arc<H>),
}

impl<H> Transport<H> {
    fn get(&self) -> &H {
        match self {
            Self::Owned(h) => h,
            Self::Shared(h) => h.as_ref(),
        }
    }
}

/// Client for the CloudContactAI API.
///
/// Holds the credentials and a transport. Each call resolves the base URL,
/// attaches the bearer token, sends exactly one HTTP exchange and decodes the
/// response. There are no retries.
///
/// The client is `Send + Sync` whenever the transport is, so one instance
/// can serve concurrent calls.
///
/// # Example
///
/// ```no_run
/// use ccai::client::{ApiRequest, CcaiClient};
/// use ccai::config::ClientConfig;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::new("1231", "abc123")?;
/// let client = CcaiClient::new(config);
///
/// let hooks: serde_json::Value = client.request(ApiRequest::get("/webhooks")).await?;
/// println!("{hooks}");
/// # Ok(())
/// # }
/// ```
pub struct CcaiClient<H: HttpClient = ReqwestClient> {
    config: ClientConfig,
    transport: Transport<H>,
}

impl CcaiClient<ReqwestClient> {
    /// Creates a client that owns a fresh [`ReqwestClient`].
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestClient::new())
    }
}

impl<H: HttpClient> CcaiClient<H> {
    /// Creates a client that takes ownership of `transport`.
    #[must_use]
    pub const fn with_transport(config: ClientConfig, transport: H) -> Self {
        Self {
            config,
            transport: Transport::Owned(transport),
        }
    }

    /// Creates a client that shares `transport` with other holders.
    ///
    /// Dropping or shutting down the client only releases its own reference.
    #[must_use]
    pub const fn with_shared_transport(config: ClientConfig, transport: Arc<H>) -> Self {
        Self {
            config,
            transport: Transport::Shared(transport),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns true if the client is the sole owner of its transport.
    #[must_use]
    pub const fn owns_transport(&self) -> bool {
        matches!(self.transport, Transport::Owned(_))
    }

    /// Releases the client.
    ///
    /// An owned transport is dropped with it; a shared one only loses this
    /// client's reference.
    pub fn shutdown(self) {
        tracing::debug!(
            "Shutting down client (owned transport: {})",
            self.owns_transport()
        );
    }

    /// SMS operations.
    #[must_use]
    pub const fn sms(&self) -> SmsService<'_, H> {
        SmsService::new(self)
    }

    /// MMS operations.
    #[must_use]
    pub const fn mms(&self) -> MmsService<'_, H> {
        MmsService::new(self)
    }

    /// Email campaign operations.
    #[must_use]
    pub const fn email(&self) -> EmailService<'_, H> {
        EmailService::new(self)
    }

    /// Webhook management operations.
    #[must_use]
    pub fn webhooks(&self) -> WebhookService<'_, H> {
        WebhookService::new(self)
    }

    /// Sends `request` and decodes the JSON response into `T`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] for a non-2xx status, with the raw body
    /// - [`ClientError::EmptyResponse`] for an empty or `null` body
    /// - [`ClientError::Decode`] if the body does not fit `T`
    /// - [`ClientError::Cancelled`] / [`ClientError::TimedOut`] when the
    ///   request's token or timeout fires first
    /// - [`ClientError::InvalidUrl`] / [`ClientError::InvalidHeader`] if the
    ///   request cannot be built
    /// - [`ClientError::Transport`] if no response was obtained
    pub async fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let ApiRequest {
            method,
            path,
            body,
            headers,
            base_url,
            timeout,
            cancellation,
        } = request;

        let base = base_url.as_deref().unwrap_or_else(|| self.config.core_base_url());
        let url = parse_url(&format!("{base}{path}"))?;
        let header_map = self.headers(body.is_some(), &headers)?;

        let mut http_request = HttpRequest::new(method, url);
        http_request.headers = header_map;
        if let Some(body) = body {
            http_request.body = Some(serde_json::to_vec(&body).map_err(ClientError::Encode)?);
        }

        tracing::debug!("{} {}", http_request.method, http_request.url);
        let response = self.exchange(http_request, timeout, cancellation).await?;

        if !response.is_success() {
            let body = response.body_lossy();
            tracing::warn!("API request failed with HTTP {}: {body}", response.status);
            return Err(ClientError::Http {
                status: response.status,
                body,
            });
        }
        decode(&response)
    }

    /// Uploads `bytes` to an absolute pre-signed URL.
    ///
    /// The request carries only `Content-Type`; no credentials are sent.
    /// Timeout and cancellation from `options` apply as for [`Self::request`].
    /// Returns whether the upload host answered with a 2xx status.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] for a malformed URL,
    /// [`ClientError::InvalidHeader`] for a malformed content type,
    /// [`ClientError::Cancelled`] / [`ClientError::TimedOut`] if the token
    /// or timeout fires first, or [`ClientError::Transport`] if no response
    /// was obtained.
    pub async fn upload(
        &self,
        signed_url: &str,
        bytes: Vec<u8>,
        content_type: &str,
        options: &SendOptions,
    ) -> Result<bool, ClientError> {
        let url = parse_url(signed_url)?;
        let content_type = header_value(CONTENT_TYPE.as_str(), content_type)?;
        let http_request = HttpRequest::put(url)
            .with_header(CONTENT_TYPE, content_type)
            .with_body(bytes);

        tracing::debug!("PUT {} (upload)", http_request.url);
        let response = self
            .exchange(http_request, options.timeout, options.cancellation.clone())
            .await?;
        if !response.is_success() {
            tracing::warn!("Upload rejected with HTTP {}", response.status);
        }
        Ok(response.is_success())
    }

    /// Mandatory headers plus the caller's, caller last.
    fn headers(&self, has_body: bool, extra: &[(String, String)]) -> Result<HeaderMap, ClientError> {
        let mut map = HeaderMap::new();

        let mut bearer = header_value(
            AUTHORIZATION.as_str(),
            &format!("Bearer {}", self.config.api_key()),
        )?;
        bearer.set_sensitive(true);
        map.insert(AUTHORIZATION, bearer);
        map.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        if has_body {
            map.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        }

        for (name, value) in extra {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ClientError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            map.insert(header_name, header_value(name, value)?);
        }
        Ok(map)
    }

    /// One transport exchange raced against cancellation and timeout.
    async fn exchange(
        &self,
        request: HttpRequest,
        timeout: Option<Duration>,
        cancellation: Option<CancellationToken>,
    ) -> Result<HttpResponse, ClientError> {
        if cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
        {
            return Err(ClientError::Cancelled);
        }

        tokio::select! {
            biased;
            () = cancelled(cancellation.as_ref()) => Err(ClientError::Cancelled),
            () = deadline(timeout) => Err(ClientError::TimedOut),
            result = self.transport.get().request(request) => result.map_err(ClientError::from),
        }
    }
}

impl<H: HttpClient> fmt::Debug for CcaiClient<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CcaiClient")
            .field("config", &self.config)
            .field("owns_transport", &self.owns_transport())
            .finish()
    }
}

async fn cancelled(token: Option<&CancellationToken>) {
    match token {
        Some(token) => token.cancelled().await,
        None => std::future::pending().await,
    }
}

async fn deadline(timeout: Option<Duration>) {
    match timeout {
        Some(timeout) => tokio::time::sleep(timeout).await,
        None => std::future::pending().await,
    }
}

fn parse_url(raw: &str) -> Result<url::Url, ClientError> {
    url::Url::parse(raw).map_err(|e| ClientError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ClientError> {
    HeaderValue::from_str(value).map_err(|e| ClientError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ClientError> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Err(ClientError::EmptyResponse);
    }
    let value: Value = serde_json::from_slice(&response.body).map_err(ClientError::Decode)?;
    if value.is_null() {
        return Err(ClientError::EmptyResponse);
    }
    T::deserialize(value).map_err(ClientError::Decode)
}
