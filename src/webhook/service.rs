//! Webhook registration CRUD.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use super::types::{WebhookConfig, WebhookDeleteResponse, WebhookRegistration};
use crate::client::{ApiRequest, CcaiClient, ClientError, SendOptions, ValidationError};
use crate::transport::HttpClient;

const WEBHOOKS_PATH: &str = "/webhooks";

/// Bytes escaped when an id is placed in a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Webhook management, borrowed from a [`CcaiClient`] via
/// [`CcaiClient::webhooks`].
///
/// Timeout and cancellation from [`with_options`](Self::with_options) apply
/// to every call; progress observers are not used.
#[derive(Debug)]
pub struct WebhookService<'a, H: HttpClient> {
    client: &'a CcaiClient<H>,
    options: SendOptions,
}

impl<'a, H: HttpClient> WebhookService<'a, H> {
    pub(crate) fn new(client: &'a CcaiClient<H>) -> Self {
        Self {
            client,
            options: SendOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: SendOptions) -> Self {
        self.options = options;
        self
    }

    /// Registers a new webhook endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for an empty URL or event list.
    pub async fn register(&self, config: &WebhookConfig) -> Result<WebhookRegistration, ClientError> {
        config.validate()?;
        let request = ApiRequest::post(WEBHOOKS_PATH).with_json(config)?;
        self.send(request).await
    }

    /// Replaces the configuration of webhook `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for an empty id, URL or event list.
    pub async fn update(
        &self,
        id: &str,
        config: &WebhookConfig,
    ) -> Result<WebhookRegistration, ClientError> {
        require_id(id)?;
        config.validate()?;
        let request = ApiRequest::put(webhook_path(id)).with_json(config)?;
        self.send(request).await
    }

    /// Lists registered webhooks.
    ///
    /// # Errors
    ///
    /// Whatever the executor reports.
    pub async fn list(&self) -> Result<Vec<WebhookRegistration>, ClientError> {
        self.send(ApiRequest::get(WEBHOOKS_PATH)).await
    }

    /// Deletes webhook `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for an empty id.
    pub async fn delete(&self, id: &str) -> Result<WebhookDeleteResponse, ClientError> {
        require_id(id)?;
        self.send(ApiRequest::delete(webhook_path(id))).await
    }

    async fn send<T: serde::de::DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        self.client.request(self.options.apply(request)).await
    }
}

const fn require_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::Missing { field: "Webhook ID" });
    }
    Ok(())
}

fn webhook_path(id: &str) -> String {
    format!("{WEBHOOKS_PATH}/{}", utf8_percent_encode(id, PATH_SEGMENT))
}
