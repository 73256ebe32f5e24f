//! SMS sends.

use super::types::{Account, SmsCampaign, SmsRequest, SmsResponse};
use crate::client::{ApiRequest, CcaiClient, ClientError, SendOptions};
use crate::transport::HttpClient;

pub(crate) const FORCE_NEW_CAMPAIGN: &str = "ForceNewCampaign";

pub(crate) fn direct_campaign_path(client_id: &str) -> String {
    format!("/clients/{client_id}/campaigns/direct")
}

/// SMS operations, borrowed from a [`CcaiClient`] via
/// [`CcaiClient::sms`].
#[derive(Debug)]
pub struct SmsService<'a, H: HttpClient> {
    client: &'a CcaiClient<H>,
}

impl<'a, H: HttpClient> SmsService<'a, H> {
    pub(crate) const fn new(client: &'a CcaiClient<H>) -> Self {
        Self { client }
    }

    /// Sends one message to every account in `request`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before any network activity if
    /// the request is incomplete; otherwise whatever the executor reports.
    pub async fn send(
        &self,
        request: SmsRequest,
        options: &SendOptions,
    ) -> Result<SmsResponse, ClientError> {
        request.validate()?;
        options.notify("Preparing to send SMS");

        let path = direct_campaign_path(self.client.config().client_id());
        let api_request = ApiRequest::post(path)
            .with_json(&SmsCampaign::from(request))?
            .with_header(FORCE_NEW_CAMPAIGN, "false");

        options.notify("Sending SMS");
        let result = self.client.request(options.apply(api_request)).await;
        options.finish("SMS", result)
    }

    /// Sends to a single recipient.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn send_single(
        &self,
        account: Account,
        message: &str,
        title: &str,
        options: &SendOptions,
    ) -> Result<SmsResponse, ClientError> {
        self.send(SmsRequest::single(account, message, title), options)
            .await
    }
}
