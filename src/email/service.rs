//! Email campaign sends.

use super::types::{EmailAccount, EmailCampaign, EmailResponse, Sender};
use crate::client::{ApiRequest, CcaiClient, ClientError, SendOptions};
use crate::transport::HttpClient;

const CAMPAIGNS_PATH: &str = "/api/v1/campaigns";

/// Email operations, borrowed from a [`CcaiClient`] via
/// [`CcaiClient::email`].
#[derive(Debug)]
pub struct EmailService<'a, H: HttpClient> {
    client: &'a CcaiClient<H>,
}

impl<'a, H: HttpClient> EmailService<'a, H> {
    pub(crate) const fn new(client: &'a CcaiClient<H>) -> Self {
        Self { client }
    }

    /// Sends `campaign` through the email campaigns API.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before any network activity if
    /// the campaign or one of its accounts is incomplete; otherwise
    /// whatever the executor reports.
    pub async fn send_campaign(
        &self,
        campaign: &EmailCampaign,
        options: &SendOptions,
    ) -> Result<EmailResponse, ClientError> {
        campaign.validate()?;
        options.notify("Preparing to send email campaign");

        let config = self.client.config();
        let api_request = ApiRequest::post(CAMPAIGNS_PATH)
            .with_base_url(config.email_base_url())
            .with_json(campaign)?
            .with_header("AccountId", config.client_id())
            .with_header("ClientId", config.client_id());

        options.notify("Sending email campaign");
        let result = self.client.request(options.apply(api_request)).await;
        options.finish("Email campaign", result)
    }

    /// Sends one email to a single recipient.
    ///
    /// # Errors
    ///
    /// Same as [`send_campaign`](Self::send_campaign).
    pub async fn send_single(
        &self,
        account: EmailAccount,
        subject: &str,
        message: &str,
        sender: Sender,
        title: &str,
        options: &SendOptions,
    ) -> Result<EmailResponse, ClientError> {
        let campaign = EmailCampaign::new(vec![account], subject, title, message, sender);
        self.send_campaign(&campaign, options).await
    }
}
