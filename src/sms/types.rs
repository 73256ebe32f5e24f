//! SMS and MMS request and response models.

use serde::{Deserialize, Serialize};

use crate::client::{ExtensionData, ValidationError};
use crate::id::FlexibleId;

/// A message recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Recipient's first name
    pub first_name: String,
    /// Recipient's last name
    pub last_name: String,
    /// Recipient's phone number in E.164 format
    pub phone: String,
    /// Caller-side identifier linking the recipient to an external system
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_external_id: Option<String>,
    /// Free-form data echoed back in webhook events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_data: Option<String>,
}

impl Account {
    /// Creates a recipient without external id or custom data.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            client_external_id: None,
            message_data: None,
        }
    }

    /// Sets the external identifier.
    #[must_use]
    pub fn with_client_external_id(mut self, id: impl Into<String>) -> Self {
        self.client_external_id = Some(id.into());
        self
    }

    /// Sets the custom data.
    #[must_use]
    pub fn with_message_data(mut self, data: impl Into<String>) -> Self {
        self.message_data = Some(data.into());
        self
    }
}

/// Parameters of an SMS send.
///
/// The message may reference `${FirstName}` and `${LastName}`; the platform
/// substitutes them per recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsRequest {
    pub accounts: Vec<Account>,
    pub message: String,
    pub title: String,
    pub sender_phone: Option<String>,
}

impl SmsRequest {
    #[must_use]
    pub fn new(accounts: Vec<Account>, message: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            accounts,
            message: message.into(),
            title: title.into(),
            sender_phone: None,
        }
    }

    /// A request addressed to one recipient.
    #[must_use]
    pub fn single(account: Account, message: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(vec![account], message, title)
    }

    /// Sends from a specific number instead of the account default.
    #[must_use]
    pub fn with_sender_phone(mut self, phone: impl Into<String>) -> Self {
        self.sender_phone = Some(phone.into());
        self
    }

    /// Checks required fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_common(&self.accounts, &self.message, &self.title)
    }
}

/// Parameters of an MMS send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MmsRequest {
    /// Storage key of an uploaded image, see
    /// [`MmsService::get_signed_upload_url`](super::MmsService::get_signed_upload_url)
    pub picture_file_key: String,
    pub accounts: Vec<Account>,
    pub message: String,
    pub title: String,
    /// Sends `ForceNewCampaign: true` when set. Defaults to true.
    pub force_new_campaign: bool,
}

impl MmsRequest {
    /// Creates a request without a picture; set one with
    /// [`with_picture`](Self::with_picture) or let
    /// [`MmsService::send_with_image`](super::MmsService::send_with_image)
    /// fill it in.
    #[must_use]
    pub fn new(accounts: Vec<Account>, message: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            picture_file_key: String::new(),
            accounts,
            message: message.into(),
            title: title.into(),
            force_new_campaign: true,
        }
    }

    #[must_use]
    pub fn with_picture(mut self, file_key: impl Into<String>) -> Self {
        self.picture_file_key = file_key.into();
        self
    }

    #[must_use]
    pub const fn with_force_new_campaign(mut self, force: bool) -> Self {
        self.force_new_campaign = force;
        self
    }

    /// Checks required fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.picture_file_key.is_empty() {
            return Err(ValidationError::Missing {
                field: "Picture file key",
            });
        }
        validate_common(&self.accounts, &self.message, &self.title)
    }
}

fn validate_common(accounts: &[Account], message: &str, title: &str) -> Result<(), ValidationError> {
    if accounts.is_empty() {
        return Err(ValidationError::Empty { item: "account" });
    }
    if message.is_empty() {
        return Err(ValidationError::Missing { field: "Message" });
    }
    if title.is_empty() {
        return Err(ValidationError::Missing {
            field: "Campaign title",
        });
    }
    Ok(())
}

/// Wire body of `POST /clients/{clientId}/campaigns/direct` for SMS.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsCampaign {
    pub accounts: Vec<Account>,
    pub message: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_phone: Option<String>,
}

impl From<SmsRequest> for SmsCampaign {
    fn from(request: SmsRequest) -> Self {
        Self {
            accounts: request.accounts,
            message: request.message,
            title: request.title,
            sender_phone: request.sender_phone,
        }
    }
}

/// Wire body of `POST /clients/{clientId}/campaigns/direct` for MMS.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MmsCampaign {
    pub picture_file_key: String,
    pub accounts: Vec<Account>,
    pub message: String,
    pub title: String,
}

impl From<MmsRequest> for MmsCampaign {
    fn from(request: MmsRequest) -> Self {
        Self {
            picture_file_key: request.picture_file_key,
            accounts: request.accounts,
            message: request.message,
            title: request.title,
        }
    }
}

/// Result of an SMS or MMS send.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FlexibleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<FlexibleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages_sent: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Fields not declared above
    #[serde(flatten)]
    pub extra: ExtensionData,
}

/// Answer of the upload-URL endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignedUrlResponse {
    /// Pre-signed URL accepting a single `PUT`
    #[serde(rename = "signedS3Url", default)]
    pub signed_s3_url: String,
    /// Storage key to pass as the MMS picture
    #[serde(rename = "fileKey", default)]
    pub file_key: String,
    #[serde(flatten)]
    pub extra: ExtensionData,
}

/// Body of the upload-URL request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignedUrlRequest<'a> {
    pub file_name: &'a str,
    pub file_type: &'a str,
    pub file_base_path: &'a str,
    pub public_file: bool,
}
