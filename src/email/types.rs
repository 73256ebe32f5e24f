//! Email campaign models.

use serde::{Deserialize, Serialize};

use crate::client::{ExtensionData, ValidationError};
use crate::id::FlexibleId;

/// An email recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Sent as an empty string when unknown
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_external_id: Option<String>,
}

impl EmailAccount {
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: String::new(),
            client_external_id: None,
        }
    }

    #[must_use]
    pub fn with_client_external_id(mut self, id: impl Into<String>) -> Self {
        self.client_external_id = Some(id.into());
        self
    }
}

/// Mailing list selection for `addToList`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Body of `POST {email}/api/v1/campaigns`.
///
/// [`EmailCampaign::new`] fills in the platform defaults for a one-off
/// campaign sent to the listed accounts from a single sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailCampaign {
    pub subject: String,
    pub title: String,
    /// HTML body
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_key: Option<String>,
    pub sender_email: String,
    pub reply_email: String,
    pub sender_name: String,
    pub accounts: Vec<EmailAccount>,
    pub campaign_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_timezone: Option<String>,
    pub add_to_list: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_list: Option<SelectedList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
    pub contact_input: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_contacts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flux_id: Option<String>,
    pub from_type: String,
    #[serde(default)]
    pub senders: Vec<serde_json::Value>,
}

/// Sender identity shared by every email of a campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub email: String,
    pub reply_to: String,
    pub name: String,
}

impl Sender {
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        reply_to: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            reply_to: reply_to.into(),
            name: name.into(),
        }
    }
}

impl EmailCampaign {
    /// Creates a campaign with the platform defaults.
    #[must_use]
    pub fn new(
        accounts: Vec<EmailAccount>,
        subject: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        sender: Sender,
    ) -> Self {
        Self {
            subject: subject.into(),
            title: title.into(),
            message: message.into(),
            editor: None,
            file_key: None,
            sender_email: sender.email,
            reply_email: sender.reply_to,
            sender_name: sender.name,
            accounts,
            campaign_type: "EMAIL".to_string(),
            scheduled_timestamp: None,
            scheduled_timezone: None,
            add_to_list: "noList".to_string(),
            selected_list: None,
            list_id: None,
            contact_input: "accounts".to_string(),
            replace_contacts: None,
            email_template_id: None,
            flux_id: None,
            from_type: "single".to_string(),
            senders: Vec::new(),
        }
    }

    /// Schedules the campaign instead of sending immediately.
    #[must_use]
    pub fn scheduled(mut self, timestamp: impl Into<String>, timezone: impl Into<String>) -> Self {
        self.scheduled_timestamp = Some(timestamp.into());
        self.scheduled_timezone = Some(timezone.into());
        self
    }

    /// Checks required fields, then every account in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found; account errors carry
    /// the account's index.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.accounts.is_empty() {
            return Err(ValidationError::Empty { item: "account" });
        }
        let required = [
            (&self.subject, "Subject"),
            (&self.title, "Campaign title"),
            (&self.message, "Message content"),
            (&self.sender_email, "Sender email"),
            (&self.reply_email, "Reply email"),
            (&self.sender_name, "Sender name"),
        ];
        if let Some((_, field)) = required.iter().find(|(value, _)| value.is_empty()) {
            return Err(ValidationError::Missing { field: *field });
        }
        for (index, account) in self.accounts.iter().enumerate() {
            validate_account(index, account)?;
        }
        Ok(())
    }
}

fn validate_account(index: usize, account: &EmailAccount) -> Result<(), ValidationError> {
    let required = [
        (&account.first_name, "First name"),
        (&account.last_name, "Last name"),
        (&account.email, "Email"),
    ];
    match required.iter().find(|(value, _)| value.is_empty()) {
        Some((_, field)) => Err(ValidationError::InvalidAccount {
            index,
            field: *field,
        }),
        None => Ok(()),
    }
}

/// Result of an email campaign send.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailResponse {
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
    #[serde(flatten)]
    pub extra: ExtensionData,
}
