//! Email campaigns.

mod service;
mod types;


pub use service::EmailService;
pub use types::{EmailAccount, EmailCampaign, EmailResponse, SelectedList, Sender};
