//! SMS and MMS campaigns.
//!
//! This module provides:
//! - Recipients and send parameters ([`Account`], [`SmsRequest`], [`MmsRequest`])
//! - Wire bodies ([`SmsCampaign`], [`MmsCampaign`])
//! - Responses ([`SmsResponse`], [`SignedUrlResponse`])
//! - The services ([`SmsService`], [`MmsService`])

mod mms;
mod service;
mod types;

#[cfg(test)]
mod mms_tests;

pub use mms::MmsService;
pub use service::SmsService;
pub use types::{
    Account, MmsCampaign, MmsRequest, SignedUrlResponse, SmsCampaign, SmsRequest, SmsResponse,
};
