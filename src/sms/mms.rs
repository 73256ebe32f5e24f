//! MMS sends and the image upload workflow.

use std::path::Path;

use super::service::{FORCE_NEW_CAMPAIGN, direct_campaign_path};
use super::types::{Account, MmsCampaign, MmsRequest, SignedUrlRequest, SignedUrlResponse, SmsResponse};
use crate::client::{ApiRequest, CcaiClient, ClientError, SendOptions, ValidationError};
use crate::transport::HttpClient;

const UPLOAD_URL_PATH: &str = "/upload/url";

/// MMS operations, borrowed from a [`CcaiClient`] via [`CcaiClient::mms`].
///
/// Sending an image takes three steps: request a signed upload URL, `PUT`
/// the file to it, then send the campaign with the returned file key.
/// [`send_with_image`](Self::send_with_image) chains all three.
#[derive(Debug)]
pub struct MmsService<'a, H: HttpClient> {
    client: &'a CcaiClient<H>,
}

impl<'a, H: HttpClient> MmsService<'a, H> {
    pub(crate) const fn new(client: &'a CcaiClient<H>) -> Self {
        Self { client }
    }

    /// Requests a pre-signed URL for uploading `file_name`.
    ///
    /// `file_base_path` defaults to `{clientId}/campaign`. The returned
    /// `file_key` is always `{clientId}/campaign/{file_name}`, whatever the
    /// server answered.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for an empty name or type, and
    /// [`ClientError::EmptyResponse`] if the answer carries no upload URL.
    pub async fn get_signed_upload_url(
        &self,
        file_name: &str,
        file_type: &str,
        file_base_path: Option<&str>,
        public_file: bool,
        options: &SendOptions,
    ) -> Result<SignedUrlResponse, ClientError> {
        if file_name.is_empty() {
            return Err(ValidationError::Missing { field: "File name" }.into());
        }
        if file_type.is_empty() {
            return Err(ValidationError::Missing { field: "File type" }.into());
        }

        let config = self.client.config();
        let default_base = format!("{}/campaign", config.client_id());
        let body = SignedUrlRequest {
            file_name,
            file_type,
            file_base_path: file_base_path.unwrap_or(&default_base),
            public_file,
        };
        let api_request = ApiRequest::post(UPLOAD_URL_PATH)
            .with_base_url(config.files_base_url())
            .with_json(&body)?;

        let mut response: SignedUrlResponse = self.client.request(options.apply(api_request)).await?;
        if response.signed_s3_url.is_empty() {
            tracing::warn!("Upload URL response for '{file_name}' has no signedS3Url");
            return Err(ClientError::EmptyResponse);
        }
        response.file_key = format!("{}/campaign/{file_name}", config.client_id());
        Ok(response)
    }

    /// Uploads the file at `path` to a signed URL.
    ///
    /// Returns whether the storage host accepted the upload. The timeout and
    /// cancellation in `options` bound the PUT.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for empty arguments or a missing
    /// file, [`ClientError::FileRead`] if the file cannot be read, or
    /// [`ClientError::TimedOut`] / [`ClientError::Cancelled`].
    pub async fn upload_file(
        &self,
        signed_url: &str,
        path: &Path,
        content_type: &str,
        options: &SendOptions,
    ) -> Result<bool, ClientError> {
        if signed_url.is_empty() {
            return Err(ValidationError::Missing { field: "Signed URL" }.into());
        }
        if path.as_os_str().is_empty() {
            return Err(ValidationError::Missing { field: "File path" }.into());
        }
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(ValidationError::FileNotFound(path.to_path_buf()).into());
        }
        if content_type.is_empty() {
            return Err(ValidationError::Missing {
                field: "Content type",
            }
            .into());
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        self.client
            .upload(signed_url, bytes, content_type, options)
            .await
    }

    /// Sends an MMS campaign referencing an uploaded picture.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before any network activity if
    /// the request is incomplete; otherwise whatever the executor reports.
    pub async fn send(
        &self,
        request: MmsRequest,
        options: &SendOptions,
    ) -> Result<SmsResponse, ClientError> {
        request.validate()?;
        options.notify("Preparing to send MMS");

        let path = direct_campaign_path(self.client.config().client_id());
        let force = request.force_new_campaign;
        let mut api_request = ApiRequest::post(path).with_json(&MmsCampaign::from(request))?;
        if force {
            api_request = api_request.with_header(FORCE_NEW_CAMPAIGN, "true");
        }

        options.notify("Sending MMS");
        let result = self.client.request(options.apply(api_request)).await;
        options.finish("MMS", result)
    }

    /// Sends an MMS to a single recipient.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn send_single(
        &self,
        picture_file_key: &str,
        account: Account,
        message: &str,
        title: &str,
        options: &SendOptions,
    ) -> Result<SmsResponse, ClientError> {
        let request = MmsRequest::new(vec![account], message, title).with_picture(picture_file_key);
        self.send(request, options).await
    }

    /// Uploads the image at `image_path` and sends `request` with it.
    ///
    /// Any picture key already on `request` is replaced by the uploaded one.
    ///
    /// # Errors
    ///
    /// Fails with the first failing step; a rejected upload is
    /// [`ClientError::UploadFailed`].
    pub async fn send_with_image(
        &self,
        image_path: &Path,
        content_type: &str,
        request: MmsRequest,
        options: &SendOptions,
    ) -> Result<SmsResponse, ClientError> {
        let file_name = image_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or(ValidationError::Missing { field: "File name" })?;

        options.notify("Getting signed upload URL");
        let signed = self
            .get_signed_upload_url(file_name, content_type, None, true, options)
            .await?;

        options.notify("Uploading image to S3");
        if !self
            .upload_file(&signed.signed_s3_url, image_path, content_type, options)
            .await?
        {
            return Err(ClientError::UploadFailed);
        }

        options.notify("Image uploaded successfully, sending MMS");
        self.send(request.with_picture(signed.file_key), options).await
    }
}
