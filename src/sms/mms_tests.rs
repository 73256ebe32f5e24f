//! Tests for `MmsService`.

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde_json::json;

use super::{Account, MmsRequest};
use crate::client::{ClientError, SendOptions, ValidationError};
use crate::test_support::{MockTransport, client_with, json_response, raw_response};

const SIGNED_URL: &str = "https://bucket.s3.amazonaws.com/1231/campaign/promo.png?X-Amz-Signature=abc";

fn bob() -> Account {
    Account::new("Bob", "Roe", "+15550000001")
}

fn image_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();
    file
}

mod signed_url {
    use super::*;

    #[tokio::test]
    async fn requests_files_host_and_overrides_file_key() {
        let (client, mock) = client_with(MockTransport::json(
            200,
            &json!({"signedS3Url": SIGNED_URL, "fileKey": "server/chosen/key.png"}),
        ));

        let response = client
            .mms()
            .get_signed_upload_url("promo.png", "image/png", None, true, &SendOptions::new())
            .await
            .unwrap();

        let req = mock.last_request();
        assert_eq!(req.url.as_str(), "https://files.cloudcontactai.com/upload/url");
        assert_eq!(
            mock.last_json(),
            json!({
                "fileName": "promo.png",
                "fileType": "image/png",
                "fileBasePath": "1231/campaign",
                "publicFile": true
            })
        );
        assert_eq!(response.signed_s3_url, SIGNED_URL);
        assert_eq!(response.file_key, "1231/campaign/promo.png");
    }

    #[tokio::test]
    async fn custom_base_path_is_sent() {
        let (client, mock) = client_with(MockTransport::json(200, &json!({"signedS3Url": SIGNED_URL})));

        client
            .mms()
            .get_signed_upload_url("a.jpg", "image/jpeg", Some("1231/assets"), false, &SendOptions::new())
            .await
            .unwrap();

        let body = mock.last_json();
        assert_eq!(body["fileBasePath"], "1231/assets");
        assert_eq!(body["publicFile"], false);
    }

    #[tokio::test]
    async fn missing_signed_url_is_rejected() {
        let (client, _) = client_with(MockTransport::json(200, &json!({"fileKey": "k"})));

        let result = client
            .mms()
            .get_signed_upload_url("a.jpg", "image/jpeg", None, true, &SendOptions::new())
            .await;

        assert!(matches!(result, Err(ClientError::EmptyResponse)));
    }

    #[tokio::test]
    async fn empty_file_name_is_validation_error() {
        let (client, mock) = client_with(MockTransport::default());

        let err = client
            .mms()
            .get_signed_upload_url("", "image/png", None, true, &SendOptions::new())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Validation error: File name is required");
        assert_eq!(mock.calls(), 0);
    }
}

mod upload {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_validation_error() {
        let (client, mock) = client_with(MockTransport::default());
        let path = Path::new("/definitely/not/here.png");

        let err = client
            .mms()
            .upload_file(SIGNED_URL, path, "image/png", &SendOptions::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::FileNotFound(p)) if p == path
        ));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn empty_content_type_is_validation_error() {
        let (client, _) = client_with(MockTransport::default());
        let file = image_file();

        let err = client
            .mms()
            .upload_file(SIGNED_URL, file.path(), "", &SendOptions::new())
            .await
            .unwrap_err();

        assert!(err.is_validation());
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_applies_to_the_put() {
        let (client, mock) = client_with(
            MockTransport::raw(200, "").with_delay(std::time::Duration::from_secs(60)),
        );
        let file = image_file();
        let options = SendOptions::new().with_timeout(std::time::Duration::from_secs(10));

        let err = client
            .mms()
            .upload_file(SIGNED_URL, file.path(), "image/png", &options)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::TimedOut));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn file_bytes_are_put_to_signed_url() {
        let (client, mock) = client_with(MockTransport::raw(200, ""));
        let file = image_file();

        let ok = client
            .mms()
            .upload_file(SIGNED_URL, file.path(), "image/png", &SendOptions::new())
            .await
            .unwrap();

        assert!(ok);
        let req = mock.last_request();
        assert_eq!(req.method, http::Method::PUT);
        assert_eq!(req.url.as_str(), SIGNED_URL);
        assert_eq!(req.body.as_deref(), Some(&[0x89, b'P', b'N', b'G'][..]));
        assert!(req.header_str("authorization").is_none());
    }
}

mod send {
    use super::*;

    #[tokio::test]
    async fn forced_campaign_sets_header() {
        let (client, mock) = client_with(MockTransport::json(200, &json!({"id": 1})));

        client
            .mms()
            .send_single("1231/campaign/promo.png", bob(), "Look!", "Promo", &SendOptions::new())
            .await
            .unwrap();

        assert_eq!(mock.last_request().header_str("ForceNewCampaign"), Some("true"));
        assert_eq!(mock.last_json()["pictureFileKey"], "1231/campaign/promo.png");
    }

    #[tokio::test]
    async fn unforced_campaign_omits_header() {
        let (client, mock) = client_with(MockTransport::json(200, &json!({"id": 1})));
        let request = MmsRequest::new(vec![bob()], "Look!", "Promo")
            .with_picture("1231/campaign/promo.png")
            .with_force_new_campaign(false);

        client.mms().send(request, &SendOptions::new()).await.unwrap();

        assert!(mock.last_request().header_str("ForceNewCampaign").is_none());
    }

    #[tokio::test]
    async fn missing_picture_is_validation_error() {
        let (client, mock) = client_with(MockTransport::default());

        let err = client
            .mms()
            .send(MmsRequest::new(vec![bob()], "Look!", "Promo"), &SendOptions::new())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Validation error: Picture file key is required");
        assert_eq!(mock.calls(), 0);
    }
}

mod with_image {
    use super::*;

    #[tokio::test]
    async fn runs_url_upload_send_in_order() {
        let file = image_file();
        let file_name = file.path().file_name().unwrap().to_str().unwrap().to_string();
        let (client, mock) = client_with(MockTransport::new(vec![
            Ok(json_response(200, &json!({"signedS3Url": SIGNED_URL, "fileKey": "ignored"}))),
            Ok(raw_response(200, "")),
            Ok(json_response(200, &json!({"id": 77, "status": "sent"}))),
        ]));
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let options = SendOptions::new().on_progress(move |s| sink.lock().unwrap().push(s.to_string()));

        let response = client
            .mms()
            .send_with_image(
                file.path(),
                "image/png",
                MmsRequest::new(vec![bob()], "Look!", "Promo"),
                &options,
            )
            .await
            .unwrap();

        let requests = mock.captured_requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].url.path(), "/upload/url");
        assert_eq!(requests[1].method, http::Method::PUT);
        assert!(requests[2].url.path().ends_with("/campaigns/direct"));
        assert_eq!(mock.last_json()["pictureFileKey"], format!("1231/campaign/{file_name}"));
        assert_eq!(response.id.unwrap(), "77");
        assert_eq!(
            *log.lock().unwrap(),
            [
                "Getting signed upload URL",
                "Uploading image to S3",
                "Image uploaded successfully, sending MMS",
                "Preparing to send MMS",
                "Sending MMS",
                "MMS sent successfully",
            ]
        );
    }

    #[tokio::test]
    async fn rejected_upload_stops_before_send() {
        let file = image_file();
        let (client, mock) = client_with(MockTransport::new(vec![
            Ok(json_response(200, &json!({"signedS3Url": SIGNED_URL}))),
            Ok(raw_response(403, "expired")),
        ]));

        let err = client
            .mms()
            .send_with_image(
                file.path(),
                "image/png",
                MmsRequest::new(vec![bob()], "Look!", "Promo"),
                &SendOptions::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::UploadFailed));
        assert_eq!(mock.calls(), 2);
    }
}
