//! Tests for `CcaiClient` request execution.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::{ApiRequest, CcaiClient, ClientError, ExtensionData, SendOptions};
use crate::id::FlexibleId;
use crate::test_support::{API_KEY, MockTransport, client_with, test_config};
use crate::transport::TransportError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Echo {
    #[serde(default)]
    id: Option<FlexibleId>,
    #[serde(default)]
    campaign_id: Option<FlexibleId>,
    #[serde(flatten)]
    extra: ExtensionData,
}

mod url_resolution {
    use super::*;

    #[tokio::test]
    async fn path_is_appended_to_core_base_url() {
        let (client, mock) = client_with(MockTransport::json(200, &json!({})));

        let _: serde_json::Value = client
            .request(ApiRequest::get("/clients/1231/campaigns/direct"))
            .await
            .unwrap();

        assert_eq!(
            mock.last_request().url.as_str(),
            "https://core.cloudcontactai.com/api/clients/1231/campaigns/direct"
        );
    }

    #[tokio::test]
    async fn test_environment_switches_host() {
        let mock = Arc::new(MockTransport::json(200, &json!({})));
        let config = test_config().with_test_environment(true);
        let client = CcaiClient::with_shared_transport(config, Arc::clone(&mock));

        let _: serde_json::Value = client.request(ApiRequest::get("/webhooks")).await.unwrap();

        assert_eq!(
            mock.last_request().url.as_str(),
            "https://core-test-cloudcontactai.allcode.com/api/webhooks"
        );
    }

    #[tokio::test]
    async fn base_url_override_wins() {
        let (client, mock) = client_with(MockTransport::json(200, &json!({})));

        let _: serde_json::Value = client
            .request(
                ApiRequest::post("/api/v1/campaigns")
                    .with_base_url("https://email-campaigns.cloudcontactai.com"),
            )
            .await
            .unwrap();

        assert_eq!(
            mock.last_request().url.as_str(),
            "https://email-campaigns.cloudcontactai.com/api/v1/campaigns"
        );
    }

    #[tokio::test]
    async fn unparsable_url_fails_before_sending() {
        let (client, mock) = client_with(MockTransport::json(200, &json!({})));

        let result: Result<serde_json::Value, _> = client
            .request(ApiRequest::get("x").with_base_url("not a url"))
            .await;

        assert!(matches!(result, Err(ClientError::InvalidUrl { .. })));
        assert_eq!(mock.calls(), 0);
    }
}

mod headers {
    use super::*;

    #[tokio::test]
    async fn mandatory_headers_are_attached() {
        let (client, mock) = client_with(MockTransport::json(200, &json!({})));

        let _: serde_json::Value = client
            .request(ApiRequest::post("/webhooks").with_json(&json!({"a": 1})).unwrap())
            .await
            .unwrap();

        let req = mock.last_request();
        let bearer = format!("Bearer {API_KEY}");
        assert_eq!(req.header_str("authorization"), Some(bearer.as_str()));
        assert_eq!(req.header_str("accept"), Some("application/json"));
        assert_eq!(req.header_str("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn no_content_type_without_body() {
        let (client, mock) = client_with(MockTransport::json(200, &json!([])));

        let _: serde_json::Value = client.request(ApiRequest::get("/webhooks")).await.unwrap();

        let req = mock.last_request();
        assert!(req.header_str("content-type").is_none());
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn caller_headers_are_merged_on_top() {
        let (client, mock) = client_with(MockTransport::json(200, &json!({})));

        let _: serde_json::Value = client
            .request(
                ApiRequest::get("/webhooks")
                    .with_header("ForceNewCampaign", "false")
                    .with_header("Accept", "text/plain"),
            )
            .await
            .unwrap();

        let req = mock.last_request();
        assert_eq!(req.header_str("forcenewcampaign"), Some("false"));
        assert_eq!(req.header_str("accept"), Some("text/plain"));
    }

    #[tokio::test]
    async fn invalid_header_name_is_rejected() {
        let (client, mock) = client_with(MockTransport::json(200, &json!({})));

        let result: Result<serde_json::Value, _> = client
            .request(ApiRequest::get("/webhooks").with_header("bad header", "x"))
            .await;

        assert!(matches!(result, Err(ClientError::InvalidHeader { name, .. }) if name == "bad header"));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn body_is_sent_without_nulls() {
        let (client, mock) = client_with(MockTransport::json(200, &json!({})));

        let _: serde_json::Value = client
            .request(
                ApiRequest::post("/webhooks")
                    .with_json(&json!({"url": "https://example.com", "secret": null}))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(mock.last_json(), json!({"url": "https://example.com"}));
    }
}

mod responses {
    use super::*;

    #[tokio::test]
    async fn http_400_surfaces_body_after_one_call() {
        let (client, mock) = client_with(MockTransport::raw(400, r#"{"error":"bad phone"}"#));

        let result: Result<serde_json::Value, _> =
            client.request(ApiRequest::get("/webhooks")).await;

        match result {
            Err(ClientError::Http { status, body }) => {
                assert_eq!(status, http::StatusCode::BAD_REQUEST);
                assert_eq!(body, r#"{"error":"bad phone"}"#);
            }
            other => panic!("expected Http error, got {other:?}"),
        }
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn server_error_is_not_retried() {
        let (client, mock) = client_with(MockTransport::raw(503, "unavailable"));

        let result: Result<serde_json::Value, _> =
            client.request(ApiRequest::get("/webhooks")).await;

        assert_eq!(result.unwrap_err().status(), Some(http::StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn empty_body_is_empty_response() {
        let (client, _) = client_with(MockTransport::raw(200, ""));

        let result: Result<Echo, _> = client.request(ApiRequest::get("/x")).await;

        assert!(matches!(result, Err(ClientError::EmptyResponse)));
    }

    #[tokio::test]
    async fn null_body_is_empty_response() {
        let (client, _) = client_with(MockTransport::raw(200, "null"));

        let result: Result<Echo, _> = client.request(ApiRequest::get("/x")).await;

        assert!(matches!(result, Err(ClientError::EmptyResponse)));
    }

    #[tokio::test]
    async fn shape_mismatch_is_decode_error() {
        let (client, _) = client_with(MockTransport::raw(200, "[1,2,3]"));

        let result: Result<Echo, _> = client.request(ApiRequest::get("/x")).await;

        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[tokio::test]
    async fn typed_body_ids_survive_the_round_trip() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Outgoing {
            id: FlexibleId,
            campaign_id: FlexibleId,
            status: &'static str,
        }

        let (client, mock) = client_with(MockTransport::echo());
        let body = Outgoing {
            id: FlexibleId::from(9_007_199_254_740_993_i64),
            campaign_id: FlexibleId::from("cmp-7"),
            status: "queued",
        };

        let echo: Echo = client
            .request(ApiRequest::post("/x").with_json(&body).unwrap())
            .await
            .unwrap();

        assert_eq!(mock.last_json()["id"], "9007199254740993");
        assert_eq!(echo.id.unwrap(), body.id);
        assert_eq!(echo.campaign_id.unwrap(), body.campaign_id);
        assert_eq!(echo.extra.get::<String>("status").as_deref(), Some("queued"));
    }

    #[tokio::test]
    async fn numeric_and_string_ids_decode_alike() {
        let (client, _) = client_with(MockTransport::json(
            200,
            &json!({"id": 9_007_199_254_740_993_i64, "campaignId": "cmp-7", "status": "queued"}),
        ));

        let echo: Echo = client.request(ApiRequest::get("/x")).await.unwrap();

        assert_eq!(echo.id.unwrap(), "9007199254740993");
        assert_eq!(echo.campaign_id.unwrap(), "cmp-7");
        assert_eq!(echo.extra.get::<String>("status").as_deref(), Some("queued"));
    }

    #[tokio::test]
    async fn transport_timeout_maps_to_timed_out() {
        let (client, _) = client_with(MockTransport::new(vec![Err(TransportError::Timeout)]));

        let result: Result<serde_json::Value, _> = client.request(ApiRequest::get("/x")).await;

        assert!(matches!(result, Err(ClientError::TimedOut)));
    }

    #[tokio::test]
    async fn transport_failure_is_passed_through() {
        let (client, _) = client_with(MockTransport::new(vec![Err(
            TransportError::InvalidRequest("boom".to_string()),
        )]));

        let result: Result<serde_json::Value, _> = client.request(ApiRequest::get("/x")).await;

        assert!(matches!(
            result,
            Err(ClientError::Transport(TransportError::InvalidRequest(_)))
        ));
    }
}

mod cancellation {
    use super::*;

    #[tokio::test]
    async fn pre_cancelled_token_never_sends() {
        let (client, mock) = client_with(MockTransport::json(200, &json!({})));
        let token = CancellationToken::new();
        token.cancel();

        let result: Result<serde_json::Value, _> = client
            .request(
                ApiRequest::get("/x")
                    .with_cancellation(token)
                    .with_timeout(Duration::ZERO),
            )
            .await;

        assert!(matches!(result, Err(ClientError::Cancelled)));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_timeout_is_timed_out() {
        let (client, _) = client_with(
            MockTransport::json(200, &json!({})).with_delay(Duration::from_secs(60)),
        );

        let result: Result<serde_json::Value, _> = client
            .request(ApiRequest::get("/x").with_timeout(Duration::from_secs(5)))
            .await;

        assert!(matches!(result, Err(ClientError::TimedOut)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_during_flight_is_cancelled() {
        let (client, _) = client_with(
            MockTransport::json(200, &json!({})).with_delay(Duration::from_secs(60)),
        );
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let result: Result<serde_json::Value, _> = client
            .request(
                ApiRequest::get("/x")
                    .with_cancellation(token)
                    .with_timeout(Duration::from_secs(30)),
            )
            .await;

        assert!(matches!(result, Err(ClientError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn fast_response_beats_timeout() {
        let (client, _) = client_with(
            MockTransport::json(200, &json!({"id": 1})).with_delay(Duration::from_millis(10)),
        );

        let echo: Echo = client
            .request(ApiRequest::get("/x").with_timeout(Duration::from_secs(5)))
            .await
            .unwrap();

        assert_eq!(echo.id.unwrap(), "1");
    }
}

mod upload {
    use super::*;

    #[tokio::test]
    async fn put_carries_no_credentials() {
        let (client, mock) = client_with(MockTransport::raw(200, ""));

        let ok = client
            .upload(
                "https://bucket.s3.amazonaws.com/1231/campaign/a.png?sig=1",
                vec![1, 2, 3],
                "image/png",
                &SendOptions::new(),
            )
            .await
            .unwrap();

        assert!(ok);
        let req = mock.last_request();
        assert_eq!(req.method, http::Method::PUT);
        assert!(req.header_str("authorization").is_none());
        assert_eq!(req.header_str("content-type"), Some("image/png"));
        assert_eq!(req.body.as_deref(), Some(&[1_u8, 2, 3][..]));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_upload_times_out() {
        let (client, _) = client_with(
            MockTransport::raw(200, "").with_delay(Duration::from_secs(30)),
        );
        let options = SendOptions::new().with_timeout(Duration::from_secs(5));

        let result = client
            .upload("https://bucket.example/a.png", vec![1], "image/png", &options)
            .await;

        assert!(matches!(result, Err(ClientError::TimedOut)));
    }

    #[tokio::test]
    async fn rejected_upload_returns_false() {
        let (client, _) = client_with(MockTransport::raw(403, "denied"));

        let ok = client
            .upload("https://bucket.example/a.png", vec![], "image/png", &SendOptions::new())
            .await
            .unwrap();

        assert!(!ok);
    }
}

mod ownership {
    use super::*;

    #[test]
    fn shutdown_releases_only_the_shared_reference() {
        let mock = Arc::new(MockTransport::default());
        let client = CcaiClient::with_shared_transport(test_config(), Arc::clone(&mock));
        assert!(!client.owns_transport());
        assert_eq!(Arc::strong_count(&mock), 2);

        client.shutdown();

        assert_eq!(Arc::strong_count(&mock), 1);
    }

    #[test]
    fn owned_transport_is_reported() {
        let client = CcaiClient::with_transport(test_config(), MockTransport::default());

        assert!(client.owns_transport());
    }

    #[test]
    fn client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CcaiClient>();
        assert_send_sync::<CcaiClient<MockTransport>>();
    }

    #[test]
    fn debug_hides_api_key() {
        let client = CcaiClient::with_transport(test_config(), MockTransport::default());

        assert!(!format!("{client:?}").contains(API_KEY));
    }
}
