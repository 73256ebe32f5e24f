//! Tests for exit codes and hints.

use std::io;
use std::path::PathBuf;

use super::*;

fn http_error(status: u16) -> RunError {
    RunError::Client(ClientError::Http {
        status: http::StatusCode::from_u16(status).unwrap(),
        body: String::new(),
    })
}

mod config_hints {
    use super::*;

    #[test]
    fn missing_credentials_name_their_env_var() {
        let client_id = ConfigError::missing(field::CLIENT_ID, "");
        let api_key = ConfigError::missing(field::API_KEY, "");

        assert!(config_hint(&client_id).unwrap().contains("CCAI_CLIENT_ID"));
        assert!(config_hint(&api_key).unwrap().contains("CCAI_API_KEY"));
    }

    #[test]
    fn unreadable_file_suggests_init() {
        let err = ConfigError::FileRead {
            path: PathBuf::from("ccai.toml"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };

        assert!(config_hint(&err).unwrap().contains("ccai init"));
    }

    #[test]
    fn bad_url_points_at_urls_section() {
        let err = ConfigError::InvalidUrl {
            url: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };

        assert!(config_hint(&err).unwrap().contains("[urls]"));
    }

    #[test]
    fn bad_timeout_has_no_hint() {
        let err = ConfigError::InvalidTimeout {
            reason: "must be greater than 0".to_string(),
        };

        assert!(config_hint(&err).is_none());
    }
}

mod runtime_hints {
    use super::*;

    #[test]
    fn auth_failures_point_at_credentials() {
        assert!(runtime_hint(&http_error(401)).unwrap().contains("API key"));
        assert!(runtime_hint(&http_error(403)).unwrap().contains("API key"));
    }

    #[test]
    fn other_statuses_have_no_hint() {
        assert!(runtime_hint(&http_error(400)).is_none());
        assert!(runtime_hint(&http_error(500)).is_none());
    }

    #[test]
    fn timeout_points_at_timeout_setting() {
        let hint = runtime_hint(&RunError::Client(ClientError::TimedOut)).unwrap();

        assert!(hint.contains("--timeout"));
    }

    #[test]
    fn signature_mismatch_mentions_secret() {
        assert!(runtime_hint(&RunError::SignatureMismatch).unwrap().contains("secret"));
    }
}

mod exit_codes {
    use super::*;

    fn code(exit: ExitCode) -> String {
        format!("{exit:?}")
    }

    #[test]
    fn success_and_failure_map_to_distinct_codes() {
        assert_eq!(code(report(Ok(()))), code(exit_code::SUCCESS));
        assert_eq!(
            code(report(Err(RunError::SignatureMismatch))),
            code(exit_code::runtime_error())
        );
        assert_ne!(code(exit_code::runtime_error()), code(exit_code::CONFIG_ERROR));
    }
}
