//! Error mapping helpers for the HTTP report gateway.

use http::StatusCode;

use crate::report::error::ReportError;

/// Checks if a status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

pub(super) fn map_http_error(status: StatusCode, maybe_message: Option<String>) -> ReportError {
    if is_auth_failure(status) {
        ReportError::Authentication {
            status: status.as_u16(),
            message: maybe_message,
        }
    } else {
        ReportError::Api {
            status: status.as_u16(),
            message: maybe_message,
        }
    }
}

pub(super) fn map_transport_error(operation: &str, error: &reqwest::Error) -> ReportError {
    if error.is_timeout() {
        return ReportError::Network {
            message: format!("{operation} timed out: {error}"),
        };
    }
    if error.is_decode() {
        return ReportError::InvalidResponse {
            message: format!("{operation} failed to read the response: {error}"),
        };
    }
    ReportError::Network {
        message: format!("{operation} failed: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use rstest::rstest;

    use super::map_http_error;
    use crate::report::ReportError;

    #[rstest]
    #[case::unauthorized(StatusCode::UNAUTHORIZED, true)]
    #[case::forbidden(StatusCode::FORBIDDEN, true)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, false)]
    #[case::bad_request(StatusCode::BAD_REQUEST, false)]
    fn classifies_statuses(#[case] status: StatusCode, #[case] is_auth: bool) {
        let error = map_http_error(status, Some("detalle".to_owned()));

        match error {
            ReportError::Authentication { status: code, .. } => {
                assert!(is_auth, "unexpected authentication error");
                assert_eq!(code, status.as_u16());
            }
            ReportError::Api { status: code, .. } => {
                assert!(!is_auth, "unexpected API error");
                assert_eq!(code, status.as_u16());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
