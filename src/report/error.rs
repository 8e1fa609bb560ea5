//! Error types exposed by the report pipeline.

use thiserror::Error;

/// Errors surfaced while building, fetching, or exporting survey reports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReportError {
    /// Either the start or end date is empty.
    #[error("a start and end date are required to generate a report")]
    MissingDateRange,

    /// A fetch was requested while another one is still outstanding.
    #[error("a report fetch for page {page} is already in progress")]
    FetchInProgress {
        /// Page of the fetch that is still in flight.
        page: u32,
    },

    /// The requested page lies outside the pages of the held result.
    #[error("page {page} is outside the available range 1..={total_pages}")]
    InvalidPage {
        /// Page that was requested.
        page: u32,
        /// Number of pages in the held result.
        total_pages: u32,
    },

    /// A filter name did not match any known field.
    #[error("unknown filter field: {name}")]
    UnknownFilterField {
        /// The name that failed to parse.
        name: String,
    },

    /// A `key=value` filter expression could not be parsed.
    #[error("invalid filter expression: {message}")]
    InvalidFilter {
        /// Description of the malformed expression.
        message: String,
    },

    /// The report service rejected the supplied credentials.
    #[error(
        "report service rejected the request with status {status}: {}",
        .message.as_deref().unwrap_or("no message")
    )]
    Authentication {
        /// HTTP status code returned with the rejection.
        status: u16,
        /// Message supplied by the backend, when present.
        message: Option<String>,
    },

    /// The report service returned a non-authentication error.
    #[error(
        "report service returned status {status}: {}",
        .message.as_deref().unwrap_or("no message")
    )]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Message supplied by the backend, when present.
        message: Option<String>,
    },

    /// Networking failed while calling the report service.
    #[error("network error talking to the report service: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The response body could not be decoded or broke page invariants.
    #[error("malformed report response: {message}")]
    InvalidResponse {
        /// Details about the decoding failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded or was incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}

impl ReportError {
    /// Returns the message the backend attached to a rejected request.
    ///
    /// Only errors produced from an HTTP error response carry one; every other
    /// variant returns `None` so callers fall back to their own wording.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Authentication { message, .. } | Self::Api { message, .. } => message
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::ReportError;

    #[rstest]
    #[case::api_with_message(
        ReportError::Api { status: 500, message: Some("Base de datos caída".to_owned()) },
        Some("Base de datos caída")
    )]
    #[case::auth_with_message(
        ReportError::Authentication { status: 401, message: Some("Token inválido".to_owned()) },
        Some("Token inválido")
    )]
    #[case::api_blank_message(
        ReportError::Api { status: 502, message: Some("   ".to_owned()) },
        None
    )]
    #[case::api_without_message(ReportError::Api { status: 500, message: None }, None)]
    #[case::network(ReportError::Network { message: "connection refused".to_owned() }, None)]
    #[case::validation(ReportError::MissingDateRange, None)]
    fn backend_message_only_comes_from_http_errors(
        #[case] error: ReportError,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(error.backend_message(), expected);
    }

    #[rstest]
    fn api_error_display_includes_status_and_message() {
        let error = ReportError::Api {
            status: 503,
            message: None,
        };

        assert_eq!(
            error.to_string(),
            "report service returned status 503: no message"
        );
    }
}
