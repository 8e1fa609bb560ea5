//! HTTP implementation of [`ReportGateway`] built on reqwest.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::report::error::ReportError;
use crate::report::models::{ApiReportEnvelope, ReportResult};
use crate::report::query::ReportQuery;

use super::ReportGateway;
use super::error_mapping::{map_http_error, map_transport_error};
use super::http_utils::extract_backend_message;

/// Path of the report endpoint relative to the API base URL.
pub const DEFAULT_REPORT_PATH: &str = "/dashboard/002/report";

/// Configuration for [`HttpReportGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpGatewayConfig {
    /// Base API URL (e.g., `https://encuestas.example.com/api`).
    pub base_url: String,
    /// Report endpoint appended to `base_url`.
    pub report_path: String,
    /// Bearer token forwarded with every request.
    pub token: Option<String>,
    /// Transport timeout. `None` waits for the backend indefinitely.
    pub timeout: Option<Duration>,
}

impl HttpGatewayConfig {
    /// Creates configuration for `base_url` with the default report path.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            report_path: DEFAULT_REPORT_PATH.to_owned(),
            token: None,
            timeout: None,
        }
    }

    /// Overrides the report path.
    #[must_use]
    pub fn with_report_path(mut self, report_path: impl Into<String>) -> Self {
        self.report_path = report_path.into();
        self
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|value| !value.trim().is_empty());
        self
    }

    /// Sets the transport timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> Result<Url, ReportError> {
        let path = self.report_path.trim_start_matches('/');
        let joined = format!("{}/{path}", self.base_url.trim_end_matches('/'));
        Url::parse(&joined).map_err(|error| ReportError::Configuration {
            message: format!("invalid report URL '{joined}': {error}"),
        })
    }
}

/// Report gateway that calls the survey backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpReportGateway {
    client: Client,
    endpoint: Url,
    token: Option<String>,
}

impl HttpReportGateway {
    /// Builds a gateway from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Configuration`] when the endpoint URL is invalid
    /// or the HTTP client cannot be constructed.
    pub fn new(config: &HttpGatewayConfig) -> Result<Self, ReportError> {
        let endpoint = config.endpoint()?;
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|error| ReportError::Configuration {
                message: format!("failed to configure report HTTP client: {error}"),
            })?;

        Ok(Self {
            client,
            endpoint,
            token: config.token.clone(),
        })
    }

    /// Returns the resolved endpoint URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ReportGateway for HttpReportGateway {
    async fn fetch_report(&self, query: &ReportQuery) -> Result<ReportResult, ReportError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            page = query.page,
            per_page = query.per_page,
            "requesting report page"
        );
        let started = Instant::now();

        let mut request = self.client.get(self.endpoint.clone()).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|error| map_transport_error("report request", &error))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| map_transport_error("report request", &error))?;

        if !status.is_success() {
            let error = map_http_error(status, extract_backend_message(&body));
            tracing::warn!(%status, %error, "report request rejected");
            return Err(error);
        }

        let envelope: ApiReportEnvelope =
            serde_json::from_str(&body).map_err(|error| ReportError::InvalidResponse {
                message: format!("report JSON decoding failed: {error}"),
            })?;
        let result = envelope.data.into_result(query.per_page)?;

        tracing::debug!(
            total_items = result.total_items(),
            rows = result.rows().len(),
            elapsed_ms = started.elapsed().as_millis(),
            "report page received"
        );
        Ok(result)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
