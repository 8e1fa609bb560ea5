//! Gateways for loading report pages from the survey backend.

use async_trait::async_trait;

use super::error::ReportError;
use super::models::ReportResult;
use super::query::ReportQuery;

mod client;
mod error_mapping;
mod http_utils;

pub use client::{DEFAULT_REPORT_PATH, HttpGatewayConfig, HttpReportGateway};

/// Gateway that loads one page of a survey report.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportGateway: Send + Sync {
    /// Fetches the page described by `query`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Network`] on transport failures,
    /// [`ReportError::Authentication`] or [`ReportError::Api`] when the
    /// backend rejects the request, and [`ReportError::InvalidResponse`] when
    /// the body cannot be decoded into a valid page.
    async fn fetch_report(&self, query: &ReportQuery) -> Result<ReportResult, ReportError>;
}
