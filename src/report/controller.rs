//! Report fetch controller.
//!
//! Owns the filter state, the last successful [`ReportResult`], and the
//! fetch lifecycle `Idle -> Loading -> (Succeeded | Failed)`. At most one
//! fetch is outstanding: starting another while `Loading` is rejected with
//! [`ReportError::FetchInProgress`].
//!
//! A fetch can run in one call through [`ReportController::generate`], or in
//! two halves through [`ReportController::begin_generate`] and
//! [`ReportController::complete`] when the caller drives the network call
//! itself (the terminal UI runs it as an asynchronous command).

use std::sync::Arc;
use std::time::Instant;

use crate::export::{self, CsvExport};
use crate::notify::{Notifier, error_text};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

use super::error::ReportError;
use super::filters::{FilterField, FilterState};
use super::gateway::ReportGateway;
use super::models::{ReportResult, ReportRow};
use super::pagination::PageInfo;
use super::query::{DEFAULT_PER_PAGE, ReportQuery};

/// Warning raised when a report is requested without a date range.
pub const SELECT_DATE_RANGE: &str = "Por favor seleccione un rango de fechas";

/// Fallback error message for failed fetches.
pub const GENERATE_FAILED: &str = "Error al generar el reporte";

/// Lifecycle of the most recent fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    /// No fetch has run since the last reset.
    #[default]
    Idle,
    /// A fetch for `page` is outstanding.
    Loading {
        /// Requested page.
        page: u32,
    },
    /// The last fetch succeeded.
    Succeeded,
    /// The last fetch failed.
    Failed {
        /// Message shown to the operator.
        message: String,
    },
}

/// What a generate or page-change request did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page was loaded.
    Loaded {
        /// Items across all pages.
        total_items: u64,
    },
    /// The date range was missing; nothing was sent.
    ValidationFailed,
    /// Another fetch is outstanding; nothing was sent.
    Rejected,
    /// The backend or transport failed; the previous result is kept.
    Failed {
        /// The underlying failure.
        error: ReportError,
    },
    /// The request was out of range or stale; nothing changed.
    Ignored,
}

/// A fetch started by [`ReportController::begin_generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    page: u32,
    generation: u64,
    query: ReportQuery,
    started: Instant,
}

impl PendingFetch {
    /// Returns the requested page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the query to send.
    #[must_use]
    pub const fn query(&self) -> &ReportQuery {
        &self.query
    }
}

/// Orchestrates report fetches and owns their results.
pub struct ReportController {
    gateway: Arc<dyn ReportGateway>,
    telemetry: Arc<dyn TelemetrySink>,
    filters: FilterState,
    per_page: u32,
    state: FetchState,
    result: Option<ReportResult>,
    current_page: u32,
    generation: u64,
}

impl ReportController {
    /// Creates a controller with the default page size.
    #[must_use]
    pub fn new(gateway: Arc<dyn ReportGateway>, filters: FilterState) -> Self {
        Self {
            gateway,
            telemetry: Arc::new(NoopTelemetrySink),
            filters,
            per_page: DEFAULT_PER_PAGE,
            state: FetchState::Idle,
            result: None,
            current_page: 1,
            generation: 0,
        }
    }

    /// Overrides the page size for the session. Zero keeps the default.
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        if per_page > 0 {
            self.per_page = per_page;
        }
        self
    }

    /// Sets the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Returns a handle to the gateway for callers that run fetches
    /// themselves.
    #[must_use]
    pub fn gateway(&self) -> Arc<dyn ReportGateway> {
        Arc::clone(&self.gateway)
    }

    /// Returns the current filters.
    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Overwrites one filter field.
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.filters.set(field, value);
    }

    /// Counts active filters, excluding the sort direction.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        self.filters.active_count()
    }

    /// Resets every filter and discards the held result.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.reset();
    }

    /// Discards the held result and any error state.
    ///
    /// A fetch that is still outstanding is abandoned: its completion is
    /// ignored.
    pub fn reset(&mut self) {
        self.result = None;
        self.state = FetchState::Idle;
        self.current_page = 1;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Starts a fetch for `page`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::FetchInProgress`] while another fetch is
    /// outstanding and [`ReportError::MissingDateRange`] when either date is
    /// empty. Neither error changes any state.
    pub fn begin_generate(&mut self, page: u32) -> Result<PendingFetch, ReportError> {
        if let FetchState::Loading { page: in_flight } = self.state {
            return Err(ReportError::FetchInProgress { page: in_flight });
        }
        if !self.filters.has_date_range() {
            return Err(ReportError::MissingDateRange);
        }

        let query = ReportQuery::build(&self.filters, page, self.per_page);
        self.state = FetchState::Loading { page };
        self.generation = self.generation.wrapping_add(1);
        tracing::debug!(page, active_filters = self.active_filter_count(), "report fetch started");
        Ok(PendingFetch {
            page,
            generation: self.generation,
            query,
            started: Instant::now(),
        })
    }

    /// Applies the outcome of a fetch started with
    /// [`begin_generate`](Self::begin_generate).
    ///
    /// A success replaces the held result wholesale and moves to the
    /// requested page. A failure keeps the previous result. A completion
    /// that no longer matches the outstanding fetch is ignored.
    pub fn complete(
        &mut self,
        pending: PendingFetch,
        outcome: Result<ReportResult, ReportError>,
        notifier: &dyn Notifier,
    ) -> FetchOutcome {
        let is_current = pending.generation == self.generation
            && self.state == (FetchState::Loading { page: pending.page });
        if !is_current {
            tracing::debug!(page = pending.page, "discarding stale report fetch");
            return FetchOutcome::Ignored;
        }

        match outcome {
            Ok(result) => {
                let total_items = result.total_items();
                self.telemetry.record(TelemetryEvent::ReportFetched {
                    page: pending.page,
                    total_items,
                    latency_ms: u64::try_from(pending.started.elapsed().as_millis())
                        .unwrap_or(u64::MAX),
                });
                self.result = Some(result);
                self.current_page = pending.page;
                self.state = FetchState::Succeeded;
                notifier.success(&format!("Reporte generado: {total_items} registros"));
                FetchOutcome::Loaded { total_items }
            }
            Err(error) => {
                tracing::warn!(page = pending.page, %error, "report fetch failed");
                self.state = FetchState::Failed {
                    message: error_text(&error, GENERATE_FAILED),
                };
                notifier.report_error(&error, GENERATE_FAILED);
                FetchOutcome::Failed { error }
            }
        }
    }

    /// Fetches `page` and applies the result.
    ///
    /// Never returns an error: validation failures raise a warning, fetch
    /// failures raise an error notification, and both leave the held result
    /// untouched.
    pub async fn generate(&mut self, page: u32, notifier: &dyn Notifier) -> FetchOutcome {
        let pending = match self.begin_generate(page) {
            Ok(pending) => pending,
            Err(ReportError::MissingDateRange) => {
                notifier.warn(SELECT_DATE_RANGE);
                return FetchOutcome::ValidationFailed;
            }
            Err(error) => {
                tracing::debug!(%error, "report fetch rejected");
                return FetchOutcome::Rejected;
            }
        };

        let gateway = self.gateway();
        let outcome = gateway.fetch_report(pending.query()).await;
        self.complete(pending, outcome, notifier)
    }

    /// Moves to `page` by fetching it.
    ///
    /// Pages outside `1..=total_pages`, or any page when no result is held,
    /// are ignored without touching state.
    pub async fn change_page(&mut self, page: u32, notifier: &dyn Notifier) -> FetchOutcome {
        if let Err(error) = self.check_page(page) {
            tracing::debug!(%error, "ignoring page change");
            return FetchOutcome::Ignored;
        }
        self.generate(page, notifier).await
    }

    /// Returns true when `page` can be requested right now.
    #[must_use]
    pub fn can_change_page(&self, page: u32) -> bool {
        !self.is_loading() && self.check_page(page).is_ok()
    }

    fn check_page(&self, page: u32) -> Result<(), ReportError> {
        let total_pages = self.result.as_ref().map_or(0, ReportResult::total_pages);
        if (1..=total_pages).contains(&page) {
            Ok(())
        } else {
            Err(ReportError::InvalidPage { page, total_pages })
        }
    }

    /// Exports the held rows as CSV.
    ///
    /// Raises a single warning and returns `None` when no rows are held.
    #[must_use]
    pub fn export_csv(&self, notifier: &dyn Notifier) -> Option<CsvExport> {
        let (start_date, end_date) = self.filters.date_range();
        let exported = export::export_csv(self.rows(), start_date, end_date, notifier)?;
        self.telemetry.record(TelemetryEvent::CsvExported {
            rows: exported.row_count(),
            file_name: exported.file_name().to_owned(),
        });
        Some(exported)
    }

    /// Returns the fetch lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &FetchState {
        &self.state
    }

    /// Returns true while a fetch is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading { .. })
    }

    /// Returns the failure message of the last fetch, if it failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Returns the held result.
    #[must_use]
    pub const fn result(&self) -> Option<&ReportResult> {
        self.result.as_ref()
    }

    /// Returns the held rows, or an empty slice.
    #[must_use]
    pub fn rows(&self) -> &[ReportRow] {
        self.result.as_ref().map_or(&[][..], ReportResult::rows)
    }

    /// Returns true when the held result has rows.
    #[must_use]
    pub fn has_data(&self) -> bool {
        !self.rows().is_empty()
    }

    /// Returns the page of the held result (1 before any fetch).
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the session page size.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Returns pagination details for the held result.
    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        let info = PageInfo::new(self.current_page, self.per_page);
        match &self.result {
            Some(result) => info.with_totals(result.total_items(), result.total_pages()),
            None => info,
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
