//! Terminal user interface for generating survey reports.
//!
//! The TUI follows the Model-View-Update (MVU) pattern of bubbletea-rs:
//!
//! - **Model**: application state in [`app::ReportApp`], which owns the
//!   [`ReportController`](crate::report::ReportController)
//! - **View**: each component's `view()` renders from a borrowed context
//! - **Update**: message-driven transitions in `update()`
//!
//! Fetches run as asynchronous commands: the model starts a fetch through
//! the controller, the command awaits the gateway, and the result comes
//! back as [`messages::AppMsg::FetchFinished`].
//!
//! # Session context
//!
//! bubbletea-rs's `Model::init()` is a static function, so the gateway and
//! starting filters are stored in module-level storage before the program
//! starts. Call [`set_session_context`] first; `ReportApp::init()` reads it.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use camino::Utf8PathBuf;

use crate::report::{
    DEFAULT_PER_PAGE, FilterState, ReportController, ReportError, ReportGateway, ReportQuery,
    ReportResult,
};
use crate::telemetry::{NoopTelemetrySink, TelemetrySink};

pub mod app;
pub mod components;
pub mod input;
pub mod messages;

pub use app::ReportApp;

/// Global storage for the session the TUI starts with.
static SESSION_CONTEXT: OnceLock<SessionContext> = OnceLock::new();

/// Everything the TUI needs to build its report controller.
#[derive(Clone)]
pub struct SessionContext {
    gateway: Arc<dyn ReportGateway>,
    telemetry: Arc<dyn TelemetrySink>,
    filters: FilterState,
    per_page: u32,
    output_dir: Utf8PathBuf,
}

impl SessionContext {
    /// Creates a context with the default page size that exports to the
    /// current directory.
    #[must_use]
    pub fn new(gateway: Arc<dyn ReportGateway>, filters: FilterState) -> Self {
        Self {
            gateway,
            telemetry: Arc::new(NoopTelemetrySink),
            filters,
            per_page: DEFAULT_PER_PAGE,
            output_dir: Utf8PathBuf::from("."),
        }
    }

    /// Sets the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Sets the session page size.
    #[must_use]
    pub const fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Sets the directory that receives CSV exports.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<Utf8PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Builds the application model for this session.
    #[must_use]
    pub fn into_app(self) -> ReportApp {
        let controller = ReportController::new(self.gateway, self.filters)
            .with_per_page(self.per_page)
            .with_telemetry(self.telemetry);
        ReportApp::new(controller, self.output_dir)
    }
}

/// Sets the session context for the TUI application.
///
/// This must be called before starting the bubbletea-rs program.
///
/// # Returns
///
/// `true` if the context was set, `false` if it was already set.
pub fn set_session_context(context: SessionContext) -> bool {
    SESSION_CONTEXT.set(context).is_ok()
}

/// Returns the stored session context, or a disconnected session that
/// reports a configuration error on every fetch.
pub(crate) fn get_session_context() -> SessionContext {
    SESSION_CONTEXT.get().cloned().unwrap_or_else(|| {
        SessionContext::new(Arc::new(DisconnectedGateway), FilterState::default())
    })
}

/// Gateway used when the TUI starts without a session context.
struct DisconnectedGateway;

#[async_trait]
impl ReportGateway for DisconnectedGateway {
    async fn fetch_report(&self, _query: &ReportQuery) -> Result<ReportResult, ReportError> {
        Err(ReportError::Configuration {
            message: "report session not configured".to_owned(),
        })
    }
}
