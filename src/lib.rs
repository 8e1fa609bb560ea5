//! Reportero library crate for generating survey reports.
//!
//! The library fetches paginated survey reports from the survey backend,
//! holds the operator's filter selection, exports the loaded page as CSV,
//! and drives an interactive terminal UI over the same report controller.
//!
//! The pipeline runs filters through a [`ReportQuery`] to a
//! [`ReportGateway`], and the [`ReportController`] applies each result and
//! raises notifications for the operator.

pub mod config;
pub mod export;
pub mod notify;
pub mod report;
pub mod telemetry;
pub mod tui;

pub use config::{OperationMode, ReporteroConfig};
pub use export::{CsvExport, save_csv};
pub use notify::{Notification, NotificationLevel, NotificationLog, Notifier, TracingNotifier};
pub use report::{
    FetchOutcome, FilterField, FilterState, HttpGatewayConfig, HttpReportGateway, PageInfo,
    ReportController, ReportError, ReportGateway, ReportQuery, ReportResult, ReportRow,
};
