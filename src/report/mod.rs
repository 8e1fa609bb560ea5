//! Survey report pipeline: filters, queries, fetching, and pagination.
//!
//! Filter strings are normalised into a [`ReportQuery`], sent through a
//! [`ReportGateway`], and the validated [`ReportResult`] is held by the
//! [`ReportController`] until the next successful fetch or a reset.

pub mod controller;
pub mod error;
pub mod filters;
pub mod gateway;
pub mod models;
pub mod pagination;
pub mod query;

pub use controller::{
    FetchOutcome, FetchState, GENERATE_FAILED, PendingFetch, ReportController, SELECT_DATE_RANGE,
};
pub use error::ReportError;
pub use filters::{FilterField, FilterOption, FilterState, SortOrder, TriState};
pub use gateway::{DEFAULT_REPORT_PATH, HttpGatewayConfig, HttpReportGateway, ReportGateway};
pub use models::{Autor, ReasonOption, ReportResult, ReportRow, Socializer, SurveyStatus};
pub use pagination::{DEFAULT_VISIBLE_PAGES, PageInfo, PageSlot};
pub use query::{DEFAULT_PER_PAGE, ReportQuery};
