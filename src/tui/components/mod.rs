//! UI components for the report TUI.
//!
//! Each component renders from a view context borrowed from the
//! application model and returns the text to draw.

mod filter_panel;
mod pagination_bar;
mod report_table;
mod text_fit;

pub use filter_panel::{FilterPanelComponent, FilterPanelViewContext};
pub use pagination_bar::{PaginationBarComponent, PaginationBarViewContext};
pub use report_table::{
    EMPTY_HINT, EMPTY_TITLE, LOADING_TEXT, MISSING_CELL, ReportTableComponent,
    ReportTableViewContext,
};
