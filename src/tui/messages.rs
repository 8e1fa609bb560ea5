//! Message types for the TUI update loop.
//!
//! Messages represent operator actions, results of asynchronous commands,
//! and terminal events.

use crate::report::{PendingFetch, ReportError, ReportResult};

/// Messages for the report TUI application.
#[derive(Debug, Clone)]
pub enum AppMsg {
    // Table navigation
    /// Move the row cursor up one row.
    CursorUp,
    /// Move the row cursor down one row.
    CursorDown,
    /// Move the row cursor to the first row.
    Home,
    /// Move the row cursor to the last row.
    End,

    // Filter panel
    /// Switch focus between the table and the filter panel.
    ToggleFilterPanel,
    /// Select the next filter field.
    NextField,
    /// Select the previous filter field.
    PreviousField,
    /// Select the next option of the selected enumerated field.
    NextOption,
    /// Select the previous option of the selected enumerated field.
    PreviousOption,
    /// Start editing the selected free-text or date field.
    StartEdit,
    /// Append a character to the edit buffer.
    EditInput(char),
    /// Delete the last character of the edit buffer.
    EditBackspace,
    /// Store the edit buffer in the selected field.
    CommitEdit,
    /// Discard the edit buffer.
    CancelEdit,
    /// Reset every filter and discard the loaded report.
    ClearFilters,

    // Report data
    /// Fetch the first page with the current filters.
    Generate,
    /// Fetch the next page.
    NextPage,
    /// Fetch the previous page.
    PreviousPage,
    /// Fetch a specific page.
    GoToPage(u32),
    /// A fetch started by the application finished.
    FetchFinished {
        /// The fetch that was started.
        pending: PendingFetch,
        /// What the gateway returned.
        outcome: Result<ReportResult, ReportError>,
    },
    /// Export the loaded page as CSV.
    ExportCsv,

    // Application lifecycle
    /// Quit the application.
    Quit,
    /// Toggle the help overlay.
    ToggleHelp,
    /// Escape was pressed outside of an edit.
    EscapePressed,
    /// Terminal window was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
    /// Synthetic startup event that triggers the first render.
    Initialized,
}

impl AppMsg {
    /// Returns true for table cursor messages.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(self, Self::CursorUp | Self::CursorDown | Self::Home | Self::End)
    }

    /// Returns true for filter panel messages.
    #[must_use]
    pub const fn is_filter(&self) -> bool {
        matches!(
            self,
            Self::ToggleFilterPanel
                | Self::NextField
                | Self::PreviousField
                | Self::NextOption
                | Self::PreviousOption
                | Self::StartEdit
                | Self::EditInput(_)
                | Self::EditBackspace
                | Self::CommitEdit
                | Self::CancelEdit
                | Self::ClearFilters
        )
    }

    /// Returns true for messages that fetch or export report data.
    #[must_use]
    pub const fn is_data(&self) -> bool {
        matches!(
            self,
            Self::Generate
                | Self::NextPage
                | Self::PreviousPage
                | Self::GoToPage(_)
                | Self::FetchFinished { .. }
                | Self::ExportCsv
        )
    }

    /// Returns true for messages that start a fetch.
    #[must_use]
    pub const fn starts_fetch(&self) -> bool {
        matches!(
            self,
            Self::Generate | Self::NextPage | Self::PreviousPage | Self::GoToPage(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::AppMsg;

    #[rstest]
    #[case::cursor(AppMsg::CursorDown, true, false, false)]
    #[case::field(AppMsg::NextField, false, true, false)]
    #[case::edit(AppMsg::EditInput('a'), false, true, false)]
    #[case::page(AppMsg::GoToPage(2), false, false, true)]
    #[case::export(AppMsg::ExportCsv, false, false, true)]
    #[case::quit(AppMsg::Quit, false, false, false)]
    fn categories_are_disjoint(
        #[case] msg: AppMsg,
        #[case] navigation: bool,
        #[case] filter: bool,
        #[case] data: bool,
    ) {
        assert_eq!(msg.is_navigation(), navigation);
        assert_eq!(msg.is_filter(), filter);
        assert_eq!(msg.is_data(), data);
    }

    #[rstest]
    fn only_page_requests_start_fetches() {
        assert!(AppMsg::NextPage.starts_fetch());
        assert!(!AppMsg::ExportCsv.starts_fetch());
    }
}
