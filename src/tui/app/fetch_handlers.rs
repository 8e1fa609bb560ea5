//! Fetch, page change, and export handlers for the report TUI.
//!
//! A fetch is split across two messages. The request handler asks the
//! controller to start the fetch and returns a command that awaits the
//! gateway; the command's [`AppMsg::FetchFinished`] hands the outcome back
//! to the controller. While a fetch is outstanding every fetch trigger is
//! ignored.

use std::any::Any;

use bubbletea_rs::Cmd;

use super::{Focus, ReportApp};
use crate::export::save_csv;
use crate::notify::Notifier;
use crate::report::{FetchOutcome, PendingFetch, ReportError, ReportResult, SELECT_DATE_RANGE};
use crate::tui::messages::AppMsg;

/// Fallback error message for failed CSV writes.
pub const EXPORT_FAILED: &str = "Error al exportar el reporte";

impl ReportApp {
    /// Fetches the first page and shows the table.
    pub(super) fn handle_generate(&mut self) -> Option<Cmd> {
        let cmd = self.start_fetch(1);
        if cmd.is_some() {
            self.focus = Focus::Table;
        }
        cmd
    }

    /// Fetches the page after or before the current one.
    pub(super) fn handle_page_step(&mut self, forward: bool) -> Option<Cmd> {
        let current = self.controller.current_page();
        let page = if forward {
            current.saturating_add(1)
        } else {
            current.saturating_sub(1)
        };
        self.handle_go_to_page(page)
    }

    /// Fetches `page` when it exists and no fetch is outstanding.
    pub(super) fn handle_go_to_page(&mut self, page: u32) -> Option<Cmd> {
        if !self.controller.can_change_page(page) {
            tracing::debug!(page, "ignoring page change");
            return None;
        }
        self.start_fetch(page)
    }

    fn start_fetch(&mut self, page: u32) -> Option<Cmd> {
        let pending = match self.controller.begin_generate(page) {
            Ok(pending) => pending,
            Err(ReportError::MissingDateRange) => {
                self.notifications.warn(SELECT_DATE_RANGE);
                return None;
            }
            Err(error) => {
                tracing::debug!(%error, "report fetch rejected");
                return None;
            }
        };

        let gateway = self.controller.gateway();
        Some(Box::pin(async move {
            let outcome = gateway.fetch_report(pending.query()).await;
            Some(Box::new(AppMsg::FetchFinished { pending, outcome }) as Box<dyn Any + Send>)
        }))
    }

    /// Applies a finished fetch. A loaded page moves the cursor back to the
    /// first row.
    pub(super) fn handle_fetch_finished(
        &mut self,
        pending: &PendingFetch,
        outcome: &Result<ReportResult, ReportError>,
    ) -> Option<Cmd> {
        let applied =
            self.controller
                .complete(pending.clone(), outcome.clone(), &self.notifications);
        if matches!(applied, FetchOutcome::Loaded { .. }) {
            self.reset_cursor();
        }
        None
    }

    /// Exports the loaded page and writes it to the output directory.
    pub(super) fn handle_export_csv(&mut self) -> Option<Cmd> {
        if self.controller.is_loading() {
            return None;
        }
        let export = self.controller.export_csv(&self.notifications)?;
        match save_csv(&export, &self.output_dir) {
            Ok(path) => self.last_export = Some(path),
            Err(error) => {
                tracing::warn!(%error, "CSV export could not be written");
                self.notifications.report_error(&error, EXPORT_FAILED);
            }
        }
        None
    }
}
