//! Main TUI application model implementing the MVU pattern.
//!
//! The model owns the report controller and the view state around it: which
//! pane has focus, the row cursor, the selected filter field, and the latest
//! notification shown as a toast.
//!
//! # Module Structure
//!
//! - `model_impl`: `bubbletea_rs::Model` implementation
//! - `routing`: message dispatch by category
//! - `navigation`: row cursor movement
//! - `filter_handlers`: filter panel selection and editing
//! - `fetch_handlers`: fetches, page changes, and CSV export
//! - `rendering`: header, status bar, and help overlay

use camino::Utf8PathBuf;

use crate::notify::{Notification, NotificationLog};
use crate::report::{FilterField, ReportController, ReportRow};

use super::components::ReportTableComponent;
use super::input::InputContext;

mod fetch_handlers;
mod filter_handlers;
mod model_impl;
mod navigation;
mod rendering;
mod routing;

pub use fetch_handlers::EXPORT_FAILED;

/// Rows taken by the header, table heading, pagination bar, and status bar.
pub(crate) const CHROME_HEIGHT: usize = 5;

/// Minimum number of table rows drawn.
pub(crate) const MIN_TABLE_HEIGHT: usize = 1;

/// Which pane is shown and receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The results table.
    Table,
    /// The filter panel.
    Filters,
}

/// Main application model for the report TUI.
pub struct ReportApp {
    /// Report controller owning filters, fetch state, and the loaded page.
    pub(crate) controller: ReportController,
    /// Notifications raised by the controller and exporter.
    pub(crate) notifications: NotificationLog,
    /// Latest notification, shown in the status bar.
    pub(crate) toast: Option<Notification>,
    /// Directory that receives CSV exports.
    pub(crate) output_dir: Utf8PathBuf,
    /// Path of the last CSV written.
    pub(crate) last_export: Option<Utf8PathBuf>,
    pub(crate) focus: Focus,
    /// Index into [`FilterField::ALL`].
    pub(crate) selected_field: usize,
    /// Text being typed into the selected field.
    pub(crate) edit_buffer: Option<String>,
    pub(crate) cursor_position: usize,
    pub(crate) scroll_offset: usize,
    width: u16,
    height: u16,
    /// Whether the help overlay is visible.
    pub(crate) show_help: bool,
    table: ReportTableComponent,
}

impl ReportApp {
    /// Creates an application around `controller`.
    ///
    /// The filter panel starts open so the operator can review the date
    /// range before the first fetch.
    #[must_use]
    pub fn new(controller: ReportController, output_dir: impl Into<Utf8PathBuf>) -> Self {
        let mut app = Self {
            controller,
            notifications: NotificationLog::new(),
            toast: None,
            output_dir: output_dir.into(),
            last_export: None,
            focus: Focus::Filters,
            selected_field: 0,
            edit_buffer: None,
            cursor_position: 0,
            scroll_offset: 0,
            width: 80,
            height: 24,
            show_help: false,
            table: ReportTableComponent::new(),
        };
        app.set_visible_table_height();
        app
    }

    /// Creates an application with explicit terminal dimensions.
    #[must_use]
    pub fn with_dimensions(
        controller: ReportController,
        output_dir: impl Into<Utf8PathBuf>,
        width: u16,
        height: u16,
    ) -> Self {
        let mut app = Self::new(controller, output_dir);
        app.width = width;
        app.height = height;
        app.set_visible_table_height();
        app
    }

    /// Returns the report controller.
    #[must_use]
    pub const fn controller(&self) -> &ReportController {
        &self.controller
    }

    /// Returns the pane that has focus.
    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    /// Returns the row cursor position within the loaded page.
    #[must_use]
    pub const fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Returns the selected filter field.
    #[must_use]
    pub fn selected_field(&self) -> FilterField {
        FilterField::ALL
            .get(self.selected_field)
            .copied()
            .unwrap_or(FilterField::StartDate)
    }

    /// Returns the edit buffer while a field is being edited.
    #[must_use]
    pub fn edit_buffer(&self) -> Option<&str> {
        self.edit_buffer.as_deref()
    }

    /// Returns the notification shown in the status bar.
    #[must_use]
    pub const fn toast(&self) -> Option<&Notification> {
        self.toast.as_ref()
    }

    /// Returns the path of the last CSV written.
    #[must_use]
    pub const fn last_export(&self) -> Option<&Utf8PathBuf> {
        self.last_export.as_ref()
    }

    /// Returns the row under the cursor.
    #[must_use]
    pub fn selected_row(&self) -> Option<&ReportRow> {
        self.controller.rows().get(self.cursor_position)
    }

    /// Returns the current input context for context-aware key mapping.
    pub(crate) const fn input_context(&self) -> InputContext {
        if self.edit_buffer.is_some() {
            return InputContext::Editing;
        }
        match self.focus {
            Focus::Table => InputContext::Table,
            Focus::Filters => InputContext::Filters,
        }
    }

    /// Shows the most recent notification, if any were raised since the
    /// last call.
    pub(crate) fn refresh_toast(&mut self) {
        if let Some(latest) = self.notifications.take().pop() {
            self.toast = Some(latest);
        }
    }

    /// Rows available for the table body.
    const fn visible_body_height(&self) -> usize {
        (self.height as usize).saturating_sub(CHROME_HEIGHT)
    }

    pub(crate) const fn set_visible_table_height(&mut self) {
        let height = self.visible_body_height();
        let clamped = if height < MIN_TABLE_HEIGHT {
            MIN_TABLE_HEIGHT
        } else {
            height
        };
        self.table.set_visible_height(clamped);
    }
}

#[cfg(test)]
mod tests;
