//! Filter panel handlers.
//!
//! Enumerated fields are changed by cycling through their options. Dates
//! and free-text fields are edited in a buffer that is stored on Enter and
//! discarded on Escape.

use bubbletea_rs::Cmd;
use chrono::NaiveDate;

use super::{Focus, ReportApp};
use crate::config::DATE_FORMAT;
use crate::notify::Notifier;
use crate::report::FilterField;

/// Warning raised when a date field is stored with an invalid value.
pub const INVALID_DATE: &str = "Fecha inválida, use el formato AAAA-MM-DD";

const LAST_FIELD: usize = FilterField::ALL.len() - 1;

impl ReportApp {
    pub(super) fn handle_toggle_filter_panel(&mut self) -> Option<Cmd> {
        self.edit_buffer = None;
        self.focus = match self.focus {
            Focus::Table => Focus::Filters,
            Focus::Filters => Focus::Table,
        };
        None
    }

    pub(super) const fn handle_select_field(&mut self, forward: bool) -> Option<Cmd> {
        self.selected_field = if forward {
            if self.selected_field >= LAST_FIELD {
                0
            } else {
                self.selected_field + 1
            }
        } else if self.selected_field == 0 {
            LAST_FIELD
        } else {
            self.selected_field - 1
        };
        None
    }

    /// Moves an enumerated field to its next or previous option, wrapping at
    /// either end. Values not in the option list restart from the first one.
    pub(super) fn handle_cycle_option(&mut self, forward: bool) -> Option<Cmd> {
        let field = self.selected_field();
        let options = field.options();
        let last = options.len().checked_sub(1)?;

        let current = self.controller.filters().get(field);
        let next = match options.iter().position(|option| option.value == current) {
            Some(index) if forward && index < last => index + 1,
            Some(_) if forward => 0,
            Some(0) | None if !forward => last,
            Some(index) if !forward => index - 1,
            _ => 0,
        };
        if let Some(option) = options.get(next) {
            self.controller.set_filter(field, option.value);
        }
        None
    }

    /// Opens the edit buffer for dates and free-text fields.
    pub(super) fn handle_start_edit(&mut self) -> Option<Cmd> {
        let field = self.selected_field();
        if field.options().is_empty() {
            self.edit_buffer = Some(self.controller.filters().get(field).to_owned());
        }
        None
    }

    pub(super) fn handle_edit_input(&mut self, ch: char) -> Option<Cmd> {
        if let Some(buffer) = self.edit_buffer.as_mut() {
            buffer.push(ch);
        }
        None
    }

    pub(super) fn handle_edit_backspace(&mut self) -> Option<Cmd> {
        if let Some(buffer) = self.edit_buffer.as_mut() {
            buffer.pop();
        }
        None
    }

    /// Stores the edit buffer in the selected field.
    ///
    /// Date fields accept an empty value or a `YYYY-MM-DD` date. Anything
    /// else raises a warning and keeps the buffer open.
    pub(super) fn handle_commit_edit(&mut self) -> Option<Cmd> {
        let buffer = self.edit_buffer.take()?;
        let field = self.selected_field();
        let value = buffer.trim();

        if field.is_date()
            && !value.is_empty()
            && NaiveDate::parse_from_str(value, DATE_FORMAT).is_err()
        {
            self.notifications.warn(INVALID_DATE);
            self.edit_buffer = Some(buffer);
            return None;
        }

        self.controller.set_filter(field, value);
        None
    }

    pub(super) fn handle_cancel_edit(&mut self) -> Option<Cmd> {
        self.edit_buffer = None;
        None
    }

    /// Resets every filter and discards the loaded report.
    pub(super) fn handle_clear_filters(&mut self) -> Option<Cmd> {
        self.controller.clear_filters();
        self.edit_buffer = None;
        self.reset_cursor();
        None
    }
}
