//! Message routing and dispatch logic.
//!
//! Messages are dispatched by category. Focus decides a few messages up
//! front: table navigation is ignored while the filter panel is shown, and
//! Escape closes the filter panel.

use bubbletea_rs::Cmd;

use super::{Focus, ReportApp};
use crate::tui::messages::AppMsg;

impl ReportApp {
    /// Handles a message and updates state accordingly.
    ///
    /// This is the core update function. It processes every application
    /// message and returns any resulting command.
    #[doc(hidden)]
    pub fn handle_message(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if msg.is_navigation() && self.focus != Focus::Table {
            return None;
        }

        let cmd = if msg.is_navigation() {
            self.handle_navigation_msg(msg)
        } else if msg.is_filter() {
            self.handle_filter_msg(msg)
        } else if msg.is_data() {
            self.handle_data_msg(msg)
        } else {
            self.handle_lifecycle_msg(msg)
        };
        self.refresh_toast();
        cmd
    }

    /// Dispatches navigation messages to their handlers.
    fn handle_navigation_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::CursorUp => self.handle_cursor_up(),
            AppMsg::CursorDown => self.handle_cursor_down(),
            AppMsg::Home => self.handle_home(),
            AppMsg::End => self.handle_end(),
            _ => {
                // Unreachable: caller filters to navigation messages.
                None
            }
        }
    }

    /// Dispatches filter panel messages to their handlers.
    fn handle_filter_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::ToggleFilterPanel => self.handle_toggle_filter_panel(),
            AppMsg::NextField => self.handle_select_field(true),
            AppMsg::PreviousField => self.handle_select_field(false),
            AppMsg::NextOption => self.handle_cycle_option(true),
            AppMsg::PreviousOption => self.handle_cycle_option(false),
            AppMsg::StartEdit => self.handle_start_edit(),
            AppMsg::EditInput(ch) => self.handle_edit_input(*ch),
            AppMsg::EditBackspace => self.handle_edit_backspace(),
            AppMsg::CommitEdit => self.handle_commit_edit(),
            AppMsg::CancelEdit => self.handle_cancel_edit(),
            AppMsg::ClearFilters => self.handle_clear_filters(),
            _ => {
                // Unreachable: caller filters to filter messages.
                None
            }
        }
    }

    /// Dispatches fetch and export messages to their handlers.
    fn handle_data_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::Generate => self.handle_generate(),
            AppMsg::NextPage => self.handle_page_step(true),
            AppMsg::PreviousPage => self.handle_page_step(false),
            AppMsg::GoToPage(page) => self.handle_go_to_page(*page),
            AppMsg::FetchFinished { pending, outcome } => {
                self.handle_fetch_finished(pending, outcome)
            }
            AppMsg::ExportCsv => self.handle_export_csv(),
            _ => {
                // Unreachable: caller filters to data messages.
                None
            }
        }
    }

    /// Dispatches lifecycle and window messages to their handlers.
    fn handle_lifecycle_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::Quit => Some(bubbletea_rs::quit()),
            AppMsg::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            AppMsg::EscapePressed => {
                self.focus = Focus::Table;
                None
            }
            AppMsg::WindowResized { width, height } => self.handle_resize(*width, *height),
            _ => None,
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) -> Option<Cmd> {
        self.width = width;
        self.height = height;
        self.set_visible_table_height();
        self.adjust_scroll_to_cursor();
        None
    }
}
