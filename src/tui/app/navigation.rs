//! Row cursor movement within the loaded page.
//!
//! Scrolling follows the cursor so the selected row stays in the visible
//! window of the table.

use bubbletea_rs::Cmd;

use super::ReportApp;

impl ReportApp {
    fn row_count(&self) -> usize {
        self.controller.rows().len()
    }

    /// Adjusts the scroll offset so the cursor remains within the viewport.
    pub(super) const fn adjust_scroll_to_cursor(&mut self) {
        let visible_height = self.table.visible_height();
        if visible_height == 0 {
            return;
        }

        if self.cursor_position < self.scroll_offset {
            self.scroll_offset = self.cursor_position;
            return;
        }

        let viewport_end = self.scroll_offset.saturating_add(visible_height);
        if self.cursor_position >= viewport_end {
            self.scroll_offset = self
                .cursor_position
                .saturating_sub(visible_height.saturating_sub(1));
        }
    }

    /// Moves the cursor back to the first row.
    pub(super) const fn reset_cursor(&mut self) {
        self.cursor_position = 0;
        self.scroll_offset = 0;
    }

    pub(super) const fn handle_cursor_up(&mut self) -> Option<Cmd> {
        self.cursor_position = self.cursor_position.saturating_sub(1);
        self.adjust_scroll_to_cursor();
        None
    }

    pub(super) fn handle_cursor_down(&mut self) -> Option<Cmd> {
        let max_index = self.row_count().saturating_sub(1);
        self.cursor_position = self.cursor_position.saturating_add(1).min(max_index);
        self.adjust_scroll_to_cursor();
        None
    }

    pub(super) const fn handle_home(&mut self) -> Option<Cmd> {
        self.reset_cursor();
        None
    }

    pub(super) fn handle_end(&mut self) -> Option<Cmd> {
        self.cursor_position = self.row_count().saturating_sub(1);
        self.adjust_scroll_to_cursor();
        None
    }
}
