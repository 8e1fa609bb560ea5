//! `Model` trait implementation for the report TUI application.

use std::any::Any;

use bubbletea_rs::{Cmd, Model};

use super::{Focus, ReportApp};
use crate::tui::components::{
    FilterPanelComponent, FilterPanelViewContext, PaginationBarComponent,
    PaginationBarViewContext, ReportTableViewContext,
};
use crate::tui::input::map_key_to_message;
use crate::tui::messages::AppMsg;

impl ReportApp {
    /// Command that delivers [`AppMsg::Initialized`] on the first tick.
    pub(super) fn immediate_init_cmd() -> Cmd {
        Box::pin(async { Some(Box::new(AppMsg::Initialized) as Box<dyn Any + Send>) })
    }
}

impl Model for ReportApp {
    fn init() -> (Self, Option<Cmd>) {
        let model = crate::tui::get_session_context().into_app();
        (model, Some(Self::immediate_init_cmd()))
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        if let Some(app_msg) = msg.downcast_ref::<AppMsg>() {
            return self.handle_message(app_msg);
        }

        if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
            if self.show_help {
                return self.handle_message(&AppMsg::ToggleHelp);
            }
            self.toast = None;
            let mapped = map_key_to_message(key_msg, self.input_context());
            return mapped.and_then(|app_msg| self.handle_message(&app_msg));
        }

        if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
            return self.handle_message(&AppMsg::WindowResized {
                width: size_msg.width,
                height: size_msg.height,
            });
        }

        None
    }

    fn view(&self) -> String {
        if self.show_help {
            return self.normalise_viewport(&self.render_help_overlay());
        }

        let mut output = self.render_header();
        let body_height = (self.height as usize).saturating_sub(super::CHROME_HEIGHT) + 1;

        match self.focus {
            Focus::Filters => {
                let ctx = FilterPanelViewContext {
                    filters: self.controller.filters(),
                    selected: self.selected_field,
                    edit_buffer: self.edit_buffer.as_deref(),
                    max_height: body_height,
                };
                output.push_str(&FilterPanelComponent::view(&ctx));
            }
            Focus::Table => {
                let page_info = self.controller.page_info();
                let row_offset = u64::from(page_info.current_page().saturating_sub(1))
                    .saturating_mul(u64::from(page_info.per_page()));
                let ctx = ReportTableViewContext {
                    rows: self.controller.rows(),
                    row_offset,
                    cursor_position: self.cursor_position,
                    scroll_offset: self.scroll_offset,
                    visible_height: self.table.visible_height(),
                    max_width: self.width as usize,
                    is_loading: self.controller.is_loading(),
                };
                output.push_str(&self.table.view(&ctx));
                if self.controller.has_data() {
                    output.push_str(&PaginationBarComponent::view(&PaginationBarViewContext {
                        page_info: &page_info,
                        is_loading: self.controller.is_loading(),
                    }));
                }
            }
        }

        output.push_str(&self.render_status_bar());
        self.normalise_viewport(&output)
    }
}
