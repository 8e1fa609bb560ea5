//! Pagination controls shown below the results table.

use crate::report::{DEFAULT_VISIBLE_PAGES, PageInfo, PageSlot};

const PREVIOUS: &str = "← Anterior";
const NEXT: &str = "Siguiente →";

/// Context for rendering the pagination bar.
#[derive(Debug, Clone)]
pub struct PaginationBarViewContext<'a> {
    /// Pagination details of the loaded page.
    pub page_info: &'a PageInfo,
    /// True while a fetch is outstanding; both buttons are disabled.
    pub is_loading: bool,
}

/// Component for rendering page navigation.
pub struct PaginationBarComponent;

impl PaginationBarComponent {
    /// Renders `← Anterior  1 [2] 3 … 9  Siguiente →  Mostrando a-b de n`.
    ///
    /// Disabled buttons are replaced by blank space so the layout does not
    /// shift. Returns an empty string when there is nothing to page through.
    #[must_use]
    pub fn view(ctx: &PaginationBarViewContext<'_>) -> String {
        let info = ctx.page_info;
        if info.total_items() == 0 {
            return String::new();
        }

        let previous = button(PREVIOUS, info.has_prev() && !ctx.is_loading);
        let next = button(NEXT, info.has_next() && !ctx.is_loading);
        let slots = render_slots(&info.visible_pages(DEFAULT_VISIBLE_PAGES), info.current_page());

        format!(
            "{previous}  {slots}  {next}  Página {} de {}  Mostrando {}-{} de {}\n",
            info.current_page(),
            info.total_pages(),
            info.first_item_index(),
            info.last_item_index(),
            info.total_items()
        )
    }
}

fn button(label: &str, enabled: bool) -> String {
    if enabled {
        label.to_owned()
    } else {
        " ".repeat(label.chars().count())
    }
}

fn render_slots(slots: &[PageSlot], current_page: u32) -> String {
    slots
        .iter()
        .map(|slot| match slot {
            PageSlot::Page(page) if *page == current_page => format!("[{page}]"),
            PageSlot::Page(page) => page.to_string(),
            PageSlot::Ellipsis => "…".to_owned(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
