//! Filter panel listing every report filter with its current value.

use crate::report::{FilterField, FilterState};

use super::text_fit::fit_to_width;

const LABEL_WIDTH: usize = 24;

/// Context for rendering the filter panel.
#[derive(Debug, Clone)]
pub struct FilterPanelViewContext<'a> {
    /// Current filter values.
    pub filters: &'a FilterState,
    /// Index into [`FilterField::ALL`] of the selected field.
    pub selected: usize,
    /// Text being typed into the selected field, if editing.
    pub edit_buffer: Option<&'a str>,
    /// Rows available for the panel.
    pub max_height: usize,
}

/// Component for displaying and editing report filters.
pub struct FilterPanelComponent;

impl FilterPanelComponent {
    /// Renders the panel title and one line per filter field.
    ///
    /// When the panel is shorter than the field list, the window scrolls so
    /// the selected field stays visible.
    #[must_use]
    pub fn view(ctx: &FilterPanelViewContext<'_>) -> String {
        let active = ctx.filters.active_count();
        let mut output = if active > 0 {
            format!("Filtros de Reporte ({active} activos)\n")
        } else {
            "Filtros de Reporte\n".to_owned()
        };

        let rows = ctx.max_height.saturating_sub(1).max(1);
        let first = ctx.selected.saturating_sub(rows.saturating_sub(1));
        for (index, field) in FilterField::ALL.iter().enumerate().skip(first).take(rows) {
            let is_selected = index == ctx.selected;
            let prefix = if is_selected { ">" } else { " " };
            let value = match ctx.edit_buffer {
                Some(buffer) if is_selected => format!("{buffer}_"),
                _ => display_value(*field, ctx.filters.get(*field), is_selected),
            };
            output.push_str(&format!(
                "{prefix} {} {value}\n",
                fit_to_width(field.label(), LABEL_WIDTH)
            ));
        }
        output
    }
}

/// Returns the text shown for a field's value.
///
/// Enumerated fields show the option label; the selected one is wrapped in
/// arrows to hint that left and right change it.
fn display_value(field: FilterField, value: &str, is_selected: bool) -> String {
    let options = field.options();
    if options.is_empty() {
        return if value.is_empty() {
            "·".to_owned()
        } else {
            value.to_owned()
        };
    }

    let label = options
        .iter()
        .find(|option| option.value == value)
        .map_or(value, |option| option.label);
    if is_selected {
        format!("‹ {label} ›")
    } else {
        label.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn filters() -> FilterState {
        let mut filters = FilterState::with_date_range("2024-01-01", "2024-01-31");
        filters.set(FilterField::SurveyStatus, "successful");
        filters
    }

    fn context(filters: &FilterState, selected: usize) -> FilterPanelViewContext<'_> {
        FilterPanelViewContext {
            filters,
            selected,
            edit_buffer: None,
            max_height: 40,
        }
    }

    #[rstest]
    fn shows_every_field_with_active_count(filters: FilterState) {
        let output = FilterPanelComponent::view(&context(&filters, 0));

        assert!(output.starts_with("Filtros de Reporte (3 activos)"));
        assert_eq!(output.lines().count(), FilterField::ALL.len() + 1);
        assert!(output.contains("Desde"));
        assert!(output.contains("2024-01-31"));
    }

    #[rstest]
    fn enumerated_values_show_option_labels(filters: FilterState) {
        let output = FilterPanelComponent::view(&context(&filters, 0));

        assert!(output.contains("✓ Exitosas"));
        assert!(output.contains("Ascendente"));
    }

    #[rstest]
    fn selected_enumerated_field_has_arrows(filters: FilterState) {
        let index = FilterField::ALL
            .iter()
            .position(|field| *field == FilterField::SurveyStatus)
            .unwrap_or_default();

        let output = FilterPanelComponent::view(&context(&filters, index));

        assert!(output.contains("‹ ✓ Exitosas ›"));
    }

    #[rstest]
    fn edit_buffer_replaces_selected_value(filters: FilterState) {
        let ctx = FilterPanelViewContext {
            edit_buffer: Some("2024-02"),
            ..context(&filters, 0)
        };

        let output = FilterPanelComponent::view(&ctx);

        assert!(output.contains("2024-02_"));
        assert!(!output.contains("2024-01-01"));
    }

    #[rstest]
    fn short_panel_scrolls_to_selection(filters: FilterState) {
        let last = FilterField::ALL.len() - 1;
        let ctx = FilterPanelViewContext {
            max_height: 5,
            ..context(&filters, last)
        };

        let output = FilterPanelComponent::view(&ctx);

        assert_eq!(output.lines().count(), 5);
        assert!(output.lines().last().is_some_and(|line| line.starts_with('>')));
        assert!(!output.contains("Desde"));
    }
}
