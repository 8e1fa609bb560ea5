//! Results table for the loaded report page.
//!
//! Columns are dropped by priority when the terminal is too narrow to show
//! all of them; the remaining columns keep their display order.

use crate::export::csv::format_created_at;
use crate::report::{ReportRow, SurveyStatus};

use super::text_fit::{fit_to_width, right_align};

/// Default visible height for the table body.
const DEFAULT_VISIBLE_HEIGHT: usize = 20;

/// Cell text for absent optional values.
pub const MISSING_CELL: &str = "—";

/// Title shown while a fetch is outstanding.
pub const LOADING_TEXT: &str = "Generando reporte...";

/// Title shown when there are no rows.
pub const EMPTY_TITLE: &str = "Configure sus filtros";

/// Hint shown below [`EMPTY_TITLE`].
pub const EMPTY_HINT: &str =
    "Seleccione un rango de fechas y presione r para generar el reporte.";

const COLUMN_GAP: &str = " ";

/// Context for rendering the report table.
#[derive(Debug, Clone)]
pub struct ReportTableViewContext<'a> {
    /// Rows of the loaded page.
    pub rows: &'a [ReportRow],
    /// Number of items before this page, used for the `#` column.
    pub row_offset: u64,
    /// Cursor position within `rows`.
    pub cursor_position: usize,
    /// First row drawn.
    pub scroll_offset: usize,
    /// Rows available for the table body.
    pub visible_height: usize,
    /// Terminal width in columns.
    pub max_width: usize,
    /// True while a fetch is outstanding.
    pub is_loading: bool,
}

struct Column {
    label: &'static str,
    width: usize,
    priority: u8,
    right_aligned: bool,
    cell: fn(&ReportRow, u64) -> String,
}

const fn column(
    label: &'static str,
    width: usize,
    priority: u8,
    cell: fn(&ReportRow, u64) -> String,
) -> Column {
    Column {
        label,
        width,
        priority,
        right_aligned: false,
        cell,
    }
}

fn or_missing(value: Option<&str>) -> String {
    value
        .filter(|text| !text.is_empty())
        .unwrap_or(MISSING_CELL)
        .to_owned()
}

fn yes_no(flag: bool) -> String {
    if flag { "Sí" } else { "No" }.to_owned()
}

fn status_badge(status: SurveyStatus) -> String {
    match status {
        SurveyStatus::Successful => format!("✓ {}", status.label()),
        SurveyStatus::Unsuccessful => format!("✗ {}", status.label()),
    }
}

static COLUMNS: [Column; 12] = [
    Column {
        right_aligned: true,
        ..column("#", 5, 0, |_, number| number.to_string())
    },
    column("Nombre", 22, 0, |row, _| row.full_name.clone()),
    column("Identificación", 14, 1, |row, _| {
        or_missing(row.identification.as_deref())
    }),
    column("Género", 9, 5, |row, _| or_missing(row.gender.as_deref())),
    column("Edad", 6, 6, |row, _| or_missing(row.age_range.as_deref())),
    column("Estrato", 7, 7, |row, _| {
        row.stratum
            .map_or_else(|| MISSING_CELL.to_owned(), |stratum| stratum.to_string())
    }),
    column("Ubicación", 22, 3, |row, _| row.location_summary()),
    column("Estado", 13, 2, |row, _| status_badge(row.survey_status)),
    column("Respuesta", 9, 8, |row, _| yes_no(row.willing_to_respond)),
    column("Defensor", 8, 9, |row, _| {
        if row.is_patria_defender {
            "★ Sí".to_owned()
        } else {
            MISSING_CELL.to_owned()
        }
    }),
    column("Socializador", 18, 4, |row, _| or_missing(row.socializer_name())),
    column("Fecha", 23, 2, |row, _| format_created_at(row.created_at)),
];

/// Component for displaying one page of report rows.
#[derive(Debug, Clone)]
pub struct ReportTableComponent {
    visible_height: usize,
}

impl Default for ReportTableComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportTableComponent {
    /// Creates a new table component.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            visible_height: DEFAULT_VISIBLE_HEIGHT,
        }
    }

    /// Updates the visible height for scrolling calculations.
    pub const fn set_visible_height(&mut self, height: usize) {
        self.visible_height = height;
    }

    /// Returns the visible height.
    #[must_use]
    pub const fn visible_height(&self) -> usize {
        self.visible_height
    }

    /// Renders the header line and the visible window of rows.
    #[must_use]
    pub fn view(&self, ctx: &ReportTableViewContext<'_>) -> String {
        if ctx.is_loading {
            return format!("\n  {LOADING_TEXT}\n");
        }
        if ctx.rows.is_empty() {
            return format!("\n  {EMPTY_TITLE}\n  {EMPTY_HINT}\n");
        }

        let columns = visible_columns(ctx.max_width);
        let visible_height = if ctx.visible_height > 0 {
            ctx.visible_height
        } else {
            self.visible_height
        };

        let mut output = render_line(&columns, "  ", |col| col.label.to_owned());
        for (index, row) in ctx
            .rows
            .iter()
            .enumerate()
            .skip(ctx.scroll_offset)
            .take(visible_height)
        {
            let prefix = if index == ctx.cursor_position { "> " } else { "  " };
            let number = ctx
                .row_offset
                .saturating_add(u64::try_from(index).unwrap_or(u64::MAX))
                .saturating_add(1);
            output.push_str(&render_line(&columns, prefix, |col| (col.cell)(row, number)));
        }
        output
    }
}

fn render_line<F>(columns: &[&Column], prefix: &str, text: F) -> String
where
    F: Fn(&Column) -> String,
{
    let cells: Vec<String> = columns
        .iter()
        .map(|col| {
            let value = text(col);
            if col.right_aligned {
                right_align(&value, col.width)
            } else {
                fit_to_width(&value, col.width)
            }
        })
        .collect();
    let mut line = format!("{prefix}{}", cells.join(COLUMN_GAP));
    line.truncate(line.trim_end().len());
    line.push('\n');
    line
}

/// Selects the columns that fit in `max_width`, keeping display order.
fn visible_columns(max_width: usize) -> Vec<&'static Column> {
    let mut by_priority: Vec<&'static Column> = COLUMNS.iter().collect();
    by_priority.sort_by_key(|col| col.priority);

    let mut budget = max_width.saturating_sub(2);
    let mut chosen: Vec<&'static str> = Vec::new();
    for col in by_priority {
        let needed = col.width + if chosen.is_empty() { 0 } else { COLUMN_GAP.len() };
        if needed > budget && col.priority > 0 {
            continue;
        }
        budget = budget.saturating_sub(needed);
        chosen.push(col.label);
    }

    COLUMNS
        .iter()
        .filter(|col| chosen.contains(&col.label))
        .collect()
}
