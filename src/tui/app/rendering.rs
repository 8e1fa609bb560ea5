//! Rendering logic for the report TUI application.
//!
//! These are pure query methods that read state without modification.

use unicode_width::UnicodeWidthChar;

use super::{Focus, ReportApp};
use crate::notify::NotificationLevel;

/// Title shown in the header.
pub(crate) const TITLE: &str = "Reportes - Generar Reporte Tabular";

impl ReportApp {
    /// Renders the two header lines: title and result summary.
    pub(super) fn render_header(&self) -> String {
        let loading = if self.controller.is_loading() {
            " [Generando...]"
        } else {
            ""
        };
        format!("{TITLE}{loading}\n{}\n", self.render_summary())
    }

    fn render_summary(&self) -> String {
        let active = self.controller.active_filter_count();
        let filters_badge = if active > 0 {
            format!("Filtros: {active}")
        } else {
            "Filtros".to_owned()
        };

        let Some(result) = self.controller.result().filter(|_| self.controller.has_data()) else {
            return format!("Reporte de Encuestas  {filters_badge}");
        };

        let total = result.total_items();
        let noun = if total == 1 { "registro" } else { "registros" };
        let (start_date, end_date) = self.controller.filters().date_range();
        let dates = if start_date.is_empty() || end_date.is_empty() {
            String::new()
        } else {
            format!("  {start_date} → {end_date}")
        };
        format!(
            "Resultados del Reporte  {total} {noun}  Pág. {}/{}{dates}  {filters_badge}",
            self.controller.current_page(),
            result.total_pages()
        )
    }

    /// Renders the status bar: the latest notification, an edit prompt, or
    /// key hints.
    pub(super) fn render_status_bar(&self) -> String {
        if let Some(toast) = &self.toast {
            let marker = match toast.level {
                NotificationLevel::Warning => "⚠",
                NotificationLevel::Success => "✓",
                NotificationLevel::Error => "✗",
            };
            return format!("{marker} {}\n", toast.message);
        }

        if self.edit_buffer.is_some() {
            return "Editando: Enter:guardar  Esc:cancelar\n".to_owned();
        }

        let hints = match self.focus {
            Focus::Filters => "j/k:campo  h/l:opción  Enter:editar  r:generar  c:limpiar  Tab:tabla  q:salir",
            Focus::Table => "n/p:página  e:exportar  r:generar  f:filtros  ?:ayuda  q:salir",
        };
        format!("{hints}\n")
    }

    /// Renders the help overlay.
    pub(super) fn render_help_overlay(&self) -> String {
        if !self.show_help {
            return String::new();
        }

        let help_text = r"
=== Atajos de teclado ===

Tabla:
  j, Abajo        Fila siguiente
  k, Arriba       Fila anterior
  g, Inicio       Primera fila
  G, Fin          Última fila
  n, Derecha      Página siguiente
  p, Izquierda    Página anterior
  1-9             Ir a la página
  e               Exportar CSV

Filtros:
  j, k            Cambiar de campo
  h, l            Cambiar de opción
  Enter           Editar fecha o texto
  Esc             Volver a la tabla

General:
  r               Generar reporte
  c               Limpiar filtros
  Tab, f          Mostrar u ocultar filtros
  ?               Mostrar esta ayuda
  q               Salir

Presione cualquier tecla para cerrar la ayuda.
";
        help_text.to_owned()
    }

    /// Normalises the rendered frame to terminal dimensions.
    ///
    /// Rows are clamped to one column less than the terminal width to avoid
    /// autowrap, and padded with spaces to clear stale cells after a resize.
    pub(super) fn normalise_viewport(&self, output: &str) -> String {
        let width = self.width.max(1) as usize;
        let safe_width = width.saturating_sub(1).max(1);
        let height = self.height.max(1) as usize;

        let mut lines: Vec<String> = output
            .lines()
            .map(|line| pad_or_truncate_line(line, safe_width))
            .collect();
        lines.truncate(height);

        let missing = height.saturating_sub(lines.len());
        let blank = " ".repeat(safe_width);
        lines.extend(std::iter::repeat_with(|| blank.clone()).take(missing));

        let mut normalised = lines.join("\n");
        normalised.push('\n');
        normalised
    }
}

fn pad_or_truncate_line(line: &str, width: usize) -> String {
    let mut output = String::new();
    let mut visible_width = 0usize;

    for ch in line.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if visible_width.saturating_add(char_width) > width {
            break;
        }
        output.push(ch);
        visible_width = visible_width.saturating_add(char_width);
    }

    if visible_width < width {
        output.push_str(&" ".repeat(width - visible_width));
    }
    output
}
