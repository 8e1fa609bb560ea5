//! The CSV artifact produced for the loaded report page.

/// MIME type of the exported file.
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

/// Header row, in column order.
pub const CSV_HEADERS: [&str; 17] = [
    "N°",
    "Nombre Completo",
    "Identificación",
    "Email",
    "Teléfono",
    "Género",
    "Edad",
    "Estrato",
    "Departamento",
    "Ciudad",
    "Región",
    "Barrio",
    "Defensor Patria",
    "Estado Encuesta",
    "Dispuesto Responder",
    "Socializer",
    "Fecha Creación",
];

/// Returns `reporte_encuestas_{start}_{end}.csv`.
#[must_use]
pub fn export_file_name(start_date: &str, end_date: &str) -> String {
    format!("reporte_encuestas_{start_date}_{end_date}.csv")
}

/// A rendered CSV document ready to be saved or streamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    file_name: String,
    content: String,
    row_count: usize,
}

impl CsvExport {
    pub(super) const fn new(file_name: String, content: String, row_count: usize) -> Self {
        Self {
            file_name,
            content,
            row_count,
        }
    }

    /// Returns the suggested file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the CSV text, header first, without a trailing newline.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the number of data rows, excluding the header.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.row_count
    }

    /// Returns the MIME type of the artifact.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        CSV_MIME_TYPE
    }
}
