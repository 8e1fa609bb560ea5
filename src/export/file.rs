//! Saving CSV exports to disk.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::report::ReportError;

use super::model::CsvExport;

/// Writes `export` into `directory` under its own file name.
///
/// The directory is created when missing. An existing file with the same
/// name is replaced.
///
/// # Errors
///
/// Returns [`ReportError::Io`] when the directory cannot be created or the
/// file cannot be written.
pub fn save_csv(export: &CsvExport, directory: &Utf8Path) -> Result<Utf8PathBuf, ReportError> {
    let target_dir = open_or_create_dir(directory)?;
    let path = directory.join(export.file_name());

    let mut file = target_dir
        .create(export.file_name())
        .map_err(|error| ReportError::Io {
            message: format!("failed to create CSV file '{path}': {error}"),
        })?;
    file.write_all(export.content().as_bytes())
        .and_then(|()| file.flush())
        .map_err(|error| ReportError::Io {
            message: format!("failed to write CSV file '{path}': {error}"),
        })?;

    tracing::debug!(%path, rows = export.row_count(), "saved CSV export");
    Ok(path)
}

fn open_or_create_dir(directory: &Utf8Path) -> Result<Dir, ReportError> {
    let (root, relative) = if directory.is_absolute() {
        let root = Dir::open_ambient_dir("/", ambient_authority()).map_err(|error| {
            ReportError::Io {
                message: format!("failed to open root directory for exports: {error}"),
            }
        })?;
        let relative = directory
            .strip_prefix("/")
            .map_err(|_| ReportError::Io {
                message: format!("failed to normalise export directory '{directory}'"),
            })?;
        (root, relative)
    } else {
        let cwd = Dir::open_ambient_dir(".", ambient_authority()).map_err(|error| {
            ReportError::Io {
                message: format!("failed to open current directory for exports: {error}"),
            }
        })?;
        (cwd, directory)
    };

    if relative.as_str().is_empty() || relative == Utf8Path::new(".") {
        return Ok(root);
    }

    root.create_dir_all(relative)
        .map_err(|error| ReportError::Io {
            message: format!("failed to create export directory '{directory}': {error}"),
        })?;
    root.open_dir(relative).map_err(|error| ReportError::Io {
        message: format!("failed to open export directory '{directory}': {error}"),
    })
}
