//! Reading documents from disk into uploads.

use crate::error::{CliError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use taxzen_domain::strategy::{MIME_CSV, MIME_MS_EXCEL, MIME_PDF, MIME_XLSM, MIME_XLSX};
use taxzen_domain::UploadedFile;

/// Content type guessed from a file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => MIME_PDF,
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        "csv" => MIME_CSV,
        "xls" => MIME_MS_EXCEL,
        "xlsx" => MIME_XLSX,
        "xlsm" => MIME_XLSM,
        "json" => "application/json",
        _ => "text/plain",
    }
}

/// Read every path, in order, into an upload.
///
/// An empty list is rejected before anything is read.
pub fn load_files(paths: &[PathBuf], content_type: Option<&str>) -> Result<Vec<UploadedFile>> {
    if paths.is_empty() {
        return Err(CliError::InvalidInput("Please select files".to_string()));
    }

    paths
        .iter()
        .map(|path| {
            let bytes = fs::read(path).map_err(|source| CliError::ReadFile {
                path: path.clone(),
                source,
            })?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let mime = content_type.unwrap_or_else(|| content_type_for(path));
            Ok(UploadedFile::new(name, mime, bytes))
        })
        .collect()
}
