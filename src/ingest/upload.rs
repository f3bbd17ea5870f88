//! Upload batches
//!
//! Text-like files go through [`extract_lines`]. Anything else (PDF
//! statements, images) is not parsed at all and contributes one placeholder
//! record so the user can still see that the file arrived.

use std::path::Path;

use crate::error::{TallyError, TallyResult};

use super::lines::extract_lines;

/// A file handed to the ingester
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    /// MIME type, if known
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content_type: Option<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type,
            content,
        }
    }

    /// Read a file from disk, guessing its content type from the extension
    pub fn from_path(path: &Path) -> TallyResult<Self> {
        let content = std::fs::read(path).map_err(|e| {
            TallyError::Import(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            content_type: content_type_for(&name).map(str::to_string),
            name,
            content,
        })
    }

    /// Should this file be parsed as text?
    pub fn is_text(&self) -> bool {
        if self.name.to_lowercase().ends_with(".csv") {
            return true;
        }
        match self.content_type.as_deref() {
            Some(mime) => mime == "text/csv" || mime.starts_with("text/"),
            None => false,
        }
    }
}

fn content_type_for(name: &str) -> Option<&'static str> {
    let extension = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "csv" => Some("text/csv"),
        "txt" => Some("text/plain"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

/// One record produced by an upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRecord {
    pub raw: String,
    /// Stand-in for a file that could not be parsed
    pub placeholder: bool,
}

impl UploadRecord {
    fn line(raw: String) -> Self {
        Self {
            raw,
            placeholder: false,
        }
    }

    fn placeholder_for(file_name: &str) -> Self {
        Self {
            raw: format!("[{}] PDF/unsupported (demo)", file_name),
            placeholder: true,
        }
    }
}

/// Records for a single file
pub fn ingest_file(file: &UploadedFile) -> Vec<UploadRecord> {
    if !file.is_text() {
        tracing::debug!(file = %file.name, "unsupported upload, adding placeholder");
        return vec![UploadRecord::placeholder_for(&file.name)];
    }

    let decoded = String::from_utf8_lossy(&file.content);
    // Spreadsheet exports often lead with a byte-order mark
    let text = decoded.strip_prefix('\u{FEFF}').unwrap_or(decoded.as_ref());
    let records: Vec<UploadRecord> = extract_lines(text)
        .into_iter()
        .map(UploadRecord::line)
        .collect();
    tracing::debug!(file = %file.name, records = records.len(), "parsed upload");
    records
}

/// Records for a whole batch, in file order
///
/// The batch is only returned once every file has been processed.
pub fn ingest_batch(files: &[UploadedFile]) -> Vec<UploadRecord> {
    files.iter().flat_map(ingest_file).collect()
}
