use std::path::Path;

use bytes::Bytes;

use crate::errors::{Result, WizardError};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DOC_MIME: &str = "application/msword";

/// MIME types the extractor accepts, with the label shown to the user.
pub const ACCEPTED_TYPES: [(&str, &str); 3] =
    [(PDF_MIME, "PDF"), (DOCX_MIME, "DOCX"), (DOC_MIME, "DOC")];

/// A resume file picked by the user, held fully in memory.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, inferring its MIME type from the extension.
    /// Unknown extensions get `application/octet-stream` and fail validation later.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        Ok(Self::new(file_name, content_type_for_path(path), bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

pub fn content_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => PDF_MIME,
        Some("docx") => DOCX_MIME,
        Some("doc") => DOC_MIME,
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Rejects files the backend would refuse, before anything touches the network.
pub fn validate_upload(file: &UploadFile, max_bytes: u64) -> Result<()> {
    let mime = file
        .content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if !ACCEPTED_TYPES.iter().any(|(accepted, _)| *accepted == mime) {
        return Err(WizardError::InvalidFileType {
            found: file.content_type.clone(),
            allowed: accepted_labels(),
        });
    }
    if file.bytes.is_empty() {
        return Err(WizardError::EmptyFile);
    }
    if file.size() > max_bytes {
        return Err(WizardError::FileTooLarge {
            size: file.size(),
            limit_bytes: max_bytes,
            limit: format_file_size(max_bytes),
        });
    }
    Ok(())
}

fn accepted_labels() -> String {
    ACCEPTED_TYPES
        .iter()
        .map(|(_, label)| *label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-readable size, e.g. `1.5 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    let rounded = (size * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}
