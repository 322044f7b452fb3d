//! File type detection

use std::path::Path;

/// Extensions accepted for a resume
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];

/// Extensions accepted for a job description file
pub const JOB_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
    }

    /// Job descriptions are pasted text, never PDFs
    pub fn allowed_for_job(self) -> bool {
        matches!(self, FileType::Text | FileType::Markdown)
    }
}
