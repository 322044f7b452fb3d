//! Document ingestor: resume and job description text for one analysis run

use crate::error::{CareerForgeError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use unicode_segmentation::UnicodeSegmentation;

/// Plain text pulled out of a document
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub source: String,
    pub file_type: FileType,
}

impl ExtractedText {
    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }
}

pub fn word_count(text: &str) -> usize {
    text.unicode_words().count()
}

/// Extracts text from resume and job description files.
/// Repeated reads of the same path within a session are served from memory.
pub struct DocumentIngestor {
    cache: HashMap<PathBuf, ExtractedText>,
}

impl Default for DocumentIngestor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentIngestor {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Extract the resume text (PDF, TXT or MD)
    pub async fn extract_resume(&mut self, path: &Path) -> Result<ExtractedText> {
        let extracted = self.extract(path).await?;
        if extracted.text.trim().is_empty() {
            return Err(CareerForgeError::MissingInput(format!(
                "no text could be extracted from resume {}",
                path.display()
            )));
        }
        Ok(extracted)
    }

    /// Load the job description from a file or from inline text
    pub async fn load_job_description(&mut self, path: Option<&Path>, inline: Option<&str>) -> Result<String> {
        let text = match (path, inline) {
            (Some(path), _) => {
                let file_type = FileType::from_path(path).unwrap_or(FileType::Unknown);
                if !file_type.allowed_for_job() {
                    return Err(CareerForgeError::UnsupportedFormat(format!(
                        "job description must be a .txt or .md file: {}",
                        path.display()
                    )));
                }
                self.extract(path).await?.text
            }
            (None, Some(inline)) => inline.to_string(),
            (None, None) => String::new(),
        };

        if text.trim().is_empty() {
            return Err(CareerForgeError::MissingInput("job description is empty".to_string()));
        }
        Ok(text)
    }

    pub async fn extract(&mut self, path: &Path) -> Result<ExtractedText> {
        if let Some(cached) = self.cache.get(path) {
            debug!("Using cached text for: {}", path.display());
            return Ok(cached.clone());
        }

        if !path.exists() {
            return Err(CareerForgeError::MissingInput(format!(
                "file does not exist: {}",
                path.display()
            )));
        }

        let file_type = FileType::from_path(path).ok_or_else(|| {
            CareerForgeError::InvalidInput(format!("File has no extension: {}", path.display()))
        })?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(CareerForgeError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        let extracted = ExtractedText {
            text,
            source: path.display().to_string(),
            file_type,
        };

        self.cache.insert(path.to_path_buf(), extracted.clone());

        Ok(extracted)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("I know Python and SQL"), 5);
        assert_eq!(word_count("  "), 0);
    }

    #[tokio::test]
    async fn test_missing_job_description() {
        let mut ingestor = DocumentIngestor::new();
        let err = ingestor.load_job_description(None, Some("   ")).await.unwrap_err();
        assert!(err.is_missing_input());
        let err = ingestor.load_job_description(None, None).await.unwrap_err();
        assert!(err.is_missing_input());
    }

    #[tokio::test]
    async fn test_inline_job_description() {
        let mut ingestor = DocumentIngestor::new();
        let job = ingestor.load_job_description(None, Some("Rust engineer")).await.unwrap();
        assert_eq!(job, "Rust engineer");
    }
}
