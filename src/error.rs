//! Error handling for the career assistant

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareerForgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    /// Required input (resume, job description, API key) was not provided.
    /// The action is never attempted when this is returned.
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("LLM request failed: {0}")]
    Llm(String),

    /// The LLM was asked for structured skill data and returned something
    /// that is not the expected JSON object.
    #[error("Malformed skill data from LLM: {0}")]
    MalformedSkills(String),

    #[error("Web search error: {0}")]
    Search(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, CareerForgeError>;

impl From<reqwest::Error> for CareerForgeError {
    fn from(err: reqwest::Error) -> Self {
        CareerForgeError::Network(err.to_string())
    }
}

impl CareerForgeError {
    /// Whether the error was raised before any downstream call was attempted.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, CareerForgeError::MissingInput(_))
    }
}
