//! Document ingestion
//! Turns resume and job description files into plain text

pub mod file_detector;
pub mod text_extractor;
pub mod ingestor;

pub use ingestor::{DocumentIngestor, ExtractedText};
