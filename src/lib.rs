//! CareerForge: resume and job description matching with a hosted LLM

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod graph;
pub mod input;
pub mod llm;
pub mod matching;
pub mod output;
pub mod search;
pub mod session;

pub use config::Config;
pub use error::{CareerForgeError, Result};
pub use session::Session;
