//! CLI interface for the career assistant

use crate::llm::prompts::{Persona, Recipient};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "career-forge")]
#[command(about = "AI-powered resume and job description matching assistant")]
#[command(long_about = "Match a resume against a job description with a hosted LLM: score, persona analysis, keyword heatmap, skill graph, cover letters, interview practice, outreach emails, resume tailoring and learning roadmaps")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Inputs shared by every command that runs an analysis
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Path to resume file (PDF, TXT, MD)
    #[arg(short, long)]
    pub resume: PathBuf,

    /// Path to job description file (TXT, MD)
    #[arg(short, long, conflicts_with = "job_text")]
    pub job: Option<PathBuf>,

    /// Job description given inline
    #[arg(long)]
    pub job_text: Option<String>,

    /// Target company, used for web research
    #[arg(long)]
    pub company: Option<String>,

    /// Reviewer persona for the analysis
    #[arg(short, long, value_enum, default_value_t = Persona::HrRecruiter)]
    pub persona: Persona,

    /// LLM model to use (defaults to the configured model)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Creativity level between 0.0 and 1.0
    #[arg(short, long)]
    pub temperature: Option<f32>,

    /// API key (defaults to the configured environment variable)
    #[arg(long)]
    pub api_key: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score the resume against the job description and print the analysis report
    Analyze {
        #[command(flatten)]
        session: SessionArgs,

        /// Output format: console, json, markdown, html, pdf
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include the full resume keyword list and company context
        #[arg(short, long)]
        detailed: bool,
    },

    /// Highlight the resume text with keywords shared with the job description
    Heatmap {
        #[command(flatten)]
        session: SessionArgs,

        /// Match keywords locally instead of asking the LLM
        #[arg(long)]
        local: bool,

        /// Output format: console, html, json
        #[arg(short, long, value_enum, default_value_t = ArtifactFormat::Console)]
        output: ArtifactFormat,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Build the present/missing skill graph
    Graph {
        #[command(flatten)]
        session: SessionArgs,

        /// Output format: console, html, json
        #[arg(short, long, value_enum, default_value_t = ArtifactFormat::Console)]
        output: ArtifactFormat,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Draft a cover letter
    CoverLetter {
        #[command(flatten)]
        session: SessionArgs,

        /// Save the letter to a text file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Generate an interview question and optionally grade an answer
    Interview {
        #[command(flatten)]
        session: SessionArgs,

        /// Answer given as text
        #[arg(long, conflicts_with = "audio")]
        answer: Option<String>,

        /// Recorded answer to transcribe and grade
        #[arg(long)]
        audio: Option<PathBuf>,
    },

    /// Draft a networking cold email
    ColdEmail {
        #[command(flatten)]
        session: SessionArgs,

        /// Who the email is addressed to
        #[arg(long, value_enum, default_value_t = Recipient::HiringManager)]
        recipient: Recipient,
    },

    /// Rewrite the resume summary or tailor the whole resume
    Tailor {
        #[command(flatten)]
        session: SessionArgs,

        #[arg(long, value_enum, default_value_t = TailorMode::Summary)]
        mode: TailorMode,

        /// Save the tailored resume as markdown
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Build a learning roadmap for the missing skills
    Roadmap {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Interactive dashboard over a single session
    Dashboard {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// List the LLM models known to the configuration
    Models,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "llm.temperature")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Formats for the heatmap and graph artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArtifactFormat {
    Console,
    Html,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TailorMode {
    /// Targeted summary rewrite
    Summary,
    /// Full resume rewrite in markdown
    Full,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        "pdf" => Ok(crate::config::OutputFormat::Pdf),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html, pdf", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_heatmap_command() {
        let cli = Cli::parse_from([
            "career-forge", "heatmap", "--resume", "cv.pdf", "--job-text", "Rust developer", "--local",
            "--output", "html",
        ]);
        match cli.command {
            Commands::Heatmap { session, local, output, .. } => {
                assert!(local);
                assert_eq!(output, ArtifactFormat::Html);
                assert_eq!(session.job_text.as_deref(), Some("Rust developer"));
                assert_eq!(session.persona, Persona::HrRecruiter);
            }
            _ => panic!("expected heatmap command"),
        }
    }

    #[test]
    fn test_job_sources_conflict() {
        let result = Cli::try_parse_from([
            "career-forge", "analyze", "--resume", "cv.pdf", "--job", "jd.txt", "--job-text", "x",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(parse_output_format("MD").unwrap(), crate::config::OutputFormat::Markdown);
        assert!(parse_output_format("docx").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("README"), &["pdf"]).is_err());
    }
}
