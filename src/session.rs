//! Per-session state shared by dashboard actions

use crate::llm::prompts::Persona;
use crate::matching::SkillSet;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

pub const UNKNOWN_COMPANY: &str = "Unknown";

#[derive(Debug, Clone, Serialize)]
pub struct ScanRecord {
    pub company: String,
    pub score: u8,
    pub scanned_at: DateTime<Local>,
}

/// Everything the actions of one session read and write.
///
/// Owned by the caller and passed by `&mut`; never persisted.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub resume_path: Option<PathBuf>,
    pub resume_text: String,
    pub job_description: String,
    pub analysis: String,
    pub score: Option<u8>,
    pub persona: Persona,
    pub company: Option<String>,
    pub company_context: String,
    pub skills: Option<SkillSet>,
    pub keywords: Vec<String>,
    pub interview_question: Option<String>,
    pub tailored_resume: Option<String>,
    pub history: Vec<ScanRecord>,
}

/// Result of one analysis, applied to the session in a single step
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub resume_path: Option<PathBuf>,
    pub resume_text: String,
    pub job_description: String,
    pub company: Option<String>,
    pub company_context: String,
    pub persona: Persona,
    pub score: u8,
    pub analysis: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_analyzed(&self) -> bool {
        self.score.is_some()
    }

    pub fn has_documents(&self) -> bool {
        !self.resume_text.trim().is_empty() && !self.job_description.trim().is_empty()
    }

    pub fn company_or_unknown(&self) -> &str {
        self.company.as_deref().unwrap_or(UNKNOWN_COMPANY)
    }

    /// Replace the documents without scoring them.
    ///
    /// Skill data, company context and the tailored resume belong to the
    /// previous documents and are cleared; keywords, the interview question
    /// and history are kept.
    pub fn load_documents(
        &mut self,
        resume_path: Option<PathBuf>,
        resume_text: String,
        job_description: String,
        company: Option<String>,
        persona: Persona,
    ) {
        self.resume_path = resume_path;
        self.resume_text = resume_text;
        self.job_description = job_description;
        self.company = company
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        self.company_context.clear();
        self.persona = persona;
        self.skills = None;
        self.tailored_resume = None;
    }

    /// Replace documents and results with a finished analysis and log it in the history
    pub fn record_analysis(&mut self, outcome: AnalysisOutcome) {
        self.load_documents(
            outcome.resume_path,
            outcome.resume_text,
            outcome.job_description,
            outcome.company,
            outcome.persona,
        );
        self.company_context = outcome.company_context;
        self.score = Some(outcome.score);
        self.analysis = outcome.analysis;

        self.history.push(ScanRecord {
            company: self.company_or_unknown().to_string(),
            score: outcome.score,
            scanned_at: Local::now(),
        });
    }
}
