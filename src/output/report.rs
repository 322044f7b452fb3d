//! Snapshot of an analysed session, the input of every report formatter

use crate::error::{CareerForgeError, Result};
use crate::input::ingestor::word_count;
use crate::llm::prompts::Persona;
use crate::session::{ScanRecord, Session};
use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub candidate: String,
    pub score: u8,
    pub persona: Persona,
    pub company: String,
    pub company_context: String,
    /// Persona review, markdown as returned by the model
    pub analysis: String,
    pub present_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub resume_word_count: usize,
    pub generated_at: DateTime<Local>,
    pub model_used: String,
    pub history: Vec<ScanRecord>,
}

/// Coarse rating used for badges and colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    VeryGood,
    Good,
    Fair,
    BelowAverage,
    Poor,
}

impl ScoreBand {
    pub fn of(score: u8) -> Self {
        match score {
            90..=u8::MAX => ScoreBand::Excellent,
            80..=89 => ScoreBand::VeryGood,
            70..=79 => ScoreBand::Good,
            60..=69 => ScoreBand::Fair,
            50..=59 => ScoreBand::BelowAverage,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "EXCELLENT",
            ScoreBand::VeryGood => "VERY GOOD",
            ScoreBand::Good => "GOOD",
            ScoreBand::Fair => "FAIR",
            ScoreBand::BelowAverage => "BELOW AVG",
            ScoreBand::Poor => "POOR",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "score-excellent",
            ScoreBand::VeryGood | ScoreBand::Good => "score-good",
            ScoreBand::Fair | ScoreBand::BelowAverage => "score-fair",
            ScoreBand::Poor => "score-poor",
        }
    }
}

impl AnalysisReport {
    pub fn from_session(session: &Session, model_used: &str) -> Result<Self> {
        let score = session.score.ok_or_else(|| {
            CareerForgeError::MissingInput("no analysis yet; run analyze first".to_string())
        })?;

        let (present_skills, missing_skills) = session
            .skills
            .as_ref()
            .map(|s| (s.present.clone(), s.missing.clone()))
            .unwrap_or_default();

        Ok(Self {
            candidate: candidate_name(session),
            score,
            persona: session.persona,
            company: session.company_or_unknown().to_string(),
            company_context: session.company_context.clone(),
            analysis: session.analysis.clone(),
            present_skills,
            missing_skills,
            matched_keywords: session.keywords.clone(),
            resume_word_count: word_count(&session.resume_text),
            generated_at: Local::now(),
            model_used: model_used.to_string(),
            history: session.history.clone(),
        })
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::of(self.score)
    }

    pub fn generated_at_display(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// First short line of the resume, else the resume file name
fn candidate_name(session: &Session) -> String {
    let first_line = session
        .resume_text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .filter(|line| line.chars().count() <= 60);

    match (first_line, &session.resume_path) {
        (Some(line), _) => line.trim_start_matches('#').trim().to_string(),
        (None, Some(path)) => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Candidate".to_string()),
        (None, None) => "Candidate".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::SkillSet;
    use crate::session::AnalysisOutcome;
    use std::path::PathBuf;

    fn analysed_session(resume: &str) -> Session {
        let mut session = Session::new();
        session.record_analysis(AnalysisOutcome {
            resume_path: Some(PathBuf::from("docs/jane_doe.pdf")),
            resume_text: resume.to_string(),
            job_description: "Rust engineer".to_string(),
            company: Some("Acme".to_string()),
            company_context: "Acme builds rockets.".to_string(),
            persona: Persona::SeniorEngineer,
            score: 84,
            analysis: "## VERDICT\nStrong".to_string(),
        });
        session
    }

    #[test]
    fn test_report_requires_analysis() {
        let err = AnalysisReport::from_session(&Session::new(), "m").unwrap_err();
        assert!(err.is_missing_input());
    }

    #[test]
    fn test_report_from_session() {
        let mut session = analysed_session("# Jane Doe\nRust and Go engineer");
        session.skills = Some(SkillSet::new(vec!["Rust".into()], vec!["Kafka".into()]));

        let report = AnalysisReport::from_session(&session, "llama-3.3-70b-versatile").unwrap();

        assert_eq!(report.candidate, "Jane Doe");
        assert_eq!(report.company, "Acme");
        assert_eq!(report.missing_skills, vec!["Kafka"]);
        assert_eq!(report.resume_word_count, 6);
        assert_eq!(report.band(), ScoreBand::VeryGood);
        assert_eq!(report.history.len(), 1);
    }

    #[test]
    fn test_candidate_falls_back_to_file_name() {
        let long_line = "x".repeat(80);
        let session = analysed_session(&long_line);
        let report = AnalysisReport::from_session(&session, "m").unwrap();
        assert_eq!(report.candidate, "jane_doe");
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::of(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::of(65).label(), "FAIR");
        assert_eq!(ScoreBand::of(12).css_class(), "score-poor");
    }
}
