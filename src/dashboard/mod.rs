//! Dashboard actions: one method per action, each reading and updating a [`Session`]
//!
//! Preconditions are checked before any model or search call, so a
//! `MissingInput` error means nothing was sent anywhere.

pub mod repl;
pub mod view;

use crate::cli::SessionArgs;
use crate::config::Config;
use crate::error::{CareerForgeError, Result};
use crate::graph::{SkillGraph, WidgetConfig};
use crate::input::{DocumentIngestor, ExtractedText};
use crate::llm::{CareerAgent, ChatModel, Persona, Recipient};
use crate::matching::SkillSet;
use crate::output::AnalysisReport;
use crate::search::CompanySearch;
use crate::session::{AnalysisOutcome, Session};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_INTERVIEW_FOCUS: &str = "general gaps";
const DEFAULT_ROADMAP_FOCUS: &str = "General";
pub const NO_MISSING_SKILLS: &str = "No missing skills identified";

/// Documents and context for an analysis
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub resume: PathBuf,
    pub job_file: Option<PathBuf>,
    pub job_text: Option<String>,
    pub company: Option<String>,
    pub persona: Persona,
}

impl From<&SessionArgs> for AnalyzeRequest {
    fn from(args: &SessionArgs) -> Self {
        Self {
            resume: args.resume.clone(),
            job_file: args.job.clone(),
            job_text: args.job_text.clone(),
            company: args.company.clone(),
            persona: args.persona,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Answer {
    Text(String),
    /// Recorded answer, transcribed before grading
    Audio(PathBuf),
}

#[derive(Debug, Clone)]
pub struct GradedAnswer {
    pub transcript: Option<String>,
    pub feedback: String,
}

#[derive(Debug, Clone)]
pub struct Roadmap {
    pub focus: String,
    pub plan: String,
    /// `(skill, resource)` pairs
    pub tutorials: Vec<(String, String)>,
}

pub struct Dashboard<M: ChatModel> {
    agent: CareerAgent<M>,
    search: CompanySearch,
    ingestor: DocumentIngestor,
    config: Config,
    show_progress: bool,
}

impl<M: ChatModel> Dashboard<M> {
    pub fn new(agent: CareerAgent<M>, search: CompanySearch, config: Config) -> Self {
        Self {
            agent,
            search,
            ingestor: DocumentIngestor::new(),
            config,
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn agent(&self) -> &CareerAgent<M> {
        &self.agent
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Drop cached document text so the next analysis re-reads the files
    pub fn reload_documents(&mut self) {
        self.ingestor.clear_cache();
    }

    async fn step<T>(&self, message: &str, work: impl Future<Output = T>) -> T {
        let spinner = if self.show_progress {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner:.magenta} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        } else {
            ProgressBar::hidden()
        };
        spinner.set_message(message.to_string());

        let result = work.await;
        spinner.finish_and_clear();
        result
    }

    fn require_documents(session: &Session) -> Result<()> {
        if session.has_documents() {
            Ok(())
        } else {
            Err(CareerForgeError::MissingInput(
                "no resume or job description loaded; run analyze first".to_string(),
            ))
        }
    }

    /// Search results about the company, else an LLM-written insight
    async fn research_company(&self, company: &str) -> Result<String> {
        let found = self
            .step(&format!("Researching {}...", company), self.search.company_info(company))
            .await;
        match found {
            Some(context) => Ok(context),
            None => {
                info!("No search results for {}, asking the model", company);
                self.step(
                    &format!("Asking the model about {}...", company),
                    self.agent.generate_company_insight(company),
                )
                .await
            }
        }
    }

    async fn read_documents(&mut self, request: &AnalyzeRequest) -> Result<(ExtractedText, String)> {
        let resume = self.ingestor.extract_resume(&request.resume).await?;
        let job = self
            .ingestor
            .load_job_description(request.job_file.as_deref(), request.job_text.as_deref())
            .await?;
        Ok((resume, job))
    }

    /// Load the documents into the session without scoring them
    pub async fn load_documents(&mut self, session: &mut Session, request: &AnalyzeRequest) -> Result<()> {
        let (resume, job) = self.read_documents(request).await?;
        session.load_documents(
            Some(request.resume.clone()),
            resume.text,
            job,
            request.company.clone(),
            request.persona,
        );
        Ok(())
    }

    /// Fill the session's company context when a company is set
    pub async fn research(&self, session: &mut Session) -> Result<()> {
        if let Some(company) = session.company.clone() {
            session.company_context = self.research_company(&company).await?;
        }
        Ok(())
    }

    /// Load the documents, research the company, score and review. Returns the score.
    ///
    /// The session is only updated once every step has succeeded.
    pub async fn analyze(&mut self, session: &mut Session, request: &AnalyzeRequest) -> Result<u8> {
        let (resume, job) = self.read_documents(request).await?;

        let company = request
            .company
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let company_context = match company {
            Some(company) => self.research_company(company).await?,
            None => String::new(),
        };

        let score = self
            .step("Scoring match...", self.agent.calculate_similarity(&resume.text, &job))
            .await?;
        let analysis = self
            .step(
                &format!("Reviewing as {}...", request.persona),
                self.agent.analyze_profile(&resume.text, &job, request.persona),
            )
            .await?;

        info!("Analysis complete: score {} for {}", score, company.unwrap_or("unknown company"));

        session.record_analysis(AnalysisOutcome {
            resume_path: Some(request.resume.clone()),
            resume_text: resume.text,
            job_description: job,
            company: company.map(str::to_string),
            company_context,
            persona: request.persona,
            score,
            analysis,
        });
        Ok(score)
    }

    /// Collect the keywords shared by resume and job, by model or locally
    pub async fn heatmap(&self, session: &mut Session, local: bool) -> Result<Vec<String>> {
        Self::require_documents(session)?;

        let keywords = if local {
            self.agent
                .local_matched_keywords(&session.resume_text, &session.job_description)?
        } else {
            self.step(
                "Finding matched keywords...",
                self.agent
                    .extract_matched_keywords(&session.resume_text, &session.job_description),
            )
            .await?
        };

        info!("{} matched keywords", keywords.len());
        session.keywords = keywords.clone();
        Ok(keywords)
    }

    pub async fn skill_graph(&self, session: &mut Session) -> Result<SkillGraph> {
        Self::require_documents(session)?;

        let skills = self
            .step(
                "Extracting skills...",
                self.agent
                    .extract_skill_set(&session.resume_text, &session.job_description),
            )
            .await?;

        let graph = skills.to_graph(WidgetConfig::with_size(
            self.config.graph.width,
            self.config.graph.height,
        ));
        session.skills = Some(skills);
        Ok(graph)
    }

    pub async fn cover_letter(&self, session: &Session) -> Result<String> {
        Self::require_documents(session)?;
        self.step(
            "Writing cover letter...",
            self.agent
                .generate_cover_letter(&session.resume_text, &session.job_description),
        )
        .await
    }

    pub async fn interview_question(&self, session: &mut Session) -> Result<String> {
        Self::require_documents(session)?;

        let focus = SkillSet::missing_or(session.skills.as_ref(), DEFAULT_INTERVIEW_FOCUS);
        let question = self
            .step(
                "Preparing a question...",
                self.agent
                    .generate_interview_question(&session.job_description, &focus),
            )
            .await?;

        session.interview_question = Some(question.clone());
        Ok(question)
    }

    pub async fn grade_answer(&self, session: &Session, answer: Answer) -> Result<GradedAnswer> {
        let question = session.interview_question.as_deref().ok_or_else(|| {
            CareerForgeError::MissingInput("no interview question yet; ask for one first".to_string())
        })?;

        let (answer_text, transcript) = match answer {
            Answer::Text(text) => (text, None),
            Answer::Audio(path) => {
                let audio = read_audio(&path).await?;
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "answer.wav".to_string());
                let text = self
                    .step("Transcribing answer...", self.agent.transcribe_audio(audio, &file_name))
                    .await?;
                (text.clone(), Some(text))
            }
        };

        if answer_text.trim().is_empty() {
            return Err(CareerForgeError::MissingInput("the answer is empty".to_string()));
        }

        let feedback = self
            .step(
                "Grading answer...",
                self.agent.evaluate_interview_answer(question, &answer_text),
            )
            .await?;

        Ok(GradedAnswer { transcript, feedback })
    }

    pub async fn cold_email(&self, session: &Session, recipient: Recipient) -> Result<String> {
        Self::require_documents(session)?;
        self.step(
            &format!("Drafting email to {}...", recipient),
            self.agent.generate_cold_email(
                &session.resume_text,
                &session.job_description,
                &session.company_context,
                recipient,
            ),
        )
        .await
    }

    pub async fn rewrite_summary(&self, session: &Session) -> Result<String> {
        Self::require_documents(session)?;
        let company = session.company.as_deref().unwrap_or("the target company");
        self.step(
            "Rewriting summary...",
            self.agent
                .rewrite_summary(company, &session.job_description, &session.resume_text),
        )
        .await
    }

    /// Full markdown rewrite, kept in the session until the next analysis
    pub async fn tailor_resume(&self, session: &mut Session) -> Result<String> {
        Self::require_documents(session)?;
        let tailored = self
            .step(
                "Tailoring resume...",
                self.agent
                    .tailor_resume(&session.resume_text, &session.job_description),
            )
            .await?;

        session.tailored_resume = Some(tailored.clone());
        Ok(tailored)
    }

    pub async fn roadmap(&self, session: &Session) -> Result<Roadmap> {
        let missing: &[String] = session
            .skills
            .as_ref()
            .map(|s| s.missing.as_slice())
            .unwrap_or_default();

        let focus = SkillSet::missing_or(session.skills.as_ref(), DEFAULT_ROADMAP_FOCUS).into_owned();
        let plan = self
            .step("Planning your roadmap...", self.agent.generate_learning_plan(&focus))
            .await?;
        let tutorials = self
            .step(
                "Looking up tutorials...",
                self.search
                    .tutorial_links(missing, self.config.search.tutorial_skill_limit),
            )
            .await;

        Ok(Roadmap { focus, plan, tutorials })
    }

    pub fn report(&self, session: &Session) -> Result<AnalysisReport> {
        AnalysisReport::from_session(session, self.agent.model_name())
    }
}

async fn read_audio(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(CareerForgeError::MissingInput(format!(
            "audio file does not exist: {}",
            path.display()
        )));
    }
    Ok(tokio::fs::read(path).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::scripted::ScriptedModel;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn dashboard(replies: &[&str]) -> Dashboard<ScriptedModel> {
        let mut config = Config::default();
        config.search.enabled = false;
        let search = CompanySearch::new(&config.search, Duration::from_secs(1)).unwrap();
        let agent = CareerAgent::new(ScriptedModel::new(replies)).unwrap();
        Dashboard::new(agent, search, config).with_progress(false)
    }

    fn resume_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Jane Doe\nBackend engineer: Python, SQL, Docker.").unwrap();
        path
    }

    fn request(resume: PathBuf, company: Option<&str>) -> AnalyzeRequest {
        AnalyzeRequest {
            resume,
            job_file: None,
            job_text: Some("Python and Kubernetes engineer".to_string()),
            company: company.map(str::to_string),
            persona: Persona::SeniorEngineer,
        }
    }

    #[tokio::test]
    async fn test_analyze_with_company_falls_back_to_insight() {
        let dir = TempDir::new().unwrap();
        let mut dash = dashboard(&["Acme is a rocket company.", "81", "## VERDICT\nHire"]);
        let mut session = Session::new();

        let score = dash.analyze(&mut session, &request(resume_file(&dir), Some("Acme"))).await.unwrap();

        assert_eq!(score, 81);
        assert_eq!(session.company_context, "Acme is a rocket company.");
        assert_eq!(session.analysis, "## VERDICT\nHire");
        assert_eq!(session.history.len(), 1);
        assert_eq!(session.history[0].company, "Acme");
        assert_eq!(dash.agent().model().prompts().len(), 3);
    }

    #[tokio::test]
    async fn test_analyze_without_company_skips_research() {
        let dir = TempDir::new().unwrap();
        let mut dash = dashboard(&["55", "review"]);
        let mut session = Session::new();

        dash.analyze(&mut session, &request(resume_file(&dir), None)).await.unwrap();

        assert_eq!(session.history[0].company, "Unknown");
        assert!(session.company_context.is_empty());
    }

    #[tokio::test]
    async fn test_failed_analysis_leaves_session_untouched() {
        let dir = TempDir::new().unwrap();
        let mut dash = dashboard(&["64"]);
        let mut session = Session::new();

        assert!(dash.analyze(&mut session, &request(resume_file(&dir), None)).await.is_err());
        assert!(!session.has_documents());
        assert!(session.history.is_empty());
    }

    #[tokio::test]
    async fn test_load_documents_and_research() {
        let dir = TempDir::new().unwrap();
        let mut dash = dashboard(&["Acme makes anvils."]);
        let mut session = Session::new();

        dash.load_documents(&mut session, &request(resume_file(&dir), Some("Acme"))).await.unwrap();
        assert!(session.has_documents());
        assert!(!session.is_analyzed());
        assert!(dash.agent().model().prompts().is_empty());

        dash.research(&mut session).await.unwrap();
        assert_eq!(session.company_context, "Acme makes anvils.");
    }

    #[tokio::test]
    async fn test_missing_inputs_make_no_calls() {
        let mut dash = dashboard(&[]);
        let mut session = Session::new();

        let missing = request(PathBuf::from("/nonexistent/resume.pdf"), None);
        assert!(dash.analyze(&mut session, &missing).await.unwrap_err().is_missing_input());
        assert!(dash.heatmap(&mut session, false).await.unwrap_err().is_missing_input());
        assert!(dash.skill_graph(&mut session).await.unwrap_err().is_missing_input());
        assert!(dash.cover_letter(&session).await.unwrap_err().is_missing_input());
        assert!(dash.tailor_resume(&mut session).await.unwrap_err().is_missing_input());
        assert!(dash
            .grade_answer(&session, Answer::Text("x".into()))
            .await
            .unwrap_err()
            .is_missing_input());
        assert!(dash.report(&session).unwrap_err().is_missing_input());

        assert!(dash.agent().model().prompts().is_empty());
    }

    #[tokio::test]
    async fn test_skill_graph_stores_skill_set() {
        let dir = TempDir::new().unwrap();
        let mut dash = dashboard(&[
            "70",
            "ok",
            r#"{"present_skills": ["Python"], "missing_skills": ["Kubernetes", "Helm"]}"#,
        ]);
        let mut session = Session::new();
        dash.analyze(&mut session, &request(resume_file(&dir), None)).await.unwrap();

        let graph = dash.skill_graph(&mut session).await.unwrap();

        assert_eq!(graph.nodes.len(), 4);
        assert_eq!(graph.config.width, 1000);
        assert_eq!(session.skills.as_ref().unwrap().missing, vec!["Kubernetes", "Helm"]);
    }

    #[tokio::test]
    async fn test_malformed_skills_leave_session_unset() {
        let dir = TempDir::new().unwrap();
        let mut dash = dashboard(&["70", "ok", "not json"]);
        let mut session = Session::new();
        dash.analyze(&mut session, &request(resume_file(&dir), None)).await.unwrap();

        assert!(dash.skill_graph(&mut session).await.is_err());
        assert!(session.skills.is_none());
    }

    #[tokio::test]
    async fn test_local_heatmap_needs_no_model() {
        let dir = TempDir::new().unwrap();
        let mut dash = dashboard(&["70", "ok"]);
        let mut session = Session::new();
        dash.analyze(&mut session, &request(resume_file(&dir), None)).await.unwrap();

        let keywords = dash.heatmap(&mut session, true).await.unwrap();

        assert_eq!(keywords, vec!["Python", "engineer"]);
        assert_eq!(session.keywords, keywords);
        assert_eq!(dash.agent().model().prompts().len(), 2);
    }

    #[tokio::test]
    async fn test_interview_uses_missing_skills_or_default() {
        let dir = TempDir::new().unwrap();
        let mut dash = dashboard(&["70", "ok", "Tell me about gaps?", "Describe Helm?", "Solid answer"]);
        let mut session = Session::new();
        dash.analyze(&mut session, &request(resume_file(&dir), None)).await.unwrap();

        dash.interview_question(&mut session).await.unwrap();
        session.skills = Some(SkillSet::new(vec![], vec!["Helm".into(), "Go".into()]));
        let question = dash.interview_question(&mut session).await.unwrap();
        let graded = dash.grade_answer(&session, Answer::Text("I used charts".into())).await.unwrap();

        let prompts = dash.agent().model().prompts();
        assert!(prompts[2].contains("general gaps"));
        assert!(prompts[3].contains("Helm, Go"));
        assert_eq!(question, "Describe Helm?");
        assert_eq!(graded.feedback, "Solid answer");
        assert!(graded.transcript.is_none());
    }

    #[tokio::test]
    async fn test_audio_answer_is_transcribed() {
        let mut dash = dashboard(&["Good"]);
        let mut session = Session::new();
        session.interview_question = Some("Why Rust?".to_string());

        let mut audio = NamedTempFile::new().unwrap();
        audio.write_all(&[0u8; 32]).unwrap();

        let graded = dash
            .grade_answer(&session, Answer::Audio(audio.path().to_path_buf()))
            .await
            .unwrap();

        assert_eq!(graded.transcript.as_deref(), Some("32 bytes"));
        assert!(dash.agent().model().prompts()[0].contains("32 bytes"));
        dash.reload_documents();
    }

    #[tokio::test]
    async fn test_roadmap_paths() {
        let dash = dashboard(&["Week 1: basics", "Week 1: review"]);
        let mut session = Session::new();

        session.skills = Some(SkillSet::new(vec!["Rust".into()], vec![]));
        let done = dash.roadmap(&session).await.unwrap();
        assert_eq!(done.plan, "Week 1: basics");
        assert_eq!(done.focus, "General");
        assert!(done.tutorials.is_empty());
        assert!(dash.agent().model().prompts()[0].contains("General"));

        session.skills = None;
        let general = dash.roadmap(&session).await.unwrap();
        assert_eq!(general.focus, "General");
        assert!(general.tutorials.is_empty());

        session.skills = Some(SkillSet::new(vec![], vec!["Go".into()]));
        assert!(dash.roadmap(&session).await.is_err());
    }

    #[tokio::test]
    async fn test_roadmap_tutorials_fall_back_to_youtube() {
        let dash = dashboard(&["plan"]);
        let mut session = Session::new();
        session.skills = Some(SkillSet::new(vec![], vec!["machine learning".into()]));

        let roadmap = dash.roadmap(&session).await.unwrap();

        assert_eq!(roadmap.focus, "machine learning");
        assert_eq!(
            roadmap.tutorials[0].1,
            "https://www.youtube.com/results?search_query=machine+learning+tutorial"
        );
    }

    #[tokio::test]
    async fn test_tailor_and_report() {
        let dir = TempDir::new().unwrap();
        let mut dash = dashboard(&["90", "great", "# Jane Doe (tailored)"]);
        let mut session = Session::new();
        dash.analyze(&mut session, &request(resume_file(&dir), Some("  "))).await.unwrap();

        dash.tailor_resume(&mut session).await.unwrap();
        let report = dash.report(&session).unwrap();

        assert_eq!(session.tailored_resume.as_deref(), Some("# Jane Doe (tailored)"));
        assert_eq!(report.score, 90);
        assert_eq!(report.model_used, "scripted");
        assert_eq!(report.company, "Unknown");
    }
}
