//! Career assistant operations on top of a chat model
//!
//! Every operation is a single request to the model; nothing here retries,
//! caches or keeps state between calls.

use crate::error::Result;
use crate::llm::client::ChatModel;
use crate::llm::prompts::{self, Persona, Recipient, SYSTEM_PROMPT};
use crate::matching::score::{parse_score, ratio_to_score};
use crate::matching::{KeywordMatcher, SkillSet};
use log::{debug, info, warn};

pub struct CareerAgent<M: ChatModel> {
    model: M,
    keywords: KeywordMatcher,
}

impl<M: ChatModel> CareerAgent<M> {
    pub fn new(model: M) -> Result<Self> {
        Ok(Self {
            model,
            keywords: KeywordMatcher::new()?,
        })
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    async fn ask(&self, prompt: String) -> Result<String> {
        debug!("Prompt: {} chars", prompt.len());
        let reply = self.model.complete(SYSTEM_PROMPT, &prompt).await?;
        debug!("Reply: {} chars", reply.len());
        Ok(reply)
    }

    /// Match score in 0..=100.
    ///
    /// Falls back to local keyword coverage when the reply carries no number.
    pub async fn calculate_similarity(&self, resume: &str, job: &str) -> Result<u8> {
        let reply = self.ask(prompts::similarity(resume, job)).await?;
        match parse_score(&reply) {
            Some(score) => Ok(score),
            None => {
                warn!("No score in LLM reply {:?}, using keyword coverage", reply);
                Ok(ratio_to_score(self.keywords.coverage(resume, job)?))
            }
        }
    }

    pub async fn analyze_profile(&self, resume: &str, job: &str, persona: Persona) -> Result<String> {
        info!("Analyzing profile as {}", persona);
        self.ask(prompts::profile_analysis(resume, job, persona)).await
    }

    /// Raw JSON text with `present_skills` / `missing_skills`
    pub async fn extract_skills_json(&self, resume: &str, job: &str) -> Result<String> {
        self.ask(prompts::skills_json(resume, job)).await
    }

    pub async fn extract_skill_set(&self, resume: &str, job: &str) -> Result<SkillSet> {
        let reply = self.extract_skills_json(resume, job).await?;
        let skills = SkillSet::from_llm_json(&reply)?;
        info!(
            "Extracted {} present and {} missing skills",
            skills.present.len(),
            skills.missing.len()
        );
        Ok(skills)
    }

    pub async fn extract_matched_keywords(&self, resume: &str, job: &str) -> Result<Vec<String>> {
        let reply = self.ask(prompts::matched_keywords(resume, job)).await?;
        Ok(split_keyword_list(&reply))
    }

    /// Keyword matching without the model
    pub fn local_matched_keywords(&self, resume: &str, job: &str) -> Result<Vec<String>> {
        self.keywords.matched_keywords(resume, job)
    }

    pub async fn generate_cover_letter(&self, resume: &str, job: &str) -> Result<String> {
        self.ask(prompts::cover_letter(resume, job)).await
    }

    pub async fn generate_interview_question(&self, job: &str, skills: &str) -> Result<String> {
        self.ask(prompts::interview_question(job, skills)).await
    }

    pub async fn evaluate_interview_answer(&self, question: &str, answer: &str) -> Result<String> {
        self.ask(prompts::evaluate_answer(question, answer)).await
    }

    pub async fn transcribe_audio(&self, audio: Vec<u8>, file_name: &str) -> Result<String> {
        info!("Transcribing {}", file_name);
        self.model.transcribe(audio, file_name).await
    }

    pub async fn generate_cold_email(
        &self,
        resume: &str,
        job: &str,
        company_context: &str,
        recipient: Recipient,
    ) -> Result<String> {
        self.ask(prompts::cold_email(resume, job, company_context, recipient)).await
    }

    pub async fn rewrite_summary(&self, company: &str, job: &str, resume: &str) -> Result<String> {
        self.ask(prompts::summary_rewrite(company, job, resume)).await
    }

    /// Full resume rewrite, returned as markdown
    pub async fn tailor_resume(&self, resume: &str, job: &str) -> Result<String> {
        self.ask(prompts::tailor_resume(resume, job)).await
    }

    pub async fn generate_learning_plan(&self, skills: &str) -> Result<String> {
        self.ask(prompts::learning_plan(skills)).await
    }

    pub async fn generate_company_insight(&self, company: &str) -> Result<String> {
        self.ask(prompts::company_insight(company)).await
    }
}

/// Split a comma-separated keyword reply, dropping quotes and blanks
fn split_keyword_list(reply: &str) -> Vec<String> {
    reply
        .split(',')
        .map(|k| k.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
