//! Prompt templates for every LLM-backed action

use clap::ValueEnum;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Reviewer role the profile analysis is written as
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Persona {
    #[default]
    HrRecruiter,
    SeniorEngineer,
    Cto,
}

impl Persona {
    pub fn label(self) -> &'static str {
        match self {
            Persona::HrRecruiter => "HR Recruiter",
            Persona::SeniorEngineer => "Senior Engineer",
            Persona::Cto => "CTO",
        }
    }

    fn focus(self) -> &'static str {
        match self {
            Persona::HrRecruiter => {
                "culture fit, communication, career progression, keyword alignment and red flags a screener would notice"
            }
            Persona::SeniorEngineer => {
                "depth of technical experience, engineering practices, the concrete tools and systems the candidate has shipped"
            }
            Persona::Cto => {
                "business impact, ownership, architecture decisions, leadership potential and how quickly the candidate would deliver value"
            }
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Who a cold email is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Recipient {
    HiringManager,
    TechnicalRecruiter,
    AlumniPeer,
}

impl Recipient {
    pub fn label(self) -> &'static str {
        match self {
            Recipient::HiringManager => "Hiring Manager",
            Recipient::TechnicalRecruiter => "Technical Recruiter",
            Recipient::AlumniPeer => "Alumni / Peer",
        }
    }
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub const SYSTEM_PROMPT: &str = "You are CareerForge, an expert career coach and technical recruiter. \
Ground every statement in the resume and job description you are given. Never invent experience the candidate does not have.";

/// Placeholders are filled in a single pass, so `{...}` inside the
/// substituted resume or job text is never expanded a second time.
pub fn fill(template: &str, params: &[(&str, &str)]) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let placeholder = PLACEHOLDER.get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("valid placeholder regex"));

    placeholder
        .replace_all(template, |caps: &Captures| {
            params
                .iter()
                .find(|(key, _)| *key == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Truncate to at most `max_chars` characters without splitting a character
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn similarity(resume: &str, job: &str) -> String {
    fill(SIMILARITY_TEMPLATE, &[("resume", resume), ("job", job)])
}

pub fn profile_analysis(resume: &str, job: &str, persona: Persona) -> String {
    fill(
        ANALYSIS_TEMPLATE,
        &[
            ("resume", resume),
            ("job", job),
            ("persona", persona.label()),
            ("focus", persona.focus()),
        ],
    )
}

pub fn skills_json(resume: &str, job: &str) -> String {
    fill(SKILLS_JSON_TEMPLATE, &[("resume", resume), ("job", job)])
}

pub fn matched_keywords(resume: &str, job: &str) -> String {
    fill(KEYWORDS_TEMPLATE, &[("resume", resume), ("job", job)])
}

pub fn cover_letter(resume: &str, job: &str) -> String {
    fill(COVER_LETTER_TEMPLATE, &[("resume", resume), ("job", job)])
}

pub fn interview_question(job: &str, skills: &str) -> String {
    fill(INTERVIEW_QUESTION_TEMPLATE, &[("job", job), ("skills", skills)])
}

pub fn evaluate_answer(question: &str, answer: &str) -> String {
    fill(EVALUATE_ANSWER_TEMPLATE, &[("question", question), ("answer", answer)])
}

pub fn cold_email(resume: &str, job: &str, company_context: &str, recipient: Recipient) -> String {
    let company_context = if company_context.trim().is_empty() {
        "No additional company research available."
    } else {
        company_context
    };
    fill(
        COLD_EMAIL_TEMPLATE,
        &[
            ("resume", resume),
            ("job", job),
            ("company_context", company_context),
            ("recipient", recipient.label()),
        ],
    )
}

pub fn summary_rewrite(company: &str, job: &str, resume: &str) -> String {
    fill(
        SUMMARY_REWRITE_TEMPLATE,
        &[
            ("company", company),
            ("job", truncate_chars(job, 300)),
            ("resume", truncate_chars(resume, 500)),
        ],
    )
}

pub fn tailor_resume(resume: &str, job: &str) -> String {
    fill(TAILOR_TEMPLATE, &[("resume", resume), ("job", job)])
}

pub fn learning_plan(skills: &str) -> String {
    fill(LEARNING_PLAN_TEMPLATE, &[("skills", skills)])
}

pub fn company_insight(company: &str) -> String {
    fill(COMPANY_INSIGHT_TEMPLATE, &[("company", company)])
}

const SIMILARITY_TEMPLATE: &str = r#"Rate how well the resume matches the job description on a scale from 0 to 100.

<RESUME>
{resume}
</RESUME>

<JOB DESCRIPTION>
{job}
</JOB DESCRIPTION>

Reply with a single integer between 0 and 100 and nothing else."#;

const ANALYSIS_TEMPLATE: &str = r#"Act as a {persona} reviewing this candidate. Focus on {focus}.

<RESUME>
{resume}
</RESUME>

<JOB DESCRIPTION>
{job}
</JOB DESCRIPTION>

Write your review in markdown with these sections:

## VERDICT
One paragraph: would you move this candidate forward, and why?

## STRENGTHS
The strongest matches between the resume and the role.

## GAPS
What the job asks for that the resume does not show.

## PRIORITY ACTIONS
The top 3 concrete changes to make to this resume.

IMPORTANT: Reference the actual resume content above, not generic advice."#;

const SKILLS_JSON_TEMPLATE: &str = r#"Compare the skills in the resume with the skills required by the job description.

<RESUME>
{resume}
</RESUME>

<JOB DESCRIPTION>
{job}
</JOB DESCRIPTION>

Return ONLY a JSON object with exactly these keys:
{"present_skills": ["skills required by the job that the resume shows"], "missing_skills": ["skills required by the job that the resume lacks"]}
Use short skill names (1-3 words). At most 10 entries per list. No markdown, no commentary."#;

const KEYWORDS_TEMPLATE: &str = r#"List the important keywords (skills, tools, technologies, qualifications) that appear in BOTH the job description and the resume.

<RESUME>
{resume}
</RESUME>

<JOB DESCRIPTION>
{job}
</JOB DESCRIPTION>

Return only a comma-separated list. Each keyword must appear verbatim in the resume. No numbering, no commentary."#;

const COVER_LETTER_TEMPLATE: &str = r#"Write a one-page cover letter (250-350 words) for this candidate and role.

<RESUME>
{resume}
</RESUME>

<JOB DESCRIPTION>
{job}
</JOB DESCRIPTION>

Highlight 3-4 concrete matches from the resume. Confident but humble tone, no clichés, plain text.
Open with a strong hook and close with a short call to action. Use the candidate's name from the resume in the signature if present."#;

const INTERVIEW_QUESTION_TEMPLATE: &str = r#"You are a technical interviewer for the role below.

<JOB DESCRIPTION>
{job}
</JOB DESCRIPTION>

The candidate's weak areas are: {skills}

Ask ONE challenging, realistic interview question that probes these areas. Reply with the question only."#;

const EVALUATE_ANSWER_TEMPLATE: &str = r#"Grade the candidate's answer to this interview question.

Question: {question}

Answer: {answer}

Respond in markdown with:
**Score:** x/10
**What worked:** ...
**What to improve:** ...
**Model answer:** a concise stronger answer."#;

const COLD_EMAIL_TEMPLATE: &str = r#"Write a short networking cold email (under 150 words) from the candidate to a {recipient}.

<RESUME>
{resume}
</RESUME>

<JOB DESCRIPTION>
{job}
</JOB DESCRIPTION>

<COMPANY CONTEXT>
{company_context}
</COMPANY CONTEXT>

Include a subject line. Reference one specific thing about the company and one concrete achievement from the resume. End with a low-friction ask."#;

const SUMMARY_REWRITE_TEMPLATE: &str = r#"Rewrite resume summary for {company} job: {job}... Original: {resume}"#;

const TAILOR_TEMPLATE: &str = r#"Rewrite the entire resume so it targets the job description.

<RESUME>
{resume}
</RESUME>

<JOB DESCRIPTION>
{job}
</JOB DESCRIPTION>

Rules:
- Keep every fact truthful; reorder, rephrase and emphasise, never invent.
- Mirror the job description's terminology where the resume supports it.
- Quantify achievements where the resume gives numbers.
- Output clean markdown: name as a heading, then Summary, Skills, Experience, Education, Projects."#;

const LEARNING_PLAN_TEMPLATE: &str = r#"Create an accelerated learning roadmap for these skills: {skills}

For each skill give, in markdown:
### Skill name
- **Why it matters** (one line)
- **Week-by-week plan** (2-4 weeks)
- **Hands-on project** to prove the skill on a resume
- **Free resources** (official docs, courses)"#;

const COMPANY_INSIGHT_TEMPLATE: &str = r#"Summarise what a job applicant should know about {company}: what they do, their products, engineering culture and recent focus areas.
Keep it under 150 words in markdown bullets. If you are unsure about a fact, say so rather than guessing."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_is_single_pass() {
        let out = fill("R: {resume} / J: {job}", &[("resume", "uses {job} literally"), ("job", "Rust")]);
        assert_eq!(out, "R: uses {job} literally / J: Rust");
    }

    #[test]
    fn test_unknown_placeholders_are_kept() {
        assert_eq!(fill("{a} {b}", &[("a", "1")]), "1 {b}");
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_profile_analysis_rendering() {
        let prompt = profile_analysis(
            "Software Engineer with Python experience at Tech Corp.",
            "Senior Software Engineer role requiring React and Python.",
            Persona::Cto,
        );

        assert!(prompt.contains("Software Engineer with Python experience at Tech Corp"));
        assert!(prompt.contains("Senior Software Engineer role requiring React and Python"));
        assert!(prompt.starts_with("Act as a CTO"));
        assert!(prompt.contains("## PRIORITY ACTIONS"));
        assert!(!prompt.contains("{focus}"));
    }

    #[test]
    fn test_skills_prompt_keeps_json_shape() {
        let prompt = skills_json("cv", "jd");
        assert!(prompt.contains(r#""present_skills""#));
        assert!(prompt.contains(r#""missing_skills""#));
        assert!(prompt.contains("<RESUME>\ncv\n</RESUME>"));
    }

    #[test]
    fn test_summary_rewrite_truncates_inputs() {
        let job = "j".repeat(400);
        let resume = "r".repeat(700);
        let prompt = summary_rewrite("Netflix", &job, &resume);

        assert!(prompt.starts_with("Rewrite resume summary for Netflix job: "));
        assert!(prompt.contains(&format!("{}...", "j".repeat(300))));
        assert!(!prompt.contains(&"j".repeat(301)));
        assert!(prompt.ends_with(&format!("Original: {}", "r".repeat(500))));
    }

    #[test]
    fn test_cold_email_without_context() {
        let prompt = cold_email("cv", "jd", "  ", Recipient::AlumniPeer);
        assert!(prompt.contains("to a Alumni / Peer"));
        assert!(prompt.contains("No additional company research available."));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Persona::HrRecruiter.to_string(), "HR Recruiter");
        assert_eq!(Recipient::TechnicalRecruiter.label(), "Technical Recruiter");
    }
}
