//! Local keyword matching between a job description and a resume

use crate::error::{CareerForgeError, Result};
use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Multi-word and punctuated skills that plain tokenization would split apart
const SKILL_PHRASES: &[&str] = &[
    "machine learning", "deep learning", "data science", "computer vision",
    "natural language processing", "project management", "product management",
    "problem solving", "critical thinking", "time management", "customer service",
    "unit testing", "continuous integration", "continuous delivery", "ci/cd",
    "rest api", "rest apis", "system design", "distributed systems", "data engineering",
    "sql server", "node.js", "react native", "spring boot", "ruby on rails",
    "google cloud", "power bi", "scikit-learn", "c++", "c#", ".net", "objective-c",
];

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "have", "in",
    "is", "it", "its", "of", "on", "or", "that", "the", "to", "was", "will", "with",
    "this", "but", "they", "their", "you", "your", "our", "we", "us", "who", "what",
    "which", "about", "all", "any", "can", "able", "also", "etc", "into", "more",
    "must", "should", "would", "could", "may", "such", "other", "than", "then",
    "these", "those", "new", "work", "working", "team", "teams", "role", "join",
    "looking", "experience", "years", "year", "plus", "strong", "skills", "knowledge",
    "ability", "including", "using", "use", "within", "across", "well", "good",
    "great", "help", "build", "building", "responsibilities", "requirements",
    "required", "preferred", "qualifications", "candidate", "company", "position",
    "job", "opportunity", "environment", "based", "high", "level", "across",
];

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(r"[A-Za-z][A-Za-z0-9+#]*(?:[.\-/][A-Za-z0-9+#]+)*").expect("valid token regex")
    })
}

/// Finds job description terms that also occur in the resume, without an LLM
pub struct KeywordMatcher {
    stop_words: HashSet<&'static str>,
    phrases: AhoCorasick,
}

impl KeywordMatcher {
    pub fn new() -> Result<Self> {
        let phrases = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(SKILL_PHRASES)
            .map_err(|e| CareerForgeError::InvalidInput(format!("Failed to build skill phrase matcher: {}", e)))?;

        Ok(Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            phrases,
        })
    }

    /// Candidate keywords from the job description, in order of first
    /// appearance and deduplicated case-insensitively.
    pub fn candidate_terms(&self, job: &str) -> Vec<String> {
        let mut found: Vec<(usize, String)> = Vec::new();

        for m in self.phrases.find_iter(job) {
            if is_word_bounded(job, m.start(), m.end()) {
                found.push((m.start(), job[m.start()..m.end()].to_string()));
            }
        }

        for m in token_pattern().find_iter(job) {
            let token = m.as_str();
            let lower = token.to_lowercase();
            let punctuated = token.contains(['+', '#']);
            if (token.chars().count() >= 3 || punctuated) && !self.stop_words.contains(lower.as_str()) {
                found.push((m.start(), token.to_string()));
            }
        }

        found.sort_by_key(|(pos, _)| *pos);

        let mut seen = HashSet::new();
        found
            .into_iter()
            .map(|(_, term)| term)
            .filter(|term| seen.insert(term.to_lowercase()))
            .collect()
    }

    /// Job description terms that occur as whole words in the resume
    pub fn matched_keywords(&self, resume: &str, job: &str) -> Result<Vec<String>> {
        let candidates = self.candidate_terms(job);
        self.present_in(resume, &candidates)
    }

    /// Share of job description terms found in the resume, 0.0 to 1.0
    pub fn coverage(&self, resume: &str, job: &str) -> Result<f32> {
        let candidates = self.candidate_terms(job);
        if candidates.is_empty() {
            return Ok(0.0);
        }
        let matched = self.present_in(resume, &candidates)?;
        Ok(matched.len() as f32 / candidates.len() as f32)
    }

    fn present_in(&self, resume: &str, candidates: &[String]) -> Result<Vec<String>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        // Overlapping search so "Java" is still found next to "JavaScript"
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(candidates)
            .map_err(|e| CareerForgeError::InvalidInput(format!("Failed to build keyword matcher: {}", e)))?;

        let mut hit = vec![false; candidates.len()];
        for m in automaton.find_overlapping_iter(resume) {
            if is_word_bounded(resume, m.start(), m.end()) {
                hit[m.pattern().as_usize()] = true;
            }
        }

        Ok(candidates
            .iter()
            .zip(hit)
            .filter(|(_, hit)| *hit)
            .map(|(term, _)| term.clone())
            .collect())
    }
}

/// True when the match is not glued to a letter or digit on either side
fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
