//! Present / missing skill sets returned by the LLM

use crate::error::{CareerForgeError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Skills the job asks for, split by whether the resume shows them.
/// Order is kept and duplicates are not removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    #[serde(rename = "present_skills", default)]
    pub present: Vec<String>,
    #[serde(rename = "missing_skills", default)]
    pub missing: Vec<String>,
}

impl SkillSet {
    pub fn new(present: Vec<String>, missing: Vec<String>) -> Self {
        Self { present, missing }
    }

    /// Parse the LLM reply, tolerating markdown code fences around the JSON
    pub fn from_llm_json(reply: &str) -> Result<Self> {
        let json = strip_json_fences(reply);
        serde_json::from_str(json).map_err(|e| {
            CareerForgeError::MalformedSkills(format!("{} in reply: {}", e, truncate_for_error(reply)))
        })
    }

    /// Missing skills joined for prompts, or `fallback` when there are none
    pub fn missing_or<'a>(skill_set: Option<&SkillSet>, fallback: &'a str) -> Cow<'a, str> {
        match skill_set {
            Some(set) if !set.missing.is_empty() => Cow::Owned(set.missing.join(", ")),
            _ => Cow::Borrowed(fallback),
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));

    match inner {
        Some(inner) => {
            let inner = inner.trim_start();
            inner.strip_suffix("```").map(str::trim).unwrap_or(inner)
        }
        None => text,
    }
}

fn truncate_for_error(text: &str) -> String {
    let snippet: String = text.chars().take(120).collect();
    if snippet.len() < text.len() {
        format!("{}...", snippet)
    } else {
        snippet
    }
}
