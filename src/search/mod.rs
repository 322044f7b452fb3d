//! Company research and tutorial lookup via the DuckDuckGo Instant Answer API
//!
//! Lookups are best effort: transport or decoding failures are logged and
//! reported as "nothing found" so callers can fall back to the LLM.

use crate::config::SearchConfig;
use crate::error::{CareerForgeError, Result};
use anyhow::Context;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstantAnswer {
    #[serde(default)]
    abstract_text: String,
    #[serde(default, rename = "AbstractURL")]
    abstract_url: String,
    #[serde(default)]
    related_topics: Vec<RelatedTopic>,
}

/// Topics are either plain entries or named groups of entries
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RelatedTopic {
    Entry {
        #[serde(rename = "Text")]
        text: String,
        #[serde(rename = "FirstURL", default)]
        first_url: String,
    },
    Group {
        #[serde(rename = "Topics")]
        topics: Vec<RelatedTopic>,
    },
}

impl RelatedTopic {
    fn flatten<'a>(&'a self, out: &mut Vec<(&'a str, &'a str)>) {
        match self {
            RelatedTopic::Entry { text, first_url } => out.push((text, first_url)),
            RelatedTopic::Group { topics } => topics.iter().for_each(|t| t.flatten(out)),
        }
    }
}

impl InstantAnswer {
    fn summarize(&self, max_topics: usize) -> Option<String> {
        let text = self.abstract_text.trim();
        if !text.is_empty() {
            return Some(if self.abstract_url.is_empty() {
                text.to_string()
            } else {
                format!("{}\nSource: {}", text, self.abstract_url)
            });
        }

        let mut entries = Vec::new();
        self.related_topics.iter().for_each(|t| t.flatten(&mut entries));

        let bullets: Vec<String> = entries
            .into_iter()
            .filter(|(text, _)| !text.trim().is_empty())
            .take(max_topics)
            .map(|(text, url)| {
                if url.is_empty() {
                    format!("- {}", text.trim())
                } else {
                    format!("- {} ({})", text.trim(), url)
                }
            })
            .collect();

        (!bullets.is_empty()).then(|| bullets.join("\n"))
    }
}

pub struct CompanySearch {
    client: Client,
    endpoint: String,
    enabled: bool,
    max_topics: usize,
}

impl CompanySearch {
    pub fn new(config: &SearchConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("career-forge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CareerForgeError::Search(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            enabled: config.enabled,
            max_topics: config.max_topics,
        })
    }

    /// Short text about `query`, or `None` when search is off, finds nothing or fails
    pub async fn company_info(&self, query: &str) -> Option<String> {
        if !self.enabled || query.trim().is_empty() {
            return None;
        }

        match self.lookup(query).await {
            Ok(answer) => {
                let summary = answer.summarize(self.max_topics);
                debug!("Search for {:?} found {}", query, if summary.is_some() { "a result" } else { "nothing" });
                summary
            }
            Err(e) => {
                warn!("Search for {:?} failed: {:#}", query, e);
                None
            }
        }
    }

    async fn lookup(&self, query: &str) -> anyhow::Result<InstantAnswer> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("format", "json"), ("no_html", "1"), ("skip_disambig", "1")])
            .send()
            .await
            .context("request failed")?
            .error_for_status()
            .context("search endpoint returned an error status")?;

        // The API answers with an empty body for some queries
        let body = response.text().await.context("failed to read body")?;
        if body.trim().is_empty() {
            return Ok(InstantAnswer::default());
        }
        serde_json::from_str(&body).context("unexpected response shape")
    }

    /// One `(skill, resource)` pair per skill, at most `limit` skills.
    /// The resource is a search result or, failing that, a YouTube search link.
    pub async fn tutorial_links<S: AsRef<str>>(&self, skills: &[S], limit: usize) -> Vec<(String, String)> {
        let mut links = Vec::new();
        for skill in skills.iter().take(limit) {
            let skill = skill.as_ref();
            let resource = match self.company_info(&format!("{} tutorial", skill)).await {
                Some(info) => info,
                None => youtube_search_link(skill),
            };
            links.push((skill.to_string(), resource));
        }
        links
    }
}

pub fn youtube_search_link(skill: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}+tutorial",
        skill.replace(' ', "+")
    )
}
