//! Keyword heatmap: splits resume text into literal and matched spans

use crate::error::{CareerForgeError, Result};
use regex::{Matches, Regex, RegexBuilder};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanStyle {
    Literal,
    Matched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span<'t> {
    pub text: &'t str,
    pub style: SpanStyle,
}

impl Span<'_> {
    pub fn is_match(&self) -> bool {
        self.style == SpanStyle::Matched
    }
}

/// Case-insensitive alternation of the escaped keywords, in list order.
///
/// Overlapping keywords are not resolved: the regex engine reports the
/// leftmost match and, at equal positions, the earliest keyword in the list.
pub struct HeatmapMatcher {
    pattern: Option<Regex>,
    keywords: HashSet<String>,
}

impl HeatmapMatcher {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        let keywords: Vec<&str> = keywords
            .iter()
            .map(|k| k.as_ref())
            .filter(|k| !k.is_empty())
            .collect();

        let pattern = if keywords.is_empty() {
            None
        } else {
            let alternation = keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let regex = RegexBuilder::new(&format!("({})", alternation))
                .case_insensitive(true)
                .build()
                .map_err(|e| CareerForgeError::InvalidInput(format!("Failed to build keyword pattern: {}", e)))?;
            Some(regex)
        };

        Ok(Self {
            pattern,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        })
    }

    /// Lazily partition `text`; concatenating the spans gives back `text`
    pub fn spans<'m, 't>(&'m self, text: &'t str) -> Spans<'m, 't> {
        Spans {
            matches: self.pattern.as_ref().map(|p| p.find_iter(text)),
            keywords: &self.keywords,
            text,
            pos: 0,
            pending: None,
        }
    }

    pub fn match_count(&self, text: &str) -> usize {
        self.spans(text).filter(Span::is_match).count()
    }
}

pub struct Spans<'m, 't> {
    matches: Option<Matches<'m, 't>>,
    keywords: &'m HashSet<String>,
    text: &'t str,
    pos: usize,
    pending: Option<Span<'t>>,
}

impl<'m, 't> Iterator for Spans<'m, 't> {
    type Item = Span<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(span) = self.pending.take() {
            return Some(span);
        }

        if let Some(m) = self.matches.as_mut().and_then(|matches| matches.next()) {
            let style = if self.keywords.contains(&m.as_str().to_lowercase()) {
                SpanStyle::Matched
            } else {
                SpanStyle::Literal
            };
            let matched = Span { text: m.as_str(), style };
            let literal = &self.text[self.pos..m.start()];
            self.pos = m.end();

            if literal.is_empty() {
                return Some(matched);
            }
            self.pending = Some(matched);
            return Some(Span { text: literal, style: SpanStyle::Literal });
        }

        if self.pos < self.text.len() {
            let rest = &self.text[self.pos..];
            self.pos = self.text.len();
            return Some(Span { text: rest, style: SpanStyle::Literal });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rebuild(spans: &[Span<'_>]) -> String {
        spans.iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_single_keyword() {
        let text = "I know Python and SQL";
        let matcher = HeatmapMatcher::new(&["Python"]).unwrap();
        let spans: Vec<_> = matcher.spans(text).collect();

        assert_eq!(rebuild(&spans), text);
        assert_eq!(spans.iter().filter(|s| s.is_match()).count(), 1);
        assert_eq!(
            spans,
            vec![
                Span { text: "I know ", style: SpanStyle::Literal },
                Span { text: "Python", style: SpanStyle::Matched },
                Span { text: " and SQL", style: SpanStyle::Literal },
            ]
        );
    }

    #[test]
    fn test_case_insensitive() {
        let text = "I know python and SQL";
        let matcher = HeatmapMatcher::new(&["Python"]).unwrap();
        let spans: Vec<_> = matcher.spans(text).collect();

        assert_eq!(rebuild(&spans), text);
        let matched: Vec<_> = spans.iter().filter(|s| s.is_match()).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].text, "python");
    }

    #[test]
    fn test_keywords_are_escaped() {
        let text = "C++ and C# and Node.js, not Nodexjs";
        let matcher = HeatmapMatcher::new(&["c++", "C#", "node.js"]).unwrap();
        let matched: Vec<_> = matcher.spans(text).filter(|s| s.is_match()).map(|s| s.text).collect();
        assert_eq!(matched, vec!["C++", "C#", "Node.js"]);
    }

    #[test]
    fn test_adjacent_and_edge_matches() {
        let text = "SQLPython";
        let matcher = HeatmapMatcher::new(&["python", "sql"]).unwrap();
        let spans: Vec<_> = matcher.spans(text).collect();
        assert_eq!(spans.len(), 2);
        assert!(spans.iter().all(|s| s.is_match()));
        assert_eq!(rebuild(&spans), text);
    }

    #[test]
    fn test_list_order_wins_on_overlap() {
        let text = "JavaScript";
        let first = HeatmapMatcher::new(&["Java", "JavaScript"]).unwrap();
        let spans: Vec<_> = first.spans(text).collect();
        assert_eq!(spans[0], Span { text: "Java", style: SpanStyle::Matched });
        assert_eq!(spans[1], Span { text: "Script", style: SpanStyle::Literal });

        let second = HeatmapMatcher::new(&["JavaScript", "Java"]).unwrap();
        let spans: Vec<_> = second.spans(text).collect();
        assert_eq!(spans, vec![Span { text: "JavaScript", style: SpanStyle::Matched }]);
    }

    #[test]
    fn test_no_keywords() {
        let matcher = HeatmapMatcher::new::<&str>(&[]).unwrap();
        let spans: Vec<_> = matcher.spans("plain text").collect();
        assert_eq!(spans, vec![Span { text: "plain text", style: SpanStyle::Literal }]);

        let empty_only = HeatmapMatcher::new(&[""]).unwrap();
        assert_eq!(empty_only.match_count("plain text"), 0);
        assert_eq!(empty_only.spans("").count(), 0);
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        let text = "Développeur Rust à Zürich, rust avancé ✓";
        let matcher = HeatmapMatcher::new(&["rust"]).unwrap();
        let spans: Vec<_> = matcher.spans(text).collect();
        assert_eq!(rebuild(&spans), text);
        assert_eq!(matcher.match_count(text), 2);
    }
}
