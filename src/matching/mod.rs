//! Resume / job description matching
//!
//! Everything here is local and deterministic; the LLM-backed side of
//! matching lives in [`crate::llm::agent`].

pub mod heatmap;
pub mod keywords;
pub mod score;
pub mod skills;

pub use heatmap::{HeatmapMatcher, Span, SpanStyle};
pub use keywords::KeywordMatcher;
pub use skills::SkillSet;
