//! Heatmap renderers: colored console, HTML with `<mark>`, JSON

use crate::cli::ArtifactFormat;
use crate::error::{CareerForgeError, Result};
use crate::matching::{HeatmapMatcher, Span};
use askama::Template;
use colored::Colorize;
use serde::Serialize;

const MATCH_TAG: &str = "MATCH";

pub fn render_console(matcher: &HeatmapMatcher, text: &str, use_colors: bool) -> String {
    matcher
        .spans(text)
        .map(|span| match (span.is_match(), use_colors) {
            (false, _) => span.text.to_string(),
            (true, true) => format!(
                "{}{}",
                span.text.on_truecolor(255, 0, 255).white().bold(),
                format!(" {} ", MATCH_TAG).truecolor(255, 0, 255)
            ),
            (true, false) => format!("[{}|{}]", span.text, MATCH_TAG),
        })
        .collect()
}

struct HtmlSpan<'t> {
    text: &'t str,
    matched: bool,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Keyword Heatmap</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #0f172a; color: #e2e8f0; max-width: 900px; margin: 0 auto; padding: 20px; }
        .resume { white-space: pre-wrap; line-height: 1.7; background: #1e293b; padding: 24px; border-radius: 8px; }
        mark { background: #ff00ff; color: #fff; border-radius: 3px; padding: 0 2px; }
        mark::after { content: " MATCH"; font-size: 0.65em; font-weight: bold; vertical-align: super; }
    </style>
</head>
<body>
    <h1>🔥 Keyword Heatmap</h1>
    <p>{{ match_count }} highlighted matches for {{ keyword_count }} keywords</p>
    <div class="resume">{%- for span in spans -%}{%- if span.matched -%}<mark>{{ span.text }}</mark>{%- else -%}{{ span.text }}{%- endif -%}{%- endfor -%}</div>
</body>
</html>
"#
)]
struct HeatmapTemplate<'t> {
    spans: Vec<HtmlSpan<'t>>,
    match_count: usize,
    keyword_count: usize,
}

pub fn render_html(matcher: &HeatmapMatcher, text: &str, keyword_count: usize) -> Result<String> {
    let spans: Vec<HtmlSpan> = matcher
        .spans(text)
        .map(|span| HtmlSpan { text: span.text, matched: span.is_match() })
        .collect();
    let match_count = spans.iter().filter(|s| s.matched).count();

    HeatmapTemplate { spans, match_count, keyword_count }
        .render()
        .map_err(|e| CareerForgeError::OutputFormatting(e.to_string()))
}

#[derive(Serialize)]
struct HeatmapJson<'k, 't> {
    keywords: &'k [String],
    match_count: usize,
    spans: Vec<Span<'t>>,
}

pub fn render_json(matcher: &HeatmapMatcher, text: &str, keywords: &[String]) -> Result<String> {
    let spans: Vec<Span> = matcher.spans(text).collect();
    let match_count = spans.iter().filter(|s| s.is_match()).count();
    Ok(serde_json::to_string_pretty(&HeatmapJson { keywords, match_count, spans })?)
}

pub fn render(format: ArtifactFormat, keywords: &[String], text: &str, use_colors: bool) -> Result<String> {
    let matcher = HeatmapMatcher::new(keywords)?;
    match format {
        ArtifactFormat::Console => Ok(render_console(&matcher, text, use_colors)),
        ArtifactFormat::Html => render_html(&matcher, text, keywords.len()),
        ArtifactFormat::Json => render_json(&matcher, text, keywords),
    }
}
