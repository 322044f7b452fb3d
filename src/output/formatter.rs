//! Report formatters: console, JSON, Markdown, HTML and PDF

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{CareerForgeError, Result};
use crate::output::report::{AnalysisReport, ScoreBand};
use askama::Template;
use colored::{Color, Colorize};
use log::debug;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use pulldown_cmark::{html, Event, Parser};
use std::path::Path;

/// Rendered report; PDF is the only binary format
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutput {
    Text(String),
    Binary(Vec<u8>),
}

impl ReportOutput {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ReportOutput::Text(text) => text.as_bytes(),
            ReportOutput::Binary(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ReportOutput::Text(text) => Some(text),
            ReportOutput::Binary(_) => None,
        }
    }
}

pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<ReportOutput>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter;

pub struct PdfFormatter;

/// Picks the formatter for a format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
    pdf_formatter: PdfFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, band: ScoreBand) -> String {
        let color = match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::VeryGood => Color::BrightGreen,
            ScoreBand::Good => Color::Yellow,
            ScoreBand::Fair => Color::BrightYellow,
            ScoreBand::BelowAverage => Color::Red,
            ScoreBand::Poor => Color::BrightRed,
        };

        if self.use_colors {
            format!("[{}]", band.label().color(color).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    fn format_list(&self, items: &[String], color: Color, marker: &str) -> String {
        if items.is_empty() {
            return "  (none)\n".to_string();
        }
        items
            .iter()
            .map(|item| format!("  {} {}\n", marker, self.colorize(item, color)))
            .collect()
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<ReportOutput> {
        let mut output = String::new();

        output.push_str(&self.format_header("🔥 CAREERFORGE MATCH REPORT", 1));
        output.push_str(&format!(
            "Candidate: {} | Company: {} | Generated: {}\n",
            report.candidate,
            report.company,
            report.generated_at_display()
        ));

        output.push_str(&self.format_header("Match Score", 2));
        output.push_str(&format!("Score: {}% {}\n", report.score, self.format_score_badge(report.band())));
        output.push_str(&format!("Reviewed as: {}\n", self.colorize(report.persona.label(), Color::Cyan)));

        output.push_str(&self.format_header(&format!("{} Review", report.persona.label()), 2));
        output.push_str(report.analysis.trim());
        output.push('\n');

        if !report.present_skills.is_empty() || !report.missing_skills.is_empty() {
            output.push_str(&self.format_header("Skills", 2));
            output.push_str("Have:\n");
            output.push_str(&self.format_list(&report.present_skills, Color::Green, "✓"));
            output.push_str("Need:\n");
            output.push_str(&self.format_list(&report.missing_skills, Color::Yellow, "✗"));
        }

        if self.detailed {
            output.push_str(&self.format_header("Matched Keywords", 3));
            if report.matched_keywords.is_empty() {
                output.push_str("  (run heatmap to collect keywords)\n");
            } else {
                output.push_str(&format!("  {}\n", report.matched_keywords.join(", ")));
            }

            if !report.company_context.trim().is_empty() {
                output.push_str(&self.format_header("Company Context", 3));
                output.push_str(report.company_context.trim());
                output.push('\n');
            }

            if report.history.len() > 1 {
                output.push_str(&self.format_header("Scan History", 3));
                for record in &report.history {
                    output.push_str(&format!(
                        "  {} {:<24} {}%\n",
                        record.scanned_at.format("%H:%M:%S"),
                        record.company,
                        record.score
                    ));
                }
            }

            output.push_str(&format!(
                "\nResume words: {} | Model: {}\n",
                report.resume_word_count, report.model_used
            ));
        }

        Ok(ReportOutput::Text(output))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<ReportOutput> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(ReportOutput::Text(json))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(band: ScoreBand) -> &'static str {
        match band {
            ScoreBand::Excellent => "🟢 Excellent",
            ScoreBand::VeryGood | ScoreBand::Good => "🔵 Good",
            ScoreBand::Fair | ScoreBand::BelowAverage => "🟡 Fair",
            ScoreBand::Poor => "🔴 Needs Work",
        }
    }

    fn bullet_list(items: &[String]) -> String {
        if items.is_empty() {
            return "_None identified._\n".to_string();
        }
        items.iter().map(|item| format!("- {}\n", item)).collect()
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<ReportOutput> {
        let mut output = String::new();

        output.push_str(&format!("# 🔥 CareerForge Match Report: {}\n\n", report.candidate));

        if self.include_metadata {
            output.push_str(&format!(
                "**Company:** {} | **Persona:** {} | **Generated:** {} | **Model:** `{}`\n\n",
                report.company,
                report.persona.label(),
                report.generated_at_display(),
                report.model_used
            ));
        }

        output.push_str("## Match Score\n\n");
        output.push_str(&format!(
            "**{}%** {}\n\n",
            report.score,
            Self::markdown_score_badge(report.band())
        ));

        output.push_str(&format!("## {} Review\n\n", report.persona.label()));
        output.push_str(report.analysis.trim());
        output.push_str("\n\n");

        output.push_str("## Skills\n\n### ✅ Have\n\n");
        output.push_str(&Self::bullet_list(&report.present_skills));
        output.push_str("\n### ⚠️ Need\n\n");
        output.push_str(&Self::bullet_list(&report.missing_skills));

        if !report.matched_keywords.is_empty() {
            output.push_str("\n## Matched Keywords\n\n");
            let tags: Vec<String> = report.matched_keywords.iter().map(|k| format!("`{}`", k)).collect();
            output.push_str(&tags.join(" "));
            output.push('\n');
        }

        if !report.company_context.trim().is_empty() {
            output.push_str("\n## Company Context\n\n");
            output.push_str(report.company_context.trim());
            output.push('\n');
        }

        if report.history.len() > 1 {
            output.push_str("\n## Scan History\n\n| Time | Company | Score |\n|------|---------|-------|\n");
            for record in &report.history {
                output.push_str(&format!(
                    "| {} | {} | {}% |\n",
                    record.scanned_at.format("%H:%M:%S"),
                    record.company,
                    record.score
                ));
            }
        }

        output.push_str(&format!("\n---\n_Generated by CareerForge v{}_\n", env!("CARGO_PKG_VERSION")));

        Ok(ReportOutput::Text(output))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

/// Render model markdown to HTML; raw HTML in the reply is escaped, not passed through
pub(crate) fn markdown_to_html(markdown: &str) -> String {
    let events = Parser::new(markdown).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, events);
    out
}

struct HistoryRow {
    time: String,
    company: String,
    score: u8,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>CareerForge Match Report: {{ candidate }}</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #e2e8f0; background: #0f172a; max-width: 900px; margin: 0 auto; padding: 20px; }
        .container { background: #1e293b; padding: 30px; border-radius: 8px; }
        .header { text-align: center; border-bottom: 3px solid #6366f1; padding-bottom: 20px; margin-bottom: 30px; }
        .score-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .score-excellent { background: #10b981; }
        .score-good { background: #6366f1; }
        .score-fair { background: #f59e0b; color: #000; }
        .score-poor { background: #ef4444; }
        h2 { color: #a78bfa; border-bottom: 2px solid #334155; padding-bottom: 8px; }
        .skills { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; }
        .have li { color: #34d399; }
        .need li { color: #fbbf24; }
        .tag { display: inline-block; background: #ff00ff; color: #fff; border-radius: 4px; padding: 2px 8px; margin: 2px; }
        table { border-collapse: collapse; width: 100%; }
        td, th { border-bottom: 1px solid #334155; padding: 6px; text-align: left; }
        .meta { color: #94a3b8; font-size: 0.9em; }
    </style>
</head>
<body>
<div class="container">
    <div class="header">
        <h1>🔥 CareerForge Match Report</h1>
        <p>{{ candidate }} &middot; {{ company }}</p>
        <p><strong>{{ score }}%</strong><span class="score-badge {{ score_class }}">{{ score_label }}</span></p>
        <p class="meta">Reviewed as {{ persona }} &middot; {{ generated_at }}</p>
    </div>

    <h2>{{ persona }} Review</h2>
    <div class="analysis">{{ analysis_html|safe }}</div>

    <h2>Skills</h2>
    <div class="skills">
        <div class="have"><h3>✅ Have</h3><ul>{% for skill in present_skills %}<li>{{ skill }}</li>{% endfor %}</ul></div>
        <div class="need"><h3>⚠️ Need</h3><ul>{% for skill in missing_skills %}<li>{{ skill }}</li>{% endfor %}</ul></div>
    </div>
{% if !matched_keywords.is_empty() %}
    <h2>Matched Keywords</h2>
    <p>{% for keyword in matched_keywords %}<span class="tag">{{ keyword }}</span>{% endfor %}</p>
{% endif %}
{% if !company_context.is_empty() %}
    <h2>Company Context</h2>
    <p>{{ company_context }}</p>
{% endif %}
{% if history.len() > 1 %}
    <h2>Scan History</h2>
    <table>
        <tr><th>Time</th><th>Company</th><th>Score</th></tr>
        {% for row in history %}<tr><td>{{ row.time }}</td><td>{{ row.company }}</td><td>{{ row.score }}%</td></tr>{% endfor %}
    </table>
{% endif %}
    <p class="meta">Resume words: {{ resume_word_count }} &middot; Model: {{ model_used }} &middot; CareerForge v{{ version }}</p>
</div>
</body>
</html>
"#
)]
struct HtmlReportTemplate<'a> {
    candidate: &'a str,
    company: &'a str,
    score: u8,
    score_class: &'static str,
    score_label: &'static str,
    persona: &'static str,
    generated_at: String,
    analysis_html: String,
    present_skills: &'a [String],
    missing_skills: &'a [String],
    matched_keywords: &'a [String],
    company_context: &'a str,
    history: Vec<HistoryRow>,
    resume_word_count: usize,
    model_used: &'a str,
    version: &'static str,
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<ReportOutput> {
        let band = report.band();
        let template = HtmlReportTemplate {
            candidate: &report.candidate,
            company: &report.company,
            score: report.score,
            score_class: band.css_class(),
            score_label: band.label(),
            persona: report.persona.label(),
            generated_at: report.generated_at_display(),
            analysis_html: markdown_to_html(&report.analysis),
            present_skills: &report.present_skills,
            missing_skills: &report.missing_skills,
            matched_keywords: &report.matched_keywords,
            company_context: report.company_context.trim(),
            history: report
                .history
                .iter()
                .map(|r| HistoryRow {
                    time: r.scanned_at.format("%H:%M:%S").to_string(),
                    company: r.company.clone(),
                    score: r.score,
                })
                .collect(),
            resume_word_count: report.resume_word_count,
            model_used: &report.model_used,
            version: env!("CARGO_PKG_VERSION"),
        };

        let html = template
            .render()
            .map_err(|e| CareerForgeError::OutputFormatting(e.to_string()))?;
        Ok(ReportOutput::Text(html))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_CHARS: usize = 90;

/// Line-oriented writer over a printpdf document that starts new pages as needed
struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    cursor_mm: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| CareerForgeError::OutputFormatting(format!("PDF font error: {}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| CareerForgeError::OutputFormatting(format!("PDF font error: {}", e)))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        })
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        let height_mm = size * 0.5;
        if self.cursor_mm - height_mm < MARGIN_MM {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        self.cursor_mm -= height_mm;
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(pdf_safe(text), size, Mm(MARGIN_MM), Mm(self.cursor_mm), font);
    }

    fn heading(&mut self, text: &str) {
        self.gap();
        self.line(text, 14.0, true);
    }

    fn paragraph(&mut self, text: &str) {
        for source_line in text.lines() {
            if source_line.trim().is_empty() {
                self.gap();
                continue;
            }
            for wrapped in wrap(source_line, LINE_CHARS) {
                self.line(&wrapped, 10.0, false);
            }
        }
    }

    fn gap(&mut self) {
        self.cursor_mm -= 3.0;
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| CareerForgeError::OutputFormatting(format!("PDF write error: {}", e)))
    }
}

/// Builtin PDF fonts only cover Latin-1
fn pdf_safe(text: &str) -> String {
    text.chars().filter(|c| (*c as u32) < 0x100).collect()
}

fn wrap(line: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

impl OutputFormatter for PdfFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<ReportOutput> {
        let mut pdf = PdfWriter::new(&format!("CareerForge Match Report: {}", report.candidate))?;

        pdf.line("CareerForge Match Report", 20.0, true);
        pdf.line(
            &format!("{} | {} | {}", report.candidate, report.company, report.generated_at_display()),
            10.0,
            false,
        );

        pdf.heading("Match Score");
        pdf.line(&format!("{}% [{}]", report.score, report.band().label()), 12.0, true);
        pdf.line(&format!("Reviewed as {}", report.persona.label()), 10.0, false);

        pdf.heading(&format!("{} Review", report.persona.label()));
        pdf.paragraph(&report.analysis);

        pdf.heading("Skills You Have");
        pdf.paragraph(&list_or_none(&report.present_skills));
        pdf.heading("Skills To Learn");
        pdf.paragraph(&list_or_none(&report.missing_skills));

        if !report.matched_keywords.is_empty() {
            pdf.heading("Matched Keywords");
            pdf.paragraph(&report.matched_keywords.join(", "));
        }

        if !report.company_context.trim().is_empty() {
            pdf.heading("Company Context");
            pdf.paragraph(&report.company_context);
        }

        pdf.gap();
        pdf.line(
            &format!("Model: {} | CareerForge v{}", report.model_used, env!("CARGO_PKG_VERSION")),
            8.0,
            false,
        );

        let bytes = pdf.finish()?;
        debug!("Rendered PDF report: {} bytes", bytes.len());
        Ok(ReportOutput::Binary(bytes))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None identified.".to_string()
    } else {
        items.iter().map(|i| format!("- {}", i)).collect::<Vec<_>>().join("\n")
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter,
            pdf_formatter: PdfFormatter,
        }
    }

    pub fn from_config(config: &OutputConfig, detailed: bool) -> Self {
        Self::with_options(config.color_output, detailed || config.detailed)
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<ReportOutput> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
            OutputFormat::Pdf => self.pdf_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &[u8], file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// Print text output, or write it when a path is given; binary output needs a path
pub fn emit(output: &ReportOutput, save: Option<&Path>) -> Result<()> {
    if let Some(path) = save {
        save_report_to_file(output.as_bytes(), path)?;
        println!("💾 Saved to {}", path.display());
        return Ok(());
    }

    let text = output.as_text().ok_or_else(|| {
        CareerForgeError::InvalidInput("binary output (pdf) needs a file; pass --save".to_string())
    })?;
    println!("{}", text);
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
        OutputFormat::Pdf => "pdf",
    };

    format!("{}_match{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::prompts::Persona;
    use crate::session::ScanRecord;
    use chrono::Local;
    use tempfile::TempDir;

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            candidate: "Jane Doe".to_string(),
            score: 78,
            persona: Persona::Cto,
            company: "Acme".to_string(),
            company_context: "Acme builds rockets.".to_string(),
            analysis: "## VERDICT\nMove forward. <script>alert(1)</script>".to_string(),
            present_skills: vec!["Rust".to_string(), "SQL".to_string()],
            missing_skills: vec!["Kafka".to_string()],
            matched_keywords: vec!["Rust".to_string()],
            resume_word_count: 420,
            generated_at: Local::now(),
            model_used: "llama-3.3-70b-versatile".to_string(),
            history: vec![ScanRecord { company: "Acme".to_string(), score: 78, scanned_at: Local::now() }],
        }
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, true).format_report(&sample_report()).unwrap();
        let text = output.as_text().unwrap();

        assert!(text.contains("Score: 78% [GOOD]"));
        assert!(text.contains("✗ Kafka"));
        assert!(text.contains("Acme builds rockets."));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_json_report() {
        let output = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(output.as_text().unwrap()).unwrap();

        assert_eq!(value["score"], 78);
        assert_eq!(value["persona"], "Cto");
        assert_eq!(value["missing_skills"][0], "Kafka");
    }

    #[test]
    fn test_markdown_report() {
        let output = MarkdownFormatter::new(true).format_report(&sample_report()).unwrap();
        let text = output.as_text().unwrap();

        assert!(text.starts_with("# 🔥 CareerForge Match Report: Jane Doe"));
        assert!(text.contains("## CTO Review"));
        assert!(text.contains("- Kafka"));
        assert!(text.contains("`Rust`"));
    }

    #[test]
    fn test_html_report_escapes_model_html() {
        let output = HtmlFormatter.format_report(&sample_report()).unwrap();
        let html = output.as_text().unwrap();

        assert!(html.contains("<h2>VERDICT</h2>"));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("score-good"));
        assert!(html.contains("<li>Kafka</li>"));
    }

    #[test]
    fn test_pdf_report_is_binary_pdf() {
        let output = PdfFormatter.format_report(&sample_report()).unwrap();
        match output {
            ReportOutput::Binary(bytes) => assert!(bytes.starts_with(b"%PDF")),
            ReportOutput::Text(_) => panic!("expected binary output"),
        }
    }

    #[test]
    fn test_wrap_and_pdf_safe() {
        let lines = wrap("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
        assert_eq!(pdf_safe("Café 🚀"), "Café ");
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false);
        for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Html] {
            assert!(generator.generate_report(&sample_report(), format).unwrap().as_text().is_some());
        }
    }

    #[test]
    fn test_save_and_suggest_filename() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("report.md");
        save_report_to_file(b"# hi", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# hi");

        assert_eq!(suggest_filename(OutputFormat::Pdf, "cv/jane.pdf", false), "jane_match.pdf");

        let pdf = ReportOutput::Binary(vec![1, 2, 3]);
        assert!(emit(&pdf, None).is_err());
        let pdf_path = dir.path().join("report.pdf");
        emit(&pdf, Some(&pdf_path)).unwrap();
        assert_eq!(std::fs::read(&pdf_path).unwrap(), vec![1, 2, 3]);
    }
}
