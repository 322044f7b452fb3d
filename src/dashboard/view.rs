//! Terminal text for action results

use super::{GradedAnswer, Roadmap, NO_MISSING_SKILLS};
use crate::output::report::ScoreBand;
use crate::session::ScanRecord;
use colored::{Color, Colorize};

pub fn section(title: &str, use_colors: bool) -> String {
    if use_colors {
        format!("\n{} {}\n", "▓".magenta().bold(), title.magenta().bold())
    } else {
        format!("\n▓ {}\n", title)
    }
}

pub fn score_line(score: u8, use_colors: bool) -> String {
    let band = ScoreBand::of(score);
    let text = format!("🎯 Match score: {}% [{}]", score, band.label());
    if !use_colors {
        return text;
    }
    let color = match band {
        ScoreBand::Excellent | ScoreBand::VeryGood => Color::Green,
        ScoreBand::Good | ScoreBand::Fair => Color::Yellow,
        ScoreBand::BelowAverage | ScoreBand::Poor => Color::Red,
    };
    text.color(color).bold().to_string()
}

pub fn graded_answer(graded: &GradedAnswer, use_colors: bool) -> String {
    let mut out = String::new();
    if let Some(transcript) = &graded.transcript {
        out.push_str(&section("Transcript", use_colors));
        out.push_str(transcript);
        out.push('\n');
    }
    out.push_str(&section("Feedback", use_colors));
    out.push_str(&graded.feedback);
    out.push('\n');
    out
}

pub fn roadmap(roadmap: &Roadmap, use_colors: bool) -> String {
    let mut out = section("Learning Roadmap", use_colors);
    if !roadmap.focus.is_empty() {
        out.push_str(&format!("Focus: {}\n\n", roadmap.focus));
    }
    out.push_str(&roadmap.plan);
    out.push('\n');

    out.push_str(&section("Tutorials", use_colors));
    if roadmap.tutorials.is_empty() {
        out.push_str(NO_MISSING_SKILLS);
        out.push('\n');
    }
    for (skill, resource) in &roadmap.tutorials {
        out.push_str(&format!("📚 {}\n{}\n\n", skill, resource));
    }
    out
}

pub fn history(records: &[ScanRecord]) -> String {
    if records.is_empty() {
        return "No scans yet.\n".to_string();
    }
    let mut out = format!("{:<10} {:<28} {:>5}\n", "Time", "Company", "Score");
    for record in records {
        out.push_str(&format!(
            "{:<10} {:<28} {:>4}%\n",
            record.scanned_at.format("%H:%M:%S"),
            record.company,
            record.score
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn test_plain_score_line() {
        assert_eq!(score_line(91, false), "🎯 Match score: 91% [EXCELLENT]");
    }

    #[test]
    fn test_roadmap_text() {
        let text = roadmap(
            &Roadmap {
                focus: "Go".to_string(),
                plan: "Week 1".to_string(),
                tutorials: vec![("Go".to_string(), "https://go.dev/tour".to_string())],
            },
            false,
        );
        assert!(text.contains("Focus: Go"));
        assert!(text.contains("📚 Go\nhttps://go.dev/tour"));
        assert!(!text.contains(NO_MISSING_SKILLS));

        let done = roadmap(
            &Roadmap { focus: "General".to_string(), plan: "Keep practising".to_string(), tutorials: vec![] },
            false,
        );
        assert!(done.contains("Keep practising"));
        assert!(done.trim_end().ends_with(NO_MISSING_SKILLS));
    }

    #[test]
    fn test_history_table() {
        assert_eq!(history(&[]), "No scans yet.\n");
        let records = vec![ScanRecord { company: "Acme".to_string(), score: 7, scanned_at: Local::now() }];
        let table = history(&records);
        assert_eq!(table.lines().count(), 2);
        assert!(table.lines().nth(1).unwrap().contains("Acme"));
        assert!(table.trim_end().ends_with("7%"));
    }

    #[test]
    fn test_graded_answer_with_transcript() {
        let text = graded_answer(
            &GradedAnswer { transcript: Some("I said".to_string()), feedback: "8/10".to_string() },
            false,
        );
        assert!(text.find("I said").unwrap() < text.find("8/10").unwrap());
    }
}
