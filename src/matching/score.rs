//! Match score parsing

use regex::Regex;
use std::sync::OnceLock;

/// First integer in an LLM reply, clamped to 0..=100.
/// "82", "Score: 82/100" and "82%" all give 82; decimals are truncated.
pub fn parse_score(reply: &str) -> Option<u8> {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    let number = NUMBER.get_or_init(|| Regex::new(r"\d+").expect("valid number regex"));

    let digits = number.find(reply)?.as_str();
    // Long digit runs overflow u32; anything that long is above 100 anyway
    let value = digits.parse::<u32>().unwrap_or(u32::MAX);
    Some(value.min(100) as u8)
}

/// Convert a 0.0-1.0 ratio to a whole percentage
pub fn ratio_to_score(ratio: f32) -> u8 {
    (ratio.clamp(0.0, 1.0) * 100.0).round() as u8
}
