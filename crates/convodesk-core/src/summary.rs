//! Lossy line-based conversation summarizer.
//!
//! Keeps only lines tagged `user:` / `assistant:` (case-insensitive), each
//! re-labeled and truncated at the second colon. Content after a second colon
//! is lost; the truncation is part of the output contract and must not be
//! corrected here.

use once_cell::sync::Lazy;
use regex::Regex;

static NEWLINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());

/// Degenerate a rendered transcript into re-labeled `User:` / `Assistant:`
/// lines; everything else is dropped.
pub fn summarize(transcript: &str) -> String {
    let cleaned = NEWLINE_RUNS.replace_all(transcript.trim(), "\n");

    let mut summary = Vec::new();
    for line in cleaned.split('\n') {
        let lower = line.to_lowercase();
        if lower.contains("user:") {
            summary.push(format!("User: {}", label_segment(line)));
        } else if lower.contains("assistant:") {
            summary.push(format!("Assistant: {}", label_segment(line)));
        }
    }

    summary.join("\n")
}

/// The segment between the first and second colon, trimmed.
fn label_segment(line: &str) -> String {
    line.splitn(3, ':').nth(1).unwrap_or("").trim().to_string()
}
