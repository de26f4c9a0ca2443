//! Text, markdown and JSON renderings of an audit result.

use std::fmt::Write as _;

use variant_model::{AuditOutcome, Report};

/// Shown instead of an empty markdown report.
pub const EMPTY_REPORT_MESSAGE: &str = "没有可能存在错误的繁简转换";

/// One `"<char> -> <variants>"` header per character, then one indented line per occurrence.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    for entry in report.entries() {
        let _ = writeln!(out, "{} -> {}", entry.character, entry.variants);
        for occ in &entry.occurrences {
            let _ = writeln!(out, "    {}\t……{}……\t{}", occ.chapter, occ.context, occ.link);
        }
    }
    out
}

pub fn render_markdown(report: &Report) -> String {
    if report.is_empty() {
        return format!("{EMPTY_REPORT_MESSAGE}\n");
    }
    let mut out = String::new();
    for entry in report.entries() {
        let variants: Vec<String> = entry.variant_chars().iter().map(|c| c.to_string()).collect();
        let _ = writeln!(out, "### {} => {}", entry.character, variants.join(","));
        out.push('\n');
        out.push_str("| ID | 章节 | 上下文 |\n");
        out.push_str("| --- | --- | --- |\n");
        for (i, occ) in entry.occurrences.iter().enumerate() {
            let context = emphasize(&occ.context, entry.character);
            let _ = writeln!(out, "| {} | {} | ...[{}]({})... |", i + 1, escape_cell(&occ.chapter), context, occ.link);
        }
        out.push('\n');
    }
    out
}

/// Pretty JSON of the whole outcome, report entries in key order.
pub fn render_json(outcome: &AuditOutcome) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(outcome)
}

fn emphasize(context: &str, c: char) -> String {
    let mut out = String::with_capacity(context.len() + 8);
    for ch in context.chars() {
        match ch {
            _ if ch == c => {
                let _ = write!(out, " **{ch}** ");
            }
            '|' => out.push_str("\\|"),
            '[' | ']' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
