use crate::{CheckReport, Misspelling};
use colored::*;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref ANNOTATION: Regex = Regex::new(r"\{[^{}\n]*\}").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    annotated: &'a str,
    total_errors: usize,
    misspellings: &'a [Misspelling],
}

/// Render a report for `source` (a file name, or `-` for stdin)
pub fn render_report(
    source: &str,
    report: &CheckReport,
    colored_output: bool,
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => render_text(report, colored_output),
        OutputFormat::Json => render_json(source, report),
    }
}

fn render_text(report: &CheckReport, colored_output: bool) -> String {
    if colored_output {
        highlight_annotations(&report.annotated)
    } else {
        report.annotated.clone()
    }
}

fn render_json(source: &str, report: &CheckReport) -> String {
    let output = JsonReport {
        source,
        annotated: &report.annotated,
        total_errors: report.misspellings.len(),
        misspellings: &report.misspellings,
    };

    // Plain strings and integers only, serialization cannot fail
    serde_json::to_string_pretty(&output).unwrap_or_default()
}

/// Color every inserted `{...}` annotation
pub fn highlight_annotations(annotated: &str) -> String {
    ANNOTATION
        .replace_all(annotated, |caps: &regex::Captures| {
            caps[0].green().bold().to_string()
        })
        .into_owned()
}

pub fn print_check_summary(total_errors: usize, files: usize, colored: bool) {
    let file_word = if files == 1 { "text" } else { "texts" };
    eprintln!();
    if total_errors == 0 {
        if colored {
            eprintln!("{}", "✓ No spelling errors found!".green().bold());
        } else {
            eprintln!("✓ No spelling errors found!");
        }
    } else {
        let error_word = if total_errors == 1 { "error" } else { "errors" };
        if colored {
            eprintln!(
                "{} {} {} found in {} {}",
                "✗".red().bold(),
                total_errors.to_string().red().bold(),
                error_word,
                files,
                file_word
            );
        } else {
            eprintln!(
                "✗ {} {} found in {} {}",
                total_errors, error_word, files, file_word
            );
        }
    }
}
