use crate::types::{Annotation, Severity};
use serde::Serialize;
use std::fmt::Write as _;
use std::str::FromStr;

/// Rendering formats for a finished review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per annotation
    Text,
    /// Grouped tables, suitable for a pull request comment
    Markdown,
    /// `{"fails": [...], "warnings": [...], "messages": [...]}`
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{other}' (expected text, markdown or json)"
            )),
        }
    }
}

/// The ordered annotations produced by one review pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub annotations: Vec<Annotation>,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    fails: Vec<JsonEntry<'a>>,
    warnings: Vec<JsonEntry<'a>>,
    messages: Vec<JsonEntry<'a>>,
}

impl Report {
    pub fn new(annotations: Vec<Annotation>) -> Self {
        Self { annotations }
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Annotation> {
        self.annotations
            .iter()
            .filter(move |annotation| annotation.severity == severity)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Annotation> {
        self.with_severity(Severity::Failure)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Annotation> {
        self.with_severity(Severity::Warning)
    }

    pub fn messages(&self) -> impl Iterator<Item = &Annotation> {
        self.with_severity(Severity::Message)
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Process exit status for a CI step: 1 if anything failed
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() {
            1
        } else {
            0
        }
    }

    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Markdown => Ok(self.to_markdown()),
            OutputFormat::Json => self.to_json(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for annotation in &self.annotations {
            let label = match annotation.severity {
                Severity::Failure => "❌ fail",
                Severity::Warning => "⚠️  warn",
                Severity::Message => "📖 message",
            };
            let _ = writeln!(out, "{label}: {}", annotation.text);
        }
        out
    }

    pub fn to_markdown(&self) -> String {
        let sections = [
            ("Fails", ":no_entry_sign:", Severity::Failure),
            ("Warnings", ":warning:", Severity::Warning),
            ("Messages", ":book:", Severity::Message),
        ];

        let mut out = String::new();
        for (heading, icon, severity) in sections {
            let rows: Vec<&Annotation> = self.with_severity(severity).collect();
            if rows.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            let _ = writeln!(out, "<table>");
            let _ = writeln!(
                out,
                "  <thead><tr><th width=\"50\"></th><th width=\"100%\">{} {}</th></tr></thead>",
                rows.len(),
                heading
            );
            let _ = writeln!(out, "  <tbody>");
            for annotation in rows {
                let _ = writeln!(
                    out,
                    "    <tr><td>{icon}</td><td>\n\n{}\n\n</td></tr>",
                    annotation.text
                );
            }
            let _ = writeln!(out, "  </tbody>");
            let _ = writeln!(out, "</table>");
        }
        out
    }

    fn json_entries(&self, severity: Severity) -> Vec<JsonEntry<'_>> {
        self.with_severity(severity)
            .map(|annotation| JsonEntry {
                message: &annotation.text,
                file: annotation.file.as_deref(),
            })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        let report = JsonReport {
            fails: self.json_entries(Severity::Failure),
            warnings: self.json_entries(Severity::Warning),
            messages: self.json_entries(Severity::Message),
        };
        serde_json::to_string_pretty(&report)
    }
}
