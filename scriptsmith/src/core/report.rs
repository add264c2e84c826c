//! Report assembly for multi-stage analysis runs.

use chrono::{DateTime, Utc};

use crate::core::types::InvocationResult;

/// A labelled report section in workflow order.
#[derive(Debug, Clone)]
pub struct ReportSection {
    /// Section title, carried from the stage declaration verbatim.
    pub label: String,
    pub result: InvocationResult,
}

/// An ordered multi-section analysis report.
///
/// Sections keep the order of the workflow definition, never the order of
/// completion. Constructed in memory, serialized once, then immutable.
#[derive(Debug, Clone)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(generated_at: DateTime<Utc>, sections: Vec<ReportSection>) -> Self {
        Self {
            generated_at,
            sections,
        }
    }

    /// Render the report as markdown.
    ///
    /// A failed stage renders as an error placeholder under its own heading;
    /// failure degrades section content, never section structure.
    pub fn to_markdown(&self) -> String {
        let mut buf = String::new();
        buf.push_str("# Project Analysis Report\n\n");
        buf.push_str(&format!(
            "Generated: {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        for section in &self.sections {
            buf.push_str(&format!("\n## {}\n\n", section.label));
            match &section.result {
                InvocationResult::Success(text) => buf.push_str(text.trim()),
                InvocationResult::Failure(reason) => {
                    buf.push_str(&format!("[stage failed: {reason}]"));
                }
            }
            buf.push('\n');
        }
        buf
    }
}
