//! Task kinds and model routing.

use std::str::FromStr;

use anyhow::{Error, anyhow};
use serde::{Deserialize, Serialize};

/// The kinds of model tasks the orchestrator can run.
///
/// `Generate`, `Improve`, and `Explain` back the CLI subcommands directly;
/// `Review`, `StructureAnalysis`, and `Recommend` are the stage kinds of the
/// multi-stage analysis workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Generate,
    Improve,
    Explain,
    Review,
    StructureAnalysis,
    Recommend,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::Generate => "generate",
            TaskKind::Improve => "improve",
            TaskKind::Explain => "explain",
            TaskKind::Review => "review",
            TaskKind::StructureAnalysis => "structure-analysis",
            TaskKind::Recommend => "recommend",
        }
    }

    /// True for kinds whose prompt centers on code rather than narrative.
    pub fn is_code_centric(self) -> bool {
        matches!(
            self,
            TaskKind::Generate | TaskKind::Improve | TaskKind::Review
        )
    }
}

impl FromStr for TaskKind {
    type Err = Error;

    /// Parse a task-kind name, rejecting unknown names before any backend
    /// call is attempted.
    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "generate" => Ok(TaskKind::Generate),
            "improve" => Ok(TaskKind::Improve),
            "explain" => Ok(TaskKind::Explain),
            "review" => Ok(TaskKind::Review),
            "structure-analysis" => Ok(TaskKind::StructureAnalysis),
            "recommend" => Ok(TaskKind::Recommend),
            other => Err(anyhow!("unknown task kind {other:?}")),
        }
    }
}

/// The two configured backend model identifiers.
///
/// Identifiers are opaque strings passed through to the model runner; the
/// set is open for extension via configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ModelCatalog {
    /// Model serving code-centric tasks.
    pub code: String,
    /// Model serving narrative-centric tasks.
    pub general: String,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            code: "codellama:13b".to_string(),
            general: "llama2:13b".to_string(),
        }
    }
}

/// Select the model identifier that serves `kind`.
pub fn model_for(kind: TaskKind, catalog: &ModelCatalog) -> &str {
    if kind.is_code_centric() {
        &catalog.code
    } else {
        &catalog.general
    }
}
