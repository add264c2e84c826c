//! Workflow composition: ordered multi-stage analysis runs.
//!
//! A workflow is a declared ordered list of stages, executed strictly in
//! sequence. Each stage makes one backend call; its result — success or
//! failure — becomes a report section under the stage's label. One stage's
//! backend error never prevents later stages from running or appearing in
//! the report.

use std::path::Path;

use chrono::Utc;
use tracing::{info, instrument};

use crate::core::prompt::{PromptBuilder, PromptInputs};
use crate::core::report::{Report, ReportSection};
use crate::core::task::{TaskKind, model_for};
use crate::core::types::InvocationResult;
use crate::io::config::Config;
use crate::io::invoker::{ModelRunner, invoke};
use crate::io::source::{read_excerpt_or_placeholder, summarize_root};

/// One declared workflow stage.
#[derive(Debug, Clone)]
pub struct Stage {
    /// Section title carried into the report verbatim.
    pub label: String,
    pub kind: TaskKind,
    pub inputs: PromptInputs,
}

impl Stage {
    pub fn new(label: impl Into<String>, kind: TaskKind, inputs: PromptInputs) -> Self {
        Self {
            label: label.into(),
            kind,
            inputs,
        }
    }
}

/// Run every stage in declared order and assemble the report.
///
/// The report is returned only after all stages have completed; sections
/// keep declaration order regardless of per-stage latency or failure.
#[instrument(skip_all, fields(stages = stages.len()))]
pub fn run_workflow<R: ModelRunner>(stages: &[Stage], config: &Config, runner: &R) -> Report {
    let prompts = PromptBuilder::new(config.truncation_budget);
    let mut sections = Vec::with_capacity(stages.len());
    for stage in stages {
        info!(label = %stage.label, kind = stage.kind.as_str(), "running stage");
        let result = run_stage(stage, &prompts, config, runner);
        sections.push(ReportSection {
            label: stage.label.clone(),
            result,
        });
    }
    Report::new(Utc::now(), sections)
}

fn run_stage<R: ModelRunner>(
    stage: &Stage,
    prompts: &PromptBuilder,
    config: &Config,
    runner: &R,
) -> InvocationResult {
    let prompt = match prompts.render(stage.kind, &stage.inputs) {
        Ok(prompt) => prompt,
        Err(err) => return InvocationResult::Failure(format!("prompt rendering failed: {err:#}")),
    };
    let model = model_for(stage.kind, &config.models);
    invoke(runner, model, &prompt, config.timeout_for(stage.kind))
}

/// The fixed project-analysis workflow, in report order.
///
/// Sample files that cannot be read degrade to placeholder inputs; the
/// stages still run and keep their place in the report.
pub fn analysis_stages(root: &Path, config: &Config) -> Vec<Stage> {
    let structure = summarize_root(root);
    vec![
        Stage::new(
            "Project Structure Analysis",
            TaskKind::StructureAnalysis,
            PromptInputs {
                structure: structure.clone(),
                ..Default::default()
            },
        ),
        Stage::new(
            "Code Review",
            TaskKind::Review,
            PromptInputs {
                code: read_excerpt_or_placeholder(&root.join(&config.analysis.code_sample)),
                ..Default::default()
            },
        ),
        Stage::new(
            "Script Generator Review",
            TaskKind::Review,
            PromptInputs {
                code: read_excerpt_or_placeholder(&root.join(&config.analysis.generator_sample)),
                ..Default::default()
            },
        ),
        Stage::new(
            "Improvement Recommendations",
            TaskKind::Recommend,
            PromptInputs {
                structure,
                ..Default::default()
            },
        ),
    ]
}
