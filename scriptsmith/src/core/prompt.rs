//! Prompt rendering from embedded templates.
//!
//! One template per task kind, embedded at compile time. Rendering is pure
//! and deterministic: identical inputs always produce identical prompts.

use anyhow::{Context, Result};
use minijinja::{Environment, context};

use crate::core::task::TaskKind;

const GENERATE_TEMPLATE: &str = include_str!("prompts/generate.md");
const IMPROVE_TEMPLATE: &str = include_str!("prompts/improve.md");
const EXPLAIN_TEMPLATE: &str = include_str!("prompts/explain.md");
const REVIEW_TEMPLATE: &str = include_str!("prompts/review.md");
const STRUCTURE_TEMPLATE: &str = include_str!("prompts/structure.md");
const RECOMMEND_TEMPLATE: &str = include_str!("prompts/recommend.md");

/// Named string inputs for prompt rendering.
///
/// Each task kind reads the fields it needs and ignores the rest.
#[derive(Debug, Clone, Default)]
pub struct PromptInputs {
    /// Free-text task description (`generate`).
    pub description: String,
    /// Target language name (`generate`).
    pub language: String,
    /// Script text or code excerpt (`improve`, `explain`, `review`).
    pub code: String,
    /// Structural description of a project (`structure-analysis`, `recommend`).
    pub structure: String,
}

/// Renders task prompts, bounding oversized inputs to a character budget.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    truncation_budget: usize,
}

impl PromptBuilder {
    /// Create a builder with the given truncation budget in characters.
    pub fn new(truncation_budget: usize) -> Self {
        Self { truncation_budget }
    }

    /// Render the prompt for `kind` from `inputs`.
    ///
    /// `code` and `structure` inputs longer than the budget are truncated to
    /// that prefix before embedding. This bounds prompt size deliberately;
    /// the budget is configuration, not a defect.
    pub fn render(&self, kind: TaskKind, inputs: &PromptInputs) -> Result<String> {
        let env = engine();
        let template = env
            .get_template(kind.as_str())
            .with_context(|| format!("missing template for {}", kind.as_str()))?;
        let rendered = template
            .render(context! {
                description => inputs.description.as_str(),
                language => inputs.language.as_str(),
                code => truncate_to_budget(&inputs.code, self.truncation_budget),
                structure => truncate_to_budget(&inputs.structure, self.truncation_budget),
            })
            .with_context(|| format!("render {} prompt", kind.as_str()))?;
        Ok(rendered)
    }
}

fn engine() -> Environment<'static> {
    let mut env = Environment::new();
    for (kind, source) in [
        (TaskKind::Generate, GENERATE_TEMPLATE),
        (TaskKind::Improve, IMPROVE_TEMPLATE),
        (TaskKind::Explain, EXPLAIN_TEMPLATE),
        (TaskKind::Review, REVIEW_TEMPLATE),
        (TaskKind::StructureAnalysis, STRUCTURE_TEMPLATE),
        (TaskKind::Recommend, RECOMMEND_TEMPLATE),
    ] {
        env.add_template(kind.as_str(), source)
            .expect("embedded template should be valid");
    }
    env
}

/// Keep at most `budget` characters, preserving the prefix.
fn truncate_to_budget(text: &str, budget: usize) -> &str {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
