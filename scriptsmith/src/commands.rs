//! CLI command implementations.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::core::prompt::{PromptBuilder, PromptInputs};
use crate::core::task::{TaskKind, model_for};
use crate::io::artifact::{write_generated, write_improved, write_report};
use crate::io::config::Config;
use crate::io::invoker::{ModelRunner, invoke};
use crate::io::source::read_source;
use crate::workflow::{analysis_stages, run_workflow};

/// Generate a new script from a description and persist it.
pub fn generate<R: ModelRunner>(
    config: &Config,
    runner: &R,
    description: &str,
    language: &str,
) -> Result<()> {
    let inputs = PromptInputs {
        description: description.to_string(),
        language: language.to_string(),
        ..Default::default()
    };
    let code = query(config, runner, TaskKind::Generate, &inputs)?;
    let path = write_generated(&config.output.dir, language, &code)?;
    println!("generated: {}", path.display());
    println!("{code}");
    Ok(())
}

/// Rewrite an existing script and persist the improved version next to it.
pub fn improve<R: ModelRunner>(config: &Config, runner: &R, path: &Path) -> Result<()> {
    let original = read_source(path)?;
    let inputs = PromptInputs {
        code: original,
        ..Default::default()
    };
    let code = query(config, runner, TaskKind::Improve, &inputs)?;
    let improved = write_improved(path, &code)?;
    println!("improved: {}", improved.display());
    Ok(())
}

/// Print a plain-language explanation of a script.
pub fn explain<R: ModelRunner>(config: &Config, runner: &R, path: &Path) -> Result<()> {
    let code = read_source(path)?;
    let inputs = PromptInputs {
        code,
        ..Default::default()
    };
    let text = query(config, runner, TaskKind::Explain, &inputs)?;
    println!("{text}");
    Ok(())
}

/// Run the fixed multi-stage analysis workflow and persist the report.
pub fn analyze<R: ModelRunner>(config: &Config, runner: &R, root: &Path) -> Result<()> {
    let stages = analysis_stages(root, config);
    info!(root = %root.display(), stages = stages.len(), "starting project analysis");
    let report = run_workflow(&stages, config, runner);
    let markdown = report.to_markdown();
    print!("{markdown}");
    let path = write_report(&config.output.dir, &markdown)?;
    println!("report: {}", path.display());
    Ok(())
}

/// Route one single-call task through the prompt builder and invoker.
///
/// Backend failures are degraded output, not errors: the annotated reason
/// flows to wherever the success text would have gone.
fn query<R: ModelRunner>(
    config: &Config,
    runner: &R,
    kind: TaskKind,
    inputs: &PromptInputs,
) -> Result<String> {
    let prompt = PromptBuilder::new(config.truncation_budget).render(kind, inputs)?;
    let model = model_for(kind, &config.models);
    debug!(model, kind = kind.as_str(), "dispatching query");
    Ok(invoke(runner, model, &prompt, config.timeout_for(kind)).into_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedResponse, ScriptedRunner};
    use std::fs;

    fn config_with_output(dir: &Path) -> Config {
        let mut config = Config::default();
        config.output.dir = dir.to_path_buf();
        config
    }

    #[test]
    fn improve_reads_source_and_writes_sibling() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("script.py");
        fs::write(&source, "x=1").expect("write source");
        let config = config_with_output(temp.path());
        let runner = ScriptedRunner::new(vec![ScriptedResponse::Stdout("x = 1\n".to_string())]);

        improve(&config, &runner, &source).expect("improve");

        let improved = temp.path().join("script_improved.py");
        assert_eq!(fs::read_to_string(&improved).expect("read"), "x = 1");
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, config.models.code);
        assert!(calls[0].1.contains("x=1"));
    }

    #[test]
    fn improve_on_missing_source_is_terminal() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = config_with_output(temp.path());
        let runner = ScriptedRunner::new(vec![]);

        let err = improve(&config, &runner, &temp.path().join("gone.py")).unwrap_err();
        assert!(err.to_string().contains("read source"));
        assert!(runner.calls().is_empty(), "no backend call without input");
    }

    #[test]
    fn explain_routes_to_general_model() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("script.py");
        fs::write(&source, "print('hi')").expect("write source");
        let config = config_with_output(temp.path());
        let runner = ScriptedRunner::new(vec![ScriptedResponse::Stdout(
            "prints a greeting".to_string(),
        )]);

        explain(&config, &runner, &source).expect("explain");
        assert_eq!(runner.calls()[0].0, config.models.general);
    }

    #[test]
    fn generate_persists_model_output() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = config_with_output(temp.path());
        let runner = ScriptedRunner::new(vec![ScriptedResponse::Stdout("print(1)".to_string())]);

        generate(&config, &runner, "print a number", "python").expect("generate");

        let generated: Vec<_> = fs::read_dir(temp.path())
            .expect("read dir")
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with("generated_")
            })
            .collect();
        assert_eq!(generated.len(), 1);
        assert_eq!(
            fs::read_to_string(generated[0].path()).expect("read"),
            "print(1)"
        );
    }

    #[test]
    fn generate_failure_degrades_to_annotated_artifact() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = config_with_output(temp.path());
        let runner = ScriptedRunner::new(vec![ScriptedResponse::ExitCode(
            1,
            "model not loaded".to_string(),
        )]);

        generate(&config, &runner, "print a number", "python").expect("degraded, not terminal");

        let generated: Vec<_> = fs::read_dir(temp.path())
            .expect("read dir")
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with("generated_")
            })
            .collect();
        let contents = fs::read_to_string(generated[0].path()).expect("read");
        assert!(contents.contains("model invocation failed"));
        assert!(contents.contains("model not loaded"));
    }
}
