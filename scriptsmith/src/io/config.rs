//! Orchestrator configuration stored in `scriptsmith.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::task::{ModelCatalog, TaskKind};
use crate::io::artifact::write_atomic;

/// Orchestrator configuration (TOML).
///
/// Intended to be edited by humans. Missing fields default to the reference
/// deployment: a local `ollama` runner serving `codellama:13b` and
/// `llama2:13b`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Truncate code and file excerpts to this many characters before
    /// embedding them in prompts.
    pub truncation_budget: usize,

    pub models: ModelCatalog,
    pub runner: RunnerSettings,
    pub output: OutputSettings,
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RunnerSettings {
    /// Program invoked as `<program> run <model> <prompt>`.
    pub program: String,
    /// Per-call ceiling for single-query tasks, in seconds.
    pub query_timeout_secs: u64,
    /// Per-call ceiling for analysis workflow stages, in seconds.
    pub analysis_timeout_secs: u64,
    /// Keep at most this many bytes of runner stdout/stderr.
    pub output_limit_bytes: usize,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            program: "ollama".to_string(),
            query_timeout_secs: 60,
            analysis_timeout_secs: 120,
            output_limit_bytes: 100_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory receiving generated scripts and the analysis report.
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Representative application source reviewed by the Code Review stage,
    /// relative to the analyzed root.
    pub code_sample: String,
    /// Generator script reviewed by the Script Generator Review stage,
    /// relative to the analyzed root.
    pub generator_sample: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            code_sample: "src/main.py".to_string(),
            generator_sample: "scripts/generator.py".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            truncation_budget: 2000,
            models: ModelCatalog::default(),
            runner: RunnerSettings::default(),
            output: OutputSettings::default(),
            analysis: AnalysisSettings::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.truncation_budget == 0 {
            return Err(anyhow!("truncation_budget must be > 0"));
        }
        if self.models.code.trim().is_empty() || self.models.general.trim().is_empty() {
            return Err(anyhow!("models.code and models.general must be non-empty"));
        }
        if self.runner.program.trim().is_empty() {
            return Err(anyhow!("runner.program must be non-empty"));
        }
        if self.runner.query_timeout_secs == 0 {
            return Err(anyhow!("runner.query_timeout_secs must be > 0"));
        }
        if self.runner.analysis_timeout_secs == 0 {
            return Err(anyhow!("runner.analysis_timeout_secs must be > 0"));
        }
        if self.runner.output_limit_bytes == 0 {
            return Err(anyhow!("runner.output_limit_bytes must be > 0"));
        }
        Ok(())
    }

    /// Per-call ceiling for `kind`: single-query tasks use the query
    /// timeout, analysis stages the longer analysis timeout.
    pub fn timeout_for(&self, kind: TaskKind) -> Duration {
        let secs = match kind {
            TaskKind::Generate | TaskKind::Improve | TaskKind::Explain => {
                self.runner.query_timeout_secs
            }
            TaskKind::Review | TaskKind::StructureAnalysis | TaskKind::Recommend => {
                self.runner.analysis_timeout_secs
            }
        };
        Duration::from_secs(secs)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `Config::default()`.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        let cfg = Config::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &Config) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("scriptsmith.toml");
        let mut cfg = Config::default();
        cfg.models.code = "codellama:7b".to_string();
        cfg.runner.query_timeout_secs = 30;
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut cfg = Config::default();
        cfg.runner.query_timeout_secs = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("query_timeout_secs"));
    }

    #[test]
    fn empty_model_name_fails_validation() {
        let mut cfg = Config::default();
        cfg.models.general = "  ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn timeouts_differ_by_task_kind() {
        let cfg = Config::default();
        assert_eq!(cfg.timeout_for(TaskKind::Generate), Duration::from_secs(60));
        assert_eq!(
            cfg.timeout_for(TaskKind::StructureAnalysis),
            Duration::from_secs(120)
        );
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("scriptsmith.toml");
        fs::write(&path, "[models]\ncode = \"codellama:7b\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.models.code, "codellama:7b");
        assert_eq!(cfg.models.general, ModelCatalog::default().general);
        assert_eq!(cfg.runner, RunnerSettings::default());
    }
}
