//! scriptsmith: dual-model script generation and project analysis CLI.
//!
//! Each subcommand routes to a code-specialized or general-purpose model
//! served by a local model runner, one bounded child process per query.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use scriptsmith::commands;
use scriptsmith::exit_codes;
use scriptsmith::io::config::load_config;
use scriptsmith::io::invoker::CliModelRunner;
use scriptsmith::logging;

#[derive(Parser)]
#[command(
    name = "scriptsmith",
    version,
    about = "Dual-model script generation and project analysis"
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "scriptsmith.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new script from a free-text description.
    Generate {
        /// What the script should do.
        #[arg(required = true)]
        description: Vec<String>,
        /// Target language for the generated script.
        #[arg(long, default_value = "python")]
        language: String,
    },
    /// Rewrite a script for performance, readability, and error handling.
    Improve { path: PathBuf },
    /// Explain what a script does in plain language.
    Explain { path: PathBuf },
    /// Run the multi-stage project analysis and write the report.
    Analyze {
        /// Project root to analyze.
        #[arg(default_value = ".")]
        root: PathBuf,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let runner = CliModelRunner::new(
        config.runner.program.clone(),
        config.runner.output_limit_bytes,
    );
    match cli.command {
        Command::Generate {
            description,
            language,
        } => commands::generate(&config, &runner, &description.join(" "), &language),
        Command::Improve { path } => commands::improve(&config, &runner, &path),
        Command::Explain { path } => commands::explain(&config, &runner, &path),
        Command::Analyze { root } => commands::analyze(&config, &runner, &root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_generate_collects_description_words() {
        let cli = Cli::parse_from(["scriptsmith", "generate", "monitor", "GPIO", "pins"]);
        match cli.command {
            Command::Generate {
                description,
                language,
            } => {
                assert_eq!(description.join(" "), "monitor GPIO pins");
                assert_eq!(language, "python");
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn parse_generate_language_flag() {
        let cli = Cli::parse_from([
            "scriptsmith",
            "generate",
            "--language",
            "bash",
            "rotate",
            "logs",
        ]);
        match cli.command {
            Command::Generate { language, .. } => assert_eq!(language, "bash"),
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn generate_requires_a_description() {
        assert!(Cli::try_parse_from(["scriptsmith", "generate"]).is_err());
    }

    #[test]
    fn improve_requires_a_path() {
        assert!(Cli::try_parse_from(["scriptsmith", "improve"]).is_err());
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["scriptsmith", "translate", "x"]).is_err());
    }

    #[test]
    fn analyze_defaults_to_current_directory() {
        let cli = Cli::parse_from(["scriptsmith", "analyze"]);
        match cli.command {
            Command::Analyze { root } => assert_eq!(root, PathBuf::from(".")),
            _ => panic!("expected analyze"),
        }
    }
}
