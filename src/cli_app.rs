//! Top-level CLI definition and dispatch.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell as CompletionShell, generate};
use colored::control;
use serde_json::{Value, json};
use thiserror::Error;

use dotspy::catalog::loader::load_catalog;
use dotspy::core::config::{ColorMode, Config};
use dotspy::core::errors::DotspyError;
use dotspy::report::programs::render_programs;
use dotspy::report::tree::render_tree;
use dotspy::scanner::walker::{ResultTree, WalkOptions, walk};

/// Identify known dotfiles in a home directory.
#[derive(Debug, Parser)]
#[command(
    name = "dotspy",
    author,
    version,
    about = "Identify known dotfiles in a home directory",
    after_help = "File types can be one of: cache, config, history, install, key, log, session."
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Override catalog file path.
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,
    /// Colorise output.
    #[arg(short = 'c', long = "color", conflicts_with = "no_color")]
    color: bool,
    /// Don't colorise output.
    #[arg(short = 'C', long = "no-color")]
    no_color: bool,
    /// Override start directory (defaults to the home directory).
    #[arg(short, long, value_name = "DIR")]
    root: Option<PathBuf>,
    /// Display as program list rather than tree; names restrict the output.
    #[arg(short, long, num_args = 0.., value_name = "PROG")]
    programs: Option<Vec<String>>,
    /// Don't check if files exist.
    #[arg(short = 'a', long)]
    all: bool,
    /// Look for possible old or backup files.
    #[arg(short = 'o', long)]
    old: bool,
    /// Check permission bits on history and key files.
    #[arg(short = 's', long)]
    secure: bool,
    /// Emit the classified entries as JSON instead of text.
    #[arg(long)]
    json: bool,
    /// Generate shell completions and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<CompletionShell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

/// CLI error type with explicit exit-code mapping.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input at runtime.
    #[error("{0}")]
    User(String),
    /// Environment/runtime failure.
    #[error("{0}")]
    Runtime(String),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) => 1,
            Self::Runtime(_) | Self::Io(_) => 2,
            Self::Json(_) => 3,
        }
    }
}

/// Dispatch the single scan-and-report command.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        let binary_name = command.get_name().to_string();
        generate(shell, &mut command, binary_name, &mut io::stdout());
        return Ok(());
    }

    // MissingConfig only arises for an explicit --config path; a missing
    // default config falls back to defaults. A bad user-typed path is a
    // user error, not a runtime failure.
    let config = Config::load(cli.config.as_deref()).map_err(|e| match e {
        DotspyError::MissingConfig { .. } => CliError::User(e.to_string()),
        other => CliError::Runtime(other.to_string()),
    })?;
    apply_color(resolve_color(cli, &config));

    let catalog_path = cli
        .catalog
        .clone()
        .or_else(|| config.catalog_file())
        .ok_or_else(|| {
            CliError::User("cannot resolve a catalog path: HOME is not set (pass --catalog)".into())
        })?;
    let catalog = load_catalog(&catalog_path).map_err(|e| CliError::Runtime(e.to_string()))?;

    let root = cli
        .root
        .clone()
        .or_else(|| config.scan_root())
        .ok_or_else(|| {
            CliError::User("cannot resolve a scan root: HOME is not set (pass --root)".into())
        })?;
    if !root.is_dir() {
        return Err(CliError::User(format!(
            "scan root {} is not a directory",
            root.display()
        )));
    }

    let options = WalkOptions {
        include_all: cli.all,
        check_backups: cli.old,
        check_security: cli.secure,
    };
    let found = walk(&root, &catalog, options).map_err(|e| CliError::Runtime(e.to_string()))?;

    match output_mode(cli) {
        OutputMode::Json => {
            let payload = scan_payload(&root, &found)?;
            write_json_line(&payload)
        }
        OutputMode::Human => {
            let lines = match &cli.programs {
                Some(filter) => render_programs(&found, Some(filter)),
                None => render_tree(&found),
            };
            let mut stdout = io::stdout().lock();
            for line in lines {
                writeln!(stdout, "{line}")?;
            }
            Ok(())
        }
    }
}

/// Effective color mode: flags beat config; config beats auto-detection.
fn resolve_color(cli: &Cli, config: &Config) -> ColorMode {
    if cli.no_color {
        ColorMode::Never
    } else if cli.color {
        ColorMode::Always
    } else {
        config.output.color
    }
}

/// Applied exactly once before any rendering; `Auto` defers to the library's
/// own tty and NO_COLOR detection.
fn apply_color(mode: ColorMode) {
    match mode {
        ColorMode::Always => control::set_override(true),
        ColorMode::Never => control::set_override(false),
        ColorMode::Auto => {}
    }
}

fn output_mode(cli: &Cli) -> OutputMode {
    if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    }
}

fn scan_payload(root: &std::path::Path, found: &ResultTree) -> Result<Value, CliError> {
    let entries: Vec<Value> = found
        .iter()
        .map(|(key, entry)| {
            let mut value = serde_json::to_value(entry)?;
            if let Some(obj) = value.as_object_mut() {
                obj.insert("path".to_string(), json!(key.segments()));
            }
            Ok(value)
        })
        .collect::<Result<_, serde_json::Error>>()?;

    Ok(json!({
        "command": "scan",
        "root": root.to_string_lossy(),
        "entries": entries,
    }))
}

fn write_json_line(payload: &Value) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, payload)?;
    writeln!(stdout)?;
    Ok(())
}
