//! Autocoder CLI
//!
//! Process-boundary tooling around the phase contract.
//!
//! ## Commands
//!
//! - `relative-path`: Print the current directory relative to the build root
//! - `locate`: Find which build root holds a relative path
//! - `classify`: Classify a model attribute token (sync/async/serial/input)
//! - `phases`: List the generation phases in contract order
//!
//! Build-root inconsistencies are fatal: the command logs a diagnostic naming
//! the current location and exits non-zero.

use anyhow::{Context, Result};
use autocoder_core::{
    classify, relative_path, relative_path_in, BuildRoots, Phase, PhaseSequence, TracingSink,
    BUILD_ROOT_ENV,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "autocoder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Phase-contract tooling for model-driven code generators", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current execution path relative to the build root
    RelativePath {
        /// Build root(s), separated by ':'
        #[arg(long, env = "BUILD_ROOT")]
        build_root: Option<String>,
    },

    /// Print where a root-relative path lives on disk
    Locate {
        /// Path relative to one of the build roots
        path: PathBuf,

        /// Build root(s), separated by ':'
        #[arg(long, env = "BUILD_ROOT")]
        build_root: Option<String>,
    },

    /// Classify a model attribute token
    Classify {
        /// Token to classify (case-insensitive)
        token: String,
    },

    /// List the generation phases in contract order
    Phases {
        /// List the dictionary sub-sequence instead of the artifact phases
        #[arg(long)]
        dictionary: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    autocoder_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::RelativePath { build_root } => cmd_relative_path(build_root.as_deref()),
        Commands::Locate { path, build_root } => cmd_locate(&path, build_root.as_deref()),
        Commands::Classify { token } => cmd_classify(&token),
        Commands::Phases { dictionary, format } => cmd_phases(dictionary, format),
    }
}

fn cmd_relative_path(build_root: Option<&str>) -> Result<()> {
    let location = std::env::current_dir().context("Failed to read current directory")?;

    let resolved = match build_root {
        Some(value) => BuildRoots::parse(value)
            .and_then(|roots| relative_path_in(&roots, &location, &TracingSink)),
        None => relative_path(&TracingSink),
    };

    let relative = resolved.with_context(|| {
        format!(
            "BUILD_ROOT and current execution path ({}) not consistent",
            location.display()
        )
    })?;

    debug!(relative = %relative.display(), "Resolved relative path");
    println!("{}", relative.display());
    Ok(())
}

fn cmd_locate(path: &std::path::Path, build_root: Option<&str>) -> Result<()> {
    let roots = BuildRoots::parse(build_root.unwrap_or_default())
        .with_context(|| format!("{BUILD_ROOT_ENV} must name at least one directory"))?;

    let found = roots
        .locate(path)
        .with_context(|| format!("Failed to locate {} under {}", path.display(), roots))?;

    println!("{}", found.display());
    Ok(())
}

fn cmd_classify(token: &str) -> Result<()> {
    match classify(Some(token)) {
        Some(kind) => println!("{kind}"),
        None => println!("none"),
    }
    Ok(())
}

#[derive(Serialize)]
struct PhaseListing {
    sequence: PhaseSequence,
    phases: Vec<Phase>,
}

fn cmd_phases(dictionary: bool, format: OutputFormat) -> Result<()> {
    let sequence = if dictionary {
        PhaseSequence::Dictionary
    } else {
        PhaseSequence::Artifact
    };

    match format {
        OutputFormat::Text => {
            for (i, phase) in sequence.phases().iter().enumerate() {
                println!("{:>2}. {}", i + 1, phase);
            }
        }
        OutputFormat::Json => {
            let listing = PhaseListing {
                sequence,
                phases: sequence.phases().to_vec(),
            };
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }
    Ok(())
}
