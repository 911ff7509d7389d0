//! CLI argument definitions using clap

use approval_core::REPORTER_ENV_VAR;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "api-approval",
    about = "API Approval - public surface snapshot approval for compiled components",
    version,
    author = "TRS Team"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Harness configuration file (YAML, TOML or JSON); `approval.yaml` is used when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory that owns `ApprovedApi/`
    #[arg(long, global = true)]
    pub source_root: Option<PathBuf>,

    /// Root of the built artifacts tree
    #[arg(long, global = true)]
    pub artifacts_root: Option<PathBuf>,

    /// Build configuration label, e.g. debug or release
    #[arg(long, global = true)]
    pub configuration: Option<String>,

    /// Reporter to use on mismatch (e.g. Diff, Quiet, Console, Log)
    #[arg(long, global = true, env = REPORTER_ENV_VAR)]
    pub reporter: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

/// A single (component, variant) case picked on the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct CaseArgs {
    /// Component name
    #[arg(long, requires = "variant")]
    pub component: Option<String>,

    /// Platform variant
    #[arg(long, requires = "component")]
    pub variant: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare current surfaces against approved baselines
    Verify {
        #[command(flatten)]
        case: CaseArgs,

        /// Maximum number of cases checked at once
        #[arg(long, short = 'j', default_value = "4")]
        jobs: usize,
    },

    /// Print the current surface of one component
    Render {
        /// Component name
        #[arg(long)]
        component: String,

        /// Platform variant
        #[arg(long)]
        variant: String,
    },

    /// Promote received files to approved baselines
    Approve {
        #[command(flatten)]
        case: CaseArgs,

        /// Promote every pending received file
        #[arg(long, conflicts_with_all = ["component", "variant"])]
        all: bool,
    },

    /// List received files waiting for review
    Status,

    /// List the registered reporters
    Reporters,
}
