// copywacht/src/cli.rs
//! This file defines the command-line interface for the copywacht
//! application, including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "copywacht",
    version = env!("CARGO_PKG_VERSION"),
    about = "Guard marketing-site copy against risky claims",
    long_about = "Copywacht scans a tree of site-copy source files against configurable rule \
categories, reports findings per category, and can rewrite risky terminology in place with \
single-level backups. Exit codes are stable per subcommand so CI can gate on them: \
0 clean, 1 configuration error, 2 audit findings, 3 hard funnel claims, 4 review findings.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Root directory to scan.
    #[arg(long, value_name = "DIR", default_value = "app/(site)", global = true, help = "Root directory to scan.")]
    pub root: PathBuf,

    /// Path to a custom rules configuration file (YAML).
    #[arg(long = "rules", value_name = "FILE", global = true, help = "Path to a custom rules configuration file (YAML).")]
    pub rules: Option<PathBuf>,

    /// Disable informational messages.
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for this run).
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `copywacht` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scans site copy against the policy rule set and reports per category.
    #[command(about = "Scans site copy against the policy rule set and reports findings per category.")]
    Audit(AuditCommand),

    /// Lints copy tone: autonomy language, over-promising, fear framing.
    #[command(about = "Lints copy tone and lists CTA pages that never ask a reflective question.")]
    Review(ReviewCommand),

    /// Applies the terminology replacement pass (backup suffix `.bak`).
    #[command(about = "Applies the terminology replacement pass, backing originals up as *.bak.")]
    Apply(RewriteCommand),

    /// Applies the claim-softening replacement pass (backup suffix `.bak2`).
    #[command(about = "Applies the claim-softening replacement pass, backing originals up as *.bak2.")]
    Soften(RewriteCommand),

    /// Counts soft versus hard funnel language; fails on any hard claim.
    #[command(about = "Counts soft versus hard funnel language and fails when any hard claim exists.")]
    Funnel,
}

/// Arguments for the `audit` command.
#[derive(Parser, Debug)]
pub struct AuditCommand {
    /// Maximum example lines shown per category.
    #[arg(long, value_name = "N", default_value_t = 250, help = "Maximum example lines shown per category.")]
    pub show: usize,

    /// Only evaluate categories whose id contains this substring.
    #[arg(long, value_name = "SUBSTR", help = "Only evaluate categories whose id contains this substring.")]
    pub only: Option<String>,

    /// Print the findings as JSON to stdout instead of the text report.
    #[arg(long = "json", help = "Print the findings as JSON to stdout.")]
    pub json: bool,
}

/// Arguments for the `review` command.
#[derive(Parser, Debug)]
pub struct ReviewCommand {
    /// Maximum example lines shown per category.
    #[arg(long, value_name = "N", default_value_t = 25, help = "Maximum example lines shown per category.")]
    pub show: usize,

    /// Only evaluate categories whose id contains this substring.
    #[arg(long, value_name = "SUBSTR", help = "Only evaluate categories whose id contains this substring.")]
    pub only: Option<String>,

    /// Print the findings as JSON to stdout instead of the text report.
    #[arg(long = "json", help = "Print the findings as JSON to stdout.")]
    pub json: bool,
}

/// Arguments shared by the `apply` and `soften` commands.
#[derive(Parser, Debug)]
pub struct RewriteCommand {
    /// Report intended changes without writing any files.
    #[arg(long = "dry-run", help = "Report intended changes without writing any files (no backups either).")]
    pub dry_run: bool,
}
