// copywacht/src/main.rs
//! copywacht entry point.
//!
//! Loads the rule configuration, dispatches to the subcommand runner and
//! maps its result onto the stable exit-code contract.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use copywacht::cli::{Cli, Commands};
use copywacht::commands::{self, audit, funnel, review, rewrite};
use copywacht::logger;
use copywacht::ui::output;
use copywacht_core::GuardConfig;

fn main() {
    let args = Cli::parse();

    let level_override = if args.debug {
        Some(LevelFilter::Debug)
    } else if args.quiet {
        Some(LevelFilter::Off)
    } else {
        None
    };
    logger::init_logger(level_override);

    let code = match run(args) {
        Ok(code) => code,
        Err(err) => {
            output::error_msg(format!("{err:#}"));
            commands::EXIT_CONFIG
        }
    };
    std::process::exit(code);
}

fn run(args: Cli) -> Result<i32> {
    let config = match &args.rules {
        Some(path) => GuardConfig::load_from_file(path)?,
        None => GuardConfig::load_default()?,
    };

    match &args.command {
        Commands::Audit(cmd) => audit::run_audit(&config, &args.root, cmd),
        Commands::Review(cmd) => review::run_review(&config, &args.root, cmd),
        Commands::Apply(cmd) => rewrite::run_rewrite(
            &config,
            &args.root,
            rewrite::TERMINOLOGY_PASS,
            cmd.dry_run,
            args.quiet,
        ),
        Commands::Soften(cmd) => rewrite::run_rewrite(
            &config,
            &args.root,
            rewrite::SOFTEN_PASS,
            cmd.dry_run,
            args.quiet,
        ),
        Commands::Funnel => funnel::run_funnel(&config, &args.root),
    }
}
