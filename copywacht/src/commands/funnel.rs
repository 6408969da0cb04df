// copywacht/src/commands/funnel.rs
//! Funnel check: soft language versus hard claims, nothing mutated.

use anyhow::Result;
use log::info;
use std::io::{self, Write};
use std::path::Path;

use copywacht_core::{compile_pattern_group, funnel_check, FileWalker, GuardConfig};

use super::{EXIT_CLEAN, EXIT_FUNNEL_HARD, HEADER_RULE_WIDTH};

pub fn run_funnel(config: &GuardConfig, root: &Path) -> Result<i32> {
    info!("Starting funnel check of {}", root.display());

    let soft = compile_pattern_group(&config.funnel.soft, "funnel.soft")?;
    let hard = compile_pattern_group(&config.funnel.hard, "funnel.hard")?;
    let walker = FileWalker::new(&config.funnel.walk);
    let tally = funnel_check(root, &walker, &soft, &hard)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", "=".repeat(HEADER_RULE_WIDTH))?;
    writeln!(out, "FUNNELCHECK: {}", root.display())?;
    writeln!(out, "{}", "=".repeat(HEADER_RULE_WIDTH))?;
    writeln!(out, "soft hits: {}", tally.soft)?;
    writeln!(out, "hard hits: {}", tally.hard)?;

    Ok(if tally.passed() { EXIT_CLEAN } else { EXIT_FUNNEL_HARD })
}
