// copywacht/src/logger.rs
//! Logger bootstrap for the CLI.

use log::LevelFilter;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes env_logger once. `RUST_LOG` is respected unless an explicit
/// level override is given (`--debug` / `--quiet`).
pub fn init_logger(level_override: Option<LevelFilter>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::from_default_env();
        if let Some(level) = level_override {
            builder.filter_level(level);
        }
        // try_init: tests may race on logger installation.
        let _ = builder.try_init();
    });
}
