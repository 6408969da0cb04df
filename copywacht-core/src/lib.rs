// copywacht-core/src/lib.rs
//! # copywacht Core Library
//!
//! `copywacht-core` provides the engine behind the `copywacht` CLI: walking a
//! tree of source text files, matching lines against configurable rule
//! categories, reporting findings, and rewriting files in place with
//! single-level backups. The library is synchronous and filesystem-only; it
//! knows nothing about processes, exit codes or terminals.
//!
//! ## Modules
//!
//! * `config`: rule categories, rewrite passes, marker/funnel groups and the
//!   per-tool walk specifications, loaded from embedded or user YAML.
//! * `compiler`: one-time, case-insensitive compilation of every pattern,
//!   with errors that name the offending category and pattern.
//! * `walker`: lazy file enumeration with directory pruning, extension
//!   allow-lists, size caps and path scope/ignore fragments.
//! * `scanner`: per-line matching producing stable-ordered [`Hit`]s, with
//!   optional line-suppression predicates and per-file marker probes.
//! * `filters`: ready-made suppression predicates (pure comment lines,
//!   structured-data markers).
//! * `report`: deterministic grouped rendering of hits and the
//!   CTA-without-question aggregate.
//! * `rewriter`: ordered replacement passes with backup-then-write
//!   durability and a dry-run mode.
//! * `funnel`: the soft-versus-hard claim tally.
//!
//! ## Error Handling
//!
//! Only configuration and pattern-compilation errors abort a run; per-file
//! I/O and decode problems degrade to skipping that file. Fallible
//! operations at the library edge return `anyhow::Result`; structured
//! failures use [`CopywachtError`].
//!
//! License: MIT OR Apache-2.0

pub mod compiler;
pub mod config;
pub mod errors;
pub mod filters;
pub mod funnel;
pub mod report;
pub mod rewriter;
pub mod scanner;
pub mod walker;

/// Re-exports the configuration types and loaders.
pub use config::{
    select_categories, validate_config, AuditSection, CategorySpec, FunnelSection, GuardConfig,
    MarkerSpec, ReplacementSpec, ReviewSection, RewritePass, RewriteSection, WalkSpec,
    DEFAULT_MAX_FILE_SIZE, MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::CopywachtError;

/// Re-exports the compiled rule types and compilation entry points.
pub use compiler::{
    compile_categories, compile_pattern_group, compile_replacements, CompiledReplacement,
    CompiledRule, CompiledRules,
};

/// Re-exports the scanning types.
pub use scanner::{scan_file, scan_file_with_markers, FileMarkers, Hit, MarkerProbe};

/// Re-exports the file enumerator.
pub use walker::FileWalker;

/// Re-exports the rewrite pass runner.
pub use rewriter::{apply_pass, rewrite_text};

/// Re-exports the funnel tally.
pub use funnel::{funnel_check, FunnelTally};
