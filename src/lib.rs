//! Wires the four core subsystems (§1) and the ambient layer (§10) into a
//! single `run` entry point the binary crate calls.

#[macro_use]
mod error;

pub mod cli;
pub mod colorize;
pub mod exit_codes;
pub mod filesystem;
pub mod flagman;
pub mod ignore;
pub mod matcher;
pub mod options;
pub mod orchestrator;
pub mod queue;
pub mod walk;

use std::sync::Arc;

use exit_codes::ExitCode;
use ignore::GlobalIgnore;
use options::Options;

/// Load the global ignore ruleset (if any) and run the orchestrator to
/// completion. The caller is responsible for turning CLI input into
/// `options` (see `cli::build_options`) and for reporting `ExitCode` to the
/// process.
pub fn run(options: Options) -> ExitCode {
    let global_ignore = if options.no_ignore {
        None
    } else {
        GlobalIgnore::load().map(Arc::new)
    };

    orchestrator::run(Arc::new(options), global_ignore);

    ExitCode::Success
}
