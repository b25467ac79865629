use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::matcher::Matcher;
use crate::options::{Options, TypeFilter};

/// A parallel, recursive filename search tool with gitignore-style
/// filtering (§6, §10.1). The flag set here is intentionally narrow: no
/// `--exec`, no output templates, no size/time/owner filters, no shell
/// completions — those are out of scope (§1).
#[derive(Parser)]
#[command(
    name = "wfind",
    version,
    about = "A parallel, recursive filename search tool with gitignore-style filtering",
    max_term_width = 98
)]
pub struct Cli {
    /// A regular expression (or, with --glob, a shell glob) to match
    /// entries against. Omitted or empty means every entry matches.
    pub pattern: Option<String>,

    /// Start directories to search. Defaults to the current directory.
    #[arg(value_name = "path")]
    pub paths: Vec<PathBuf>,

    /// Perform a glob-based search instead of a regular-expression search.
    #[arg(long, short = 'g')]
    pub glob: bool,

    /// Include hidden files and directories in the search results.
    #[arg(long, short = 'H')]
    pub hidden: bool,

    /// Do not respect .gitignore files.
    #[arg(long, short = 'I')]
    pub no_ignore: bool,

    /// Perform a case-insensitive search.
    #[arg(long, short = 'i')]
    pub ignore_case: bool,

    /// Set the maximum search depth (default: unbounded).
    #[arg(long, short = 'd', value_name = "depth")]
    pub max_depth: Option<usize>,

    /// Filter by file extension.
    #[arg(long, short = 'e', value_name = "ext")]
    pub extension: Option<String>,

    /// Set the number of threads to use (default: available parallelism).
    #[arg(long, short = 'j', value_name = "num")]
    pub threads: Option<NonZeroUsize>,

    /// Filter by entry type: b(lock), c(har), d(ir), n(amed pipe), l(ink),
    /// f(ile), s(ocket).
    #[arg(long, short = 't', value_name = "type")]
    pub type_filter: Option<TypeFilter>,
}

/// Validate a parsed `Cli` and turn it into the single `Options` value the
/// orchestrator consumes. `colorize` is threaded in separately since it
/// depends on terminal detection (§6), not on any flag in this CLI surface.
pub fn build_options(cli: Cli, colorize: bool) -> Result<Options> {
    if cli.max_depth == Some(0) {
        bail!("--max-depth must be greater than zero");
    }

    if let Some(extension) = cli.extension.as_deref() {
        if extension.is_empty() {
            bail!("--extension must not be empty");
        }
    }

    let matcher = Matcher::build(cli.pattern.as_deref(), cli.glob, cli.ignore_case)?;

    let paths = if cli.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cli.paths
    };

    for path in &paths {
        let readable_dir = std::fs::metadata(path)
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false);
        if !readable_dir {
            bail!("'{}' is not a readable directory", path.display());
        }
    }

    let nthreads = cli
        .threads
        .map(NonZeroUsize::get)
        .or_else(|| std::thread::available_parallelism().ok().map(NonZeroUsize::get))
        .unwrap_or(1);

    Ok(Options {
        matcher,
        type_filter: cli.type_filter,
        skip_hidden: !cli.hidden,
        no_ignore: cli.no_ignore,
        max_depth: cli.max_depth,
        colorize,
        nthreads,
        extension: cli.extension.map(|extension| extension.to_lowercase()),
        delimiter: b'\n',
        absolute: false,
        paths,
    })
}

/// Parse `argv`, printing clap's own diagnostics and exiting 0 for
/// `--help`/`--version` or 1 for any usage error (§6: "1 on argument or
/// pattern-compilation error" — clap's own default of exit code 2 for
/// usage errors is overridden here to keep the taxonomy bit-exact).
pub fn parse_or_exit() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            use clap::error::ErrorKind;
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    print!("{err}");
                    std::process::exit(0);
                }
                _ => {
                    eprint!("{err}");
                    std::process::exit(1);
                }
            }
        }
    }
}
