//! Scan one directory: apply the filter pipeline, collect matching entries
//! in sorted order, and report the subdirectories that should be descended
//! into next (§4.5).
//!
//! Scanning is kept free of queue/flagman side effects so it can be unit
//! tested directly against a real temporary directory tree; the
//! orchestrator (`orchestrator.rs`) is the thing that turns `children` into
//! enqueued jobs and `matches` into printed lines.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::colorize;
use crate::filesystem;
use crate::ignore::{self, GlobalIgnore, IgnoreRuleset};
use crate::matcher::Scratch;
use crate::options::Options;

/// The unit of work transported through the queue (§3).
pub struct PathJob {
    pub depth: usize,
    pub path: PathBuf,
    pub ignore: Option<Arc<IgnoreRuleset>>,
}

/// The result of scanning one directory once.
pub struct DirectoryScan {
    /// Direct entries that passed every filter, sorted for contiguous,
    /// stable per-directory output (§4.5 step 9).
    pub matches: Vec<PathBuf>,
    /// Subdirectories to enqueue, each paired with the ignore ruleset its
    /// own jobs should inherit.
    pub children: Vec<(PathBuf, Option<Arc<IgnoreRuleset>>)>,
}

/// Scan `job.path` once: skip `.`/`..` and hidden entries, apply the ignore
/// filter, the extension filter, the type filter and the pattern matcher,
/// and record which direct children are subdirectories. Returns `None` when
/// `max_depth` stops the scan before it starts, or when the directory can't
/// be opened at all (unreadable/vanished — §7: skip silently).
pub fn scan_directory(
    job: &PathJob,
    options: &Options,
    global_ignore: Option<&GlobalIgnore>,
    scratch: &mut Scratch,
) -> Option<DirectoryScan> {
    if let Some(max_depth) = options.max_depth {
        if job.depth >= max_depth {
            return None;
        }
    }

    let entries = std::fs::read_dir(&job.path).ok()?;

    let mut matches = Vec::new();
    let mut children = Vec::new();

    for entry in entries.flatten() {
        let name = entry.file_name();
        if name == "." || name == ".." {
            continue;
        }
        if options.skip_hidden && is_hidden(&name) {
            continue;
        }

        let child_path = filesystem::join_child(&job.path, &name);

        // §4.5 step 8: DT_UNKNOWN (here, any file_type() failure) is treated
        // as non-directory rather than resolved with an extra stat.
        let file_type = entry.file_type().ok();
        let is_directory = file_type.as_ref().map(std::fs::FileType::is_dir).unwrap_or(false);

        if !options.no_ignore
            && ignore::is_ignored(job.ignore.as_deref(), global_ignore, &child_path, is_directory)
        {
            continue;
        }

        let passes_extension = match (&options.extension, is_directory) {
            (Some(ext), false) => name_has_extension(&name, ext),
            // a directory that only fails an extension filter may still be
            // descended into (§4.5 step 6); it is simply never a match.
            (Some(_), true) => false,
            (None, _) => true,
        };

        let passes_type = options
            .type_filter
            .map(|filter| {
                file_type
                    .as_ref()
                    .map(|ft| filter.matches(ft))
                    .unwrap_or(false)
            })
            .unwrap_or(true);

        let passes_pattern = options
            .matcher
            .is_match(scratch, &filesystem::osstr_to_bytes(&name));

        if passes_extension && passes_type && passes_pattern {
            matches.push(child_path.clone());
        }

        if is_directory {
            let child_ignore = if options.no_ignore {
                None
            } else {
                IgnoreRuleset::parse(&child_path).or_else(|| job.ignore.clone())
            };
            children.push((child_path, child_ignore));
        }
    }

    matches.sort_by(|a, b| {
        filesystem::osstr_to_bytes(a.as_os_str()).cmp(&filesystem::osstr_to_bytes(b.as_os_str()))
    });

    Some(DirectoryScan { matches, children })
}

fn is_hidden(name: &OsStr) -> bool {
    let bytes = filesystem::osstr_to_bytes(name);
    bytes.first() == Some(&b'.') || bytes.last() == Some(&b'~')
}

fn name_has_extension(name: &OsStr, extension: &str) -> bool {
    let bytes = filesystem::osstr_to_bytes(name);
    let suffix = format!(".{extension}");
    bytes.ends_with(suffix.as_bytes())
}

/// Write one matched path followed by the configured delimiter, colorized
/// per §4.5's emit format when `options.colorize` is set.
pub fn emit(path: &Path, options: &Options, out: &mut dyn Write) -> io::Result<()> {
    if options.colorize {
        let parent = path.parent().unwrap_or_else(|| Path::new(""));
        let basename = path.file_name().unwrap_or_default().to_string_lossy();
        write!(
            out,
            "{}{}/{}{}{}{}",
            colorize::dir_prefix_color(),
            parent.display(),
            colorize::reset(),
            colorize::color_for(path),
            basename,
            colorize::reset(),
        )?;
    } else {
        write!(out, "{}", path.display())?;
    }
    out.write_all(&[options.delimiter])
}
