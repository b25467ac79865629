//! The single read-only configuration value threaded through every worker
//! (§3, §5: "constructed once before workers start and read-only
//! thereafter"). Built once in `main` from the parsed CLI, then shared by
//! `Arc` — never mutated again.

use std::path::PathBuf;

use crate::matcher::Matcher;

/// Restricts which filesystem entry kinds are emitted. `None` (no `-t`
/// given) matches everything; each variant otherwise requires the named
/// kind exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TypeFilter {
    #[value(name = "b")]
    Block,
    #[value(name = "c")]
    Char,
    #[value(name = "d")]
    Dir,
    #[value(name = "n")]
    Fifo,
    #[value(name = "l")]
    Link,
    #[value(name = "f")]
    Regular,
    #[value(name = "s")]
    Socket,
}

impl TypeFilter {
    /// Whether `file_type` satisfies this restriction.
    pub fn matches(self, file_type: &std::fs::FileType) -> bool {
        match self {
            TypeFilter::Dir => file_type.is_dir(),
            TypeFilter::Link => file_type.is_symlink(),
            TypeFilter::Regular => file_type.is_file(),
            #[cfg(any(unix, target_os = "redox"))]
            TypeFilter::Block | TypeFilter::Char | TypeFilter::Fifo | TypeFilter::Socket => {
                use std::os::unix::fs::FileTypeExt;
                match self {
                    TypeFilter::Block => file_type.is_block_device(),
                    TypeFilter::Char => file_type.is_char_device(),
                    TypeFilter::Fifo => file_type.is_fifo(),
                    TypeFilter::Socket => file_type.is_socket(),
                    _ => unreachable!(),
                }
            }
            #[cfg(not(any(unix, target_os = "redox")))]
            TypeFilter::Block | TypeFilter::Char | TypeFilter::Fifo | TypeFilter::Socket => false,
        }
    }
}

/// Configuration shared read-only by every worker (§3).
pub struct Options {
    /// How `--pattern` should be interpreted (§4.6).
    pub matcher: Matcher,

    /// Restriction from `-t`/`--type`, or `None` for "any kind".
    pub type_filter: Option<TypeFilter>,

    /// Skip dotfiles and `~`-suffixed names unless `-H`/`--hidden` was given.
    pub skip_hidden: bool,

    /// Disable the ignore-file engine entirely (`-I`/`--no-ignore`).
    pub no_ignore: bool,

    /// `None` means unbounded; `Some(n)` means "descend at most `n` levels".
    pub max_depth: Option<usize>,

    /// Whether emitted entries should carry ANSI color sequences.
    pub colorize: bool,

    /// Worker pool size (`-j`/`--threads`).
    pub nthreads: usize,

    /// `-e`/`--extension`, lowercase and without a leading dot.
    pub extension: Option<String>,

    /// Byte written after each emitted entry (newline, or NUL for `-0`-style
    /// null-separated output).
    pub delimiter: u8,

    /// Resolve seed paths to absolute form before walking. Not currently
    /// exposed as a CLI flag (§10.1 lists no `--absolute-path` option); kept
    /// as an internal knob so the orchestrator's resolution step (§4.7 step
    /// 4) has somewhere to read it from.
    pub absolute: bool,

    /// Start directories; empty means "search `.`" (§6).
    pub paths: Vec<PathBuf>,
}
