//! Path helpers shared by the walker and the CLI layer: absolute-path
//! resolution, the "no trailing slash" child-join invariant, and a handful
//! of `stat`-backed predicates the colorizer and walker both need.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use normpath::PathExt;

/// Resolve `path` to an absolute, normalized form, joining against the
/// process's current directory when `path` is relative. Uses `normpath`
/// rather than `Path::canonicalize` so the result isn't forced through a
/// filesystem round-trip, and so Windows' `\\?\` extended-length prefix
/// never leaks into printed output.
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(strip_current_dir(path))
    };
    Ok(joined.normalize()?.into_path_buf())
}

/// Remove the `./` prefix from a path, so seed paths typed as `./foo` print
/// the same as `foo` would.
pub fn strip_current_dir(path: &Path) -> &Path {
    path.strip_prefix(".").unwrap_or(path)
}

/// Join `parent` and a child's `name`, preserving the "no trailing slash
/// except for the root" invariant on `parent` itself (§3: a `PathJob`'s
/// `path` never carries a trailing slash unless it is literally `/`).
pub fn join_child(parent: &Path, name: &OsStr) -> PathBuf {
    parent.join(name)
}

#[cfg(any(unix, target_os = "redox"))]
pub fn osstr_to_bytes(input: &OsStr) -> Cow<[u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(input.as_bytes())
}

#[cfg(not(any(unix, target_os = "redox")))]
pub fn osstr_to_bytes(input: &OsStr) -> Cow<[u8]> {
    let string = input.to_string_lossy();
    match string {
        Cow::Owned(string) => Cow::Owned(string.into_bytes()),
        Cow::Borrowed(string) => Cow::Borrowed(string.as_bytes()),
    }
}
