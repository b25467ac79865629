//! (stat, extension) → ANSI SGR escape sequence, keyed off a fixed, literal
//! color table rather than a `$LS_COLORS`-style environment override. The
//! table is a hot path walked once per emitted entry, so it stays a handful
//! of static string constants and linear extension-set scans.

use std::path::Path;

const RESET: &str = "\u{1b}[0m";

const DIR: &str = "\u{1b}[01;34m";
const DIR_STICKY_OTHER_WRITABLE: &str = "\u{1b}[30;42m";
const DIR_OTHER_WRITABLE: &str = "\u{1b}[34;42m";
const DIR_STICKY: &str = "\u{1b}[37;44m";

const DEVICE: &str = "\u{1b}[40;33;01m";
const FIFO: &str = "\u{1b}[40;33m";
const SYMLINK: &str = "\u{1b}[01;36m";
const SOCKET: &str = "\u{1b}[01;35m";

const SETUID: &str = "\u{1b}[37;41m";
const SETGID: &str = "\u{1b}[30;43m";
const EXECUTABLE: &str = "\u{1b}[01;32m";

const ARCHIVE_COLOR: &str = "\u{1b}[01;31m";
const MEDIA_COLOR: &str = "\u{1b}[01;35m";
const AUDIO_COLOR: &str = "\u{1b}[00;36m";

const ARCHIVE_EXTENSIONS: &[&str] = &[
    "tar", "tgz", "tbz2", "txz", "zip", "gz", "bz2", "xz", "zst", "7z", "rar", "deb", "rpm", "jar",
    "war", "ear", "cab", "wim", "iso", "lz", "lz4", "lzma", "z", "Z",
];

const MEDIA_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "svg", "tiff", "ico", "webp", "mp4", "mkv", "mov", "webm",
    "avi", "flv", "wmv", "mpg", "mpeg", "m4v",
];

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "opus", "wav", "m4a", "aac", "wma"];

/// Produce the ANSI SGR escape sequence a basename at `path` should be
/// rendered in, or the empty string if the path doesn't need coloring.
#[cfg(any(unix, target_os = "redox"))]
pub fn color_for(path: &Path) -> String {
    use std::os::unix::fs::{FileTypeExt, MetadataExt};

    let metadata = match std::fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(_) => return String::new(),
    };

    let file_type = metadata.file_type();
    let mode = metadata.mode();

    if file_type.is_symlink() {
        return SYMLINK.to_string();
    }
    if file_type.is_block_device() || file_type.is_char_device() {
        return DEVICE.to_string();
    }
    if file_type.is_fifo() {
        return FIFO.to_string();
    }
    if file_type.is_socket() {
        return SOCKET.to_string();
    }
    if file_type.is_dir() {
        const STICKY: u32 = 0o1000;
        const OTHER_WRITABLE: u32 = 0o002;
        return match (mode & STICKY != 0, mode & OTHER_WRITABLE != 0) {
            (true, true) => DIR_STICKY_OTHER_WRITABLE.to_string(),
            (false, true) => DIR_OTHER_WRITABLE.to_string(),
            (true, false) => DIR_STICKY.to_string(),
            (false, false) => DIR.to_string(),
        };
    }

    if file_type.is_file() {
        const SETUID_BIT: u32 = 0o4000;
        const SETGID_BIT: u32 = 0o2000;
        const ANY_EXECUTE: u32 = 0o111;

        if mode & SETUID_BIT != 0 {
            return SETUID.to_string();
        }
        if mode & SETGID_BIT != 0 {
            return SETGID.to_string();
        }
        if mode & ANY_EXECUTE != 0 {
            return EXECUTABLE.to_string();
        }
    }

    color_by_extension(path).unwrap_or_default()
}

#[cfg(not(any(unix, target_os = "redox")))]
pub fn color_for(path: &Path) -> String {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(_) => return String::new(),
    };
    if metadata.is_dir() {
        return DIR.to_string();
    }
    color_by_extension(path).unwrap_or_default()
}

fn color_by_extension(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?;

    if ARCHIVE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(extension)) {
        Some(ARCHIVE_COLOR.to_string())
    } else if MEDIA_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(extension)) {
        Some(MEDIA_COLOR.to_string())
    } else if AUDIO_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(extension)) {
        Some(AUDIO_COLOR.to_string())
    } else {
        None
    }
}

/// The reset sequence terminating any colorized span.
pub fn reset() -> &'static str {
    RESET
}

/// Color assigned to directory path components when rendering the parent
/// prefix of an emitted entry (always the plain directory color, never one
/// of the sticky/writable variants — those only apply to the directory
/// being classified itself, per §4.1).
pub fn dir_prefix_color() -> &'static str {
    DIR
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_path_has_no_color() {
        assert_eq!(color_for(Path::new("/does/not/exist")), "");
    }

    #[test]
    fn unknown_extension_has_no_color() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::File::create(&file).unwrap();
        assert_eq!(color_for(&file), "");
    }

    #[test]
    fn archive_extension_is_colored() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("bundle.tar.gz");
        fs::File::create(&file).unwrap();
        assert_eq!(color_for(&file), ARCHIVE_COLOR);
    }

    #[test]
    fn image_extension_is_colored() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("photo.png");
        fs::File::create(&file).unwrap();
        assert_eq!(color_for(&file), MEDIA_COLOR);
    }

    #[test]
    fn audio_extension_is_colored() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("song.flac");
        fs::File::create(&file).unwrap();
        assert_eq!(color_for(&file), AUDIO_COLOR);
    }

    #[test]
    fn plain_directory_is_dir_colored() {
        let dir = tempdir().unwrap();
        assert_eq!(color_for(dir.path()), DIR);
    }

    #[cfg(unix)]
    #[test]
    fn executable_regular_file_wins_over_extension() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let file = dir.path().join("run.sh");
        fs::File::create(&file).unwrap();
        let mut perms = fs::metadata(&file).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&file, perms).unwrap();

        assert_eq!(color_for(&file), EXECUTABLE);
    }
}
