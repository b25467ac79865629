//! A small harness that builds a temporary directory tree and drives the
//! built `wfind` binary against it, mirroring the shape of the upstream
//! `tests/testenv` pattern this codebase inherits (§10.4): create a tree,
//! shell out to the real executable, and assert on normalized stdout.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::{tempdir, TempDir};

pub struct TestEnv {
    root: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        TestEnv {
            root: tempdir().expect("failed to create temporary directory"),
        }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Create an empty file at `relative`, creating parent directories as
    /// needed.
    pub fn touch(&self, relative: &str) -> &Self {
        self.write(relative, "")
    }

    /// Write `contents` to a file at `relative`, creating parent
    /// directories as needed.
    pub fn write(&self, relative: &str, contents: &str) -> &Self {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directory");
        }
        fs::write(&path, contents).expect("failed to write file");
        self
    }

    pub fn mkdir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.root.path().join(relative)).expect("failed to create directory");
        self
    }

    /// Run the built binary with `args` from inside the temporary root and
    /// return its stdout, split into lines. Panics if the process does not
    /// exit successfully.
    pub fn run(&self, args: &[&str]) -> Vec<String> {
        let output = Command::new(wfind_exe())
            .current_dir(self.root.path())
            .args(args)
            .output()
            .expect("failed to run wfind");

        assert!(
            output.status.success(),
            "`wfind {}` exited with {}\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Run the binary and assert it exits unsuccessfully.
    pub fn run_expecting_failure(&self, args: &[&str]) {
        let output = Command::new(wfind_exe())
            .current_dir(self.root.path())
            .args(args)
            .output()
            .expect("failed to run wfind");

        assert!(
            !output.status.success(),
            "`wfind {}` was expected to fail but succeeded",
            args.join(" ")
        );
    }

    /// Run `args` once per thread count and assert every run produces the
    /// same *set* of lines (§8: "-j 1 and -j N over the same tree produce
    /// identical sets").
    pub fn assert_same_set_regardless_of_threads(&self, args: &[&str], thread_counts: &[&str]) {
        let mut reference: Option<Vec<String>> = None;
        for &threads in thread_counts {
            let mut full_args = args.to_vec();
            full_args.push("-j");
            full_args.push(threads);
            let mut lines = self.run(&full_args);
            lines.sort();
            if let Some(expected) = &reference {
                assert_eq!(expected, &lines, "-j {threads} produced a different set");
            } else {
                reference = Some(lines);
            }
        }
    }
}

fn wfind_exe() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_wfind"))
}
