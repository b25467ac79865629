//! Uniform contract over "no pattern" / regex / glob matching, so the walker
//! never has to know which one it was handed.

use anyhow::{Context, Result};
use globset::GlobBuilder;
use regex::bytes::{Regex, RegexBuilder};

/// How a `--pattern` argument should be interpreted.
pub enum Matcher {
    /// No pattern was given: every name matches.
    None,
    Regex(Regex),
    /// `globset` compiles glob syntax down to a regex; we keep the compiled
    /// automaton directly rather than re-deriving it per entry.
    Glob(Regex),
}

impl Matcher {
    /// Build a matcher from CLI-level intent. `icase` is the sole source of
    /// case-insensitivity for both modes (§4.6, §6: "case-insensitive ...
    /// flags derived from options") — there is no smart-case fallback.
    pub fn build(pattern: Option<&str>, use_glob: bool, icase: bool) -> Result<Self> {
        let pattern = match pattern {
            None | Some("") => return Ok(Matcher::None),
            Some(p) => p,
        };

        if use_glob {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(false)
                .case_insensitive(icase)
                .build()
                .with_context(|| format!("invalid glob pattern '{pattern}'"))?;
            let regex = RegexBuilder::new(glob.regex())
                .build()
                .with_context(|| format!("could not compile glob pattern '{pattern}'"))?;
            Ok(Matcher::Glob(regex))
        } else {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(icase)
                .build()
                .with_context(|| format!("invalid regex pattern '{pattern}'"))?;
            Ok(Matcher::Regex(regex))
        }
    }

    /// A worker's private scratch handle. The `regex` crate's automata are
    /// `Sync` and need no per-thread JIT stack the way a backtracking PCRE
    /// engine would, but the facade still hands every worker its own
    /// `Scratch` so a future backtracking engine could plug in here without
    /// changing the call sites.
    pub fn new_scratch(&self) -> Scratch {
        Scratch(())
    }

    pub fn is_match(&self, _scratch: &mut Scratch, name: &[u8]) -> bool {
        match self {
            Matcher::None => true,
            Matcher::Regex(re) | Matcher::Glob(re) => re.is_match(name),
        }
    }
}

/// Per-worker scratch memory. Opaque on purpose: callers must not reach
/// into it, only pass it back into `Matcher::is_match`.
pub struct Scratch(());

#[cfg(test)]
mod tests {
    use super::Matcher;

    fn matches(m: &Matcher, name: &str) -> bool {
        let mut scratch = m.new_scratch();
        m.is_match(&mut scratch, name.as_bytes())
    }

    #[test]
    fn empty_pattern_matches_everything() {
        let m = Matcher::build(None, false, false).unwrap();
        assert!(matches(&m, "anything"));
        assert!(matches(&m, ""));

        let m = Matcher::build(Some(""), false, false).unwrap();
        assert!(matches(&m, "anything"));
    }

    #[test]
    fn regex_is_case_sensitive_by_default() {
        let m = Matcher::build(Some("^c\\..*$"), false, false).unwrap();
        assert!(matches(&m, "c.txt"));
        assert!(!matches(&m, "C.txt"));
        assert!(!matches(&m, "d.txt"));
    }

    #[test]
    fn regex_is_case_sensitive_by_default_for_uppercase_pattern() {
        let m = Matcher::build(Some("^Cargo"), false, false).unwrap();
        assert!(matches(&m, "Cargo.toml"));
        assert!(!matches(&m, "cargo.toml"));
    }

    #[test]
    fn explicit_icase_makes_regex_case_insensitive() {
        let m = Matcher::build(Some("^Cargo"), false, true).unwrap();
        assert!(matches(&m, "cargo.toml"));
        assert!(matches(&m, "Cargo.toml"));
    }

    #[test]
    fn glob_mode_does_not_cross_path_separators_by_default_in_full_path() {
        let m = Matcher::build(Some("*.md"), true, false).unwrap();
        assert!(matches(&m, "d.md"));
        assert!(!matches(&m, "d.txt"));
    }

    #[test]
    fn glob_is_case_sensitive_by_default() {
        let m = Matcher::build(Some("*.md"), true, false).unwrap();
        assert!(!matches(&m, "D.MD"));
    }

    #[test]
    fn explicit_icase_makes_glob_case_insensitive() {
        let m = Matcher::build(Some("*.md"), true, true).unwrap();
        assert!(matches(&m, "D.MD"));
    }

    #[test]
    fn invalid_regex_is_rejected() {
        assert!(Matcher::build(Some("("), false, false).is_err());
    }
}
