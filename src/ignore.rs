//! A parser and matcher for the documented `.gitignore`-like subset: one
//! ordered rule list per directory that owns an ignore file, plus a single
//! process-wide global ruleset. Deliberately does not stack ancestor
//! rulesets — only the nearest enclosing ruleset (plus the global one) is
//! ever consulted, per §4.2.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use etcetera::base_strategy::{choose_base_strategy, BaseStrategy};
use globset::{GlobBuilder, GlobMatcher};

const IGNORE_FILE_NAME: &str = ".gitignore";

struct Rule {
    whitelisted: bool,
    only_dir: bool,
    matcher: GlobMatcher,
}

impl Rule {
    fn matches(&self, relative: &Path, is_dir: bool) -> bool {
        if self.only_dir && !is_dir {
            return false;
        }
        self.matcher.is_match(relative)
    }
}

/// A parsed `.gitignore`, scoped to the directory it was loaded from.
pub struct IgnoreRuleset {
    base: PathBuf,
    rules: Vec<Rule>,
}

impl IgnoreRuleset {
    /// If `dir` contains an ignore file, parse it and return a ruleset whose
    /// rule base is `dir`. Returns `None` both when there is no ignore file
    /// and when it could not be read — in either case the caller is
    /// expected to fall back to inheriting the nearest enclosing ruleset
    /// rather than treating the directory as having an (empty) ruleset of
    /// its own (§4.5 step 8).
    pub fn parse(dir: &Path) -> Option<Arc<IgnoreRuleset>> {
        let contents = std::fs::read_to_string(dir.join(IGNORE_FILE_NAME)).ok()?;
        let rules = parse_rules(&contents, false);
        Some(Arc::new(IgnoreRuleset {
            base: dir.to_path_buf(),
            rules,
        }))
    }

    fn relative_to_base<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.base).unwrap_or(path)
    }
}

/// The single process-wide ruleset loaded from `$XDG_CONFIG_HOME/git/ignore`
/// or `$HOME/.config/git/ignore`. Its rules are matched against the full
/// path rather than anything relative to a workspace (§9 Open Questions:
/// "un-anchored").
pub struct GlobalIgnore {
    rules: Vec<Rule>,
}

impl GlobalIgnore {
    /// Load the global ignore file, if one exists and is readable.
    pub fn load() -> Option<GlobalIgnore> {
        let candidate = global_ignore_path()?;
        let contents = std::fs::read_to_string(candidate).ok()?;
        Some(GlobalIgnore {
            rules: parse_rules(&contents, true),
        })
    }
}

fn global_ignore_path() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg).join("git").join("ignore"));
        }
    }
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("git").join("ignore"))
}

/// Decide whether `path` (known to be a directory iff `is_dir`) should be
/// excluded, given the nearest enclosing local ruleset (if any) and the
/// global ruleset (if loaded). The last matching rule, local then global,
/// wins; whitelisted matches re-include, non-whitelisted matches exclude,
/// and no match at all means "not ignored" (§4.2 step 4).
pub fn is_ignored(
    local: Option<&IgnoreRuleset>,
    global: Option<&GlobalIgnore>,
    path: &Path,
    is_dir: bool,
) -> bool {
    let mut ignored = false;

    if let Some(ruleset) = local {
        let relative = ruleset.relative_to_base(path);
        for rule in &ruleset.rules {
            if rule.matches(relative, is_dir) {
                ignored = !rule.whitelisted;
            }
        }
    }

    if let Some(global) = global {
        let normalized = strip_leading_current_dir(path);
        for rule in &global.rules {
            if rule.matches(normalized, is_dir) {
                ignored = !rule.whitelisted;
            }
        }
    }

    ignored
}

/// Strip a leading `./` the same way `relative_to_base` strips the rule
/// base: the walker's default seed is `.`, so every path it produces for a
/// whole run carries a literal `./` prefix (e.g. `./foo/a.c`), which an
/// anchored global rule (compiled as a full-string match with no `**/`
/// prefix) would otherwise never match. Grounded on
/// `examples/alexandervashurin-ripgrep/crates/ignore/src/gitignore.rs`,
/// which strips the same prefix from the match candidate before testing.
fn strip_leading_current_dir(path: &Path) -> &Path {
    path.strip_prefix(".").unwrap_or(path)
}

fn parse_rules(contents: &str, unanchored_base_is_global: bool) -> Vec<Rule> {
    let _ = unanchored_base_is_global; // both files use the same line grammar (§4.2)
    contents.lines().filter_map(parse_line).collect()
}

fn parse_line(raw: &str) -> Option<Rule> {
    let mut s = raw.trim_start();
    if s.is_empty() {
        return None;
    }

    if s.starts_with("\\#") {
        s = &s[1..];
    } else if s.starts_with('#') {
        return None;
    }

    let mut whitelisted = false;
    if let Some(rest) = s.strip_prefix("\\!") {
        s = rest;
        // the escaped '!' is a literal character belonging to the pattern;
        // re-attach it since `rest` starts right after the backslash.
        return build_rule(&format!("!{s}"), false);
    } else if let Some(rest) = s.strip_prefix('!') {
        whitelisted = true;
        s = rest;
    }

    build_rule(s, whitelisted)
}

fn build_rule(s: &str, whitelisted: bool) -> Option<Rule> {
    let mut s = strip_trailing_unquoted_spaces(s);
    if s.is_empty() {
        return None;
    }

    let mut only_dir = false;
    let mut end = s.len();
    while end > 0 && s.as_bytes()[end - 1] == b'/' {
        only_dir = true;
        end -= 1;
    }
    s = &s[..end];
    if s.is_empty() {
        return None;
    }

    let anchored = s.contains('/');
    let pattern_text = s.strip_prefix('/').unwrap_or(s);

    let glob_source = if anchored {
        pattern_text.to_string()
    } else {
        format!("**/{pattern_text}")
    };

    // `literal_separator` keeps `*`/`?` from crossing a `/`, matching the
    // documented invariant that anchored patterns' wildcards stay within a
    // path component; `**` is unaffected and still spans directories.
    let glob = GlobBuilder::new(&glob_source)
        .literal_separator(true)
        .build()
        .ok()?;
    Some(Rule {
        whitelisted,
        only_dir,
        matcher: glob.compile_matcher(),
    })
}

fn strip_trailing_unquoted_spaces(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = bytes.len();
    while end > 0 && bytes[end - 1] == b' ' {
        if end >= 2 && bytes[end - 2] == b'\\' {
            break;
        }
        end -= 1;
    }
    &s[..end]
}
