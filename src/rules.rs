//! Repository coding rules (`.cursor/rules/*.mdc`).
//!
//! A rule file starts with a `---` delimited front matter of `key: value`
//! lines followed by free text:
//!
//! ```text
//! ---
//! description: error handling
//! globs: src/**/*.rs, *.toml
//! alwaysApply: false
//! ---
//! Return errors instead of panicking.
//! ```
//!
//! The front matter is not YAML (`globs` values start with `*`), so it is
//! read line by line. A rule applies to a change when it is `alwaysApply`
//! or one of its globs matches a changed path.

use crate::error::{ConciseError, Result};
use crate::git;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::Serialize;
use std::path::Path;

/// Where rule files live, relative to the repository root.
pub const DEFAULT_RULES_DIR: &str = ".cursor/rules";

const RULE_EXTENSION: &str = ".mdc";
const FRONT_MATTER_DELIMITER: &str = "---";

/// One parsed rule file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CursorRule {
    /// File stem of the rule file.
    pub name: String,
    /// Front matter `description`, or the name when absent.
    pub description: String,
    pub globs: Vec<String>,
    pub always_apply: bool,
    pub content: String,
}

impl CursorRule {
    /// Parse a rule file's text.
    ///
    /// # Returns
    ///
    /// * `Ok(CursorRule)` - Front matter found
    /// * `Err(ConciseError::UserError)` - No `---` delimited front matter
    pub fn parse(name: &str, text: &str) -> Result<Self> {
        let missing = || {
            ConciseError::UserError(format!("invalid rule '{}': missing front matter", name))
        };

        let rest = text
            .trim()
            .strip_prefix(FRONT_MATTER_DELIMITER)
            .ok_or_else(missing)?;
        let (front_matter, content) = split_front_matter(rest).ok_or_else(missing)?;

        let mut description = None;
        let mut globs = Vec::new();
        let mut always_apply = false;

        for line in front_matter.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "description" if !value.is_empty() => description = Some(value.to_string()),
                "globs" => {
                    globs = value
                        .split(',')
                        .map(str::trim)
                        .filter(|g| !g.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                "alwaysApply" => always_apply = value == "true",
                _ => {}
            }
        }

        Ok(Self {
            name: name.to_string(),
            description: description.unwrap_or_else(|| name.to_string()),
            globs,
            always_apply,
            content: content.trim().to_string(),
        })
    }

    /// Compile the globs. Invalid ones are logged and left out.
    fn glob_set(&self) -> GlobSet {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.globs {
            match GlobBuilder::new(&base_pattern(pattern))
                .literal_separator(true)
                .build()
            {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => log::warn!("rule '{}': ignoring glob '{}': {}", self.name, pattern, e),
            }
        }
        builder.build().unwrap_or_else(|e| {
            log::warn!("rule '{}': {}", self.name, e);
            GlobSet::empty()
        })
    }
}

/// Split the text after the opening delimiter at the closing delimiter line.
fn split_front_matter(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if offset > 0 && line.trim_end() == FRONT_MATTER_DELIMITER {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// A pattern without `/` matches the file name at any depth.
fn base_pattern(pattern: &str) -> String {
    if pattern.contains('/') {
        pattern.to_string()
    } else {
        format!("**/{}", pattern)
    }
}

/// Rules that apply to any of `paths`, each once, in order of the first
/// path they apply to.
pub fn matching_rules<'a, S: AsRef<str>>(paths: &[S], rules: &'a [CursorRule]) -> Vec<&'a CursorRule> {
    let compiled: Vec<GlobSet> = rules.iter().map(CursorRule::glob_set).collect();
    let mut matched = vec![false; rules.len()];
    let mut result = Vec::new();

    for path in paths {
        let path = path.as_ref();
        for (idx, rule) in rules.iter().enumerate() {
            if !matched[idx] && (rule.always_apply || compiled[idx].is_match(path)) {
                matched[idx] = true;
                result.push(rule);
            }
        }
    }

    result
}

/// Load every `*.mdc` rule under `dir` as tracked at revision `rev`.
///
/// Unreadable directories and invalid rule files are logged and skipped.
pub fn load_rules<P: AsRef<Path>>(cwd: P, rev: &str, dir: &str) -> Vec<CursorRule> {
    let cwd = cwd.as_ref();
    if dir.is_empty() {
        return Vec::new();
    }

    let files = match git::list_files(cwd, rev, dir) {
        Ok(files) => files,
        Err(e) => {
            log::warn!("could not list rules in {}: {}", dir, e);
            return Vec::new();
        }
    };

    let mut rules = Vec::new();
    for file in files.iter().filter(|f| f.ends_with(RULE_EXTENSION)) {
        let name = Path::new(file)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.clone());
        match CursorRule::parse(&name, &git::show_file(cwd, rev, file)) {
            Ok(rule) => rules.push(rule),
            Err(e) => log::warn!("skipping rule file {}: {}", file, e),
        }
    }

    log::debug!("loaded {} rules from {}", rules.len(), dir);
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{commit_file, create_test_repo};

    const MOCK_RULE: &str = "---
description: generating mock providers for DType or IDType TypeDefinitions
globs: **/__dtype-mocks__/*.mock.ts,*Mock.ts
alwaysApply: false
---

my custom rules here";

    fn rule(name: &str, globs: &[&str], always_apply: bool) -> CursorRule {
        CursorRule {
            name: name.to_string(),
            description: name.to_string(),
            globs: globs.iter().map(|g| g.to_string()).collect(),
            always_apply,
            content: String::new(),
        }
    }

    #[test]
    fn test_parse_rule() {
        let rule = CursorRule::parse("mocks", MOCK_RULE).unwrap();

        assert_eq!(
            rule,
            CursorRule {
                name: "mocks".to_string(),
                description: "generating mock providers for DType or IDType TypeDefinitions"
                    .to_string(),
                globs: vec![
                    "**/__dtype-mocks__/*.mock.ts".to_string(),
                    "*Mock.ts".to_string()
                ],
                always_apply: false,
                content: "my custom rules here".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_rule_tolerates_leading_whitespace() {
        let text = format!("\n    \n{}", MOCK_RULE);
        let rule = CursorRule::parse("mocks", &text).unwrap();
        assert_eq!(rule.globs.len(), 2);
        assert_eq!(rule.content, "my custom rules here");
    }

    #[test]
    fn test_parse_rule_missing_front_matter() {
        let err = CursorRule::parse("plain", "my custom rules here").unwrap_err();
        assert!(err.to_string().contains("missing front matter"));

        let unclosed = CursorRule::parse("open", "---\ndescription: x\n").unwrap_err();
        assert!(unclosed.to_string().contains("missing front matter"));
    }

    #[test]
    fn test_parse_rule_defaults() {
        let rule = CursorRule::parse("style", "---\nglobs: \nalwaysApply: true\n---\nbody").unwrap();

        assert_eq!(rule.description, "style");
        assert!(rule.globs.is_empty());
        assert!(rule.always_apply);
        assert_eq!(rule.content, "body");
    }

    #[test]
    fn test_content_keeps_later_delimiters() {
        let rule = CursorRule::parse("md", "---\nglobs: *.md\n---\nintro\n---\noutro\n").unwrap();
        assert_eq!(rule.content, "intro\n---\noutro");
    }

    #[test]
    fn test_glob_matching() {
        let rules = vec![
            rule("ts", &["*.ts"], false),
            rule("src-ts", &["src/*.ts"], false),
            rule("nested", &["**/*.ts"], false),
            rule("js", &["*.js"], false),
            rule("test-dir", &["test/*.ts"], false),
        ];

        let matched = matching_rules(&["src/file.ts"], &rules);
        let names: Vec<&str> = matched.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["ts", "src-ts", "nested"]);

        let matched = matching_rules(&["src/nested/file.ts"], &rules);
        let names: Vec<&str> = matched.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["ts", "nested"]);
    }

    #[test]
    fn test_matching_rules_unique_and_always_apply() {
        let rules = vec![
            rule("rust", &["*.rs"], false),
            rule("always", &[], true),
            rule("none", &[], false),
        ];

        let matched = matching_rules(&["a.rs", "b.rs", "README.md"], &rules);

        let names: Vec<&str> = matched.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["rust", "always"]);
    }

    #[test]
    fn test_no_paths_match_nothing() {
        let rules = vec![rule("always", &[], true)];
        assert!(matching_rules::<&str>(&[], &rules).is_empty());
    }

    #[test]
    fn test_invalid_glob_is_ignored() {
        let rules = vec![rule("broken", &["src/[oops", "*.rs"], false)];
        assert_eq!(matching_rules(&["main.rs"], &rules).len(), 1);
    }

    #[test]
    fn test_load_rules_from_repository() {
        let temp_dir = create_test_repo();
        let path = temp_dir.path();
        commit_file(path, ".cursor/rules/mocks.mdc", MOCK_RULE);
        commit_file(path, ".cursor/rules/broken.mdc", "no front matter");
        commit_file(path, ".cursor/rules/notes.txt", "---\nglobs: *\n---\nx");

        let rules = load_rules(path, "HEAD", DEFAULT_RULES_DIR);

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].name, "mocks");
    }

    #[test]
    fn test_load_rules_without_directory() {
        let temp_dir = create_test_repo();
        assert!(load_rules(temp_dir.path(), "HEAD", DEFAULT_RULES_DIR).is_empty());
        assert!(load_rules(temp_dir.path(), "HEAD", "").is_empty());
    }
}
