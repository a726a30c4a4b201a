//! Choosing which files of a multi-file diff get rendered.
//!
//! Rules, applied in diff order:
//! - stop once `max_files` files were selected
//! - skip a file whose patch text exceeds `max_size_kb` KiB
//! - skip a file matching any `exclude` glob
//! - when `include` is non-empty, skip a file matching none of it
//!
//! A glob not starting with `/` matches at any depth (`*.rs` behaves like
//! `**/*.rs`). Paths are matched with a leading `/`.

use crate::diff::{normalize_path, FilePatch};
use crate::error::{ConciseError, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Why a file was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `max_files` files were already selected.
    LimitReached,
    /// Patch text is larger than the size limit.
    TooLarge { bytes: usize },
    /// Path matches an exclude glob.
    Excluded { pattern: String },
    /// Path matches no include glob.
    NotIncluded,
}

/// Outcome of [`FileFilter::select`].
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    pub selected: Vec<&'a FilePatch>,
    pub skipped: Vec<(&'a FilePatch, SkipReason)>,
}

/// Compiled include/exclude globs plus count and size limits.
#[derive(Debug, Clone)]
pub struct FileFilter {
    include: GlobSet,
    include_empty: bool,
    exclude: GlobSet,
    exclude_patterns: Vec<String>,
    max_files: usize,
    max_bytes: usize,
}

impl FileFilter {
    /// Compile the filter.
    ///
    /// # Returns
    ///
    /// * `Ok(FileFilter)` - All globs compiled
    /// * `Err(ConciseError::UserError)` - A glob pattern is invalid
    pub fn new(
        include: &[String],
        exclude: &[String],
        max_files: usize,
        max_size_kb: usize,
    ) -> Result<Self> {
        Ok(Self {
            include: build_globset(include, "include")?,
            include_empty: include.is_empty(),
            exclude: build_globset(exclude, "exclude")?,
            exclude_patterns: exclude.to_vec(),
            max_files,
            max_bytes: max_size_kb.saturating_mul(1024),
        })
    }

    /// Check a single path against the include/exclude globs.
    pub fn check_path(&self, path: &str) -> Option<SkipReason> {
        let rooted = rooted_path(path);

        let matches = self.exclude.matches(&rooted);
        if let Some(&first) = matches.first() {
            return Some(SkipReason::Excluded {
                pattern: self.exclude_patterns[first].clone(),
            });
        }

        if !self.include_empty && !self.include.is_match(&rooted) {
            return Some(SkipReason::NotIncluded);
        }

        None
    }

    /// Split `files` into the ones to render and the ones to skip.
    pub fn select<'a>(&self, files: &'a [FilePatch]) -> Selection<'a> {
        let mut selection = Selection::default();

        for file in files {
            let reason = if selection.selected.len() >= self.max_files {
                Some(SkipReason::LimitReached)
            } else if file.patch.len() > self.max_bytes {
                Some(SkipReason::TooLarge {
                    bytes: file.patch.len(),
                })
            } else {
                self.check_path(&file.path)
            };

            match reason {
                Some(reason) => {
                    log::debug!("skipping {}: {:?}", file.path, reason);
                    selection.skipped.push((file, reason));
                }
                None => selection.selected.push(file),
            }
        }

        selection
    }
}

/// Build a GlobSet from a list of glob patterns.
fn build_globset(patterns: &[String], field_name: &str) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let anchored = anchor_pattern(&normalize_path(pattern));
        let glob = GlobBuilder::new(&anchored)
            .literal_separator(true)
            .build()
            .map_err(|e| {
                ConciseError::UserError(format!(
                    "invalid glob pattern in {}: '{}' - {}",
                    field_name, pattern, e
                ))
            })?;
        builder.add(glob);
    }

    builder
        .build()
        .map_err(|e| ConciseError::UserError(format!("failed to compile {} globs: {}", field_name, e)))
}

/// Make a relative glob match at any depth.
fn anchor_pattern(pattern: &str) -> String {
    if pattern.is_empty() {
        "**/*".to_string()
    } else if pattern.starts_with('/') || pattern.starts_with("**/") {
        pattern.to_string()
    } else {
        format!("**/{}", pattern)
    }
}

/// `src/a.rs`, `./src/a.rs` and `/src/a.rs` all become `/src/a.rs`.
fn rooted_path(path: &str) -> String {
    let path = normalize_path(path);
    let trimmed = path.trim_start_matches("./").trim_start_matches('/');
    format!("/{}", trimmed)
}
