//! Reference walker: a depth-first `std::fs::read_dir` traversal driving
//! a [`MatcherSet`]'s three operations in the exact order the core
//! contract requires — `should_descend`/`matches_file` for each entry of
//! a directory, then `directory_finished` once the directory is
//! exhausted, before returning control to the parent directory (spec §5).
//!
//! Kept architecturally separate from the matching core the way the
//! teacher keeps its own `Walker` separate from `Pattern`: `MatcherSet`
//! and `SpecMatcher` know nothing about `std::fs`, so callers embedding
//! this crate in a virtual filesystem or an incremental build graph can
//! drive the same state machine over their own directory source.
//!
//! # Ordering and traversal rules
//!
//! - Directories are yielded to the matcher set before their content.
//! - The root directory itself is never yielded.
//! - No guarantee is given as to the order results are yielded in.

use std::path::{Path, PathBuf};

use crate::error::WalkError;
use crate::matcher_set::MatcherSet;

/// Walks `root_directory` depth-first, yielding every file path matching
/// `matcher_set`.
///
/// Errors reading a directory are collected rather than aborting the
/// walk: an unreadable directory is treated as empty, not fatal.
pub struct Walker<'a> {
    matcher_set: &'a mut MatcherSet,
    stack: Vec<std::fs::ReadDir>,
    dir_stack: Vec<PathBuf>,
    pending: Vec<PathBuf>,
    errors: Vec<WalkError>,
}

impl<'a> Walker<'a> {
    pub fn new(matcher_set: &'a mut MatcherSet, root_directory: impl AsRef<Path>) -> Self {
        let root_directory = root_directory.as_ref().to_path_buf();

        let mut errors = vec![];
        let mut stack = vec![];
        let mut dir_stack = vec![];

        match std::fs::read_dir(&root_directory) {
            Ok(entries) => {
                stack.push(entries);
                dir_stack.push(root_directory);
            }
            Err(source) => errors.push(WalkError::ReadDir { path: root_directory, source }),
        }

        Self { matcher_set, stack, dir_stack, pending: vec![], errors }
    }

    /// Errors encountered so far (unreadable directories). Non-fatal:
    /// the walk continues past them.
    pub fn errors(&self) -> &[WalkError] {
        &self.errors
    }
}

impl Iterator for Walker<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            if let Some(next) = self.pending.pop() {
                return Some(next);
            }

            let Some(entries) = self.stack.last_mut() else {
                return None;
            };

            let current_dir = self.dir_stack.last().expect("dir_stack mirrors stack").clone();
            let current_dir_str = current_dir.to_string_lossy().into_owned();

            match entries.next() {
                Some(Ok(entry)) => {
                    let name = entry.file_name().to_string_lossy().into_owned();

                    let file_type = match entry.file_type() {
                        Ok(ft) => ft,
                        Err(source) => {
                            self.errors.push(WalkError::ReadEntry { path: current_dir, source });
                            continue;
                        }
                    };

                    if file_type.is_dir() {
                        if self.matcher_set.should_descend(&current_dir_str, &name) {
                            let child_dir = entry.path();
                            match std::fs::read_dir(&child_dir) {
                                Ok(child_entries) => {
                                    self.stack.push(child_entries);
                                    self.dir_stack.push(child_dir);
                                }
                                Err(source) => self.errors.push(WalkError::ReadDir { path: child_dir, source }),
                            }
                        }
                    } else if self.matcher_set.matches_file(&current_dir_str, &name) {
                        self.pending.push(entry.path());
                    }
                }
                Some(Err(source)) => self.errors.push(WalkError::ReadEntry { path: current_dir, source }),
                None => {
                    self.matcher_set.directory_finished();
                    self.stack.pop();
                    self.dir_stack.pop();
                }
            }
        }
    }
}

/// Walk `root_directory` and collect every matching path. Convenience
/// for callers that don't need streaming iteration or walker error
/// inspection.
pub fn walk(matcher_set: &mut MatcherSet, root_directory: impl AsRef<Path>) -> Vec<PathBuf> {
    Walker::new(matcher_set, root_directory).collect()
}
