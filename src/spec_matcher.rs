//! SpecMatcher: the per-directory state machine that drives a single
//! [`Specification`] against a walker (spec §4.5).
//!
//! The directory-vs-`WildPath` two-pointer algorithm below
//! (`match_wild_path`) is a segment-granularity adaptation of the
//! teacher crate's own `Component::Wildcard` handling in its
//! `pattern::match_components` (a single backtrack point per wildcard,
//! with a `Starved` outcome meaning "not matched yet, but a descendant
//! might be"). Here it walks `**` over whole path segments instead of
//! `*` over characters, and calls into [`crate::wildcard::matches`] for
//! each non-`**` segment instead of a compiled regex.

use crate::model::{Dialect, MatchOptions, ResolvedCasing};
use crate::path_ops::{self, SEP};
use crate::segment_enumerator::collect_segments;
use crate::specification::Specification;
use crate::wildcard;

/// Whether a [`SpecMatcher`] participates in a [`crate::matcher_set::MatcherSet`]
/// as an include or an exclude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherMode {
    Include,
    Exclude,
}

/// Outcome of matching `WildPath` segments against a (possibly partial)
/// directory path. Mirrors the teacher's `PatternMatchResult` trichotomy
/// relevant to directory traversal: fully satisfied, definitely
/// incompatible, or "not yet, but a descendant could still match".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirVerdict {
    Matched,
    NotMatched,
    Starved,
}

/// Per-directory memo: whether the directory currently being visited
/// fully satisfies `FixedPath`/`WildPath`, so that `matches_file` reduces
/// to a single `FileName` comparison against the leaf name.
struct DirCache {
    directory: String,
    fully_matches: bool,
}

/// Binds one [`Specification`] to a `root_directory` and a [`MatcherMode`].
///
/// Mutable per-directory cache aside, a `SpecMatcher` performs no
/// allocation on the file-matching hot path once its cache is warm
/// (spec §5).
pub struct SpecMatcher {
    spec: Specification,
    root_directory: String,
    mode: MatcherMode,
    dialect: Dialect,
    casing: ResolvedCasing,
    always_recurse: bool,
    ends_in_any_directory: bool,
    is_subtree_exclude: bool,
    cache: Option<DirCache>,
}

impl SpecMatcher {
    /// `root_directory` must already be normalized (see [`crate::path_ops::normalize_separators`]
    /// and [`crate::path_ops::remove_relative_segments`]) — it is the
    /// walker's starting directory, combined logically with the spec's
    /// `FixedPath` without materializing a new string until actually
    /// needed.
    pub fn new(spec: Specification, root_directory: &str, mode: MatcherMode, options: MatchOptions) -> Self {
        let always_recurse = spec.wild_path_starts_with_any_directory();
        let ends_in_any_directory = spec.ends_in_any_directory();
        let is_subtree_exclude = ends_in_any_directory && spec.file_name() == "*";

        Self {
            root_directory: root_directory.to_owned(),
            dialect: options.dialect,
            casing: options.casing.resolve(),
            always_recurse,
            ends_in_any_directory,
            is_subtree_exclude,
            spec,
            mode,
            cache: None,
        }
    }

    pub fn spec(&self) -> &Specification {
        &self.spec
    }

    pub fn mode(&self) -> MatcherMode {
        self.mode
    }

    pub fn always_recurse(&self) -> bool {
        self.always_recurse
    }

    pub fn ends_in_any_directory(&self) -> bool {
        self.ends_in_any_directory
    }

    /// The effective absolute fixed prefix: the spec's own `FixedPath`
    /// if it is fully qualified, otherwise `root_directory` joined with
    /// it.
    fn effective_fixed_prefix(&self) -> String {
        if self.spec.is_fully_qualified() {
            self.spec.fixed_path().to_owned()
        } else {
            path_ops::join(&self.root_directory, self.spec.fixed_path())
        }
    }

    /// Should the walker descend into `current_directory/name`
    /// (`match_for_exclusion = false`), or does this directory itself
    /// match as an exclude target (`match_for_exclusion = true`)?
    pub fn matches_directory(&self, current_directory: &str, name: &str, match_for_exclusion: bool) -> bool {
        let _ = match_for_exclusion;

        if !path_ops::is_same_or_subdirectory(&self.root_directory, current_directory, self.casing) {
            return false;
        }

        match self.mode {
            MatcherMode::Include => self.matches_directory_include(current_directory, name),
            MatcherMode::Exclude => self.matches_directory_exclude(current_directory, name),
        }
    }

    fn matches_directory_include(&self, current_directory: &str, name: &str) -> bool {
        let fixed_prefix = self.effective_fixed_prefix();

        if path_ops::is_same_or_subdirectory(&fixed_prefix, current_directory, self.casing) {
            if self.always_recurse {
                return true;
            }

            let relative_dir = relative_to(&fixed_prefix, current_directory);
            let segments = collect_segments(relative_dir, name);

            return matches!(
                match_wild_path(self.spec.wild_path(), &segments, self.dialect, self.casing),
                DirVerdict::Matched | DirVerdict::Starved
            );
        }

        if path_ops::is_same_or_subdirectory(current_directory, &fixed_prefix, self.casing) {
            // Still descending toward FixedPath: the next segment must
            // equal the next literal FixedPath component (FixedPath
            // never contains wildcards by construction).
            let remaining_fixed = relative_to(current_directory, &fixed_prefix);
            return remaining_fixed
                .split(SEP)
                .find(|s| !s.is_empty())
                .is_some_and(|seg| self.casing.str_eq(seg, name));
        }

        false
    }

    fn matches_directory_exclude(&self, current_directory: &str, name: &str) -> bool {
        if !self.is_subtree_exclude {
            return false;
        }

        let fixed_prefix = self.effective_fixed_prefix();

        if !path_ops::is_same_or_subdirectory(&fixed_prefix, current_directory, self.casing) {
            return false;
        }

        let relative_dir = relative_to(&fixed_prefix, current_directory);
        let segments = collect_segments(relative_dir, name);

        match_wild_path(self.spec.wild_path(), &segments, self.dialect, self.casing) == DirVerdict::Matched
    }

    /// Does `current_directory/name` match this spec?
    pub fn matches_file(&mut self, current_directory: &str, name: &str) -> bool {
        let fully_matches = self.directory_fully_matches(current_directory);

        fully_matches && wildcard::matches(name, self.spec.file_name(), self.dialect, self.casing)
    }

    fn directory_fully_matches(&mut self, current_directory: &str) -> bool {
        if let Some(cache) = &self.cache {
            if self.casing.str_eq(&cache.directory, current_directory) {
                return cache.fully_matches;
            }
        }

        let fixed_prefix = self.effective_fixed_prefix();

        let fully_matches = if !path_ops::is_same_or_subdirectory(&fixed_prefix, current_directory, self.casing)
            && !self.casing.str_eq(&fixed_prefix, current_directory)
        {
            false
        } else {
            let relative_dir = relative_to(&fixed_prefix, current_directory);
            let segments = collect_segments(relative_dir, "");
            let segments: Vec<&str> = segments.into_iter().filter(|s| !s.is_empty()).collect();

            match_wild_path(self.spec.wild_path(), &segments, self.dialect, self.casing) == DirVerdict::Matched
        };

        self.cache = Some(DirCache {
            directory: current_directory.to_owned(),
            fully_matches,
        });

        fully_matches
    }

    /// Invalidate the per-directory cache. Must be called exactly once
    /// per directory the walker completes, in LIFO order relative to
    /// `matches_directory`.
    pub fn directory_finished(&mut self) {
        self.cache = None;
    }
}

fn relative_to<'a>(prefix: &str, dir: &'a str) -> &'a str {
    let trimmed_prefix = prefix.trim_end_matches(SEP);

    if dir.len() <= trimmed_prefix.len() {
        return "";
    }

    let rest = &dir[trimmed_prefix.len()..];
    rest.trim_start_matches(SEP)
}

/// Match `wild` (WildPath segments, `**` meaning zero or more segments)
/// against `segs`, a (possibly partial) run of directory segments.
fn match_wild_path(wild: &[String], mut segs: &[&str], dialect: Dialect, casing: ResolvedCasing) -> DirVerdict {
    for i in 0..wild.len() {
        if wild[i] == "**" {
            let rest = &wild[i + 1..];

            if rest.is_empty() {
                return DirVerdict::Matched;
            }

            if segs.is_empty() {
                return if rest.iter().any(|w| w != "**") {
                    DirVerdict::Starved
                } else {
                    DirVerdict::Matched
                };
            }

            for j in 0..segs.len() {
                match match_wild_path(rest, &segs[j..], dialect, casing) {
                    DirVerdict::Matched => return DirVerdict::Matched,
                    DirVerdict::NotMatched | DirVerdict::Starved => {}
                }
            }

            return DirVerdict::Starved;
        }

        let Some(seg) = segs.first() else {
            return DirVerdict::Starved;
        };

        segs = &segs[1..];

        if !wildcard::matches(seg, &wild[i], dialect, casing) {
            return DirVerdict::NotMatched;
        }
    }

    if segs.is_empty() {
        DirVerdict::Matched
    } else {
        DirVerdict::NotMatched
    }
}
