//! MatcherSet: one-or-more include [`SpecMatcher`]s plus zero-or-more
//! exclude `SpecMatcher`s, combined with include-any/exclude-overrides
//! semantics (spec §4.6).

use crate::error::GlobError;
use crate::model::MatchOptions;
use crate::path_ops;
use crate::spec_matcher::{MatcherMode, SpecMatcher};
use crate::specification::Specification;

/// A composed set of include and exclude specifications bound to a
/// single `root_directory`.
///
/// A file or directory matches the set iff it matches at least one
/// include matcher and no exclude matcher (spec §4.6). Directory
/// recursion descends wherever any include matcher says to, and is
/// pruned wherever any subtree-exclude matcher says to — per-file
/// excludes never prune recursion.
pub struct MatcherSet {
    includes: Vec<SpecMatcher>,
    excludes: Vec<SpecMatcher>,
}

impl MatcherSet {
    /// `includes` must be non-empty. `root_directory` should already be
    /// normalized (see [`crate::path_ops`]).
    pub fn new(
        includes: Vec<Specification>,
        excludes: Vec<Specification>,
        root_directory: &str,
        options: MatchOptions,
    ) -> Result<Self, GlobError> {
        if includes.is_empty() {
            return Err(GlobError::InvalidArgument(
                "MatcherSet requires at least one include specification".to_owned(),
            ));
        }

        let root_directory = path_ops::remove_relative_segments(&path_ops::normalize_separators(root_directory));

        let includes = includes
            .into_iter()
            .map(|spec| SpecMatcher::new(spec, &root_directory, MatcherMode::Include, options))
            .collect();

        let excludes = excludes
            .into_iter()
            .map(|spec| SpecMatcher::new(spec, &root_directory, MatcherMode::Exclude, options))
            .collect();

        Ok(Self { includes, excludes })
    }

    /// Should the walker descend into `current_directory/name`?
    ///
    /// True iff at least one include matcher says to descend and no
    /// subtree-exclude matcher prunes this exact directory.
    pub fn should_descend(&self, current_directory: &str, name: &str) -> bool {
        let included = self
            .includes
            .iter()
            .any(|m| m.matches_directory(current_directory, name, false));

        if !included {
            return false;
        }

        !self
            .excludes
            .iter()
            .any(|m| m.matches_directory(current_directory, name, true))
    }

    /// Does `current_directory/name` match this set?
    pub fn matches_file(&mut self, current_directory: &str, name: &str) -> bool {
        let included = self
            .includes
            .iter_mut()
            .any(|m| m.matches_file(current_directory, name));

        if !included {
            return false;
        }

        !self
            .excludes
            .iter_mut()
            .any(|m| m.matches_file(current_directory, name))
    }

    /// Invalidate every matcher's per-directory cache. Must be called
    /// exactly once per directory the walker completes.
    pub fn directory_finished(&mut self) {
        for m in &mut self.includes {
            m.directory_finished();
        }
        for m in &mut self.excludes {
            m.directory_finished();
        }
    }

    pub fn includes(&self) -> &[SpecMatcher] {
        &self.includes
    }

    pub fn excludes(&self) -> &[SpecMatcher] {
        &self.excludes
    }

    /// One-shot convenience: does `path` (relative to `root_directory`,
    /// or fully qualified) match `includes`/`excludes` (each a
    /// `;`-separated specification list, per [`Specification::split`])?
    ///
    /// Builds a transient set and a single directory/file-name split
    /// from `path`, without driving a walker — mirrors the teacher's own
    /// `Pattern::is_match` one-shot convenience sitting next to its
    /// walker. An empty `includes` list, which [`MatcherSet::new`]
    /// otherwise rejects, simply matches nothing here: there's no
    /// constructor result for a caller of a plain `bool` convenience to
    /// unpack.
    pub fn is_match_one_shot(root_directory: &str, path: &str, includes: &str, excludes: &str) -> bool {
        let options = MatchOptions::default();
        let casing = options.casing.resolve();

        let includes = Specification::split(includes, casing);
        let excludes = Specification::split(excludes, casing);

        let root_directory = path_ops::remove_relative_segments(&path_ops::normalize_separators(root_directory));

        let mut matcher_set = match MatcherSet::new(includes, excludes, &root_directory, options) {
            Ok(matcher_set) => matcher_set,
            Err(_) => return false,
        };

        let normalized_path = path_ops::remove_relative_segments(&path_ops::normalize_separators(path));

        let (directory, name) = match normalized_path.rfind(path_ops::SEP) {
            Some(idx) => (&normalized_path[..idx], &normalized_path[idx + path_ops::SEP.len_utf8()..]),
            None => ("", normalized_path.as_str()),
        };

        matcher_set.matches_file(directory, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Casing, Dialect};

    fn opts() -> MatchOptions {
        MatchOptions { casing: Casing::CaseSensitive, dialect: Dialect::Simple }
    }

    fn set(includes: &[&str], excludes: &[&str], root: &str) -> MatcherSet {
        MatcherSet::new(
            includes.iter().map(|s| Specification::parse(s)).collect(),
            excludes.iter().map(|s| Specification::parse(s)).collect(),
            root,
            opts(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_empty_includes() {
        let err = MatcherSet::new(vec![], vec![], "/root", opts());
        assert!(err.is_err());
    }

    #[test]
    fn include_any_semantics() {
        let mut m = set(&["*.cs", "*.txt"], &[], "/root");
        assert!(m.matches_file("/root", "a.cs"));
        assert!(m.matches_file("/root", "a.txt"));
        assert!(!m.matches_file("/root", "a.bin"));
    }

    #[test]
    fn exclude_overrides_include() {
        let mut m = set(&["**/*.cs"], &["**/Generated.cs"], "/root");
        assert!(m.matches_file("/root", "Program.cs"));
        assert!(!m.matches_file("/root", "Generated.cs"));
    }

    #[test]
    fn subtree_exclude_prunes_recursion_but_per_file_exclude_does_not() {
        let m = set(&["**/*.cs"], &["bin/**"], "/root");
        assert!(!m.should_descend(&format!("/root{}bin", std::path::MAIN_SEPARATOR), "Debug"));
        assert!(m.should_descend("/root", "src"));

        let m2 = set(&["**/*.cs"], &["**/*.Designer.cs"], "/root");
        assert!(m2.should_descend("/root", "anything"));
    }

    #[test]
    fn is_match_one_shot_respects_include_and_exclude() {
        assert!(MatcherSet::is_match_one_shot(
            "/root",
            &format!("/root{sep}src{sep}Program.cs", sep = std::path::MAIN_SEPARATOR),
            "**/*.cs",
            ""
        ));
        assert!(!MatcherSet::is_match_one_shot(
            "/root",
            &format!("/root{sep}bin{sep}Generated.cs", sep = std::path::MAIN_SEPARATOR),
            "**/*.cs",
            "bin/**"
        ));
    }

    #[test]
    fn is_match_one_shot_rejects_empty_includes() {
        assert!(!MatcherSet::is_match_one_shot("/root", "/root/a.cs", "", ""));
    }
}
