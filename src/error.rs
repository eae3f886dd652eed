//! Error taxonomy for the glob core.
//!
//! The matching hot path never raises: `SpecMatcher` and `MatcherSet`
//! return plain booleans (see [`crate::spec_matcher`] and
//! [`crate::matcher_set`]). Errors are only possible at construction time
//! (building a [`crate::matcher_set::MatcherSet`] from caller-supplied
//! matchers) and in the reference walker's filesystem I/O.

use thiserror::Error;

/// Errors raised while building or driving the glob core.
///
/// Parse-time oddities (malformed `%HH`, stray separators, duplicate
/// separators) are never errors: `Specification` normalizes them away
/// silently, preserving MSBuild's permissive behavior (spec §7).
#[derive(Debug, Error)]
pub enum GlobError {
    /// A required matcher was missing or otherwise malformed, e.g. adding
    /// a null include matcher to a [`crate::matcher_set::MatcherSet`], or
    /// calling [`crate::specification::Specification::parse`] on a spec
    /// list position that requires a non-empty entry.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An index or length was out of bounds on [`crate::segment_enumerator::SegmentEnumerator`]'s
    /// public indexer. Debug aid only; never produced by matching itself.
    #[error("index {index} out of range (length {length})")]
    OutOfRange { index: usize, length: usize },
}

/// Errors surfaced by the reference walker ([`crate::walker`]) while
/// enumerating a directory tree.
///
/// This is a convenience wrapper around the standard filesystem I/O
/// errors the walker may hit; it's not part of the core matching
/// contract, which never fails.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read directory entry under {path}: {source}")]
    ReadEntry {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}
