//! fileglob-core matches MSBuild-style glob specifications against a
//! directory tree: `FixedPath/WildPath/FileName` decomposition, `**`
//! any-depth directory wildcards, `*`/`?` single-segment wildcards, and
//! include/exclude specification sets.
//!
//! # Examples
//!
//! ```rust
//! use fileglob_core::glob_current_dir;
//!
//! for path in glob_current_dir("**/*.rs", "").unwrap() {
//!     println!("{}", path.display());
//! }
//! ```
//!
//! # Syntax
//!
//! See [`Specification`] for the spec grammar and [`MatchOptions`] for
//! casing/dialect configuration.

#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(unused_crate_dependencies)]

pub mod error;
pub mod matcher_set;
pub mod model;
pub mod path_ops;
pub mod segment_enumerator;
pub mod spec_matcher;
pub mod specification;
pub mod walker;
mod wildcard;

use std::path::{Path, PathBuf};

pub use crate::error::{GlobError, WalkError};
pub use crate::matcher_set::MatcherSet;
pub use crate::model::{Casing, Dialect, MatchOptions};
pub use crate::spec_matcher::{MatcherMode, SpecMatcher};
pub use crate::specification::{Specification, unescape};
pub use crate::walker::Walker;

/// Match `includes`/`excludes` (each a `;`-separated specification list,
/// per [`Specification::split`]) against `root_directory`.
///
/// For details on how specifications are applied, see [`MatcherSet`].
pub fn glob(includes: &str, excludes: &str, root_directory: &Path) -> Result<Vec<PathBuf>, GlobError> {
    glob_with(includes, excludes, root_directory, MatchOptions::default())
}

/// Like [`glob`], with explicit casing/dialect options.
pub fn glob_with(
    includes: &str,
    excludes: &str,
    root_directory: &Path,
    options: MatchOptions,
) -> Result<Vec<PathBuf>, GlobError> {
    let casing = options.casing.resolve();

    let includes = Specification::split(includes, casing);
    let excludes = Specification::split(excludes, casing);

    let root_directory_str = crate::path_ops::remove_relative_segments(&crate::path_ops::normalize_separators(
        &root_directory.to_string_lossy(),
    ));

    let mut matcher_set = MatcherSet::new(includes, excludes, &root_directory_str, options)?;

    Ok(crate::walker::walk(&mut matcher_set, &root_directory_str))
}

/// Like [`glob`], matching against the current directory.
///
/// Strictly equivalent to calling [`glob`] with the current directory's
/// path.
pub fn glob_current_dir(includes: &str, excludes: &str) -> Result<Vec<PathBuf>, GlobError> {
    let current_dir = std::env::current_dir()
        .map_err(|err| GlobError::InvalidArgument(format!("failed to get current directory: {err}")))?;

    glob(includes, excludes, &current_dir)
}
