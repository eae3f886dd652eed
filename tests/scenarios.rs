//! End-to-end worked scenarios (S1-S6) and the cross-cutting testable
//! properties that need a real directory tree rather than unit-level
//! fixtures. Style mirrors the teacher's own table-driven
//! `PatternTest`/`test_pattern` pattern in `tests/patterns.rs`, adapted
//! to build disposable directory trees with `tempfile`.

use std::collections::HashSet;
use std::path::Path;

use fileglob_core::{MatchOptions, MatcherSet, Specification};
use tempfile::tempdir;

struct Scenario {
    name: &'static str,
    files: &'static [&'static str],
    include: &'static str,
    exclude: &'static str,
    expected: &'static [&'static str],
}

fn run_scenario(s: Scenario) {
    let dir = tempdir().unwrap();
    let root = dir.path();

    for file in s.files {
        write_relative(root, file);
    }

    let casing = MatchOptions::default().casing.resolve();
    let includes = Specification::split(s.include, casing);
    let excludes = Specification::split(s.exclude, casing);

    let mut matcher_set =
        MatcherSet::new(includes, excludes, &root.to_string_lossy(), MatchOptions::default()).unwrap();

    let got: HashSet<String> = fileglob_core::walker::walk(&mut matcher_set, root)
        .into_iter()
        .map(|p| relative_slash_path(root, &p))
        .collect();

    let expected: HashSet<String> = s.expected.iter().map(|s| s.to_string()).collect();

    assert_eq!(got, expected, "scenario {} mismatched", s.name);
}

fn write_relative(root: &Path, relative: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "").unwrap();
}

fn relative_slash_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap()
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[test]
fn s1_recursive_extension_match() {
    run_scenario(Scenario {
        name: "S1",
        files: &["root.cs", "sub/a.cs", "sub/b.txt", "sub/sub2/c.cs"],
        include: "**/*.cs",
        exclude: "",
        expected: &["root.cs", "sub/a.cs", "sub/sub2/c.cs"],
    });
}

#[test]
fn s2_recursive_named_directory() {
    run_scenario(Scenario {
        name: "S2",
        files: &[
            "src/bin/app.exe",
            "tests/bin/test.exe",
            "docs/bin/doc.exe",
            "project/nested/bin/nested.exe",
            "bin.exe",
        ],
        include: "**/bin/*.exe",
        exclude: "",
        expected: &[
            "src/bin/app.exe",
            "tests/bin/test.exe",
            "docs/bin/doc.exe",
            "project/nested/bin/nested.exe",
        ],
    });
}

#[test]
fn s3_mixed_wild_path_segments() {
    run_scenario(Scenario {
        name: "S3",
        files: &[
            "src/v1/a.cs",
            "src/v1/b.cs",
            "src/v2/a.cs",
            "lib/v1/a.cs",
            "test/v1/core/a.cs",
        ],
        include: "???/v1/**/?*.cs",
        exclude: "",
        expected: &["src/v1/a.cs", "src/v1/b.cs", "lib/v1/a.cs"],
    });
}

#[test]
fn s4_deep_recursive_single_file() {
    run_scenario(Scenario {
        name: "S4",
        files: &["a/b/c/d/deep.txt", "root.txt", "a/intermediate.txt"],
        include: "**/deep.txt",
        exclude: "",
        expected: &["a/b/c/d/deep.txt"],
    });
}

#[test]
fn s5_recursive_match_at_every_depth() {
    run_scenario(Scenario {
        name: "S5",
        files: &[
            "target.cs",
            "level1/target.cs",
            "level1/level2/target.cs",
            "level1/level2/other.txt",
        ],
        include: "**/target.cs",
        exclude: "",
        expected: &["target.cs", "level1/target.cs", "level1/level2/target.cs"],
    });
}

#[test]
fn s6_subtree_exclude_overrides_include() {
    run_scenario(Scenario {
        name: "S6",
        files: &["src/main.cs", "src/helper.cs", "bin/Debug/stale.cs"],
        include: "**/*.cs",
        exclude: "bin/**",
        expected: &["src/main.cs", "src/helper.cs"],
    });
}

/// Testable property 9 ("exclude override"): `{include p}` accepts
/// exactly the files `{include p, exclude q}` accepts union the files
/// matched by `q`.
#[test]
fn property_exclude_override() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    for file in ["src/a.cs", "src/b.cs", "bin/Debug/c.cs", "bin/Debug/d.cs"] {
        write_relative(root, file);
    }

    let casing = MatchOptions::default().casing.resolve();

    let mut only_include = MatcherSet::new(
        Specification::split("**/*.cs", casing),
        vec![],
        &root.to_string_lossy(),
        MatchOptions::default(),
    )
    .unwrap();

    let mut with_exclude = MatcherSet::new(
        Specification::split("**/*.cs", casing),
        Specification::split("bin/**", casing),
        &root.to_string_lossy(),
        MatchOptions::default(),
    )
    .unwrap();

    let mut q_only = MatcherSet::new(
        Specification::split("bin/**/*.cs", casing),
        vec![],
        &root.to_string_lossy(),
        MatchOptions::default(),
    )
    .unwrap();

    let all: HashSet<String> = fileglob_core::walker::walk(&mut only_include, root)
        .into_iter()
        .map(|p| relative_slash_path(root, &p))
        .collect();

    let filtered: HashSet<String> = fileglob_core::walker::walk(&mut with_exclude, root)
        .into_iter()
        .map(|p| relative_slash_path(root, &p))
        .collect();

    let excluded_only: HashSet<String> = fileglob_core::walker::walk(&mut q_only, root)
        .into_iter()
        .map(|p| relative_slash_path(root, &p))
        .collect();

    let union: HashSet<String> = filtered.union(&excluded_only).cloned().collect();
    assert_eq!(all, union);
}

/// Testable property 8 ("walker equivalence"), sampled: for a given
/// tree and spec, the walker's result equals a naive full-tree scan
/// filtered by a one-shot match against every file. The oracle side
/// goes through `MatcherSet::is_match_one_shot` rather than manually
/// building a `MatcherSet` and splitting directory/file-name by hand, so
/// it's a genuinely independent code path from the walker's own
/// directory bookkeeping.
#[test]
fn property_walker_equivalence_against_one_shot_oracle() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let files = [
        "a.cs",
        "sub/b.cs",
        "sub/c.txt",
        "sub/nested/d.cs",
        "other/e.cs",
    ];

    for f in files {
        write_relative(root, f);
    }

    let casing = MatchOptions::default().casing.resolve();
    let mut walked_set = MatcherSet::new(
        Specification::split("**/*.cs", casing),
        vec![],
        &root.to_string_lossy(),
        MatchOptions::default(),
    )
    .unwrap();

    let walked: HashSet<String> = fileglob_core::walker::walk(&mut walked_set, root)
        .into_iter()
        .map(|p| relative_slash_path(root, &p))
        .collect();

    let root_str = root.to_string_lossy();

    let oracle: HashSet<String> = files
        .iter()
        .filter(|f| {
            let full_path = root.join(f).to_string_lossy().into_owned();
            MatcherSet::is_match_one_shot(&root_str, &full_path, "**/*.cs", "")
        })
        .map(|f| f.to_string())
        .collect();

    assert_eq!(walked, oracle);
}
