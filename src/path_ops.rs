//! PathOps: path normalization primitives (spec §4.1).
//!
//! Operates on `&str`/`String` rather than `OsStr`: every string this
//! core ever touches is either a glob specification (always valid
//! Unicode by construction) or a path produced by [`crate::segment_enumerator`]
//! joining matched segments, so there is no byte-level `OsStr` surface
//! to preserve here the way the teacher's `opaque_os_str.rs` does for
//! arbitrary filesystem paths.

use std::path::MAIN_SEPARATOR;

use crate::model::ResolvedCasing;

/// The platform separator patterns normalize to.
pub const SEP: char = MAIN_SEPARATOR;

/// Classification of the root a path begins with (spec §6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootPrefix {
    /// No recognized root; the path is plain-relative.
    None,

    /// A POSIX-style absolute root (`/...`) or a Windows rooted path
    /// without a drive letter.
    PosixRoot,

    /// A drive prefix (`X:` or `X:\`). `relative` is true for the
    /// drive-relative form `X:foo` (not fully qualified), false for the
    /// fully qualified form `X:\foo`.
    Drive { letter: char, relative: bool },

    /// A UNC share (`\\server\share\...`).
    UncShare { server: String, share: String },

    /// A device path (`\\.\...` or `\\?\...`), optionally a UNC device
    /// path (`\\.\UNC\server\share\...`).
    Device {
        dot_or_question: char,
        unc: Option<(String, String)>,
    },
}

impl RootPrefix {
    /// True for roots that anchor the path at a fixed point, as opposed
    /// to drive-relative or plain-relative paths.
    pub fn is_fully_qualified(&self) -> bool {
        match self {
            RootPrefix::None => false,
            RootPrefix::PosixRoot | RootPrefix::UncShare { .. } | RootPrefix::Device { .. } => {
                true
            }
            RootPrefix::Drive { relative, .. } => !relative,
        }
    }
}

/// Replace alternate separators with the platform separator and collapse
/// runs of separators to one, while preserving the leading double
/// separator that marks a UNC share or device prefix.
pub fn normalize_separators(s: &str) -> String {
    let raw: Vec<char> = s
        .chars()
        .map(|c| if c == '/' || c == '\\' { SEP } else { c })
        .collect();

    let preserve_double_lead = raw.len() >= 3 && raw[0] == SEP && raw[1] == SEP && raw[2] != SEP;

    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    if preserve_double_lead {
        out.push(SEP);
        out.push(SEP);
        i = 2;
        while i < raw.len() && raw[i] == SEP {
            i += 1;
        }
    }

    let mut last_was_sep = false;
    while i < raw.len() {
        let c = raw[i];
        if c == SEP {
            if !last_was_sep {
                out.push(SEP);
            }
            last_was_sep = true;
        } else {
            out.push(c);
            last_was_sep = false;
        }
        i += 1;
    }

    out
}

/// Classify the root of an already-[`normalize_separators`]-ed path and
/// return it along with the remainder of the path following the root.
pub fn classify_root(path: &str) -> (RootPrefix, &str) {
    let bytes: Vec<char> = path.chars().collect();

    if bytes.len() >= 2 && bytes[0] == SEP && bytes[1] == SEP {
        let rest = &path[2..];

        if let Some(first) = rest.chars().next() {
            let second_is_sep_or_end = match rest.chars().nth(1) {
                Some(c) => c == SEP,
                None => true,
            };

            if (first == '.' || first == '?') && second_is_sep_or_end {
                let after_marker = match rest.chars().nth(1) {
                    Some(_) => &rest[1 + SEP.len_utf8()..],
                    None => "",
                };

                if let Some(unc_rest) = strip_segment(after_marker, "UNC") {
                    let (server, unc_rest) = take_segment(unc_rest);
                    let (share, unc_rest) = take_segment(unc_rest);

                    return (
                        RootPrefix::Device {
                            dot_or_question: first,
                            unc: Some((server.to_owned(), share.to_owned())),
                        },
                        unc_rest,
                    );
                }

                return (
                    RootPrefix::Device {
                        dot_or_question: first,
                        unc: None,
                    },
                    after_marker,
                );
            }
        }

        let (server, rest) = take_segment(rest);
        let (share, rest) = take_segment(rest);

        return (
            RootPrefix::UncShare {
                server: server.to_owned(),
                share: share.to_owned(),
            },
            rest,
        );
    }

    if bytes.first() == Some(&SEP) {
        return (RootPrefix::PosixRoot, &path[1..]);
    }

    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == ':' {
        let letter = bytes[0].to_ascii_uppercase();
        let after_colon = &path[1 + ':'.len_utf8()..];

        return if let Some(rest) = after_colon.strip_prefix(SEP) {
            (RootPrefix::Drive { letter, relative: false }, rest)
        } else {
            (RootPrefix::Drive { letter, relative: true }, after_colon)
        };
    }

    (RootPrefix::None, path)
}

fn strip_segment<'a>(s: &'a str, expect: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(expect)?;
    match rest.strip_prefix(SEP) {
        Some(rest) => Some(rest),
        None if rest.is_empty() => Some(rest),
        None => None,
    }
}

fn take_segment(s: &str) -> (&str, &str) {
    match s.find(SEP) {
        Some(idx) => (&s[..idx], &s[idx + SEP.len_utf8()..]),
        None => (s, ""),
    }
}

/// Resolve `.` and `..` segments of an already-normalized path against
/// its fixed root. `..` above the root is absorbed for fully rooted
/// paths and kept for relative (including drive-relative) paths.
/// Trailing separators are preserved iff present in the input.
pub fn remove_relative_segments(path: &str) -> String {
    let (root, rest) = classify_root(path);
    let trailing_sep = rest.ends_with(SEP);
    let is_rooted = root.is_fully_qualified();

    let mut stack: Vec<&str> = vec![];

    for seg in rest.split(SEP).filter(|s| !s.is_empty()) {
        match seg {
            "." => continue,
            ".." => {
                if stack.last().is_some_and(|s| *s != "..") {
                    stack.pop();
                } else if !is_rooted {
                    stack.push("..");
                }
                // else: rooted path, ".." above root is absorbed
            }
            _ => stack.push(seg),
        }
    }

    let mut out = root_prefix_string(&root);
    out.push_str(&stack.join(&SEP.to_string()));

    if trailing_sep && !out.ends_with(SEP) {
        out.push(SEP);
    }

    out
}

fn root_prefix_string(root: &RootPrefix) -> String {
    match root {
        RootPrefix::None => String::new(),
        RootPrefix::PosixRoot => SEP.to_string(),
        RootPrefix::Drive { letter, relative } => {
            if *relative {
                format!("{letter}:")
            } else {
                format!("{letter}:{SEP}")
            }
        }
        RootPrefix::UncShare { server, share } => format!("{SEP}{SEP}{server}{SEP}{share}{SEP}"),
        RootPrefix::Device { dot_or_question, unc: None } => {
            format!("{SEP}{SEP}{dot_or_question}{SEP}")
        }
        RootPrefix::Device {
            dot_or_question,
            unc: Some((server, share)),
        } => format!("{SEP}{SEP}{dot_or_question}{SEP}UNC{SEP}{server}{SEP}{share}{SEP}"),
    }
}

/// Join a base directory with a relative path, inserting exactly one
/// separator between them. `rel` empty returns `base` unchanged.
pub fn join(base: &str, rel: &str) -> String {
    if rel.is_empty() {
        return base.trim_end_matches(SEP).to_owned();
    }

    let base = base.trim_end_matches(SEP);

    if base.is_empty() {
        return rel.to_owned();
    }

    format!("{base}{SEP}{rel}")
}

/// True iff `b` equals `a`, or `b` starts with `a` followed by a
/// separator. Either argument may carry its own trailing separator.
pub fn is_same_or_subdirectory(a: &str, b: &str, casing: ResolvedCasing) -> bool {
    let trim = |s: &str| s.trim_end_matches(SEP);

    let a = trim(a);
    let b = trim(b);

    if casing.str_eq(a, b) {
        return true;
    }

    if a.is_empty() {
        return !b.is_empty();
    }

    let prefix_len = a.chars().count();
    let b_chars: Vec<char> = b.chars().collect();

    if b_chars.len() <= prefix_len {
        return false;
    }

    let a_chars: Vec<char> = a.chars().collect();

    casing.str_eq(
        &b_chars[..prefix_len].iter().collect::<String>(),
        &a_chars.iter().collect::<String>(),
    ) && b_chars[prefix_len] == SEP
}

/// Prove (when possible) that no string matches both of two single-segment
/// wildcard expressions. See [`crate::wildcard::are_expressions_exclusive`].
pub fn are_expressions_exclusive(
    p1: &str,
    p2: &str,
    dialect: crate::model::Dialect,
    casing: ResolvedCasing,
) -> bool {
    crate::wildcard::are_expressions_exclusive(p1, p2, dialect, casing)
}
