//! Specification: parse one MSBuild include/exclude glob entry into
//! `(FixedPath, WildPath, FileName, flags)`, split a `;`-separated list,
//! and unescape `%HH` sequences (spec §4.3, §6).

use std::borrow::Cow;

use crate::model::ResolvedCasing;
use crate::path_ops::{self, RootPrefix, SEP};

/// A parsed MSBuild glob specification.
///
/// Immutable once constructed (spec §3, "Specifications are immutable
/// once parsed").
#[derive(Debug, Clone)]
pub struct Specification {
    original: String,
    normalized: String,
    fixed_path: String,
    wild_path: Vec<String>,
    file_name: String,
    has_any_wild_cards: bool,
    is_simple_recursive_match: bool,
    is_fully_qualified: bool,
    is_nested_relative: bool,
}

impl Specification {
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn fixed_path(&self) -> &str {
        &self.fixed_path
    }

    pub fn wild_path(&self) -> &[String] {
        &self.wild_path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn has_any_wild_cards(&self) -> bool {
        self.has_any_wild_cards
    }

    pub fn is_simple_recursive_match(&self) -> bool {
        self.is_simple_recursive_match
    }

    pub fn is_fully_qualified(&self) -> bool {
        self.is_fully_qualified
    }

    pub fn is_nested_relative(&self) -> bool {
        self.is_nested_relative
    }

    /// `true` iff `Normalized` begins with a `**` segment right after
    /// `FixedPath` — used by `SpecMatcher` to derive `AlwaysRecurse`.
    pub fn wild_path_starts_with_any_directory(&self) -> bool {
        self.wild_path.first().is_some_and(|s| s == "**")
    }

    /// `true` iff `Normalized` ends in a `**` segment (possibly via the
    /// synthesized trailing-`**` form) — used to derive `EndsInAnyDirectory`.
    pub fn ends_in_any_directory(&self) -> bool {
        self.wild_path.last().is_some_and(|s| s == "**")
    }

    /// A key suitable for equality/dedup/hashing under `casing`, per
    /// spec §3 ("Equality and hashing are by `Normalized` under the
    /// configured casing").
    pub fn normalized_key(&self, casing: ResolvedCasing) -> String {
        casing.fold(&self.normalized)
    }

    /// Parse one specification string (spec §4.3 steps 1-8).
    pub fn parse(input: &str) -> Specification {
        let original = input.to_owned();
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Specification {
                original,
                normalized: String::new(),
                fixed_path: String::new(),
                wild_path: vec![],
                file_name: String::new(),
                has_any_wild_cards: false,
                is_simple_recursive_match: false,
                is_fully_qualified: false,
                is_nested_relative: true,
            };
        }

        let separators_unified = path_ops::normalize_separators(trimmed);
        let (root, rest) = path_ops::classify_root(&separators_unified);
        let is_fully_qualified = root.is_fully_qualified();

        let root_prefix_string = root_prefix_string(&root);

        let segments: Vec<&str> = rest.split(SEP).filter(|s| !s.is_empty()).collect();

        let wildcard_idx = segments
            .iter()
            .position(|s| s.contains('*') || s.contains('?'));

        let (fixed_segs, remainder): (&[&str], &[&str]) = match wildcard_idx {
            Some(i) => (&segments[..i], &segments[i..]),
            None if segments.is_empty() => (&[], &[]),
            None => (&segments[..segments.len() - 1], &segments[segments.len() - 1..]),
        };

        let fixed_path = format!("{root_prefix_string}{}", fixed_segs.join(&SEP.to_string()));

        // Step 6 checks the raw (pre-unescape) last segment: an escaped
        // literal "**" filename (produced via `%2A%2A`) is a real
        // filename, not the recursive wildcard token, and must not be
        // confused with it.
        let raw_file_name = remainder.last().copied().unwrap_or("");
        let mut wild_path: Vec<String> = remainder[..remainder.len().saturating_sub(1)]
            .iter()
            .map(|s| unescape(s).into_owned())
            .collect();

        let file_name = if raw_file_name == "**" {
            wild_path.push("**".to_owned());
            "*".to_owned()
        } else {
            unescape(raw_file_name).into_owned()
        };

        // Step 7: collapse runs of consecutive `**` segments.
        let wild_path = collapse_double_star_runs(wild_path);

        let has_any_wild_cards = !wild_path.is_empty()
            || file_name.contains('*')
            || file_name.contains('?');

        let is_simple_recursive_match = wild_path.len() == 1 && wild_path[0] == "**";

        let normalized = rebuild_normalized(&root_prefix_string, fixed_segs, &wild_path, &file_name);

        let is_nested_relative = !is_fully_qualified && !normalized.split(SEP).any(|s| s == "..");

        Specification {
            original,
            normalized,
            fixed_path,
            wild_path,
            file_name,
            has_any_wild_cards,
            is_simple_recursive_match,
            is_fully_qualified,
            is_nested_relative,
        }
    }

    /// Split a `;`-separated list into deduped specs, preserving order of
    /// first occurrence (spec §4.3 "Split rule", §6).
    pub fn split(list: &str, casing: ResolvedCasing) -> Vec<Specification> {
        let mut out: Vec<Specification> = vec![];
        let mut seen: Vec<String> = vec![];

        for entry in list.split(';') {
            let trimmed = entry.trim();

            if trimmed.is_empty() {
                continue;
            }

            let spec = Specification::parse(trimmed);
            let key = spec.normalized_key(casing);

            if seen.iter().any(|k| *k == key) {
                continue;
            }

            seen.push(key);
            out.push(spec);
        }

        out
    }
}

// Shares the exact reconstruction PathOps uses for resolved directory
// paths, so a Specification's FixedPath compares equal (under casing)
// to a PathOps-normalized directory sharing the same root.
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
        RootPrefix::Device { dot_or_question, unc: Some((server, share)) } => {
            format!("{SEP}{SEP}{dot_or_question}{SEP}UNC{SEP}{server}{SEP}{share}{SEP}")
        }
    }
}

fn collapse_double_star_runs(segments: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = vec![];

    for seg in segments {
        if seg == "**" && out.last().is_some_and(|s: &String| s == "**") {
            continue;
        }

        out.push(seg);
    }

    out
}

fn rebuild_normalized(root_prefix: &str, fixed_segs: &[&str], wild_path: &[String], file_name: &str) -> String {
    let mut parts: Vec<&str> = vec![];
    parts.extend(fixed_segs.iter().copied());
    parts.extend(wild_path.iter().map(String::as_str));

    if !file_name.is_empty() {
        parts.push(file_name);
    }

    format!("{root_prefix}{}", parts.join(&SEP.to_string()))
}

/// Decode `%HH` escape sequences in a path segment.
///
/// Shares storage (returns `Cow::Borrowed`) when the segment contains no
/// valid escape, so the common case (no `%` at all) is allocation-free
/// (spec §9).
pub fn unescape(segment: &str) -> Cow<'_, str> {
    let chars: Vec<char> = segment.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if is_escape_at(&chars, i) {
            let mut out = String::with_capacity(segment.len());
            out.extend(&chars[..i]);

            let mut j = i;
            while j < chars.len() {
                if is_escape_at(&chars, j) {
                    let hex: String = chars[j + 1..j + 3].iter().collect();
                    let byte = u8::from_str_radix(&hex, 16).expect("validated hex digits");
                    out.push(byte as char);
                    j += 3;
                } else {
                    out.push(chars[j]);
                    j += 1;
                }
            }

            return Cow::Owned(out);
        }

        i += 1;
    }

    Cow::Borrowed(segment)
}

fn is_escape_at(chars: &[char], i: usize) -> bool {
    chars.get(i) == Some(&'%')
        && chars.get(i + 1).is_some_and(char::is_ascii_hexdigit)
        && chars.get(i + 2).is_some_and(char::is_ascii_hexdigit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_no_percent_borrows() {
        assert!(matches!(unescape("hello"), Cow::Borrowed(_)));
    }

    #[test]
    fn unescape_decodes_valid_hex() {
        assert_eq!(unescape("foo%2Abar"), "foo*bar");
        assert_eq!(unescape("100%25"), "100%");
    }

    #[test]
    fn unescape_leaves_invalid_percent_literal() {
        assert_eq!(unescape("50%off"), "50%off");
        assert_eq!(unescape("a%"), "a%");
        assert_eq!(unescape("a%2"), "a%2");
    }

    #[test]
    fn unescape_round_trip() {
        let decoded = "a*b?c";
        let encoded: String = decoded
            .chars()
            .map(|c| format!("%{:02X}", c as u32))
            .collect();

        assert_eq!(unescape(&encoded), decoded);
    }

    #[test]
    fn parses_fixed_wild_filename() {
        let spec = Specification::parse("src/**/bin/*.exe");
        assert_eq!(spec.fixed_path(), "src");
        assert_eq!(spec.wild_path(), &["**".to_owned(), "bin".to_owned()]);
        assert_eq!(spec.file_name(), "*.exe");
        assert!(spec.has_any_wild_cards());
        assert!(!spec.is_simple_recursive_match());
    }

    #[test]
    fn parses_simple_recursive() {
        let spec = Specification::parse("**/target.cs");
        assert_eq!(spec.fixed_path(), "");
        assert_eq!(spec.wild_path(), &["**".to_owned()]);
        assert_eq!(spec.file_name(), "target.cs");
        assert!(spec.is_simple_recursive_match());
    }

    #[test]
    fn parses_trailing_double_star_synthesizes_filename() {
        let spec = Specification::parse("bin/**");
        assert_eq!(spec.fixed_path(), "bin");
        assert_eq!(spec.wild_path(), &["**".to_owned()]);
        assert_eq!(spec.file_name(), "*");
        assert!(spec.ends_in_any_directory());
    }

    #[test]
    fn collapses_consecutive_double_star() {
        let spec = Specification::parse("a/**/**/**/b.txt");
        assert_eq!(spec.wild_path(), &["**".to_owned()]);
    }

    #[test]
    fn plain_literal_has_no_wildpath() {
        let spec = Specification::parse("a/b/c.txt");
        assert_eq!(spec.fixed_path(), format!("a{SEP}b"));
        assert!(spec.wild_path().is_empty());
        assert_eq!(spec.file_name(), "c.txt");
        assert!(!spec.has_any_wild_cards());
    }

    #[test]
    fn normalization_is_idempotent() {
        for s in ["a//b/*.cs", "**/**/x", "  a/b  ", "a/./b/*"] {
            let once = Specification::parse(s).normalized().to_owned();
            let twice = Specification::parse(&once).normalized().to_owned();
            assert_eq!(once, twice, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn separator_agnostic() {
        let a = Specification::parse("a/b/*.cs");
        let b = Specification::parse("a\\b\\*.cs");
        assert_eq!(a.normalized(), b.normalized());
    }

    #[test]
    fn no_consecutive_double_star_in_normalized() {
        for s in ["**/**/x", "a/**/**/**/b", "**/**"] {
            let normalized = Specification::parse(s).normalized().to_owned();
            assert!(!normalized.contains(&format!("**{SEP}**")));
        }
    }

    #[test]
    fn split_dedups_preserving_first_occurrence_order() {
        let specs = Specification::split("a/*.cs;b/*.txt;a/*.cs", ResolvedCasing::Sensitive);
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].original(), "a/*.cs");
        assert_eq!(specs[1].original(), "b/*.txt");
    }

    #[test]
    fn split_trims_whitespace_and_skips_empty() {
        let specs = Specification::split(" a/*.cs ; ; b ", ResolvedCasing::Sensitive);
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].original(), "a/*.cs");
        assert_eq!(specs[1].original(), "b");
    }

    #[test]
    fn split_case_insensitive_dedup() {
        let specs = Specification::split("A/*.cs;a/*.CS", ResolvedCasing::Insensitive);
        assert_eq!(specs.len(), 1);
    }

    #[test]
    fn fully_qualified_flags() {
        assert!(Specification::parse("/a/*.cs").is_fully_qualified());
        assert!(!Specification::parse("a/*.cs").is_fully_qualified());
    }

    #[test]
    fn nested_relative_flag() {
        assert!(Specification::parse("a/*.cs").is_nested_relative());
        assert!(!Specification::parse("../a/*.cs").is_nested_relative());
        assert!(!Specification::parse("/a/*.cs").is_nested_relative());
    }
}
