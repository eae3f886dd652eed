use std::path::Path;

use fileglob_core::{Casing, Dialect, MatchOptions, MatcherSet, Specification, Walker};

fn main() {
    let options = MatchOptions { casing: Casing::CaseInsensitive, dialect: Dialect::Simple };
    let casing = options.casing.resolve();

    let includes = Specification::split("**/*.rs", casing);
    let excludes = Specification::split("target/**", casing);

    let mut matcher_set = MatcherSet::new(includes, excludes, "/", options).unwrap();
    let mut walker = Walker::new(&mut matcher_set, Path::new("/"));

    for path in walker.by_ref() {
        println!("OK: {}", path.display());
    }

    for err in walker.errors() {
        println!("ERR: {err}");
    }
}
