use fileglob_core::glob_current_dir;

fn main() {
    let paths = glob_current_dir("**/*.rs", "").unwrap();

    for path in paths {
        println!("{}", path.display());
    }
}
