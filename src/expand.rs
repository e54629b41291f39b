use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use regex::Regex;

/// Turns the path arguments into the list of files to process.
///
/// Shells normally expand `*.RAW` before we see it. When that did not happen
/// (quoted pattern, or a shell without globbing) a `*` or `?` in the last
/// component is matched against the entries of its directory. Patterns that
/// match nothing are kept as given so they get reported as failures later.
pub fn expand_paths(args: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::with_capacity(args.len());
    for arg in args {
        let path = PathBuf::from(arg);
        match expand_pattern(&path) {
            Some(matches) if !matches.is_empty() => files.extend(matches),
            _ => files.push(path),
        }
    }
    files
}

/// `None` if `path` is not a pattern, otherwise the sorted matches.
fn expand_pattern(path: &Path) -> Option<Vec<PathBuf>> {
    if path.exists() {
        return None;
    }
    let pattern = path.file_name()?.to_str()?;
    if !pattern.contains(&['*', '?'][..]) {
        return None;
    }

    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let dir = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };

    let re = glob_to_regex(pattern);
    // names that are not UTF-8 are matched lossily but joined back unchanged
    let mut names: Vec<OsString> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name())
        .filter(|name| {
            let lossy = name.to_string_lossy();
            (pattern.starts_with('.') || !lossy.starts_with('.')) && re.is_match(&lossy)
        })
        .filter(|name| dir.join(name).is_file())
        .collect();
    names.sort();

    Some(names.into_iter().map(|name| parent.join(name)).collect())
}

fn glob_to_regex(pattern: &str) -> Regex {
    let mut re = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            _ => re.push_str(&regex::escape(&c.to_string())),
        }
    }
    re.push('$');
    // only literals and wildcards go in, so this always compiles
    Regex::new(&re).unwrap()
}
