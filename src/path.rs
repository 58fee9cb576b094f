use regex::Regex;
use std::sync::LazyLock;

static NON_PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9.\-]+").expect("valid path pattern"));

/// Replaces every run of characters outside `[a-zA-Z0-9.-]` with an underscore.
///
/// Used to turn a command name or full path into a file or directory name.
pub fn clean_path(input: &str) -> String {
    clean_path_with(input, "_")
}

/// Replaces every run of characters outside `[a-zA-Z0-9.-]` with `replacement`.
///
/// A run of several invalid characters produces a single `replacement`.
pub fn clean_path_with(input: &str, replacement: &str) -> String {
    NON_PATH_REGEX
        .replace_all(input, regex::NoExpand(replacement))
        .into_owned()
}
