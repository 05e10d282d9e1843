//! Destination path resolution.

use std::path::{PathBuf, MAIN_SEPARATOR};

/// Join a log directory and a file name into one path.
///
/// Both parts have `/` and `\` normalized to the platform separator first.
/// One trailing separator is trimmed from `dir` and one leading separator
/// from `filename`. Returns `None` when either part ends up empty, which
/// leaves the logger without a file sink.
pub fn combine(dir: &str, filename: &str) -> Option<PathBuf> {
    let mut dir = normalize(dir);
    let mut filename = normalize(filename);

    if dir.ends_with(MAIN_SEPARATOR) {
        dir.pop();
    }
    if filename.starts_with(MAIN_SEPARATOR) {
        filename.remove(0);
    }

    if dir.is_empty() || filename.is_empty() {
        return None;
    }

    Some(PathBuf::from(format!("{}{}{}", dir, MAIN_SEPARATOR, filename)))
}

fn normalize(part: &str) -> String {
    part.chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sep(s: &str) -> String {
        s.replace('/', &MAIN_SEPARATOR.to_string())
    }

    #[test]
    fn test_combine_plain() {
        let path = combine("/var/log", "access.log").unwrap();
        assert_eq!(path, PathBuf::from(sep("/var/log/access.log")));
    }

    #[test]
    fn test_combine_trims_one_separator_each_side() {
        let path = combine("/var/log/", "/access.log").unwrap();
        assert_eq!(path, PathBuf::from(sep("/var/log/access.log")));

        // only one separator is trimmed at the boundary
        let path = combine("/var/log//", "access.log").unwrap();
        assert_eq!(path, PathBuf::from(sep("/var/log//access.log")));
    }

    #[test]
    fn test_combine_normalizes_mixed_separators() {
        let path = combine("logs\\app/", "nested\\proxy.log").unwrap();
        assert_eq!(path, PathBuf::from(sep("logs/app/nested/proxy.log")));
    }

    #[test]
    fn test_combine_empty_parts_yield_no_path() {
        assert_eq!(combine("", "access.log"), None);
        assert_eq!(combine("/var/log", ""), None);
        assert_eq!(combine("/", "/"), None);
    }
}
