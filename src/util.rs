use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn invalid_file_name_chars() -> &'static Regex {
    static INVALID: OnceLock<Regex> = OnceLock::new();
    INVALID.get_or_init(|| Regex::new(r#"[\\/:*?"<>|]"#).expect("regex for invalid file name chars"))
}

/// Accept a bare file name: no path separators, wildcards, or reserved
/// characters, and not empty or made only of blanks.
pub fn is_valid_file_name(name: &str) -> bool {
    if invalid_file_name_chars().is_match(name) {
        return false;
    }
    !name.trim_matches([' ', '\t']).is_empty()
}

/// Append `extension` (e.g. `.txt`) unless the text after the last `.` already
/// is that extension.
pub fn ensure_extension(name: &str, extension: &str) -> String {
    match name.rfind('.') {
        Some(pos) if &name[pos..] == extension => name.to_string(),
        _ => format!("{name}{extension}"),
    }
}

pub fn display_path(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base {
        if let Ok(relative) = path.strip_prefix(base) {
            return relative.display().to_string();
        }
    }
    path.display().to_string()
}

/// Render a number the way reports and summaries show it.
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn file_name_rejects_reserved_characters_and_blanks() {
        for bad in ["a/b", "a\\b", "c:", "x*", "what?", "\"q\"", "<in", "out>", "p|q"] {
            assert!(!is_valid_file_name(bad), "{bad:?} should be rejected");
        }
        assert!(!is_valid_file_name(""));
        assert!(!is_valid_file_name("  \t "));
        assert!(is_valid_file_name("report"));
        assert!(is_valid_file_name(" notes.txt"));
    }

    #[test]
    fn ensure_extension_only_checks_the_last_suffix() {
        assert_eq!(ensure_extension("report", ".txt"), "report.txt");
        assert_eq!(ensure_extension("report.txt", ".txt"), "report.txt");
        assert_eq!(ensure_extension("data.csv", ".txt"), "data.csv.txt");
        assert_eq!(ensure_extension("archive.txt.bak", ".txt"), "archive.txt.bak.txt");
        assert_eq!(ensure_extension("table", ".csv"), "table.csv");
    }

    #[test]
    fn display_path_strips_base_when_possible() {
        let base = PathBuf::from("/tmp/reports");
        let inside = base.join("0_report.txt");
        assert_eq!(display_path(&inside, Some(&base)), "0_report.txt");
        let outside = PathBuf::from("/var/report.txt");
        assert_eq!(display_path(&outside, Some(&base)), "/var/report.txt");
        assert_eq!(display_path(&outside, None), "/var/report.txt");
    }

    #[test]
    fn numbers_render_without_trailing_zeros() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-3.0), "-3");
    }
}
