use std::path::{Path, PathBuf};

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Resolves a data source against the directory of the configuration file.
pub fn source_path(root: &Path, file: &str) -> String {
    let p: PathBuf = [root, Path::new(file)].iter().collect();
    p.as_path().display().to_string()
}

/// Reads a percentage such as `12%` or ` 7`.
///
/// The `%` sign is optional and everything after the leading integer is ignored, so
/// `12.5%` reads as 12. Returns None when there is no leading integer.
pub fn parse_percentage(s: &str) -> Option<u32> {
    let trimmed = s.trim().trim_end_matches('%').trim();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<u32>().ok()
}
