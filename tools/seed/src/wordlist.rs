use std::fs;
use std::io;
use std::path::Path;

/// Read a plain word list: one word per line, blank lines and `#` comments skipped.
pub fn parse_word_list(path: &Path) -> io::Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_lines(&contents))
}

pub fn parse_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
