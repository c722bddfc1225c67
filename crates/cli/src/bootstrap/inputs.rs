use anyhow::Context;
use std::path::Path;

/// Read a one-entry-per-line list file.
pub fn read_list(path: impl AsRef<Path>) -> anyhow::Result<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read list file {}", path.display()))?;
    Ok(parse_list(&content))
}

/// Entries are trimmed; blank lines and `#` comments are skipped.
pub fn parse_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_list_skips_noise() {
        let content = "example.com\n\n  # comment\n  api.example.com  \r\nwww.example.com";
        assert_eq!(
            parse_list(content),
            vec!["example.com", "api.example.com", "www.example.com"]
        );
    }

    #[test]
    fn test_parse_list_empty() {
        assert!(parse_list("").is_empty());
        assert!(parse_list("\n\n# only comments\n").is_empty());
    }

    #[test]
    fn test_read_list_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "8.8.8.8").unwrap();
        writeln!(file, "1.1.1.1").unwrap();

        let list = read_list(file.path()).unwrap();
        assert_eq!(list, vec!["8.8.8.8", "1.1.1.1"]);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_list("/nonexistent/nameservers.txt").unwrap_err();
        assert!(err.to_string().contains("nameservers.txt"));
    }
}
