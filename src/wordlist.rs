//! Wordlist loading.
//!
//! A wordlist is a line-oriented text file, one candidate label per line.
//! Blank lines and `#` comments are skipped.

use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error_handling::RunError;

/// Reads candidate labels from `path`.
///
/// # Errors
///
/// Returns [`RunError::WordlistUnreadable`] if the file cannot be opened and
/// [`RunError::MissingWordlist`] if it contains no candidates.
pub async fn load_wordlist(path: &Path) -> Result<Vec<String>, RunError> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|source| RunError::WordlistUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

    let mut words = Vec::new();
    let mut lines = BufReader::new(file).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        words.push(trimmed.to_string());
    }

    if words.is_empty() {
        return Err(RunError::MissingWordlist);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write wordlist");
        file
    }

    #[tokio::test]
    async fn test_loads_labels_in_order() {
        let file = write_temp("www\nmail\nftp\n");
        let words = load_wordlist(file.path()).await.unwrap();
        assert_eq!(words, ["www", "mail", "ftp"]);
    }

    #[tokio::test]
    async fn test_skips_comments_and_blanks() {
        let file = write_temp("# common labels\n\nwww\n   \n  # indented comment\nmail\n");
        let words = load_wordlist(file.path()).await.unwrap();
        assert_eq!(words, ["www", "mail"]);
    }

    #[tokio::test]
    async fn test_empty_file_is_missing_wordlist() {
        let file = write_temp("\n# only comments\n");
        let err = load_wordlist(file.path()).await.unwrap_err();
        assert!(matches!(err, RunError::MissingWordlist));
    }

    #[tokio::test]
    async fn test_unreadable_path_is_reported() {
        let err = load_wordlist(Path::new("/nonexistent/words.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, RunError::WordlistUnreadable { .. }));
    }
}
