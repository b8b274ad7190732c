use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Error type for reading and writing markdown documents
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A markdown document loaded as lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub lines: Vec<String>,
    /// Whether the file ended with a newline
    pub trailing_newline: bool,
    /// Terminator used when joining lines back: `"\r\n"` if the file had one
    pub line_ending: &'static str,
}

impl Document {
    /// Split text into lines, remembering the final newline and whether the
    /// file uses `\r\n` endings.
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        let line_ending = if text.contains("\r\n") { "\r\n" } else { "\n" };
        Document {
            path: path.into(),
            lines: text.lines().map(|l| l.to_string()).collect(),
            trailing_newline: text.ends_with('\n'),
            line_ending,
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = self.lines.join(self.line_ending);
        if self.trailing_newline && !self.lines.is_empty() {
            out.push_str(self.line_ending);
        }
        out
    }
}

pub fn read_document(path: &Path) -> Result<Document, DocumentError> {
    let text = fs::read_to_string(path).map_err(|e| DocumentError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Document::from_text(path, &text))
}

/// Replace the document on disk atomically (temp file + rename).
pub fn write_document(doc: &Document) -> Result<(), DocumentError> {
    atomic_write(&doc.path, doc.to_text().as_bytes()).map_err(|e| DocumentError::WriteError {
        path: doc.path.clone(),
        source: e,
    })?;
    log::debug!("wrote {} ({} lines)", doc.path.display(), doc.lines.len());
    Ok(())
}

fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_keeps_trailing_newline() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("todo.md");
        fs::write(&path, "# Todo\n- [ ] a\n").unwrap();

        let mut doc = read_document(&path).unwrap();
        assert_eq!(doc.lines, vec!["# Todo", "- [ ] a"]);
        assert!(doc.trailing_newline);

        doc.lines[1] = "- [x] a".to_string();
        write_document(&doc).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Todo\n- [x] a\n");
    }

    #[test]
    fn test_no_trailing_newline() {
        let doc = Document::from_text("x.md", "- a\n- b");
        assert!(!doc.trailing_newline);
        assert_eq!(doc.to_text(), "- a\n- b");
    }

    #[test]
    fn test_crlf_kept_on_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("todo.md");
        fs::write(&path, "- [ ] a\r\n- [ ] b\r\n").unwrap();

        let mut doc = read_document(&path).unwrap();
        assert_eq!(doc.lines, vec!["- [ ] a", "- [ ] b"]);
        assert_eq!(doc.line_ending, "\r\n");

        doc.lines[0] = "- [x] a".to_string();
        write_document(&doc).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "- [x] a\r\n- [ ] b\r\n");
    }

    #[test]
    fn test_crlf_without_trailing_newline() {
        let doc = Document::from_text("x.md", "- a\r\n- b");
        assert!(!doc.trailing_newline);
        assert_eq!(doc.to_text(), "- a\r\n- b");
    }

    #[test]
    fn test_read_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = read_document(&tmp.path().join("nope.md")).unwrap_err();
        assert!(err.to_string().contains("nope.md"));
    }
}
