//! Text extraction for the `content` field.
//!
//! Only plain text and Markdown are read. Other formats get a placeholder
//! naming the file, so every record carries some content.

use std::path::Path;

use tracing::error;

use legal_indexer_shared::file_extension;

pub fn pdf_placeholder(filename: &str) -> String {
    format!(
        "PDF content from {} - Content extraction not implemented yet",
        filename
    )
}

pub fn unsupported_placeholder(filename: &str) -> String {
    format!(
        "Content from {} - File type not supported for text extraction",
        filename
    )
}

pub fn error_placeholder(filename: &str) -> String {
    format!("Error extracting content from {}", filename)
}

/// Extract the text of `path`.
///
/// Never fails: a read error is logged and replaced by
/// [`error_placeholder`].
pub async fn extract_text(path: &Path) -> String {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    match file_extension(&filename).as_str() {
        ".txt" | ".md" => match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Error extracting content");
                error_placeholder(&filename)
            }
        },
        ".pdf" => pdf_placeholder(&filename),
        _ => unsupported_placeholder(&filename),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_text_and_markdown_read_verbatim() {
        let dir = TempDir::new().unwrap();
        let txt = dir.path().join("lease.TXT");
        let md = dir.path().join("notes.md");
        std::fs::write(&txt, "Rent is due monthly.\n").unwrap();
        std::fs::write(&md, "# Heading\n").unwrap();

        assert_eq!(extract_text(&txt).await, "Rent is due monthly.\n");
        assert_eq!(extract_text(&md).await, "# Heading\n");
    }

    #[tokio::test]
    async fn test_pdf_placeholder() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("brief.pdf");
        std::fs::write(&pdf, b"%PDF-1.7").unwrap();

        assert_eq!(
            extract_text(&pdf).await,
            "PDF content from brief.pdf - Content extraction not implemented yet"
        );
    }

    #[tokio::test]
    async fn test_word_documents_get_unsupported_placeholder() {
        let dir = TempDir::new().unwrap();
        let docx = dir.path().join("contract.docx");
        std::fs::write(&docx, b"PK").unwrap();

        assert_eq!(
            extract_text(&docx).await,
            "Content from contract.docx - File type not supported for text extraction"
        );
    }

    #[tokio::test]
    async fn test_read_error_yields_placeholder() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone.txt");
        let invalid = dir.path().join("binary.txt");
        std::fs::write(&invalid, [0xff, 0xfe, 0x00]).unwrap();

        assert_eq!(
            extract_text(&missing).await,
            "Error extracting content from gone.txt"
        );
        assert_eq!(
            extract_text(&invalid).await,
            "Error extracting content from binary.txt"
        );
    }
}
