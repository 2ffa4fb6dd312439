use crate::document::Document;
use crate::error::Result;
use std::path::Path;

/// Join every document's content markup, one document per line, with a trailing newline
pub fn encode_markup_lines(docs: &[Document]) -> String {
    let mut out = String::new();
    for doc in docs {
        out.push_str(&doc.content);
        out.push('\n');
    }
    out
}

/// Write the raw markup file that converters take as input
pub fn save_markup_lines(path: impl AsRef<Path>, docs: &[Document]) -> Result<()> {
    super::write_file(path.as_ref(), encode_markup_lines(docs).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_each_document_line() {
        let docs = vec![
            Document::new("", "", "<div>first</div>"),
            Document::new("", "", "<p>second</p>"),
            Document::new("", "", "<span>third</span>"),
        ];
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("inner.html");

        save_markup_lines(&out, &docs).unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(written, "<div>first</div>\n<p>second</p>\n<span>third</span>\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(encode_markup_lines(&[]), "");
    }
}
