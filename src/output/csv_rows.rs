use crate::document::Document;
use crate::error::{CrawlError, Result};
use std::path::Path;

/// Header row of CSV output
pub const CSV_HEADERS: [&str; 4] = ["postId", "title", "url", "content"];

/// Encode documents as CSV with a header row. Fields are quoted when they
/// contain separators, quotes or line breaks.
pub fn encode_csv(docs: &[Document]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for doc in docs {
        writer.write_record([doc.post_id.as_deref().unwrap_or(""), doc.title.as_str(), doc.url.as_str(), doc.content.as_str()])?;
    }
    writer.into_inner().map_err(|e| CrawlError::Io(e.into_error()))
}

pub fn save_csv(path: impl AsRef<Path>, docs: &[Document]) -> Result<()> {
    super::write_file(path.as_ref(), &encode_csv(docs)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample_docs;

    fn read_rows(data: &[u8]) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new().has_headers(false).from_reader(data);
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_encode_csv_and_read_back() {
        let data = encode_csv(&sample_docs()).unwrap();
        let rows = read_rows(&data);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["postId", "title", "url", "content"]);
        assert_eq!(rows[1][1], "Hello");
        assert_eq!(rows[1][3], "Line1\nLine2");
        assert_eq!(rows[2][1], "World, CSV");
        assert_eq!(rows[2][3], "Comma, inside");
    }

    #[test]
    fn test_header_line_is_exact() {
        let data = String::from_utf8(encode_csv(&[]).unwrap()).unwrap();
        assert_eq!(data, "postId,title,url,content\n");
    }

    #[test]
    fn test_missing_post_id_is_empty_field() {
        let docs = vec![Document::new("T", "https://example.com/api/T", "<p>x</p>")];
        let rows = read_rows(&encode_csv(&docs).unwrap());
        assert_eq!(rows[1][0], "");
    }

    #[test]
    fn test_save_csv_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        save_csv(&path, &sample_docs()).unwrap();
        assert!(path.exists());
    }
}
