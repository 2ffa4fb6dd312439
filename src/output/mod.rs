//! Document sinks
//!
//! - JSON: pretty-printed array of `{postId?, title, url, content}`
//! - CSV: `postId,title,url,content` header plus one row per document
//! - markup lines: each document's content markup on its own line

pub mod csv_rows;
pub mod json;
pub mod markup;

pub use csv_rows::{CSV_HEADERS, encode_csv, save_csv};
pub use json::{encode_json, save_json};
pub use markup::{encode_markup_lines, save_markup_lines};

use crate::document::Document;
use crate::error::{CrawlError, Result};
use std::{fmt, fs, path::Path, str::FromStr};

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    /// Raw content markup, one document per line
    Html,
}

impl FromStr for OutputFormat {
    type Err = CrawlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "html" => Ok(OutputFormat::Html),
            _ => Err(CrawlError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Html => "html",
        };
        f.write_str(s)
    }
}

/// Persist `docs` at `path` in `format`
pub fn save(path: impl AsRef<Path>, format: OutputFormat, docs: &[Document]) -> Result<()> {
    match format {
        OutputFormat::Json => save_json(path, docs),
        OutputFormat::Csv => save_csv(path, docs),
        OutputFormat::Html => save_markup_lines(path, docs),
    }
}

/// Write `data` to `path`, creating missing parent directories
fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data)?;
    log::debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_docs() -> Vec<Document> {
        vec![
            Document::new("Hello", "https://example.com?a=1", "Line1\nLine2").with_post_id("1"),
            Document::new("World, CSV", "https://example.com?a=2", "Comma, inside").with_post_id("2"),
        ]
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("html".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert!(matches!("xml".parse::<OutputFormat>(), Err(CrawlError::UnknownFormat(f)) if f == "xml"));
    }

    #[test]
    fn test_save_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.csv");
        save(&path, OutputFormat::Csv, &sample_docs()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("postId,title,url,content\n"));
        assert!(written.contains("\"World, CSV\""));
    }
}
