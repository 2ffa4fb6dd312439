//! Markup-to-markdown conversion of saved crawl output

use crate::error::{CrawlError, Result};
use std::{fs::{self, File},
          path::Path,
          process::{Command, Stdio}};

/// Turns a saved markup file into a condensed document
pub trait Converter {
    fn name(&self) -> &str;

    fn convert(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Pipes the input file through an external program: input on stdin, result from stdout
#[derive(Debug, Clone)]
pub struct ExternalConverter {
    program: String,
    args: Vec<String>,
}

impl ExternalConverter {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { program: program.into(), args: args.into_iter().map(Into::into).collect() }
    }

    /// `npx mdream --preset minimal`
    pub fn mdream() -> Self {
        Self::new("npx", ["mdream", "--preset", "minimal"])
    }
}

impl Converter for ExternalConverter {
    fn name(&self) -> &str {
        &self.program
    }

    fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        let input_file = File::open(input)?;
        create_parent(output)?;
        let output_file = File::create(output)?;

        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::from(input_file))
            .stdout(Stdio::from(output_file))
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| CrawlError::ConversionFailed(format!("Failed to run {}: {}", self.program, e)))?;

        if !status.success() {
            return Err(CrawlError::ConversionFailed(format!("{} exited with {}", self.program, status)));
        }
        Ok(())
    }
}

/// Converts in-process with html2md
#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdConverter;

impl Converter for Html2MdConverter {
    fn name(&self) -> &str {
        "html2md"
    }

    fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        let html = fs::read_to_string(input)?;
        let markdown = html2md::parse_html(&html);
        create_parent(output)?;
        fs::write(output, markdown)?;
        Ok(())
    }
}

/// Converter choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ConverterKind {
    /// `npx mdream --preset minimal`
    Mdream,
    /// Built-in html2md
    Html2md,
}

impl ConverterKind {
    pub fn build(&self) -> Box<dyn Converter> {
        match self {
            ConverterKind::Mdream => Box::new(ExternalConverter::mdream()),
            ConverterKind::Html2md => Box::new(Html2MdConverter),
        }
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html2md_converter() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("docs.md.html");
        let output = dir.path().join("out").join("docs.md");
        fs::write(&input, "<h1>Title</h1>\n<p>Some <strong>bold</strong> text</p>\n").unwrap();

        Html2MdConverter.convert(&input, &output).unwrap();

        let markdown = fs::read_to_string(&output).unwrap();
        assert!(markdown.contains("Title"));
        assert!(markdown.contains("**bold**"));
    }

    #[test]
    fn test_mdream_command() {
        let converter = ExternalConverter::mdream();
        assert_eq!(converter.name(), "npx");
        assert_eq!(converter.args, vec!["mdream", "--preset", "minimal"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_external_converter_pipes_stdin_to_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.html");
        let output = dir.path().join("out.md");
        fs::write(&input, "<p>piped</p>\n").unwrap();

        ExternalConverter::new("cat", Vec::<String>::new()).convert(&input, &output).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "<p>piped</p>\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_external_converter_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.html");
        fs::write(&input, "x").unwrap();

        let result = ExternalConverter::new("false", Vec::<String>::new()).convert(&input, &dir.path().join("out.md"));
        assert!(matches!(result, Err(CrawlError::ConversionFailed(_))));
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = Html2MdConverter.convert(&dir.path().join("nope.html"), &dir.path().join("out.md"));
        assert!(matches!(result, Err(CrawlError::Io(_))));
    }
}
