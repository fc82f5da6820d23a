//! `tagtree render` command implementation.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use tagtree::HtmlReader;
use tagtree::description::{DocumentDescription, NodeDescription};
use tagtree_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// JSON tree description to render (default: stdin).
    input: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Treat the input as `{"head": [...], "body": [...]}` and wrap it in a full document.
    #[arg(short, long)]
    document: bool,

    /// Output encoding label (overrides config).
    #[arg(short, long, env = "TAGTREE_ENCODING")]
    encoding: Option<String>,

    /// Document language (overrides config).
    #[arg(long)]
    lang: Option<String>,

    /// Path to configuration file (default: auto-discover tagtree.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input parsing, tree validation or
    /// writing the output fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            lang: self.lang,
            encoding: self.encoding,
            buffer_size: None,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let source = read_input(self.input.as_deref())?;

        let written = match &self.output {
            Some(path) => {
                let mut out = BufWriter::new(File::create(path)?);
                let written = render_source(&source, self.document, &config, &mut out)?;
                Output::new().success(&format!("Wrote {written} bytes to {}", path.display()));
                written
            }
            None => render_source(&source, self.document, &config, &mut io::stdout().lock())?,
        };

        tracing::info!(
            bytes = written,
            encoding = %config.output.encoding,
            document = self.document,
            "Rendered tree"
        );
        Ok(())
    }
}

/// Read the input file, or stdin when no path (or `-`) is given.
fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

/// Parse, validate and render a JSON description into `out`.
///
/// Returns the number of bytes written.
fn render_source(
    source: &str,
    document: bool,
    config: &Config,
    out: &mut impl Write,
) -> Result<usize, CliError> {
    let encoding = tagtree::resolve_encoding(&config.output.encoding)?;
    let buffer_size = config.output.buffer_size;

    let written = if document {
        let description: DocumentDescription = serde_json::from_str(source)?;
        let doc = description.build(&config.document.lang)?;
        pump(
            &mut HtmlReader::with_encoding(doc.render(), encoding),
            out,
            buffer_size,
        )?
    } else {
        let description: NodeDescription = serde_json::from_str(source)?;
        let node = description.build()?;
        pump(
            &mut HtmlReader::with_encoding(node.render(), encoding),
            out,
            buffer_size,
        )?
    };

    out.flush()?;
    Ok(written)
}

/// Copy the reader into `out` one buffer at a time until a short fill.
fn pump<'a, I>(
    reader: &mut HtmlReader<'a, I>,
    out: &mut impl Write,
    buffer_size: usize,
) -> io::Result<usize>
where
    I: Iterator<Item = &'a str>,
{
    let mut buf = vec![0u8; buffer_size];
    let mut total = 0;
    loop {
        let n = reader.fill_buffer(&mut buf);
        out.write_all(&buf[..n])?;
        total += n;
        if n < buf.len() {
            return Ok(total);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config_with(encoding: &str, buffer_size: usize) -> Config {
        let mut config = Config::default();
        config.output.encoding = encoding.to_owned();
        config.output.buffer_size = buffer_size;
        config
    }

    fn render(source: &str, document: bool, config: &Config) -> String {
        let mut out = Vec::new();
        let written = render_source(source, document, config, &mut out).unwrap();
        assert_eq!(written, out.len());
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_single_node() {
        let html = render(
            r#"{"tag": "a", "attrs": {"href": "/x"}, "text": "go"}"#,
            false,
            &Config::default(),
        );
        assert_eq!(html, "<a href=\"/x\">\n  go\n</a>\n");
    }

    #[test]
    fn test_render_small_buffer_matches() {
        let source = r#"{"tag": "div", "children": [{"tag": "span", "text": "héllo"}, null]}"#;
        let large = render(source, false, &config_with("utf-8", 8192));
        let tiny = render(source, false, &config_with("utf-8", 3));
        assert_eq!(large, tiny);
        assert_eq!(large, "<div>\n  <span>\n    héllo\n  </span>\n</div>\n");
    }

    #[test]
    fn test_render_document_uses_config_lang() {
        let mut config = Config::default();
        config.document.lang = "nl".to_owned();
        let html = render(r#"{"body": [{"tag": "br"}]}"#, true, &config);
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"nl\">\n"));
        assert!(html.contains("  <body>\n    <br>\n  </body>\n"));
    }

    #[test]
    fn test_render_legacy_encoding() {
        let mut out = Vec::new();
        render_source(
            r#"{"tag": "p", "text": "café"}"#,
            false,
            &config_with("latin1", 16),
            &mut out,
        )
        .unwrap();
        assert_eq!(out, b"<p>\n  caf\xe9\n</p>\n");
    }

    #[test]
    fn test_render_invalid_tree() {
        let mut out = Vec::new();
        let err = render_source(r#"{"tag": "img"}"#, false, &Config::default(), &mut out)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Invalid tree: missing required attrs ["src", "alt"] for tag "img""#
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_render_invalid_json() {
        let mut out = Vec::new();
        let err = render_source("{", false, &Config::default(), &mut out).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
    }

    #[test]
    fn test_read_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");
        std::fs::write(&path, "null").unwrap();
        assert_eq!(read_input(Some(&path)).unwrap(), "null");
    }

    #[test]
    fn test_pump_empty_rendering() {
        let node = tagtree::Node::Null;
        let mut out = Vec::new();
        let written = pump(&mut node.reader(), &mut out, 4).unwrap();
        assert_eq!(written, 0);
        assert!(out.is_empty());
    }
}
