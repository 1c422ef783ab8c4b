//! [`Model`] to deck text.

use std::fs;
use std::path::Path;

use dyna_card::{COMMENT_MARKER, Format};
use dyna_model::Model;

use crate::error::{DeckError, Result};
use crate::options::WriteOptions;

#[derive(Debug, Clone, Default)]
pub struct DeckWriter {
    options: WriteOptions,
    header: Vec<String>,
}

impl DeckWriter {
    pub fn new(format: Format) -> Self {
        Self::default().with_options(WriteOptions {
            format,
            ..WriteOptions::default()
        })
    }

    pub fn with_options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Comment lines written ahead of everything else. A `$` is prepended
    /// where missing.
    pub fn with_header<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = lines
            .into_iter()
            .map(|line| {
                let line: String = line.into();
                if line.starts_with(COMMENT_MARKER) {
                    line
                } else {
                    format!("{COMMENT_MARKER} {line}")
                }
            })
            .collect();
        self
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    pub fn write_lines(&self, model: &Model) -> Result<Vec<String>> {
        let mut out = self.header.clone();
        if self.options.keyword_header {
            out.push("*KEYWORD".to_string());
        }
        for (position, keyword) in model.iter().enumerate() {
            out.push(keyword.name().to_string());
            let lines = keyword
                .write(self.options.format)
                .map_err(|source| DeckError::Write {
                    position,
                    name: keyword.name().to_string(),
                    source,
                })?;
            out.extend(lines);
        }
        if self.options.end_marker {
            out.push("*END".to_string());
        }
        Ok(out)
    }

    pub fn write_string(&self, model: &Model) -> Result<String> {
        let mut text = self.write_lines(model)?.join("\n");
        text.push('\n');
        Ok(text)
    }

    pub fn write_file(&self, model: &Model, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.write_string(model)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyna_model::keywords::{Node, NodeEntry, Title};

    #[test]
    fn writes_header_keywords_and_end() {
        let mut model = Model::new();
        model.add_keyword(Box::new(Title::new("demo")));
        model.add_keyword(Box::new(Node::new(vec![NodeEntry::new(1, 0.5, 0.0, 0.0)])));

        let text = DeckWriter::new(Format::Standard)
            .with_header(["written by test", "$ already a comment"])
            .write_string(&model)
            .unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "$ written by test",
                "$ already a comment",
                "*KEYWORD",
                "*TITLE",
                "demo",
                "*NODE",
                "       1             0.5             0.0             0.0       0       0",
                "*END",
            ]
        );
    }

    #[test]
    fn overflowing_field_reports_the_keyword() {
        let mut model = Model::new();
        model.add_keyword(Box::new(Title::new("t")));
        model.add_keyword(Box::new(Node::new(vec![NodeEntry::new(
            1_000_000_000,
            0.0,
            0.0,
            0.0,
        )])));
        let err = DeckWriter::default().write_string(&model).unwrap_err();
        match err {
            DeckError::Write { position, name, .. } => {
                assert_eq!(position, 1);
                assert_eq!(name, "*NODE");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn markers_can_be_disabled() {
        let mut model = Model::new();
        model.add_keyword(Box::new(Title::new("x")));
        let writer = DeckWriter::default().with_options(WriteOptions {
            keyword_header: false,
            end_marker: false,
            ..WriteOptions::default()
        });
        assert_eq!(writer.write_string(&model).unwrap(), "*TITLE\nx\n");
    }
}
