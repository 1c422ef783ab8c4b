//! Deck-level keywords: `*TITLE`, `*INCLUDE`, `*CONTROL_TERMINATION`.

use dyna_card::{FieldReader, Format, is_comment_line};

use crate::error::KeywordError;
use crate::keyword::{CardCursor, CardSink, Keyword, keyword_boilerplate, read_title};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub const NAME: &'static str = "*TITLE";

    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Keyword for Title {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parse(&mut self, lines: &[String], _format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(Self::NAME, lines);
        self.text = read_title(cards.require("title")?);
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(Self::NAME, format);
        out.card(|w| {
            w.text(&self.text, dyna_card::CARD_WIDTH);
        })?;
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_title);
}

/// `*INCLUDE`: one file name per data line, resolved relative to the
/// including deck by the reader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Include {
    pub files: Vec<String>,
}

impl Include {
    pub const NAME: &'static str = "*INCLUDE";

    pub fn new(file: impl Into<String>) -> Self {
        Self {
            files: vec![file.into()],
        }
    }
}

impl Keyword for Include {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parse(&mut self, lines: &[String], _format: Format) -> Result<(), KeywordError> {
        self.files = lines
            .iter()
            .filter(|line| !is_comment_line(line))
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if self.files.is_empty() {
            return Err(KeywordError::missing(Self::NAME, "filename"));
        }
        Ok(())
    }

    fn write(&self, _format: Format) -> Result<Vec<String>, KeywordError> {
        Ok(self.files.clone())
    }

    keyword_boilerplate!(visit_include);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlTermination {
    pub endtim: f64,
    pub endcyc: i64,
    pub dtmin: f64,
    pub endeng: f64,
    pub endmas: f64,
    pub nosol: i64,
}

impl Default for ControlTermination {
    fn default() -> Self {
        Self {
            endtim: 0.0,
            endcyc: 0,
            dtmin: 0.0,
            endeng: 0.0,
            endmas: 1.0e8,
            nosol: 0,
        }
    }
}

impl ControlTermination {
    pub const NAME: &'static str = "*CONTROL_TERMINATION";
}

impl Keyword for ControlTermination {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(Self::NAME, lines);
        let defaults = Self::default();
        let mut r = FieldReader::new(cards.require("card 1")?, format);
        self.endtim = r.real().unwrap_or(defaults.endtim);
        self.endcyc = r.int().unwrap_or(defaults.endcyc);
        self.dtmin = r.real().unwrap_or(defaults.dtmin);
        self.endeng = r.real().unwrap_or(defaults.endeng);
        self.endmas = r.real().unwrap_or(defaults.endmas);
        self.nosol = r.int().unwrap_or(defaults.nosol);
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(Self::NAME, format);
        out.card(|w| {
            w.real(self.endtim)
                .int(self.endcyc)
                .real(self.dtmin)
                .real(self.endeng)
                .real(self.endmas)
                .int(self.nosol);
        })?;
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_control_termination);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn termination_defaults_blank_fields() {
        let mut kw = ControlTermination::default();
        kw.parse(&lines(&["     0.025"]), Format::Standard).unwrap();
        assert_eq!(kw.endtim, 0.025);
        assert_eq!(kw.endmas, 1.0e8);
        assert_eq!(kw.endcyc, 0);
    }

    #[test]
    fn termination_requires_its_card() {
        let mut kw = ControlTermination::default();
        let err = kw.parse(&lines(&["$ only a comment"]), Format::Standard);
        assert!(matches!(err, Err(KeywordError::MissingCard { .. })));
    }

    #[test]
    fn include_lists_file_names() {
        let mut kw = Include::default();
        kw.parse(&lines(&["$ mesh", "mesh/part1.k", "  loads.k  "]), Format::Standard)
            .unwrap();
        assert_eq!(kw.files, vec!["mesh/part1.k", "loads.k"]);
        assert_eq!(kw.write(Format::Large).unwrap(), kw.files);
    }

    #[test]
    fn title_keeps_commas() {
        let mut kw = Title::default();
        kw.parse(&lines(&["Sled test, run 3"]), Format::Standard).unwrap();
        assert_eq!(kw.text, "Sled test, run 3");
    }
}
