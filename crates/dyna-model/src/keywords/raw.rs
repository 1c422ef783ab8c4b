//! Verbatim storage for blocks without a registered keyword type.

use dyna_card::Format;

use crate::error::KeywordError;
use crate::keyword::{Keyword, keyword_boilerplate};

/// Keeps the block name and every line after it, comments included, so an
/// unknown block is written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawKeyword {
    name: String,
    pub lines: Vec<String>,
}

impl RawKeyword {
    pub fn new(name: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }
}

impl Keyword for RawKeyword {
    fn name(&self) -> &str {
        &self.name
    }

    fn parse(&mut self, lines: &[String], _format: Format) -> Result<(), KeywordError> {
        self.lines = lines.to_vec();
        Ok(())
    }

    fn write(&self, _format: Format) -> Result<Vec<String>, KeywordError> {
        Ok(self.lines.clone())
    }

    keyword_boilerplate!(visit_raw);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_lines_verbatim() {
        let lines = vec![
            "$ unsupported".to_string(),
            "  1, 2, 3".to_string(),
            String::new(),
        ];
        let mut kw = RawKeyword::new("*BOUNDARY_SPC_NODE", Vec::new());
        kw.parse(&lines, Format::Large).unwrap();
        assert_eq!(kw.name(), "*BOUNDARY_SPC_NODE");
        assert_eq!(kw.write(Format::Standard).unwrap(), lines);
    }
}
