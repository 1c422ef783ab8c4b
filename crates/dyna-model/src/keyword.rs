//! The contract shared by every deck entry.

use std::any::Any;
use std::fmt::{self, Debug, Display, Formatter};

use dyna_card::{CardWriter, Format, is_comment_line};
use serde::{Deserialize, Serialize};

use crate::error::KeywordError;
use crate::visitor::KeywordVisitor;
use crate::{ElementId, NodeId, PartId};

/// A `*NAME` block of a deck together with the data it carries.
///
/// A fresh instance comes from [`crate::KeywordRegistry::create`], which
/// clones a registered prototype; [`Keyword::parse`] then fills it from the
/// lines that follow the `*NAME` line.
pub trait Keyword: Any + Debug + Send + Sync {
    /// Upper-case keyword name including its leading `*` and any suffix
    /// variant (`_TITLE`, `_ID`, ...).
    fn name(&self) -> &str;

    /// Consumes the data lines of one block. Comment lines may be present and
    /// are skipped. Fails only when a required card is absent.
    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError>;

    /// Data lines of the block, without the `*NAME` line.
    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError>;

    fn accept(&self, visitor: &mut dyn KeywordVisitor);

    fn clone_box(&self) -> Box<dyn Keyword>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Element view for keywords that carry element connectivity.
    fn as_element_keyword(&self) -> Option<&dyn ElementKeyword> {
        None
    }
}

impl Clone for Box<dyn Keyword> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Implements the parts of [`Keyword`] that only depend on the concrete type.
macro_rules! keyword_boilerplate {
    ($visit:ident) => {
        fn accept(&self, visitor: &mut dyn $crate::visitor::KeywordVisitor) {
            visitor.$visit(self);
        }

        fn clone_box(&self) -> Box<dyn $crate::keyword::Keyword> {
            Box::new(self.clone())
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    };
}

pub(crate) use keyword_boilerplate;

/// Broad element family used by the topology engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ElementShape {
    Shell,
    Solid,
    Beam,
    Discrete,
    Seatbelt,
    Mass,
    Inertia,
}

impl ElementShape {
    pub const ALL: [ElementShape; 7] = [
        ElementShape::Shell,
        ElementShape::Solid,
        ElementShape::Beam,
        ElementShape::Discrete,
        ElementShape::Seatbelt,
        ElementShape::Mass,
        ElementShape::Inertia,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementShape::Shell => "shell",
            ElementShape::Solid => "solid",
            ElementShape::Beam => "beam",
            ElementShape::Discrete => "discrete",
            ElementShape::Seatbelt => "seatbelt",
            ElementShape::Mass => "mass",
            ElementShape::Inertia => "inertia",
        }
    }
}

impl Display for ElementShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view of one element inside its owning keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementData<'a> {
    pub id: ElementId,
    pub part: PartId,
    pub nodes: &'a [NodeId],
    pub shape: ElementShape,
}

/// Keywords holding a list of elements of one shape.
pub trait ElementKeyword {
    fn shape(&self) -> ElementShape;

    fn element_count(&self) -> usize;

    fn element_at(&self, index: usize) -> Option<ElementData<'_>>;
}

/// Walks the data cards of one block, skipping comment lines.
#[derive(Debug, Clone)]
pub struct CardCursor<'a> {
    keyword: String,
    lines: Vec<&'a str>,
    position: usize,
}

impl<'a> CardCursor<'a> {
    pub fn new(keyword: impl Into<String>, lines: &'a [String]) -> Self {
        Self {
            keyword: keyword.into(),
            lines: lines
                .iter()
                .map(String::as_str)
                .filter(|line| !is_comment_line(line))
                .collect(),
            position: 0,
        }
    }

    pub fn next_card(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.position).copied();
        if line.is_some() {
            self.position += 1;
        }
        line
    }

    /// Next card, or [`KeywordError::MissingCard`] naming `card`.
    pub fn require(&mut self, card: &'static str) -> Result<&'a str, KeywordError> {
        self.next_card()
            .ok_or_else(|| KeywordError::missing(&self.keyword, card))
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.position).copied()
    }

    pub fn remaining(&self) -> usize {
        self.lines.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

/// Collects the written cards of one block.
#[derive(Debug)]
pub(crate) struct CardSink<'a> {
    keyword: &'a str,
    format: Format,
    lines: Vec<String>,
}

impl<'a> CardSink<'a> {
    pub(crate) fn new(keyword: &'a str, format: Format) -> Self {
        Self {
            keyword,
            format,
            lines: Vec::new(),
        }
    }

    pub(crate) fn card(&mut self, build: impl FnOnce(&mut CardWriter)) -> Result<(), KeywordError> {
        let mut writer = CardWriter::new(self.format);
        build(&mut writer);
        let line = writer
            .finish()
            .map_err(|err| KeywordError::card(self.keyword, err))?;
        self.lines.push(line);
        Ok(())
    }

    pub(crate) fn finish(self) -> Vec<String> {
        self.lines
    }
}

/// Title card shared by the `_TITLE` variants: one 80-character text field.
pub(crate) fn read_title(line: &str) -> String {
    dyna_card::text_at(line, 0, dyna_card::CARD_WIDTH).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_skips_comments_but_keeps_blank_cards() {
        let lines = vec![
            "$# secid".to_string(),
            "         1".to_string(),
            String::new(),
            "$ trailing".to_string(),
        ];
        let mut cursor = CardCursor::new("*SECTION_SOLID", &lines);
        assert_eq!(cursor.remaining(), 2);
        assert_eq!(cursor.require("card 1").unwrap(), "         1");
        assert_eq!(cursor.next_card(), Some(""));
        let err = cursor.require("card 3").unwrap_err();
        assert_eq!(err, KeywordError::missing("*SECTION_SOLID", "card 3"));
    }

    #[test]
    fn sink_reports_overflowing_fields() {
        let mut sink = CardSink::new("*NODE", Format::Standard);
        sink.card(|w| {
            w.int(1);
        })
        .unwrap();
        let err = sink
            .card(|w| {
                w.int(123_456_789_012);
            })
            .unwrap_err();
        assert!(matches!(err, KeywordError::Card { .. }));
        assert_eq!(sink.finish(), vec!["         1".to_string()]);
    }
}
