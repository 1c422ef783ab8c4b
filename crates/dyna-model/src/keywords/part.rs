//! `*PART`: binds elements to a section and a material.

use dyna_card::{FieldReader, Format};
use log::warn;

use crate::error::KeywordError;
use crate::keyword::{CardCursor, CardSink, Keyword, keyword_boilerplate, read_title};
use crate::{MaterialId, PartId, SectionId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartEntry {
    pub title: String,
    pub pid: PartId,
    pub secid: SectionId,
    pub mid: MaterialId,
    pub eosid: i64,
    pub hgid: i64,
    pub grav: i64,
    pub adpopt: i64,
    pub tmid: i64,
}

impl PartEntry {
    pub fn new(pid: PartId, secid: SectionId, mid: MaterialId) -> Self {
        Self {
            pid,
            secid,
            mid,
            ..Self::default()
        }
    }
}

/// One `*PART` block may define several parts, two cards each.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Part {
    pub parts: Vec<PartEntry>,
}

impl Part {
    pub const NAME: &'static str = "*PART";

    pub fn new(parts: Vec<PartEntry>) -> Self {
        Self { parts }
    }
}

impl Keyword for Part {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(Self::NAME, lines);
        self.parts.clear();

        while let Some(heading) = cards.next_card() {
            if heading.trim().is_empty() && cards.is_empty() {
                break;
            }
            let mut r = FieldReader::new(cards.require("card 2")?, format);
            let Some(pid) = r.int() else {
                warn!("{}: skipping part without PID ({heading:?})", Self::NAME);
                continue;
            };
            self.parts.push(PartEntry {
                title: read_title(heading),
                pid,
                secid: r.int().unwrap_or(0),
                mid: r.int().unwrap_or(0),
                eosid: r.int().unwrap_or(0),
                hgid: r.int().unwrap_or(0),
                grav: r.int().unwrap_or(0),
                adpopt: r.int().unwrap_or(0),
                tmid: r.int().unwrap_or(0),
            });
        }

        if self.parts.is_empty() {
            return Err(KeywordError::missing(Self::NAME, "heading"));
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(Self::NAME, format);
        for part in &self.parts {
            out.card(|w| {
                w.text(&part.title, dyna_card::CARD_WIDTH);
            })?;
            out.card(|w| {
                w.int(part.pid)
                    .int(part.secid)
                    .int(part.mid)
                    .int(part.eosid)
                    .int(part.hgid)
                    .int(part.grav)
                    .int(part.adpopt)
                    .int(part.tmid);
            })?;
        }
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_part);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_several_parts_in_one_block() {
        let lines: Vec<String> = [
            "$# title",
            "Door inner",
            "$#     pid     secid       mid",
            "        11         1         5",
            "Door outer",
            "        12         2         5         0         3",
            "",
        ]
        .iter()
        .map(|l| l.to_string())
        .collect();

        let mut kw = Part::default();
        kw.parse(&lines, Format::Standard).unwrap();
        assert_eq!(kw.parts.len(), 2);
        assert_eq!(kw.parts[0].title, "Door inner");
        assert_eq!(kw.parts[1].pid, 12);
        assert_eq!(kw.parts[1].hgid, 3);
    }

    #[test]
    fn heading_without_ids_is_structural_failure() {
        let lines = vec!["Lonely heading".to_string()];
        let mut kw = Part::default();
        assert_eq!(
            kw.parse(&lines, Format::Standard),
            Err(KeywordError::missing(Part::NAME, "card 2"))
        );
    }
}
