//! Set keywords: `*SET_NODE_LIST`, `*SET_PART_LIST`, `*SET_SEGMENT` and
//! their `_TITLE` variants.

use dyna_card::{FieldReader, Format};

use crate::error::KeywordError;
use crate::keyword::{CardCursor, CardSink, Keyword, keyword_boilerplate, read_title};
use crate::{NodeId, PartId, SetId};

const IDS_PER_CARD: usize = 8;
const DEFAULT_SOLVER: &str = "MECH";

/// Card 1 shared by every set keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct SetHeader {
    pub sid: SetId,
    /// Default attributes DA1..DA4.
    pub attributes: [f64; 4],
    pub solver: String,
}

impl Default for SetHeader {
    fn default() -> Self {
        Self::new(0)
    }
}

impl SetHeader {
    pub fn new(sid: SetId) -> Self {
        Self {
            sid,
            attributes: [0.0; 4],
            solver: DEFAULT_SOLVER.to_string(),
        }
    }

    fn parse(
        cards: &mut CardCursor<'_>,
        title: &mut Option<String>,
        format: Format,
    ) -> Result<Self, KeywordError> {
        if title.is_some() {
            *title = Some(read_title(cards.require("title")?));
        }
        let mut r = FieldReader::new(cards.require("card 1")?, format);
        let sid = r.int().unwrap_or(0);
        let mut attributes = [0.0; 4];
        for value in attributes.iter_mut() {
            *value = r.real().unwrap_or(0.0);
        }
        let solver = r
            .text(format.int_width())
            .unwrap_or_else(|| DEFAULT_SOLVER.to_string());
        Ok(Self {
            sid,
            attributes,
            solver,
        })
    }

    fn write(&self, out: &mut CardSink<'_>, title: &Option<String>) -> Result<(), KeywordError> {
        if let Some(title) = title {
            out.card(|w| {
                w.text(title, dyna_card::CARD_WIDTH);
            })?;
        }
        out.card(|w| {
            w.int(self.sid);
            for value in self.attributes {
                w.real(value);
            }
            let width = w.format().int_width();
            w.text(&self.solver, width);
        })
    }
}

/// Reads the remaining cards as a flat id list, eight per card. Blank and
/// zero fields are not ids.
fn parse_ids(cards: &mut CardCursor<'_>, format: Format) -> Vec<i64> {
    let mut ids = Vec::new();
    while let Some(line) = cards.next_card() {
        let mut r = FieldReader::new(line, format);
        for _ in 0..IDS_PER_CARD {
            if let Some(id) = r.int().filter(|id| *id != 0) {
                ids.push(id);
            }
        }
        if r.is_free_format() {
            while !r.is_exhausted() {
                if let Some(id) = r.int().filter(|id| *id != 0) {
                    ids.push(id);
                }
            }
        }
    }
    ids
}

fn write_ids(out: &mut CardSink<'_>, ids: &[i64]) -> Result<(), KeywordError> {
    for chunk in ids.chunks(IDS_PER_CARD) {
        out.card(|w| {
            for id in chunk {
                w.int(*id);
            }
        })?;
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetNodeList {
    pub title: Option<String>,
    pub header: SetHeader,
    pub nodes: Vec<NodeId>,
}

impl SetNodeList {
    pub const NAME: &'static str = "*SET_NODE_LIST";
    pub const NAME_TITLE: &'static str = "*SET_NODE_LIST_TITLE";

    pub fn new(sid: SetId, nodes: Vec<NodeId>) -> Self {
        Self {
            title: None,
            header: SetHeader::new(sid),
            nodes,
        }
    }

    pub fn titled() -> Self {
        Self {
            title: Some(String::new()),
            ..Self::default()
        }
    }

    pub fn sid(&self) -> SetId {
        self.header.sid
    }
}

impl Keyword for SetNodeList {
    fn name(&self) -> &str {
        if self.title.is_some() {
            Self::NAME_TITLE
        } else {
            Self::NAME
        }
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(self.name(), lines);
        self.header = SetHeader::parse(&mut cards, &mut self.title, format)?;
        self.nodes = parse_ids(&mut cards, format);
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(self.name(), format);
        self.header.write(&mut out, &self.title)?;
        write_ids(&mut out, &self.nodes)?;
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_set_node_list);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetPartList {
    pub title: Option<String>,
    pub header: SetHeader,
    pub parts: Vec<PartId>,
}

impl SetPartList {
    pub const NAME: &'static str = "*SET_PART_LIST";
    pub const NAME_TITLE: &'static str = "*SET_PART_LIST_TITLE";

    pub fn new(sid: SetId, parts: Vec<PartId>) -> Self {
        Self {
            title: None,
            header: SetHeader::new(sid),
            parts,
        }
    }

    pub fn titled() -> Self {
        Self {
            title: Some(String::new()),
            ..Self::default()
        }
    }

    pub fn sid(&self) -> SetId {
        self.header.sid
    }
}

impl Keyword for SetPartList {
    fn name(&self) -> &str {
        if self.title.is_some() {
            Self::NAME_TITLE
        } else {
            Self::NAME
        }
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(self.name(), lines);
        self.header = SetHeader::parse(&mut cards, &mut self.title, format)?;
        self.parts = parse_ids(&mut cards, format);
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(self.name(), format);
        self.header.write(&mut out, &self.title)?;
        write_ids(&mut out, &self.parts)?;
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_set_part_list);
}

/// One `*SET_SEGMENT` entry. Triangles repeat the third node in `nodes[3]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SegmentEntry {
    pub nodes: [NodeId; 4],
    pub attributes: [f64; 4],
}

impl SegmentEntry {
    /// Builds an entry from a 3- or 4-node face. Returns `None` for any other
    /// node count.
    pub fn from_nodes(nodes: &[NodeId]) -> Option<Self> {
        let nodes = match nodes {
            &[n1, n2, n3] => [n1, n2, n3, n3],
            &[n1, n2, n3, n4] => [n1, n2, n3, n4],
            _ => return None,
        };
        Some(Self {
            nodes,
            attributes: [0.0; 4],
        })
    }

    /// Distinct face nodes: three for a triangle, four for a quad.
    pub fn face_nodes(&self) -> &[NodeId] {
        if self.nodes[3] == self.nodes[2] || self.nodes[3] == 0 {
            &self.nodes[..3]
        } else {
            &self.nodes
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetSegment {
    pub title: Option<String>,
    pub header: SetHeader,
    pub segments: Vec<SegmentEntry>,
}

impl SetSegment {
    pub const NAME: &'static str = "*SET_SEGMENT";
    pub const NAME_TITLE: &'static str = "*SET_SEGMENT_TITLE";

    pub fn new(sid: SetId, segments: Vec<SegmentEntry>) -> Self {
        Self {
            title: None,
            header: SetHeader::new(sid),
            segments,
        }
    }

    pub fn titled() -> Self {
        Self {
            title: Some(String::new()),
            ..Self::default()
        }
    }

    pub fn sid(&self) -> SetId {
        self.header.sid
    }
}

impl Keyword for SetSegment {
    fn name(&self) -> &str {
        if self.title.is_some() {
            Self::NAME_TITLE
        } else {
            Self::NAME
        }
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(self.name(), lines);
        self.header = SetHeader::parse(&mut cards, &mut self.title, format)?;
        self.segments.clear();
        while let Some(line) = cards.next_card() {
            if line.trim().is_empty() {
                continue;
            }
            let mut r = FieldReader::new(line, format);
            let mut entry = SegmentEntry::default();
            for node in entry.nodes.iter_mut() {
                *node = r.int().unwrap_or(0);
            }
            for value in entry.attributes.iter_mut() {
                *value = r.real().unwrap_or(0.0);
            }
            self.segments.push(entry);
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(self.name(), format);
        self.header.write(&mut out, &self.title)?;
        for entry in &self.segments {
            out.card(|w| {
                for node in entry.nodes {
                    w.int(node);
                }
                if entry.attributes.iter().any(|a| *a != 0.0) {
                    for value in entry.attributes {
                        w.real(value);
                    }
                }
            })?;
        }
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_set_segment);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn node_list_reads_ids_across_cards() {
        let mut kw = SetNodeList::default();
        kw.parse(
            &lines(&[
                "$#     sid       da1       da2       da3       da4    solver",
                "         5",
                "         1         2         3         4         5         6         7         8",
                "         9        10",
            ]),
            Format::Standard,
        )
        .unwrap();
        assert_eq!(kw.sid(), 5);
        assert_eq!(kw.header.solver, "MECH");
        assert_eq!(kw.nodes, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn part_list_round_trips_with_title() {
        let mut kw = SetPartList::new(3, vec![11, 12, 13]);
        kw.title = Some("door parts".to_string());
        let written = kw.write(Format::Large).unwrap();
        assert_eq!(written.len(), 3);

        let mut back = SetPartList::titled();
        back.parse(&written, Format::Large).unwrap();
        assert_eq!(back, kw);
    }

    #[test]
    fn free_format_ids_are_read_past_eight() {
        let mut kw = SetNodeList::default();
        kw.parse(&lines(&["7", "1,2,3,4,5,6,7,8,9,10"]), Format::Standard)
            .unwrap();
        assert_eq!(kw.nodes.len(), 10);
    }

    #[test]
    fn segment_entries_distinguish_triangles() {
        let tri = SegmentEntry::from_nodes(&[1, 2, 3]).unwrap();
        assert_eq!(tri.nodes, [1, 2, 3, 3]);
        assert_eq!(tri.face_nodes(), &[1, 2, 3]);
        assert!(SegmentEntry::from_nodes(&[1, 2]).is_none());

        let kw = SetSegment::new(1, vec![tri, SegmentEntry::from_nodes(&[4, 5, 6, 7]).unwrap()]);
        let written = kw.write(Format::Standard).unwrap();
        let mut back = SetSegment::default();
        back.parse(&written, Format::Standard).unwrap();
        assert_eq!(back, kw);
    }

    #[test]
    fn missing_header_card_is_an_error() {
        let mut kw = SetSegment::default();
        let err = kw.parse(&[], Format::Standard).unwrap_err();
        assert_eq!(err, KeywordError::missing(SetSegment::NAME, "card 1"));
    }
}
