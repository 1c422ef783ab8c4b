//! Element connectivity keywords.
//!
//! Ids and node numbers are 8 characters wide in both profiles; that is the
//! native column layout of `*ELEMENT_*` cards.

use std::slice;

use dyna_card::{FieldReader, Format};
use log::warn;

use crate::error::KeywordError;
use crate::keyword::{
    CardCursor, CardSink, ElementData, ElementKeyword, ElementShape, Keyword, keyword_boilerplate,
};
use crate::{ElementId, NodeId, PartId};

const ID_WIDTH: usize = 8;
const SPRING_REAL_WIDTH: usize = 16;

/// Generic element row: id, owning part and connectivity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementRow {
    pub id: ElementId,
    pub part: PartId,
    pub nodes: Vec<NodeId>,
}

impl ElementRow {
    pub fn new(id: ElementId, part: PartId, nodes: Vec<NodeId>) -> Self {
        Self { id, part, nodes }
    }
}

fn row_data(row: &ElementRow, shape: ElementShape) -> ElementData<'_> {
    ElementData {
        id: row.id,
        part: row.part,
        nodes: &row.nodes,
        shape,
    }
}

/// Reads `eid pid` from the start of a card, warning and returning `None`
/// for a card without an element id.
fn read_id_and_part(keyword: &str, r: &mut FieldReader<'_>, line: &str) -> Option<(ElementId, PartId)> {
    let Some(id) = r.int_w(ID_WIDTH) else {
        warn!("{keyword}: skipping card without element id: {line:?}");
        return None;
    };
    Some((id, r.int_w(ID_WIDTH).unwrap_or(0)))
}

fn read_nodes(r: &mut FieldReader<'_>, count: usize) -> Vec<NodeId> {
    (0..count).map(|_| r.int_w(ID_WIDTH).unwrap_or(0)).collect()
}

/// Drops trailing zero node ids beyond the first `keep` entries.
fn trim_unused(nodes: &mut Vec<NodeId>, keep: usize) {
    while nodes.len() > keep && nodes.last() == Some(&0) {
        nodes.pop();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementShell {
    pub elements: Vec<ElementRow>,
}

impl ElementShell {
    pub const NAME: &'static str = "*ELEMENT_SHELL";

    pub fn new(elements: Vec<ElementRow>) -> Self {
        Self { elements }
    }
}

impl Keyword for ElementShell {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(Self::NAME, lines);
        self.elements.clear();
        while let Some(line) = cards.next_card() {
            if line.trim().is_empty() {
                continue;
            }
            let mut r = FieldReader::new(line, format);
            let Some((id, part)) = read_id_and_part(Self::NAME, &mut r, line) else {
                continue;
            };
            let mut nodes = read_nodes(&mut r, 8);
            trim_unused(&mut nodes, 4);
            self.elements.push(ElementRow { id, part, nodes });
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(Self::NAME, format);
        for element in &self.elements {
            out.card(|w| {
                w.int_w(element.id, ID_WIDTH).int_w(element.part, ID_WIDTH);
                for node in &element.nodes {
                    w.int_w(*node, ID_WIDTH);
                }
            })?;
        }
        Ok(out.finish())
    }

    fn as_element_keyword(&self) -> Option<&dyn ElementKeyword> {
        Some(self)
    }

    keyword_boilerplate!(visit_element_shell);
}

impl ElementKeyword for ElementShell {
    fn shape(&self) -> ElementShape {
        ElementShape::Shell
    }

    fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn element_at(&self, index: usize) -> Option<ElementData<'_>> {
        self.elements
            .get(index)
            .map(|row| row_data(row, ElementShape::Shell))
    }
}

/// `*ELEMENT_SOLID`. Reads both the single-card layout (`eid pid n1..n8`)
/// and the two-card layout (`eid pid`, then `n1..n10`). Writes the single
/// card when the element has at most eight nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementSolid {
    pub elements: Vec<ElementRow>,
}

impl ElementSolid {
    pub const NAME: &'static str = "*ELEMENT_SOLID";

    pub fn new(elements: Vec<ElementRow>) -> Self {
        Self { elements }
    }
}

impl Keyword for ElementSolid {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(Self::NAME, lines);
        self.elements.clear();
        while let Some(line) = cards.next_card() {
            if line.trim().is_empty() {
                continue;
            }
            let mut r = FieldReader::new(line, format);
            let Some((id, part)) = read_id_and_part(Self::NAME, &mut r, line) else {
                continue;
            };
            let mut nodes = if r.is_exhausted() {
                let node_card = cards.require("node card")?;
                read_nodes(&mut FieldReader::new(node_card, format), 10)
            } else {
                read_nodes(&mut r, 8)
            };
            trim_unused(&mut nodes, 8);
            self.elements.push(ElementRow { id, part, nodes });
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(Self::NAME, format);
        for element in &self.elements {
            if element.nodes.len() <= 8 {
                out.card(|w| {
                    w.int_w(element.id, ID_WIDTH).int_w(element.part, ID_WIDTH);
                    for node in &element.nodes {
                        w.int_w(*node, ID_WIDTH);
                    }
                })?;
            } else {
                out.card(|w| {
                    w.int_w(element.id, ID_WIDTH).int_w(element.part, ID_WIDTH);
                })?;
                out.card(|w| {
                    for node in &element.nodes {
                        w.int_w(*node, ID_WIDTH);
                    }
                })?;
            }
        }
        Ok(out.finish())
    }

    fn as_element_keyword(&self) -> Option<&dyn ElementKeyword> {
        Some(self)
    }

    keyword_boilerplate!(visit_element_solid);
}

impl ElementKeyword for ElementSolid {
    fn shape(&self) -> ElementShape {
        ElementShape::Solid
    }

    fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn element_at(&self, index: usize) -> Option<ElementData<'_>> {
        self.elements
            .get(index)
            .map(|row| row_data(row, ElementShape::Solid))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeamElement {
    pub row: ElementRow,
    /// RT1 RR1 RT2 RR2 LOCAL release and orientation flags.
    pub releases: [i64; 5],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementBeam {
    pub elements: Vec<BeamElement>,
}

impl ElementBeam {
    pub const NAME: &'static str = "*ELEMENT_BEAM";
}

impl Keyword for ElementBeam {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(Self::NAME, lines);
        self.elements.clear();
        while let Some(line) = cards.next_card() {
            if line.trim().is_empty() {
                continue;
            }
            let mut r = FieldReader::new(line, format);
            let Some((id, part)) = read_id_and_part(Self::NAME, &mut r, line) else {
                continue;
            };
            let nodes = read_nodes(&mut r, 3);
            let mut releases = [0; 5];
            for value in releases.iter_mut() {
                *value = r.int_w(ID_WIDTH).unwrap_or(0);
            }
            self.elements.push(BeamElement {
                row: ElementRow { id, part, nodes },
                releases,
            });
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(Self::NAME, format);
        for beam in &self.elements {
            out.card(|w| {
                w.int_w(beam.row.id, ID_WIDTH).int_w(beam.row.part, ID_WIDTH);
                for node in &beam.row.nodes {
                    w.int_w(*node, ID_WIDTH);
                }
                for value in beam.releases {
                    w.int_w(value, ID_WIDTH);
                }
            })?;
        }
        Ok(out.finish())
    }

    fn as_element_keyword(&self) -> Option<&dyn ElementKeyword> {
        Some(self)
    }

    keyword_boilerplate!(visit_element_beam);
}

impl ElementKeyword for ElementBeam {
    fn shape(&self) -> ElementShape {
        ElementShape::Beam
    }

    fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn element_at(&self, index: usize) -> Option<ElementData<'_>> {
        self.elements
            .get(index)
            .map(|beam| row_data(&beam.row, ElementShape::Beam))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscreteElement {
    pub row: ElementRow,
    /// Orientation vector id.
    pub vid: i64,
    /// Scale factor on force.
    pub s: f64,
    pub pf: i64,
    pub offset: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementDiscrete {
    pub elements: Vec<DiscreteElement>,
}

impl ElementDiscrete {
    pub const NAME: &'static str = "*ELEMENT_DISCRETE";
}

impl Keyword for ElementDiscrete {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(Self::NAME, lines);
        self.elements.clear();
        while let Some(line) = cards.next_card() {
            if line.trim().is_empty() {
                continue;
            }
            let mut r = FieldReader::new(line, format);
            let Some((id, part)) = read_id_and_part(Self::NAME, &mut r, line) else {
                continue;
            };
            let nodes = read_nodes(&mut r, 2);
            self.elements.push(DiscreteElement {
                row: ElementRow { id, part, nodes },
                vid: r.int_w(ID_WIDTH).unwrap_or(0),
                s: r.real_w(SPRING_REAL_WIDTH).unwrap_or(1.0),
                pf: r.int_w(ID_WIDTH).unwrap_or(0),
                offset: r.real_w(SPRING_REAL_WIDTH).unwrap_or(0.0),
            });
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(Self::NAME, format);
        for element in &self.elements {
            out.card(|w| {
                w.int_w(element.row.id, ID_WIDTH)
                    .int_w(element.row.part, ID_WIDTH);
                for node in &element.row.nodes {
                    w.int_w(*node, ID_WIDTH);
                }
                w.int_w(element.vid, ID_WIDTH)
                    .real_w(element.s, SPRING_REAL_WIDTH)
                    .int_w(element.pf, ID_WIDTH)
                    .real_w(element.offset, SPRING_REAL_WIDTH);
            })?;
        }
        Ok(out.finish())
    }

    fn as_element_keyword(&self) -> Option<&dyn ElementKeyword> {
        Some(self)
    }

    keyword_boilerplate!(visit_element_discrete);
}

impl ElementKeyword for ElementDiscrete {
    fn shape(&self) -> ElementShape {
        ElementShape::Discrete
    }

    fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn element_at(&self, index: usize) -> Option<ElementData<'_>> {
        self.elements
            .get(index)
            .map(|element| row_data(&element.row, ElementShape::Discrete))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeatbeltElement {
    /// Connectivity N1 N2 followed by the optional N3 N4.
    pub row: ElementRow,
    pub sbrid: i64,
    /// Initial slack length.
    pub slen: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementSeatbelt {
    pub elements: Vec<SeatbeltElement>,
}

impl ElementSeatbelt {
    pub const NAME: &'static str = "*ELEMENT_SEATBELT";
}

impl Keyword for ElementSeatbelt {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(Self::NAME, lines);
        self.elements.clear();
        while let Some(line) = cards.next_card() {
            if line.trim().is_empty() {
                continue;
            }
            let mut r = FieldReader::new(line, format);
            let Some((id, part)) = read_id_and_part(Self::NAME, &mut r, line) else {
                continue;
            };
            let mut nodes = read_nodes(&mut r, 2);
            let sbrid = r.int_w(ID_WIDTH).unwrap_or(0);
            let slen = r.real_w(SPRING_REAL_WIDTH).unwrap_or(0.0);
            nodes.extend(read_nodes(&mut r, 2));
            trim_unused(&mut nodes, 2);
            self.elements.push(SeatbeltElement {
                row: ElementRow { id, part, nodes },
                sbrid,
                slen,
            });
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(Self::NAME, format);
        for element in &self.elements {
            let node = |i: usize| element.row.nodes.get(i).copied().unwrap_or(0);
            out.card(|w| {
                w.int_w(element.row.id, ID_WIDTH)
                    .int_w(element.row.part, ID_WIDTH)
                    .int_w(node(0), ID_WIDTH)
                    .int_w(node(1), ID_WIDTH)
                    .int_w(element.sbrid, ID_WIDTH)
                    .real_w(element.slen, SPRING_REAL_WIDTH);
                if element.row.nodes.len() > 2 {
                    w.int_w(node(2), ID_WIDTH).int_w(node(3), ID_WIDTH);
                }
            })?;
        }
        Ok(out.finish())
    }

    fn as_element_keyword(&self) -> Option<&dyn ElementKeyword> {
        Some(self)
    }

    keyword_boilerplate!(visit_element_seatbelt);
}

impl ElementKeyword for ElementSeatbelt {
    fn shape(&self) -> ElementShape {
        ElementShape::Seatbelt
    }

    fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn element_at(&self, index: usize) -> Option<ElementData<'_>> {
        self.elements
            .get(index)
            .map(|element| row_data(&element.row, ElementShape::Seatbelt))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MassElement {
    pub id: ElementId,
    pub node: NodeId,
    pub mass: f64,
    pub part: PartId,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementMass {
    pub elements: Vec<MassElement>,
}

impl ElementMass {
    pub const NAME: &'static str = "*ELEMENT_MASS";
}

impl Keyword for ElementMass {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(Self::NAME, lines);
        self.elements.clear();
        while let Some(line) = cards.next_card() {
            if line.trim().is_empty() {
                continue;
            }
            let mut r = FieldReader::new(line, format);
            let Some(id) = r.int_w(ID_WIDTH) else {
                warn!("{}: skipping card without element id: {line:?}", Self::NAME);
                continue;
            };
            self.elements.push(MassElement {
                id,
                node: r.int_w(ID_WIDTH).unwrap_or(0),
                mass: r.real_w(SPRING_REAL_WIDTH).unwrap_or(0.0),
                part: r.int_w(ID_WIDTH).unwrap_or(0),
            });
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(Self::NAME, format);
        for element in &self.elements {
            out.card(|w| {
                w.int_w(element.id, ID_WIDTH)
                    .int_w(element.node, ID_WIDTH)
                    .real_w(element.mass, SPRING_REAL_WIDTH)
                    .int_w(element.part, ID_WIDTH);
            })?;
        }
        Ok(out.finish())
    }

    fn as_element_keyword(&self) -> Option<&dyn ElementKeyword> {
        Some(self)
    }

    keyword_boilerplate!(visit_element_mass);
}

impl ElementKeyword for ElementMass {
    fn shape(&self) -> ElementShape {
        ElementShape::Mass
    }

    fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn element_at(&self, index: usize) -> Option<ElementData<'_>> {
        self.elements.get(index).map(|element| ElementData {
            id: element.id,
            part: element.part,
            nodes: slice::from_ref(&element.node),
            shape: ElementShape::Mass,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InertiaElement {
    pub id: ElementId,
    pub node: NodeId,
    pub csid: i64,
    /// IXX IXY IXZ IYY IYZ IZZ.
    pub inertia: [f64; 6],
    pub mass: f64,
}

/// `*ELEMENT_INERTIA`: two cards per element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementInertia {
    pub elements: Vec<InertiaElement>,
}

impl ElementInertia {
    pub const NAME: &'static str = "*ELEMENT_INERTIA";
}

impl Keyword for ElementInertia {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(Self::NAME, lines);
        self.elements.clear();
        while let Some(line) = cards.next_card() {
            if line.trim().is_empty() {
                continue;
            }
            let mut r = FieldReader::new(line, format);
            let Some(id) = r.int_w(ID_WIDTH) else {
                warn!("{}: skipping card without element id: {line:?}", Self::NAME);
                continue;
            };
            let node = r.int_w(ID_WIDTH).unwrap_or(0);
            let csid = r.int_w(ID_WIDTH).unwrap_or(0);

            let mut r = FieldReader::new(cards.require("inertia card")?, format);
            let mut inertia = [0.0; 6];
            for value in inertia.iter_mut() {
                *value = r.real().unwrap_or(0.0);
            }
            let mass = r.real().unwrap_or(0.0);
            self.elements.push(InertiaElement {
                id,
                node,
                csid,
                inertia,
                mass,
            });
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(Self::NAME, format);
        for element in &self.elements {
            out.card(|w| {
                w.int_w(element.id, ID_WIDTH)
                    .int_w(element.node, ID_WIDTH)
                    .int_w(element.csid, ID_WIDTH);
            })?;
            out.card(|w| {
                for value in element.inertia {
                    w.real(value);
                }
                w.real(element.mass);
            })?;
        }
        Ok(out.finish())
    }

    fn as_element_keyword(&self) -> Option<&dyn ElementKeyword> {
        Some(self)
    }

    keyword_boilerplate!(visit_element_inertia);
}

impl ElementKeyword for ElementInertia {
    fn shape(&self) -> ElementShape {
        ElementShape::Inertia
    }

    fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn element_at(&self, index: usize) -> Option<ElementData<'_>> {
        self.elements.get(index).map(|element| ElementData {
            id: element.id,
            part: 0,
            nodes: slice::from_ref(&element.node),
            shape: ElementShape::Inertia,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn shell_keeps_four_nodes_unless_midside_nodes_present() {
        let mut kw = ElementShell::default();
        kw.parse(
            &lines(&[
                "       1       1       1       2       3       4",
                "       2       1       5       6       7",
                "       3       2       1       2       3       4       5       6       7       8",
            ]),
            Format::Standard,
        )
        .unwrap();
        assert_eq!(kw.elements[0].nodes, vec![1, 2, 3, 4]);
        assert_eq!(kw.elements[1].nodes, vec![5, 6, 7, 0]);
        assert_eq!(kw.elements[2].nodes.len(), 8);
    }

    #[test]
    fn solid_reads_both_card_layouts() {
        let mut kw = ElementSolid::default();
        kw.parse(
            &lines(&[
                "       1       1       1       2       3       4       5       6       7       8",
                "       2       1",
                "       9      10      11      12      13      14      15      16      17      18",
            ]),
            Format::Standard,
        )
        .unwrap();
        assert_eq!(kw.elements.len(), 2);
        assert_eq!(kw.elements[0].nodes, (1..=8).collect::<Vec<_>>());
        assert_eq!(kw.elements[1].nodes, (9..=18).collect::<Vec<_>>());

        let written = kw.write(Format::Standard).unwrap();
        assert_eq!(written.len(), 3);
        let mut back = ElementSolid::default();
        back.parse(&written, Format::Standard).unwrap();
        assert_eq!(back, kw);
    }

    #[test]
    fn solid_with_missing_node_card_fails() {
        let mut kw = ElementSolid::default();
        let err = kw
            .parse(&lines(&["       2       1"]), Format::Standard)
            .unwrap_err();
        assert_eq!(err, KeywordError::missing(ElementSolid::NAME, "node card"));
    }

    #[test]
    fn element_view_exposes_part_and_nodes() {
        let kw = ElementMass {
            elements: vec![MassElement {
                id: 5,
                node: 42,
                mass: 0.5,
                part: 3,
            }],
        };
        let data = kw.element_at(0).unwrap();
        assert_eq!(data.nodes, &[42]);
        assert_eq!(data.part, 3);
        assert_eq!(data.shape, ElementShape::Mass);
        assert!(kw.element_at(1).is_none());
    }

    #[test]
    fn inertia_round_trips_in_large_profile() {
        let kw = ElementInertia {
            elements: vec![InertiaElement {
                id: 1,
                node: 7,
                csid: 0,
                inertia: [1.5, 0.0, 0.0, 2.5, 0.0, 3.5],
                mass: 12.0,
            }],
        };
        let written = kw.write(Format::Large).unwrap();
        let mut back = ElementInertia::default();
        back.parse(&written, Format::Large).unwrap();
        assert_eq!(back, kw);
    }
}
