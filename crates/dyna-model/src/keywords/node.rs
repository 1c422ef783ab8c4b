//! `*NODE`: node coordinates and boundary-condition codes.

use dyna_card::{FieldReader, Format};
use log::warn;

use crate::NodeId;
use crate::error::KeywordError;
use crate::keyword::{CardCursor, CardSink, Keyword, keyword_boilerplate};

/// Node ids and constraint codes are 8 characters wide in both profiles.
const NODE_INT_WIDTH: usize = 8;

fn coordinate_width(format: Format) -> usize {
    match format {
        Format::Standard => 16,
        Format::Large => 20,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeEntry {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Translational constraint code.
    pub tc: i64,
    /// Rotational constraint code.
    pub rc: i64,
}

impl NodeEntry {
    pub fn new(id: NodeId, x: f64, y: f64, z: f64) -> Self {
        Self {
            id,
            x,
            y,
            z,
            tc: 0,
            rc: 0,
        }
    }

    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub nodes: Vec<NodeEntry>,
}

impl Node {
    pub const NAME: &'static str = "*NODE";

    pub fn new(nodes: Vec<NodeEntry>) -> Self {
        Self { nodes }
    }

    pub fn find(&self, id: NodeId) -> Option<&NodeEntry> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

impl Keyword for Node {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let width = coordinate_width(format);
        let mut cards = CardCursor::new(Self::NAME, lines);
        self.nodes.clear();

        while let Some(line) = cards.next_card() {
            if line.trim().is_empty() {
                continue;
            }
            let mut r = FieldReader::new(line, format);
            let Some(id) = r.int_w(NODE_INT_WIDTH) else {
                warn!("{}: skipping card without node id: {line:?}", Self::NAME);
                continue;
            };
            let x = r.real_w(width).unwrap_or(0.0);
            let y = r.real_w(width).unwrap_or(0.0);
            let z = r.real_w(width).unwrap_or(0.0);
            let tc = r.int_w(NODE_INT_WIDTH).unwrap_or(0);
            let rc = r.int_w(NODE_INT_WIDTH).unwrap_or(0);
            self.nodes.push(NodeEntry {
                id,
                x,
                y,
                z,
                tc,
                rc,
            });
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let width = coordinate_width(format);
        let mut out = CardSink::new(Self::NAME, format);
        for node in &self.nodes {
            out.card(|w| {
                w.int_w(node.id, NODE_INT_WIDTH)
                    .real_w(node.x, width)
                    .real_w(node.y, width)
                    .real_w(node.z, width)
                    .int_w(node.tc, NODE_INT_WIDTH)
                    .int_w(node.rc, NODE_INT_WIDTH);
            })?;
        }
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_node);
}
