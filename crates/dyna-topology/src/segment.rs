//! Element faces as node lists.
//!
//! Local face tables use 0-based indices into the element connectivity and
//! list nodes counter-clockwise when viewed from outside the element.

use dyna_model::{ElementId, ElementShape, NodeId};
use serde::{Deserialize, Serialize};

const HEXA_FACES: [&[usize]; 6] = [
    &[0, 3, 2, 1],
    &[4, 5, 6, 7],
    &[0, 1, 5, 4],
    &[1, 2, 6, 5],
    &[2, 3, 7, 6],
    &[3, 0, 4, 7],
];

const PENTA_FACES: [&[usize]; 5] = [
    &[0, 2, 1],
    &[3, 4, 5],
    &[0, 1, 4, 3],
    &[1, 2, 5, 4],
    &[2, 0, 3, 5],
];

const TETRA_FACES: [&[usize]; 4] = [&[0, 2, 1], &[0, 1, 3], &[1, 2, 3], &[2, 0, 3]];

/// One face of an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub element: ElementId,
    /// Local face number within the element.
    pub face: usize,
    pub nodes: Vec<NodeId>,
}

impl Segment {
    pub fn new(element: ElementId, face: usize, nodes: Vec<NodeId>) -> Self {
        Self {
            element,
            face,
            nodes,
        }
    }

    /// Sorted node list. Two faces with the same key cover the same nodes
    /// regardless of orientation or starting node.
    pub fn canonical_key(&self) -> Vec<NodeId> {
        let mut key = self.nodes.clone();
        key.sort_unstable();
        key
    }

    pub fn is_triangle(&self) -> bool {
        self.nodes.len() == 3
    }
}

/// Faces of one element given its shape and connectivity.
///
/// Shells give a single segment holding their whole node list. Solids give
/// the faces of a hexahedron, pentahedron or tetrahedron after trailing zero
/// nodes are dropped. Repeated nodes are removed within each face
/// and faces left with fewer than three nodes are dropped. Every other shape,
/// and solids with an unsupported node count, give nothing.
pub fn element_segments(element: ElementId, shape: ElementShape, nodes: &[NodeId]) -> Vec<Segment> {
    let nodes = strip_trailing_zeros(nodes);
    match shape {
        ElementShape::Shell => shell_segment(element, nodes).into_iter().collect(),
        ElementShape::Solid => {
            let nodes = collapse_tetrahedron(nodes);
            let faces: &[&[usize]] = match nodes.len() {
                8 => &HEXA_FACES,
                6 => &PENTA_FACES,
                4 => &TETRA_FACES,
                _ => return Vec::new(),
            };
            faces
                .iter()
                .enumerate()
                .filter_map(|(face, local)| {
                    let face_nodes = distinct_nodes(local.iter().map(|&i| nodes[i]));
                    (face_nodes.len() >= 3).then(|| Segment::new(element, face, face_nodes))
                })
                .collect()
        }
        _ => Vec::new(),
    }
}

fn strip_trailing_zeros(nodes: &[NodeId]) -> &[NodeId] {
    let used = nodes.iter().rposition(|&n| n != 0).map_or(0, |last| last + 1);
    &nodes[..used]
}

fn shell_segment(element: ElementId, nodes: &[NodeId]) -> Option<Segment> {
    let nodes = match nodes {
        &[n1, n2, n3, n4] if n4 == n3 => vec![n1, n2, n3],
        [_, _, _, ..] => nodes.to_vec(),
        _ => return None,
    };
    Some(Segment::new(element, 0, nodes))
}

/// LS-DYNA writes a tetrahedron as `n1 n2 n3 n4 n4 n4 n4 n4`. Its faces are
/// not recoverable from the hexahedron table so it is rebuilt explicitly.
/// Degenerate pentahedra (`n1 n2 n3 n3 n5 n6 n7 n7` or
/// `n1 n2 n3 n4 n5 n5 n6 n6`) keep all eight nodes.
fn collapse_tetrahedron(nodes: &[NodeId]) -> Vec<NodeId> {
    match nodes {
        &[n1, n2, n3, n4, n5, n6, n7, n8] if n4 == n5 && n5 == n6 && n6 == n7 && n7 == n8 => {
            vec![n1, n2, n3, n4]
        }
        _ => nodes.to_vec(),
    }
}

/// Face nodes in order with repeats removed.
fn distinct_nodes(nodes: impl Iterator<Item = NodeId>) -> Vec<NodeId> {
    let mut out: Vec<NodeId> = Vec::with_capacity(4);
    for node in nodes {
        if !out.contains(&node) {
            out.push(node);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hexahedron_has_six_quads() {
        let segments = element_segments(1, ElementShape::Solid, &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(segments.len(), 6);
        assert!(segments.iter().all(|s| s.nodes.len() == 4));
        assert_eq!(segments[0].nodes, vec![1, 4, 3, 2]);
        assert_eq!(segments[5].nodes, vec![4, 1, 5, 8]);
        assert_eq!(segments[5].face, 5);
    }

    #[test]
    fn tetrahedron_has_four_triangles() {
        let segments = element_segments(7, ElementShape::Solid, &[10, 20, 30, 40]);
        assert_eq!(segments.len(), 4);
        assert!(segments.iter().all(Segment::is_triangle));
        assert!(segments.iter().all(|s| s.element == 7));
    }

    #[test]
    fn pentahedron_has_two_triangles_and_three_quads() {
        let segments = element_segments(1, ElementShape::Solid, &[1, 2, 3, 4, 5, 6]);
        let triangles = segments.iter().filter(|s| s.is_triangle()).count();
        assert_eq!((segments.len(), triangles), (5, 2));
    }

    #[test]
    fn degenerate_hexahedra_collapse() {
        let tet = element_segments(1, ElementShape::Solid, &[1, 2, 3, 4, 4, 4, 4, 4]);
        assert_eq!(tet.len(), 4);

        let wedge = element_segments(1, ElementShape::Solid, &[1, 2, 3, 3, 5, 6, 7, 7]);
        assert_eq!(wedge.len(), 5);
        assert_eq!(wedge[1].nodes, vec![5, 6, 7]);
    }

    #[test]
    fn wedge_with_paired_top_nodes() {
        let wedge = element_segments(1, ElementShape::Solid, &[1, 2, 3, 4, 5, 5, 6, 6]);
        let faces: Vec<Vec<NodeId>> = wedge.iter().map(|s| s.nodes.clone()).collect();
        assert_eq!(
            faces,
            vec![
                vec![1, 4, 3, 2],
                vec![1, 2, 5],
                vec![2, 3, 6, 5],
                vec![3, 4, 6],
                vec![4, 1, 5, 6],
            ]
        );
        assert!(wedge.iter().all(|s| s.nodes.len() >= 3));
        assert_eq!(wedge[1].face, 2);
    }

    #[test]
    fn trailing_zeros_are_dropped() {
        let segments = element_segments(1, ElementShape::Solid, &[1, 2, 3, 4, 0, 0, 0, 0]);
        assert_eq!(segments.len(), 4);

        let shell = element_segments(2, ElementShape::Shell, &[1, 2, 3, 0]);
        assert_eq!(shell[0].nodes, vec![1, 2, 3]);
    }

    #[test]
    fn shells_give_one_segment() {
        let quad = element_segments(1, ElementShape::Shell, &[1, 2, 3, 4]);
        assert_eq!(quad, vec![Segment::new(1, 0, vec![1, 2, 3, 4])]);

        let tria = element_segments(1, ElementShape::Shell, &[1, 2, 3, 3]);
        assert_eq!(tria[0].nodes, vec![1, 2, 3]);
    }

    #[test]
    fn higher_order_shells_keep_all_nodes() {
        let quad8 = element_segments(4, ElementShape::Shell, &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(quad8, vec![Segment::new(4, 0, vec![1, 2, 3, 4, 5, 6, 7, 8])]);

        let tria6 = element_segments(5, ElementShape::Shell, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(tria6.len(), 1);
        assert_eq!(tria6[0].nodes.len(), 6);
    }

    #[test]
    fn segment_serializes_to_json() {
        let segment = Segment::new(3, 1, vec![5, 6, 7]);
        let json = serde_json::to_value(&segment).unwrap();
        assert_eq!(json["element"], 3);
        assert_eq!(json["nodes"], serde_json::json!([5, 6, 7]));
        let back: Segment = serde_json::from_value(json).unwrap();
        assert_eq!(back, segment);
    }

    #[test]
    fn other_shapes_and_counts_give_nothing() {
        assert!(element_segments(1, ElementShape::Beam, &[1, 2]).is_empty());
        assert!(element_segments(1, ElementShape::Mass, &[1]).is_empty());
        assert!(element_segments(1, ElementShape::Solid, &[1, 2, 3, 4, 5]).is_empty());
        assert!(element_segments(1, ElementShape::Shell, &[1, 2]).is_empty());
    }

    #[test]
    fn canonical_key_ignores_orientation() {
        let a = Segment::new(1, 0, vec![4, 3, 2, 1]);
        let b = Segment::new(2, 3, vec![2, 1, 4, 3]);
        assert_eq!(a.canonical_key(), b.canonical_key());
    }
}
