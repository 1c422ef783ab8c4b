//! External surfaces and the `*SET_*` keywords built from them.

use std::collections::{BTreeSet, HashMap};

use dyna_model::keywords::{SegmentEntry, SetNodeList, SetPartList, SetSegment};
use dyna_model::{ElementId, Model, NodeId, PartId, SetId};
use log::{debug, warn};

use crate::element_manager::ElementManager;
use crate::segment::Segment;

#[derive(Debug, Clone, Copy, Default)]
pub struct SetManager;

impl SetManager {
    /// Segments whose node set occurs exactly once in `segments`, in input
    /// order. A face shared by two elements is interior and dropped.
    pub fn external_segments(segments: &[Segment]) -> Vec<Segment> {
        let mut occurrences: HashMap<Vec<NodeId>, usize> = HashMap::new();
        for segment in segments {
            *occurrences.entry(segment.canonical_key()).or_default() += 1;
        }
        segments
            .iter()
            .filter(|segment| occurrences.get(&segment.canonical_key()) == Some(&1))
            .cloned()
            .collect()
    }

    /// Outer faces of the elements of `parts`. An empty `parts` slice means
    /// every part; a part listed twice counts once.
    pub fn external_surface(
        model: &Model,
        elements: &ElementManager,
        parts: &[PartId],
    ) -> Vec<Segment> {
        Self::surface_of(model, elements, parts, |_| true)
    }

    /// As [`SetManager::external_surface`], counting only elements alive at
    /// time `t`.
    pub fn external_surface_at(
        model: &Model,
        elements: &ElementManager,
        parts: &[PartId],
        t: f64,
    ) -> Vec<Segment> {
        Self::surface_of(model, elements, parts, |eid| elements.is_alive_at(eid, t))
    }

    fn surface_of(
        model: &Model,
        elements: &ElementManager,
        parts: &[PartId],
        include: impl Fn(ElementId) -> bool,
    ) -> Vec<Segment> {
        let parts: Vec<PartId> = if parts.is_empty() {
            elements.parts().collect()
        } else {
            let mut seen = BTreeSet::new();
            parts.iter().copied().filter(|&part| seen.insert(part)).collect()
        };

        let segments: Vec<Segment> = parts
            .iter()
            .flat_map(|&part| elements.elements_of_part(part))
            .filter(|&&eid| include(eid))
            .flat_map(|&eid| elements.segments(model, eid))
            .collect();
        let external = Self::external_segments(&segments);
        debug!(
            "{} of {} segments are external for parts {:?}",
            external.len(),
            segments.len(),
            parts
        );
        external
    }

    /// Adds a `*SET_SEGMENT` holding `segments` and returns its position.
    /// Faces with other than three or four nodes are skipped.
    pub fn create_segment_set(model: &mut Model, sid: SetId, segments: &[Segment]) -> usize {
        let entries = segments
            .iter()
            .filter_map(|segment| {
                let entry = SegmentEntry::from_nodes(&segment.nodes);
                if entry.is_none() {
                    warn!(
                        "skipping {}-node face {} of element {}",
                        segment.nodes.len(),
                        segment.face,
                        segment.element
                    );
                }
                entry
            })
            .collect();
        model.add_keyword(Box::new(SetSegment::new(sid, entries)))
    }

    pub fn create_part_set(model: &mut Model, sid: SetId, parts: &[PartId]) -> usize {
        model.add_keyword(Box::new(SetPartList::new(sid, parts.to_vec())))
    }

    pub fn create_node_set(model: &mut Model, sid: SetId, nodes: &[NodeId]) -> usize {
        model.add_keyword(Box::new(SetNodeList::new(sid, nodes.to_vec())))
    }

    /// One above the highest set id in use across node, part and segment
    /// sets.
    pub fn next_free_set_id(model: &Model) -> SetId {
        let node_sets = model.keywords_of_type::<SetNodeList>().into_iter().map(SetNodeList::sid);
        let part_sets = model.keywords_of_type::<SetPartList>().into_iter().map(SetPartList::sid);
        let segment_sets = model.keywords_of_type::<SetSegment>().into_iter().map(SetSegment::sid);
        node_sets
            .chain(part_sets)
            .chain(segment_sets)
            .max()
            .map_or(1, |sid| sid.max(0) + 1)
    }

    /// Distinct nodes of `segments`, ascending.
    pub fn nodes_of_segments(segments: &[Segment]) -> Vec<NodeId> {
        segments
            .iter()
            .flat_map(|segment| segment.nodes.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_faces_are_dropped_in_order() {
        let segments = vec![
            Segment::new(1, 0, vec![1, 2, 3, 4]),
            Segment::new(1, 1, vec![5, 6, 7, 8]),
            Segment::new(2, 0, vec![8, 7, 6, 5]),
            Segment::new(2, 1, vec![9, 10, 11]),
        ];
        let external = SetManager::external_segments(&segments);
        assert_eq!(external, vec![segments[0].clone(), segments[3].clone()]);
    }

    #[test]
    fn creates_sets_with_free_ids() {
        let mut model = Model::new();
        assert_eq!(SetManager::next_free_set_id(&model), 1);

        SetManager::create_part_set(&mut model, 4, &[1, 2]);
        assert_eq!(SetManager::next_free_set_id(&model), 5);

        let segments = vec![
            Segment::new(1, 0, vec![1, 2, 3]),
            Segment::new(1, 1, vec![1, 2]),
        ];
        let position = SetManager::create_segment_set(&mut model, 5, &segments);
        let set = model.keyword(position).unwrap().as_any().downcast_ref::<SetSegment>().unwrap();
        assert_eq!(set.segments.len(), 1);
        assert_eq!(set.segments[0].nodes, [1, 2, 3, 3]);

        let nodes = SetManager::nodes_of_segments(&segments);
        assert_eq!(nodes, vec![1, 2, 3]);
        SetManager::create_node_set(&mut model, 9, &nodes);
        assert_eq!(SetManager::next_free_set_id(&model), 10);
        assert_eq!(model.first_of_type::<SetNodeList>().unwrap().nodes, vec![1, 2, 3]);
    }
}
