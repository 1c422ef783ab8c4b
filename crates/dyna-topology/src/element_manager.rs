//! Element index over a [`Model`].
//!
//! The index stores positions, not references, so it never borrows the model.
//! Every query takes the model again and re-resolves the stored handle; when
//! the model changed since [`ElementManager::build_index`] and the handle no
//! longer points at the same id, the query gives `None`.

use std::collections::{BTreeMap, HashMap};

use dyna_model::keywords::{ActivationKind, ElementActivation, Node, NodeEntry};
use dyna_model::{ElementData, ElementId, ElementShape, Model, NodeId, PartId};
use log::{debug, warn};

use crate::segment::{Segment, element_segments};

/// Location of one entry: keyword position in the model and entry index
/// inside that keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryHandle {
    pub keyword: usize,
    pub index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ElementManager {
    elements: HashMap<ElementId, EntryHandle>,
    parts: HashMap<ElementId, PartId>,
    shapes: HashMap<ElementId, ElementShape>,
    by_shape: BTreeMap<ElementShape, Vec<ElementId>>,
    by_part: BTreeMap<PartId, Vec<ElementId>>,
    birth: HashMap<ElementId, f64>,
    death: HashMap<ElementId, f64>,
    nodes: HashMap<NodeId, EntryHandle>,
}

impl ElementManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a manager indexed over `model`.
    pub fn from_model(model: &Model) -> Self {
        let mut manager = Self::new();
        manager.build_index(model);
        manager
    }

    /// Rebuilds every index from scratch. Call again after editing the model.
    ///
    /// When an element id appears twice the first occurrence is indexed and
    /// the repeat is logged.
    pub fn build_index(&mut self, model: &Model) {
        self.clear();

        for (position, keyword) in model.iter().enumerate() {
            if let Some(elements) = keyword.as_element_keyword() {
                for index in 0..elements.element_count() {
                    let Some(data) = elements.element_at(index) else {
                        continue;
                    };
                    self.index_element(position, index, data);
                }
            } else if let Some(node) = keyword.as_any().downcast_ref::<Node>() {
                for (index, entry) in node.nodes.iter().enumerate() {
                    self.nodes.entry(entry.id).or_insert(EntryHandle {
                        keyword: position,
                        index,
                    });
                }
            } else if let Some(activation) = keyword.as_any().downcast_ref::<ElementActivation>() {
                let times = match activation.kind {
                    ActivationKind::Birth => &mut self.birth,
                    ActivationKind::Death => &mut self.death,
                };
                for entry in &activation.entries {
                    times.insert(entry.element, entry.time);
                }
            }
        }

        debug!(
            "indexed {} elements, {} nodes, {} birth and {} death times",
            self.elements.len(),
            self.nodes.len(),
            self.birth.len(),
            self.death.len()
        );
    }

    fn index_element(&mut self, keyword: usize, index: usize, data: ElementData<'_>) {
        if self.elements.contains_key(&data.id) {
            warn!("element id {} is defined more than once; keeping the first", data.id);
            return;
        }
        self.elements.insert(data.id, EntryHandle { keyword, index });
        self.parts.insert(data.id, data.part);
        self.shapes.insert(data.id, data.shape);
        self.by_shape.entry(data.shape).or_default().push(data.id);
        self.by_part.entry(data.part).or_default().push(data.id);
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.parts.clear();
        self.shapes.clear();
        self.by_shape.clear();
        self.by_part.clear();
        self.birth.clear();
        self.death.clear();
        self.nodes.clear();
    }

    pub fn handle(&self, element: ElementId) -> Option<EntryHandle> {
        self.elements.get(&element).copied()
    }

    /// Current data of `element` in `model`, or `None` when the element is
    /// unknown or its handle went stale.
    pub fn element<'m>(&self, model: &'m Model, element: ElementId) -> Option<ElementData<'m>> {
        let handle = self.elements.get(&element)?;
        let data = model
            .keyword(handle.keyword)?
            .as_element_keyword()?
            .element_at(handle.index)?;
        (data.id == element).then_some(data)
    }

    pub fn part_of(&self, element: ElementId) -> Option<PartId> {
        self.parts.get(&element).copied()
    }

    pub fn shape_of(&self, element: ElementId) -> Option<ElementShape> {
        self.shapes.get(&element).copied()
    }

    /// Ids of one shape in model order.
    pub fn elements_of_shape(&self, shape: ElementShape) -> &[ElementId] {
        self.by_shape.get(&shape).map(Vec::as_slice).unwrap_or_default()
    }

    /// Ids of one part in model order.
    pub fn elements_of_part(&self, part: PartId) -> &[ElementId] {
        self.by_part.get(&part).map(Vec::as_slice).unwrap_or_default()
    }

    /// Parts that own at least one element, ascending.
    pub fn parts(&self) -> impl Iterator<Item = PartId> + '_ {
        self.by_part.keys().copied()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn birth_time(&self, element: ElementId) -> Option<f64> {
        self.birth.get(&element).copied()
    }

    pub fn death_time(&self, element: ElementId) -> Option<f64> {
        self.death.get(&element).copied()
    }

    /// Whether `element` is active at time `t`: born at or before `t` and
    /// not yet dead. Elements without times are always alive.
    pub fn is_alive_at(&self, element: ElementId, t: f64) -> bool {
        let born = self.birth_time(element).is_none_or(|birth| t >= birth);
        let dead = self.death_time(element).is_some_and(|death| t >= death);
        born && !dead
    }

    pub fn node<'m>(&self, model: &'m Model, node: NodeId) -> Option<&'m NodeEntry> {
        let handle = self.nodes.get(&node)?;
        let entry = model
            .keyword(handle.keyword)?
            .as_any()
            .downcast_ref::<Node>()?
            .nodes
            .get(handle.index)?;
        (entry.id == node).then_some(entry)
    }

    pub fn node_coordinates(&self, model: &Model, node: NodeId) -> Option<[f64; 3]> {
        self.node(model, node).map(NodeEntry::coords)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Faces of `element`. Unknown elements and shapes without faces give
    /// nothing.
    pub fn segments(&self, model: &Model, element: ElementId) -> Vec<Segment> {
        self.element(model, element)
            .map(|data| element_segments(data.id, data.shape, data.nodes))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyna_model::keywords::{
        ActivationTarget, ElementBeam, ElementRow, ElementShell, ElementSolid,
    };

    fn sample() -> Model {
        let mut model = Model::new();
        model.add_keyword(Box::new(Node::new(vec![
            NodeEntry::new(1, 0.0, 0.0, 0.0),
            NodeEntry::new(2, 1.0, 0.0, 0.0),
        ])));
        model.add_keyword(Box::new(ElementShell {
            elements: vec![
                ElementRow::new(10, 1, vec![1, 2, 3, 4]),
                ElementRow::new(11, 2, vec![2, 5, 6, 3]),
            ],
        }));
        model.add_keyword(Box::new(ElementSolid {
            elements: vec![ElementRow::new(20, 1, vec![1, 2, 3, 4, 5, 6, 7, 8])],
        }));
        model
    }

    #[test]
    fn indexes_shapes_and_parts() {
        let model = sample();
        let manager = ElementManager::from_model(&model);
        assert_eq!(manager.element_count(), 3);
        assert_eq!(manager.part_of(11), Some(2));
        assert_eq!(manager.shape_of(20), Some(ElementShape::Solid));
        assert_eq!(manager.elements_of_shape(ElementShape::Shell), &[10, 11]);
        assert_eq!(manager.elements_of_part(1), &[10, 20]);
        assert!(manager.elements_of_part(9).is_empty());
        assert_eq!(manager.parts().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(manager.element(&model, 20).unwrap().nodes.len(), 8);
        assert_eq!(manager.segments(&model, 20).len(), 6);
        assert!(manager.segments(&model, 99).is_empty());
    }

    #[test]
    fn first_duplicate_id_wins() {
        let mut model = sample();
        model.add_keyword(Box::new(ElementBeam::default()));
        model.add_keyword(Box::new(ElementShell {
            elements: vec![ElementRow::new(10, 7, vec![1, 2, 3])],
        }));
        let manager = ElementManager::from_model(&model);
        assert_eq!(manager.part_of(10), Some(1));
        assert_eq!(manager.element_count(), 3);
    }

    #[test]
    fn later_activation_entries_win() {
        let mut model = sample();
        model.add_keyword(Box::new(
            ElementActivation::birth(ActivationTarget::Shell)
                .with_entry(10, 1.0)
                .with_entry(10, 2.0),
        ));
        model.add_keyword(Box::new(
            ElementActivation::death(ActivationTarget::Shell).with_entry(10, 5.0),
        ));
        let manager = ElementManager::from_model(&model);
        assert_eq!(manager.birth_time(10), Some(2.0));
        assert!(!manager.is_alive_at(10, 1.5));
        assert!(manager.is_alive_at(10, 2.0));
        assert!(!manager.is_alive_at(10, 5.0));
        assert!(manager.is_alive_at(11, 0.0));
    }

    #[test]
    fn resolves_node_coordinates() {
        let model = sample();
        let manager = ElementManager::from_model(&model);
        assert_eq!(manager.node_count(), 2);
        assert_eq!(manager.node_coordinates(&model, 2), Some([1.0, 0.0, 0.0]));
        assert_eq!(manager.node_coordinates(&model, 3), None);
    }

    #[test]
    fn stale_handles_resolve_to_none() {
        let mut model = sample();
        let manager = ElementManager::from_model(&model);

        let shells = model.keywords_of_type_mut::<ElementShell>();
        shells.into_iter().next().unwrap().elements.remove(0);
        assert!(manager.element(&model, 10).is_none());
        // Entry 1 no longer exists.
        assert!(manager.element(&model, 11).is_none());

        model.remove_keyword(0);
        assert!(manager.node_coordinates(&model, 1).is_none());
        assert!(manager.element(&model, 20).is_none());

        let mut manager = manager;
        manager.build_index(&model);
        assert_eq!(manager.element(&model, 11).unwrap().part, 2);
        assert_eq!(model.keyword(0).unwrap().name(), "*ELEMENT_SHELL");
    }
}
