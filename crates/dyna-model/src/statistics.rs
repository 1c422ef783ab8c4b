//! Deck summary gathered by a single visitor pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::keyword::{ElementKeyword, ElementShape, Keyword};
use crate::keywords::{
    Contact, ControlTermination, DefineCurve, ElementActivation, ElementBeam, ElementDiscrete,
    ElementInertia, ElementMass, ElementSeatbelt, ElementShell, ElementSolid, Include,
    LoadNodeSet, LoadSegmentSet, MatElastic, MatPiecewiseLinearPlasticity, MatRigid,
    MaterialKeyword, Node, Part, RawKeyword, SectionBeam, SectionShell, SectionSolid,
    SetNodeList, SetPartList, SetSegment, Title,
};
use crate::model::Model;
use crate::visitor::KeywordVisitor;

/// Counts of the entities in a model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelStatistics {
    pub keywords: usize,
    pub nodes: usize,
    pub elements: usize,
    pub elements_by_shape: BTreeMap<ElementShape, usize>,
    pub parts: usize,
    pub sections: usize,
    /// Keyed by descriptive subtype, e.g. `ELASTIC`.
    pub materials_by_subtype: BTreeMap<String, usize>,
    pub sets: usize,
    pub contacts: usize,
    pub loads: usize,
    pub curves: usize,
    pub activations: usize,
    pub includes: Vec<String>,
    /// Blocks kept verbatim, keyed by name.
    pub unknown_keywords: BTreeMap<String, usize>,
}

impl ModelStatistics {
    pub fn from_model(model: &Model) -> Self {
        let mut visitor = StatisticsVisitor::default();
        model.accept(&mut visitor);
        visitor.into_statistics()
    }

    pub fn materials(&self) -> usize {
        self.materials_by_subtype.values().sum()
    }

    /// Human-readable report, one `key: value` per line.
    pub fn format(&self) -> String {
        let mut lines = vec![
            format!("keywords: {}", self.keywords),
            format!("nodes: {}", self.nodes),
            format!("elements: {}", self.elements),
        ];
        for (shape, count) in &self.elements_by_shape {
            lines.push(format!("  {shape}: {count}"));
        }
        lines.push(format!("parts: {}", self.parts));
        lines.push(format!("sections: {}", self.sections));
        lines.push(format!("materials: {}", self.materials()));
        for (subtype, count) in &self.materials_by_subtype {
            lines.push(format!("  {subtype}: {count}"));
        }
        lines.push(format!("sets: {}", self.sets));
        lines.push(format!("contacts: {}", self.contacts));
        lines.push(format!("loads: {}", self.loads));
        lines.push(format!("curves: {}", self.curves));
        if self.activations > 0 {
            lines.push(format!("activation_entries: {}", self.activations));
        }
        if !self.includes.is_empty() {
            lines.push(format!("include_files: {}", self.includes.join(", ")));
        }
        if !self.unknown_keywords.is_empty() {
            let total: usize = self.unknown_keywords.values().sum();
            lines.push(format!("unknown_keywords: {total}"));
            for (name, count) in &self.unknown_keywords {
                lines.push(format!("  {name}: {count}"));
            }
        }
        lines.join("\n")
    }
}

#[derive(Debug, Default)]
pub struct StatisticsVisitor {
    stats: ModelStatistics,
}

impl StatisticsVisitor {
    pub fn statistics(&self) -> &ModelStatistics {
        &self.stats
    }

    pub fn into_statistics(self) -> ModelStatistics {
        self.stats
    }

    fn elements(&mut self, keyword: &dyn ElementKeyword) {
        self.stats.keywords += 1;
        let count = keyword.element_count();
        self.stats.elements += count;
        *self
            .stats
            .elements_by_shape
            .entry(keyword.shape())
            .or_default() += count;
    }

    fn material(&mut self, keyword: &dyn MaterialKeyword) {
        self.stats.keywords += 1;
        *self
            .stats
            .materials_by_subtype
            .entry(keyword.subtype().to_string())
            .or_default() += 1;
    }

    fn other(&mut self) {
        self.stats.keywords += 1;
    }
}

impl KeywordVisitor for StatisticsVisitor {
    fn visit_title(&mut self, _keyword: &Title) {
        self.other();
    }

    fn visit_include(&mut self, keyword: &Include) {
        self.other();
        self.stats.includes.extend(keyword.files.iter().cloned());
    }

    fn visit_control_termination(&mut self, _keyword: &ControlTermination) {
        self.other();
    }

    fn visit_node(&mut self, keyword: &Node) {
        self.other();
        self.stats.nodes += keyword.nodes.len();
    }

    fn visit_part(&mut self, keyword: &Part) {
        self.other();
        self.stats.parts += keyword.parts.len();
    }

    fn visit_section_shell(&mut self, _keyword: &SectionShell) {
        self.other();
        self.stats.sections += 1;
    }

    fn visit_section_solid(&mut self, _keyword: &SectionSolid) {
        self.other();
        self.stats.sections += 1;
    }

    fn visit_section_beam(&mut self, _keyword: &SectionBeam) {
        self.other();
        self.stats.sections += 1;
    }

    fn visit_mat_elastic(&mut self, keyword: &MatElastic) {
        self.material(keyword);
    }

    fn visit_mat_rigid(&mut self, keyword: &MatRigid) {
        self.material(keyword);
    }

    fn visit_mat_piecewise_linear_plasticity(&mut self, keyword: &MatPiecewiseLinearPlasticity) {
        self.material(keyword);
    }

    fn visit_element_shell(&mut self, keyword: &ElementShell) {
        self.elements(keyword);
    }

    fn visit_element_solid(&mut self, keyword: &ElementSolid) {
        self.elements(keyword);
    }

    fn visit_element_beam(&mut self, keyword: &ElementBeam) {
        self.elements(keyword);
    }

    fn visit_element_discrete(&mut self, keyword: &ElementDiscrete) {
        self.elements(keyword);
    }

    fn visit_element_seatbelt(&mut self, keyword: &ElementSeatbelt) {
        self.elements(keyword);
    }

    fn visit_element_mass(&mut self, keyword: &ElementMass) {
        self.elements(keyword);
    }

    fn visit_element_inertia(&mut self, keyword: &ElementInertia) {
        self.elements(keyword);
    }

    fn visit_element_activation(&mut self, keyword: &ElementActivation) {
        self.other();
        self.stats.activations += keyword.entries.len();
    }

    fn visit_set_node_list(&mut self, _keyword: &SetNodeList) {
        self.other();
        self.stats.sets += 1;
    }

    fn visit_set_part_list(&mut self, _keyword: &SetPartList) {
        self.other();
        self.stats.sets += 1;
    }

    fn visit_set_segment(&mut self, _keyword: &SetSegment) {
        self.other();
        self.stats.sets += 1;
    }

    fn visit_contact(&mut self, _keyword: &Contact) {
        self.other();
        self.stats.contacts += 1;
    }

    fn visit_load_segment_set(&mut self, keyword: &LoadSegmentSet) {
        self.other();
        self.stats.loads += keyword.loads.len();
    }

    fn visit_load_node_set(&mut self, keyword: &LoadNodeSet) {
        self.other();
        self.stats.loads += keyword.loads.len();
    }

    fn visit_define_curve(&mut self, _keyword: &DefineCurve) {
        self.other();
        self.stats.curves += 1;
    }

    fn visit_raw(&mut self, keyword: &RawKeyword) {
        self.other();
        *self
            .stats
            .unknown_keywords
            .entry(keyword.name().to_string())
            .or_default() += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::{ElementRow, NodeEntry, PartEntry};

    fn sample_model() -> Model {
        let mut model = Model::new();
        model.add_keyword(Box::new(Node::new(
            (1..=8)
                .map(|id| NodeEntry::new(id, id as f64, 0.0, 0.0))
                .collect(),
        )));
        model.add_keyword(Box::new(Part::new(vec![
            PartEntry::new(1, 1, 1),
            PartEntry::new(2, 2, 1),
        ])));
        model.add_keyword(Box::new(MatElastic::new(1, 7.85e-9, 210_000.0, 0.3)));
        model.add_keyword(Box::new(MatElastic::new(2, 2.7e-9, 70_000.0, 0.33)));
        model.add_keyword(Box::new(ElementSolid::new(vec![ElementRow::new(
            1,
            1,
            (1..=8).collect(),
        )])));
        model.add_keyword(Box::new(ElementShell::new(vec![
            ElementRow::new(10, 2, vec![1, 2, 3, 4]),
            ElementRow::new(11, 2, vec![5, 6, 7, 8]),
        ])));
        model.add_keyword(Box::new(RawKeyword::new("*BOUNDARY_SPC_NODE", Vec::new())));
        model
    }

    #[test]
    fn counts_entities_by_kind() {
        let stats = ModelStatistics::from_model(&sample_model());
        assert_eq!(stats.keywords, 7);
        assert_eq!(stats.nodes, 8);
        assert_eq!(stats.elements, 3);
        assert_eq!(stats.elements_by_shape.get(&ElementShape::Shell), Some(&2));
        assert_eq!(stats.elements_by_shape.get(&ElementShape::Solid), Some(&1));
        assert_eq!(stats.parts, 2);
        assert_eq!(stats.materials(), 2);
        assert_eq!(stats.materials_by_subtype.get("ELASTIC"), Some(&2));
        assert_eq!(stats.unknown_keywords.get("*BOUNDARY_SPC_NODE"), Some(&1));
    }

    #[test]
    fn serializes_shapes_as_snake_case_keys() {
        let stats = ModelStatistics::from_model(&sample_model());
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["elements_by_shape"]["shell"], 2);
        assert_eq!(json["nodes"], 8);
    }

    #[test]
    fn report_lists_unknown_blocks() {
        let text = ModelStatistics::from_model(&sample_model()).format();
        assert!(text.contains("elements: 3"));
        assert!(text.contains("  *BOUNDARY_SPC_NODE: 1"));
    }
}
