//! Advisory consistency checks over a model.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::keyword::ElementKeyword;
use crate::keywords::{
    DefineCurve, ElementBeam, ElementDiscrete, ElementInertia, ElementMass, ElementSeatbelt,
    ElementShell, ElementSolid, MatElastic, MatPiecewiseLinearPlasticity, MatRigid,
    MaterialKeyword, Node, Part, SectionBeam, SectionShell, SectionSolid, SetNodeList,
    SetPartList, SetSegment,
};
use crate::model::Model;
use crate::visitor::KeywordVisitor;
use crate::{MaterialId, PartId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    pub severity: Severity,
    pub message: String,
}

impl Display for ValidationMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{label}: {}", self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub messages: Vec<ValidationMessage>,
}

impl ValidationReport {
    pub fn for_model(model: &Model) -> Self {
        let mut visitor = ValidationVisitor::default();
        model.accept(&mut visitor);
        visitor.finish()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.messages
            .iter()
            .filter(|m| m.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.messages
            .iter()
            .filter(|m| m.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.messages.is_empty()
    }

    fn push(&mut self, severity: Severity, message: String) {
        self.messages.push(ValidationMessage { severity, message });
    }
}

/// Id space spread over several blocks of one keyword (`*NODE`, `*PART`,
/// the element keywords). Repeats inside one block are errors; repeats
/// across blocks are warnings.
#[derive(Debug, Default)]
struct BlockIds {
    seen: HashSet<i64>,
    cross_block: BTreeSet<i64>,
}

impl BlockIds {
    fn record(
        &mut self,
        what: &str,
        ids: impl IntoIterator<Item = i64>,
        report: &mut ValidationReport,
    ) {
        let mut in_block = HashSet::new();
        let mut duplicates = BTreeSet::new();
        for id in ids {
            if !in_block.insert(id) {
                duplicates.insert(id);
            } else if self.seen.contains(&id) {
                self.cross_block.insert(id);
            }
        }
        for id in duplicates {
            report.push(Severity::Error, format!("duplicate {what} id {id}"));
        }
        self.seen.extend(in_block);
    }

    fn report_cross_block(&self, what: &str, report: &mut ValidationReport) {
        for id in &self.cross_block {
            report.push(
                Severity::Warning,
                format!("{what} id {id} is defined in more than one block"),
            );
        }
    }
}

/// Id space where every keyword defines one id (materials, sections, sets,
/// curves).
#[derive(Debug, Default)]
struct SingleIds {
    seen: HashSet<i64>,
}

impl SingleIds {
    fn record(&mut self, what: &str, id: i64, report: &mut ValidationReport) {
        if !self.seen.insert(id) {
            report.push(Severity::Error, format!("duplicate {what} id {id}"));
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationVisitor {
    report: ValidationReport,
    nodes: BlockIds,
    elements: BlockIds,
    parts: BlockIds,
    materials: SingleIds,
    sections: SingleIds,
    sets: SingleIds,
    curves: SingleIds,
    defined_parts: BTreeSet<PartId>,
    defined_materials: BTreeSet<MaterialId>,
    /// Material referenced by each part.
    part_materials: BTreeMap<PartId, MaterialId>,
    /// Element count per referenced part.
    element_parts: BTreeMap<PartId, usize>,
}

impl ValidationVisitor {
    /// Runs the cross-keyword checks and returns every finding.
    pub fn finish(mut self) -> ValidationReport {
        self.nodes.report_cross_block("node", &mut self.report);
        self.elements.report_cross_block("element", &mut self.report);
        self.parts.report_cross_block("part", &mut self.report);

        for pid in &self.defined_parts {
            if !self.element_parts.contains_key(pid) {
                self.report.push(
                    Severity::Warning,
                    format!("part {pid} is not referenced by any element"),
                );
            }
        }

        let used_materials: BTreeSet<MaterialId> =
            self.part_materials.values().copied().collect();
        for mid in &self.defined_materials {
            if !used_materials.contains(mid) {
                self.report.push(
                    Severity::Warning,
                    format!("material {mid} is not referenced by any part"),
                );
            }
        }

        for (pid, count) in &self.element_parts {
            if !self.defined_parts.contains(pid) {
                self.report.push(
                    Severity::Warning,
                    format!("{count} element(s) refer to undefined part {pid}"),
                );
            }
        }
        self.report
    }

    fn elements(&mut self, keyword: &dyn ElementKeyword) {
        let items: Vec<_> = (0..keyword.element_count())
            .filter_map(|index| keyword.element_at(index))
            .collect();
        self.elements
            .record("element", items.iter().map(|e| e.id), &mut self.report);
        for element in items {
            // Inertia elements carry no part.
            if element.part != 0 {
                *self.element_parts.entry(element.part).or_default() += 1;
            }
        }
    }

    fn material(&mut self, keyword: &dyn MaterialKeyword) {
        self.materials
            .record("material", keyword.mid(), &mut self.report);
        self.defined_materials.insert(keyword.mid());
    }
}

impl KeywordVisitor for ValidationVisitor {
    fn visit_node(&mut self, keyword: &Node) {
        self.nodes
            .record("node", keyword.nodes.iter().map(|n| n.id), &mut self.report);
    }

    fn visit_part(&mut self, keyword: &Part) {
        self.parts
            .record("part", keyword.parts.iter().map(|p| p.pid), &mut self.report);
        for part in &keyword.parts {
            self.defined_parts.insert(part.pid);
            self.part_materials.insert(part.pid, part.mid);
        }
    }

    fn visit_section_shell(&mut self, keyword: &SectionShell) {
        self.sections
            .record("section", keyword.secid, &mut self.report);
    }

    fn visit_section_solid(&mut self, keyword: &SectionSolid) {
        self.sections
            .record("section", keyword.secid, &mut self.report);
    }

    fn visit_section_beam(&mut self, keyword: &SectionBeam) {
        self.sections
            .record("section", keyword.secid, &mut self.report);
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

    fn visit_set_node_list(&mut self, keyword: &SetNodeList) {
        self.sets
            .record("node set", keyword.sid(), &mut self.report);
    }

    fn visit_set_part_list(&mut self, keyword: &SetPartList) {
        self.sets
            .record("part set", keyword.sid(), &mut self.report);
    }

    fn visit_set_segment(&mut self, keyword: &SetSegment) {
        self.sets
            .record("segment set", keyword.sid(), &mut self.report);
    }

    fn visit_define_curve(&mut self, keyword: &DefineCurve) {
        self.curves.record("curve", keyword.lcid, &mut self.report);
    }
}
