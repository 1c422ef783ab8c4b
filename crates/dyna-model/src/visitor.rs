//! Double-dispatch traversal over the keywords of a [`crate::Model`].
//!
//! Each concrete keyword calls its own `visit_*` method from
//! [`crate::Keyword::accept`]. Every method defaults to doing nothing, so a
//! visitor only overrides the keywords it cares about.

use crate::keywords::{
    Contact, ControlTermination, DefineCurve, ElementActivation, ElementBeam, ElementDiscrete,
    ElementInertia, ElementMass, ElementSeatbelt, ElementShell, ElementSolid, Include,
    LoadNodeSet, LoadSegmentSet, MatElastic, MatPiecewiseLinearPlasticity, MatRigid, Node, Part,
    RawKeyword, SectionBeam, SectionShell, SectionSolid, SetNodeList, SetPartList, SetSegment,
    Title,
};

#[allow(unused_variables)]
pub trait KeywordVisitor {
    fn visit_title(&mut self, keyword: &Title) {}

    fn visit_include(&mut self, keyword: &Include) {}

    fn visit_control_termination(&mut self, keyword: &ControlTermination) {}

    fn visit_node(&mut self, keyword: &Node) {}

    fn visit_part(&mut self, keyword: &Part) {}

    fn visit_section_shell(&mut self, keyword: &SectionShell) {}

    fn visit_section_solid(&mut self, keyword: &SectionSolid) {}

    fn visit_section_beam(&mut self, keyword: &SectionBeam) {}

    fn visit_mat_elastic(&mut self, keyword: &MatElastic) {}

    fn visit_mat_rigid(&mut self, keyword: &MatRigid) {}

    fn visit_mat_piecewise_linear_plasticity(&mut self, keyword: &MatPiecewiseLinearPlasticity) {}

    fn visit_element_shell(&mut self, keyword: &ElementShell) {}

    fn visit_element_solid(&mut self, keyword: &ElementSolid) {}

    fn visit_element_beam(&mut self, keyword: &ElementBeam) {}

    fn visit_element_discrete(&mut self, keyword: &ElementDiscrete) {}

    fn visit_element_seatbelt(&mut self, keyword: &ElementSeatbelt) {}

    fn visit_element_mass(&mut self, keyword: &ElementMass) {}

    fn visit_element_inertia(&mut self, keyword: &ElementInertia) {}

    fn visit_element_activation(&mut self, keyword: &ElementActivation) {}

    fn visit_set_node_list(&mut self, keyword: &SetNodeList) {}

    fn visit_set_part_list(&mut self, keyword: &SetPartList) {}

    fn visit_set_segment(&mut self, keyword: &SetSegment) {}

    fn visit_contact(&mut self, keyword: &Contact) {}

    fn visit_load_segment_set(&mut self, keyword: &LoadSegmentSet) {}

    fn visit_load_node_set(&mut self, keyword: &LoadNodeSet) {}

    fn visit_define_curve(&mut self, keyword: &DefineCurve) {}

    fn visit_raw(&mut self, keyword: &RawKeyword) {}
}
