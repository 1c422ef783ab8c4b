//! Concrete keyword types shipped with the crate.

mod activation;
mod contact;
mod control;
mod element;
mod load;
mod material;
mod node;
mod part;
mod raw;
mod section;
mod set;

pub use activation::{ActivationEntry, ActivationKind, ActivationTarget, ElementActivation};
pub use contact::{
    Contact, ContactFriction, ContactId, ContactKind, ContactScaling, ContactSurfaces,
};
pub use control::{ControlTermination, Include, Title};
pub use element::{
    BeamElement, DiscreteElement, ElementBeam, ElementDiscrete, ElementInertia, ElementMass,
    ElementRow, ElementSeatbelt, ElementShell, ElementSolid, InertiaElement, MassElement,
    SeatbeltElement,
};
pub use load::{DefineCurve, LoadNodeSet, LoadSegmentSet, NodeSetLoad, SegmentLoad};
pub use material::{
    MatElastic, MatPiecewiseLinearPlasticity, MatRigid, MaterialKeyword, MaterialNaming,
};
pub use node::{Node, NodeEntry};
pub use part::{Part, PartEntry};
pub use raw::RawKeyword;
pub use section::{SectionBeam, SectionShell, SectionSolid};
pub use set::{SegmentEntry, SetHeader, SetNodeList, SetPartList, SetSegment};

use crate::keyword::Keyword;

/// One prototype per shipped keyword name, variants included.
pub fn prototypes() -> Vec<Box<dyn Keyword>> {
    let mut all: Vec<Box<dyn Keyword>> = vec![
        Box::new(Title::default()),
        Box::new(Include::default()),
        Box::new(ControlTermination::default()),
        Box::new(Node::default()),
        Box::new(Part::default()),
        Box::new(SectionShell::default()),
        Box::new(SectionShell::titled()),
        Box::new(SectionSolid::default()),
        Box::new(SectionSolid::titled()),
        Box::new(SectionBeam::default()),
        Box::new(SectionBeam::titled()),
        Box::new(ElementShell::default()),
        Box::new(ElementSolid::default()),
        Box::new(ElementBeam::default()),
        Box::new(ElementDiscrete::default()),
        Box::new(ElementSeatbelt::default()),
        Box::new(ElementMass::default()),
        Box::new(ElementInertia::default()),
        Box::new(SetNodeList::default()),
        Box::new(SetNodeList::titled()),
        Box::new(SetPartList::default()),
        Box::new(SetPartList::titled()),
        Box::new(SetSegment::default()),
        Box::new(SetSegment::titled()),
        Box::new(LoadSegmentSet::default()),
        Box::new(LoadNodeSet::default()),
        Box::new(DefineCurve::default()),
        Box::new(DefineCurve::titled()),
    ];

    for naming in MaterialNaming::variants() {
        all.push(Box::new(MatElastic {
            naming: naming.clone(),
            ..MatElastic::default()
        }));
        all.push(Box::new(MatRigid {
            naming: naming.clone(),
            ..MatRigid::default()
        }));
        all.push(Box::new(MatPiecewiseLinearPlasticity {
            naming,
            ..MatPiecewiseLinearPlasticity::default()
        }));
    }
    for activation in ElementActivation::variants() {
        all.push(Box::new(activation));
    }
    for contact in Contact::variants() {
        all.push(Box::new(contact));
    }
    all
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn prototype_names_are_unique() {
        let protos = prototypes();
        let names: HashSet<&str> = protos.iter().map(|kw| kw.name()).collect();
        assert_eq!(names.len(), protos.len());
        assert!(names.contains("*MAT_024_TITLE"));
        assert!(names.contains("*DEFINE_ELEMENT_BIRTH_BEAM"));
    }

    #[test]
    fn element_keywords_expose_element_view() {
        let with_view = prototypes()
            .iter()
            .filter(|kw| kw.as_element_keyword().is_some())
            .count();
        assert_eq!(with_view, 7);
    }
}
