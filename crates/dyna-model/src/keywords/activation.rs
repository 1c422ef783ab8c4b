//! `*DEFINE_ELEMENT_BIRTH_*` / `*DEFINE_ELEMENT_DEATH_*`: per-element
//! activation and deletion times.

use dyna_card::{FieldReader, Format};
use log::warn;

use crate::ElementId;
use crate::error::KeywordError;
use crate::keyword::{CardCursor, CardSink, ElementShape, Keyword, keyword_boilerplate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivationKind {
    Birth,
    Death,
}

/// Element families that carry activation keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivationTarget {
    Shell,
    Solid,
    Beam,
}

impl ActivationTarget {
    pub fn shape(self) -> ElementShape {
        match self {
            ActivationTarget::Shell => ElementShape::Shell,
            ActivationTarget::Solid => ElementShape::Solid,
            ActivationTarget::Beam => ElementShape::Beam,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationEntry {
    pub element: ElementId,
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementActivation {
    pub kind: ActivationKind,
    pub target: ActivationTarget,
    pub entries: Vec<ActivationEntry>,
}

impl ElementActivation {
    pub fn new(kind: ActivationKind, target: ActivationTarget) -> Self {
        Self {
            kind,
            target,
            entries: Vec::new(),
        }
    }

    pub fn birth(target: ActivationTarget) -> Self {
        Self::new(ActivationKind::Birth, target)
    }

    pub fn death(target: ActivationTarget) -> Self {
        Self::new(ActivationKind::Death, target)
    }

    pub fn with_entry(mut self, element: ElementId, time: f64) -> Self {
        self.entries.push(ActivationEntry { element, time });
        self
    }

    /// Every registered combination, one prototype each.
    pub fn variants() -> Vec<Self> {
        let targets = [
            ActivationTarget::Shell,
            ActivationTarget::Solid,
            ActivationTarget::Beam,
        ];
        [ActivationKind::Birth, ActivationKind::Death]
            .into_iter()
            .flat_map(|kind| targets.into_iter().map(move |target| Self::new(kind, target)))
            .collect()
    }
}

impl Keyword for ElementActivation {
    fn name(&self) -> &str {
        match (self.kind, self.target) {
            (ActivationKind::Birth, ActivationTarget::Shell) => "*DEFINE_ELEMENT_BIRTH_SHELL",
            (ActivationKind::Birth, ActivationTarget::Solid) => "*DEFINE_ELEMENT_BIRTH_SOLID",
            (ActivationKind::Birth, ActivationTarget::Beam) => "*DEFINE_ELEMENT_BIRTH_BEAM",
            (ActivationKind::Death, ActivationTarget::Shell) => "*DEFINE_ELEMENT_DEATH_SHELL",
            (ActivationKind::Death, ActivationTarget::Solid) => "*DEFINE_ELEMENT_DEATH_SOLID",
            (ActivationKind::Death, ActivationTarget::Beam) => "*DEFINE_ELEMENT_DEATH_BEAM",
        }
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(self.name(), lines);
        self.entries.clear();
        while let Some(line) = cards.next_card() {
            if line.trim().is_empty() {
                continue;
            }
            let mut r = FieldReader::new(line, format);
            let Some(element) = r.int() else {
                warn!("{}: skipping card without element id: {line:?}", self.name());
                continue;
            };
            let time = r.real().unwrap_or(0.0);
            self.entries.push(ActivationEntry { element, time });
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(self.name(), format);
        for entry in &self.entries {
            out.card(|w| {
                w.int(entry.element).real(entry.time);
            })?;
        }
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_element_activation);
}
