//! Name to prototype lookup for keyword blocks.

use std::collections::BTreeMap;

use log::warn;

use crate::error::RegistryError;
use crate::keyword::Keyword;
use crate::keywords;

/// Maps upper-case `*NAME` strings to keyword prototypes.
///
/// The registry is an ordinary value: build one with [`Self::with_defaults`]
/// and hand it to whatever reads decks. Lookups clone the prototype, so the
/// registered instance is never mutated.
#[derive(Debug, Clone, Default)]
pub struct KeywordRegistry {
    prototypes: BTreeMap<String, Box<dyn Keyword>>,
}

impl KeywordRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every shipped keyword and its name variants.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for prototype in keywords::prototypes() {
            if let Err(err) = registry.register(prototype) {
                warn!("skipping shipped prototype: {err}");
            }
        }
        registry
    }

    /// Registers `prototype` under its own name.
    pub fn register(&mut self, prototype: Box<dyn Keyword>) -> Result<(), RegistryError> {
        let name = normalize(prototype.name());
        if name.len() < 2 || !name.starts_with('*') {
            return Err(RegistryError::InvalidName(prototype.name().to_string()));
        }
        if self.prototypes.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        self.prototypes.insert(name, prototype);
        Ok(())
    }

    /// Fresh keyword for `name`, compared case-insensitively.
    pub fn create(&self, name: &str) -> Option<Box<dyn Keyword>> {
        self.prototypes
            .get(&normalize(name))
            .map(|prototype| prototype.clone_box())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.prototypes.contains_key(&normalize(name))
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.prototypes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::{MatElastic, Node, RawKeyword, SectionShell};

    #[test]
    fn creates_fresh_instances_by_name() {
        let registry = KeywordRegistry::with_defaults();
        let node = registry.create("*node").unwrap();
        assert_eq!(node.name(), "*NODE");
        assert!(node.as_any().downcast_ref::<Node>().is_some());
        assert!(registry.create("*NOT_A_KEYWORD").is_none());
    }

    #[test]
    fn variants_share_one_type() {
        let registry = KeywordRegistry::with_defaults();
        let numeric = registry.create("*MAT_001_TITLE").unwrap();
        let material = numeric.as_any().downcast_ref::<MatElastic>().unwrap();
        assert!(material.naming.numeric);
        assert!(material.naming.title.is_some());

        let titled = registry.create("*SECTION_SHELL_TITLE").unwrap();
        assert!(titled.as_any().downcast_ref::<SectionShell>().is_some());
        assert_eq!(titled.name(), "*SECTION_SHELL_TITLE");
    }

    #[test]
    fn rejects_duplicate_and_invalid_names() {
        let mut registry = KeywordRegistry::new();
        registry.register(Box::new(Node::default())).unwrap();
        assert_eq!(
            registry.register(Box::new(Node::default())),
            Err(RegistryError::DuplicateName("*NODE".to_string()))
        );
        assert_eq!(
            registry.register(Box::new(RawKeyword::new("NODE", Vec::new()))),
            Err(RegistryError::InvalidName("NODE".to_string()))
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["*NODE"]);
    }

    #[test]
    fn custom_prototype_extends_defaults() {
        let mut registry = KeywordRegistry::with_defaults();
        let before = registry.len();
        registry
            .register(Box::new(RawKeyword::new("*BOUNDARY_SPC_SET", Vec::new())))
            .unwrap();
        assert_eq!(registry.len(), before + 1);
        assert!(registry.contains("*boundary_spc_set"));
    }
}
