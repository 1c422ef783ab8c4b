//! Insertion-ordered keyword container with per-type buckets.

use std::any::TypeId;
use std::collections::HashMap;

use crate::keyword::Keyword;
use crate::visitor::KeywordVisitor;

/// A parsed deck.
///
/// Keywords are kept in the order they were added, which is also the order
/// they are written back. Each concrete type has a bucket of positions so
/// [`Model::keywords_of_type`] touches only matching entries.
#[derive(Debug, Clone, Default)]
pub struct Model {
    keywords: Vec<Box<dyn Keyword>>,
    buckets: HashMap<TypeId, Vec<usize>>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a keyword and returns its position.
    pub fn add_keyword(&mut self, keyword: Box<dyn Keyword>) -> usize {
        let position = self.keywords.len();
        let type_id = keyword.as_any().type_id();
        self.buckets.entry(type_id).or_default().push(position);
        self.keywords.push(keyword);
        position
    }

    /// Every keyword of concrete type `T`, in insertion order.
    pub fn keywords_of_type<T: Keyword>(&self) -> Vec<&T> {
        self.positions_of::<T>()
            .iter()
            .filter_map(|&position| self.keywords[position].as_any().downcast_ref::<T>())
            .collect()
    }

    pub fn keywords_of_type_mut<T: Keyword>(&mut self) -> Vec<&mut T> {
        let Some(positions) = self.buckets.get(&TypeId::of::<T>()) else {
            return Vec::new();
        };
        let mut wanted = positions.iter().copied().peekable();
        let mut found = Vec::with_capacity(positions.len());
        for (position, keyword) in self.keywords.iter_mut().enumerate() {
            let Some(&next) = wanted.peek() else {
                break;
            };
            if next == position {
                wanted.next();
                if let Some(keyword) = keyword.as_any_mut().downcast_mut::<T>() {
                    found.push(keyword);
                }
            }
        }
        found
    }

    pub fn first_of_type<T: Keyword>(&self) -> Option<&T> {
        self.positions_of::<T>()
            .first()
            .and_then(|&position| self.keywords[position].as_any().downcast_ref::<T>())
    }

    pub fn count_of_type<T: Keyword>(&self) -> usize {
        self.positions_of::<T>().len()
    }

    /// Positions of the keywords of type `T`.
    pub fn positions_of<T: Keyword>(&self) -> &[usize] {
        self.buckets
            .get(&TypeId::of::<T>())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn keyword(&self, position: usize) -> Option<&dyn Keyword> {
        self.keywords.get(position).map(|keyword| &**keyword)
    }

    pub fn keyword_mut(&mut self, position: usize) -> Option<&mut dyn Keyword> {
        self.keywords
            .get_mut(position)
            .map(|keyword| &mut **keyword)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Keyword> {
        self.keywords.iter().map(|keyword| &**keyword)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Removes the keyword at `position`. Later keywords shift down by one.
    pub fn remove_keyword(&mut self, position: usize) -> Option<Box<dyn Keyword>> {
        if position >= self.keywords.len() {
            return None;
        }
        let removed = self.keywords.remove(position);
        self.rebuild_buckets();
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.keywords.clear();
        self.buckets.clear();
    }

    /// Visits every keyword in insertion order.
    pub fn accept(&self, visitor: &mut dyn KeywordVisitor) {
        for keyword in &self.keywords {
            keyword.accept(visitor);
        }
    }

    fn rebuild_buckets(&mut self) {
        self.buckets.clear();
        for (position, keyword) in self.keywords.iter().enumerate() {
            self.buckets
                .entry(keyword.as_any().type_id())
                .or_default()
                .push(position);
        }
    }
}

impl Extend<Box<dyn Keyword>> for Model {
    fn extend<I: IntoIterator<Item = Box<dyn Keyword>>>(&mut self, iter: I) {
        for keyword in iter {
            self.add_keyword(keyword);
        }
    }
}

impl FromIterator<Box<dyn Keyword>> for Model {
    fn from_iter<I: IntoIterator<Item = Box<dyn Keyword>>>(iter: I) -> Self {
        let mut model = Model::new();
        model.extend(iter);
        model
    }
}

impl IntoIterator for Model {
    type Item = Box<dyn Keyword>;
    type IntoIter = std::vec::IntoIter<Box<dyn Keyword>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keywords.into_iter()
    }
}
