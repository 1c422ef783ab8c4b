//! In-memory model of an LS-DYNA keyword deck.
//!
//! This crate provides:
//! - the [`Keyword`] contract every deck entry implements (parse, write,
//!   visit, clone),
//! - a [`KeywordRegistry`] mapping `*NAME` strings to prototypes,
//! - the [`Model`] container, insertion ordered and queryable by concrete type,
//! - the [`KeywordVisitor`] traversal with statistics and validation passes,
//! - the concrete keywords in [`keywords`].

pub mod error;
pub mod keyword;
pub mod keywords;
pub mod model;
pub mod registry;
pub mod statistics;
pub mod validation;
pub mod visitor;

pub use error::{KeywordError, RegistryError};
pub use keyword::{CardCursor, ElementData, ElementKeyword, ElementShape, Keyword};
pub use model::Model;
pub use registry::KeywordRegistry;
pub use statistics::{ModelStatistics, StatisticsVisitor};
pub use validation::{Severity, ValidationMessage, ValidationReport, ValidationVisitor};
pub use visitor::KeywordVisitor;

pub type NodeId = i64;
pub type ElementId = i64;
pub type PartId = i64;
pub type SectionId = i64;
pub type MaterialId = i64;
pub type SetId = i64;
pub type CurveId = i64;
