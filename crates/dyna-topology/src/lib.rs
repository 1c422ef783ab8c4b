//! Mesh topology of an LS-DYNA [`dyna_model::Model`].
//!
//! [`ElementManager`] indexes elements by id, part and shape and tracks
//! birth and death times. [`element_segments`] gives the faces of one
//! element and [`SetManager`] reduces faces to an external surface and turns
//! it into `*SET_*` keywords.

pub mod element_manager;
pub mod segment;
pub mod set_manager;

pub use element_manager::{ElementManager, EntryHandle};
pub use segment::{Segment, element_segments};
pub use set_manager::SetManager;
