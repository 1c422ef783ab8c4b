//! Deck files in and out of a [`dyna_model::Model`].
//!
//! [`DeckReader`] splits a deck into `*NAME` blocks, creates each keyword
//! through a [`dyna_model::KeywordRegistry`] and expands `*INCLUDE` files.
//! [`DeckWriter`] emits `*KEYWORD`, every keyword in model order and `*END`.

pub mod error;
pub mod options;
pub mod reader;
pub mod writer;

use std::path::Path;

use dyna_card::Format;
use dyna_model::{KeywordRegistry, Model};

pub use error::{DeckError, Result};
pub use options::{DeckOptions, ParseFailurePolicy, ReadOptions, UnknownKeywordPolicy, WriteOptions};
pub use reader::{Block, DeckReader, split_blocks};
pub use writer::DeckWriter;

/// Reads a deck with every shipped keyword and default options.
pub fn read_deck(path: impl AsRef<Path>) -> Result<Model> {
    let registry = KeywordRegistry::with_defaults();
    DeckReader::new(&registry).read_file(path)
}

/// Writes a deck with default options in the given profile.
pub fn write_deck(model: &Model, path: impl AsRef<Path>, format: Format) -> Result<()> {
    DeckWriter::new(format).write_file(model, path)
}
