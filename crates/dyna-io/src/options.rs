//! Reader and writer settings, loadable from a JSON file.

use std::fs;
use std::path::Path;

use dyna_card::Format;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What to do with a block whose name has no registered keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeywordPolicy {
    /// Keep the block verbatim as a `RawKeyword`.
    #[default]
    Preserve,
    /// Drop the block.
    Skip,
}

/// What to do when a registered keyword rejects its block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseFailurePolicy {
    /// Stop reading and return the error.
    #[default]
    Abort,
    /// Log the error and keep the block verbatim.
    PreserveRaw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    pub format: Format,
    pub unknown_keywords: UnknownKeywordPolicy,
    pub parse_failures: ParseFailurePolicy,
    /// Replace `*INCLUDE` blocks by the keywords of the files they name.
    pub expand_includes: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            format: Format::Standard,
            unknown_keywords: UnknownKeywordPolicy::Preserve,
            parse_failures: ParseFailurePolicy::Abort,
            expand_includes: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    pub format: Format,
    /// Emit the `*KEYWORD` line.
    pub keyword_header: bool,
    /// Emit the closing `*END` line.
    pub end_marker: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            format: Format::Standard,
            keyword_header: true,
            end_marker: true,
        }
    }
}

/// Both option sets, as stored in an options file:
///
/// ```json
/// { "read": { "format": "large", "unknown_keywords": "skip" },
///   "write": { "format": "standard" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckOptions {
    pub read: ReadOptions,
    pub write: WriteOptions,
}

impl DeckOptions {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| crate::DeckError::read(path, err))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }
}
