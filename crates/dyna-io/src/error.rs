//! Error types for dyna-io

use std::io;
use std::path::{Path, PathBuf};

use dyna_model::KeywordError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeckError>;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{}line {line}: {source}", location(.file))]
    Keyword {
        file: Option<PathBuf>,
        line: usize,
        name: String,
        #[source]
        source: KeywordError,
    },

    #[error("keyword {position} ({name}): {source}")]
    Write {
        position: usize,
        name: String,
        #[source]
        source: KeywordError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("include cycle detected: {}", chain(.files))]
    IncludeCycle { files: Vec<PathBuf> },

    #[error("{}line {line}: included file {} not found", location(.file), .path.display())]
    MissingInclude {
        file: Option<PathBuf>,
        line: usize,
        path: PathBuf,
    },
}

fn location(file: &Option<PathBuf>) -> String {
    file.as_deref()
        .map(|path| format!("{}: ", path.display()))
        .unwrap_or_default()
}

fn chain(files: &[PathBuf]) -> String {
    files
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl DeckError {
    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        DeckError::Read {
            path: path.to_path_buf(),
            source,
        }
    }
}
