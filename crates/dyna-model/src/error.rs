//! Error types for dyna-model

use dyna_card::CardError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeywordError {
    #[error("{keyword}: required card '{card}' is missing")]
    MissingCard {
        keyword: String,
        card: &'static str,
    },

    #[error("{keyword}: {source}")]
    Card {
        keyword: String,
        #[source]
        source: CardError,
    },
}

impl KeywordError {
    pub fn missing(keyword: &str, card: &'static str) -> Self {
        KeywordError::MissingCard {
            keyword: keyword.to_string(),
            card,
        }
    }

    pub fn card(keyword: &str, source: CardError) -> Self {
        KeywordError::Card {
            keyword: keyword.to_string(),
            source,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("keyword {0} is already registered")]
    DuplicateName(String),

    #[error("invalid keyword name {0:?}")]
    InvalidName(String),
}
