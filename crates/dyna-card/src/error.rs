//! Errors raised while writing card fields.
//!
//! Reading never fails: a blank or malformed field comes back as `None`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CardError {
    #[error("integer {value} does not fit a {width}-character field")]
    IntegerOverflow { value: i64, width: usize },

    #[error("real {value} does not fit a {width}-character field")]
    RealOverflow { value: f64, width: usize },

    #[error("non-finite real {value} cannot be written")]
    NonFinite { value: f64 },

    #[error("text {text:?} is longer than {width} characters")]
    TextOverflow { text: String, width: usize },
}
