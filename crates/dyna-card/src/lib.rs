//! Fixed-width card codec for LS-DYNA keyword decks.
//!
//! A deck is a sequence of `*NAME` lines, each followed by data cards. A card
//! is a row of right-justified fields whose widths depend on the column
//! profile ([`Format`]) chosen once for the whole file:
//!
//! | Profile    | Integer field | Real field |
//! | ---------- | ------------- | ---------- |
//! | `Standard` | 10            | 10         |
//! | `Large`    | 10            | 20         |
//!
//! Lines starting with `$` are comments and `*` introduces a keyword. Both are
//! classified without consuming anything; which card is current is the
//! business of the keyword that owns the lines.

use serde::{Deserialize, Serialize};

mod error;
mod reader;
mod writer;

pub use error::CardError;
pub use reader::{FieldReader, int_at, parse_int, parse_real, real_at, text_at};
pub use writer::{CardWriter, format_int, format_real, format_text};

/// First character of a comment line.
pub const COMMENT_MARKER: char = '$';

/// First character of a keyword line.
pub const KEYWORD_MARKER: char = '*';

/// Width of one physical card line.
pub const CARD_WIDTH: usize = 80;

/// Column profile applied to every field of a read or write call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// 10-character integer and real fields.
    #[default]
    Standard,
    /// 10-character integer fields, 20-character real fields.
    Large,
}

impl Format {
    /// Width of an integer field. Identical in both profiles.
    pub const fn int_width(self) -> usize {
        10
    }

    /// Width of a real field.
    pub const fn real_width(self) -> usize {
        match self {
            Format::Standard => 10,
            Format::Large => 20,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Format::Standard => "standard",
            Format::Large => "large",
        }
    }
}

pub fn is_comment_line(line: &str) -> bool {
    line.starts_with(COMMENT_MARKER)
}

pub fn is_keyword_line(line: &str) -> bool {
    line.starts_with(KEYWORD_MARKER)
}

/// A line that carries card fields (blank lines included: a blank card takes
/// every default).
pub fn is_data_line(line: &str) -> bool {
    !is_comment_line(line) && !is_keyword_line(line)
}

/// Keyword name of a `*NAME` line, upper-cased, with trailing options such as
/// `*NODE %` dropped. Returns `None` for anything that is not a keyword line.
pub fn keyword_name(line: &str) -> Option<String> {
    if !is_keyword_line(line) {
        return None;
    }
    let token = line.split_whitespace().next().unwrap_or_default();
    let name = token.trim_end_matches(['%', '+', '-']);
    if name.len() <= 1 {
        return None;
    }
    Some(name.to_ascii_uppercase())
}
