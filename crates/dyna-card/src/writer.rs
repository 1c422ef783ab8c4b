//! Field rendering, the mirror image of [`crate::reader`].
//!
//! Integers that do not fit their column are an error. Reals first try their
//! shortest round-trip text, then scientific notation at the largest
//! precision that still fits; only a real that cannot fit at all (or is not
//! finite) is an error.

use crate::{CardError, Format};

/// Largest number of significant fraction digits tried for a real.
const MAX_REAL_PRECISION: usize = 16;

pub fn format_int(value: i64, width: usize) -> Result<String, CardError> {
    let text = value.to_string();
    if text.len() > width {
        return Err(CardError::IntegerOverflow { value, width });
    }
    Ok(format!("{text:>width$}"))
}

pub fn format_real(value: f64, width: usize) -> Result<String, CardError> {
    if !value.is_finite() {
        return Err(CardError::NonFinite { value });
    }

    let mut plain = format!("{value}");
    if !plain.contains('.') {
        plain.push_str(".0");
    }
    if plain.len() <= width {
        return Ok(format!("{plain:>width$}"));
    }

    let shortest = format!("{value:e}");
    if shortest.len() <= width {
        return Ok(format!("{shortest:>width$}"));
    }

    for precision in (0..=MAX_REAL_PRECISION).rev() {
        let text = format!("{value:.precision$e}");
        if text.len() <= width {
            return Ok(format!("{text:>width$}"));
        }
    }

    Err(CardError::RealOverflow { value, width })
}

/// Left-justified text field.
pub fn format_text(text: &str, width: usize) -> Result<String, CardError> {
    let len = text.chars().count();
    if len > width {
        return Err(CardError::TextOverflow {
            text: text.to_string(),
            width,
        });
    }
    Ok(format!("{text:<width$}"))
}

/// Builds one card line field by field. The first failing field is kept and
/// reported by [`CardWriter::finish`], so calls can be chained freely.
#[derive(Debug, Clone)]
pub struct CardWriter {
    format: Format,
    line: String,
    error: Option<CardError>,
}

impl CardWriter {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            line: String::with_capacity(crate::CARD_WIDTH),
            error: None,
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn int(&mut self, value: i64) -> &mut Self {
        self.int_w(value, self.format.int_width())
    }

    pub fn int_w(&mut self, value: i64, width: usize) -> &mut Self {
        let field = format_int(value, width);
        self.push(field, width)
    }

    /// Integer field, left blank when `None`.
    pub fn opt_int(&mut self, value: Option<i64>) -> &mut Self {
        match value {
            Some(value) => self.int(value),
            None => self.blank(self.format.int_width()),
        }
    }

    pub fn real(&mut self, value: f64) -> &mut Self {
        self.real_w(value, self.format.real_width())
    }

    pub fn real_w(&mut self, value: f64, width: usize) -> &mut Self {
        let field = format_real(value, width);
        self.push(field, width)
    }

    /// Real field, left blank when `None`.
    pub fn opt_real(&mut self, value: Option<f64>) -> &mut Self {
        match value {
            Some(value) => self.real(value),
            None => self.blank(self.format.real_width()),
        }
    }

    pub fn text(&mut self, text: &str, width: usize) -> &mut Self {
        let field = format_text(text, width);
        self.push(field, width)
    }

    pub fn blank(&mut self, width: usize) -> &mut Self {
        self.line.extend(std::iter::repeat_n(' ', width));
        self
    }

    /// The finished line with trailing blanks removed.
    pub fn finish(self) -> Result<String, CardError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.line.trim_end().to_string()),
        }
    }

    fn push(&mut self, field: Result<String, CardError>, width: usize) -> &mut Self {
        match field {
            Ok(text) => self.line.push_str(&text),
            Err(err) => {
                self.error.get_or_insert(err);
                self.blank(width);
            }
        }
        self
    }
}
