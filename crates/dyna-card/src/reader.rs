//! Field extraction from one physical card line.

use crate::Format;

/// Integer in the `width` characters starting at `column`.
///
/// `None` when the slice is blank, lies past the end of the line or does not
/// hold a number; the owning keyword applies its own default.
pub fn int_at(line: &str, column: usize, width: usize) -> Option<i64> {
    field_slice(line, column, width).and_then(parse_int)
}

/// Real in the `width` characters starting at `column`. Same contract as
/// [`int_at`].
pub fn real_at(line: &str, column: usize, width: usize) -> Option<f64> {
    field_slice(line, column, width).and_then(parse_real)
}

/// Trimmed text in the `width` characters starting at `column`.
pub fn text_at(line: &str, column: usize, width: usize) -> Option<String> {
    field_slice(line, column, width).map(str::to_string)
}

/// Parses an integer field. Integral reals such as `3.` or `1.0e3` are
/// accepted since some pre-processors write them into integer columns.
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }
    let real = parse_real(text)?;
    if real.fract() == 0.0 && real.abs() < i64::MAX as f64 {
        Some(real as i64)
    } else {
        None
    }
}

/// Parses a real field, including Fortran `D` exponents. Non-finite values
/// are rejected.
pub fn parse_real(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let value = match text.parse::<f64>() {
        Ok(value) => value,
        Err(_) => text.replace(['d', 'D'], "e").parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

fn field_slice(line: &str, column: usize, width: usize) -> Option<&str> {
    let (start, end) = if line.is_ascii() {
        (column.min(line.len()), (column + width).min(line.len()))
    } else {
        (byte_offset(line, column), byte_offset(line, column + width))
    };
    if start >= end {
        return None;
    }
    let trimmed = line[start..end].trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn byte_offset(line: &str, chars: usize) -> usize {
    line.char_indices()
        .nth(chars)
        .map(|(index, _)| index)
        .unwrap_or(line.len())
}

/// Sequential cursor over the fields of one card line.
///
/// Lines containing a comma are free format: fields are comma separated and
/// widths are ignored.
#[derive(Debug, Clone)]
pub struct FieldReader<'a> {
    line: &'a str,
    format: Format,
    column: usize,
    tokens: Option<Vec<&'a str>>,
    index: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(line: &'a str, format: Format) -> Self {
        let tokens = line.contains(',').then(|| line.split(',').collect());
        Self {
            line,
            format,
            column: 0,
            tokens,
            index: 0,
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn is_free_format(&self) -> bool {
        self.tokens.is_some()
    }

    /// Integer field of the profile width.
    pub fn int(&mut self) -> Option<i64> {
        self.int_w(self.format.int_width())
    }

    /// Real field of the profile width.
    pub fn real(&mut self) -> Option<f64> {
        self.real_w(self.format.real_width())
    }

    pub fn int_w(&mut self, width: usize) -> Option<i64> {
        self.next_field(width).and_then(parse_int)
    }

    pub fn real_w(&mut self, width: usize) -> Option<f64> {
        self.next_field(width).and_then(parse_real)
    }

    pub fn text(&mut self, width: usize) -> Option<String> {
        self.next_field(width).map(str::to_string)
    }

    pub fn skip(&mut self, width: usize) {
        let _ = self.next_field(width);
    }

    /// True once the cursor has moved past every populated field.
    pub fn is_exhausted(&self) -> bool {
        match &self.tokens {
            Some(tokens) => self.index >= tokens.len(),
            None => self.column >= self.line.trim_end().chars().count(),
        }
    }

    fn next_field(&mut self, width: usize) -> Option<&'a str> {
        if let Some(tokens) = &self.tokens {
            let token = tokens.get(self.index).map(|t| t.trim());
            self.index += 1;
            return token.filter(|t| !t.is_empty());
        }
        let field = field_slice(self.line, self.column, width);
        self.column += width;
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_missing_fields_are_none() {
        let line = "         1          ";
        assert_eq!(int_at(line, 0, 10), Some(1));
        assert_eq!(int_at(line, 10, 10), None);
        assert_eq!(int_at(line, 40, 10), None);
        assert_eq!(real_at("      abc", 0, 10), None);
    }

    #[test]
    fn parses_fortran_and_integral_reals() {
        assert_eq!(parse_real("1.5D+02"), Some(150.0));
        assert_eq!(parse_real(".25"), Some(0.25));
        assert_eq!(parse_real("7."), Some(7.0));
        assert_eq!(parse_real("nan"), None);
        assert_eq!(parse_int("3."), Some(3));
        assert_eq!(parse_int("1.0e3"), Some(1000));
        assert_eq!(parse_int("2.5"), None);
    }

    #[test]
    fn reader_follows_large_real_width() {
        let line = format!("{:>10}{:>20}{:>20}", 7, "1.25", "-3.5");
        let mut large = FieldReader::new(&line, Format::Large);
        assert_eq!(large.int(), Some(7));
        assert_eq!(large.real(), Some(1.25));
        assert_eq!(large.real(), Some(-3.5));
        assert!(large.is_exhausted());

        let mut standard = FieldReader::new(&line, Format::Standard);
        assert_eq!(standard.int(), Some(7));
        assert_eq!(standard.real(), None);
    }

    #[test]
    fn reader_handles_free_format_lines() {
        let mut reader = FieldReader::new("12, 0.5,, 3", Format::Standard);
        assert!(reader.is_free_format());
        assert_eq!(reader.int(), Some(12));
        assert_eq!(reader.real(), Some(0.5));
        assert_eq!(reader.int(), None);
        assert_eq!(reader.int(), Some(3));
        assert!(reader.is_exhausted());
    }

    #[test]
    fn slices_by_character_column() {
        let line = "Stahl ä   42";
        assert_eq!(text_at(line, 0, 10), Some("Stahl ä".to_string()));
        assert_eq!(int_at(line, 10, 2), Some(42));
    }
}
