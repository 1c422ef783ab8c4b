//! Section keywords: `*SECTION_SHELL`, `*SECTION_SOLID`, `*SECTION_BEAM`
//! and their `_TITLE` variants.

use dyna_card::{FieldReader, Format};

use crate::SectionId;
use crate::error::KeywordError;
use crate::keyword::{CardCursor, CardSink, Keyword, keyword_boilerplate, read_title};

/// Reads the optional title card of a `_TITLE` variant.
fn parse_title(
    cards: &mut CardCursor<'_>,
    title: &mut Option<String>,
) -> Result<(), KeywordError> {
    if title.is_some() {
        *title = Some(read_title(cards.require("title")?));
    }
    Ok(())
}

fn write_title(out: &mut CardSink<'_>, title: &Option<String>) -> Result<(), KeywordError> {
    if let Some(title) = title {
        out.card(|w| {
            w.text(title, dyna_card::CARD_WIDTH);
        })?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionShell {
    /// `Some` for `*SECTION_SHELL_TITLE`.
    pub title: Option<String>,
    pub secid: SectionId,
    pub elform: i64,
    pub shrf: f64,
    pub nip: i64,
    pub propt: f64,
    pub qr: i64,
    pub icomp: i64,
    pub setyp: i64,
    /// Nodal thicknesses T1..T4.
    pub thickness: [f64; 4],
    pub nloc: f64,
    pub marea: f64,
    pub idof: f64,
    pub edgset: i64,
    /// Integration point angles, present when `icomp == 1`.
    pub angles: Vec<f64>,
}

impl Default for SectionShell {
    fn default() -> Self {
        Self {
            title: None,
            secid: 0,
            elform: 2,
            shrf: 1.0,
            nip: 2,
            propt: 1.0,
            qr: 0,
            icomp: 0,
            setyp: 1,
            thickness: [0.0; 4],
            nloc: 0.0,
            marea: 0.0,
            idof: 0.0,
            edgset: 0,
            angles: Vec::new(),
        }
    }
}

impl SectionShell {
    pub const NAME: &'static str = "*SECTION_SHELL";
    pub const NAME_TITLE: &'static str = "*SECTION_SHELL_TITLE";

    pub fn new(secid: SectionId, thickness: f64) -> Self {
        Self {
            secid,
            thickness: [thickness; 4],
            ..Self::default()
        }
    }

    pub fn titled() -> Self {
        Self {
            title: Some(String::new()),
            ..Self::default()
        }
    }
}

impl Keyword for SectionShell {
    fn name(&self) -> &str {
        if self.title.is_some() {
            Self::NAME_TITLE
        } else {
            Self::NAME
        }
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let defaults = Self::default();
        let mut cards = CardCursor::new(self.name(), lines);
        parse_title(&mut cards, &mut self.title)?;

        let mut r = FieldReader::new(cards.require("card 1")?, format);
        self.secid = r.int().unwrap_or(0);
        self.elform = r.int().unwrap_or(defaults.elform);
        self.shrf = r.real().unwrap_or(defaults.shrf);
        self.nip = r.int().unwrap_or(defaults.nip);
        self.propt = r.real().unwrap_or(defaults.propt);
        self.qr = r.int().unwrap_or(defaults.qr);
        self.icomp = r.int().unwrap_or(defaults.icomp);
        self.setyp = r.int().unwrap_or(defaults.setyp);

        let mut r = FieldReader::new(cards.require("card 2")?, format);
        for t in self.thickness.iter_mut() {
            *t = r.real().unwrap_or(0.0);
        }
        self.nloc = r.real().unwrap_or(0.0);
        self.marea = r.real().unwrap_or(0.0);
        self.idof = r.real().unwrap_or(0.0);
        self.edgset = r.int().unwrap_or(0);

        self.angles.clear();
        if self.icomp == 1 {
            let count = usize::try_from(self.nip).unwrap_or(0);
            while self.angles.len() < count {
                let Some(line) = cards.next_card() else {
                    break;
                };
                let mut r = FieldReader::new(line, format);
                for _ in 0..8 {
                    if self.angles.len() == count {
                        break;
                    }
                    self.angles.push(r.real().unwrap_or(0.0));
                }
            }
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(self.name(), format);
        write_title(&mut out, &self.title)?;
        out.card(|w| {
            w.int(self.secid)
                .int(self.elform)
                .real(self.shrf)
                .int(self.nip)
                .real(self.propt)
                .int(self.qr)
                .int(self.icomp)
                .int(self.setyp);
        })?;
        out.card(|w| {
            for t in self.thickness {
                w.real(t);
            }
            w.real(self.nloc)
                .real(self.marea)
                .real(self.idof)
                .int(self.edgset);
        })?;
        if self.icomp == 1 {
            for chunk in self.angles.chunks(8) {
                out.card(|w| {
                    for angle in chunk {
                        w.real(*angle);
                    }
                })?;
            }
        }
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_section_shell);
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionSolid {
    pub title: Option<String>,
    pub secid: SectionId,
    pub elform: i64,
    pub aet: i64,
}

impl Default for SectionSolid {
    fn default() -> Self {
        Self {
            title: None,
            secid: 0,
            elform: 1,
            aet: 0,
        }
    }
}

impl SectionSolid {
    pub const NAME: &'static str = "*SECTION_SOLID";
    pub const NAME_TITLE: &'static str = "*SECTION_SOLID_TITLE";

    pub fn new(secid: SectionId, elform: i64) -> Self {
        Self {
            secid,
            elform,
            ..Self::default()
        }
    }

    pub fn titled() -> Self {
        Self {
            title: Some(String::new()),
            ..Self::default()
        }
    }
}

impl Keyword for SectionSolid {
    fn name(&self) -> &str {
        if self.title.is_some() {
            Self::NAME_TITLE
        } else {
            Self::NAME
        }
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(self.name(), lines);
        parse_title(&mut cards, &mut self.title)?;
        let mut r = FieldReader::new(cards.require("card 1")?, format);
        self.secid = r.int().unwrap_or(0);
        self.elform = r.int().unwrap_or(1);
        self.aet = r.int().unwrap_or(0);
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(self.name(), format);
        write_title(&mut out, &self.title)?;
        out.card(|w| {
            w.int(self.secid).int(self.elform).int(self.aet);
        })?;
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_section_solid);
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBeam {
    pub title: Option<String>,
    pub secid: SectionId,
    pub elform: i64,
    pub shrf: f64,
    pub qr: i64,
    pub cst: f64,
    pub scoor: f64,
    pub nsm: f64,
    /// TS1 TS2 TT1 TT2 NSLOC NTLOC for resultant and integrated beams.
    pub dimensions: [f64; 6],
}

impl Default for SectionBeam {
    fn default() -> Self {
        Self {
            title: None,
            secid: 0,
            elform: 1,
            shrf: 1.0,
            qr: 2,
            cst: 0.0,
            scoor: 0.0,
            nsm: 0.0,
            dimensions: [0.0; 6],
        }
    }
}

impl SectionBeam {
    pub const NAME: &'static str = "*SECTION_BEAM";
    pub const NAME_TITLE: &'static str = "*SECTION_BEAM_TITLE";

    pub fn titled() -> Self {
        Self {
            title: Some(String::new()),
            ..Self::default()
        }
    }
}

impl Keyword for SectionBeam {
    fn name(&self) -> &str {
        if self.title.is_some() {
            Self::NAME_TITLE
        } else {
            Self::NAME
        }
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let defaults = Self::default();
        let mut cards = CardCursor::new(self.name(), lines);
        parse_title(&mut cards, &mut self.title)?;

        let mut r = FieldReader::new(cards.require("card 1")?, format);
        self.secid = r.int().unwrap_or(0);
        self.elform = r.int().unwrap_or(defaults.elform);
        self.shrf = r.real().unwrap_or(defaults.shrf);
        self.qr = r.int().unwrap_or(defaults.qr);
        self.cst = r.real().unwrap_or(defaults.cst);
        self.scoor = r.real().unwrap_or(defaults.scoor);
        self.nsm = r.real().unwrap_or(defaults.nsm);

        let mut r = FieldReader::new(cards.require("card 2")?, format);
        for value in self.dimensions.iter_mut() {
            *value = r.real().unwrap_or(0.0);
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(self.name(), format);
        write_title(&mut out, &self.title)?;
        out.card(|w| {
            w.int(self.secid)
                .int(self.elform)
                .real(self.shrf)
                .int(self.qr)
                .real(self.cst)
                .real(self.scoor)
                .real(self.nsm);
        })?;
        out.card(|w| {
            for value in self.dimensions {
                w.real(value);
            }
        })?;
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_section_beam);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn shell_section_applies_defaults() {
        let mut kw = SectionShell::default();
        kw.parse(
            &lines(&["         1", "       1.5       1.5       1.5       1.5"]),
            Format::Standard,
        )
        .unwrap();
        assert_eq!(kw.secid, 1);
        assert_eq!(kw.elform, 2);
        assert_eq!(kw.nip, 2);
        assert_eq!(kw.thickness, [1.5; 4]);
    }

    #[test]
    fn shell_section_reads_angle_cards() {
        let mut kw = SectionShell::default();
        kw.parse(
            &lines(&[
                "         3         2       1.0         3       1.0         0         1",
                "       2.0",
                "       0.0      45.0     -45.0",
            ]),
            Format::Standard,
        )
        .unwrap();
        assert_eq!(kw.angles, vec![0.0, 45.0, -45.0]);
        let written = kw.write(Format::Standard).unwrap();
        assert_eq!(written.len(), 3);
    }

    #[test]
    fn titled_section_reads_title_first() {
        let mut kw = SectionSolid::titled();
        kw.parse(&lines(&["Foam core", "         7         2"]), Format::Standard)
            .unwrap();
        assert_eq!(kw.name(), SectionSolid::NAME_TITLE);
        assert_eq!(kw.title.as_deref(), Some("Foam core"));
        assert_eq!(kw.secid, 7);
        assert_eq!(kw.elform, 2);
    }

    #[test]
    fn beam_section_needs_both_cards() {
        let mut kw = SectionBeam::default();
        let err = kw.parse(&lines(&["         4"]), Format::Standard).unwrap_err();
        assert_eq!(err, KeywordError::missing(SectionBeam::NAME, "card 2"));
    }
}
