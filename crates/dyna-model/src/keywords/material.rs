//! Material keywords. Each accepts both its descriptive name and the numeric
//! alias (`*MAT_ELASTIC` / `*MAT_001`), optionally with `_TITLE`.

use dyna_card::{FieldReader, Format};

use crate::MaterialId;
use crate::error::KeywordError;
use crate::keyword::{CardCursor, CardSink, Keyword, keyword_boilerplate, read_title};

/// Data common to every material keyword.
pub trait MaterialKeyword {
    fn mid(&self) -> MaterialId;

    /// Descriptive material name without `*MAT_` or suffixes, e.g. `ELASTIC`.
    fn subtype(&self) -> &'static str;

    fn density(&self) -> f64;
}

/// Spelling of a material keyword name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialNaming {
    /// Written as `*MAT_001` instead of `*MAT_ELASTIC`.
    pub numeric: bool,
    /// Title card content for `_TITLE` variants.
    pub title: Option<String>,
}

impl MaterialNaming {
    /// `names` is `[descriptive, descriptive_TITLE, numeric, numeric_TITLE]`.
    fn pick(&self, names: &[&'static str; 4]) -> &'static str {
        match (self.numeric, self.title.is_some()) {
            (false, false) => names[0],
            (false, true) => names[1],
            (true, false) => names[2],
            (true, true) => names[3],
        }
    }

    fn parse_title(&mut self, cards: &mut CardCursor<'_>) -> Result<(), KeywordError> {
        if self.title.is_some() {
            self.title = Some(read_title(cards.require("title")?));
        }
        Ok(())
    }

    fn write_title(&self, out: &mut CardSink<'_>) -> Result<(), KeywordError> {
        if let Some(title) = &self.title {
            out.card(|w| {
                w.text(title, dyna_card::CARD_WIDTH);
            })?;
        }
        Ok(())
    }

    /// Prototypes of every spelling.
    pub fn variants() -> [MaterialNaming; 4] {
        [
            MaterialNaming::default(),
            MaterialNaming {
                numeric: false,
                title: Some(String::new()),
            },
            MaterialNaming {
                numeric: true,
                title: None,
            },
            MaterialNaming {
                numeric: true,
                title: Some(String::new()),
            },
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatElastic {
    pub naming: MaterialNaming,
    pub mid: MaterialId,
    pub ro: f64,
    pub e: f64,
    pub pr: f64,
    pub da: f64,
    pub db: f64,
    pub k: f64,
}

impl MatElastic {
    pub const NAMES: [&'static str; 4] = [
        "*MAT_ELASTIC",
        "*MAT_ELASTIC_TITLE",
        "*MAT_001",
        "*MAT_001_TITLE",
    ];

    pub fn new(mid: MaterialId, ro: f64, e: f64, pr: f64) -> Self {
        Self {
            mid,
            ro,
            e,
            pr,
            ..Self::default()
        }
    }
}

impl MaterialKeyword for MatElastic {
    fn mid(&self) -> MaterialId {
        self.mid
    }

    fn subtype(&self) -> &'static str {
        "ELASTIC"
    }

    fn density(&self) -> f64 {
        self.ro
    }
}

impl Keyword for MatElastic {
    fn name(&self) -> &str {
        self.naming.pick(&Self::NAMES)
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(self.name(), lines);
        self.naming.parse_title(&mut cards)?;
        let mut r = FieldReader::new(cards.require("card 1")?, format);
        self.mid = r.int().unwrap_or(0);
        self.ro = r.real().unwrap_or(0.0);
        self.e = r.real().unwrap_or(0.0);
        self.pr = r.real().unwrap_or(0.0);
        self.da = r.real().unwrap_or(0.0);
        self.db = r.real().unwrap_or(0.0);
        self.k = r.real().unwrap_or(0.0);
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(self.name(), format);
        self.naming.write_title(&mut out)?;
        out.card(|w| {
            w.int(self.mid)
                .real(self.ro)
                .real(self.e)
                .real(self.pr)
                .real(self.da)
                .real(self.db)
                .real(self.k);
        })?;
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_mat_elastic);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatRigid {
    pub naming: MaterialNaming,
    pub mid: MaterialId,
    pub ro: f64,
    pub e: f64,
    pub pr: f64,
    pub n: f64,
    pub couple: f64,
    pub m: f64,
    pub alias: String,
    /// Center of mass constraint option.
    pub cmo: f64,
    pub con1: f64,
    pub con2: f64,
    /// LCO or A1, A2, A3, V1, V2, V3.
    pub orientation: [f64; 6],
}

impl MatRigid {
    pub const NAMES: [&'static str; 4] = [
        "*MAT_RIGID",
        "*MAT_RIGID_TITLE",
        "*MAT_020",
        "*MAT_020_TITLE",
    ];

    pub fn new(mid: MaterialId, ro: f64, e: f64, pr: f64) -> Self {
        Self {
            mid,
            ro,
            e,
            pr,
            ..Self::default()
        }
    }
}

impl MaterialKeyword for MatRigid {
    fn mid(&self) -> MaterialId {
        self.mid
    }

    fn subtype(&self) -> &'static str {
        "RIGID"
    }

    fn density(&self) -> f64 {
        self.ro
    }
}

impl Keyword for MatRigid {
    fn name(&self) -> &str {
        self.naming.pick(&Self::NAMES)
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(self.name(), lines);
        self.naming.parse_title(&mut cards)?;

        let mut r = FieldReader::new(cards.require("card 1")?, format);
        self.mid = r.int().unwrap_or(0);
        self.ro = r.real().unwrap_or(0.0);
        self.e = r.real().unwrap_or(0.0);
        self.pr = r.real().unwrap_or(0.0);
        self.n = r.real().unwrap_or(0.0);
        self.couple = r.real().unwrap_or(0.0);
        self.m = r.real().unwrap_or(0.0);
        self.alias = r.text(format.real_width()).unwrap_or_default();

        let card2 = cards.next_card().unwrap_or_default();
        let mut r = FieldReader::new(card2, format);
        self.cmo = r.real().unwrap_or(0.0);
        self.con1 = r.real().unwrap_or(0.0);
        self.con2 = r.real().unwrap_or(0.0);

        let card3 = cards.next_card().unwrap_or_default();
        let mut r = FieldReader::new(card3, format);
        for value in self.orientation.iter_mut() {
            *value = r.real().unwrap_or(0.0);
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(self.name(), format);
        self.naming.write_title(&mut out)?;
        out.card(|w| {
            w.int(self.mid)
                .real(self.ro)
                .real(self.e)
                .real(self.pr)
                .real(self.n)
                .real(self.couple)
                .real(self.m)
                .text(&self.alias, format.real_width());
        })?;
        out.card(|w| {
            w.real(self.cmo).real(self.con1).real(self.con2);
        })?;
        out.card(|w| {
            for value in self.orientation {
                w.real(value);
            }
        })?;
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_mat_rigid);
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatPiecewiseLinearPlasticity {
    pub naming: MaterialNaming,
    pub mid: MaterialId,
    pub ro: f64,
    pub e: f64,
    pub pr: f64,
    pub sigy: f64,
    pub etan: f64,
    pub fail: f64,
    pub tdel: f64,
    pub c: f64,
    pub p: f64,
    pub lcss: i64,
    pub lcsr: i64,
    pub vp: f64,
    /// EPS1..EPS8 effective plastic strain values.
    pub eps: [f64; 8],
    /// ES1..ES8 corresponding yield stress values.
    pub es: [f64; 8],
}

impl Default for MatPiecewiseLinearPlasticity {
    fn default() -> Self {
        Self {
            naming: MaterialNaming::default(),
            mid: 0,
            ro: 0.0,
            e: 0.0,
            pr: 0.0,
            sigy: 0.0,
            etan: 0.0,
            fail: 1.0e21,
            tdel: 0.0,
            c: 0.0,
            p: 0.0,
            lcss: 0,
            lcsr: 0,
            vp: 0.0,
            eps: [0.0; 8],
            es: [0.0; 8],
        }
    }
}

impl MatPiecewiseLinearPlasticity {
    pub const NAMES: [&'static str; 4] = [
        "*MAT_PIECEWISE_LINEAR_PLASTICITY",
        "*MAT_PIECEWISE_LINEAR_PLASTICITY_TITLE",
        "*MAT_024",
        "*MAT_024_TITLE",
    ];
}

impl MaterialKeyword for MatPiecewiseLinearPlasticity {
    fn mid(&self) -> MaterialId {
        self.mid
    }

    fn subtype(&self) -> &'static str {
        "PIECEWISE_LINEAR_PLASTICITY"
    }

    fn density(&self) -> f64 {
        self.ro
    }
}

impl Keyword for MatPiecewiseLinearPlasticity {
    fn name(&self) -> &str {
        self.naming.pick(&Self::NAMES)
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let defaults = Self::default();
        let mut cards = CardCursor::new(self.name(), lines);
        self.naming.parse_title(&mut cards)?;

        let mut r = FieldReader::new(cards.require("card 1")?, format);
        self.mid = r.int().unwrap_or(0);
        self.ro = r.real().unwrap_or(0.0);
        self.e = r.real().unwrap_or(0.0);
        self.pr = r.real().unwrap_or(0.0);
        self.sigy = r.real().unwrap_or(0.0);
        self.etan = r.real().unwrap_or(0.0);
        self.fail = r.real().unwrap_or(defaults.fail);
        self.tdel = r.real().unwrap_or(0.0);

        let mut r = FieldReader::new(cards.require("card 2")?, format);
        self.c = r.real().unwrap_or(0.0);
        self.p = r.real().unwrap_or(0.0);
        self.lcss = r.int().unwrap_or(0);
        self.lcsr = r.int().unwrap_or(0);
        self.vp = r.real().unwrap_or(0.0);

        let mut r = FieldReader::new(cards.next_card().unwrap_or_default(), format);
        for value in self.eps.iter_mut() {
            *value = r.real().unwrap_or(0.0);
        }
        let mut r = FieldReader::new(cards.next_card().unwrap_or_default(), format);
        for value in self.es.iter_mut() {
            *value = r.real().unwrap_or(0.0);
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(self.name(), format);
        self.naming.write_title(&mut out)?;
        out.card(|w| {
            w.int(self.mid)
                .real(self.ro)
                .real(self.e)
                .real(self.pr)
                .real(self.sigy)
                .real(self.etan)
                .real(self.fail)
                .real(self.tdel);
        })?;
        out.card(|w| {
            w.real(self.c)
                .real(self.p)
                .int(self.lcss)
                .int(self.lcsr)
                .real(self.vp);
        })?;
        for row in [&self.eps, &self.es] {
            out.card(|w| {
                for value in row {
                    w.real(*value);
                }
            })?;
        }
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_mat_piecewise_linear_plasticity);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_alias_keeps_its_spelling() {
        let mut kw = MatElastic {
            naming: MaterialNaming {
                numeric: true,
                title: None,
            },
            ..MatElastic::default()
        };
        kw.parse(
            &["         1   7.85e-9  210000.0       0.3".to_string()],
            Format::Standard,
        )
        .unwrap();
        assert_eq!(kw.name(), "*MAT_001");
        assert_eq!(kw.mid, 1);
        assert_eq!(kw.ro, 7.85e-9);
        assert_eq!(kw.e, 210_000.0);
        assert_eq!(kw.pr, 0.3);
    }

    #[test]
    fn rigid_material_tolerates_missing_optional_cards() {
        let mut kw = MatRigid::default();
        kw.parse(
            &["         9   7.85e-9  210000.0       0.3".to_string()],
            Format::Standard,
        )
        .unwrap();
        assert_eq!(kw.mid, 9);
        assert_eq!(kw.cmo, 0.0);
        assert_eq!(kw.write(Format::Standard).unwrap().len(), 3);
    }

    #[test]
    fn plasticity_default_failure_strain_round_trips() {
        let mut kw = MatPiecewiseLinearPlasticity {
            mid: 3,
            sigy: 250.0,
            ..MatPiecewiseLinearPlasticity::default()
        };
        kw.eps[1] = 0.2;
        kw.es[1] = 400.0;

        let lines = kw.write(Format::Standard).unwrap();
        let mut back = MatPiecewiseLinearPlasticity::default();
        back.parse(&lines, Format::Standard).unwrap();
        assert_eq!(back, kw);
        assert_eq!(back.fail, 1.0e21);
    }

    #[test]
    fn title_variant_reads_title_card() {
        let mut kw = MatElastic {
            naming: MaterialNaming {
                numeric: false,
                title: Some(String::new()),
            },
            ..MatElastic::default()
        };
        kw.parse(
            &["Steel DP600".to_string(), "         2".to_string()],
            Format::Standard,
        )
        .unwrap();
        assert_eq!(kw.name(), "*MAT_ELASTIC_TITLE");
        assert_eq!(kw.naming.title.as_deref(), Some("Steel DP600"));
        assert_eq!(kw.subtype(), "ELASTIC");
    }
}
