//! Loads and load curves: `*LOAD_SEGMENT_SET`, `*LOAD_NODE_SET`,
//! `*DEFINE_CURVE(_TITLE)`.

use dyna_card::{FieldReader, Format};
use log::warn;

use crate::error::KeywordError;
use crate::keyword::{CardCursor, CardSink, Keyword, keyword_boilerplate, read_title};
use crate::{CurveId, SetId};

/// Abscissa and ordinate columns of `*DEFINE_CURVE` are 20 wide in both
/// profiles.
const CURVE_POINT_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentLoad {
    pub ssid: SetId,
    pub lcid: CurveId,
    pub sf: f64,
    /// Arrival time.
    pub at: f64,
}

/// Pressure on the segments of a segment set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadSegmentSet {
    pub loads: Vec<SegmentLoad>,
}

impl LoadSegmentSet {
    pub const NAME: &'static str = "*LOAD_SEGMENT_SET";
}

impl Keyword for LoadSegmentSet {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(Self::NAME, lines);
        self.loads.clear();
        while let Some(line) = cards.next_card() {
            if line.trim().is_empty() {
                continue;
            }
            let mut r = FieldReader::new(line, format);
            let Some(ssid) = r.int() else {
                warn!("{}: skipping card without SSID: {line:?}", Self::NAME);
                continue;
            };
            self.loads.push(SegmentLoad {
                ssid,
                lcid: r.int().unwrap_or(0),
                sf: r.real().unwrap_or(1.0),
                at: r.real().unwrap_or(0.0),
            });
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(Self::NAME, format);
        for load in &self.loads {
            out.card(|w| {
                w.int(load.ssid).int(load.lcid).real(load.sf).real(load.at);
            })?;
        }
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_load_segment_set);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSetLoad {
    pub nsid: SetId,
    pub dof: i64,
    pub lcid: CurveId,
    pub sf: f64,
    pub cid: i64,
    pub m: [i64; 3],
}

/// Concentrated forces on the nodes of a node set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadNodeSet {
    pub loads: Vec<NodeSetLoad>,
}

impl LoadNodeSet {
    pub const NAME: &'static str = "*LOAD_NODE_SET";
}

impl Keyword for LoadNodeSet {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(Self::NAME, lines);
        self.loads.clear();
        while let Some(line) = cards.next_card() {
            if line.trim().is_empty() {
                continue;
            }
            let mut r = FieldReader::new(line, format);
            let Some(nsid) = r.int() else {
                warn!("{}: skipping card without NSID: {line:?}", Self::NAME);
                continue;
            };
            let dof = r.int().unwrap_or(0);
            let lcid = r.int().unwrap_or(0);
            let sf = r.real().unwrap_or(1.0);
            let cid = r.int().unwrap_or(0);
            let mut m = [0; 3];
            for value in m.iter_mut() {
                *value = r.int().unwrap_or(0);
            }
            self.loads.push(NodeSetLoad {
                nsid,
                dof,
                lcid,
                sf,
                cid,
                m,
            });
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(Self::NAME, format);
        for load in &self.loads {
            out.card(|w| {
                w.int(load.nsid)
                    .int(load.dof)
                    .int(load.lcid)
                    .real(load.sf)
                    .int(load.cid);
                for value in load.m {
                    w.int(value);
                }
            })?;
        }
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_load_node_set);
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefineCurve {
    pub title: Option<String>,
    pub lcid: CurveId,
    pub sidr: i64,
    pub sfa: f64,
    pub sfo: f64,
    pub offa: f64,
    pub offo: f64,
    pub dattyp: i64,
    /// `(abscissa, ordinate)` pairs.
    pub points: Vec<(f64, f64)>,
}

impl Default for DefineCurve {
    fn default() -> Self {
        Self {
            title: None,
            lcid: 0,
            sidr: 0,
            sfa: 1.0,
            sfo: 1.0,
            offa: 0.0,
            offo: 0.0,
            dattyp: 0,
            points: Vec::new(),
        }
    }
}

impl DefineCurve {
    pub const NAME: &'static str = "*DEFINE_CURVE";
    pub const NAME_TITLE: &'static str = "*DEFINE_CURVE_TITLE";

    pub fn new(lcid: CurveId, points: Vec<(f64, f64)>) -> Self {
        Self {
            lcid,
            points,
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

impl Keyword for DefineCurve {
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
        if self.title.is_some() {
            self.title = Some(read_title(cards.require("title")?));
        }

        let mut r = FieldReader::new(cards.require("card 1")?, format);
        self.lcid = r.int().unwrap_or(0);
        self.sidr = r.int().unwrap_or(defaults.sidr);
        self.sfa = r.real().unwrap_or(defaults.sfa);
        self.sfo = r.real().unwrap_or(defaults.sfo);
        self.offa = r.real().unwrap_or(defaults.offa);
        self.offo = r.real().unwrap_or(defaults.offo);
        self.dattyp = r.int().unwrap_or(defaults.dattyp);

        self.points.clear();
        while let Some(line) = cards.next_card() {
            if line.trim().is_empty() {
                continue;
            }
            let mut r = FieldReader::new(line, format);
            let a = r.real_w(CURVE_POINT_WIDTH).unwrap_or(0.0);
            let o = r.real_w(CURVE_POINT_WIDTH).unwrap_or(0.0);
            self.points.push((a, o));
        }
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(self.name(), format);
        if let Some(title) = &self.title {
            out.card(|w| {
                w.text(title, dyna_card::CARD_WIDTH);
            })?;
        }
        out.card(|w| {
            w.int(self.lcid)
                .int(self.sidr)
                .real(self.sfa)
                .real(self.sfo)
                .real(self.offa)
                .real(self.offo)
                .int(self.dattyp);
        })?;
        for (a, o) in &self.points {
            out.card(|w| {
                w.real_w(*a, CURVE_POINT_WIDTH)
                    .real_w(*o, CURVE_POINT_WIDTH);
            })?;
        }
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_define_curve);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_points_use_wide_columns() {
        let lines: Vec<String> = [
            "$#    lcid      sidr       sfa       sfo",
            "         7                           2.0",
            "$#                a1                  o1",
            "                 0.0                 0.0",
            "               0.001             1.0e+05",
        ]
        .iter()
        .map(|l| l.to_string())
        .collect();
        let mut kw = DefineCurve::default();
        kw.parse(&lines, Format::Standard).unwrap();
        assert_eq!(kw.lcid, 7);
        assert_eq!(kw.sfa, 1.0);
        assert_eq!(kw.sfo, 2.0);
        assert_eq!(kw.points, vec![(0.0, 0.0), (0.001, 1.0e5)]);
    }

    #[test]
    fn titled_curve_round_trips() {
        let mut kw = DefineCurve::new(3, vec![(0.0, 0.0), (0.5, 12.25)]);
        kw.title = Some("pulse".to_string());
        let written = kw.write(Format::Large).unwrap();
        let mut back = DefineCurve::titled();
        back.parse(&written, Format::Large).unwrap();
        assert_eq!(back, kw);
    }

    #[test]
    fn loads_default_scale_factor_to_one() {
        let lines = vec!["         2         3".to_string()];
        let mut kw = LoadSegmentSet::default();
        kw.parse(&lines, Format::Standard).unwrap();
        assert_eq!(
            kw.loads,
            vec![SegmentLoad {
                ssid: 2,
                lcid: 3,
                sf: 1.0,
                at: 0.0
            }]
        );

        let mut kw = LoadNodeSet::default();
        kw.parse(
            &["         1         3        10      -2.5".to_string()],
            Format::Standard,
        )
        .unwrap();
        assert_eq!(kw.loads[0].dof, 3);
        assert_eq!(kw.loads[0].sf, -2.5);
    }
}
