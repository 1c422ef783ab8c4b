//! `*CONTACT_*` keywords sharing the three mandatory-layout cards.

use dyna_card::{FieldReader, Format};

use crate::SetId;
use crate::error::KeywordError;
use crate::keyword::{CardCursor, CardSink, Keyword, keyword_boilerplate};

const HEADING_WIDTH: usize = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactKind {
    AutomaticSurfaceToSurface,
    AutomaticSingleSurface,
    TiedSurfaceToSurface,
}

impl ContactKind {
    pub const ALL: [ContactKind; 3] = [
        ContactKind::AutomaticSurfaceToSurface,
        ContactKind::AutomaticSingleSurface,
        ContactKind::TiedSurfaceToSurface,
    ];

    fn stem(self) -> &'static str {
        match self {
            ContactKind::AutomaticSurfaceToSurface => "*CONTACT_AUTOMATIC_SURFACE_TO_SURFACE",
            ContactKind::AutomaticSingleSurface => "*CONTACT_AUTOMATIC_SINGLE_SURFACE",
            ContactKind::TiedSurfaceToSurface => "*CONTACT_TIED_SURFACE_TO_SURFACE",
        }
    }

    /// Whether a `_MORTAR` variant exists for this contact type.
    pub fn has_mortar(self) -> bool {
        !matches!(self, ContactKind::TiedSurfaceToSurface)
    }
}

/// Optional `_ID` card.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactId {
    pub cid: i64,
    pub heading: String,
}

/// Card 1: the two surfaces in contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactSurfaces {
    pub ssid: SetId,
    pub msid: SetId,
    pub sstyp: i64,
    pub mstyp: i64,
    pub sboxid: i64,
    pub mboxid: i64,
    pub spr: i64,
    pub mpr: i64,
}

/// Card 2: friction, damping and activation window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactFriction {
    pub fs: f64,
    pub fd: f64,
    pub dc: f64,
    pub vc: f64,
    pub vdc: f64,
    pub penchk: i64,
    pub bt: f64,
    pub dt: f64,
}

impl Default for ContactFriction {
    fn default() -> Self {
        Self {
            fs: 0.0,
            fd: 0.0,
            dc: 0.0,
            vc: 0.0,
            vdc: 0.0,
            penchk: 0,
            bt: 0.0,
            dt: 1.0e20,
        }
    }
}

/// Card 3: penalty and thickness scale factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactScaling {
    pub sfs: f64,
    pub sfm: f64,
    pub sst: f64,
    pub mst: f64,
    pub sfst: f64,
    pub sfmt: f64,
    pub fsf: f64,
    pub vsf: f64,
}

impl Default for ContactScaling {
    fn default() -> Self {
        Self {
            sfs: 1.0,
            sfm: 1.0,
            sst: 0.0,
            mst: 0.0,
            sfst: 1.0,
            sfmt: 1.0,
            fsf: 1.0,
            vsf: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    name: String,
    kind: ContactKind,
    mortar: bool,
    /// Present exactly when the keyword is an `_ID` variant.
    id: Option<ContactId>,
    pub surfaces: ContactSurfaces,
    pub friction: ContactFriction,
    pub scaling: ContactScaling,
}

impl Contact {
    pub fn new(kind: ContactKind) -> Self {
        Self::variant(kind, false, false)
    }

    /// `mortar` is ignored for kinds without a mortar variant.
    pub fn variant(kind: ContactKind, mortar: bool, with_id: bool) -> Self {
        let mortar = mortar && kind.has_mortar();
        let mut name = kind.stem().to_string();
        if mortar {
            name.push_str("_MORTAR");
        }
        if with_id {
            name.push_str("_ID");
        }
        Self {
            name,
            kind,
            mortar,
            id: with_id.then(ContactId::default),
            surfaces: ContactSurfaces::default(),
            friction: ContactFriction::default(),
            scaling: ContactScaling::default(),
        }
    }

    /// Every registered name, one prototype each.
    pub fn variants() -> Vec<Self> {
        let mut all = Vec::new();
        for kind in ContactKind::ALL {
            for mortar in [false, true] {
                if mortar && !kind.has_mortar() {
                    continue;
                }
                for with_id in [false, true] {
                    all.push(Self::variant(kind, mortar, with_id));
                }
            }
        }
        all
    }

    pub fn kind(&self) -> ContactKind {
        self.kind
    }

    pub fn is_mortar(&self) -> bool {
        self.mortar
    }

    pub fn id(&self) -> Option<&ContactId> {
        self.id.as_ref()
    }

    /// Sets the id card; only `_ID` variants carry one.
    pub fn set_id(&mut self, cid: i64, heading: impl Into<String>) -> bool {
        match &mut self.id {
            Some(id) => {
                id.cid = cid;
                id.heading = heading.into();
                true
            }
            None => false,
        }
    }
}

impl Keyword for Contact {
    fn name(&self) -> &str {
        &self.name
    }

    fn parse(&mut self, lines: &[String], format: Format) -> Result<(), KeywordError> {
        let mut cards = CardCursor::new(self.name.as_str(), lines);

        if self.id.is_some() {
            let mut r = FieldReader::new(cards.require("id card")?, format);
            self.id = Some(ContactId {
                cid: r.int().unwrap_or(0),
                heading: r.text(HEADING_WIDTH).unwrap_or_default(),
            });
        }

        let mut r = FieldReader::new(cards.require("card 1")?, format);
        self.surfaces = ContactSurfaces {
            ssid: r.int().unwrap_or(0),
            msid: r.int().unwrap_or(0),
            sstyp: r.int().unwrap_or(0),
            mstyp: r.int().unwrap_or(0),
            sboxid: r.int().unwrap_or(0),
            mboxid: r.int().unwrap_or(0),
            spr: r.int().unwrap_or(0),
            mpr: r.int().unwrap_or(0),
        };

        let defaults = ContactFriction::default();
        let mut r = FieldReader::new(cards.next_card().unwrap_or_default(), format);
        self.friction = ContactFriction {
            fs: r.real().unwrap_or(defaults.fs),
            fd: r.real().unwrap_or(defaults.fd),
            dc: r.real().unwrap_or(defaults.dc),
            vc: r.real().unwrap_or(defaults.vc),
            vdc: r.real().unwrap_or(defaults.vdc),
            penchk: r.int().unwrap_or(defaults.penchk),
            bt: r.real().unwrap_or(defaults.bt),
            dt: r.real().unwrap_or(defaults.dt),
        };

        let defaults = ContactScaling::default();
        let mut r = FieldReader::new(cards.next_card().unwrap_or_default(), format);
        self.scaling = ContactScaling {
            sfs: r.real().unwrap_or(defaults.sfs),
            sfm: r.real().unwrap_or(defaults.sfm),
            sst: r.real().unwrap_or(defaults.sst),
            mst: r.real().unwrap_or(defaults.mst),
            sfst: r.real().unwrap_or(defaults.sfst),
            sfmt: r.real().unwrap_or(defaults.sfmt),
            fsf: r.real().unwrap_or(defaults.fsf),
            vsf: r.real().unwrap_or(defaults.vsf),
        };
        Ok(())
    }

    fn write(&self, format: Format) -> Result<Vec<String>, KeywordError> {
        let mut out = CardSink::new(&self.name, format);
        if let Some(id) = &self.id {
            out.card(|w| {
                w.int(id.cid).text(&id.heading, HEADING_WIDTH);
            })?;
        }
        let s = &self.surfaces;
        out.card(|w| {
            w.int(s.ssid)
                .int(s.msid)
                .int(s.sstyp)
                .int(s.mstyp)
                .int(s.sboxid)
                .int(s.mboxid)
                .int(s.spr)
                .int(s.mpr);
        })?;
        let f = &self.friction;
        out.card(|w| {
            w.real(f.fs)
                .real(f.fd)
                .real(f.dc)
                .real(f.vc)
                .real(f.vdc)
                .int(f.penchk)
                .real(f.bt)
                .real(f.dt);
        })?;
        let c = &self.scaling;
        out.card(|w| {
            w.real(c.sfs)
                .real(c.sfm)
                .real(c.sst)
                .real(c.mst)
                .real(c.sfst)
                .real(c.sfmt)
                .real(c.fsf)
                .real(c.vsf);
        })?;
        Ok(out.finish())
    }

    keyword_boilerplate!(visit_contact);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_names() {
        let names: Vec<String> = Contact::variants()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names.len(), 10);
        assert!(names.contains(&"*CONTACT_AUTOMATIC_SINGLE_SURFACE_MORTAR_ID".to_string()));
        assert!(names.contains(&"*CONTACT_TIED_SURFACE_TO_SURFACE_ID".to_string()));
        assert!(!names.iter().any(|n| n.starts_with("*CONTACT_TIED") && n.contains("MORTAR")));
    }

    #[test]
    fn optional_cards_take_defaults() {
        let lines = vec!["         1         2         0         0".to_string()];
        let mut kw = Contact::new(ContactKind::AutomaticSurfaceToSurface);
        kw.parse(&lines, Format::Standard).unwrap();
        assert_eq!(kw.surfaces.ssid, 1);
        assert_eq!(kw.surfaces.msid, 2);
        assert_eq!(kw.friction.dt, 1.0e20);
        assert_eq!(kw.scaling.sfs, 1.0);
    }

    #[test]
    fn id_variant_requires_id_card_and_round_trips() {
        let mut kw = Contact::variant(ContactKind::AutomaticSingleSurface, true, true);
        assert!(kw.set_id(4, "floor"));
        kw.surfaces.ssid = 9;
        kw.surfaces.sstyp = 2;
        kw.friction.fs = 0.2;

        let written = kw.write(Format::Standard).unwrap();
        assert_eq!(written.len(), 4);
        let mut back = Contact::variant(ContactKind::AutomaticSingleSurface, true, true);
        back.parse(&written, Format::Standard).unwrap();
        assert_eq!(back, kw);

        let mut empty = Contact::variant(ContactKind::TiedSurfaceToSurface, false, true);
        assert_eq!(
            empty.parse(&[], Format::Standard),
            Err(KeywordError::missing(
                "*CONTACT_TIED_SURFACE_TO_SURFACE_ID",
                "id card"
            ))
        );
    }

    #[test]
    fn plain_variant_has_no_id() {
        let mut kw = Contact::new(ContactKind::TiedSurfaceToSurface);
        assert!(!kw.set_id(1, "x"));
        assert!(kw.id().is_none());
        assert!(!Contact::variant(ContactKind::TiedSurfaceToSurface, true, false).is_mortar());
    }
}
