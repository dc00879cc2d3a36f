//! Font capability seam.
//!
//! The builder never loads or embeds fonts. It asks a [`Font`] for the
//! handful of facts text emission needs: a resource name, an object
//! reference, metrics, and the wire encoding of a string. Anything that
//! can answer those questions can be selected with `font()`.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::model::objects::{NamedObject, ObjRef};
use crate::utils::escape_pdf_string;

/// Shared handle to a font implementation.
///
/// Fonts are selected into text state and held across calls, so they are
/// reference counted. The builder is single-threaded by design.
pub type FontRef = Rc<dyn Font>;

pub trait Font {
    /// Resource name the font is registered under (e.g. "F1").
    fn name(&self) -> &str;

    /// Indirect reference to the font dictionary.
    fn obj_ref(&self) -> ObjRef;

    /// Advance width of `text` at font size 1, in user units.
    ///
    /// Word and character spacing are applied by the caller on top of
    /// this.
    fn width(&self, text: &str) -> f64;

    /// Serializes `text` into its PDF string form, delimiters included.
    ///
    /// The default produces an escaped literal string; fonts with
    /// non-trivial encodings return a hex string instead.
    fn encode_text(&self, text: &str) -> String {
        format!("({})", escape_pdf_string(text))
    }

    /// Underline position in thousandths of an em, negative below the
    /// baseline.
    fn underline_position(&self) -> f64 {
        -100.0
    }

    /// Underline thickness in thousandths of an em.
    fn underline_thickness(&self) -> f64 {
        50.0
    }

    /// The resource registrations this font needs.
    ///
    /// Composite fonts that fan out over several underlying font
    /// dictionaries override this to return every member; selection then
    /// registers them all and writes `Tf` against the first.
    fn components(&self) -> Vec<NamedObject> {
        vec![NamedObject::new(self.name(), self.obj_ref())]
    }
}

/// Metrics-backed font for callers that manage font programs elsewhere.
///
/// Widths are per-character in thousandths of an em, with a flat
/// fallback for unmapped characters.
pub struct SimpleFont {
    name: String,
    obj_ref: ObjRef,
    widths: FxHashMap<char, f64>,
    default_width: f64,
    underline_position: f64,
    underline_thickness: f64,
}

impl SimpleFont {
    pub fn new(name: impl Into<String>, obj_ref: ObjRef) -> Self {
        Self {
            name: name.into(),
            obj_ref,
            widths: FxHashMap::default(),
            default_width: 500.0,
            underline_position: -100.0,
            underline_thickness: 50.0,
        }
    }

    /// Sets the advance width for one character, in thousandths.
    pub fn with_width(mut self, ch: char, width: f64) -> Self {
        self.widths.insert(ch, width);
        self
    }

    /// Sets the fallback advance width, in thousandths.
    pub fn with_default_width(mut self, width: f64) -> Self {
        self.default_width = width;
        self
    }

    /// Sets the underline metrics, both in thousandths.
    pub fn with_underline(mut self, position: f64, thickness: f64) -> Self {
        self.underline_position = position;
        self.underline_thickness = thickness;
        self
    }
}

impl Font for SimpleFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn obj_ref(&self) -> ObjRef {
        self.obj_ref
    }

    fn width(&self, text: &str) -> f64 {
        text.chars()
            .map(|c| self.widths.get(&c).copied().unwrap_or(self.default_width))
            .sum::<f64>()
            / 1000.0
    }

    fn underline_position(&self) -> f64 {
        self.underline_position
    }

    fn underline_thickness(&self) -> f64 {
        self.underline_thickness
    }
}
