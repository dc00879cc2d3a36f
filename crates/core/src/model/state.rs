//! Tracked graphics and text state.
//!
//! The builder mirrors every parameter it writes into the stream so that
//! callers can read the current value back without parsing operators.
//! These structs are that mirror. They carry no behavior beyond defaults
//! and the dash-pattern serialization.

use itertools::Itertools;

use crate::font::FontRef;
use crate::geometry::Transform;
use crate::model::color::ColorSpec;
use crate::utils::{Point, fmt_number};

/// Stroke dash pattern: alternating on/off lengths plus a phase offset.
///
/// An empty array means a solid line.
#[derive(Debug, Clone, PartialEq)]
pub struct DashPattern {
    /// Alternating dash and gap lengths in user units.
    pub array: Vec<f64>,
    /// Distance into the pattern at which the stroke starts.
    pub phase: f64,
}

impl DashPattern {
    /// Full pattern with an explicit phase.
    pub fn new(array: Vec<f64>, phase: f64) -> Self {
        Self { array, phase }
    }

    /// Solid line; resets any previous pattern.
    pub fn solid() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    /// Dashes and gaps of one shared length.
    pub fn equal(length: f64) -> Self {
        Self::new(vec![length], 0.0)
    }

    /// Dashes of one length separated by gaps of another.
    pub fn on_off(on: f64, off: f64) -> Self {
        Self::new(vec![on, off], 0.0)
    }

    pub fn is_solid(&self) -> bool {
        self.array.is_empty()
    }

    /// Serialized `d` operator fragment.
    pub fn operators(&self) -> String {
        let lengths = self.array.iter().map(|v| fmt_number(*v)).join(" ");
        format!("[{lengths}] {} d", fmt_number(self.phase))
    }
}

impl Default for DashPattern {
    fn default() -> Self {
        Self::solid()
    }
}

/// Decomposed transform components tracked alongside the raw matrix.
///
/// Absolute transforms replace these wholesale; relative transforms read
/// them back, combine, and replace. Raw matrix writes leave them stale,
/// which matches how they are meant to be used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParts {
    /// Translation in user units.
    pub translate: Point,
    /// Rotation in degrees, counter-clockwise.
    pub rotate: f64,
    /// Scale factors along x and y.
    pub scale: (f64, f64),
    /// Skew angles in degrees along x and y.
    pub skew: (f64, f64),
}

impl TransformParts {
    pub fn identity() -> Self {
        Self {
            translate: (0.0, 0.0),
            rotate: 0.0,
            scale: (1.0, 1.0),
            skew: (0.0, 0.0),
        }
    }

    /// The components as a composable transform.
    pub fn to_transform(&self) -> Transform {
        Transform {
            matrix: None,
            skew: Some(self.skew),
            scale: Some(self.scale),
            rotate: Some(self.rotate),
            translate: Some(self.translate),
        }
    }
}

impl Default for TransformParts {
    fn default() -> Self {
        Self::identity()
    }
}

/// Mirrored graphics parameters: line style and paint colors.
#[derive(Debug, Clone)]
pub struct GraphicsState {
    /// Stroke line width, `w`.
    pub linewidth: f64,
    /// Line cap style 0..2, `J`.
    pub linecap: i32,
    /// Line join style 0..2, `j`.
    pub linejoin: i32,
    /// Miter limit, `M`.
    pub miterlimit: f64,
    /// Dash pattern, `d`.
    pub dash: DashPattern,
    /// Flatness tolerance, `i`.
    pub flatness: f64,
    /// Non-stroking paint.
    pub fillcolor: ColorSpec,
    /// Stroking paint.
    pub strokecolor: ColorSpec,
}

impl GraphicsState {
    /// Content-stream defaults as the PDF imaging model defines them.
    pub fn new() -> Self {
        Self {
            linewidth: 1.0,
            linecap: 0,
            linejoin: 0,
            miterlimit: 10.0,
            dash: DashPattern::solid(),
            flatness: 1.0,
            fillcolor: ColorSpec::Gray(0.0),
            strokecolor: ColorSpec::Gray(0.0),
        }
    }
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self::new()
    }
}

/// Mirrored text parameters.
///
/// `font` holds the caller's font object; `font_pending` marks a selection
/// staged through a bulk patch whose `Tf` has not been written yet.
#[derive(Clone)]
pub struct TextState {
    /// Selected font, if any.
    pub font: Option<FontRef>,
    /// Font size in user units.
    pub fontsize: f64,
    /// Whether the current font still needs its `Tf` written.
    pub font_pending: bool,
    /// Character spacing, `Tc`.
    pub charspace: f64,
    /// Word spacing, `Tw`.
    pub wordspace: f64,
    /// Horizontal scaling percentage, `Tz`. 100 is unscaled.
    pub hscale: f64,
    /// Leading, `TL`.
    pub leading: f64,
    /// Rise above the baseline, `Ts`.
    pub rise: f64,
    /// Rendering mode 0..7, `Tr`.
    pub render: i32,
}

impl TextState {
    pub fn new() -> Self {
        Self {
            font: None,
            fontsize: 0.0,
            font_pending: false,
            charspace: 0.0,
            wordspace: 0.0,
            hscale: 100.0,
            leading: 0.0,
            rise: 0.0,
            render: 0,
        }
    }

    /// Returns every parameter to its default, dropping any font
    /// selection along with the scalars.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for TextState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextState")
            .field("font", &self.font.as_ref().map(|font| font.name()))
            .field("fontsize", &self.fontsize)
            .field("font_pending", &self.font_pending)
            .field("charspace", &self.charspace)
            .field("wordspace", &self.wordspace)
            .field("hscale", &self.hscale)
            .field("leading", &self.leading)
            .field("rise", &self.rise)
            .field("render", &self.render)
            .finish()
    }
}

/// Partial text state used to apply several parameters at once.
///
/// `None` fields are left untouched. Build one with struct-update syntax
/// over [`TextStatePatch::default`].
#[derive(Clone, Default)]
pub struct TextStatePatch {
    pub font: Option<(FontRef, f64)>,
    pub charspace: Option<f64>,
    pub wordspace: Option<f64>,
    pub hscale: Option<f64>,
    pub leading: Option<f64>,
    pub rise: Option<f64>,
    pub render: Option<i32>,
}
