//! Color specifications and their stream-operator forms.
//!
//! A [`ColorSpec`] is the tagged union behind `fillcolor`/`strokecolor`:
//! five numeric color models plus pattern and custom-colorspace
//! references. [`ColorSpec::parse`] is the adapter that turns the compact
//! string syntax (named colors, `#` RGB, `!` HSV, `%` CMYK, `&` HSL,
//! `$` L*a*b, all hex-encoded) into a tagged value, and
//! [`ColorSpec::operators`] normalizes a value into the operator fragment
//! to append, registering any colorspace resources it needs on the way.
//!
//! Numeric channels are never rejected: NaN falls back to 0 and
//! out-of-range values are clamped to the nearest bound at emission time.
//! Only an empty or unrecognizable specification is an error.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::error::{PdfError, Result};
use crate::model::objects::{LabColorSpace, NamedObject, ResourceObject};
use crate::resources::{ResourceCategory, ResourceTable};
use crate::utils::fmt_number;

/// Resource name of the lazily-created L*a*b colorspace.
pub const LAB_SPACE_NAME: &str = "LabS";

/// A color specification as given by the caller, stored unclamped.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    /// Single gray channel in 0..1.
    Gray(f64),
    /// Red, green, blue in 0..1.
    Rgb(f64, f64, f64),
    /// Cyan, magenta, yellow, black in 0..1.
    Cmyk(f64, f64, f64, f64),
    /// Hue in degrees 0..360, saturation and value in 0..1.
    /// Converted to RGB when emitted.
    Hsv(f64, f64, f64),
    /// Hue in degrees 0..360, saturation and lightness in 0..1.
    /// Converted to L*a*b when emitted.
    Hsl(f64, f64, f64),
    /// L* in 0..100, a* and b* in -100..100.
    Lab(f64, f64, f64),
    /// A pattern or shading object used as paint.
    Pattern(NamedObject),
    /// An indexed or otherwise custom colorspace plus its component values.
    Space {
        space: NamedObject,
        params: Vec<f64>,
    },
}

impl From<f64> for ColorSpec {
    fn from(gray: f64) -> Self {
        Self::Gray(gray)
    }
}

impl From<(f64, f64, f64)> for ColorSpec {
    fn from((r, g, b): (f64, f64, f64)) -> Self {
        Self::Rgb(r, g, b)
    }
}

impl From<(f64, f64, f64, f64)> for ColorSpec {
    fn from((c, m, y, k): (f64, f64, f64, f64)) -> Self {
        Self::Cmyk(c, m, y, k)
    }
}

impl ColorSpec {
    /// Parses the compact string syntax.
    ///
    /// The first character selects the model: a letter starts a named
    /// color, `#` an RGB hex value, `!` HSV, `%` CMYK, `&` HSL and `$`
    /// L*a*b. Hex payloads carry one to four digits per channel, so
    /// `#F00`, `#FF0000` and `#FFF000000` all mean red.
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim().to_ascii_lowercase();
        let Some(first) = spec.chars().next() else {
            return Err(PdfError::InvalidColorSpec(
                "empty color specification".to_string(),
            ));
        };
        let body = &spec[first.len_utf8()..];
        match first {
            '#' => {
                let ch = hex_channels(body, 3)?;
                Ok(Self::Rgb(ch[0], ch[1], ch[2]))
            }
            '!' => {
                let ch = hex_channels(body, 3)?;
                Ok(Self::Hsv(ch[0] * 360.0, ch[1], ch[2]))
            }
            '%' => {
                let ch = hex_channels(body, 4)?;
                Ok(Self::Cmyk(ch[0], ch[1], ch[2], ch[3]))
            }
            '&' => {
                let ch = hex_channels(body, 3)?;
                Ok(Self::Hsl(ch[0] * 360.0, ch[1], ch[2]))
            }
            '$' => {
                let ch = hex_channels(body, 3)?;
                Ok(Self::Lab(
                    ch[0] * 100.0,
                    ch[1] * 200.0 - 100.0,
                    ch[2] * 200.0 - 100.0,
                ))
            }
            c if c.is_ascii_alphabetic() => {
                let rgb = NAMED_COLORS.get(spec.as_str()).ok_or_else(|| {
                    PdfError::InvalidColorSpec(format!("unknown color name: {spec}"))
                })?;
                let r = f64::from((rgb >> 16) & 0xFF) / 255.0;
                let g = f64::from((rgb >> 8) & 0xFF) / 255.0;
                let b = f64::from(rgb & 0xFF) / 255.0;
                Ok(Self::Rgb(r, g, b))
            }
            _ => Err(PdfError::InvalidColorSpec(format!(
                "unrecognized specification: {spec}"
            ))),
        }
    }

    /// Normalizes the color into its operator fragment, registering any
    /// colorspace or pattern resource the fragment references.
    ///
    /// `stroke` selects the uppercase operator family; fill uses the
    /// lowercase one.
    pub fn operators(&self, stroke: bool, resources: &mut ResourceTable) -> Result<String> {
        match self {
            Self::Gray(v) => {
                let op = if stroke { "G" } else { "g" };
                Ok(format!("{} {op}", fmt_number(clamp_channel(*v, 0.0, 1.0))))
            }
            Self::Rgb(r, g, b) => Ok(rgb_operators(*r, *g, *b, stroke)),
            Self::Hsv(h, s, v) => {
                let h = clamp_channel(*h, 0.0, 360.0);
                let s = clamp_channel(*s, 0.0, 1.0);
                let v = clamp_channel(*v, 0.0, 1.0);
                let (r, g, b) = hsv_to_rgb(h, s, v);
                Ok(rgb_operators(r, g, b, stroke))
            }
            Self::Cmyk(c, m, y, k) => {
                let op = if stroke { "K" } else { "k" };
                let vals = [c, m, y, k].map(|v| fmt_number(clamp_channel(*v, 0.0, 1.0)));
                Ok(format!("{} {op}", vals.join(" ")))
            }
            Self::Hsl(h, s, l) => {
                let h = clamp_channel(*h, 0.0, 360.0);
                let s = clamp_channel(*s, 0.0, 1.0);
                let l = clamp_channel(*l, 0.0, 1.0);
                let (lum, a, b) = hsl_to_lab(h, s, l);
                Ok(lab_operators(lum, a, b, stroke, resources))
            }
            Self::Lab(l, a, b) => Ok(lab_operators(*l, *a, *b, stroke, resources)),
            Self::Pattern(obj) => {
                resources.register(
                    ResourceCategory::Pattern,
                    &obj.name,
                    ResourceObject::Ref(obj.obj_ref),
                );
                let (cs, scn) = if stroke { ("CS", "SCN") } else { ("cs", "scn") };
                Ok(format!("/Pattern {cs} /{} {scn}", obj.name))
            }
            Self::Space { space, params } => {
                resources.register(
                    ResourceCategory::ColorSpace,
                    &space.name,
                    ResourceObject::Ref(space.obj_ref),
                );
                let (cs, sc) = if stroke { ("CS", "SC") } else { ("cs", "sc") };
                let mut tokens = vec![format!("/{} {cs}", space.name)];
                tokens.extend(params.iter().map(|p| fmt_number(*p)));
                tokens.push(sc.to_string());
                Ok(tokens.join(" "))
            }
        }
    }
}

fn rgb_operators(r: f64, g: f64, b: f64, stroke: bool) -> String {
    let op = if stroke { "RG" } else { "rg" };
    let vals = [r, g, b].map(|v| fmt_number(clamp_channel(v, 0.0, 1.0)));
    format!("{} {op}", vals.join(" "))
}

fn lab_operators(l: f64, a: f64, b: f64, stroke: bool, resources: &mut ResourceTable) -> String {
    resources.register(
        ResourceCategory::ColorSpace,
        LAB_SPACE_NAME,
        ResourceObject::Lab(LabColorSpace::default()),
    );
    let (cs, sc) = if stroke { ("CS", "SC") } else { ("cs", "sc") };
    let vals = [
        fmt_number(clamp_channel(l, 0.0, 100.0)),
        fmt_number(clamp_channel(a, -100.0, 100.0)),
        fmt_number(clamp_channel(b, -100.0, 100.0)),
    ];
    format!("/{LAB_SPACE_NAME} {cs} {} {sc}", vals.join(" "))
}

/// Clamps a channel into its model range; NaN falls back to 0.
///
/// This is a silent correction, never an error.
pub fn clamp_channel(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(min, max)
    }
}

/// Splits a hex payload into `channels` equally-wide values scaled to 0..1.
fn hex_channels(body: &str, channels: usize) -> Result<Vec<f64>> {
    if body.is_empty()
        || body.len() % channels != 0
        || body.len() / channels > 4
        || !body.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return Err(PdfError::InvalidColorSpec(format!(
            "malformed hex color payload: {body}"
        )));
    }
    let width = body.len() / channels;
    let max = f64::from(16u32.pow(width as u32) - 1);
    Ok(body
        .as_bytes()
        .chunks(width)
        .map(|chunk| {
            // Chunks are validated ASCII hex, so both steps are infallible.
            let text = std::str::from_utf8(chunk).unwrap_or("0");
            f64::from(u32::from_str_radix(text, 16).unwrap_or(0)) / max
        })
        .collect())
}

/// Standard six-sector HSV to RGB conversion. Hue in degrees, the rest
/// in 0..1.
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let h = if h >= 360.0 { 0.0 } else { h };
    let h = h / 60.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Polar HSL to L*a*b mapping: lightness becomes L*, and saturation at the
/// hue angle becomes the (a*, b*) vector. Not colorimetric, but stable for
/// the ranges this builder emits.
fn hsl_to_lab(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let rad = h.to_radians();
    (100.0 * l, 100.0 * s * rad.cos(), 100.0 * s * rad.sin())
}

/// SVG color keywords, including the gray/grey spelling pairs.
static NAMED_COLORS: LazyLock<FxHashMap<&'static str, u32>> =
    LazyLock::new(|| NAMED_COLOR_VALUES.iter().copied().collect());

#[rustfmt::skip]
const NAMED_COLOR_VALUES: &[(&str, u32)] = &[
    ("aliceblue", 0xF0F8FF), ("antiquewhite", 0xFAEBD7), ("aqua", 0x00FFFF),
    ("aquamarine", 0x7FFFD4), ("azure", 0xF0FFFF), ("beige", 0xF5F5DC),
    ("bisque", 0xFFE4C4), ("black", 0x000000), ("blanchedalmond", 0xFFEBCD),
    ("blue", 0x0000FF), ("blueviolet", 0x8A2BE2), ("brown", 0xA52A2A),
    ("burlywood", 0xDEB887), ("cadetblue", 0x5F9EA0), ("chartreuse", 0x7FFF00),
    ("chocolate", 0xD2691E), ("coral", 0xFF7F50), ("cornflowerblue", 0x6495ED),
    ("cornsilk", 0xFFF8DC), ("crimson", 0xDC143C), ("cyan", 0x00FFFF),
    ("darkblue", 0x00008B), ("darkcyan", 0x008B8B), ("darkgoldenrod", 0xB8860B),
    ("darkgray", 0xA9A9A9), ("darkgreen", 0x006400), ("darkgrey", 0xA9A9A9),
    ("darkkhaki", 0xBDB76B), ("darkmagenta", 0x8B008B),
    ("darkolivegreen", 0x556B2F), ("darkorange", 0xFF8C00),
    ("darkorchid", 0x9932CC), ("darkred", 0x8B0000), ("darksalmon", 0xE9967A),
    ("darkseagreen", 0x8FBC8F), ("darkslateblue", 0x483D8B),
    ("darkslategray", 0x2F4F4F), ("darkslategrey", 0x2F4F4F),
    ("darkturquoise", 0x00CED1), ("darkviolet", 0x9400D3),
    ("deeppink", 0xFF1493), ("deepskyblue", 0x00BFFF), ("dimgray", 0x696969),
    ("dimgrey", 0x696969), ("dodgerblue", 0x1E90FF), ("firebrick", 0xB22222),
    ("floralwhite", 0xFFFAF0), ("forestgreen", 0x228B22),
    ("fuchsia", 0xFF00FF), ("gainsboro", 0xDCDCDC), ("ghostwhite", 0xF8F8FF),
    ("gold", 0xFFD700), ("goldenrod", 0xDAA520), ("gray", 0x808080),
    ("grey", 0x808080), ("green", 0x008000), ("greenyellow", 0xADFF2F),
    ("honeydew", 0xF0FFF0), ("hotpink", 0xFF69B4), ("indianred", 0xCD5C5C),
    ("indigo", 0x4B0082), ("ivory", 0xFFFFF0), ("khaki", 0xF0E68C),
    ("lavender", 0xE6E6FA), ("lavenderblush", 0xFFF0F5),
    ("lawngreen", 0x7CFC00), ("lemonchiffon", 0xFFFACD),
    ("lightblue", 0xADD8E6), ("lightcoral", 0xF08080),
    ("lightcyan", 0xE0FFFF), ("lightgoldenrodyellow", 0xFAFAD2),
    ("lightgray", 0xD3D3D3), ("lightgreen", 0x90EE90),
    ("lightgrey", 0xD3D3D3), ("lightpink", 0xFFB6C1),
    ("lightsalmon", 0xFFA07A), ("lightseagreen", 0x20B2AA),
    ("lightskyblue", 0x87CEFA), ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899), ("lightsteelblue", 0xB0C4DE),
    ("lightyellow", 0xFFFFE0), ("lime", 0x00FF00), ("limegreen", 0x32CD32),
    ("linen", 0xFAF0E6), ("magenta", 0xFF00FF), ("maroon", 0x800000),
    ("mediumaquamarine", 0x66CDAA), ("mediumblue", 0x0000CD),
    ("mediumorchid", 0xBA55D3), ("mediumpurple", 0x9370DB),
    ("mediumseagreen", 0x3CB371), ("mediumslateblue", 0x7B68EE),
    ("mediumspringgreen", 0x00FA9A), ("mediumturquoise", 0x48D1CC),
    ("mediumvioletred", 0xC71585), ("midnightblue", 0x191970),
    ("mintcream", 0xF5FFFA), ("mistyrose", 0xFFE4E1), ("moccasin", 0xFFE4B5),
    ("navajowhite", 0xFFDEAD), ("navy", 0x000080), ("oldlace", 0xFDF5E6),
    ("olive", 0x808000), ("olivedrab", 0x6B8E23), ("orange", 0xFFA500),
    ("orangered", 0xFF4500), ("orchid", 0xDA70D6),
    ("palegoldenrod", 0xEEE8AA), ("palegreen", 0x98FB98),
    ("paleturquoise", 0xAFEEEE), ("palevioletred", 0xDB7093),
    ("papayawhip", 0xFFEFD5), ("peachpuff", 0xFFDAB9), ("peru", 0xCD853F),
    ("pink", 0xFFC0CB), ("plum", 0xDDA0DD), ("powderblue", 0xB0E0E6),
    ("purple", 0x800080), ("rebeccapurple", 0x663399), ("red", 0xFF0000),
    ("rosybrown", 0xBC8F8F), ("royalblue", 0x4169E1),
    ("saddlebrown", 0x8B4513), ("salmon", 0xFA8072),
    ("sandybrown", 0xF4A460), ("seagreen", 0x2E8B57), ("seashell", 0xFFF5EE),
    ("sienna", 0xA0522D), ("silver", 0xC0C0C0), ("skyblue", 0x87CEEB),
    ("slateblue", 0x6A5ACD), ("slategray", 0x708090),
    ("slategrey", 0x708090), ("snow", 0xFFFAFA), ("springgreen", 0x00FF7F),
    ("steelblue", 0x4682B4), ("tan", 0xD2B48C), ("teal", 0x008080),
    ("thistle", 0xD8BFD8), ("tomato", 0xFF6347), ("turquoise", 0x40E0D0),
    ("violet", 0xEE82EE), ("wheat", 0xF5DEB3), ("white", 0xFFFFFF),
    ("whitesmoke", 0xF5F5F5), ("yellow", 0xFFFF00),
    ("yellowgreen", 0x9ACD32),
];
