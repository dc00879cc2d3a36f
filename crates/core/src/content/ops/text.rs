//! Text state and text-showing operations.
//!
//! Handles: Tc, Tw, Tz, TL, Ts, Tr, Tf, Td, T*, Tj, TJ
//!
//! The line-position mirror follows the library's long-standing
//! conventions: `distance` overwrites the x offset and accumulates y,
//! line advances subtract the leading, and showing text advances x by
//! the measured width. Underlines are stroked after the text object
//! closes, so they are queued on the deferred buffer.

use tracing::debug;

use crate::content::Content;
use crate::error::{PdfError, Result};
use crate::font::FontRef;
use crate::geometry::Transform;
use crate::model::color::ColorSpec;
use crate::model::objects::ResourceObject;
use crate::model::state::{TextState, TextStatePatch};
use crate::resources::ResourceCategory;
use crate::utils::{Point, apply_matrix_pt, fmt_number, fmt_numbers};

/// Options for a single text-showing call.
#[derive(Clone, Default)]
pub struct TextOptions {
    /// Shift of the visible text start along the baseline, in user
    /// units. Applied as a `TJ` adjustment, so the text position mirror
    /// moves but no `Td` is written.
    pub indent: Option<f64>,
    /// Underline bands stroked under the shown text.
    pub underline: Option<Underline>,
}

/// Underline bands drawn below shown text.
#[derive(Clone)]
pub struct Underline {
    pub bands: Vec<UnderlineBand>,
}

impl Underline {
    /// One band at the font's underline metrics.
    pub fn auto() -> Self {
        Self {
            bands: vec![UnderlineBand::default()],
        }
    }

    /// One band at an explicit distance and thickness.
    pub fn single(distance: f64, thickness: f64) -> Self {
        Self {
            bands: vec![UnderlineBand {
                distance: Some(distance),
                thickness: Some(thickness),
                color: None,
            }],
        }
    }
}

/// One underline band.
#[derive(Clone, Default)]
pub struct UnderlineBand {
    /// Distance below the baseline. `None` derives it from the font,
    /// multiplied by the band's position so stacked bands spread out.
    pub distance: Option<f64>,
    /// Stroke thickness. `None` derives it from the font.
    pub thickness: Option<f64>,
    /// Stroke color. `None` paints black.
    pub color: Option<ColorSpec>,
}

/// Horizontal alignment for the label helper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Options for the one-call label helper.
#[derive(Clone, Default)]
pub struct LabelOptions {
    /// Rotation of the label around its anchor, degrees
    /// counter-clockwise.
    pub rotate: f64,
    pub color: Option<ColorSpec>,
    pub strokecolor: Option<ColorSpec>,
    pub charspace: Option<f64>,
    pub wordspace: Option<f64>,
    pub hscale: Option<f64>,
    pub render: Option<i32>,
    pub align: TextAlign,
    pub underline: Option<Underline>,
}

impl Content {
    /// Sets character spacing.
    ///
    /// PDF operator: `Tc`
    pub fn charspace(&mut self, spacing: f64) -> &mut Self {
        self.append(&format!("{} Tc", fmt_number(spacing)));
        self.tstate.charspace = spacing;
        self
    }

    /// Sets word spacing, applied to ASCII spaces.
    ///
    /// PDF operator: `Tw`
    pub fn wordspace(&mut self, spacing: f64) -> &mut Self {
        self.append(&format!("{} Tw", fmt_number(spacing)));
        self.tstate.wordspace = spacing;
        self
    }

    /// Sets horizontal scaling as a percentage.
    ///
    /// PDF operator: `Tz`
    pub fn hscale(&mut self, percent: f64) -> &mut Self {
        self.append(&format!("{} Tz", fmt_number(percent)));
        self.tstate.hscale = percent;
        self
    }

    /// Sets the leading used by line advances.
    ///
    /// PDF operator: `TL`
    pub fn leading(&mut self, leading: f64) -> &mut Self {
        self.append(&format!("{} TL", fmt_number(leading)));
        self.tstate.leading = leading;
        self
    }

    /// Sets the rise above the baseline.
    ///
    /// PDF operator: `Ts`
    pub fn rise(&mut self, rise: f64) -> &mut Self {
        self.append(&format!("{} Ts", fmt_number(rise)));
        self.tstate.rise = rise;
        self
    }

    /// Sets the rendering mode, clamped into 0..=7.
    ///
    /// PDF operator: `Tr`
    pub fn render(&mut self, mode: i32) -> &mut Self {
        let mode = mode.clamp(0, 7);
        self.append(&format!("{mode} Tr"));
        self.tstate.render = mode;
        self
    }

    /// Selects a font at the given size, registering it as a page
    /// resource.
    ///
    /// Composite fonts register every member and are referenced through
    /// the first one.
    ///
    /// PDF operator: `Tf`
    pub fn font(&mut self, font: FontRef, size: f64) -> Result<&mut Self> {
        if size == 0.0 || size.is_nan() {
            return Err(PdfError::MissingFontSize);
        }
        let components = font.components();
        let written_name = components
            .first()
            .map_or_else(|| font.name().to_string(), |c| c.name.clone());
        {
            let mut resources = self.resources.borrow_mut();
            for component in &components {
                resources.register(
                    ResourceCategory::Font,
                    &component.name,
                    ResourceObject::Ref(component.obj_ref),
                );
            }
        }
        debug!(font = written_name.as_str(), size, "font selected");
        self.append(&format!("/{written_name} {} Tf", fmt_number(size)));
        self.tstate.font = Some(font);
        self.tstate.fontsize = size;
        self.tstate.font_pending = false;
        Ok(self)
    }

    /// Moves the text position by (dx, dy).
    ///
    /// The mirror keeps dx as the new line offset and accumulates dy.
    ///
    /// PDF operator: `Td`
    pub fn distance(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.append(&format!("{} Td", fmt_numbers(&[dx, dy])));
        self.textline.0 = dx;
        self.textline.1 += dy;
        self
    }

    /// Advances to the next line: by the current leading with no offset
    /// (`T*`), or by the given vertical offset (`0 offset Td`).
    pub fn cr(&mut self, offset: Option<f64>) -> &mut Self {
        match offset {
            None => {
                self.append("T*");
                self.textline.0 = 0.0;
                self.textline.1 -= self.tstate.leading;
            }
            Some(offset) => {
                self.append(&format!("0 {} Td", fmt_number(offset)));
                self.textline.0 = 0.0;
                self.textline.1 += offset;
            }
        }
        self
    }

    /// Advances to the next line, nudging the pen by `indent` through a
    /// `TJ` adjustment. The nudge is not tracked by the position mirror.
    pub fn nl(&mut self, indent: f64) -> &mut Self {
        self.append("T*");
        self.textline.0 = 0.0;
        self.textline.1 -= self.tstate.leading;
        if indent != 0.0 {
            self.append(&format!("[{}] TJ", fmt_number(-10.0 * indent)));
        }
        self
    }

    /// Current text position in user space: the line offset run through
    /// the text matrix.
    pub fn textpos(&self) -> Point {
        apply_matrix_pt(self.textmatrix, self.textline)
    }

    /// Width `text` would advance the pen under the current text state.
    pub fn advancewidth(&self, text: &str) -> Result<f64> {
        self.advancewidth_with(text, &TextStatePatch::default())
    }

    /// Width with selected text parameters overridden.
    pub fn advancewidth_with(&self, text: &str, overrides: &TextStatePatch) -> Result<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let (font, size) = match &overrides.font {
            Some((font, size)) => (font.clone(), *size),
            None => {
                let font = self.tstate.font.clone().ok_or(PdfError::FontNotSet)?;
                (font, self.tstate.fontsize)
            }
        };
        let charspace = overrides.charspace.unwrap_or(self.tstate.charspace);
        let wordspace = overrides.wordspace.unwrap_or(self.tstate.wordspace);
        let hscale = overrides.hscale.unwrap_or(self.tstate.hscale);

        let glyphs = font.width(text) * size;
        let spaces = text.chars().filter(|c| *c == ' ').count() as f64;
        let chars = text.chars().count() as f64;
        Ok((glyphs + wordspace * spaces + charspace * (chars - 1.0)) * hscale / 100.0)
    }

    /// Shows `text` at the current position and returns the advance.
    ///
    /// PDF operator: `Tj`
    pub fn text(&mut self, text: &str) -> Result<f64> {
        self.text_with(text, &TextOptions::default())
    }

    /// Shows `text` with indent and underline options.
    ///
    /// An indent shifts where the visible text starts without moving the
    /// line start, written as a `TJ` adjustment in thousandths. Returns
    /// the total advance including the indent.
    pub fn text_with(&mut self, text: &str, opts: &TextOptions) -> Result<f64> {
        let font = self.ensure_font()?;
        let indent = opts.indent.unwrap_or(0.0);
        let kern = if indent == 0.0 {
            None
        } else {
            self.textline.0 += indent;
            Some(-indent * (1000.0 / self.tstate.fontsize) * (100.0 / self.tstate.hscale))
        };
        let start = self.textpos();

        let encoded = font.encode_text(text);
        match kern {
            Some(kern) => self.append(&format!("[{} {encoded}] TJ", fmt_number(kern))),
            None => self.append(&format!("{encoded} Tj")),
        }

        let width = self.advancewidth(text)?;
        self.textline.0 += width;
        let end = self.textpos();

        if let Some(underline) = &opts.underline {
            self.draw_underline(&font, start, end, underline)?;
        }
        Ok(indent + width)
    }

    /// Shows `text` centered on the current position.
    pub fn text_center(&mut self, text: &str) -> Result<f64> {
        let width = self.advancewidth(text)?;
        self.text_with(
            text,
            &TextOptions {
                indent: Some(-width / 2.0),
                ..TextOptions::default()
            },
        )
    }

    /// Shows `text` ending at the current position.
    pub fn text_right(&mut self, text: &str) -> Result<f64> {
        let width = self.advancewidth(text)?;
        self.text_with(
            text,
            &TextOptions {
                indent: Some(-width),
                ..TextOptions::default()
            },
        )
    }

    /// Applies several text parameters at once; `None` fields are left
    /// unchanged.
    ///
    /// A font in the patch is staged, not written: the selection is
    /// mirrored and its `Tf` comes out with the next show operation.
    pub fn set_text_state(&mut self, patch: &TextStatePatch) -> Result<&mut Self> {
        if let Some((font, size)) = &patch.font {
            if *size == 0.0 || size.is_nan() {
                return Err(PdfError::MissingFontSize);
            }
            self.tstate.font = Some(font.clone());
            self.tstate.fontsize = *size;
            self.tstate.font_pending = true;
        }
        if let Some(v) = patch.charspace {
            self.charspace(v);
        }
        if let Some(v) = patch.wordspace {
            self.wordspace(v);
        }
        if let Some(v) = patch.hscale {
            self.hscale(v);
        }
        if let Some(v) = patch.leading {
            self.leading(v);
        }
        if let Some(v) = patch.rise {
            self.rise(v);
        }
        if let Some(v) = patch.render {
            self.render(v);
        }
        Ok(self)
    }

    /// Places a one-off label and restores the previous text parameters.
    ///
    /// Opens a text object at `pos` with the given rotation, applies the
    /// label's colors and text parameters, shows the aligned text, and
    /// closes the object again. Returns the shown advance.
    pub fn textlabel(
        &mut self,
        pos: Point,
        font: FontRef,
        size: f64,
        text: &str,
        opts: &LabelOptions,
    ) -> Result<f64> {
        let previous = self.tstate.clone();
        self.save();
        self.textstart();
        self.transform(Transform {
            rotate: Some(opts.rotate),
            translate: Some(pos),
            ..Transform::default()
        });
        if let Some(color) = &opts.color {
            self.fillcolor(color.clone())?;
        }
        if let Some(color) = &opts.strokecolor {
            self.strokecolor(color.clone())?;
        }
        self.font(font, size)?;
        if let Some(v) = opts.charspace {
            self.charspace(v);
        }
        if let Some(v) = opts.wordspace {
            self.wordspace(v);
        }
        if let Some(v) = opts.hscale {
            self.hscale(v);
        }
        if let Some(v) = opts.render {
            self.render(v);
        }

        let indent = match opts.align {
            TextAlign::Left => None,
            TextAlign::Center => Some(-self.advancewidth(text)? / 2.0),
            TextAlign::Right => Some(-self.advancewidth(text)?),
        };
        let width = self.text_with(
            text,
            &TextOptions {
                indent,
                underline: opts.underline.clone(),
            },
        )?;

        self.textend();
        self.restore();
        self.restore_text_state(&previous)?;
        Ok(width)
    }

    /// The selected font, with its `Tf` written first when a bulk
    /// assignment staged the selection without emitting it.
    fn ensure_font(&mut self) -> Result<FontRef> {
        let Some(font) = self.tstate.font.clone() else {
            return Err(PdfError::FontNotSet);
        };
        if self.tstate.font_pending {
            self.font(font.clone(), self.tstate.fontsize)?;
        }
        Ok(font)
    }

    fn draw_underline(
        &mut self,
        font: &FontRef,
        start: Point,
        end: Point,
        underline: &Underline,
    ) -> Result<()> {
        let size = self.tstate.fontsize;
        let mut auto_distance = -font.underline_position() * size / 1000.0;
        if auto_distance == 0.0 {
            auto_distance = 1.0;
        }
        let mut auto_thickness = font.underline_thickness() * size / 1000.0;
        if auto_thickness == 0.0 {
            auto_thickness = 1.0;
        }
        for (index, band) in underline.bands.iter().enumerate() {
            let position = (index + 1) as f64;
            let distance = band.distance.unwrap_or(position * auto_distance);
            let thickness = band.thickness.unwrap_or(auto_thickness);
            let color = band.color.clone().unwrap_or(ColorSpec::Gray(0.0));
            let stroke = color.operators(true, &mut self.resources.borrow_mut())?;
            self.append_post("q");
            self.append_post(&stroke);
            self.append_post(&format!("{} w", fmt_number(thickness)));
            self.append_post(&format!("{} m", fmt_numbers(&[start.0, start.1 - distance])));
            self.append_post(&format!("{} l", fmt_numbers(&[end.0, end.1 - distance])));
            self.append_post("S");
            self.append_post("Q");
        }
        Ok(())
    }

    fn restore_text_state(&mut self, previous: &TextState) -> Result<()> {
        let patch = TextStatePatch {
            font: previous.font.clone().map(|f| (f, previous.fontsize)),
            charspace: Some(previous.charspace),
            wordspace: Some(previous.wordspace),
            hscale: Some(previous.hscale),
            leading: Some(previous.leading),
            rise: Some(previous.rise),
            render: Some(previous.render),
        };
        self.set_text_state(&patch)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::font::SimpleFont;
    use crate::model::objects::ObjRef;

    fn test_font() -> FontRef {
        Rc::new(
            SimpleFont::new("F1", ObjRef::new(7, 0))
                .with_default_width(500.0)
                .with_width(' ', 0.0),
        )
    }

    #[test]
    fn test_scalar_setters_write_and_mirror() {
        let mut content = Content::new();
        content
            .charspace(1.0)
            .wordspace(2.0)
            .hscale(80.0)
            .leading(14.0)
            .rise(3.0)
            .render(2);
        assert_eq!(content.stream(), "1 Tc 2 Tw 80 Tz 14 TL 3 Ts 2 Tr ");
        assert_eq!(content.text_state().charspace, 1.0);
        assert_eq!(content.text_state().leading, 14.0);
        assert_eq!(content.text_state().render, 2);
    }

    #[test]
    fn test_render_mode_clamps() {
        let mut content = Content::new();
        content.render(11).render(-3);
        assert_eq!(content.stream(), "7 Tr 0 Tr ");
        assert_eq!(content.text_state().render, 0);
    }

    #[test]
    fn test_line_position_mirror_quirks() {
        let mut content = Content::new();
        content.leading(12.0);
        content.distance(5.0, 3.0);
        assert_eq!(content.textline, (5.0, 3.0));
        content.cr(None);
        assert_eq!(content.textline, (0.0, -9.0));
        content.cr(Some(10.0));
        assert_eq!(content.textline, (0.0, 1.0));
    }

    #[test]
    fn test_nl_emits_untracked_adjustment() {
        let mut content = Content::new();
        content.leading(10.0).nl(2.5);
        assert_eq!(content.stream(), "10 TL T* [-25] TJ ");
        assert_eq!(content.textline, (0.0, -10.0));
    }

    #[test]
    fn test_text_requires_font() {
        let mut content = Content::new();
        assert!(matches!(content.text("hi"), Err(PdfError::FontNotSet)));
        let err = content.font(test_font(), 0.0).unwrap_err();
        assert!(matches!(err, PdfError::MissingFontSize));
    }

    #[test]
    fn test_text_advances_line_offset() {
        let mut content = Content::new();
        content.textstart();
        content.font(test_font(), 10.0).unwrap();
        let width = content.text("ab").unwrap();
        assert!((width - 10.0).abs() < 1e-9);
        assert_eq!(content.textline.0, width);
    }

    #[test]
    fn test_bulk_font_assignment_defers_tf() {
        let mut content = Content::new();
        content
            .set_text_state(&TextStatePatch {
                font: Some((test_font(), 9.0)),
                charspace: Some(0.5),
                ..TextStatePatch::default()
            })
            .unwrap();
        assert_eq!(content.stream(), "0.5 Tc ");
        content.text("x").unwrap();
        assert!(content.stream().contains("/F1 9 Tf"));
    }

    #[test]
    fn test_textstart_drops_the_font_selection() {
        let mut content = Content::new();
        content.font(test_font(), 12.0).unwrap();
        content.textstart();
        content.textend();
        content.textstart();
        assert!(matches!(content.text("hi"), Err(PdfError::FontNotSet)));
        assert!(content.text_state().font.is_none());
        assert_eq!(content.text_state().fontsize, 0.0);
    }

    #[test]
    fn test_staged_font_flushes_inside_text_object() {
        let mut content = Content::new();
        content.textstart();
        content
            .set_text_state(&TextStatePatch {
                font: Some((test_font(), 12.0)),
                ..TextStatePatch::default()
            })
            .unwrap();
        content.text("a").unwrap();
        assert_eq!(content.stream().matches("/F1 12 Tf").count(), 1);
    }
}
