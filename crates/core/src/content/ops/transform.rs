//! Coordinate transform operations.
//!
//! Handles: cm, Tm
//!
//! Outside a text object a transform is written as `cm`; inside one it
//! becomes the text matrix via `Tm`. Component-wise transforms are
//! absolute: each call composes its components from scratch and replaces
//! the previous transform, with unsupplied components at their identity
//! values. The relative form reads the tracked components back, combines,
//! and delegates to the absolute form.

use crate::content::Content;
use crate::geometry::Transform;
use crate::model::state::TransformParts;
use crate::utils::{Matrix, fmt_matrix};

impl Content {
    /// Replaces the current transform from decomposed components.
    ///
    /// Components compose in a fixed order (raw matrix, skew, scale,
    /// rotation, translation), so the translation always lands in
    /// unrotated page space.
    ///
    /// PDF operator: `cm` (or `Tm` inside a text object)
    pub fn transform(&mut self, t: Transform) -> &mut Self {
        self.write_matrix(t.compose());
        self.parts = TransformParts {
            translate: t.translate.unwrap_or((0.0, 0.0)),
            rotate: t.rotate.unwrap_or(0.0),
            scale: t.scale.unwrap_or((1.0, 1.0)),
            skew: t.skew.unwrap_or((0.0, 0.0)),
        };
        self
    }

    /// Combines components with the tracked ones, then replaces the
    /// transform: translation, rotation and skew add, scale multiplies.
    /// A raw matrix component has no relative meaning and is ignored.
    pub fn transform_rel(&mut self, t: Transform) -> &mut Self {
        let (dx, dy) = t.translate.unwrap_or((0.0, 0.0));
        let rotate = t.rotate.unwrap_or(0.0);
        let (sx, sy) = t.scale.unwrap_or((1.0, 1.0));
        let (ska, skb) = t.skew.unwrap_or((0.0, 0.0));
        let parts = self.parts;
        self.transform(Transform {
            matrix: None,
            skew: Some((parts.skew.0 + ska, parts.skew.1 + skb)),
            scale: Some((parts.scale.0 * sx, parts.scale.1 * sy)),
            rotate: Some(parts.rotate + rotate),
            translate: Some((parts.translate.0 + dx, parts.translate.1 + dy)),
        })
    }

    /// Moves the origin to (x, y), discarding other components.
    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.transform(Transform {
            translate: Some((x, y)),
            ..Transform::default()
        })
    }

    /// Rotates counter-clockwise by `degrees`, discarding other
    /// components.
    pub fn rotate(&mut self, degrees: f64) -> &mut Self {
        self.transform(Transform {
            rotate: Some(degrees),
            ..Transform::default()
        })
    }

    /// Scales by (sx, sy), discarding other components.
    pub fn scale(&mut self, sx: f64, sy: f64) -> &mut Self {
        self.transform(Transform {
            scale: Some((sx, sy)),
            ..Transform::default()
        })
    }

    /// Skews by angles (a, b) in degrees, discarding other components.
    pub fn skew(&mut self, a: f64, b: f64) -> &mut Self {
        self.transform(Transform {
            skew: Some((a, b)),
            ..Transform::default()
        })
    }

    /// Writes raw matrix coefficients, bypassing component tracking.
    ///
    /// The tracked components keep their previous values and no longer
    /// describe the written transform; relative transforms after a raw
    /// matrix combine against stale components.
    pub fn matrix(&mut self, m: Matrix) -> &mut Self {
        self.write_matrix(m);
        self
    }

    /// The text matrix as last written.
    pub fn text_matrix(&self) -> Matrix {
        self.textmatrix
    }

    fn write_matrix(&mut self, m: Matrix) {
        let coeffs = fmt_matrix(m);
        if self.in_text {
            self.append(&format!("{coeffs} Tm"));
            self.textmatrix = m;
            self.textline = (0.0, 0.0);
        } else {
            self.append(&format!("{coeffs} cm"));
            self.matrix = m;
        }
    }
}
