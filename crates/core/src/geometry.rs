//! Transform and arc geometry.
//!
//! Pure functions that turn drawing intent into raw numbers:
//! - Coefficient synthesis for translate/rotate/scale/skew
//! - Ordered composition of a transform option set into one matrix
//! - Elliptical-arc-to-cubic-Bezier subdivision
//! - The two-point circular arc construction ("bogen")
//!
//! Nothing here touches builder state; every function takes explicit
//! parameters and returns explicit values.

use crate::error::{PdfError, Result};
use crate::utils::{MATRIX_IDENTITY, Matrix, Point, apply_matrix_pt, mult_matrix};

/// Degrees to radians, with full turns folded out first so that 360 and 0
/// produce the same coefficients. The fold keeps the sign of its input.
fn to_radians(deg: f64) -> f64 {
    (deg % 360.0).to_radians()
}

/// Coefficients moving the origin by (dx, dy).
pub fn translate_coeffs(dx: f64, dy: f64) -> Matrix {
    (1.0, 0.0, 0.0, 1.0, dx, dy)
}

/// Coefficients for a counterclockwise rotation in degrees.
pub fn rotate_coeffs(deg: f64) -> Matrix {
    let (sin, cos) = to_radians(deg).sin_cos();
    (cos, sin, -sin, cos, 0.0, 0.0)
}

/// Coefficients scaling the axes by (sx, sy).
pub fn scale_coeffs(sx: f64, sy: f64) -> Matrix {
    (sx, 0.0, 0.0, sy, 0.0, 0.0)
}

/// Coefficients skewing the x axis by `a_deg` and the y axis by `b_deg`.
pub fn skew_coeffs(a_deg: f64, b_deg: f64) -> Matrix {
    (1.0, to_radians(a_deg).tan(), to_radians(b_deg).tan(), 1.0, 0.0, 0.0)
}

/// An ordered set of requested transform operations.
///
/// `compose` multiplies the present parts onto identity in exactly the order
/// matrix, skew, scale, rotate, translate. Later parts apply after earlier
/// ones, so the translation ends up outermost even though it is multiplied
/// in last.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    pub matrix: Option<Matrix>,
    pub skew: Option<(f64, f64)>,
    pub scale: Option<(f64, f64)>,
    pub rotate: Option<f64>,
    pub translate: Option<(f64, f64)>,
}

impl Transform {
    /// Composes the requested parts into a single matrix.
    pub fn compose(&self) -> Matrix {
        let mut m = MATRIX_IDENTITY;
        if let Some(raw) = self.matrix {
            m = mult_matrix(m, raw);
        }
        if let Some((a, b)) = self.skew {
            m = mult_matrix(m, skew_coeffs(a, b));
        }
        if let Some((sx, sy)) = self.scale {
            m = mult_matrix(m, scale_coeffs(sx, sy));
        }
        if let Some(deg) = self.rotate {
            m = mult_matrix(m, rotate_coeffs(deg));
        }
        if let Some((dx, dy)) = self.translate {
            m = mult_matrix(m, translate_coeffs(dx, dy));
        }
        m
    }

    /// Runs a point through the composed matrix instead of returning the
    /// coefficients.
    pub fn apply_to(&self, point: Point) -> Point {
        apply_matrix_pt(self.compose(), point)
    }
}

/// One cubic Bezier span of an arc approximation. All four points are
/// relative to the ellipse center; consecutive spans share endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    pub start: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub end: Point,
}

/// Folds an angle into [0, 360], keeping a raw 360 endpoint so that a full
/// 0..360 sweep stays expressible.
fn normalize_deg(mut deg: f64) -> f64 {
    while deg < 0.0 {
        deg += 360.0;
    }
    while deg > 360.0 {
        deg -= 360.0;
    }
    deg
}

/// Approximates the elliptical arc from `alpha` to `beta` degrees (radii
/// `rx`, `ry`, centered on the origin) with cubic Bezier spans.
///
/// Sweeps exceeding 30 degrees are bisected recursively to bound the
/// approximation error, and sweeps crossing the 0/360 boundary in the sweep
/// direction are first split at the boundary, where the control-point
/// formula is unstable.
pub fn arc_to_bezier(
    rx: f64,
    ry: f64,
    alpha: f64,
    beta: f64,
    clockwise: bool,
) -> Result<Vec<ArcSpan>> {
    if rx <= 0.0 || ry <= 0.0 {
        return Err(PdfError::DegenerateGeometry(format!(
            "arc radii must be positive, got ({rx}, {ry})"
        )));
    }
    let alpha = normalize_deg(alpha);
    let beta = normalize_deg(beta);
    if alpha == beta {
        return Err(PdfError::DegenerateGeometry(format!(
            "zero angular sweep at {alpha} degrees"
        )));
    }

    let mut spans = Vec::new();
    if clockwise && beta > alpha {
        // Decreasing sweep passes 0: solve down to 0, then from 360 down.
        subdivide(rx, ry, alpha, 0.0, &mut spans);
        subdivide(rx, ry, 360.0, beta, &mut spans);
    } else if !clockwise && beta < alpha {
        // Increasing sweep passes 360: solve up to 360, then from 0 up.
        subdivide(rx, ry, alpha, 360.0, &mut spans);
        subdivide(rx, ry, 0.0, beta, &mut spans);
    } else {
        subdivide(rx, ry, alpha, beta, &mut spans);
    }
    if spans.is_empty() {
        // Both sides of a boundary split were empty: the sweep wraps
        // straight from one endpoint of the range to the other.
        return Err(PdfError::DegenerateGeometry(format!(
            "zero angular sweep from {alpha} to {beta} degrees"
        )));
    }
    Ok(spans)
}

fn subdivide(rx: f64, ry: f64, alpha: f64, beta: f64, out: &mut Vec<ArcSpan>) {
    if alpha == beta {
        // Empty side of a boundary split.
        return;
    }
    if (beta - alpha).abs() > 30.0 {
        let mid = (alpha + beta) / 2.0;
        subdivide(rx, ry, alpha, mid, out);
        subdivide(rx, ry, mid, beta, out);
    } else {
        out.push(bezier_span(rx, ry, alpha, beta));
    }
}

/// Control points for a single sweep of at most 30 degrees, via the
/// half-angle coefficient 4/3 * (1 - cos(d/2)) / sin(d/2).
fn bezier_span(rx: f64, ry: f64, alpha: f64, beta: f64) -> ArcSpan {
    let a = alpha.to_radians();
    let b = beta.to_radians();
    let half = (b - a) / 2.0;
    let bcp = 4.0 / 3.0 * (1.0 - half.cos()) / half.sin();
    let (sin_a, cos_a) = a.sin_cos();
    let (sin_b, cos_b) = b.sin_cos();
    ArcSpan {
        start: (rx * cos_a, ry * sin_a),
        ctrl1: (
            rx * (cos_a - bcp * sin_a),
            ry * (sin_a + bcp * cos_a),
        ),
        ctrl2: (
            rx * (cos_b + bcp * sin_b),
            ry * (sin_b - bcp * cos_b),
        ),
        end: (rx * cos_b, ry * sin_b),
    }
}

/// A two-point arc resolved into center, radius, sweep angles, and sweep
/// direction, ready for [`arc_to_bezier`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoPointArc {
    pub center: Point,
    pub radius: f64,
    pub alpha: f64,
    pub beta: f64,
    pub clockwise: bool,
}

/// Resolves the circular arc of radius `radius` joining two distinct points.
///
/// Four arcs satisfy the constraint; `larger` selects the major arc and
/// `reverse` the mirror image across the chord. The non-mirrored arcs sweep
/// clockwise from `p1` to `p2`, the mirrored ones counterclockwise. A radius
/// smaller than half the chord is silently grown to half the chord, which
/// yields a semicircle.
pub fn two_point_arc(
    p1: Point,
    p2: Point,
    radius: f64,
    larger: bool,
    reverse: bool,
) -> Result<TwoPointArc> {
    if p1 == p2 {
        return Err(PdfError::DegenerateGeometry(
            "two-point arc requires two distinct points".to_string(),
        ));
    }
    if radius <= 0.0 {
        return Err(PdfError::DegenerateGeometry(format!(
            "two-point arc requires a positive radius, got {radius}"
        )));
    }

    let chord = ((p2.0 - p1.0), (p2.1 - p1.1));
    let z = chord.0.hypot(chord.1);
    let radius = if z > 2.0 * radius { z / 2.0 } else { radius };

    // Direction of the chord, and the half-angle it subtends at the center.
    let dir = chord.1.atan2(chord.0).to_degrees();
    let half = (z / (2.0 * radius)).asin().to_degrees();
    let half = if larger { 180.0 - half } else { half };

    let (alpha, beta, clockwise) = if reverse {
        (dir - 90.0 - half, dir - 90.0 + half, false)
    } else {
        (dir + 90.0 + half, dir + 90.0 - half, true)
    };

    let start = alpha.to_radians();
    let center = (
        p1.0 - radius * start.cos(),
        p1.1 - radius * start.sin(),
    );

    Ok(TwoPointArc {
        center,
        radius,
        alpha,
        beta,
        clockwise,
    })
}
