//! Shared geometry types and token formatting.
//!
//! Provides the primitive vocabulary used across the builder:
//! - Geometric types (Point, Rect, Matrix)
//! - Affine matrix composition and point transforms
//! - Number and string-literal formatting for the operator stream

/// Small epsilon for floating-point comparisons.
pub const EPSILON: f64 = 1e-9;

/// A 2D point (x, y).
pub type Point = (f64, f64);

/// A rectangle (x, y, width, height) as taken by the `re` operator.
pub type Rect = (f64, f64, f64, f64);

/// A 6-element affine transformation matrix (a, b, c, d, e, f).
/// Transforms point (x, y) to (ax + cy + e, bx + dy + f).
pub type Matrix = (f64, f64, f64, f64, f64, f64);

/// Identity transformation matrix.
pub const MATRIX_IDENTITY: Matrix = (1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

/// Compares two floats for approximate equality.
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Multiplies two matrices: result = m * n in row-vector order.
/// A point run through the result sees m first, then n.
pub fn mult_matrix(m: Matrix, n: Matrix) -> Matrix {
    let (a1, b1, c1, d1, e1, f1) = m;
    let (a0, b0, c0, d0, e0, f0) = n;
    (
        a0 * a1 + c0 * b1,
        b0 * a1 + d0 * b1,
        a0 * c1 + c0 * d1,
        b0 * c1 + d0 * d1,
        a0 * e1 + c0 * f1 + e0,
        b0 * e1 + d0 * f1 + f0,
    )
}

/// Translates a matrix by (x, y) inside the projection.
///
/// The matrix is changed so that its origin is at the specified point in its
/// own coordinate system, which is different from translating it within the
/// surrounding coordinate system.
pub fn translate_matrix(m: Matrix, v: Point) -> Matrix {
    let (a, b, c, d, e, f) = m;
    let (x, y) = v;
    (a, b, c, d, x * a + y * c + e, x * b + y * d + f)
}

/// Applies a matrix to a point.
pub fn apply_matrix_pt(m: Matrix, v: Point) -> Point {
    let (a, b, c, d, e, f) = m;
    let (x, y) = v;
    (a * x + c * y + e, b * x + d * y + f)
}

/// Equivalent to apply_matrix_pt(m, (p, q)) - apply_matrix_pt(m, (0, 0)).
/// Applies matrix transformation to a vector (ignoring translation).
pub fn apply_matrix_norm(m: Matrix, v: Point) -> Point {
    let (a, b, c, d, _e, _f) = m;
    let (p, q) = v;
    (a * p + c * q, b * p + d * q)
}

/// Formats a number the way content-stream operands are written: at most six
/// decimal places, trailing zeros stripped, and float noise below 1e-15
/// collapsed to plain zero.
pub fn fmt_number(value: f64) -> String {
    let value = if value.abs() < 1e-15 { 0.0 } else { value };
    let mut s = format!("{value:.6}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

/// Escapes the three characters that terminate or confuse a literal string:
/// backslash and both parentheses.
pub fn escape_pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '(' | ')') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Formats a run of operands separated by single spaces.
pub fn fmt_numbers(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| fmt_number(*v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats the six matrix coefficients in operand order.
pub fn fmt_matrix(m: Matrix) -> String {
    let (a, b, c, d, e, f) = m;
    fmt_numbers(&[a, b, c, d, e, f])
}
