//! Path construction and painting operations.
//!
//! Handles: m, l, c, h, re, S, f, f*, B, B*, W, W*, n
//!
//! Every operation here goes through the path router, so paths started
//! while a text object is open are deferred and painted after it closes.
//! Arcs and related shapes are flattened to cubic spans by the geometry
//! module before emission.

use crate::content::Content;
use crate::error::Result;
use crate::geometry::{ArcSpan, arc_to_bezier, two_point_arc};
use crate::utils::{Point, Rect, fmt_numbers};

fn xy(p: Point) -> String {
    fmt_numbers(&[p.0, p.1])
}

impl Content {
    /// Starts a new subpath at (x, y).
    ///
    /// PDF operator: `m`
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.append_path(&format!("{} m", xy((x, y))));
        self.point = (x, y);
        self.subpath_start = (x, y);
        self
    }

    /// Straight segment to (x, y).
    ///
    /// PDF operator: `l`
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.append_path(&format!("{} l", xy((x, y))));
        self.point = (x, y);
        self
    }

    /// Straight segments through each point in turn.
    pub fn lines(&mut self, points: &[Point]) -> &mut Self {
        for &(x, y) in points {
            self.line_to(x, y);
        }
        self
    }

    /// Horizontal segment to the given x.
    pub fn hline(&mut self, x: f64) -> &mut Self {
        self.append_path(&format!("{} l", xy((x, self.point.1))));
        self.point.0 = x;
        self
    }

    /// Vertical segment to the given y.
    pub fn vline(&mut self, y: f64) -> &mut Self {
        self.append_path(&format!("{} l", xy((self.point.0, y))));
        self.point.1 = y;
        self
    }

    /// Cubic Bezier segment with two control points.
    ///
    /// PDF operator: `c`
    pub fn curve(&mut self, c1: Point, c2: Point, end: Point) -> &mut Self {
        self.append_path(&format!("{} {} {} c", xy(c1), xy(c2), xy(end)));
        self.point = end;
        self
    }

    /// Cubic segments, one per (c1, c2, end) triple.
    pub fn curves(&mut self, segments: &[(Point, Point, Point)]) -> &mut Self {
        for &(c1, c2, end) in segments {
            self.curve(c1, c2, end);
        }
        self
    }

    /// Spline through (control, end) pairs, rendered as cubics with the
    /// control point doubled. A trailing unpaired point is ignored.
    pub fn spline(&mut self, points: &[Point]) -> &mut Self {
        for pair in points.chunks_exact(2) {
            self.curve(pair[0], pair[0], pair[1]);
        }
        self
    }

    /// Axis-aligned rectangle from corner (x, y).
    ///
    /// PDF operator: `re`
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.append_path(&format!("{} re", fmt_numbers(&[x, y, width, height])));
        self.point = (x, y);
        self
    }

    /// One rectangle per (x, y, width, height) entry.
    pub fn rects(&mut self, rects: &[Rect]) -> &mut Self {
        for &(x, y, w, h) in rects {
            self.rect(x, y, w, h);
        }
        self
    }

    /// Rectangle between two opposite corners.
    pub fn rectxy(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Self {
        self.rect(x1, y1, x2 - x1, y2 - y1)
    }

    /// Polyline: a move to the first point, then lines through the rest.
    pub fn poly(&mut self, points: &[Point]) -> &mut Self {
        let Some((&(x, y), rest)) = points.split_first() else {
            return self;
        };
        self.move_to(x, y);
        self.lines(rest)
    }

    /// Elliptical arc around `center`, from `alpha` to `beta` degrees
    /// counter-clockwise.
    ///
    /// With `move_first` the subpath starts at the arc's first point;
    /// otherwise the first cubic continues from the current point.
    pub fn arc(
        &mut self,
        center: Point,
        rx: f64,
        ry: f64,
        alpha: f64,
        beta: f64,
        move_first: bool,
    ) -> Result<&mut Self> {
        let spans = arc_to_bezier(rx, ry, alpha, beta, false)?;
        self.emit_arc_spans(center, &spans, move_first);
        Ok(self)
    }

    /// Pie slice: center, radius line to the arc start, the arc, and a
    /// closing line back to the center.
    pub fn pie(
        &mut self,
        center: Point,
        rx: f64,
        ry: f64,
        alpha: f64,
        beta: f64,
    ) -> Result<&mut Self> {
        let spans = arc_to_bezier(rx, ry, alpha, beta, false)?;
        let (cx, cy) = center;
        self.move_to(cx, cy);
        if let Some(first) = spans.first() {
            self.line_to(cx + first.start.0, cy + first.start.1);
        }
        self.emit_arc_spans(center, &spans, false);
        Ok(self.close())
    }

    /// Full circle of radius `r` around `center`.
    pub fn circle(&mut self, center: Point, r: f64) -> Result<&mut Self> {
        self.ellipse(center, r, r)
    }

    /// Full ellipse with radii (rx, ry) around `center`.
    pub fn ellipse(&mut self, center: Point, rx: f64, ry: f64) -> Result<&mut Self> {
        self.arc(center, rx, ry, 0.0, 360.0, true)?;
        Ok(self.close())
    }

    /// Circular arc from `p1` to `p2` with the given radius.
    ///
    /// Of the arcs satisfying the endpoints, `larger` selects the one
    /// spanning more than half the circle and `reverse` the one bulging
    /// to the other side of the chord. A radius smaller than half the
    /// chord is grown to fit. With `move_first` the subpath starts at
    /// `p1`.
    pub fn two_point_arc(
        &mut self,
        p1: Point,
        p2: Point,
        radius: f64,
        move_first: bool,
        larger: bool,
        reverse: bool,
    ) -> Result<&mut Self> {
        let arc = two_point_arc(p1, p2, radius, larger, reverse)?;
        let spans = arc_to_bezier(arc.radius, arc.radius, arc.alpha, arc.beta, arc.clockwise)?;
        if move_first {
            self.move_to(p1.0, p1.1);
        }
        self.emit_arc_spans(arc.center, &spans, false);
        Ok(self)
    }

    /// Closes the current subpath back to its starting point.
    ///
    /// PDF operator: `h`
    pub fn close(&mut self) -> &mut Self {
        self.append_path("h");
        self.point = self.subpath_start;
        self
    }

    /// Ends the path without painting it. Applies a pending clip.
    ///
    /// PDF operator: `n`
    pub fn endpath(&mut self) -> &mut Self {
        self.append_path("n");
        self
    }

    /// Strokes the path.
    ///
    /// PDF operator: `S`
    pub fn stroke(&mut self) -> &mut Self {
        self.append_path("S");
        self
    }

    /// Fills the path, with the even-odd rule when requested.
    ///
    /// PDF operator: `f` or `f*`
    pub fn fill(&mut self, even_odd: bool) -> &mut Self {
        self.append_path(if even_odd { "f*" } else { "f" });
        self
    }

    /// Fills, then strokes, the path.
    ///
    /// PDF operator: `B` or `B*`
    pub fn fillstroke(&mut self, even_odd: bool) -> &mut Self {
        self.append_path(if even_odd { "B*" } else { "B" });
        self
    }

    /// Intersects the clipping path with the current path. Takes effect
    /// once the path is ended or painted.
    ///
    /// PDF operator: `W` or `W*`
    pub fn clip(&mut self, even_odd: bool) -> &mut Self {
        self.append_path(if even_odd { "W*" } else { "W" });
        self
    }

    fn emit_arc_spans(&mut self, center: Point, spans: &[ArcSpan], move_first: bool) {
        let (cx, cy) = center;
        let mut spans = spans.iter();
        let Some(first) = spans.next() else {
            return;
        };
        if move_first {
            self.move_to(cx + first.start.0, cy + first.start.1);
        }
        for span in std::iter::once(first).chain(spans) {
            self.curve(
                (cx + span.ctrl1.0, cy + span.ctrl1.1),
                (cx + span.ctrl2.0, cy + span.ctrl2.1),
                (cx + span.end.0, cy + span.end.1),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_path_fragments() {
        let mut content = Content::new();
        content
            .move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .hline(20.0)
            .vline(5.0)
            .close()
            .stroke();
        assert_eq!(content.stream(), "0 0 m 10 0 l 20 0 l 20 5 l h S ");
        assert_eq!(content.current_point(), (0.0, 0.0));
    }

    #[test]
    fn test_poly_moves_then_lines() {
        let mut content = Content::new();
        content.poly(&[(1.0, 1.0), (2.0, 2.0), (3.0, 1.0)]);
        assert_eq!(content.stream(), "1 1 m 2 2 l 3 1 l ");
    }

    #[test]
    fn test_spline_doubles_control_point_and_drops_odd_tail() {
        let mut content = Content::new();
        content.move_to(0.0, 0.0);
        content.spline(&[(5.0, 10.0), (10.0, 0.0), (99.0, 99.0)]);
        assert_eq!(content.stream(), "0 0 m 5 10 5 10 10 0 c ");
    }

    #[test]
    fn test_rectxy_normalizes_to_rect() {
        let mut content = Content::new();
        content.rectxy(10.0, 10.0, 30.0, 25.0);
        assert_eq!(content.stream(), "10 10 20 15 re ");
    }

    #[test]
    fn test_circle_closes_full_sweep() {
        let mut content = Content::new();
        content.circle((0.0, 0.0), 10.0).unwrap();
        let stream = content.stream();
        assert!(stream.starts_with("10 0 m "));
        assert!(stream.ends_with("h "));
        assert_eq!(stream.matches(" c ").count(), 16);
    }

    #[test]
    fn test_arc_without_move_continues_path() {
        let mut content = Content::new();
        content.move_to(10.0, 0.0);
        content.arc((0.0, 0.0), 10.0, 10.0, 0.0, 30.0, false).unwrap();
        assert_eq!(content.stream().matches(" m ").count(), 1);
        assert_eq!(content.stream().matches(" c ").count(), 1);
    }

    #[test]
    fn test_degenerate_arc_is_an_error() {
        let mut content = Content::new();
        assert!(content.arc((0.0, 0.0), 0.0, 10.0, 0.0, 90.0, true).is_err());
        assert!(content.circle((0.0, 0.0), -1.0).is_err());
    }

    #[test]
    fn test_paint_ops_defer_inside_text_object() {
        let mut content = Content::new();
        content.textstart();
        content.rect(0.0, 0.0, 5.0, 5.0).fill(false);
        assert_eq!(content.stream(), "BT ");
        assert_eq!(content.post_stream(), "0 0 5 5 re f ");
    }

    #[test]
    fn test_two_point_arc_semicircle() {
        let mut content = Content::new();
        content
            .two_point_arc((0.0, 0.0), (10.0, 0.0), 5.0, true, false, false)
            .unwrap();
        let stream = content.stream();
        assert!(stream.starts_with("0 0 m "));
        // 180 degree sweep bisects down to eight 22.5 degree cubics.
        assert_eq!(stream.matches(" c ").count(), 8);
    }
}
