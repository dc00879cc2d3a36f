//! The stream builder: buffers, text-object lifecycle, and finalization.
//!
//! Operator fragments are appended to a main buffer as plain text, each
//! followed by a single space. A second buffer holds operators that must
//! not appear inside the open text object (paths painted under text,
//! underlines); it is flushed into the main buffer when the text object
//! closes. Finishing the stream closes any open text object and hands
//! the accumulated text to the encoder.

use tracing::debug;

use crate::encoder::{Compression, EncodedStream, encode_stream};
use crate::error::Result;
use crate::model::color::ColorSpec;
use crate::model::state::{GraphicsState, TextState, TransformParts};
use crate::resources::{ResourceTable, SharedResources};
use crate::utils::{MATRIX_IDENTITY, Matrix, Point};

/// Builder for one content stream.
///
/// Every write goes through [`Content::append`] or one of its routed
/// variants, and every parameter written is mirrored so callers can read
/// it back without parsing the stream.
#[derive(Debug)]
pub struct Content {
    /// Accumulated operator text.
    pub(crate) buffer: String,
    /// Deferred operators, flushed when the text object closes.
    pub(crate) post: String,
    /// Whether a text object is open.
    pub(crate) in_text: bool,
    /// Compression applied at finish.
    pub(crate) compression: Compression,
    /// Name table shared with the sibling streams of the page.
    pub(crate) resources: SharedResources,

    /// Transform written by the transform operations.
    pub(crate) matrix: Matrix,
    /// Decomposed components of that transform.
    pub(crate) parts: TransformParts,
    /// Current path point.
    pub(crate) point: Point,
    /// Start of the current subpath.
    pub(crate) subpath_start: Point,

    /// Text matrix.
    pub(crate) textmatrix: Matrix,
    /// Pen offset within the current text line.
    pub(crate) textline: Point,

    /// Mirrored graphics parameters.
    pub(crate) gstate: GraphicsState,
    /// Mirrored text parameters.
    pub(crate) tstate: TextState,
}

impl Content {
    /// A stream with its own resource table.
    pub fn new() -> Self {
        Self::with_resources(ResourceTable::shared())
    }

    /// A stream writing names into an existing shared table.
    pub fn with_resources(resources: SharedResources) -> Self {
        Self {
            buffer: String::new(),
            post: String::new(),
            in_text: false,
            compression: Compression::None,
            resources,
            matrix: MATRIX_IDENTITY,
            parts: TransformParts::identity(),
            point: (0.0, 0.0),
            subpath_start: (0.0, 0.0),
            textmatrix: MATRIX_IDENTITY,
            textline: (0.0, 0.0),
            gstate: GraphicsState::new(),
            tstate: TextState::new(),
        }
    }

    /// Selects the compression applied when the stream is finished.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Appends one fragment to the main buffer.
    pub(crate) fn append(&mut self, fragment: &str) {
        self.buffer.push_str(fragment);
        self.buffer.push(' ');
    }

    /// Appends a path or paint fragment, deferring it while a text
    /// object is open.
    pub(crate) fn append_path(&mut self, fragment: &str) {
        if self.in_text {
            self.append_post(fragment);
        } else {
            self.append(fragment);
        }
    }

    /// Appends one fragment to the deferred buffer.
    pub(crate) fn append_post(&mut self, fragment: &str) {
        self.post.push_str(fragment);
        self.post.push(' ');
    }

    /// Appends caller-supplied operator text verbatim.
    ///
    /// The text is trusted; nothing in it is tracked or validated.
    pub fn add_raw(&mut self, raw: &str) -> &mut Self {
        self.buffer.push_str(raw);
        if !raw.ends_with(' ') {
            self.buffer.push(' ');
        }
        self
    }

    /// Opens a text object unless one is already open.
    ///
    /// Opening resets the text matrices, the scalar text parameters, the
    /// font selection, the transform components, and both mirrored
    /// colors. Only `BT` is written; the resets describe the
    /// conventional state a fresh text object starts from. A font must
    /// be selected again before showing text.
    pub fn textstart(&mut self) -> &mut Self {
        if !self.in_text {
            self.append("BT");
            self.in_text = true;
            self.matrix = MATRIX_IDENTITY;
            self.parts = TransformParts::identity();
            self.textmatrix = MATRIX_IDENTITY;
            self.textline = (0.0, 0.0);
            self.gstate.fillcolor = ColorSpec::Gray(0.0);
            self.gstate.strokecolor = ColorSpec::Gray(0.0);
            self.tstate.reset();
        }
        self
    }

    /// Closes the open text object, if any, and flushes deferred
    /// operators.
    pub fn textend(&mut self) -> &mut Self {
        if self.in_text {
            self.append("ET");
            self.in_text = false;
            self.flush_post();
        }
        self
    }

    fn flush_post(&mut self) {
        if !self.post.is_empty() {
            let post = std::mem::take(&mut self.post);
            // Deferred fragments already carry their separators.
            self.buffer.push_str(&post);
        }
    }

    /// Finalizes the stream: closes any open text object and encodes the
    /// accumulated operator text.
    pub fn finish(mut self) -> Result<EncodedStream> {
        self.textend();
        self.flush_post();
        debug!(bytes = self.buffer.len(), "content stream finalized");
        encode_stream(self.buffer, self.compression)
    }

    /// The operator text accumulated so far.
    pub fn stream(&self) -> &str {
        &self.buffer
    }

    /// The deferred operator text not yet flushed.
    pub fn post_stream(&self) -> &str {
        &self.post
    }

    /// Whether a text object is currently open.
    pub fn in_text(&self) -> bool {
        self.in_text
    }

    /// The shared resource table this stream registers names into.
    pub fn resources(&self) -> SharedResources {
        self.resources.clone()
    }

    /// Mirrored graphics parameters.
    pub fn graphics_state(&self) -> &GraphicsState {
        &self.gstate
    }

    /// Mirrored text parameters.
    pub fn text_state(&self) -> &TextState {
        &self.tstate
    }

    /// Components of the last transform written.
    pub fn transform_parts(&self) -> &TransformParts {
        &self.parts
    }

    /// The last transform written, as a matrix.
    pub fn current_matrix(&self) -> Matrix {
        self.matrix
    }

    /// Current path point.
    pub fn current_point(&self) -> Point {
        self.point
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textstart_is_idempotent() {
        let mut content = Content::new();
        content.textstart().textstart();
        assert_eq!(content.stream(), "BT ");
    }

    #[test]
    fn test_textend_flushes_deferred_fragments() {
        let mut content = Content::new();
        content.textstart();
        content.append_path("0 0 m 5 5 l S");
        assert_eq!(content.stream(), "BT ");
        assert_eq!(content.post_stream(), "0 0 m 5 5 l S ");
        content.textend();
        assert_eq!(content.stream(), "BT ET 0 0 m 5 5 l S ");
        assert_eq!(content.post_stream(), "");
    }

    #[test]
    fn test_add_raw_keeps_separator_discipline() {
        let mut content = Content::new();
        content.add_raw("1 0 0 1 0 0 cm").add_raw("q ");
        assert_eq!(content.stream(), "1 0 0 1 0 0 cm q ");
    }

    #[test]
    fn test_finish_closes_open_text_object() {
        let mut content = Content::new();
        content.textstart();
        let encoded = content.finish().unwrap();
        assert_eq!(encoded.data, b"BT ET ");
        assert_eq!(encoded.filter, None);
    }
}
