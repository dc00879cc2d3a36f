//! Content stream construction.
//!
//! [`Content`] is the builder: it owns the operator buffers, the
//! graphics/text mode flag, and the mirrored state, while the `ops`
//! modules extend it with the operator families callers actually use.

pub mod ops;
pub mod stream;

pub use ops::text::{LabelOptions, TextAlign, TextOptions, Underline, UnderlineBand};
pub use stream::Content;
