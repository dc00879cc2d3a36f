//! escriba - PDF content stream construction.
//!
//! This crate builds the operator streams that describe a PDF page. A
//! [`Content`] accumulates drawing, color, transform, and text operators
//! while mirroring the state they imply, so callers can read positions
//! and parameters back without parsing what they wrote. Fonts, images,
//! patterns, and the rest of the document live outside the crate behind
//! small capability traits; the builder only registers their names and
//! references in the shared [`resources::ResourceTable`].
//!
//! ```
//! use escriba_core::content::Content;
//!
//! let mut page = Content::new();
//! page.linewidth(2.0)
//!     .move_to(72.0, 72.0)
//!     .line_to(144.0, 72.0)
//!     .stroke();
//! let encoded = page.finish().unwrap();
//! assert_eq!(encoded.data, b"2 w 72 72 m 144 72 l S ");
//! ```

pub mod content;
pub mod encoder;
pub mod error;
pub mod font;
pub mod geometry;
pub mod model;
pub mod resources;
pub mod utils;
pub mod xobject;

pub use content::{Content, LabelOptions, TextAlign, TextOptions, Underline, UnderlineBand};
pub use encoder::{Compression, EncodedStream, StreamFilter};
pub use error::{PdfError, Result};
pub use font::{Font, FontRef, SimpleFont};
pub use model::color::ColorSpec;
pub use model::objects::{NamedObject, ObjRef};
pub use resources::{ResourceCategory, ResourceTable, SharedResources};
pub use xobject::{ExternalObject, XObject, XObjectRef};
