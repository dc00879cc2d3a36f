//! Content data model - objects, state, and color specifications.
//!
//! This module contains the builder's data types:
//! - `objects` - references to indirect PDF objects (ObjRef, NamedObject)
//! - `state` - mirrored graphics and text state (GraphicsState, TextState)
//! - `color` - color specifications and their operator forms (ColorSpec)

pub mod color;
pub mod objects;
pub mod state;

// Re-export main types for convenience
pub use color::ColorSpec;
pub use objects::{NamedObject, ObjRef, ResourceObject};
pub use state::{DashPattern, GraphicsState, TextState, TextStatePatch, TransformParts};
