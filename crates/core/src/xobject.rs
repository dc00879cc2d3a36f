//! External object capability seam.
//!
//! Images and form XObjects live outside the content stream; placing one
//! only needs its resource name, object reference, and native extent.
//! Optional structure metadata lets a placement be wrapped in a
//! marked-content sequence.

use std::rc::Rc;

use crate::model::objects::{NamedObject, ObjRef};

pub type XObjectRef = Rc<dyn XObject>;

/// Marked-content wrapper emitted around a placement.
#[derive(Debug, Clone, PartialEq)]
pub struct XObjectMetadata {
    /// Marked-content tag, e.g. "Artifact" or "Figure".
    pub tag: String,
    /// Properties dictionary for `BDC`, registered at placement time;
    /// `None` emits plain `BMC`.
    pub properties: Option<NamedObject>,
}

pub trait XObject {
    /// Resource name the object is registered under (e.g. "Im1").
    fn name(&self) -> &str;

    /// Indirect reference to the stream object.
    fn obj_ref(&self) -> ObjRef;

    /// Native width in user units. Images map their pixel grid onto a
    /// unit square, so this is 1 for them and the bounding-box width for
    /// forms.
    fn width(&self) -> f64;

    /// Native height in user units.
    fn height(&self) -> f64;

    /// Structure metadata, when the placement should be marked.
    fn metadata(&self) -> Option<XObjectMetadata> {
        None
    }
}

/// Plain placeable object described by its registration facts alone.
#[derive(Debug, Clone)]
pub struct ExternalObject {
    name: String,
    obj_ref: ObjRef,
    width: f64,
    height: f64,
    metadata: Option<XObjectMetadata>,
}

impl ExternalObject {
    /// An image: unit extent, scaled at placement time.
    pub fn image(name: impl Into<String>, obj_ref: ObjRef) -> Self {
        Self {
            name: name.into(),
            obj_ref,
            width: 1.0,
            height: 1.0,
            metadata: None,
        }
    }

    /// A form with the given bounding-box extent.
    pub fn form(name: impl Into<String>, obj_ref: ObjRef, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            obj_ref,
            width,
            height,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, tag: impl Into<String>, properties: Option<NamedObject>) -> Self {
        self.metadata = Some(XObjectMetadata {
            tag: tag.into(),
            properties,
        });
        self
    }
}

impl XObject for ExternalObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn obj_ref(&self) -> ObjRef {
        self.obj_ref
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn metadata(&self) -> Option<XObjectMetadata> {
        self.metadata.clone()
    }
}
