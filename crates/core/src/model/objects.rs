//! References to document-owned objects.
//!
//! The builder never creates or serializes indirect objects itself; the
//! document-assembly layer owns them and hands the builder just enough
//! identity to reference them from the operator stream and the resource
//! table.

/// PDF indirect object reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjRef {
    /// Object ID
    pub objid: u32,
    /// Generation number
    pub genno: u32,
}

impl ObjRef {
    /// Create a new object reference.
    pub const fn new(objid: u32, genno: u32) -> Self {
        Self { objid, genno }
    }
}

/// Name plus indirect reference for a document-owned resource: a pattern,
/// shading, colorspace, ExtGState, or properties dictionary. The name is
/// what appears after `/` in the stream and keys the resource table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedObject {
    pub name: String,
    pub obj_ref: ObjRef,
}

impl NamedObject {
    pub fn new(name: impl Into<String>, obj_ref: ObjRef) -> Self {
        Self {
            name: name.into(),
            obj_ref,
        }
    }
}

/// A CIE L*a*b colorspace definition.
///
/// The only object the builder synthesizes itself, created lazily the first
/// time an HSL or L*a*b color is emitted and registered under the
/// ColorSpace category for the document layer to serialize.
#[derive(Debug, Clone, PartialEq)]
pub struct LabColorSpace {
    pub white_point: [f64; 3],
    pub range: [f64; 4],
    pub gamma: [f64; 3],
}

impl Default for LabColorSpace {
    fn default() -> Self {
        Self {
            white_point: [1.0, 1.0, 1.0],
            range: [-128.0, 127.0, -128.0, 127.0],
            gamma: [2.2, 2.2, 2.2],
        }
    }
}

/// What a resource table entry points at.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceObject {
    /// Indirect reference to an object owned by the document layer.
    Ref(ObjRef),
    /// A synthesized L*a*b colorspace definition.
    Lab(LabColorSpace),
}
