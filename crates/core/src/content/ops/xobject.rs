//! External object placement and marked content.
//!
//! Handles: Do, sh, BMC, BDC, EMC
//!
//! Placements wrap their `Do` in a local `q`/`cm`/`Q` so the placement
//! transform never leaks into the surrounding state. An object carrying
//! structure metadata additionally gets a marked-content wrapper.

use tracing::debug;

use crate::content::Content;
use crate::model::objects::{NamedObject, ResourceObject};
use crate::resources::ResourceCategory;
use crate::utils::fmt_numbers;
use crate::xobject::{XObject, XObjectMetadata};

impl Content {
    /// Places an image with its unit square mapped onto the given box.
    ///
    /// PDF operator: `Do`
    pub fn image(&mut self, image: &dyn XObject, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.place(image, x, y, width, height)
    }

    /// Places an image scaled uniformly from its native extent.
    pub fn image_scaled(&mut self, image: &dyn XObject, x: f64, y: f64, scale: f64) -> &mut Self {
        let width = image.width() * scale;
        let height = image.height() * scale;
        self.place(image, x, y, width, height)
    }

    /// Places a form XObject at its native extent, scaled uniformly.
    pub fn formimage(&mut self, form: &dyn XObject, x: f64, y: f64, scale: f64) -> &mut Self {
        self.place(form, x, y, form.width() * scale, form.height() * scale)
    }

    fn place(&mut self, object: &dyn XObject, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.resources.borrow_mut().register(
            ResourceCategory::XObject,
            object.name(),
            ResourceObject::Ref(object.obj_ref()),
        );
        debug!(name = object.name(), x, y, width, height, "xobject placed");
        let marked = object.metadata();
        if let Some(meta) = &marked {
            self.open_marked_content(meta);
        }
        self.save();
        self.append(&format!(
            "{} cm",
            fmt_numbers(&[width, 0.0, 0.0, height, x, y])
        ));
        self.append(&format!("/{} Do", object.name()));
        self.restore();
        if marked.is_some() {
            self.end_marked_content();
        }
        self.point = (x, y);
        self
    }

    /// Paints a shading over the current clip region, registering it as a
    /// page resource.
    ///
    /// PDF operator: `sh`
    pub fn shade(&mut self, shading: &NamedObject) -> &mut Self {
        self.resources.borrow_mut().register(
            ResourceCategory::Shading,
            &shading.name,
            ResourceObject::Ref(shading.obj_ref),
        );
        self.append(&format!("/{} sh", shading.name));
        self
    }

    /// Opens a marked-content sequence with a bare tag.
    ///
    /// PDF operator: `BMC`
    pub fn begin_marked_content(&mut self, tag: &str) -> &mut Self {
        self.append(&format!("/{tag} BMC"));
        self
    }

    /// Opens a marked-content sequence with a properties dictionary,
    /// registering the dictionary as a page resource.
    ///
    /// PDF operator: `BDC`
    pub fn begin_marked_content_dict(&mut self, tag: &str, properties: &NamedObject) -> &mut Self {
        self.resources.borrow_mut().register(
            ResourceCategory::Properties,
            &properties.name,
            ResourceObject::Ref(properties.obj_ref),
        );
        self.append(&format!("/{tag} /{} BDC", properties.name));
        self
    }

    /// Closes the innermost marked-content sequence.
    ///
    /// PDF operator: `EMC`
    pub fn end_marked_content(&mut self) -> &mut Self {
        self.append("EMC");
        self
    }

    fn open_marked_content(&mut self, meta: &XObjectMetadata) {
        match &meta.properties {
            Some(properties) => {
                self.begin_marked_content_dict(&meta.tag, properties);
            }
            None => {
                self.begin_marked_content(&meta.tag);
            }
        }
    }
}
