//! Graphics state operations.
//!
//! Handles: q, Q, w, J, j, M, d, i, gs
//!
//! Line styling writes the operator and mirrors the value. Save and
//! restore write only the operator: the mirror is not a stack, so values
//! read back after a restore are the last ones written, not the restored
//! ones.

use crate::content::Content;
use crate::model::objects::{NamedObject, ResourceObject};
use crate::model::state::DashPattern;
use crate::resources::ResourceCategory;
use crate::utils::fmt_number;

impl Content {
    /// Saves the graphics state.
    ///
    /// Skipped inside a text object, where the operator is not allowed.
    ///
    /// PDF operator: `q`
    pub fn save(&mut self) -> &mut Self {
        if !self.in_text {
            self.append("q");
        }
        self
    }

    /// Restores the most recently saved graphics state.
    ///
    /// Skipped inside a text object.
    ///
    /// PDF operator: `Q`
    pub fn restore(&mut self) -> &mut Self {
        if !self.in_text {
            self.append("Q");
        }
        self
    }

    /// Sets the stroke line width.
    ///
    /// PDF operator: `w`
    pub fn linewidth(&mut self, width: f64) -> &mut Self {
        self.append(&format!("{} w", fmt_number(width)));
        self.gstate.linewidth = width;
        self
    }

    /// Sets the line cap style (0 butt, 1 round, 2 square).
    ///
    /// PDF operator: `J`
    pub fn linecap(&mut self, style: i32) -> &mut Self {
        self.append(&format!("{style} J"));
        self.gstate.linecap = style;
        self
    }

    /// Sets the line join style (0 miter, 1 round, 2 bevel).
    ///
    /// PDF operator: `j`
    pub fn linejoin(&mut self, style: i32) -> &mut Self {
        self.append(&format!("{style} j"));
        self.gstate.linejoin = style;
        self
    }

    /// Sets the miter limit.
    ///
    /// PDF operator: `M`
    pub fn miterlimit(&mut self, limit: f64) -> &mut Self {
        self.append(&format!("{} M", fmt_number(limit)));
        self.gstate.miterlimit = limit;
        self
    }

    /// Sets the stroke dash pattern.
    ///
    /// PDF operator: `d`
    pub fn linedash(&mut self, pattern: DashPattern) -> &mut Self {
        self.append(&pattern.operators());
        self.gstate.dash = pattern;
        self
    }

    /// Sets the flatness tolerance.
    ///
    /// PDF operator: `i`
    pub fn flatness(&mut self, tolerance: f64) -> &mut Self {
        self.append(&format!("{} i", fmt_number(tolerance)));
        self.gstate.flatness = tolerance;
        self
    }

    /// Applies an extended graphics state dictionary, registering it as
    /// a page resource.
    ///
    /// PDF operator: `gs`
    pub fn egstate(&mut self, state: &NamedObject) -> &mut Self {
        self.resources.borrow_mut().register(
            ResourceCategory::ExtGState,
            &state.name,
            ResourceObject::Ref(state.obj_ref),
        );
        self.append(&format!("/{} gs", state.name));
        self
    }
}
