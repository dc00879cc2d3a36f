//! Paint color operations.
//!
//! Handles: g, G, rg, RG, k, K, cs, CS, sc, SC, scn, SCN
//!
//! The color is normalized by [`ColorSpec::operators`], which also
//! registers any colorspace or pattern resource the operators name. The
//! mirror stores the specification as given, before clamping, so reads
//! return what the caller set.

use crate::content::Content;
use crate::error::Result;
use crate::model::color::ColorSpec;

impl Content {
    /// Sets the non-stroking paint.
    pub fn fillcolor(&mut self, color: impl Into<ColorSpec>) -> Result<&mut Self> {
        let color = color.into();
        let fragment = color.operators(false, &mut self.resources.borrow_mut())?;
        self.append(&fragment);
        self.gstate.fillcolor = color;
        Ok(self)
    }

    /// Sets the stroking paint.
    pub fn strokecolor(&mut self, color: impl Into<ColorSpec>) -> Result<&mut Self> {
        let color = color.into();
        let fragment = color.operators(true, &mut self.resources.borrow_mut())?;
        self.append(&fragment);
        self.gstate.strokecolor = color;
        Ok(self)
    }
}
