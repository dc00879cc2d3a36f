//! Operator emission, grouped by concern.
//!
//! Each module extends [`crate::content::Content`] with the operations
//! of one operator family:
//! - `transform` - coordinate transforms (cm, Tm)
//! - `graphics_state` - save/restore and line styling (q, Q, w, J, j, M, d, i, gs)
//! - `path` - path construction and painting (m, l, c, h, re, S, f, B, W, n)
//! - `color` - fill and stroke paint (g, rg, k, cs, sc, scn and friends)
//! - `text` - text state and text showing (Tc..Ts, Td, T*, Tj, TJ)
//! - `xobject` - placements and marked content (Do, sh, BMC, BDC, EMC)

pub mod color;
pub mod graphics_state;
pub mod path;
pub mod text;
pub mod transform;
pub mod xobject;
