//! Font loading and text measurement.
//!
//! Rasterization lives in `render::shapes::text`; this module only owns the
//! parsed fonts so layout code can measure strings without touching the GPU.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
