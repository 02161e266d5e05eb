//! Paint model shared between the app and renderers.
//!
//! Everything the clock draws is a flat fill, so the paint source is a single
//! premultiplied [`Color`]. Geometry types remain in `coords`.

mod color;

pub use color::Color;
