//! Shape renderers.

mod common;

pub mod circle;
pub mod rect;
pub mod text;
