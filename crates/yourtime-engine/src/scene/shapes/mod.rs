pub(crate) mod circle;
pub(crate) mod rect;
pub(crate) mod text;

pub use circle::CircleCmd;
pub use rect::RectCmd;
pub use text::TextCmd;

use crate::paint::Color;

/// Stroke drawn along the inner edge of a shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}
