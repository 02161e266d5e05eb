use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Rectangle draw payload.
///
/// The rectangle is laid out axis-aligned, then rotated clockwise by
/// `rotation` radians about `pivot`. Both are in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
    pub pivot: Vec2,
    pub rotation: f32,
}

impl RectCmd {
    #[inline]
    pub fn rotated(rect: Rect, color: Color, pivot: Vec2, rotation: f32) -> Self {
        Self { rect, color, pivot, rotation }
    }
}

impl DrawList {
    /// Records a solid rectangle rotated clockwise about `pivot`.
    #[inline]
    pub fn push_rotated_rect(
        &mut self,
        z: ZIndex,
        rect: Rect,
        pivot: Vec2,
        rotation: f32,
        color: Color,
    ) {
        self.push(z, DrawCmd::Rect(RectCmd::rotated(rect, color, pivot, rotation)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotated_rect_keeps_its_pivot_and_angle() {
        let mut list = DrawList::new();
        let bar = Rect::new(-1.0, -10.0, 2.0, 10.0);
        list.push_rotated_rect(ZIndex::new(3), bar, Vec2::zero(), core::f32::consts::PI, Color::white());

        let item = &list.items()[0];
        assert_eq!(item.key.z, ZIndex::new(3));
        let DrawCmd::Rect(cmd) = &item.cmd else { panic!("expected a rect, got {:?}", item.cmd) };
        assert_eq!(cmd.rect, bar);
        assert_eq!(cmd.pivot, Vec2::zero());
        assert_eq!(cmd.rotation, core::f32::consts::PI);
    }
}
