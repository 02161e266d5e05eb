use crate::angles::Angle;
use crate::palette::Rgba;

use super::scene::{Bar, Point, Size};

/// A clock hand: a bar anchored at the face center, pointing at `angle`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Hand {
    pub length: f32,
    pub width: f32,
    pub angle: Angle,
    pub color: Rgba,
}

impl Hand {
    /// White hand.
    pub fn new(length: f32, width: f32, angle: Angle) -> Self {
        Self { length, width, angle, color: Rgba::WHITE }
    }

    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Geometry for a face centered at `center`: at angle 0 the bar runs from
    /// `center` straight up by `length`.
    pub fn bar(&self, center: Point) -> Bar {
        Bar {
            center: Point::new(center.x, center.y - self.length * 0.5),
            size: Size::new(self.width, self.length),
            pivot: center,
            angle: self.angle,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_white() {
        assert_eq!(Hand::new(100.0, 4.0, Angle::default()).color, Rgba::WHITE);
        let red = Rgba::opaque(255, 0, 0);
        assert_eq!(Hand::new(1.0, 1.0, Angle::default()).color(red).color, red);
    }

    #[test]
    fn bar_is_anchored_at_center() {
        let hand = Hand::new(120.0, 2.0, Angle::from_degrees(90.0));
        let bar = hand.bar(Point::new(200.0, 300.0));

        assert_eq!(bar.pivot, Point::new(200.0, 300.0));
        assert_eq!(bar.center, Point::new(200.0, 240.0));
        assert_eq!(bar.size, Size::new(2.0, 120.0));
        assert_eq!(bar.angle.degrees(), 90.0);
        // Bottom edge of the unrotated bar touches the pivot.
        assert_eq!(bar.center.y + bar.size.height * 0.5, bar.pivot.y);
    }
}
