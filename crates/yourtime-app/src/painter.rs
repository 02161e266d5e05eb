//! Translates a clock `SceneGraph` into the engine's draw stream.

use yourtime_engine::coords::{Rect, Vec2};
use yourtime_engine::paint::Color;
use yourtime_engine::scene::{Border, DrawList, ZIndex};
use yourtime_engine::text::FontSystem;
use yourtime_face::palette::Rgba;
use yourtime_face::view::{Bar, Circle, FontWeight, Label, Node, Point, SceneGraph};

use crate::fonts::FontSet;

/// Records scene nodes into a `DrawList`, one z-layer per node.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    font_system: &'a FontSystem,
    fonts: FontSet,
    z: ZIndex,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, font_system: &'a FontSystem, fonts: FontSet) -> Self {
        Self { draw_list, font_system, fonts, z: ZIndex::default() }
    }

    /// Clears the draw list and records every node of `scene`.
    ///
    /// Returns the background color, which the caller uses as the clear color
    /// for the frame.
    pub fn paint(mut self, scene: &SceneGraph) -> Color {
        self.draw_list.clear();
        let mut clear = Color::transparent();

        for node in scene.nodes() {
            match node {
                Node::Background(rgba) => clear = color(*rgba),
                Node::Title(label) | Node::Digital(label) => self.label(label),
                Node::Outline(circle) | Node::CenterDot(circle) => self.circle(circle),
                Node::Tick(bar) | Node::Hand(_, bar) => self.bar(bar),
            }
        }

        clear
    }

    fn next_z(&mut self) -> ZIndex {
        let z = self.z;
        self.z = z.above();
        z
    }

    fn label(&mut self, label: &Label) {
        let font = match label.weight {
            FontWeight::Regular => self.fonts.regular,
            FontWeight::Bold => self.fonts.bold,
        };
        let Some(font) = font else { return };

        let size = self.font_system.measure_text(&label.text, font, label.size);
        let origin = centered_origin(vec2(label.anchor), size);
        let z = self.next_z();
        self.draw_list
            .push_text(z, label.text.as_str(), font, label.size, color(label.color), origin);
    }

    fn circle(&mut self, circle: &Circle) {
        let fill = circle.fill.map(color).unwrap_or(Color::transparent());
        let border = circle.stroke.map(|s| Border::new(s.width, color(s.color)));
        let z = self.next_z();
        self.draw_list
            .push_circle(z, vec2(circle.center), circle.radius, fill, border);
    }

    fn bar(&mut self, bar: &Bar) {
        let rect = Rect::from_center_size(
            vec2(bar.center),
            Vec2::new(bar.size.width, bar.size.height),
        );
        let z = self.next_z();
        self.draw_list.push_rotated_rect(
            z,
            rect,
            vec2(bar.pivot),
            bar.angle.radians(),
            color(bar.color),
        );
    }
}

/// Top-left origin that centers a block of `size` horizontally on `anchor`.
fn centered_origin(anchor: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(anchor.x - size.x * 0.5, anchor.y)
}

#[inline]
fn vec2(p: Point) -> Vec2 {
    Vec2::new(p.x, p.y)
}

#[inline]
fn color(c: Rgba) -> Color {
    Color::from_srgb_u8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
mod tests {
    use yourtime_engine::scene::DrawCmd;
    use yourtime_face::time::ClockTime;
    use yourtime_face::view::{render, FaceStyle, Size};

    use super::*;

    fn painted(h: u32, m: u32, s: u32) -> (DrawList, Color) {
        let t = ClockTime::from_hms(h, m, s).unwrap();
        let scene = render(&t, &FaceStyle::default(), Size::new(400.0, 800.0));
        let fs = FontSystem::new();
        let mut list = DrawList::new();
        let clear = Painter::new(&mut list, &fs, FontSet::default()).paint(&scene);
        (list, clear)
    }

    #[test]
    fn shapes_without_fonts() {
        let (list, _) = painted(10, 10, 10);
        let rects = list.items().iter().filter(|i| matches!(i.cmd, DrawCmd::Rect(_))).count();
        let circles = list.items().iter().filter(|i| matches!(i.cmd, DrawCmd::Circle(_))).count();
        let texts = list.items().iter().filter(|i| matches!(i.cmd, DrawCmd::Text(_))).count();
        assert_eq!((rects, circles, texts), (15, 2, 0));
    }

    #[test]
    fn background_becomes_clear_color() {
        let (_, clear) = painted(0, 0, 0);
        assert_eq!(clear, color(Rgba::LIGHT_BLUE));
    }

    #[test]
    fn outline_is_stroked_and_dot_is_filled() {
        let (list, _) = painted(0, 0, 0);
        let circles: Vec<_> = list
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Circle(c) => Some(c),
                _ => None,
            })
            .collect();

        assert_eq!(circles[0].radius, 150.0);
        assert_eq!(circles[0].fill, Color::transparent());
        assert_eq!(circles[0].border.map(|b| b.width), Some(2.0));

        assert_eq!(circles[1].radius, 5.0);
        assert_eq!(circles[1].fill, color(Rgba::WHITE));
        assert!(circles[1].border.is_none());
    }

    #[test]
    fn hands_rotate_in_radians() {
        // 03:30:15 -> hour 105, minute 180, second 90 degrees.
        let (list, _) = painted(3, 30, 15);
        let rotations: Vec<f32> = list
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Rect(r) => Some(r.rotation),
                _ => None,
            })
            .skip(12)
            .collect();

        let expected = [105.0f32, 180.0, 90.0].map(f32::to_radians);
        assert_eq!(rotations.len(), 3);
        for (got, want) in rotations.iter().zip(expected) {
            assert!((got - want).abs() < 1e-5, "{got} vs {want}");
        }
    }

    #[test]
    fn z_layers_follow_scene_order() {
        let (list, _) = painted(1, 2, 3);
        let zs: Vec<i32> = list.items().iter().map(|i| i.key.z.0).collect();
        assert!(zs.windows(2).all(|w| w[0] < w[1]), "{zs:?}");
    }

    #[test]
    fn labels_center_on_anchor() {
        let origin = centered_origin(Vec2::new(200.0, 46.0), Vec2::new(120.0, 40.0));
        assert_eq!(origin, Vec2::new(140.0, 46.0));
    }
}
