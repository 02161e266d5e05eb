//! Pure clock view: `ClockTime` in, `SceneGraph` out.
//!
//! The view holds no state and handles no input. Calling [`render`] twice with
//! the same arguments yields equal scenes.

mod hand;
mod layout;
mod scene;

pub use hand::Hand;
pub use layout::{FaceStyle, HandStyle, Layout};
pub use scene::{Bar, Circle, FontWeight, HandKind, Label, Node, Point, SceneGraph, Size, Stroke};

use crate::angles::{digital_string, hours_angle, minutes_angle, seconds_angle, Angle};
use crate::time::ClockTime;

/// Builds the full clock scene for `time` in a viewport of `viewport` logical px.
///
/// Paint order: background, title, digital label, outline, ticks, hour,
/// minute and second hands, center dot.
pub fn render(time: &ClockTime, style: &FaceStyle, viewport: Size) -> SceneGraph {
    let layout = Layout::compute(style, viewport);
    let center = layout.face_center;
    let fg = style.foreground;

    let mut scene = SceneGraph::new();
    scene.push(Node::Background(style.background));

    scene.push(Node::Title(Label {
        text: style.title.clone(),
        anchor: layout.title,
        size: style.title_size,
        weight: FontWeight::Bold,
        color: fg,
    }));
    scene.push(Node::Digital(Label {
        text: digital_string(*time),
        anchor: layout.digital,
        size: style.digital_size,
        weight: FontWeight::Regular,
        color: fg,
    }));

    scene.push(Node::Outline(Circle {
        center,
        radius: style.face_diameter * 0.5,
        fill: None,
        stroke: Some(Stroke { width: style.outline_width, color: fg }),
    }));

    let step = 360.0 / style.tick_count.max(1) as f32;
    for i in 0..style.tick_count {
        scene.push(Node::Tick(Bar {
            center: Point::new(center.x, center.y - style.tick_offset),
            size: style.tick_size,
            pivot: center,
            angle: Angle::from_degrees(i as f32 * step),
            color: fg,
        }));
    }

    let hands = [
        (HandKind::Hour, style.hour_hand, hours_angle(*time)),
        (HandKind::Minute, style.minute_hand, minutes_angle(*time)),
        (HandKind::Second, style.second_hand, seconds_angle(*time)),
    ];
    for (kind, hs, angle) in hands {
        let hand = Hand::new(hs.length, hs.width, angle).color(hs.color);
        scene.push(Node::Hand(kind, hand.bar(center)));
    }

    scene.push(Node::CenterDot(Circle {
        center,
        radius: style.dot_diameter * 0.5,
        fill: Some(fg),
        stroke: None,
    }));

    scene
}
