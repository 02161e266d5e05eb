use crate::palette::{Palette, Rgba};

use super::scene::{Point, Size};

/// Visual parameters of the clock screen, in logical pixels.
///
/// `Default` reproduces the stock "In Your Own Time" look.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceStyle {
    pub title: String,
    pub background: Rgba,
    pub foreground: Rgba,

    pub title_size: f32,
    /// Gap above the title.
    pub title_top: f32,
    pub digital_size: f32,
    /// Gap between the title block and the digital label.
    pub digital_top: f32,
    /// Padding below each label.
    pub label_bottom: f32,
    /// Space between stacked blocks.
    pub spacing: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,

    pub face_diameter: f32,
    pub outline_width: f32,
    pub tick_size: Size,
    /// Distance from the face center to each tick's center.
    pub tick_offset: f32,
    pub tick_count: u32,

    pub hour_hand: HandStyle,
    pub minute_hand: HandStyle,
    pub second_hand: HandStyle,
    pub dot_diameter: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandStyle {
    pub length: f32,
    pub width: f32,
    pub color: Rgba,
}

impl Default for FaceStyle {
    fn default() -> Self {
        let white = Rgba::WHITE;
        Self {
            title: "In Your Own Time".to_string(),
            background: Palette::named_or("LightBlue", Rgba::LIGHT_BLUE),
            foreground: white,

            title_size: 35.0,
            title_top: 30.0 + 16.0,
            digital_size: 50.0,
            digital_top: 80.0 + 16.0,
            label_bottom: 16.0,
            spacing: 8.0,
            line_height: 1.2,

            face_diameter: 300.0,
            outline_width: 2.0,
            tick_size: Size::new(2.0, 15.0),
            tick_offset: 143.0,
            tick_count: 12,

            hour_hand: HandStyle { length: 100.0, width: 4.0, color: white },
            minute_hand: HandStyle { length: 120.0, width: 2.0, color: white },
            second_hand: HandStyle { length: 140.0, width: 1.0, color: white },
            dot_diameter: 10.0,
        }
    }
}

/// Resolved anchor positions for one viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Layout {
    pub title: Point,
    pub digital: Point,
    pub face_center: Point,
}

impl Layout {
    /// Stacks title, digital label and face vertically, centered horizontally.
    ///
    /// The face is pulled up when the viewport is too short to show it below
    /// the labels; if the viewport is shorter than the face it is centered.
    pub fn compute(style: &FaceStyle, viewport: Size) -> Self {
        let cx = viewport.width * 0.5;
        let radius = style.face_diameter * 0.5;

        let title_y = style.title_top;
        let title_bottom = title_y + style.title_size * style.line_height + style.label_bottom;

        let digital_y = title_bottom + style.spacing + style.digital_top;
        let digital_bottom =
            digital_y + style.digital_size * style.line_height + style.label_bottom;

        let natural_cy = digital_bottom + style.spacing + radius;
        let cy = if viewport.height >= style.face_diameter {
            natural_cy.min(viewport.height - radius)
        } else {
            viewport.height * 0.5
        };

        Self {
            title: Point::new(cx, title_y),
            digital: Point::new(cx, digital_y),
            face_center: Point::new(cx, cy),
        }
    }
}
