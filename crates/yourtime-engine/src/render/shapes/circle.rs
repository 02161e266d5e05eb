use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::scene::shapes::CircleCmd;

use super::common::QuadPipeline;

/// Renderer for `DrawCmd::Circle`.
///
/// Fill and border are resolved per pixel from the distance to the center;
/// borders are an AA ring on the inner side of the radius, so a transparent
/// fill yields an outline of exactly `border.width`.
pub struct CircleRenderer {
    quad: QuadPipeline,
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self {
            quad: QuadPipeline::new("yourtime circle", include_str!("shaders/circle.wgsl")),
        }
    }
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        let instances: Vec<CircleInstance> = draw_list
            .iter_in_paint_order()
            .filter_map(|item| match &item.cmd {
                DrawCmd::Circle(cmd) => CircleInstance::from_cmd(cmd, ctx.surface_format),
                _ => None,
            })
            .collect();

        self.quad.draw(ctx, target, CircleInstance::layout(), &instances, None);
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    /// `(radius, border_width)`.
    radius_bw: [f32; 2],
    fill: [f32; 4],
    border_color: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius, border width
        3 => Float32x4, // fill
        4 => Float32x4  // border color
    ];

    fn from_cmd(cmd: &CircleCmd, format: wgpu::TextureFormat) -> Option<Self> {
        if cmd.radius <= 0.0 || !cmd.center.is_finite() {
            return None;
        }
        let (border_width, border_color) = match cmd.border {
            Some(b) => (b.width.clamp(0.0, cmd.radius), b.color.for_target(format).to_array()),
            None => (0.0, [0.0; 4]),
        };
        Some(Self {
            center: [cmd.center.x, cmd.center.y],
            radius_bw: [cmd.radius, border_width],
            fill: cmd.fill.for_target(format).to_array(),
            border_color,
        })
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::Border;

    #[test]
    fn border_is_clamped_to_radius() {
        let cmd = CircleCmd::new(
            Vec2::new(5.0, 5.0),
            3.0,
            Color::transparent(),
            Some(Border::new(10.0, Color::white())),
        );
        let inst = CircleInstance::from_cmd(&cmd, wgpu::TextureFormat::Bgra8UnormSrgb).unwrap();
        assert_eq!(inst.radius_bw, [3.0, 3.0]);
    }

    #[test]
    fn degenerate_radius_is_skipped() {
        let cmd = CircleCmd::new(Vec2::zero(), 0.0, Color::white(), None);
        assert!(CircleInstance::from_cmd(&cmd, wgpu::TextureFormat::Bgra8UnormSrgb).is_none());
    }

    #[test]
    fn fill_and_border_are_encoded_for_a_unorm_target() {
        let grey = Color::from_srgb_u8(128, 128, 128, 255);
        let cmd = CircleCmd::new(Vec2::zero(), 10.0, grey, Some(Border::new(2.0, grey)));
        let inst = CircleInstance::from_cmd(&cmd, wgpu::TextureFormat::Rgba8Unorm).unwrap();
        assert!((inst.fill[0] * 255.0 - 128.0).abs() < 0.5, "{:?}", inst.fill);
        assert_eq!(inst.fill, inst.border_color);
    }
}
