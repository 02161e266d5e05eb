use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::scene::shapes::RectCmd;

use super::common::QuadPipeline;

/// Renderer for `DrawCmd::Rect`, including rotated rectangles.
///
/// Geometry is provided in logical pixels; rotation about the pivot and the
/// NDC conversion both happen in the vertex shader. Edges are antialiased over
/// one logical pixel so hairline hands stay smooth at any angle.
pub struct RectRenderer {
    quad: QuadPipeline,
}

impl Default for RectRenderer {
    fn default() -> Self {
        Self {
            quad: QuadPipeline::new("yourtime rect", include_str!("shaders/rect.wgsl")),
        }
    }
}

impl RectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders rectangles contained in `draw_list` into `target`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        let instances: Vec<RectInstance> = draw_list
            .iter_in_paint_order()
            .filter_map(|item| match &item.cmd {
                DrawCmd::Rect(cmd) => RectInstance::from_cmd(cmd, ctx.surface_format),
                _ => None,
            })
            .collect();

        self.quad.draw(ctx, target, RectInstance::layout(), &instances, None);
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    pivot: [f32; 2],
    /// `(sin, cos)` of the clockwise rotation.
    rotation: [f32; 2],
    color: [f32; 4],
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x2, // pivot
        4 => Float32x2, // rotation (sin, cos)
        5 => Float32x4  // color
    ];

    fn from_cmd(cmd: &RectCmd, format: wgpu::TextureFormat) -> Option<Self> {
        let r = cmd.rect.normalized();
        if r.is_empty() || !r.is_finite() || !cmd.rotation.is_finite() {
            return None;
        }
        let (sin, cos) = cmd.rotation.sin_cos();
        Some(Self {
            origin: [r.origin.x, r.origin.y],
            size: [r.size.x, r.size.y],
            pivot: [cmd.pivot.x, cmd.pivot.y],
            rotation: [sin, cos],
            color: cmd.color.for_target(format).to_array(),
        })
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::Color;

    const SRGB: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8UnormSrgb;

    #[test]
    fn empty_rects_are_skipped() {
        let cmd = RectCmd::rotated(Rect::new(0.0, 0.0, 0.0, 10.0), Color::white(), Vec2::zero(), 0.0);
        assert!(RectInstance::from_cmd(&cmd, SRGB).is_none());
    }

    #[test]
    fn rotation_is_packed_as_sin_cos() {
        let cmd = RectCmd::rotated(
            Rect::new(-1.0, -10.0, 2.0, 10.0),
            Color::white(),
            Vec2::zero(),
            0.0,
        );
        let inst = RectInstance::from_cmd(&cmd, SRGB).unwrap();
        assert_eq!(inst.rotation, [0.0, 1.0]);
        assert_eq!(inst.origin, [-1.0, -10.0]);
        assert_eq!(inst.size, [2.0, 10.0]);
    }

    #[test]
    fn colors_are_encoded_for_a_unorm_target() {
        let grey = Color::from_srgb_u8(128, 128, 128, 255);
        let cmd = RectCmd::rotated(Rect::new(0.0, 0.0, 4.0, 4.0), grey, Vec2::zero(), 0.0);

        let linear = RectInstance::from_cmd(&cmd, SRGB).unwrap();
        assert_eq!(linear.color, grey.to_array());

        let encoded = RectInstance::from_cmd(&cmd, wgpu::TextureFormat::Bgra8Unorm).unwrap();
        assert!((encoded.color[0] * 255.0 - 128.0).abs() < 0.5, "{:?}", encoded.color);
    }
}
