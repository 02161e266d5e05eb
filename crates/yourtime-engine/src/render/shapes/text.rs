use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::common::QuadPipeline;

// ── atlas constants ────────────────────────────────────────────────────────

/// The clock only ever shows digits, a colon and one title line, so a
/// modest atlas holds every glyph at every scale a monitor will ask for.
const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs in the atlas

// ── shelf packer ──────────────────────────────────────────────────────────

/// Row-based ("shelf") allocator for glyph bitmaps.
///
/// Kept free of GPU types so placement can be tested on its own.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
        }
    }

    /// Reserves a `w × h` slot and returns its top-left corner.
    fn allocate(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full || w + 2 * GLYPH_PADDING > self.size {
            return None;
        }

        // Advance to a new shelf row when the glyph doesn't fit horizontally.
        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > self.size {
            self.full = true;
            return None;
        }

        let slot = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(slot)
    }
}

// ── atlas ─────────────────────────────────────────────────────────────────

struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// R8 coverage texture plus the glyph slots packed into it.
///
/// Tied to one pipeline build: its bind group was made from that build's
/// texture layout, so a rebuild replaces the whole atlas.
struct GlyphAtlas {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    packer: ShelfPacker,
    glyphs: HashMap<GlyphRasterConfig, CachedGlyph>,
    warned_full: bool,
}

impl GlyphAtlas {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("yourtime glyph atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("yourtime glyph sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("yourtime glyph atlas"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            texture,
            bind_group,
            packer: ShelfPacker::new(ATLAS_SIZE),
            glyphs: HashMap::new(),
            warned_full: false,
        }
    }

    /// Returns the atlas slot for `key`, rasterizing and uploading on a miss.
    fn glyph(
        &mut self,
        queue: &wgpu::Queue,
        font: &fontdue::Font,
        key: GlyphRasterConfig,
    ) -> Option<&CachedGlyph> {
        if !self.glyphs.contains_key(&key) {
            let (metrics, bitmap) = font.rasterize_config(key);
            let (w, h) = (metrics.width as u32, metrics.height as u32);
            if w == 0 || h == 0 {
                return None;
            }

            let Some((gx, gy)) = self.packer.allocate(w, h) else {
                if !self.warned_full {
                    log::warn!("glyph atlas full ({ATLAS_SIZE}x{ATLAS_SIZE}); dropping glyphs");
                    self.warned_full = true;
                }
                return None;
            };

            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &self.texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                    aspect: wgpu::TextureAspect::All,
                },
                &bitmap,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(w),
                    rows_per_image: Some(h),
                },
                wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
            );

            let n = ATLAS_SIZE as f32;
            self.glyphs.insert(key, CachedGlyph {
                uv_min: [gx as f32 / n, gy as f32 / n],
                uv_max: [(gx + w) as f32 / n, (gy + h) as f32 / n],
            });
        }
        self.glyphs.get(&key)
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Renderer for `DrawCmd::Text`.
///
/// Glyphs are laid out and rasterized at physical size (`size * scale_factor`)
/// so labels stay crisp on HiDPI displays, then mapped back to logical pixels.
/// Rasterized glyphs are cached in the atlas, keyed by `GlyphRasterConfig`
/// (font, glyph index, pixel size).
pub struct TextRenderer {
    quad: QuadPipeline,
    atlas: Option<GlyphAtlas>,
    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            quad: QuadPipeline::textured("yourtime text", include_str!("shaders/text.wgsl")),
            atlas: None,
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders all `DrawCmd::Text` entries in `draw_list`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        font_system: &FontSystem,
    ) {
        let rebuilt = self.quad.prepare(ctx, GlyphInstance::layout());
        if rebuilt || self.atlas.is_none() {
            let Some(layout) = self.quad.texture_layout() else { return };
            self.atlas = Some(GlyphAtlas::new(ctx.device, layout));
        }
        let Some(atlas) = self.atlas.as_mut() else { return };

        let scale = ctx.scale_factor.max(0.01);
        let mut instances: Vec<GlyphInstance> = Vec::new();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Text(cmd) = &item.cmd else { continue };
            let Some(font) = font_system.get(cmd.font) else {
                log::warn!("{}: unknown {:?}, skipping", self.quad.label(), cmd.font);
                continue;
            };

            self.layout.reset(&LayoutSettings {
                x: (cmd.origin.x * scale).round(),
                y: (cmd.origin.y * scale).round(),
                ..LayoutSettings::default()
            });
            self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

            let color = cmd.color.for_target(ctx.surface_format).to_array();
            for g in self.layout.glyphs() {
                if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                    continue;
                }
                let Some(slot) = atlas.glyph(ctx.queue, font, g.key) else { continue };

                instances.push(GlyphInstance {
                    dst_min: [g.x / scale, g.y / scale],
                    dst_max: [(g.x + g.width as f32) / scale, (g.y + g.height as f32) / scale],
                    uv_min: slot.uv_min,
                    uv_max: slot.uv_max,
                    color,
                });
            }
        }

        self.quad.draw(
            ctx,
            target,
            GlyphInstance::layout(),
            &instances,
            Some(&atlas.bind_group),
        );
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packer_fills_a_row_then_wraps() {
        let mut p = ShelfPacker::new(32);
        assert_eq!(p.allocate(10, 5), Some((1, 1)));
        assert_eq!(p.allocate(10, 8), Some((12, 1)));
        // 23 + 10 + 1 > 32: new shelf below the tallest glyph of the row.
        assert_eq!(p.allocate(10, 4), Some((1, 10)));
    }

    #[test]
    fn packer_reports_full_and_stays_full() {
        let mut p = ShelfPacker::new(16);
        assert_eq!(p.allocate(14, 14), Some((1, 1)));
        assert_eq!(p.allocate(14, 14), None);
        assert_eq!(p.allocate(1, 1), None);
    }

    #[test]
    fn oversized_glyph_is_rejected_without_filling() {
        let mut p = ShelfPacker::new(16);
        assert_eq!(p.allocate(20, 2), None);
        assert_eq!(p.allocate(2, 2), Some((1, 1)));
    }
}
