/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are multiplied by `a` (premultiplied alpha).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    /// Creates a premultiplied color from straight sRGB bytes (`0`–`255`).
    ///
    /// The rgb channels are decoded to linear before premultiplying; see
    /// [`Color::for_target`] for drawing to a non-sRGB surface. Alpha is never
    /// gamma-encoded.
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(
            srgb_to_linear(r as f32 / 255.0),
            srgb_to_linear(g as f32 / 255.0),
            srgb_to_linear(b as f32 / 255.0),
            a as f32 / 255.0,
        )
    }

    /// Creates a premultiplied color from straight alpha linear components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Re-encodes this color for a render target of `format`.
    ///
    /// sRGB and float targets take linear values. A plain unorm target stores
    /// what the shader outputs and is shown as sRGB, so its rgb channels are
    /// gamma-encoded here (on straight alpha) to keep the same on-screen shade.
    pub fn for_target(self, format: wgpu::TextureFormat) -> Self {
        if !stores_encoded_srgb(format) || self.a <= 0.0 {
            return self;
        }
        let a = self.a;
        Self {
            r: linear_to_srgb(self.r / a) * a,
            g: linear_to_srgb(self.g / a) * a,
            b: linear_to_srgb(self.b / a) * a,
            a,
        }
    }

    /// Components as a GPU-ready array.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Clear color for `wgpu::LoadOp::Clear`.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn stores_encoded_srgb(format: wgpu::TextureFormat) -> bool {
    matches!(
        format,
        wgpu::TextureFormat::Bgra8Unorm
            | wgpu::TextureFormat::Rgba8Unorm
            | wgpu::TextureFormat::Rgb10a2Unorm
    )
}

#[inline]
fn linear_to_srgb(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_white_and_black_survive_decoding() {
        let w = Color::from_srgb_u8(255, 255, 255, 255);
        assert!((w.r - 1.0).abs() < 1e-5 && (w.b - 1.0).abs() < 1e-5 && w.a == 1.0, "{w:?}");
        assert_eq!(Color::from_srgb_u8(0, 0, 0, 255), Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 });
    }

    #[test]
    fn straight_alpha_is_premultiplied() {
        let c = Color::from_straight(1.0, 0.5, 0.0, 0.5);
        assert_eq!(c, Color { r: 0.5, g: 0.25, b: 0.0, a: 0.5 });
    }

    #[test]
    fn mid_grey_decodes_below_half() {
        let c = Color::from_srgb_u8(128, 128, 128, 255);
        assert!(c.r > 0.2 && c.r < 0.23, "{}", c.r);
    }

    #[test]
    fn srgb_and_float_targets_keep_linear_values() {
        let c = Color::from_srgb_u8(128, 64, 32, 200);
        assert_eq!(c.for_target(wgpu::TextureFormat::Bgra8UnormSrgb), c);
        assert_eq!(c.for_target(wgpu::TextureFormat::Rgba16Float), c);
    }

    #[test]
    fn unorm_target_gets_the_original_srgb_bytes_back() {
        let c = Color::from_srgb_u8(128, 64, 32, 255).for_target(wgpu::TextureFormat::Bgra8Unorm);
        for (got, want) in [(c.r, 128.0), (c.g, 64.0), (c.b, 32.0)] {
            assert!((got * 255.0 - want).abs() < 0.5, "{got} vs {want}");
        }
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn unorm_target_stays_premultiplied() {
        let c = Color::from_srgb_u8(128, 128, 128, 128).for_target(wgpu::TextureFormat::Rgba8Unorm);
        let straight = c.r / c.a;
        assert!((straight * 255.0 - 128.0).abs() < 0.5, "{straight}");
        assert_eq!(Color::transparent().for_target(wgpu::TextureFormat::Rgba8Unorm), Color::transparent());
    }
}
