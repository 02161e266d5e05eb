use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

pub(super) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        let found = preferred
            .into_iter()
            .find(|f| formats.contains(f))
            .or_else(|| formats.iter().copied().find(|f| f.is_srgb()));
        if found.is_some() {
            return found;
        }
    }

    let fallback = formats.first().copied();
    if let Some(f) = fallback.filter(|f| prefer_srgb && !f.is_srgb()) {
        log::warn!("no sRGB surface format offered; falling back to {f:?}");
    }
    fallback
}

pub(super) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Maps a surface error to the action the frame loop should take.
///
/// `Lost`/`Outdated` are recoverable by reconfiguring, which the caller does
/// when this returns [`SurfaceErrorAction::Reconfigured`] and the size is non-zero.
pub(super) fn classify_surface_error(
    err: &wgpu::SurfaceError,
    size: PhysicalSize<u32>,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if size.width > 0 && size.height > 0 {
                SurfaceErrorAction::Reconfigured
            } else {
                SurfaceErrorAction::SkipFrame
            }
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}
