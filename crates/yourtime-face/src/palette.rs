//! Named colors used by the clock face.

/// Straight-alpha sRGB color (`0`–`255` per channel).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const LIGHT_BLUE: Rgba = Rgba::opaque(90, 155, 220);

    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Lookup table for named colors.
pub struct Palette;

impl Palette {
    const ENTRIES: &'static [(&'static str, Rgba)] = &[
        ("LightBlue", Rgba::LIGHT_BLUE),
        ("White", Rgba::WHITE),
    ];

    /// Resolves a color by name (case-insensitive).
    pub fn named(name: &str) -> Option<Rgba> {
        Self::ENTRIES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, c)| c)
    }

    /// Like [`Palette::named`], falling back to `fallback` with a warning.
    pub fn named_or(name: &str, fallback: Rgba) -> Rgba {
        Self::named(name).unwrap_or_else(|| {
            log::warn!("unknown palette color {name:?}; using {fallback:?}");
            fallback
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_names() {
        assert_eq!(Palette::named("LightBlue"), Some(Rgba::LIGHT_BLUE));
        assert_eq!(Palette::named("lightblue"), Some(Rgba::LIGHT_BLUE));
        assert_eq!(Palette::named("White"), Some(Rgba::WHITE));
    }

    #[test]
    fn unknown_name_falls_back() {
        assert_eq!(Palette::named("Mauve"), None);
        assert_eq!(Palette::named_or("Mauve", Rgba::WHITE), Rgba::WHITE);
    }
}
