use yourtime_engine::text::{FontId, FontSystem};

/// Monospaced faces are tried first so the digital label does not jitter as
/// digits change width.
const REGULAR_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/noto/NotoSansMono-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansMono-Regular.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "C:\\Windows\\Fonts\\consola.ttf",
    // Proportional last resort.
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
];

const BOLD_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSansMono-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono-Bold.ttf",
    "/usr/share/fonts/noto/NotoSansMono-Bold.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansMono-Bold.ttf",
    "C:\\Windows\\Fonts\\consolab.ttf",
];

/// Font handles the painter picks from. `None` means labels of that weight
/// are not drawn.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FontSet {
    pub regular: Option<FontId>,
    pub bold: Option<FontId>,
}

/// Returns the bytes of the first readable file in `paths`.
pub fn read_first(paths: &[&str]) -> Option<Vec<u8>> {
    paths.iter().find_map(|p| {
        let bytes = std::fs::read(p).ok()?;
        log::debug!("font candidate: {p}");
        Some(bytes)
    })
}

pub fn system_regular() -> Option<Vec<u8>> {
    read_first(REGULAR_PATHS)
}

pub fn system_bold() -> Option<Vec<u8>> {
    read_first(BOLD_PATHS)
}

/// Loads `regular` and `bold` into `fs`. A missing or broken bold face falls
/// back to the regular one.
pub fn load(fs: &mut FontSystem, regular: Option<&[u8]>, bold: Option<&[u8]>) -> FontSet {
    let mut load_one = |name: &str, bytes: Option<&[u8]>| -> Option<FontId> {
        let bytes = bytes?;
        match fs.load_font(bytes) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("failed to load {name} font: {e}");
                None
            }
        }
    };

    let regular = load_one("regular", regular);
    let bold = load_one("bold", bold).or(regular);

    if regular.is_none() {
        log::warn!("no usable font found; clock labels will not be drawn");
    }

    FontSet { regular, bold }
}
