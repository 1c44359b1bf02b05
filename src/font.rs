//! Locates a TrueType/OpenType font for the image renderer.
//!
//! Lookup order: an explicit path, then `NEUQ_FONT`, then well-known system
//! locations of CJK fonts. DejaVu Sans is the last resort; it has no CJK
//! glyphs, so Chinese text comes out as missing-glyph boxes.

use crate::error::{ErrorKind, Result};
use ab_glyph::{Font, FontVec};
use std::path::{Path, PathBuf};

pub const FONT_ENV: &str = "NEUQ_FONT";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/opentype/source-han-sans/SourceHanSansSC-Regular.otf",
    "/usr/share/fonts/adobe-source-han-sans/SourceHanSansCN-Regular.otf",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-zenhei.ttc",
    "/usr/share/fonts/wenquanyi/wqy-microhei/wqy-microhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
];

/// Loads the first face of a font file (`.ttf`, `.otf` or `.ttc`).
pub fn load(path: &Path) -> Result<FontVec> {
    let bytes = std::fs::read(path)?;
    let font = FontVec::try_from_vec_and_index(bytes, 0)
        .map_err(|e| ErrorKind::FontError(format!("{}: {e}", path.display())))?;
    Ok(font)
}

/// Finds a usable font. An explicit or `NEUQ_FONT` path must load; system
/// locations are tried silently. `Ok(None)` when nothing is installed.
pub fn discover(explicit: Option<&Path>) -> Result<Option<FontVec>> {
    if let Some(path) = explicit {
        return load(path).map(Some);
    }
    if let Some(path) = std::env::var_os(FONT_ENV).map(PathBuf::from) {
        return load(&path).map(Some);
    }

    for candidate in SYSTEM_FONTS.iter().map(Path::new).filter(|p| p.is_file()) {
        match load(candidate) {
            Ok(font) => {
                tracing::debug!(path = %candidate.display(), "using system font");
                return Ok(Some(font));
            }
            Err(e) => tracing::debug!(error = %e, "skipping unreadable font"),
        }
    }
    Ok(None)
}

/// Whether the font has glyphs for the Chinese labels drawn on images.
pub fn supports_cjk(font: &impl Font) -> bool {
    "空教室".chars().all(|c| font.glyph_id(c).0 != 0)
}
