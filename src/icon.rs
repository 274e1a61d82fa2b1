//! # App Icon
//!
//! Draws the play-button glyph at the standard macOS icon sizes and lays the
//! renders out as an `.iconset` directory for `iconutil`.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::{Rgba, RgbaImage};
use tracing::{debug, info};

use crate::error::{IconError, Result};

/// Resolutions the glyph is rendered at
pub const ICON_SIZES: [u32; 7] = [16, 32, 64, 128, 256, 512, 1024];

pub const BACKGROUND: [u8; 4] = [42, 42, 46, 255];
pub const GLYPH: [u8; 4] = [240, 80, 120, 255];

/// Render the icon at `size`×`size`
pub fn render_icon(size: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(size, size, Rgba(BACKGROUND));
    let triangle = play_triangle(size);

    for y in 0..size {
        for x in 0..size {
            // sample at the pixel center
            let p = (x as f64 + 0.5, y as f64 + 0.5);
            if point_in_triangle(p, &triangle) {
                img.put_pixel(x, y, Rgba(GLYPH));
            }
        }
    }
    img
}

/// Vertices of the right-pointing play triangle for an icon of `size`
pub fn play_triangle(size: u32) -> [(f64, f64); 3] {
    let center = (size / 2) as f64;
    let radius = (size as f64 * 0.35).floor();
    let back = (radius * 0.8).floor();
    [
        (center - back, center - radius),
        (center - back, center + radius),
        (center + radius, center),
    ]
}

fn point_in_triangle(p: (f64, f64), t: &[(f64, f64); 3]) -> bool {
    let edge = |a: (f64, f64), b: (f64, f64)| (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0);
    let d0 = edge(t[0], t[1]);
    let d1 = edge(t[1], t[2]);
    let d2 = edge(t[2], t[0]);
    let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
    let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
    !(has_neg && has_pos)
}

/// Write `icon_NxN.png` and retina `icon_NxN@2x.png` files into `dir`.
///
/// Only sizes up to 512 get a base entry; the 2x variant of `N` is the
/// `2N` render and exists when `2N` is one of [`ICON_SIZES`].
pub fn write_iconset<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for &size in ICON_SIZES.iter().filter(|&&s| s <= 512) {
        let base = dir.join(format!("icon_{}x{}.png", size, size));
        save_png(&render_icon(size), &base)?;
        written.push(base);

        if ICON_SIZES.contains(&(size * 2)) {
            let retina = dir.join(format!("icon_{}x{}@2x.png", size, size));
            save_png(&render_icon(size * 2), &retina)?;
            written.push(retina);
        }
    }

    info!("Wrote {} icon images to {:?}", written.len(), dir);
    Ok(written)
}

/// Package an iconset directory into an `.icns` file with `iconutil`
pub fn package_icns<P: AsRef<Path>>(iconset: P) -> Result<PathBuf> {
    let iconset = iconset.as_ref();
    let mut cmd = Command::new("iconutil");
    cmd.arg("-c").arg("icns").arg(iconset);
    debug!("Running: {:?}", cmd);

    let output = cmd.output().map_err(|e| IconError::PackagingFailed {
        reason: e.to_string(),
    })?;
    if !output.status.success() {
        return Err(IconError::PackagingFailed {
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }

    Ok(iconset.with_extension("icns"))
}

fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save(path).map_err(|e| {
        IconError::SaveFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
