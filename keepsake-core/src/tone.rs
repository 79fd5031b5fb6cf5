//! Ambient tone: one representative colour per photo, used to tint the
//! background behind the selected entry.
//!
//! The photo is shrunk to a [`WORKING_SIZE`]² buffer and averaged with weights
//! that favour mid-brightness, saturated pixels. Near-black, near-white and
//! grey pixels still count, just much less, so they cannot wash the result out.

use crate::error::{GalleryError, GalleryResult};
use image::{DynamicImage, imageops::FilterType};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Side of the square buffer photos are shrunk to before sampling.
pub const WORKING_SIZE: u32 = 40;
/// Pixels with alpha below this are ignored.
pub const MIN_ALPHA: u8 = 40;
/// Used when no base tint is configured: `#1a0b2a`.
pub const DEFAULT_BASE_TINT: Rgb = Rgb::new(26, 11, 42);
/// Share of the base tint when blending a tone for display.
pub const DEFAULT_TONE_MIX: f64 = 0.55;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rgb` or `#rrggbb`.
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };
        let int = u32::from_str_radix(&expanded, 16).ok()?;
        Some(Self::new(
            ((int >> 16) & 0xff) as u8,
            ((int >> 8) & 0xff) as u8,
            (int & 0xff) as u8,
        ))
    }

    /// Linear blend: `ratio` 0 keeps `self`, 1 gives `other`.
    pub fn mix(self, other: Rgb, ratio: f64) -> Rgb {
        let ratio = ratio.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f64 * (1.0 - ratio) + b as f64 * ratio).round() as u8;
        Rgb::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }

    /// CSS `rgba(r, g, b, a)` string.
    pub fn to_rgba(self, alpha: f64) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            alpha.clamp(0.0, 1.0)
        )
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Weighted mean colour of raw RGBA bytes, or `None` when nothing carries weight
/// (every pixel transparent, or no pixels at all).
pub fn tone_from_rgba(pixels: &[u8]) -> Option<Rgb> {
    let (mut r, mut g, mut b, mut total) = (0.0, 0.0, 0.0, 0.0);

    for px in pixels.chunks_exact(4) {
        if px[3] < MIN_ALPHA {
            continue;
        }
        let (red, green, blue) = (px[0] as f64, px[1] as f64, px[2] as f64);
        let luma = 0.2126 * red + 0.7152 * green + 0.0722 * blue;
        let chroma = red.max(green).max(blue) - red.min(green).min(blue);
        let saturation = chroma / 255.0;
        let luma_weight = 1.0 - (luma - 128.0).abs() / 128.0;
        let weight = luma_weight.max(0.1) * (0.4 + saturation);

        r += red * weight;
        g += green * weight;
        b += blue * weight;
        total += weight;
    }

    if total <= 0.0 {
        return None;
    }
    Some(Rgb::new(
        (r / total).round() as u8,
        (g / total).round() as u8,
        (b / total).round() as u8,
    ))
}

/// Shrinks `image` to the working buffer in a single resize and samples it.
pub fn extract_tone(image: &DynamicImage) -> Option<Rgb> {
    let small = image.resize_exact(WORKING_SIZE, WORKING_SIZE, FilterType::Triangle);
    tone_from_rgba(small.to_rgba8().as_raw())
}

/// Decodes the file at `path` and extracts its tone.
pub fn extract_tone_from_path(path: &Path) -> GalleryResult<Option<Rgb>> {
    let image = image::open(path).map_err(|source| GalleryError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(extract_tone(&image))
}

/// Background overlay derived from a tone: a radial gradient whose inner stops
/// carry the blended tone and whose outer stop fades into the base tint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    /// The tone after blending toward the base.
    pub toned: Rgb,
    pub base: Rgb,
}

impl Overlay {
    pub fn new(tone: Rgb, base: Rgb, mix: f64) -> Self {
        Self {
            toned: tone.mix(base, mix),
            base,
        }
    }

    /// Overlay used when there is no photo or no usable tone.
    pub fn neutral(base: Rgb, mix: f64) -> Self {
        Self::new(base, base, mix)
    }

    pub fn to_css(&self) -> String {
        format!(
            "radial-gradient(circle at 20% 20%, {} 0%, {} 45%, {} 78%)",
            self.toned.to_rgba(0.45),
            self.toned.to_rgba(0.25),
            self.base.to_rgba(0.9)
        )
    }
}

/// Session cache of extracted tones, keyed by image filename.
/// Images never change during a session, so entries are never evicted.
#[derive(Debug, Default)]
pub struct ToneCache {
    tones: HashMap<String, Rgb>,
}

impl ToneCache {
    pub fn get(&self, filename: &str) -> Option<Rgb> {
        self.tones.get(filename).copied()
    }

    pub fn insert(&mut self, filename: &str, tone: Rgb) {
        self.tones.insert(filename.to_string(), tone);
    }

    pub fn len(&self) -> usize {
        self.tones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }
}
