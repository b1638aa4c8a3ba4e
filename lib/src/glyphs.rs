//! Glyph rendering and font-measured palettes
//!
//! Each candidate character is drawn black-on-white into a square canvas
//! and scored by the summed luminosity of that canvas. Sorting by score
//! yields a palette ordered from the densest glyph to the emptiest.

use crate::error::{Error, Result};
use crate::filters::canvas_luminosity;
use crate::lut::Palette;
use fontdue::{Font, FontSettings};
use image::{Rgb, RgbImage};
use log::{debug, warn};
use rayon::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Side length of the scoring canvas in pixels
pub const CANVAS_SIZE: u32 = 64;

/// Glyph size used when scoring, three quarters of the canvas
pub const GLYPH_SIZE: f32 = (CANVAS_SIZE * 3 / 4) as f32;

/// First code point of the default candidate range
pub const FIRST_CANDIDATE: u8 = 32;
/// One past the last code point of the default candidate range
pub const END_CANDIDATE: u8 = 127;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// A single character that could not be drawn
#[derive(Debug, Error, PartialEq)]
pub enum GlyphRenderError {
    #[error("font has no glyph for {0:?}")]
    MissingGlyph(char),

    #[error("failed to rasterize {ch:?}: {reason}")]
    Rasterize { ch: char, reason: String },
}

/// Anything that can draw a character into an RGB canvas
///
/// Implementations draw in black on top of whatever the canvas holds,
/// with the glyph's origin at the top-left corner.
pub trait GlyphRenderer: Sync {
    fn render(
        &self,
        ch: char,
        size_px: f32,
        canvas: &mut RgbImage,
    ) -> std::result::Result<(), GlyphRenderError>;
}

/// Measured darkness of one candidate glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphScore {
    pub ch: char,
    /// Summed canvas luminosity; lower is darker
    pub luminosity: f64,
}

/// The printable ASCII candidates, in code point order
pub fn default_candidates() -> impl Iterator<Item = char> {
    (FIRST_CANDIDATE..END_CANDIDATE).map(char::from)
}

/// Luminosity of an untouched canvas
pub fn blank_canvas_luminosity() -> f64 {
    canvas_luminosity(&RgbImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, WHITE))
}

/// Score a single glyph
///
/// A glyph that fails to render is logged and scored as the blank canvas.
pub fn score_glyph<F: GlyphRenderer + ?Sized>(font: &F, ch: char) -> GlyphScore {
    let mut canvas = RgbImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, WHITE);

    if let Err(err) = font.render(ch, GLYPH_SIZE, &mut canvas) {
        warn!("{err}; scoring {ch:?} as blank");
        return GlyphScore {
            ch,
            luminosity: blank_canvas_luminosity(),
        };
    }

    GlyphScore {
        ch,
        luminosity: canvas_luminosity(&canvas),
    }
}

/// Score every candidate and sort darkest first
///
/// The sort is stable: glyphs with equal scores keep their candidate order.
pub fn score_glyphs<F, I>(font: &F, candidates: I) -> Vec<GlyphScore>
where
    F: GlyphRenderer + ?Sized,
    I: IntoIterator<Item = char>,
{
    let candidates: Vec<char> = candidates.into_iter().collect();

    // Collecting from an indexed parallel iterator keeps candidate order
    let mut scores: Vec<GlyphScore> = candidates
        .par_iter()
        .map(|&ch| score_glyph(font, ch))
        .collect();

    scores.sort_by(|a, b| a.luminosity.total_cmp(&b.luminosity));
    scores
}

/// Build a palette by measuring how dark each candidate renders
///
/// # Arguments
/// * `font` - Glyph renderer to measure
/// * `candidates` - Characters to rank, in tie-break order
///
/// # Returns
/// Palette ordered darkest to lightest
///
/// # Errors
/// `InvalidParameter` if `candidates` is empty or contains duplicates.
pub fn build_palette<F, I>(font: &F, candidates: I) -> Result<Palette>
where
    F: GlyphRenderer + ?Sized,
    I: IntoIterator<Item = char>,
{
    let scores = score_glyphs(font, candidates);
    if scores.is_empty() {
        return Err(Error::InvalidParameter(
            "no candidate characters to build a palette from".into(),
        ));
    }

    debug!(
        "measured palette of {} glyphs, darkest {:?}, lightest {:?}",
        scores.len(),
        scores[0].ch,
        scores[scores.len() - 1].ch
    );

    Palette::from_chars(scores.into_iter().map(|s| s.ch).collect())
}

/// A TrueType/OpenType font rasterized with fontdue
pub struct TrueTypeFont {
    font: Font,
}

impl TrueTypeFont {
    /// Parse a font from raw file contents
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| Error::FontLoad(e.to_string()))?;
        Ok(Self { font })
    }

    /// Read and parse a font file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let with_path = |reason: String| Error::FontLoad(format!("{}: {reason}", path.display()));

        let bytes = std::fs::read(path).map_err(|e| with_path(e.to_string()))?;
        let font = Self::from_bytes(bytes).map_err(|e| match e {
            Error::FontLoad(reason) => with_path(reason),
            other => other,
        })?;

        debug!("loaded font {}", path.display());
        Ok(font)
    }
}

impl GlyphRenderer for TrueTypeFont {
    fn render(
        &self,
        ch: char,
        size_px: f32,
        canvas: &mut RgbImage,
    ) -> std::result::Result<(), GlyphRenderError> {
        if self.font.lookup_glyph_index(ch) == 0 {
            // Unmapped whitespace draws nothing rather than the notdef box
            if ch.is_whitespace() {
                return Ok(());
            }
            return Err(GlyphRenderError::MissingGlyph(ch));
        }

        let ascent = self
            .font
            .horizontal_line_metrics(size_px)
            .map(|m| m.ascent)
            .ok_or_else(|| GlyphRenderError::Rasterize {
                ch,
                reason: "font has no horizontal line metrics".into(),
            })?;

        let (metrics, coverage) = self.font.rasterize(ch, size_px);
        let (width, height) = canvas.dimensions();

        // Bitmap rows run top-down; ymin is the offset of its bottom edge from the baseline
        let top = ascent.round() as i64 - (metrics.ymin as i64 + metrics.height as i64);
        let left = metrics.xmin as i64;

        for gy in 0..metrics.height {
            for gx in 0..metrics.width {
                let alpha = coverage[gy * metrics.width + gx] as u32;
                if alpha == 0 {
                    continue;
                }

                let px = left + gx as i64;
                let py = top + gy as i64;
                if px < 0 || py < 0 || px >= width as i64 || py >= height as i64 {
                    continue;
                }

                let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                for channel in pixel.0.iter_mut() {
                    *channel = (*channel as u32 * (255 - alpha) / 255) as u8;
                }
            }
        }

        Ok(())
    }
}
