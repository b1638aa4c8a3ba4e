//! End-to-end tests for the conversion pipeline.
//!
//! These exercise the public API the way a front end would:
//! - Palette measurement with a custom glyph renderer
//! - Conversion of decoded images into grids
//! - Plain text and PostScript rendering

use glyphtone::glyphs::{CANVAS_SIZE, score_glyphs};
use glyphtone::{
    Asciifier, ConversionConfig, GlyphRenderError, GlyphRenderer, PageConfig, Palette,
    PostScriptWriter, build_palette,
};
use image::{DynamicImage, Rgb, RgbImage};

/// Darkens the top `n` rows of the canvas, where `n` grows with the code point
/// below 'a' and every letter from 'a' on draws the same single row
struct StepFont;

impl GlyphRenderer for StepFont {
    fn render(
        &self,
        ch: char,
        _size_px: f32,
        canvas: &mut RgbImage,
    ) -> Result<(), GlyphRenderError> {
        if ch == '~' {
            return Err(GlyphRenderError::MissingGlyph(ch));
        }
        let rows = match ch {
            ' ' => 0,
            'a'..='z' => 1,
            _ => (CANVAS_SIZE - (ch as u32 % CANVAS_SIZE)).max(2),
        };
        for y in 0..rows.min(canvas.height()) {
            for x in 0..canvas.width() {
                canvas.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
        Ok(())
    }
}

// ==================== Palette Tests ====================

#[test]
fn test_measured_palette_is_ordered() {
    let scores = score_glyphs(&StepFont, (32u8..127).map(char::from));
    assert_eq!(scores.len(), 95);
    for pair in scores.windows(2) {
        assert!(pair[0].luminosity <= pair[1].luminosity);
    }
}

#[test]
fn test_measured_palette_ties_follow_code_points() {
    let palette = build_palette(&StepFont, (32u8..127).map(char::from)).unwrap();
    let letters: Vec<char> = palette
        .chars()
        .iter()
        .copied()
        .filter(|c| c.is_ascii_lowercase())
        .collect();
    let expected: Vec<char> = ('a'..='z').collect();
    assert_eq!(letters, expected);

    // All letters tie, so they are contiguous
    let first = palette.chars().iter().position(|&c| c == 'a').unwrap();
    assert_eq!(&palette.chars()[first..first + 26], expected.as_slice());
}

#[test]
fn test_missing_glyph_does_not_abort() {
    let palette = build_palette(&StepFont, (32u8..127).map(char::from)).unwrap();
    assert_eq!(palette.len(), 95);
    // '~' failed and scores like the blank space; space comes first by code point
    let tail = &palette.chars()[93..];
    assert_eq!(tail, &[' ', '~']);
}

#[test]
fn test_asciifier_uses_measured_palette() {
    let asciifier = Asciifier::from_renderer(&StepFont).unwrap();
    let black = RgbImage::from_pixel(5, 5, Rgb([0, 0, 0]));
    let grid = asciifier
        .process(&black, &ConversionConfig::default())
        .unwrap();
    let darkest = asciifier.palette().darkest();
    assert!(grid.rows().flatten().all(|&c| c == darkest));
}

// ==================== Conversion Tests ====================

#[test]
fn test_default_palette_example() {
    let mut img = RgbImage::new(2, 1);
    img.put_pixel(0, 0, Rgb([0, 0, 0]));
    img.put_pixel(1, 0, Rgb([255, 255, 255]));
    let img = DynamicImage::ImageRgb8(img);

    let config = ConversionConfig {
        resolution: 2,
        aspect_ratio: None,
    };
    let grid = Asciifier::new().process(&img, &config).unwrap();
    assert_eq!(grid.to_plain_text(), "B");
}

#[test]
fn test_grid_dimensions_respect_resolution() {
    let asciifier = Asciifier::new();
    let img = RgbImage::from_fn(321, 123, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 0]));

    for (resolution, aspect_ratio) in [(80, None), (80, Some(2.0)), (33, Some(0.5)), (500, None)] {
        let config = ConversionConfig {
            resolution,
            aspect_ratio,
        };
        let grid = asciifier.process(&img, &config).unwrap();
        assert!(grid.width() <= resolution);
        assert!(grid.height() >= 1);
    }
}

#[test]
fn test_palette_shared_across_threads() {
    let asciifier = Asciifier::with_palette(Palette::from_chars(vec!['#', '.']).unwrap());
    let dark = RgbImage::from_pixel(10, 10, Rgb([10, 10, 10]));
    let light = RgbImage::from_pixel(10, 10, Rgb([240, 240, 240]));
    let config = ConversionConfig::default();

    std::thread::scope(|s| {
        let a = s.spawn(|| asciifier.process(&dark, &config).unwrap());
        let b = s.spawn(|| asciifier.process(&light, &config).unwrap());
        let (a, b) = (a.join().unwrap(), b.join().unwrap());
        assert!(a.rows().flatten().all(|&c| c == '#'));
        assert!(b.rows().flatten().all(|&c| c == '.'));
    });
}

// ==================== Output Tests ====================

#[test]
fn test_plain_text_and_postscript_agree() {
    let palette = Palette::from_chars(vec!['(', 'x', ' ']).unwrap();
    let asciifier = Asciifier::with_palette(palette);

    let mut img = RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
    img.put_pixel(0, 0, Rgb([0, 0, 0]));
    img.put_pixel(2, 1, Rgb([128, 128, 128]));

    let config = ConversionConfig {
        resolution: 3,
        aspect_ratio: None,
    };
    let grid = asciifier.process(&img, &config).unwrap();
    assert_eq!(grid.to_plain_text(), "(\n  x");

    let doc = PostScriptWriter::new(PageConfig::default())
        .render(&grid)
        .unwrap();
    let statements: Vec<&str> = doc.lines().filter(|l| l.ends_with(" c")).collect();
    assert_eq!(statements, vec!["(\\() 0 24 c", "(x) 24 12 c"]);
}
