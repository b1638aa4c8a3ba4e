use image::{RgbImage, imageops};

/// Red channel weight (BT.709)
pub const RED_WEIGHT: f64 = 0.2126;
/// Green channel weight (BT.709)
pub const GREEN_WEIGHT: f64 = 0.7152;
/// Blue channel weight (BT.709)
pub const BLUE_WEIGHT: f64 = 0.0722;

/// Calculate the perceptual luminosity of a single RGB pixel
///
/// Formula: L = 0.2126*R + 0.7152*G + 0.0722*B
///
/// The weights are part of the palette contract: changing them reorders
/// every font-measured palette.
///
/// # Arguments
/// * `pixel` - RGB channel values
///
/// # Returns
/// Luminosity in the range [0.0, 255.0]
#[inline]
pub fn luminosity(pixel: [u8; 3]) -> f64 {
    let [r, g, b] = pixel;
    RED_WEIGHT * r as f64 + GREEN_WEIGHT * g as f64 + BLUE_WEIGHT * b as f64
}

/// Sum the luminosity of every pixel in a canvas
///
/// Used to score rendered glyphs: darker glyphs cover more of the white
/// canvas and produce a lower sum.
pub fn canvas_luminosity(canvas: &RgbImage) -> f64 {
    canvas.pixels().map(|p| luminosity(p.0)).sum()
}

/// Stretch an image horizontally by `ratio`, keeping its height
///
/// Compensates for character cells being taller than they are wide.
/// Uses bilinear (triangle) filtering.
///
/// A stretch that would grow the image beyond both its own width and
/// `max_width` goes straight to the thumbnail size of the stretched image
/// instead, so the intermediate buffer never exceeds what is sampled.
///
/// # Arguments
/// * `img` - Input RGB image
/// * `ratio` - Horizontal scale factor, must be positive
/// * `max_width` - Widest result the caller will keep
///
/// # Returns
/// Image of width `max(1, floor(width * ratio))` and the original height,
/// or that shape reduced by [`thumbnail_dimensions`] when capped
pub fn stretch_horizontal(img: &RgbImage, ratio: f32, max_width: u32) -> RgbImage {
    let (width, height) = img.dimensions();
    let stretched_width = stretched_width(width, ratio);

    let (target_width, target_height) = if stretched_width > width.max(max_width) {
        thumbnail_dimensions(stretched_width, height, max_width)
    } else {
        (stretched_width, height)
    };

    if (target_width, target_height) == (width, height) {
        return img.clone();
    }

    imageops::resize(
        img,
        target_width,
        target_height,
        imageops::FilterType::Triangle,
    )
}

/// Width after stretching by `ratio`: `max(1, floor(width * ratio))`
///
/// Saturates at `u32::MAX` for huge ratios.
pub fn stretched_width(width: u32, ratio: f32) -> u32 {
    ((width as f64 * ratio as f64).floor() as u32).max(1)
}

/// Compute the dimensions of a thumbnail no wider than `max_width`
///
/// Never upsizes. Height follows the aspect ratio, rounded, at least 1.
pub fn thumbnail_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }

    let scaled = (height as f64 * max_width as f64 / width as f64).round() as u32;
    (max_width, scaled.max(1))
}

/// Downsize an image so its width does not exceed `max_width`
///
/// Uses Lanczos3 filtering for an antialiased result. Images that already
/// fit are returned unchanged.
pub fn thumbnail(img: &RgbImage, max_width: u32) -> RgbImage {
    let (width, height) = img.dimensions();
    let (target_width, target_height) = thumbnail_dimensions(width, height, max_width);

    if (target_width, target_height) == (width, height) {
        return img.clone();
    }

    imageops::resize(
        img,
        target_width,
        target_height,
        imageops::FilterType::Lanczos3,
    )
}
