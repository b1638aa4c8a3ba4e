use crate::ascii::{CharacterGrid, quantize_image};
use crate::config::ConversionConfig;
use crate::error::{Error, Result};
use crate::filters::{stretch_horizontal, thumbnail};
use crate::glyphs::{GlyphRenderer, TrueTypeFont, build_palette, default_candidates};
use crate::lut::Palette;
use image::{DynamicImage, GenericImageView, Rgb, RgbImage, RgbaImage};
use log::debug;
use std::path::Path;

/// Read access to a decoded image
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// RGB value at `(x, y)`; alpha, if any, is ignored
    fn rgb(&self, x: u32, y: u32) -> [u8; 3];
}

impl PixelSource for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        self.get_pixel(x, y).0
    }
}

impl PixelSource for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let [r, g, b, _] = self.get_pixel(x, y).0;
        [r, g, b]
    }
}

impl PixelSource for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let [r, g, b, _] = self.get_pixel(x, y).0;
        [r, g, b]
    }
}

/// Copy any pixel source into an owned RGB buffer
fn to_rgb_image<S: PixelSource + ?Sized>(source: &S) -> RgbImage {
    RgbImage::from_fn(source.width(), source.height(), |x, y| Rgb(source.rgb(x, y)))
}

/// Converts images into character grids using a fixed palette
///
/// The palette is built once, either from a font or from the built-in
/// table, and shared read-only by every conversion.
#[derive(Debug, Clone, Default)]
pub struct Asciifier {
    palette: Palette,
}

impl Asciifier {
    /// Use the built-in palette
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit palette
    pub fn with_palette(palette: Palette) -> Self {
        Self { palette }
    }

    /// Measure a palette from any glyph renderer over printable ASCII
    pub fn from_renderer<F: GlyphRenderer + ?Sized>(font: &F) -> Result<Self> {
        Ok(Self::with_palette(build_palette(font, default_candidates())?))
    }

    /// Measure a palette from a TrueType/OpenType font file
    ///
    /// # Errors
    /// `FontLoad` if the file cannot be read or parsed.
    pub fn from_font_file(path: impl AsRef<Path>) -> Result<Self> {
        let font = TrueTypeFont::open(path)?;
        Self::from_renderer(&font)
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Converts an image into a character grid
    ///
    /// Pipeline:
    /// 1. Validate the configuration
    /// 2. Optionally stretch horizontally by the aspect ratio (bilinear),
    ///    never wider than needed for `resolution` columns
    /// 3. Shrink to at most `resolution` columns (Lanczos3, never upsizes)
    /// 4. Map each pixel's luminosity to a palette character
    ///
    /// # Errors
    /// `InvalidParameter` for a bad configuration, `ImageDecode` for an
    /// image without pixels. No grid is produced on error.
    pub fn process<S: PixelSource + ?Sized>(
        &self,
        image: &S,
        config: &ConversionConfig,
    ) -> Result<CharacterGrid> {
        config.validate()?;

        if image.width() == 0 || image.height() == 0 {
            return Err(Error::ImageDecode(format!(
                "image has no pixels ({}x{})",
                image.width(),
                image.height()
            )));
        }

        let mut working = to_rgb_image(image);

        if let Some(ratio) = config.aspect_ratio {
            working = stretch_horizontal(&working, ratio, config.resolution);
            debug!(
                "stretched {}x{} by {ratio} to {}x{}",
                image.width(),
                image.height(),
                working.width(),
                working.height()
            );
        }

        let working = thumbnail(&working, config.resolution);
        debug!(
            "sampling {}x{} grid with {}-character palette",
            working.width(),
            working.height(),
            self.palette.len()
        );

        Ok(quantize_image(&working, &self.palette))
    }

    /// Decode an image file and convert it
    ///
    /// # Errors
    /// `ImageDecode` if the file cannot be opened or decoded, plus
    /// everything [`Asciifier::process`] reports.
    pub fn process_path(
        &self,
        path: impl AsRef<Path>,
        config: &ConversionConfig,
    ) -> Result<CharacterGrid> {
        config.validate()?;
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| Error::ImageDecode(format!("{}: {e}", path.display())))?;
        self.process(&image, config)
    }
}
