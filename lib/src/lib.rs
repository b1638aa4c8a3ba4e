//! glyphtone - image to glyph-art converter
//!
//! Images are resized to a character grid and every sampled pixel is mapped
//! through a palette of characters ordered from darkest to lightest. The
//! palette is either the built-in table or measured by rendering each
//! printable character with a font and summing the luminosity of the result.
//!
//! # Example
//! ```no_run
//! use glyphtone::{Asciifier, ConversionConfig};
//!
//! let asciifier = Asciifier::new();
//! let config = ConversionConfig {
//!     aspect_ratio: Some(2.0),
//!     ..Default::default()
//! };
//! let grid = asciifier.process_path("photo.jpg", &config).unwrap();
//! println!("{}", grid.to_plain_text());
//! ```

pub mod ascii;
pub mod config;
pub mod error;
pub mod filters;
pub mod glyphs;
pub mod lut;
pub mod postscript;
pub mod processor;

// Re-export main types for convenience
pub use ascii::{CharacterGrid, GlyphPlacement};
pub use config::{ConversionConfig, OutputFormat, PageConfig, PaperSize};
pub use error::{Error, Result};
pub use filters::luminosity;
pub use glyphs::{GlyphRenderError, GlyphRenderer, TrueTypeFont, build_palette};
pub use lut::Palette;
pub use postscript::PostScriptWriter;
pub use processor::{Asciifier, PixelSource};
