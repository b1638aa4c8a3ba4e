//! Command-line arguments.

use clap::Parser;
use glyphtone::config::{DEFAULT_RESOLUTION, OutputFormat, PaperSize};
use std::path::PathBuf;

/// Convert images to ASCII art, as plain text or a printable PostScript page
#[derive(Parser, Debug)]
#[command(name = "glyphtone")]
#[command(version, about = "Convert images to ASCII art", long_about = None)]
pub struct Args {
    /// Image file to convert
    #[arg(long)]
    pub image: PathBuf,

    /// Output file (default: stdout); a `.ps` extension selects PostScript
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Output type: text or postscript
    #[arg(long = "type", value_name = "TYPE")]
    pub output_type: Option<OutputFormat>,

    /// Horizontal stretch compensating for tall character cells (text default: 2.0)
    #[arg(long)]
    pub aspect: Option<f32>,

    /// TrueType/OpenType font to measure the character palette from
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Paper size for PostScript output
    #[arg(long, default_value = "a4")]
    pub paper: PaperSize,

    /// Number of characters per line
    #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
    pub resolution: u32,

    /// PostScript font used to print the characters
    #[arg(long, default_value = "Hack-Bold")]
    pub ps_font: String,
}

impl Args {
    /// `--type` wins; otherwise a `.ps` output file selects PostScript
    pub fn output_format(&self) -> OutputFormat {
        if let Some(format) = self.output_type {
            return format;
        }

        let is_ps = self
            .out
            .as_ref()
            .and_then(|p| p.extension())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ps"));

        if is_ps {
            OutputFormat::PostScript
        } else {
            OutputFormat::Text
        }
    }
}
