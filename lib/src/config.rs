use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Points per millimetre
pub const PT_PER_MM: f64 = 2.834645669;

/// Default number of character columns
pub const DEFAULT_RESOLUTION: u32 = 80;

/// Default horizontal stretch for terminal output (cells are ~2x taller than wide)
pub const DEFAULT_ASPECT_RATIO: f32 = 2.0;

/// Convert millimetres to PostScript points
pub fn mm_to_pt(mm: f64) -> f64 {
    PT_PER_MM * mm
}

/// Configuration for a single image conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Maximum number of character columns, default 80
    pub resolution: u32,
    /// Horizontal pre-stretch; `None` leaves the image as is
    pub aspect_ratio: Option<f32>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            aspect_ratio: None,
        }
    }
}

impl ConversionConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.resolution == 0 {
            return Err(Error::InvalidParameter(
                "resolution must be at least 1".into(),
            ));
        }
        match self.aspect_ratio {
            Some(ratio) if !ratio.is_finite() || ratio <= 0.0 => Err(Error::InvalidParameter(
                format!("aspect ratio must be a positive number, got {ratio}"),
            )),
            _ => Ok(()),
        }
    }
}

/// Named paper sizes for page output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaperSize {
    A6,
    A5,
    #[default]
    A4,
    A3,
    A2,
    A1,
    A0,
    Letter,
}

impl PaperSize {
    pub const ALL: [PaperSize; 8] = [
        PaperSize::A6,
        PaperSize::A5,
        PaperSize::A4,
        PaperSize::A3,
        PaperSize::A2,
        PaperSize::A1,
        PaperSize::A0,
        PaperSize::Letter,
    ];

    /// Width and height in millimetres, portrait
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            PaperSize::A6 => (105.0, 148.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A2 => (420.0, 594.0),
            PaperSize::A1 => (594.0, 841.0),
            PaperSize::A0 => (841.0, 1189.0),
            PaperSize::Letter => (215.9, 279.4),
        }
    }

    /// Width and height in points
    pub fn dimensions_pt(&self) -> (f64, f64) {
        let (w, h) = self.dimensions_mm();
        (mm_to_pt(w), mm_to_pt(h))
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaperSize::A6 => "a6",
            PaperSize::A5 => "a5",
            PaperSize::A4 => "a4",
            PaperSize::A3 => "a3",
            PaperSize::A2 => "a2",
            PaperSize::A1 => "a1",
            PaperSize::A0 => "a0",
            PaperSize::Letter => "letter",
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaperSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        PaperSize::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| Error::InvalidParameter(format!("unknown paper size '{s}'")))
    }
}

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    PostScript,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "postscript" | "ps" => Ok(OutputFormat::PostScript),
            _ => Err(Error::InvalidParameter(format!(
                "unknown output format '{s}'"
            ))),
        }
    }
}

/// Page layout for PostScript output
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub paper: PaperSize,
    /// PostScript font used to show the glyphs
    pub font_name: String,
    /// Horizontal and vertical margins in millimetres
    pub margins_mm: (f64, f64),
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            font_name: "Hack-Bold".to_string(),
            margins_mm: (10.0, 10.0),
        }
    }
}

impl PageConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.font_name.trim().is_empty() {
            return Err(Error::InvalidParameter("font name must not be empty".into()));
        }
        if self.font_name.chars().any(|c| c.is_whitespace() || "()<>[]{}/%".contains(c)) {
            return Err(Error::InvalidParameter(format!(
                "font name '{}' is not a valid PostScript name",
                self.font_name
            )));
        }

        let (mx, my) = self.margins_mm;
        let (w, h) = self.paper.dimensions_mm();
        if !(0.0..w / 2.0).contains(&mx) || !(0.0..h / 2.0).contains(&my) {
            return Err(Error::InvalidParameter(format!(
                "margins {mx}x{my} mm do not fit on {} paper",
                self.paper
            )));
        }
        Ok(())
    }
}
