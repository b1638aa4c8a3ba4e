//! PostScript page output
//!
//! Every non-blank grid cell becomes one `(c) x y c` statement. The grid is
//! laid out on a fixed 12pt pitch and then scaled uniformly so its width
//! fills the printable area of the page, centred between the margins.

use crate::ascii::CharacterGrid;
use crate::config::{PageConfig, mm_to_pt};
use crate::error::{Error, Result};
use chrono::{Local, NaiveDateTime};
use log::debug;

/// Distance between neighbouring cells, in unscaled units
pub const CELL_PITCH: u32 = 12;

/// Font size passed to `scalefont`
pub const FONT_SIZE: u32 = 12;

/// Escape the characters PostScript treats specially inside a string literal
pub fn escape_char(ch: char) -> String {
    match ch {
        '\\' | '(' | ')' => format!("\\{ch}"),
        _ => ch.to_string(),
    }
}

/// Renders a character grid as a single-page PostScript document
pub struct PostScriptWriter {
    page: PageConfig,
    created: Option<NaiveDateTime>,
}

impl PostScriptWriter {
    pub fn new(page: PageConfig) -> Self {
        Self {
            page,
            created: None,
        }
    }

    /// Fix the `%%CreationDate` instead of using the current local time
    pub fn with_creation_date(mut self, created: NaiveDateTime) -> Self {
        self.created = Some(created);
        self
    }

    pub fn page(&self) -> &PageConfig {
        &self.page
    }

    /// Produce the document text
    ///
    /// # Errors
    /// `InvalidParameter` if the page configuration is invalid or the grid
    /// has no cells.
    pub fn render(&self, grid: &CharacterGrid) -> Result<String> {
        self.page.validate()?;

        let (columns, rows) = grid.dimensions();
        if columns == 0 || rows == 0 {
            return Err(Error::InvalidParameter(format!(
                "cannot lay out an empty {columns}x{rows} grid"
            )));
        }

        let (paper_w_pt, paper_h_pt) = self.page.paper.dimensions_pt();
        let (margin_x_pt, margin_y_pt) = (
            mm_to_pt(self.page.margins_mm.0),
            mm_to_pt(self.page.margins_mm.1),
        );
        let printable_w = (paper_w_pt - 2.0 * margin_x_pt).ceil();
        let printable_h = (paper_h_pt - 2.0 * margin_y_pt).ceil();

        let w = (columns * CELL_PITCH) as f64;
        let h = (rows * CELL_PITCH) as f64;
        let scale = printable_w / w;
        let offset_x = margin_x_pt + (printable_w - w * scale) / 2.0;
        let offset_y = margin_y_pt + (printable_h - h * scale) / 2.0;

        debug!(
            "laying out {columns}x{rows} grid on {} paper at scale {scale:.4}",
            self.page.paper
        );

        let (paper_w, paper_h) = (paper_w_pt.round() as i64, paper_h_pt.round() as i64);
        let created = self.created.unwrap_or_else(|| Local::now().naive_local());

        let mut lines = vec![
            "%!PS-Adobe-3.0".to_string(),
            format!("%%BoundingBox: 0 0 {} {}", w as i64, h as i64),
            "%%Creator: glyphtone".to_string(),
            format!("%%CreationDate: {}", created.format("%Y-%m-%dT%H:%M:%S%.6f")),
            format!(
                "%%DocumentMedia: {} {paper_w} {paper_h} 80 white ()",
                self.page.paper
            ),
            "%%Pages: 1".to_string(),
            "%%EndComments".to_string(),
            "%%BeginSetup".to_string(),
            format!("  << /PageSize [{paper_w} {paper_h}] /Orientation 0 >> setpagedevice"),
            "%%EndSetup".to_string(),
            String::new(),
            format!("/{} findfont", self.page.font_name),
            format!("{FONT_SIZE} scalefont"),
            "setfont".to_string(),
            String::new(),
            "/c { moveto show } def".to_string(),
            String::new(),
            format!("{} {} translate", offset_x as i64, offset_y as i64),
            format!("{scale:.6} {scale:.6} scale"),
        ];

        lines.extend(grid.placements().map(|placement| {
            format!(
                "({}) {} {} c",
                escape_char(placement.ch),
                placement.column * CELL_PITCH,
                (rows - placement.row) * CELL_PITCH
            )
        }));

        lines.push(String::new());
        lines.push("showpage".to_string());
        Ok(lines.join("\n"))
    }
}
