use crate::filters::luminosity;
use crate::lut::Palette;
use image::RgbImage;
use rayon::prelude::*;

/// A rectangular grid of characters, one per sampled pixel
///
/// Cells are addressed by `(column, row)` with the origin at the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterGrid {
    width: u32,
    height: u32,
    /// Row-major
    cells: Vec<char>,
}

/// A single non-blank character positioned on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphPlacement {
    pub ch: char,
    pub column: u32,
    pub row: u32,
}

impl CharacterGrid {
    /// Create a grid from row-major cells
    ///
    /// # Panics
    /// If `cells.len() != width * height`.
    pub fn from_cells(width: u32, height: u32, cells: Vec<char>) -> Self {
        assert_eq!(
            cells.len(),
            (width * height) as usize,
            "cell count must match grid dimensions"
        );
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Character at `(column, row)`, or `None` outside the grid
    pub fn get(&self, column: u32, row: u32) -> Option<char> {
        if column >= self.width || row >= self.height {
            return None;
        }
        Some(self.cells[(row * self.width + column) as usize])
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Every non-blank cell, row by row
    pub fn placements(&self) -> impl Iterator<Item = GlyphPlacement> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, ch)| **ch != ' ')
            .map(move |(idx, &ch)| GlyphPlacement {
                ch,
                column: idx as u32 % width,
                row: idx as u32 / width,
            })
    }

    /// Render as plain text
    ///
    /// Each row is right-trimmed; rows are joined with `\n` and the last
    /// row carries no newline. Blank rows are kept.
    pub fn to_plain_text(&self) -> String {
        self.rows()
            .map(|row| {
                let line: String = row.iter().collect();
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Quantize every pixel of an image into a palette character
///
/// # Arguments
/// * `img` - Image already resized to grid dimensions
/// * `palette` - Palette ordered darkest to lightest
///
/// # Returns
/// A grid with the same dimensions as `img`
pub fn quantize_image(img: &RgbImage, palette: &Palette) -> CharacterGrid {
    let (width, height) = img.dimensions();

    // Parallelize across rows; collection keeps row order
    let cells: Vec<char> = (0..height)
        .into_par_iter()
        .flat_map_iter(|y| {
            (0..width).map(move |x| palette.char_for(luminosity(img.get_pixel(x, y).0)))
        })
        .collect();

    CharacterGrid::from_cells(width, height, cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn grid(rows: &[&str]) -> CharacterGrid {
        let width = rows[0].chars().count() as u32;
        let cells: Vec<char> = rows.iter().flat_map(|r| r.chars()).collect();
        CharacterGrid::from_cells(width, rows.len() as u32, cells)
    }

    #[test]
    fn test_get_and_bounds() {
        let g = grid(&["ab", "cd", "ef"]);
        assert_eq!(g.dimensions(), (2, 3));
        assert_eq!(g.get(0, 0), Some('a'));
        assert_eq!(g.get(1, 2), Some('f'));
        assert_eq!(g.get(2, 0), None);
        assert_eq!(g.get(0, 3), None);
    }

    #[test]
    fn test_plain_text_trims_trailing_spaces() {
        let g = grid(&["B ", "  ", " x"]);
        assert_eq!(g.to_plain_text(), "B\n\n x");
    }

    #[test]
    fn test_placements_skip_blanks() {
        let g = grid(&["a ", " ("]);
        let placements: Vec<_> = g.placements().collect();
        assert_eq!(
            placements,
            vec![
                GlyphPlacement {
                    ch: 'a',
                    column: 0,
                    row: 0
                },
                GlyphPlacement {
                    ch: '(',
                    column: 1,
                    row: 1
                },
            ]
        );
    }

    #[test]
    fn test_quantize_black_and_white() {
        let palette = Palette::default();
        let mut img = RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
        img.put_pixel(0, 0, Rgb([0, 0, 0]));

        let g = quantize_image(&img, &palette);
        assert_eq!(g.dimensions(), (3, 2));
        assert_eq!(g.get(0, 0), Some('B'));
        assert_eq!(g.get(1, 0), Some(' '));
        assert_eq!(g.get(2, 1), Some(' '));
    }

    #[test]
    fn test_quantize_gradient_is_monotonic() {
        let palette = Palette::default();
        let img = RgbImage::from_fn(256, 1, |x, _| Rgb([x as u8, x as u8, x as u8]));
        let g = quantize_image(&img, &palette);

        let mut previous = 0;
        for x in 0..256 {
            let ch = g.get(x, 0).unwrap();
            let idx = palette.chars().iter().position(|c| *c == ch).unwrap();
            assert!(idx >= previous);
            previous = idx;
        }
        assert_eq!(previous, palette.len() - 1);
    }
}
