/// Basic example: Convert a simple test image to ASCII art
///
/// This creates a test image with a gradient and a circle, prints it as
/// text and writes a PostScript page next to it
use glyphtone::{Asciifier, ConversionConfig, PageConfig, PostScriptWriter};
use image::{Rgb, RgbImage};

fn main() {
    println!("glyphtone - Basic Example");
    println!("=========================\n");

    let width = 320;
    let height = 160;

    // Horizontal gradient from black to white
    let mut img = RgbImage::from_fn(width, height, |x, _| {
        let v = (x * 255 / (width - 1)) as u8;
        Rgb([v, v, v])
    });

    // Dark circle in the middle
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 50.0;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            if (dx * dx + dy * dy).sqrt() < radius {
                img.put_pixel(x, y, Rgb([20, 20, 60]));
            }
        }
    }

    println!("Created test image: {}x{}", width, height);

    let asciifier = Asciifier::new();
    let config = ConversionConfig {
        resolution: 72,
        aspect_ratio: Some(2.0),
    };

    let grid = asciifier
        .process(&img, &config)
        .expect("Failed to convert image");
    println!("Grid: {}x{} characters\n", grid.width(), grid.height());
    println!("{}\n", grid.to_plain_text());

    // Printed output uses a square pitch, so skip the stretch
    let print_grid = asciifier
        .process(
            &img,
            &ConversionConfig {
                resolution: 72,
                aspect_ratio: None,
            },
        )
        .expect("Failed to convert image");
    let doc = PostScriptWriter::new(PageConfig::default())
        .render(&print_grid)
        .expect("Failed to render PostScript");
    std::fs::write("basic_output.ps", doc).expect("Failed to save output");

    println!("✓ Saved PostScript to: basic_output.ps");
}
