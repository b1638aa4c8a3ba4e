use glyphtone::{Asciifier, ConversionConfig};
use image::{Rgb, RgbImage};

fn main() {
    println!("glyphtone - Grid Size Demo");
    println!("==========================\n");

    let test_cases = vec![
        (100, 100, "100x100 square"),
        (1920, 1080, "1920x1080 (Full HD)"),
        (40, 30, "40x30 (smaller than the grid)"),
        (80, 800, "80x800 (tall strip)"),
    ];

    let asciifier = Asciifier::new();

    for (width, height, description) in test_cases {
        println!("Testing: {}", description);

        let img = RgbImage::from_fn(width, height, |x, y| {
            let gray = ((x + y) % 256) as u8;
            Rgb([gray, gray, gray])
        });

        for aspect_ratio in [None, Some(2.0)] {
            let config = ConversionConfig {
                resolution: 80,
                aspect_ratio,
            };
            let grid = asciifier
                .process(&img, &config)
                .expect("Failed to convert image");

            match aspect_ratio {
                Some(ratio) => println!(
                    "  Stretched x{}: {}x{} characters",
                    ratio,
                    grid.width(),
                    grid.height()
                ),
                None => println!("  Unstretched: {}x{} characters", grid.width(), grid.height()),
            }
        }
        println!();
    }

    println!("Grids never exceed the requested resolution and are never upscaled.");
}
