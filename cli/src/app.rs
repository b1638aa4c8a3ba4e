use crate::args::Args;
use anyhow::{Context, Result};
use glyphtone::config::{DEFAULT_ASPECT_RATIO, OutputFormat};
use glyphtone::{Asciifier, ConversionConfig, PageConfig, PostScriptWriter};
use log::info;
use std::time::Instant;

/// Build the asciifier, falling back to the built-in palette without a font
fn load_asciifier(args: &Args) -> Result<Asciifier> {
    match &args.font {
        Some(path) => {
            let start = Instant::now();
            let asciifier = Asciifier::from_font_file(path)
                .with_context(|| format!("cannot build palette from {}", path.display()))?;
            info!(
                "measured palette from {} in {:.1} ms",
                path.display(),
                start.elapsed().as_secs_f64() * 1000.0
            );
            Ok(asciifier)
        }
        None => Ok(Asciifier::new()),
    }
}

/// Conversion settings for the chosen output
///
/// Text output is stretched by default to make up for tall terminal cells;
/// printed glyphs sit on a square pitch, so PostScript is only stretched on request.
fn conversion_config(args: &Args, format: OutputFormat) -> ConversionConfig {
    let aspect_ratio = match format {
        OutputFormat::Text => Some(args.aspect.unwrap_or(DEFAULT_ASPECT_RATIO)),
        OutputFormat::PostScript => args.aspect,
    };

    ConversionConfig {
        resolution: args.resolution,
        aspect_ratio,
    }
}

/// Run one conversion and return the rendered document
pub fn run(args: &Args) -> Result<String> {
    let format = args.output_format();
    let config = conversion_config(args, format);
    config.validate()?;

    let page = PageConfig {
        paper: args.paper,
        font_name: args.ps_font.clone(),
        ..Default::default()
    };
    if format == OutputFormat::PostScript {
        page.validate()?;
    }

    let asciifier = load_asciifier(args)?;

    let start = Instant::now();
    let grid = asciifier
        .process_path(&args.image, &config)
        .with_context(|| format!("cannot convert {}", args.image.display()))?;
    info!(
        "converted {} to {}x{} characters in {:.1} ms",
        args.image.display(),
        grid.width(),
        grid.height(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let output = match format {
        OutputFormat::Text => grid.to_plain_text(),
        OutputFormat::PostScript => PostScriptWriter::new(page).render(&grid)?,
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use image::{Rgb, RgbImage};
    use std::path::Path;
    use tempfile::TempDir;

    fn write_image(dir: &Path) -> std::path::PathBuf {
        let mut img = RgbImage::from_pixel(2, 1, Rgb([255, 255, 255]));
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        let path = dir.join("pair.png");
        img.save(&path).unwrap();
        path
    }

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("glyphtone").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_text_output() {
        let dir = TempDir::new().unwrap();
        let image = write_image(dir.path());
        let image = image.to_str().unwrap();

        let args = parse(&["--image", image, "--resolution", "2", "--aspect", "1.0"]);
        assert_eq!(run(&args).unwrap(), "B");
    }

    #[test]
    fn test_text_is_stretched_by_default() {
        let args = parse(&["--image", "in.png"]);
        let config = conversion_config(&args, OutputFormat::Text);
        assert_eq!(config.aspect_ratio, Some(DEFAULT_ASPECT_RATIO));

        let config = conversion_config(&args, OutputFormat::PostScript);
        assert_eq!(config.aspect_ratio, None);
    }

    #[test]
    fn test_postscript_output() {
        let dir = TempDir::new().unwrap();
        let image = write_image(dir.path());
        let image = image.to_str().unwrap();

        let args = parse(&["--image", image, "--type", "postscript", "--paper", "a5"]);
        let doc = run(&args).unwrap();
        assert!(doc.starts_with("%!PS-Adobe-3.0\n"));
        assert!(doc.contains("%%DocumentMedia: a5 "));
        assert!(doc.lines().any(|l| l == "(B) 0 12 c"));
        assert!(doc.ends_with("showpage"));
    }

    #[test]
    fn test_missing_image_fails() {
        let args = parse(&["--image", "/nonexistent/in.png"]);
        assert!(run(&args).is_err());
    }

    #[test]
    fn test_missing_font_fails() {
        let dir = TempDir::new().unwrap();
        let image = write_image(dir.path());
        let image = image.to_str().unwrap();

        let args = parse(&["--image", image, "--font", "/nonexistent/font.ttf"]);
        let err = run(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<glyphtone::Error>(),
            Some(glyphtone::Error::FontLoad(_))
        ));
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let args = parse(&["--image", "in.png", "--resolution", "0"]);
        let err = run(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<glyphtone::Error>(),
            Some(glyphtone::Error::InvalidParameter(_))
        ));
    }
}
