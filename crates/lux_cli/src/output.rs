//! Image file writers.
//!
//! The frame holds linear-light color; both writers apply the square-root
//! gamma mapping at the byte boundary.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use image::RgbImage;
use log::info;
use lux_render::{Color, Frame};

/// Apply gamma correction (gamma = 2.0).
#[inline]
fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear-light color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let channel = |c: f64| (256.0 * linear_to_gamma(c)).round().clamp(0.0, 255.0) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Write the frame as a binary PPM (P6) image.
pub fn write_ppm<W: Write>(frame: &Frame, out: &mut W) -> io::Result<()> {
    write!(out, "P6 {} {} 255 ", frame.width, frame.height)?;
    for color in &frame.pixels {
        out.write_all(&color_to_rgb8(*color))?;
    }
    Ok(())
}

/// Save the frame as a PPM file.
pub fn save_ppm(frame: &Frame, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_ppm(frame, &mut out)?;
    out.flush()?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Save the frame as a PNG file.
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    let mut img = RgbImage::new(frame.width, frame.height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = image::Rgb(color_to_rgb8(frame.get(x, y)));
    }
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}
