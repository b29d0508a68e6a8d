//! PPM (P3) image output.
//!
//! Converts the linear f32 framebuffer to the plain-text pixel-map format:
//! a three-line header followed by one `r g b` line per pixel in row-major
//! order. Channels get gamma-2 correction and are quantized to [0, 255].

use std::fs::File;
use std::io::{self, BufWriter, Write};

use image::{ImageBuffer, Rgb};
use log::info;

use crate::interval::Interval;

/// Displayable channel range; 0.999 keeps the byte value below 256.
const INTENSITY: Interval = Interval { min: 0.0, max: 0.999 };

/// Gamma-2 transform: sqrt of the non-negative channel, negatives to black.
fn linear_to_gamma(linear_component: f32) -> f32 {
    if linear_component > 0.0 {
        linear_component.sqrt()
    } else {
        0.0
    }
}

/// Write one linear RGB pixel as a `r g b` text line.
///
/// Sampling noise can push channels slightly above 1; the intensity clamp
/// absorbs that before quantization.
pub fn write_color<W: Write>(out: &mut W, pixel: &Rgb<f32>) -> io::Result<()> {
    let r = linear_to_gamma(pixel[0]);
    let g = linear_to_gamma(pixel[1]);
    let b = linear_to_gamma(pixel[2]);

    let rbyte = (256.0 * INTENSITY.clamp(r)) as u8;
    let gbyte = (256.0 * INTENSITY.clamp(g)) as u8;
    let bbyte = (256.0 * INTENSITY.clamp(b)) as u8;

    writeln!(out, "{rbyte} {gbyte} {bbyte}")
}

/// Write a full image as PPM P3: header, then pixels top-to-bottom,
/// left-to-right.
pub fn write_ppm<W: Write>(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width(), image.height())?;
    writeln!(out, "255")?;

    // ImageBuffer iterates pixels in row-major order already
    for pixel in image.pixels() {
        write_color(out, pixel)?;
    }

    Ok(())
}

/// Save the image as a PPM file, or stream it to stdout when `path` is "-".
pub fn save_image_as_ppm(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    path: &str,
) -> io::Result<()> {
    if path == "-" {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        write_ppm(image, &mut out)?;
        out.flush()?;
    } else {
        let mut out = BufWriter::new(File::create(path)?);
        write_ppm(image, &mut out)?;
        out.flush()?;
        info!("Image saved as {path}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_pixel(r: f32, g: f32, b: f32) -> String {
        let mut buf = Vec::new();
        write_color(&mut buf, &Rgb([r, g, b])).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn gamma_two_square_roots_the_channel() {
        // sqrt(0.25) = 0.5 -> 256 * 0.5 = 128
        assert_eq!(one_pixel(0.25, 0.25, 0.25), "128 128 128\n");
    }

    #[test]
    fn channels_clamp_to_byte_range() {
        // Overexposed channels cap at 255, negatives floor at 0
        assert_eq!(one_pixel(2.0, 1.0, -0.5), "255 255 0\n");
        assert_eq!(one_pixel(0.0, 0.0, 0.0), "0 0 0\n");
    }

    #[test]
    fn ppm_header_and_row_major_body() {
        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(2, 2);
        image.put_pixel(0, 0, Rgb([1.0, 0.0, 0.0]));
        image.put_pixel(1, 0, Rgb([0.0, 1.0, 0.0]));
        image.put_pixel(0, 1, Rgb([0.0, 0.0, 1.0]));
        image.put_pixel(1, 1, Rgb([0.0, 0.0, 0.0]));

        let mut buf = Vec::new();
        write_ppm(&image, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "P3");
        assert_eq!(lines[1], "2 2");
        assert_eq!(lines[2], "255");
        // Top row first, left to right
        assert_eq!(lines[3], "255 0 0");
        assert_eq!(lines[4], "0 255 0");
        assert_eq!(lines[5], "0 0 255");
        assert_eq!(lines[6], "0 0 0");
        assert_eq!(lines.len(), 7);
    }
}
