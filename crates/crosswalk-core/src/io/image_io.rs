use std::path::Path;

use image::{DynamicImage, ImageBuffer, ImageFormat, Luma, Rgb};
use ndarray::Array2;

use crate::error::Result;
use crate::frame::{ColorFrame, Frame, Image};

/// Save a frame as 16-bit grayscale TIFF.
pub fn save_tiff(frame: &Frame, path: &Path) -> Result<()> {
    let img = ImageBuffer::<Luma<u16>, Vec<u16>>::from_fn(
        frame.width() as u32,
        frame.height() as u32,
        |x, y| Luma([to_u16(frame.data[[y as usize, x as usize]])]),
    );
    img.save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Save a frame as 8-bit grayscale PNG.
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    let img = ImageBuffer::<Luma<u8>, Vec<u8>>::from_fn(
        frame.width() as u32,
        frame.height() as u32,
        |x, y| Luma([to_u8(frame.data[[y as usize, x as usize]])]),
    );
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save frame, choosing format from file extension. Unknown extensions get
/// PNG encoding.
pub fn save_image(frame: &Frame, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("tiff" | "tif") => save_tiff(frame, path),
        _ => save_png(frame, path),
    }
}

/// Save an image as 8-bit PNG, RGB or grayscale depending on its channels.
pub fn save_image_png(image: &Image, path: &Path) -> Result<()> {
    match image {
        Image::Gray(frame) => save_png(frame, path),
        Image::Color(color) => {
            let img = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_fn(
                color.red.width() as u32,
                color.red.height() as u32,
                |x, y| {
                    let (r, c) = (y as usize, x as usize);
                    Rgb([
                        to_u8(color.red.data[[r, c]]),
                        to_u8(color.green.data[[r, c]]),
                        to_u8(color.blue.data[[r, c]]),
                    ])
                },
            );
            img.save_with_format(path, ImageFormat::Png)?;
            Ok(())
        }
    }
}

/// Load an image file, keeping color when the file has it.
pub fn load_image(path: &Path) -> Result<Image> {
    let img = image::open(path)?;
    Ok(dynamic_to_image(&img))
}

/// Load an image file as a single grayscale plane.
pub fn load_gray(path: &Path) -> Result<Frame> {
    let img = image::open(path)?;
    Ok(luma_frame(&img))
}

/// Convert a decoded image, keeping color when present.
pub fn dynamic_to_image(img: &DynamicImage) -> Image {
    if !img.color().has_color() {
        return Image::Gray(luma_frame(img));
    }

    let rgb = img.to_rgb16();
    let (w, h) = rgb.dimensions();
    let plane = |channel: usize| {
        let data = Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
            rgb.get_pixel(col as u32, row as u32).0[channel] as f32 / 65535.0
        });
        Frame::new(data, bit_depth(img))
    };

    Image::Color(ColorFrame {
        red: plane(0),
        green: plane(1),
        blue: plane(2),
    })
}

fn luma_frame(img: &DynamicImage) -> Frame {
    let gray = img.to_luma16();
    let (w, h) = gray.dimensions();
    let data = Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
        gray.get_pixel(col as u32, row as u32).0[0] as f32 / 65535.0
    });
    Frame::new(data, bit_depth(img))
}

fn bit_depth(img: &DynamicImage) -> u8 {
    let color = img.color();
    (color.bits_per_pixel() / color.channel_count() as u16) as u8
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn to_u16(v: f32) -> u16 {
    (v.clamp(0.0, 1.0) * 65535.0).round() as u16
}
