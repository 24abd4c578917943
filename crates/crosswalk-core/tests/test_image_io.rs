use image::{DynamicImage, ImageBuffer, Luma};
use ndarray::Array2;

use crosswalk_core::frame::{ColorFrame, Frame, Image};
use crosswalk_core::io::image_io::{
    dynamic_to_image, load_gray, load_image, save_image, save_image_png, save_png, save_tiff,
};

#[test]
fn test_save_load_roundtrip_tiff() {
    let mut data = Array2::<f32>::zeros((4, 4));
    data[[0, 1]] = 0.5;
    data[[1, 0]] = 1.0;
    data[[2, 3]] = 0.25;
    let frame = Frame::new(data, 16);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.tiff");

    save_tiff(&frame, &path).unwrap();
    let loaded = load_gray(&path).unwrap();

    assert_eq!((loaded.width(), loaded.height()), (4, 4));
    assert_eq!(loaded.original_bit_depth, 16);
    assert!((loaded.data[[0, 0]] - 0.0).abs() < 1e-4);
    assert!((loaded.data[[0, 1]] - 0.5).abs() < 1e-3);
    assert!((loaded.data[[1, 0]] - 1.0).abs() < 1e-4);
    assert!((loaded.data[[2, 3]] - 0.25).abs() < 1e-3);
}

#[test]
fn test_save_png_quantizes_to_8_bit() {
    let data = Array2::from_shape_fn((6, 5), |(r, c)| (r * 5 + c) as f32 / 29.0);
    let frame = Frame::new(data.clone(), 8);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gray.png");
    save_png(&frame, &path).unwrap();

    let loaded = load_gray(&path).unwrap();
    assert_eq!(loaded.original_bit_depth, 8);
    for (a, b) in data.iter().zip(loaded.data.iter()) {
        assert!((a - b).abs() <= 0.5 / 255.0 + 1e-6);
    }
}

#[test]
fn test_save_image_picks_format_from_extension() {
    let frame = Frame::new(Array2::from_elem((3, 3), 0.5), 16);
    let dir = tempfile::tempdir().unwrap();

    let tif = dir.path().join("out.tif");
    save_image(&frame, &tif).unwrap();
    assert_eq!(load_gray(&tif).unwrap().original_bit_depth, 16);

    let png = dir.path().join("out.png");
    save_image(&frame, &png).unwrap();
    assert_eq!(load_gray(&png).unwrap().original_bit_depth, 8);
}

#[test]
fn test_color_png_loads_as_color() {
    let plane = |v: f32| Frame::new(Array2::from_elem((4, 7), v), 8);
    let image = Image::Color(ColorFrame {
        red: plane(1.0),
        green: plane(0.5),
        blue: plane(0.0),
    });

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("color.png");
    save_image_png(&image, &path).unwrap();

    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded.channels(), 3);
    assert_eq!((loaded.rows(), loaded.columns()), (4, 7));
    let Image::Color(color) = loaded else {
        panic!("expected a color image");
    };
    assert!((color.red.data[[0, 0]] - 1.0).abs() < 1e-4);
    assert!((color.green.data[[2, 3]] - 0.5).abs() < 0.5 / 255.0 + 1e-4);
    assert!(color.blue.data[[3, 6]].abs() < 1e-4);
}

#[test]
fn test_grayscale_decodes_as_gray() {
    let buffer = ImageBuffer::from_fn(5, 3, |x, _| Luma([(x * 60) as u8]));
    let image = dynamic_to_image(&DynamicImage::ImageLuma8(buffer));
    assert_eq!(image.channels(), 1);
    assert_eq!((image.rows(), image.columns()), (3, 5));
    let Image::Gray(frame) = image else {
        panic!("expected a grayscale image");
    };
    assert!((frame.data[[1, 4]] - 240.0 / 255.0).abs() < 1e-4);
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_image(&dir.path().join("nope.png")).is_err());
}
