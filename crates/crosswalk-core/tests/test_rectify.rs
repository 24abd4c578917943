#[allow(dead_code)]
mod common;

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use ndarray::Array2;

use crosswalk_core::error::CrosswalkError;
use crosswalk_core::frame::Image;
use crosswalk_core::geometry::{rectify, rotated_rect_points, OrientedBox};

use common::{color_stripe_image, constant_frame, gray, pattern_frame};

fn gray_data(image: &Image) -> &Array2<f32> {
    match image {
        Image::Gray(frame) => &frame.data,
        Image::Color(_) => panic!("expected grayscale output"),
    }
}

// ---------------------------------------------------------------------------
// Corner layout
// ---------------------------------------------------------------------------

#[test]
fn test_rotated_rect_points_order_unrotated() {
    let pts = rotated_rect_points([10.0, 10.0], [4.0, 2.0], 0.0);
    let expected = [[8.0, 11.0], [8.0, 9.0], [12.0, 9.0], [12.0, 11.0]];
    for (p, e) in pts.iter().zip(expected.iter()) {
        assert!((p[0] - e[0]).abs() < 1e-12 && (p[1] - e[1]).abs() < 1e-12, "{p:?} vs {e:?}");
    }
}

#[test]
fn test_corners_use_truncated_size() {
    let region = OrientedBox::new(10.0, 10.0, 4.9, 2.7, 0.0).unwrap();
    let corners = region.corners().unwrap();
    assert!((corners[2][0] - corners[1][0] - 4.0).abs() < 1e-12);
    assert!((corners[0][1] - corners[1][1] - 2.0).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// Unrotated boxes behave like crops
// ---------------------------------------------------------------------------

#[test]
fn test_unrotated_box_matches_crop() {
    let src = pattern_frame(20, 24);
    let image = Image::Gray(src.clone());
    let region = OrientedBox::axis_aligned(5.0, 4.0, 10.0, 6.0).unwrap();

    let rectified = rectify(&image, &region).unwrap();
    assert_eq!((rectified.rows(), rectified.columns()), (6, 10));

    let data = gray_data(&rectified);
    for v in 0..6 {
        for u in 0..10 {
            let expected = src.data[[4 + v, 5 + u]];
            assert!(
                (data[[v, u]] - expected).abs() < 1e-4,
                "({v}, {u}): {} vs {expected}",
                data[[v, u]]
            );
        }
    }
}

#[test]
fn test_odd_sized_box_matches_crop() {
    let src = pattern_frame(20, 24);
    let image = Image::Gray(src.clone());
    let region = OrientedBox::axis_aligned(3.0, 2.0, 9.0, 5.0).unwrap();

    let rectified = rectify(&image, &region).unwrap();
    let data = gray_data(&rectified);
    assert_eq!(data.dim(), (5, 9));
    for v in 0..5 {
        for u in 0..9 {
            assert!((data[[v, u]] - src.data[[2 + v, 3 + u]]).abs() < 1e-4);
        }
    }
}

#[test]
fn test_color_layout_preserved() {
    let image = color_stripe_image(64, 32, 16.0);
    let region = OrientedBox::axis_aligned(8.0, 4.0, 40.0, 20.0).unwrap();

    let rectified = rectify(&image, &region).unwrap();
    assert_eq!(rectified.channels(), 3);
    assert_eq!((rectified.rows(), rectified.columns()), (20, 40));

    let (Image::Color(src), Image::Color(out)) = (&image, &rectified) else {
        panic!("expected color images");
    };
    for (s, o) in src.planes().iter().zip(out.planes().iter()) {
        for u in 0..40 {
            assert!((o.data[[10, u]] - s.data[[14, 8 + u]]).abs() < 1e-4);
        }
    }
}

// ---------------------------------------------------------------------------
// Rotated boxes
// ---------------------------------------------------------------------------

#[test]
fn test_quarter_turn_samples_rotated_grid() {
    let src = pattern_frame(20, 20);
    let image = Image::Gray(src.clone());
    let region = OrientedBox::new(10.0, 10.0, 8.0, 4.0, FRAC_PI_2).unwrap();

    let rectified = rectify(&image, &region).unwrap();
    let data = gray_data(&rectified);
    assert_eq!(data.dim(), (4, 8));

    // Rectified column u walks down the source, rectified row v walks left.
    for v in 0..4 {
        for u in 0..8 {
            let expected = src.data[[6 + u, 12 - v]];
            assert!(
                (data[[v, u]] - expected).abs() < 1e-4,
                "({v}, {u}): {} vs {expected}",
                data[[v, u]]
            );
        }
    }
}

#[test]
fn test_oblique_box_on_constant_image() {
    let image = Image::Gray(constant_frame(100, 100, 0.7));
    let region = OrientedBox::new(50.0, 50.0, 40.0, 20.0, 30f64.to_radians()).unwrap();

    let rectified = rectify(&image, &region).unwrap();
    let data = gray_data(&rectified);
    assert_eq!(data.dim(), (20, 40));
    for &v in data.iter() {
        assert!((v - 0.7).abs() < 1e-4, "got {v}");
    }
}

#[test]
fn test_samples_outside_image_read_zero() {
    let src = pattern_frame(10, 10);
    let image = Image::Gray(src.clone());
    let region = OrientedBox::axis_aligned(-5.0, 0.0, 10.0, 4.0).unwrap();

    let rectified = rectify(&image, &region).unwrap();
    let data = gray_data(&rectified);
    for v in 0..4 {
        for u in 0..4 {
            assert!(data[[v, u]].abs() < 1e-4);
        }
        for u in 5..10 {
            assert!((data[[v, u]] - src.data[[v, u - 5]]).abs() < 1e-4);
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn test_box_outside_image_is_invalid_region() {
    let image = Image::Gray(pattern_frame(20, 20));
    let region = OrientedBox::new(500.0, 500.0, 10.0, 10.0, 0.0).unwrap();
    assert!(matches!(
        rectify(&image, &region),
        Err(CrosswalkError::InvalidRegion(_))
    ));
}

#[test]
fn test_sub_pixel_box_is_invalid_region() {
    let image = Image::Gray(pattern_frame(20, 20));
    let region = OrientedBox::new(10.0, 10.0, 0.5, 5.0, 0.0).unwrap();
    assert!(matches!(
        rectify(&image, &region),
        Err(CrosswalkError::InvalidRegion(_))
    ));
}

#[test]
fn test_oversized_box_is_invalid_region() {
    let image = Image::Gray(pattern_frame(64, 64));
    for side in [1e12, 1e300] {
        let region = OrientedBox::new(32.0, 32.0, side, side, 0.0).unwrap();
        assert!(matches!(
            rectify(&image, &region),
            Err(CrosswalkError::InvalidRegion(_))
        ));
    }
}

#[test]
fn test_rotated_box_missing_image_is_invalid_region() {
    // The bounding box overlaps the image corner, the thin diagonal box does not.
    let image = Image::Gray(constant_frame(100, 100, 1.0));
    let region = OrientedBox::new(-30.0, -30.0, 120.0, 4.0, -FRAC_PI_4).unwrap();
    assert!(matches!(
        rectify(&image, &region),
        Err(CrosswalkError::InvalidRegion(_))
    ));
}

#[test]
fn test_rotated_box_clipping_image_corner_is_accepted() {
    let image = Image::Gray(constant_frame(100, 100, 1.0));
    let region = OrientedBox::new(0.0, 0.0, 120.0, 4.0, -FRAC_PI_4).unwrap();
    let rectified = rectify(&image, &region).unwrap();
    assert!(gray_data(&rectified).iter().any(|&v| v > 0.0));
}

#[test]
fn test_non_positive_box_rejected() {
    assert!(matches!(
        OrientedBox::new(10.0, 10.0, 0.0, 5.0, 0.0),
        Err(CrosswalkError::InvalidRegion(_))
    ));
    assert!(matches!(
        OrientedBox::new(10.0, 10.0, 5.0, -1.0, 0.0),
        Err(CrosswalkError::InvalidRegion(_))
    ));
    assert!(OrientedBox::new(f64::NAN, 10.0, 5.0, 5.0, 0.0).is_err());
}

#[test]
fn test_empty_image_rejected() {
    let image = gray(Array2::zeros((0, 0)));
    let region = OrientedBox::new(0.0, 0.0, 4.0, 4.0, 0.0).unwrap();
    assert!(matches!(
        rectify(&image, &region),
        Err(CrosswalkError::EmptyImage)
    ));
}
