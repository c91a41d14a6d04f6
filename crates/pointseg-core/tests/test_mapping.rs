use approx::assert_relative_eq;

use pointseg_core::error::PointsegError;
use pointseg_core::mapping::{DisplayPoint, ImagePoint, ViewportScale};

const SIZES: &[(u32, u32)] = &[
    (1, 1),
    (7, 3),
    (640, 480),
    (800, 600),
    (801, 601),
    (1600, 1200),
    (1920, 1080),
    (1080, 1920),
    (3000, 17),
    (17, 3000),
    (4032, 3024),
    (333, 999),
];

#[test]
fn test_scale_is_min_of_axis_ratios() {
    for &(w, h) in SIZES {
        let s = ViewportScale::for_viewport(w, h).unwrap();
        let expected = (800.0 / w as f32).min(600.0 / h as f32);
        assert_relative_eq!(s.scale, expected);
        assert_eq!(s.image_size, [w, h]);
    }
}

#[test]
fn test_display_size_fits_viewport() {
    for &(w, h) in SIZES {
        let s = ViewportScale::for_viewport(w, h).unwrap();
        let [dw, dh] = s.display_size;
        assert!(dw >= 1 && dw <= 800, "{w}x{h} -> width {dw}");
        assert!(dh >= 1 && dh <= 600, "{w}x{h} -> height {dh}");
        // One axis always fills the viewport.
        assert!(dw == 800 || dh == 600, "{w}x{h} -> {dw}x{dh}");
    }
}

#[test]
fn test_exact_fit_scenario() {
    let s = ViewportScale::for_viewport(1600, 1200).unwrap();
    assert_relative_eq!(s.scale, 0.5);
    assert_eq!(s.display_size, [800, 600]);
    assert_eq!(
        s.to_image(DisplayPoint::new(400.0, 300.0)),
        Some(ImagePoint::new(800, 600))
    );
}

#[test]
fn test_upscales_small_images() {
    let s = ViewportScale::for_viewport(100, 50).unwrap();
    assert_relative_eq!(s.scale, 8.0);
    assert_eq!(s.display_size, [800, 400]);
    assert_eq!(
        s.to_image(DisplayPoint::new(401.0, 391.0)),
        Some(ImagePoint::new(50, 49))
    );
}

#[test]
fn test_round_trip_within_one_pixel() {
    for &(w, h) in SIZES {
        let s = ViewportScale::for_viewport(w, h).unwrap();
        let step_x = (w / 13).max(1);
        let step_y = (h / 11).max(1);
        for ix in (0..w).step_by(step_x as usize) {
            for iy in (0..h).step_by(step_y as usize) {
                let p = ImagePoint::new(ix, iy);
                let d = s.to_display(p);
                // Points squeezed into the last partial display pixel are not clickable.
                if d.x >= (s.display_size[0] - 1) as f32 || d.y >= (s.display_size[1] - 1) as f32 {
                    continue;
                }
                let back = s.to_image(d).expect("inside drawn image");
                assert!(back.x.abs_diff(ix) <= 1, "{w}x{h}: x {ix} -> {}", back.x);
                assert!(back.y.abs_diff(iy) <= 1, "{w}x{h}: y {iy} -> {}", back.y);
            }
        }
    }
}

#[test]
fn test_letterbox_click_is_rejected() {
    // 1920x1080 -> 800x450, bottom 150 px are margin.
    let s = ViewportScale::for_viewport(1920, 1080).unwrap();
    assert_eq!(s.display_size, [800, 450]);
    assert_eq!(s.to_image(DisplayPoint::new(100.0, 500.0)), None);
    assert_eq!(s.to_image(DisplayPoint::new(100.0, 450.0)), None);
    assert!(s.to_image(DisplayPoint::new(100.0, 449.0)).is_some());
}

#[test]
fn test_negative_and_nan_clicks_are_rejected() {
    let s = ViewportScale::for_viewport(640, 480).unwrap();
    assert_eq!(s.to_image(DisplayPoint::new(-1.0, 10.0)), None);
    assert_eq!(s.to_image(DisplayPoint::new(10.0, -0.5)), None);
    assert_eq!(s.to_image(DisplayPoint::new(f32::NAN, 10.0)), None);
}

#[test]
fn test_far_edge_rounding_is_clamped() {
    // scale 0.5: display x 799.9 rounds to 1600, one past the last column.
    let s = ViewportScale::for_viewport(1600, 1200).unwrap();
    let p = s.to_image(DisplayPoint::new(799.9, 599.9)).unwrap();
    assert_eq!(p, ImagePoint::new(1599, 1199));
}

#[test]
fn test_zero_dimensions_error() {
    let err = ViewportScale::for_viewport(0, 10).unwrap_err();
    assert!(matches!(
        err,
        PointsegError::InvalidDimensions { width: 0, height: 10 }
    ));
}
