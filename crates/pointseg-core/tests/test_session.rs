mod common;

use common::{gradient_image, write_test_png};

use pointseg_core::fingerprint::Fingerprint;
use pointseg_core::session::ImageSession;

#[test]
fn test_open_decodes_and_fingerprints() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_test_png(dir.path(), "photo.final.png", 12, 7);

    let session = ImageSession::open(&path).unwrap();
    assert_eq!(session.name(), "photo");
    assert_eq!((session.width(), session.height()), (12, 7));
    assert_eq!(session.fingerprint(), &Fingerprint::of_file(&path).unwrap());
    assert_eq!(session.path(), path.as_path());
}

#[test]
fn test_pixels_match_raster() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_test_png(dir.path(), "grad.png", 9, 5);
    let expected = gradient_image(9, 5);

    let session = ImageSession::open(&path).unwrap();
    let pixels = session.pixels();
    assert_eq!(pixels.dim(), (5, 9, 3));
    for (x, y, p) in expected.enumerate_pixels() {
        for c in 0..3 {
            assert_eq!(pixels[[y as usize, x as usize, c]], p.0[c]);
        }
    }
    assert_eq!(session.image(), &expected);
}

#[test]
fn test_grayscale_input_is_converted_to_rgb() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gray.png");
    image::GrayImage::from_pixel(4, 4, image::Luma([77])).save(&path).unwrap();

    let session = ImageSession::open(&path).unwrap();
    assert_eq!(session.image().get_pixel(2, 2).0, [77, 77, 77]);
}

#[test]
fn test_open_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.jpg");
    std::fs::write(&path, [0u8, 1, 2, 3, 4, 5]).unwrap();
    assert!(ImageSession::open(&path).is_err());
}
