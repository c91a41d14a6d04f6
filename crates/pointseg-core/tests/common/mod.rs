#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::{Rgb, RgbImage};
use ndarray::{Array2, ArrayView3};

use pointseg_core::error::{PointsegError, Result};
use pointseg_core::mapping::ImagePoint;
use pointseg_core::model::{PointLabel, Prediction, SegmentModel};

/// Calls observed by a [`StubModel`], shared with the test body.
#[derive(Default, Debug)]
pub struct Calls {
    /// (height, width) of every image passed to `prepare`.
    pub prepared: Vec<(usize, usize)>,
    pub predicted: Vec<(ImagePoint, PointLabel)>,
    /// Fail the next `prepare` calls while this is > 0.
    pub fail_prepares: usize,
}

/// Model stand-in: predicts a square of `inside` values around the point,
/// `outside` everywhere else.
pub struct StubModel {
    pub calls: Rc<RefCell<Calls>>,
    pub inside: f32,
    pub outside: f32,
    pub half_size: u32,
    prepared: Option<(usize, usize)>,
}

impl StubModel {
    pub fn new() -> (Self, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let model = Self {
            calls: calls.clone(),
            inside: 7.5,
            outside: -3.0,
            half_size: 2,
            prepared: None,
        };
        (model, calls)
    }
}

impl SegmentModel for StubModel {
    fn prepare(&mut self, pixels: ArrayView3<'_, u8>) -> Result<()> {
        self.prepared = None;
        let (h, w, _) = pixels.dim();
        let mut calls = self.calls.borrow_mut();
        calls.prepared.push((h, w));
        if calls.fail_prepares > 0 {
            calls.fail_prepares -= 1;
            return Err(PointsegError::Model("stub prepare failure".into()));
        }
        self.prepared = Some((h, w));
        Ok(())
    }

    fn predict(&mut self, point: ImagePoint, label: PointLabel) -> Result<Prediction> {
        let (h, w) = self.prepared.ok_or(PointsegError::ModelNotPrepared)?;
        self.calls.borrow_mut().predicted.push((point, label));

        let (px, py, r) = (point.x as i64, point.y as i64, self.half_size as i64);
        let mask = Array2::from_shape_fn((h, w), |(row, col)| {
            let inside = (col as i64 - px).abs() <= r && (row as i64 - py).abs() <= r;
            if inside {
                self.inside
            } else {
                self.outside
            }
        });
        Ok(Prediction {
            mask,
            scores: vec![0.9],
        })
    }
}

/// Deterministic gradient image.
pub fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

/// Write a gradient PNG into `dir` and return its path.
pub fn write_test_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    gradient_image(width, height).save(&path).expect("write test png");
    path
}
