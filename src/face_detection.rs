//! Face detection with an `OpenCV` Haar cascade.

use crate::config::DetectorConfig;
use crate::position::NormalizedPosition;
use crate::{Error, Result};
use log::info;
use opencv::core::{Mat, Rect, Size, Vector};
use opencv::imgproc;
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;
use std::path::Path;

/// Axis-aligned face region in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceRegion {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    /// Center of the region in pixels.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.x) + f64::from(self.width) / 2.0,
            f64::from(self.y) + f64::from(self.height) / 2.0,
        )
    }

    /// Center of the region as a fraction of the frame size.
    #[must_use]
    pub fn normalized_center(&self, frame_width: i32, frame_height: i32) -> NormalizedPosition {
        let (cx, cy) = self.center();
        NormalizedPosition::new(cx / f64::from(frame_width), cy / f64::from(frame_height))
    }
}

impl From<Rect> for FaceRegion {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }
}

/// Pick the region with the largest area. The earliest region wins a tie.
#[must_use]
pub fn select_largest(faces: &[FaceRegion]) -> Option<FaceRegion> {
    faces.iter().copied().fold(None, |best, face| match best {
        Some(b) if b.area() >= face.area() => Some(b),
        _ => Some(face),
    })
}

/// Anything that can find faces in a frame of type `F`.
pub trait FaceLocator<F>: Send {
    /// Return every face found in `frame`, in detector order.
    fn locate(&mut self, frame: &F) -> Result<Vec<FaceRegion>>;
}

/// Haar cascade face detector
pub struct HaarFaceLocator {
    classifier: CascadeClassifier,
    scale_factor: f64,
    min_neighbors: i32,
    min_size: Size,
    gray: Mat,
}

impl HaarFaceLocator {
    /// Load a cascade from an XML model file
    pub fn new<P: AsRef<Path>>(model_path: P, scale_factor: f64, min_neighbors: i32, min_face_size: i32) -> Result<Self> {
        let model_path = model_path.as_ref();
        if !model_path.is_file() {
            return Err(Error::ModelNotFound(model_path.to_path_buf()));
        }

        let path_str = model_path
            .to_str()
            .ok_or_else(|| Error::InvalidInput(format!("Model path is not UTF-8: {}", model_path.display())))?;

        let classifier = CascadeClassifier::new(path_str)
            .map_err(|e| Error::ModelLoad(format!("Failed to load {}: {e}", model_path.display())))?;

        // A corrupt XML file loads without error but leaves the classifier empty
        if classifier.empty()? {
            return Err(Error::ModelLoad(format!(
                "Cascade is empty, file might be corrupted: {}",
                model_path.display()
            )));
        }

        info!("Loaded face cascade from {}", model_path.display());

        Ok(Self {
            classifier,
            scale_factor,
            min_neighbors,
            min_size: Size::new(min_face_size, min_face_size),
            gray: Mat::default(),
        })
    }

    /// Build a locator from the detector section of the configuration.
    pub fn from_config<P: AsRef<Path>>(model_path: P, config: &DetectorConfig) -> Result<Self> {
        Self::new(model_path, config.scale_factor, config.min_neighbors, config.min_face_size)
    }
}

impl FaceLocator<Mat> for HaarFaceLocator {
    fn locate(&mut self, frame: &Mat) -> Result<Vec<FaceRegion>> {
        imgproc::cvt_color_def(frame, &mut self.gray, imgproc::COLOR_BGR2GRAY)?;

        let mut faces = Vector::<Rect>::new();
        self.classifier.detect_multi_scale(
            &self.gray,
            &mut faces,
            self.scale_factor,
            self.min_neighbors,
            0,
            self.min_size,
            Size::new(0, 0),
        )?;

        Ok(faces.iter().map(FaceRegion::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_largest_face() {
        let faces = [FaceRegion::new(0, 0, 10, 10), FaceRegion::new(5, 5, 50, 50)];
        let largest = select_largest(&faces).unwrap();

        assert_eq!(largest, faces[1]);
        assert_eq!(largest.area(), 2500);
        assert_eq!(largest.center(), (30.0, 30.0));
    }

    #[test]
    fn test_select_largest_empty() {
        assert_eq!(select_largest(&[]), None);
    }

    #[test]
    fn test_select_largest_tie_keeps_first() {
        let faces = [
            FaceRegion::new(0, 0, 20, 10),
            FaceRegion::new(100, 100, 10, 20),
            FaceRegion::new(50, 50, 5, 5),
        ];
        assert_eq!(select_largest(&faces), Some(faces[0]));
    }

    #[test]
    fn test_normalized_center() {
        let face = FaceRegion::new(280, 200, 80, 80);
        let p = face.normalized_center(640, 480);
        assert_eq!(p, NormalizedPosition { x: 0.5, y: 0.5 });
    }

    #[test]
    fn test_odd_size_center_is_fractional() {
        let face = FaceRegion::new(0, 0, 5, 3);
        assert_eq!(face.center(), (2.5, 1.5));
    }

    #[test]
    fn test_missing_model_is_reported() {
        let result = HaarFaceLocator::new("definitely/not/here.xml", 1.2, 5, 30);
        assert!(matches!(result, Err(Error::ModelNotFound(_))));
    }

    #[test]
    fn test_corrupt_model_is_rejected() {
        // Any non-cascade file exercises the empty-classifier path
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let result = HaarFaceLocator::new(manifest, 1.2, 5, 30);
        assert!(matches!(result, Err(Error::ModelLoad(_))));
    }
}
