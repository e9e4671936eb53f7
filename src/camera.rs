//! Webcam frame source.

use crate::{Error, Result};
use log::{debug, info, warn};
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE};

/// Pixel dimensions of a captured frame
pub trait FrameDimensions {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
}

impl FrameDimensions for Mat {
    fn width(&self) -> i32 {
        self.cols()
    }

    fn height(&self) -> i32 {
        self.rows()
    }
}

/// A source of video frames read on demand.
pub trait FrameSource: Send {
    type Frame: FrameDimensions;

    /// Grab the next frame.
    ///
    /// A grab that yields no frame is [`Error::Capture`]; a device fault keeps
    /// its own error kind so it can be told apart.
    fn read(&mut self) -> Result<Self::Frame>;

    /// Give the device back to the system. Safe to call more than once.
    fn release(&mut self) {}
}

/// Webcam opened through `OpenCV` `videoio`
pub struct CameraSource {
    index: i32,
    capture: VideoCapture,
    released: bool,
}

impl CameraSource {
    /// Open the camera with the given device index
    pub fn open(index: i32) -> Result<Self> {
        info!("Opening camera {}", index);
        let mut capture = VideoCapture::new(index, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(Error::CameraUnavailable(index));
        }

        // Keep only the newest frame queued so the eyes react without lag
        match capture.set(CAP_PROP_BUFFERSIZE, 1.0) {
            Ok(true) => debug!("Camera buffer size set to 1"),
            Ok(false) => debug!("Camera backend ignored buffer size request"),
            Err(e) => debug!("Could not set camera buffer size: {}", e),
        }

        Ok(Self {
            index,
            capture,
            released: false,
        })
    }
}

impl FrameSource for CameraSource {
    type Frame = Mat;

    fn read(&mut self) -> Result<Mat> {
        if self.released {
            return Err(Error::Capture(format!("camera {} already released", self.index)));
        }

        let mut frame = Mat::default();
        let grabbed = self.capture.read(&mut frame)?;
        if !grabbed || frame.empty() {
            return Err(Error::Capture("no frame returned".to_string()));
        }

        Ok(frame)
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        match self.capture.release() {
            Ok(()) => info!("Camera {} released", self.index),
            Err(e) => warn!("Failed to release camera {}: {}", self.index, e),
        }
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        self.release();
    }
}
