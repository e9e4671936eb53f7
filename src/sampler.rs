//! Background sampling loop: camera frames in, normalized face position out.

use crate::{
    camera::{FrameDimensions, FrameSource},
    constants::{CAPTURE_BACKOFF_INITIAL_MS, CAPTURE_BACKOFF_MAX_MS},
    face_detection::{select_largest, FaceLocator},
    position::{NormalizedPosition, SharedPosition},
};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// What a single sampling iteration did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    /// A face was found and its center published
    Updated(NormalizedPosition),
    /// The frame had no face; the shared position was left alone
    NoFace,
    /// No usable frame, or the detector failed on it
    CaptureFailed,
}

/// Delay between consecutive failed captures.
///
/// The first failure retries immediately; after that the delay starts at
/// `initial` and doubles up to `max`. Any successful read resets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub initial: Duration,
    pub max: Duration,
}

impl RetryPolicy {
    /// Retry without ever sleeping
    pub const IMMEDIATE: Self = Self {
        initial: Duration::ZERO,
        max: Duration::ZERO,
    };

    /// Delay to wait after `consecutive_failures` failed reads in a row.
    #[must_use]
    pub fn delay_for(&self, consecutive_failures: u32) -> Duration {
        if consecutive_failures <= 1 {
            return Duration::ZERO;
        }
        let doublings = (consecutive_failures - 2).min(31);
        self.initial.saturating_mul(1 << doublings).min(self.max)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(CAPTURE_BACKOFF_INITIAL_MS),
            max: Duration::from_millis(CAPTURE_BACKOFF_MAX_MS),
        }
    }
}

/// Counters reported when the sampler stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SamplerReport {
    pub frames: u64,
    pub detections: u64,
    pub capture_failures: u64,
}

/// Reads frames, finds the largest face and publishes its center.
pub struct Sampler<S, L> {
    source: S,
    locator: L,
    retry: RetryPolicy,
    consecutive_failures: u32,
    report: SamplerReport,
}

impl<S, L> Sampler<S, L>
where
    S: FrameSource,
    L: FaceLocator<S::Frame>,
{
    pub fn new(source: S, locator: L) -> Self {
        Self {
            source,
            locator,
            retry: RetryPolicy::default(),
            consecutive_failures: 0,
            report: SamplerReport::default(),
        }
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn report(&self) -> SamplerReport {
        self.report
    }

    /// Run one iteration: read, detect, publish.
    ///
    /// Failures never escape; the shared position only changes when a face
    /// is found.
    pub fn step(&mut self, position: &SharedPosition) -> SampleOutcome {
        let frame = match self.source.read() {
            Ok(frame) if frame.width() > 0 && frame.height() > 0 => frame,
            Ok(_) => {
                debug!("Discarding zero-sized frame");
                return self.capture_failed();
            }
            Err(e) if e.is_fatal() => {
                warn!("Camera error: {}", e);
                return self.capture_failed();
            }
            Err(e) => {
                debug!("Frame read failed: {}", e);
                return self.capture_failed();
            }
        };
        self.consecutive_failures = 0;
        self.report.frames += 1;

        let faces = match self.locator.locate(&frame) {
            Ok(faces) => faces,
            Err(e) => {
                debug!("Face detection failed: {}", e);
                return self.capture_failed();
            }
        };

        match select_largest(&faces) {
            Some(face) => {
                let normalized = face.normalized_center(frame.width(), frame.height());
                position.store(normalized);
                self.report.detections += 1;
                SampleOutcome::Updated(normalized)
            }
            None => SampleOutcome::NoFace,
        }
    }

    /// Sample until `stop` is raised, then release the source.
    pub fn run(mut self, position: &SharedPosition, stop: &AtomicBool) -> SamplerReport {
        info!("Sampler started");
        while !stop.load(Ordering::Acquire) {
            if self.step(position) == SampleOutcome::CaptureFailed {
                let delay = self.retry.delay_for(self.consecutive_failures);
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
            }
        }
        self.source.release();
        info!("Sampler stopped");
        self.report
    }

    fn capture_failed(&mut self) -> SampleOutcome {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.report.capture_failures += 1;
        SampleOutcome::CaptureFailed
    }
}
