//! Normalized face position and the holder shared between the sampling and
//! rendering loops.

use crate::constants::CENTER;
use std::sync::atomic::{AtomicU64, Ordering};

/// Face center as a fraction of the frame size, both components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPosition {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPosition {
    /// Frame center, the position before any face has been seen.
    pub const CENTER: Self = Self { x: CENTER, y: CENTER };

    /// Create a position, clamping both components into `[0, 1]`.
    ///
    /// Non-finite components collapse to the center.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }
}

impl Default for NormalizedPosition {
    fn default() -> Self {
        Self::CENTER
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        CENTER
    }
}

/// Last-writer-wins holder for the latest face position.
///
/// Both coordinates are packed as `f32` into one atomic word, so readers
/// always observe a pair written by a single `store`.
#[derive(Debug)]
pub struct SharedPosition {
    packed: AtomicU64,
}

impl SharedPosition {
    #[must_use]
    pub fn new(initial: NormalizedPosition) -> Self {
        Self {
            packed: AtomicU64::new(pack(initial)),
        }
    }

    /// Publish a new position, replacing whatever was there.
    pub fn store(&self, position: NormalizedPosition) {
        self.packed.store(pack(position), Ordering::Release);
    }

    /// Latest published position. May be stale, never torn.
    #[must_use]
    pub fn load(&self) -> NormalizedPosition {
        unpack(self.packed.load(Ordering::Acquire))
    }
}

impl Default for SharedPosition {
    fn default() -> Self {
        Self::new(NormalizedPosition::CENTER)
    }
}

#[allow(clippy::cast_possible_truncation)] // f32 precision is plenty for [0, 1]
fn pack(position: NormalizedPosition) -> u64 {
    let x = u64::from((position.x as f32).to_bits());
    let y = u64::from((position.y as f32).to_bits());
    (x << 32) | y
}

fn unpack(packed: u64) -> NormalizedPosition {
    let x = f32::from_bits((packed >> 32) as u32);
    let y = f32::from_bits((packed & 0xFFFF_FFFF) as u32);
    NormalizedPosition {
        x: f64::from(x),
        y: f64::from(y),
    }
}
