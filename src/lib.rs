//! Cartoon cat eyes whose pupils follow your face through the webcam.
//!
//! Two loops cooperate through a single [`position::SharedPosition`]:
//! 1. A background [`sampler::Sampler`] reads camera frames, finds the
//!    largest face with an `OpenCV` Haar cascade and publishes its center in
//!    normalized image coordinates.
//! 2. The foreground render loop reads the latest position at a fixed rate,
//!    clamps and smooths it with a [`filters::MotionFilter`], and draws the
//!    cat face described by [`scene::Scene`].
//!
//! # Examples
//!
//! ## Smoothing a face position
//!
//! ```no_run
//! use cat_eyes::{config::FilterConfig, filters::MotionFilter, position::NormalizedPosition};
//!
//! # fn main() -> cat_eyes::Result<()> {
//! let mut filter = MotionFilter::from_config(&FilterConfig::default())?;
//!
//! // Face seen near the right edge of the frame
//! let raw = NormalizedPosition::new(0.95, 0.5);
//! for _ in 0..10 {
//!     let smoothed = filter.step(raw);
//!     println!("pupils at {:.3}, {:.3}", smoothed.x, smoothed.y);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Composing a frame
//!
//! ```no_run
//! use cat_eyes::{config::Config, position::NormalizedPosition, scene::{DrawCommand, Scene}};
//!
//! let scene = Scene::from_config(&Config::default());
//! for command in scene.compose(NormalizedPosition::CENTER) {
//!     if let DrawCommand::Circle { center, radius, .. } = command {
//!         println!("circle r={} at ({}, {})", radius, center.x, center.y);
//!     }
//! }
//! ```
//!
//! ## Running the application
//!
//! ```no_run
//! use cat_eyes::{app::CatEyesApp, config::Config};
//!
//! # fn main() -> cat_eyes::Result<()> {
//! let app = CatEyesApp::new(&Config::default())?;
//! app.run()?;
//! # Ok(())
//! # }
//! ```

/// Normalized face position and the holder shared between loops
pub mod position;

/// Webcam frame source
pub mod camera;

/// Face detection with a Haar cascade
pub mod face_detection;

/// Background sampling loop
pub mod sampler;

/// Clamp and smoothing filters for pupil motion
pub mod filters;

/// Cat face layout and pupil placement
pub mod scene;

/// `OpenCV` window, canvas and frame pacing
pub mod render;

/// Main application module
pub mod app;

/// Utility functions for pixel conversions
pub mod utils;

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
