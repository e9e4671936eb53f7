//! Configuration management for the cat eyes application

use crate::constants::{
    DEFAULT_CAPTION, DEFAULT_EYE_RADIUS, DEFAULT_MIN_FACE_SIZE, DEFAULT_MIN_NEIGHBORS, DEFAULT_MODEL_FILE,
    DEFAULT_PUPIL_MARGIN, DEFAULT_PUPIL_RADIUS, DEFAULT_SCALE_FACTOR, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH,
    DEFAULT_SMOOTHING, DEFAULT_TARGET_FPS, DEFAULT_WINDOW_TITLE, DEFAULT_X_BAND, DEFAULT_Y_BAND, MODEL_SEARCH_DIRS,
};
use crate::filters::{clamp::ClampBand, exponential::validate_alpha};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera configuration
    pub camera: CameraConfig,

    /// Face detection configuration
    pub detector: DetectorConfig,

    /// Motion filter configuration
    pub filter: FilterConfig,

    /// Window configuration
    pub display: DisplayConfig,

    /// Eye geometry
    pub eyes: EyeConfig,
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Video device index
    pub device_index: i32,
}

/// Haar cascade parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Cascade XML file; a bare file name is looked up in the search dirs
    pub model_path: PathBuf,

    /// Image pyramid scale step (must be > 1)
    pub scale_factor: f64,

    /// Neighbor detections required to keep a candidate
    pub min_neighbors: i32,

    /// Smallest face side in pixels
    pub min_face_size: i32,
}

/// Motion filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Exponential smoothing coefficient in (0, 1]
    pub smoothing: f64,

    /// Horizontal clamp band (min, max)
    pub x_band: (f64, f64),

    /// Vertical clamp band (min, max)
    pub y_band: (f64, f64),
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Window width
    pub width: i32,

    /// Window height
    pub height: i32,

    /// Render ticks per second
    pub target_fps: u32,

    /// Window title
    pub window_title: String,

    /// Text drawn near the bottom of the window
    pub caption: String,
}

/// Eye geometry in pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EyeConfig {
    pub eye_radius: i32,
    pub pupil_radius: i32,
    /// Gap kept between pupil and eye edge at full travel
    pub pupil_margin: i32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { device_index: 0 }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_FILE),
            scale_factor: DEFAULT_SCALE_FACTOR,
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
            min_face_size: DEFAULT_MIN_FACE_SIZE,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            x_band: DEFAULT_X_BAND,
            y_band: DEFAULT_Y_BAND,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
            caption: DEFAULT_CAPTION.to_string(),
        }
    }
}

impl Default for EyeConfig {
    fn default() -> Self {
        Self {
            eye_radius: DEFAULT_EYE_RADIUS,
            pupil_radius: DEFAULT_PUPIL_RADIUS,
            pupil_margin: DEFAULT_PUPIL_MARGIN,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text. Missing keys take their defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Serialize configuration to YAML text
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_yaml()?)?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// Does not touch the filesystem; see [`Config::resolve_model_path`].
    pub fn validate(&self) -> Result<()> {
        // Validate detector parameters
        if self.detector.scale_factor <= 1.0 {
            return Err(Error::Config("Detector scale factor must be greater than 1.0".to_string()));
        }
        if self.detector.min_neighbors < 0 {
            return Err(Error::Config("Detector min neighbors must not be negative".to_string()));
        }
        if self.detector.min_face_size < 0 {
            return Err(Error::Config("Detector min face size must not be negative".to_string()));
        }

        // Same checks the motion filter applies when it is built
        validate_alpha(self.filter.smoothing)?;
        ClampBand::try_new(self.filter.x_band, self.filter.y_band)?;

        // Validate display settings
        if self.display.target_fps == 0 {
            return Err(Error::Config("Target FPS must be greater than 0".to_string()));
        }
        if self.display.width <= 0 || self.display.height <= 0 {
            return Err(Error::Config("Window size must be positive".to_string()));
        }

        // Validate eye geometry
        if self.eyes.pupil_radius <= 0 || self.eyes.pupil_margin < 0 {
            return Err(Error::Config(
                "Pupil radius must be positive and margin non-negative".to_string(),
            ));
        }
        if self.eyes.eye_radius - self.eyes.pupil_radius - self.eyes.pupil_margin <= 0 {
            return Err(Error::Config(
                "Eye radius must leave room for the pupil to travel".to_string(),
            ));
        }

        Ok(())
    }

    /// Locate the face detection model on disk.
    ///
    /// Paths with a directory component are used as given. A bare file name
    /// is searched for in the working directory, `assets/`, and the usual
    /// `OpenCV` haarcascade install locations.
    pub fn resolve_model_path(&self) -> Result<PathBuf> {
        resolve_model_path(&self.detector.model_path, MODEL_SEARCH_DIRS)
    }
}

/// Find `model` directly or inside one of `search_dirs`.
pub fn resolve_model_path(model: &Path, search_dirs: &[&str]) -> Result<PathBuf> {
    if model.is_file() {
        return Ok(model.to_path_buf());
    }

    let is_bare_name = model.parent().map_or(true, |p| p.as_os_str().is_empty());
    if is_bare_name {
        if let Some(found) = search_dirs
            .iter()
            .map(|dir| Path::new(dir).join(model))
            .find(|candidate| candidate.is_file())
        {
            return Ok(found);
        }
    }

    Err(Error::ModelNotFound(model.to_path_buf()))
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Cat Eyes Configuration

# Webcam
camera:
  device_index: 0

# Haar cascade face detector
detector:
  model_path: "haarcascade_frontalface_default.xml"
  scale_factor: 1.2
  min_neighbors: 5
  min_face_size: 30

# Pupil motion
filter:
  smoothing: 0.18
  x_band: [0.15, 0.85]
  y_band: [0.20, 0.80]

# Window
display:
  width: 640
  height: 480
  target_fps: 30
  window_title: "Doe-Eye Cat - Face Tracking"
  caption: "Move your head: cat eyes follow your face"

# Eye geometry
eyes:
  eye_radius: 40
  pupil_radius: 14
  pupil_margin: 4
"#;
