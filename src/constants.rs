//! Constants used throughout the application

/// Default window size
pub const DEFAULT_SCREEN_WIDTH: i32 = 640;
pub const DEFAULT_SCREEN_HEIGHT: i32 = 480;

/// Render loop cadence
pub const DEFAULT_TARGET_FPS: u32 = 30;

/// Eye geometry in pixels
pub const DEFAULT_EYE_RADIUS: i32 = 40;
pub const DEFAULT_PUPIL_RADIUS: i32 = 14;
pub const DEFAULT_PUPIL_MARGIN: i32 = 4;

/// Eye centers as fractions of the screen size
pub const LEFT_EYE_X_FRACTION: f64 = 0.33;
pub const RIGHT_EYE_X_FRACTION: f64 = 0.66;
pub const EYE_Y_FRACTION: f64 = 0.45;

/// Pupils travel further sideways than up and down
pub const HORIZONTAL_TRAVEL_GAIN: f64 = 1.8;
pub const VERTICAL_TRAVEL_GAIN: f64 = 1.2;

/// Exponential smoothing coefficient for pupil motion
pub const DEFAULT_SMOOTHING: f64 = 0.18;

/// Visible band for the normalized face position
pub const DEFAULT_X_BAND: (f64, f64) = (0.15, 0.85);
pub const DEFAULT_Y_BAND: (f64, f64) = (0.20, 0.80);

/// Neutral position, used before any face has been seen
pub const CENTER: f64 = 0.5;

/// Haar cascade sensitivity
pub const DEFAULT_SCALE_FACTOR: f64 = 1.2;
pub const DEFAULT_MIN_NEIGHBORS: i32 = 5;
pub const DEFAULT_MIN_FACE_SIZE: i32 = 30;

/// Face detection model file name
pub const DEFAULT_MODEL_FILE: &str = "haarcascade_frontalface_default.xml";

/// Directories searched for a model given by bare file name
pub const MODEL_SEARCH_DIRS: &[&str] = &[
    ".",
    "assets",
    "/usr/share/opencv4/haarcascades",
    "/usr/local/share/opencv4/haarcascades",
    "/usr/share/opencv/haarcascades",
    "/opt/homebrew/share/opencv4/haarcascades",
];

/// Capture retry backoff bounds in milliseconds
pub const CAPTURE_BACKOFF_INITIAL_MS: u64 = 1;
pub const CAPTURE_BACKOFF_MAX_MS: u64 = 100;

/// Window text
pub const DEFAULT_WINDOW_TITLE: &str = "Doe-Eye Cat - Face Tracking";
pub const DEFAULT_CAPTION: &str = "Move your head: cat eyes follow your face";

/// Keys that close the window
pub const KEY_ESCAPE: i32 = 27;
pub const KEY_QUIT: i32 = b'q' as i32;
