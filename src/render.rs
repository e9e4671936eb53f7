//! `OpenCV` highgui backend: executes display lists, owns the window and
//! paces the render loop.

use crate::constants::{KEY_ESCAPE, KEY_QUIT};
use crate::scene::{Color, DrawCommand};
use crate::utils::safe_cast::f64_to_i32_clamp;
use crate::Result;
use log::{info, warn};
use opencv::core::{Mat, Point, Scalar, Size, CV_8UC3};
use opencv::highgui::{self, WINDOW_AUTOSIZE, WND_PROP_VISIBLE};
use opencv::imgproc::{self, FILLED, FONT_HERSHEY_SIMPLEX, LINE_AA};
use opencv::prelude::*;
use std::time::{Duration, Instant};

const FONT_SCALE: f64 = 0.5;
const FONT_THICKNESS: i32 = 1;

impl From<Color> for Scalar {
    fn from(color: Color) -> Self {
        // OpenCV images are BGR
        Scalar::new(f64::from(color.b), f64::from(color.g), f64::from(color.r), 0.0)
    }
}

fn to_cv(point: crate::scene::Point) -> Point {
    Point::new(point.x, point.y)
}

/// Off-screen BGR image that display lists are drawn into
pub struct MatCanvas {
    width: i32,
    height: i32,
    image: Mat,
}

impl MatCanvas {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let image = Mat::new_rows_cols_with_default(height, width, CV_8UC3, Scalar::all(0.0))?;
        Ok(Self { width, height, image })
    }

    #[must_use]
    pub fn image(&self) -> &Mat {
        &self.image
    }

    /// Draw every command in order, later commands on top.
    pub fn render(&mut self, commands: &[DrawCommand<'_>]) -> Result<()> {
        for command in commands {
            self.draw(command)?;
        }
        Ok(())
    }

    fn draw(&mut self, command: &DrawCommand<'_>) -> Result<()> {
        match *command {
            DrawCommand::Fill(color) => {
                self.image = Mat::new_rows_cols_with_default(self.height, self.width, CV_8UC3, color.into())?;
            }
            DrawCommand::Circle { center, radius, color } => {
                imgproc::circle(&mut self.image, to_cv(center), radius, color.into(), FILLED, LINE_AA, 0)?;
            }
            DrawCommand::Arc {
                bounds,
                start_deg,
                end_deg,
                color,
                thickness,
            } => {
                // OpenCV measures angles clockwise on screen, so mirror the sweep
                let center = Point::new(bounds.x + bounds.width / 2, bounds.y + bounds.height / 2);
                let axes = Size::new(bounds.width / 2, bounds.height / 2);
                imgproc::ellipse(
                    &mut self.image,
                    center,
                    axes,
                    0.0,
                    -end_deg,
                    -start_deg,
                    color.into(),
                    thickness,
                    LINE_AA,
                    0,
                )?;
            }
            DrawCommand::Text { text, origin, color } => {
                // put_text anchors at the baseline; shift down by the glyph height
                let mut baseline = 0;
                let size = imgproc::get_text_size(text, FONT_HERSHEY_SIMPLEX, FONT_SCALE, FONT_THICKNESS, &mut baseline)?;
                let y = f64_to_i32_clamp(f64::from(origin.y + size.height), 0, self.height);
                imgproc::put_text(
                    &mut self.image,
                    text,
                    Point::new(origin.x, y),
                    FONT_HERSHEY_SIMPLEX,
                    FONT_SCALE,
                    color.into(),
                    FONT_THICKNESS,
                    LINE_AA,
                    false,
                )?;
            }
        }
        Ok(())
    }
}

/// Window events the render loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The user closed the window or pressed a quit key
    CloseRequested,
    /// Any other key
    KeyPressed(i32),
}

impl WindowEvent {
    /// Classify a key code returned by `wait_key`; `None` when no key was pressed.
    #[must_use]
    pub fn from_key(key: i32) -> Option<Self> {
        if key < 0 {
            return None;
        }
        // Some backends set modifier bits above the low byte
        match key & 0xFF {
            KEY_ESCAPE | KEY_QUIT => Some(Self::CloseRequested),
            k => Some(Self::KeyPressed(k)),
        }
    }
}

/// Somewhere finished frames are shown and user input comes from
pub trait FrameDisplay {
    /// Pump pending input and return what happened since the last call.
    fn poll_events(&mut self) -> Result<Vec<WindowEvent>>;

    /// Show a finished frame
    fn present(&mut self, image: &Mat) -> Result<()>;
}

/// highgui window, destroyed when dropped
pub struct HighguiWindow {
    name: String,
}

impl HighguiWindow {
    pub fn open(name: &str) -> Result<Self> {
        highgui::named_window(name, WINDOW_AUTOSIZE)?;
        info!("Created window \"{}\"", name);
        Ok(Self { name: name.to_string() })
    }
}

impl FrameDisplay for HighguiWindow {
    fn present(&mut self, image: &Mat) -> Result<()> {
        highgui::imshow(&self.name, image)?;
        Ok(())
    }

    fn poll_events(&mut self) -> Result<Vec<WindowEvent>> {
        let mut events = Vec::new();
        if let Some(event) = WindowEvent::from_key(highgui::wait_key(1)?) {
            events.push(event);
        }
        // A window closed through its title bar reports itself invisible
        if highgui::get_window_property(&self.name, WND_PROP_VISIBLE)? < 1.0 {
            events.push(WindowEvent::CloseRequested);
        }
        Ok(events)
    }
}

impl Drop for HighguiWindow {
    fn drop(&mut self) {
        match highgui::destroy_window(&self.name) {
            Ok(()) => info!("Window \"{}\" destroyed", self.name),
            Err(e) => warn!("Failed to destroy window \"{}\": {}", self.name, e),
        }
    }
}

/// Caps the loop rate by sleeping away the rest of each tick period.
#[derive(Debug)]
pub struct FrameLimiter {
    period: Duration,
    last_tick: Option<Instant>,
}

impl FrameLimiter {
    /// # Panics
    ///
    /// Panics if `fps` is zero.
    pub fn new(fps: u32) -> Self {
        assert!(fps > 0, "FPS must be greater than 0");
        Self {
            period: Duration::from_secs(1) / fps,
            last_tick: None,
        }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait until one period has passed since the previous tick and return
    /// the time actually elapsed. The first call returns immediately.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = match self.last_tick {
            Some(last) => {
                let busy = now.duration_since(last);
                if busy < self.period {
                    std::thread::sleep(self.period - busy);
                }
                last.elapsed()
            }
            None => Duration::ZERO,
        };
        self.last_tick = Some(Instant::now());
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_is_bgr() {
        let scalar: Scalar = Color::rgb(1, 2, 3).into();
        assert_eq!(scalar, Scalar::new(3.0, 2.0, 1.0, 0.0));
    }

    #[test]
    fn test_quit_keys_close() {
        assert_eq!(WindowEvent::from_key(-1), None);
        assert_eq!(WindowEvent::from_key(27), Some(WindowEvent::CloseRequested));
        assert_eq!(WindowEvent::from_key(i32::from(b'q')), Some(WindowEvent::CloseRequested));
        assert_eq!(WindowEvent::from_key(i32::from(b'a')), Some(WindowEvent::KeyPressed(97)));
        assert_eq!(WindowEvent::from_key(0x10_0000 | 27), Some(WindowEvent::CloseRequested));
    }

    #[test]
    fn test_limiter_period() {
        assert_eq!(FrameLimiter::new(30).period(), Duration::from_secs(1) / 30);
    }

    #[test]
    fn test_limiter_enforces_minimum_period() {
        let mut limiter = FrameLimiter::new(100);
        assert_eq!(limiter.tick(), Duration::ZERO);
        let start = Instant::now();
        let elapsed = limiter.tick();
        assert!(elapsed >= Duration::from_millis(10));
        assert!(start.elapsed() >= Duration::from_millis(9));
    }

    fn pixel(canvas: &MatCanvas, x: i32, y: i32) -> (u8, u8, u8) {
        let bgr = *canvas.image().at_2d::<opencv::core::Vec3b>(y, x).unwrap();
        (bgr[2], bgr[1], bgr[0])
    }

    fn near(actual: (u8, u8, u8), color: Color, tolerance: u8) -> bool {
        actual.0.abs_diff(color.r) <= tolerance
            && actual.1.abs_diff(color.g) <= tolerance
            && actual.2.abs_diff(color.b) <= tolerance
    }

    fn default_face() -> MatCanvas {
        let scene = crate::scene::Scene::from_config(&crate::config::Config::default());
        let (width, height) = scene.size();
        let mut canvas = MatCanvas::new(width, height).unwrap();
        canvas.render(&scene.compose(crate::position::NormalizedPosition::CENTER)).unwrap();
        canvas
    }

    #[test]
    fn test_mouth_arc_curves_along_top_of_its_box() {
        use crate::scene::{HEAD, MOUTH};
        let canvas = default_face();

        // Mouth box spans y 250..310 around x = 320
        let top = (247..=253).any(|y| near(pixel(&canvas, 320, y), MOUTH, 8));
        assert!(top, "mouth arc should cross the top of its box");
        for y in 303..=313 {
            assert!(near(pixel(&canvas, 320, y), HEAD, 0), "row {y} should be plain head");
        }
    }

    #[test]
    fn test_caption_hangs_below_its_origin() {
        use crate::scene::{BACKGROUND, CAPTION};
        let canvas = default_face();

        // Caption origin is the top-left corner at (10, 450)
        let in_caption_row = (450..466).any(|y| (10..200).any(|x| near(pixel(&canvas, x, y), CAPTION, 40)));
        assert!(in_caption_row, "caption glyphs should start at row 450");
        for y in 420..447 {
            for x in 0..200 {
                assert!(near(pixel(&canvas, x, y), BACKGROUND, 0), "pixel ({x}, {y}) above the caption");
            }
        }
    }

    #[test]
    fn test_canvas_fill_and_circle() {
        let mut canvas = MatCanvas::new(64, 48).unwrap();
        let center = crate::scene::Point::new(32, 24);
        canvas
            .render(&[
                DrawCommand::Fill(Color::rgb(10, 20, 30)),
                DrawCommand::Circle {
                    center,
                    radius: 5,
                    color: Color::rgb(200, 100, 50),
                },
            ])
            .unwrap();

        let corner = *canvas.image().at_2d::<opencv::core::Vec3b>(0, 0).unwrap();
        assert_eq!((corner[0], corner[1], corner[2]), (30, 20, 10));
        let middle = *canvas.image().at_2d::<opencv::core::Vec3b>(24, 32).unwrap();
        assert_eq!((middle[0], middle[1], middle[2]), (50, 100, 200));
    }
}
