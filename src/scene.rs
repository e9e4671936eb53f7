//! Cat face layout and pupil placement.
//!
//! [`Scene::compose`] turns a smoothed face position into an ordered display
//! list. Nothing here talks to a window; see [`crate::render`] for the
//! backend that executes the list.

use crate::config::Config;
use crate::constants::{
    EYE_Y_FRACTION, HORIZONTAL_TRAVEL_GAIN, LEFT_EYE_X_FRACTION, RIGHT_EYE_X_FRACTION, VERTICAL_TRAVEL_GAIN,
};
use crate::position::NormalizedPosition;
use crate::utils::safe_cast::f64_to_i32_trunc;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Palette
pub const BACKGROUND: Color = Color::rgb(250, 240, 245);
pub const HEAD: Color = Color::rgb(255, 230, 240);
pub const EYE_WHITE: Color = Color::rgb(255, 255, 255);
pub const PUPIL: Color = Color::rgb(30, 30, 30);
pub const HIGHLIGHT: Color = Color::rgb(255, 255, 255);
pub const BLUSH: Color = Color::rgb(255, 180, 200);
pub const MOUTH: Color = Color::rgb(120, 50, 70);
pub const CAPTION: Color = Color::rgb(80, 80, 90);

/// Integer pixel position, y pointing down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Bounding box of an ellipse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// One primitive of the display list
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand<'a> {
    /// Paint the whole canvas
    Fill(Color),
    /// Filled circle
    Circle { center: Point, radius: i32, color: Color },
    /// Elliptical arc inside `bounds`. Angles are in degrees, counter-clockwise
    /// from the +x axis as seen on screen.
    Arc {
        bounds: Bounds,
        start_deg: f64,
        end_deg: f64,
        color: Color,
        thickness: i32,
    },
    /// Text whose top-left corner sits at `origin`
    Text { text: &'a str, origin: Point, color: Color },
}

/// Fixed eye layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeGeometry {
    pub left_center: Point,
    pub right_center: Point,
    pub eye_radius: i32,
    pub pupil_radius: i32,
    pub pupil_margin: i32,
}

impl EyeGeometry {
    /// Place both eyes on a screen of the given size
    #[must_use]
    pub fn for_screen(width: i32, height: i32, eye_radius: i32, pupil_radius: i32, pupil_margin: i32) -> Self {
        let eye_y = f64_to_i32_trunc(f64::from(height) * EYE_Y_FRACTION);
        Self {
            left_center: Point::new(f64_to_i32_trunc(f64::from(width) * LEFT_EYE_X_FRACTION), eye_y),
            right_center: Point::new(f64_to_i32_trunc(f64::from(width) * RIGHT_EYE_X_FRACTION), eye_y),
            eye_radius,
            pupil_radius,
            pupil_margin,
        }
    }

    /// Furthest the pupil center may move from the eye center
    #[must_use]
    pub fn max_travel(&self) -> f64 {
        f64::from(self.eye_radius - self.pupil_radius - self.pupil_margin)
    }

    /// Pupil centers for both eyes
    #[must_use]
    pub fn pupils(&self, smoothed: NormalizedPosition) -> (Point, Point) {
        let max_travel = self.max_travel();
        (
            pupil_center(self.left_center, smoothed, max_travel),
            pupil_center(self.right_center, smoothed, max_travel),
        )
    }
}

/// Pupil displacement from the eye center, in pixels.
///
/// Zero at the center position; horizontal travel is amplified more than
/// vertical.
#[must_use]
pub fn pupil_offset(smoothed: NormalizedPosition, max_travel: f64) -> (f64, f64) {
    (
        (smoothed.x - 0.5) * max_travel * HORIZONTAL_TRAVEL_GAIN,
        (smoothed.y - 0.5) * max_travel * VERTICAL_TRAVEL_GAIN,
    )
}

/// Pupil center on screen, truncated toward zero to whole pixels.
#[must_use]
pub fn pupil_center(eye_center: Point, smoothed: NormalizedPosition, max_travel: f64) -> Point {
    let (dx, dy) = pupil_offset(smoothed, max_travel);
    Point::new(
        f64_to_i32_trunc(f64::from(eye_center.x) + dx),
        f64_to_i32_trunc(f64::from(eye_center.y) + dy),
    )
}

const HEAD_RADIUS: i32 = 170;
const HIGHLIGHT_OFFSET: (i32, i32) = (-4, -4);
const HIGHLIGHT_RADIUS: i32 = 4;
const BLUSH_OFFSET: (i32, i32) = (55, 30);
const BLUSH_RADIUS: i32 = 18;
const MOUTH_BOX: Bounds = Bounds {
    x: -40,
    y: 10,
    width: 80,
    height: 60,
};
const MOUTH_SWEEP_DEG: (f64, f64) = (20.0, 160.0);
const MOUTH_THICKNESS: i32 = 3;
const CAPTION_MARGIN: (i32, i32) = (10, 30);

/// Everything needed to draw one frame apart from the pupil position
#[derive(Debug, Clone)]
pub struct Scene {
    width: i32,
    height: i32,
    eyes: EyeGeometry,
    caption: String,
}

impl Scene {
    #[must_use]
    pub fn new(width: i32, height: i32, eyes: EyeGeometry, caption: impl Into<String>) -> Self {
        Self {
            width,
            height,
            eyes,
            caption: caption.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let display = &config.display;
        let eyes = EyeGeometry::for_screen(
            display.width,
            display.height,
            config.eyes.eye_radius,
            config.eyes.pupil_radius,
            config.eyes.pupil_margin,
        );
        Self::new(display.width, display.height, eyes, display.caption.clone())
    }

    #[must_use]
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn eyes(&self) -> &EyeGeometry {
        &self.eyes
    }

    /// Display list for one frame, back to front.
    #[must_use]
    pub fn compose(&self, smoothed: NormalizedPosition) -> Vec<DrawCommand<'_>> {
        let center = Point::new(self.width / 2, self.height / 2);
        let eyes = &self.eyes;
        let (left_pupil, right_pupil) = eyes.pupils(smoothed);
        let circle = |center, radius, color| DrawCommand::Circle { center, radius, color };

        vec![
            DrawCommand::Fill(BACKGROUND),
            circle(center, HEAD_RADIUS, HEAD),
            circle(eyes.left_center, eyes.eye_radius, EYE_WHITE),
            circle(eyes.right_center, eyes.eye_radius, EYE_WHITE),
            circle(left_pupil, eyes.pupil_radius, PUPIL),
            circle(right_pupil, eyes.pupil_radius, PUPIL),
            circle(left_pupil.offset(HIGHLIGHT_OFFSET.0, HIGHLIGHT_OFFSET.1), HIGHLIGHT_RADIUS, HIGHLIGHT),
            circle(right_pupil.offset(HIGHLIGHT_OFFSET.0, HIGHLIGHT_OFFSET.1), HIGHLIGHT_RADIUS, HIGHLIGHT),
            circle(center.offset(-BLUSH_OFFSET.0, BLUSH_OFFSET.1), BLUSH_RADIUS, BLUSH),
            circle(center.offset(BLUSH_OFFSET.0, BLUSH_OFFSET.1), BLUSH_RADIUS, BLUSH),
            DrawCommand::Arc {
                bounds: Bounds {
                    x: center.x + MOUTH_BOX.x,
                    y: center.y + MOUTH_BOX.y,
                    ..MOUTH_BOX
                },
                start_deg: MOUTH_SWEEP_DEG.0,
                end_deg: MOUTH_SWEEP_DEG.1,
                color: MOUTH,
                thickness: MOUTH_THICKNESS,
            },
            DrawCommand::Text {
                text: &self.caption,
                origin: Point::new(CAPTION_MARGIN.0, self.height - CAPTION_MARGIN.1),
                color: CAPTION,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_geometry(max_travel: i32) -> EyeGeometry {
        EyeGeometry {
            left_center: Point::new(100, 100),
            right_center: Point::new(300, 100),
            eye_radius: max_travel + 18,
            pupil_radius: 14,
            pupil_margin: 4,
        }
    }

    #[test]
    fn test_default_layout_matches_screen_fractions() {
        let eyes = EyeGeometry::for_screen(640, 480, 40, 14, 4);
        assert_eq!(eyes.left_center, Point::new(211, 216));
        assert_eq!(eyes.right_center, Point::new(422, 216));
        assert_eq!(eyes.max_travel(), 22.0);
    }

    #[test]
    fn test_pupil_centered_at_dead_center() {
        let eyes = test_geometry(20);
        assert_eq!(eyes.max_travel(), 20.0);
        let (left, _) = eyes.pupils(NormalizedPosition::CENTER);
        assert_eq!(left, Point::new(100, 100));
    }

    #[test]
    fn test_pupil_offset_at_clamp_edge() {
        let (dx, dy) = pupil_offset(NormalizedPosition::new(0.85, 0.5), 20.0);
        assert!((dx - 12.6).abs() < 1e-9);
        assert_eq!(dy, 0.0);
    }

    #[test]
    fn test_vertical_travel_is_smaller() {
        let (dx, dy) = pupil_offset(NormalizedPosition::new(0.8, 0.8), 20.0);
        assert!(dx > dy);
        assert!((dy - 7.2).abs() < 1e-9);
    }

    #[test]
    fn test_pupil_center_truncates_toward_zero() {
        // 100 + 12.6 -> 112, 100 - 3.6 -> 96
        let p = pupil_center(Point::new(100, 100), NormalizedPosition::new(0.85, 0.35), 20.0);
        assert_eq!(p, Point::new(112, 96));
    }

    #[test]
    fn test_both_pupils_move_together() {
        let eyes = test_geometry(20);
        let (left, right) = eyes.pupils(NormalizedPosition::new(0.2, 0.7));
        assert_eq!(right.x - left.x, 200);
        assert_eq!(right.y, left.y);
    }
}
