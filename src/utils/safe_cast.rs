//! Float to pixel conversions that cannot overflow

/// Truncate toward zero and saturate at the `i32` range.
///
/// Non-finite input maps to 0 so a bad coordinate can never panic a draw call.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Truncation is the point
pub fn f64_to_i32_trunc(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    // `as` saturates for out-of-range floats
    value.trunc() as i32
}

/// Clamp and convert f64 to i32 for pixel coordinates
#[must_use]
pub fn f64_to_i32_clamp(value: f64, min: i32, max: i32) -> i32 {
    // Ensure min <= max
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    f64_to_i32_trunc(value).clamp(min, max)
}
