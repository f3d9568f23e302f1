/// Wrap an angle into `[0, 360)` with a single add/subtract of 360.
///
/// Only correct when `degrees` is within one turn of the range, which holds
/// for bounded per-frame deltas. Use [`wrap_degrees`] for arbitrary input.
pub fn wrap_degrees_once(degrees: f32) -> f32 {
    if degrees >= 360.0 {
        degrees - 360.0
    } else if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

/// Wrap any finite angle into `[0, 360)`.
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
