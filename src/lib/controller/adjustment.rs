//! Speed adjustment curves for the proportional controller.
//!
//! All curves are linear in the error magnitude. The capped curves saturate
//! once the distance implied by the error crosses a capping distance, so the
//! output never grows past the value at the cap.

use libm::fabsf;

fn magnitude(dist_error: i32) -> f32 {
    dist_error.unsigned_abs() as f32
}

/// `gain * |error|`, unbounded.
pub fn linear(gain: f32, dist_error: i32) -> f32 {
    gain * magnitude(dist_error)
}

/// Linear curve for the too-close regime, pinned once the measured distance
/// (`target - error`) is at or below `min_cap_cm`.
pub fn capped_close(gain: f32, target_cm: i32, min_cap_cm: i32, dist_error: i32) -> f32 {
    let distance = target_cm.saturating_sub(dist_error);
    if distance <= min_cap_cm {
        return fabsf(gain * min_cap_cm.saturating_sub(target_cm) as f32);
    }
    linear(gain, dist_error)
}

/// Linear curve for the too-far regime, pinned once `target + |error|` is at
/// or beyond `max_cap_cm`.
pub fn capped_far(gain: f32, target_cm: i32, max_cap_cm: i32, dist_error: i32) -> f32 {
    let distance = target_cm as i64 + dist_error.unsigned_abs() as i64;
    if distance >= max_cap_cm as i64 {
        let span = max_cap_cm.saturating_sub(target_cm).max(0);
        return gain * span as f32;
    }
    linear(gain, dist_error)
}
