/// Default stick dead zone radius
pub const DEFAULT_DEAD_ZONE: f32 = 0.15;

/// Remaps a raw stick component so that everything inside `[-zone, zone]` is
/// zero and the remaining travel is stretched back onto the full `[-1, 1]`
/// range.
///
/// Sticks rarely return to an exact center when released; without this a
/// small residual value makes game objects drift.
pub fn adjust(raw: f32, zone: f32) -> f32 {
    if raw > zone {
        (raw - zone) / (1.0 - zone)
    } else if raw < -zone {
        (raw + zone) / (1.0 - zone)
    } else {
        0.0
    }
}
