use chrono::Utc;

/// Milliseconds since the Unix epoch
pub fn get_current_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Synthetic private-range origin address for mock WAF logs
pub fn format_origin(third: u8, fourth: u8) -> String {
    format!("192.168.{}.{}", third, fourth)
}

/// Clamp `value` into `0..=max` and snap it down to a multiple of `step`
pub fn snap_to_step(value: i64, max: u32, step: u32) -> u32 {
    let clamped = value.clamp(0, max as i64) as u32;
    if step <= 1 {
        clamped
    } else {
        clamped - clamped % step
    }
}
