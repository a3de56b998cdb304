//! Wall-clock seconds that work both natively and in the browser.

#[cfg(all(test, not(target_arch = "wasm32")))]
#[path = "clock_test.rs"]
mod clock_test;

/// Current Unix time in whole seconds.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn now_secs() -> i64 {
    unix_secs(std::time::SystemTime::now())
}

/// Whole seconds since the epoch. Clocks set before 1970 read as `0`.
#[cfg(not(target_arch = "wasm32"))]
fn unix_secs(at: std::time::SystemTime) -> i64 {
    at.duration_since(std::time::UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_secs()).ok())
        .unwrap_or(0)
}

/// Current Unix time in whole seconds.
#[cfg(target_arch = "wasm32")]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn now_secs() -> i64 {
    (js_sys::Date::now() / 1000.0).max(0.0) as i64
}
