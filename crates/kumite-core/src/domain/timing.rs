//! Clock constants and display helpers.

/// Fixed tick granularity of the countdown.
pub const TICK_INTERVAL_MS: u64 = 10;

/// Atoshi baraku fires when the clock drops below this.
pub const WARNING_THRESHOLD_MS: u64 = 15_000;

/// Renders `MM:SS.cc` (centiseconds).
pub fn format_clock(remaining_ms: u64) -> String {
    let total_secs = remaining_ms / 1000;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    let centis = (remaining_ms % 1000) / 10;
    format!("{mins:02}:{secs:02}.{centis:02}")
}

/// True when the displayed whole seconds (rounded up) are 15 or fewer.
pub fn in_warning_zone(remaining_ms: u64) -> bool {
    remaining_ms.div_ceil(1000) <= WARNING_THRESHOLD_MS / 1000
}
