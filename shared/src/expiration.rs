/// Formats an expiration window as a single, floor-divided unit, e.g. "24 hours" or "1 day".
///
/// Values below a minute always read "seconds", "1 seconds" included.
pub fn format_expiration_time(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{} seconds", seconds);
    }

    let (count, unit) = match seconds {
        s if s < 3600 => (s / 60, "minute"),
        s if s < 86400 => (s / 3600, "hour"),
        s => (s / 86400, "day"),
    };

    format!("{} {}{}", count, unit, if count == 1 { "" } else { "s" })
}
