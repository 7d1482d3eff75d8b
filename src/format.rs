//! Time formatting shared by the history list, the live readout and the
//! statistics panel.
//!
//! Values are rounded to whole hundredths once and then split, so `59.999`
//! renders as a full minute rather than `0:60.00`.

/// Shown for aggregates that have no data yet
pub const PLACEHOLDER: &str = "--:--";
/// Shown for did-not-finish values
pub const DNF: &str = "DNF";

fn split_hundredths(seconds: f64) -> (u64, u64, u64) {
    let total = (seconds.max(0.0) * 100.0).round() as u64;
    (total / 6000, (total % 6000) / 100, total % 100)
}

/// `M:SS.hh`, used for individual solves
pub fn solve_time(seconds: f64) -> String {
    if seconds.is_infinite() {
        return DNF.to_string();
    }
    let (minutes, secs, hundredths) = split_hundredths(seconds);
    format!("{minutes}:{secs:02}.{hundredths:02}")
}

/// `MM:SS.hh`, used for the running clock and aggregates
pub fn clock_time(seconds: f64) -> String {
    if seconds.is_infinite() {
        return DNF.to_string();
    }
    let (minutes, secs, hundredths) = split_hundredths(seconds);
    format!("{minutes:02}:{secs:02}.{hundredths:02}")
}

/// Aggregate value: placeholder when absent, `DNF` when infinite
pub fn stat(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_nan() => PLACEHOLDER.to_string(),
        Some(v) => clock_time(v),
        None => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solve_time_pads_seconds_only() {
        assert_eq!(solve_time(12.34), "0:12.34");
        assert_eq!(solve_time(5.0), "0:05.00");
        assert_eq!(solve_time(83.456), "1:23.46");
        assert_eq!(solve_time(0.0), "0:00.00");
    }

    #[test]
    fn clock_time_pads_minutes() {
        assert_eq!(clock_time(9.5), "00:09.50");
        assert_eq!(clock_time(754.2), "12:34.20");
    }

    #[test]
    fn rounding_carries_into_minutes() {
        assert_eq!(solve_time(59.999), "1:00.00");
        assert_eq!(clock_time(119.996), "02:00.00");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(solve_time(f64::INFINITY), "DNF");
        assert_eq!(clock_time(f64::INFINITY), "DNF");
        assert_eq!(stat(Some(f64::INFINITY)), "DNF");
        assert_eq!(stat(None), "--:--");
        assert_eq!(stat(Some(f64::NAN)), "--:--");
    }
}
