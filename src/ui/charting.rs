use crate::time_series::TrendPoint;

/// X and Y bounds for the trend chart: x spans `[0, solves + 1]`, y hugs
/// the plotted times with some headroom, or `[0, 10]` with nothing to plot.
pub fn compute_chart_bounds(points: &[TrendPoint], solves: usize) -> ([f64; 2], [f64; 2]) {
    let x = [0.0, (solves + 1) as f64];

    let lowest = points.iter().map(|p| p.secs).reduce(f64::min);
    let highest = points.iter().map(|p| p.secs).reduce(f64::max);
    let y = match (lowest, highest) {
        (Some(lo), Some(hi)) if hi > 0.0 => [(lo * 0.8).max(0.0), hi * 1.2],
        _ => [0.0, 10.0],
    };

    (x, y)
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
