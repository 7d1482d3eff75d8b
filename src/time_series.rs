use crate::session::SolveSession;

/// One point on the solve trend chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    /// 1-based solve number
    pub solve: f64,
    /// effective time in seconds
    pub secs: f64,
}

impl TrendPoint {
    pub fn new(solve: f64, secs: f64) -> Self {
        Self { solve, secs }
    }
}

impl From<TrendPoint> for (f64, f64) {
    fn from(p: TrendPoint) -> Self {
        (p.solve, p.secs)
    }
}

/// Effective times by solve number; DNFs keep their slot but are not plotted
pub fn trend(session: &SolveSession) -> Vec<TrendPoint> {
    session
        .effective_times()
        .enumerate()
        .filter(|(_, secs)| secs.is_finite())
        .map(|(i, secs)| TrendPoint::new((i + 1) as f64, secs))
        .collect()
}
