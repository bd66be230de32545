//! Tick accounting for the loop.

/// Accepted/skipped tick counters.
///
/// The first accepted tick of a run measures from zero rather than from a
/// previous tick, so it is counted but kept out of the delta figures.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickStats {
    /// Ticks that fired `loop`.
    pub accepted: u64,
    /// Ticks that arrived before the frame interval elapsed.
    pub skipped: u64,
    /// Accepted ticks that contributed a measured delta.
    pub measured: u64,
    /// Smallest measured delta (ms).
    pub min_delta_ms: f64,
    /// Largest measured delta (ms).
    pub max_delta_ms: f64,
    /// Sum of measured deltas (ms).
    pub total_delta_ms: f64,
}

impl TickStats {
    /// Creates empty counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accepted: 0,
            skipped: 0,
            measured: 0,
            min_delta_ms: f64::INFINITY,
            max_delta_ms: 0.0,
            total_delta_ms: 0.0,
        }
    }

    /// Records the first accepted tick of a run.
    pub fn record_first(&mut self) {
        self.accepted += 1;
    }

    /// Records an accepted tick with its delta.
    pub fn record_accepted(&mut self, delta_ms: f64) {
        self.accepted += 1;
        self.measured += 1;
        self.total_delta_ms += delta_ms;
        self.min_delta_ms = self.min_delta_ms.min(delta_ms);
        self.max_delta_ms = self.max_delta_ms.max(delta_ms);
    }

    /// Records a tick that was throttled away.
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Average measured delta in milliseconds.
    #[must_use]
    pub fn avg_delta_ms(&self) -> f64 {
        if self.measured == 0 {
            return 0.0;
        }
        self.total_delta_ms / self.measured as f64
    }

    /// Effective `loop` rate in ticks per second.
    #[must_use]
    pub fn effective_rate(&self) -> f64 {
        let avg = self.avg_delta_ms();
        if avg <= 0.0 {
            return 0.0;
        }
        1000.0 / avg
    }

    /// Fraction of host callbacks that were throttled away.
    #[must_use]
    pub fn skip_ratio(&self) -> f64 {
        let total = self.accepted + self.skipped;
        if total == 0 {
            return 0.0;
        }
        self.skipped as f64 / total as f64
    }
}

impl Default for TickStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = TickStats::new();
        assert_eq!(stats.avg_delta_ms(), 0.0);
        assert_eq!(stats.effective_rate(), 0.0);
        assert_eq!(stats.skip_ratio(), 0.0);
    }

    #[test]
    fn test_first_tick_not_measured() {
        let mut stats = TickStats::new();
        stats.record_first();
        stats.record_accepted(40.0);
        stats.record_accepted(30.0);

        assert_eq!(stats.accepted, 3);
        assert_eq!(stats.measured, 2);
        assert_eq!(stats.min_delta_ms, 30.0);
        assert_eq!(stats.max_delta_ms, 40.0);
        assert!((stats.avg_delta_ms() - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_rates() {
        let mut stats = TickStats::new();
        for _ in 0..10 {
            stats.record_accepted(40.0);
            stats.record_skipped();
            stats.record_skipped();
            stats.record_skipped();
        }

        assert!((stats.effective_rate() - 25.0).abs() < 1e-9);
        assert!((stats.skip_ratio() - 0.75).abs() < 1e-9);
    }
}
