//! Per-run counters.

use std::path::PathBuf;

/// Outcome counts of one sweep. Lives for a single invocation only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Source bytes of the updated files.
    pub bytes_in: u64,
    /// WebP bytes written for the updated files.
    pub bytes_out: u64,
    pub errors: Vec<(PathBuf, String)>,
}

impl SweepSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_updated(&mut self, source_bytes: u64, derived_bytes: u64) {
        self.updated += 1;
        self.bytes_in += source_bytes;
        self.bytes_out += derived_bytes;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn record_failed(&mut self, source: PathBuf, reason: String) {
        self.failed += 1;
        self.errors.push((source, reason));
    }

    pub fn total(&self) -> usize {
        self.updated + self.skipped + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_new_is_empty() {
        let summary = SweepSummary::new();
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.failed, 0);
        assert!(summary.errors.is_empty());
    }

    #[test]
    fn test_summary_mixed() {
        let mut summary = SweepSummary::new();
        summary.record_updated(1000, 400);
        summary.record_updated(500, 100);
        summary.record_skipped();
        summary.record_failed(PathBuf::from("c.jpeg"), "bad header".to_string());

        assert_eq!(summary.updated, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.bytes_in, 1500);
        assert_eq!(summary.bytes_out, 500);
        assert_eq!(
            summary.total(),
            summary.updated + summary.skipped + summary.failed,
            "STRICT: total must equal updated + skipped + failed"
        );
        assert_eq!(summary.errors[0].0, PathBuf::from("c.jpeg"));
        assert_eq!(summary.errors[0].1, "bad header");
    }
}
