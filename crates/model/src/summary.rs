use serde::{Deserialize, Serialize};

/// Per-collection result produced by the driver once a collection finishes.
///
/// `total` is expected to equal the sum of the five outcome counters, but
/// the reporter renders whatever it is handed; the driver owns that
/// invariant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImportSummary {
    pub total: u64,
    pub already_imported: u64,
    pub redundant: u64,
    pub invalid: u64,
    pub skipped: u64,
    pub created: u64,
    pub elapsed_ms: f64,
    pub average_ms: f64,
}

impl ImportSummary {
    /// Stamps the elapsed time and derives the per-record average.
    pub fn with_elapsed(mut self, elapsed_ms: f64) -> Self {
        self.elapsed_ms = elapsed_ms;
        self.average_ms = if self.total > 0 {
            elapsed_ms / self.total as f64
        } else {
            0.0
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_elapsed_derives_average() {
        let summary = ImportSummary {
            total: 4,
            created: 3,
            invalid: 1,
            ..Default::default()
        }
        .with_elapsed(1000.0);

        assert_eq!(summary.elapsed_ms, 1000.0);
        assert_eq!(summary.average_ms, 250.0);
    }

    #[test]
    fn test_with_elapsed_empty_collection() {
        let summary = ImportSummary::default().with_elapsed(12.5);
        assert_eq!(summary.elapsed_ms, 12.5);
        assert_eq!(summary.average_ms, 0.0);
    }
}
