//! Result record type.

/// Column names of the results table, in output order.
pub const CSV_HEADER: [&str; 4] = ["K", "DistanceThreshold", "DistanceExponent", "CorrectCount"];

/// Correct-prediction count for one `(k, threshold, exponent)` triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultRecord {
    /// Number of neighbors.
    pub k: usize,
    /// Per-dimension distance-ignore threshold.
    pub threshold: f32,
    /// Distance exponent.
    pub exponent: f32,
    /// Test examples classified correctly.
    pub correct: usize,
}

impl ResultRecord {
    /// Formats the record as CSV fields, reals to six decimals.
    pub fn to_fields(&self) -> [String; 4] {
        [
            self.k.to_string(),
            format!("{:.6}", self.threshold),
            format!("{:.6}", self.exponent),
            self.correct.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_use_six_decimals() {
        let r = ResultRecord {
            k: 3,
            threshold: 0.25,
            exponent: 2.0,
            correct: 917,
        };
        assert_eq!(r.to_fields(), ["3", "0.250000", "2.000000", "917"]);
    }
}
