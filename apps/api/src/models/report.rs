use serde::{Deserialize, Serialize};

/// Keyword coverage of the resume before and after tailoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsReport {
    pub original_score: f64, // 0 – 100
    pub tailored_score: f64, // 0 – 100
    /// tailored − original, signed, 2 decimals.
    pub improvement: f64,
    /// First 20 JD keywords in ascending order.
    pub jd_keywords: Vec<String>,
}

impl AtsReport {
    /// One-line comparison for logs and CLI output.
    pub fn summary_line(&self) -> String {
        format!(
            "Original {}% → Tailored {}% ({:+}%)",
            self.original_score, self.tailored_score, self.improvement
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line_shows_signed_improvement() {
        let report = AtsReport {
            original_score: 50.0,
            tailored_score: 100.0,
            improvement: 50.0,
            jd_keywords: vec![],
        };
        assert_eq!(report.summary_line(), "Original 50% → Tailored 100% (+50%)");

        let regressed = AtsReport {
            original_score: 66.67,
            tailored_score: 33.33,
            improvement: -33.34,
            jd_keywords: vec![],
        };
        assert!(regressed.summary_line().ends_with("(-33.34%)"));
    }
}
