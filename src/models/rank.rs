//! Summary cards of the rankings screen

use serde::{Deserialize, Serialize};

use super::compute::HistComputeResponse;
use crate::utils::round_to;

pub const ESS_ADEQUATE: f64 = 30.0;
pub const BSS_SUCCESS: f64 = -0.05;

/// Where the replaced player falls among the ranked candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankCategory {
    Pending,
    Top,
    Mid,
    Bottom,
}

impl RankCategory {
    /// Classify a `current / total` percentile; lower is better
    pub fn from_percentile(percentile: Option<f64>) -> Self {
        match percentile {
            None => Self::Pending,
            Some(p) if p <= 0.30 => Self::Top,
            Some(p) if p >= 0.60 => Self::Bottom,
            Some(_) => Self::Mid,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Top => "Top 30%",
            Self::Mid => "Mid Range",
            Self::Bottom => "Bottom 40%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankSummary {
    /// 1-based
    pub current: Option<usize>,
    pub total: usize,
}

impl RankSummary {
    pub fn from_response(resp: &HistComputeResponse) -> Self {
        let total = resp.composite_scores.len();
        let current = match resp.rank {
            Some(rank) if total > 0 && rank >= 0 => usize::try_from(rank).ok().map(|r| r + 1),
            _ => None,
        };
        Self { current, total }
    }

    pub fn text(&self) -> String {
        match self.current {
            Some(current) => format!("{}/{}", current, self.total),
            None => "--/--".to_string(),
        }
    }

    pub fn percentile(&self) -> Option<f64> {
        match self.current {
            Some(current) if self.total > 0 => Some(current as f64 / self.total as f64),
            _ => None,
        }
    }

    pub fn category(&self) -> RankCategory {
        RankCategory::from_percentile(self.percentile())
    }

    /// Share of candidates ranked below, e.g. `"80.0%"`
    pub fn percentile_text(&self) -> String {
        match self.percentile() {
            Some(p) => format!("{:.1}%", (1.0 - p) * 100.0),
            None => "--%".to_string(),
        }
    }
}

/// Effective sample size check
pub fn ess_adequate(ess: f64) -> bool {
    ess > ESS_ADEQUATE
}

/// Brier skill score check
pub fn bss_success(bss: f64) -> bool {
    bss > BSS_SUCCESS
}

/// Card value shown for ESS/BSS
pub fn score_text(value: f64) -> String {
    round_to(value, 3).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::compute::CompositeScore;

    fn response(rank: Option<i64>, candidates: usize) -> HistComputeResponse {
        HistComputeResponse {
            rank,
            composite_scores: vec![CompositeScore::default(); candidates],
            ..Default::default()
        }
    }

    #[test]
    fn rank_text_is_one_based() {
        let summary = RankSummary::from_response(&response(Some(2), 10));
        assert_eq!(summary.text(), "3/10");
        assert_eq!(summary.category(), RankCategory::Top);
        assert_eq!(summary.percentile_text(), "70.0%");
    }

    #[test]
    fn rank_placeholder_without_candidates_or_rank() {
        assert_eq!(RankSummary::from_response(&response(Some(0), 0)).text(), "--/--");
        let summary = RankSummary::from_response(&response(None, 5));
        assert_eq!(summary.text(), "--/--");
        assert_eq!(summary.category(), RankCategory::Pending);
        assert_eq!(summary.percentile_text(), "--%");
    }

    #[test]
    fn categories_follow_thresholds() {
        assert_eq!(RankCategory::from_percentile(Some(0.30)), RankCategory::Top);
        assert_eq!(RankCategory::from_percentile(Some(0.45)), RankCategory::Mid);
        assert_eq!(RankCategory::from_percentile(Some(0.60)).label(), "Bottom 40%");
    }

    #[test]
    fn sample_quality_thresholds_are_strict() {
        assert!(!ess_adequate(30.0));
        assert!(ess_adequate(30.5));
        assert!(!bss_success(-0.05));
        assert!(bss_success(-0.049));
        assert_eq!(score_text(42.12345), "42.123");
    }
}
