//! Payloads returned by the statistics compute API

use serde::{Deserialize, Serialize};

use crate::grid::{CellValue, Column, WidthHint};
use crate::utils::{fixed, ratio_percent};

/// Style and fit stats
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FsStats {
    pub usg_percent: f64,
    #[serde(rename = "threeRate")]
    pub three_rate: f64,
    pub ast_fga: f64,
    pub fga_per100: f64,
    pub ftr: f64,
    #[serde(rename = "rimRate")]
    pub rim_rate: f64,
    #[serde(rename = "midRate")]
    pub mid_rate: f64,
}

/// Value-over-comparable-benchmark-player stats
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocbpStats {
    pub ast_percent: f64,
    pub oreb_percent: f64,
    pub dreb_percent: f64,
    pub ft_percent: f64,
    pub stl_percent: f64,
    pub blk_percent: f64,
    pub ts_percent: f64,
}

/// Success stats; only the first four are always reported
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuccStats {
    pub ts_percent: f64,
    pub porpag: f64,
    pub dporpag: f64,
    pub dreb_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ast_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oreb_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stl_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blk_percent: Option<f64>,
}

/// One ranked replacement candidate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub player_name: String,
    pub sim_score: f64,
    pub prev_team_name: String,
    pub vocbp_raw: f64,
    pub sos_adj_factor: f64,
    pub sos_z: f64,
    pub vocbp: f64,
    pub fit_z: f64,
    pub value_z: f64,
    pub comp_raw: f64,
    /// 0..1
    pub fit_pct: f64,
    /// 0..1
    pub value_pct: f64,
    /// 0..1
    pub composite_pct: f64,
    #[serde(rename = "comp_T")]
    pub comp_t: f64,
}

impl CompositeScore {
    /// Columns of the composite ranking table
    pub fn columns() -> Vec<Column<CompositeScore>> {
        fn score(key: &str, header: &str, decimals: usize, get: fn(&CompositeScore) -> f64) -> Column<CompositeScore> {
            Column::new(key, header, move |s: &CompositeScore| {
                let v = get(s);
                Some(CellValue::formatted(fixed(v, decimals), v))
            })
            .sortable()
            .numeric()
            .width(WidthHint::Flex(1))
        }

        vec![
            Column::value("player_name", "Name", |s: &CompositeScore| s.player_name.clone())
                .sortable()
                .width(WidthHint::Flex(2)),
            Column::value("prev_team_name", "Previous Team", |s: &CompositeScore| s.prev_team_name.clone())
                .sortable()
                .width(WidthHint::Flex(2)),
            score("sos_adj_factor", "SOS Adj", 3, |s| s.sos_adj_factor),
            score("sim_score", "Fit Score", 3, |s| s.sim_score),
            score("vocbp", "VOCBP", 3, |s| s.vocbp),
            score("comp_raw", "RVI", 3, |s| s.comp_raw),
            Column::new("composite_pct", "Composite %", |s: &CompositeScore| {
                Some(CellValue::formatted(ratio_percent(s.composite_pct), s.composite_pct))
            })
            .sortable()
            .numeric()
            .width(WidthHint::Flex(1)),
            score("comp_t", "T Score", 1, |s| s.comp_t),
        ]
    }
}

/// `/histcompute` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistComputeResponse {
    pub fs_bmark: FsStats,
    #[serde(default)]
    pub fs_bmark_scaled: Option<FsStats>,
    pub fs_plyr: FsStats,
    #[serde(default)]
    pub fs_plyr_scaled: Option<FsStats>,
    pub vocbp_bmark: VocbpStats,
    #[serde(default)]
    pub vocbp_bmark_scaled: Option<VocbpStats>,
    pub vocbp_plyr: VocbpStats,
    #[serde(default)]
    pub vocbp_plyr_scaled: Option<VocbpStats>,
    /// 0-based position of the replaced player
    #[serde(default)]
    pub rank: Option<i64>,
    pub bss: f64,
    pub ess: f64,
    pub succ_bmark: SuccStats,
    #[serde(default)]
    pub succ_bmark_scaled: Option<SuccStats>,
    pub succ_plyr: SuccStats,
    #[serde(default)]
    pub succ_plyr_scaled: Option<SuccStats>,
    #[serde(default)]
    pub player_archetype_names: Vec<String>,
    #[serde(default)]
    pub player_archetype_percentages: Vec<f64>,
    #[serde(default)]
    pub team_archetype: Vec<String>,
    #[serde(default)]
    pub composite_scores: Vec<CompositeScore>,
}

/// Per-player stat line from `/histplayerstats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistPlayerStats {
    pub player_name: String,
    pub usg_percent: f64,
    pub ts_percent: f64,
    pub ast_percent: f64,
    pub oreb_percent: f64,
    pub dreb_percent: f64,
    pub tov_percent: f64,
    pub ft_percent: f64,
    pub stl_percent: f64,
    pub blk_percent: f64,
    pub ftr: f64,
    #[serde(rename = "threeRate")]
    pub three_rate: f64,
    pub ast_fga: f64,
    pub fga_per100: f64,
    #[serde(rename = "rimRate")]
    pub rim_rate: f64,
    #[serde(rename = "midRate")]
    pub mid_rate: f64,
    pub porpag: f64,
    pub dporpag: f64,
}

/// `/histplayerstats` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistPlayerStatsResponse {
    pub player_stats: HistPlayerStats,
    pub player_name: String,
    pub team_name: String,
    pub season_year: i64,
}

impl HistPlayerStats {
    pub fn fit(&self) -> FsStats {
        FsStats {
            usg_percent: self.usg_percent,
            three_rate: self.three_rate,
            ast_fga: self.ast_fga,
            fga_per100: self.fga_per100,
            ftr: self.ftr,
            rim_rate: self.rim_rate,
            mid_rate: self.mid_rate,
        }
    }

    pub fn value(&self) -> VocbpStats {
        VocbpStats {
            ast_percent: self.ast_percent,
            oreb_percent: self.oreb_percent,
            dreb_percent: self.dreb_percent,
            ft_percent: self.ft_percent,
            stl_percent: self.stl_percent,
            blk_percent: self.blk_percent,
            ts_percent: self.ts_percent,
        }
    }

    pub fn success(&self) -> SuccStats {
        SuccStats {
            ts_percent: self.ts_percent,
            porpag: self.porpag,
            dporpag: self.dporpag,
            dreb_percent: self.dreb_percent,
            ast_percent: Some(self.ast_percent),
            oreb_percent: Some(self.oreb_percent),
            stl_percent: Some(self.stl_percent),
            blk_percent: Some(self.blk_percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_compute_payload_with_camel_case_fields() {
        let json = r#"{
            "fs_bmark": {"usg_percent": 22.1, "threeRate": 0.41, "ast_fga": 0.5, "fga_per100": 18.2, "ftr": 0.3, "rimRate": 0.33, "midRate": 0.12},
            "fs_plyr": {"usg_percent": 24.0, "threeRate": 0.38, "ast_fga": 0.55, "fga_per100": 19.0, "ftr": 0.28, "rimRate": 0.35, "midRate": 0.1},
            "vocbp_bmark": {"ast_percent": 15, "oreb_percent": 4, "dreb_percent": 12, "ft_percent": 75, "stl_percent": 2, "blk_percent": 1, "ts_percent": 55},
            "vocbp_plyr": {"ast_percent": 18, "oreb_percent": 3, "dreb_percent": 14, "ft_percent": 80, "stl_percent": 2.5, "blk_percent": 0.5, "ts_percent": 57},
            "rank": 2,
            "bss": -0.01,
            "ess": 42.5,
            "succ_bmark": {"ts_percent": 55, "porpag": 2.1, "dporpag": 1.2, "dreb_percent": 12},
            "succ_plyr": {"ts_percent": 57, "porpag": 2.4, "dporpag": 1.1, "dreb_percent": 14, "stl_percent": 2.5},
            "player_archetype_names": ["Shot Creator", "Connector"],
            "player_archetype_percentages": [0.6, 0.4],
            "team_archetype": ["Five-Out"],
            "composite_scores": [{
                "player_name": "Caleb Love", "sim_score": 0.91, "prev_team_name": "Arizona",
                "vocbp_raw": 1.2, "sos_adj_factor": 1.05, "sos_z": 0.4, "vocbp": 1.26,
                "fit_z": 0.8, "value_z": 1.1, "comp_raw": 0.95, "fit_pct": 0.8,
                "value_pct": 0.86, "composite_pct": 0.876, "comp_T": 62.3
            }]
        }"#;

        let resp: HistComputeResponse = serde_json::from_str(json).expect("decode");
        assert_eq!(resp.fs_bmark.three_rate, 0.41);
        assert_eq!(resp.rank, Some(2));
        assert_eq!(resp.succ_bmark.ast_percent, None);
        assert_eq!(resp.succ_plyr.stl_percent, Some(2.5));
        assert!(resp.fs_bmark_scaled.is_none());
        assert_eq!(resp.composite_scores[0].comp_t, 62.3);
    }

    #[test]
    fn optional_success_stats_are_not_serialized() {
        let succ = SuccStats {
            ts_percent: 55.0,
            ..Default::default()
        };
        let value = serde_json::to_value(&succ).expect("encode");
        assert!(value.get("ast_percent").is_none());
        assert!(value.get("porpag").is_some());
    }

    #[test]
    fn composite_columns_format_and_sort_numerically() {
        use crate::grid::{Grid, GridConfig};

        let row = |name: &str, pct: f64, t: f64| CompositeScore {
            player_name: name.to_string(),
            prev_team_name: "Arizona".to_string(),
            composite_pct: pct,
            comp_t: t,
            sos_adj_factor: 1.0457,
            ..CompositeScore::default()
        };
        let mut grid = Grid::new("breakdown", CompositeScore::columns(), GridConfig::default());
        grid.set_rows(vec![row("A", 0.9, 9.5), row("B", 0.876, 62.34), row("C", 0.1, 10.0)]);

        let headers: Vec<_> = grid.headers().into_iter().map(|h| h.label).collect();
        assert_eq!(
            headers,
            vec!["Name", "Previous Team", "SOS Adj", "Fit Score", "VOCBP", "RVI", "Composite %", "T Score"]
        );

        grid.click_header("comp_t");
        let view = grid.view();
        let cells = grid.cells(&view.rows[2]);
        assert_eq!(cells[0], "B");
        assert_eq!(cells[2], "1.046");
        assert_eq!(cells[6], "87.6%");
        assert_eq!(cells[7], "62.3");
    }
}
