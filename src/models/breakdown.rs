//! Benchmark vs player comparison tables.
//!
//! Each group (fit, value, success) becomes a set of dynamic [`Record`] rows:
//! the benchmark first, then the displayed player, then the comparison
//! player, each only when its source is present. Columns are derived from
//! the fields the benchmark actually carries.

use serde::Serialize;
use serde_json::Value;

use super::compute::{HistComputeResponse, HistPlayerStatsResponse};
use crate::grid::{Column, Record, WidthHint};
use crate::utils::{fixed, percent};

pub const BENCHMARK_LABEL: &str = "Benchmark";
pub const PLAYER_KEY: &str = "player";
pub const MISSING_STAT: &str = "N/A";

pub const FIT_NOTE: &str =
    "Aim to be close to the benchmark across metrics: smaller differences are better.";
pub const VALUE_NOTE: &str =
    "Higher is better: positive differences from the benchmark indicate added value.";
pub const SUCCESS_NOTE: &str =
    "Higher is better: positive differences from the benchmark indicate stronger success.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatFormat {
    /// One decimal with a percent sign
    Percent,
    Decimals(usize),
}

impl StatFormat {
    pub fn apply(self, value: f64) -> String {
        match self {
            Self::Percent => percent(value),
            Self::Decimals(d) => fixed(value, d),
        }
    }
}

/// Static description of one stat column
#[derive(Debug, Clone, Copy)]
pub struct StatSpec {
    pub key: &'static str,
    pub header: &'static str,
    pub format: StatFormat,
}

const fn stat(key: &'static str, header: &'static str, format: StatFormat) -> StatSpec {
    StatSpec { key, header, format }
}

pub const FIT_STATS: &[StatSpec] = &[
    stat("usg_percent", "Usage %", StatFormat::Percent),
    stat("threeRate", "3P Rate", StatFormat::Decimals(3)),
    stat("ast_fga", "AST/FGA", StatFormat::Decimals(3)),
    stat("fga_per100", "FGA/100", StatFormat::Decimals(1)),
    stat("ftr", "FTR", StatFormat::Decimals(3)),
    stat("rimRate", "Rim Rate", StatFormat::Decimals(3)),
    stat("midRate", "Mid Rate", StatFormat::Decimals(3)),
];

pub const VALUE_STATS: &[StatSpec] = &[
    stat("ast_percent", "AST %", StatFormat::Percent),
    stat("oreb_percent", "OREB %", StatFormat::Percent),
    stat("dreb_percent", "DREB %", StatFormat::Percent),
    stat("ft_percent", "FT %", StatFormat::Percent),
    stat("stl_percent", "STL %", StatFormat::Percent),
    stat("blk_percent", "BLK %", StatFormat::Percent),
    stat("ts_percent", "TS %", StatFormat::Percent),
];

pub const SUCCESS_STATS: &[StatSpec] = &[
    stat("ts_percent", "TS %", StatFormat::Percent),
    stat("porpag", "PORPAG", StatFormat::Decimals(3)),
    stat("dporpag", "DPORPAG", StatFormat::Decimals(3)),
    stat("ast_percent", "AST %", StatFormat::Percent),
    stat("dreb_percent", "DREB %", StatFormat::Percent),
    stat("oreb_percent", "OREB %", StatFormat::Percent),
    stat("stl_percent", "STL %", StatFormat::Percent),
    stat("blk_percent", "BLK %", StatFormat::Percent),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownGroup {
    Fit,
    Value,
    Success,
}

impl BreakdownGroup {
    pub const ALL: [BreakdownGroup; 3] = [Self::Fit, Self::Value, Self::Success];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Fit => "Fit",
            Self::Value => "Value",
            Self::Success => "Success",
        }
    }

    /// Context tag handed to the grid navigator
    pub fn context(&self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Value => "value",
            Self::Success => "success",
        }
    }

    pub fn note(&self) -> &'static str {
        match self {
            Self::Fit => FIT_NOTE,
            Self::Value => VALUE_NOTE,
            Self::Success => SUCCESS_NOTE,
        }
    }

    pub fn stats(&self) -> &'static [StatSpec] {
        match self {
            Self::Fit => FIT_STATS,
            Self::Value => VALUE_STATS,
            Self::Success => SUCCESS_STATS,
        }
    }

    /// Success cells may be absent and show a placeholder
    fn fallback(&self) -> Option<&'static str> {
        match self {
            Self::Success => Some(MISSING_STAT),
            _ => None,
        }
    }
}

/// One comparison table ready for a grid
#[derive(Debug, Default)]
pub struct BreakdownTable {
    pub rows: Vec<Record>,
    pub columns: Vec<Column<Record>>,
}

/// Inputs of the breakdown screen
#[derive(Debug, Clone, Default)]
pub struct BreakdownSource<'a> {
    pub compute: Option<&'a HistComputeResponse>,
    pub display_player: Option<&'a str>,
    pub comparison: Option<&'a HistPlayerStatsResponse>,
    pub comparison_player: Option<&'a str>,
}

impl BreakdownSource<'_> {
    pub fn table(&self, group: BreakdownGroup) -> BreakdownTable {
        let compute = self.compute;
        let stats = self.comparison.map(|c| &c.player_stats);

        let (benchmark, player, comparison) = match group {
            BreakdownGroup::Fit => (
                compute.map(|c| to_record(&c.fs_bmark)),
                compute.map(|c| to_record(&c.fs_plyr)),
                stats.map(|s| to_record(&s.fit())),
            ),
            BreakdownGroup::Value => (
                compute.map(|c| to_record(&c.vocbp_bmark)),
                compute.map(|c| to_record(&c.vocbp_plyr)),
                stats.map(|s| to_record(&s.value())),
            ),
            BreakdownGroup::Success => (
                compute.map(|c| to_record(&c.succ_bmark)),
                compute.map(|c| to_record(&c.succ_plyr)),
                stats.map(|s| to_record(&s.success())),
            ),
        };

        let columns = columns_for(group, benchmark.as_ref());

        let mut rows = Vec::with_capacity(3);
        if let Some(record) = benchmark {
            rows.push(labelled(BENCHMARK_LABEL, record));
        }
        if let (Some(record), Some(name)) = (player, self.display_player) {
            rows.push(labelled(name, record));
        }
        if let (Some(record), Some(name)) = (comparison, self.comparison_player) {
            rows.push(labelled(name, record));
        }

        BreakdownTable { rows, columns }
    }
}

/// Player column plus one column per stat the benchmark reports
pub fn columns_for(group: BreakdownGroup, benchmark: Option<&Record>) -> Vec<Column<Record>> {
    let mut columns = vec![Column::field(PLAYER_KEY, "Player")
        .sortable()
        .width(WidthHint::Flex(2))];

    let Some(benchmark) = benchmark else {
        return columns;
    };

    let fallback = group.fallback();
    columns.extend(
        group
            .stats()
            .iter()
            .filter(|spec| benchmark.get(spec.key).is_some_and(|v| !v.is_null()))
            .map(|spec| {
                let format = spec.format;
                Column::stat(spec.key, spec.header, move |v| format.apply(v), fallback).sortable()
            }),
    );
    columns
}

fn to_record<T: Serialize>(stats: &T) -> Record {
    match serde_json::to_value(stats) {
        Ok(Value::Object(map)) => map,
        _ => Record::new(),
    }
}

fn labelled(name: &str, mut record: Record) -> Record {
    record.insert(PLAYER_KEY.to_string(), Value::String(name.to_string()));
    record
}
