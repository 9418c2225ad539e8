use serde::{Deserialize, Serialize};

use crate::grid::{CellValue, Column, WidthHint};
use crate::utils::height;

/// One transfer-portal entry from the `home_page` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferPlayer {
    pub season_year: i64,
    pub player_name: String,
    pub player_id: i64,
    pub player_year: i64,
    pub team_name: String,
    pub position: String,
    pub height_inches: Option<u32>,
}

impl TransferPlayer {
    pub fn class_name(&self) -> String {
        class_name(self.player_year)
    }

    /// Columns of the player search table
    pub fn columns() -> Vec<Column<TransferPlayer>> {
        vec![
            Column::value("player_name", "Name", |p: &TransferPlayer| p.player_name.clone())
                .sortable()
                .width(WidthHint::Flex(3)),
            Column::value("team_name", "Previous Team", |p: &TransferPlayer| p.team_name.clone())
                .sortable()
                .width(WidthHint::Flex(3)),
            Column::value("season_year", "Season Transferred", |p: &TransferPlayer| p.season_year)
                .sortable()
                .numeric()
                .width(WidthHint::Flex(2)),
            Column::new("player_year", "Class", |p: &TransferPlayer| {
                Some(CellValue::formatted(p.class_name(), p.player_year as f64))
            })
            .sortable()
            .numeric()
            .width(WidthHint::Flex(1)),
            Column::value("position", "Position", |p: &TransferPlayer| p.position.clone())
                .sortable()
                .width(WidthHint::Flex(2)),
            Column::new("height_inches", "Height", |p: &TransferPlayer| {
                p.height_inches
                    .map(|h| CellValue::formatted(height(h), f64::from(h)))
            })
            .sortable()
            .numeric()
            .width(WidthHint::Flex(1)),
        ]
    }
}

/// Academic class for a 1-based player year; other values are shown as-is
pub fn class_name(player_year: i64) -> String {
    match player_year {
        1 => "Freshman".to_string(),
        2 => "Sophomore".to_string(),
        3 => "Junior".to_string(),
        4 => "Senior".to_string(),
        other => other.to_string(),
    }
}
