//! Database query definitions

pub const SELECT_HOME_PAGE: &str = r#"
    SELECT season_year, player_name, player_id, player_year, team_name, position, height_inches
    FROM home_page
"#;

pub const INSERT_PLAYER: &str = r#"
    INSERT OR REPLACE INTO home_page (
        season_year, player_name, player_id, player_year, team_name, position, height_inches
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const COUNT_PLAYERS: &str = "SELECT COUNT(*) FROM home_page";

pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)";
