//! Database schema definitions

pub const SCHEMA_VERSION: i32 = 1;

pub const CREATE_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS schema_version (
        version INTEGER PRIMARY KEY
    );

    CREATE TABLE IF NOT EXISTS home_page (
        season_year INTEGER NOT NULL,
        player_name TEXT NOT NULL,
        player_id INTEGER NOT NULL,
        player_year INTEGER,
        team_name TEXT NOT NULL,
        position TEXT,
        height_inches INTEGER,
        PRIMARY KEY (season_year, player_id)
    );
"#;
