//! Loading game configuration from JSON files.

use dunjy_krawl::{GameConfig, GameState, GameStatus, KrawlError, KrawlResult};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_partial_config_fills_in_defaults() -> KrawlResult<()> {
    let file = write_config(
        r#"{
            "starting_hp": 7,
            "generation": { "columns": 30, "max_rooms": 3 },
            "timing": { "enemy_interval_ms": 900 }
        }"#,
    );

    let config = GameConfig::from_json_file(file.path())?;
    let defaults = GameConfig::new();
    assert_eq!(config.starting_hp, 7);
    assert_eq!(config.generation.columns, 30);
    assert_eq!(config.generation.max_rooms, 3);
    assert_eq!(config.generation.rows, defaults.generation.rows);
    assert_eq!(config.timing.enemy_interval_ms, 900);
    assert_eq!(config.timing.player_interval_ms, defaults.timing.player_interval_ms);
    assert_eq!(config.starting_ammo, defaults.starting_ammo);
    Ok(())
}

#[test]
fn test_saved_config_loads_back() -> KrawlResult<()> {
    let mut config = GameConfig::for_testing();
    config.max_level = 3;
    config.swing_duration_ticks = 4;
    let file = write_config(&config.to_json()?);

    assert_eq!(GameConfig::from_json_file(file.path())?, config);
    Ok(())
}

#[test]
fn test_loaded_config_drives_a_session() -> KrawlResult<()> {
    let file = write_config(r#"{ "starting_ammo": 9, "starting_hp": 4 }"#);
    let config = GameConfig::from_json_file(file.path())?;

    let mut game = GameState::with_seed(config, 1)?;
    assert_eq!(game.status(), GameStatus::Start);
    assert_eq!(game.ammo(), 9);
    assert_eq!(game.registry().player.hp, 4);

    game.input_mut().push_action(dunjy_krawl::Action::Begin);
    game.advance()?;
    assert!(game.is_running());
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = GameConfig::from_json_file(dir.path().join("missing.json"));
    assert!(matches!(result, Err(KrawlError::Io(_))));
}

#[test]
fn test_malformed_json_is_serde_error() {
    let file = write_config("{ starting_hp: ");
    let result = GameConfig::from_json_file(file.path());
    assert!(matches!(result, Err(KrawlError::Serde(_))));
}

#[test]
fn test_unplayable_values_are_rejected() {
    let file = write_config(r#"{ "generation": { "columns": 6, "rows": 6 } }"#);
    let result = GameConfig::from_json_file(file.path());
    assert!(matches!(result, Err(KrawlError::InvalidConfig(_))));

    let file = write_config(r#"{ "max_level": 0 }"#);
    assert!(matches!(
        GameConfig::from_json_file(file.path()),
        Err(KrawlError::InvalidConfig(_))
    ));
}

#[test]
fn test_out_of_range_sizes_are_rejected_not_panicking() {
    for json in [
        r#"{ "generation": { "min_room_size": 1, "max_room_size": 4294967295 } }"#,
        r#"{ "generation": { "columns": 4294967295, "rows": 4294967295 } }"#,
        r#"{ "generation": { "max_rooms": 4294967295 } }"#,
        r#"{ "generation": { "base_enemies": 4294967295 } }"#,
    ] {
        let file = write_config(json);
        assert!(
            matches!(
                GameConfig::from_json_file(file.path()),
                Err(KrawlError::InvalidConfig(_))
            ),
            "accepted {}",
            json
        );
    }
}
