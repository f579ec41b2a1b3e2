use glam::Vec2;
use playstep_session::{Config, ConfigError, Session};

#[test]
fn empty_toml_yields_defaults() {
    let config: Config = toml::from_str("").expect("empty document parses");
    assert_eq!(config, Config::default());
}

#[test]
fn partial_toml_overrides_only_named_fields() {
    let config: Config = toml::from_str(
        r#"
        seed = 42
        frame_interval_ms = 20

        [movement]
        speed = 4.0
        start = [60.0, 100.0]

        [[movement.collectibles]]
        center = [100.0, 100.0]
        radius = 10.0

        [snake]
        initial_speed_ms = 120
        "#,
    )
    .expect("config parses");

    assert_eq!(config.seed, 42);
    assert_eq!(config.frame_interval_ms, 20);
    assert_eq!(config.movement.speed, 4.0);
    assert_eq!(config.movement.start, Vec2::new(60.0, 100.0));
    assert_eq!(config.movement.collectibles.len(), 1);
    assert_eq!(config.movement.field_width, 700.0);
    assert_eq!(config.snake.initial_speed_ms, 120);
    assert_eq!(config.snake.cell_size, 20);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn sessions_refuse_invalid_configs() {
    let config: Config = toml::from_str(
        r#"
        [snake]
        field_width = 710
        "#,
    )
    .expect("config parses");

    assert!(matches!(
        Session::new(config).err(),
        Some(ConfigError::Snake(_))
    ));
}
