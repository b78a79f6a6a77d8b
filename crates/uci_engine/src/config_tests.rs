use super::*;

#[test]
fn default_config() {
    let config = BridgeConfig::default();
    assert_eq!(config.engine_path, PathBuf::from("stockfish"));
    assert_eq!(config.difficulty, Difficulty::Medium);
    assert_eq!(config.timeout(), Duration::from_millis(5000));
    assert_eq!(config.max_moves, 300);
    assert_eq!(config.engine_options(), Difficulty::Medium.options());
}

#[test]
fn difficulty_presets() {
    let easy = Difficulty::Easy.options();
    assert_eq!(
        (easy.skill_level, easy.threads, easy.depth, easy.move_time_ms, easy.hash_mb),
        (1, 1, 1, 10, 16)
    );
    let unreal = Difficulty::Unreal.options();
    assert_eq!(
        (unreal.skill_level, unreal.threads, unreal.depth, unreal.move_time_ms, unreal.hash_mb),
        (20, 8, 5, 50, 256)
    );
    assert_eq!(Difficulty::Hard.options().hash_mb, 128);
}

#[test]
fn difficulty_parsing() {
    assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
    assert_eq!(Difficulty::from_str_loose("unreal"), Some(Difficulty::Unreal));
    assert!(matches!(
        "godlike".parse::<Difficulty>(),
        Err(ConfigError::Difficulty(s)) if s == "godlike"
    ));
    assert_eq!(Difficulty::Easy.to_string(), "easy");
}

#[test]
fn toml_partial_file_keeps_defaults() {
    let config = BridgeConfig::from_toml_str(
        r#"
engine_path = "/usr/games/stockfish"
difficulty = "hard"
depth = 9
"#,
    )
    .unwrap();

    assert_eq!(config.engine_path, PathBuf::from("/usr/games/stockfish"));
    assert_eq!(config.difficulty, Difficulty::Hard);
    assert_eq!(config.timeout_ms, 5000);

    let options = config.engine_options();
    assert_eq!(options.depth, 9);
    assert_eq!(options.skill_level, 10);
    assert_eq!(options.threads, 4);
}

#[test]
fn toml_rejects_unknown_keys() {
    let err = BridgeConfig::from_toml_str("engine = \"stockfish\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));

    let err = BridgeConfig::from_toml_str("difficulty = \"godlike\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_missing_file() {
    let err = BridgeConfig::load(Path::new("/nonexistent/bridge.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn toml_round_trip() {
    let config = BridgeConfig {
        difficulty: Difficulty::Easy,
        threads: Some(3),
        ..Default::default()
    };
    let text = toml::to_string(&config).unwrap();
    assert_eq!(BridgeConfig::from_toml_str(&text).unwrap(), config);
}
