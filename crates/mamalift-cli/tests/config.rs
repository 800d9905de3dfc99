use mamalift_cli::config::{
    CURRENT_VERSION, MamaliftConfig, load_config_from, parse_config, save_config_to,
};
use mamalift_instruments::instruments::epds::Epds;
use mamalift_instruments::scoring::ScoringRules;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, MamaliftConfig::default());
    assert_eq!(config.scoring, ScoringRules::default());
}

#[test]
fn unversioned_config_is_migrated() {
    let config = parse_config("{}").unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.scoring, ScoringRules::default());
}

#[test]
fn migration_keeps_existing_scoring() {
    let config = parse_config(
        r#"{"scoring": {"moderate_threshold": 10, "high_threshold": 18, "critical_question_id": 10}}"#,
    )
    .unwrap();
    assert_eq!(config.scoring.moderate_threshold, 10);
    assert_eq!(config.scoring.high_threshold, 18);
}

#[test]
fn newer_version_is_rejected() {
    let err = parse_config(r#"{"config_version": 99}"#).unwrap_err();
    assert!(err.to_string().contains("only understands up to 1"));
}

#[test]
fn non_object_is_rejected() {
    assert!(parse_config("[]").is_err());
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let config = MamaliftConfig {
        config_version: 0,
        scoring: ScoringRules {
            moderate_threshold: 11,
            ..ScoringRules::default()
        },
        created_at: Some(jiff::Timestamp::UNIX_EPOCH),
    };

    save_config_to(&config, &path).unwrap();
    assert!(!path.with_extension("json.tmp").exists());

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.config_version, CURRENT_VERSION);
    assert_eq!(loaded.scoring.moderate_threshold, 11);
    assert_eq!(loaded.created_at, config.created_at);
}

#[cfg(unix)]
#[test]
fn saved_config_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    save_config_to(&MamaliftConfig::default(), &path).unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn rules_are_checked_against_the_instrument() {
    let mut config = MamaliftConfig::default();
    assert!(config.rules_for(&Epds).is_ok());

    config.scoring.moderate_threshold = config.scoring.high_threshold;
    assert!(config.rules_for(&Epds).is_err());

    config.scoring = ScoringRules {
        critical_question_id: 11,
        ..ScoringRules::default()
    };
    assert!(config.rules_for(&Epds).is_err());
}
