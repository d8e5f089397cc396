use super::defaults::{MAX_SPEECH_CMD_BYTES, MAX_SPEECH_RATE, MIN_SPEECH_RATE};
use super::AppConfig;
use crate::board::{BuiltinCatalog, HOME_ID};
use crate::speech::SpeechEngine;
use clap::Parser;
use std::env;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp(tag: &str) -> std::path::PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    env::temp_dir().join(format!("vocaboard-config-{tag}-{nanos}"))
}

#[test]
fn defaults_validate() {
    let mut cfg = AppConfig::parse_from(["test-app"]);
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.catalog, BuiltinCatalog::Classic);
    assert_eq!(cfg.speech_settings(), crate::speech::SpeechSettings::default());
    assert!(!cfg.list_boards);
}

#[test]
fn rejects_speech_rate_out_of_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--speech-rate", "0.05"]);
    assert!(cfg.validate().is_err());
    let mut cfg = AppConfig::parse_from(["test-app", "--speech-rate", "10.5"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn accepts_speech_rate_bounds() {
    for rate in [MIN_SPEECH_RATE, MAX_SPEECH_RATE] {
        let mut cfg = AppConfig::parse_from(["test-app"]);
        cfg.speech_rate = rate;
        assert!(cfg.validate().is_ok(), "rate {rate} should be accepted");
    }
}

#[test]
fn rejects_speech_pitch_and_volume_out_of_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--speech-pitch", "2.5"]);
    assert!(cfg.validate().is_err());
    let mut cfg = AppConfig::parse_from(["test-app", "--speech-volume=-0.1"]);
    assert!(cfg.validate().is_err());
    let mut cfg = AppConfig::parse_from(["test-app", "--speech-volume", "1.1"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_non_finite_speech_values() {
    let mut cfg = AppConfig::parse_from(["test-app"]);
    cfg.speech_pitch = f32::NAN;
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_blank_or_unbalanced_speech_cmd() {
    let mut cfg = AppConfig::parse_from(["test-app", "--speech-cmd", "   "]);
    assert!(cfg.validate().is_err());
    let mut cfg = AppConfig::parse_from(["test-app", "--speech-cmd", "espeak 'en"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_oversized_speech_cmd() {
    let long = "x".repeat(MAX_SPEECH_CMD_BYTES + 1);
    let mut cfg = AppConfig::parse_from(["test-app", "--speech-cmd", long.as_str()]);
    assert!(cfg.validate().is_err());
}

#[test]
fn speech_cmd_is_trimmed_and_parsed() {
    let mut cfg = AppConfig::parse_from(["test-app", "--speech-cmd", "  espeak-ng -v en  "]);
    cfg.validate().expect("valid speech cmd");
    assert_eq!(cfg.speech_cmd.as_deref(), Some("espeak-ng -v en"));
    let command = cfg.speech_command().expect("parse").expect("command");
    assert_eq!(command.engine, SpeechEngine::EspeakNg);
    assert_eq!(command.args, ["-v", "en"]);
}

#[test]
fn no_speech_command_by_default() {
    let cfg = AppConfig::parse_from(["test-app"]);
    assert!(cfg.speech_command().expect("parse").is_none());
}

#[test]
fn rejects_missing_catalog_file() {
    let mut cfg = AppConfig::parse_from([
        "test-app",
        "--catalog-file",
        "/definitely/missing/boards.json",
    ]);
    assert!(cfg.validate().is_err());
}

#[test]
fn loads_catalog_file_over_builtin() {
    let dir = unique_temp("catalog");
    fs::create_dir_all(&dir).expect("create dir");
    let path = dir.join("boards.json");
    fs::write(
        &path,
        r#"{"boards": [{"id": "home", "title": "Mine", "tiles": [{"id": "a", "label": "a"}]}]}"#,
    )
    .expect("write catalog");
    let mut cfg = AppConfig::parse_from(["test-app", "--catalog", "extended"]);
    cfg.catalog_file = Some(path);
    cfg.validate().expect("valid");
    let catalog = cfg.load_catalog().expect("catalog");
    assert_eq!(catalog.resolve(HOME_ID).title, "Mine");
    assert_eq!(catalog.len(), 1);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn builtin_catalog_flag_selects_extended_set() {
    let cfg = AppConfig::parse_from(["test-app", "--catalog", "extended"]);
    let catalog = cfg.load_catalog().expect("catalog");
    assert!(catalog.contains("questions"));
}

#[test]
fn rejects_data_dir_that_is_a_file() {
    let dir = unique_temp("datafile");
    fs::create_dir_all(&dir).expect("create dir");
    let file = dir.join("not-a-dir");
    fs::write(&file, "x").expect("write");
    let mut cfg = AppConfig::parse_from(["test-app"]);
    cfg.data_dir = Some(file);
    assert!(cfg.validate().is_err());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn explicit_data_dir_wins_over_default() {
    let mut cfg = AppConfig::parse_from(["test-app"]);
    let dir = unique_temp("explicit");
    cfg.data_dir = Some(dir.clone());
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.resolved_data_dir(), dir);
}

#[test]
fn no_logs_overrides_logs() {
    let cfg = AppConfig::parse_from(["test-app", "--logs", "--no-logs"]);
    assert!(!cfg.logging_enabled());
    let cfg = AppConfig::parse_from(["test-app", "--logs"]);
    assert!(cfg.logging_enabled());
}
