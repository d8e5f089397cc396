use std::env;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn combined_output(output: &std::process::Output) -> String {
    let mut combined = String::new();
    combined.push_str(&String::from_utf8_lossy(&output.stdout));
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    combined
}

fn vocaboard_bin() -> &'static str {
    env!("CARGO_BIN_EXE_vocaboard")
}

fn scratch_dir(tag: &str) -> std::path::PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    env::temp_dir().join(format!("vocaboard-cli-{tag}-{nanos}"))
}

#[test]
fn vocaboard_help_mentions_name() {
    let output = Command::new(vocaboard_bin())
        .arg("--help")
        .output()
        .expect("run vocaboard --help");
    assert!(output.status.success());
    let combined = combined_output(&output);
    assert!(combined.contains("Vocaboard"));
    assert!(combined.contains("--list-boards"));
}

#[test]
fn vocaboard_list_boards_prints_catalog() {
    let data_dir = scratch_dir("list");
    let output = Command::new(vocaboard_bin())
        .args(["--list-boards", "--no-speech", "--catalog", "extended"])
        .arg("--data-dir")
        .arg(&data_dir)
        .env_remove("VOCABOARD_SPEECH_CMD")
        .output()
        .expect("run vocaboard --list-boards");
    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[home] (home)"));
    assert!(stdout.contains("Core words:"));
    let _ = std::fs::remove_dir_all(&data_dir);
}

#[test]
fn vocaboard_rejects_bad_speech_rate() {
    let output = Command::new(vocaboard_bin())
        .args(["--list-boards", "--speech-rate", "20"])
        .output()
        .expect("run vocaboard --speech-rate 20");
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("--speech-rate"));
}
