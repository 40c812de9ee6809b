//! End-to-end tests for the `glossa` binary.

use assert_cmd::Command;
use glossa_test_utils::{temp_dir, LocaleTree, SAMPLE_PO_EN};
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const ENV_VARS: &[&str] = &[
    "GLOSSA_CONFIG",
    "GLOSSA_LOCALE_DIR",
    "GLOSSA_DEFAULT_LOCALE",
    "GLOSSA_FALLBACK_LOCALE",
    "GLOSSA_DOMAIN",
    "GLOSSA_FORMAT",
    "GLOSSA_LOCALE",
    "GLOSSA_LOG_LEVEL",
    "GLOSSA_LOG_FILE",
    "RUST_LOG",
    "LC_ALL",
    "LC_MESSAGES",
    "LANG",
];

/// `glossa` run inside `dir` with a clean environment.
fn glossa_in(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("glossa").unwrap();
    cmd.current_dir(dir);
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// `glossa` reading catalogs from `tree`.
fn glossa(tree: &LocaleTree) -> Command {
    let mut cmd = glossa_in(tree.path());
    cmd.env("GLOSSA_LOCALE_DIR", tree.path());
    cmd
}

#[test]
fn test_help() {
    glossa_in(Path::new("."))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("translate"))
        .stdout(predicate::str::contains("negotiate"));
}

#[test]
fn test_translate_with_args() {
    let tree = LocaleTree::sample();
    glossa(&tree)
        .args(["translate", "greeting", "--locale", "es", "--arg", "name=Ana"])
        .assert()
        .success()
        .stdout("¡Hola, Ana!\n");
}

#[test]
fn test_translate_plural_negotiates_region() {
    let tree = LocaleTree::sample();
    glossa(&tree)
        .args(["translate", "file", "--locale", "es-MX", "--count", "3"])
        .assert()
        .success()
        .stdout("3 archivos\n");
}

#[test]
fn test_translate_context_defaults_to_default_locale() {
    let tree = LocaleTree::sample();
    glossa(&tree)
        .args(["t", "open", "--context", "menu"])
        .assert()
        .success()
        .stdout("Open…\n");
}

#[test]
fn test_translate_uses_environment_locale() {
    let tree = LocaleTree::sample();
    glossa(&tree)
        .env("LANG", "es_ES.UTF-8")
        .args(["translate", "open"])
        .assert()
        .success()
        .stdout("Abrir\n");
}

#[test]
fn test_translate_falls_back_to_default_catalog() {
    let tree = LocaleTree::sample();
    glossa(&tree)
        .args(["translate", "welcome", "--locale", "es"])
        .assert()
        .success()
        .stdout("Welcome to Glossa.\nEnjoy your stay.\n");
}

#[test]
fn test_translate_json_output() {
    let tree = LocaleTree::sample();
    let output = glossa(&tree)
        .args(["--format", "json", "translate", "file", "-l", "en", "-n", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["locale"], "en");
    assert_eq!(value["text"], "1 file");
}

#[test]
fn test_translate_count_conflicts_with_context() {
    let tree = LocaleTree::sample();
    glossa(&tree)
        .args(["translate", "file", "--count", "2", "--context", "menu"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_negotiate_explicit_available() {
    let tree = LocaleTree::sample();
    glossa(&tree)
        .args(["negotiate", "--available", "en,es", "--accept", "fr-CH, es;q=0.8, en;q=0.5"])
        .assert()
        .success()
        .stdout("es\n");
}

#[test]
fn test_negotiate_discovers_locales() {
    let tree = LocaleTree::sample();
    let output = glossa(&tree)
        .args(["--format", "json", "negotiate", "--accept", "es-AR"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["locale"], "es");
    assert_eq!(value["available"], serde_json::json!(["en", "es"]));
    assert_eq!(value["preferred"], serde_json::json!(["es-AR"]));
}

#[test]
fn test_negotiate_no_match() {
    let tree = LocaleTree::sample();
    glossa(&tree)
        .args(["negotiate", "--accept", "ja"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("error[E003]"));
}

#[test]
fn test_check_reports_missing_keys() {
    let tree = LocaleTree::sample();
    glossa(&tree)
        .arg("check")
        .assert()
        .code(6)
        .stdout(predicate::str::contains("es (6 keys): FAIL"))
        .stdout(predicate::str::contains("missing: welcome"))
        .stderr(predicate::str::contains("1 problem(s) found in catalogs"));
}

#[test]
fn test_check_clean_tree() {
    let tree = LocaleTree::new()
        .with_catalog("en", "messages.po", "msgid \"open\"\nmsgstr \"Open\"\n")
        .with_catalog("de", "messages.po", "msgid \"open\"\nmsgstr \"Öffnen\"\n");
    glossa_in(tree.path())
        .args(["check", "--dir"])
        .arg(tree.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("All catalogs match en."));
}

#[test]
fn test_check_reports_parse_errors() {
    let tree = LocaleTree::sample().with_catalog("fr", "messages.po", "msgid \"open\"\n");
    glossa(&tree)
        .arg("check")
        .assert()
        .code(6)
        .stdout(predicate::str::contains("fr (0 keys): FAIL"))
        .stdout(predicate::str::contains("error: failed to parse"));
}

#[test]
fn test_convert_round_trip() {
    let dir = temp_dir();
    let po = dir.path().join("en.po");
    let json = dir.path().join("en.json");
    let back = dir.path().join("back.po");
    fs::write(&po, SAMPLE_PO_EN).unwrap();

    glossa_in(dir.path())
        .args(["convert", "en.po", "en.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 7 keys"));

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value["file.one"], "{count} file");

    glossa_in(dir.path())
        .args(["convert", "en.json", "back.po", "--language", "en"])
        .assert()
        .success();

    let written = fs::read_to_string(back).unwrap();
    assert!(written.contains("\"Language: en\\n\""));
    assert!(written.contains("msgctxt \"menu\"\nmsgid \"open\"\nmsgstr \"Open…\""));
}

#[test]
fn test_convert_unknown_format() {
    let dir = temp_dir();
    glossa_in(dir.path())
        .args(["convert", "en.po", "en.yaml"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("error[E004]"));
}

#[test]
fn test_project_config() {
    let tree = LocaleTree::sample();
    fs::create_dir_all(tree.path().join(".glossa")).unwrap();
    fs::write(
        tree.path().join(".glossa/config.yaml"),
        "catalogs:\n  dir: .\nlocales:\n  default: es\n",
    )
    .unwrap();

    glossa_in(tree.path())
        .args(["translate", "greeting", "--arg", "name=Ana"])
        .assert()
        .success()
        .stdout("¡Hola, Ana!\n");
}

#[test]
fn test_invalid_config_file() {
    let dir = temp_dir();
    let config = dir.path().join("glossa.yaml");
    fs::write(&config, "locales:\n  default: \"english!\"\n").unwrap();

    glossa_in(dir.path())
        .env("GLOSSA_CONFIG", &config)
        .args(["negotiate", "--available", "en"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error[E001]"));
}
