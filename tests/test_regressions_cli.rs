use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::{TempDir, tempdir};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_recipe-browser")
}

fn write_file(path: &Path, content: &str) {
    fs::write(path, content).expect("failed to write test file");
}

const DATASET: &str = r#"{
  "recipes": [
    {"id": 1, "title": "Buttermilk Pancakes", "cuisine": "Breakfast", "rating": 5, "total_time": 25,
     "nutrients": {"calories": "310 kcal"}},
    {"id": 2, "title": "Slow Cooker Chili", "cuisine": "Tex-Mex", "rating": 5, "total_time": 480,
     "nutrients": {"calories": "520 kcal"}},
    {"id": 3, "title": "Garden Salad", "cuisine": "Salads", "rating": 3, "total_time": 10}
  ]
}"#;

fn dataset_dir() -> TempDir {
    let dir = tempdir().expect("temp dir");
    write_file(&dir.path().join("recipes.json"), DATASET);
    dir
}

fn run(dir: &TempDir, args: &[&str]) -> Output {
    let data = dir.path().join("recipes.json");
    Command::new(bin())
        .arg("--data")
        .arg(&data)
        .args(["--color", "never"])
        .args(args)
        .env_remove("RECIPES_DATA")
        .env_remove("RUST_LOG")
        .output()
        .expect("command should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "expected JSON on stdout ({e}), got:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn test_search_json_matches_api_envelope() {
    let dir = dataset_dir();
    let output = run(
        &dir,
        &["-F", "json", "search", "--rating", ">=4", "--limit", "1"],
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value = stdout_json(&output);
    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["recipes"][0]["id"], 1);
    assert_eq!(value["data"]["pagination"]["total"], 2);
    assert_eq!(value["data"]["pagination"]["pages"], 2);
    assert_eq!(value["data"]["pagination"]["hasNext"], true);
    assert_eq!(value["data"]["pagination"]["hasPrev"], false);
}

#[test]
fn test_second_page_returns_the_other_tied_recipe() {
    let dir = dataset_dir();
    let output = run(
        &dir,
        &[
            "-F", "json", "search", "--rating", ">=4", "--limit", "1", "--page", "2",
        ],
    );

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["data"]["recipes"][0]["id"], 2);
    assert_eq!(value["data"]["pagination"]["hasNext"], false);
    assert_eq!(value["data"]["pagination"]["hasPrev"], true);
}

#[test]
fn test_invalid_filter_exits_with_client_error() {
    let dir = dataset_dir();
    let output = run(&dir, &["search", "--total-time", "quick"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("total_time"), "stderr: {stderr}");
}

#[test]
fn test_empty_rating_filter_exits_with_client_error() {
    let dir = dataset_dir();
    let output = run(&dir, &["search", "--rating", ""]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rating"), "stderr: {stderr}");
}

#[test]
fn test_invalid_limit_exits_with_client_error_in_json() {
    let dir = dataset_dir();
    let output = run(&dir, &["-F", "json", "list", "--limit", "500"]);

    assert_eq!(output.status.code(), Some(2));
    let value = stdout_json(&output);
    assert_eq!(value["success"], false);
    assert!(
        value["message"]
            .as_str()
            .is_some_and(|m| m.contains("Limit"))
    );
}

#[test]
fn test_show_missing_recipe_is_not_found() {
    let dir = dataset_dir();
    let output = run(&dir, &["show", "42"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Recipe not found: 42"));
}

#[test]
fn test_missing_dataset_is_a_server_error() {
    let dir = tempdir().expect("temp dir");
    let output = run(&dir, &["list"]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_show_text_lists_details() {
    let dir = dataset_dir();
    let output = run(&dir, &["show", "2"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Slow Cooker Chili"));
    assert!(stdout.contains("Tex-Mex"));
    assert!(stdout.contains("520 kcal"));
}

#[test]
fn test_cuisines_json_is_sorted() {
    let dir = dataset_dir();
    let output = run(&dir, &["-F", "json", "cuisines"]);

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(
        value["data"],
        serde_json::json!(["Breakfast", "Salads", "Tex-Mex"])
    );
}

#[test]
fn test_list_text_shows_navigation() {
    let dir = dataset_dir();
    let output = run(&dir, &["list", "--limit", "2"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Buttermilk Pancakes"), "stdout: {stdout}");
    assert!(!stdout.contains("Garden Salad"), "stdout: {stdout}");
    assert!(stdout.contains("Page 1 of 2"), "stdout: {stdout}");
}

#[test]
fn test_import_then_search() {
    let dir = tempdir().expect("temp dir");
    let raw = dir.path().join("raw.json");
    write_file(
        &raw,
        r#"{"0": {"title": "Tomato Soup", "rating": "4.2", "nutrients": {"calories": "180 kcal"}},
            "1": {"title": "", "rating": 5}}"#,
    );

    let output = run(&dir, &["-q", "import", raw.to_str().expect("utf8 path")]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Imported 1 recipes (1 skipped)"));

    let output = run(&dir, &["-F", "json", "search", "--calories", "<200"]);
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["data"]["recipes"][0]["title"], "Tomato Soup");
    assert_eq!(value["data"]["recipes"][0]["calories_numeric"], 180.0);
}

#[test]
fn test_config_default_limit_is_used() {
    let dir = dataset_dir();
    let config = dir.path().join("browser.toml");
    write_file(&config, "[paging]\ndefault_limit = 1\n");

    let output = run(
        &dir,
        &["--config", config.to_str().expect("utf8 path"), "-F", "json", "list"],
    );
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["data"]["pagination"]["limit"], 1);
    assert_eq!(value["data"]["pagination"]["pages"], 3);
}
