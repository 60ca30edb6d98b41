//! CLI tests for the `gs1 explain` and `gs1 country` subcommands.

use std::process::Command;

use assert_cmd::cargo;

fn gs1_cmd() -> Command {
    Command::new(cargo::cargo_bin!("gs1"))
}

fn json_of(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn explain_by_number_json_returns_explanation() {
    let output = gs1_cmd()
        .args(["explain", "2002", "--output", "json"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let json = json_of(&output);
    assert_eq!(json["id"], "2002");
    let matches = json["matches"].as_array().expect("matches array");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["name"], "UNRECOGNISED_AI");
    assert_eq!(matches[0]["severity"], "fatal");
    assert!(matches[0]["explanation"].is_string());
}

#[test]
fn explain_shared_number_lists_both_codes() {
    let output = gs1_cmd()
        .args(["explain", "2017", "--output", "json"])
        .output()
        .expect("run explain command");

    let json = json_of(&output);
    let names: Vec<&str> = json["matches"]
        .as_array()
        .expect("matches array")
        .iter()
        .filter_map(|m| m["name"].as_str())
        .collect();
    assert!(names.contains(&"COUPON_POSITIVE_OFFER_INVALID"), "{names:?}");
    assert!(names.contains(&"FREIGHT_UNIT_TYPE_UNKNOWN"), "{names:?}");
}

#[test]
fn explain_by_name_is_case_insensitive() {
    let output = gs1_cmd()
        .args(["explain", "null_value", "--output", "json"])
        .output()
        .expect("run explain command");

    let json = json_of(&output);
    assert_eq!(json["matches"][0]["number"], 2006);
}

#[test]
fn explain_unknown_code_json_returns_no_matches() {
    let output = gs1_cmd()
        .args(["explain", "9999", "--output", "json"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let json = json_of(&output);
    assert_eq!(json["id"], "9999");
    assert!(json["matches"].as_array().expect("array").is_empty());
}

#[test]
fn explain_pretty_shows_human_readable_text() {
    let output = gs1_cmd()
        .args(["explain", "2004", "--output", "pretty"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("INSUFFICIENT_LENGTH") && stdout.contains(':'),
        "unexpected output: {stdout}"
    );
}

#[test]
fn country_json_reports_member_organisation() {
    let output = gs1_cmd()
        .args(["country", "5012345678900", "--output", "json"])
        .output()
        .expect("run country command");

    assert!(output.status.success());
    let json = json_of(&output);
    assert_eq!(json["allocation"]["kind"], "member");
    assert_eq!(json["allocation"]["iso"], "GB");
}

#[test]
fn country_pretty_names_special_allocations() {
    let output = gs1_cmd()
        .args(["country", "978", "--output", "pretty"])
        .output()
        .expect("run country command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ISBN"), "unexpected output: {stdout}");
}

#[test]
fn country_unallocated_prefix_exits_nonzero() {
    let output = gs1_cmd()
        .args(["country", "140", "--output", "json"])
        .output()
        .expect("run country command");

    assert_eq!(output.status.code(), Some(1));
    let json = json_of(&output);
    assert!(json["allocation"].is_null());
}
