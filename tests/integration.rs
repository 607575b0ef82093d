use std::path::Path;
use std::process::Command;

use serde_json::Value;

fn doccomment_cmd(fixture: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_doccomment"));
    cmd.current_dir(Path::new("tests/fixtures").join(fixture));
    cmd
}

fn scan_json(fixture: &str) -> Vec<Value> {
    let output = doccomment_cmd(fixture).args(["scan", "--format", "json"]).output().unwrap();
    assert!(
        output.status.success(),
        "scan failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn file<'a>(reports: &'a [Value], path: &str) -> &'a Value {
    reports
        .iter()
        .find(|r| r["path"] == path)
        .unwrap_or_else(|| panic!("no report for {path}"))
}

fn kinds(comment: &Value) -> Vec<String> {
    comment["doc"]["references"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["expression"]["kind"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn scan_finds_rust_references_and_code_blocks() {
    let reports = scan_json("basic");
    let comments = file(&reports, "src/lib.rs")["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);

    let add = &comments[0];
    assert_eq!(add["line"], 1);
    assert_eq!(add["declaration"], "function_item");
    assert_eq!(kinds(add), vec!["simple", "dotted"]);
    assert_eq!(add["doc"]["code_blocks"][0]["lines"].as_array().unwrap().len(), 3);

    let calculator = &comments[1];
    assert_eq!(calculator["line"], 10);
    assert_eq!(calculator["declaration"], "struct_item");
    let references = calculator["doc"]["references"].as_array().unwrap();
    assert_eq!(references.len(), 2, "link text must not be a reference");
    assert_eq!(references[0]["has_constructor_keyword"], true);
    assert_eq!(references[1]["expression"]["identifier"]["name"], "==");
}

#[test]
fn scan_covers_go_and_typescript() {
    let reports = scan_json("basic");

    let go = &file(&reports, "main.go")["comments"][0];
    assert_eq!(go["declaration"], "function_declaration");
    assert_eq!(kinds(go), vec!["simple", "dotted"]);

    let ts = &file(&reports, "web/api.ts")["comments"][0];
    assert_eq!(kinds(ts), vec!["simple"]);
    assert_eq!(ts["doc"]["code_blocks"][0]["info_string"], "ts");
}

#[test]
fn config_exclude_is_honored() {
    let reports = scan_json("basic");
    assert!(reports.iter().all(|r| !r["path"].as_str().unwrap().starts_with("vendor/")));
}

#[test]
fn scan_text_lists_locations() {
    let output = doccomment_cmd("basic").arg("scan").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("src/lib.rs:1 (function_item)"), "got: {stdout}");
    assert!(stdout.contains("documentation comments in 3 files"), "got: {stdout}");
}

#[test]
fn resolve_prints_reference() {
    let output = doccomment_cmd("basic")
        .args(["resolve", "a.b.c", "--offset", "5", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["expression"]["kind"], "property");
    assert_eq!(value["source_offset"], 5);
}

#[test]
fn resolve_rejects_non_reference() {
    let output = doccomment_cmd("basic").args(["resolve", "this"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "unresolved");
}

#[test]
fn missing_path_renders_diagnostic() {
    let output = doccomment_cmd("basic").args(["scan", "no/such/dir"]).output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("File Not Found"));
}
