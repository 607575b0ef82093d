use std::path::Path;

use serde::Serialize;

use doccomment::config::{CONFIG_FILE, Config};

/// Print the reference document for doccomment.
pub fn run(json: bool) {
    let state = gather_state(Path::new("."));

    if json {
        print_json(&state);
    } else {
        print_markdown(&state);
    }
}

// ── State gathering ───────────────────────────────────────────────────

struct CurrentState {
    config_found: bool,
    config_valid: bool,
    max_file_size: u64,
}

fn gather_state(root: &Path) -> CurrentState {
    let config_found = root.join(CONFIG_FILE).exists();
    let config = Config::load(root);
    let config_valid = config.is_ok();
    let max_file_size = config.unwrap_or_default().max_file_size;

    return CurrentState { config_found, config_valid, max_file_size };
}

// ── Markdown output ───────────────────────────────────────────────────

fn print_markdown(state: &CurrentState) {
    let version = env!("CARGO_PKG_VERSION");
    print_markdown_header(version);
    print_markdown_state(state);
    println!();
    print_markdown_exit_codes();
}

fn print_markdown_header(version: &str) {
    print!(
        "\
# doccomment {version}

Find code references and code blocks in documentation comments.

## Reference Syntax

    /// Returns [a], see [Type.member] and [new Type.named].
    /// Operators: [Object.operator ==], [operator []=].
    /// Skipped: [links](url), [text][ref], `code [spans]`, [:legacy code:]

## Code Blocks

    /// ```lang          fenced, three or more backticks
    ///
    ///     indented     four or more spaces after a blank line

## Commands

    doccomment scan [PATH]              List documentation comments under PATH
    doccomment resolve <TEXT>           Parse one bracket's contents
    doccomment watch [PATH]             Re-scan on every file change
    doccomment info [--json]            This document

## Supported Languages

| Extension           | Language   | Markers      |
|---------------------|------------|--------------|
| .rs                 | Rust       | `///` `/**`  |
| .go                 | Go         | `//`         |
| .ts .js .mts .cts   | TypeScript | `/**`        |
| .tsx .jsx           | TSX        | `/**`        |

## Configuration (.doccomment.toml)

    include = [\"src/\"]                  # only scan these paths
    exclude = [\"src/generated/\"]        # skip these paths
    max_file_size = 16777216             # bytes

    [markers.go]
    line = \"///\"                        # override documentation markers

## Current State

"
    );
}

fn print_markdown_state(state: &CurrentState) {
    match (state.config_found, state.config_valid) {
        (false, _) => println!("Config:        .doccomment.toml (not found)"),
        (true, true) => println!("Config:        .doccomment.toml (found)"),
        (true, false) => println!("Config:        .doccomment.toml (invalid)"),
    }
    println!("Max file size: {} bytes", state.max_file_size);
}

fn print_markdown_exit_codes() {
    print!(
        "\
## Exit Codes

| Code | Meaning |
|------|---------|
| 0    | Success |
| 1    | Text did not resolve to a reference |
| 3    | Runtime error |
"
    );
}

// ── JSON output ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct InfoJson {
    current_state: StateJson,
    exit_codes: Vec<ExitCodeInfo>,
    supported_languages: Vec<LanguageInfo>,
    version: String,
}

#[derive(Serialize)]
struct LanguageInfo {
    extensions: Vec<String>,
    language: String,
    markers: Vec<String>,
}

#[derive(Serialize)]
struct ExitCodeInfo {
    code: u8,
    meaning: String,
}

#[derive(Serialize)]
struct StateJson {
    config_found: bool,
    config_valid: bool,
    max_file_size: u64,
}

fn language(extensions: &[&str], name: &str, markers: &[&str]) -> LanguageInfo {
    return LanguageInfo {
        extensions: extensions.iter().map(|e| return format!(".{e}")).collect(),
        language: name.to_string(),
        markers: markers.iter().map(|m| return (*m).to_string()).collect(),
    };
}

fn print_json(state: &CurrentState) {
    let info = InfoJson {
        current_state: StateJson {
            config_found: state.config_found,
            config_valid: state.config_valid,
            max_file_size: state.max_file_size,
        },
        exit_codes: vec![
            ExitCodeInfo { code: 0, meaning: "Success".to_string() },
            ExitCodeInfo { code: 1, meaning: "Text did not resolve to a reference".to_string() },
            ExitCodeInfo { code: 3, meaning: "Runtime error".to_string() },
        ],
        supported_languages: vec![
            language(&["rs"], "Rust", &["///", "/**"]),
            language(&["go"], "Go", &["//"]),
            language(&["ts", "js", "mts", "cts"], "TypeScript", &["/**"]),
            language(&["tsx", "jsx"], "TSX", &["/**"]),
        ],
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    // serde_json::to_string_pretty won't fail on this structure.
    let json = serde_json::to_string_pretty(&info).unwrap_or_default();
    println!("{json}");
}
