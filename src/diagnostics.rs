use doccomment::error::Error;
use doccomment::grammar::SUPPORTED_EXTENSIONS;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic: what happened, and
/// how to fix it where there is a fix.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::FileNotFound { path } => format!(
            "\
# Error: File Not Found

`{}` does not exist.
",
            path.display()
        ),
        Error::FileTooLarge { file, max_bytes, size_bytes } => format!(
            "\
# Error: File Too Large

`{}` is {size_bytes} bytes (max {max_bytes}).

## Fix

Raise the limit in `.doccomment.toml`:

    max_file_size = {size_bytes}
",
            file.display()
        ),
        Error::Io(err) => format!(
            "\
# Error: I/O

{err}
"
        ),
        Error::Json(err) => format!(
            "\
# Error: JSON Output

{err}
"
        ),
        Error::ParseFailed { file, reason } => format!(
            "\
# Error: Parse Failed

Could not parse `{}`: {reason}
",
            file.display()
        ),
        Error::TomlDe(err) => format!(
            "\
# Error: Invalid TOML

{err}

## Fix

Check `.doccomment.toml` against `doccomment info`.
"
        ),
        Error::UnsupportedLanguage { ext } => render_unsupported_language(ext),
        Error::WatchFailed { reason } => format!(
            "\
# Error: Watch Failed

{reason}
"
        ),
    };
}

/// List the extensions that do have a grammar.
fn render_unsupported_language(ext: &str) -> String {
    let supported = SUPPORTED_EXTENSIONS
        .iter()
        .map(|e| return format!("- `.{e}`"))
        .collect::<Vec<_>>()
        .join("\n");
    return format!(
        "\
# Error: Unsupported Language

No tree-sitter grammar for `.{ext}` files.

## Supported extensions

{supported}
"
    );
}
