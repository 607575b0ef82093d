//! CLI commands: scan a tree for documentation comments, resolve one reference.

use std::path::Path;
use std::process::ExitCode;

use walkdir::WalkDir;

use doccomment::config::Config;
use doccomment::error::Error;
use doccomment::extractor::{self, ExtractedComment};
use doccomment::grammar::{self, SourceLanguage};
use doccomment::resolver;
use doccomment::token::SymbolTokenizer;

use crate::report::{self, FileReport, Format};

/// Walk `root` and extract documentation comments from every supported file.
/// Unreadable or unparsable files are skipped with a warning.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if `root` does not exist, or `Error::TomlDe`
/// if the project config is malformed.
pub fn collect(root: &Path) -> Result<Vec<FileReport>, Error> {
    if !root.exists() {
        return Err(Error::FileNotFound {
            path: root.to_path_buf(),
        });
    }
    let config_root = if root.is_dir() { root } else { Path::new(".") };
    let config = Config::load(config_root)?;

    let mut reports = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| return !is_hidden(e.path(), root))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            },
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let shown = if relative.as_os_str().is_empty() { entry.path() } else { relative };
        let shown = shown.to_string_lossy().replace('\\', "/");
        if !config.should_scan(&shown) {
            tracing::debug!(path = %shown, "excluded by config");
            continue;
        }

        let Ok(language) = grammar::language_for_path(entry.path()) else {
            continue;
        };
        match scan_file(entry.path(), &language, &config) {
            Ok(comments) if comments.is_empty() => {},
            Ok(comments) => reports.push(FileReport { comments, path: shown }),
            Err(e) => tracing::warn!(path = %shown, error = %e, "skipping file"),
        }
    }

    let total: usize = reports.iter().map(|r| return r.comments.len()).sum();
    tracing::info!(files = reports.len(), comments = total, "scan complete");
    return Ok(reports);
}

/// Whether a path below `root` is a dot-file or dot-directory.
fn is_hidden(path: &Path, root: &Path) -> bool {
    if path == root {
        return false;
    }
    return path
        .file_name()
        .and_then(|name| return name.to_str())
        .is_some_and(|name| return name.starts_with('.'));
}

/// Read one file and extract its documentation comments.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read, or the extractor's errors.
fn scan_file(path: &Path, language: &SourceLanguage, config: &Config) -> Result<Vec<ExtractedComment>, Error> {
    let source = std::fs::read_to_string(path)?;
    let ext = path.extension().and_then(|e| return e.to_str()).unwrap_or("");
    let language = SourceLanguage {
        grammar: language.grammar.clone(),
        syntax: config.syntax_for(ext, language.syntax.clone()),
    };
    return extractor::extract_doc_comments(path, &source, &language, config.max_file_size, &SymbolTokenizer);
}

/// Resolve raw bracket contents and print the reference.
/// Exit 1 if the text is not a reference.
///
/// # Errors
///
/// Returns `Error::Json` if JSON output fails.
pub fn resolve(text: &str, offset: usize, format: Format) -> Result<ExitCode, Error> {
    let Some(reference) = resolver::resolve_reference(text, offset, &SymbolTokenizer) else {
        println!("unresolved");
        return Ok(ExitCode::from(1));
    };
    println!("{}", report::render_reference(&reference, format)?);
    return Ok(ExitCode::SUCCESS);
}

/// Scan `path` and print the report.
///
/// # Errors
///
/// Returns errors from [`collect`] or report rendering.
pub fn scan(path: &Path, format: Format) -> Result<ExitCode, Error> {
    let reports = collect(path)?;
    print!("{}", report::render_scan(&reports, format)?);
    if format == Format::Json {
        println!();
    }
    return Ok(ExitCode::SUCCESS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_skips_hidden_and_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join(".git/x.rs"), "/// [a]\nfn a() {}\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "/// [a]").unwrap();
        std::fs::write(dir.path().join("lib.rs"), "/// [b]\nfn b() {}\n").unwrap();

        let reports = collect(dir.path()).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].path, "lib.rs");
    }

    #[test]
    fn config_excludes_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("gen")).unwrap();
        std::fs::write(dir.path().join(".doccomment.toml"), "exclude = [\"gen/\"]").unwrap();
        std::fs::write(dir.path().join("gen/out.rs"), "/// [a]\nfn a() {}\n").unwrap();

        assert!(collect(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn oversized_file_is_skipped_and_others_kept() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".doccomment.toml"), "max_file_size = 24").unwrap();
        std::fs::write(dir.path().join("big.rs"), "/// [a] with a long tail of words\nfn a() {}\n").unwrap();
        std::fs::write(dir.path().join("small.rs"), "/// [b]\nfn b() {}\n").unwrap();

        let reports = collect(dir.path()).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].path, "small.rs");
    }

    #[test]
    fn missing_root_is_an_error() {
        let err = collect(Path::new("/nonexistent/doccomment")).err().unwrap();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
