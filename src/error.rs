//! Errors raised while reading and parsing source files.
//!
//! The comment analysis itself never fails; these cover the host side: file
//! access, configuration, and tree-sitter parsing.

use std::path::PathBuf;

/// Every variant names the file or reason so a diagnostic can be rendered
/// without further context.
#[allow(clippy::error_impl_error, reason = "crate-level error type re-exported as doccomment::Error")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A path given on the command line does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Source file exceeds the configured size limit.
    #[error("file too large ({size_bytes} bytes, max {max_bytes}): {}", file.display())]
    FileTooLarge {
        /// File that exceeded the size limit.
        file: PathBuf,
        /// Maximum allowed file size in bytes.
        max_bytes: u64,
        /// Actual file size in bytes.
        size_bytes: u64,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON report serialization failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped serialization error.
        #[from]
        serde_json::Error,
    ),

    /// Tree-sitter failed to parse a source file.
    #[error("parse failed: {}: {reason}", file.display())]
    ParseFailed {
        /// File that failed to parse.
        file: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// `.doccomment.toml` is not valid.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// No tree-sitter grammar registered for this file extension.
    #[error("no grammar for extension: .{ext}")]
    UnsupportedLanguage {
        /// File extension without the leading dot.
        ext: String,
    },

    /// The filesystem watcher could not be set up.
    #[error("watch failed: {reason}")]
    WatchFailed {
        /// Description of the watcher failure.
        reason: String,
    },
}
