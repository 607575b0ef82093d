/// Tree-sitter grammar and documentation markers by file extension.
use std::path::Path;

use tree_sitter::Language;

use crate::error::Error;
use crate::lines::DocSyntax;

/// Extensions with a registered grammar, for help output.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["cts", "go", "js", "jsx", "mts", "rs", "ts", "tsx"];

/// A grammar plus the comment markers that introduce documentation in it.
pub struct SourceLanguage {
    /// Tree-sitter grammar for the file.
    pub grammar: Language,
    /// Documentation markers for the language.
    pub syntax: DocSyntax,
}

/// Map a file extension to its grammar and default documentation markers.
///
/// # Errors
///
/// Returns `Error::UnsupportedLanguage` for unknown extensions.
pub fn language_for_path(path: &Path) -> Result<SourceLanguage, Error> {
    let ext = path.extension().and_then(|e| return e.to_str()).unwrap_or("");

    return match ext {
        "go" => Ok(SourceLanguage {
            grammar: tree_sitter_go::LANGUAGE.into(),
            syntax: DocSyntax::new(Some("//"), None),
        }),
        "js" | "ts" | "mts" | "cts" => Ok(SourceLanguage {
            grammar: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            syntax: DocSyntax::new(None, Some("/**")),
        }),
        "jsx" | "tsx" => Ok(SourceLanguage {
            grammar: tree_sitter_typescript::LANGUAGE_TSX.into(),
            syntax: DocSyntax::new(None, Some("/**")),
        }),
        "rs" => Ok(SourceLanguage {
            grammar: tree_sitter_rust::LANGUAGE.into(),
            syntax: DocSyntax::default(),
        }),
        _ => Err(Error::UnsupportedLanguage {
            ext: ext.to_string(),
        }),
    };
}
