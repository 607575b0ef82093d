//! Scan and resolve output in text or JSON form. Reports go to stdout.

use std::fmt::Write as _;

use serde::Serialize;

use doccomment::error::Error;
use doccomment::extractor::ExtractedComment;
use doccomment::types::{CommentReference, ReferenceExpr};

/// Output format shared by `scan`, `resolve`, and `watch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Pretty-printed JSON.
    Json,
    /// Human-readable listing.
    Text,
}

/// Documentation comments found in one source file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Comments in document order.
    pub comments: Vec<ExtractedComment>,
    /// Path relative to the scan root.
    pub path: String,
}

/// Render a scan result in the requested format.
///
/// # Errors
///
/// Returns `Error::Json` if JSON serialization fails.
pub fn render_scan(reports: &[FileReport], format: Format) -> Result<String, Error> {
    return match format {
        Format::Json => Ok(serde_json::to_string_pretty(reports)?),
        Format::Text => Ok(render_scan_text(reports)),
    };
}

/// Render a resolved reference in the requested format.
///
/// # Errors
///
/// Returns `Error::Json` if JSON serialization fails.
pub fn render_reference(reference: &CommentReference, format: Format) -> Result<String, Error> {
    return match format {
        Format::Json => Ok(serde_json::to_string_pretty(reference)?),
        Format::Text => Ok(describe_reference(reference)),
    };
}

/// One block per file, one line per reference or code block.
fn render_scan_text(reports: &[FileReport]) -> String {
    let mut out = String::new();
    for report in reports {
        for comment in &report.comments {
            let declaration = comment.declaration.as_deref().unwrap_or("-");
            let _ = writeln!(out, "{}:{} ({declaration})", report.path, comment.line);
            for reference in &comment.doc.references {
                let _ = writeln!(out, "  ref   {}", describe_reference(reference));
            }
            for block in &comment.doc.code_blocks {
                let info = block.info_string.as_deref().unwrap_or("");
                let span = block
                    .span()
                    .map_or_else(String::new, |range| return format!(" bytes {}..{}", range.start, range.end));
                let _ = writeln!(out, "  code  ```{info} {} lines{span}", block.lines.len());
            }
        }
    }

    let total: usize = reports.iter().map(|r| return r.comments.len()).sum();
    let _ = writeln!(out, "{total} documentation comments in {} files", reports.len());
    return out;
}

/// `kind name @offset`, with a `new` marker for constructor references.
fn describe_reference(reference: &CommentReference) -> String {
    let kind = match &reference.expression {
        ReferenceExpr::Dotted(_) => "dotted",
        ReferenceExpr::Property(_) => "property",
        ReferenceExpr::Simple(_) => "simple",
    };
    let constructor = if reference.has_constructor_keyword { "new " } else { "" };
    return format!(
        "{kind:<8} {constructor}{} @{}",
        reference.expression.display_name(),
        reference.source_offset
    );
}
