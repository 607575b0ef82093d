//! Find bracketed reference candidates on one comment line.
//!
//! Markdown links (`[text](url)`, `[text]: url`, `[text][ref]`) and inline code
//! spans are skipped; every other `[...]` is handed to the resolver. Scanning
//! is per line with no state carried between lines.

use crate::lines::CommentLine;
use crate::resolver::resolve_reference;
use crate::token::Tokenizer;
use crate::types::CommentReference;

/// Closes an old-style `[:code:]` span.
const LEGACY_CODE_CLOSE: &str = ":]";

/// Scan `line` and append every resolved reference to `references`.
pub fn scan_line<T>(line: CommentLine<'_>, tokenizer: &T, references: &mut Vec<CommentReference>)
where
    T: Tokenizer + ?Sized,
{
    let content = line.content;
    let bytes = content.as_bytes();
    let mut index = 0_usize;

    while let Some(&ch) = bytes.get(index) {
        match ch {
            b'`' => {
                if let Some(close) = find_byte(bytes, b'`', index.saturating_add(1)) {
                    index = close;
                }
            },
            b'[' => {
                index = index.saturating_add(1);
                if bytes.get(index) == Some(&b':') {
                    let Some(close) = find_str(content, LEGACY_CODE_CLOSE, index.saturating_add(1)) else {
                        return;
                    };
                    index = close.saturating_add(1);
                } else {
                    let start = index;
                    let end = find_byte(bytes, b']', start).unwrap_or_else(|| return recover_reference_end(bytes, start));
                    if is_link_text(bytes, end) {
                        tracing::trace!(offset = line.offset.saturating_add(start), "skipping link text");
                    } else if let Some(text) = content.get(start..end) {
                        let offset = line.offset.saturating_add(start);
                        if let Some(reference) = resolve_reference(text, offset, tokenizer) {
                            references.push(reference);
                        }
                    }
                    index = end;
                }
            },
            _ => {},
        }
        index = index.saturating_add(1);
    }
}

/// First position of `needle` at or after `from`.
fn find_byte(bytes: &[u8], needle: u8, from: usize) -> Option<usize> {
    let rest = bytes.get(from..)?;
    return rest
        .iter()
        .position(|&b| return b == needle)
        .map(|position| return from.saturating_add(position));
}

/// First position of `needle` at or after `from`.
fn find_str(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let rest = haystack.get(from..)?;
    return rest.find(needle).map(|position| return from.saturating_add(position));
}

/// Whether the bracketed text ending at `end` is the label of a markdown link:
/// followed directly by `(` or `:`, or by optional whitespace and `[`.
fn is_link_text(bytes: &[u8], end: usize) -> bool {
    let mut index = end.saturating_add(1);
    let Some(&next) = bytes.get(index) else {
        return false;
    };
    if next == b'(' || next == b':' {
        return true;
    }
    while let Some(&ch) = bytes.get(index) {
        if !ch.is_ascii_whitespace() {
            return ch == b'[';
        }
        index = index.saturating_add(1);
    }
    return false;
}

/// End of a reference whose closing `]` is missing: an identifier, optionally
/// followed by `.` and a second identifier.
fn recover_reference_end(bytes: &[u8], start: usize) -> usize {
    let mut index = skip_identifier(bytes, start);
    if bytes.get(index) == Some(&b'.') {
        index = skip_identifier(bytes, index.saturating_add(1));
    }
    return index;
}

/// Skip a run of letters followed by letters or digits.
fn skip_identifier(bytes: &[u8], mut index: usize) -> usize {
    while bytes.get(index).is_some_and(u8::is_ascii_alphabetic) {
        index = index.saturating_add(1);
    }
    while bytes.get(index).is_some_and(u8::is_ascii_alphanumeric) {
        index = index.saturating_add(1);
    }
    return index;
}
