//! Pull documentation comments out of a source file with tree-sitter.
//!
//! Comment nodes are grouped per parent: line comments on consecutive rows
//! form one chain, a block comment always stands alone. Each group that
//! carries a documentation marker is handed to [`parse_doc_comment`].

use std::path::Path;

use serde::Serialize;
use tree_sitter::{Node, Parser, Tree};

use crate::doc_comment::parse_doc_comment;
use crate::error::Error;
use crate::grammar::SourceLanguage;
use crate::lines::DocSyntax;
use crate::token::Tokenizer;
use crate::types::{CommentToken, DocComment};

/// Sibling kinds that sit between a comment and its declaration.
const TRANSPARENT_KINDS: &[&str] = &["attribute_item", "decorator"];

/// A documentation comment found in a source file.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedComment {
    /// Node kind of the declaration following the comment, if any.
    pub declaration: Option<String>,
    /// Parsed comment.
    pub doc: DocComment,
    /// 1-based line of the first documentation unit.
    pub line: usize,
}

/// Parse `source` and return every documentation comment in document order.
///
/// # Errors
///
/// Returns `Error::FileTooLarge` if the source exceeds `max_file_size`,
/// or `Error::ParseFailed` if tree-sitter cannot parse the source.
pub fn extract_doc_comments<T>(
    file_path: &Path,
    source: &str,
    language: &SourceLanguage,
    max_file_size: u64,
    tokenizer: &T,
) -> Result<Vec<ExtractedComment>, Error>
where
    T: Tokenizer + ?Sized,
{
    let source_len = u64::try_from(source.len()).unwrap_or(u64::MAX);
    if source_len > max_file_size {
        return Err(Error::FileTooLarge {
            file: file_path.to_path_buf(),
            max_bytes: max_file_size,
            size_bytes: source_len,
        });
    }

    let tree = parse_source(file_path, source, language)?;
    let mut groups = Vec::new();
    collect_groups(tree.root_node(), source, &mut groups);

    let mut comments = Vec::new();
    for group in &groups {
        if let Some(comment) = build_comment(group, source, &language.syntax, tokenizer) {
            comments.push(comment);
        }
    }
    tracing::debug!(file = %file_path.display(), comments = comments.len(), "extracted documentation comments");
    return Ok(comments);
}

/// Parse source text into a tree-sitter syntax tree.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if the language cannot be set or parsing fails.
fn parse_source(file_path: &Path, source: &str, language: &SourceLanguage) -> Result<Tree, Error> {
    let mut parser = Parser::new();
    parser.set_language(&language.grammar).map_err(|e| {
        return Error::ParseFailed {
            file: file_path.to_path_buf(),
            reason: e.to_string(),
        };
    })?;

    return parser.parse(source, None).ok_or_else(|| {
        return Error::ParseFailed {
            file: file_path.to_path_buf(),
            reason: "tree-sitter returned None".to_string(),
        };
    });
}

/// Whether a node is a comment of any style.
fn is_comment(node: &Node<'_>) -> bool {
    return node.kind().contains("comment");
}

/// Whether a comment node is a `/* ... */` block rather than a line comment.
fn is_block(node: &Node<'_>, source: &str) -> bool {
    return source.get(node.byte_range()).is_some_and(|text| return text.starts_with("/*"));
}

/// Walk the tree and group sibling comment nodes into chains.
fn collect_groups<'t>(node: Node<'t>, source: &str, groups: &mut Vec<Vec<Node<'t>>>) {
    let mut cursor = node.walk();
    let mut chain: Vec<Node<'t>> = Vec::new();

    for child in node.children(&mut cursor) {
        if !is_comment(&child) {
            flush(&mut chain, groups);
            collect_groups(child, source, groups);
            continue;
        }

        let continues = !is_block(&child, source)
            && chain.last().is_some_and(|last| {
                return !is_block(last, source)
                    && last.start_position().row.saturating_add(1) == child.start_position().row;
            });
        if !continues {
            flush(&mut chain, groups);
        }
        chain.push(child);
    }
    flush(&mut chain, groups);
}

/// Move a finished chain into `groups`.
fn flush<'t>(chain: &mut Vec<Node<'t>>, groups: &mut Vec<Vec<Node<'t>>>) {
    if !chain.is_empty() {
        groups.push(std::mem::take(chain));
    }
}

/// Turn one comment group into a parsed documentation comment, or `None` if
/// the group carries no documentation marker.
fn build_comment<T>(group: &[Node<'_>], source: &str, syntax: &DocSyntax, tokenizer: &T) -> Option<ExtractedComment>
where
    T: Tokenizer + ?Sized,
{
    let units: Vec<(Node<'_>, CommentToken)> = group
        .iter()
        .filter_map(|node| {
            let text = source.get(node.byte_range())?;
            let token = CommentToken::new(node.start_byte(), text.trim_end_matches(['\n', '\r']));
            return Some((*node, token));
        })
        .collect();

    let start = units.iter().position(|(node, token)| {
        if is_block(node, source) {
            return syntax.is_block_doc(&token.text);
        }
        return syntax.is_line_doc(&token.text);
    })?;
    let doc_units = units.get(start..)?;
    let (first_node, first_token) = doc_units.first()?;
    let (last_node, _) = doc_units.last()?;
    let tokens: Vec<CommentToken> = doc_units.iter().map(|(_, token)| return token.clone()).collect();

    tracing::trace!(offset = first_token.offset, units = tokens.len(), "documentation comment");
    let doc = parse_doc_comment(&tokens, syntax, tokenizer);
    return Some(ExtractedComment {
        declaration: following_declaration(*last_node),
        doc,
        line: first_node.start_position().row.saturating_add(1),
    });
}

/// Kind of the next named sibling that is neither a comment nor an attribute.
fn following_declaration(node: Node<'_>) -> Option<String> {
    let mut sibling = node.next_named_sibling();
    while let Some(candidate) = sibling {
        if !is_comment(&candidate) && !TRANSPARENT_KINDS.contains(&candidate.kind()) {
            return Some(candidate.kind().to_string());
        }
        sibling = candidate.next_named_sibling();
    }
    return None;
}
