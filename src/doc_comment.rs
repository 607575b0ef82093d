//! Build a [`DocComment`] from the raw units of one documentation comment.

use crate::code_block::{self, BlockEnd, INDENT_WIDTH};
use crate::lines::{CommentLine, CommentLines, DocSyntax};
use crate::scanner;
use crate::token::Tokenizer;
use crate::types::{CommentToken, DocComment};

/// Extract references and code blocks from a documentation comment.
///
/// `tokens` is either a single block comment unit or a chain of line comment
/// units starting at a documentation line. A comment whose first unit has no
/// documentation marker yields a `DocComment` with no references or blocks.
pub fn parse_doc_comment<T>(tokens: &[CommentToken], syntax: &DocSyntax, tokenizer: &T) -> DocComment
where
    T: Tokenizer + ?Sized,
{
    let mut doc = DocComment {
        code_blocks: Vec::new(),
        references: Vec::new(),
        tokens: tokens.to_vec(),
    };
    let Some(mut lines) = CommentLines::new(tokens, syntax) else {
        tracing::trace!(offset = ?tokens.first().map(|t| return t.offset), "not a documentation comment");
        return doc;
    };

    // The start of a comment behaves like the line after a blank line.
    let mut previous_empty = true;
    let mut current = lines.next();

    while let Some(line) = current {
        let width = code_block::leading_whitespace_width(line.content);

        if previous_empty && width >= INDENT_WIDTH {
            let (block, end) = code_block::scan_indented(line, &mut lines);
            doc.code_blocks.push(block);
            let BlockEnd::Handoff(next) = end else {
                break;
            };
            previous_empty = next.is_empty();
            current = Some(next);
            continue;
        }

        if code_block::fence_tick_count(line.content).is_some() {
            let (block, end) = code_block::scan_fenced(line, &mut lines);
            doc.code_blocks.push(block);
            if end == BlockEnd::Exhausted {
                break;
            }
            previous_empty = false;
            current = lines.next();
            continue;
        }

        scan_prose_line(line, tokenizer, &mut doc);
        previous_empty = line.is_empty();
        current = lines.next();
    }

    tracing::trace!(
        references = doc.references.len(),
        code_blocks = doc.code_blocks.len(),
        "parsed documentation comment"
    );
    return doc;
}

/// Hand a non-code line to the reference scanner.
fn scan_prose_line<T>(line: CommentLine<'_>, tokenizer: &T, doc: &mut DocComment)
where
    T: Tokenizer + ?Sized,
{
    scanner::scan_line(line, tokenizer, &mut doc.references);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::SymbolTokenizer;
    use crate::types::{CodeBlockLine, ReferenceExpr};

    /// Split `source` into `///` line units the way a host lexer would.
    fn line_units(source: &str) -> Vec<CommentToken> {
        let mut offset = 0;
        let mut tokens = Vec::new();
        for line in source.split('\n') {
            tokens.push(CommentToken::new(offset, line));
            offset += line.len() + 1;
        }
        tokens
    }

    fn parse(source: &str) -> DocComment {
        parse_doc_comment(&line_units(source), &DocSyntax::default(), &SymbolTokenizer)
    }

    fn simple_names(doc: &DocComment) -> Vec<String> {
        doc.references.iter().map(|r| r.expression.display_name()).collect()
    }

    #[test]
    fn plain_prose_has_nothing() {
        let doc = parse("/// Just some words.\n/// More words, no markup.");
        assert!(doc.references.is_empty());
        assert!(doc.code_blocks.is_empty());
    }

    #[test]
    fn references_across_lines() {
        let doc = parse("/// Uses [a] and\n/// `a[i]` and [b].");
        assert_eq!(simple_names(&doc), vec!["a", "b"]);
        assert!(matches!(doc.references[1].expression, ReferenceExpr::Simple(_)));
        assert_eq!(doc.references[0].source_offset, 10);
    }

    #[test]
    fn fenced_block_spans_every_line() {
        let source = "/// Example:\n/// ```dart\n/// var x = [a];\n/// print(x);\n/// ```\n/// After [b].";
        let doc = parse(source);

        assert_eq!(doc.code_blocks.len(), 1);
        let block = &doc.code_blocks[0];
        assert_eq!(block.info_string.as_deref(), Some("dart"));
        assert_eq!(block.lines.len(), 4);
        assert_eq!(block.lines[0], CodeBlockLine { offset: 16, length: 8 });
        assert_eq!(block.lines[0].text(source), Some(" ```dart"));
        assert_eq!(block.lines[1].text(source), Some(" var x = [a];"));
        assert_eq!(block.lines[3].text(source), Some(" ```"));
        assert_eq!(simple_names(&doc), vec!["b"]);
    }

    #[test]
    fn four_tick_fence_runs_to_end() {
        let doc = parse("/// ````\n/// code\n/// ```\n/// [a]");
        assert_eq!(doc.code_blocks.len(), 1);
        assert_eq!(doc.code_blocks[0].lines.len(), 4);
        assert!(doc.references.is_empty());
    }

    #[test]
    fn unterminated_fence_is_still_emitted() {
        let doc = parse("/// ```\n/// [a]");
        assert_eq!(doc.code_blocks.len(), 1);
        assert_eq!(doc.code_blocks[0].lines.len(), 2);
        assert!(doc.references.is_empty());
    }

    #[test]
    fn indented_block_after_blank_line() {
        let source = "/// Text [a].\n///\n///     code [x]\n///     more\n/// Back to [b].";
        let doc = parse(source);

        assert_eq!(doc.code_blocks.len(), 1);
        let block = &doc.code_blocks[0];
        assert_eq!(block.info_string, None);
        assert_eq!(block.lines.len(), 2);
        assert_eq!(block.lines[0].text(source), Some("     code [x]"));
        assert_eq!(simple_names(&doc), vec!["a", "b"]);
    }

    #[test]
    fn indentation_without_blank_line_is_prose() {
        let doc = parse("/// Text.\n///     not code [a]");
        assert!(doc.code_blocks.is_empty());
        assert_eq!(simple_names(&doc), vec!["a"]);
    }

    #[test]
    fn indented_block_at_comment_start() {
        let doc = parse("///     code\n/// [a]");
        assert_eq!(doc.code_blocks.len(), 1);
        assert_eq!(simple_names(&doc), vec!["a"]);
    }

    #[test]
    fn handed_back_line_may_open_a_fence() {
        let doc = parse("///\n///     indented\n/// ```\n/// [x]\n/// ```");
        assert_eq!(doc.code_blocks.len(), 2);
        assert_eq!(doc.code_blocks[1].lines.len(), 3);
        assert!(doc.references.is_empty());
    }

    #[test]
    fn block_comment_with_everything() {
        let source = "/**\n * Creates [new a.A].\n *\n *     indented();\n *\n * See [Object.operator ==].\n */";
        let tokens = vec![CommentToken::new(0, source)];
        let doc = parse_doc_comment(&tokens, &DocSyntax::default(), &SymbolTokenizer);

        assert_eq!(doc.references.len(), 2);
        assert!(doc.references[0].has_constructor_keyword);
        assert_eq!(doc.references[0].expression.display_name(), "a.A");
        assert_eq!(doc.references[1].expression.display_name(), "Object.==");
        assert_eq!(doc.code_blocks.len(), 1);
        assert_eq!(doc.code_blocks[0].lines[0].text(source), Some("    indented();"));
    }

    #[test]
    fn non_doc_comment_is_empty() {
        let tokens = vec![CommentToken::new(0, "// [a]")];
        let doc = parse_doc_comment(&tokens, &DocSyntax::default(), &SymbolTokenizer);
        assert!(doc.references.is_empty());
        assert_eq!(doc.tokens, tokens);
    }

    #[test]
    fn reparsing_is_idempotent() {
        let source = "/// [a.b.c] and [new X]\n///\n///     code\n/// ```js\n/// y\n/// ```";
        assert_eq!(parse(source), parse(source));
    }
}
