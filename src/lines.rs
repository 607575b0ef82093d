//! Normalize a documentation comment into a stream of `(offset, text)` lines.
//!
//! A comment is physically either one block unit (`/** ... */`) or a chain of
//! line units (`/// ...`). Both become the same forward-only sequence of
//! [`CommentLine`]s with the comment markers stripped.

use std::slice;

use crate::types::CommentToken;

/// The `* ` run that continues a block comment line.
const CONTINUATION: &str = "* ";

/// One normalized comment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentLine<'a> {
    /// Line text after marker stripping, without the line break.
    pub content: &'a str,
    /// Absolute byte offset of the first character of `content`.
    pub offset: usize,
}

impl CommentLine<'_> {
    /// Whether the line has no content at all.
    pub fn is_empty(&self) -> bool {
        return self.content.is_empty();
    }
}

/// Which comment markers introduce documentation in a language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSyntax {
    /// Opening of a documentation block comment, e.g. `/**`.
    pub block_marker: Option<String>,
    /// Prefix of a documentation line comment, e.g. `///`.
    pub line_marker: Option<String>,
    /// Whether a marker directly followed by another marker character is a
    /// plain comment, as Rust treats `////`, `/***` and `/**/`.
    pub strict_markers: bool,
}

impl Default for DocSyntax {
    fn default() -> Self {
        return Self {
            strict_markers: true,
            ..Self::new(Some("///"), Some("/**"))
        };
    }
}

impl DocSyntax {
    /// Build a syntax from optional line and block markers. Markers are
    /// matched as plain prefixes.
    pub fn new(line_marker: Option<&str>, block_marker: Option<&str>) -> Self {
        return Self {
            block_marker: block_marker.map(String::from),
            line_marker: line_marker.map(String::from),
            strict_markers: false,
        };
    }

    /// Whether a raw comment unit opens a documentation block comment.
    pub fn is_block_doc(&self, text: &str) -> bool {
        return self.opens_with(text, self.block_marker.as_deref());
    }

    /// Whether a raw comment unit is a documentation line comment.
    pub fn is_line_doc(&self, text: &str) -> bool {
        return self.opens_with(text, self.line_marker.as_deref());
    }

    /// Whether `text` starts with a non-empty `marker`, honoring `strict_markers`.
    fn opens_with(&self, text: &str, marker: Option<&str>) -> bool {
        let Some(marker) = marker.filter(|m| return !m.is_empty()) else {
            return false;
        };
        let Some(rest) = text.strip_prefix(marker) else {
            return false;
        };
        if !self.strict_markers {
            return true;
        }
        let repeated = marker.chars().last().is_some_and(|last| return rest.starts_with(last));
        return !repeated && !rest.starts_with('/');
    }
}

/// Lines of a documentation comment, selected by the first unit's marker.
pub enum CommentLines<'a> {
    /// Backed by a single block comment unit.
    Block(BlockCommentLines<'a>),
    /// Backed by a chain of line comment units.
    Line(LineCommentLines<'a>),
}

impl<'a> CommentLines<'a> {
    /// Pick the variant for a comment. Returns `None` when the first unit
    /// carries neither documentation marker.
    pub fn new(tokens: &'a [CommentToken], syntax: &'a DocSyntax) -> Option<Self> {
        let first = tokens.first()?;
        if syntax.is_block_doc(&first.text) {
            return Some(Self::Block(BlockCommentLines::new(first)));
        }
        if syntax.is_line_doc(&first.text) {
            return LineCommentLines::new(tokens, syntax).map(Self::Line);
        }
        return None;
    }
}

impl<'a> Iterator for CommentLines<'a> {
    type Item = CommentLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        return match self {
            Self::Block(lines) => lines.next(),
            Self::Line(lines) => lines.next(),
        };
    }
}

/// Lines of one block comment unit. The first line is returned verbatim;
/// later lines lose their leading whitespace and `*` decoration.
pub struct BlockCommentLines<'a> {
    /// Offset of the next line start within `text`, or `None` when exhausted.
    next_start: Option<usize>,
    /// Absolute offset of `text`.
    offset: usize,
    /// Raw unit text.
    text: &'a str,
}

impl<'a> BlockCommentLines<'a> {
    /// Iterate the lines of a block comment unit.
    pub fn new(token: &'a CommentToken) -> Self {
        return Self {
            next_start: Some(0),
            offset: token.offset,
            text: &token.text,
        };
    }

    /// Strip leading whitespace and the `* ` or lone `*` continuation marker.
    /// Returns the byte count removed.
    fn decoration_width(line: &str) -> usize {
        let trimmed = line.trim_start_matches([' ', '\t']);
        let whitespace = line.len().saturating_sub(trimmed.len());
        if trimmed.starts_with(CONTINUATION) {
            return whitespace.saturating_add(CONTINUATION.len());
        }
        if trimmed == "*" {
            return whitespace.saturating_add(1);
        }
        return whitespace;
    }
}

impl<'a> Iterator for BlockCommentLines<'a> {
    type Item = CommentLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_start.take()?;
        let rest = self.text.get(start..)?;
        let (line, break_at) = match rest.find('\n') {
            None => (rest, None),
            Some(newline) => (rest.get(..newline)?, Some(newline)),
        };
        self.next_start = break_at.map(|newline| return start.saturating_add(newline).saturating_add(1));

        let line = line.strip_suffix('\r').unwrap_or(line);
        let skip = if start == 0 { 0 } else { Self::decoration_width(line) };
        let content = line.get(skip..)?;

        return Some(CommentLine {
            content,
            offset: self.offset.saturating_add(start).saturating_add(skip),
        });
    }
}

/// Lines of a chain of line comment units. Units that are not documentation
/// lines are skipped.
pub struct LineCommentLines<'a> {
    /// The documentation marker stripped from each unit.
    marker: &'a str,
    /// Decides which units are documentation lines.
    syntax: &'a DocSyntax,
    /// Units not yet visited.
    units: slice::Iter<'a, CommentToken>,
}

impl<'a> LineCommentLines<'a> {
    /// Iterate the documentation lines of a chain starting at a documentation
    /// unit. Returns `None` when `syntax` has no line marker.
    pub fn new(tokens: &'a [CommentToken], syntax: &'a DocSyntax) -> Option<Self> {
        let marker = syntax.line_marker.as_deref()?;
        debug_assert!(
            tokens.first().is_some_and(|t| return syntax.is_line_doc(&t.text)),
            "line comment chain must start with a documentation unit"
        );
        return Some(Self {
            marker,
            syntax,
            units: tokens.iter(),
        });
    }
}

impl<'a> Iterator for LineCommentLines<'a> {
    type Item = CommentLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let marker = self.marker;
        let syntax = self.syntax;
        let unit = self.units.find(|unit| return syntax.is_line_doc(&unit.text))?;
        let content = unit.text.get(marker.len()..)?;
        let content = content.trim_end_matches(['\n', '\r']);
        return Some(CommentLine {
            content,
            offset: unit.offset.saturating_add(marker.len()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<'a>(lines: impl Iterator<Item = CommentLine<'a>>) -> Vec<(usize, &'a str)> {
        lines.map(|l| (l.offset, l.content)).collect()
    }

    #[test]
    fn block_first_line_is_verbatim() {
        let token = CommentToken::new(100, "/** Hello [a].\n * second\n */");
        let lines = collect(BlockCommentLines::new(&token));
        assert_eq!(lines[0], (100, "/** Hello [a]."));
    }

    #[test]
    fn block_strips_star_space_and_lone_star() {
        let token = CommentToken::new(0, "/**\n * one\n *\n *   indented\n */");
        let lines = collect(BlockCommentLines::new(&token));
        assert_eq!(
            lines,
            vec![(0, "/**"), (7, "one"), (13, ""), (17, "  indented"), (29, "*/")]
        );
    }

    #[test]
    fn block_without_stars_drops_leading_whitespace() {
        let token = CommentToken::new(0, "/**\n   plain\n*/");
        let lines = collect(BlockCommentLines::new(&token));
        assert_eq!(lines[1], (7, "plain"));
    }

    #[test]
    fn block_crlf_is_not_part_of_content() {
        let token = CommentToken::new(0, "/**\r\n * x\r\n */");
        let lines = collect(BlockCommentLines::new(&token));
        assert_eq!(lines, vec![(0, "/**"), (8, "x"), (12, "*/")]);
    }

    #[test]
    fn line_chain_strips_marker_only() {
        let tokens = vec![CommentToken::new(0, "/// first"), CommentToken::new(10, "///   code")];
        let syntax = DocSyntax::default();
        let lines = collect(LineCommentLines::new(&tokens, &syntax).unwrap());
        assert_eq!(lines, vec![(3, " first"), (13, "   code")]);
    }

    #[test]
    fn line_chain_skips_ordinary_comments() {
        let tokens = vec![
            CommentToken::new(0, "/// a"),
            CommentToken::new(6, "// not docs"),
            CommentToken::new(18, "/// b\n"),
        ];
        let syntax = DocSyntax::default();
        let lines = collect(LineCommentLines::new(&tokens, &syntax).unwrap());
        assert_eq!(lines, vec![(3, " a"), (21, " b")]);
    }

    #[test]
    fn selection_follows_first_marker() {
        let syntax = DocSyntax::default();
        let block = vec![CommentToken::new(0, "/** x */")];
        assert!(matches!(CommentLines::new(&block, &syntax), Some(CommentLines::Block(_))));

        let line = vec![CommentToken::new(0, "/// x")];
        assert!(matches!(CommentLines::new(&line, &syntax), Some(CommentLines::Line(_))));

        let plain = vec![CommentToken::new(0, "// x")];
        assert!(CommentLines::new(&plain, &syntax).is_none());
    }

    #[test]
    fn strict_markers_reject_repeated_marker_characters() {
        let syntax = DocSyntax::default();
        assert!(!syntax.is_line_doc("//// plain"));
        assert!(!syntax.is_block_doc("/**/"));
        assert!(!syntax.is_block_doc("/*** banner ***/"));
        assert!(syntax.is_line_doc("///"));
        assert!(syntax.is_block_doc("/** doc */"));

        let loose = DocSyntax::new(Some("//"), None);
        assert!(loose.is_line_doc("/// still go docs"));
    }

    #[test]
    fn quadruple_slash_inside_chain_is_skipped() {
        let tokens = vec![CommentToken::new(0, "/// a"), CommentToken::new(6, "//// b"), CommentToken::new(13, "/// c")];
        let syntax = DocSyntax::default();
        let lines = collect(LineCommentLines::new(&tokens, &syntax).unwrap());
        assert_eq!(lines, vec![(3, " a"), (16, " c")]);
    }

    #[test]
    fn exhausted_sequence_stays_exhausted() {
        let token = CommentToken::new(0, "/** only */");
        let mut lines = BlockCommentLines::new(&token);
        assert!(lines.next().is_some());
        assert!(lines.next().is_none());
        assert!(lines.next().is_none());
    }
}
