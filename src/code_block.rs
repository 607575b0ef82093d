//! Fenced and indented markdown code blocks inside documentation comments.
//!
//! The scanners own the line sequence while inside a block and hand control
//! back to the driver once the block ends.

use crate::lines::CommentLine;
use crate::types::{CodeBlock, CodeBlockLine};

/// The backtick that opens and closes a fence.
const BACKTICK: char = '`';

/// Number of characters of a candidate closing line compared against the fence.
///
/// The comparison target is sized to the opening run, so fences opened with
/// four or more backticks can never be closed and run to the comment's end.
const CLOSING_PROBE_LEN: usize = 3;

/// Leading whitespace width at which a line after a blank line opens an indented block.
pub const INDENT_WIDTH: usize = 4;

/// Minimum backtick run that opens a fence.
const MIN_FENCE_TICKS: usize = 3;

/// How a code block ended, and what the driver should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEnd<'a> {
    /// A closing fence was consumed; the driver pulls the next line itself.
    Closed,
    /// The comment ended inside the block.
    Exhausted,
    /// The block ended at this line, which was not consumed and must be reclassified.
    Handoff(CommentLine<'a>),
}

/// Number of leading space or tab characters.
pub fn leading_whitespace_width(content: &str) -> usize {
    return content
        .len()
        .saturating_sub(content.trim_start_matches([' ', '\t']).len());
}

/// The length of the backtick run opening a fence, if the line is one.
pub fn fence_tick_count(content: &str) -> Option<usize> {
    let rest = content.trim_start_matches([' ', '\t']);
    let ticks = rest.len().saturating_sub(rest.trim_start_matches(BACKTICK).len());
    if ticks < MIN_FENCE_TICKS {
        return None;
    }
    return Some(ticks);
}

/// Consume a fenced code block whose opening delimiter is `opening`.
///
/// Every line up to and including the closing delimiter is recorded. A block
/// left open when the comment ends is still returned, with [`BlockEnd::Exhausted`].
pub fn scan_fenced<'a, I>(opening: CommentLine<'a>, lines: &mut I) -> (CodeBlock, BlockEnd<'a>)
where
    I: Iterator<Item = CommentLine<'a>>,
{
    let rest = opening.content.trim_start_matches([' ', '\t']);
    let ticks = fence_tick_count(opening.content).unwrap_or(MIN_FENCE_TICKS);
    let info_string = rest
        .get(ticks..)
        .map(str::trim)
        .filter(|info| return !info.is_empty())
        .map(String::from);
    let fence = BACKTICK.to_string().repeat(ticks);

    let mut block = CodeBlock {
        info_string,
        lines: vec![span_of(opening)],
    };

    for line in lines.by_ref() {
        block.lines.push(span_of(line));
        if is_closing_fence(line.content, &fence) {
            tracing::trace!(offset = line.offset, "fenced code block closed");
            return (block, BlockEnd::Closed);
        }
    }

    tracing::trace!(offset = opening.offset, "fenced code block runs to end of comment");
    return (block, BlockEnd::Exhausted);
}

/// Consume an indented code block starting at `first`.
///
/// Lines are absorbed while their indentation stays at [`INDENT_WIDTH`] or
/// more. The first shallower line ends the block and is handed back.
pub fn scan_indented<'a, I>(first: CommentLine<'a>, lines: &mut I) -> (CodeBlock, BlockEnd<'a>)
where
    I: Iterator<Item = CommentLine<'a>>,
{
    let mut block = CodeBlock {
        info_string: None,
        lines: vec![span_of(first)],
    };

    for line in lines.by_ref() {
        if leading_whitespace_width(line.content) < INDENT_WIDTH {
            return (block, BlockEnd::Handoff(line));
        }
        block.lines.push(span_of(line));
    }

    return (block, BlockEnd::Exhausted);
}

/// Whether the first characters after indentation match the fence string.
fn is_closing_fence(content: &str, fence: &str) -> bool {
    let rest = content.trim_start_matches([' ', '\t']);
    return rest
        .get(..CLOSING_PROBE_LEN)
        .is_some_and(|probe| return probe == fence);
}

/// The source span of a whole normalized line.
fn span_of(line: CommentLine<'_>) -> CodeBlockLine {
    return CodeBlockLine {
        length: line.content.len(),
        offset: line.offset,
    };
}
