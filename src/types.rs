//! Core domain types for documentation comments, references, and code blocks.

use serde::Serialize;

/// One physical comment unit handed over by the host lexer.
/// A block comment is a single unit; a chain of line comments is several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentToken {
    /// Absolute byte offset of the unit's first character.
    pub offset: usize,
    /// Raw text of the unit, comment markers included, without the trailing line break.
    pub text: String,
}

impl CommentToken {
    /// Build a token from its offset and raw text.
    pub fn new(offset: usize, text: impl Into<String>) -> Self {
        return Self {
            offset,
            text: text.into(),
        };
    }
}

/// One markdown code block found inside a documentation comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Trimmed text after an opening fence; `None` for indented blocks and bare fences.
    pub info_string: Option<String>,
    /// Spans of every physical line of the block, delimiters included.
    pub lines: Vec<CodeBlockLine>,
}

impl CodeBlock {
    /// Source range covering the first through the last line of the block.
    pub fn span(&self) -> Option<std::ops::Range<usize>> {
        let first = self.lines.first()?;
        let last = self.lines.last()?;
        return Some(first.offset..last.end());
    }
}

/// Half-open byte span of one code block line in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeBlockLine {
    /// Length of the line in bytes.
    pub length: usize,
    /// Absolute byte offset of the line's first character after marker stripping.
    pub offset: usize,
}

impl CodeBlockLine {
    /// Absolute byte offset one past the end of the line.
    pub fn end(&self) -> usize {
        return self.offset.saturating_add(self.length);
    }

    /// Slice this line out of the source it was computed against.
    pub fn text<'a>(&self, source: &'a str) -> Option<&'a str> {
        return source.get(self.offset..self.end());
    }
}

/// A bracketed mention inside a documentation comment, resolved to its syntactic shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentReference {
    /// The parsed name expression.
    pub expression: ReferenceExpr,
    /// Whether the reference was written with a leading `new`.
    pub has_constructor_keyword: bool,
    /// Absolute byte offset of the first character inside the brackets.
    pub source_offset: usize,
}

/// A complete documentation comment with everything extracted from it.
/// Built once per comment and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocComment {
    /// Code blocks in source order.
    pub code_blocks: Vec<CodeBlock>,
    /// Resolved references in source order.
    pub references: Vec<CommentReference>,
    /// The comment units that make up the comment, for reproducing its text.
    pub tokens: Vec<CommentToken>,
}

impl DocComment {
    /// Absolute byte offset of the comment's first character.
    pub fn offset(&self) -> Option<usize> {
        return self.tokens.first().map(|t| return t.offset);
    }

    /// Verbatim comment text, one unit per line.
    pub fn text(&self) -> String {
        return self
            .tokens
            .iter()
            .map(|t| return t.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
    }
}

/// Two-segment name such as `a.b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DottedName {
    /// Absolute byte offset of the `.` between the segments.
    pub dot_offset: usize,
    /// The segment after the dot.
    pub identifier: Identifier,
    /// The segment before the dot.
    pub prefix: Identifier,
}

/// A single name, possibly an operator symbol or an empty synthetic placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    /// The name as written. Empty when synthesized during recovery.
    pub name: String,
    /// Absolute byte offset of the name.
    pub offset: usize,
}

impl Identifier {
    /// Whether this name was inserted by recovery rather than written in the comment.
    pub fn is_synthetic(&self) -> bool {
        return self.name.is_empty();
    }
}

/// Three-segment name `a.b.c`, modeled as property `c` accessed on the dotted target `a.b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyAccess {
    /// Absolute byte offset of the second `.`.
    pub dot_offset: usize,
    /// The final segment.
    pub property: Identifier,
    /// The first two segments.
    pub target: DottedName,
}

/// The syntactic shape of a resolved reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceExpr {
    /// `a.b`
    Dotted(DottedName),
    /// `a.b.c`
    Property(PropertyAccess),
    /// `a`
    Simple(Identifier),
}

impl ReferenceExpr {
    /// The dotted display form, e.g. `Object.==` or `a.b.c`.
    pub fn display_name(&self) -> String {
        return match self {
            ReferenceExpr::Dotted(dotted) => format!("{}.{}", dotted.prefix.name, dotted.identifier.name),
            ReferenceExpr::Property(access) => format!(
                "{}.{}.{}",
                access.target.prefix.name, access.target.identifier.name, access.property.name
            ),
            ReferenceExpr::Simple(identifier) => identifier.name.clone(),
        };
    }

    /// The last segment of the name.
    pub fn name(&self) -> &Identifier {
        return match self {
            ReferenceExpr::Dotted(dotted) => &dotted.identifier,
            ReferenceExpr::Property(access) => &access.property,
            ReferenceExpr::Simple(identifier) => identifier,
        };
    }

    /// Absolute byte offset of the first segment.
    pub fn offset(&self) -> usize {
        return match self {
            ReferenceExpr::Dotted(dotted) => dotted.prefix.offset,
            ReferenceExpr::Property(access) => access.target.prefix.offset,
            ReferenceExpr::Simple(identifier) => identifier.offset,
        };
    }
}
