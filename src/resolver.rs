//! Resolve raw bracket contents into a typed reference expression.
//!
//! Grammar, greedy and left to right:
//!
//! ```text
//! reference := 'new'? chain? 'operator'? name
//! chain     := ident '.' (ident '.')?
//! name      := ident | user-definable operator
//! ```
//!
//! Truncated input (`[a.]`, `[]`) is completed with an empty synthetic
//! identifier so partially typed references still resolve.

use crate::token::{Keyword, Token, TokenKind, TokenRewriter, TokenSource, Tokenizer};
use crate::types::{CommentReference, DottedName, Identifier, PropertyAccess, ReferenceExpr};

/// Indices of an identifier and the period that follows it.
#[derive(Debug, Clone, Copy)]
struct Segment {
    /// Index of the identifier token.
    name: usize,
    /// Index of the `.` token after it.
    period: usize,
}

/// Lex and parse the text between a pair of brackets.
///
/// `offset` is the absolute position of the first character of `text`; every
/// offset in the result is absolute. Returns `None` when the text does not lex
/// or does not have the shape of a reference.
pub fn resolve_reference<T>(text: &str, offset: usize, tokenizer: &T) -> Option<CommentReference>
where
    T: Tokenizer + ?Sized,
{
    let lexed = tokenizer.tokenize(text);
    if lexed.has_errors {
        tracing::trace!(text, offset, "reference text does not lex");
        return None;
    }
    let mut tokens = lexed.tokens;
    tokens.rebase(offset);

    let reference = parse_reference(&mut tokens, offset);
    if reference.is_none() {
        tracing::trace!(text, offset, "reference text left unresolved");
    }
    return reference;
}

/// Parse a rebased token stream into a reference.
///
/// The stream may be rewritten: a `new` after a period becomes a plain
/// identifier, and an exhausted stream gains a synthetic identifier.
pub fn parse_reference<R>(tokens: &mut R, source_offset: usize) -> Option<CommentReference>
where
    R: TokenRewriter + ?Sized,
{
    let has_constructor_keyword = is_keyword_at(&*tokens, 0, Keyword::New);
    let mut index = usize::from(has_constructor_keyword);

    let mut first: Option<Segment> = None;
    let mut second: Option<Segment> = None;
    if is_identifier_at(&*tokens, index) && is_period_at(&*tokens, index.saturating_add(1)) {
        let mut segment = Segment {
            name: index,
            period: index.saturating_add(1),
        };
        let next = segment.period.saturating_add(1);
        if is_identifier_at(&*tokens, next) && is_period_at(&*tokens, next.saturating_add(1)) {
            first = Some(segment);
            segment = Segment {
                name: next,
                period: next.saturating_add(1),
            };
        }
        second = Some(segment);
        index = segment.period.saturating_add(1);
        rewrite_constructor_name(tokens, index);
    }

    if is_eof_at(&*tokens, index) {
        index = tokens.insert_synthetic_identifier(index.checked_sub(1));
    }

    let mut operator_keyword = None;
    if is_keyword_at(&*tokens, index, Keyword::Operator) {
        operator_keyword = Some(index);
        index = index.saturating_add(1);
    }

    let candidate = tokens.token(index)?;
    if candidate.is_user_definable_operator() {
        if !is_eof_at(&*tokens, index.saturating_add(1)) {
            return None;
        }
    } else {
        index = operator_keyword.unwrap_or(index);
        let is_name = tokens.token(index).is_some_and(|t| return t.is_identifier());
        if !is_name || !is_eof_at(&*tokens, index.saturating_add(1)) {
            return None;
        }
    }

    let expression = build_expression(&*tokens, first, second, index)?;
    return Some(CommentReference {
        expression,
        has_constructor_keyword,
        source_offset,
    });
}

/// Assemble the expression shape from the chain segments and the final name.
fn build_expression<S>(
    tokens: &S,
    first: Option<Segment>,
    second: Option<Segment>,
    name: usize,
) -> Option<ReferenceExpr>
where
    S: TokenSource + ?Sized,
{
    let name = identifier_at(tokens, name)?;
    return match (first, second) {
        (Some(first), Some(second)) => Some(ReferenceExpr::Property(PropertyAccess {
            dot_offset: offset_at(tokens, second.period)?,
            property: name,
            target: dotted_name(tokens, first, identifier_at(tokens, second.name)?)?,
        })),
        (None, Some(second)) => Some(ReferenceExpr::Dotted(dotted_name(tokens, second, name)?)),
        _ => Some(ReferenceExpr::Simple(name)),
    };
}

/// `prefix . identifier` where the prefix is the segment's name.
fn dotted_name<S>(tokens: &S, prefix: Segment, identifier: Identifier) -> Option<DottedName>
where
    S: TokenSource + ?Sized,
{
    return Some(DottedName {
        dot_offset: offset_at(tokens, prefix.period)?,
        identifier,
        prefix: identifier_at(tokens, prefix.name)?,
    });
}

/// The token at `index` as a name.
fn identifier_at<S>(tokens: &S, index: usize) -> Option<Identifier>
where
    S: TokenSource + ?Sized,
{
    let token = tokens.token(index)?;
    return Some(Identifier {
        name: token.lexeme.clone(),
        offset: token.offset,
    });
}

/// Whether the token at `index` is end of input. Past the end counts as end.
fn is_eof_at<S>(tokens: &S, index: usize) -> bool
where
    S: TokenSource + ?Sized,
{
    return tokens.token(index).is_none_or(|t| return t.kind == TokenKind::Eof);
}

/// Whether the token at `index` can serve as a name.
fn is_identifier_at<S>(tokens: &S, index: usize) -> bool
where
    S: TokenSource + ?Sized,
{
    return tokens.token(index).is_some_and(|t| return t.is_identifier());
}

/// Whether the token at `index` is the given keyword.
fn is_keyword_at<S>(tokens: &S, index: usize, keyword: Keyword) -> bool
where
    S: TokenSource + ?Sized,
{
    return tokens.token(index).is_some_and(|t| return t.is_keyword(keyword));
}

/// Whether the token at `index` is a period.
fn is_period_at<S>(tokens: &S, index: usize) -> bool
where
    S: TokenSource + ?Sized,
{
    return tokens.token(index).is_some_and(|t| return t.kind == TokenKind::Period);
}

/// Offset of the token at `index`.
fn offset_at<S>(tokens: &S, index: usize) -> Option<usize>
where
    S: TokenSource + ?Sized,
{
    return tokens.token(index).map(|t| return t.offset);
}

/// `a.new` names the unnamed constructor, so `new` after a period is a name.
fn rewrite_constructor_name<R>(tokens: &mut R, index: usize)
where
    R: TokenRewriter + ?Sized,
{
    let Some(token) = tokens.token(index) else {
        return;
    };
    if !token.is_keyword(Keyword::New) {
        return;
    }
    let replacement = Token::identifier(token.lexeme.clone(), token.offset);
    tokens.replace_token(index, replacement);
}
