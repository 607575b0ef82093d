//! Tokenizing reference text, and the narrow rewrite capability the resolver needs.
//!
//! Reference text is the short span between a pair of brackets. It is lexed
//! with a [Logos] lexer into a [`TokenStream`] that always ends with an
//! end-of-input token. The resolver may mutate the stream in exactly two ways,
//! both expressed by [`TokenRewriter`]: replacing one token, and inserting an
//! empty synthetic identifier.
//!
//! [Logos]: https://docs.rs/logos

use logos::Logos;

/// Raw token classes recognized by the Logos lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    /// Numeric literal.
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    /// Operator symbols a class may declare.
    #[regex(r"==|<=|>=|<<|>>>|>>|~/|\[\]=|\[\]|[<>+\-*/%|^&~]")]
    Operator,

    /// Member access.
    #[token(".")]
    Period,

    /// Other punctuation that is valid on its own but never part of a reference.
    #[regex(r"[(){}\[\],;:?!@#=]|=>|\?\.|\.\.\.?")]
    Punctuation,

    /// Single- or double-quoted string on one line.
    #[regex(r#"'[^'\n]*'|"[^"\n]*""#)]
    String,

    /// Identifier or keyword.
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Word,
}

/// Keywords that change how a reference parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// `false`
    False,
    /// `new`
    New,
    /// `null`
    Null,
    /// `operator`, which is also usable as a plain name.
    Operator,
    /// Any other reserved word.
    Reserved,
    /// `this`
    This,
    /// `true`
    True,
}

impl Keyword {
    /// Classify a word, returning `None` for ordinary identifiers.
    fn from_word(word: &str) -> Option<Self> {
        return match word {
            "false" => Some(Self::False),
            "new" => Some(Self::New),
            "null" => Some(Self::Null),
            "operator" => Some(Self::Operator),
            "this" => Some(Self::This),
            "true" => Some(Self::True),
            "assert" | "break" | "case" | "catch" | "class" | "const" | "continue" | "default"
            | "do" | "else" | "enum" | "extends" | "final" | "finally" | "for" | "if" | "in"
            | "is" | "rethrow" | "return" | "super" | "switch" | "throw" | "try" | "var"
            | "void" | "while" | "with" => Some(Self::Reserved),
            _ => None,
        };
    }

    /// Contextual keywords may also be used where a name is expected.
    pub fn is_contextual(self) -> bool {
        return matches!(self, Self::Operator);
    }
}

/// Token classes the resolver distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// End of input. Always the last token of a stream.
    Eof,
    /// A plain name.
    Identifier,
    /// A keyword.
    Keyword(Keyword),
    /// A numeric literal.
    Number,
    /// A user-definable operator symbol.
    Operator,
    /// `.`
    Period,
    /// Any other punctuation.
    Punctuation,
    /// A quoted string literal.
    String,
}

/// One lexed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token class.
    pub kind: TokenKind,
    /// Source text of the token. Empty for end-of-input and synthetic tokens.
    pub lexeme: String,
    /// Byte offset of the token.
    pub offset: usize,
}

impl Token {
    /// An identifier token with the given text.
    pub fn identifier(lexeme: impl Into<String>, offset: usize) -> Self {
        return Self {
            kind: TokenKind::Identifier,
            lexeme: lexeme.into(),
            offset,
        };
    }

    /// Whether the token is the given keyword.
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        return self.kind == TokenKind::Keyword(keyword);
    }

    /// Whether the token can serve as a name.
    pub fn is_identifier(&self) -> bool {
        return match self.kind {
            TokenKind::Identifier => true,
            TokenKind::Keyword(keyword) => keyword.is_contextual(),
            _ => false,
        };
    }

    /// Whether the token is an operator a class may declare.
    pub fn is_user_definable_operator(&self) -> bool {
        return self.kind == TokenKind::Operator;
    }
}

/// Read access to a token sequence by position.
pub trait TokenSource {
    /// The token at `index`, or `None` past the end.
    fn token(&self, index: usize) -> Option<&Token>;
}

/// The only two mutations the resolver may apply to a token stream it does not own.
pub trait TokenRewriter: TokenSource {
    /// Insert an empty synthetic identifier after the token at `after`, or at the
    /// front when `after` is `None`. It takes the offset of the token it is placed
    /// in front of. Returns the new token's index.
    fn insert_synthetic_identifier(&mut self, after: Option<usize>) -> usize;

    /// Replace the token at `index`. Out-of-range indices are ignored.
    fn replace_token(&mut self, index: usize, replacement: Token);
}

/// Tokens of one lexed span, terminated by [`TokenKind::Eof`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    /// Tokens in source order.
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Build a stream, appending the end-of-input token at `end`.
    pub fn new(mut tokens: Vec<Token>, end: usize) -> Self {
        tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            offset: end,
        });
        return Self { tokens };
    }

    /// Shift every token offset by `offset`, turning span-relative positions into
    /// absolute source positions.
    pub fn rebase(&mut self, offset: usize) {
        for token in &mut self.tokens {
            token.offset = token.offset.saturating_add(offset);
        }
    }

    /// All tokens, end-of-input included.
    pub fn tokens(&self) -> &[Token] {
        return &self.tokens;
    }
}

impl TokenSource for TokenStream {
    fn token(&self, index: usize) -> Option<&Token> {
        return self.tokens.get(index);
    }
}

impl TokenRewriter for TokenStream {
    fn insert_synthetic_identifier(&mut self, after: Option<usize>) -> usize {
        let index = after.map_or(0, |anchor| return anchor.saturating_add(1)).min(self.tokens.len());
        let offset = self
            .tokens
            .get(index)
            .or_else(|| return self.tokens.last())
            .map_or(0, |next| return next.offset);
        self.tokens.insert(index, Token::identifier(String::new(), offset));
        return index;
    }

    fn replace_token(&mut self, index: usize, replacement: Token) {
        if let Some(slot) = self.tokens.get_mut(index) {
            *slot = replacement;
        }
    }
}

/// The result of lexing one span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexed {
    /// Whether any character could not be lexed.
    pub has_errors: bool,
    /// The tokens that could be lexed.
    pub tokens: TokenStream,
}

/// A lexing service able to tokenize short reference text.
pub trait Tokenizer {
    /// Tokenize `source`, with offsets relative to its start.
    fn tokenize(&self, source: &str) -> Lexed;
}

/// The default [`Tokenizer`], built on Logos.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolTokenizer;

impl Tokenizer for SymbolTokenizer {
    fn tokenize(&self, source: &str) -> Lexed {
        let mut lexer = RawToken::lexer(source);
        let mut tokens = Vec::new();
        let mut has_errors = false;

        while let Some(result) = lexer.next() {
            let Ok(raw) = result else {
                has_errors = true;
                continue;
            };
            let lexeme = lexer.slice();
            let kind = match raw {
                RawToken::Number => TokenKind::Number,
                RawToken::Operator => TokenKind::Operator,
                RawToken::Period => TokenKind::Period,
                RawToken::Punctuation => TokenKind::Punctuation,
                RawToken::String => TokenKind::String,
                RawToken::Word => Keyword::from_word(lexeme).map_or(TokenKind::Identifier, TokenKind::Keyword),
            };
            tokens.push(Token {
                kind,
                lexeme: lexeme.to_string(),
                offset: lexer.span().start,
            });
        }

        return Lexed {
            has_errors,
            tokens: TokenStream::new(tokens, source.len()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        SymbolTokenizer.tokenize(source).tokens.tokens().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn words_split_into_identifiers_and_keywords() {
        assert_eq!(
            kinds("new a.A"),
            vec![
                TokenKind::Keyword(Keyword::New),
                TokenKind::Identifier,
                TokenKind::Period,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn operators_use_longest_match() {
        let lexed = SymbolTokenizer.tokenize(">>> []= ~/ ==");
        let lexemes: Vec<&str> = lexed.tokens.tokens().iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec![">>>", "[]=", "~/", "==", ""]);
        assert!(!lexed.has_errors);
    }

    #[test]
    fn offsets_are_relative_until_rebased() {
        let mut lexed = SymbolTokenizer.tokenize("a .b");
        let offsets: Vec<usize> = lexed.tokens.tokens().iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 2, 3, 4]);

        lexed.tokens.rebase(100);
        assert_eq!(lexed.tokens.token(3).unwrap().offset, 104);
    }

    #[test]
    fn unknown_characters_flag_errors() {
        assert!(SymbolTokenizer.tokenize("a\\b").has_errors);
        assert!(SymbolTokenizer.tokenize("'open").has_errors);
        assert!(SymbolTokenizer.tokenize("ü").has_errors);
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn operator_keyword_is_contextual() {
        let lexed = SymbolTokenizer.tokenize("operator this");
        assert!(lexed.tokens.token(0).unwrap().is_identifier());
        assert!(!lexed.tokens.token(1).unwrap().is_identifier());
    }

    #[test]
    fn synthetic_identifier_takes_following_offset() {
        let mut stream = SymbolTokenizer.tokenize("a.").tokens;
        let index = stream.insert_synthetic_identifier(Some(1));
        assert_eq!(index, 2);
        let token = stream.token(2).unwrap();
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.lexeme, "");
        assert_eq!(token.offset, 2);
        assert_eq!(stream.token(3).unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn replace_token_swaps_in_place() {
        let mut stream = SymbolTokenizer.tokenize("a.new").tokens;
        stream.replace_token(2, Token::identifier("new", 2));
        assert!(stream.token(2).unwrap().is_identifier());
        stream.replace_token(99, Token::identifier("x", 0));
        assert_eq!(stream.tokens().len(), 4);
    }
}
