//! Documentation comment analysis.
//!
//! Given the raw units of a documentation comment (`/// ...` lines or one
//! `/** ... */` block), find the bracketed code references it contains and the
//! code blocks it embeds. References are parsed into small name expressions
//! (`a`, `a.b`, `a.b.c`, `new a.A`, `Object.operator ==`) with absolute byte
//! offsets. Links and code spans are skipped.
//!
//! The [`extractor`] module locates documentation comments in Rust, Go and
//! TypeScript sources with tree-sitter and feeds them to [`parse_doc_comment`].

pub mod code_block;
pub mod config;
pub mod doc_comment;
pub mod error;
pub mod extractor;
pub mod grammar;
pub mod lines;
pub mod resolver;
pub mod scanner;
pub mod token;
pub mod types;

pub use doc_comment::parse_doc_comment;
pub use error::Error;
pub use lines::DocSyntax;
pub use resolver::resolve_reference;
pub use token::{SymbolTokenizer, Tokenizer};
pub use types::{CodeBlock, CodeBlockLine, CommentReference, CommentToken, DocComment, ReferenceExpr};
