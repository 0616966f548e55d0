//! C source code parser
//!
//! This module transforms C source text into a syntax tree:
//! - [`lexer`]: Tokenization (source text → tokens), with the per-file token table
//! - [`parser`]: Parsing (tokens → syntax tree)
//! - [`ast`]: Syntax-tree arena and node definitions
//!
//! # Supported C Subset
//!
//! A single `int main()` whose body is one `return <literal>;`. The literal may
//! be decimal (`42`), octal (`052`), hexadecimal (`0x2A`) or binary (`b101010`).
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one token of lookahead.
//! No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parser;
