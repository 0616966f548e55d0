//! # Introduction
//!
//! minicc compiles a very small subset of C to x86 assembly and hands the
//! result to the system C driver to assemble and link. The accepted language is
//! a single `int main()` whose body is one `return <literal>;`, where the literal
//! may be decimal, octal (`052`), hexadecimal (`0x2A`) or binary (`b101010`).
//!
//! ## Compilation pipeline
//!
//! ```text
//! Source → Lexer → Parser → Tree → Generator → Assembly → cc
//! ```
//!
//! 1. [`parser`]: tokenises the source into a per-file token table and builds
//!    an index-linked [`parser::ast::SyntaxTree`] by recursive descent.
//! 2. [`codegen`]: walks the tree's continuation chain and emits AT&T assembly
//!    for a [`codegen::Target`].
//! 3. [`dump`]: token listings, indented trees and Graphviz output for
//!    inspecting the intermediate stages.
//! 4. [`driver`]: runs the stages over a file, writes outputs and invokes the
//!    toolchain.
//! 5. [`diagnostic`]: source locations and caret snippets for error messages.

pub mod codegen;
pub mod diagnostic;
pub mod driver;
pub mod dump;
pub mod parser;
