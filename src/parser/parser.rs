//! Recursive-descent parser
//!
//! The grammar is a single linear path:
//!
//! ```text
//! Program    ::= Function
//! Function   ::= 'int' Identifier '(' ')' '{' Statement '}'
//! Statement  ::= Expression ';'
//! Expression ::= Return
//! Return     ::= 'return' Constant
//! Constant   ::= IntLit | OctalLit | BinaryLit | HexLit | FloatLit
//! ```
//!
//! Each production links its node into the parent's continuation slot, so the
//! finished tree reads `Program → Function → Statement → Expression → Return →
//! Constant` along the continuation chain. The function's return type hangs off
//! the Function node's primary slot. A production that fails after creating
//! its node discards that node (and everything below it) before returning.

use crate::parser::ast::*;
use crate::parser::lexer::{Lexer, SourceFile, Token, TokenKind};
use std::fmt;
use tracing::{debug, trace};

/// What a production was looking for when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Token(TokenKind),
    /// Any numeric literal
    Constant,
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::Constant => write!(f, "numeric literal"),
            Expected::EndOfInput => write!(f, "end of file"),
        }
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The file has no entry in the token table, or the entry is empty
    NotTokenized { file: String },

    /// A token of the wrong kind
    UnexpectedToken {
        found: TokenKind,
        expected: Expected,
        location: SourceLocation,
        line_text: String,
    },

    /// Input ran out mid-production
    UnexpectedEnd {
        expected: Expected,
        location: SourceLocation,
        line_text: String,
    },
}

impl ParseError {
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            ParseError::NotTokenized { .. } => None,
            ParseError::UnexpectedToken { location, .. } | ParseError::UnexpectedEnd { location, .. } => {
                Some(*location)
            }
        }
    }

    /// Kind of the offending token, if there was one
    pub fn found(&self) -> Option<TokenKind> {
        match self {
            ParseError::UnexpectedToken { found, .. } => Some(*found),
            _ => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NotTokenized { file } => {
                write!(f, "File {} is not tokenized properly", file)
            }
            ParseError::UnexpectedToken {
                found,
                expected,
                location,
                line_text,
            } => {
                write!(f, "Parse error at {}: expected {}, found {}", location, expected, found)?;
                crate::diagnostic::write_snippet(f, line_text, *location)
            }
            ParseError::UnexpectedEnd {
                expected,
                location,
                line_text,
            } => {
                write!(f, "Parse error at {}: expected {}, found end of file", location, expected)?;
                crate::diagnostic::write_snippet(f, line_text, *location)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parser bound to a lexer's token table
///
/// Construction parses the named file straight away; check [`Parser::is_valid`]
/// or [`Parser::error`] for the outcome.
pub struct Parser<'l> {
    lexer: &'l mut Lexer,
    file: String,
    tree: Option<SyntaxTree>,
    error: Option<ParseError>,
}

impl<'l> Parser<'l> {
    pub fn new(lexer: &'l mut Lexer, file: &str) -> Self {
        let mut parser = Parser {
            lexer,
            file: file.to_string(),
            tree: None,
            error: None,
        };
        // The outcome is kept in `tree`/`error`
        let _ = parser.parse();
        parser
    }

    /// Parse again, switching to `file` if it differs from the current one.
    ///
    /// An unseen file is tokenized from `source` first. Any previous tree is
    /// dropped before parsing starts.
    pub fn reparse(&mut self, source: &str, file: &str) -> Result<(), ParseError> {
        if file != self.file {
            self.file = file.to_string();
            if !self.lexer.contains(file) {
                if let Err(err) = self.lexer.tokenize(source, file) {
                    debug!(file, errors = err.errors.len(), "tokenize failed before parse");
                    self.tree = None;
                    let err = ParseError::NotTokenized {
                        file: file.to_string(),
                    };
                    self.error = Some(err.clone());
                    return Err(err);
                }
            }
        }
        self.parse()
    }

    fn parse(&mut self) -> Result<(), ParseError> {
        self.tree = None;
        self.error = None;

        let result = match self.lexer.source(&self.file) {
            Some(source) if !source.tokens().is_empty() => Descent::new(source).program(),
            _ => Err(ParseError::NotTokenized {
                file: self.file.clone(),
            }),
        };

        match result {
            Ok(tree) => {
                debug!(file = %self.file, nodes = tree.len(), "parsed");
                self.tree = Some(tree);
                Ok(())
            }
            Err(err) => {
                debug!(file = %self.file, "parse failed");
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// True when a complete syntax tree was built.
    pub fn is_valid(&self) -> bool {
        self.tree.is_some()
    }

    pub fn tree(&self) -> Option<&SyntaxTree> {
        self.tree.as_ref()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.tree.as_ref().and_then(SyntaxTree::root)
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Token-table entry of the current file.
    pub fn source(&self) -> Option<&SourceFile> {
        self.lexer.source(&self.file)
    }

    pub fn lexer(&self) -> &Lexer {
        &*self.lexer
    }

    pub fn into_tree(self) -> Option<SyntaxTree> {
        self.tree
    }
}

/// One top-down pass over a file's tokens.
struct Descent<'a> {
    source: &'a SourceFile,
    tokens: &'a [Token],
    position: usize,
    tree: SyntaxTree,
}

impl<'a> Descent<'a> {
    fn new(source: &'a SourceFile) -> Self {
        Descent {
            source,
            tokens: source.tokens(),
            position: 0,
            tree: SyntaxTree::new(),
        }
    }

    fn program(mut self) -> Result<SyntaxTree, ParseError> {
        trace!("program");
        let root = self.tree.add(NodeKind::Program, None);
        self.parse_function(root)?;

        if let Some((_, token)) = self.peek() {
            return Err(self.unexpected(Some(token), Expected::EndOfInput));
        }

        Ok(self.tree)
    }

    /// Function ::= 'int' Identifier '(' ')' '{' Statement '}'
    fn parse_function(&mut self, parent: NodeId) -> Result<(), ParseError> {
        trace!("function");
        let return_type = self.expect_token(TokenKind::KwInt)?;
        let name = self.expect_token(TokenKind::Identifier)?;

        let node = self.tree.add(NodeKind::Function, Some(name));
        self.tree.attach(parent, Slot::Continuation, node);
        let data_type = self.tree.add(NodeKind::DataType, Some(return_type));
        self.tree.attach(node, Slot::Primary, data_type);

        let result = self.parse_function_body(node);
        self.commit(node, result)
    }

    fn parse_function_body(&mut self, node: NodeId) -> Result<(), ParseError> {
        self.expect_token(TokenKind::OpenParen)?;
        self.expect_token(TokenKind::CloseParen)?;
        self.expect_token(TokenKind::OpenBrace)?;
        self.parse_statement(node)?;
        self.expect_token(TokenKind::CloseBrace)?;
        Ok(())
    }

    /// Statement ::= Expression ';'
    fn parse_statement(&mut self, parent: NodeId) -> Result<(), ParseError> {
        trace!("statement");
        // Only commit to a Statement node once we know a `return` follows
        match self.peek() {
            Some((_, token)) if token.kind == TokenKind::KwReturn => {}
            other => {
                return Err(self.unexpected(other.map(|(_, t)| t), Expected::Token(TokenKind::KwReturn)));
            }
        }

        let node = self.tree.add(NodeKind::Statement, None);
        self.tree.attach(parent, Slot::Continuation, node);

        let result = self
            .parse_expression(node)
            .and_then(|()| self.expect_token(TokenKind::SemiColon).map(drop));
        self.commit(node, result)
    }

    /// Expression ::= Return
    fn parse_expression(&mut self, parent: NodeId) -> Result<(), ParseError> {
        trace!("expression");
        let node = self.tree.add(NodeKind::Expression, None);
        self.tree.attach(parent, Slot::Continuation, node);

        let result = self.parse_return(node);
        self.commit(node, result)
    }

    /// Return ::= 'return' Constant
    fn parse_return(&mut self, parent: NodeId) -> Result<(), ParseError> {
        trace!("return");
        self.expect_token(TokenKind::KwReturn)?;

        let node = self.tree.add(NodeKind::Return, None);
        self.tree.attach(parent, Slot::Continuation, node);

        let result = self.parse_constant(node);
        self.commit(node, result)
    }

    /// Constant ::= IntLit | OctalLit | BinaryLit | HexLit | FloatLit
    fn parse_constant(&mut self, parent: NodeId) -> Result<(), ParseError> {
        trace!("constant");
        let (id, token) = match self.advance() {
            Some((id, token)) if token.kind.is_numeric_literal() => (id, token),
            other => return Err(self.unexpected(other.map(|(_, t)| t), Expected::Constant)),
        };
        trace!(kind = token.kind.name(), "constant literal");

        let node = self.tree.add(NodeKind::Constant, Some(id));
        self.tree.attach(parent, Slot::Continuation, node);
        Ok(())
    }

    // ===== Helper methods =====

    /// Keep `node` on success, discard it and its subtree on failure.
    fn commit(&mut self, node: NodeId, result: Result<(), ParseError>) -> Result<(), ParseError> {
        if result.is_err() {
            trace!(kind = %self.tree.kind(node), "discarding partial node");
            self.tree.discard(node);
        }
        result
    }

    /// Next significant token, without consuming it.
    fn peek(&self) -> Option<(TokenId, Token)> {
        self.tokens[self.position..]
            .iter()
            .enumerate()
            .find(|(_, token)| !token.kind.is_trivia())
            .map(|(i, token)| (TokenId(self.position + i), *token))
    }

    /// Consume and return the next significant token.
    fn advance(&mut self) -> Option<(TokenId, Token)> {
        let next = self.peek();
        self.position = match next {
            Some((id, _)) => id.0 + 1,
            None => self.tokens.len(),
        };
        next
    }

    fn expect_token(&mut self, kind: TokenKind) -> Result<TokenId, ParseError> {
        match self.advance() {
            Some((id, token)) if token.kind == kind => Ok(id),
            other => Err(self.unexpected(other.map(|(_, t)| t), Expected::Token(kind))),
        }
    }

    fn unexpected(&self, found: Option<Token>, expected: Expected) -> ParseError {
        match found {
            Some(token) => ParseError::UnexpectedToken {
                found: token.kind,
                expected,
                location: self.source.location(token.offset),
                line_text: self.source.line_text(token.offset).to_string(),
            },
            None => {
                let end = self.source.text().len();
                ParseError::UnexpectedEnd {
                    expected,
                    location: self.source.location(end),
                    line_text: self.source.line_text(end).to_string(),
                }
            }
        }
    }
}
