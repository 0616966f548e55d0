//! Generation fault types
//!
//! A [`GenerationFault`] means the tree handed to the generator does not match
//! what the grammar produces, or holds a literal the target cannot encode.
//! Every fault aborts generation.

use crate::codegen::target::Target;
use crate::parser::ast::{NodeKind, SourceLocation};
use crate::parser::lexer::TokenKind;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationFault {
    /// A node kind that never appears on the continuation chain
    UnexpectedNode { kind: NodeKind },

    /// A terminal node without its token
    MissingToken { kind: NodeKind },

    /// A literal kind the generator does not lower (floating point)
    UnsupportedLiteral {
        kind: TokenKind,
        text: String,
        location: SourceLocation,
    },

    /// Literal text that does not convert under its radix
    InvalidLiteral {
        text: String,
        location: SourceLocation,
    },

    /// A value wider than the target's immediates
    LiteralOutOfRange {
        text: String,
        target: Target,
        location: SourceLocation,
    },
}

impl GenerationFault {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            GenerationFault::UnexpectedNode { .. } | GenerationFault::MissingToken { .. } => None,
            GenerationFault::UnsupportedLiteral { location, .. }
            | GenerationFault::InvalidLiteral { location, .. }
            | GenerationFault::LiteralOutOfRange { location, .. } => Some(location),
        }
    }
}

impl fmt::Display for GenerationFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationFault::UnexpectedNode { kind } => {
                write!(f, "Unhandled {} node on the evaluation chain", kind)
            }
            GenerationFault::MissingToken { kind } => {
                write!(f, "{} node has no token", kind)
            }
            GenerationFault::UnsupportedLiteral {
                kind,
                text,
                location,
            } => {
                write!(
                    f,
                    "Cannot generate code for {} '{}' at line {}",
                    kind, text, location.line
                )
            }
            GenerationFault::InvalidLiteral { text, location } => {
                write!(f, "Malformed literal '{}' at line {}", text, location.line)
            }
            GenerationFault::LiteralOutOfRange {
                text,
                target,
                location,
            } => {
                write!(
                    f,
                    "Literal '{}' at line {} does not fit in a {} immediate",
                    text, location.line, target
                )
            }
        }
    }
}

impl std::error::Error for GenerationFault {}
