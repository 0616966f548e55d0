//! Assembly generation
//!
//! This module lowers a parsed syntax tree to assembly text:
//! - [`generator`]: Tree walk and instruction emission
//! - [`target`]: Per-architecture instruction templates
//! - [`errors`]: Generation fault types
//!
//! # Emission Model
//!
//! The generator follows the continuation chain from the root and treats the
//! machine stack as an evaluation stack: constants are pushed, and `return`
//! pops the top value into the return register before the epilogue runs.

pub mod errors;
pub mod generator;
pub mod target;

pub use errors::GenerationFault;
pub use generator::{generate, literal_value};
pub use target::Target;
