//! The regex AST, its parser, and the algebraic simplifier.
pub mod ast;
pub mod parser;
pub mod simplify;
