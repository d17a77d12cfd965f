//! Regex → automaton constructors.
pub mod fragment;
pub mod position;

use crate::automaton::Automaton;
use crate::regex::ast::RegexAst;

/// Which regex → automaton construction to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Fragment assembly: recursive composition with silent glue. Output
    /// always has `allows_silent = true`.
    Fragment,
    /// Position-based / Glushkov construction: linearize, compute
    /// `first`/`last`/`follow`, assemble directly. Output always has
    /// `allows_silent = false`.
    Position,
}

/// Build a nondeterministic automaton recognizing the same language as
/// `ast`, using the requested method.
pub fn regex_to_automaton(ast: &RegexAst, method: Method) -> Automaton {
    match method {
        Method::Fragment => fragment::regex_to_automaton(ast),
        Method::Position => position::regex_to_automaton(ast),
    }
}
