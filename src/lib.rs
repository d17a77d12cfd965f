//! A pure, deterministic kernel for finite automata and regular languages.
//!
//! This crate implements the classical transformation suite over a single
//! shared automaton data model: subset construction with silent-closure
//! handling, completion and pruning, partition-refinement minimization,
//! complementation, product construction, two regex→automaton constructions
//! (position-based and fragment-assembly), automaton→regex synthesis by
//! state elimination, and solution of regular-language equation systems via
//! Arden's lemma. Every operation is a function from immutable inputs to a
//! freshly allocated output — there is no shared mutable state, no internal
//! locking, and no I/O.
pub mod arden;
pub mod automaton;
pub mod closure;
pub mod complement;
pub mod construct;
pub mod determinize;
pub mod error;
pub mod minimize;
pub mod product;
pub mod reachability;
pub mod regex;
pub mod state;
pub mod symbol;
pub mod synthesis;

pub use arden::{solve_equations, Equation, Solution, Var};
pub use automaton::{build_automaton, Automaton, Builder, Label};
pub use closure::{silent_closure, silent_closure_of};
pub use complement::complement;
pub use construct::{regex_to_automaton, Method};
pub use determinize::{determinize, Trace};
pub use error::{Error, RegexErrorKind, Result};
pub use minimize::minimize;
pub use product::{product, Combinator};
pub use reachability::{co_reachable, complete, forward_reachable, prune, useful};
pub use regex::ast::RegexAst;
pub use regex::parser::parse_regex;
pub use regex::simplify::simplify;
pub use state::StateId;
pub use symbol::SymbolId;
pub use synthesis::automaton_to_regex;
