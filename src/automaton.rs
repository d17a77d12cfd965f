//! The automaton data model and its builder.
use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::state::{StateId, StateTable};
use crate::symbol::{is_epsilon_token, SymbolId, SymbolTable};

/// A transition guard: either a real symbol or the silent token `ε`.
///
/// Representing labels as a sum type rather than `Option<Symbol>` makes
/// every silent-aware match arm explicit at the type level instead of
/// relying on callers to remember what `None` means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    Symbol(SymbolId),
    Silent,
}

/// An immutable-after-construction finite automaton: the tuple
/// `(Σ, Q, δ, I, F, allows_silent)`.
#[derive(Debug, Clone)]
pub struct Automaton {
    pub(crate) symbols: SymbolTable,
    pub(crate) states: StateTable,
    /// δ, stored as a sorted, deduplicated adjacency map.
    pub(crate) transitions: BTreeMap<(StateId, Label), Vec<StateId>>,
    pub(crate) start: Vec<StateId>,
    pub(crate) accept: BTreeSet<StateId>,
    pub(crate) allows_silent: bool,
}

static NO_SUCCESSORS: &[StateId] = &[];

impl Automaton {
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn state_labels(&self) -> &StateTable {
        &self.states
    }

    pub fn state_ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.ids()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn start(&self) -> &[StateId] {
        &self.start
    }

    pub fn accept(&self) -> &BTreeSet<StateId> {
        &self.accept
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accept.contains(&state)
    }

    pub fn allows_silent(&self) -> bool {
        self.allows_silent
    }

    /// The successors of `(state, label)`; empty when δ has no entry.
    pub fn successors(&self, state: StateId, label: Label) -> &[StateId] {
        self.transitions
            .get(&(state, label))
            .map(Vec::as_slice)
            .unwrap_or(NO_SUCCESSORS)
    }

    /// Iterate every non-empty `(from, label) -> targets` entry of δ.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Label, &[StateId])> + '_ {
        self.transitions
            .iter()
            .map(|(&(from, label), targets)| (from, label, targets.as_slice()))
    }

    /// `true` iff `|I| = 1`, no silent edges, and `|δ(q,a)| ≤ 1` everywhere.
    pub fn is_deterministic(&self) -> bool {
        if self.start.len() != 1 || self.allows_silent {
            return false;
        }
        self.transitions.values().all(|targets| targets.len() <= 1)
    }

    /// `true` iff deterministic and `|δ(q,a)| = 1` for every `(q,a) ∈ Q×Σ`.
    pub fn is_complete(&self) -> bool {
        if !self.is_deterministic() {
            return false;
        }
        self.state_ids().all(|q| {
            self.symbols
                .ids()
                .all(|a| self.successors(q, Label::Symbol(a)).len() == 1)
        })
    }

    pub(crate) fn require_deterministic(&self) -> Result<()> {
        if self.is_deterministic() {
            Ok(())
        } else {
            Err(Error::NotDeterministic)
        }
    }

    pub(crate) fn require_complete(&self) -> Result<()> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(Error::NotComplete)
        }
    }

    /// The automaton recognizing ∅: no states, no start, no accept.
    ///
    /// This is the one place `Automaton` is constructed with an empty start
    /// set, bypassing [`Builder::build`]'s non-empty-`I` check — it exists
    /// only for the empty-language result of pruning, not as a
    /// general-purpose escape hatch.
    pub(crate) fn empty_language(symbols: SymbolTable, allows_silent: bool) -> Automaton {
        Automaton {
            symbols,
            states: StateTable::new(),
            transitions: BTreeMap::new(),
            start: Vec::new(),
            accept: BTreeSet::new(),
            allows_silent,
        }
    }
}

/// Builds an [`Automaton`] from dense ids, validating every invariant before
/// sealing. Used both by [`build_automaton`] (the string-keyed public entry
/// point) and internally by every constructor that produces fresh automata
/// (determinize, minimize, product, the regex constructors, completion,
/// complementation).
#[derive(Debug, Clone)]
pub struct Builder {
    symbols: SymbolTable,
    states: StateTable,
    transitions: BTreeMap<(StateId, Label), BTreeSet<StateId>>,
    start: BTreeSet<StateId>,
    accept: BTreeSet<StateId>,
    allows_silent: bool,
}

impl Builder {
    pub fn new(symbols: SymbolTable, allows_silent: bool) -> Self {
        Builder {
            symbols,
            states: StateTable::new(),
            transitions: BTreeMap::new(),
            start: BTreeSet::new(),
            accept: BTreeSet::new(),
            allows_silent,
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn state(&mut self, label: &str) -> StateId {
        self.states.intern(label)
    }

    pub fn fresh_state(&mut self) -> StateId {
        self.states.fresh()
    }

    pub fn add_transition(&mut self, from: StateId, label: Label, to: StateId) {
        self.transitions.entry((from, label)).or_default().insert(to);
    }

    pub fn add_start(&mut self, state: StateId) {
        self.start.insert(state);
    }

    pub fn add_accept(&mut self, state: StateId) {
        self.accept.insert(state);
    }

    /// Validate every invariant and seal the automaton.
    pub fn build(self) -> Result<Automaton> {
        let state_count = self.states.len();

        if self.start.is_empty() {
            return Err(Error::InvalidAutomaton(
                "start set I must be non-empty".to_string(),
            ));
        }

        for &(state, label) in self.transitions.keys() {
            if state.index() >= state_count {
                return Err(Error::InvalidAutomaton(format!(
                    "transition references unknown state {state:?}"
                )));
            }
            match label {
                Label::Silent if !self.allows_silent => {
                    return Err(Error::InvalidAutomaton(
                        "epsilon transition present but allows_silent is false".to_string(),
                    ));
                }
                Label::Symbol(symbol) if symbol.index() >= self.symbols.len() => {
                    return Err(Error::InvalidAutomaton(format!(
                        "transition label {symbol:?} is not in the alphabet"
                    )));
                }
                _ => {}
            }
        }
        for targets in self.transitions.values() {
            for &target in targets {
                if target.index() >= state_count {
                    return Err(Error::InvalidAutomaton(format!(
                        "transition targets unknown state {target:?}"
                    )));
                }
            }
        }
        for &state in self.start.iter().chain(self.accept.iter()) {
            if state.index() >= state_count {
                return Err(Error::InvalidAutomaton(format!(
                    "I or F references unknown state {state:?}"
                )));
            }
        }

        let transitions = self
            .transitions
            .into_iter()
            .map(|(key, targets)| (key, targets.into_iter().collect::<Vec<_>>()))
            .collect();

        Ok(Automaton {
            symbols: self.symbols,
            states: self.states,
            transitions,
            start: self.start.into_iter().collect(),
            accept: self.accept,
            allows_silent: self.allows_silent,
        })
    }
}

/// The string-keyed public entry point for building an automaton.
///
/// `allows_silent` governs whether `ε`/`epsilon` is accepted as a transition
/// label; the silent symbol may be spelled as either literal on input.
pub fn build_automaton(
    alphabet: &[&str],
    states: &[&str],
    transitions: &[(&str, &str, &str)],
    starts: &[&str],
    accepts: &[&str],
    allows_silent: bool,
) -> Result<Automaton> {
    let symbols = SymbolTable::from_alphabet(alphabet.iter().copied())
        .map_err(Error::InvalidAutomaton)?;
    let mut builder = Builder::new(symbols, allows_silent);

    for &label in states {
        builder.state(label);
    }
    for &(from, label, to) in transitions {
        if !states.contains(&from) || !states.contains(&to) {
            return Err(Error::InvalidAutomaton(format!(
                "transition ({from}, {label}, {to}) references a state outside `states`"
            )));
        }
        let from_id = builder.state(from);
        let to_id = builder.state(to);
        let label = if is_epsilon_token(label) {
            Label::Silent
        } else {
            let symbol = builder.symbols().lookup(label).ok_or_else(|| {
                Error::InvalidAutomaton(format!("label '{label}' is not in the alphabet"))
            })?;
            Label::Symbol(symbol)
        };
        builder.add_transition(from_id, label, to_id);
    }
    for &label in starts {
        if !states.contains(&label) {
            return Err(Error::InvalidAutomaton(format!(
                "start state '{label}' is not in `states`"
            )));
        }
        builder.add_start(builder.state(label));
    }
    for &label in accepts {
        if !states.contains(&label) {
            return Err(Error::InvalidAutomaton(format!(
                "accept state '{label}' is not in `states`"
            )));
        }
        builder.add_accept(builder.state(label));
    }

    builder.build()
}
