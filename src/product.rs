//! Product construction: intersection and union.
use std::collections::BTreeMap;

use crate::automaton::{Automaton, Builder, Label};
use crate::error::{Error, Result};
use crate::state::StateId;

/// Which acceptance condition the Cartesian product state space is sealed
/// with: both components accepting (intersection) or either one (union).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Intersection,
    Union,
}

/// The Cartesian product of two completed automata sharing an alphabet.
///
/// Precondition: both inputs are complete and deterministic, and their
/// alphabets carry the same symbol labels in the same order. A mismatched
/// alphabet is [`Error::AlphabetMismatch`] rather than a silent partial
/// product.
pub fn product(left: &Automaton, right: &Automaton, combinator: Combinator) -> Result<Automaton> {
    left.require_complete()?;
    right.require_complete()?;
    if left.symbols().labels() != right.symbols().labels() {
        return Err(Error::AlphabetMismatch);
    }

    let mut builder = Builder::new(left.symbols().clone(), false);
    let mut ids: BTreeMap<(StateId, StateId), StateId> = BTreeMap::new();

    let left_start = left.start()[0];
    let right_start = right.start()[0];
    let mut worklist = vec![(left_start, right_start)];
    let start_id = builder.fresh_state();
    ids.insert((left_start, right_start), start_id);
    builder.add_start(start_id);

    while let Some(pair @ (l, r)) = worklist.pop() {
        let from_id = ids[&pair];

        let accepting = match combinator {
            Combinator::Intersection => left.is_accepting(l) && right.is_accepting(r),
            Combinator::Union => left.is_accepting(l) || right.is_accepting(r),
        };
        if accepting {
            builder.add_accept(from_id);
        }

        for a in left.symbols().ids() {
            let label = Label::Symbol(a);
            let l_next = left.successors(l, label)[0];
            let r_next = right.successors(r, label)[0];
            let next_pair = (l_next, r_next);

            let to_id = *ids.entry(next_pair).or_insert_with(|| {
                let id = builder.fresh_state();
                worklist.push(next_pair);
                id
            });
            builder.add_transition(from_id, label, to_id);
        }
    }

    Ok(builder
        .build()
        .expect("the product of two complete deterministic automata cannot violate an invariant"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::build_automaton;

    fn accepts(automaton: &Automaton, word: &[&str]) -> bool {
        let mut current = automaton.start()[0];
        for &symbol in word {
            let id = automaton.symbols().lookup(symbol).unwrap();
            current = automaton.successors(current, Label::Symbol(id))[0];
        }
        automaton.is_accepting(current)
    }

    fn ends_in_a() -> Automaton {
        build_automaton(
            &["a", "b"],
            &["1", "2"],
            &[("1", "a", "2"), ("1", "b", "1"), ("2", "a", "2"), ("2", "b", "1")],
            &["1"],
            &["2"],
            false,
        )
        .unwrap()
    }

    fn even_length() -> Automaton {
        build_automaton(
            &["a", "b"],
            &["even", "odd"],
            &[
                ("even", "a", "odd"),
                ("even", "b", "odd"),
                ("odd", "a", "even"),
                ("odd", "b", "even"),
            ],
            &["even"],
            &["even"],
            false,
        )
        .unwrap()
    }

    #[test]
    fn intersection_requires_both_components() {
        let combined = product(&ends_in_a(), &even_length(), Combinator::Intersection).unwrap();
        assert!(accepts(&combined, &["b", "a"]));
        assert!(!accepts(&combined, &["a"]));
        assert!(!accepts(&combined, &["b", "b", "a"]));
    }

    #[test]
    fn union_requires_either_component() {
        let combined = product(&ends_in_a(), &even_length(), Combinator::Union).unwrap();
        assert!(accepts(&combined, &["a"]));
        assert!(accepts(&combined, &["b", "b"]));
        assert!(!accepts(&combined, &["b"]));
    }

    #[test]
    fn rejects_mismatched_alphabets() {
        let other = build_automaton(&["a", "c"], &["1"], &[], &["1"], &["1"], false).unwrap();
        assert_eq!(
            product(&ends_in_a(), &other, Combinator::Intersection),
            Err(Error::AlphabetMismatch)
        );
    }

    #[test]
    fn rejects_incomplete_input() {
        let incomplete = build_automaton(&["a"], &["1"], &[], &["1"], &[], false).unwrap();
        assert!(product(&incomplete, &incomplete, Combinator::Intersection).is_err());
    }
}
