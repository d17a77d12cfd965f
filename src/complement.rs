//! Complementation.
use crate::automaton::{Automaton, Builder, Label};
use crate::determinize::determinize;
use crate::error::Result;
use crate::reachability::complete;

/// Swap `F` and `Q \ F`.
///
/// Precondition: `automaton` is complete and deterministic. Set
/// `auto_complete` to determinize-then-complete non-conforming input instead
/// of rejecting it.
pub fn complement(automaton: &Automaton, auto_complete: bool) -> Result<Automaton> {
    let prepared;
    let automaton = if automaton.is_complete() {
        automaton
    } else if auto_complete {
        let (deterministic, _trace) = if automaton.is_deterministic() {
            (automaton.clone(), Default::default())
        } else {
            determinize(automaton)
        };
        prepared = complete(&deterministic)?;
        &prepared
    } else {
        automaton.require_complete()?;
        unreachable!()
    };

    let mut builder = Builder::new(automaton.symbols().clone(), false);
    let ids: Vec<_> = automaton
        .state_ids()
        .map(|old| builder.state(automaton.state_labels().label(old)))
        .collect();

    for (from, label, targets) in automaton.transitions() {
        for &target in targets {
            builder.add_transition(ids[from.index()], label, ids[target.index()]);
        }
    }
    for &state in automaton.start() {
        builder.add_start(ids[state.index()]);
    }
    for old in automaton.state_ids() {
        if !automaton.is_accepting(old) {
            builder.add_accept(ids[old.index()]);
        }
    }

    Ok(builder
        .build()
        .expect("complementing a complete deterministic automaton cannot violate an invariant"))
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

    #[test]
    fn complement_flips_acceptance() {
        let dfa = build_automaton(
            &["a"],
            &["1", "2"],
            &[("1", "a", "2"), ("2", "a", "2")],
            &["1"],
            &["2"],
            false,
        )
        .unwrap();

        let complemented = complement(&dfa, false).unwrap();
        assert!(accepts(&dfa, &["a"]));
        assert!(!accepts(&complemented, &["a"]));
        assert!(!accepts(&dfa, &[]));
        assert!(accepts(&complemented, &[]));
    }

    #[test]
    fn double_complement_is_the_same_language() {
        let dfa = build_automaton(
            &["a"],
            &["1", "2"],
            &[("1", "a", "2"), ("2", "a", "2")],
            &["1"],
            &["2"],
            false,
        )
        .unwrap();

        let twice = complement(&complement(&dfa, false).unwrap(), false).unwrap();
        for word in [[].as_slice(), &["a"], &["a", "a"]] {
            assert_eq!(accepts(&dfa, word), accepts(&twice, word));
        }
    }

    #[test]
    fn complement_rejects_incomplete_input_without_auto_complete() {
        let nfa = build_automaton(
            &["a", "b"],
            &["1", "2"],
            &[("1", "a", "2")],
            &["1"],
            &["2"],
            false,
        )
        .unwrap();
        assert!(complement(&nfa, false).is_err());
    }

    #[test]
    fn complement_auto_completes_when_requested() {
        let nfa = build_automaton(
            &["a", "b"],
            &["1", "2"],
            &[("1", "a", "2")],
            &["1"],
            &["2"],
            false,
        )
        .unwrap();
        let complemented = complement(&nfa, true).unwrap();
        assert!(complemented.is_complete());
    }
}
