//! Subset construction.
use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::automaton::{Automaton, Builder, Label};
use crate::closure::silent_closure_of;
use crate::state::StateId;

/// Maps each state of the determinized output to the subset of input states
/// it represents, for display.
pub type Trace = BTreeMap<StateId, Vec<StateId>>;

/// Subset construction with silent-closure handling.
///
/// The output is deterministic but not necessarily complete: empty
/// successors are omitted rather than routed to a sink.
pub fn determinize(automaton: &Automaton) -> (Automaton, Trace) {
    let mut builder = Builder::new(automaton.symbols().clone(), false);
    let mut trace = Trace::new();

    // Canonical subset representation: sorted, deduplicated state lists.
    let mut id_of_subset: BTreeMap<Vec<StateId>, StateId> = BTreeMap::new();
    let mut worklist: Vec<Vec<StateId>> = Vec::new();

    let canon = |set: &BTreeSet<StateId>| -> Vec<StateId> { set.iter().copied().collect() };

    let start_subset = canon(&silent_closure_of(automaton, automaton.start().iter().copied()));
    let start_id = builder.fresh_state();
    id_of_subset.insert(start_subset.clone(), start_id);
    trace.insert(start_id, start_subset.clone());
    builder.add_start(start_id);
    worklist.push(start_subset);

    while let Some(subset) = worklist.pop() {
        let from_id = id_of_subset[&subset];

        if subset.iter().any(|q| automaton.is_accepting(*q)) {
            builder.add_accept(from_id);
        }

        for a in automaton.symbols().ids() {
            let label = Label::Symbol(a);
            let mut image: BTreeSet<StateId> = BTreeSet::new();
            for &q in &subset {
                image.extend(automaton.successors(q, label).iter().copied());
            }
            if image.is_empty() {
                continue;
            }
            let closed = silent_closure_of(automaton, image);
            if closed.is_empty() {
                continue;
            }
            let closed = canon(&closed);

            let to_id = *id_of_subset.entry(closed.clone()).or_insert_with(|| {
                let id = builder.fresh_state();
                trace.insert(id, closed.clone());
                worklist.push(closed.clone());
                id
            });

            builder.add_transition(from_id, label, to_id);
        }
    }

    let determinized = builder
        .build()
        .expect("subset construction over a valid automaton cannot violate an invariant");
    (determinized, trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::build_automaton;

    fn scenario_1() -> Automaton {
        build_automaton(
            &["a", "b"],
            &["1", "2", "3", "4"],
            &[
                ("1", "a", "1"),
                ("1", "a", "2"),
                ("2", "a", "4"),
                ("2", "b", "3"),
                ("3", "b", "3"),
                ("3", "b", "4"),
            ],
            &["1"],
            &["4"],
            false,
        )
        .unwrap()
    }

    fn accepts(automaton: &Automaton, word: &[&str]) -> bool {
        let mut current: BTreeSet<StateId> = automaton.start().iter().copied().collect();
        for &symbol in word {
            let Some(id) = automaton.symbols().lookup(symbol) else {
                return false;
            };
            let mut next = BTreeSet::new();
            for &q in &current {
                next.extend(automaton.successors(q, Label::Symbol(id)).iter().copied());
            }
            current = next;
        }
        current.iter().any(|&q| automaton.is_accepting(q))
    }

    #[test]
    fn determinizes_scenario_1_and_accepts_the_right_language() {
        let nfa = scenario_1();
        let (dfa, _trace) = determinize(&nfa);

        assert!(dfa.is_deterministic());
        assert_eq!(dfa.start().len(), 1);

        for word in [["a", "a"].as_slice(), &["a", "b", "a"], &["a", "b", "b"], &["a", "a", "b", "b"]] {
            assert!(accepts(&dfa, word), "expected {word:?} to be accepted");
        }
        for word in [["a"].as_slice(), &["a", "b"], &["b"]] {
            assert!(!accepts(&dfa, word), "expected {word:?} to be rejected");
        }
    }

    #[test]
    fn trace_records_the_originating_subset() {
        let nfa = scenario_1();
        let (dfa, trace) = determinize(&nfa);
        let start = dfa.start()[0];
        let one = nfa.state_labels().lookup("1").unwrap();
        assert_eq!(trace[&start], vec![one]);
    }

    #[test]
    fn determinize_of_a_silent_nfa_matches_scenario_6() {
        let nfa = build_automaton(
            &["a"],
            &["s0", "s1", "s2", "s3"],
            &[
                ("s0", "epsilon", "s1"),
                ("s1", "epsilon", "s2"),
                ("s0", "a", "s3"),
            ],
            &["s0"],
            &["s3"],
            true,
        )
        .unwrap();

        let (dfa, _trace) = determinize(&nfa);
        assert!(accepts(&dfa, &["a"]));
        assert!(!accepts(&dfa, &[]));
        assert!(!accepts(&dfa, &["a", "a"]));
    }
}
