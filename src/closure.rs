//! Silent closure.
use std::collections::BTreeSet;

use crate::automaton::{Automaton, Label};
use crate::state::StateId;

/// `Ecl(q)`: the least set containing `q`, closed under `ε`-successors.
///
/// When `allows_silent` is false this degenerates to `{q}` without a special
/// case in the caller — the depth-first search below simply finds no silent
/// edges to follow.
pub fn silent_closure(automaton: &Automaton, state: StateId) -> BTreeSet<StateId> {
    silent_closure_of(automaton, std::iter::once(state))
}

/// `Ecl(S) = ⋃_{q∈S} Ecl(q)`.
pub fn silent_closure_of(
    automaton: &Automaton,
    states: impl IntoIterator<Item = StateId>,
) -> BTreeSet<StateId> {
    let mut reached: BTreeSet<StateId> = BTreeSet::new();
    let mut worklist: Vec<StateId> = Vec::new();

    for state in states {
        if reached.insert(state) {
            worklist.push(state);
        }
    }

    while let Some(state) = worklist.pop() {
        for &target in automaton.successors(state, Label::Silent) {
            if reached.insert(target) {
                worklist.push(target);
            }
        }
    }

    reached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::build_automaton;

    #[test]
    fn closure_of_scenario_6() {
        // s0 -ε-> s1 -ε-> s2, s0 -a-> s3
        let automaton = build_automaton(
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

        let s0 = automaton.state_labels().lookup("s0").unwrap();
        let s1 = automaton.state_labels().lookup("s1").unwrap();
        let s2 = automaton.state_labels().lookup("s2").unwrap();

        let closure = silent_closure(&automaton, s0);
        assert_eq!(closure, BTreeSet::from([s0, s1, s2]));
    }

    #[test]
    fn closure_without_silent_transitions_is_reflexive() {
        let automaton =
            build_automaton(&["a"], &["1"], &[("1", "a", "1")], &["1"], &["1"], false).unwrap();
        let only = automaton.state_labels().lookup("1").unwrap();
        assert_eq!(silent_closure(&automaton, only), BTreeSet::from([only]));
    }
}
