//! Reachability, pruning, and completion.
use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::automaton::{Automaton, Builder, Label};
use crate::error::Result;
use crate::state::StateId;

/// The forward-reachable set: a fixed point from `I`, closing under `δ` over
/// any label including `ε`.
pub fn forward_reachable(automaton: &Automaton) -> BTreeSet<StateId> {
    let mut reached: BTreeSet<StateId> = automaton.start().iter().copied().collect();
    let mut worklist: Vec<StateId> = reached.iter().copied().collect();

    while let Some(state) = worklist.pop() {
        for (from, _label, targets) in automaton.transitions() {
            if from != state {
                continue;
            }
            for &target in targets {
                if reached.insert(target) {
                    worklist.push(target);
                }
            }
        }
    }

    reached
}

/// The co-reachable (productive) set: a fixed point from `F`, following `δ`
/// backward. The reverse relation is built once up front.
pub fn co_reachable(automaton: &Automaton) -> BTreeSet<StateId> {
    let mut reverse: BTreeMap<StateId, Vec<StateId>> = BTreeMap::new();
    for (from, _label, targets) in automaton.transitions() {
        for &target in targets {
            reverse.entry(target).or_default().push(from);
        }
    }

    let mut reached: BTreeSet<StateId> = automaton.accept().iter().copied().collect();
    let mut worklist: Vec<StateId> = reached.iter().copied().collect();

    while let Some(state) = worklist.pop() {
        if let Some(predecessors) = reverse.get(&state) {
            for &predecessor in predecessors {
                if reached.insert(predecessor) {
                    worklist.push(predecessor);
                }
            }
        }
    }

    reached
}

/// The useful set: states that are both forward-reachable and productive.
pub fn useful(automaton: &Automaton) -> BTreeSet<StateId> {
    let forward = forward_reachable(automaton);
    let backward = co_reachable(automaton);
    forward.intersection(&backward).copied().collect()
}

/// Restrict the automaton to its useful states.
///
/// If no useful state is both a start and reachable to an accept, the
/// pruned automaton recognizes ∅ and is returned with `Q = I = F = ∅`.
pub fn prune(automaton: &Automaton) -> Automaton {
    let keep = useful(automaton);

    if keep.is_empty() {
        return Automaton::empty_language(automaton.symbols().clone(), automaton.allows_silent());
    }

    let mut builder = Builder::new(automaton.symbols().clone(), automaton.allows_silent());
    let mut remap: BTreeMap<StateId, StateId> = BTreeMap::new();
    for &old in &keep {
        let label = automaton.state_labels().label(old).to_string();
        remap.insert(old, builder.state(&label));
    }

    for (from, label, targets) in automaton.transitions() {
        if !keep.contains(&from) {
            continue;
        }
        for &target in targets {
            if keep.contains(&target) {
                builder.add_transition(remap[&from], label, remap[&target]);
            }
        }
    }

    let mut any_start = false;
    for &state in automaton.start() {
        if let Some(&new) = remap.get(&state) {
            builder.add_start(new);
            any_start = true;
        }
    }
    for &state in automaton.accept() {
        if let Some(&new) = remap.get(&state) {
            builder.add_accept(new);
        }
    }

    if !any_start {
        return Automaton::empty_language(automaton.symbols().clone(), automaton.allows_silent());
    }

    builder.build().expect("pruning a valid automaton cannot violate an invariant")
}

/// Add a sink state so every `(q,a) ∈ Q×Σ` has exactly one target.
///
/// Precondition: `automaton` is deterministic. Idempotent: a complete input
/// is returned unchanged up to state relabeling.
pub fn complete(automaton: &Automaton) -> Result<Automaton> {
    automaton.require_deterministic()?;

    let mut builder = Builder::new(automaton.symbols().clone(), false);
    let mut remap: BTreeMap<StateId, StateId> = BTreeMap::new();
    for old in automaton.state_ids() {
        let label = automaton.state_labels().label(old).to_string();
        remap.insert(old, builder.state(&label));
    }

    let needs_sink = automaton.state_ids().any(|q| {
        automaton
            .symbols()
            .ids()
            .any(|a| automaton.successors(q, Label::Symbol(a)).is_empty())
    });
    let sink = if needs_sink {
        Some(builder.fresh_state())
    } else {
        None
    };

    for old in automaton.state_ids() {
        let new = remap[&old];
        for a in automaton.symbols().ids() {
            let label = Label::Symbol(a);
            match automaton.successors(old, label).first() {
                Some(&target) => builder.add_transition(new, label, remap[&target]),
                None => builder.add_transition(new, label, sink.unwrap()),
            }
        }
    }
    if let Some(sink) = sink {
        for a in automaton.symbols().ids() {
            builder.add_transition(sink, Label::Symbol(a), sink);
        }
    }

    for &state in automaton.start() {
        builder.add_start(remap[&state]);
    }
    for &state in automaton.accept() {
        builder.add_accept(remap[&state]);
    }

    builder.build()
}
