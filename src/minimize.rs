//! Minimization by partition refinement.
use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::automaton::{Automaton, Builder, Label};
use crate::error::Result;
use crate::reachability::forward_reachable;
use crate::state::StateId;

/// The unique (up to state relabeling) minimal complete deterministic
/// acceptor of the same language as `automaton`.
///
/// Precondition: `automaton` is complete and deterministic. Unreachable
/// states are dropped before refinement and are not recovered.
pub fn minimize(automaton: &Automaton) -> Result<Automaton> {
    automaton.require_complete()?;

    let reached = forward_reachable(automaton);
    let accept: BTreeSet<StateId> = automaton
        .accept()
        .iter()
        .copied()
        .filter(|q| reached.contains(q))
        .collect();
    let non_accept: BTreeSet<StateId> =
        reached.iter().copied().filter(|q| !accept.contains(q)).collect();

    let mut partition: Vec<BTreeSet<StateId>> =
        [accept, non_accept].into_iter().filter(|b| !b.is_empty()).collect();

    loop {
        let block_of: BTreeMap<StateId, usize> = partition
            .iter()
            .enumerate()
            .flat_map(|(i, block)| block.iter().map(move |&q| (q, i)))
            .collect();

        let mut groups: BTreeMap<(usize, Vec<usize>), BTreeSet<StateId>> = BTreeMap::new();
        for (block_index, block) in partition.iter().enumerate() {
            for &q in block {
                let signature: Vec<usize> = automaton
                    .symbols()
                    .ids()
                    .map(|a| {
                        let target = automaton.successors(q, Label::Symbol(a))[0];
                        block_of[&target]
                    })
                    .collect();
                groups
                    .entry((block_index, signature))
                    .or_default()
                    .insert(q);
            }
        }

        let refined: Vec<BTreeSet<StateId>> = groups.into_values().collect();
        if refined.len() == partition.len() {
            break;
        }
        partition = refined;
    }

    // Canonicalize: order blocks by the smallest state id they contain, then
    // number the resulting states 0..k-1 in that order.
    let mut order: Vec<usize> = (0..partition.len()).collect();
    order.sort_by_key(|&i| *partition[i].iter().next().unwrap());

    let block_of_original: BTreeMap<StateId, usize> = partition
        .iter()
        .enumerate()
        .flat_map(|(i, block)| block.iter().map(move |&q| (q, i)))
        .collect();
    let sorted_position_of: BTreeMap<usize, usize> =
        order.iter().enumerate().map(|(pos, &orig)| (orig, pos)).collect();

    let mut builder = Builder::new(automaton.symbols().clone(), false);
    let new_ids: Vec<StateId> = order.iter().map(|_| builder.fresh_state()).collect();

    let original_start = automaton.start()[0];
    let start_block = sorted_position_of[&block_of_original[&original_start]];
    builder.add_start(new_ids[start_block]);

    for (position, &orig_index) in order.iter().enumerate() {
        let representative = *partition[orig_index].iter().next().unwrap();
        let new_id = new_ids[position];

        if automaton.is_accepting(representative) {
            builder.add_accept(new_id);
        }

        for a in automaton.symbols().ids() {
            let target = automaton.successors(representative, Label::Symbol(a))[0];
            let target_block = sorted_position_of[&block_of_original[&target]];
            builder.add_transition(new_id, Label::Symbol(a), new_ids[target_block]);
        }
    }

    Ok(builder
        .build()
        .expect("minimizing a complete deterministic automaton cannot violate an invariant"))
}
