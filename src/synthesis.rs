//! State-elimination synthesis: automaton → regex.
use crate::automaton::{Automaton, Label};
use crate::regex::ast::RegexAst;
use crate::regex::simplify::simplify;

/// Union `label` into the edge regex `cell` currently holds.
fn union_into(cell: &mut RegexAst, label: RegexAst) {
    let existing = std::mem::replace(cell, RegexAst::Empty);
    *cell = simplify(&RegexAst::union(existing, label));
}

/// The states still incident on `k` through a non-`∅` edge, among `states`
/// (used both to size the elimination heuristic and to bound the update
/// loop once `k` is chosen).
fn incident(matrix: &[Vec<RegexAst>], k: usize, states: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let into_k = states
        .iter()
        .copied()
        .filter(|&i| !matches!(matrix[i][k], RegexAst::Empty))
        .collect();
    let out_of_k = states
        .iter()
        .copied()
        .filter(|&j| !matches!(matrix[k][j], RegexAst::Empty))
        .collect();
    (into_k, out_of_k)
}

/// Synthesize a regex whose language equals `automaton`'s.
///
/// A fresh unique start `S` and accept `T` are spliced in with `ε` edges so
/// the elimination loop always has a single source and sink to converge on,
/// independent of how many original start/accept states `automaton` has.
/// Ties in the elimination heuristic (smallest degree) break on original
/// state id, so the same automaton always yields the same output shape —
/// the language is elimination-order-independent but the rendered shape
/// isn't, so a stable tie-break keeps output reproducible.
pub fn automaton_to_regex(automaton: &Automaton) -> String {
    let n = automaton.state_count();
    let synthetic_start = n;
    let synthetic_accept = n + 1;
    let size = n + 2;

    let mut matrix = vec![vec![RegexAst::Empty; size]; size];

    for (from, label, targets) in automaton.transitions() {
        let label_ast = match label {
            Label::Symbol(symbol) => RegexAst::symbol(automaton.symbols().label(symbol)),
            Label::Silent => RegexAst::Epsilon,
        };
        for &to in targets {
            union_into(&mut matrix[from.index()][to.index()], label_ast.clone());
        }
    }
    for &start in automaton.start() {
        union_into(&mut matrix[synthetic_start][start.index()], RegexAst::Epsilon);
    }
    for &accept in automaton.accept() {
        union_into(&mut matrix[accept.index()][synthetic_accept], RegexAst::Epsilon);
    }

    // Original states 0..n are eliminated one at a time; the synthetic
    // start/accept are never eliminated.
    let mut remaining: Vec<usize> = (0..n).collect();

    while !remaining.is_empty() {
        let others_of = |k: usize| -> Vec<usize> {
            remaining
                .iter()
                .copied()
                .filter(|&q| q != k)
                .chain([synthetic_start, synthetic_accept])
                .collect()
        };

        let k = *remaining
            .iter()
            .min_by_key(|&&k| {
                let others = others_of(k);
                let (into_k, out_of_k) = incident(&matrix, k, &others);
                (into_k.len() + out_of_k.len(), k)
            })
            .expect("remaining is non-empty inside this loop");

        remaining.retain(|&q| q != k);
        let others: Vec<usize> = remaining
            .iter()
            .copied()
            .chain([synthetic_start, synthetic_accept])
            .collect();

        let self_loop = simplify(&RegexAst::star(matrix[k][k].clone()));
        let (into_k, out_of_k) = incident(&matrix, k, &others);

        for &i in &into_k {
            for &j in &out_of_k {
                let through = RegexAst::concat(
                    matrix[i][k].clone(),
                    RegexAst::concat(self_loop.clone(), matrix[k][j].clone()),
                );
                union_into(&mut matrix[i][j], through);
            }
        }
    }

    matrix[synthetic_start][synthetic_accept].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::build_automaton;
    use crate::construct::{self, Method};
    use crate::regex::parser::parse_regex;
    use crate::test_support::language_equivalent;

    #[test]
    fn synthesizes_a_regex_language_equivalent_to_scenario_1() {
        let nfa = build_automaton(
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
        .unwrap();

        let regex_text = automaton_to_regex(&nfa);
        let ast = parse_regex(&regex_text).unwrap();
        let rebuilt = construct::regex_to_automaton(&ast, Method::Fragment);

        assert!(language_equivalent(&nfa, &rebuilt, 6));
    }

    #[test]
    fn round_trips_regex_through_fragment_construction_and_back() {
        let ast = parse_regex("a(a|b)b").unwrap();
        let automaton = construct::regex_to_automaton(&ast, Method::Fragment);
        let regex_text = automaton_to_regex(&automaton);
        let rebuilt_ast = parse_regex(&regex_text).unwrap();
        let rebuilt = construct::regex_to_automaton(&rebuilt_ast, Method::Fragment);
        assert!(language_equivalent(&automaton, &rebuilt, 5));
    }

    #[test]
    fn round_trips_regex_through_position_construction_and_back() {
        let ast = parse_regex("(a|b)*abb").unwrap();
        let automaton = construct::regex_to_automaton(&ast, Method::Position);
        let regex_text = automaton_to_regex(&automaton);
        let rebuilt_ast = parse_regex(&regex_text).unwrap();
        let rebuilt = construct::regex_to_automaton(&rebuilt_ast, Method::Position);
        assert!(language_equivalent(&automaton, &rebuilt, 5));
    }

    #[test]
    fn empty_language_synthesizes_to_the_empty_regex() {
        let automaton = build_automaton(&["a"], &["1", "2"], &[("1", "a", "1")], &["1"], &["2"], false).unwrap();
        assert_eq!(automaton_to_regex(&automaton), "\u{2205}");
    }
}
