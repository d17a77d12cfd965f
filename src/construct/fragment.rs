//! Fragment-assembly regex → automaton construction: a Thompson-style
//! recursive composition with silent glue between fragments.
use crate::automaton::{Automaton, Builder, Label};
use crate::regex::ast::RegexAst;
use crate::state::StateId;
use crate::symbol::SymbolTable;

/// A sub-automaton under construction: exactly one start state and one
/// accept state, disjoint from every other fragment. State ids come from a
/// single monotonic counter shared by the whole build, which is what
/// guarantees the disjointness.
struct Fragment {
    start: StateId,
    accept: StateId,
}

fn build(builder: &mut Builder, ast: &RegexAst) -> Fragment {
    match ast {
        RegexAst::Symbol(label) => {
            let s = builder.fresh_state();
            let t = builder.fresh_state();
            let symbol = builder.symbols().lookup(label).expect("symbol was collected from this AST");
            builder.add_transition(s, Label::Symbol(symbol), t);
            Fragment { start: s, accept: t }
        }
        RegexAst::Epsilon => {
            let s = builder.fresh_state();
            let t = builder.fresh_state();
            builder.add_transition(s, Label::Silent, t);
            Fragment { start: s, accept: t }
        }
        RegexAst::Empty => {
            let s = builder.fresh_state();
            let t = builder.fresh_state();
            Fragment { start: s, accept: t }
        }
        RegexAst::Concat(left, right) => {
            let l = build(builder, left);
            let r = build(builder, right);
            builder.add_transition(l.accept, Label::Silent, r.start);
            Fragment { start: l.start, accept: r.accept }
        }
        RegexAst::Union(left, right) => {
            let l = build(builder, left);
            let r = build(builder, right);
            let s = builder.fresh_state();
            let t = builder.fresh_state();
            builder.add_transition(s, Label::Silent, l.start);
            builder.add_transition(s, Label::Silent, r.start);
            builder.add_transition(l.accept, Label::Silent, t);
            builder.add_transition(r.accept, Label::Silent, t);
            Fragment { start: s, accept: t }
        }
        RegexAst::Star(child) => {
            let c = build(builder, child);
            let s = builder.fresh_state();
            let t = builder.fresh_state();
            builder.add_transition(s, Label::Silent, c.start);
            builder.add_transition(s, Label::Silent, t);
            builder.add_transition(c.accept, Label::Silent, c.start);
            builder.add_transition(c.accept, Label::Silent, t);
            Fragment { start: s, accept: t }
        }
        RegexAst::Plus(child) => {
            let c = build(builder, child);
            let s = builder.fresh_state();
            let t = builder.fresh_state();
            builder.add_transition(s, Label::Silent, c.start);
            builder.add_transition(c.accept, Label::Silent, c.start);
            builder.add_transition(c.accept, Label::Silent, t);
            Fragment { start: s, accept: t }
        }
        RegexAst::Option(child) => build(builder, &RegexAst::union(child.as_ref().clone(), RegexAst::Epsilon)),
    }
}

/// Build a nondeterministic automaton with silent transitions recognizing
/// the same language as `ast`. `allows_silent` is always `true` on the
/// result.
pub fn regex_to_automaton(ast: &RegexAst) -> Automaton {
    let symbols = SymbolTable::from_alphabet(ast.symbols())
        .expect("an AST's own collected symbols never include the reserved epsilon token");
    let mut builder = Builder::new(symbols, true);
    let fragment = build(&mut builder, ast);
    builder.add_start(fragment.start);
    builder.add_accept(fragment.accept);
    builder.build().expect("fragment assembly always yields a single start and a single accept")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closure::silent_closure_of;
    use crate::automaton::Label;
    use std::collections::BTreeSet;

    fn accepts(automaton: &Automaton, word: &[&str]) -> bool {
        let mut current = silent_closure_of(automaton, automaton.start().iter().copied());
        for &symbol in word {
            let Some(id) = automaton.symbols().lookup(symbol) else {
                return false;
            };
            let mut next: BTreeSet<StateId> = BTreeSet::new();
            for &q in &current {
                next.extend(automaton.successors(q, Label::Symbol(id)).iter().copied());
            }
            current = silent_closure_of(automaton, next);
        }
        current.iter().any(|&q| automaton.is_accepting(q))
    }

    #[test]
    fn fragment_construction_has_a_single_start_and_accept() {
        let ast = crate::regex::parser::parse_regex("a(a|b)b").unwrap();
        let automaton = regex_to_automaton(&ast);
        assert_eq!(automaton.start().len(), 1);
        assert_eq!(automaton.accept().len(), 1);
        assert!(automaton.allows_silent());
    }

    #[test]
    fn scenario_2_regex_recognizes_aab_and_abb_only() {
        let ast = crate::regex::parser::parse_regex("a(a|b)b").unwrap();
        let automaton = regex_to_automaton(&ast);

        assert!(accepts(&automaton, &["a", "a", "b"]));
        assert!(accepts(&automaton, &["a", "b", "b"]));
        assert!(!accepts(&automaton, &["a", "b"]));
        assert!(!accepts(&automaton, &["a", "a", "a"]));
    }

    #[test]
    fn scenario_3_regex_via_fragment_then_determinize_and_minimize() {
        use crate::determinize::determinize;
        use crate::minimize::minimize;
        use crate::reachability::complete;

        let ast = crate::regex::parser::parse_regex("(a|b)*abb").unwrap();
        let nfa = regex_to_automaton(&ast);
        let (dfa, _trace) = determinize(&nfa);
        let complete_dfa = complete(&dfa).unwrap();
        let minimal = minimize(&complete_dfa).unwrap();

        assert_eq!(minimal.state_count(), 4);

        fn det_accepts(automaton: &Automaton, word: &[&str]) -> bool {
            let mut current = automaton.start()[0];
            for &symbol in word {
                let id = automaton.symbols().lookup(symbol).unwrap();
                current = automaton.successors(current, Label::Symbol(id))[0];
            }
            automaton.is_accepting(current)
        }

        for word in [["a", "b", "b"].as_slice(), &["a", "a", "b", "b"], &["b", "a", "b", "b"]] {
            assert!(det_accepts(&minimal, word), "expected {word:?} to end in abb");
        }
        for word in [["a", "b"].as_slice(), &["a", "b", "a"], &[]] {
            assert!(!det_accepts(&minimal, word));
        }
    }

    #[test]
    fn empty_node_recognizes_nothing() {
        let ast = crate::regex::parser::parse_regex("\u{2205}").unwrap();
        let automaton = regex_to_automaton(&ast);
        assert!(!accepts(&automaton, &[]));
    }

    #[test]
    fn epsilon_node_recognizes_only_the_empty_word() {
        let ast = crate::regex::parser::parse_regex("\u{3b5}").unwrap();
        let automaton = regex_to_automaton(&ast);
        assert!(accepts(&automaton, &[]));
    }
}
