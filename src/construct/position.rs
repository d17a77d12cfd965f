//! Position-based (Glushkov) regex → automaton construction: linearize
//! symbol occurrences, compute `nullable`/`first`/`last`/`follow`, then
//! assemble a silent-transition-free automaton directly from `follow`.
use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::automaton::{Automaton, Builder, Label};
use crate::regex::ast::RegexAst;
use crate::symbol::{SymbolId, SymbolTable};

/// `nullable`/`first`/`last` for one AST node, computed bottom-up in a
/// single pass rather than by repeated recomputation — each node of a tree
/// is visited exactly once here since there is no sharing between
/// subtrees.
struct Computed {
    nullable: bool,
    first: BTreeSet<u32>,
    last: BTreeSet<u32>,
}

/// Walks the AST assigning positions `1..=k` to symbol occurrences in
/// left-to-right order, recording each position's symbol and accumulating
/// `follow` as it goes, and returns the root's `nullable`/`first`/`last`.
struct Linearizer {
    next_position: u32,
    symbol_at: Vec<SymbolId>,
    follow: BTreeMap<u32, BTreeSet<u32>>,
    symbols: SymbolTable,
}

impl Linearizer {
    fn new(symbols: SymbolTable) -> Self {
        Linearizer {
            next_position: 1,
            symbol_at: Vec::new(),
            follow: BTreeMap::new(),
            symbols,
        }
    }

    fn add_follow(&mut self, sources: &BTreeSet<u32>, targets: &BTreeSet<u32>) {
        for &p in sources {
            self.follow.entry(p).or_default().extend(targets.iter().copied());
        }
    }

    fn walk(&mut self, ast: &RegexAst) -> Computed {
        match ast {
            RegexAst::Empty => Computed { nullable: false, first: BTreeSet::new(), last: BTreeSet::new() },
            RegexAst::Epsilon => Computed { nullable: true, first: BTreeSet::new(), last: BTreeSet::new() },
            RegexAst::Symbol(label) => {
                let position = self.next_position;
                self.next_position += 1;
                let symbol = self
                    .symbols
                    .lookup(label)
                    .expect("symbol was collected from this same AST");
                self.symbol_at.push(symbol);
                debug_assert_eq!(self.symbol_at.len() as u32, position);
                Computed {
                    nullable: false,
                    first: BTreeSet::from([position]),
                    last: BTreeSet::from([position]),
                }
            }
            RegexAst::Concat(left, right) => {
                let l = self.walk(left);
                let r = self.walk(right);
                self.add_follow(&l.last, &r.first);
                let first = if l.nullable {
                    l.first.union(&r.first).copied().collect()
                } else {
                    l.first
                };
                let last = if r.nullable {
                    r.last.union(&l.last).copied().collect()
                } else {
                    r.last
                };
                Computed { nullable: l.nullable && r.nullable, first, last }
            }
            RegexAst::Union(left, right) => {
                let l = self.walk(left);
                let r = self.walk(right);
                Computed {
                    nullable: l.nullable || r.nullable,
                    first: l.first.union(&r.first).copied().collect(),
                    last: l.last.union(&r.last).copied().collect(),
                }
            }
            RegexAst::Star(child) => {
                let c = self.walk(child);
                self.add_follow(&c.last, &c.first);
                Computed { nullable: true, first: c.first, last: c.last }
            }
            RegexAst::Plus(child) => {
                let c = self.walk(child);
                self.add_follow(&c.last, &c.first);
                Computed { nullable: c.nullable, first: c.first, last: c.last }
            }
            RegexAst::Option(child) => {
                let c = self.walk(child);
                Computed { nullable: true, first: c.first, last: c.last }
            }
        }
    }
}

/// Build a silent-transition-free automaton recognizing the same language
/// as `ast`. States are `0..=k` where `k` is the number of symbol
/// occurrences and `0` is the start; `allows_silent` is always `false` on
/// the result.
pub fn regex_to_automaton(ast: &RegexAst) -> Automaton {
    let symbols = SymbolTable::from_alphabet(ast.symbols())
        .expect("an AST's own collected symbols never include the reserved epsilon token");

    let mut linearizer = Linearizer::new(symbols);
    let root = linearizer.walk(ast);
    let k = linearizer.symbol_at.len() as u32;

    let mut builder = Builder::new(linearizer.symbols.clone(), false);
    let positions: Vec<_> = (0..=k).map(|_| builder.fresh_state()).collect();

    for &p in &root.first {
        let label = Label::Symbol(linearizer.symbol_at[(p - 1) as usize]);
        builder.add_transition(positions[0], label, positions[p as usize]);
    }
    for (&p, followers) in &linearizer.follow {
        for &q in followers {
            let label = Label::Symbol(linearizer.symbol_at[(q - 1) as usize]);
            builder.add_transition(positions[p as usize], label, positions[q as usize]);
        }
    }

    builder.add_start(positions[0]);
    for &p in &root.last {
        builder.add_accept(positions[p as usize]);
    }
    if root.nullable {
        builder.add_accept(positions[0]);
    }

    builder.build().expect("position construction always yields a valid deterministic-shaped NFA")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::parser::parse_regex;
    use std::collections::BTreeSet;

    fn accepts(automaton: &Automaton, word: &[&str]) -> bool {
        let mut current: BTreeSet<_> = automaton.start().iter().copied().collect();
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
    fn scenario_2_position_construction_matches_the_spec_shape() {
        let ast = parse_regex("a(a|b)b").unwrap();
        let automaton = regex_to_automaton(&ast);

        assert!(!automaton.allows_silent());
        assert_eq!(automaton.state_count(), 5); // positions 0..=4

        assert!(accepts(&automaton, &["a", "a", "b"]));
        assert!(accepts(&automaton, &["a", "b", "b"]));
        assert!(!accepts(&automaton, &["a", "b"]));
        assert!(!accepts(&automaton, &["a", "a", "a"]));
        assert!(!accepts(&automaton, &["b", "a", "b"]));
    }

    #[test]
    fn nullable_root_accepts_the_empty_word() {
        let ast = parse_regex("a*").unwrap();
        let automaton = regex_to_automaton(&ast);
        assert!(accepts(&automaton, &[]));
        assert!(accepts(&automaton, &["a", "a", "a"]));
    }

    #[test]
    fn empty_language_has_no_accept_on_start() {
        let ast = parse_regex("\u{2205}").unwrap();
        let automaton = regex_to_automaton(&ast);
        assert!(!accepts(&automaton, &[]));
    }
}
