//! Arden's-lemma equation solver.
use std::collections::{BTreeMap, BTreeSet};

use crate::regex::ast::RegexAst;
use crate::regex::simplify::simplify;

/// An equation variable name, e.g. `"X1"`.
pub type Var = String;

/// One equation `Xᵢ = ⋁ⱼ Aᵢⱼ · Xⱼ | Bᵢ`: `coefficients` maps each
/// referenced variable `Xⱼ` to its regex coefficient `Aᵢⱼ`, `constant` is
/// `Bᵢ`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    pub coefficients: BTreeMap<Var, RegexAst>,
    pub constant: RegexAst,
}

impl Equation {
    pub fn new(coefficients: BTreeMap<Var, RegexAst>, constant: RegexAst) -> Self {
        Equation { coefficients, constant }
    }
}

/// The result of [`solve_equations`]: a closed-form regex per variable, plus
/// the subset flagged during elimination because their self-coefficient was
/// nullable — Arden's identity still yields the least solution in that
/// case, but it may not be the only one, so those variables are marked
/// rather than silently treated as uniquely determined.
#[derive(Debug, Clone)]
pub struct Solution {
    pub closed_forms: BTreeMap<Var, RegexAst>,
    pub possibly_non_unique: BTreeSet<Var>,
}

/// `nullable(r)`: does `r`'s language contain `ε`. Used only to decide
/// whether an Arden step is eliminating a self-coefficient that could make
/// the resulting closed form non-unique.
fn nullable(ast: &RegexAst) -> bool {
    match ast {
        RegexAst::Empty => false,
        RegexAst::Epsilon => true,
        RegexAst::Symbol(_) => false,
        RegexAst::Concat(l, r) => nullable(l) && nullable(r),
        RegexAst::Union(l, r) => nullable(l) || nullable(r),
        RegexAst::Star(_) | RegexAst::Option(_) => true,
        RegexAst::Plus(c) => nullable(c),
    }
}

fn contains_epsilon(equation: &Equation) -> bool {
    equation.constant == RegexAst::Epsilon
        || equation.coefficients.values().any(|c| *c == RegexAst::Epsilon)
}

/// Apply Arden's identity to eliminate `var`'s self-coefficient: rewrites
/// `Xᵥ = A·Xᵥ | (rest)` into `Xᵥ = A*·(rest)`, folding the `A*` factor into
/// every remaining coefficient and the constant. Returns the rewritten
/// equation and whether `A` was nullable.
fn apply_arden(mut equation: Equation, var: &Var) -> (Equation, bool) {
    let self_coefficient = equation.coefficients.remove(var).unwrap_or(RegexAst::Empty);
    let was_nullable = nullable(&self_coefficient);
    let star = simplify(&RegexAst::star(self_coefficient));

    for coefficient in equation.coefficients.values_mut() {
        *coefficient = simplify(&RegexAst::concat(star.clone(), coefficient.clone()));
    }
    equation.constant = simplify(&RegexAst::concat(star, equation.constant));

    (equation, was_nullable)
}

/// Eliminate `var` from `target` by substituting `replacement` (`var`'s
/// already-Arden-reduced equation) wherever `target` refers to `var`.
fn substitute(target: &mut Equation, var: &Var, replacement: &Equation) {
    let Some(coefficient) = target.coefficients.remove(var) else {
        return;
    };

    for (other_var, other_coefficient) in &replacement.coefficients {
        let term = simplify(&RegexAst::concat(coefficient.clone(), other_coefficient.clone()));
        let entry = target
            .coefficients
            .entry(other_var.clone())
            .or_insert(RegexAst::Empty);
        *entry = simplify(&RegexAst::union(entry.clone(), term));
    }

    let constant_term = simplify(&RegexAst::concat(coefficient, replacement.constant.clone()));
    target.constant = simplify(&RegexAst::union(target.constant.clone(), constant_term));
}

/// Pick the next variable to eliminate: prefer a simple self-coefficient
/// (none, or a bare symbol/epsilon, over a compound union/concat that would
/// blow up under Arden's `A*`), then an equation already mentioning `ε` (it
/// shrinks the system faster), then the fewest remaining dependencies; ties
/// break on variable name so the elimination order — and hence the output
/// shape — is reproducible.
fn select_next(remaining: &BTreeMap<Var, Equation>) -> Var {
    fn self_coefficient_complexity(equation: &Equation, var: &Var) -> u8 {
        match equation.coefficients.get(var) {
            None => 0,
            Some(RegexAst::Symbol(_) | RegexAst::Epsilon) => 1,
            Some(_) => 2,
        }
    }

    remaining
        .iter()
        .min_by_key(|(var, equation)| {
            (
                self_coefficient_complexity(equation, var),
                !contains_epsilon(equation) as u8,
                equation.coefficients.len(),
                (*var).clone(),
            )
        })
        .map(|(var, _)| var.clone())
        .expect("select_next is only called while `remaining` is non-empty")
}

/// Solve a right-linear equation system via repeated Arden elimination and
/// back-substitution.
pub fn solve_equations(equations: &BTreeMap<Var, Equation>) -> Solution {
    let mut remaining = equations.clone();
    let mut eliminated: BTreeMap<Var, Equation> = BTreeMap::new();
    let mut order: Vec<Var> = Vec::new();
    let mut flagged: BTreeSet<Var> = BTreeSet::new();

    while !remaining.is_empty() {
        let next = select_next(&remaining);
        let equation = remaining.remove(&next).unwrap();
        let (reduced, was_nullable) = apply_arden(equation, &next);
        if was_nullable {
            flagged.insert(next.clone());
        }

        for other in remaining.values_mut() {
            substitute(other, &next, &reduced);
        }

        eliminated.insert(next.clone(), reduced);
        order.push(next);
    }

    // Back-substitute in reverse elimination order: by construction each
    // eliminated equation only still mentions variables eliminated *after*
    // it, which by the time we reach it here (processing last-eliminated
    // first) are already fully resolved.
    let mut closed_forms: BTreeMap<Var, RegexAst> = BTreeMap::new();
    for var in order.into_iter().rev() {
        let mut equation = eliminated.remove(&var).unwrap();
        let dependents: Vec<Var> = equation.coefficients.keys().cloned().collect();
        for dependent in dependents {
            if let Some(resolved) = closed_forms.get(&dependent) {
                let coefficient = equation.coefficients.remove(&dependent).unwrap();
                let term = simplify(&RegexAst::concat(coefficient, resolved.clone()));
                equation.constant = simplify(&RegexAst::union(equation.constant, term));
            }
        }
        debug_assert!(
            equation.coefficients.is_empty(),
            "back-substitution leaves a dangling dependency on an unresolved variable"
        );
        closed_forms.insert(var, equation.constant);
    }

    Solution { closed_forms, possibly_non_unique: flagged }
}
