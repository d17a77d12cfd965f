//! Algebraic normalization of the regex AST.
//!
//! Operates on the AST rather than the string form, since the AST is
//! already a structured representation of the same grammar and rewriting it
//! directly avoids a parse/render round trip. Used between
//! elimination/substitution steps by [`crate::synthesis`] and
//! [`crate::arden`], and directly as a test oracle.
use super::ast::RegexAst;

/// Simplify `ast` to a fixed point under a small set of algebraic rewrite
/// rules (identity/annihilation for `ε`/`∅`, Kleene-star laws, and a
/// length-guarded distribution). Total (never fails) and idempotent; never
/// changes the recognized language.
pub fn simplify(ast: &RegexAst) -> RegexAst {
    let mut current = ast.clone();
    loop {
        let next = simplify_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn simplify_once(ast: &RegexAst) -> RegexAst {
    match ast {
        RegexAst::Empty | RegexAst::Epsilon | RegexAst::Symbol(_) => ast.clone(),

        RegexAst::Concat(left, right) => {
            let left = simplify_once(left);
            let right = simplify_once(right);
            match (&left, &right) {
                // ε·r = r·ε = r
                (RegexAst::Epsilon, _) => right,
                (_, RegexAst::Epsilon) => left,
                // ∅·r = r·∅ = ∅
                (RegexAst::Empty, _) | (_, RegexAst::Empty) => RegexAst::Empty,
                _ => RegexAst::concat(left, right),
            }
        }

        RegexAst::Union(left, right) => {
            let left = simplify_once(left);
            let right = simplify_once(right);
            match (&left, &right) {
                // r|∅ = ∅|r = r
                (RegexAst::Empty, _) => right,
                (_, RegexAst::Empty) => left,
                // r|r = r
                _ if left == right => left,
                _ => distribute_union(left, right),
            }
        }

        RegexAst::Star(child) => {
            let child = simplify_once(child);
            match child {
                // ∅* = ε
                RegexAst::Empty => RegexAst::Epsilon,
                // ε* = ε
                RegexAst::Epsilon => RegexAst::Epsilon,
                // (r*)* = r*
                RegexAst::Star(inner) => RegexAst::star(*inner),
                // (r|ε)* = r*, in either argument order
                RegexAst::Union(ref l, ref r) if **r == RegexAst::Epsilon => {
                    RegexAst::star((**l).clone())
                }
                RegexAst::Union(ref l, ref r) if **l == RegexAst::Epsilon => {
                    RegexAst::star((**r).clone())
                }
                other => RegexAst::star(other),
            }
        }

        RegexAst::Plus(child) => {
            let child = simplify_once(child);
            match child {
                // ∅+ matches nothing: one-or-more repetitions of ∅ is still ∅
                RegexAst::Empty => RegexAst::Empty,
                // ε+ = ε
                RegexAst::Epsilon => RegexAst::Epsilon,
                RegexAst::Star(inner) => RegexAst::star(*inner),
                RegexAst::Plus(inner) => RegexAst::plus(*inner),
                other => RegexAst::plus(other),
            }
        }

        RegexAst::Option(child) => {
            let child = simplify_once(child);
            match child {
                // ∅? = ε
                RegexAst::Empty => RegexAst::Epsilon,
                RegexAst::Epsilon => RegexAst::Epsilon,
                // (r*)? = r*
                RegexAst::Star(inner) => RegexAst::star(*inner),
                RegexAst::Option(inner) => RegexAst::option(*inner),
                other => RegexAst::option(other),
            }
        }
    }
}

/// `A(B|ε) -> AB|A`, applied only when it shortens the expression. Looked
/// for on either side of the union once both are already simplified, since
/// that is where the opportunity shows up after a concatenation step folds
/// `B|ε` into a single child.
fn distribute_union(left: RegexAst, right: RegexAst) -> RegexAst {
    let candidate = RegexAst::union(left.clone(), right.clone());
    // Only the direction that folds `AB|A` into `A(B|ε)` ever shortens a
    // rendered expression, so that is the only direction attempted.
    if let (RegexAst::Concat(prefix_l, suffix_l), other) = (&left, &right) {
        if **prefix_l == *other {
            let folded = RegexAst::concat(
                (**prefix_l).clone(),
                RegexAst::union((**suffix_l).clone(), RegexAst::Epsilon),
            );
            if folded.to_string().len() < candidate.to_string().len() {
                return simplify_once(&folded);
            }
        }
    }
    if let (other, RegexAst::Concat(prefix_r, suffix_r)) = (&left, &right) {
        if **prefix_r == *other {
            let folded = RegexAst::concat(
                (**prefix_r).clone(),
                RegexAst::union((**suffix_r).clone(), RegexAst::Epsilon),
            );
            if folded.to_string().len() < candidate.to_string().len() {
                return simplify_once(&folded);
            }
        }
    }
    candidate
}
