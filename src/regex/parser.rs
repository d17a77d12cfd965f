//! The regex parser: a shunting-yard reduction of a flat string over
//! `Σ ∪ {(, ), |, *, +, ?, ε, ∅}` into the regex AST.
use crate::error::{Error, RegexErrorKind, Result};

use super::ast::RegexAst;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Symbol,
    Epsilon,
    Empty,
    LParen,
    RParen,
    Union,
    Concat,
    Star,
    Plus,
    Option,
}

struct Scanned {
    token: Token,
    text: String,
    position: usize,
}

/// `true` for tokens that can end an atom, i.e. can be immediately followed
/// by an implicit concatenation operator.
fn ends_an_atom(token: Token) -> bool {
    matches!(
        token,
        Token::Symbol
            | Token::Epsilon
            | Token::Empty
            | Token::RParen
            | Token::Star
            | Token::Plus
            | Token::Option
    )
}

/// `true` for tokens that can begin an atom, i.e. can be immediately preceded
/// by an implicit concatenation operator.
fn starts_an_atom(token: Token) -> bool {
    matches!(token, Token::Symbol | Token::Epsilon | Token::Empty | Token::LParen)
}

fn scan(text: &str) -> Result<Vec<Scanned>> {
    let mut scanned = Vec::new();
    for (position, ch) in text.chars().enumerate() {
        if ch.is_whitespace() {
            continue;
        }
        let token = match ch {
            '(' => Token::LParen,
            ')' => Token::RParen,
            '|' => Token::Union,
            '*' => Token::Star,
            '+' => Token::Plus,
            '?' => Token::Option,
            '\u{3b5}' => Token::Epsilon,
            '\u{2205}' => Token::Empty,
            c if c.is_alphanumeric() => Token::Symbol,
            c => {
                return Err(Error::InvalidRegex {
                    position,
                    kind: RegexErrorKind::UnrecognizedCharacter(c),
                })
            }
        };
        scanned.push(Scanned { token, text: ch.to_string(), position });
    }
    Ok(scanned)
}

/// Insert a synthetic [`Token::Concat`] wherever the grammar implies one:
/// between a token that can end an atom and a following token that can
/// start one.
fn insert_implicit_concatenation(tokens: Vec<Scanned>) -> Vec<Scanned> {
    let mut result: Vec<Scanned> = Vec::with_capacity(tokens.len());
    for scanned in tokens {
        if let Some(previous) = result.last() {
            if ends_an_atom(previous.token) && starts_an_atom(scanned.token) {
                let position = scanned.position;
                result.push(Scanned { token: Token::Concat, text: String::new(), position });
            }
        }
        result.push(scanned);
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    LParen,
    Union,
    Concat,
}

impl Operator {
    /// Binary operator precedence: union binds loosest, concatenation next;
    /// postfix operators (handled separately in the parser loop) bind
    /// tightest of all.
    fn precedence(self) -> u8 {
        match self {
            Operator::LParen => 0,
            Operator::Union => 1,
            Operator::Concat => 2,
        }
    }
}

fn apply_binary(output: &mut Vec<RegexAst>, operator: Operator, position: usize) -> Result<()> {
    let right = output.pop().ok_or_else(|| unexpected_operator(position))?;
    let left = output.pop().ok_or_else(|| unexpected_operator(position))?;
    output.push(match operator {
        Operator::Union => RegexAst::union(left, right),
        Operator::Concat => RegexAst::concat(left, right),
        Operator::LParen => unreachable!("LParen is never applied as a binary operator"),
    });
    Ok(())
}

fn unexpected_operator(position: usize) -> Error {
    Error::InvalidRegex { position, kind: RegexErrorKind::UnexpectedOperator }
}

/// Parse a regex string into the regex AST.
pub fn parse_regex(text: &str) -> Result<RegexAst> {
    let tokens = scan(text)?;
    let tokens = insert_implicit_concatenation(tokens);

    let mut output: Vec<RegexAst> = Vec::new();
    let mut operators: Vec<Operator> = Vec::new();

    for scanned in &tokens {
        match scanned.token {
            Token::Symbol => output.push(RegexAst::symbol(scanned.text.clone())),
            Token::Epsilon => output.push(RegexAst::Epsilon),
            Token::Empty => output.push(RegexAst::Empty),
            Token::LParen => operators.push(Operator::LParen),
            Token::RParen => {
                loop {
                    match operators.pop() {
                        Some(Operator::LParen) => break,
                        Some(binary) => apply_binary(&mut output, binary, scanned.position)?,
                        None => {
                            return Err(Error::InvalidRegex {
                                position: scanned.position,
                                kind: RegexErrorKind::UnbalancedParenthesis,
                            })
                        }
                    }
                }
            }
            Token::Union => {
                while matches!(operators.last(), Some(op) if op.precedence() >= Operator::Union.precedence() && *op != Operator::LParen)
                {
                    apply_binary(&mut output, operators.pop().unwrap(), scanned.position)?;
                }
                operators.push(Operator::Union);
            }
            Token::Concat => {
                while matches!(operators.last(), Some(op) if op.precedence() >= Operator::Concat.precedence() && *op != Operator::LParen)
                {
                    apply_binary(&mut output, operators.pop().unwrap(), scanned.position)?;
                }
                operators.push(Operator::Concat);
            }
            Token::Star | Token::Plus | Token::Option => {
                let child = output.pop().ok_or_else(|| unexpected_operator(scanned.position))?;
                output.push(match scanned.token {
                    Token::Star => RegexAst::star(child),
                    Token::Plus => RegexAst::plus(child),
                    Token::Option => RegexAst::option(child),
                    _ => unreachable!(),
                });
            }
        }
    }

    while let Some(operator) = operators.pop() {
        match operator {
            Operator::LParen => {
                return Err(Error::InvalidRegex {
                    position: text.chars().count(),
                    kind: RegexErrorKind::UnbalancedParenthesis,
                })
            }
            binary => apply_binary(&mut output, binary, text.chars().count())?,
        }
    }

    match output.len() {
        1 => Ok(output.pop().unwrap()),
        0 => Err(Error::InvalidRegex {
            position: 0,
            kind: RegexErrorKind::UnexpectedEnd,
        }),
        _ => Err(Error::InvalidRegex {
            position: text.chars().count(),
            kind: RegexErrorKind::UnexpectedEnd,
        }),
    }
}
