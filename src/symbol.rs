//! Alphabet symbols and the table that interns their display labels.
use std::collections::HashMap;

/// A dense id for a member of Σ. Never allocated for the silent token `ε`
/// itself — see [`Label`](crate::automaton::Label), which keeps `ε` as a
/// distinct case rather than a member of this table; the silent token is
/// reserved and never a member of Σ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The reserved token spelling for a silent transition, accepted on input
/// as either form.
pub const EPSILON_TOKENS: [&str; 2] = ["\u{3b5}", "epsilon"];

pub fn is_epsilon_token(label: &str) -> bool {
    EPSILON_TOKENS.contains(&label)
}

/// The ordered, deduplicated alphabet Σ, with a label table for display.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    labels: Vec<String>,
    by_label: HashMap<String, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Build the table from an ordered alphabet, rejecting `ε` entries and
    /// deduplicating while preserving first-seen order.
    pub fn from_alphabet<I, S>(symbols: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = SymbolTable::new();
        for symbol in symbols {
            let symbol = symbol.as_ref();
            if is_epsilon_token(symbol) {
                return Err(format!("'{symbol}' is reserved and cannot be a member of the alphabet"));
            }
            if !table.by_label.contains_key(symbol) {
                let id = SymbolId(table.labels.len() as u32);
                table.labels.push(symbol.to_string());
                table.by_label.insert(symbol.to_string(), id);
            }
        }
        Ok(table)
    }

    pub fn label(&self, id: SymbolId) -> &str {
        &self.labels[id.index()]
    }

    pub fn lookup(&self, label: &str) -> Option<SymbolId> {
        self.by_label.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = SymbolId> + '_ {
        (0..self.labels.len() as u32).map(SymbolId)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedups_while_preserving_order() {
        let table = SymbolTable::from_alphabet(["b", "a", "b", "c"]).unwrap();
        assert_eq!(table.labels(), &["b".to_string(), "a".to_string(), "c".to_string()]);
    }

    #[test]
    fn rejects_epsilon_as_a_real_symbol() {
        assert!(SymbolTable::from_alphabet(["a", "\u{3b5}"]).is_err());
        assert!(SymbolTable::from_alphabet(["a", "epsilon"]).is_err());
    }
}
