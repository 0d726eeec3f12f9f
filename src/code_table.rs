use std::collections::BTreeMap;
use std::fmt;

use crate::error::{HuffmanError, Result};
use crate::hufftree::HuffmanTree;
use crate::symbol::Symbol;

/// Longest code a `Code` can hold.
pub const MAX_CODE_LEN: usize = 64;

/// A root-to-leaf path: `len` bits right-aligned in `bits`, first step most
/// significant. 0 is a left descent, 1 a right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    bits: u64,
    len: usize,
}

impl Code {
    pub(crate) fn new(bits: u64, len: usize) -> Self {
        debug_assert!(len <= MAX_CODE_LEN);
        Code { bits, len }
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        let shift = other.len - self.len;
        let head = if shift == 64 { 0 } else { other.bits >> shift };
        head == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pos in (0..self.len).rev() {
            let bit = if (self.bits >> pos) & 1 == 1 { '1' } else { '0' };
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

/// Symbol to code mapping derived from a Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, Code>,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut table = CodeTable::default();
        tree.root.generate_table(&mut table, 0, 0)?;
        Ok(table)
    }

    pub(crate) fn insert(&mut self, symbol: Symbol, code: Code) {
        self.codes.insert(symbol, code);
    }

    /// Looks up the code for `symbol`, failing if the table has none.
    pub fn code(&self, symbol: Symbol) -> Result<Code> {
        self.codes
            .get(&symbol)
            .copied()
            .ok_or_else(|| HuffmanError::InvalidCodeTable(format!("no code for symbol {}", symbol)))
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, Code)> + '_ {
        self.codes.iter().map(|(s, c)| (*s, *c))
    }

    /// True when every code is non-empty and none is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<Code> = self.codes.values().copied().collect();
        codes.iter().all(|c| !c.is_empty())
            && codes.iter().enumerate().all(|(i, a)| {
                codes
                    .iter()
                    .enumerate()
                    .all(|(j, b)| i == j || !a.is_prefix_of(b))
            })
    }
}
