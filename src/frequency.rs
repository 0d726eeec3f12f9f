use std::collections::BTreeMap;
use std::io::{ErrorKind, Read};

use tracing::debug;

use crate::error::Result;
use crate::symbol::Symbol;

/// Occurrence counts for every symbol present in an input, always including
/// exactly one end-of-stream marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, usize>,
}

impl FrequencyTable {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let byte_counts = bytes.iter().fold([0usize; 256], |mut acc, &byte| {
            acc[byte as usize] += 1;
            acc
        });
        Self::from_byte_counts(&byte_counts)
    }

    /// Counts a whole byte source. The reader is consumed to its end.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let mut byte_counts = [0usize; 256];
        let mut buf = [0u8; 8192];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            for &byte in &buf[..n] {
                byte_counts[byte as usize] += 1;
            }
        }
        Ok(Self::from_byte_counts(&byte_counts))
    }

    fn from_byte_counts(byte_counts: &[usize; 256]) -> Self {
        let mut counts: BTreeMap<Symbol, usize> = byte_counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(byte, &count)| (Symbol::Byte(byte as u8), count))
            .collect();
        counts.insert(Symbol::Eof, 1);

        debug!(symbols = counts.len(), "counted symbol frequencies");
        FrequencyTable { counts }
    }

    /// Builds a table directly from counts, without adding the end-of-stream
    /// marker. Zero counts are dropped.
    pub fn from_counts<I: IntoIterator<Item = (Symbol, usize)>>(counts: I) -> Self {
        FrequencyTable {
            counts: counts.into_iter().filter(|(_, c)| *c > 0).collect(),
        }
    }

    pub fn get(&self, symbol: Symbol) -> usize {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts; input length + 1 for a table built from input.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Entries in ascending symbol order, the end-of-stream marker last.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, usize)> + '_ {
        self.counts.iter().map(|(s, c)| (*s, *c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn empty_input_has_only_eof() {
        let table = FrequencyTable::from_bytes(&[]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(Symbol::Eof), 1);
        assert_eq!(table.total(), 1);
    }

    #[test]
    fn counts_bytes() {
        let table = FrequencyTable::from_bytes(b"AAAAABBBCCD");
        assert_eq!(table.get(Symbol::Byte(b'A')), 5);
        assert_eq!(table.get(Symbol::Byte(b'B')), 3);
        assert_eq!(table.get(Symbol::Byte(b'C')), 2);
        assert_eq!(table.get(Symbol::Byte(b'D')), 1);
        assert_eq!(table.get(Symbol::Byte(b'E')), 0);
        assert_eq!(table.get(Symbol::Eof), 1);
        assert_eq!(table.total(), 12);
    }

    #[test]
    fn eof_count_is_one_even_for_ff_bytes() {
        let table = FrequencyTable::from_bytes(&[0xff; 300]);
        assert_eq!(table.get(Symbol::Byte(0xff)), 300);
        assert_eq!(table.get(Symbol::Eof), 1);
    }

    #[test]
    fn reader_matches_slice() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i * 7 % 251) as u8).collect();
        let from_reader = FrequencyTable::from_reader(&mut Cursor::new(&data)).unwrap();
        assert_eq!(from_reader, FrequencyTable::from_bytes(&data));
    }

    #[test]
    fn iteration_order_puts_eof_last() {
        let table = FrequencyTable::from_bytes(b"zya");
        let symbols: Vec<Symbol> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(
            symbols,
            vec![
                Symbol::Byte(b'a'),
                Symbol::Byte(b'y'),
                Symbol::Byte(b'z'),
                Symbol::Eof
            ]
        );
    }
}
