//! Diagnostic hooks for the tables and tree built during compression.
//!
//! Reporters only observe; they have no effect on the packed output.

use std::io::{self, Write};

use crate::code_table::CodeTable;
use crate::frequency::FrequencyTable;
use crate::hufftree::HuffmanTree;

pub trait Reporter {
    fn frequencies(&mut self, _table: &FrequencyTable) -> io::Result<()> {
        Ok(())
    }

    fn code_table(&mut self, _table: &CodeTable) -> io::Result<()> {
        Ok(())
    }

    fn tree(&mut self, _tree: &HuffmanTree) -> io::Result<()> {
        Ok(())
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoReport;

impl Reporter for NoReport {}

/// Writes human-readable tables to any sink.
#[derive(Debug)]
pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        TextReport { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReport<W> {
    fn frequencies(&mut self, table: &FrequencyTable) -> io::Result<()> {
        writeln!(self.out, "Frequency Map ({} symbols):", table.len())?;
        for (symbol, count) in table.iter() {
            writeln!(self.out, "  {:>6}  {}", symbol.to_string(), count)?;
        }
        Ok(())
    }

    fn code_table(&mut self, table: &CodeTable) -> io::Result<()> {
        writeln!(self.out, "Encoding Map:")?;
        for (symbol, code) in table.iter() {
            writeln!(self.out, "  {:>6}  {}", symbol.to_string(), code)?;
        }
        Ok(())
    }

    fn tree(&mut self, tree: &HuffmanTree) -> io::Result<()> {
        write!(self.out, "{}", tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_report_lists_tables() {
        let freqs = FrequencyTable::from_bytes(b"aab");
        let tree = HuffmanTree::from_frequencies(&freqs).unwrap();
        let codes = tree.generate_table().unwrap();

        let mut report = TextReport::new(Vec::new());
        report.frequencies(&freqs).unwrap();
        report.code_table(&codes).unwrap();
        report.tree(&tree).unwrap();
        let text = String::from_utf8(report.into_inner()).unwrap();

        assert!(text.contains("Frequency Map (3 symbols):"));
        assert!(text.contains("   'a'  2"));
        assert!(text.contains("Encoding Map:"));
        assert!(text.contains("Huffman Tree Structure:"));
    }
}
