use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::bit_vec::{BitReader, BitVec};
use crate::code_table::{Code, CodeTable, MAX_CODE_LEN};
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;
use crate::symbol::Symbol;

/// Deepest internal node a tree over 257 symbols can have.
pub const MAX_TREE_DEPTH: usize = 256;

const LEAF_PAYLOAD_BITS: usize = 8;
const ALL_ONES: u64 = 0xff;

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(bytes))
    }

    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// Leaves enter the queue in ascending symbol order and every node gets
    /// an insertion sequence number; equal weights leave the queue in
    /// insertion order. The first node extracted becomes the left child.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffmanError::EmptyFrequencyTable);
        }

        let mut seq = 0;
        let mut nodes = Vec::with_capacity(frequencies.len() + 1);

        // A lone symbol still needs a one-bit code, so give it a weightless sibling.
        if frequencies.len() == 1 {
            let dummy = (0..=255u8)
                .map(Symbol::Byte)
                .find(|s| frequencies.get(*s) == 0)
                .unwrap_or(Symbol::Byte(0));
            nodes.push(Queued::new(HuffNode::new(dummy, 0), &mut seq));
        }
        for (symbol, count) in frequencies.iter() {
            nodes.push(Queued::new(HuffNode::new(symbol, count), &mut seq));
        }

        let heap = MinHeap::build(nodes);
        let tree = HuffmanTree::build_from_heap(heap, seq)?;
        debug!(
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            "built Huffman tree"
        );
        Ok(tree)
    }

    fn build_from_heap(mut heap: MinHeap<Queued>, mut seq: usize) -> Result<Self> {
        while heap.heap_size() > 1 {
            let x = heap.extract_min()?;
            let y = heap.extract_min()?;
            trace!(left = x.node.weight(), right = y.node.weight(), "merging nodes");
            heap.insert(Queued::new(HuffNode::merge(x.node, y.node), &mut seq));
        }
        let root = heap.extract_min()?.node;
        Ok(HuffmanTree { root })
    }

    pub fn generate_table(&self) -> Result<CodeTable> {
        CodeTable::from_tree(self)
    }

    /// Appends the preorder shape of the tree to `out`.
    pub fn serialize(&self, out: &mut BitVec) {
        self.root.serialize(out);
    }

    /// Rebuilds a tree from its preorder shape, consuming exactly the bits
    /// `serialize` wrote for it.
    pub fn deserialize(reader: &mut BitReader<'_>) -> Result<Self> {
        let root = HuffNode::deserialize(reader, 0)?;
        if root.is_leaf() {
            return Err(HuffmanError::MalformedHeader {
                bit_offset: reader.position(),
                reason: "tree root is a leaf",
            });
        }
        debug!(header_bits = reader.position(), "read tree header");
        Ok(HuffmanTree { root })
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Huffman Tree Structure:")?;
        self.root.fmt_node(f, 0, "root")
    }
}

#[derive(Debug, Clone)]
pub enum HuffNode {
    Leaf {
        weight: usize,
        symbol: Symbol,
    },
    Internal {
        weight: usize,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn new(symbol: Symbol, weight: usize) -> Self {
        HuffNode::Leaf { weight, symbol }
    }

    /// Node weight. Trees read back from a header carry zero weights.
    pub fn weight(&self) -> usize {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    pub fn merge(a: Self, b: Self) -> Self {
        let weight = a.weight() + b.weight();
        HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    pub(crate) fn generate_table(&self, table: &mut CodeTable, code: u64, depth: usize) -> Result<()> {
        match self {
            HuffNode::Leaf { symbol, .. } => {
                table.insert(*symbol, Code::new(code, depth));
            }
            HuffNode::Internal { left, right, .. } => {
                if depth == MAX_CODE_LEN {
                    return Err(HuffmanError::InvalidCodeTable(format!(
                        "tree deeper than {} levels",
                        MAX_CODE_LEN
                    )));
                }
                left.generate_table(table, code << 1, depth + 1)?;
                right.generate_table(table, (code << 1) | 1, depth + 1)?;
            }
        }
        Ok(())
    }

    // Leaf payload: 8 bits of the byte. 0xff and EOF both start with eight
    // ones and are told apart by one extra bit, 0 for the byte, 1 for EOF.
    fn serialize(&self, out: &mut BitVec) {
        match self {
            HuffNode::Leaf { symbol, .. } => {
                out.push_bit(true);
                match symbol {
                    Symbol::Byte(b) => {
                        out.push_bits(*b as u64, LEAF_PAYLOAD_BITS);
                        if *b == 0xff {
                            out.push_bit(false);
                        }
                    }
                    Symbol::Eof => {
                        out.push_bits(ALL_ONES, LEAF_PAYLOAD_BITS);
                        out.push_bit(true);
                    }
                }
            }
            HuffNode::Internal { left, right, .. } => {
                out.push_bit(false);
                left.serialize(out);
                right.serialize(out);
            }
        }
    }

    fn deserialize(reader: &mut BitReader<'_>, depth: usize) -> Result<Self> {
        let truncated = |reader: &BitReader<'_>| HuffmanError::TruncatedHeader {
            bit_offset: reader.position(),
        };

        let is_leaf = reader.read_bit().ok_or_else(|| truncated(reader))?;
        if is_leaf {
            let payload = reader
                .read_bits(LEAF_PAYLOAD_BITS)
                .ok_or_else(|| truncated(reader))?;
            let symbol = if payload == ALL_ONES {
                if reader.read_bit().ok_or_else(|| truncated(reader))? {
                    Symbol::Eof
                } else {
                    Symbol::Byte(0xff)
                }
            } else {
                Symbol::Byte(payload as u8)
            };
            trace!(%symbol, depth, "leaf");
            return Ok(HuffNode::new(symbol, 0));
        }

        if depth >= MAX_TREE_DEPTH {
            return Err(HuffmanError::MalformedHeader {
                bit_offset: reader.position(),
                reason: "tree nested too deeply",
            });
        }
        let left = HuffNode::deserialize(reader, depth + 1)?;
        let right = HuffNode::deserialize(reader, depth + 1)?;
        Ok(HuffNode::merge(left, right))
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, depth: usize, label: &str) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            HuffNode::Leaf { symbol, weight } => {
                writeln!(f, "{}{}-> Leaf: {} [weight: {}]", indent, label, symbol, weight)
            }
            HuffNode::Internal { weight, left, right } => {
                writeln!(f, "{}{}-> Internal [weight: {}]", indent, label, weight)?;
                left.fmt_node(f, depth + 1, "L")?;
                right.fmt_node(f, depth + 1, "R")
            }
        }
    }
}

/// Queue entry ordered by weight, then by insertion sequence.
#[derive(Debug)]
struct Queued {
    seq: usize,
    node: HuffNode,
}

impl Queued {
    fn new(node: HuffNode, seq: &mut usize) -> Self {
        let entry = Queued { seq: *seq, node };
        *seq += 1;
        entry
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node
            .weight()
            .cmp(&other.node.weight())
            .then(self.seq.cmp(&other.seq))
    }
}
