use std::io::{Read, Seek, SeekFrom, Write};

use tracing::debug;

use crate::bit_vec::{BitReader, BitVec};
use crate::code_table::CodeTable;
use crate::compressed_data::CompressedData;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::{HuffNode, HuffmanTree};
use crate::report::{NoReport, Reporter};
use crate::symbol::Symbol;

/// Marker between the tree header and the payload: a leaf flag followed by
/// the byte pattern 0xfe.
pub const HEADER_TERMINATOR: u64 = 0b1_1111_1110;
pub const HEADER_TERMINATOR_BITS: usize = 9;

/// Packs a byte stream with the codes of one Huffman tree.
///
/// File layout, one bitstream packed MSB first:
/// tree shape, header terminator, one code per input byte, the end-of-stream
/// code, then zero bits up to the next byte boundary.
pub struct HuffmanCodec {
    tree: HuffmanTree,
    encode_table: CodeTable,
}

impl HuffmanCodec {
    pub fn new(tree: HuffmanTree) -> Result<Self> {
        let encode_table = tree.generate_table()?;
        Ok(HuffmanCodec { tree, encode_table })
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        Self::new(HuffmanTree::from_frequencies(frequencies)?)
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.encode_table
    }

    pub fn encode(&self, data: &[u8]) -> Result<CompressedData> {
        let mut bit_vec = BitVec::new();
        self.tree.serialize(&mut bit_vec);
        bit_vec.push_bits(HEADER_TERMINATOR, HEADER_TERMINATOR_BITS);
        let header_bits = bit_vec.len();

        for &byte in data {
            let code = self.encode_table.code(Symbol::Byte(byte))?;
            bit_vec.push_bits(code.bits(), code.len());
        }
        let eof = self.encode_table.code(Symbol::Eof)?;
        bit_vec.push_bits(eof.bits(), eof.len());
        let payload_bits = bit_vec.len() - header_bits;

        debug!(
            original = data.len(),
            header_bits,
            payload_bits,
            padding = bit_vec.padding(),
            "packed payload"
        );

        Ok(CompressedData {
            bytes: bit_vec.into_bytes(),
            header_bits,
            payload_bits,
            original_length: data.len(),
        })
    }

    /// Counts, builds and packs in one go.
    pub fn compress(data: &[u8]) -> Result<CompressedData> {
        Self::compress_with_report(data, &mut NoReport)
    }

    pub fn compress_with_report(data: &[u8], reporter: &mut dyn Reporter) -> Result<CompressedData> {
        let frequencies = FrequencyTable::from_bytes(data);
        reporter.frequencies(&frequencies)?;
        let codec = Self::from_frequencies(&frequencies)?;
        reporter.tree(codec.tree())?;
        reporter.code_table(codec.code_table())?;
        codec.encode(data)
    }

    /// Rebuilds the tree from the header and decodes up to the end-of-stream
    /// code. Bits after it are padding and ignored.
    pub fn decompress(compressed: &[u8]) -> Result<Vec<u8>> {
        let bit_vec = BitVec::from_bytes(compressed.to_vec());
        let mut reader = bit_vec.reader();

        let tree = HuffmanTree::deserialize(&mut reader)?;
        Self::read_terminator(&mut reader)?;
        let decoded = Self::decode_payload(&tree, &mut reader)?;

        debug!(
            compressed = compressed.len(),
            decoded = decoded.len(),
            trailing_bits = reader.remaining(),
            "decoded payload"
        );
        Ok(decoded)
    }

    fn read_terminator(reader: &mut BitReader<'_>) -> Result<()> {
        let bit_offset = reader.position();
        match reader.read_bits(HEADER_TERMINATOR_BITS) {
            None => Err(HuffmanError::TruncatedHeader { bit_offset }),
            Some(HEADER_TERMINATOR) => Ok(()),
            Some(_) => Err(HuffmanError::MalformedHeader {
                bit_offset,
                reason: "missing header terminator",
            }),
        }
    }

    fn decode_payload(tree: &HuffmanTree, reader: &mut BitReader<'_>) -> Result<Vec<u8>> {
        let mut result = Vec::new();
        let mut current_node = &tree.root;

        loop {
            match current_node {
                HuffNode::Leaf { symbol, .. } => match symbol.as_byte() {
                    Some(byte) => {
                        result.push(byte);
                        current_node = &tree.root;
                    }
                    None => return Ok(result),
                },
                HuffNode::Internal { left, right, .. } => {
                    let bit = reader.read_bit().ok_or_else(|| HuffmanError::CorruptPayload {
                        bit_offset: reader.position(),
                    })?;
                    current_node = if bit { right } else { left };
                }
            }
        }
    }

    /// Compresses a whole byte source into `output`.
    ///
    /// The source is read twice: once to count frequencies, then again from
    /// position zero to encode.
    pub fn encode_from_file<R, W>(input: R, output: W) -> Result<CompressedData>
    where
        R: Read + Seek,
        W: Write,
    {
        Self::encode_from_file_with_report(input, output, &mut NoReport)
    }

    pub fn encode_from_file_with_report<R, W>(
        mut input: R,
        mut output: W,
        reporter: &mut dyn Reporter,
    ) -> Result<CompressedData>
    where
        R: Read + Seek,
        W: Write,
    {
        let frequencies = FrequencyTable::from_reader(&mut input)?;
        reporter.frequencies(&frequencies)?;
        let codec = Self::from_frequencies(&frequencies)?;
        reporter.tree(codec.tree())?;
        reporter.code_table(codec.code_table())?;

        input.seek(SeekFrom::Start(0))?;
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;

        let compressed = codec.encode(&data)?;
        output.write_all(&compressed.bytes)?;
        output.flush()?;
        Ok(compressed)
    }

    /// Decompresses a whole byte source into `output`, returning the number
    /// of bytes written.
    pub fn decode_from_file<R, W>(mut input: R, mut output: W) -> Result<usize>
    where
        R: Read,
        W: Write,
    {
        let mut compressed = Vec::new();
        input.read_to_end(&mut compressed)?;
        let decoded = Self::decompress(&compressed)?;
        output.write_all(&decoded)?;
        output.flush()?;
        Ok(decoded.len())
    }
}
