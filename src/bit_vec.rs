/// Growable bit sequence packed most-significant-bit first.
///
/// Unused bits of the final byte are always zero, so `as_bytes` is already
/// padded to a byte boundary.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BitVec {
    bits: Vec<u8>,
    bit_count: usize,
}

impl BitVec {
    pub fn new() -> Self {
        BitVec {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    /// Every bit of `bytes` is significant.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let bit_count = bytes.len() * 8;
        BitVec {
            bits: bytes,
            bit_count,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    /// Number of zero bits that pad the last byte.
    pub fn padding(&self) -> usize {
        self.bits.len() * 8 - self.bit_count
    }

    pub fn push_bit(&mut self, bit: bool) {
        // which byte is target?
        let byte_index = self.bit_count / 8;
        // which bit in it, counted from the MSB?
        let bit_offset = self.bit_count % 8;

        // make a new zeroed byte if needed
        if byte_index >= self.bits.len() {
            self.bits.push(0);
        }

        // set bit with OR and mask
        if bit {
            self.bits[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    /// Appends the low `bit_length` bits of `code`, highest first.
    pub fn push_bits(&mut self, code: u64, bit_length: usize) {
        debug_assert!(bit_length <= 64);
        for bit_pos in (0..bit_length).rev() {
            let bit = (code >> bit_pos) & 1;
            self.push_bit(bit != 0);
        }
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        let byte = self.bits[index / 8];
        Some(byte & (1 << (7 - index % 8)) != 0)
    }

    pub fn reader(&self) -> BitReader<'_> {
        BitReader { bits: self, pos: 0 }
    }
}

/// Forward-only cursor over a `BitVec`.
#[derive(Debug)]
pub struct BitReader<'a> {
    bits: &'a BitVec,
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn read_bit(&mut self) -> Option<bool> {
        let bit = self.bits.get(self.pos)?;
        self.pos += 1;
        Some(bit)
    }

    /// Reads `count` bits as an integer, first bit most significant. On
    /// exhaustion the cursor is left where it was.
    pub fn read_bits(&mut self, count: usize) -> Option<u64> {
        debug_assert!(count <= 64);
        if self.remaining() < count {
            return None;
        }
        let mut value = 0u64;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as u64;
        }
        Some(value)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bits.len() - self.pos
    }
}
