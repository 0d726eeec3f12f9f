/// Packed output of one compression run, with its bit accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedData {
    pub bytes: Vec<u8>,
    /// Tree shape plus the header terminator.
    pub header_bits: usize,
    /// Every symbol code, the end-of-stream code included.
    pub payload_bits: usize,
    pub original_length: usize,
}

impl CompressedData {
    pub fn total_bits(&self) -> usize {
        self.header_bits + self.payload_bits
    }

    pub fn padding_bits(&self) -> usize {
        self.bytes.len() * 8 - self.total_bits()
    }

    pub fn compressed_length(&self) -> usize {
        self.bytes.len()
    }

    /// Original size over compressed size.
    pub fn ratio(&self) -> f64 {
        self.original_length as f64 / self.compressed_length() as f64
    }

    /// Share of the original size saved, in percent. Negative when the
    /// output grew.
    pub fn savings_percent(&self) -> f64 {
        if self.original_length == 0 {
            return 0.0;
        }
        100.0 - (self.compressed_length() as f64 / self.original_length as f64) * 100.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
