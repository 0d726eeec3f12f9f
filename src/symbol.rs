use std::fmt;

/// One of the 257 symbols the coder works with: every byte value plus a
/// synthetic end-of-stream marker.
///
/// The derived ordering puts every `Byte` before `Eof`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Byte(u8),
    Eof,
}

impl Symbol {
    /// The literal byte, or `None` for the end-of-stream marker.
    pub fn as_byte(&self) -> Option<u8> {
        match self {
            Symbol::Byte(b) => Some(*b),
            Symbol::Eof => None,
        }
    }
}

impl From<u8> for Symbol {
    fn from(byte: u8) -> Self {
        Symbol::Byte(byte)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Byte(b) if b.is_ascii_graphic() => write!(f, "'{}'", *b as char),
            Symbol::Byte(b) => write!(f, "0x{:02x}", b),
            Symbol::Eof => write!(f, "EOF"),
        }
    }
}
