use crate::Bip32Error;
use std::fmt;

/// Index offset for hardened children (index >= 0x80000000) i.e., 0x80000000 = 2³¹
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// A child number. Values at or above [`HARDENED_OFFSET`] are hardened.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChildIndex(u32);

impl ChildIndex {
    pub const fn new(raw: u32) -> Self {
        ChildIndex(raw)
    }

    /// Hardened child `n'`; `n` must be below 2³¹.
    pub fn hardened(n: u32) -> Result<Self, Bip32Error> {
        if n >= HARDENED_OFFSET {
            return Err(Bip32Error::MalformedPath);
        }
        Ok(ChildIndex(n + HARDENED_OFFSET))
    }

    /// Non-hardened child `n`; `n` must be below 2³¹.
    pub fn normal(n: u32) -> Result<Self, Bip32Error> {
        if n >= HARDENED_OFFSET {
            return Err(Bip32Error::MalformedPath);
        }
        Ok(ChildIndex(n))
    }

    pub fn is_hardened(self) -> bool {
        self.0 >= HARDENED_OFFSET
    }

    /// The full 32-bit value, hardened offset included.
    pub fn value(self) -> u32 {
        self.0
    }

    /// The index with the hardened offset stripped.
    pub fn unhardened(self) -> u32 {
        self.0 & !HARDENED_OFFSET
    }

    pub fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl From<u32> for ChildIndex {
    fn from(raw: u32) -> Self {
        ChildIndex(raw)
    }
}

impl From<ChildIndex> for u32 {
    fn from(index: ChildIndex) -> Self {
        index.0
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hardened() {
            write!(f, "{}'", self.unhardened())
        } else {
            write!(f, "{}", self.0)
        }
    }
}
