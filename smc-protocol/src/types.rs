//! Key and data type descriptors

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fourcc::FourCharCode;

/// Declared type of a key's payload: a type tag plus a byte size.
///
/// Two data types are equal only when both tag and size match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataType {
    #[serde(rename = "type")]
    pub code: FourCharCode,
    pub size: u32,
}

impl DataType {
    pub const FLAG: DataType = DataType::new(FourCharCode::from_bytes(*b"flag"), 1);
    pub const FPE2: DataType = DataType::new(FourCharCode::from_bytes(*b"fpe2"), 2);
    pub const SP78: DataType = DataType::new(FourCharCode::from_bytes(*b"sp78"), 2);
    pub const UI8: DataType = DataType::new(FourCharCode::from_bytes(*b"ui8 "), 1);
    pub const UI32: DataType = DataType::new(FourCharCode::from_bytes(*b"ui32"), 4);
    /// Fan descriptor blob; bytes 4..16 hold the fan's name.
    pub const FDS: DataType = DataType::new(FourCharCode::from_bytes(*b"{fds"), 16);

    pub const fn new(code: FourCharCode, size: u32) -> Self {
        Self { code, size }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.code, self.size)
    }
}

/// A controller key: its name and how to interpret its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    pub code: FourCharCode,
    pub info: DataType,
}

impl Key {
    pub const fn new(code: FourCharCode, info: DataType) -> Self {
        Self { code, info }
    }
}
