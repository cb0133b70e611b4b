//! Four-character codes
//!
//! The controller names every key and every data type with four bytes packed
//! big-endian into a `u32`, so `"TC0P"` becomes `0x5443_3050`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smc_error::{Result, SmcError};

/// A 32-bit value holding exactly four 8-bit characters, first character in
/// the most significant byte.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FourCharCode(u32);

impl FourCharCode {
    /// Pack four bytes. The array type makes the length check a compile-time one,
    /// so this is the constructor used for well-known keys.
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Pack a runtime string. Fails with `InvalidArgument` unless the string
    /// is exactly four characters, each representable as a single byte.
    pub fn parse(s: &str) -> Result<Self> {
        let mut bytes = [0u8; 4];
        let mut len = 0;
        for c in s.chars() {
            if len == 4 {
                return Err(wrong_length(s));
            }
            let b = u8::try_from(u32::from(c)).map_err(|_| {
                SmcError::invalid_argument(format!(
                    "four-character code {:?} contains non-byte character {:?}",
                    s, c
                ))
            })?;
            bytes[len] = b;
            len += 1;
        }
        if len != 4 {
            return Err(wrong_length(s));
        }
        Ok(Self::from_bytes(bytes))
    }

    /// True if the first character equals `c`.
    pub fn starts_with(self, c: u8) -> bool {
        self.to_bytes()[0] == c
    }
}

fn wrong_length(s: &str) -> SmcError {
    SmcError::invalid_argument(format!(
        "four-character code must be exactly 4 characters, got {:?} ({})",
        s,
        s.chars().count()
    ))
}

impl fmt::Display for FourCharCode {
    /// Every byte maps to one character; unprintable bytes are not escaped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.to_bytes() {
            write!(f, "{}", char::from(b))?;
        }
        Ok(())
    }
}

impl fmt::Debug for FourCharCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCharCode({:?})", self.to_string())
    }
}

impl FromStr for FourCharCode {
    type Err = SmcError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FourCharCode {
    type Error = SmcError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<FourCharCode> for String {
    fn from(code: FourCharCode) -> Self {
        code.to_string()
    }
}

impl From<FourCharCode> for u32 {
    fn from(code: FourCharCode) -> Self {
        code.0
    }
}
