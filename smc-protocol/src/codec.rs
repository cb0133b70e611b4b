//! Payload encodings
//!
//! Stateless conversions between payload bytes and values. The controller
//! uses two fixed-point formats:
//!
//! - `fpe2`: unsigned, 14 integer bits and 2 fraction bits (fan speeds).
//! - `sp78`: signed, 7 integer bits and 8 fraction bits (temperatures).

use smc_error::Result;

use crate::fourcc::FourCharCode;

/// Pack a four-character string into its code.
pub fn pack_four_char(s: &str) -> Result<FourCharCode> {
    FourCharCode::parse(s)
}

/// Unpack a code into four characters, one per byte.
pub fn unpack_four_char(code: FourCharCode) -> String {
    code.to_string()
}

/// Big-endian assembly of four payload bytes.
pub fn assemble_u32(b0: u8, b1: u8, b2: u8, b3: u8) -> u32 {
    u32::from_be_bytes([b0, b1, b2, b3])
}

/// Flag bytes are true only when exactly 1.
pub fn bool_from_byte(b: u8) -> bool {
    b == 1
}

/// Decode `fpe2`, dropping the two fraction bits.
pub fn decode_fpe2(b0: u8, b1: u8) -> u32 {
    (u32::from(b0) << 6) + (u32::from(b1) >> 2)
}

/// Encode an integer as `fpe2`. Values above 16383 do not fit and wrap
/// silently.
pub fn encode_fpe2(n: u32) -> (u8, u8) {
    ((n >> 6) as u8, (n << 2) as u8)
}

/// Decode `sp78` from the sign bit and integer byte only.
///
/// The fraction byte is ignored: its bit layout in the driver ABI is not
/// established, so readings are whole degrees.
pub fn decode_sp78(b0: u8, _b1: u8) -> f64 {
    let sign = if b0 & 0x80 == 0 { 1.0 } else { -1.0 };
    sign * f64::from(b0 & 0x7F)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack_round_trip() {
        for s in ["TC0P", "FNum", "#KEY", "sp78"] {
            assert_eq!(unpack_four_char(pack_four_char(s).unwrap()), s);
        }
    }

    #[test]
    fn test_assemble_u32() {
        assert_eq!(assemble_u32(0, 0, 0, 5), 5);
        assert_eq!(assemble_u32(0x12, 0x34, 0x56, 0x78), 0x1234_5678);
        assert_eq!(assemble_u32(0xFF, 0xFF, 0xFF, 0xFF), u32::MAX);
    }

    #[test]
    fn test_bool_from_byte_is_exactly_one() {
        assert!(bool_from_byte(1));
        assert!(!bool_from_byte(0));
        assert!(!bool_from_byte(2));
        assert!(!bool_from_byte(0xFF));
    }

    #[test]
    fn test_decode_fpe2() {
        // 0x1F40 = 8000 << 2 → 2000 RPM
        assert_eq!(decode_fpe2(0x1F, 0x40), 2000);
        assert_eq!(decode_fpe2(0, 0), 0);
        assert_eq!(decode_fpe2(0xFF, 0xFF), 16383);
        // fraction bits are truncated
        assert_eq!(decode_fpe2(0x1F, 0x43), 2000);
    }

    #[test]
    fn test_decode_fpe2_monotonic() {
        let mut prev = 0;
        for raw in 0u32..=0xFFFF {
            let value = decode_fpe2((raw >> 8) as u8, raw as u8);
            assert!(value >= prev, "decode_fpe2 decreased at 0x{:04x}", raw);
            prev = value;
        }
    }

    #[test]
    fn test_encode_fpe2_inverts_decode() {
        for b0 in 0..=255u8 {
            for b1 in (0..=255u8).step_by(4) {
                assert_eq!(encode_fpe2(decode_fpe2(b0, b1)), (b0, b1));
            }
        }
    }

    #[test]
    fn test_encode_fpe2_wraps_out_of_range() {
        assert_eq!(encode_fpe2(16384), (0, 0));
        assert_eq!(encode_fpe2(2000), (0x1F, 0x40));
    }

    #[test]
    fn test_decode_sp78() {
        assert_eq!(decode_sp78(0x32, 0x00), 50.0);
        assert_eq!(decode_sp78(0x32, 0xFF), 50.0);
        assert_eq!(decode_sp78(0x85, 0x00), -5.0);
        assert_eq!(decode_sp78(0x00, 0x80), 0.0);
    }
}
