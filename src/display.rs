/*
 * This file is part of smcctl.
 *
 * Copyright (C) 2025 smcctl contributors
 *
 * smcctl is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * smcctl is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with smcctl. If not, see <https://www.gnu.org/licenses/>.
 */

//! Display Formatting Helpers
//!
//! Text formatting for the command line tool: temperatures in the chosen
//! unit, fan speeds, flags, and raw key payloads.

use smc_protocol::{assemble_u32, bool_from_byte, decode_fpe2, decode_sp78, DataType};

use crate::temperature::TemperatureUnit;

/// Temperature already converted to `unit`, one decimal place.
pub fn format_temp(value: f64, unit: TemperatureUnit) -> String {
    format!("{:.1}{}", value, unit.suffix())
}

pub fn format_rpm(rpm: u32) -> String {
    format!("{} RPM", rpm)
}

pub fn format_flag(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

/// Space separated hex bytes.
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode a payload for display according to its declared type, with
/// temperatures in `unit`. Types without a decoder fall back to hex.
pub fn format_value(info: DataType, bytes: &[u8], unit: TemperatureUnit) -> String {
    let byte = |i: usize| bytes.get(i).copied().unwrap_or(0);
    if info == DataType::SP78 {
        format_temp(unit.convert(decode_sp78(byte(0), byte(1))), unit)
    } else if info == DataType::FPE2 {
        decode_fpe2(byte(0), byte(1)).to_string()
    } else if info == DataType::FLAG {
        format_flag(bool_from_byte(byte(0)))
    } else if info == DataType::UI8 {
        byte(0).to_string()
    } else if info == DataType::UI32 {
        assemble_u32(byte(0), byte(1), byte(2), byte(3)).to_string()
    } else {
        format_hex(bytes)
    }
}
