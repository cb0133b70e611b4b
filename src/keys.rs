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

//! Well-known controller keys
//!
//! Hardware-documented keys the derived accessors read by name. Per-fan keys
//! are built from templates of the form `F{id}xx`, so only fans 0-9 are
//! addressable.

use smc_error::Result;
use smc_protocol::{DataType, FourCharCode, Key};

/// Total number of keys the controller exposes.
pub const KEY_COUNT: Key = Key::new(FourCharCode::from_bytes(*b"#KEY"), DataType::UI32);

/// Number of fans.
pub const FAN_COUNT: Key = Key::new(FourCharCode::from_bytes(*b"FNum"), DataType::UI8);

/// Number of batteries.
pub const BATTERY_COUNT: Key = Key::new(FourCharCode::from_bytes(*b"BNum"), DataType::UI8);

/// Set while running from battery.
pub const BATTERY_POWERED: Key = Key::new(FourCharCode::from_bytes(*b"BATP"), DataType::FLAG);

/// Battery status bits: 0 charging, 1 AC present, 6 battery OK.
pub const BATTERY_INFO: Key = Key::new(FourCharCode::from_bytes(*b"BSIn"), DataType::UI8);

/// Set while a disc is in the optical drive.
pub const ODD_FULL: Key = Key::new(FourCharCode::from_bytes(*b"MSDI"), DataType::FLAG);

pub mod battery_bits {
    pub const CHARGING: u8 = 0;
    pub const AC_PRESENT: u8 = 1;
    pub const BATTERY_OK: u8 = 6;
}

fn fan_key(id: u32, suffix: &str, info: DataType) -> Result<Key> {
    let code = FourCharCode::parse(&format!("F{}{}", id, suffix))?;
    Ok(Key::new(code, info))
}

/// Fan descriptor, `F{id}ID`.
pub fn fan_descriptor(id: u32) -> Result<Key> {
    fan_key(id, "ID", DataType::FDS)
}

/// Measured speed, `F{id}Ac`.
pub fn fan_actual_speed(id: u32) -> Result<Key> {
    fan_key(id, "Ac", DataType::FPE2)
}

/// Minimum speed, `F{id}Mn`. Writable.
pub fn fan_min_speed(id: u32) -> Result<Key> {
    fan_key(id, "Mn", DataType::FPE2)
}

/// Maximum speed, `F{id}Mx`.
pub fn fan_max_speed(id: u32) -> Result<Key> {
    fan_key(id, "Mx", DataType::FPE2)
}
