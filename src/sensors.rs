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

//! Temperature sensor name table
//!
//! Static data mapping sensor keys to readable names. The built-in entries
//! cover the commonly documented sensors; the config file can add to or
//! rename them.

use std::collections::{BTreeMap, HashMap};

use lazy_static::lazy_static;

use smc_error::{Result, SmcError};
use smc_protocol::FourCharCode;

const BUILTIN: &[(&[u8; 4], &str)] = &[
    (b"TA0P", "Ambient Air 0"),
    (b"TA1P", "Ambient Air 1"),
    (b"TB0T", "Enclosure Base 0"),
    (b"TB1T", "Enclosure Base 1"),
    (b"TB2T", "Enclosure Base 2"),
    (b"TB3T", "Enclosure Base 3"),
    (b"TC0D", "CPU 0 Diode"),
    (b"TC0E", "CPU 0 Die (virtual)"),
    (b"TC0F", "CPU 0 Die Filtered"),
    (b"TC0H", "CPU 0 Heatsink"),
    (b"TC0P", "CPU 0 Proximity"),
    (b"TCGC", "PECI GPU"),
    (b"TCSA", "PECI SA"),
    (b"TCXC", "PECI CPU"),
    (b"TG0D", "GPU 0 Diode"),
    (b"TG0H", "GPU 0 Heatsink"),
    (b"TG0P", "GPU 0 Proximity"),
    (b"TH0P", "HDD Proximity"),
    (b"TI0P", "Thunderbolt 0"),
    (b"TI1P", "Thunderbolt 1"),
    (b"TL0P", "LCD Proximity"),
    (b"TM0P", "Memory Slots Proximity"),
    (b"TM0S", "Memory Slot 0"),
    (b"TN0D", "Northbridge Diode"),
    (b"TN0H", "Northbridge Heatsink"),
    (b"TN0P", "Northbridge Proximity"),
    (b"TPCD", "Platform Controller Hub Die"),
    (b"Th1H", "Heatpipe 1"),
    (b"Ts0P", "Palm Rest"),
    (b"TW0P", "Wireless Module"),
];

lazy_static! {
    static ref BUILTIN_TABLE: BTreeMap<FourCharCode, String> = BUILTIN
        .iter()
        .map(|(code, name)| (FourCharCode::from_bytes(**code), name.to_string()))
        .collect();
}

/// Sensor key to display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorTable {
    names: BTreeMap<FourCharCode, String>,
}

impl SensorTable {
    pub fn builtin() -> Self {
        Self {
            names: BUILTIN_TABLE.clone(),
        }
    }

    pub fn empty() -> Self {
        Self {
            names: BTreeMap::new(),
        }
    }

    /// Built-in table with `overrides` (key string to name) applied on top.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Result<Self> {
        let mut table = Self::builtin();
        for (key, name) in overrides {
            let code = FourCharCode::parse(key).map_err(|e| {
                SmcError::invalid_config(format!("sensor_names.{}", key), e.to_string())
            })?;
            table.insert(code, name.clone());
        }
        Ok(table)
    }

    pub fn insert(&mut self, code: FourCharCode, name: impl Into<String>) {
        self.names.insert(code, name.into());
    }

    pub fn name_of(&self, code: FourCharCode) -> Option<&str> {
        self.names.get(&code).map(String::as_str)
    }

    pub fn contains(&self, code: FourCharCode) -> bool {
        self.names.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (FourCharCode, &str)> {
        self.names.iter().map(|(code, name)| (*code, name.as_str()))
    }
}

impl Default for SensorTable {
    fn default() -> Self {
        Self::builtin()
    }
}
