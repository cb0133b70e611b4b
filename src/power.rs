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

//! Battery and miscellaneous power-state accessors

use serde::Serialize;

use smc_error::Result;
use smc_protocol::bool_from_byte;

use crate::keys::{self, battery_bits};
use crate::smc::Smc;
use crate::transport::SmcTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatteryInfo {
    pub battery_count: u32,
    /// Power-source flag: set while running from battery.
    pub is_battery_powered: bool,
    pub is_charging: bool,
    pub is_ac_present: bool,
    pub is_battery_ok: bool,
}

impl BatteryInfo {
    /// Assemble from the three raw key bytes.
    pub fn decode(count: u8, battery_powered: u8, status: u8) -> Self {
        Self {
            battery_count: u32::from(count),
            is_battery_powered: bool_from_byte(battery_powered),
            is_charging: bit(status, battery_bits::CHARGING),
            is_ac_present: bit(status, battery_bits::AC_PRESENT),
            is_battery_ok: bit(status, battery_bits::BATTERY_OK),
        }
    }
}

fn bit(byte: u8, n: u8) -> bool {
    (byte >> n) & 1 == 1
}

impl<T: SmcTransport> Smc<T> {
    pub fn battery_info(&mut self) -> Result<BatteryInfo> {
        let count = self.read_bytes(&keys::BATTERY_COUNT)?[0];
        let powered = self.read_bytes(&keys::BATTERY_POWERED)?[0];
        let status = self.read_bytes(&keys::BATTERY_INFO)?[0];
        Ok(BatteryInfo::decode(count, powered, status))
    }

    pub fn is_optical_disk_drive_full(&mut self) -> Result<bool> {
        let bytes = self.read_bytes(&keys::ODD_FULL)?;
        Ok(bool_from_byte(bytes[0]))
    }
}
