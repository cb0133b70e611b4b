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

//! Fan accessors
//!
//! Fans are numbered from 0. Speeds are RPM, stored as `fpe2`.

use serde::Serialize;
use tracing::{debug, warn};

use smc_error::{Result, SmcError};
use smc_protocol::{decode_fpe2, encode_fpe2, SmcBytes, SMC_BYTES_LEN};

use crate::keys;
use crate::smc::Smc;
use crate::transport::SmcTransport;

/// Byte range of the name inside a `{fds` descriptor.
const DESCRIPTOR_NAME: std::ops::Range<usize> = 4..16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fan {
    pub id: u32,
    pub name: String,
    pub min_speed: u32,
    pub max_speed: u32,
}

/// Name stored in a fan descriptor payload, one character per byte, trimmed.
pub fn fan_name_from_descriptor(bytes: &SmcBytes) -> String {
    let name: String = bytes[DESCRIPTOR_NAME].iter().map(|&b| char::from(b)).collect();
    name.trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}

impl<T: SmcTransport> Smc<T> {
    pub fn fan_count(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(&keys::FAN_COUNT)?;
        Ok(u32::from(bytes[0]))
    }

    pub fn fan_name(&mut self, id: u32) -> Result<String> {
        let bytes = self.read_bytes(&keys::fan_descriptor(id)?)?;
        Ok(fan_name_from_descriptor(&bytes))
    }

    pub fn fan_current_speed(&mut self, id: u32) -> Result<u32> {
        let bytes = self.read_bytes(&keys::fan_actual_speed(id)?)?;
        Ok(decode_fpe2(bytes[0], bytes[1]))
    }

    pub fn fan_min_speed(&mut self, id: u32) -> Result<u32> {
        let bytes = self.read_bytes(&keys::fan_min_speed(id)?)?;
        Ok(decode_fpe2(bytes[0], bytes[1]))
    }

    pub fn fan_max_speed(&mut self, id: u32) -> Result<u32> {
        let bytes = self.read_bytes(&keys::fan_max_speed(id)?)?;
        Ok(decode_fpe2(bytes[0], bytes[1]))
    }

    pub fn fan(&mut self, id: u32) -> Result<Fan> {
        Ok(Fan {
            id,
            name: self.fan_name(id)?,
            min_speed: self.fan_min_speed(id)?,
            max_speed: self.fan_max_speed(id)?,
        })
    }

    pub fn all_fans(&mut self) -> Result<Vec<Fan>> {
        let count = self.fan_count()?;
        (0..count).map(|id| self.fan(id)).collect()
    }

    /// Set the fan's minimum speed.
    ///
    /// The fan's maximum is read first. With `checked`, a speed of 0 or one
    /// above the maximum is refused. Without it the value is written as is,
    /// and speeds above 16383 wrap when encoded.
    pub fn set_fan_min_speed(&mut self, id: u32, speed: u32, checked: bool) -> Result<()> {
        let key = keys::fan_min_speed(id)?;
        let max = self.fan_max_speed(id)?;

        if checked {
            if speed == 0 || speed > max {
                return Err(SmcError::FanSpeedOutOfRange {
                    fan: id,
                    requested: speed,
                    max,
                });
            }
        } else {
            warn!(fan = id, speed, max, "writing fan minimum without bound check");
        }

        let (b0, b1) = encode_fpe2(speed);
        let mut data = [0u8; SMC_BYTES_LEN];
        data[0] = b0;
        data[1] = b1;

        debug!(fan = id, speed, "setting fan minimum speed");
        self.write_bytes(&key, &data)
    }
}
