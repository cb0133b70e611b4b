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

//! smcctl - System Management Controller client
//!
//! This library talks to the controller through its kernel driver's
//! structured-method call. Every operation is a composition of single round
//! trips of an 80-byte parameter record:
//!
//! - `transport` - the call primitive seam (IOKit on macOS, fakes in tests)
//! - `smc` - dispatch and key-space operations (read, write, enumerate)
//! - `temperature`, `fan`, `power` - derived accessors
//! - `keys`, `sensors` - well-known keys and the sensor name table
//! - `config`, `display`, `cli` - the command line tool's support code

pub mod cli;
pub mod config;
pub mod display;
pub mod fan;
pub mod keys;
pub mod power;
pub mod sensors;
pub mod smc;
pub mod temperature;
pub mod transport;

#[cfg(target_os = "macos")]
pub mod iokit;

#[cfg(test)]
pub mod test_utils;

pub use fan::Fan;
pub use power::BatteryInfo;
pub use sensors::SensorTable;
pub use smc::{AllKeys, Smc};
pub use temperature::{TemperatureSensor, TemperatureUnit};
pub use transport::SmcTransport;

pub use smc_error::{Result, SmcError};
pub use smc_protocol::{DataType, FourCharCode, Key, ParamStruct, Selector, SmcBytes};
