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

//! Temperature accessors

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use smc_error::Result;
use smc_protocol::{decode_sp78, DataType, FourCharCode, Key};

use crate::sensors::SensorTable;
use crate::smc::Smc;
use crate::transport::SmcTransport;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    /// Convert a Celsius reading into this unit.
    pub fn convert(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 1.8 + 32.0,
            Self::Kelvin => celsius + 273.15,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
            Self::Kelvin => "K",
        }
    }
}

/// A temperature sensor key and its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemperatureSensor {
    pub name: String,
    pub code: FourCharCode,
}

impl fmt::Display for TemperatureSensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

impl<T: SmcTransport> Smc<T> {
    /// Read `code` as an `sp78` sensor and convert to `unit`.
    pub fn temperature(&mut self, code: FourCharCode, unit: TemperatureUnit) -> Result<f64> {
        let bytes = self.read_bytes(&Key::new(code, DataType::SP78))?;
        Ok(unit.convert(decode_sp78(bytes[0], bytes[1])))
    }

    /// Table entries whose key this controller has.
    pub fn known_temperature_sensors(
        &mut self,
        table: &SensorTable,
    ) -> Result<Vec<TemperatureSensor>> {
        let mut found = Vec::new();
        for (code, name) in table.iter() {
            if self.key_exists(code)? {
                found.push(TemperatureSensor {
                    name: name.to_string(),
                    code,
                });
            }
        }
        debug!(count = found.len(), "known temperature sensors present");
        Ok(found)
    }

    /// `sp78` keys starting with `T` that `table` does not name.
    ///
    /// Walks [`Smc::all_keys`] lazily; lookup failures are yielded as errors.
    pub fn unknown_temperature_sensors<'a>(
        &'a mut self,
        table: &'a SensorTable,
    ) -> Result<impl Iterator<Item = Result<TemperatureSensor>> + 'a> {
        let keys = self.all_keys()?;
        Ok(keys.filter_map(move |key| match key {
            Ok(key) if is_unknown_sensor(&key, table) => Some(Ok(TemperatureSensor {
                name: key.code.to_string(),
                code: key.code,
            })),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        }))
    }
}

fn is_unknown_sensor(key: &Key, table: &SensorTable) -> bool {
    key.code.starts_with(b'T') && key.info == DataType::SP78 && !table.contains(key.code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeController;
    use smc_error::SmcError;

    fn code(s: &[u8; 4]) -> FourCharCode {
        FourCharCode::from_bytes(*s)
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(TemperatureUnit::Celsius.convert(50.0), 50.0);
        assert_eq!(TemperatureUnit::Fahrenheit.convert(50.0), 122.0);
        assert_eq!(TemperatureUnit::Fahrenheit.convert(-40.0), -40.0);
        assert!((TemperatureUnit::Kelvin.convert(50.0) - 323.15).abs() < 1e-9);
    }

    #[test]
    fn test_unit_serde() {
        assert_eq!(serde_json::to_string(&TemperatureUnit::Kelvin).unwrap(), "\"kelvin\"");
        assert_eq!(
            serde_json::from_str::<TemperatureUnit>("\"fahrenheit\"").unwrap(),
            TemperatureUnit::Fahrenheit
        );
        assert_eq!(TemperatureUnit::default(), TemperatureUnit::Celsius);
    }

    #[test]
    fn test_temperature_reads_sp78() {
        let fake = FakeController::new().with_key("TC0P", DataType::SP78, &[0x32, 0x00]);
        let mut smc = Smc::new(fake);
        assert_eq!(smc.temperature(code(b"TC0P"), TemperatureUnit::Celsius).unwrap(), 50.0);
        assert_eq!(smc.temperature(code(b"TC0P"), TemperatureUnit::Fahrenheit).unwrap(), 122.0);
    }

    #[test]
    fn test_temperature_missing_key() {
        let mut smc = Smc::new(FakeController::new());
        assert!(matches!(
            smc.temperature(code(b"TC0P"), TemperatureUnit::Celsius),
            Err(SmcError::KeyNotFound(_))
        ));
    }

    #[test]
    fn test_known_sensors_filters_by_presence() {
        let fake = FakeController::new()
            .with_key("TC0P", DataType::SP78, &[0x32, 0])
            .with_key("TB0T", DataType::SP78, &[0x20, 0]);
        let mut smc = Smc::new(fake);

        let found = smc.known_temperature_sensors(&SensorTable::builtin()).unwrap();
        let codes: Vec<String> = found.iter().map(|s| s.code.to_string()).collect();
        assert_eq!(codes, vec!["TB0T", "TC0P"]);
        assert_eq!(found[1].name, "CPU 0 Proximity");
    }

    #[test]
    fn test_unknown_sensors() {
        let fake = FakeController::new()
            .with_key("TC0P", DataType::SP78, &[0x32, 0])
            .with_key("TZ1X", DataType::SP78, &[0x28, 0])
            .with_key("TZ2X", DataType::FPE2, &[0x28, 0])
            .with_key("FZ1X", DataType::SP78, &[0x28, 0])
            .with_key("TZ3X", DataType::new(code(b"sp78"), 4), &[0x28, 0]);
        let mut smc = Smc::new(fake);
        let table = SensorTable::builtin();

        let unknown: Vec<TemperatureSensor> = smc
            .unknown_temperature_sensors(&table)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].code, code(b"TZ1X"));
        assert_eq!(unknown[0].name, "TZ1X");
    }

    #[test]
    fn test_sensor_display() {
        let sensor = TemperatureSensor {
            name: "CPU 0 Proximity".into(),
            code: code(b"TC0P"),
        };
        assert_eq!(sensor.to_string(), "CPU 0 Proximity (TC0P)");
    }
}
