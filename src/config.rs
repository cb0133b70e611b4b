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

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use smc_error::{Result, SmcError};
use smc_protocol::FourCharCode;

use crate::sensors::SensorTable;
use crate::temperature::TemperatureUnit;

const MAX_SENSOR_NAME_LEN: usize = 64;
const MAX_SENSOR_NAMES: usize = 1024;

fn default_fan_speed_check() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmcConfig {
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,
    /// Refuse minimum-speed writes outside 1..=max.
    #[serde(default = "default_fan_speed_check")]
    pub fan_speed_check: bool,
    /// Extra or renamed sensors: four-character key to display name.
    #[serde(default)]
    pub sensor_names: HashMap<String, String>,
}

impl Default for SmcConfig {
    fn default() -> Self {
        Self {
            temperature_unit: TemperatureUnit::default(),
            fan_speed_check: default_fan_speed_check(),
            sensor_names: HashMap::new(),
        }
    }
}

impl SmcConfig {
    /// Built-in sensor names with this config's overrides applied.
    pub fn sensor_table(&self) -> Result<SensorTable> {
        SensorTable::with_overrides(&self.sensor_names)
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = env::var("SMCCTL_CONFIG") {
        return PathBuf::from(path);
    }
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("smcctl").join("config.json");
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("smcctl")
            .join("config.json");
    }
    PathBuf::from("/etc/smcctl/config.json")
}

/// Load from [`config_path`]. A missing file gives the defaults.
pub fn load_config() -> Result<SmcConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<SmcConfig> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SmcConfig::default()),
        Err(e) => return Err(e.into()),
    };
    let cfg: SmcConfig = serde_json::from_str(&data)?;
    validate_config(&cfg)?;
    Ok(cfg)
}

fn is_safe_name(s: &str) -> bool {
    !s.trim().is_empty()
        && s.chars().count() <= MAX_SENSOR_NAME_LEN
        && !s.chars().any(char::is_control)
}

pub fn validate_config(cfg: &SmcConfig) -> Result<()> {
    if cfg.sensor_names.len() > MAX_SENSOR_NAMES {
        return Err(SmcError::invalid_config(
            "sensor_names",
            format!("too many entries (max {})", MAX_SENSOR_NAMES),
        ));
    }
    for (key, name) in &cfg.sensor_names {
        let field = format!("sensor_names.{}", key);
        let code = FourCharCode::parse(key)
            .map_err(|e| SmcError::invalid_config(&field, e.to_string()))?;
        if !code.to_bytes().is_ascii() {
            return Err(SmcError::invalid_config(&field, "key must be ASCII"));
        }
        if !is_safe_name(name) {
            return Err(SmcError::invalid_config(
                &field,
                format!("name must be 1-{} printable characters", MAX_SENSOR_NAME_LEN),
            ));
        }
    }
    Ok(())
}
