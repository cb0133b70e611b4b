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

//! Command Line Interface
//!
//! Argument definitions and the command runner for the `smcctl` binary.
//! Commands write to any `io::Write` so they can run against a fake
//! controller in tests.

use std::io::Write;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use smc_error::SmcError;
use smc_protocol::{FourCharCode, Key};

use crate::config::SmcConfig;
use crate::display::{format_flag, format_hex, format_rpm, format_temp, format_value};
use crate::sensors::SensorTable;
use crate::smc::Smc;
use crate::temperature::TemperatureUnit;
use crate::transport::SmcTransport;

#[derive(Parser, Debug)]
#[command(name = "smcctl")]
#[command(version)]
#[command(about = "smcctl - System Management Controller sensors and fans")]
#[command(long_about = "smcctl - System Management Controller sensors and fans

Reads temperatures, fan speeds and power state through the controller's
kernel driver, and can raise a fan's minimum speed.

EXAMPLES:
    smcctl                          Show temperatures, fans, battery and misc
    smcctl temps --unknown          List unnamed temperature sensors
    smcctl fans                     List fans with their speed range
    sudo smcctl set-fan-min 0 2500  Raise fan 0's minimum to 2500 RPM
    smcctl keys --json              Dump every key and its type as JSON
    smcctl read TC0P                Read and decode one key

ENVIRONMENT VARIABLES:
    SMCCTL_LOG=debug       Log every driver round trip
    SMCCTL_CONFIG=path     Use a different config file

FILES:
    ~/.config/smcctl/config.json    Temperature unit, sensor names")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Temperature unit, overriding the config file
    #[arg(long, short, value_enum, global = true)]
    pub unit: Option<UnitArg>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show temperatures, fans, battery and misc (default)
    All,
    /// List temperature sensors
    Temps {
        /// List sensors missing from the name table instead
        #[arg(long)]
        unknown: bool,
    },
    /// List fans with current, minimum and maximum speed
    Fans,
    /// Set a fan's minimum speed (requires root)
    SetFanMin {
        /// Fan number, starting at 0
        id: u32,
        /// Minimum speed in RPM
        rpm: u32,
        /// Skip the check against the fan's maximum speed
        #[arg(long)]
        unchecked: bool,
    },
    /// Show battery state
    Battery,
    /// Show optical drive state
    Misc,
    /// List every key with its data type
    Keys {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Read and decode one key
    Read { key: String },
    /// Check whether a key exists
    Exists { key: String },
    /// Print the number of keys
    Count,
}

impl Commands {
    pub fn needs_root(&self) -> bool {
        matches!(self, Commands::SetFanMin { .. })
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitArg {
    C,
    F,
    K,
}

impl From<UnitArg> for TemperatureUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::C => TemperatureUnit::Celsius,
            UnitArg::F => TemperatureUnit::Fahrenheit,
            UnitArg::K => TemperatureUnit::Kelvin,
        }
    }
}

/// Settings a command runs with, resolved from config and arguments.
#[derive(Debug, Clone)]
pub struct Context {
    pub unit: TemperatureUnit,
    pub fan_speed_check: bool,
    pub sensors: SensorTable,
}

impl Context {
    pub fn from_config(config: &SmcConfig, unit: Option<UnitArg>) -> anyhow::Result<Self> {
        Ok(Self {
            unit: unit.map(Into::into).unwrap_or(config.temperature_unit),
            fan_speed_check: config.fan_speed_check,
            sensors: config.sensor_table()?,
        })
    }
}

fn parse_key(s: &str) -> anyhow::Result<FourCharCode> {
    FourCharCode::parse(s).with_context(|| format!("invalid key {:?}", s))
}

pub fn run<T: SmcTransport, W: Write>(
    smc: &mut Smc<T>,
    command: &Commands,
    ctx: &Context,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Commands::All => {
            for section in [Section::Temps, Section::Fans, Section::Battery, Section::Misc] {
                match section.print(smc, ctx, out) {
                    Err(SmcError::KeyNotFound(_)) => writeln!(out, "  (not available)")?,
                    other => other?,
                }
                writeln!(out)?;
            }
        }
        Commands::Temps { unknown: false } => Section::Temps.print(smc, ctx, out)?,
        Commands::Temps { unknown: true } => print_unknown_temps(smc, ctx, out)?,
        Commands::Fans => Section::Fans.print(smc, ctx, out)?,
        Commands::Battery => Section::Battery.print(smc, ctx, out)?,
        Commands::Misc => Section::Misc.print(smc, ctx, out)?,
        Commands::SetFanMin { id, rpm, unchecked } => {
            let checked = ctx.fan_speed_check && !unchecked;
            smc.set_fan_min_speed(*id, *rpm, checked)
                .with_context(|| format!("setting fan {} minimum speed", id))?;
            writeln!(out, "Fan {} minimum speed set to {}", id, format_rpm(*rpm))?;
        }
        Commands::Keys { json } => {
            let keys: Vec<Key> = smc.all_keys()?.collect::<smc_error::Result<_>>()?;
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&keys)?)?;
            } else {
                for key in keys {
                    writeln!(out, "{}  {}  {}", key.code, key.info.code, key.info.size)?;
                }
            }
        }
        Commands::Read { key } => {
            let code = parse_key(key)?;
            let (key, bytes) = smc.read_key_value(code)?;
            writeln!(
                out,
                "{}  [{}]  {}  ({})",
                key.code,
                key.info,
                format_value(key.info, &bytes, ctx.unit),
                format_hex(&bytes)
            )?;
        }
        Commands::Exists { key } => {
            let code = parse_key(key)?;
            writeln!(out, "{}: {}", code, format_flag(smc.key_exists(code)?))?;
        }
        Commands::Count => writeln!(out, "{}", smc.key_count()?)?,
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Section {
    Temps,
    Fans,
    Battery,
    Misc,
}

impl Section {
    fn print<T: SmcTransport, W: Write>(
        self,
        smc: &mut Smc<T>,
        ctx: &Context,
        out: &mut W,
    ) -> smc_error::Result<()> {
        match self {
            Section::Temps => {
                writeln!(out, "-- Temperature --")?;
                for sensor in smc.known_temperature_sensors(&ctx.sensors)? {
                    let value = smc.temperature(sensor.code, ctx.unit)?;
                    writeln!(out, "  {:<36} {}", sensor.to_string(), format_temp(value, ctx.unit))?;
                }
            }
            Section::Fans => {
                writeln!(out, "-- Fans --")?;
                for fan in smc.all_fans()? {
                    let current = smc.fan_current_speed(fan.id)?;
                    writeln!(out, "  [{}] {}", fan.id, fan.name)?;
                    writeln!(out, "      Current: {}", format_rpm(current))?;
                    writeln!(out, "      Min:     {}", format_rpm(fan.min_speed))?;
                    writeln!(out, "      Max:     {}", format_rpm(fan.max_speed))?;
                }
            }
            Section::Battery => {
                writeln!(out, "-- Battery --")?;
                let info = smc.battery_info()?;
                writeln!(out, "  Batteries:       {}", info.battery_count)?;
                writeln!(out, "  Battery powered: {}", format_flag(info.is_battery_powered))?;
                writeln!(out, "  Charging:        {}", format_flag(info.is_charging))?;
                writeln!(out, "  AC present:      {}", format_flag(info.is_ac_present))?;
                writeln!(out, "  Battery OK:      {}", format_flag(info.is_battery_ok))?;
            }
            Section::Misc => {
                writeln!(out, "-- Misc --")?;
                let full = smc.is_optical_disk_drive_full()?;
                writeln!(out, "  Disc in ODD:     {}", format_flag(full))?;
            }
        }
        Ok(())
    }
}

fn print_unknown_temps<T: SmcTransport, W: Write>(
    smc: &mut Smc<T>,
    ctx: &Context,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "-- Unknown Temperature Sensors --")?;
    let sensors: Vec<_> = smc
        .unknown_temperature_sensors(&ctx.sensors)?
        .collect::<smc_error::Result<_>>()?;
    for sensor in sensors {
        let value = smc.temperature(sensor.code, ctx.unit)?;
        writeln!(out, "  {}  {}", sensor.code, format_temp(value, ctx.unit))?;
    }
    Ok(())
}
