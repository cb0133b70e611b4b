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

use std::io;

use anyhow::Context as _;
use clap::Parser;
use tracing::debug;

use smcctl::cli::{self, Cli, Commands, Context};
use smcctl::config::{config_path, load_config};
use smcctl::{transport, Smc};

fn init_logging() {
    let log_level = std::env::var("SMCCTL_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(&log_level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging();

    let command = args.command.clone().unwrap_or(Commands::All);

    // Writes go to the driver as root only; fail before opening it.
    // SAFETY: geteuid has no preconditions and cannot fail.
    if command.needs_root() && unsafe { libc::geteuid() } != 0 {
        eprintln!("Error: this command requires root privileges to write controller keys.");
        eprintln!(
            "Please run with: sudo {}",
            std::env::args().next().unwrap_or_else(|| "smcctl".to_string())
        );
        std::process::exit(1);
    }

    let config = load_config()
        .with_context(|| format!("loading config from {}", config_path().display()))?;
    let ctx = Context::from_config(&config, args.unit)?;
    debug!(unit = ?ctx.unit, sensors = ctx.sensors.len(), "configuration loaded");

    let mut smc = Smc::new(transport::open_default()?);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(err) = cli::run(&mut smc, &command, &ctx, &mut out) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }

    Ok(())
}
