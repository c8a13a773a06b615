/*
 * This file is part of chamber-module.
 *
 * Copyright (C) 2025 chamber-module contributors
 *
 * chamber-module is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * chamber-module is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with chamber-module. If not, see <https://www.gnu.org/licenses/>.
 */

//! Logging setup for the command line tool

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `CHAMBER_LOG=debug`
pub const LOG_ENV: &str = "CHAMBER_LOG";

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Resolve the filter: explicit flag first, then `CHAMBER_LOG`, then the default
pub fn resolve_filter(flag: Option<&str>) -> String {
    flag.map(str::to_string)
        .or_else(|| std::env::var(LOG_ENV).ok())
        .filter(|level| !level.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Install the global tracing subscriber, writing to stderr so stdout stays
/// clean for JSON output
pub fn init_logging(flag: Option<&str>) {
    let filter = resolve_filter(flag);
    let env_filter = EnvFilter::try_new(&filter).unwrap_or_else(|e| {
        eprintln!("Invalid log filter '{}': {}, using '{}'", filter, e, DEFAULT_LOG_LEVEL);
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    });

    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .try_init();
}
