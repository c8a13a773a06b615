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

//! Command Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chamber-check")]
#[command(version)]
#[command(about = "Validate heated chamber settings before the printer host starts")]
#[command(long_about = "Validate heated chamber settings before the printer host starts

Every `chamber_module` section of the snapshot is built into a heater record
and a controller fan record, then registered against dry-run subsystems. The
first configuration error is reported and the exit code is non-zero.

EXAMPLES:
    chamber-check check printer.json
    chamber-check show printer.json
    chamber-check show printer.json --section \"chamber_module heated_bay\"

ENVIRONMENT VARIABLES:
    CHAMBER_LOG=debug      Log filter (overridden by --log)")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log filter, e.g. `info` or `cm_core=debug`
    #[arg(long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and register every chamber section, report success or the first error
    Check {
        /// Settings snapshot (JSON)
        file: PathBuf,
    },

    /// Print the resolved heater and fan records as JSON
    Show {
        /// Settings snapshot (JSON)
        file: PathBuf,

        /// Only this section (full name, e.g. "chamber_module heated_bay")
        #[arg(long)]
        section: Option<String>,
    },
}
