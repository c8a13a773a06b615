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

use std::process::ExitCode;

use chamber_module::{check, cli::Cli, logger};
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logging(cli.log.as_deref());

    match check::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
