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

//! chamber-module - heated chamber configuration checker
//!
//! Loads a settings snapshot, builds the heater and fan records of every
//! `chamber_module` section and runs the registration sequence against
//! dry-run subsystems, so configuration errors surface before the host starts.

pub mod check;
pub mod cli;
pub mod logger;
