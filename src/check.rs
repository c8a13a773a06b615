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

//! Snapshot checking and reporting

use std::path::Path;

use anyhow::Context;
use cm_core::constants::names;
use cm_core::{
    load_all_chambers, ChamberError, ChamberFanConfig, ChamberHeaterConfig, ChamberModule,
    DryRunFans, DryRunHeaters, ObjectRegistry, RegisteredChamber, SettingsSection,
    SettingsSnapshot,
};
use serde::Serialize;
use tracing::info;

use crate::cli::{Cli, Commands};

/// Resolved records of one chamber section
#[derive(Debug, Serialize)]
pub struct ChamberReport {
    pub section: String,
    pub heater: ChamberHeaterConfig,
    pub fan: ChamberFanConfig,
}

/// Outcome of a successful dry-run registration
#[derive(Debug)]
pub struct CheckSummary {
    pub chambers: Vec<RegisteredChamber>,
    pub registered_objects: Vec<String>,
}

/// Register every chamber section against dry-run subsystems and a fresh registry
pub fn check_snapshot(snapshot: &SettingsSnapshot) -> cm_core::Result<CheckSummary> {
    let registry = ObjectRegistry::new();
    let heaters = DryRunHeaters::new();
    let chambers = load_all_chambers(snapshot, &heaters, &DryRunFans::new(), &registry)?;
    Ok(CheckSummary {
        chambers,
        registered_objects: registry.names(),
    })
}

/// Build the records of every chamber section, or of `only`
pub fn resolve_chambers(
    snapshot: &SettingsSnapshot,
    only: Option<&str>,
) -> cm_core::Result<Vec<ChamberReport>> {
    let sections: Vec<&SettingsSection> = match only {
        Some(name) => {
            let section = snapshot.section(name)?;
            if section.prefix() != names::SECTION_PREFIX {
                return Err(ChamberError::config(format!(
                    "section '{}' is not a {} section",
                    section.name(),
                    names::SECTION_PREFIX
                )));
            }
            vec![section]
        }
        None => snapshot.sections_with_prefix(names::SECTION_PREFIX).collect(),
    };

    sections
        .into_iter()
        .map(|section| {
            let module = ChamberModule::from_section(section)?;
            section.check_unused()?;
            Ok(ChamberReport {
                section: module.section().to_string(),
                heater: module.heater_config().clone(),
                fan: module.fan_config().clone(),
            })
        })
        .collect()
}

fn load(file: &Path) -> anyhow::Result<SettingsSnapshot> {
    SettingsSnapshot::load(file)
        .with_context(|| format!("failed to load settings snapshot {}", file.display()))
}

/// Execute the parsed command line
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Check { file } => {
            let snapshot = load(file)?;
            let summary = check_snapshot(&snapshot)
                .with_context(|| format!("invalid chamber configuration in {}", file.display()))?;
            for chamber in &summary.chambers {
                println!(
                    "ok: {} (heater '{}', max_power {}, smooth_time {}s)",
                    chamber.section(),
                    chamber.heater_name(),
                    chamber.max_power(),
                    chamber.smooth_time()
                );
            }
            info!("Registered objects: {:?}", summary.registered_objects);
            if summary.chambers.is_empty() {
                println!("no {} sections in {}", names::SECTION_PREFIX, file.display());
            }
        }
        Commands::Show { file, section } => {
            let snapshot = load(file)?;
            let reports = resolve_chambers(&snapshot, section.as_deref())
                .with_context(|| format!("invalid chamber configuration in {}", file.display()))?;
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }
    Ok(())
}
