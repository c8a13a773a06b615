//! Chamber module registration
//!
//! A chamber section is built into a heater record and a fan record, then
//! registered in two fixed steps:
//!
//! 1. the heater record goes to the heater subsystem (`load_object` under
//!    `"heaters"`, then `setup_heater`);
//! 2. a controller fan is built from the fan record and added to the object
//!    registry as `"controller_fan"`.
//!
//! Step 2 only starts after step 1 returned. Nothing is rolled back if step 2
//! fails; the error aborts startup.

use tracing::{info, warn};

use crate::builder::{build_fan_config, build_heater_config};
use crate::constants::names;
use crate::data::{ChamberFanConfig, ChamberHeaterConfig};
use crate::error::Result;
use crate::registry::ObjectRegistry;
use crate::settings::{SettingsSection, SettingsSnapshot};
use crate::subsystem::{FanSubsystem, HeaterSubsystem};

/// Both records of one chamber section, built but not yet handed off
#[derive(Debug, Clone, PartialEq)]
pub struct ChamberModule {
    heater: ChamberHeaterConfig,
    fan: ChamberFanConfig,
}

impl ChamberModule {
    /// Build both records from one section
    ///
    /// Either record failing to build fails the whole module; there is no
    /// heater-only fallback.
    pub fn from_section(section: &SettingsSection) -> Result<Self> {
        let heater = build_heater_config(section)?;
        let fan = build_fan_config(section)?;
        Ok(Self { heater, fan })
    }

    pub fn section(&self) -> &str {
        &self.heater.section
    }

    pub fn heater_config(&self) -> &ChamberHeaterConfig {
        &self.heater
    }

    pub fn fan_config(&self) -> &ChamberFanConfig {
        &self.fan
    }

    pub fn max_power(&self) -> f64 {
        self.heater.max_power
    }

    pub fn smooth_time(&self) -> f64 {
        self.heater.smooth_time
    }

    /// Hand both records to their subsystems, heater first
    ///
    /// Consumes the module: after this call the records belong to the
    /// subsystems. The returned handle keeps only the two values the rest of
    /// the host reads.
    pub fn register(
        self,
        heaters: &dyn HeaterSubsystem,
        fans: &dyn FanSubsystem,
        registry: &ObjectRegistry,
    ) -> Result<RegisteredChamber> {
        let handle = RegisteredChamber {
            section: self.heater.section.clone(),
            heater_name: self.heater.heater_name.clone(),
            max_power: self.heater.max_power,
            smooth_time: self.heater.smooth_time,
        };

        heaters.load_object(names::HEATERS_OBJECT, &self.heater)?;
        heaters.setup_heater(self.heater)?;

        let registered = fans
            .create_controller(self.fan)
            .and_then(|controller| registry.add_object(names::CONTROLLER_FAN_OBJECT, controller));
        if let Err(e) = registered {
            warn!(
                "[{}] heater '{}' was already set up when fan registration failed: {}",
                handle.section, handle.heater_name, e
            );
            return Err(e);
        }

        info!(
            "[{}] chamber registered (heater '{}', max_power {}, smooth_time {}s)",
            handle.section, handle.heater_name, handle.max_power, handle.smooth_time
        );
        Ok(handle)
    }
}

/// A registered chamber, as seen by the rest of the host
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredChamber {
    section: String,
    heater_name: String,
    max_power: f64,
    smooth_time: f64,
}

impl RegisteredChamber {
    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn heater_name(&self) -> &str {
        &self.heater_name
    }

    /// Effective maximum heater power, fixed at construction
    pub fn max_power(&self) -> f64 {
        self.max_power
    }

    /// Effective temperature smoothing time, fixed at construction
    pub fn smooth_time(&self) -> f64 {
        self.smooth_time
    }
}

/// Build and register the chamber described by one section
pub fn load_config_prefix(
    section: &SettingsSection,
    heaters: &dyn HeaterSubsystem,
    fans: &dyn FanSubsystem,
    registry: &ObjectRegistry,
) -> Result<RegisteredChamber> {
    ChamberModule::from_section(section)?.register(heaters, fans, registry)
}

/// Build, check and register every `chamber_module` section in file order
///
/// Each section must pass `check_unused` before it is registered. The first
/// error stops the walk.
pub fn load_all_chambers(
    snapshot: &SettingsSnapshot,
    heaters: &dyn HeaterSubsystem,
    fans: &dyn FanSubsystem,
    registry: &ObjectRegistry,
) -> Result<Vec<RegisteredChamber>> {
    let mut chambers = Vec::new();
    for section in snapshot.sections_with_prefix(names::SECTION_PREFIX) {
        let module = ChamberModule::from_section(section)?;
        section.check_unused()?;
        chambers.push(module.register(heaters, fans, registry)?);
    }
    if chambers.is_empty() {
        warn!("No '{}' sections found", names::SECTION_PREFIX);
    }
    Ok(chambers)
}
