//! Heater and fan subsystem seams
//!
//! The control loop and the fan driver live behind these traits. This layer
//! only hands them finished records.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

use crate::data::{ChamberFanConfig, ChamberHeaterConfig};
use crate::error::Result;
use crate::registry::SharedObject;

/// Consumer of heater records
#[cfg_attr(test, mockall::automock)]
pub trait HeaterSubsystem {
    /// Load the heater configuration object under `key` (normally `"heaters"`)
    fn load_object(&self, key: &str, config: &ChamberHeaterConfig) -> Result<()>;

    /// Build the heater's control loop; takes ownership of the record
    fn setup_heater(&self, config: ChamberHeaterConfig) -> Result<()>;
}

/// Consumer of fan records
#[cfg_attr(test, mockall::automock)]
pub trait FanSubsystem {
    /// Build a controller fan object from the record
    fn create_controller(&self, config: ChamberFanConfig) -> Result<SharedObject>;
}

/// Heater subsystem that accepts every record and keeps it for inspection
#[derive(Debug, Default)]
pub struct DryRunHeaters {
    loaded: Mutex<Vec<String>>,
    heaters: Mutex<Vec<ChamberHeaterConfig>>,
}

impl DryRunHeaters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sections passed to `load_object`, in call order
    pub fn loaded_sections(&self) -> Vec<String> {
        self.loaded.lock().clone()
    }

    /// Records passed to `setup_heater`, in call order
    pub fn heaters(&self) -> Vec<ChamberHeaterConfig> {
        self.heaters.lock().clone()
    }
}

impl HeaterSubsystem for DryRunHeaters {
    fn load_object(&self, key: &str, config: &ChamberHeaterConfig) -> Result<()> {
        info!("[dry-run] load '{}' for section '{}'", key, config.section);
        self.loaded.lock().push(config.section.clone());
        Ok(())
    }

    fn setup_heater(&self, config: ChamberHeaterConfig) -> Result<()> {
        info!("[dry-run] setup heater '{}'", config.heater_name);
        self.heaters.lock().push(config);
        Ok(())
    }
}

/// Fan controller produced by `DryRunFans`; holds the record it was built from
#[derive(Debug, Clone, PartialEq)]
pub struct StagedFanController {
    pub config: ChamberFanConfig,
}

/// Fan subsystem that wraps each record in a `StagedFanController`
#[derive(Debug, Default)]
pub struct DryRunFans;

impl DryRunFans {
    pub fn new() -> Self {
        Self
    }
}

impl FanSubsystem for DryRunFans {
    fn create_controller(&self, config: ChamberFanConfig) -> Result<SharedObject> {
        info!(
            "[dry-run] controller fan on {} following heater '{}'",
            config.fan_pin, config.heater_reference
        );
        Ok(Arc::new(StagedFanController { config }))
    }
}
