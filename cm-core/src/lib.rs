//! chamber-module Core Library
//!
//! Configuration composition for a heated printer chamber and its cooling fan.
//!
//! # Features
//!
//! - **Settings Accessor**: typed, bound-checked lookups over a JSON snapshot
//! - **Builders**: one section in, a heater record and a fan record out
//! - **Registration**: heater first, then the controller fan, with duplicate
//!   object names rejected
//!
//! # Module Structure
//!
//! - `data/` - Configuration records and bound validation
//! - `builder/` - Heater and fan config builders
//! - `settings` - Settings snapshot and accessor
//! - `registry`, `subsystem`, `module` - Hand-off to the host
//!
//! # Example
//!
//! ```no_run
//! use cm_core::{load_all_chambers, DryRunFans, DryRunHeaters, ObjectRegistry, SettingsSnapshot};
//!
//! let snapshot = SettingsSnapshot::load(std::path::Path::new("printer.json")).unwrap();
//! let heaters = DryRunHeaters::new();
//! let chambers =
//!     load_all_chambers(&snapshot, &heaters, &DryRunFans::new(), ObjectRegistry::global()).unwrap();
//! ```

// Grouped modules
pub mod builder;
pub mod data;

// Standalone modules
pub mod constants;
pub mod error;
pub mod module;
pub mod registry;
pub mod settings;
pub mod subsystem;

// Re-export primary types from data/
pub use data::{check_bounds, Bounds, ChamberFanConfig, ChamberHeaterConfig, ControlMode};

// Re-export builders
pub use builder::{build_fan_config, build_heater_config, default_heater_name};

// Re-export error types
pub use error::{Bound, ChamberError, Result};

// Re-export registration
pub use module::{load_all_chambers, load_config_prefix, ChamberModule, RegisteredChamber};
pub use registry::{ObjectRegistry, SharedObject};
pub use settings::{SettingsSection, SettingsSnapshot};
pub use subsystem::{DryRunFans, DryRunHeaters, FanSubsystem, HeaterSubsystem, StagedFanController};
