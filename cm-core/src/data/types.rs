//! Configuration records produced by the builders
//!
//! Both records are plain data. Once handed to their subsystem they are
//! moved, never shared, so nothing on this side can mutate them later.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heater control algorithm tag
///
/// The set is open: tags the heater subsystem knows but this layer does not
/// are carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ControlMode {
    BangBang,
    Pid,
    Other(String),
}

impl ControlMode {
    pub fn as_str(&self) -> &str {
        match self {
            ControlMode::BangBang => "bang_bang",
            ControlMode::Pid => "pid",
            ControlMode::Other(tag) => tag,
        }
    }

    /// True for tags that consume `pid_Kp`/`pid_Ki`/`pid_Kd`
    pub fn is_pid_like(&self) -> bool {
        match self {
            ControlMode::BangBang => false,
            ControlMode::Pid => true,
            ControlMode::Other(tag) => tag.starts_with("pid"),
        }
    }
}

impl From<&str> for ControlMode {
    fn from(tag: &str) -> Self {
        match tag.trim() {
            "bang_bang" => ControlMode::BangBang,
            "pid" => ControlMode::Pid,
            other => ControlMode::Other(other.to_string()),
        }
    }
}

impl From<String> for ControlMode {
    fn from(tag: String) -> Self {
        ControlMode::from(tag.as_str())
    }
}

impl From<ControlMode> for String {
    fn from(mode: ControlMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the heater subsystem needs to set up the chamber heater
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChamberHeaterConfig {
    /// Fully-qualified section name the record was built from
    pub section: String,
    pub gcode_id: Option<String>,
    pub heater_name: String,

    pub sensor_type: String,
    pub sensor_pin: String,
    pub sensor_pullup_ohms: f64,
    pub sensor_inline_resistor_ohms: f64,

    pub min_temp: f64,
    pub max_temp: f64,
    /// Always within `[min_temp, max_temp]`
    pub min_extrude_temp: f64,

    pub control_mode: ControlMode,
    pub pid_kp: f64,
    pub pid_ki: f64,
    pub pid_kd: f64,
    pub pwm_cycle_time: f64,

    /// In `(0, 1]`
    pub max_power: f64,
    pub smooth_time: f64,

    // Heating-gain verification, run by the heater subsystem
    pub hysteresis: f64,
    pub max_error: f64,
    pub heating_gain: f64,
    pub check_gain_time: f64,

    pub heater_pin: String,
}

impl ChamberHeaterConfig {
    /// True when any PID gain is non-zero
    pub fn has_pid_gains(&self) -> bool {
        self.pid_kp != 0.0 || self.pid_ki != 0.0 || self.pid_kd != 0.0
    }
}

/// Everything the fan subsystem needs to build the controller fan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChamberFanConfig {
    pub section: String,

    pub fan_pin: String,
    pub enable_pin: Option<String>,
    pub tachometer_pin: Option<String>,

    /// In `(0, 1]`
    pub max_power: f64,
    pub shutdown_speed: f64,
    pub min_power: f64,
    pub cycle_time: f64,
    pub hardware_pwm: bool,
    pub kick_start_time: f64,

    pub tachometer_ppr: u32,
    pub tachometer_poll_interval: f64,

    pub fan_speed: f64,
    /// Seconds
    pub idle_timeout: u32,
    pub idle_speed: f64,

    /// `None` disables shutting the fan off based on heater state
    pub off_below: Option<f64>,
    /// Name of the heater this fan follows; looked up by the fan subsystem
    pub heater_reference: String,
    /// Name of the stepper this fan follows; looked up by the fan subsystem
    pub stepper_reference: String,
}

impl ChamberFanConfig {
    /// Whether fan activity is tied to the referenced heater's state
    pub fn heater_coupling_enabled(&self) -> bool {
        self.off_below.is_some()
    }
}
