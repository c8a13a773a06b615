//! Constants and configuration values for chamber-module
//!
//! Centralizes option names, defaults and bounds for the chamber section.
//! Builders read from here; never inline a default or a limit elsewhere.

/// Names of objects and sections this layer deals with
pub mod names {
    /// First word of every section handled by this layer
    pub const SECTION_PREFIX: &str = "chamber_module";

    /// Key the heater record is loaded under
    pub const HEATERS_OBJECT: &str = "heaters";

    /// Registry key of the fan controller
    pub const CONTROLLER_FAN_OBJECT: &str = "controller_fan";

    /// Stepper axis the controller fan follows
    pub const STEPPER_REFERENCE: &str = "extruder";
}

/// Settings keys, exactly as they appear in a chamber section
pub mod keys {
    pub const GCODE_ID: &str = "gcode_id";
    pub const HEATER: &str = "heater";
    pub const HEATER_PIN: &str = "heater_pin";
    pub const SENSOR_TYPE: &str = "chamber_sensor_type";
    pub const SENSOR_PIN: &str = "chamber_sensor_pin";
    pub const PULLUP_RESISTOR: &str = "pullup_resistor";
    pub const INLINE_RESISTOR: &str = "inline_resistor";
    pub const MIN_TEMP: &str = "min_temp";
    pub const MAX_TEMP: &str = "max_temp";
    pub const MIN_EXTRUDE_TEMP: &str = "min_extrude_temp";
    pub const HEATER_CONTROL: &str = "heater_control";
    pub const PID_KP: &str = "pid_Kp";
    pub const PID_KI: &str = "pid_Ki";
    pub const PID_KD: &str = "pid_Kd";
    pub const PWM_CYCLE_TIME: &str = "pwm_cycle_time";
    pub const CHAMBER_MAX_POWER: &str = "chamber_max_power";
    pub const CHAMBER_SMOOTH_TIME: &str = "chamber_smooth_time";
    pub const HYSTERESIS: &str = "hysteresis";
    pub const MAX_ERROR: &str = "max_error";
    pub const HEATING_GAIN: &str = "heating_gain";
    pub const CHECK_GAIN_TIME: &str = "check_gain_time";

    pub const FAN_PIN: &str = "fan_pin";
    pub const FAN_ENABLE_PIN: &str = "fan_enable_pin";
    pub const FAN_TACHOMETER_PIN: &str = "fan_tachometer_pin";
    pub const FAN_MAX_POWER: &str = "fan_max_power";
    pub const FAN_SHUTDOWN_SPEED: &str = "fan_shutdown_speed";
    pub const FAN_MIN_POWER: &str = "fan_min_power";
    pub const FAN_CYCLE_TIME: &str = "fan_cycle_time";
    pub const FAN_HARDWARE_PWM: &str = "fan_hardware_pwm";
    pub const FAN_KICK_START_TIME: &str = "fan_kick_start_time";
    pub const FAN_TACHOMETER_PPR: &str = "fan_tachometer_ppr";
    pub const FAN_TACHOMETER_POLL_INTERVAL: &str = "fan_tachometer_poll_interval";
    pub const FAN_SPEED: &str = "fan_speed";
    pub const FAN_IDLE_TIMEOUT: &str = "fan_idle_timeout";
    pub const FAN_IDLE_SPEED: &str = "fan_idle_speed";
    pub const FAN_OFF_BELOW: &str = "fan_off_below";
}

/// Chamber heater defaults
pub mod heater {
    /// Thermistor pullup resistor in ohms
    pub const DEFAULT_PULLUP_OHMS: f64 = 4700.0;

    /// Inline resistor in ohms
    pub const DEFAULT_INLINE_OHMS: f64 = 0.0;

    /// Lowest allowed chamber temperature (Celsius)
    pub const DEFAULT_MIN_TEMP: f64 = 0.0;

    /// Highest allowed chamber temperature (Celsius)
    pub const DEFAULT_MAX_TEMP: f64 = 100.0;

    /// Minimum temperature for extrusion moves (Celsius)
    ///
    /// Clamped into `[min_temp, max_temp]` when the option is absent.
    pub const DEFAULT_MIN_EXTRUDE_TEMP: f64 = 170.0;

    /// Control algorithm used when `heater_control` is absent
    pub const DEFAULT_CONTROL: &str = "bang_bang";

    pub const DEFAULT_PID_GAIN: f64 = 0.0;

    pub const DEFAULT_PWM_CYCLE_TIME: f64 = 0.0;

    /// Fraction of full power the heater may use
    pub const DEFAULT_MAX_POWER: f64 = 1.0;

    /// Temperature smoothing window in seconds
    pub const DEFAULT_SMOOTH_TIME: f64 = 1.0;
}

/// Parameters of the heating-gain verification, executed by the heater subsystem
pub mod verify {
    /// Allowed drop below target before the check engages (Celsius)
    pub const DEFAULT_HYSTERESIS: f64 = 5.0;

    /// Accumulated error that trips the check
    pub const DEFAULT_MAX_ERROR: f64 = 120.0;

    /// Minimum expected rise (Celsius) per `check_gain_time`
    pub const DEFAULT_HEATING_GAIN: f64 = 2.0;

    /// Window for `heating_gain` in seconds
    pub const DEFAULT_CHECK_GAIN_TIME: f64 = 60.0;

    /// Shortest accepted `check_gain_time`
    pub const MIN_CHECK_GAIN_TIME: f64 = 1.0;
}

/// Chamber fan defaults
pub mod fan {
    pub const DEFAULT_MAX_POWER: f64 = 1.0;
    pub const DEFAULT_SHUTDOWN_SPEED: f64 = 0.0;
    pub const DEFAULT_MIN_POWER: f64 = 0.0;
    pub const DEFAULT_CYCLE_TIME: f64 = 0.0;
    pub const DEFAULT_HARDWARE_PWM: bool = false;
    pub const DEFAULT_KICK_START_TIME: f64 = 0.0;
    pub const DEFAULT_TACHOMETER_PPR: i64 = 0;
    pub const DEFAULT_TACHOMETER_POLL_INTERVAL: f64 = 0.0;

    /// Speed while the heater or stepper is active
    pub const DEFAULT_FAN_SPEED: f64 = 1.0;

    /// Seconds after the last activity before dropping to idle speed
    pub const DEFAULT_IDLE_TIMEOUT: i64 = 30;
}

/// Limits for untrusted input
pub mod limits {
    /// Maximum settings snapshot size (1 MiB)
    pub const MAX_SNAPSHOT_SIZE: u64 = 1024 * 1024;
}
