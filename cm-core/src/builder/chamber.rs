//! Chamber heater config builder

use tracing::{debug, warn};

use super::default_heater_name;
use crate::constants::{heater, keys, verify};
use crate::data::{check_bounds, Bounds, ChamberHeaterConfig, ControlMode};
use crate::error::Result;
use crate::settings::SettingsSection;

/// Build the heater record for one chamber section
///
/// Options are resolved in a fixed order: `min_temp` and `max_temp` come
/// before `min_extrude_temp` because they form its bounds, and `max_temp` is
/// itself bounded below by the resolved `min_temp`. The first invalid option
/// aborts the build.
pub fn build_heater_config(section: &SettingsSection) -> Result<ChamberHeaterConfig> {
    let gcode_id = section.get_opt(keys::GCODE_ID)?;
    let heater_pin = section.get(keys::HEATER_PIN)?;
    let max_power = section.getfloat(
        keys::CHAMBER_MAX_POWER,
        Some(heater::DEFAULT_MAX_POWER),
        Bounds::POWER,
    )?;
    let sensor_type = section.get(keys::SENSOR_TYPE)?;
    let sensor_pin = section.get(keys::SENSOR_PIN)?;
    let smooth_time = section.getfloat(
        keys::CHAMBER_SMOOTH_TIME,
        Some(heater::DEFAULT_SMOOTH_TIME),
        Bounds::NON_NEGATIVE,
    )?;

    let min_temp = section.getfloat(
        keys::MIN_TEMP,
        Some(heater::DEFAULT_MIN_TEMP),
        Bounds::NON_NEGATIVE,
    )?;
    let max_temp = section.getfloat(keys::MAX_TEMP, Some(heater::DEFAULT_MAX_TEMP), Bounds::NONE)?;
    // The default is checked too: min_extrude_temp clamps into this range.
    let max_temp = check_bounds(section.name(), keys::MAX_TEMP, max_temp, &Bounds::NONE.min(min_temp))?;

    let control_mode =
        ControlMode::from(section.get_or(keys::HEATER_CONTROL, heater::DEFAULT_CONTROL)?);
    let pid_kp = section.getfloat(keys::PID_KP, Some(heater::DEFAULT_PID_GAIN), Bounds::NON_NEGATIVE)?;
    let pid_ki = section.getfloat(keys::PID_KI, Some(heater::DEFAULT_PID_GAIN), Bounds::NON_NEGATIVE)?;
    let pid_kd = section.getfloat(keys::PID_KD, Some(heater::DEFAULT_PID_GAIN), Bounds::NON_NEGATIVE)?;
    let pwm_cycle_time = section.getfloat(
        keys::PWM_CYCLE_TIME,
        Some(heater::DEFAULT_PWM_CYCLE_TIME),
        Bounds::NON_NEGATIVE,
    )?;

    let sensor_pullup_ohms = section.getfloat(
        keys::PULLUP_RESISTOR,
        Some(heater::DEFAULT_PULLUP_OHMS),
        Bounds::NONE.above(0.0),
    )?;
    let sensor_inline_resistor_ohms = section.getfloat(
        keys::INLINE_RESISTOR,
        Some(heater::DEFAULT_INLINE_OHMS),
        Bounds::NON_NEGATIVE,
    )?;

    let min_extrude_temp = section
        .getfloat_opt(keys::MIN_EXTRUDE_TEMP, Bounds::NONE.min(min_temp).max(max_temp))?
        .unwrap_or_else(|| heater::DEFAULT_MIN_EXTRUDE_TEMP.clamp(min_temp, max_temp));

    let hysteresis = section.getfloat(
        keys::HYSTERESIS,
        Some(verify::DEFAULT_HYSTERESIS),
        Bounds::NON_NEGATIVE,
    )?;
    let max_error = section.getfloat(
        keys::MAX_ERROR,
        Some(verify::DEFAULT_MAX_ERROR),
        Bounds::NON_NEGATIVE,
    )?;
    let heating_gain = section.getfloat(
        keys::HEATING_GAIN,
        Some(verify::DEFAULT_HEATING_GAIN),
        Bounds::NONE.above(0.0),
    )?;
    let check_gain_time = section.getfloat(
        keys::CHECK_GAIN_TIME,
        Some(verify::DEFAULT_CHECK_GAIN_TIME),
        Bounds::NONE.min(verify::MIN_CHECK_GAIN_TIME),
    )?;

    let heater_name = section.get_or(keys::HEATER, &default_heater_name(section.name()))?;

    let config = ChamberHeaterConfig {
        section: section.name().to_string(),
        gcode_id,
        heater_name,
        sensor_type,
        sensor_pin,
        sensor_pullup_ohms,
        sensor_inline_resistor_ohms,
        min_temp,
        max_temp,
        min_extrude_temp,
        control_mode,
        pid_kp,
        pid_ki,
        pid_kd,
        pwm_cycle_time,
        max_power,
        smooth_time,
        hysteresis,
        max_error,
        heating_gain,
        check_gain_time,
        heater_pin,
    };

    // Gains under a non-PID mode are left for the heater subsystem to judge.
    if config.has_pid_gains() && !config.control_mode.is_pid_like() {
        warn!(
            "[{}] PID gains set but heater_control is '{}'; forwarding unchanged",
            config.section, config.control_mode
        );
    }

    debug!(
        "[{}] heater '{}': {}..{}°C, min_extrude {}°C, max_power {}, control {}",
        config.section,
        config.heater_name,
        config.min_temp,
        config.max_temp,
        config.min_extrude_temp,
        config.max_power,
        config.control_mode
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Bound, ChamberError};
    use serde_json::{json, Value};

    fn section_with(extra: Value) -> SettingsSection {
        let mut options = json!({
            "heater_pin": "PB10",
            "chamber_sensor_type": "EPCOS 100K B57560G104F",
            "chamber_sensor_pin": "PA2",
        });
        if let (Value::Object(base), Value::Object(extra)) = (&mut options, extra) {
            base.extend(extra);
        }
        SettingsSection::from_value("chamber_module heated_bay", options).unwrap()
    }

    fn expect_out_of_range(result: Result<ChamberHeaterConfig>, field: &str) -> Bound {
        match result {
            Err(ChamberError::OutOfRange { option, bound, .. }) => {
                assert_eq!(option, field);
                bound
            }
            other => panic!("expected bound violation on {field}, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let config = build_heater_config(&section_with(json!({}))).unwrap();
        assert_eq!(config.section, "chamber_module heated_bay");
        assert_eq!(config.heater_name, "heated_bay");
        assert_eq!(config.gcode_id, None);
        assert_eq!(config.sensor_pullup_ohms, 4700.0);
        assert_eq!(config.sensor_inline_resistor_ohms, 0.0);
        assert_eq!(config.min_temp, 0.0);
        assert_eq!(config.max_temp, 100.0);
        assert_eq!(config.control_mode, ControlMode::BangBang);
        assert_eq!(config.max_power, 1.0);
        assert_eq!(config.smooth_time, 1.0);
        assert_eq!(config.hysteresis, 5.0);
        assert_eq!(config.max_error, 120.0);
        assert_eq!(config.heating_gain, 2.0);
        assert_eq!(config.check_gain_time, 60.0);
    }

    #[test]
    fn test_default_min_extrude_temp_clamped_into_range() {
        let config = build_heater_config(&section_with(json!({}))).unwrap();
        assert_eq!(config.min_extrude_temp, 100.0);

        let config = build_heater_config(&section_with(json!({ "max_temp": 250 }))).unwrap();
        assert_eq!(config.min_extrude_temp, 170.0);

        let config =
            build_heater_config(&section_with(json!({ "min_temp": 180, "max_temp": 250 })))
                .unwrap();
        assert_eq!(config.min_extrude_temp, 180.0);
    }

    #[test]
    fn test_explicit_heater_overrides_section_name() {
        let config = build_heater_config(&section_with(json!({ "heater": "extruder" }))).unwrap();
        assert_eq!(config.heater_name, "extruder");
    }

    #[test]
    fn test_min_extrude_temp_within_derived_bounds() {
        let config = build_heater_config(&section_with(json!({
            "min_temp": 10, "max_temp": 90, "min_extrude_temp": 10
        })))
        .unwrap();
        assert_eq!(config.min_extrude_temp, 10.0);

        let config = build_heater_config(&section_with(json!({
            "min_temp": 10, "max_temp": 90, "min_extrude_temp": 90
        })))
        .unwrap();
        assert_eq!(config.min_extrude_temp, 90.0);
    }

    #[test]
    fn test_min_extrude_temp_above_max_temp_rejected() {
        let bound = expect_out_of_range(
            build_heater_config(&section_with(json!({
                "max_temp": 90, "min_extrude_temp": 200
            }))),
            "min_extrude_temp",
        );
        assert_eq!(bound, Bound::Maximum(90.0));
    }

    #[test]
    fn test_min_extrude_temp_below_min_temp_rejected() {
        let bound = expect_out_of_range(
            build_heater_config(&section_with(json!({
                "min_temp": 20, "max_temp": 90, "min_extrude_temp": 5
            }))),
            "min_extrude_temp",
        );
        assert_eq!(bound, Bound::Minimum(20.0));
    }

    #[test]
    fn test_max_temp_below_min_temp_rejected() {
        let bound = expect_out_of_range(
            build_heater_config(&section_with(json!({ "min_temp": 60, "max_temp": 50 }))),
            "max_temp",
        );
        assert_eq!(bound, Bound::Minimum(60.0));
    }

    #[test]
    fn test_default_max_temp_below_min_temp_rejected() {
        let bound = expect_out_of_range(
            build_heater_config(&section_with(json!({ "min_temp": 150 }))),
            "max_temp",
        );
        assert_eq!(bound, Bound::Minimum(150.0));

        let bound = expect_out_of_range(
            build_heater_config(&section_with(json!({ "min_temp": 150, "min_extrude_temp": 160 }))),
            "max_temp",
        );
        assert_eq!(bound, Bound::Minimum(150.0));
    }

    #[test]
    fn test_chamber_max_power_bounds() {
        expect_out_of_range(
            build_heater_config(&section_with(json!({ "chamber_max_power": 0 }))),
            "chamber_max_power",
        );
        expect_out_of_range(
            build_heater_config(&section_with(json!({ "chamber_max_power": 1.01 }))),
            "chamber_max_power",
        );
        for power in [0.01, 0.5, 1.0] {
            let config =
                build_heater_config(&section_with(json!({ "chamber_max_power": power }))).unwrap();
            assert_eq!(config.max_power, power);
        }
    }

    #[test]
    fn test_gain_safety_bounds() {
        expect_out_of_range(
            build_heater_config(&section_with(json!({ "heating_gain": 0 }))),
            "heating_gain",
        );
        expect_out_of_range(
            build_heater_config(&section_with(json!({ "check_gain_time": 0.5 }))),
            "check_gain_time",
        );
        expect_out_of_range(
            build_heater_config(&section_with(json!({ "max_error": -1 }))),
            "max_error",
        );
        expect_out_of_range(
            build_heater_config(&section_with(json!({ "pullup_resistor": 0 }))),
            "pullup_resistor",
        );
    }

    #[test]
    fn test_pid_gains_forwarded_for_any_mode() {
        let config = build_heater_config(&section_with(json!({
            "heater_control": "bang_bang", "pid_Kp": 22.2, "pid_Ki": 1.08, "pid_Kd": 114
        })))
        .unwrap();
        assert_eq!(config.control_mode, ControlMode::BangBang);
        assert_eq!(config.pid_kp, 22.2);
        assert_eq!(config.pid_ki, 1.08);
        assert_eq!(config.pid_kd, 114.0);
    }

    #[test]
    fn test_unknown_control_mode_passes_through() {
        let config =
            build_heater_config(&section_with(json!({ "heater_control": "mpc" }))).unwrap();
        assert_eq!(config.control_mode, ControlMode::Other("mpc".to_string()));
    }

    #[test]
    fn test_missing_heater_pin() {
        let section = SettingsSection::from_value(
            "chamber_module bay",
            json!({ "chamber_sensor_type": "x", "chamber_sensor_pin": "PA2" }),
        )
        .unwrap();
        match build_heater_config(&section) {
            Err(ChamberError::MissingOption { option, .. }) => assert_eq!(option, "heater_pin"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
