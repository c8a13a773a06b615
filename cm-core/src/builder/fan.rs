//! Chamber fan config builder

use tracing::debug;

use super::default_heater_name;
use crate::constants::{fan, keys, names};
use crate::data::{Bounds, ChamberFanConfig};
use crate::error::{ChamberError, Result};
use crate::settings::SettingsSection;

/// Build the fan record for one chamber section
///
/// `fan_idle_speed` defaults to the `fan_speed` resolved earlier in the same
/// pass. `fan_off_below` stays `None` when absent.
pub fn build_fan_config(section: &SettingsSection) -> Result<ChamberFanConfig> {
    let fan_pin = section.get(keys::FAN_PIN)?;
    let max_power = section.getfloat(keys::FAN_MAX_POWER, Some(fan::DEFAULT_MAX_POWER), Bounds::POWER)?;
    let shutdown_speed = section.getfloat(
        keys::FAN_SHUTDOWN_SPEED,
        Some(fan::DEFAULT_SHUTDOWN_SPEED),
        Bounds::NON_NEGATIVE,
    )?;
    let cycle_time = section.getfloat(
        keys::FAN_CYCLE_TIME,
        Some(fan::DEFAULT_CYCLE_TIME),
        Bounds::NON_NEGATIVE,
    )?;
    let hardware_pwm = section.getboolean(keys::FAN_HARDWARE_PWM, Some(fan::DEFAULT_HARDWARE_PWM))?;
    let kick_start_time = section.getfloat(
        keys::FAN_KICK_START_TIME,
        Some(fan::DEFAULT_KICK_START_TIME),
        Bounds::NON_NEGATIVE,
    )?;
    let min_power = section.getfloat(
        keys::FAN_MIN_POWER,
        Some(fan::DEFAULT_MIN_POWER),
        Bounds::NON_NEGATIVE,
    )?;

    let tachometer_pin = section.get_opt(keys::FAN_TACHOMETER_PIN)?;
    let tachometer_ppr = section.getint(
        keys::FAN_TACHOMETER_PPR,
        Some(fan::DEFAULT_TACHOMETER_PPR),
        Bounds::NON_NEGATIVE,
    )?;
    let tachometer_poll_interval = section.getfloat(
        keys::FAN_TACHOMETER_POLL_INTERVAL,
        Some(fan::DEFAULT_TACHOMETER_POLL_INTERVAL),
        Bounds::NON_NEGATIVE,
    )?;
    let enable_pin = section.get_opt(keys::FAN_ENABLE_PIN)?;

    let fan_speed = section.getfloat(keys::FAN_SPEED, Some(fan::DEFAULT_FAN_SPEED), Bounds::UNIT)?;
    let idle_timeout = section.getint(
        keys::FAN_IDLE_TIMEOUT,
        Some(fan::DEFAULT_IDLE_TIMEOUT),
        Bounds::NON_NEGATIVE,
    )?;
    let idle_speed = section.getfloat(keys::FAN_IDLE_SPEED, Some(fan_speed), Bounds::UNIT)?;
    let off_below = section.getfloat_opt(keys::FAN_OFF_BELOW, Bounds::UNIT)?;

    let heater_reference = section.get_or(keys::HEATER, &default_heater_name(section.name()))?;

    let config = ChamberFanConfig {
        section: section.name().to_string(),
        fan_pin,
        enable_pin,
        tachometer_pin,
        max_power,
        shutdown_speed,
        min_power,
        cycle_time,
        hardware_pwm,
        kick_start_time,
        tachometer_ppr: to_u32(section, keys::FAN_TACHOMETER_PPR, tachometer_ppr)?,
        tachometer_poll_interval,
        fan_speed,
        idle_timeout: to_u32(section, keys::FAN_IDLE_TIMEOUT, idle_timeout)?,
        idle_speed,
        off_below,
        heater_reference,
        stepper_reference: names::STEPPER_REFERENCE.to_string(),
    };

    debug!(
        "[{}] fan on {}: speed {}, idle {} after {}s, off_below {:?}, follows heater '{}'",
        config.section,
        config.fan_pin,
        config.fan_speed,
        config.idle_speed,
        config.idle_timeout,
        config.off_below,
        config.heater_reference
    );

    Ok(config)
}

fn to_u32(section: &SettingsSection, option: &str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        ChamberError::invalid_value(section.name(), option, format!("{} does not fit in 32 bits", value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Bound;
    use serde_json::{json, Value};

    fn section_with(extra: Value) -> SettingsSection {
        let mut options = json!({ "fan_pin": "PA1" });
        if let (Value::Object(base), Value::Object(extra)) = (&mut options, extra) {
            base.extend(extra);
        }
        SettingsSection::from_value("chamber_module heated_bay", options).unwrap()
    }

    fn expect_out_of_range(result: Result<ChamberFanConfig>, field: &str) -> Bound {
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
        let config = build_fan_config(&section_with(json!({}))).unwrap();
        assert_eq!(config.fan_pin, "PA1");
        assert_eq!(config.enable_pin, None);
        assert_eq!(config.tachometer_pin, None);
        assert_eq!(config.max_power, 1.0);
        assert_eq!(config.shutdown_speed, 0.0);
        assert_eq!(config.min_power, 0.0);
        assert_eq!(config.cycle_time, 0.0);
        assert!(!config.hardware_pwm);
        assert_eq!(config.kick_start_time, 0.0);
        assert_eq!(config.tachometer_ppr, 0);
        assert_eq!(config.tachometer_poll_interval, 0.0);
        assert_eq!(config.fan_speed, 1.0);
        assert_eq!(config.idle_timeout, 30);
        assert_eq!(config.idle_speed, 1.0);
        assert_eq!(config.off_below, None);
        assert!(!config.heater_coupling_enabled());
        assert_eq!(config.heater_reference, "heated_bay");
        assert_eq!(config.stepper_reference, "extruder");
    }

    #[test]
    fn test_idle_speed_tracks_fan_speed() {
        for speed in [0.0, 0.25, 0.6, 1.0] {
            let config = build_fan_config(&section_with(json!({ "fan_speed": speed }))).unwrap();
            assert_eq!(config.fan_speed, speed);
            assert_eq!(config.idle_speed, speed);
        }
    }

    #[test]
    fn test_explicit_idle_speed_wins() {
        let config =
            build_fan_config(&section_with(json!({ "fan_speed": 0.8, "fan_idle_speed": 0.2 })))
                .unwrap();
        assert_eq!(config.idle_speed, 0.2);
        expect_out_of_range(
            build_fan_config(&section_with(json!({ "fan_idle_speed": 1.5 }))),
            "fan_idle_speed",
        );
    }

    #[test]
    fn test_off_below() {
        let config = build_fan_config(&section_with(json!({ "fan_off_below": 0.3 }))).unwrap();
        assert_eq!(config.off_below, Some(0.3));
        assert!(config.heater_coupling_enabled());

        let config = build_fan_config(&section_with(json!({ "fan_off_below": 0 }))).unwrap();
        assert_eq!(config.off_below, Some(0.0));

        expect_out_of_range(
            build_fan_config(&section_with(json!({ "fan_off_below": 1.2 }))),
            "fan_off_below",
        );
        expect_out_of_range(
            build_fan_config(&section_with(json!({ "fan_off_below": -0.1 }))),
            "fan_off_below",
        );
    }

    #[test]
    fn test_fan_max_power_bounds() {
        let bound = expect_out_of_range(
            build_fan_config(&section_with(json!({ "fan_max_power": 0 }))),
            "fan_max_power",
        );
        assert_eq!(bound, Bound::Above(0.0));
        let bound = expect_out_of_range(
            build_fan_config(&section_with(json!({ "fan_max_power": 1.2 }))),
            "fan_max_power",
        );
        assert_eq!(bound, Bound::Maximum(1.0));
        let config = build_fan_config(&section_with(json!({ "fan_max_power": 0.4 }))).unwrap();
        assert_eq!(config.max_power, 0.4);
    }

    #[test]
    fn test_heater_reference_follows_heater_option() {
        let config = build_fan_config(&section_with(json!({ "heater": "extruder" }))).unwrap();
        assert_eq!(config.heater_reference, "extruder");
    }

    #[test]
    fn test_optional_pins_and_tachometer() {
        let config = build_fan_config(&section_with(json!({
            "fan_enable_pin": "PC3",
            "fan_tachometer_pin": "^PC4",
            "fan_tachometer_ppr": 2,
            "fan_tachometer_poll_interval": 0.0015,
            "fan_hardware_pwm": "true",
        })))
        .unwrap();
        assert_eq!(config.enable_pin.as_deref(), Some("PC3"));
        assert_eq!(config.tachometer_pin.as_deref(), Some("^PC4"));
        assert_eq!(config.tachometer_ppr, 2);
        assert_eq!(config.tachometer_poll_interval, 0.0015);
        assert!(config.hardware_pwm);
    }

    #[test]
    fn test_negative_idle_timeout_rejected() {
        expect_out_of_range(
            build_fan_config(&section_with(json!({ "fan_idle_timeout": -5 }))),
            "fan_idle_timeout",
        );
    }

    #[test]
    fn test_oversized_integer_rejected() {
        let result = build_fan_config(&section_with(json!({ "fan_idle_timeout": 5_000_000_000i64 })));
        assert!(matches!(result, Err(ChamberError::InvalidValue { .. })));
    }

    #[test]
    fn test_missing_fan_pin() {
        let section = SettingsSection::from_value("chamber_module bay", json!({})).unwrap();
        assert!(matches!(
            build_fan_config(&section),
            Err(ChamberError::MissingOption { .. })
        ));
    }
}
