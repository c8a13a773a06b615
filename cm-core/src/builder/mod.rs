//! Config builders
//!
//! Turn one chamber section into the heater and fan records. The two
//! builders share no state; where their defaults must agree they call the
//! same pure function.

mod chamber;
mod fan;

pub use chamber::build_heater_config;
pub use fan::build_fan_config;

/// Default heater name for a section: its last whitespace-delimited word
///
/// `"chamber_module heated_bay"` gives `"heated_bay"`.
pub fn default_heater_name(section_name: &str) -> String {
    section_name
        .split_whitespace()
        .last()
        .unwrap_or(section_name)
        .to_string()
}
