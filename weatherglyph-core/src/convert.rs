use crate::{error::FormatError, model::TemperatureUnit};

const ZERO_CELSIUS_IN_KELVIN: f64 = 273.15;

/// Converts a Kelvin reading to a whole-degree value in `unit`.
///
/// The result is floored, not rounded: 26.85°C displays as 26.
pub fn convert(temp_kelvin: f64, unit: TemperatureUnit) -> i64 {
    let celsius = temp_kelvin - ZERO_CELSIUS_IN_KELVIN;

    let value = match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
    };

    value.floor() as i64
}

/// Like [`convert`], but takes the unit as the raw `"C"`/`"F"` setting.
pub fn convert_str(temp_kelvin: f64, unit: &str) -> Result<i64, FormatError> {
    Ok(convert(temp_kelvin, unit.parse()?))
}
