use crate::{
    convert::convert,
    model::{DisplayString, TemperatureUnit, WeatherPayload},
};

/// Number of conditions that get a glyph; the rest collapse into [`ELLIPSIS`].
pub const MAX_GLYPHS: usize = 2;

pub const ELLIPSIS: &str = "...";

/// Renders a payload as `"<icons> <temp>°<unit>"`.
///
/// `cod` is not looked at; callers only hand over successful payloads.
pub fn format(payload: &WeatherPayload, unit: TemperatureUnit) -> DisplayString {
    let mut icons: String = payload
        .weather
        .iter()
        .take(MAX_GLYPHS)
        .filter_map(|condition| condition.glyph())
        .map(|glyph| glyph.as_char())
        .collect();

    if payload.weather.len() > MAX_GLYPHS {
        icons.push_str(ELLIPSIS);
    }

    let temp = convert(payload.main.temp, unit);

    DisplayString::new(format!("{icons} {temp}°{}", unit.letter()))
}
