//! Weather icon resolution.
//!
//! The watch font carries weather icons in the private-use area starting at
//! U+E004. A condition resolves to a glyph in this order:
//!
//! 1. the condition id, for the few freezing / mixed precipitation ids the
//!    icon code cannot tell apart;
//! 2. the icon code (day and night variants mostly share a glyph);
//! 3. id 905 (windy), which has no icon code of its own;
//! 4. nothing. Unknown conditions are dropped, not reported.

use crate::model::Condition;

/// Weather glyphs of the watch font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Sunny,
    ClearNight,
    PartlyCloudy,
    MostlyCloudy,
    Cloudy,
    Foggy,
    Windy,
    Showers,
    FreezingRain,
    FreezingDrizzle,
    MixedRainAndSnow,
    Snow,
    Storm,
    Thunderstorm,
}

impl Glyph {
    pub const fn as_char(&self) -> char {
        match self {
            Glyph::Sunny => '\u{e004}',
            Glyph::ClearNight => '\u{e005}',
            Glyph::PartlyCloudy => '\u{e006}',
            Glyph::MostlyCloudy => '\u{e007}',
            Glyph::Cloudy => '\u{e008}',
            Glyph::Foggy => '\u{e009}',
            Glyph::Windy => '\u{e00a}',
            Glyph::Showers => '\u{e00b}',
            Glyph::FreezingRain => '\u{e00c}',
            Glyph::FreezingDrizzle => '\u{e00d}',
            Glyph::MixedRainAndSnow => '\u{e00e}',
            Glyph::Snow => '\u{e00f}',
            Glyph::Storm => '\u{e010}',
            Glyph::Thunderstorm => '\u{e011}',
        }
    }
}

/// Ids whose glyph wins over whatever the icon code says.
const ID_OVERRIDES: &[(i64, Glyph)] = &[
    (611, Glyph::FreezingDrizzle),
    (612, Glyph::FreezingRain),
    (615, Glyph::MixedRainAndSnow),
    (616, Glyph::MixedRainAndSnow),
];

// "50n" has no entry; night fog only resolves through the windy fallback.
const CODE_GLYPHS: &[(&str, Glyph)] = &[
    ("01d", Glyph::Sunny),
    ("01n", Glyph::ClearNight),
    ("02d", Glyph::PartlyCloudy),
    ("02n", Glyph::PartlyCloudy),
    ("03d", Glyph::MostlyCloudy),
    ("03n", Glyph::MostlyCloudy),
    ("04d", Glyph::Cloudy),
    ("04n", Glyph::Cloudy),
    ("09d", Glyph::Showers),
    ("09n", Glyph::Showers),
    ("10d", Glyph::Showers),
    ("10n", Glyph::Showers),
    ("11d", Glyph::Thunderstorm),
    ("11n", Glyph::Thunderstorm),
    ("13d", Glyph::Snow),
    ("13n", Glyph::Snow),
    ("50d", Glyph::Foggy),
];

const WINDY_ID: i64 = 905;

/// Resolves the glyph for an icon code / condition id pair.
pub fn resolve_icon(condition_code: &str, condition_id: i64) -> Option<Glyph> {
    lookup(ID_OVERRIDES, &condition_id)
        .or_else(|| lookup(CODE_GLYPHS, &condition_code))
        .or_else(|| (condition_id == WINDY_ID).then_some(Glyph::Foggy))
}

/// Same as [`resolve_icon`], rendered as a string; empty when nothing matches.
pub fn resolve_icon_str(condition_code: &str, condition_id: i64) -> String {
    resolve_icon(condition_code, condition_id)
        .map(|glyph| glyph.as_char().to_string())
        .unwrap_or_default()
}

impl Condition {
    pub fn glyph(&self) -> Option<Glyph> {
        resolve_icon(&self.icon, self.id)
    }
}

fn lookup<K: PartialEq, V: Copy>(table: &[(K, V)], key: &K) -> Option<V> {
    table.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_day_is_sunny() {
        assert_eq!(resolve_icon("01d", 800), Some(Glyph::Sunny));
        assert_eq!(resolve_icon_str("01d", 800), "\u{e004}");
    }

    #[test]
    fn day_and_night_share_glyphs() {
        let pairs = [
            ("02d", "02n"),
            ("03d", "03n"),
            ("04d", "04n"),
            ("09d", "09n"),
            ("10d", "10n"),
            ("11d", "11n"),
            ("13d", "13n"),
        ];
        for (day, night) in pairs {
            assert_eq!(resolve_icon(day, 0), resolve_icon(night, 0), "{day} vs {night}");
            assert!(resolve_icon(day, 0).is_some());
        }
        assert_eq!(resolve_icon("01n", 800), Some(Glyph::ClearNight));
    }

    #[test]
    fn rain_codes_map_to_showers() {
        assert_eq!(resolve_icon("09d", 502), Some(Glyph::Showers));
        assert_eq!(resolve_icon("10n", 500), Some(Glyph::Showers));
    }

    #[test]
    fn id_override_beats_code() {
        assert_eq!(resolve_icon("13d", 611), Some(Glyph::FreezingDrizzle));
        assert_eq!(resolve_icon("01d", 611), Some(Glyph::FreezingDrizzle));
        assert_eq!(resolve_icon("", 611), Some(Glyph::FreezingDrizzle));
        assert_eq!(resolve_icon("13n", 612), Some(Glyph::FreezingRain));
        assert_eq!(resolve_icon("13d", 615), Some(Glyph::MixedRainAndSnow));
        assert_eq!(resolve_icon("13d", 616), Some(Glyph::MixedRainAndSnow));
    }

    #[test]
    fn windy_falls_back_to_fog_only_without_code_match() {
        assert_eq!(resolve_icon("xx", 905), Some(Glyph::Foggy));
        assert_eq!(resolve_icon("01d", 905), Some(Glyph::Sunny));
    }

    #[test]
    fn night_fog_has_no_glyph() {
        assert_eq!(resolve_icon("50d", 741), Some(Glyph::Foggy));
        assert_eq!(resolve_icon("50n", 741), None);
    }

    #[test]
    fn unknown_condition_is_empty() {
        assert_eq!(resolve_icon("99z", 1), None);
        assert_eq!(resolve_icon_str("99z", 1), "");
    }

    #[test]
    fn condition_glyph_uses_both_fields() {
        assert_eq!(Condition::new("11d", 200).glyph(), Some(Glyph::Thunderstorm));
        assert_eq!(Condition::new("11d", 612).glyph(), Some(Glyph::FreezingRain));
    }

    #[test]
    fn glyphs_are_private_use_chars() {
        assert_eq!(Glyph::Sunny.as_char() as u32, 0xe004);
        assert_eq!(Glyph::Thunderstorm.as_char() as u32, 0xe011);
    }
}
