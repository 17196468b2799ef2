use serde::{Deserialize, Serialize};

/// Icon category for an OpenWeather condition id.
/// See: https://openweathermap.org/weather-conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    VolcanicAsh,
    Squall,
    Tornado,
    Clear,
    FewClouds,
    #[default]
    None,
}

impl WeatherIcon {
    /// Classify a provider condition id. Total over all integers; unmapped ids
    /// give [`WeatherIcon::None`].
    pub fn classify(condition_id: i32) -> Self {
        match condition_id {
            200..=232 => Self::Thunderstorm,
            300..=321 => Self::Drizzle,
            500..=531 => Self::Rain,
            600..=622 => Self::Snow,
            // single-value ids win over the surrounding 701..=781 range
            762 => Self::VolcanicAsh,
            771 => Self::Squall,
            781 => Self::Tornado,
            701..=781 => Self::Atmosphere,
            800 => Self::Clear,
            801 => Self::FewClouds,
            _ => Self::None,
        }
    }

    /// Glyph shown next to the temperature. Empty for [`WeatherIcon::None`].
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "⛈️",
            Self::Drizzle => "🌦️",
            Self::Rain => "🌧️",
            Self::Snow => "☃️",
            Self::Atmosphere => "༄",
            Self::VolcanicAsh => "🌋",
            Self::Squall => "💨",
            Self::Tornado => "🍃",
            Self::Clear => "🌞",
            Self::FewClouds => "🌤️",
            Self::None => "",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl std::fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.emoji())
    }
}
