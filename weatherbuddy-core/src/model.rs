use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{condition::WeatherIcon, units::TemperatureUnit};

/// Normalized answer to a single weather query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherQueryResult {
    /// City as entered by the user, not the provider's canonical name.
    pub city: String,
    pub temperature_k: f64,
    pub condition_id: i32,
    pub condition_description: String,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherQueryResult {
    pub fn icon(&self) -> WeatherIcon {
        WeatherIcon::classify(self.condition_id)
    }

    pub fn display(&self, unit: TemperatureUnit) -> DisplayResult {
        DisplayResult::derive(self, unit)
    }
}

/// What the presentation layer renders. Recomputed for every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayResult {
    pub temperature_display: String,
    pub icon: WeatherIcon,
    pub description: String,
}

impl DisplayResult {
    pub fn derive(result: &WeatherQueryResult, unit: TemperatureUnit) -> Self {
        Self {
            temperature_display: unit.format(result.temperature_k),
            icon: result.icon(),
            description: result.condition_description.clone(),
        }
    }
}
