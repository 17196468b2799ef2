use serde::{Deserialize, Serialize};

/// Temperature unit used for display and narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
    Kelvin,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "fahrenheit",
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Kelvin => "kelvin",
        }
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius, TemperatureUnit::Kelvin]
    }

    /// Suffix appended to the rounded value on screen, e.g. `80°F`.
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Kelvin => "K",
        }
    }

    /// Unit name as read out in the narration sentence.
    pub fn spoken(&self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "degrees Fahrenheit",
            TemperatureUnit::Celsius => "degrees Celsius",
            TemperatureUnit::Kelvin => "kelvin",
        }
    }

    /// Convert an absolute temperature into this unit, unrounded.
    pub fn from_kelvin(&self, temp_k: f64) -> f64 {
        match self {
            TemperatureUnit::Fahrenheit => to_fahrenheit(temp_k),
            TemperatureUnit::Celsius => to_celsius(temp_k),
            TemperatureUnit::Kelvin => temp_k,
        }
    }

    /// The single rounding step shared by the display and the narration.
    pub fn rounded(&self, temp_k: f64) -> i64 {
        self.from_kelvin(temp_k).round() as i64
    }

    /// Rounded value with its symbol, e.g. `80°F`.
    pub fn format(&self, temp_k: f64) -> String {
        format!("{}{}", self.rounded(temp_k), self.symbol())
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "fahrenheit" | "f" => Ok(TemperatureUnit::Fahrenheit),
            "celsius" | "c" => Ok(TemperatureUnit::Celsius),
            "kelvin" | "k" => Ok(TemperatureUnit::Kelvin),
            _ => Err(anyhow::anyhow!(
                "Unknown unit '{value}'. Supported units: fahrenheit, celsius, kelvin."
            )),
        }
    }
}

pub fn to_fahrenheit(temp_k: f64) -> f64 {
    temp_k * 9.0 / 5.0 - 459.67
}

pub fn to_celsius(temp_k: f64) -> f64 {
    temp_k - 273.15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freezing_point_is_32_fahrenheit() {
        assert!((to_fahrenheit(273.15) - 32.0).abs() < 0.5);
    }

    #[test]
    fn absolute_zero_in_fahrenheit() {
        assert!((to_fahrenheit(0.0) + 459.67).abs() < 1e-9);
    }

    #[test]
    fn rounding_happens_once_at_format_time() {
        // 300 K = 80.33 °F
        let unit = TemperatureUnit::Fahrenheit;
        assert!((unit.from_kelvin(300.0) - 80.33).abs() < 1e-9);
        assert_eq!(unit.rounded(300.0), 80);
        assert_eq!(unit.format(300.0), "80°F");
    }

    #[test]
    fn celsius_and_kelvin_formatting() {
        assert_eq!(TemperatureUnit::Celsius.format(300.0), "27°C");
        assert_eq!(TemperatureUnit::Kelvin.format(300.4), "300K");
    }

    #[test]
    fn small_negatives_do_not_print_minus_zero() {
        // 255.2 K = -0.31 °F
        assert_eq!(TemperatureUnit::Fahrenheit.format(255.2), "0°F");
    }

    #[test]
    fn unit_parse_roundtrip() {
        for unit in TemperatureUnit::all() {
            let parsed =
                TemperatureUnit::try_from(unit.as_str()).expect("roundtrip should succeed");
            assert_eq!(*unit, parsed);
        }
        assert!(TemperatureUnit::try_from("rankine").is_err());
    }
}
