use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{error::QueryError, model::WeatherQueryResult};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherQueryResult, QueryError> {
        let url = format!("{}/weather", self.base_url);
        debug!(city, "requesting current weather from OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| QueryError::Transport(format!("failed to reach OpenWeather: {e}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            QueryError::Transport(format!("failed to read OpenWeather response body: {e}"))
        })?;

        let result = parse_current(city, status, &body)?;
        info!(city, condition_id = result.condition_id, "weather query succeeded");
        Ok(result)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherQueryResult, QueryError> {
        self.fetch_current(city).await
    }
}

/// OpenWeather sends `cod` as a number on success and as a string on errors.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwCode {
    Number(i64),
    Text(String),
}

impl OwCode {
    fn is_success(&self) -> bool {
        match self {
            OwCode::Number(n) => *n == 200,
            OwCode::Text(s) => s.trim() == "200",
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: i32,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    cod: Option<OwCode>,
    message: Option<String>,
    dt: Option<i64>,
    main: Option<OwMain>,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

/// Turn an OpenWeather `/weather` response into a query result.
///
/// A `cod` other than 200 is a provider rejection carrying `message`, even
/// when the HTTP status is an error too. Anything else that does not have the
/// expected shape is reported as a transport error.
fn parse_current(
    city: &str,
    status: StatusCode,
    body: &str,
) -> Result<WeatherQueryResult, QueryError> {
    let parsed: OwCurrentResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(err) if status.is_success() => {
            return Err(QueryError::Transport(format!(
                "failed to parse OpenWeather JSON: {err}"
            )));
        }
        Err(_) => return Err(http_failure(status, body)),
    };

    match &parsed.cod {
        Some(cod) if cod.is_success() => {}
        Some(_) => {
            let message = parsed.message.unwrap_or_else(|| "Unknown error".to_string());
            return Err(QueryError::ProviderRejected(message));
        }
        None if !status.is_success() => return Err(http_failure(status, body)),
        None => {
            return Err(QueryError::Transport(
                "OpenWeather response has no status code".to_string(),
            ));
        }
    }

    let main = parsed.main.ok_or_else(|| {
        QueryError::Transport("OpenWeather response has no `main` section".to_string())
    })?;

    let weather = parsed.weather.into_iter().next().ok_or_else(|| {
        QueryError::Transport("OpenWeather response has no weather conditions".to_string())
    })?;

    if !main.temp.is_finite() || main.temp <= 0.0 {
        return Err(QueryError::Transport(format!(
            "OpenWeather returned an impossible temperature: {} K",
            main.temp
        )));
    }
    if !(100..=999).contains(&weather.id) {
        return Err(QueryError::Transport(format!(
            "OpenWeather returned an unknown condition id: {}",
            weather.id
        )));
    }

    Ok(WeatherQueryResult {
        city: city.to_string(),
        temperature_k: main.temp,
        condition_id: weather.id,
        condition_description: weather.description,
        observed_at: parsed.dt.and_then(unix_to_utc),
    })
}

fn http_failure(status: StatusCode, body: &str) -> QueryError {
    QueryError::Transport(format!(
        "OpenWeather request failed with status {}: {}",
        status,
        truncate_body(body),
    ))
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_successful_response() {
        let body = r#"{
            "cod": 200,
            "name": "Testville",
            "dt": 1700000000,
            "main": { "temp": 300.0, "humidity": 40 },
            "weather": [
                { "id": 800, "main": "Clear", "description": "clear sky" },
                { "id": 701, "main": "Mist", "description": "mist" }
            ]
        }"#;

        let result = parse_current("Testville", StatusCode::OK, body).expect("should parse");
        assert_eq!(result.city, "Testville");
        assert_eq!(result.temperature_k, 300.0);
        assert_eq!(result.condition_id, 800);
        assert_eq!(result.condition_description, "clear sky");
        assert_eq!(result.observed_at.map(|t| t.timestamp()), Some(1_700_000_000));
    }

    #[test]
    fn keeps_the_entered_city_name() {
        let body = r#"{
            "cod": 200,
            "name": "London",
            "main": { "temp": 280.0 },
            "weather": [{ "id": 500, "description": "light rain" }]
        }"#;
        let result = parse_current("london", StatusCode::OK, body).expect("should parse");
        assert_eq!(result.city, "london");
    }

    #[test]
    fn non_success_cod_is_provider_rejection() {
        let body = r#"{"cod":"404","message":"city not found"}"#;
        let err = parse_current("Nowhere", StatusCode::NOT_FOUND, body).unwrap_err();
        assert_eq!(err, QueryError::ProviderRejected("city not found".into()));

        let body = r#"{"cod":404,"message":"city not found"}"#;
        let err = parse_current("Nowhere", StatusCode::OK, body).unwrap_err();
        assert_eq!(err, QueryError::ProviderRejected("city not found".into()));
    }

    #[test]
    fn rejection_without_message_uses_placeholder() {
        let err = parse_current("", StatusCode::BAD_REQUEST, r#"{"cod":"400"}"#).unwrap_err();
        assert_eq!(err, QueryError::ProviderRejected("Unknown error".into()));
    }

    #[test]
    fn accepts_boundary_condition_ids() {
        for id in [100, 999] {
            let body = format!(
                r#"{{"cod":200,"main":{{"temp":0.5}},"weather":[{{"id":{id},"description":"x"}}]}}"#
            );
            let result = parse_current("x", StatusCode::OK, &body).expect("should parse");
            assert_eq!(result.condition_id, id);
        }
    }

    #[test]
    fn string_200_cod_is_success() {
        let body = r#"{"cod":"200","main":{"temp":290.0},"weather":[{"id":300,"description":"drizzle"}]}"#;
        assert!(parse_current("x", StatusCode::OK, body).is_ok());
    }

    #[test]
    fn malformed_bodies_are_transport_errors() {
        let cases = [
            (StatusCode::OK, "not json"),
            (StatusCode::OK, r#"{"main":{"temp":300.0},"weather":[{"id":800,"description":"x"}]}"#),
            (StatusCode::OK, r#"{"cod":200,"weather":[{"id":800,"description":"x"}]}"#),
            (StatusCode::OK, r#"{"cod":200,"main":{"temp":300.0},"weather":[]}"#),
            (StatusCode::OK, r#"{"cod":200,"main":{"temp":300.0}}"#),
            (
                StatusCode::OK,
                r#"{"cod":200,"main":{"temp":-12.0},"weather":[{"id":800,"description":"x"}]}"#,
            ),
            (
                StatusCode::OK,
                r#"{"cod":200,"main":{"temp":0.0},"weather":[{"id":800,"description":"x"}]}"#,
            ),
            (
                StatusCode::OK,
                r#"{"cod":200,"main":{"temp":300.0},"weather":[{"id":5,"description":"x"}]}"#,
            ),
            (
                StatusCode::OK,
                r#"{"cod":200,"main":{"temp":300.0},"weather":[{"id":1000,"description":"x"}]}"#,
            ),
            (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
            (StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"boom"}"#),
        ];

        for (status, body) in cases {
            let err = parse_current("x", status, body).unwrap_err();
            assert!(matches!(err, QueryError::Transport(_)), "{status} {body}: {err:?}");
        }
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
    }
}
