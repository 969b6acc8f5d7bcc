use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{Condition, WeatherReport};
use crate::provider::ProviderError;

use super::WeatherProvider;

/// OpenWeather current-weather client.
///
/// No request timeout is configured; the transport's own defaults apply,
/// and a failed fetch requires a new user-initiated search.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, endpoint: String) -> Self {
        Self {
            api_key,
            endpoint,
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherReport, ProviderError> {
        debug!("GET {} q={city}", self.endpoint);

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        parsed.into_report()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, ProviderError> {
        self.fetch_current(city).await
    }
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

/// Wire shape of the current-weather payload. Every field is required;
/// a missing or mistyped one fails the whole parse, so a half-filled
/// report can never reach the presenter.
#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    weather: Vec<OwWeather>,
    main: OwMain,
    sys: OwSys,
    dt: i64,
    timezone: i64,
    name: String,
}

impl OwCurrentResponse {
    fn into_report(self) -> Result<WeatherReport, ProviderError> {
        // Only the first entry of the `weather` array is meaningful; an
        // empty array is as fatal as a missing field.
        let label = self
            .weather
            .into_iter()
            .next()
            .map(|w| w.main)
            .ok_or(ProviderError::MissingField("weather[0].main"))?;

        Ok(WeatherReport {
            condition: Condition::from_label(&label),
            condition_label: label,
            temperature_c: self.main.temp,
            observed_unix: self.dt,
            timezone_offset_secs: self.timezone,
            sunrise_unix: self.sys.sunrise,
            sunset_unix: self.sys.sunset,
            city: self.name,
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let truncated: String = body.chars().take(MAX).collect();
        format!("{truncated}...")
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "coord": {"lon": 30.5234, "lat": 50.4501},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "base": "stations",
        "main": {"temp": 11.6, "feels_like": 10.9, "temp_min": 11.6, "temp_max": 12.1, "pressure": 1018, "humidity": 81},
        "visibility": 10000,
        "wind": {"speed": 3.1, "deg": 250},
        "clouds": {"all": 75},
        "dt": 1700000000,
        "sys": {"type": 2, "id": 2003742, "country": "UA", "sunrise": 1699995600, "sunset": 1700034000},
        "timezone": 7200,
        "id": 703448,
        "name": "Kyiv",
        "cod": 200
    }"#;

    #[test]
    fn parses_a_full_payload() {
        let parsed: OwCurrentResponse = serde_json::from_str(FIXTURE).expect("fixture parses");
        let report = parsed.into_report().expect("fixture converts");

        assert_eq!(report.condition, Condition::Rain);
        assert_eq!(report.condition_label, "Rain");
        assert_eq!(report.temperature_c, 11.6);
        assert_eq!(report.observed_unix, 1_700_000_000);
        assert_eq!(report.timezone_offset_secs, 7200);
        assert_eq!(report.sunrise_unix, 1_699_995_600);
        assert_eq!(report.sunset_unix, 1_700_034_000);
        assert_eq!(report.city, "Kyiv");
    }

    #[test]
    fn unknown_label_is_kept_raw() {
        let body = FIXTURE.replace("\"Rain\"", "\"Haze\"");
        let parsed: OwCurrentResponse = serde_json::from_str(&body).expect("fixture parses");
        let report = parsed.into_report().expect("fixture converts");
        assert_eq!(report.condition, Condition::Other);
        assert_eq!(report.condition_label, "Haze");
    }

    #[test]
    fn missing_field_fails_the_whole_parse() {
        let body = FIXTURE.replace("\"timezone\": 7200,", "");
        assert!(serde_json::from_str::<OwCurrentResponse>(&body).is_err());
    }

    #[test]
    fn mistyped_field_fails_the_whole_parse() {
        let body = FIXTURE.replace("\"dt\": 1700000000", "\"dt\": \"now\"");
        assert!(serde_json::from_str::<OwCurrentResponse>(&body).is_err());
    }

    #[test]
    fn empty_weather_array_is_rejected() {
        let body = FIXTURE.replace(
            "[{\"id\": 500, \"main\": \"Rain\", \"description\": \"light rain\", \"icon\": \"10d\"}]",
            "[]",
        );
        let parsed: OwCurrentResponse = serde_json::from_str(&body).expect("payload still parses");
        let err = parsed.into_report().unwrap_err();
        assert!(matches!(err, ProviderError::MissingField("weather[0].main")));
    }

    #[test]
    fn truncates_long_error_bodies() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));

        assert_eq!(truncate_body("short"), "short");
    }
}
