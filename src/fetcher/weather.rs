use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::{WeatherConfig, WeatherProvider};
use crate::error::{FetchError, Result};
use crate::models::WeatherRecord;

use super::get_json;

/// Description used for weather codes missing from [`WEATHER_CODES`].
pub const UNKNOWN_CONDITIONS: &str = "Unknown conditions";

/// WMO weather interpretation codes as reported by Open-Meteo.
pub const WEATHER_CODES: &[(i64, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Fog"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (56, "Light freezing drizzle"),
    (57, "Dense freezing drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (66, "Light freezing rain"),
    (67, "Heavy freezing rain"),
    (71, "Slight snow fall"),
    (73, "Moderate snow fall"),
    (75, "Heavy snow fall"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with slight hail"),
    (99, "Thunderstorm with heavy hail"),
];

pub fn describe_weather_code(code: i64) -> &'static str {
    WEATHER_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, description)| *description)
        .unwrap_or(UNKNOWN_CONDITIONS)
}

#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    name: Option<String>,
    main: Option<OpenWeatherMain>,
    #[serde(default)]
    weather: Vec<OpenWeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current_weather: Option<OpenMeteoCurrent>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    temperature: Option<f64>,
    weathercode: Option<i64>,
}

pub struct WeatherFetcher {
    client: Client,
    config: WeatherConfig,
}

impl WeatherFetcher {
    pub fn new(client: Client, config: WeatherConfig) -> Self {
        Self { client, config }
    }

    /// Current weather for the configured city, or `None` when the provider
    /// is unavailable or skipped.
    pub async fn fetch(&self) -> Option<WeatherRecord> {
        let result = match self.config.provider {
            WeatherProvider::OpenWeather => {
                let Some(api_key) = self.api_key() else {
                    debug!("No OpenWeather API key configured, skipping weather");
                    return None;
                };
                self.fetch_open_weather(api_key).await
            }
            WeatherProvider::OpenMeteo => self.fetch_open_meteo().await,
        };

        match result {
            Ok(record) => {
                info!(
                    "Weather for {}: {}°C, {}",
                    record.city, record.temperature, record.description
                );
                Some(record)
            }
            Err(e) => {
                warn!("Failed to fetch weather for '{}': {}", self.config.city, e);
                None
            }
        }
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    async fn fetch_open_weather(&self, api_key: &str) -> Result<WeatherRecord> {
        let url = format!(
            "{}/data/2.5/weather",
            self.config.openweather_url.trim_end_matches('/')
        );
        let location = format!("{},{}", self.config.city, self.config.country);
        let request = self.client.get(url).query(&[
            ("q", location.as_str()),
            ("units", "metric"),
            ("appid", api_key),
        ]);

        let data: OpenWeatherResponse = get_json(request).await?;
        self.open_weather_record(data)
    }

    fn open_weather_record(&self, data: OpenWeatherResponse) -> Result<WeatherRecord> {
        let main = data
            .main
            .ok_or_else(|| FetchError::Payload("missing 'main' block".to_string()))?;
        let temp = main
            .temp
            .ok_or_else(|| FetchError::Payload("missing 'main.temp'".to_string()))?;

        let description = data
            .weather
            .first()
            .and_then(|w| w.description.as_deref())
            .filter(|d| !d.trim().is_empty())
            .map(title_case)
            .unwrap_or_else(|| UNKNOWN_CONDITIONS.to_string());

        Ok(WeatherRecord {
            city: data
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| self.config.city.clone()),
            temperature: round_temperature(temp),
            feels_like: main.feels_like.map(round_temperature),
            description,
        })
    }

    async fn fetch_open_meteo(&self) -> Result<WeatherRecord> {
        let url = format!(
            "{}/v1/forecast",
            self.config.open_meteo_url.trim_end_matches('/')
        );
        let request = self.client.get(url).query(&[
            ("latitude", self.config.latitude.to_string()),
            ("longitude", self.config.longitude.to_string()),
            ("current_weather", "true".to_string()),
        ]);

        let data: OpenMeteoResponse = get_json(request).await?;
        self.open_meteo_record(data)
    }

    fn open_meteo_record(&self, data: OpenMeteoResponse) -> Result<WeatherRecord> {
        let current = data
            .current_weather
            .ok_or_else(|| FetchError::Payload("missing 'current_weather'".to_string()))?;
        let temperature = current.temperature.ok_or_else(|| {
            FetchError::Payload("missing 'current_weather.temperature'".to_string())
        })?;

        let description = current
            .weathercode
            .map(describe_weather_code)
            .unwrap_or(UNKNOWN_CONDITIONS);

        Ok(WeatherRecord {
            city: self.config.city.clone(),
            temperature: round_temperature(temperature),
            feels_like: None,
            description: description.to_string(),
        })
    }
}

/// Nearest whole degree, halves rounded away from zero.
fn round_temperature(value: f64) -> i64 {
    value.round() as i64
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
