// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather provider client (OpenWeatherMap current conditions).
//!
//! A "city not found" answer is user-correctable and kept apart from
//! credential, configuration and availability failures.

use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::time::Duration;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Weather provider failures.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Weather API key rejected by provider")]
    InvalidCredentials,

    #[error("Weather API key is not configured")]
    NotConfigured,

    #[error("Weather provider unavailable: {0}")]
    Unavailable(String),
}

/// Weather provider API client.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    units: String,
}

impl WeatherClient {
    /// Create a client against `base_url` (e.g. `https://api.openweathermap.org/data/2.5`).
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        units: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| WeatherError::Unavailable(format!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            units: units.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        Self::new(
            config.weather_api_url.clone(),
            config.weather_api_key.clone(),
            config.weather_units.clone(),
        )
    }

    /// Whether an API key is available for lookups.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch current conditions for a city name.
    pub async fn current(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::NotConfigured)?;
        let url = format!("{}/weather", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", api_key), ("units", self.units.as_str())])
            .send()
            .await
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                404 => WeatherError::CityNotFound(city.to_string()),
                401 => {
                    tracing::error!("Weather provider rejected API key (401)");
                    WeatherError::InvalidCredentials
                }
                _ => WeatherError::Unavailable(format!("HTTP {}: {}", status, body)),
            });
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::Unavailable(format!("JSON parse error: {}", e)))
    }
}

/// Current-weather response from the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    /// Canonical city name
    pub name: String,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub wind: Wind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    /// Condition group, e.g. "Clear", "Clouds", "Rain"
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

/// Weather summary returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeatherReport {
    pub name: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub condition: String,
    pub description: String,
}

impl From<CurrentWeather> for WeatherReport {
    fn from(current: CurrentWeather) -> Self {
        let (condition, description) = current
            .weather
            .into_iter()
            .next()
            .map(|c| (c.main, c.description))
            .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

        Self {
            name: current.name,
            temperature: current.main.temp,
            feels_like: current.main.feels_like,
            humidity: current.main.humidity,
            wind_speed: current.wind.speed,
            condition,
            description,
        }
    }
}
