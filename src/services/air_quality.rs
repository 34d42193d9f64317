// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Open-Meteo client for air-quality and weather readings.
//!
//! The core never acts on these readings; the client exists so the
//! presentation layer can show conditions for the stored home location.

use crate::error::AppError;
use crate::models::{AirQualityData, Location, WeatherData};
use serde::Deserialize;

const AIR_QUALITY_BASE_URL: &str = "https://air-quality-api.open-meteo.com/v1";
const WEATHER_BASE_URL: &str = "https://api.open-meteo.com/v1";

/// Open-Meteo API client.
#[derive(Clone)]
pub struct AirQualityClient {
    http: reqwest::Client,
    air_base_url: String,
    weather_base_url: String,
}

impl Default for AirQualityClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AirQualityClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            air_base_url: AIR_QUALITY_BASE_URL.to_string(),
            weather_base_url: WEATHER_BASE_URL.to_string(),
        }
    }

    /// Client pointed at alternate endpoints (used by tests).
    pub fn with_base_urls(air_base_url: String, weather_base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            air_base_url,
            weather_base_url,
        }
    }

    /// Current air quality at a coordinate.
    pub async fn fetch_air_quality(&self, location: Location) -> Result<AirQualityData, AppError> {
        let url = format!("{}/air-quality", self.air_base_url);
        let response: AirQualityResponse = self
            .get_json(
                &url,
                location,
                "european_aqi,pm2_5,pm10,nitrogen_dioxide,ozone",
            )
            .await?;

        Ok(AirQualityData {
            european_aqi: response.current.european_aqi,
            pm2_5: response.current.pm2_5,
            pm10: response.current.pm10,
            nitrogen_dioxide: response.current.nitrogen_dioxide,
            ozone: response.current.ozone,
        })
    }

    /// Current weather at a coordinate.
    pub async fn fetch_weather(&self, location: Location) -> Result<WeatherData, AppError> {
        let url = format!("{}/forecast", self.weather_base_url);
        let response: WeatherResponse = self
            .get_json(
                &url,
                location,
                "temperature_2m,relative_humidity_2m,wind_speed_10m",
            )
            .await?;

        Ok(WeatherData {
            temperature_c: response.current.temperature_2m,
            relative_humidity: response.current.relative_humidity_2m,
            wind_speed_kmh: response.current.wind_speed_10m,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        location: Location,
        current_fields: &str,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .query(&[
                ("latitude", location.lat.to_string()),
                ("longitude", location.lng.to_string()),
                ("current", current_fields.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "Open-Meteo returned status {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to decode response: {}", e)))
    }
}

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    current: AirQualityCurrent,
}

#[derive(Debug, Deserialize)]
struct AirQualityCurrent {
    european_aqi: Option<f64>,
    pm2_5: Option<f64>,
    pm10: Option<f64>,
    nitrogen_dioxide: Option<f64>,
    ozone: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    current: WeatherCurrent,
}

#[derive(Debug, Deserialize)]
struct WeatherCurrent {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    wind_speed_10m: Option<f64>,
}
