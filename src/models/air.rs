// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Air-quality and weather readings as returned by the providers.
//!
//! The core never acts on these values; they are decoded here so the
//! presentation layer gets typed data rather than raw JSON.

use serde::{Deserialize, Serialize};

/// A point-in-time air-quality reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityData {
    /// European AQI (1 = good, higher is worse)
    pub european_aqi: Option<f64>,
    /// Fine particulate matter, µg/m³
    pub pm2_5: Option<f64>,
    /// Coarse particulate matter, µg/m³
    pub pm10: Option<f64>,
    /// NO₂, µg/m³
    pub nitrogen_dioxide: Option<f64>,
    /// O₃, µg/m³
    pub ozone: Option<f64>,
}

impl AirQualityData {
    /// Coarse banding of the European AQI for display.
    pub fn category(&self) -> &'static str {
        match self.european_aqi {
            Some(aqi) if aqi <= 20.0 => "good",
            Some(aqi) if aqi <= 40.0 => "fair",
            Some(aqi) if aqi <= 60.0 => "moderate",
            Some(aqi) if aqi <= 80.0 => "poor",
            Some(aqi) if aqi <= 100.0 => "very poor",
            Some(_) => "extremely poor",
            None => "unknown",
        }
    }
}

/// A point-in-time weather reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    /// Air temperature at 2m, °C
    pub temperature_c: Option<f64>,
    /// Relative humidity at 2m, percent
    pub relative_humidity: Option<f64>,
    /// Wind speed at 10m, km/h
    pub wind_speed_kmh: Option<f64>,
}
