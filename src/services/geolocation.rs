// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coarse IP-based geolocation.
//!
//! Used to suggest a home location during onboarding. Failures surface as
//! provider errors; the store takes no action on them.

use crate::error::AppError;
use crate::models::Location;
use serde::Deserialize;

const GEOLOCATION_BASE_URL: &str = "http://ip-api.com";

/// ip-api.com client.
#[derive(Clone)]
pub struct GeolocationClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for GeolocationClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeolocationClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: GEOLOCATION_BASE_URL.to_string(),
        }
    }

    /// Client pointed at an alternate endpoint (used by tests).
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Approximate current position from the caller's public IP.
    pub async fn current_position(&self) -> Result<Location, AppError> {
        let url = format!("{}/json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("fields", "status,message,lat,lon")])
            .send()
            .await
            .map_err(|e| AppError::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Provider(format!(
                "Geolocation provider returned status {}",
                status
            )));
        }

        let body: GeolocationResponse = response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to decode response: {}", e)))?;

        match body {
            GeolocationResponse {
                status,
                lat: Some(lat),
                lon: Some(lon),
                ..
            } if status == "success" => Ok(Location { lat, lng: lon }),
            GeolocationResponse { message, .. } => Err(AppError::Provider(format!(
                "Geolocation lookup failed: {}",
                message.unwrap_or_else(|| "no position available".to_string())
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeolocationResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}
