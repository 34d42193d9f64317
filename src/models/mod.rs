// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod air;
pub mod user;

pub use air::{AirQualityData, WeatherData};
pub use user::{
    Location, ProfileUpdate, RouteDraft, SavedRoute, SensitivityLevel, UserProfile, DAILY_CREDITS,
};
