// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile and saved-route models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Credits granted on profile creation and by the daily refresh.
pub const DAILY_CREDITS: u32 = 24;

/// Air-quality sensitivity, set during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensitivityLevel {
    Low,
    #[default]
    Medium,
    High,
}

/// A geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// A saved travel route. The endpoints are the store's concern; everything
/// the routing collaborator computed rides along as opaque payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRoute {
    /// Assigned by the store at save time, never by the caller
    pub id: String,
    pub start: Location,
    pub end: Location,
    /// Estimated travel time, when the routing collaborator provided one
    pub duration_minutes: Option<u32>,
    /// Routing-collaborator payload, stored verbatim
    #[serde(default)]
    pub details: serde_json::Value,
}

/// A route as produced by the routing collaborator, before the store has
/// assigned it an identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDraft {
    pub start: Location,
    pub end: Location,
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub details: serde_json::Value,
}

impl RouteDraft {
    pub(crate) fn into_saved(self, id: String) -> SavedRoute {
        SavedRoute {
            id,
            start: self.start,
            end: self.end,
            duration_minutes: self.duration_minutes,
            details: self.details,
        }
    }
}

/// User profile, one per installation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Generated once at creation, immutable
    pub id: String,
    /// Empty until onboarding sets it
    #[serde(default)]
    pub name: String,
    pub age: Option<u32>,
    #[serde(default)]
    pub has_respiratory_issues: bool,
    #[serde(default)]
    pub sensitivity_level: SensitivityLevel,
    pub home_location: Option<Location>,
    /// Insertion order is display order
    #[serde(default)]
    pub preferred_routes: Vec<SavedRoute>,
    /// Spendable balance; refreshed to [`DAILY_CREDITS`] each calendar day
    pub air_credits: u32,
    /// When the daily grant was last applied
    pub last_credit_refresh: DateTime<Utc>,
}

impl UserProfile {
    /// A fresh profile seeded with the daily credit allowance.
    pub fn new(id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: String::new(),
            age: None,
            has_respiratory_issues: false,
            sensitivity_level: SensitivityLevel::default(),
            home_location: None,
            preferred_routes: Vec::new(),
            air_credits: DAILY_CREDITS,
            last_credit_refresh: now,
        }
    }

    /// Overlay the supplied fields onto this profile. Fields absent from
    /// the update are left untouched; `id` is never replaced.
    pub fn apply_update(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(flag) = update.has_respiratory_issues {
            self.has_respiratory_issues = flag;
        }
        if let Some(level) = update.sensitivity_level {
            self.sensitivity_level = level;
        }
        if let Some(location) = update.home_location {
            self.home_location = Some(location);
        }
        if let Some(routes) = update.preferred_routes {
            self.preferred_routes = routes;
        }
    }
}

/// A partial profile update. Only supplied fields are merged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    #[validate(range(min = 1, max = 130))]
    pub age: Option<u32>,
    pub has_respiratory_issues: Option<bool>,
    pub sensitivity_level: Option<SensitivityLevel>,
    #[validate(custom(function = validate_location))]
    pub home_location: Option<Location>,
    pub preferred_routes: Option<Vec<SavedRoute>>,
}

fn validate_location(location: &Location) -> Result<(), validator::ValidationError> {
    if !(-90.0..=90.0).contains(&location.lat) || !(-180.0..=180.0).contains(&location.lng) {
        return Err(validator::ValidationError::new("out_of_range_coordinate"));
    }
    Ok(())
}
