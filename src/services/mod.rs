// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic and provider clients.

pub mod air_quality;
pub mod geolocation;
pub mod user_store;

pub use air_quality::AirQualityClient;
pub use geolocation::GeolocationClient;
pub use user_store::{RedeemOutcome, UserStore, ROUTE_SEARCH_COST};
