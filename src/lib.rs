// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Airpath: a personal air-quality companion.
//!
//! This crate owns the user-state and credit-economy engine: the user
//! profile, onboarding status, the daily-refreshing air-credit balance,
//! promo-code redemption, and saved-route bookkeeping, all persisted as
//! local keyed JSON records. Air-quality, weather, and geolocation data
//! come from narrow provider clients in [`services`].

pub mod config;
pub mod error;
pub mod models;
pub mod promo;
pub mod services;
pub mod storage;
pub mod time_utils;
