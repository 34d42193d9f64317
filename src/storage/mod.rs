// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer (local keyed JSON records).

pub mod json_file;

pub use json_file::JsonFileStorage;

/// Record keys as constants.
pub mod keys {
    pub const USER: &str = "user";
    pub const ONBOARDING_COMPLETE: &str = "onboardingComplete";
    pub const REDEEMED_CODES: &str = "redeemedCodes";
}
