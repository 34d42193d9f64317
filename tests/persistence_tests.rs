// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use airpath::models::{ProfileUpdate, SensitivityLevel, DAILY_CREDITS};
use airpath::storage::{keys, JsonFileStorage};
use airpath::time_utils::SystemClock;

mod common;
use common::load_store;

#[test]
fn test_every_mutation_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    {
        let storage = JsonFileStorage::open(dir.path()).unwrap();
        let mut store = load_store(storage, SystemClock);
        store.update_profile(ProfileUpdate {
            name: Some("Ann".to_string()),
            sensitivity_level: Some(SensitivityLevel::High),
            ..Default::default()
        });
        store.complete_onboarding();
        store.redeem_promo_code("FIRST25");
        store.spend_credits(10);
    }

    // Brand-new handle over the same directory: no shared cache
    let storage = JsonFileStorage::open(dir.path()).unwrap();
    let store = load_store(storage, SystemClock);

    let profile = store.profile().expect("profile persisted");
    assert_eq!(profile.name, "Ann");
    assert_eq!(profile.sensitivity_level, SensitivityLevel::High);
    assert_eq!(profile.air_credits, DAILY_CREDITS + 25 - 10);
    assert!(store.is_onboarding_complete());
    assert_eq!(store.redeemed_codes(), ["FIRST25"]);
}

#[test]
fn test_reset_all_clears_storage_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::open(dir.path()).unwrap();
    let mut store = load_store(storage, SystemClock);

    store.update_profile(ProfileUpdate {
        name: Some("Ann".to_string()),
        ..Default::default()
    });
    store.complete_onboarding();
    store.redeem_promo_code("WELCOME50");

    store.reset_all();
    store.reset_all(); // second reset is harmless

    assert!(store.profile().is_none());
    assert!(!store.is_onboarding_complete());
    assert!(store.redeemed_codes().is_empty());
    assert_eq!(store.available_credits(), 0);
    assert!(!dir.path().join("user.json").exists());

    // A reload sees the pre-onboarding defaults
    let store = load_store(JsonFileStorage::open(dir.path()).unwrap(), SystemClock);
    assert!(store.profile().is_none());
    assert!(!store.is_onboarding_complete());
    assert!(store.redeemed_codes().is_empty());
}

#[test]
fn test_corrupted_profile_record_loads_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("user.json"), "{\"id\": 12,,, garbage").unwrap();
    std::fs::write(dir.path().join("onboardingComplete.json"), "true").unwrap();

    let store = load_store(JsonFileStorage::open(dir.path()).unwrap(), SystemClock);

    assert!(store.profile().is_none(), "Corrupted record falls back to defaults");
    assert!(store.is_onboarding_complete(), "Intact records still load");
}

#[test]
fn test_incompatible_record_shape_loads_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    // Valid JSON, wrong shape for a profile
    std::fs::write(dir.path().join("user.json"), "[1, 2, 3]").unwrap();

    let store = load_store(JsonFileStorage::open(dir.path()).unwrap(), SystemClock);
    assert!(store.profile().is_none());
}

#[cfg(unix)]
#[test]
fn test_failed_write_keeps_memory_authoritative() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::open(dir.path()).unwrap();
    let mut store = load_store(storage, SystemClock);

    // Make the directory unwritable so every durable write fails
    fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o555)).unwrap();

    store.update_profile(ProfileUpdate {
        name: Some("Ann".to_string()),
        ..Default::default()
    });

    assert!(store.persist_failures() > 0, "Failed write must be observable");
    let profile = store.profile().expect("in-memory state stays live");
    assert_eq!(profile.name, "Ann");
    assert_eq!(store.available_credits(), DAILY_CREDITS);

    // Restore permissions so the tempdir can be cleaned up
    fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn test_redeemed_codes_record_matches_storage_layout() {
    // The on-disk layout is three independent keyed records
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::open(dir.path()).unwrap();
    let mut store = load_store(storage.clone(), SystemClock);

    store.update_profile(ProfileUpdate::default());
    store.redeem_promo_code("refer25");

    let codes: Vec<String> = storage.get(keys::REDEEMED_CODES).unwrap();
    assert_eq!(codes, ["REFER25"]);
    assert!(dir.path().join("redeemedCodes.json").exists());
    assert!(dir.path().join("onboardingComplete.json").exists());
}
