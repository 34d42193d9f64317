// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use airpath::models::DAILY_CREDITS;

mod common;
use common::{fresh_store, store_with_profile};

#[test]
fn test_redeem_requires_profile() {
    let mut store = fresh_store();

    let outcome = store.redeem_promo_code("WELCOME50");
    assert!(!outcome.success);
    assert!(outcome.message.contains("profile"));
    assert!(store.redeemed_codes().is_empty());
    assert!(store.profile().is_none(), "Redemption must not create a profile");
}

#[test]
fn test_redeem_known_code_credits_and_records() {
    let mut store = store_with_profile();

    let outcome = store.redeem_promo_code("welcome50");
    assert!(outcome.success);
    assert_eq!(outcome.credits, Some(50));
    assert_eq!(store.available_credits(), DAILY_CREDITS + 50);
    assert_eq!(store.redeemed_codes(), ["WELCOME50"]);
}

#[test]
fn test_second_redemption_fails_and_balance_unaffected() {
    let mut store = store_with_profile();
    store.redeem_promo_code("WELCOME50");
    let balance = store.available_credits();

    // Any casing of the same code counts as already redeemed
    for attempt in ["WELCOME50", "welcome50", "Welcome50"] {
        let outcome = store.redeem_promo_code(attempt);
        assert!(!outcome.success, "{} should be rejected", attempt);
        assert!(outcome.message.contains("already been redeemed"));
        assert_eq!(outcome.credits, None);
    }

    assert_eq!(store.available_credits(), balance);
    assert_eq!(store.redeemed_codes().len(), 1);
}

#[test]
fn test_unknown_and_inactive_codes_change_nothing() {
    let mut store = store_with_profile();

    for code in ["NOSUCHCODE", "SUMMER2024"] {
        let outcome = store.redeem_promo_code(code);
        assert!(!outcome.success, "{} should be rejected", code);
        assert!(outcome.message.contains("Invalid or inactive"));
    }

    assert_eq!(store.available_credits(), DAILY_CREDITS);
    assert!(
        store.redeemed_codes().is_empty(),
        "Failed redemptions must not touch the redeemed set"
    );
}

#[test]
fn test_distinct_codes_stack() {
    let mut store = store_with_profile();

    assert!(store.redeem_promo_code("WELCOME50").success);
    assert!(store.redeem_promo_code("CLEANAIR100").success);
    assert!(store.redeem_promo_code("FIRST25").success);

    assert_eq!(store.available_credits(), DAILY_CREDITS + 175);
    assert_eq!(
        store.redeemed_codes(),
        ["WELCOME50", "CLEANAIR100", "FIRST25"]
    );
}

// Scenario from the product walkthrough: fresh install, welcome bonus,
// one route search, duplicate redemption attempt.
#[test]
fn test_fresh_install_walkthrough() {
    let mut store = store_with_profile();
    let profile = store.profile().expect("profile exists");
    assert_eq!(profile.name, "Ann");
    assert_eq!(profile.air_credits, 24);

    let outcome = store.redeem_promo_code("welcome50");
    assert!(outcome.success);
    assert_eq!(store.available_credits(), 74);
    assert_eq!(store.redeemed_codes(), ["WELCOME50"]);

    assert!(store.spend_credits(12));
    assert_eq!(store.available_credits(), 62);

    let outcome = store.redeem_promo_code("WELCOME50");
    assert!(!outcome.success);
    assert_eq!(store.available_credits(), 62);

    store.reset_all();
    assert!(store.profile().is_none());
    assert!(!store.is_onboarding_complete());
    assert!(store.redeemed_codes().is_empty());
}
