// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User state store — the single owner of profile, onboarding status,
//! credit balance, and redeemed promo codes.
//!
//! Handles:
//! - Lazy profile creation with default seeding
//! - The daily credit refresh rule (local-calendar-date based)
//! - Credit spending and promo redemption (atomic per mutation)
//! - Saved-route bookkeeping
//! - Write-through persistence of all three records on every mutation
//!
//! Single logical writer: every mutation is one synchronous step behind
//! `&mut self`, so no interleaving can observe a half-applied change.

use crate::models::{
    Location, ProfileUpdate, RouteDraft, SavedRoute, UserProfile, DAILY_CREDITS,
};
use crate::promo::PromoCatalog;
use crate::storage::{keys, JsonFileStorage};
use crate::time_utils::{same_local_day, Clock};
use std::sync::Arc;

/// Credits consumed by one pollution-aware route search.
pub const ROUTE_SEARCH_COST: u32 = 12;

/// Result of a promo-code redemption attempt. Failures are ordinary
/// values; the caller decides how to present the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemOutcome {
    pub success: bool,
    pub message: String,
    /// Granted amount, present only on success
    pub credits: Option<u32>,
}

impl RedeemOutcome {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            credits: None,
        }
    }

    fn granted(credits: u32) -> Self {
        Self {
            success: true,
            message: format!("Successfully redeemed {} air credits!", credits),
            credits: Some(credits),
        }
    }
}

/// The user-state and credit-economy engine.
pub struct UserStore {
    storage: JsonFileStorage,
    catalog: PromoCatalog,
    clock: Arc<dyn Clock>,
    profile: Option<UserProfile>,
    onboarding_complete: bool,
    redeemed_codes: Vec<String>,
    persist_failures: u64,
}

impl UserStore {
    /// Load persisted state and reconcile it: a profile whose last credit
    /// refresh happened on an earlier local calendar date gets its balance
    /// reset to the daily allowance before anything can read it.
    pub fn load(storage: JsonFileStorage, catalog: PromoCatalog, clock: Arc<dyn Clock>) -> Self {
        let mut store = Self {
            profile: storage.get(keys::USER),
            onboarding_complete: storage.get(keys::ONBOARDING_COMPLETE).unwrap_or(false),
            redeemed_codes: storage.get(keys::REDEEMED_CODES).unwrap_or_default(),
            storage,
            catalog,
            clock,
            persist_failures: 0,
        };

        if store.refresh_credits_if_needed() {
            store.persist();
        }

        store
    }

    /// Apply the daily-refresh rule. Pure in (profile, now); returns
    /// whether the balance was reset.
    fn refresh_credits_if_needed(&mut self) -> bool {
        let now = self.clock.now();
        let Some(profile) = self.profile.as_mut() else {
            return false;
        };

        if same_local_day(profile.last_credit_refresh, now) {
            return false;
        }

        tracing::info!(
            previous_balance = profile.air_credits,
            "New calendar day, refreshing air credits"
        );
        profile.air_credits = DAILY_CREDITS;
        profile.last_credit_refresh = now;
        true
    }

    /// Write all three records through to storage. Failures are logged
    /// and counted but never roll back in-memory state; the session keeps
    /// running on the authoritative in-memory copy.
    fn persist(&mut self) {
        let mut result = Ok(());

        if let Some(profile) = &self.profile {
            result = result.and(self.storage.set(keys::USER, profile));
        }
        result = result.and(
            self.storage
                .set(keys::ONBOARDING_COMPLETE, &self.onboarding_complete),
        );
        result = result.and(self.storage.set(keys::REDEEMED_CODES, &self.redeemed_codes));

        if let Err(e) = result {
            self.persist_failures += 1;
            tracing::warn!(error = %e, failures = self.persist_failures, "Persistence write failed");
        }
    }

    // ─── Read Accessors ──────────────────────────────────────────

    /// The current profile, absent before onboarding starts.
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn is_onboarding_complete(&self) -> bool {
        self.onboarding_complete
    }

    /// Uppercase-normalized codes already consumed by this installation.
    pub fn redeemed_codes(&self) -> &[String] {
        &self.redeemed_codes
    }

    /// Spendable balance, 0 when no profile exists.
    pub fn available_credits(&self) -> u32 {
        self.profile.as_ref().map_or(0, |p| p.air_credits)
    }

    /// Durable writes that have failed this session. In-memory state is
    /// still live after a failure; this is the observable signal.
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Merge the supplied fields into the profile, creating a defaulted
    /// one first if none exists yet.
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        let profile = self.profile.get_or_insert_with(|| {
            let id = uuid::Uuid::new_v4().to_string();
            tracing::info!(profile_id = %id, "Creating new user profile");
            UserProfile::new(id, self.clock.now())
        });

        profile.apply_update(update);
        self.persist();
    }

    /// Set the home location (shorthand for a one-field update).
    pub fn set_home_location(&mut self, location: Location) {
        self.update_profile(ProfileUpdate {
            home_location: Some(location),
            ..Default::default()
        });
    }

    pub fn complete_onboarding(&mut self) {
        self.onboarding_complete = true;
        self.persist();
    }

    pub fn reset_onboarding_flag(&mut self) {
        self.onboarding_complete = false;
        self.persist();
    }

    /// Destroy all user state, in memory and in storage, returning the
    /// system to its pre-onboarding defaults. Idempotent.
    pub fn reset_all(&mut self) {
        self.profile = None;
        self.onboarding_complete = false;
        self.redeemed_codes.clear();

        for key in [keys::USER, keys::ONBOARDING_COMPLETE, keys::REDEEMED_CODES] {
            if let Err(e) = self.storage.remove(key) {
                self.persist_failures += 1;
                tracing::warn!(key, error = %e, "Failed to remove record during reset");
            }
        }

        tracing::info!("User state reset");
    }

    // ─── Route Operations ────────────────────────────────────────

    /// Assign a fresh id to the route and append it to the profile's
    /// preferred routes. Returns the id, or `None` when no profile exists
    /// (saving a route never creates one).
    pub fn save_route(&mut self, draft: RouteDraft) -> Option<String> {
        let profile = self.profile.as_ref()?;

        let id = uuid::Uuid::new_v4().to_string();
        let mut routes = profile.preferred_routes.clone();
        routes.push(draft.into_saved(id.clone()));
        self.update_profile(ProfileUpdate {
            preferred_routes: Some(routes),
            ..Default::default()
        });

        Some(id)
    }

    /// Remove the route with the given id. No-op when there is no match
    /// or no profile.
    pub fn delete_route(&mut self, route_id: &str) {
        let Some(profile) = self.profile.as_ref() else {
            return;
        };
        if !profile.preferred_routes.iter().any(|r| r.id == route_id) {
            return;
        }

        let routes: Vec<SavedRoute> = profile
            .preferred_routes
            .iter()
            .filter(|r| r.id != route_id)
            .cloned()
            .collect();
        self.update_profile(ProfileUpdate {
            preferred_routes: Some(routes),
            ..Default::default()
        });
    }

    // ─── Credit Operations ───────────────────────────────────────

    /// Check-and-decrement in one step. Returns `false`, leaving the
    /// balance untouched, on insufficient funds or missing profile.
    pub fn spend_credits(&mut self, amount: u32) -> bool {
        let Some(profile) = self.profile.as_mut() else {
            return false;
        };
        if profile.air_credits < amount {
            tracing::debug!(
                requested = amount,
                available = profile.air_credits,
                "Credit spend rejected"
            );
            return false;
        }

        profile.air_credits -= amount;
        self.persist();
        true
    }

    /// Attempt to redeem a promo code. The balance increment and the
    /// redeemed-set entry are applied together, then persisted once, so
    /// no partially applied redemption can ever be observed.
    pub fn redeem_promo_code(&mut self, code: &str) -> RedeemOutcome {
        let normalized = code.to_uppercase();

        let Some(profile) = self.profile.as_mut() else {
            return RedeemOutcome::failure("Please set up a profile to redeem promo codes");
        };

        if self.redeemed_codes.contains(&normalized) {
            return RedeemOutcome::failure("This promo code has already been redeemed");
        }

        let Some(entry) = self.catalog.lookup(&normalized) else {
            return RedeemOutcome::failure("Invalid or inactive promo code");
        };
        let credits = entry.credits;

        profile.air_credits += credits;
        self.redeemed_codes.push(normalized.clone());
        self.persist();

        tracing::info!(code = %normalized, credits, "Promo code redeemed");
        RedeemOutcome::granted(credits)
    }
}
