// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use airpath::models::ProfileUpdate;
use airpath::promo::PromoCatalog;
use airpath::services::UserStore;
use airpath::storage::JsonFileStorage;
use airpath::time_utils::{Clock, SystemClock};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A clock frozen at a chosen instant, for deterministic day-rollover
/// tests.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A store over fresh in-memory storage and the wall clock.
#[allow(dead_code)]
pub fn fresh_store() -> UserStore {
    UserStore::load(
        JsonFileStorage::new_in_memory(),
        PromoCatalog::builtin(),
        Arc::new(SystemClock),
    )
}

/// A store with one profile already created (named "Ann", default seed).
#[allow(dead_code)]
pub fn store_with_profile() -> UserStore {
    let mut store = fresh_store();
    store.update_profile(ProfileUpdate {
        name: Some("Ann".to_string()),
        ..Default::default()
    });
    store
}

/// Load a store over existing storage with an arbitrary clock.
#[allow(dead_code)]
pub fn load_store(storage: JsonFileStorage, clock: impl Clock + 'static) -> UserStore {
    UserStore::load(storage, PromoCatalog::builtin(), Arc::new(clock))
}
