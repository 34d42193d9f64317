// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Airpath CLI
//!
//! Thin presentation shell over the user-state engine: shows the profile
//! and credit balance, redeems promo codes, spends credits on route
//! searches, and manages saved routes.

use airpath::{
    config::Config,
    error::AppError,
    models::{Location, ProfileUpdate, RouteDraft},
    promo::PromoCatalog,
    services::{AirQualityClient, GeolocationClient, UserStore, ROUTE_SEARCH_COST},
    storage::JsonFileStorage,
    time_utils::{format_utc_rfc3339, Clock, SystemClock},
};
use chrono::{Duration, Local};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(data_dir = %config.data_dir.display(), "Starting Airpath");

    let storage = JsonFileStorage::open(&config.data_dir)?;
    let clock = Arc::new(SystemClock);
    let mut store = UserStore::load(storage, PromoCatalog::builtin(), clock.clone());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("status");

    match command {
        "status" => print_status(&store, clock.as_ref()),
        "set-name" => {
            let name = args.get(1).ok_or("usage: airpath set-name <name>")?;
            let update = ProfileUpdate {
                name: Some(name.clone()),
                ..Default::default()
            };
            update
                .validate()
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            store.update_profile(update);
            println!("Name set to {}", name);
        }
        "locate" => {
            let location = GeolocationClient::new().current_position().await?;
            let update = ProfileUpdate {
                home_location: Some(location),
                ..Default::default()
            };
            update
                .validate()
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            store.update_profile(update);
            println!("Home location set to {:.4}, {:.4}", location.lat, location.lng);
        }
        "air" => {
            let Some(home) = store.profile().and_then(|p| p.home_location) else {
                println!("No home location set. Run `airpath locate` first.");
                return Ok(());
            };
            print_conditions(&config, home).await?;
        }
        "redeem" => {
            let code = args.get(1).ok_or("usage: airpath redeem <code>")?;
            let outcome = store.redeem_promo_code(code);
            println!("{}", outcome.message);
        }
        "spend" => {
            let amount: u32 = args
                .get(1)
                .map(|raw| raw.parse())
                .transpose()?
                .unwrap_or(ROUTE_SEARCH_COST);
            if store.spend_credits(amount) {
                println!(
                    "Spent {} credits; {} remaining",
                    amount,
                    store.available_credits()
                );
            } else {
                println!(
                    "Insufficient credits: need {}, have {}",
                    amount,
                    store.available_credits()
                );
            }
        }
        "save-route" => {
            let coords: Vec<f64> = args[1..]
                .iter()
                .map(|raw| raw.parse())
                .collect::<Result<_, _>>()
                .map_err(|_| "usage: airpath save-route <start-lat> <start-lng> <end-lat> <end-lng>")?;
            let &[start_lat, start_lng, end_lat, end_lng] = coords.as_slice() else {
                return Err("usage: airpath save-route <start-lat> <start-lng> <end-lat> <end-lng>".into());
            };
            let draft = RouteDraft {
                start: Location {
                    lat: start_lat,
                    lng: start_lng,
                },
                end: Location {
                    lat: end_lat,
                    lng: end_lng,
                },
                duration_minutes: None,
                details: serde_json::Value::Null,
            };
            match store.save_route(draft) {
                Some(id) => println!("Route saved with id {}", id),
                None => println!("No profile yet; run `airpath set-name <name>` first."),
            }
        }
        "delete-route" => {
            let id = args.get(1).ok_or("usage: airpath delete-route <id>")?;
            store.delete_route(id);
            println!("Done");
        }
        "routes" => {
            let routes = store
                .profile()
                .map(|p| p.preferred_routes.as_slice())
                .unwrap_or_default();
            if routes.is_empty() {
                println!("No saved routes");
            }
            for route in routes {
                println!(
                    "{}  {:.4},{:.4} -> {:.4},{:.4}{}",
                    route.id,
                    route.start.lat,
                    route.start.lng,
                    route.end.lat,
                    route.end.lng,
                    route
                        .duration_minutes
                        .map(|m| format!("  ({} min)", m))
                        .unwrap_or_default()
                );
            }
        }
        "onboard-done" => {
            store.complete_onboarding();
            println!("Onboarding marked complete");
        }
        "reset" => {
            store.reset_all();
            println!("All user state cleared");
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!(
                "Commands: status, set-name, locate, air, redeem, spend, \
                 save-route, delete-route, routes, onboard-done, reset"
            );
            std::process::exit(2);
        }
    }

    Ok(())
}

fn print_status(store: &UserStore, clock: &dyn Clock) {
    match store.profile() {
        Some(profile) => {
            let name = if profile.name.is_empty() {
                "(unnamed)"
            } else {
                &profile.name
            };
            println!("Profile:    {} [{}]", name, profile.id);
            println!("Credits:    {}", profile.air_credits);
            println!(
                "Last grant: {}",
                format_utc_rfc3339(profile.last_credit_refresh)
            );
            println!("Refreshes:  in {}", time_until_refresh(clock));
            println!(
                "Onboarding: {}",
                if store.is_onboarding_complete() {
                    "complete"
                } else {
                    "pending"
                }
            );
            match profile.home_location {
                Some(home) => println!("Home:       {:.4}, {:.4}", home.lat, home.lng),
                None => println!("Home:       not set"),
            }
            println!("Routes:     {}", profile.preferred_routes.len());
        }
        None => println!("No profile yet. Run `airpath set-name <name>` to get started."),
    }
}

/// Time remaining until the next local midnight, when the daily credit
/// grant becomes applicable.
fn time_until_refresh(clock: &dyn Clock) -> String {
    let now = clock.now().with_timezone(&Local);
    let midnight = (now + Duration::days(1))
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time");
    let remaining = midnight - now.naive_local();
    format!(
        "{}h {}m",
        remaining.num_hours(),
        remaining.num_minutes() % 60
    )
}

async fn print_conditions(
    config: &Config,
    home: Location,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = match (&config.air_quality_base_url, &config.weather_base_url) {
        (Some(air), Some(weather)) => {
            AirQualityClient::with_base_urls(air.clone(), weather.clone())
        }
        _ => AirQualityClient::new(),
    };

    let air = match client.fetch_air_quality(home).await {
        Ok(air) => air,
        Err(e) if e.is_transient_provider_error() => {
            tracing::warn!(error = %e, "Transient provider failure, retrying once");
            client.fetch_air_quality(home).await?
        }
        Err(e) => return Err(e.into()),
    };
    println!(
        "Air quality: {} (EAQI {})",
        air.category(),
        air.european_aqi
            .map(|v| v.round().to_string())
            .unwrap_or_else(|| "n/a".to_string())
    );
    if let Some(pm) = air.pm2_5 {
        println!("PM2.5:       {:.1} µg/m³", pm);
    }

    let weather = client.fetch_weather(home).await?;
    if let Some(temp) = weather.temperature_c {
        println!("Temperature: {:.1} °C", temp);
    }
    if let Some(wind) = weather.wind_speed_kmh {
        println!("Wind:        {:.1} km/h", wind);
    }

    Ok(())
}

/// Initialize logging with env-filter control.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("airpath=info".parse().expect("static directive parses")),
        )
        .with(format)
        .init();
}
