use std::time::Duration;

use anyhow::{bail, Result};
use passlock_core::config::AppConfig;
use passlock_core::settings::LockSettings;
use passlock_core::{LockPresenter, ManualClock, PresentationState, Secret, Timestamp};

use crate::console::ConsoleSurface;
use crate::script;
use crate::setup::open_store;

fn parse_secret(raw: &str) -> Secret {
    let Ok(secret) = raw.parse::<Secret>();
    secret
}

pub fn set_secret(config: &AppConfig, raw: String) -> Result<()> {
    let mut store = open_store(config)?;
    let mut settings = LockSettings::new(&mut store, config.lock.secret_length);
    settings.set_secret(&parse_secret(&raw))?;
    println!("Secret set");
    Ok(())
}

pub fn clear_secret(config: &AppConfig) -> Result<()> {
    let mut store = open_store(config)?;
    LockSettings::new(&mut store, config.lock.secret_length).remove_secret()?;
    println!("Secret cleared");
    Ok(())
}

pub fn set_expiry(config: &AppConfig, seconds: f64) -> Result<()> {
    let Ok(duration) = Duration::try_from_secs_f64(seconds) else {
        bail!("expiry must be a non-negative number of seconds, got {seconds}");
    };
    let mut store = open_store(config)?;
    LockSettings::new(&mut store, config.lock.secret_length).set_expiry(duration)?;
    println!("Expiry set to {seconds}s");
    Ok(())
}

pub fn clear_expiry(config: &AppConfig) -> Result<()> {
    let mut store = open_store(config)?;
    LockSettings::new(&mut store, config.lock.secret_length).disable_expiry()?;
    println!("Expiry cleared");
    Ok(())
}

/// Returns whether the candidate was accepted.
pub fn verify(config: &AppConfig, raw: String) -> Result<bool> {
    let mut store = open_store(config)?;
    let settings = LockSettings::new(&mut store, config.lock.secret_length);
    let accepted = settings.verify(&parse_secret(&raw));
    println!("{}", if accepted { "accepted" } else { "rejected" });
    Ok(accepted)
}

pub fn status(config: &AppConfig) -> Result<()> {
    let mut store = open_store(config)?;
    let status = LockSettings::new(&mut store, config.lock.secret_length).status();
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

/// Replay `raw_script` against the configured store and return the final state.
pub fn simulate(config: &AppConfig, raw_script: String) -> Result<PresentationState> {
    let steps = script::parse(&raw_script)?;
    let store = open_store(config)?;
    let clock = ManualClock::new(Timestamp(0.0));
    let mut presenter = LockPresenter::new(store, ConsoleSurface::new(), clock)
        .with_cover_transition(config.lock.cover_transition);

    for step in steps {
        presenter.clock().set(step.at);
        let state = presenter.handle(step.event);
        println!("{}@{} -> {state}", step.event, step.at);
        for action in presenter.surface_mut().drain_log() {
            println!("  {action}");
        }
    }
    Ok(presenter.state())
}
