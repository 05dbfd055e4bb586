//! ludoteca-tui - Terminal admin for a board-game lending library
//!
//! This is the main entry point for the ludoteca-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod cli;
mod component;
mod components;
mod config;
mod error;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::cli::Cli;
use crate::component::Component;
use crate::config::Config;
use crate::services::{HttpBackend, LudotecaApi};
use crate::tui::{Tui, TuiEvent};
use anyhow::Result;
use clap::Parser;
use std::env;
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config: file, then environment, then flags
    let mut warnings = Vec::new();
    let config_path = cli.config.clone().or_else(Config::default_path);
    let mut config = match &config_path {
        Some(path) => match Config::load_from(path) {
            Ok(Some(config)) => config,
            Ok(None) => {
                let config = Config::default();
                if let Err(e) = config.save_to(path) {
                    warnings.push(format!("Could not write default config: {}", e));
                }
                config
            }
            Err(e) => {
                warnings.push(format!("{}; using defaults", e));
                Config::default()
            }
        },
        None => Config::default(),
    };
    config.apply_env();
    config.apply_cli(&cli);

    let log_dir = Config::config_dir().unwrap_or_else(env::temp_dir);
    let log_guard = logging::init(&log_dir, &config.log_level)?;
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }
    tracing::info!(backend = %config.backend_url, "starting ludoteca-tui");

    let backend = HttpBackend::new(&config.backend_url, config.request_timeout())?;
    let api: Arc<dyn LudotecaApi> = Arc::new(backend);

    // Setup terminal
    let mut tui = Tui::new(Duration::from_millis(100))?;
    tui.enter()?;

    // Create app state
    let mut app = App::new(&config, api);
    app.init()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!(error = ?err, "application error");
        // exit() runs no destructors; flush the log writer first
        drop(log_guard);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    tracing::info!("bye");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        let mut action = match tui.next_event()? {
            TuiEvent::Key(key) => app.handle_key_event(key)?,
            TuiEvent::Resize(w, h) => Some(Action::Resize(w, h)),
            TuiEvent::Tick => Some(Action::Tick),
        };

        // An action may produce a follow-up action
        while let Some(a) = action {
            action = app.update(a)?;
        }
    }

    Ok(())
}
