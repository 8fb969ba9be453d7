//! skycast - weather forecasts for any city in the terminal
//!
//! Looks up a city with the Open-Meteo geocoding API and shows current
//! conditions, a 7-day summary and an hourly strip, with temperature, wind
//! and precipitation units switchable at any time.

use std::io;
use std::panic;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use skycast::app::{build_clients, App};
use skycast::cache::CacheManager;
use skycast::cli::{Cli, OutputMode, StartupConfig};
use skycast::logging::{self, LogTarget};
use skycast::{forecast, report, ui};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Fetches one forecast and writes it to stdout as text or JSON
async fn print_forecast(config: &StartupConfig) -> Result<(), Box<dyn std::error::Error>> {
    let query = config.city.as_deref().unwrap_or_default();

    let (geocoder, weather_client) = build_clients(config.use_cache);

    let city = geocoder.lookup(query).await?;
    let raw = weather_client
        .fetch_forecast(city.latitude, city.longitude)
        .await?;
    let selected_day = forecast::clamp_day_index(config.selected_day, raw.day_count());
    let view = forecast::build(&raw, config.units, selected_day)?;

    let output = match config.output {
        OutputMode::Json => report::to_json(&city, &view)?,
        _ => report::to_text(&city, &view),
    };
    println!("{}", output);
    Ok(())
}

/// Runs the full-screen interface until the user quits
async fn run_interactive(config: &StartupConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    // Main event loop
    loop {
        // Render UI
        terminal.draw(|f| ui::render(f, &app))?;

        // Network work runs between frames so the loading state is visible
        if app.pending.is_some() {
            app.run_pending().await;
            continue;
        }

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    let log_target = match config.output {
        OutputMode::Interactive => CacheManager::new()
            .map(|cache| LogTarget::in_dir(cache.dir()))
            .unwrap_or(LogTarget::Disabled),
        _ => LogTarget::Stderr,
    };
    if let Err(e) = logging::init(log_target) {
        eprintln!("warning: logging disabled: {}", e);
    }

    let result = match config.output {
        OutputMode::Interactive => run_interactive(&config).await,
        _ => print_forecast(&config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
