//! Application state management for skycast
//!
//! Owns the one record of user choices (units, selected day, current city)
//! and the last fetched forecast. Every change to units or day rebuilds the
//! view model from the stored forecast; only a new search or an explicit
//! reload touches the network.

use crossterm::event::{KeyCode, KeyEvent};

use crate::cache::CacheManager;
use crate::cli::StartupConfig;
use crate::data::geocode::SUGGESTION_COUNT;
use crate::data::{CurrentCityInfo, GeocodingClient, RawForecast, WeatherClient};
use crate::forecast::{self, clamp_day_index, ForecastViewModel, MAX_FORECAST_DAYS};
use crate::units::{PrecipitationUnit, TemperatureUnit, UnitPreferences, WindUnit};

/// Application state enum representing the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Fetching a city or forecast
    Loading,
    /// Search bar focused
    Search,
    /// Forecast view
    Forecast,
}

/// Network work requested by a key press, run by the event loop
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    /// Geocode a typed name (first match) and load its forecast
    Search(String),
    /// Load the forecast for an already resolved city
    LoadCity(CurrentCityInfo),
    /// Fetch suggestions for the search bar
    Suggest(String),
    /// Re-fetch the forecast for the current city
    Reload,
}

/// Creates the API clients, sharing the platform cache when `use_cache` is set
pub fn build_clients(use_cache: bool) -> (GeocodingClient, WeatherClient) {
    let cache = if use_cache { CacheManager::new() } else { None };

    match cache {
        Some(cache) => (
            GeocodingClient::new().with_cache(cache.clone()),
            WeatherClient::new().with_cache(cache),
        ),
        None => (GeocodingClient::new(), WeatherClient::new()),
    }
}

/// Main application struct managing state and data
pub struct App {
    pub state: AppState,
    pub should_quit: bool,
    pub show_help: bool,
    /// Unit choices, changed only through the setters below
    pub units: UnitPreferences,
    /// Day shown in the hourly strip
    pub selected_day: usize,
    /// City the current forecast belongs to
    pub city: Option<CurrentCityInfo>,
    /// Last fetched forecast
    pub forecast: Option<RawForecast>,
    /// View model built from `forecast`, `units` and `selected_day`
    pub view: Option<ForecastViewModel>,
    pub search_input: String,
    pub suggestions: Vec<CurrentCityInfo>,
    /// Highlighted suggestion, if the user moved into the list
    pub selected_suggestion: Option<usize>,
    /// One-line message for the status bar (errors, hints)
    pub status: Option<String>,
    pub pending: Option<PendingAction>,
    geocoder: GeocodingClient,
    weather_client: WeatherClient,
}

impl App {
    /// Creates an App from the startup configuration, with caching clients
    /// unless caching was disabled
    pub fn new(config: &StartupConfig) -> Self {
        let (geocoder, weather_client) = build_clients(config.use_cache);

        let mut app = Self::with_clients(geocoder, weather_client);
        app.units = config.units;
        app.selected_day = config.selected_day;
        if let Some(ref city) = config.city {
            app.search_input = city.clone();
            app.pending = Some(PendingAction::Search(city.clone()));
            app.state = AppState::Loading;
        }
        app
    }

    /// Creates an App in search mode with the given clients
    pub fn with_clients(geocoder: GeocodingClient, weather_client: WeatherClient) -> Self {
        Self {
            state: AppState::Search,
            should_quit: false,
            show_help: false,
            units: UnitPreferences::default(),
            selected_day: 0,
            city: None,
            forecast: None,
            view: None,
            search_input: String::new(),
            suggestions: Vec::new(),
            selected_suggestion: None,
            status: None,
            pending: None,
            geocoder,
            weather_client,
        }
    }

    // ------------------------------------------------------------------
    // Setters: each one rebuilds the view model from the stored forecast
    // ------------------------------------------------------------------

    pub fn set_units(&mut self, units: UnitPreferences) {
        self.units = units;
        self.rebuild();
    }

    pub fn set_temperature_unit(&mut self, unit: TemperatureUnit) {
        self.set_units(UnitPreferences {
            temperature: unit,
            ..self.units
        });
    }

    pub fn set_wind_unit(&mut self, unit: WindUnit) {
        self.set_units(UnitPreferences { wind: unit, ..self.units });
    }

    pub fn set_precipitation_unit(&mut self, unit: PrecipitationUnit) {
        self.set_units(UnitPreferences {
            precipitation: unit,
            ..self.units
        });
    }

    pub fn toggle_temperature_unit(&mut self) {
        self.set_temperature_unit(self.units.temperature.toggled());
    }

    pub fn toggle_wind_unit(&mut self) {
        self.set_wind_unit(self.units.wind.toggled());
    }

    pub fn toggle_precipitation_unit(&mut self) {
        self.set_precipitation_unit(self.units.precipitation.toggled());
    }

    /// All-imperial goes back to metric; anything else switches to imperial
    pub fn toggle_unit_system(&mut self) {
        if self.units.is_imperial() {
            self.set_units(UnitPreferences::metric());
        } else {
            self.set_units(UnitPreferences::imperial());
        }
    }

    /// Number of days the selector offers for the loaded forecast
    pub fn day_count(&self) -> usize {
        self.forecast
            .as_ref()
            .map_or(0, |f| f.day_count().min(MAX_FORECAST_DAYS))
    }

    /// Selects a day, clamped to the days the loaded forecast covers
    pub fn select_day(&mut self, day: usize) {
        self.selected_day = match self.forecast {
            Some(ref forecast) => clamp_day_index(day, forecast.day_count()),
            None => day.min(MAX_FORECAST_DAYS - 1),
        };
        self.rebuild();
    }

    /// Moves to the next day, wrapping to the first
    pub fn next_day(&mut self) {
        let count = self.day_count();
        if count == 0 {
            return;
        }
        self.select_day((self.selected_day + 1) % count);
    }

    /// Moves to the previous day, wrapping to the last
    pub fn previous_day(&mut self) {
        let count = self.day_count();
        if count == 0 {
            return;
        }
        if self.selected_day == 0 {
            self.select_day(count - 1);
        } else {
            self.select_day(self.selected_day - 1);
        }
    }

    /// Stores a freshly fetched forecast for `city` and rebuilds
    ///
    /// The selected day is kept, clamped to the new forecast's range. The
    /// view model is built before anything is stored: a payload that fails
    /// to build leaves the previous city, forecast and view untouched.
    pub fn set_forecast(&mut self, city: CurrentCityInfo, forecast: RawForecast) {
        let selected_day = clamp_day_index(self.selected_day, forecast.day_count());

        match forecast::build(&forecast, self.units, selected_day) {
            Ok(view) => {
                self.selected_day = selected_day;
                self.city = Some(city);
                self.forecast = Some(forecast);
                self.view = Some(view);
                self.status = None;
                self.state = AppState::Forecast;
            }
            Err(e) => {
                tracing::error!("Rejected forecast for {}: {}", city.display_name(), e);
                self.status = Some(format!(
                    "Forecast data for {} is malformed: {}",
                    city.display_name(),
                    e
                ));
                self.state = self.fallback_state();
            }
        }
    }

    /// Rebuilds the view model from the stored forecast
    fn rebuild(&mut self) {
        let Some(ref raw) = self.forecast else {
            return;
        };

        match forecast::build(raw, self.units, self.selected_day) {
            Ok(view) => {
                self.view = Some(view);
            }
            Err(e) => {
                tracing::error!("Failed to build forecast view: {}", e);
                self.view = None;
                self.status = Some(format!("Forecast data is malformed: {}", e));
            }
        }
    }

    // ------------------------------------------------------------------
    // Network actions
    // ------------------------------------------------------------------

    /// Runs the pending network action, if any
    pub async fn run_pending(&mut self) {
        let Some(action) = self.pending.take() else {
            return;
        };

        match action {
            PendingAction::Search(query) => self.search(&query).await,
            PendingAction::LoadCity(city) => self.load_city(city).await,
            PendingAction::Suggest(query) => self.suggest(&query).await,
            PendingAction::Reload => {
                if let Some(city) = self.city.clone() {
                    self.load_city(city).await;
                }
            }
        }
    }

    /// Resolves `query` to its first match and loads that city
    pub async fn search(&mut self, query: &str) {
        self.state = AppState::Loading;
        match self.geocoder.lookup(query).await {
            Ok(city) => self.load_city(city).await,
            Err(e) => {
                tracing::warn!("Search for '{}' failed: {}", query, e);
                self.status = Some(e.to_string());
                self.state = self.fallback_state();
            }
        }
    }

    /// Fetches and stores the forecast for `city`
    ///
    /// On failure the previous forecast stays on screen.
    pub async fn load_city(&mut self, city: CurrentCityInfo) {
        self.state = AppState::Loading;
        match self
            .weather_client
            .fetch_forecast(city.latitude, city.longitude)
            .await
        {
            Ok(forecast) => {
                self.suggestions.clear();
                self.selected_suggestion = None;
                self.set_forecast(city, forecast);
            }
            Err(e) => {
                tracing::warn!("Forecast for {} failed: {}", city.display_name(), e);
                self.status = Some(format!("Could not load forecast: {}", e));
                self.state = self.fallback_state();
            }
        }
    }

    async fn suggest(&mut self, query: &str) {
        match self.geocoder.search(query, SUGGESTION_COUNT).await {
            Ok(cities) => {
                if cities.is_empty() {
                    self.status = Some(format!("No cities match '{}'", query.trim()));
                } else {
                    self.status = None;
                }
                self.suggestions = cities;
                self.selected_suggestion = None;
            }
            Err(e) => {
                tracing::debug!("Suggestions for '{}' failed: {}", query, e);
                self.suggestions.clear();
                self.selected_suggestion = None;
            }
        }
    }

    /// Forecast view when one is loaded, otherwise the search bar
    fn fallback_state(&self) -> AppState {
        if self.view.is_some() {
            AppState::Forecast
        } else {
            AppState::Search
        }
    }

    // ------------------------------------------------------------------
    // Keyboard input
    // ------------------------------------------------------------------

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// Forecast view:
    /// - `t` / `w` / `p`: Toggle temperature / wind / precipitation unit
    /// - `u`: Switch between metric and imperial
    /// - `←`/`h`, `→`/`l`: Previous / next day; `1`-`7` pick a day
    /// - `/` or `s`: Search for another city
    /// - `r`: Reload forecast; `?`: Help; `q`/`Esc`: Quit
    ///
    /// Search bar:
    /// - Typing edits the query; `Tab` fetches suggestions
    /// - `↑`/`↓` move through suggestions; `Enter` loads the highlighted
    ///   suggestion or the first match for the query
    /// - `Esc` returns to the forecast (or clears the query)
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match self.state {
            AppState::Loading => {
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            AppState::Search => self.handle_search_key(key_event),
            AppState::Forecast => self.handle_forecast_key(key_event),
        }
    }

    fn handle_forecast_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('t') => self.toggle_temperature_unit(),
            KeyCode::Char('w') => self.toggle_wind_unit(),
            KeyCode::Char('p') => self.toggle_precipitation_unit(),
            KeyCode::Char('u') => self.toggle_unit_system(),
            KeyCode::Left | KeyCode::Char('h') => self.previous_day(),
            KeyCode::Right | KeyCode::Char('l') => self.next_day(),
            KeyCode::Char(c @ '1'..='7') => {
                let day = c as usize - '1' as usize;
                if day < self.day_count() {
                    self.select_day(day);
                }
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.search_input.clear();
                self.suggestions.clear();
                self.selected_suggestion = None;
                self.state = AppState::Search;
            }
            KeyCode::Char('r') => {
                if self.city.is_some() {
                    self.pending = Some(PendingAction::Reload);
                }
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => {
                if self.view.is_some() {
                    self.state = AppState::Forecast;
                } else {
                    self.search_input.clear();
                }
                self.suggestions.clear();
                self.selected_suggestion = None;
            }
            KeyCode::Enter => {
                let chosen = self
                    .selected_suggestion
                    .and_then(|i| self.suggestions.get(i))
                    .cloned();
                if let Some(city) = chosen {
                    self.pending = Some(PendingAction::LoadCity(city));
                } else if !self.search_input.trim().is_empty() {
                    self.pending = Some(PendingAction::Search(self.search_input.clone()));
                }
            }
            KeyCode::Tab => {
                if !self.search_input.trim().is_empty() {
                    self.pending = Some(PendingAction::Suggest(self.search_input.clone()));
                }
            }
            KeyCode::Down => self.move_suggestion_down(),
            KeyCode::Up => self.move_suggestion_up(),
            KeyCode::Backspace => {
                self.search_input.pop();
                self.selected_suggestion = None;
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                self.selected_suggestion = None;
            }
            _ => {}
        }
    }

    /// Moves the suggestion highlight down, wrapping to the top
    fn move_suggestion_down(&mut self) {
        let count = self.suggestions.len();
        if count == 0 {
            return;
        }
        self.selected_suggestion = Some(match self.selected_suggestion {
            Some(i) => (i + 1) % count,
            None => 0,
        });
    }

    /// Moves the suggestion highlight up, wrapping to the bottom
    fn move_suggestion_up(&mut self) {
        let count = self.suggestions.len();
        if count == 0 {
            return;
        }
        self.selected_suggestion = Some(match self.selected_suggestion {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        });
    }
}
