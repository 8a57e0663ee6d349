// src/lib.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::Color;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

// --- Declare modules ---
mod action;
mod calc;
mod config;
mod days;
pub mod db;
mod theme;
pub mod view;
mod workouts;

// --- Expose public types ---
pub use action::{Action, AppState, Effect};
pub use calc::{bmi, bmr, parse_measurement, Bmi, BmiCategory, Bmr, Sex};
pub use config::{
    get_config_path as get_config_path_util, load as load_config_util, parse_color,
    save as save_config_util, Config, Error as ConfigError, StandardColor, ThemeColors,
    DEFAULT_DAYS,
};
pub use days::DaySelector;
pub use db::{get_db_path as get_db_path_util, Error as DbError, THEME_KEY, WORKOUTS_KEY};
pub use theme::Theme;
pub use workouts::{WorkoutStats, WorkoutStore};

/// Owns the application state and the handles it is persisted through.
///
/// Every mutation goes through [`AppService::dispatch`], which applies the action
/// in memory and then performs the resulting writes before returning.
pub struct AppService {
    pub config: Config,
    pub conn: Connection,
    pub db_path: PathBuf,
    pub config_path: PathBuf,
    pub state: AppState,
}

impl AppService {
    /// Initializes the application service.
    /// # Errors
    /// Returns `anyhow::Error` if config/db path determination, loading, or initialization fails.
    pub fn initialize() -> Result<Self> {
        let config_path =
            config::get_config_path().context("Failed to determine configuration file path")?;
        let config = config::load(&config_path)
            .with_context(|| format!("Failed to load config from {config_path:?}"))?;

        let db_path = db::get_db_path().context("Failed to determine database path")?;
        let conn = db::open_db(&db_path)
            .with_context(|| format!("Failed to open database at {db_path:?}"))?;

        Self::open(config, conn, db_path, config_path)
    }

    /// Builds the service around an already opened connection: creates the schema if
    /// needed and loads the stored workouts and theme.
    /// # Errors
    /// Returns `anyhow::Error` if the schema cannot be created or the stored values
    /// cannot be read.
    pub fn open(
        config: Config,
        conn: Connection,
        db_path: PathBuf,
        config_path: PathBuf,
    ) -> Result<Self> {
        db::init_db(&conn).context("Failed to initialize database schema")?;

        let config = config.normalized();
        let days = DaySelector::new(config.days.clone(), config.active_day)
            .context("Config contains no workout days")?;

        let workouts_doc = db::get_value(&conn, WORKOUTS_KEY)
            .context("Failed to read stored workouts")?
            .map(|stored| stored.value);
        let workouts = WorkoutStore::from_document(workouts_doc.as_deref());

        let theme_value = db::get_value(&conn, THEME_KEY)
            .context("Failed to read theme preference")?
            .map(|stored| stored.value);
        let theme = Theme::from_stored(theme_value.as_deref());

        let stats = workouts.stats();
        tracing::debug!(
            total_exercises = stats.total_exercises,
            active_days = stats.active_days,
            %theme,
            "loaded state"
        );

        Ok(Self {
            config,
            conn,
            db_path,
            config_path,
            state: AppState::new(workouts, days, theme),
        })
    }

    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }

    /// Saves the current configuration state.
    /// # Errors
    /// Returns `ConfigError` if saving fails.
    pub fn save_config(&self) -> Result<(), ConfigError> {
        config::save(&self.config_path, &self.config)
    }

    /// Applies `action` and synchronously persists whatever it changed.
    /// Returns the effects that were carried out; empty means the action was ignored.
    /// # Errors
    /// Returns `anyhow::Error` if a write fails. The in-memory change is kept.
    pub fn dispatch(&mut self, action: Action) -> Result<Vec<Effect>> {
        tracing::debug!(?action, "dispatching");
        let effects = self.state.apply(action);
        for effect in &effects {
            self.run_effect(*effect)?;
        }
        Ok(effects)
    }

    fn run_effect(&mut self, effect: Effect) -> Result<()> {
        match effect {
            Effect::SaveWorkouts => {
                let document = self
                    .state
                    .workouts
                    .to_document()
                    .context("Failed to serialize workouts")?;
                db::put_value(&self.conn, WORKOUTS_KEY, &document)
                    .context("Failed to save workouts")?;
            }
            Effect::EraseWorkouts => {
                db::delete_value(&self.conn, WORKOUTS_KEY)
                    .context("Failed to erase stored workouts")?;
            }
            Effect::SaveTheme => {
                db::put_value(&self.conn, THEME_KEY, self.state.theme.as_ref())
                    .context("Failed to save theme preference")?;
            }
            Effect::SaveDays => {
                self.config.days = self.state.days.days().to_vec();
                self.config.active_day = self.state.days.active_index();
                self.save_config().with_context(|| {
                    format!("Failed to save workout days to {:?}", self.config_path)
                })?;
            }
        }
        Ok(())
    }

    /// Points at the day with 0-based `index`. Returns `false` if out of range.
    /// # Errors
    /// Returns `anyhow::Error` if the config cannot be saved.
    pub fn select_day(&mut self, index: usize) -> Result<bool> {
        Ok(!self.dispatch(Action::SelectDay(index))?.is_empty())
    }

    /// Appends a new day and makes it active. Returns `false` for blank or duplicate names.
    /// # Errors
    /// Returns `anyhow::Error` if the config cannot be saved.
    pub fn add_day(&mut self, name: &str) -> Result<bool> {
        Ok(!self.dispatch(Action::AddDay(name.to_string()))?.is_empty())
    }

    /// Adds an exercise to the active day. Returns `false` for a blank name.
    /// # Errors
    /// Returns `anyhow::Error` if the workouts cannot be saved.
    pub fn add_exercise(&mut self, name: &str) -> Result<bool> {
        Ok(!self
            .dispatch(Action::AddExercise {
                name: name.to_string(),
            })?
            .is_empty())
    }

    /// Removes the exercise at 0-based `index` from `day`. Returns `false` if there is
    /// no such entry.
    /// # Errors
    /// Returns `anyhow::Error` if the workouts cannot be saved.
    pub fn remove_exercise(&mut self, day: &str, index: usize) -> Result<bool> {
        Ok(!self
            .dispatch(Action::RemoveExercise {
                day: day.to_string(),
                index,
            })?
            .is_empty())
    }

    /// Clears every day and deletes the stored document. Does nothing unless
    /// `confirmed`.
    /// # Errors
    /// Returns `anyhow::Error` if the stored document cannot be deleted.
    pub fn reset_all(&mut self, confirmed: bool) -> Result<bool> {
        Ok(!self.dispatch(Action::Reset { confirmed })?.is_empty())
    }

    /// Switches between light and dark, returning the new theme.
    /// # Errors
    /// Returns `anyhow::Error` if the preference cannot be saved.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.dispatch(Action::ToggleTheme)?;
        Ok(self.state.theme)
    }

    pub fn active_day(&self) -> &str {
        self.state.days.active_day()
    }

    /// Looks up a day by exact name: configured days first, then days that only
    /// exist in the stored workouts (e.g. after the config file was edited).
    pub fn find_day(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.state
            .days
            .days()
            .iter()
            .map(String::as_str)
            .find(|d| *d == name)
            .or_else(|| {
                self.state
                    .workouts
                    .iter()
                    .map(|(day, _)| day)
                    .find(|d| *d == name)
            })
    }

    pub fn exercises(&self, day: &str) -> &[String] {
        self.state.workouts.exercises(day)
    }

    pub fn stats(&self) -> WorkoutStats {
        self.state.stats()
    }

    /// When the workout document was last written, if it exists.
    /// # Errors
    /// Returns `anyhow::Error` if the database cannot be read.
    pub fn last_saved(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(db::get_value(&self.conn, WORKOUTS_KEY)
            .context("Failed to read stored workouts")?
            .map(|stored| stored.updated_at))
    }

    /// Header colour of the current theme.
    pub fn header_color(&self) -> Color {
        self.state.theme.header_color(&self.config.theme)
    }
}
