//src/action.rs
//! User actions and the state transitions they cause.
//!
//! [`AppState::apply`] is pure: it changes the in-memory state and reports which
//! persistence steps are now due. Running those steps is up to the caller
//! (see `AppService::dispatch`).
use crate::days::DaySelector;
use crate::theme::Theme;
use crate::workouts::{WorkoutStats, WorkoutStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Point at the day with this (0-based) index.
    SelectDay(usize),
    /// Add an exercise to the active day.
    AddExercise { name: String },
    RemoveExercise { day: String, index: usize },
    AddDay(String),
    /// Clear every day. Ignored unless `confirmed`.
    Reset { confirmed: bool },
    ToggleTheme,
}

/// Persistence step required after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Write the whole workout document.
    SaveWorkouts,
    /// Delete the workout document.
    EraseWorkouts,
    SaveTheme,
    /// Write the day list and active pointer to the config file.
    SaveDays,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub workouts: WorkoutStore,
    pub days: DaySelector,
    pub theme: Theme,
}

impl AppState {
    pub const fn new(workouts: WorkoutStore, days: DaySelector, theme: Theme) -> Self {
        Self {
            workouts,
            days,
            theme,
        }
    }

    /// Applies `action`, returning the effects it requires.
    /// An empty list means the action was rejected and nothing changed.
    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::SelectDay(index) => {
                if self.days.select(index) {
                    vec![Effect::SaveDays]
                } else {
                    Vec::new()
                }
            }
            Action::AddExercise { name } => {
                let day = self.days.active_day().to_string();
                if self.workouts.add_exercise(&day, &name) {
                    vec![Effect::SaveWorkouts]
                } else {
                    Vec::new()
                }
            }
            Action::RemoveExercise { day, index } => {
                if self.workouts.remove_exercise(&day, index).is_some() {
                    vec![Effect::SaveWorkouts]
                } else {
                    Vec::new()
                }
            }
            Action::AddDay(name) => {
                if self.days.add_day(&name) {
                    vec![Effect::SaveDays]
                } else {
                    Vec::new()
                }
            }
            Action::Reset { confirmed: false } => Vec::new(),
            Action::Reset { confirmed: true } => {
                self.workouts.clear();
                vec![Effect::EraseWorkouts]
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                vec![Effect::SaveTheme]
            }
        }
    }

    /// Exercises of the active day.
    pub fn active_exercises(&self) -> &[String] {
        self.workouts.exercises(self.days.active_day())
    }

    pub fn stats(&self) -> WorkoutStats {
        self.workouts.stats()
    }
}
