//src/workouts.rs
use std::collections::BTreeMap;

/// Mapping of day name to the exercises planned for it, in insertion order.
///
/// A day only appears as a key while it has at least one exercise; removing the
/// last exercise of a day removes the day's key as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutStore {
    days: BTreeMap<String, Vec<String>>,
}

/// Figures shown on the dashboard, derived from the store on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkoutStats {
    pub total_exercises: usize,
    pub active_days: usize,
}

impl WorkoutStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the store from a persisted document.
    ///
    /// A missing document, invalid JSON or any other shape than an object of string
    /// arrays yields an empty store. Empty arrays are dropped.
    #[must_use]
    pub fn from_document(document: Option<&str>) -> Self {
        let Some(raw) = document else {
            return Self::default();
        };
        match serde_json::from_str::<BTreeMap<String, Vec<String>>>(raw) {
            Ok(mut days) => {
                days.retain(|_, exercises| !exercises.is_empty());
                Self { days }
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable workout document");
                Self::default()
            }
        }
    }

    /// Serializes the whole store as a JSON object.
    /// # Errors
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_document(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.days)
    }

    /// Appends `name` (trimmed) to `day`. Returns `false` if the trimmed name is empty.
    pub fn add_exercise(&mut self, day: &str, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.days
            .entry(day.to_string())
            .or_default()
            .push(name.to_string());
        true
    }

    /// Removes the exercise at `index` from `day`, dropping the day once it is empty.
    /// Returns the removed name, or `None` if `index` does not reference an entry.
    pub fn remove_exercise(&mut self, day: &str, index: usize) -> Option<String> {
        let exercises = self.days.get_mut(day)?;
        if index >= exercises.len() {
            return None;
        }
        let removed = exercises.remove(index);
        if exercises.is_empty() {
            self.days.remove(day);
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }

    /// Exercises planned for `day`; empty if the day has none.
    pub fn exercises(&self, day: &str) -> &[String] {
        self.days.get(day).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_workouts(&self, day: &str) -> bool {
        self.days.contains_key(day)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days that currently have exercises, with their exercises, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.days
            .iter()
            .map(|(day, exercises)| (day.as_str(), exercises.as_slice()))
    }

    #[must_use]
    pub fn stats(&self) -> WorkoutStats {
        WorkoutStats {
            total_exercises: self.days.values().map(Vec::len).sum(),
            active_days: self.days.len(),
        }
    }
}
