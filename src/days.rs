//src/days.rs

/// The ordered, append-only list of workout days and the pointer to the one
/// currently being viewed. The pointer is always a valid index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySelector {
    days: Vec<String>,
    active: usize,
}

impl DaySelector {
    /// Creates a selector over `days`. Returns `None` when `days` is empty, since
    /// the pointer would have nothing to point at. An out-of-range `active` falls
    /// back to 0.
    pub fn new(days: Vec<String>, active: usize) -> Option<Self> {
        if days.is_empty() {
            return None;
        }
        let active = if active < days.len() { active } else { 0 };
        Some(Self { days, active })
    }

    pub fn days(&self) -> &[String] {
        &self.days
    }

    pub const fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_day(&self) -> &str {
        &self.days[self.active]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.days.iter().any(|d| d == name)
    }

    /// Points at the day at `index`. Returns `false` (and changes nothing) if out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.days.len() {
            return false;
        }
        self.active = index;
        true
    }

    /// Appends a new day and makes it active.
    /// Blank names and exact duplicates are rejected with `false`.
    pub fn add_day(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.days.push(name.to_string());
        self.active = self.days.len() - 1;
        true
    }
}
