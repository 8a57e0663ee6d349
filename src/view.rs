//src/view.rs
//! Renders state as text. Every function here is pure; the CLI re-renders from
//! scratch after each action.
use chrono::{DateTime, Local, Utc};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use std::io;

use crate::days::DaySelector;
use crate::workouts::{WorkoutStats, WorkoutStore};

fn new_table(header: &[&str], header_color: Color) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            header
                .iter()
                .map(|title| Cell::new(title).fg(header_color))
                .collect::<Vec<_>>(),
        );
    table
}

/// One-line chip list, numbered from 1, with the active day in brackets.
pub fn day_chips(days: &DaySelector) -> String {
    days.days()
        .iter()
        .enumerate()
        .map(|(i, day)| {
            if i == days.active_index() {
                format!("[{}. {day}]", i + 1)
            } else {
                format!(" {}. {day} ", i + 1)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every configured day with its exercise count; the active day is highlighted.
pub fn day_table(days: &DaySelector, workouts: &WorkoutStore, header_color: Color) -> Table {
    let mut table = new_table(&["#", "Day", "Exercises", "Active"], header_color);
    for (i, day) in days.days().iter().enumerate() {
        let active = i == days.active_index();
        let mut name = Cell::new(day);
        if active {
            name = name.add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            Cell::new(i + 1),
            name,
            Cell::new(workouts.exercises(day).len()),
            Cell::new(if active { "*" } else { "" }),
        ]);
    }
    table
}

pub fn exercise_table(exercises: &[String], header_color: Color) -> Table {
    let mut table = new_table(&["#", "Exercise"], header_color);
    for (i, exercise) in exercises.iter().enumerate() {
        table.add_row(vec![Cell::new(i + 1), Cell::new(exercise)]);
    }
    table
}

pub fn empty_day_message(day: &str) -> String {
    format!("No exercises for {day} yet. Add one with `fittrack add <NAME>`.")
}

pub fn stats_table(
    stats: WorkoutStats,
    last_saved: Option<DateTime<Utc>>,
    header_color: Color,
) -> Table {
    let mut table = new_table(&["Metric", "Value"], header_color);
    table.add_row(vec![
        Cell::new("Total exercises"),
        Cell::new(stats.total_exercises),
    ]);
    table.add_row(vec![
        Cell::new("Days with workouts"),
        Cell::new(stats.active_days),
    ]);
    table.add_row(vec![
        Cell::new("Last saved"),
        Cell::new(last_saved.map_or_else(
            || "never".to_string(),
            |ts| ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        )),
    ]);
    table
}

/// Writes every stored exercise as `Day,Position,Exercise` rows (position from 1).
/// # Errors
/// Returns `csv::Error` if writing fails.
pub fn write_store_csv<W: io::Write>(workouts: &WorkoutStore, writer: W) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["Day", "Position", "Exercise"])?;
    for (day, exercises) in workouts.iter() {
        for (i, exercise) in exercises.iter().enumerate() {
            writer.write_record([day, (i + 1).to_string().as_str(), exercise.as_str()])?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Writes one day's exercises as `Position,Exercise` rows.
/// # Errors
/// Returns `csv::Error` if writing fails.
pub fn write_exercises_csv<W: io::Write>(exercises: &[String], writer: W) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["Position", "Exercise"])?;
    for (i, exercise) in exercises.iter().enumerate() {
        writer.write_record([&(i + 1).to_string(), exercise])?;
    }
    writer.flush()?;
    Ok(())
}

/// # Errors
/// Returns `csv::Error` if writing fails.
pub fn write_stats_csv<W: io::Write>(stats: WorkoutStats, writer: W) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["Total_Exercises", "Days_With_Workouts"])?;
    writer.write_record([
        stats.total_exercises.to_string(),
        stats.active_days.to_string(),
    ])?;
    writer.flush()?;
    Ok(())
}
