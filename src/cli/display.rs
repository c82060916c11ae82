//! Display utilities for the workout CLI.
//!
//! This module provides formatted output for:
//! - Generated workouts, presets and the exercise library
//! - Phase changes and the running countdown
//! - The completion summary and its share text
//! - Error messages

use std::io::Write;
use std::time::Duration;

use crate::engine::SessionSummary;
use crate::types::{
    ConfigTable, Exercise, ExerciseLibrary, LibraryEntry, Phase, SequenceItem, WorkoutPlan,
};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    // ------------------------------------------------------------------------
    // Listings
    // ------------------------------------------------------------------------

    /// Shows a generated workout.
    pub fn show_plan(plan: &WorkoutPlan) {
        for line in Self::plan_lines(plan) {
            println!("{}", line);
        }
    }

    /// Numbered lines of a generated workout.
    pub fn plan_lines(plan: &WorkoutPlan) -> Vec<String> {
        let mut lines = vec![format!(
            "Workout ({}) mit {} Übungen",
            plan.difficulty_label,
            plan.total_exercises()
        )];

        let mut number = 0;
        for item in &plan.sequence {
            match item {
                SequenceItem::Exercise { exercise, .. } => {
                    number += 1;
                    lines.push(format!("{:>3}. {}", number, exercise.name));
                }
                SequenceItem::Pause { duration } => {
                    lines.push(format!("     Lange Pause ({})", duration));
                }
            }
        }
        lines
    }

    /// Shows the difficulty presets.
    pub fn show_difficulties(table: &ConfigTable) {
        println!("Schwierigkeitsstufen");
        println!("─────────────────────────────");
        for (key, config) in table {
            println!(
                "{:<12} {:<12} {:>2} Übungen, {} x {} Pause",
                key,
                config.name.as_deref().unwrap_or(key),
                config.total_exercises,
                config.pause_count,
                config.pause_duration
            );
        }
        println!(
            "{:<12} eigene Werte mit --exercises, --pauses, --pause-duration",
            crate::types::CUSTOM_DIFFICULTY
        );
    }

    /// Shows the exercise library.
    pub fn show_exercises(library: &ExerciseLibrary) {
        println!("Übungen ({})", library.len());
        println!("─────────────────────────────");
        for (id, entry) in library.iter() {
            match entry {
                LibraryEntry::Single(exercise) => {
                    println!("{:<32} {}", id, exercise.name);
                }
                LibraryEntry::Group(group) => {
                    println!("{:<32} {} + {}", id, group.left.name, group.right.name);
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------------

    /// Shows the start screen for a loaded workout.
    pub fn show_ready(plan: &WorkoutPlan) {
        println!("Bereit für das Workout?");
        println!(
            "  Schwierigkeit: {} · {} Übungen",
            plan.difficulty_label,
            plan.total_exercises()
        );
        println!("  Enter = Start/Pause, q = Workout beenden, r = neu mischen, x = Programm beenden");
    }

    /// Shows the screen for a newly entered phase.
    pub fn show_phase(phase: Phase, cursor: usize, plan: &WorkoutPlan) {
        Self::clear_line();
        for line in Self::phase_lines(phase, cursor, plan) {
            println!("{}", line);
        }
    }

    /// Lines describing a phase at `cursor`.
    pub fn phase_lines(phase: Phase, cursor: usize, plan: &WorkoutPlan) -> Vec<String> {
        let total = plan.total_exercises();
        let mut lines = Vec::new();

        match phase {
            Phase::PreWorkout => {
                lines.push("Gleich geht's los!".to_string());
                if let Some(first) = plan.next_exercise(0) {
                    lines.push(format!("  Erste Übung: {}", first.name));
                }
            }
            Phase::Exercising => {
                lines.push(format!(
                    "Übung {} von {}",
                    plan.exercise_number(cursor),
                    total
                ));
                if let Some(exercise) = plan.exercise_at(cursor) {
                    lines.extend(Self::exercise_lines(exercise));
                }
                match plan.next_exercise(cursor + 1) {
                    Some(next) => lines.push(format!("  Als nächstes: {}", next.name)),
                    None => {
                        lines.push("  Letzte Übung! Das Workout wird automatisch beendet".into())
                    }
                }
            }
            Phase::Resting => {
                lines.push("Erholung".to_string());
                if let Some(next) = plan.next_exercise(cursor + 1) {
                    lines.push(format!("  Als nächstes: {}", next.name));
                }
            }
            Phase::LongPausing => {
                let duration = match plan.sequence.get(cursor) {
                    Some(SequenceItem::Pause { duration }) => duration.to_string(),
                    _ => String::new(),
                };
                lines.push(format!("Lange Pause {}", duration).trim_end().to_string());
                if let Some(next) = plan.next_exercise(cursor + 1) {
                    lines.push(format!("  Als nächstes: {}", next.name));
                }
            }
            Phase::Idle | Phase::Complete => {}
        }

        lines
    }

    fn exercise_lines(exercise: &Exercise) -> Vec<String> {
        let mut lines = vec![format!("  {}", exercise.name)];
        if !exercise.description.is_empty() {
            lines.push(format!("  {}", exercise.description));
        }
        lines
    }

    /// Redraws the countdown line in place.
    pub fn show_tick(remaining: Duration, warning: bool) {
        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "\r{}", Self::countdown_line(remaining, warning));
        let _ = stdout.flush();
    }

    /// Countdown line with the warning marker during the last seconds.
    pub fn countdown_line(remaining: Duration, warning: bool) -> String {
        let marker = if warning { "!" } else { " " };
        format!("  {} {} ", Self::format_time(remaining), marker)
    }

    pub fn show_paused(remaining: Duration) {
        Self::clear_line();
        println!("|| Pausiert bei {} (Enter = Fortsetzen)", Self::format_time(remaining));
    }

    pub fn show_resumed() {
        Self::clear_line();
        println!("> Fortgesetzt");
    }

    /// Shows the completion summary and its share text.
    pub fn show_summary(summary: &SessionSummary) {
        Self::clear_line();
        println!();
        println!("{}", Self::share_text(summary));
        println!();
        println!("Enter = neues Workout, x = Programm beenden");
    }

    /// Free-text summary suitable for sharing.
    pub fn share_text(summary: &SessionSummary) -> String {
        let headline = if summary.is_full_workout() {
            "Workout geschafft!".to_string()
        } else {
            "Workout beendet.".to_string()
        };

        format!(
            "{}\n\
             Schwierigkeit: {}\n\
             Übungen: {} von {}\n\
             Dauer: {}\n\
             Zeitraum: {} bis {}",
            headline,
            summary.difficulty_label,
            summary.completed_exercises,
            summary.total_exercises,
            Self::format_seconds(summary.actual_duration_seconds),
            summary.started_at.format("%d.%m.%Y %H:%M"),
            summary.ended_at.format("%H:%M"),
        )
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Fehler: {}", message);
    }

    fn clear_line() {
        print!("\r\x1b[2K");
    }

    /// Formats a countdown as `MM:SS.cc`.
    fn format_time(remaining: Duration) -> String {
        let millis = remaining.as_millis();
        let minutes = millis / 60_000;
        let seconds = (millis / 1000) % 60;
        let centis = (millis % 1000) / 10;
        format!("{:02}:{:02}.{:02}", minutes, seconds, centis)
    }

    /// Formats whole seconds as `MM:SS`.
    fn format_seconds(total_seconds: u64) -> String {
        format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
    }
}

// ============================================================================
// Tests
// ============================================================================
