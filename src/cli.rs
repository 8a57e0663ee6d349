// src/cli.rs
use clap::{Command, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan workout days and keep track of their exercises", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print lists and stats as CSV instead of tables
    #[arg(long, global = true)]
    pub export_csv: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SexCli {
    Male,
    #[value(alias = "female")]
    Other,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeCommand {
    /// Print the current theme
    #[default]
    Show,
    /// Switch between light and dark
    Toggle,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the configured workout days
    Days,
    /// Make a day active by its number (as shown by `days`)
    SelectDay {
        /// Day number, starting at 1
        number: usize,
    },
    /// Add a new workout day and make it active
    AddDay {
        /// Name of the day (e.g., "Arms")
        name: String,
    },
    /// List the exercises of the active day
    List {
        /// Show this day instead of the active one
        #[arg(short, long)]
        day: Option<String>,
    },
    /// Add an exercise to the active day
    Add {
        /// Name of the exercise (e.g., "Bench press")
        name: String,
    },
    /// Remove an exercise by its number (as shown by `list`)
    Remove {
        /// Exercise number, starting at 1
        number: usize,
        /// Remove from this day instead of the active one
        #[arg(short, long)]
        day: Option<String>,
    },
    /// Show totals across all days
    Stats,
    /// Delete all exercises from every day
    Reset {
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show or toggle the light/dark theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommand>,
    },
    /// Calculate body-mass index
    Bmi {
        /// Height in cm
        #[arg(long, allow_hyphen_values = true)]
        height: String,
        /// Weight in kg
        #[arg(long, allow_hyphen_values = true)]
        weight: String,
    },
    /// Estimate daily calories at rest (Mifflin-St Jeor)
    Bmr {
        #[arg(short, long, value_enum, default_value_t = SexCli::Male)]
        sex: SexCli,
        /// Height in cm
        #[arg(long, allow_hyphen_values = true)]
        height: String,
        /// Weight in kg
        #[arg(long, allow_hyphen_values = true)]
        weight: String,
        /// Age in years
        #[arg(long, allow_hyphen_values = true)]
        age: String,
    },
    /// Export every day's exercises as CSV
    Export,
    /// Show the path to the database file
    DbPath,
    /// Show the path to the config file
    ConfigPath,
    /// Generate shell completion scripts
    GenerateCompletion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

// Function to parse CLI arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

pub fn build_cli_command() -> Command {
    Cli::command()
}
