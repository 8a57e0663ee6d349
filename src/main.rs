// src/main.rs
mod cli; // Keep cli module for parsing args

use anyhow::{bail, Context, Result};
use std::io::{self, stdin, stdout, Write};
use tracing_subscriber::EnvFilter;

use fittrack_lib::{bmi, bmr, parse_measurement, view, AppService, Sex};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli_args = cli::parse_args(); // Parse arguments once
    let export_csv = cli_args.export_csv;

    // --- Commands that don't touch stored state ---
    match &cli_args.command {
        cli::Commands::GenerateCompletion { shell } => {
            let mut cmd = cli::build_cli_command();
            let bin_name = cmd.get_name().to_string();

            eprintln!("Generating completion script for {shell}...");
            clap_complete::generate(*shell, &mut cmd, bin_name, &mut stdout());
            return Ok(());
        }
        cli::Commands::Bmi { height, weight } => {
            match bmi(parse_measurement(height), parse_measurement(weight)) {
                Some(result) => {
                    println!("{result}");
                    println!("category: {}", result.category);
                }
                None => eprintln!("No result: height and weight must be positive numbers."),
            }
            return Ok(());
        }
        cli::Commands::Bmr {
            sex,
            height,
            weight,
            age,
        } => {
            let sex = match sex {
                cli::SexCli::Male => Sex::Male,
                cli::SexCli::Other => Sex::Other,
            };
            match bmr(
                sex,
                parse_measurement(height),
                parse_measurement(weight),
                parse_measurement(age),
            ) {
                Some(result) => println!("{result}"),
                None => eprintln!("No result: height, weight and age must be non-zero numbers."),
            }
            return Ok(());
        }
        _ => {}
    }

    // Initialize the application service (loads config, opens the database)
    let mut service =
        AppService::initialize().context("Failed to initialize application service")?;

    match cli_args.command {
        cli::Commands::GenerateCompletion { .. }
        | cli::Commands::Bmi { .. }
        | cli::Commands::Bmr { .. } => {
            unreachable!("Stateless commands return before initialization")
        }
        cli::Commands::Days => {
            let table = view::day_table(
                &service.state.days,
                &service.state.workouts,
                service.header_color(),
            );
            println!("{table}");
        }
        cli::Commands::SelectDay { number } => {
            let selected = match number.checked_sub(1) {
                Some(index) => service.select_day(index)?,
                None => false,
            };
            if !selected {
                eprintln!("There is no day number {number}. Use `fittrack days` to see them.");
                return Ok(());
            }
            let day = service.active_day().to_string();
            print_day(&service, &day, export_csv)?;
        }
        cli::Commands::AddDay { name } => {
            if service.add_day(&name)? {
                println!("Added day '{}'. It is now the active day.", name.trim());
                println!("{}", view::day_chips(&service.state.days));
            } else {
                eprintln!("Day name is empty or already exists. Nothing changed.");
            }
        }
        cli::Commands::List { day } => {
            let day = resolve_day(&service, day.as_deref())?;
            print_day(&service, &day, export_csv)?;
        }
        cli::Commands::Add { name } => {
            if service.add_exercise(&name)? {
                let day = service.active_day().to_string();
                println!("Added '{}' to {day}.", name.trim());
                print_day(&service, &day, export_csv)?;
            } else {
                eprintln!("Exercise name cannot be empty. Nothing changed.");
            }
        }
        cli::Commands::Remove { number, day } => {
            let day = resolve_day(&service, day.as_deref())?;
            let removed = match number.checked_sub(1) {
                Some(index) => service.remove_exercise(&day, index)?,
                None => false,
            };
            if removed {
                println!("Removed exercise {number} from {day}.");
                print_day(&service, &day, export_csv)?;
            } else {
                eprintln!("{day} has no exercise number {number}. Nothing changed.");
            }
        }
        cli::Commands::Stats => {
            if export_csv {
                view::write_stats_csv(service.stats(), io::stdout())?;
            } else {
                let table = view::stats_table(
                    service.stats(),
                    service.last_saved()?,
                    service.header_color(),
                );
                println!("{table}");
            }
        }
        cli::Commands::Reset { yes } => {
            let confirmed = yes || prompt_confirm("Reset all workout data?")?;
            if service.reset_all(confirmed)? {
                println!("All workout data has been reset.");
            } else {
                println!("Reset cancelled.");
            }
        }
        cli::Commands::Theme { action } => match action.unwrap_or_default() {
            cli::ThemeCommand::Show => println!("Theme: {}", service.state.theme),
            cli::ThemeCommand::Toggle => {
                let theme = service.toggle_theme()?;
                println!("Switched to {theme} theme.");
            }
        },
        cli::Commands::Export => {
            view::write_store_csv(&service.state.workouts, io::stdout())?;
        }
        cli::Commands::DbPath => {
            println!("Database file is located at: {:?}", service.get_db_path());
        }
        cli::Commands::ConfigPath => {
            println!("Config file is located at: {:?}", service.get_config_path());
        }
    }

    Ok(())
}

/// Returns the requested day's canonical name, or the active day when none is given.
fn resolve_day(service: &AppService, requested: Option<&str>) -> Result<String> {
    match requested {
        None => Ok(service.active_day().to_string()),
        Some(name) => match service.find_day(name) {
            Some(day) => Ok(day.to_string()),
            None => bail!("Unknown day '{}'. Use `fittrack days` to list them.", name.trim()),
        },
    }
}

/// Re-renders the chip line and the exercise list for `day`.
fn print_day(service: &AppService, day: &str, export_csv: bool) -> Result<()> {
    let exercises = service.exercises(day);
    if export_csv {
        view::write_exercises_csv(exercises, io::stdout())?;
        return Ok(());
    }
    println!("{}", view::day_chips(&service.state.days));
    if exercises.is_empty() {
        println!("{}", view::empty_day_message(day));
    } else {
        println!("{day} exercises");
        println!("{}", view::exercise_table(exercises, service.header_color()));
    }
    Ok(())
}

fn prompt_confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N]: ");
    stdout().flush()?; // Ensure the prompt is displayed before reading input

    let mut input = String::new();
    stdin().read_line(&mut input)?;
    let answer = input.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
