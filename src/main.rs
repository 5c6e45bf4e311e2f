//! # roleplan
//!
//! A terminal planner that organizes work as Roles → Goals → Tasks and lets
//! tasks be scheduled onto a weekly calendar grid.
//!
//! ## Usage
//!
//! ### Interactive Mode (TUI)
//!
//! ```bash
//! roleplan
//! # or explicitly
//! roleplan ui
//! ```
//!
//! The left pane holds the role/goal/task tree, the right pane the week
//! (Saturday to Friday, 5am to 8pm). Press `m` on a task to pick it up,
//! move to a cell on the calendar and press `Enter` to drop it there. The
//! `day` row schedules the task for the date without a time.
//!
//! **Sidebar**
//! *   `Enter`: Open/close a role or goal
//! *   `a` / `g` / `t`: Add role / goal / task
//! *   `Space`: Toggle done
//! *   `s`: Schedule by typing `YYYY-MM-DD [time]`
//! *   `u`: Unschedule
//! *   `m`: Move (drag) the task to the calendar
//! *   `d`: Delete
//!
//! **Calendar**
//! *   Arrows / `hjkl`: Move the cell cursor
//! *   `Enter`: Drop the carried task
//! *   `x`: Unschedule the first task in the cell
//! *   `[` / `]` / `.`: Previous week / next week / today
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! roleplan tree            # hierarchy as a table
//! roleplan tree --json     # hierarchy as JSON
//! roleplan week --date 2024-06-01
//! roleplan hours
//! ```
//!
//! Every session starts from the built-in sample data (`--empty` starts
//! blank). Nothing is saved on exit.
//!
//! ## Logging
//!
//! Logs are written to `~/.local/share/roleplan/logs` on Linux. Override the
//! directory with `ROLEPLAN_LOG_DIR` and the level with `ROLEPLAN_LOG`.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::process::ExitCode;
use chrono::Local;
use roleplan::calendar::parse_date;
use roleplan::commands::*;
use roleplan::config::Config;
use roleplan::logging::init_logging;
use roleplan::tui::run_tui;
use roleplan::{Error, Store};

#[derive(Parser)]
#[command(name = "roleplan")]
#[command(about = "Roles, goals and tasks on a weekly calendar", long_about = None)]
struct Cli {
    /// Start without the sample roles
    #[arg(long, global = true)]
    empty: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the role/goal/task hierarchy
    Tree {
        /// Print JSON instead of a table
        #[arg(short, long)]
        json: bool,
    },
    /// Print the week containing a date
    Week {
        /// Any date in the week, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Print the hours shown on the calendar grid
    Hours,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = Config::from_env();
    if let Err(e) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("Logging disabled: {}", e);
    }

    let store = if cli.empty { Store::new() } else { Store::seeded() };

    let res = match cli.command {
        Some(Commands::Tree { json }) => cmd_tree(&store, json),
        Some(Commands::Week { date }) => match date {
            Some(d) => match parse_date(&d) {
                Some(date) => {
                    cmd_week(&store, date);
                    Ok(())
                }
                None => Err(Error::InvalidDate(d)),
            },
            None => {
                cmd_week(&store, Local::now().date_naive());
                Ok(())
            }
        },
        Some(Commands::Hours) => {
            cmd_hours();
            Ok(())
        }
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return ExitCode::FAILURE;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "roleplan", &mut io::stdout());
            Ok(())
        }
        Some(Commands::Ui) | None => run_tui(store),
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
