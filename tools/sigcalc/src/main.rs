//! sigcalc - Significant Figures Calculator
//!
//! Solves arithmetic expressions, counts the significant figures of the
//! numbers typed and optionally rounds results to 1-5 significant figures.

mod config;
mod output;
mod repl;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use common::logging::LogConfig;
use sigfig_calc::{count_significant_figures, CalcEngine, LiteralCount, RoundingTarget, Session};
use std::path::PathBuf;
use tracing::debug;

use crate::config::SigcalcConfig;
use crate::output::SolveReport;

#[derive(Parser)]
#[command(name = "sigcalc")]
#[command(about = "Significant Figures Calculator")]
#[command(long_about = "Significant Figures Calculator

Commands:
  solve       Solve an expression, optionally rounding the result
  count       Count the significant figures of numbers
  round       Round a value to 1-5 significant figures
  normalize   Show the expression as handed to the evaluator
  repl        Interactive calculator (default)

Examples:
  sigcalc solve '1.5÷log(5+1)'          # 1.9275...
  sigcalc solve 673.456 --round 3       # 673
  sigcalc count 0.0025 30.00            # 2 and 4
  sigcalc round 0.012345 2              # 0.012

Use 'sigcalc <command> --help' for more information on a specific command.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (toml, yaml or json)
    #[arg(short, long, global = true, env = "SIGCALC_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Write log lines to stderr as JSON
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an expression
    Solve {
        /// Expression using + - × ÷ ^ ( ) log ln e (* and / also accepted)
        #[arg(allow_hyphen_values = true)]
        expression: String,

        /// Round the result to 1-5 significant figures, or "off"
        #[arg(short, long)]
        round: Option<RoundingTarget>,
    },

    /// Count significant figures of numeric literals
    Count {
        #[arg(required = true, allow_hyphen_values = true)]
        literals: Vec<String>,
    },

    /// Round a value to a number of significant figures
    Round {
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// 1-5, or "off"
        figures: RoundingTarget,
    },

    /// Show the normalized expression passed to the evaluator
    Normalize {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },

    /// Start the interactive calculator
    Repl,
}

/// Logger settings: command line flags override the loaded configuration
fn log_config(cli: &Cli, settings: &SigcalcConfig) -> LogConfig {
    let level = if cli.verbose {
        "debug"
    } else {
        settings.log_level.as_str()
    };

    LogConfig {
        app_name: config::APP_NAME.to_string(),
        level: level.to_string(),
        enable_json: cli.log_json || settings.log_json,
        ansi: !cli.no_color && settings.color,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = config::load(cli.config.as_deref())?;

    // Configure colored output
    if cli.no_color || !settings.color {
        colored::control::set_override(false);
    }

    common::logging::init_with_config(log_config(&cli, &settings))
        .context("Failed to initialize logging")?;
    debug!(?settings, "Configuration loaded");

    let engine = CalcEngine::with_evalexpr().context("Failed to create evaluator")?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Solve { expression, round } => {
            let target = round.unwrap_or(settings.rounding);
            let session = Session::with_target(target)
                .set_input(expression)
                .solve(&engine);
            output::print_solve(&SolveReport::from_session(&session, &engine), cli.json)?;
        },
        Commands::Count { literals } => {
            let counts: Vec<LiteralCount> = literals
                .into_iter()
                .map(|literal| {
                    let figures = count_significant_figures(&literal);
                    LiteralCount { literal, figures }
                })
                .collect();
            output::print_counts(&counts, cli.json)?;
        },
        Commands::Round { value, figures } => {
            output::print_rounded(value, figures, cli.json)?;
        },
        Commands::Normalize { expression } => {
            println!("{}", engine.normalize(&expression));
        },
        Commands::Repl => repl::run(&engine, &settings)?,
    }

    Ok(())
}
