//! Interactive calculator REPL
//!
//! Each plain line is an expression to solve. Lines starting with `:` act
//! like the calculator's extra buttons (clear, backspace, rounding).

use anyhow::{Context, Result};
use colored::*;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use sigfig_calc::{
    count_literals, count_significant_figures, CalcEngine, Evaluator, Key, LiteralCount,
    RoundingTarget, Session,
};

use crate::config::SigcalcConfig;
use crate::output::{self, SolveReport};

const COMMANDS: [&str; 10] = [
    ":back", ":clear", ":count", ":help", ":log", ":press", ":quit", ":round", ":show", ":solve",
];

/// What a REPL line produced
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Solved(SolveReport),
    Counts(Vec<LiteralCount>),
    Input(String),
    Target(RoundingTarget),
    Message(String),
    Usage(&'static str),
    Unknown(String),
    Help,
    Quit,
}

// ============================================================================
// Tab Completion Helper
// ============================================================================

/// REPL helper providing Tab completion for `:` commands
struct ReplHelper;

impl Helper for ReplHelper {}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for ReplHelper {}

impl Validator for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with(':') && !line.contains(' ') {
            return Ok(complete_command(line));
        }

        Ok((pos, vec![]))
    }
}

/// Complete `:` command names
fn complete_command(prefix: &str) -> (usize, Vec<Pair>) {
    let matches: Vec<Pair> = COMMANDS
        .iter()
        .filter(|cmd| cmd.starts_with(prefix))
        .map(|cmd| Pair {
            display: (*cmd).to_string(),
            replacement: (*cmd).to_string(),
        })
        .collect();

    (0, matches)
}

// ============================================================================
// Command execution
// ============================================================================

fn solved<E: Evaluator>(session: Session, engine: &CalcEngine<E>) -> (Session, Reply) {
    let session = session.solve(engine);
    let report = SolveReport::from_session(&session, engine);
    (session, Reply::Solved(report))
}

/// Execute a single REPL line against the current session
pub fn execute_repl_command<E: Evaluator>(
    session: Session,
    engine: &CalcEngine<E>,
    line: &str,
) -> (Session, Reply) {
    let line = line.trim();
    if !line.starts_with(':') {
        return solved(session.set_input(line), engine);
    }

    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (line, ""),
    };

    match cmd {
        ":solve" | ":=" => solved(session, engine),
        ":clear" | ":c" => {
            let session = session.clear();
            (session, Reply::Input(String::new()))
        },
        ":back" | ":b" => {
            let session = session.backspace();
            let input = session.input().to_string();
            (session, Reply::Input(input))
        },
        ":show" => {
            let input = session.input().to_string();
            (session, Reply::Input(input))
        },
        ":press" | ":p" => {
            if arg.is_empty() {
                return (session, Reply::Usage(":press <key> [key...]"));
            }
            let keys: Result<Vec<Key>, _> = arg.split_whitespace().map(str::parse).collect();
            match keys {
                Ok(keys) => {
                    let session = keys.into_iter().fold(session, Session::press);
                    let input = session.input().to_string();
                    (session, Reply::Input(input))
                },
                Err(e) => (session, Reply::Message(e.to_string())),
            }
        },
        ":round" | ":r" => match arg.parse::<RoundingTarget>() {
            Ok(target) => (session.select_target(target), Reply::Target(target)),
            Err(_) => (session, Reply::Usage(":round <1-5|off>")),
        },
        ":count" => {
            let counts = if arg.is_empty() {
                count_literals(session.input())
            } else {
                arg.split_whitespace()
                    .map(|literal| LiteralCount {
                        literal: literal.to_string(),
                        figures: count_significant_figures(literal),
                    })
                    .collect()
            };
            (session, Reply::Counts(counts))
        },
        ":log" => {
            if arg.is_empty() {
                let level = common::logging::get_log_level();
                return (session, Reply::Message(format!("log level: {}", level)));
            }
            let message = match common::logging::set_log_level(arg) {
                Ok(()) => format!("log level: {}", arg),
                Err(e) => e,
            };
            (session, Reply::Message(message))
        },
        ":help" | ":h" | ":?" => (session, Reply::Help),
        ":quit" | ":exit" | ":q" => (session, Reply::Quit),
        unknown => (session, Reply::Unknown(unknown.to_string())),
    }
}

fn render(reply: &Reply) -> Result<()> {
    match reply {
        Reply::Solved(report) => output::print_solve(report, false)?,
        Reply::Counts(counts) => output::print_counts(counts, false)?,
        Reply::Input(input) => println!("{} {}", "input:".dimmed(), input),
        Reply::Target(target) => println!("{} {}", "rounding:".dimmed(), target),
        Reply::Message(message) => println!("{}", message),
        Reply::Usage(usage) => println!("Usage: {}", usage),
        Reply::Unknown(cmd) => println!(
            "Unknown command '{}'. Type '{}' for available commands.",
            cmd.red(),
            ":help".bright_yellow()
        ),
        Reply::Help => print_help(),
        Reply::Quit => {},
    }
    Ok(())
}

/// Interactive REPL loop
pub fn run<E: Evaluator>(engine: &CalcEngine<E>, config: &SigcalcConfig) -> Result<()> {
    let rl_config = rustyline::Config::builder()
        .completion_type(rustyline::CompletionType::List)
        .build();
    let mut rl = Editor::with_config(rl_config).context("Failed to initialize readline")?;
    rl.set_helper(Some(ReplHelper));

    println!("{}", "Significant Figures Calculator".bright_cyan().bold());
    println!(
        "Type an expression to solve, '{}' for commands\n",
        ":help".bright_yellow()
    );

    let mut session = Session::with_target(config.rounding);

    loop {
        let prompt = format!("{}[{}]> ", config.prompt, session.target());
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                // Add to history (ignore errors)
                let _ = rl.add_history_entry(line);

                let (next, reply) = execute_repl_command(session, engine, line);
                session = next;
                if reply == Reply::Quit {
                    break;
                }
                if let Err(e) = render(&reply) {
                    eprintln!("{} {}", "Error:".red(), e);
                }
            },
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C - ignore and continue
                println!("^C");
                continue;
            },
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                break;
            },
            Err(e) => {
                eprintln!("{} {}", "Readline error:".red(), e);
                break;
            },
        }
    }

    println!("Bye!");
    Ok(())
}

/// Print help message
fn print_help() {
    println!("{}", "=== Input ===".bright_cyan());
    println!();
    println!("  Type an expression and press Enter to solve it.");
    println!("  Symbols: + - × ÷ ^ ( ) log ln e   (* and / also work)");
    println!("  Side by side factors multiply: 2e, 2(3), 2log(100).");
    println!();
    println!("{}", "=== Commands ===".bright_cyan());
    println!();
    println!("  {}      Solve the current input again", ":solve".bright_yellow());
    println!("  {}      Clear the input and result", ":clear".bright_yellow());
    println!("  {}       Remove the last entry", ":back".bright_yellow());
    println!("  {}       Show the current input", ":show".bright_yellow());
    println!("  {} Append keypad keys", ":press <keys>".bright_yellow());
    println!("  {} Round results to 1-5 figures", ":round <n|off>".bright_yellow());
    println!("  {}   Count figures (current input if omitted)", ":count [lit]".bright_yellow());
    println!("  {}  Show or change the log level", ":log [level]".bright_yellow());
    println!("  {}       Show this help message", ":help".bright_yellow());
    println!("  {}       Exit", ":quit".bright_yellow());
    println!();
    println!("{}", "=== Notes ===".bright_cyan());
    println!();
    println!("  Solves expressions and counts the significant figures of typed numbers.");
    println!("  Does not apply the even rule: halves round away from zero.");
    println!("  Addition and subtraction round by least number of decimals.");
    println!();
}
