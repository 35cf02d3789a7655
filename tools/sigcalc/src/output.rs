//! Result rendering for one-shot commands and the REPL

use anyhow::Result;
use colored::*;
use serde::Serialize;
use sigfig_calc::{count_literals, CalcEngine, Evaluator, LiteralCount, Outcome, RoundingTarget, Session};

/// Everything shown for one solved expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveReport {
    pub input: String,
    pub normalized: String,
    pub target: RoundingTarget,
    pub result: Outcome,
    /// Counts of the typed literals, not of the result
    pub literals: Vec<LiteralCount>,
}

impl SolveReport {
    /// Build the report for a session that has just been solved
    pub fn from_session<E: Evaluator>(session: &Session, engine: &CalcEngine<E>) -> Self {
        Self {
            input: session.input().to_string(),
            normalized: engine.normalize(session.input()),
            target: session.target(),
            result: session.result().unwrap_or(Outcome::Error),
            literals: count_literals(session.input()),
        }
    }
}

fn format_outcome(outcome: Outcome) -> ColoredString {
    match outcome {
        Outcome::Value(_) => outcome.to_string().bright_green().bold(),
        Outcome::Error => outcome.to_string().red().bold(),
    }
}

fn format_literals(literals: &[LiteralCount]) -> String {
    literals
        .iter()
        .map(|c| format!("{} ({})", c.literal, c.figures))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print a solve report
pub fn print_solve(report: &SolveReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("{} {}", "=".bright_cyan(), format_outcome(report.result));
    if !report.target.is_off() {
        println!(
            "  {} {} significant figures",
            "rounded:".dimmed(),
            report.target
        );
    }
    if !report.literals.is_empty() {
        println!(
            "  {} {}",
            "figures:".dimmed(),
            format_literals(&report.literals)
        );
    }
    Ok(())
}

/// Print significant figure counts, one literal per line
pub fn print_counts(counts: &[LiteralCount], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(counts)?);
        return Ok(());
    }

    for count in counts {
        println!(
            "{} {} {}",
            count.literal.bright_yellow(),
            "->".dimmed(),
            count.figures.to_string().bright_green().bold()
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct RoundReport {
    value: f64,
    target: RoundingTarget,
    rounded: f64,
}

/// Print a value rounded to a target
pub fn print_rounded(value: f64, target: RoundingTarget, json: bool) -> Result<()> {
    let rounded = target.apply(value);
    if json {
        let report = RoundReport {
            value,
            target,
            rounded,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", rounded.to_string().bright_green().bold());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_session() {
        let engine = CalcEngine::with_evalexpr().unwrap();
        let session = Session::with_target(RoundingTarget::Figures(3))
            .set_input("673.456")
            .solve(&engine);

        let report = SolveReport::from_session(&session, &engine);
        assert_eq!(report.result, Outcome::Value(673.0));
        assert_eq!(report.normalized, "673.456");
        assert_eq!(report.literals.len(), 1);
        assert_eq!(report.literals[0].figures, 6);
    }

    #[test]
    fn test_unsolved_session_reports_error() {
        let engine = CalcEngine::with_evalexpr().unwrap();
        let report = SolveReport::from_session(&Session::new().set_input("1+1"), &engine);

        assert_eq!(report.result, Outcome::Error);
    }

    #[test]
    fn test_report_json_shape() {
        let engine = CalcEngine::with_evalexpr().unwrap();
        let session = Session::new().set_input("1/(2").solve(&engine);
        let report = SolveReport::from_session(&session, &engine);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["result"]["status"], "error");
        assert_eq!(json["target"], "off");
        assert_eq!(json["literals"][0]["literal"], "1");
    }

    #[test]
    fn test_format_literals() {
        let counts = count_literals("0.0025×30.00");
        assert_eq!(format_literals(&counts), "0.0025 (2), 30.00 (4)");
    }
}
