//! metric-cli - SI unit calculator
//!
//! Usage:
//!   metric-cli "1000 kg*m^2*s^-3"        # Single expression
//!   echo "5 g*m/s^2" | metric-cli        # Pipe mode
//!   metric-cli -f units.txt              # File mode
//!   metric-cli -i                        # Interactive REPL
//!   metric-cli -F cd "12 kg*m/s^3"       # Plain output, divisor layout

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use metric_core::{Dimension, Unit};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "metric-cli")]
#[command(about = "Parse, simplify and format SI unit expressions", long_about = None)]
struct Args {
    /// Unit expression to evaluate
    expression: Option<String>,

    /// Read expressions from file, one per line
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Interactive REPL mode
    #[arg(short, long)]
    interactive: bool,

    /// Show only the result (no input echo)
    #[arg(short, long)]
    quiet: bool,

    /// Format flags: c plain, d divisor, b base units only, i no magnitude
    #[arg(short = 'F', long, env = "METRIC_FORMAT", default_value = "")]
    format: String,

    /// Print one JSON object per line
    #[arg(long)]
    json: bool,
}

/// Output settings shared by every input mode
struct Output {
    format: String,
    quiet: bool,
    json: bool,
}

/// One evaluated line in `--json` mode
#[derive(Serialize)]
struct LineResult<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimension: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr so piped output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut output = Output {
        format: args.format,
        quiet: args.quiet,
        json: args.json,
    };
    debug!(format = %output.format, "starting");

    let mut failures = 0usize;

    // Determine input source
    if let Some(expr) = &args.expression {
        // Single expression mode
        failures += usize::from(!eval_and_print(&output, expr)?);
    } else if let Some(path) = &args.file {
        // File mode
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        for line in content.lines() {
            failures += usize::from(!eval_and_print(&output, line)?);
        }
    } else if args.interactive {
        // Interactive REPL
        run_repl(&mut output)?;
    } else if !io::stdin().is_terminal() {
        // Pipe mode (stdin is not a tty)
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            failures += usize::from(!eval_and_print(&output, &line)?);
        }
    } else {
        // No input, show help
        eprintln!("Usage: metric-cli <expression>");
        eprintln!("       metric-cli -f <file>");
        eprintln!("       metric-cli -i");
        eprintln!("       echo \"5 kg*m/s^2\" | metric-cli");
        return Ok(ExitCode::FAILURE);
    }

    if failures > 0 {
        debug!(failures, "some lines failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Evaluate one line and print it. Returns whether the line parsed; blank
/// lines and `#` comments count as success.
fn eval_and_print(output: &Output, input: &str) -> Result<bool> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        if !output.quiet && !output.json {
            println!("{input}");
        }
        return Ok(true);
    }

    let result = trimmed.parse::<Unit>();

    if output.json {
        let line = match &result {
            Ok(unit) => LineResult {
                input: trimmed,
                quantity: Some(unit.quantity()),
                display: Some(unit.format(&output.format)),
                dimension: Some(*unit.dimension()),
                error: None,
            },
            Err(e) => LineResult {
                input: trimmed,
                quantity: None,
                display: None,
                dimension: None,
                error: Some(e.to_string()),
            },
        };
        println!("{}", serde_json::to_string(&line)?);
        return Ok(result.is_ok());
    }

    match result {
        Ok(unit) => {
            let display = unit.format(&output.format);
            if output.quiet {
                println!("{display}");
            } else {
                // Pad input to align results
                let padding = 40usize.saturating_sub(trimmed.chars().count());
                println!("{trimmed}{:>padding$} = {display}", "");
            }
            Ok(true)
        }
        Err(e) => {
            eprintln!("{trimmed}: error: {e}");
            Ok(false)
        }
    }
}

fn run_repl(output: &mut Output) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("metric - SI unit calculator");
    println!("Type unit expressions to simplify. Press Ctrl+D to exit.\n");

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            println!();
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Special commands
        match line.to_lowercase().as_str() {
            "quit" | "exit" => break,
            "help" => {
                print_help();
                continue;
            }
            _ => {}
        }
        if let Some(flags) = line.strip_prefix("format") {
            output.format = flags.trim().to_string();
            println!("Format flags: \"{}\"", output.format);
            continue;
        }

        eval_and_print(output, line)?;
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"
Commands:
  help            Show this help
  format <flags>  Change output flags (c plain, d divisor, b base only, i no magnitude)
  quit            Exit the REPL

Examples:
  1000 kg*m^2*s^-3     Recognized as 1kW
  5 g·m·s⁻²            Prefixes move onto derived units: 5mN
  12 kg*m/s^3          Mixed result: 12N·s⁻¹
  3 kohm               Aliases work too
"#
    );
}
