//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::commands::{parse_claims, resolve_claims};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use garment_domain::ExactFraction;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::Path;

/// Run the interactive REPL.
pub fn run_repl(config: &Config, history_path: &Path, formatter: &Formatter) -> Result<()> {
    println!(
        "{}",
        formatter.info("Garment REPL - Enter claims to resolve, 'help' for commands, 'exit' to quit")
    );
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)?
        .auto_add_history(false)
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    // Load history
    let _ = editor.load_history(history_path);

    loop {
        match editor.readline("garment> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => print_help(formatter),
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, config, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    if let Some(parent) = history_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    editor.save_history(history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Resolve {
        claims: Vec<ExactFraction>,
        trace: bool,
    },
    ListScenarios,
    Scenario {
        name: String,
        trace: bool,
    },
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    let Some((&first, rest)) = parts.split_first() else {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    };

    match first {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "scenarios" => Ok(ReplCommand::ListScenarios),
        "scenario" => parse_scenario_command(rest),
        "trace" => Ok(ReplCommand::Resolve {
            claims: parse_claims(rest)?,
            trace: true,
        }),
        "resolve" => Ok(ReplCommand::Resolve {
            claims: parse_claims(rest)?,
            trace: false,
        }),
        _ => parse_claims(&parts)
            .map(|claims| ReplCommand::Resolve {
                claims,
                trace: false,
            })
            .map_err(|_| {
                CliError::InvalidInput(format!(
                    "Unknown command: {}. Type 'help' for available commands.",
                    first
                ))
            }),
    }
}

fn parse_scenario_command(args: &[&str]) -> Result<ReplCommand> {
    match args {
        [name] => Ok(ReplCommand::Scenario {
            name: name.to_string(),
            trace: false,
        }),
        [name, "trace"] | ["trace", name] => Ok(ReplCommand::Scenario {
            name: name.to_string(),
            trace: true,
        }),
        _ => Err(CliError::InvalidInput(
            "Usage: scenario <name> [trace]".to_string(),
        )),
    }
}

/// Execute a REPL command.
fn execute_repl_command(cmd: ReplCommand, config: &Config, formatter: &Formatter) -> Result<()> {
    match cmd {
        ReplCommand::Resolve { claims, trace } => {
            println!("{}", resolve_claims(&claims, trace, config, formatter)?);
        }
        ReplCommand::ListScenarios => {
            println!("{}", formatter.format_scenarios(&config.scenarios)?);
        }
        ReplCommand::Scenario { name, trace } => {
            let claims = config.scenario(&name)?;
            println!("{}", resolve_claims(claims, trace, config, formatter)?);
        }
        ReplCommand::Exit | ReplCommand::Help => {}
    }

    Ok(())
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  <claims>                       - Resolve claims, e.g. 1 1/2 0.25");
    println!("  resolve <claims>               - Same as above");
    println!("  trace <claims>                 - Resolve and show each concession round");
    println!("  scenarios                      - List configured scenarios");
    println!("  scenario <name> [trace]        - Resolve a named scenario");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}
