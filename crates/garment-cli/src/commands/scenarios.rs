//! Scenarios command implementation.

use crate::cli::ScenariosArgs;
use crate::commands::resolve_claims;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use garment_domain::ExactFraction;

/// Execute the scenarios command.
pub fn execute_scenarios(args: ScenariosArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    match args.name {
        Some(name) => {
            let claims = config.scenario(&name)?;
            print_header(&name, claims, formatter);
            println!("{}", resolve_claims(claims, args.trace, config, formatter)?);
        }
        None if args.all => run_all(config, args.trace, formatter),
        None => println!("{}", formatter.format_scenarios(&config.scenarios)?),
    }

    Ok(())
}

/// Resolve every scenario, reporting failures without stopping.
fn run_all(config: &Config, trace: bool, formatter: &Formatter) {
    for (name, claims) in &config.scenarios {
        print_header(name, claims, formatter);
        match resolve_claims(claims, trace, config, formatter) {
            Ok(output) => println!("{}", output),
            Err(e) => eprintln!("{}", formatter.warning(&format!("{}: {}", name, e))),
        }
        if formatter.format() == OutputFormat::Table {
            println!();
        }
    }
}

fn print_header(name: &str, claims: &[ExactFraction], formatter: &Formatter) {
    // Headers would break JSON and quiet output
    if formatter.format() != OutputFormat::Table {
        return;
    }
    let claims: Vec<String> = claims.iter().map(ToString::to_string).collect();
    println!("{}", formatter.info(&format!("{}: {}", name, claims.join(", "))));
}
