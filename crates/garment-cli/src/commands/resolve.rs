//! Resolve command implementation.

use crate::cli::ResolveArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use garment_domain::ExactFraction;
use garment_resolver::{AuditTrail, ConcessionResolver, TracingObserver};

/// Execute the resolve command.
pub fn execute_resolve(args: ResolveArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let tokens: Vec<&str> = args.claims.iter().map(String::as_str).collect();
    let claims = parse_claims(&tokens)?;

    println!("{}", resolve_claims(&claims, args.trace, config, formatter)?);

    Ok(())
}

/// Resolve `claims` with the configured resolver and render the outcome.
pub fn resolve_claims(
    claims: &[ExactFraction],
    trace: bool,
    config: &Config,
    formatter: &Formatter,
) -> Result<String> {
    let resolver = ConcessionResolver::new(config.resolver.clone());

    if trace {
        let mut observer = (TracingObserver, AuditTrail::new());
        let resolution = resolver.resolve_observed(claims, &mut observer)?;
        formatter.format_resolution(&resolution, Some(&observer.1))
    } else {
        let resolution = resolver.resolve(claims)?;
        formatter.format_resolution(&resolution, None)
    }
}

/// Parse claims from tokens such as `1`, `1/2`, `0.25` or `1,1/2`.
pub fn parse_claims(tokens: &[&str]) -> Result<Vec<ExactFraction>> {
    let claims: Vec<ExactFraction> = tokens
        .iter()
        .flat_map(|token| token.split(','))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<ExactFraction>().map_err(|e| {
                CliError::InvalidInput(format!("'{}' is not a valid claim: {}", part, e))
            })
        })
        .collect::<Result<_>>()?;

    if claims.is_empty() {
        return Err(CliError::InvalidInput(
            "Expected at least one claim, e.g. '1 1/2'".to_string(),
        ));
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_claims() {
        let claims = parse_claims(&["1", "1/2", "0.25"]).unwrap();
        assert_eq!(
            claims,
            vec![
                ExactFraction::one(),
                ExactFraction::new(1, 2).unwrap(),
                ExactFraction::new(1, 4).unwrap(),
            ]
        );
    }

    #[test]
    fn test_parse_comma_separated() {
        let claims = parse_claims(&["1,1/2,", "1/3"]).unwrap();
        assert_eq!(claims.len(), 3);
    }

    #[test]
    fn test_parse_invalid_claim() {
        let err = parse_claims(&["1", "3/2"]).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
        assert!(err.to_string().contains("'3/2' is not a valid claim"));

        assert!(parse_claims(&["abc"]).is_err());
        assert!(parse_claims(&[","]).is_err());
    }

    #[test]
    fn test_resolve_claims_quiet() {
        let config = Config::default();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let claims = parse_claims(&["1", "1", "1/2"]).unwrap();

        let output = resolve_claims(&claims, false, &config, &formatter).unwrap();
        assert_eq!(output, "5/12\n5/12\n1/6");
    }

    #[test]
    fn test_resolve_claims_with_trace() {
        let config = Config::default();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let claims = parse_claims(&["1", "1/2"]).unwrap();

        let output = resolve_claims(&claims, true, &config, &formatter).unwrap();
        assert!(output.contains("Round"));
        assert!(output.contains("3/4"));
    }

    #[test]
    fn test_resolve_failure_surfaces() {
        let config = Config::default();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let claims = parse_claims(&["1", "1/4"]).unwrap();

        assert!(matches!(
            resolve_claims(&claims, false, &config, &formatter),
            Err(CliError::Dispute(_))
        ));
    }
}
