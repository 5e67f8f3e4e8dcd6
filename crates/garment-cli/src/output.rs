//! Output formatting for the CLI.

use crate::config::{OutputFormat, Scenarios};
use crate::error::Result;
use colored::*;
use garment_resolver::{AuditTrail, Resolution};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
    Table,
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a resolution, preceded by its rounds when a trail is given.
    pub fn format_resolution(
        &self,
        resolution: &Resolution,
        trail: Option<&AuditTrail>,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_resolution_json(resolution, trail),
            OutputFormat::Table => Ok(self.format_resolution_table(resolution, trail)),
            OutputFormat::Quiet => Ok(self.format_resolution_quiet(resolution)),
        }
    }

    fn format_resolution_json(
        &self,
        resolution: &Resolution,
        trail: Option<&AuditTrail>,
    ) -> Result<String> {
        let value = match trail {
            Some(trail) => serde_json::json!({
                "resolution": resolution,
                "events": trail.events(),
            }),
            None => serde_json::to_value(resolution)?,
        };
        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_resolution_table(&self, resolution: &Resolution, trail: Option<&AuditTrail>) -> String {
        let mut sections = Vec::new();

        if let Some(trail) = trail {
            sections.push(self.format_rounds_table(trail));
        }

        let mut builder = Builder::default();
        builder.push_record(["Claimant", "Claim", "Allocation", "≈"]);
        for allocation in &resolution.allocations {
            builder.push_record([
                allocation.id.to_string(),
                allocation.claim.to_string(),
                allocation.allocation.to_string(),
                format!("{:.4}", allocation.allocation.to_f64()),
            ]);
        }
        sections.push(styled(builder.build()));

        let total = resolution.total();
        let total = format!("Total distributed: {}/{}", total.numer(), total.denom());
        sections.push(if resolution.disputed {
            self.colorize(&format!("{total} ({} rounds)", resolution.rounds), "green")
        } else {
            self.colorize(&format!("{total} (claims fit, awarded in full)"), "cyan")
        });

        sections.join("\n")
    }

    fn format_rounds_table(&self, trail: &AuditTrail) -> String {
        let mut lines = Vec::new();

        let mut rounds = trail.rounds().peekable();
        if rounds.peek().is_some() {
            let mut builder = Builder::default();
            builder.push_record([
                "Round",
                "Concession",
                "Full share",
                "Partial share",
                "Full",
                "Partial",
                "Allocated",
                "Promoted",
                "Remainder",
            ]);
            for record in rounds {
                let promoted: Vec<String> = record.promoted.iter().map(|id| id.to_string()).collect();
                builder.push_record([
                    record.round.to_string(),
                    record.concession.to_string(),
                    record.full_share.to_string(),
                    record.partial_share.to_string(),
                    record.fulls_before.to_string(),
                    record.partials_before.to_string(),
                    record.allocated.to_string(),
                    promoted.join(", "),
                    record.remainder.to_string(),
                ]);
            }
            lines.push(styled(builder.build()));
        } else {
            lines.push(self.info("No concession rounds"));
        }

        if let Some(split) = trail.remainder_split() {
            lines.push(self.info(&format!(
                "Remainder {} split evenly: {} each",
                split.remainder, split.share
            )));
        }

        lines.join("\n")
    }

    /// One allocation per line, in identifier order.
    fn format_resolution_quiet(&self, resolution: &Resolution) -> String {
        let amounts: Vec<String> = resolution
            .allocations
            .iter()
            .map(|a| a.allocation.to_string())
            .collect();
        amounts.join("\n")
    }

    /// Format the scenario listing.
    pub fn format_scenarios(&self, scenarios: &Scenarios) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(scenarios)?),
            OutputFormat::Quiet => Ok(scenarios.keys().cloned().collect::<Vec<_>>().join("\n")),
            OutputFormat::Table => {
                if scenarios.is_empty() {
                    return Ok(self.colorize("No scenarios configured.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Scenario", "Claims"]);
                for (name, claims) in scenarios {
                    let claims: Vec<String> = claims.iter().map(ToString::to_string).collect();
                    builder.push_record([name.clone(), claims.join(", ")]);
                }
                Ok(styled(builder.build()))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_scenarios;
    use garment_domain::ExactFraction;
    use garment_resolver::{ConcessionResolver, NoopObserver};

    fn classic() -> Resolution {
        let claims = vec![ExactFraction::one(), ExactFraction::new(1, 2).unwrap()];
        ConcessionResolver::default_config()
            .resolve_observed(&claims, &mut NoopObserver)
            .unwrap()
    }

    fn classic_trail() -> AuditTrail {
        let claims = vec![ExactFraction::one(), ExactFraction::new(1, 2).unwrap()];
        let mut trail = AuditTrail::new();
        ConcessionResolver::default_config()
            .resolve_observed(&claims, &mut trail)
            .unwrap();
        trail
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_resolution(&classic(), None).unwrap();
        assert!(output.contains("Claimant"));
        assert!(output.contains("3/4"));
        assert!(output.contains("0.2500"));
        assert!(output.contains("Total distributed: 1/1 (1 rounds)"));
    }

    #[test]
    fn test_table_format_with_trace() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_resolution(&classic(), Some(&classic_trail()))
            .unwrap();
        assert!(output.contains("Concession"));
        assert!(output.contains("Promoted"));
        assert!(output.contains("Remainder 0/1 split evenly: 0/1 each"));
    }

    #[test]
    fn test_undisputed_total_line() {
        let claims = vec![ExactFraction::new(1, 4).unwrap(); 2];
        let resolution = ConcessionResolver::default_config()
            .resolve_observed(&claims, &mut NoopObserver)
            .unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_resolution(&resolution, None).unwrap();
        assert!(output.contains("Total distributed: 1/2 (claims fit, awarded in full)"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_resolution(&classic(), None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["allocations"][0]["allocation"], "3/4");
        assert_eq!(value["allocations"][1]["id"], 2);
        assert_eq!(value["rounds"], 1);
    }

    #[test]
    fn test_json_format_with_trace() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter
            .format_resolution(&classic(), Some(&classic_trail()))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["resolution"]["disputed"], true);
        assert_eq!(value["events"][1]["event"], "round");
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_resolution(&classic(), None).unwrap();
        assert_eq!(output, "3/4\n1/4");
    }

    #[test]
    fn test_scenario_listing() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_scenarios(&default_scenarios()).unwrap();
        assert!(output.contains("classic"));
        assert!(output.contains("1/1, 1/2"));

        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_scenarios(&default_scenarios()).unwrap();
        assert_eq!(output.lines().count(), 7);
    }

    #[test]
    fn test_empty_scenarios() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_scenarios(&Scenarios::new()).unwrap();
        assert!(output.contains("No scenarios configured"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let msg = formatter.success("test");
        assert_eq!(msg, "✓ test");
    }
}
