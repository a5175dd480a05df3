//! Output formatting for the CLI.

use crate::commands::show::ChemicalDetail;
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use colored::*;
use hazmix_domain::traits::ReferenceStats;
use hazmix_domain::{HazardCategoryId, HazardKind, ReactiveGroup, Severity};
use hazmix_engine::{AnalysisResult, GroupOrigin, PairResult};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
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

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format an analysis result.
    pub fn format_analysis(&self, result: &AnalysisResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Quiet => Ok(result.summary.overall_assessment.to_string()),
            OutputFormat::Table => Ok(self.format_analysis_table(result)),
        }
    }

    fn format_analysis_table(&self, result: &AnalysisResult) -> String {
        let summary = &result.summary;
        let mut sections = Vec::new();

        let mut verdict = format!(
            "Overall assessment: {}",
            self.colorize(
                summary.overall_assessment.as_str(),
                severity_color(worst_severity(result))
            )
        );
        if summary.incomplete_data {
            verdict.push_str(&format!(
                " ({} pair(s) without data)",
                summary.unknown_count
            ));
        }
        sections.push(verdict);

        let mut groups = Builder::default();
        groups.push_record(["Group", "Name", "From"]);
        for group in &result.groups {
            let origins: Vec<String> = group.origins.iter().map(origin_label).collect();
            groups.push_record([group.id.to_string(), group.name.clone(), origins.join(", ")]);
        }
        sections.push(render(groups));

        let mut pairs = Builder::default();
        pairs.push_record(["Pair", "Level", "Hazards", "Gas Products"]);
        for pair in &result.pairwise_matrix {
            pairs.push_record([
                pair_label(pair),
                self.colorize(pair.level.as_str(), severity_color(pair.level)),
                hazard_names(&pair.hazards),
                pair.gas_products.clone(),
            ]);
        }
        sections.push(render(pairs));

        let counts: Vec<String> = Severity::ALL
            .iter()
            .map(|s| format!("{} {}", summary.count(*s), s))
            .collect();
        sections.push(format!(
            "{} pair(s): {}",
            summary.total_pairs,
            counts.join(", ")
        ));

        if !result.critical_pairs.is_empty() {
            let lines: Vec<String> = result
                .critical_pairs
                .iter()
                .map(|pair| {
                    let detail = if pair.documentation.is_empty() {
                        String::new()
                    } else {
                        format!(": {}", pair.documentation)
                    };
                    format!("  {} {}{}", pair.level.as_str().to_uppercase(), pair_label(pair), detail)
                })
                .collect();
            sections.push(format!("Critical pairs:\n{}", lines.join("\n")));
        }

        if !result.hazard_rollup.is_empty() {
            let lines: Vec<String> = result
                .hazard_rollup
                .iter()
                .map(|h| format!("  {}: {}", h.name, h.short_phrase))
                .collect();
            sections.push(format!("Possible hazards:\n{}", lines.join("\n")));
        }

        for warning in &result.warnings {
            sections.push(self.warning(warning));
        }

        sections.join("\n\n")
    }

    /// Format a list of reactive groups.
    pub fn format_groups(&self, groups: &[ReactiveGroup]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(groups)?),
            OutputFormat::Quiet => Ok(groups
                .iter()
                .map(|g| g.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if groups.is_empty() {
                    return Ok(self.colorize("No reactive groups found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Special Handling"]);
                for group in groups {
                    builder.push_record([
                        group.id.to_string(),
                        group.name.clone(),
                        if group.special_handling { "yes" } else { "" }.to_string(),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a chemical detail view.
    pub fn format_chemical(&self, detail: &ChemicalDetail) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(detail)?),
            OutputFormat::Quiet => Ok(detail
                .groups
                .iter()
                .map(|g| g.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let chemical = &detail.chemical;
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["ID".to_string(), chemical.id.to_string()]);
                builder.push_record(["Name".to_string(), chemical.name.clone()]);
                builder.push_record([
                    "Formula".to_string(),
                    chemical.formula.clone().unwrap_or_default(),
                ]);
                builder.push_record(["CAS".to_string(), detail.cas_numbers.join(", ")]);
                builder.push_record(["UN/NA".to_string(), detail.un_numbers.join(", ")]);
                let groups: Vec<String> = detail
                    .groups
                    .iter()
                    .map(|g| format!("{} {}", g.id, g.name))
                    .collect();
                builder.push_record(["Reactive Groups".to_string(), groups.join("\n")]);
                let special: Vec<&str> = detail.special_hazards.iter().map(|h| h.label()).collect();
                builder.push_record(["Special Hazards".to_string(), special.join(", ")]);
                Ok(render(builder))
            }
        }
    }

    /// Format database statistics.
    pub fn format_stats(&self, stats: &ReferenceStats) -> Result<String> {
        let rows = [
            ("chemicals", stats.total_chemicals),
            ("reactive_groups", stats.total_groups),
            ("rules", stats.total_rules),
            ("dangerous_rules", stats.dangerous_rules),
        ];
        match self.format {
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = rows
                    .iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::from(*v)))
                    .collect();
                Ok(serde_json::to_string_pretty(&map)?)
            }
            OutputFormat::Quiet => Ok(rows
                .iter()
                .map(|(_, v)| v.to_string())
                .collect::<Vec<_>>()
                .join(" ")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Table", "Rows"]);
                for (name, count) in rows {
                    builder.push_record([name.to_string(), count.to_string()]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format an error for display.
    pub fn format_error(&self, err: &CliError) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&err.to_response())
                .unwrap_or_else(|_| format!("{{\"code\": \"{}\"}}", err.code())),
            _ => self.error(&err.to_string()),
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

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
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
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn worst_severity(result: &AnalysisResult) -> Severity {
    result
        .pairwise_matrix
        .iter()
        .map(|p| p.level)
        .max()
        .unwrap_or(Severity::None)
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::None => "green",
        Severity::Unknown => "cyan",
        Severity::Caution => "yellow",
        Severity::Warning => "magenta",
        Severity::Dangerous => "red",
    }
}

fn pair_label(pair: &PairResult) -> String {
    format!("{} + {}", pair.group_a, pair.group_b)
}

fn origin_label(origin: &GroupOrigin) -> String {
    match origin {
        GroupOrigin::Chemical(id) => id.to_string(),
        GroupOrigin::Explicit => "explicit".to_string(),
        GroupOrigin::Water => "water".to_string(),
    }
}

fn hazard_names(ids: &[HazardCategoryId]) -> String {
    ids.iter()
        .map(|id| {
            HazardKind::from_id(*id)
                .map(|kind| kind.name().to_string())
                .unwrap_or_else(|| id.to_string())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hazmix_domain::{Assessment, GroupId};
    use hazmix_engine::{ResolvedGroup, Summary};
    use std::collections::BTreeSet;

    fn sample_result() -> AnalysisResult {
        let pair = PairResult {
            group_a: GroupId::new(1),
            group_b: GroupId::new(5),
            level: Severity::Warning,
            hazards: vec![HazardKind::GeneratesGas.id(), HazardKind::Toxic.id()],
            gas_products: "HCl".to_string(),
            documentation: "Fumes".to_string(),
            sources_a: vec![],
            sources_b: vec![],
            note: None,
        };
        AnalysisResult {
            resolved_groups: vec![GroupId::new(1), GroupId::new(5)],
            groups: vec![ResolvedGroup {
                id: GroupId::new(1),
                name: "Acids, Strong Non-oxidizing".to_string(),
                description: String::new(),
                special_handling: false,
                origins: BTreeSet::from([GroupOrigin::Water]),
            }],
            pairwise_matrix: vec![pair.clone()],
            critical_pairs: vec![pair],
            summary: Summary {
                none_count: 0,
                unknown_count: 0,
                caution_count: 0,
                warning_count: 1,
                dangerous_count: 0,
                total_pairs: 1,
                overall_assessment: Assessment::Warning,
                incomplete_data: false,
            },
            hazard_rollup: vec![HazardKind::Toxic.category()],
            warnings: vec!["Group 1 requires special handling".to_string()],
        }
    }

    #[test]
    fn test_analysis_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_analysis(&sample_result()).unwrap();
        assert!(output.contains("Overall assessment: WARNING"));
        assert!(output.contains("1 + 5"));
        assert!(output.contains("Generates Gas, Toxic"));
        assert!(output.contains("WARNING 1 + 5: Fumes"));
        assert!(output.contains("⚠ Group 1 requires special handling"));
        assert!(!output.contains("without data"));
    }

    #[test]
    fn test_analysis_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_analysis(&sample_result()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["summary"]["overallAssessment"], "WARNING");
    }

    #[test]
    fn test_analysis_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, true);
        assert_eq!(formatter.format_analysis(&sample_result()).unwrap(), "WARNING");
    }

    #[test]
    fn test_groups_formats() {
        let groups = vec![
            ReactiveGroup::new(GroupId::new(1), "Acids", ""),
            ReactiveGroup::new(GroupId::new(21), "Metals, Alkali", "").with_special_handling(),
        ];
        let quiet = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(quiet.format_groups(&groups).unwrap(), "1\n21");

        let table = Formatter::new(OutputFormat::Table, false);
        let output = table.format_groups(&groups).unwrap();
        assert!(output.contains("Metals, Alkali"));
        assert!(table.format_groups(&[]).unwrap().contains("No reactive groups"));
    }

    #[test]
    fn test_stats_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let stats = ReferenceStats {
            total_chemicals: 3,
            total_groups: 2,
            total_rules: 1,
            dangerous_rules: 0,
        };
        let json: serde_json::Value =
            serde_json::from_str(&formatter.format_stats(&stats).unwrap()).unwrap();
        assert_eq!(json["chemicals"], 3);
        assert_eq!(json["dangerous_rules"], 0);
    }

    #[test]
    fn test_error_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_error(&CliError::InvalidInput("no chemicals".into()));
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["code"], "INVALID_INPUT");
    }

    #[test]
    fn test_no_color() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("done"), "✓ done");
    }
}
