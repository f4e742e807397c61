/*!
 * Reporting functionality for flatdump
 *
 * Turns a [`RunReport`] into something a person or a script can read:
 * console tables rendered with the tabled library, or JSON.
 */

use std::path::Path;

use clap::ValueEnum;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::error::Result;
use crate::types::{RunMode, RunReport};
use crate::utils::format_file_size;

/// Format of the report output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Console table output
    #[default]
    #[value(name = "table")]
    ConsoleTable,
    /// Pretty-printed JSON
    Json,
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string for a finished run
    pub fn generate_report(&self, report: &RunReport) -> Result<String> {
        match self.format {
            ReportFormat::ConsoleTable => Ok(self.generate_console_report(report)),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &RunReport) -> Result<()> {
        println!("{}", self.generate_report(report)?);
        Ok(())
    }

    // Show artifact paths relative to the output directory when possible
    fn format_path(&self, path: &Path, base: &Path) -> String {
        path.strip_prefix(base)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    fn style(table: &mut Table) {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
    }

    fn create_artifacts_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct ArtifactRow {
            #[tabled(rename = "Output File")]
            path: String,

            #[tabled(rename = "Files")]
            files: String,

            #[tabled(rename = "Size")]
            size: String,
        }

        let rows: Vec<ArtifactRow> = report
            .artifacts
            .iter()
            .map(|artifact| ArtifactRow {
                path: self.format_path(&artifact.path, &report.output_dir),
                files: if artifact.files == 0 {
                    "-".to_string()
                } else {
                    artifact.files.to_string()
                },
                size: format_file_size(artifact.bytes),
            })
            .collect();

        let mut table = Table::new(rows);
        Self::style(&mut table);
        table.to_string()
    }

    fn create_failures_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct FailureRow {
            #[tabled(rename = "Kind")]
            kind: String,

            #[tabled(rename = "Path")]
            path: String,

            #[tabled(rename = "Message")]
            message: String,
        }

        let rows: Vec<FailureRow> = report
            .failures
            .iter()
            .map(|failure| FailureRow {
                kind: failure.kind.to_string(),
                path: failure.path.display().to_string(),
                message: failure.message.clone(),
            })
            .collect();

        let mut table = Table::new(rows);
        Self::style(&mut table);
        table.to_string()
    }

    fn create_summary_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mode = match report.mode {
            RunMode::SingleFile => "single file",
            RunMode::Folder => "folder",
        };
        let rows = vec![
            SummaryRow {
                key: "Input".to_string(),
                value: format!("{} ({})", report.input.display(), mode),
            },
            SummaryRow {
                key: "Output".to_string(),
                value: report.output_dir.display().to_string(),
            },
            SummaryRow {
                key: "Files Aggregated".to_string(),
                value: report.files_aggregated().to_string(),
            },
            SummaryRow {
                key: "Failures".to_string(),
                value: report.failures.len().to_string(),
            },
            SummaryRow {
                key: "Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "Finished At".to_string(),
                value: report.finished_at.clone().unwrap_or_else(|| "-".to_string()),
            },
        ];

        let mut table = Table::new(rows);
        Self::style(&mut table);
        table.to_string()
    }

    // Generate a console table report
    fn generate_console_report(&self, report: &RunReport) -> String {
        let mut out = format!(
            "OUTPUT FILES\n{}\n",
            self.create_artifacts_table(report)
        );
        if !report.failures.is_empty() {
            out.push_str(&format!(
                "\nFAILURES\n{}\n",
                self.create_failures_table(report)
            ));
        }
        out.push_str(&format!(
            "\nOPERATION COMPLETE\n{}",
            self.create_summary_table(report)
        ));
        out
    }
}
