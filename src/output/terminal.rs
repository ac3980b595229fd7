//! Terminal output formatting with colors and box drawing.

use colored::Colorize;

use crate::result::{AnalysisReport, ConfidenceInterval};
use crate::statistics::Summary;

/// Format one summary under a label.
pub fn format_summary(label: &str, summary: &Summary) -> String {
    let mut output = String::new();
    output.push_str(&format!("  {}\n", label.bold()));
    for line in summary.to_string().lines() {
        output.push_str("    ");
        output.push_str(line);
        output.push('\n');
    }
    output
}

/// Format an AnalysisReport for human-readable terminal output.
pub fn format_report(report: &AnalysisReport) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str("galton-bootstrap\n");
    output.push_str(&sep);
    output.push('\n');
    output.push('\n');

    if let Some(input) = &report.metadata.input {
        output.push_str(&format!("  Input: {}\n", input));
    }
    output.push_str(&format!(
        "  Rows: {}   Replicates: {}   Resample size: {}\n\n",
        report.table_info.rows,
        report.bootstrap.replicates(),
        report.bootstrap.resample_size
    ));

    output.push_str(&format_summary("All children", &report.all_children));
    output.push('\n');
    output.push_str(&format_summary("Female children", &report.female_children));
    output.push('\n');
    output.push_str(&format_summary("Male children", &report.male_children));
    output.push('\n');
    output.push_str(&format_summary(
        "Bootstrap differences (male - female)",
        &report.differences,
    ));
    output.push('\n');

    output.push_str(&format!(
        "  {}\n",
        "Two-sample t test of the two series".bold()
    ));
    output.push_str(&format_interval(&report.t_interval));
    output.push_str(&format!(
        "  {}\n",
        "Two-sample t test of the differences".bold()
    ));
    output.push_str(&format_interval(&report.percentile_interval));

    output.push_str(&sep);
    output.push('\n');
    output.push_str(&format!(
        "Finished in {:.2} s\n",
        report.metadata.runtime_secs
    ));

    output
}

/// Colored verdict line for an interval.
fn format_interval(interval: &ConfidenceInterval) -> String {
    let headline = if interval.is_significant() {
        "\u{26A0} Difference is statistically significant".yellow().bold()
    } else {
        "\u{2713} No statistically significant difference".green().bold()
    };
    format!("    {}\n    {}\n\n", headline, interval.verdict())
}
