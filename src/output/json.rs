//! JSON serialization for analysis reports.

use crate::result::AnalysisReport;

/// Serialize an AnalysisReport to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for AnalysisReport).
pub fn to_json(report: &AnalysisReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

/// Serialize an AnalysisReport to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for AnalysisReport).
pub fn to_json_pretty(report: &AnalysisReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
