//! Main `GaltonAnalysis` entry point and builder.

use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Local};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::analysis::{percentile_interval, pooled_t_interval};
use crate::config::AnalysisConfig;
use crate::data::{load_csv, observations, Table};
use crate::error::AnalysisError;
use crate::output::{Chart, Histogram, HtmlReport};
use crate::result::{AnalysisReport, ConfidenceInterval, Metadata};
use crate::statistics::{bootstrap_mean_difference, describe};
use crate::types::Sex;

/// Report file name inside the output directory.
pub const REPORT_FILE: &str = "galton.html";
/// Female height histogram file name.
pub const FEMALE_HISTOGRAM_FILE: &str = "galton_female_height.svg";
/// Male height histogram file name.
pub const MALE_HISTOGRAM_FILE: &str = "galton_male_height.svg";
/// Bootstrap difference histogram file name.
pub const DIFFERENCE_HISTOGRAM_FILE: &str = "galton_height_difference.svg";

/// A stratum smaller than this share of the table gets a warning.
const MIN_STRATUM_SHARE: f64 = 0.05;

/// Main entry point for the height analysis.
///
/// Use the builder pattern to configure, then either analyze an in-memory
/// table or run the whole pipeline from a CSV file.
///
/// # Example
///
/// ```no_run
/// use galton_bootstrap::GaltonAnalysis;
///
/// let report = GaltonAnalysis::new()
///     .replicates(2_000)
///     .seed(42)
///     .run("galton.csv", ".")
///     .unwrap();
///
/// println!("{}", report.t_interval.verdict());
/// ```
#[derive(Debug, Clone, Default)]
pub struct GaltonAnalysis {
    config: AnalysisConfig,
}

/// Height series of each stratum, kept for the histograms.
struct Strata {
    female: Vec<f64>,
    male: Vec<f64>,
}

impl GaltonAnalysis {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    /// Create with a reduced replicate count (200) for quick looks and tests.
    pub fn quick() -> Self {
        Self {
            config: AnalysisConfig {
                replicates: 200,
                ..AnalysisConfig::default()
            },
        }
    }

    /// Create from an explicit configuration.
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Set the number of bootstrap replicates.
    pub fn replicates(mut self, n: usize) -> Self {
        self.config.replicates = n;
        self
    }

    /// Set the significance level of both intervals.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self
    }

    /// Set the resample size as a fraction of the table.
    pub fn fraction(mut self, fraction: f64) -> Self {
        self.config.fraction = fraction;
        self
    }

    /// Set a deterministic resampling seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the percentiles reported in every summary.
    pub fn percentiles(mut self, percentiles: impl Into<Vec<f64>>) -> Self {
        self.config.percentiles = percentiles.into();
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze an in-memory table. Writes nothing.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration, missing or malformed columns, an
    /// empty stratum (in the table or in any resample) and a stratum too
    /// small for a sample variance.
    pub fn analyze_table(&self, table: &Table) -> Result<AnalysisReport, AnalysisError> {
        let started_at = Local::now();
        let start = Instant::now();
        let (report, _) = self.analyze_inner(table, None, started_at, start)?;
        Ok(report)
    }

    /// Load `input`, analyze it, and write the histograms and the HTML
    /// report into `output_dir`.
    ///
    /// Nothing is written if the analysis fails.
    pub fn run(
        &self,
        input: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> Result<AnalysisReport, AnalysisError> {
        let input = input.as_ref();
        let output_dir = output_dir.as_ref();
        let started_at = Local::now();
        let start = Instant::now();

        tracing::info!("Started at {}", started_at.format("%Y-%m-%d %H:%M:%S"));
        let table = load_csv(input)?;
        let (mut report, strata) =
            self.analyze_inner(&table, Some(input.display().to_string()), started_at, start)?;

        std::fs::create_dir_all(output_dir)?;
        self.write_histograms(&report, &strata, output_dir)?;

        let finished_at = Local::now();
        report.metadata.finished_at = finished_at;
        report.metadata.runtime_secs = start.elapsed().as_secs_f64();

        build_html(&report).write(&output_dir.join(REPORT_FILE))?;
        tracing::info!(
            "Finished at {} ({:.2} s)",
            finished_at.format("%Y-%m-%d %H:%M:%S"),
            report.metadata.runtime_secs
        );

        Ok(report)
    }

    fn analyze_inner(
        &self,
        table: &Table,
        input: Option<String>,
        started_at: DateTime<Local>,
        start: Instant,
    ) -> Result<(AnalysisReport, Strata), AnalysisError> {
        let config = &self.config;
        config.validate()?;

        let table_info = table.info();
        tracing::info!(
            "Analyzing {} rows x {} columns",
            table_info.rows,
            table_info.columns.len()
        );

        let all = table.numeric_column(&config.height_column)?;
        let female = stratum_heights(table, config, Sex::Female)?;
        let male = stratum_heights(table, config, Sex::Male)?;
        warn_if_unbalanced(female.len(), male.len(), all.len());

        let all_children = describe("all children", &all, &config.percentiles)?;
        let female_children = describe("female children", &female, &config.percentiles)?;
        let male_children = describe("male children", &male, &config.percentiles)?;

        let obs = observations(table, &config.sex_column, &config.height_column)?;
        let mut rng = match config.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
        };

        tracing::info!("Running {} bootstrap replicates", config.replicates);
        let bootstrap =
            bootstrap_mean_difference(&obs, config.replicates, config.fraction, &mut rng)?;

        let differences = describe("differences", &bootstrap.differences, &config.percentiles)?;
        let t_interval =
            pooled_t_interval(&bootstrap.male_means, &bootstrap.female_means, config.alpha)?;
        let percentile_interval = percentile_interval(&bootstrap.differences, config.alpha)?;
        tracing::info!("{}", t_interval.verdict());

        let metadata = Metadata {
            input,
            replicates: config.replicates,
            fraction: config.fraction,
            alpha: config.alpha,
            seed: config.seed,
            started_at,
            finished_at: Local::now(),
            runtime_secs: start.elapsed().as_secs_f64(),
        };

        let report = AnalysisReport {
            table_info,
            all_children,
            female_children,
            male_children,
            differences,
            bootstrap,
            t_interval,
            percentile_interval,
            metadata,
        };

        Ok((report, Strata { female, male }))
    }

    fn write_histograms(
        &self,
        report: &AnalysisReport,
        strata: &Strata,
        output_dir: &Path,
    ) -> Result<(), AnalysisError> {
        let config = &self.config;
        let fraction_label = "Fraction of sample";

        let female = Histogram::new(&strata.female, config.height_histogram)
            .with_percentiles(&config.percentiles);
        Chart::new("Female child heights", "Height (inches)", fraction_label)
            .write_svg(&female, &output_dir.join(FEMALE_HISTOGRAM_FILE))?;

        let male = Histogram::new(&strata.male, config.height_histogram)
            .with_percentiles(&config.percentiles);
        Chart::new("Male child heights", "Height (inches)", fraction_label)
            .write_svg(&male, &output_dir.join(MALE_HISTOGRAM_FILE))?;

        let diff = Histogram::new(&report.bootstrap.differences, config.difference_histogram);
        Chart::new(
            "Bootstrap differences in mean height (male - female)",
            "Difference (inches)",
            fraction_label,
        )
        .write_svg(&diff, &output_dir.join(DIFFERENCE_HISTOGRAM_FILE))?;

        Ok(())
    }
}

fn stratum_heights(
    table: &Table,
    config: &AnalysisConfig,
    sex: Sex,
) -> Result<Vec<f64>, AnalysisError> {
    let rows = table.filter_eq(&config.sex_column, sex.label())?;
    Ok(rows.numeric_column(&config.height_column)?)
}

fn warn_if_unbalanced(female: usize, male: usize, total: usize) {
    if total == 0 {
        return;
    }
    if female + male != total {
        tracing::warn!(
            "{} of {} rows are neither F nor M",
            total - female - male,
            total
        );
    }
    for (sex, n) in [(Sex::Female, female), (Sex::Male, male)] {
        let share = n as f64 / total as f64;
        if share < MIN_STRATUM_SHARE {
            tracing::warn!(
                "Only {} of {} rows are {}; resamples may miss the stratum",
                n,
                total,
                sex.noun()
            );
        }
    }
}

/// Assemble the report in section order.
fn build_html(report: &AnalysisReport) -> HtmlReport {
    let meta = &report.metadata;
    let mut html = HtmlReport::new("Galton child heights by sex", "galton");

    html.paragraph(format!(
        "Started at {}",
        meta.started_at.format("%Y-%m-%d %H:%M:%S")
    ));
    if let Some(input) = &meta.input {
        html.paragraph(format!("Input: {}", input));
    }

    html.heading("Analysis of entire data file")
        .preformatted(report.table_info.to_string())
        .preformatted(report.all_children.to_string());

    html.heading("Analysis of female children")
        .preformatted(report.female_children.to_string());

    html.heading("Analysis of male children")
        .preformatted(report.male_children.to_string());

    html.heading("Graphs of child heights")
        .figure(FEMALE_HISTOGRAM_FILE, "Histogram of female child heights")
        .figure(MALE_HISTOGRAM_FILE, "Histogram of male child heights");

    html.heading("Graph of child height differences")
        .paragraph(format!(
            "{} bootstrap replicates of {} rows each (male mean minus female mean).",
            report.bootstrap.replicates(),
            report.bootstrap.resample_size
        ))
        .preformatted(report.differences.to_string())
        .figure(
            DIFFERENCE_HISTOGRAM_FILE,
            "Histogram of bootstrap height differences",
        );

    html.heading("Two-sample t test of the two series")
        .preformatted(interval_details(&report.t_interval))
        .paragraph(report.t_interval.verdict());

    html.heading("Two-sample t test of the differences")
        .preformatted(interval_details(&report.percentile_interval))
        .paragraph(report.percentile_interval.verdict());

    html.paragraph(format!(
        "Finished at {}",
        meta.finished_at.format("%Y-%m-%d %H:%M:%S")
    ))
    .paragraph(format!("Elapsed time: {:.2} s", meta.runtime_secs));

    html
}

fn interval_details(interval: &ConfidenceInterval) -> String {
    let mut text = format!("{:<20}{:.4}\n", "difference", interval.delta);
    if let Some(df) = interval.degrees_of_freedom {
        text.push_str(&format!("{:<20}{}\n", "degrees of freedom", df));
    }
    if let Some(t) = interval.critical_value {
        text.push_str(&format!("{:<20}{:.4}\n", "t critical value", t));
    }
    text.push_str(&format!(
        "{:<20}({:.4}, {:.4})\n",
        format!("{} interval", interval.confidence_label()),
        interval.lower,
        interval.upper
    ));
    text
}
