//! Normalized histograms rendered as standalone SVG.
//!
//! The y axis is the fraction of the whole series falling in each bin, so
//! values outside the fixed range still count in the denominator.

use std::fmt;
use std::path::Path;

use crate::config::HistogramSpec;
use crate::statistics::{compute_quantile_sorted, percentile_label};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 55.0;
const Y_TICKS: usize = 5;
const X_TICKS: usize = 5;

/// Binned sample fractions of a series over a fixed range.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    spec: HistogramSpec,
    fractions: Vec<f64>,
    total: usize,
    /// `(probability, value)` of each marker line.
    markers: Vec<(f64, f64)>,
    sorted: Vec<f64>,
}

impl Histogram {
    /// Bin `series` with `spec`.
    ///
    /// Bins are half-open `[left, right)` except the last, which includes
    /// `spec.max`. Values outside the range are not drawn.
    pub fn new(series: &[f64], spec: HistogramSpec) -> Self {
        let bins = spec.bins();
        let mut counts = vec![0usize; bins];

        for &x in series {
            if !(spec.min..=spec.max).contains(&x) {
                continue;
            }
            let idx = (((x - spec.min) / spec.width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let total = series.len();
        let fractions = counts
            .iter()
            .map(|&c| if total == 0 { 0.0 } else { c as f64 / total as f64 })
            .collect();

        let mut sorted = series.to_vec();
        sorted.sort_unstable_by(|a, b| a.total_cmp(b));

        Self {
            spec,
            fractions,
            total,
            markers: Vec::new(),
            sorted,
        }
    }

    /// Add vertical markers at the given percentiles of the series.
    pub fn with_percentiles(mut self, probabilities: &[f64]) -> Self {
        if !self.sorted.is_empty() {
            self.markers = probabilities
                .iter()
                .map(|&p| (p, compute_quantile_sorted(&self.sorted, p)))
                .collect();
        }
        self
    }

    /// Fraction of the series in each bin.
    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    /// Number of values in the series, including those outside the range.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Percentile markers as `(probability, value)`.
    pub fn markers(&self) -> &[(f64, f64)] {
        &self.markers
    }

    /// Layout used for binning.
    pub fn spec(&self) -> HistogramSpec {
        self.spec
    }
}

/// Title and axis labels of a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    /// Title above the plot area.
    pub title: String,
    /// Label under the x axis.
    pub x_label: String,
    /// Label beside the y axis.
    pub y_label: String,
}

impl Chart {
    /// Create a chart with the given labels.
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
        }
    }

    /// Render the histogram as an SVG document.
    pub fn render_svg(&self, histogram: &Histogram) -> String {
        SvgDocument {
            chart: self,
            histogram,
        }
        .to_string()
    }

    /// Render and write the SVG to `path`.
    pub fn write_svg(&self, histogram: &Histogram, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.render_svg(histogram))?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

/// A chart bound to its data, rendered through `Display`.
struct SvgDocument<'a> {
    chart: &'a Chart,
    histogram: &'a Histogram,
}

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let histogram = self.histogram;
        let spec = histogram.spec;
        let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let y_max = nice_ceiling(histogram.fractions.iter().copied().fold(0.0, f64::max));

        let x_of = |x: f64| MARGIN_LEFT + (x - spec.min) / (spec.max - spec.min) * plot_w;
        let y_of = |y: f64| MARGIN_TOP + plot_h - y / y_max * plot_h;

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#,
            w = WIDTH,
            h = HEIGHT
        )?;
        writeln!(f, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
        writeln!(
            f,
            r#"<text x="{}" y="24" text-anchor="middle" font-size="16" font-weight="bold">{}</text>"#,
            WIDTH / 2.0,
            escape(&self.chart.title)
        )?;

        // Bars
        for (i, &fraction) in histogram.fractions.iter().enumerate() {
            if fraction <= 0.0 {
                continue;
            }
            let left = spec.min + i as f64 * spec.width;
            let right = (left + spec.width).min(spec.max);
            writeln!(
                f,
                r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="#4c72b0" stroke="white" stroke-width="0.5"/>"##,
                x_of(left),
                y_of(fraction),
                x_of(right) - x_of(left),
                y_of(0.0) - y_of(fraction)
            )?;
        }

        // Percentile markers
        for &(p, value) in &histogram.markers {
            if !(spec.min..=spec.max).contains(&value) {
                continue;
            }
            let x = x_of(value);
            writeln!(
                f,
                r##"<line x1="{x:.2}" y1="{top:.2}" x2="{x:.2}" y2="{bottom:.2}" stroke="#c44e52" stroke-width="1.5" stroke-dasharray="4 3"/>"##,
                x = x,
                top = MARGIN_TOP,
                bottom = MARGIN_TOP + plot_h
            )?;
            writeln!(
                f,
                r##"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="10" fill="#c44e52">{}</text>"##,
                x,
                MARGIN_TOP - 4.0,
                percentile_label(p)
            )?;
        }

        // Axes
        writeln!(
            f,
            r#"<line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="black"/>"#,
            l = MARGIN_LEFT,
            r = MARGIN_LEFT + plot_w,
            b = MARGIN_TOP + plot_h
        )?;
        writeln!(
            f,
            r#"<line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="black"/>"#,
            l = MARGIN_LEFT,
            t = MARGIN_TOP,
            b = MARGIN_TOP + plot_h
        )?;

        for i in 0..=X_TICKS {
            let value = spec.min + (spec.max - spec.min) * i as f64 / X_TICKS as f64;
            let x = x_of(value);
            writeln!(
                f,
                r#"<line x1="{x:.2}" y1="{b}" x2="{x:.2}" y2="{t}" stroke="black"/><text x="{x:.2}" y="{ty}" text-anchor="middle">{label}</text>"#,
                x = x,
                b = MARGIN_TOP + plot_h,
                t = MARGIN_TOP + plot_h + 5.0,
                ty = MARGIN_TOP + plot_h + 18.0,
                label = tick_label(value)
            )?;
        }

        for i in 0..=Y_TICKS {
            let value = y_max * i as f64 / Y_TICKS as f64;
            let y = y_of(value);
            writeln!(
                f,
                r#"<line x1="{l}" y1="{y:.2}" x2="{t}" y2="{y:.2}" stroke="black"/><text x="{tx}" y="{ty:.2}" text-anchor="end">{label}</text>"#,
                l = MARGIN_LEFT,
                t = MARGIN_LEFT - 5.0,
                y = y,
                tx = MARGIN_LEFT - 8.0,
                ty = y + 4.0,
                label = tick_label(value)
            )?;
        }

        writeln!(
            f,
            r#"<text x="{}" y="{}" text-anchor="middle">{}</text>"#,
            MARGIN_LEFT + plot_w / 2.0,
            HEIGHT - 12.0,
            escape(&self.chart.x_label)
        )?;
        writeln!(
            f,
            r#"<text x="18" y="{y}" text-anchor="middle" transform="rotate(-90 18 {y})">{}</text>"#,
            escape(&self.chart.y_label),
            y = MARGIN_TOP + plot_h / 2.0
        )?;

        writeln!(f, "</svg>")
    }
}

/// Round the tallest bar up to a tidy axis limit.
fn nice_ceiling(max: f64) -> f64 {
    if max <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(max.log10().floor());
    let scaled = max / magnitude;
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|&s| scaled <= s)
        .unwrap_or(10.0);
    step * magnitude
}

fn tick_label(value: f64) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Escape text for XML/HTML content and attributes.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
