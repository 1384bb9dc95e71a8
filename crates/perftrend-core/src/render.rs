//! SVG rendering for the overview and trend charts.

use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;

use crate::axis::{overview_range, trend_range};
use crate::catalog::{CatalogEntry, Rgb, TestCatalog, TestId};
use crate::errors::RenderError;
use crate::model::AggregatedSeries;

/// A single point shows no trend.
pub const MIN_COMMITS: usize = 2;

pub const DEFAULT_OVERVIEW_SIZE: (u32, u32) = (1200, 600);
pub const DEFAULT_TREND_SIZE: (u32, u32) = (1000, 500);

const X_DESC: &str = "Commits (most recent on left)";
const Y_DESC: &str = "Cycles";
const CLUSTER_WIDTH: f64 = 0.8;
const MAX_BAR_WIDTH: f64 = 0.15;
const TITLE_FONT_SIZE: i32 = 28;
const TITLE_LINE_HEIGHT: i32 = 34;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendStyle {
    /// `Arithmetic (10K)`
    Short,
    /// `Arithmetic 10K`
    Flattened,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Overview {
        title: String,
        legend: LegendStyle,
        size: (u32, u32),
    },
    Trend {
        test_id: TestId,
        size: (u32, u32),
    },
}

impl ChartSpec {
    pub fn size(&self) -> (u32, u32) {
        match self {
            ChartSpec::Overview { size, .. } | ChartSpec::Trend { size, .. } => *size,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChartSpec::Overview { .. } => "overview",
            ChartSpec::Trend { .. } => "trend",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(PathBuf),
    InsufficientData { commits: usize },
}

impl RenderOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RenderOutcome::Rendered(_))
    }
}

/// Render `spec` to an SVG file at `path`.
pub fn render_chart(
    series: &AggregatedSeries,
    catalog: &TestCatalog,
    spec: &ChartSpec,
    path: &Path,
) -> Result<RenderOutcome, RenderError> {
    if series.len() < MIN_COMMITS {
        tracing::warn!(
            chart = spec.kind(),
            commits = series.len(),
            "not enough data for chart (need at least {MIN_COMMITS} commits)"
        );
        return Ok(RenderOutcome::InsufficientData {
            commits: series.len(),
        });
    }

    check_spec(catalog, spec)?;
    let root = SVGBackend::new(path, spec.size()).into_drawing_area();
    draw(&root, series, catalog, spec)?;
    root.present()?;
    Ok(RenderOutcome::Rendered(path.to_path_buf()))
}

/// Render `spec` into an in-memory SVG document. `None` when there are too
/// few commits.
pub fn render_chart_to_string(
    series: &AggregatedSeries,
    catalog: &TestCatalog,
    spec: &ChartSpec,
) -> Result<Option<String>, RenderError> {
    if series.len() < MIN_COMMITS {
        return Ok(None);
    }
    check_spec(catalog, spec)?;
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, spec.size()).into_drawing_area();
        draw(&root, series, catalog, spec)?;
        root.present()?;
    }
    Ok(Some(buf))
}

/// Catch what would otherwise fail halfway through drawing, leaving a
/// partial file behind.
fn check_spec(catalog: &TestCatalog, spec: &ChartSpec) -> Result<(), RenderError> {
    match spec {
        ChartSpec::Trend { test_id, .. } if !catalog.contains(*test_id) => {
            Err(RenderError::UnknownTest(*test_id))
        }
        _ => Ok(()),
    }
}

fn draw<DB>(
    root: &DrawingArea<DB, Shift>,
    series: &AggregatedSeries,
    catalog: &TestCatalog,
    spec: &ChartSpec,
) -> Result<(), RenderError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    match spec {
        ChartSpec::Overview { title, legend, .. } => {
            draw_overview(root, series, catalog, title, *legend)
        }
        ChartSpec::Trend { test_id, .. } => {
            let entry = catalog
                .get(*test_id)
                .ok_or(RenderError::UnknownTest(*test_id))?;
            draw_trend(root, series, entry)
        }
    }
}

fn draw_overview<DB>(
    root: &DrawingArea<DB, Shift>,
    series: &AggregatedSeries,
    catalog: &TestCatalog,
    title: &str,
    legend: LegendStyle,
) -> Result<(), RenderError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let all_values: Vec<u64> = catalog
        .ids()
        .flat_map(|id| series.values_for(id))
        .collect();
    let y_range = checked(overview_range(&all_values))?;
    let labels = series.commit_labels();

    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(90)
        .y_label_area_size(90)
        .build_cartesian_2d(x_range(labels.len()), y_range)?;

    let x_fmt = |v: &f64| commit_label(&labels, *v);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&x_fmt)
        .x_label_style(rotated_label_font())
        .y_label_formatter(&|v| format!("{v:.0}"))
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .draw()?;

    let n_tests = catalog.len();
    let bar_width = MAX_BAR_WIDTH.min(CLUSTER_WIDTH / n_tests.max(1) as f64);
    let center = n_tests.saturating_sub(1) as f64 / 2.0;

    for (i, entry) in catalog.entries().iter().enumerate() {
        let color = plot_color(entry.color);
        let style = color.mix(0.8).filled();
        let offset = (i as f64 - center) * bar_width;
        let bars = series.commits.iter().enumerate().map(|(ci, commit)| {
            let x = ci as f64 + offset;
            let v = series.value(commit, entry.id) as f64;
            Rectangle::new([(x - bar_width / 2.0, 0.0), (x + bar_width / 2.0, v)], style)
        });
        let label = match legend {
            LegendStyle::Short => entry.short_name().to_string(),
            LegendStyle::Flattened => entry.flattened_name(),
        };
        chart
            .draw_series(bars)?
            .label(label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

fn draw_trend<DB>(
    root: &DrawingArea<DB, Shift>,
    series: &AggregatedSeries,
    entry: &CatalogEntry,
) -> Result<(), RenderError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let values = series.values_for(entry.id);
    let y_range = checked(trend_range(&values))?;
    let labels = series.commit_labels();
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v as f64))
        .collect();

    root.fill(&WHITE)?;
    let lines = trend_title_lines(entry.name);
    let (width, _) = root.dim_in_pixel();
    let (title_area, body) =
        root.split_vertically(20 + TITLE_LINE_HEIGHT * lines.len() as i32);
    let title_style = TextStyle::from(("sans-serif", TITLE_FONT_SIZE).into_font())
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (i, line) in lines.iter().enumerate() {
        let y = 10 + TITLE_LINE_HEIGHT * i as i32;
        title_area.draw_text(line, &title_style, (width as i32 / 2, y))?;
    }

    let mut chart = ChartBuilder::on(&body)
        .margin(20)
        .x_label_area_size(90)
        .y_label_area_size(90)
        .build_cartesian_2d(x_range(labels.len()), y_range)?;

    let x_fmt = |v: &f64| commit_label(&labels, *v);
    chart
        .configure_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&x_fmt)
        .x_label_style(rotated_label_font())
        .y_label_formatter(&|v| format!("{v:.0}"))
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .draw()?;

    let color = plot_color(entry.color);
    chart.draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?;
    chart.draw_series(
        points
            .into_iter()
            .map(|p| Circle::new(p, 5, color.filled())),
    )?;
    Ok(())
}

/// `Test 3: Division (3K)` becomes `Test 3: Division` over `(3K)`. Names
/// without exactly one `(` stay on one line.
fn trend_title_lines(name: &str) -> Vec<String> {
    match name.split_once('(') {
        Some((head, tail)) if !tail.contains('(') => {
            vec![head.trim().to_string(), format!("({tail}")]
        }
        _ => vec![name.to_string()],
    }
}

fn x_range(n: usize) -> Range<f64> {
    -0.5..(n as f64 - 0.5)
}

/// Axis formatter: the short commit at integer positions, blank elsewhere.
fn commit_label(labels: &[String], v: f64) -> String {
    let idx = v.round();
    if (v - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

fn rotated_label_font() -> FontDesc<'static> {
    ("sans-serif", 14).into_font().transform(FontTransform::Rotate90)
}

fn plot_color(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn checked(range: Range<f64>) -> Result<Range<f64>, RenderError> {
    if range.start.is_finite() && range.end.is_finite() && range.end > range.start {
        Ok(range)
    } else {
        Err(RenderError::AxisRange {
            lo: range.start,
            hi: range.end,
        })
    }
}
