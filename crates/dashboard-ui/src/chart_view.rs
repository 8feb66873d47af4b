//! Line and bar charts for the dashboard.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Line,
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use dashboard_core::formatting;
use dashboard_core::models::{MonthlyBucket, YearMonth};
use dashboard_runtime::data::aggregator::CategoryTotals;

use crate::table_view;
use crate::themes::Theme;

// ── Point conversion ──────────────────────────────────────────────────────────

/// Months since year 0, so that gaps between months stay visible on the axis.
pub fn month_ordinal(month: YearMonth) -> f64 {
    (month.year as f64) * 12.0 + (month.month as f64 - 1.0)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// `(month ordinal, sales)` points for a chart.
pub fn series_points(series: &[MonthlyBucket]) -> Vec<(f64, f64)> {
    series
        .iter()
        .map(|b| (month_ordinal(b.month), to_f64(b.sales)))
        .collect()
}

/// Axis bounds `[min, max]` for `points`, padded so a single point or a
/// flat series still spans a non-empty range. The y range always includes 0.
pub fn chart_bounds(points: &[(f64, f64)]) -> ([f64; 2], [f64; 2]) {
    let (mut x_min, mut x_max) = (f64::MAX, f64::MIN);
    let (mut y_min, mut y_max) = (0.0_f64, 0.0_f64);
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if points.is_empty() {
        (x_min, x_max) = (0.0, 1.0);
    }
    if x_max <= x_min {
        x_max = x_min + 1.0;
    }
    if y_max <= y_min {
        y_max = y_min + 1.0;
    }
    ([x_min, x_max], [y_min, y_max * 1.05])
}

// ── Line chart ────────────────────────────────────────────────────────────────

/// Monthly sales line chart. Falls back to the "no data" panel when
/// `series` is empty.
pub fn render_sales_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    series: &[MonthlyBucket],
    line_style: Style,
    theme: &Theme,
) {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        table_view::render_no_data(frame, area, title, theme);
        return;
    };

    let points = series_points(series);
    let (x_bounds, y_bounds) = chart_bounds(&points);

    let dataset = Dataset::default()
        .name("Sales")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(line_style)
        .data(&points);

    let y_labels: Vec<Line> = [y_bounds[0], (y_bounds[0] + y_bounds[1]) / 2.0, y_bounds[1]]
        .iter()
        .map(|v| {
            let amount = Decimal::from_f64_retain(*v).unwrap_or_default();
            Line::from(formatting::format_currency(amount.round()))
        })
        .collect();

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        )
        .x_axis(
            Axis::default()
                .style(theme.chart_axis)
                .bounds(x_bounds)
                .labels(vec![
                    Line::from(first.month.to_string()),
                    Line::from(last.month.to_string()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme.chart_axis)
                .bounds(y_bounds)
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

// ── Bar chart ─────────────────────────────────────────────────────────────────

/// Whole-dollar bar height; negative totals draw as an empty bar.
pub fn bar_value(sales: Decimal) -> u64 {
    sales
        .max(Decimal::ZERO)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(0)
}

/// Sales per category as vertical bars.
pub fn render_category_bars(frame: &mut Frame, area: Rect, totals: &[CategoryTotals], theme: &Theme) {
    let bars: Vec<Bar> = totals
        .iter()
        .map(|t| {
            Bar::default()
                .value(bar_value(t.metrics.total_sales))
                .text_value(formatting::format_currency(t.metrics.total_sales.round()))
                .label(Line::from(t.category.as_str()))
                .style(theme.bar)
                .value_style(theme.bar_value)
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Sales by Category "),
        )
        .bar_width(16)
        .bar_gap(3)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::calculations::MetricsSnapshot;
    use dashboard_core::taxonomy::Category;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn bucket(year: i32, month: u32, sales: i64) -> MonthlyBucket {
        MonthlyBucket {
            month: YearMonth::new(year, month),
            sales: Decimal::from(sales),
        }
    }

    #[test]
    fn test_month_ordinal_is_contiguous_across_years() {
        let dec = month_ordinal(YearMonth::new(2016, 12));
        let jan = month_ordinal(YearMonth::new(2017, 1));
        assert_eq!(jan - dec, 1.0);
    }

    #[test]
    fn test_series_points_keep_gaps() {
        let points = series_points(&[bucket(2016, 1, 10), bucket(2016, 4, 20)]);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].0 - points[0].0, 3.0);
        assert_eq!(points[1].1, 20.0);
    }

    #[test]
    fn test_chart_bounds() {
        let (x, y) = chart_bounds(&[(10.0, 100.0), (12.0, 50.0)]);
        assert_eq!(x, [10.0, 12.0]);
        assert_eq!(y[0], 0.0);
        assert!(y[1] >= 100.0);
    }

    #[test]
    fn test_chart_bounds_single_point_and_negative() {
        let (x, y) = chart_bounds(&[(5.0, -20.0)]);
        assert_eq!(x, [5.0, 6.0]);
        assert_eq!(y, [-20.0, 0.0]);
    }

    #[test]
    fn test_chart_bounds_empty() {
        let (x, y) = chart_bounds(&[]);
        assert!(x[1] > x[0]);
        assert!(y[1] > y[0]);
    }

    #[test]
    fn test_bar_value() {
        assert_eq!(bar_value(Decimal::new(12345, 1)), 1235);
        assert_eq!(bar_value(Decimal::from(-50)), 0);
    }

    #[test]
    fn test_render_sales_chart_does_not_panic() {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let series = vec![bucket(2016, 1, 100), bucket(2016, 2, 250), bucket(2016, 5, 80)];

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_sales_chart(frame, area, "Sales Trend", &series, theme.chart_selection, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_sales_chart_empty_shows_placeholder() {
        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_sales_chart(frame, area, "Sales Trend", &[], theme.chart_selection, &theme);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("No sales for the current selection"));
    }

    #[test]
    fn test_render_category_bars_does_not_panic() {
        let backend = TestBackend::new(80, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let totals: Vec<CategoryTotals> = Category::ALL
            .iter()
            .enumerate()
            .map(|(i, c)| CategoryTotals {
                category: *c,
                metrics: MetricsSnapshot {
                    total_sales: Decimal::from(1000 * (i as i64 + 1)),
                    total_profit: Decimal::from(100),
                    record_count: 3,
                    overflowed: false,
                },
            })
            .collect();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_category_bars(frame, area, &totals, &theme);
            })
            .unwrap();
    }
}
