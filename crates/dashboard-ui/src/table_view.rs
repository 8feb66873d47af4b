//! Table views for the dashboard.
//!
//! Monthly sales with a totals row, category totals, and the raw record
//! listing. Each renders a bordered [`ratatui::widgets::Table`].

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use dashboard_core::calculations::MetricsSnapshot;
use dashboard_core::formatting;
use dashboard_core::models::{MonthlyBucket, SalesRecord};
use dashboard_runtime::data::aggregator::{CategoryTotals, SalesAggregator};

use crate::themes::Theme;

fn header_row<'a>(titles: &[&'a str], theme: &Theme) -> Row<'a> {
    Row::new(
        titles
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header))
            .collect::<Vec<_>>(),
    )
    .height(1)
}

fn bordered<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(format!(" {} ", title))
}

// ── Monthly sales ─────────────────────────────────────────────────────────────

/// Render one row per month followed by a highlighted totals row.
pub fn render_monthly_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    series: &[MonthlyBucket],
    theme: &Theme,
) {
    let mut rows: Vec<Row> = series
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            Row::new(vec![
                Cell::from(bucket.month.to_string()),
                Cell::from(formatting::format_currency(bucket.sales)),
            ])
            .style(theme.row_style(i))
        })
        .collect();

    rows.push(
        Row::new(vec![
            Cell::from(format!("TOTAL ({} months)", series.len())),
            Cell::from(formatting::format_currency(SalesAggregator::calculate_total(
                series,
            ))),
        ])
        .style(theme.table_total),
    );

    let widths = [Constraint::Length(18), Constraint::Min(14)];
    let table = Table::new(rows, widths)
        .header(header_row(&["Month", "Sales"], theme))
        .block(bordered(title, theme))
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Category totals ───────────────────────────────────────────────────────────

/// Render sales, profit and margin per category plus a grand total.
pub fn render_category_table(frame: &mut Frame, area: Rect, totals: &[CategoryTotals], theme: &Theme) {
    let mut rows: Vec<Row> = totals
        .iter()
        .enumerate()
        .map(|(i, t)| {
            Row::new(vec![
                Cell::from(t.category.as_str()),
                Cell::from(formatting::format_currency(t.metrics.total_sales)),
                Cell::from(formatting::format_currency(t.metrics.total_profit)),
                Cell::from(formatting::format_margin(&t.metrics.profit_margin_pct())),
                Cell::from(t.metrics.record_count.to_string()),
            ])
            .style(theme.row_style(i))
        })
        .collect();

    let grand = totals
        .iter()
        .fold(MetricsSnapshot::default(), |acc, t| acc.merge(&t.metrics));
    rows.push(
        Row::new(vec![
            Cell::from("TOTAL"),
            Cell::from(formatting::format_currency(grand.total_sales)),
            Cell::from(formatting::format_currency(grand.total_profit)),
            Cell::from(formatting::format_margin(&grand.profit_margin_pct())),
            Cell::from(grand.record_count.to_string()),
        ])
        .style(theme.table_total),
    );

    let widths = [
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(10),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .header(header_row(&["Category", "Sales", "Profit", "Margin", "Rows"], theme))
        .block(bordered("Sales by Category", theme))
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Records ───────────────────────────────────────────────────────────────────

/// Render the records starting at `offset`, as many as fit in `area`.
///
/// The title shows the visible range and `totals`, the precomputed metrics
/// of all `records`.
pub fn render_records_table(
    frame: &mut Frame,
    area: Rect,
    records: &[SalesRecord],
    totals: &MetricsSnapshot,
    offset: usize,
    theme: &Theme,
) {
    // Borders and header take three rows.
    let visible = area.height.saturating_sub(3) as usize;
    let offset = offset.min(records.len().saturating_sub(1));
    let window = records.iter().skip(offset).take(visible);

    let rows: Vec<Row> = window
        .enumerate()
        .map(|(i, r)| {
            Row::new(vec![
                Cell::from(r.order_date.format("%Y-%m-%d").to_string()),
                Cell::from(r.category.as_str()),
                Cell::from(r.sub_category.clone()),
                Cell::from(formatting::format_currency(r.sales)),
                Cell::from(formatting::format_currency(r.profit)),
            ])
            .style(theme.row_style(offset + i))
        })
        .collect();

    let last = (offset + visible).min(records.len());
    let first = if records.is_empty() { 0 } else { offset + 1 };
    let title = format!(
        "Records {}–{} of {} | Sales {} | Profit {}",
        first,
        last,
        records.len(),
        formatting::format_currency(totals.total_sales),
        formatting::format_currency(totals.total_profit),
    );

    let widths = [
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Length(13),
        Constraint::Length(14),
        Constraint::Length(14),
    ];
    let table = Table::new(rows, widths)
        .header(header_row(
            &["Order Date", "Category", "Sub-Category", "Sales", "Profit"],
            theme,
        ))
        .block(bordered(&title, theme))
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Placeholder shown when the selection matches no records.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No sales for the current selection", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Press Space to toggle a subcategory or 'a' to select all.",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(bordered(title, theme)),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::calculations::compute_metrics;
    use rust_decimal::Decimal;
    use dashboard_core::models::YearMonth;
    use dashboard_core::taxonomy::Category;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn series() -> Vec<MonthlyBucket> {
        vec![
            MonthlyBucket {
                month: YearMonth::new(2016, 1),
                sales: Decimal::new(150050, 2),
            },
            MonthlyBucket {
                month: YearMonth::new(2016, 2),
                sales: Decimal::new(25, 0),
            },
        ]
    }

    fn records(n: usize) -> Vec<SalesRecord> {
        (0..n)
            .map(|i| SalesRecord {
                order_date: NaiveDate::from_ymd_opt(2016, 1, 1 + (i % 28) as u32).unwrap(),
                category: Category::Technology,
                sub_category: "Phones".to_string(),
                sales: Decimal::from(10),
                profit: Decimal::from(1),
            })
            .collect()
    }

    #[test]
    fn test_monthly_table_shows_rows_and_total() {
        let backend = TestBackend::new(50, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let data = series();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_monthly_table(frame, area, "Monthly Sales", &data, &theme);
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("2016-01"), "{text}");
        assert!(text.contains("$1,500.50"), "{text}");
        assert!(text.contains("TOTAL (2 months)"), "{text}");
        assert!(text.contains("$1,525.50"), "{text}");
    }

    #[test]
    fn test_monthly_table_empty_series_does_not_panic() {
        let backend = TestBackend::new(50, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_monthly_table(frame, area, "Monthly Sales", &[], &theme);
            })
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("$0.00"), "{text}");
    }

    #[test]
    fn test_category_table_shows_margin_and_na() {
        let backend = TestBackend::new(80, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let totals = vec![
            CategoryTotals {
                category: Category::Furniture,
                metrics: MetricsSnapshot {
                    total_sales: Decimal::from(200),
                    total_profit: Decimal::from(20),
                    record_count: 2,
                    overflowed: false,
                },
            },
            CategoryTotals {
                category: Category::Technology,
                metrics: MetricsSnapshot::default(),
            },
        ];

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_category_table(frame, area, &totals, &theme);
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Furniture"), "{text}");
        assert!(text.contains("10.00%"), "{text}");
        assert!(text.contains("N/A"), "{text}");
        assert!(text.contains("TOTAL"), "{text}");
    }

    #[test]
    fn test_records_table_windowing() {
        let backend = TestBackend::new(90, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let data = records(30);

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_records_table(frame, area, &data, &compute_metrics(&data), 10, &theme);
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        // Eight rows minus borders and header leaves five visible records.
        assert!(text.contains("Records 11–15 of 30"), "{text}");
        assert!(text.contains("Sales $300.00"), "{text}");
    }

    #[test]
    fn test_records_table_offset_past_end_is_clamped() {
        let backend = TestBackend::new(90, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let data = records(3);

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_records_table(frame, area, &data, &compute_metrics(&data), 500, &theme);
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Records 3–3 of 3"), "{text}");
    }

    #[test]
    fn test_records_table_empty() {
        let backend = TestBackend::new(90, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_records_table(frame, area, &[], &MetricsSnapshot::default(), 0, &theme);
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Records 0–0 of 0"), "{text}");
    }

    #[test]
    fn test_render_no_data_does_not_panic() {
        let backend = TestBackend::new(70, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_no_data(frame, area, "Monthly Sales", &theme);
            })
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("No sales for the current selection"), "{text}");
    }
}
