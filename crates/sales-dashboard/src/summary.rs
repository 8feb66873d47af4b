//! Non-interactive report for `--view summary`.

use std::fmt::{self, Write};

use dashboard_core::error::Result;
use dashboard_core::formatting;
use dashboard_data::aggregator::SalesAggregator;
use dashboard_data::analysis::DashboardSnapshot;
use rust_decimal::Decimal;

/// Render `snapshot` as `"text"` or `"json"`.
pub fn render(snapshot: &DashboardSnapshot, format: &str) -> Result<String> {
    match format {
        "json" => snapshot.to_json_pretty(),
        _ => Ok(render_text(snapshot)),
    }
}

/// Plain-text report with the same figures as the dashboard.
pub fn render_text(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write_report(&mut out, snapshot);
    out
}

fn write_report(out: &mut String, snapshot: &DashboardSnapshot) -> fmt::Result {
    let selection = &snapshot.selection;
    let chosen = if selection.is_empty() {
        "none".to_string()
    } else {
        selection.chosen_subcategories().join(", ")
    };
    let metrics = &snapshot.selection_metrics;
    let overall = snapshot.overall_metrics();
    let margin = formatting::format_margin(&metrics.profit_margin_pct());

    writeln!(out, "Superstore Sales Summary")?;
    writeln!(out, "Category: {}", selection.category())?;
    writeln!(out, "Subcategories: {chosen}")?;
    writeln!(out)?;

    writeln!(out, "Selection")?;
    metric_line(out, "Total Sales", &total(metrics.total_sales, metrics.overflowed))?;
    metric_line(out, "Total Profit", &total(metrics.total_profit, metrics.overflowed))?;
    metric_line(out, "Profit Margin (%)", &margin)?;
    writeln!(out)?;

    writeln!(out, "Overall")?;
    metric_line(out, "Overall Total Sales", &total(overall.total_sales, overall.overflowed))?;
    metric_line(out, "Overall Total Profit", &total(overall.total_profit, overall.overflowed))?;
    let delta = formatting::format_delta(&snapshot.margin_delta());
    metric_line(out, "Profit Margin (%)", &format!("{margin} ({delta})"))?;
    writeln!(out)?;

    writeln!(out, "Monthly Sales")?;
    if snapshot.selection_series.is_empty() {
        writeln!(out, "  no sales for the current selection")?;
    } else {
        for bucket in &snapshot.selection_series {
            month_line(out, &bucket.month.to_string(), bucket.sales)?;
        }
        month_line(
            out,
            "TOTAL",
            SalesAggregator::calculate_total(&snapshot.selection_series),
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Sales by Category")?;
    for totals in &snapshot.overview.category_totals {
        writeln!(
            out,
            "  {:<18}{:>16}{:>16}{:>10}",
            totals.category.as_str(),
            formatting::format_currency(totals.metrics.total_sales),
            formatting::format_currency(totals.metrics.total_profit),
            formatting::format_margin(&totals.metrics.profit_margin_pct()),
        )?;
    }
    Ok(())
}

fn total(amount: Decimal, overflowed: bool) -> String {
    let text = formatting::format_currency(amount);
    if overflowed {
        format!("{text} (overflow, clamped)")
    } else {
        text
    }
}

fn metric_line(out: &mut String, label: &str, value: &str) -> fmt::Result {
    writeln!(out, "  {label:<22}{value}")
}

fn month_line(out: &mut String, label: &str, sales: Decimal) -> fmt::Result {
    writeln!(out, "  {label:<10}{:>16}", formatting::format_currency(sales))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::models::{SalesRecord, Selection};
    use dashboard_core::taxonomy::Category;
    use dashboard_data::analysis::analyze_selection;

    fn record(month: u32, category: Category, sub: &str, sales: i64, profit: i64) -> SalesRecord {
        SalesRecord {
            order_date: NaiveDate::from_ymd_opt(2016, month, 1).unwrap(),
            category,
            sub_category: sub.to_string(),
            sales: Decimal::from(sales),
            profit: Decimal::from(profit),
        }
    }

    fn dataset() -> Vec<SalesRecord> {
        vec![
            record(1, Category::Furniture, "Chairs", 60, 6),
            record(2, Category::Furniture, "Chairs", 40, 4),
            record(1, Category::Technology, "Phones", 100, 5),
        ]
    }

    #[test]
    fn test_render_text_figures() {
        let data = dataset();
        let snapshot = analyze_selection(&data, &Selection::new(Category::Furniture, ["Chairs"]));
        let text = render_text(&snapshot);

        assert!(text.contains("Subcategories: Chairs"), "{text}");
        assert!(text.contains("$100.00"), "{text}");
        assert!(text.contains("10.00% (2.50% vs Overall)"), "{text}");
        assert!(text.contains("2016-02"), "{text}");
        assert!(text.contains("Technology"), "{text}");
    }

    #[test]
    fn test_render_text_empty_selection() {
        let data = dataset();
        let snapshot = analyze_selection(&data, &Selection::empty(Category::Furniture));
        let text = render_text(&snapshot);

        assert!(text.contains("Subcategories: none"), "{text}");
        assert!(text.contains("N/A (N/A)"), "{text}");
        assert!(text.contains("no sales for the current selection"), "{text}");
    }

    #[test]
    fn test_render_text_flags_clamped_totals() {
        let mut data = dataset();
        for r in data.iter_mut().take(2) {
            r.sales = Decimal::from_scientific("5e28").unwrap();
        }
        let snapshot = analyze_selection(&data, &Selection::new(Category::Furniture, ["Chairs"]));
        let text = render_text(&snapshot);

        assert!(text.contains("(overflow, clamped)"), "{text}");
        assert!(text.contains("N/A (N/A)"), "{text}");
    }

    #[test]
    fn test_render_json() {
        let data = dataset();
        let snapshot = analyze_selection(&data, &Selection::new(Category::Furniture, ["Chairs"]));
        let json: serde_json::Value =
            serde_json::from_str(&render(&snapshot, "json").unwrap()).unwrap();
        assert_eq!(json["margin_delta_pct"], "2.5");
    }
}
