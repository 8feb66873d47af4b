use dashboard_core::formatting;
use dashboard_runtime::data::analysis::DashboardSnapshot;
use rust_decimal::Decimal;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::themes::Theme;

// ── MetricCard ────────────────────────────────────────────────────────────────

/// Bordered metric tile: a label, a headline value and an optional delta.
#[derive(Debug, Clone)]
pub struct MetricCard<'a> {
    pub label: String,
    pub value: String,
    /// Delta text and the style it is drawn in.
    pub delta: Option<(String, Style)>,
    /// Warning drawn in the theme's error style.
    pub alert: Option<String>,
    pub theme: &'a Theme,
}

impl<'a> MetricCard<'a> {
    pub fn new(label: impl Into<String>, value: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            delta: None,
            alert: None,
            theme,
        }
    }

    pub fn with_delta(mut self, text: impl Into<String>, style: Style) -> Self {
        self.delta = Some((text.into(), style));
        self
    }

    pub fn with_alert(mut self, text: impl Into<String>) -> Self {
        self.alert = Some(text.into());
        self
    }

    /// Card body: label, value and, when present, the delta and the alert.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let mut lines = vec![
            Line::from(Span::styled(self.label.clone(), self.theme.label)),
            Line::from(Span::styled(self.value.clone(), self.theme.value)),
        ];
        if let Some((text, style)) = &self.delta {
            lines.push(Line::from(Span::styled(text.clone(), *style)));
        }
        if let Some(alert) = &self.alert {
            lines.push(Line::from(Span::styled(alert.clone(), self.theme.error)));
        }
        lines
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.table_border);
        frame.render_widget(
            Paragraph::new(Text::from(self.to_lines())).block(block),
            area,
        );
    }
}

// ── Metric rows ───────────────────────────────────────────────────────────────

/// Text shown under totals that were clamped to the `Decimal` range.
pub const OVERFLOW_ALERT: &str = "overflow: total clamped";

fn total_card<'a>(label: &str, amount: Decimal, overflowed: bool, theme: &'a Theme) -> MetricCard<'a> {
    let card = MetricCard::new(label, formatting::format_currency(amount), theme);
    if overflowed {
        card.with_alert(OVERFLOW_ALERT)
    } else {
        card
    }
}

/// Total Sales, Total Profit and Profit Margin of the selection.
pub fn selection_cards<'a>(snapshot: &DashboardSnapshot, theme: &'a Theme) -> [MetricCard<'a>; 3] {
    let metrics = &snapshot.selection_metrics;
    [
        total_card("Total Sales", metrics.total_sales, metrics.overflowed, theme),
        total_card("Total Profit", metrics.total_profit, metrics.overflowed, theme),
        MetricCard::new(
            "Profit Margin (%)",
            formatting::format_margin(&metrics.profit_margin_pct()),
            theme,
        ),
    ]
}

/// Overall Total Sales, Overall Total Profit and the selection's Profit
/// Margin with its delta against the overall margin.
pub fn overall_cards<'a>(snapshot: &DashboardSnapshot, theme: &'a Theme) -> [MetricCard<'a>; 3] {
    let overall = snapshot.overall_metrics();
    let delta = snapshot.margin_delta();
    let delta_style = theme.delta_style(delta.as_ref().ok().copied());
    [
        total_card("Overall Total Sales", overall.total_sales, overall.overflowed, theme),
        total_card("Overall Total Profit", overall.total_profit, overall.overflowed, theme),
        MetricCard::new(
            "Profit Margin (%)",
            formatting::format_margin(&snapshot.selection_metrics.profit_margin_pct()),
            theme,
        )
        .with_delta(formatting::format_delta(&delta), delta_style),
    ]
}

/// Lay `cards` out side by side in equal columns.
pub fn render_metric_row(frame: &mut Frame, area: Rect, cards: &[MetricCard]) {
    if cards.is_empty() {
        return;
    }
    let columns = Layout::horizontal(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(area);
    for (card, column) in cards.iter().zip(columns.iter()) {
        card.render(frame, *column);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
