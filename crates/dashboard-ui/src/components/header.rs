use crate::themes::Theme;
use dashboard_core::formatting;
use dashboard_core::models::YearMonth;
use ratatui::text::{Line, Span};
use rust_decimal::Decimal;

/// Decorative marks placed either side of the application title.
pub const ACCENT: &str = "◆ ◇ ◆";

/// Application title.
pub const TITLE: &str = "SUPERSTORE SALES DASHBOARD";

/// Dashboard header rendering four lines:
///
/// 1. Application title with accent decorations.
/// 2. A 60-column `=` separator.
/// 3. Dataset information in `[ file | N records | first → last ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// File name of the loaded dataset.
    pub source: &'a str,
    pub record_count: usize,
    /// First and last month with sales, if any.
    pub month_span: Option<(YearMonth, YearMonth)>,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(
        source: &'a str,
        record_count: usize,
        month_span: Option<(YearMonth, YearMonth)>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            source,
            record_count,
            month_span,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        let span_text = match self.month_span {
            Some((first, last)) => format!("{first} → {last}"),
            None => "no data".to_string(),
        };

        vec![
            Line::from(vec![
                Span::styled(ACCENT, self.theme.header_accent),
                Span::styled(format!(" {TITLE} "), self.theme.header),
                Span::styled(ACCENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!(
                        "{} records",
                        formatting::format_number(Decimal::from(self.record_count), 0)
                    ),
                    self.theme.value,
                ),
                Span::styled(" | ", self.theme.label),
                Span::styled(span_text, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
