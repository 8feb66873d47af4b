use crate::themes::Theme;
use dashboard_core::formatting;
use ratatui::text::{Line, Span};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Configuration controlling the look of a share bar.
pub struct ShareBarConfig {
    /// Width in terminal columns of the bar portion (excluding label).
    pub width: u16,
    pub filled_char: char,
    pub empty_char: char,
}

impl Default for ShareBarConfig {
    fn default() -> Self {
        Self {
            width: 40,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

// ── ShareBar ──────────────────────────────────────────────────────────────────

/// Horizontal bar showing the selection's share of overall sales.
///
/// Renders as a filled and an empty portion followed by a label with the
/// percentage and the `part / whole` amounts.
pub struct ShareBar<'a> {
    /// Share of `whole` held by `part`, clamped to `[0, 100]`.
    pub percentage: Decimal,
    pub part: Decimal,
    pub whole: Decimal,
    pub theme: &'a Theme,
    pub config: ShareBarConfig,
}

impl<'a> ShareBar<'a> {
    /// Construct a bar, computing the percentage. A zero `whole` gives 0 %.
    pub fn new(part: Decimal, whole: Decimal, theme: &'a Theme) -> Self {
        let percentage = formatting::percentage(part, whole, 2)
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
        Self {
            percentage,
            part,
            whole,
            theme,
            config: ShareBarConfig::default(),
        }
    }

    /// Number of filled columns.
    pub fn filled_width(&self) -> u16 {
        let width = Decimal::from(self.config.width);
        let filled = (self.percentage / Decimal::ONE_HUNDRED * width).floor();
        filled.to_u16().unwrap_or(0).min(self.config.width)
    }

    pub fn to_line(&self) -> Line<'a> {
        let filled = self.filled_width();
        let empty = self.config.width.saturating_sub(filled);

        let filled_str: String =
            std::iter::repeat_n(self.config.filled_char, filled as usize).collect();
        let empty_str: String =
            std::iter::repeat_n(self.config.empty_char, empty as usize).collect();

        let label = format!(
            " {} of sales ({} / {})",
            formatting::format_percentage(self.percentage),
            formatting::format_currency(self.part),
            formatting::format_currency(self.whole),
        );

        Line::from(vec![
            Span::styled(filled_str, self.theme.share_filled),
            Span::styled(empty_str, self.theme.share_empty),
            Span::styled(label, self.theme.share_label),
        ])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
