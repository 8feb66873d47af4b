use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are dark, 7–15 light. Absent or unparseable values count as dark.
pub fn detect_background() -> BackgroundType {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|val| background_from_colorfgbg(&val))
        .unwrap_or(BackgroundType::Dark)
}

fn background_from_colorfgbg(val: &str) -> Option<BackgroundType> {
    let bg_num = val.split(';').next_back()?.parse::<u8>().ok()?;
    Some(if bg_num <= 6 {
        BackgroundType::Dark
    } else {
        BackgroundType::Light
    })
}

/// Every style used by the dashboard widgets.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub warning: Style,
    pub error: Style,

    // ── Metric deltas ────────────────────────────────────────────────────────
    /// Selection margin above the overall margin.
    pub delta_positive: Style,
    /// Selection margin below the overall margin.
    pub delta_negative: Style,
    /// Delta of exactly zero, or not computable.
    pub delta_neutral: Style,

    // ── Selector ─────────────────────────────────────────────────────────────
    /// The active category in the category strip.
    pub category_active: Style,
    pub category_inactive: Style,
    /// Checked subcategory.
    pub option_checked: Style,
    pub option_unchecked: Style,
    /// Row under the cursor.
    pub cursor: Style,

    // ── Share bar ────────────────────────────────────────────────────────────
    pub share_filled: Style,
    pub share_empty: Style,
    pub share_label: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub chart_selection: Style,
    pub chart_overall: Style,
    pub chart_axis: Style,
    pub bar: Style,
    pub bar_value: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,

    // ── Tabs ─────────────────────────────────────────────────────────────────
    pub tab_active: Style,
    pub tab_inactive: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            delta_positive: Style::default().fg(Color::Green),
            delta_negative: Style::default().fg(Color::Red),
            delta_neutral: Style::default().fg(Color::Gray),

            category_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            category_inactive: Style::default().fg(Color::Gray),
            option_checked: Style::default().fg(Color::Green),
            option_unchecked: Style::default().fg(Color::Gray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),

            share_filled: Style::default().fg(Color::Cyan),
            share_empty: Style::default().fg(Color::DarkGray),
            share_label: Style::default().fg(Color::Gray),

            chart_selection: Style::default().fg(Color::Cyan),
            chart_overall: Style::default().fg(Color::Yellow),
            chart_axis: Style::default().fg(Color::Gray),
            bar: Style::default().fg(Color::Blue),
            bar_value: Style::default().fg(Color::White).bg(Color::Blue),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            tab_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::Gray),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            delta_positive: Style::default().fg(Color::Green),
            delta_negative: Style::default().fg(Color::Red),
            delta_neutral: Style::default().fg(Color::DarkGray),

            category_active: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            category_inactive: Style::default().fg(Color::DarkGray),
            option_checked: Style::default().fg(Color::Green),
            option_unchecked: Style::default().fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),

            share_filled: Style::default().fg(Color::Blue),
            share_empty: Style::default().fg(Color::Gray),
            share_label: Style::default().fg(Color::DarkGray),

            chart_selection: Style::default().fg(Color::Blue),
            chart_overall: Style::default().fg(Color::Magenta),
            chart_axis: Style::default().fg(Color::DarkGray),
            bar: Style::default().fg(Color::Blue),
            bar_value: Style::default().fg(Color::White).bg(Color::Blue),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            tab_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::DarkGray),
        }
    }

    /// Basic 8-colour ANSI palette without bold modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            delta_positive: Style::default().fg(Color::Green),
            delta_negative: Style::default().fg(Color::Red),
            delta_neutral: Style::default().fg(Color::White),

            category_active: Style::default().fg(Color::Black).bg(Color::Cyan),
            category_inactive: Style::default().fg(Color::White),
            option_checked: Style::default().fg(Color::Green),
            option_unchecked: Style::default().fg(Color::White),
            cursor: Style::default().add_modifier(Modifier::REVERSED),

            share_filled: Style::default().fg(Color::Cyan),
            share_empty: Style::default().fg(Color::DarkGray),
            share_label: Style::default().fg(Color::White),

            chart_selection: Style::default().fg(Color::Cyan),
            chart_overall: Style::default().fg(Color::Yellow),
            chart_axis: Style::default().fg(Color::White),
            bar: Style::default().fg(Color::Blue),
            bar_value: Style::default().fg(Color::White).bg(Color::Blue),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),

            tab_active: Style::default().fg(Color::Cyan),
            tab_inactive: Style::default().fg(Color::White),
        }
    }

    /// Choose a theme based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name. Unknown names fall back to `auto_detect`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Style for a margin delta: green above zero, red below, neutral when
    /// zero or not computable.
    pub fn delta_style(&self, delta: Option<rust_decimal::Decimal>) -> Style {
        match delta {
            Some(d) if d.is_sign_positive() && !d.is_zero() => self.delta_positive,
            Some(d) if d.is_sign_negative() && !d.is_zero() => self.delta_negative,
            _ => self.delta_neutral,
        }
    }

    /// Alternating style for table row `index`.
    pub fn row_style(&self, index: usize) -> Style {
        if index % 2 == 0 {
            self.table_row
        } else {
            self.table_row_alt
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    // ── Theme construction ───────────────────────────────────────────────────

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.delta_positive.fg, Some(Color::Green));
        assert_eq!(t.delta_negative.fg, Some(Color::Red));
        assert_eq!(t.chart_selection.fg, Some(Color::Cyan));
        assert_eq!(t.table_total.fg, Some(Color::Yellow));
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.header.fg, Some(Color::Blue));
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.table_row.fg, Some(Color::Black));
    }

    #[test]
    fn test_classic_theme_has_no_bold() {
        let t = Theme::classic();
        assert!(!t.header.add_modifier.contains(Modifier::BOLD));
        assert!(!t.value.add_modifier.contains(Modifier::BOLD));
        assert!(!t.table_total.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("dark").header.fg, Some(Color::Cyan));
        assert_eq!(Theme::from_name("light").header.fg, Some(Color::Blue));
        let classic = Theme::from_name("classic");
        assert!(!classic.header.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        let t = Theme::from_name("neon");
        assert!(t.header.fg.is_some());
    }

    // ── detect_background ────────────────────────────────────────────────────

    #[test]
    fn test_background_from_colorfgbg() {
        assert_eq!(background_from_colorfgbg("15;0"), Some(BackgroundType::Dark));
        assert_eq!(background_from_colorfgbg("0;15"), Some(BackgroundType::Light));
        assert_eq!(background_from_colorfgbg("0;default;7"), Some(BackgroundType::Light));
        assert_eq!(background_from_colorfgbg("garbage"), None);
    }

    // ── delta_style ──────────────────────────────────────────────────────────

    #[test]
    fn test_delta_style() {
        let t = Theme::dark();
        assert_eq!(t.delta_style(Some(Decimal::new(25, 1))).fg, Some(Color::Green));
        assert_eq!(t.delta_style(Some(Decimal::new(-1, 2))).fg, Some(Color::Red));
        assert_eq!(t.delta_style(Some(Decimal::ZERO)).fg, Some(Color::Gray));
        assert_eq!(t.delta_style(None).fg, Some(Color::Gray));
    }

    #[test]
    fn test_row_style_alternates() {
        let t = Theme::dark();
        assert_eq!(t.row_style(0), t.table_row);
        assert_eq!(t.row_style(1), t.table_row_alt);
        assert_eq!(t.row_style(2), t.table_row);
    }
}
