//! Application state and the TUI event loop.
//!
//! [`App`] owns the theme, the active tab, the list cursor and the
//! [`DashboardController`]. Key presses are translated into controller
//! calls; the controller recomputes synchronously, so the next frame always
//! draws figures for the current selection.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Paragraph, Tabs},
    Frame, Terminal,
};

use dashboard_core::error::{DashboardError, Result};
use dashboard_runtime::controller::DashboardController;

use crate::chart_view;
use crate::components::header::Header;
use crate::components::indicators::{overall_cards, render_metric_row, selection_cards};
use crate::components::selector::{category_line, SubcategoryList};
use crate::components::share_bar::ShareBar;
use crate::table_view;
use crate::themes::Theme;

/// Rows scrolled by PageUp / PageDown in the records view.
const PAGE_SIZE: usize = 20;

// ── Tab ───────────────────────────────────────────────────────────────────────

/// Which screen the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Selector, metric rows and the selection's sales trend.
    Dashboard,
    /// Monthly table, overall trend and category breakdown.
    Trends,
    /// Raw record listing.
    Records,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Dashboard, Tab::Trends, Tab::Records];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Trends => "Trends",
            Tab::Records => "Records",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Dashboard => 0,
            Tab::Trends => 1,
            Tab::Records => 2,
        }
    }

    pub fn next(&self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    pub tab: Tab,
    /// Row of the subcategory list under the cursor.
    pub cursor: usize,
    /// First visible row of the records view.
    pub record_offset: usize,
    /// Trends tab lists the whole dataset's months instead of the selection's.
    pub overall_months: bool,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    controller: DashboardController,
}

impl App {
    pub fn new(theme_name: &str, controller: DashboardController) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            tab: Tab::Dashboard,
            cursor: 0,
            record_offset: 0,
            overall_months: false,
            should_quit: false,
            controller,
        }
    }

    pub fn controller(&self) -> &DashboardController {
        &self.controller
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive dashboard until the user quits.
    ///
    /// Polls for key events every 250 ms. Exits on `q`, `Q`, `Esc` or
    /// `Ctrl+C`. The terminal is restored even when drawing fails.
    pub fn run(mut self) -> Result<()> {
        enable_raw_mode().map_err(terminal_error)?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(terminal_error)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(terminal_error)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode().map_err(terminal_error)?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(terminal_error)?;
        terminal.show_cursor().map_err(terminal_error)?;

        result.map_err(terminal_error)
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        let tick_rate = Duration::from_millis(250);

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        tracing::info!(
            recomputations = self.controller.recompute_count(),
            "dashboard closed"
        );
        Ok(())
    }

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,

            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::BackTab => self.tab = self.tab.previous(),
            KeyCode::Char('1') => self.tab = Tab::Dashboard,
            KeyCode::Char('2') => self.tab = Tab::Trends,
            KeyCode::Char('3') => self.tab = Tab::Records,
            KeyCode::Char('o') if self.tab == Tab::Trends => {
                self.overall_months = !self.overall_months;
            }

            KeyCode::Left => {
                if self.controller.previous_category() {
                    self.cursor = 0;
                }
            }
            KeyCode::Right => {
                if self.controller.next_category() {
                    self.cursor = 0;
                }
            }

            KeyCode::Up if self.tab == Tab::Records => {
                self.record_offset = self.record_offset.saturating_sub(1);
            }
            KeyCode::Down if self.tab == Tab::Records => self.scroll_records(1),
            KeyCode::PageUp => self.record_offset = self.record_offset.saturating_sub(PAGE_SIZE),
            KeyCode::PageDown => self.scroll_records(PAGE_SIZE),

            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => {
                let last = self.option_count().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(last);
            }

            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_at_cursor(),
            KeyCode::Char('a') => {
                self.controller.select_all();
            }
            KeyCode::Char('c') => {
                self.controller.clear_subcategories();
            }
            _ => {}
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn option_count(&self) -> usize {
        self.controller.selection().category().subcategories().len()
    }

    fn toggle_at_cursor(&mut self) {
        let options = self.controller.selection().category().subcategories();
        if let Some(sub) = options.get(self.cursor) {
            self.controller.toggle_subcategory(sub);
        }
    }

    fn scroll_records(&mut self, rows: usize) {
        let last = self.controller.dataset().len().saturating_sub(1);
        self.record_offset = (self.record_offset + rows).min(last);
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let [header_area, tabs_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_header(frame, header_area);

        let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()))
            .select(self.tab.index())
            .style(self.theme.tab_inactive)
            .highlight_style(self.theme.tab_active);
        frame.render_widget(tabs, tabs_area);

        match self.tab {
            Tab::Dashboard => self.render_dashboard(frame, body_area),
            Tab::Trends => self.render_trends(frame, body_area),
            Tab::Records => self.render_records(frame, body_area),
        }

        frame.render_widget(Paragraph::new(self.footer_line()), footer_area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let dataset = self.controller.dataset();
        let source = dataset
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| dataset.source.display().to_string());
        let monthly = &dataset.overview.monthly_sales;
        let span = monthly.first().zip(monthly.last()).map(|(a, b)| (a.month, b.month));

        let header = Header::new(&source, dataset.len(), span, &self.theme);
        frame.render_widget(Paragraph::new(Text::from(header.to_lines())), area);
    }

    fn render_dashboard(&self, frame: &mut Frame, area: Rect) {
        let snapshot = self.controller.snapshot();
        let selection = self.controller.selection();

        let [category_area, main_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
        frame.render_widget(
            Paragraph::new(category_line(selection.category(), &self.theme)),
            category_area,
        );

        let [list_area, right_area] =
            Layout::horizontal([Constraint::Length(28), Constraint::Min(0)]).areas(main_area);
        SubcategoryList::new(selection, self.cursor, &self.theme).render(frame, list_area);

        let [selection_row, overall_row, share_area, chart_area] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Min(6),
        ])
        .areas(right_area);

        render_metric_row(frame, selection_row, &selection_cards(snapshot, &self.theme));
        render_metric_row(frame, overall_row, &overall_cards(snapshot, &self.theme));

        let share = ShareBar::new(
            snapshot.selection_metrics.total_sales,
            snapshot.overall_metrics().total_sales,
            &self.theme,
        );
        frame.render_widget(Paragraph::new(share.to_line()), share_area);

        chart_view::render_sales_chart(
            frame,
            chart_area,
            "Sales Trend for Selected Subcategories",
            &snapshot.selection_series,
            self.theme.chart_selection,
            &self.theme,
        );
    }

    fn render_trends(&self, frame: &mut Frame, area: Rect) {
        let snapshot = self.controller.snapshot();

        let [table_area, right_area] =
            Layout::horizontal([Constraint::Length(40), Constraint::Min(0)]).areas(area);

        let (title, series) = if self.overall_months {
            (
                "Monthly Sales: All Records".to_string(),
                &snapshot.overview.monthly_sales,
            )
        } else {
            (
                format!("Monthly Sales: {}", snapshot.selection.category()),
                &snapshot.selection_series,
            )
        };
        if series.is_empty() {
            table_view::render_no_data(frame, table_area, &title, &self.theme);
        } else {
            table_view::render_monthly_table(frame, table_area, &title, series, &self.theme);
        }

        let [overall_area, bars_area, categories_area] = Layout::vertical([
            Constraint::Min(8),
            Constraint::Length(10),
            Constraint::Length(7),
        ])
        .areas(right_area);

        chart_view::render_sales_chart(
            frame,
            overall_area,
            "Overall Monthly Sales",
            &snapshot.overview.monthly_sales,
            self.theme.chart_overall,
            &self.theme,
        );
        chart_view::render_category_bars(
            frame,
            bars_area,
            &snapshot.overview.category_totals,
            &self.theme,
        );
        table_view::render_category_table(
            frame,
            categories_area,
            &snapshot.overview.category_totals,
            &self.theme,
        );
    }

    fn render_records(&self, frame: &mut Frame, area: Rect) {
        let dataset = self.controller.dataset();
        table_view::render_records_table(
            frame,
            area,
            &dataset.records,
            &dataset.overview.metrics,
            self.record_offset,
            &self.theme,
        );
    }

    fn footer_line(&self) -> Line<'_> {
        let keys = match self.tab {
            Tab::Records => "↑/↓ scroll  PgUp/PgDn page  Tab switch view  q quit",
            Tab::Trends => {
                "←/→ category  Space toggle  o overall/selection months  Tab switch view  q quit"
            }
            _ => "←/→ category  ↑/↓ move  Space toggle  a all  c clear  Tab switch view  q quit",
        };
        Line::from(Span::styled(keys, self.theme.dim))
    }
}

fn terminal_error(err: io::Error) -> DashboardError {
    DashboardError::Terminal(err.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
