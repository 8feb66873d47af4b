//! Category picker and subcategory multi-select.

use dashboard_core::models::Selection;
use dashboard_core::taxonomy::Category;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::themes::Theme;

// ── Category strip ────────────────────────────────────────────────────────────

/// One line listing every category with the active one highlighted.
pub fn category_line<'a>(active: Category, theme: &'a Theme) -> Line<'a> {
    let mut spans = vec![Span::styled("Category: ", theme.label)];
    for (i, category) in Category::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ", theme.dim));
        }
        let style = if *category == active {
            theme.category_active
        } else {
            theme.category_inactive
        };
        spans.push(Span::styled(format!(" {} ", category.as_str()), style));
    }
    spans.push(Span::styled("  ←/→ to change", theme.dim));
    Line::from(spans)
}

// ── SubcategoryList ───────────────────────────────────────────────────────────

/// Checklist of the active category's subcategories.
///
/// Only subcategories of the selection's category are offered, in taxonomy
/// order. `cursor` is clamped to the list.
pub struct SubcategoryList<'a> {
    pub selection: &'a Selection,
    pub cursor: usize,
    pub theme: &'a Theme,
}

impl<'a> SubcategoryList<'a> {
    pub fn new(selection: &'a Selection, cursor: usize, theme: &'a Theme) -> Self {
        Self {
            selection,
            cursor,
            theme,
        }
    }

    /// Subcategories on offer.
    pub fn options(&self) -> &'static [&'static str] {
        self.selection.category().subcategories()
    }

    /// Cursor position, clamped to the option list.
    pub fn clamped_cursor(&self) -> usize {
        self.cursor.min(self.options().len().saturating_sub(1))
    }

    /// One `[x] Name` / `[ ] Name` line per option.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        self.options()
            .iter()
            .map(|sub| {
                if self.selection.is_chosen(sub) {
                    Line::from(Span::styled(format!("[x] {sub}"), self.theme.option_checked))
                } else {
                    Line::from(Span::styled(format!("[ ] {sub}"), self.theme.option_unchecked))
                }
            })
            .collect()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            " {} ({}/{}) ",
            self.selection.category(),
            self.selection.chosen_subcategories().len(),
            self.options().len()
        );
        let items: Vec<ListItem> = self.to_lines().into_iter().map(ListItem::new).collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.table_border)
                    .title(title),
            )
            .highlight_style(self.theme.cursor);

        let mut state = ListState::default().with_selected(Some(self.clamped_cursor()));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
