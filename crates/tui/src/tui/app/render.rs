use std::cmp::min;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Wrap,
};
use ratatui::Frame;

use crate::core::LoadState;
use crate::model::TaskStatus;
use crate::tui::columns::{Field, COLUMNS};
use crate::tui::constants::{APP_VERSION, STATUS_LOADING};
use crate::tui::form::FormField;
use crate::tui::helpers::{
    accent_title, build_help_lines, centered_rect, inset_rect, status_color, toast_rect, BG_ACCENT,
    BG_BASE, BG_PANEL, FG_ACCENT,
};

use super::{App, InputMode};

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        self.draw_counter_bar(f, chunks[1]);
        self.draw_table(f, chunks[2]);
        self.draw_pagination(f, chunks[3]);
        self.draw_footer(f, chunks[4]);

        match self.input_mode {
            InputMode::Search => self.draw_input_overlay(f, size, "🔍 Search", &self.search),
            InputMode::EditTitle => {
                self.draw_input_overlay(f, size, "✏️ Edit Title", &self.cell_input)
            }
            InputMode::Form => self.draw_form_overlay(f, size),
            InputMode::EditStatus => self.draw_select_overlay(f, size),
            InputMode::Help => self.draw_help_overlay(f, size),
            InputMode::Normal => {}
        }

        self.draw_toast(f, size);
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);

        let load_span = match &self.load_state {
            LoadState::Loading => Span::styled(STATUS_LOADING, Style::default().fg(Color::Yellow)),
            LoadState::Loaded { report, at, .. } => Span::styled(
                format!("{} tasks loaded at {}", report.loaded, at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ),
            LoadState::Failed { at, .. } => Span::styled(
                format!("No tasks loaded ({})", at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ),
        };

        let left_line = Line::from(vec![
            Span::styled(
                format!(" tasklist v{} ", APP_VERSION),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("— "),
            load_span,
        ]);
        f.render_widget(
            Paragraph::new(left_line).style(Style::default().bg(BG_BASE)),
            cols[0],
        );

        if let Some(summary) = self.store.criteria().summary() {
            let right_line = Line::from(vec![Span::styled(
                format!("🔍 {} ", summary),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]);
            f.render_widget(
                Paragraph::new(right_line)
                    .alignment(Alignment::Right)
                    .style(Style::default().bg(BG_BASE)),
                cols[1],
            );
        }
    }

    fn draw_counter_bar(&self, f: &mut Frame<'_>, area: Rect) {
        let counts = self.store.counts();
        let mut spans = Vec::with_capacity(TaskStatus::ALL.len() * 2);
        for status in TaskStatus::ALL {
            spans.push(Span::styled(
                format!(" {}: ", status.label()),
                Style::default().fg(status_color(status)),
            ));
            spans.push(Span::styled(
                format!("{:<6}", counts.get(status)),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        }

        let bar = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(accent_title("Status"))
                .border_style(Style::default().fg(Color::DarkGray))
                .style(Style::default().bg(BG_PANEL)),
        );
        f.render_widget(bar, area);
    }

    fn draw_table(&mut self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(&format!(
                "Tasks · showing {} of {}",
                self.store.filtered_len(),
                self.store.len()
            )))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));

        let page = self.page_tasks();
        if page.is_empty() {
            let inner = block.inner(area);
            f.render_widget(block, area);
            if inner.width == 0 || inner.height == 0 {
                return;
            }
            let lines = self.empty_state();
            let height = (lines.len() as u16).saturating_add(2).min(inner.height);
            let content_area = centered_rect(inner.width.min(80), height, inner);
            f.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: true })
                    .alignment(Alignment::Center)
                    .style(Style::default().bg(BG_PANEL)),
                content_area,
            );
            return;
        }

        let header = Row::new(COLUMNS.iter().map(|column| Cell::from(column.title)))
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = page
            .iter()
            .map(|task| {
                Row::new(COLUMNS.iter().map(|column| {
                    let text = column.cell_text(task);
                    match column.field {
                        Field::Status => {
                            Cell::from(text).style(Style::default().fg(status_color(task.status)))
                        }
                        Field::Action => Cell::from(text).style(Style::default().fg(Color::Red)),
                        Field::Id | Field::Title => Cell::from(text),
                    }
                }))
            })
            .collect();

        let widths: Vec<Constraint> = COLUMNS
            .iter()
            .map(|column| match column.width {
                0 => Constraint::Min(10),
                width => Constraint::Length(width),
            })
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn empty_state(&self) -> Vec<Line<'static>> {
        let heading = if self.load_state.is_loading() {
            STATUS_LOADING
        } else if self.store.is_empty() {
            "No tasks yet"
        } else {
            "No tasks match the current filters"
        };

        let hint = if self.store.is_empty() {
            "Press 'a' to add a task."
        } else {
            "Press 'c' to clear search and status filter."
        };

        vec![
            Line::from(vec![Span::styled(
                heading,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::default(),
            Line::from(vec![Span::styled(
                hint,
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            )]),
        ]
    }

    fn draw_pagination(&self, f: &mut Frame<'_>, area: Rect) {
        let total = self.store.filtered_len();
        let range = self.pager.range(total);
        let rows = if range.is_empty() {
            String::from("no rows")
        } else {
            format!("rows {}-{} of {}", range.start + 1, range.end, total)
        };
        let line = Line::from(vec![
            Span::styled(
                format!(
                    " Page {}/{} ",
                    self.pager.page() + 1,
                    self.pager.page_count(total)
                ),
                Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("• {} per page • {}", self.pager.page_size(), rows),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(
            Paragraph::new(line).style(Style::default().bg(BG_BASE)),
            area,
        );
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.style())])
        } else {
            Line::from(vec![Span::raw("Ready")])
        };
        f.render_widget(Paragraph::new(status_line), lines[0]);

        let help = match self.input_mode {
            InputMode::Normal => {
                "j/k move | [/] page | p page size | a add ✚ | e title ✏️ | s status 🔖 | x delete 🗑️ | / search 🔍 | f status filter | c clear | o dismiss | h help ❔ | q quit"
            }
            InputMode::Search => "Type to filter • Enter keep • Esc clear",
            InputMode::Form => "Tab move focus • ←/→ status • Enter submit ✚ • Esc close",
            InputMode::EditTitle => "Enter to save ✏️ • Esc to cancel",
            InputMode::EditStatus => "↑/↓ choose • Enter apply • Esc cancel",
            InputMode::Help => "Enter/Esc to close ❔",
        };
        let help_line = Line::from(vec![Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )]);
        f.render_widget(Paragraph::new(help_line), lines[1]);
    }

    fn draw_input_overlay(
        &self,
        f: &mut Frame<'_>,
        area: Rect,
        title: &str,
        buffer: &crate::tui::buffer::TextBuffer,
    ) {
        let width = min(area.width.saturating_sub(10), 80);
        let popup_area = centered_rect(width, 3, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(title))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);
        f.render_widget(
            Paragraph::new(buffer.with_caret()).style(Style::default().bg(BG_PANEL)),
            inner,
        );
    }

    fn draw_form_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let width = min(area.width.saturating_sub(10), 70);
        let popup_area = centered_rect(width, 9, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("➕ New Task"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = inset_rect(block.inner(popup_area), 1);
        f.render_widget(block, popup_area);

        let label_style = |field: FormField| {
            if self.form.focus == field {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(FG_ACCENT)
            }
        };
        let field_text = |field: FormField, buffer: &crate::tui::buffer::TextBuffer| {
            if self.form.focus == field {
                buffer.with_caret()
            } else {
                buffer.as_str().to_string()
            }
        };

        let mut status_spans = vec![Span::styled("Status       ", label_style(FormField::Status))];
        for status in TaskStatus::ALL {
            let style = if status == self.form.status {
                Style::default()
                    .fg(Color::Black)
                    .bg(status_color(status))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(status_color(status))
            };
            status_spans.push(Span::styled(format!(" {} ", status.label()), style));
            status_spans.push(Span::raw(" "));
        }

        let lines = vec![
            Line::from(vec![
                Span::styled("Title        ", label_style(FormField::Title)),
                Span::raw(field_text(FormField::Title, &self.form.title)),
            ]),
            Line::default(),
            Line::from(vec![
                Span::styled("Description  ", label_style(FormField::Description)),
                Span::raw(field_text(FormField::Description, &self.form.description)),
            ]),
            Line::default(),
            Line::from(status_spans),
        ];
        f.render_widget(
            Paragraph::new(lines).style(Style::default().bg(BG_PANEL)),
            inner,
        );
    }

    fn draw_select_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let options = self.select_options();
        let height = options.len() as u16 + 2;
        let popup_area = centered_rect(30, height, area);
        f.render_widget(Clear, popup_area);

        let items: Vec<ListItem> = options
            .iter()
            .map(|status| {
                ListItem::new(status.label()).style(Style::default().fg(status_color(*status)))
            })
            .collect();
        let mut state = ListState::default();
        state.select(Some(self.select_index));

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(accent_title("🔖 Status"))
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            )
            .highlight_style(Style::default().bg(BG_ACCENT).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");
        f.render_stateful_widget(list, popup_area, &mut state);
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = build_help_lines();
        let width = min(area.width.saturating_sub(10), 70);
        let height = min(lines.len() as u16 + 4, area.height.saturating_sub(2)).max(10);
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("⌨️ Keyboard Reference"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        if inner.width < 3 || inner.height < 3 {
            return;
        }

        let rows: Vec<Row> = lines
            .into_iter()
            .map(|(combo, desc)| {
                Row::new(vec![
                    Cell::from(combo).style(Style::default().fg(Color::Cyan)),
                    Cell::from(desc),
                ])
            })
            .collect();
        let table = Table::new(rows, [Constraint::Length(22), Constraint::Min(10)])
            .column_spacing(2)
            .style(Style::default().bg(BG_PANEL));
        f.render_widget(table, inset_rect(inner, 1));
    }

    fn draw_toast(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(toast) = self.toast.current() else {
            return;
        };
        let text_width = u16::try_from(toast.message.chars().count()).unwrap_or(u16::MAX);
        let Some(toast_area) = toast_rect(area, text_width) else {
            return;
        };
        f.render_widget(Clear, toast_area);
        f.render_widget(
            Paragraph::new(Line::from(vec![Span::styled(
                format!("✓ {}", toast.message),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green))
                    .style(Style::default().bg(BG_ACCENT)),
            ),
            toast_area,
        );
    }
}
