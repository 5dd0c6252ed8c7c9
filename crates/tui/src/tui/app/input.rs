use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::columns::Field;
use crate::tui::form::FormField;

use super::{App, InputMode};

#[derive(Debug, Clone, Copy)]
pub(crate) enum NormalAction {
    Quit,
    ToggleForm,
    OpenSearch,
    CycleStatusFilter,
    ClearFilters,
    EditTitle,
    EditStatus,
    Delete,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    NextPage,
    PrevPage,
    CyclePageSize,
    DismissToast,
    ShowHelp,
}

impl NormalAction {
    fn from_event(key: &KeyEvent) -> Option<Self> {
        if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }

        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char('a') => Some(Self::ToggleForm),
            KeyCode::Char('/') => Some(Self::OpenSearch),
            KeyCode::Char('f') => Some(Self::CycleStatusFilter),
            KeyCode::Char('c') => Some(Self::ClearFilters),
            KeyCode::Char('e') => Some(Self::EditTitle),
            KeyCode::Char('s') | KeyCode::Enter => Some(Self::EditStatus),
            KeyCode::Char('x') | KeyCode::Delete => Some(Self::Delete),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
            KeyCode::Home => Some(Self::SelectFirst),
            KeyCode::End => Some(Self::SelectLast),
            KeyCode::Char(']') | KeyCode::PageDown => Some(Self::NextPage),
            KeyCode::Char('[') | KeyCode::PageUp => Some(Self::PrevPage),
            KeyCode::Char('p') => Some(Self::CyclePageSize),
            KeyCode::Char('o') | KeyCode::Esc => Some(Self::DismissToast),
            KeyCode::Char('h') => Some(Self::ShowHelp),
            _ => None,
        }
    }
}

impl App {
    pub(crate) fn on_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Search => self.handle_search_mode(key),
            InputMode::Form => self.handle_form_mode(key),
            InputMode::EditTitle => self.handle_edit_title_mode(key),
            InputMode::EditStatus => self.handle_edit_status_mode(key),
            InputMode::Help => self.handle_help_mode(key),
        }
        Ok(())
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        if let Some(action) = NormalAction::from_event(&key) {
            self.execute_normal_action(action);
        }
    }

    fn execute_normal_action(&mut self, action: NormalAction) {
        match action {
            NormalAction::Quit => self.should_quit = true,
            NormalAction::ToggleForm => self.toggle_form(),
            NormalAction::OpenSearch => self.open_search(),
            NormalAction::CycleStatusFilter => self.cycle_status_filter(),
            NormalAction::ClearFilters => self.clear_filters(),
            NormalAction::EditTitle => self.begin_cell_edit(Field::Title),
            NormalAction::EditStatus => self.begin_cell_edit(Field::Status),
            NormalAction::Delete => self.delete_selected(),
            NormalAction::SelectNext => self.select_next(),
            NormalAction::SelectPrev => self.select_prev(),
            NormalAction::SelectFirst => self.select_first(),
            NormalAction::SelectLast => self.select_last(),
            NormalAction::NextPage => self.next_page(),
            NormalAction::PrevPage => self.prev_page(),
            NormalAction::CyclePageSize => self.cycle_page_size(),
            NormalAction::DismissToast => {
                if !self.dismiss_toast() {
                    self.status = None;
                }
            }
            NormalAction::ShowHelp => self.show_help_overlay(),
        }
    }

    fn handle_search_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.close_search(true),
            KeyCode::Esc => self.close_search(false),
            KeyCode::Backspace => {
                self.search.backspace();
                self.apply_search();
            }
            KeyCode::Delete => {
                self.search.delete_char();
                self.apply_search();
            }
            KeyCode::Char(c) => {
                self.search.insert_char(c);
                self.apply_search();
            }
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Home => self.search.move_home(),
            KeyCode::End => self.search.move_end(),
            _ => {}
        }
    }

    fn handle_form_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.close_form(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Left if self.form.focus == FormField::Status => {
                self.form.status = self.form.status.cycle_prev();
            }
            KeyCode::Right if self.form.focus == FormField::Status => {
                self.form.status = self.form.status.cycle_next();
            }
            code => {
                if let Some(buffer) = self.form.focused_buffer() {
                    match code {
                        KeyCode::Char(c) => buffer.insert_char(c),
                        KeyCode::Backspace => buffer.backspace(),
                        KeyCode::Delete => buffer.delete_char(),
                        KeyCode::Left => buffer.move_left(),
                        KeyCode::Right => buffer.move_right(),
                        KeyCode::Home => buffer.move_home(),
                        KeyCode::End => buffer.move_end(),
                        _ => {}
                    }
                }
            }
        }
    }

    fn handle_edit_title_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.commit_title_edit(),
            KeyCode::Esc => self.cancel_cell_edit(),
            KeyCode::Backspace => self.cell_input.backspace(),
            KeyCode::Delete => self.cell_input.delete_char(),
            KeyCode::Char(c) => self.cell_input.insert_char(c),
            KeyCode::Left => self.cell_input.move_left(),
            KeyCode::Right => self.cell_input.move_right(),
            KeyCode::Home => self.cell_input.move_home(),
            KeyCode::End => self.cell_input.move_end(),
            _ => {}
        }
    }

    fn handle_edit_status_mode(&mut self, key: KeyEvent) {
        let options = self.select_options().len();
        match key.code {
            KeyCode::Enter => self.commit_status_edit(),
            KeyCode::Esc => self.cancel_cell_edit(),
            KeyCode::Up | KeyCode::Char('k') if options > 0 => {
                self.select_index = (self.select_index + options - 1) % options;
            }
            KeyCode::Down | KeyCode::Char('j') if options > 0 => {
                self.select_index = (self.select_index + 1) % options;
            }
            _ => {}
        }
    }

    fn handle_help_mode(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('h')) {
            self.input_mode = InputMode::Normal;
            self.status = None;
        }
    }
}
