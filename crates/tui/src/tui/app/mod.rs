use std::time::{Duration, Instant};

use ratatui::style::{Color, Style};
use ratatui::widgets::TableState;
use tracing::debug;

use super::buffer::TextBuffer;
use super::columns::{column, CellEditor, Field};
use super::constants::*;
use super::filters::{next_status_filter, status_filter_label};
use super::form::TaskForm;
use super::pager::Pager;
use super::toast::ToastSlot;
use crate::config::AppConfig;
use crate::core::{apply_outcome, LoadState, Notification, PendingLoad, TaskStore};
use crate::model::{Task, TaskStatus};

mod input;
mod render;

const STATUS_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Search,
    Form,
    EditTitle,
    EditStatus,
    Help,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusKind {
    Info,
    Error,
}

/// Cell currently open in an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellEdit {
    task_id: u64,
    field: Field,
}

pub(crate) struct App {
    store: TaskStore,
    pending: Option<PendingLoad>,
    load_state: LoadState,
    pager: Pager,
    selected: usize,
    table_state: TableState,
    input_mode: InputMode,
    form: TaskForm,
    search: TextBuffer,
    cell_input: TextBuffer,
    cell_edit: Option<CellEdit>,
    select_index: usize,
    toast: ToastSlot,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(config: &AppConfig, pending: PendingLoad) -> Self {
        let pager = Pager::new(config.page_size());
        let toast = ToastSlot::new(config.toast_ttl());
        debug!(source = pending.source(), "waiting for initial load");
        Self {
            store: TaskStore::new(),
            pending: Some(pending),
            load_state: LoadState::Loading,
            pager,
            selected: 0,
            table_state: TableState::default(),
            input_mode: InputMode::Normal,
            form: TaskForm::default(),
            search: TextBuffer::new(),
            cell_input: TextBuffer::new(),
            cell_edit: None,
            select_index: 0,
            toast,
            status: None,
            should_quit: false,
        }
    }

    pub(crate) fn on_tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        if let Some(outcome) = self.pending.as_ref().and_then(PendingLoad::poll) {
            self.pending = None;
            self.load_state = apply_outcome(&mut self.store, outcome);
            self.pager.first_page();
            self.selected = 0;
            self.sync_view();
        }

        self.toast.expire(now);
        if let Some(status) = &self.status {
            if now.saturating_duration_since(status.created_at) > STATUS_TTL {
                self.status = None;
            }
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn notify(&mut self, notification: Notification) {
        self.toast.show(notification, Instant::now());
    }

    /// Re-clamp the page and the row selection after the filtered view changed.
    fn sync_view(&mut self) {
        let total = self.store.filtered_len();
        self.pager.clamp(total);
        let rows = self.pager.range(total).len();
        if rows == 0 {
            self.selected = 0;
            self.table_state.select(None);
        } else {
            self.selected = self.selected.min(rows - 1);
            self.table_state.select(Some(self.selected));
        }
    }

    fn page_tasks(&self) -> Vec<&Task> {
        let range = self.pager.range(self.store.filtered_len());
        self.store
            .filtered()
            .into_iter()
            .skip(range.start)
            .take(range.len())
            .collect()
    }

    fn selected_task(&self) -> Option<&Task> {
        self.page_tasks().get(self.selected).copied()
    }

    fn page_rows(&self) -> usize {
        self.pager.range(self.store.filtered_len()).len()
    }

    fn select_next(&mut self) {
        let rows = self.page_rows();
        if rows == 0 {
            return;
        }
        if self.selected + 1 < rows {
            self.selected += 1;
        } else if self.pager.next_page(self.store.filtered_len()) {
            self.selected = 0;
        }
        self.sync_view();
    }

    fn select_prev(&mut self) {
        if self.page_rows() == 0 {
            return;
        }
        if self.selected > 0 {
            self.selected -= 1;
        } else if self.pager.prev_page() {
            self.selected = self.page_rows().saturating_sub(1);
        }
        self.sync_view();
    }

    fn select_first(&mut self) {
        self.selected = 0;
        self.sync_view();
    }

    fn select_last(&mut self) {
        self.selected = self.page_rows().saturating_sub(1);
        self.sync_view();
    }

    fn next_page(&mut self) {
        if self.pager.next_page(self.store.filtered_len()) {
            self.selected = 0;
            self.sync_view();
        }
    }

    fn prev_page(&mut self) {
        if self.pager.prev_page() {
            self.selected = 0;
            self.sync_view();
        }
    }

    fn cycle_page_size(&mut self) {
        self.pager.cycle_page_size(self.store.filtered_len());
        self.selected = 0;
        self.sync_view();
        self.set_status_info(format!("Showing {} rows per page", self.pager.page_size()));
    }

    fn toggle_form(&mut self) {
        if self.input_mode == InputMode::Form {
            self.close_form();
        } else {
            self.input_mode = InputMode::Form;
            self.set_status_info(STATUS_FORM);
        }
    }

    fn close_form(&mut self) {
        self.input_mode = InputMode::Normal;
        self.status = None;
    }

    fn submit_form(&mut self) {
        let Some(new_task) = self.form.to_new_task() else {
            self.set_status_error(STATUS_FORM_EMPTY_TITLE);
            return;
        };

        match self.store.create(new_task) {
            Ok((task, notification)) => {
                debug!(id = task.id, "task created from form");
                self.form.reset();
                self.close_form();
                self.pager.first_page();
                self.selected = 0;
                self.sync_view();
                self.notify(notification);
            }
            Err(err) => self.set_status_error(err.to_string()),
        }
    }

    fn open_search(&mut self) {
        let query = self.store.criteria().query().unwrap_or_default().to_string();
        self.search.set(query);
        self.input_mode = InputMode::Search;
        self.set_status_info(STATUS_SEARCH);
    }

    fn apply_search(&mut self) {
        self.store.set_search_query(self.search.as_str());
        self.pager.first_page();
        self.selected = 0;
        self.sync_view();
    }

    fn close_search(&mut self, keep: bool) {
        if !keep {
            self.search.clear();
            self.apply_search();
        }
        self.input_mode = InputMode::Normal;
        self.status = None;
    }

    fn cycle_status_filter(&mut self) {
        let next = next_status_filter(self.store.criteria().status());
        self.store.set_status_filter(next);
        self.pager.first_page();
        self.selected = 0;
        self.sync_view();
        self.set_status_info(format!("Status filter: {}", status_filter_label(next)));
    }

    fn clear_filters(&mut self) {
        self.store.clear_filters();
        self.search.clear();
        self.pager.first_page();
        self.selected = 0;
        self.sync_view();
        self.set_status_info(STATUS_FILTERS_CLEARED);
    }

    /// Open the editor the column declares for the selected row.
    fn begin_cell_edit(&mut self, field: Field) {
        let Some(task) = self.selected_task() else {
            self.set_status_info(STATUS_NOTHING_SELECTED);
            return;
        };
        let (task_id, title, status) = (task.id, task.title.clone(), task.status);

        match column(field).editor {
            Some(CellEditor::TextInput) => {
                self.cell_input.set(title);
                self.input_mode = InputMode::EditTitle;
                self.set_status_info(STATUS_EDIT_TITLE);
            }
            Some(CellEditor::Select(options)) => {
                self.select_index = options.iter().position(|s| *s == status).unwrap_or(0);
                self.input_mode = InputMode::EditStatus;
                self.set_status_info(STATUS_EDIT_STATUS);
            }
            None => return,
        }
        self.cell_edit = Some(CellEdit { task_id, field });
    }

    fn select_options(&self) -> &'static [TaskStatus] {
        match column(Field::Status).editor {
            Some(CellEditor::Select(options)) => options,
            _ => &[],
        }
    }

    fn commit_title_edit(&mut self) {
        let Some(edit) = self.cell_edit.filter(|edit| edit.field == Field::Title) else {
            self.cancel_cell_edit();
            return;
        };
        if self.cell_input.is_blank() {
            self.set_status_error(STATUS_EMPTY_TITLE_EDIT);
            return;
        }

        let outcome = self.store.update_title(edit.task_id, self.cell_input.as_str());
        self.finish_cell_edit(outcome);
    }

    fn commit_status_edit(&mut self) {
        let Some(edit) = self.cell_edit.filter(|edit| edit.field == Field::Status) else {
            self.cancel_cell_edit();
            return;
        };
        let Some(status) = self.select_options().get(self.select_index).copied() else {
            self.cancel_cell_edit();
            return;
        };

        let outcome = self.store.update_status(edit.task_id, status);
        self.finish_cell_edit(outcome);
    }

    fn finish_cell_edit(&mut self, outcome: Option<Notification>) {
        self.cancel_cell_edit();
        self.sync_view();
        if let Some(notification) = outcome {
            self.notify(notification);
        }
    }

    fn cancel_cell_edit(&mut self) {
        self.cell_edit = None;
        self.cell_input.clear();
        self.input_mode = InputMode::Normal;
        self.status = None;
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_task().map(|task| task.id) else {
            self.set_status_info(STATUS_NOTHING_SELECTED);
            return;
        };
        if let Some(notification) = self.store.delete(id) {
            self.sync_view();
            self.notify(notification);
        }
    }

    fn dismiss_toast(&mut self) -> bool {
        self.toast.dismiss()
    }

    fn show_help_overlay(&mut self) {
        self.input_mode = InputMode::Help;
        self.set_status_info(STATUS_HELP);
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("ℹ️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Info));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("⚠️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Error));
    }
}
