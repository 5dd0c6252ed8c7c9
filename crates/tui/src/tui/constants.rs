use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(200);

pub(crate) const STATUS_LOADING: &str = "Loading tasks…";
pub(crate) const STATUS_FORM: &str =
    "New task — Tab/Shift+Tab move focus • ←/→ change status • Enter submit • Esc close";
pub(crate) const STATUS_FORM_EMPTY_TITLE: &str = "Title is required";
pub(crate) const STATUS_SEARCH: &str = "Search title or description • Enter keep • Esc clear";
pub(crate) const STATUS_EDIT_TITLE: &str = "Edit title — Enter to save • Esc to cancel";
pub(crate) const STATUS_EDIT_STATUS: &str = "Pick a status — ↑/↓ choose • Enter apply • Esc cancel";
pub(crate) const STATUS_EMPTY_TITLE_EDIT: &str = "Title cannot be empty";
pub(crate) const STATUS_NOTHING_SELECTED: &str = "No task selected";
pub(crate) const STATUS_FILTERS_CLEARED: &str = "Cleared filters";
pub(crate) const STATUS_HELP: &str = "Keyboard reference — Enter/Esc to close";
