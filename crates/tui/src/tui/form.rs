use crate::model::{NewTask, TaskStatus};

use super::buffer::TextBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum FormField {
    #[default]
    Title,
    Description,
    Status,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Status,
            FormField::Status => FormField::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Status,
            FormField::Description => FormField::Title,
            FormField::Status => FormField::Description,
        }
    }
}

/// State of the task creation form.
#[derive(Debug, Clone, Default)]
pub(crate) struct TaskForm {
    pub title: TextBuffer,
    pub description: TextBuffer,
    pub status: TaskStatus,
    pub focus: FormField,
}

impl TaskForm {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub(crate) fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// The focused text field, if the focus is on one.
    pub(crate) fn focused_buffer(&mut self) -> Option<&mut TextBuffer> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Status => None,
        }
    }

    /// `None` when the title is blank.
    pub(crate) fn to_new_task(&self) -> Option<NewTask> {
        if self.title.is_blank() {
            return None;
        }
        let mut task = NewTask::new(self.title.as_str()).with_status(self.status);
        if !self.description.is_blank() {
            task = task.with_description(self.description.as_str());
        }
        Some(task)
    }
}
