use std::fmt;

/// Emitted by every successful store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Created,
    StatusEdited,
    TitleEdited,
    Deleted,
}

impl Notification {
    pub fn message(&self) -> &'static str {
        match self {
            Notification::Created => "Task Created Successfully",
            Notification::StatusEdited => "Status Edited Successfully",
            Notification::TitleEdited => "Title Edited Successfully",
            Notification::Deleted => "Task Deleted",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
