use crate::model::{Task, TaskStatus};

/// The task field a column reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Id,
    Title,
    Status,
    Action,
}

/// How a cell is edited in place. The view owns the editor; the store owns
/// the committed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellEditor {
    TextInput,
    Select(&'static [TaskStatus]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnSpec {
    pub title: &'static str,
    pub field: Field,
    pub editor: Option<CellEditor>,
    pub width: u16,
}

pub(crate) static COLUMNS: [ColumnSpec; 4] = [
    ColumnSpec {
        title: "Task Id",
        field: Field::Id,
        editor: None,
        width: 9,
    },
    ColumnSpec {
        title: "Title",
        field: Field::Title,
        editor: Some(CellEditor::TextInput),
        width: 0,
    },
    ColumnSpec {
        title: "Status",
        field: Field::Status,
        editor: Some(CellEditor::Select(&TaskStatus::ALL)),
        width: 13,
    },
    ColumnSpec {
        title: "Action",
        field: Field::Action,
        editor: None,
        width: 8,
    },
];

pub(crate) fn column(field: Field) -> &'static ColumnSpec {
    match field {
        Field::Id => &COLUMNS[0],
        Field::Title => &COLUMNS[1],
        Field::Status => &COLUMNS[2],
        Field::Action => &COLUMNS[3],
    }
}

impl ColumnSpec {
    pub(crate) fn cell_text(&self, task: &Task) -> String {
        match self.field {
            Field::Id => task.id.to_string(),
            Field::Title => task.title.clone(),
            Field::Status => task.status.label().to_string(),
            Field::Action => String::from("[x] Del"),
        }
    }
}
