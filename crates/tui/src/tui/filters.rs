use crate::model::TaskStatus;

/// Next step of the `f` key: none → To Do → In Progress → Done → none.
pub(crate) fn next_status_filter(current: Option<TaskStatus>) -> Option<TaskStatus> {
    match current {
        None => Some(TaskStatus::ToDo),
        Some(TaskStatus::ToDo) => Some(TaskStatus::InProgress),
        Some(TaskStatus::InProgress) => Some(TaskStatus::Done),
        Some(TaskStatus::Done) => None,
    }
}

pub(crate) fn status_filter_label(status: Option<TaskStatus>) -> &'static str {
    status.map(|s| s.label()).unwrap_or("All")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Some(TaskStatus::ToDo))]
    #[case(Some(TaskStatus::ToDo), Some(TaskStatus::InProgress))]
    #[case(Some(TaskStatus::InProgress), Some(TaskStatus::Done))]
    #[case(Some(TaskStatus::Done), None)]
    fn status_filter_cycles(
        #[case] current: Option<TaskStatus>,
        #[case] expected: Option<TaskStatus>,
    ) {
        assert_eq!(next_status_filter(current), expected);
    }

    #[test]
    fn unset_filter_reads_as_all() {
        assert_eq!(status_filter_label(None), "All");
        assert_eq!(status_filter_label(Some(TaskStatus::Done)), "Done");
    }
}
