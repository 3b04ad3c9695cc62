//! Repository methods on [`KanbanDb`](crate::KanbanDb).

pub mod task;
