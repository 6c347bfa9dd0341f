pub mod api;
pub mod recurrence;
pub mod todo;
