use crate::errors::AppError;
use crate::models::recurrence::validate_title;
use crate::store::Store;

use super::types::*;

pub fn find_all(store: &Store) -> Vec<TodoItem> {
    store.read(|c| c.list_todos())
}

pub fn find_by_id(store: &Store, id: i64) -> Result<TodoItem, AppError> {
    store.read(|c| c.get_todo(id).cloned())
}

pub fn create(store: &Store, draft: NewTodo) -> Result<TodoItem, AppError> {
    if let Some(e) = validate_title(&draft.title) {
        return Err(AppError::Validation(e));
    }
    let draft = NewTodo {
        recurrence_id: None,
        ..draft
    };

    let todo = store.write(|c| c.create_todo(draft, store.now()));
    log::debug!("Created todo {} at position {}", todo.id, todo.position);
    Ok(todo)
}

/// Plain field update. Completing a todo for the first time stamps
/// `completed_at`; a missing due date in the update keeps the current one.
pub fn update(store: &Store, id: i64, changes: TodoUpdate) -> Result<TodoItem, AppError> {
    if let Some(e) = validate_title(&changes.title) {
        return Err(AppError::Validation(e));
    }

    let todo = store.write(|c| {
        let now = store.now();
        c.update_todo(id, |todo| {
            todo.title = changes.title;
            todo.description = changes.description;
            todo.assigned_to = changes.assigned_to;
            todo.set_completed(changes.completed, now);
            if let Some(due) = changes.due_date {
                todo.due_date = Some(due);
            }
        })
    })?;
    log::debug!("Updated todo {id}");
    Ok(todo)
}

pub fn delete(store: &Store, id: i64) -> Result<(), AppError> {
    store.write(|c| c.delete_todo(id))?;
    log::debug!("Deleted todo {id}");
    Ok(())
}

/// Apply a batch of position changes; unknown ids are skipped.
pub fn reorder(store: &Store, entries: &[ReorderEntry]) -> usize {
    let applied = store.write(|c| c.reorder(entries));
    log::debug!("Reordered {applied} of {} todo(s)", entries.len());
    applied
}
