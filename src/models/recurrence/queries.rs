use crate::errors::AppError;
use crate::models::todo::{NewTodo, TodoItem};
use crate::store::Store;

use super::schedule::next_due_date;
use super::types::*;
use super::validate::validate_definition;

pub fn find_all(store: &Store) -> Vec<RecurringItemDefinition> {
    store.read(|c| c.list_definitions())
}

pub fn find_by_id(store: &Store, id: i64) -> Result<RecurringItemDefinition, AppError> {
    store.read(|c| c.get_definition(id).cloned())
}

/// The live definition a todo points at, if any. A link whose definition is
/// gone reads as no link.
pub fn find_for_todo(store: &Store, todo_id: i64) -> Result<Option<RecurringItemDefinition>, AppError> {
    store.read(|c| {
        let todo = c.get_todo(todo_id)?;
        Ok(c.resolve_recurrence(todo).cloned())
    })
}

/// Create a definition and materialize its first instance at the end of the
/// list. Returns the definition.
pub fn create(store: &Store, input: DefinitionInput) -> Result<RecurringItemDefinition, AppError> {
    if let Some(err) = AppError::from_validation(validate_definition(&input)) {
        return Err(err);
    }
    let schedule = input.pattern.schedule().map_err(AppError::Validation)?;

    // The due date depends only on the request and the clock; work it out
    // before taking the lock.
    let now = store.now();
    let start_date = input.start_date.unwrap_or(now);
    let due = next_due_date(&schedule, start_date, now);

    store.write(|c| {
        let def = c.create_definition(
            NewDefinition {
                title: input.title,
                description: input.description,
                assigned_to: input.assigned_to,
                pattern: input.pattern,
                start_date,
            },
            now,
        );

        let instance = c.create_todo(
            NewTodo {
                title: def.title.clone(),
                description: def.description.clone(),
                assigned_to: def.assigned_to.clone(),
                position: 0,
                due_date: Some(due),
                recurrence_id: Some(def.id),
            },
            now,
        );

        log::info!(
            "Created recurring definition {} ({}) with instance {} due {}",
            def.id,
            schedule.frequency,
            instance.id,
            due
        );
        Ok(def)
    })
}

/// Overwrite a definition and push its content onto linked todos that are
/// still open. Completed instances keep what they had; due dates stay put.
pub fn update(store: &Store, id: i64, input: DefinitionInput) -> Result<RecurringItemDefinition, AppError> {
    if let Some(err) = AppError::from_validation(validate_definition(&input)) {
        return Err(err);
    }

    store.write(|c| {
        let def = c.update_definition(id, |def| {
            def.title = input.title;
            def.description = input.description;
            def.assigned_to = input.assigned_to;
            def.pattern = input.pattern;
            if let Some(start) = input.start_date {
                def.start_date = start;
            }
        })?;

        let mut propagated = 0;
        c.for_each_todo_linked_to(id, |todo| {
            if !todo.completed {
                todo.title = def.title.clone();
                todo.description = def.description.clone();
                todo.assigned_to = def.assigned_to.clone();
                propagated += 1;
            }
        });

        log::info!("Updated recurring definition {id}, propagated to {propagated} open instance(s)");
        Ok(def)
    })
}

/// Remove a definition and unlink every todo that referenced it. The todos
/// themselves, due dates included, are kept.
pub fn delete(store: &Store, id: i64) -> Result<(), AppError> {
    store.write(|c| {
        c.delete_definition(id)?;
        let unlinked = c.for_each_todo_linked_to(id, TodoItem::unlink);
        log::info!("Deleted recurring definition {id}, unlinked {unlinked} todo(s)");
        Ok(())
    })
}

/// Turn a todo into a recurring one, or back into a one-off.
///
/// Going recurring creates a new definition seeded from the todo and links
/// the existing todo to it; no new instance is created. Going one-off clears
/// the link and due date and leaves the old definition in place.
pub fn convert_todo(store: &Store, todo_id: i64, request: ConvertRequest) -> Result<TodoItem, AppError> {
    if !request.to_recurring {
        return store.write(|c| {
            let todo = c.update_todo(todo_id, |todo| {
                todo.unlink();
                todo.due_date = None;
            })?;
            log::info!("Converted todo {todo_id} to one-off");
            Ok(todo)
        });
    }

    let pattern = request
        .pattern
        .ok_or_else(|| AppError::Validation("Pattern is required to make a todo recurring".to_string()))?;
    let schedule = pattern
        .schedule()
        .map_err(|e| AppError::Validation(format!("Invalid pattern: {e}")))?;

    let now = store.now();
    let due = next_due_date(&schedule, now, now);

    store.write(|c| {
        let source = c.get_todo(todo_id)?.clone();

        let def = c.create_definition(
            NewDefinition {
                title: source.title,
                description: source.description,
                assigned_to: source.assigned_to,
                pattern,
                start_date: now,
            },
            now,
        );

        let todo = c.update_todo(todo_id, |todo| {
            todo.link_to(def.id);
            todo.due_date = Some(due);
        })?;

        log::info!("Converted todo {todo_id} to recurring definition {} due {due}", def.id);
        Ok(todo)
    })
}
