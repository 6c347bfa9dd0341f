//! In-memory repository for todos and recurring definitions.
//!
//! Both collections live behind one reader/writer lock. Reads run under
//! [`Store::read`]; anything that mutates, including multi-step recurrence
//! workflows touching both collections, runs inside a single
//! [`Store::write`] call so readers never see a half-applied change.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::clock::{Clock, SystemClock};
use crate::errors::AppError;
use crate::models::recurrence::{NewDefinition, RecurringItemDefinition};
use crate::models::todo::{NewTodo, ReorderEntry, TodoItem};

/// The data guarded by the store lock.
#[derive(Debug)]
pub struct Collections {
    todos: HashMap<i64, TodoItem>,
    definitions: HashMap<i64, RecurringItemDefinition>,
    next_todo_id: i64,
    next_definition_id: i64,
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            todos: HashMap::new(),
            definitions: HashMap::new(),
            next_todo_id: 1,
            next_definition_id: 1,
        }
    }
}

impl Collections {
    /// Insert a todo. A zero position appends it after the current items.
    pub fn create_todo(&mut self, draft: NewTodo, now: DateTime<Utc>) -> TodoItem {
        let id = self.next_todo_id;
        self.next_todo_id += 1;

        let position = if draft.position == 0 {
            self.todos.len() as i64
        } else {
            draft.position
        };

        let todo = TodoItem {
            id,
            title: draft.title,
            description: draft.description,
            assigned_to: draft.assigned_to,
            completed: false,
            position,
            is_recurring: draft.recurrence_id.is_some(),
            recurrence_id: draft.recurrence_id,
            due_date: draft.due_date,
            completed_at: None,
            created_at: now,
        };
        self.todos.insert(id, todo.clone());
        todo
    }

    pub fn get_todo(&self, id: i64) -> Result<&TodoItem, AppError> {
        self.todos.get(&id).ok_or(AppError::todo_not_found(id))
    }

    /// Apply `mutate` to a todo in place and return the updated copy.
    pub fn update_todo<F>(&mut self, id: i64, mutate: F) -> Result<TodoItem, AppError>
    where
        F: FnOnce(&mut TodoItem),
    {
        let todo = self
            .todos
            .get_mut(&id)
            .ok_or(AppError::todo_not_found(id))?;
        mutate(todo);
        Ok(todo.clone())
    }

    pub fn delete_todo(&mut self, id: i64) -> Result<TodoItem, AppError> {
        self.todos.remove(&id).ok_or(AppError::todo_not_found(id))
    }

    /// All todos by ascending position; equal positions fall back to id order.
    pub fn list_todos(&self) -> Vec<TodoItem> {
        let mut todos: Vec<TodoItem> = self.todos.values().cloned().collect();
        todos.sort_by_key(|t| (t.position, t.id));
        todos
    }

    /// Overwrite positions of known todos. Unknown ids are skipped.
    /// Returns how many entries were applied.
    pub fn reorder(&mut self, entries: &[ReorderEntry]) -> usize {
        let mut applied = 0;
        for entry in entries {
            if let Some(todo) = self.todos.get_mut(&entry.id) {
                todo.position = entry.position;
                applied += 1;
            }
        }
        applied
    }

    pub fn create_definition(&mut self, draft: NewDefinition, now: DateTime<Utc>) -> RecurringItemDefinition {
        let id = self.next_definition_id;
        self.next_definition_id += 1;

        let def = RecurringItemDefinition {
            id,
            title: draft.title,
            description: draft.description,
            assigned_to: draft.assigned_to,
            pattern: draft.pattern,
            start_date: draft.start_date,
            created_at: now,
        };
        self.definitions.insert(id, def.clone());
        def
    }

    pub fn get_definition(&self, id: i64) -> Result<&RecurringItemDefinition, AppError> {
        self.definitions.get(&id).ok_or(AppError::definition_not_found(id))
    }

    pub fn update_definition<F>(&mut self, id: i64, mutate: F) -> Result<RecurringItemDefinition, AppError>
    where
        F: FnOnce(&mut RecurringItemDefinition),
    {
        let def = self
            .definitions
            .get_mut(&id)
            .ok_or(AppError::definition_not_found(id))?;
        mutate(def);
        Ok(def.clone())
    }

    pub fn delete_definition(&mut self, id: i64) -> Result<RecurringItemDefinition, AppError> {
        self.definitions
            .remove(&id)
            .ok_or(AppError::definition_not_found(id))
    }

    /// All definitions in creation (id) order.
    pub fn list_definitions(&self) -> Vec<RecurringItemDefinition> {
        let mut defs: Vec<RecurringItemDefinition> = self.definitions.values().cloned().collect();
        defs.sort_by_key(|d| d.id);
        defs
    }

    /// Run `f` on every todo whose `recurrence_id` is `definition_id`.
    /// Returns the number of todos visited.
    pub fn for_each_todo_linked_to<F>(&mut self, definition_id: i64, mut f: F) -> usize
    where
        F: FnMut(&mut TodoItem),
    {
        let mut visited = 0;
        for todo in self.todos.values_mut() {
            if todo.recurrence_id == Some(definition_id) {
                f(todo);
                visited += 1;
            }
        }
        visited
    }

    /// Follow a todo's weak link. A link to a definition that no longer
    /// exists resolves to `None`, same as no link at all.
    pub fn resolve_recurrence(&self, todo: &TodoItem) -> Option<&RecurringItemDefinition> {
        todo.recurrence_id.and_then(|id| self.definitions.get(&id))
    }
}

pub struct Store {
    inner: RwLock<Collections>,
    clock: Arc<dyn Clock>,
}

impl Store {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: RwLock::new(Collections::default()),
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Run `f` with shared access.
    pub fn read<R>(&self, f: impl FnOnce(&Collections) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    /// Run `f` with exclusive access. Everything `f` does is one atomic step
    /// as far as other callers can tell.
    pub fn write<R>(&self, f: impl FnOnce(&mut Collections) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recurrence::RecurrencePattern;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap()
    }

    fn definition(title: &str) -> NewDefinition {
        NewDefinition {
            title: title.to_string(),
            description: String::new(),
            assigned_to: Vec::new(),
            pattern: RecurrencePattern::new("daily", 1),
            start_date: now(),
        }
    }

    #[test]
    fn ids_are_independent_and_never_reused() {
        let mut c = Collections::default();
        let a = c.create_todo(NewTodo::new("a"), now());
        let d = c.create_definition(definition("d"), now());
        assert_eq!((a.id, d.id), (1, 1));

        c.delete_todo(a.id).unwrap();
        let b = c.create_todo(NewTodo::new("b"), now());
        assert_eq!(b.id, 2);

        c.delete_definition(d.id).unwrap();
        assert_eq!(c.create_definition(definition("e"), now()).id, 2);
    }

    #[test]
    fn zero_position_appends() {
        let mut c = Collections::default();
        assert_eq!(c.create_todo(NewTodo::new("a"), now()).position, 0);
        assert_eq!(c.create_todo(NewTodo::new("b"), now()).position, 1);
        let explicit = NewTodo {
            position: 42,
            ..NewTodo::new("c")
        };
        assert_eq!(c.create_todo(explicit, now()).position, 42);
        assert_eq!(c.create_todo(NewTodo::new("d"), now()).position, 3);
    }

    #[test]
    fn list_sorts_by_position_then_id() {
        let mut c = Collections::default();
        for title in ["a", "b", "c"] {
            c.create_todo(NewTodo::new(title), now());
        }
        c.reorder(&[
            ReorderEntry { id: 1, position: 5 },
            ReorderEntry { id: 2, position: 5 },
            ReorderEntry { id: 3, position: 1 },
        ]);
        let ids: Vec<i64> = c.list_todos().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn reorder_skips_unknown_ids() {
        let mut c = Collections::default();
        c.create_todo(NewTodo::new("a"), now());
        let applied = c.reorder(&[
            ReorderEntry { id: 1, position: 9 },
            ReorderEntry { id: 99, position: 0 },
        ]);
        assert_eq!(applied, 1);
        assert_eq!(c.get_todo(1).unwrap().position, 9);
    }

    #[test]
    fn missing_ids_are_not_found() {
        let mut c = Collections::default();
        assert_eq!(c.get_todo(4).unwrap_err(), AppError::todo_not_found(4));
        assert_eq!(c.delete_definition(4).unwrap_err(), AppError::definition_not_found(4));
        assert!(c.update_todo(4, |t| t.title.clear()).is_err());
    }

    #[test]
    fn linked_iteration_and_resolution() {
        let mut c = Collections::default();
        let def = c.create_definition(definition("d"), now());
        let linked = NewTodo {
            recurrence_id: Some(def.id),
            ..NewTodo::new("linked")
        };
        let t1 = c.create_todo(linked.clone(), now());
        c.create_todo(linked, now());
        c.create_todo(NewTodo::new("loose"), now());

        assert!(t1.is_recurring);
        assert_eq!(c.resolve_recurrence(&t1).map(|d| d.id), Some(def.id));
        assert_eq!(c.for_each_todo_linked_to(def.id, |t| t.title.push('!')), 2);

        c.delete_definition(def.id).unwrap();
        assert!(c.resolve_recurrence(&t1).is_none());
    }

    #[test]
    fn store_uses_injected_clock() {
        let store = Store::new(Arc::new(crate::clock::FixedClock::new(now())));
        let todo = store.write(|c| c.create_todo(NewTodo::new("a"), store.now()));
        assert_eq!(todo.created_at, now());
        assert_eq!(store.read(|c| c.list_todos().len()), 1);
    }
}
