//! Shared test infrastructure.
//!
//! Every test gets its own store on a pinned clock so recurrence math is
//! deterministic. `TEST_NOW` is a Tuesday.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use taskloop::clock::FixedClock;
use taskloop::models::recurrence::{DefinitionInput, RecurrencePattern};
use taskloop::store::Store;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const TEST_TITLE: &str = "Take out the recycling";
pub const TEST_DESCRIPTION: &str = "Blue bin, street side";
pub const TEST_ASSIGNEE: &str = "alice@example.com";

pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap()
}

// ============================================================================
// STORE SETUP
// ============================================================================

/// A fresh store whose clock is pinned at `test_now()`.
///
/// The clock is returned too so tests can move time forward.
pub fn setup_store() -> (Store, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(test_now()));
    let store = Store::new(clock.clone());
    (store, clock)
}

pub fn daily_definition(title: &str) -> DefinitionInput {
    DefinitionInput {
        title: title.to_string(),
        description: TEST_DESCRIPTION.to_string(),
        assigned_to: vec![TEST_ASSIGNEE.to_string()],
        pattern: RecurrencePattern::new("daily", 1),
        start_date: Some(test_now()),
    }
}
