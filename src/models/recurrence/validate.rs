use chrono::Weekday;

use super::types::{DefinitionInput, Frequency, RecurrencePattern, Schedule};

/// Largest accepted interval. One step of it (a thousand months at most)
/// always stays inside the representable date range from any present-day
/// instant.
pub const MAX_INTERVAL: i64 = 1000;

const WEEKDAY_NAMES: [(&str, Weekday); 7] = [
    ("Sunday", Weekday::Sun),
    ("Monday", Weekday::Mon),
    ("Tuesday", Weekday::Tue),
    ("Wednesday", Weekday::Wed),
    ("Thursday", Weekday::Thu),
    ("Friday", Weekday::Fri),
    ("Saturday", Weekday::Sat),
];

/// Canonical weekday name to `Weekday`. Names are matched exactly.
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    WEEKDAY_NAMES
        .iter()
        .find(|(name, _)| *name == s)
        .map(|(_, wd)| *wd)
}

impl RecurrencePattern {
    /// Check the pattern and convert it into a [`Schedule`].
    ///
    /// Weekday names are only looked at for weekly patterns; other
    /// frequencies ignore `days_of_week` entirely.
    pub fn schedule(&self) -> Result<Schedule, String> {
        let frequency = Frequency::parse(&self.frequency).ok_or_else(|| {
            format!(
                "Invalid frequency '{}': must be 'daily', 'weekly', or 'monthly'",
                self.frequency
            )
        })?;

        if self.interval < 1 {
            return Err("Interval must be at least 1".to_string());
        }
        if self.interval > MAX_INTERVAL {
            return Err(format!("Interval must be at most {MAX_INTERVAL}"));
        }
        let interval = u32::try_from(self.interval)
            .map_err(|_| format!("Interval must be at most {MAX_INTERVAL}"))?;

        let mut weekdays = Vec::new();
        if frequency == Frequency::Weekly {
            for day in &self.days_of_week {
                let wd = parse_weekday(day).ok_or_else(|| format!("Invalid day of week: {day}"))?;
                if !weekdays.contains(&wd) {
                    weekdays.push(wd);
                }
            }
        }

        Ok(Schedule {
            frequency,
            interval,
            weekdays,
        })
    }
}

/// Validate a recurrence pattern in isolation.
pub fn validate_pattern(pattern: &RecurrencePattern) -> Option<String> {
    pattern.schedule().err()
}

/// Validate a required title.
pub fn validate_title(title: &str) -> Option<String> {
    if title.trim().is_empty() {
        return Some("Title is required".to_string());
    }
    None
}

/// Collect every problem with a definition request.
pub fn validate_definition(input: &DefinitionInput) -> Vec<String> {
    let mut errors = Vec::new();
    errors.extend(validate_title(&input.title));
    if let Some(e) = validate_pattern(&input.pattern) {
        errors.push(format!("Invalid pattern: {e}"));
    }
    errors
}
