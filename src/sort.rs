//! Ordered views over user records.

use std::cmp::Ordering;

use crate::model::{Field, UserRecord};

/// Column a view can be sorted by.
pub type SortKey = Field;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Header marker for the active column.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Active sort column and direction. Starts on name, ascending.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: Field::Name,
            direction: SortDirection::Asc,
        }
    }
}

impl SortState {
    /// Same key flips the direction; a new key starts ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Asc;
        }
    }

    pub fn apply(&self, records: &[UserRecord]) -> Vec<UserRecord> {
        sort_by(records, self.key, self.direction)
    }
}

/// Copy of `records` ordered by the string value of `key`.
///
/// Stable in both directions: equal keys keep their input order.
pub fn sort_by(records: &[UserRecord], key: SortKey, direction: SortDirection) -> Vec<UserRecord> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| ordering(key, direction, a, b));
    out
}

fn ordering(key: SortKey, direction: SortDirection, a: &UserRecord, b: &UserRecord) -> Ordering {
    let ord = a.field_value(key).cmp(b.field_value(key));
    match direction {
        SortDirection::Asc => ord,
        // reverse the comparator, not the output, so ties stay in input order
        SortDirection::Desc => ord.reverse(),
    }
}
