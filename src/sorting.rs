//! Column sorting and the header-click direction policy.

use crate::types::column::Column;
use crate::types::station::StationRecord;
use std::cmp::Reverse;

/// The column currently driving row order, and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSort {
    pub column: Column,
    pub descending: bool,
}

impl ActiveSort {
    pub fn ascending(column: Column) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    /// The sort that results from clicking `clicked`'s header while `current` is active.
    ///
    /// Clicking the active column flips the direction; any other column becomes active
    /// in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use synop::{ActiveSort, Column};
    ///
    /// let first = ActiveSort::after_click(None, Column::Temperature);
    /// assert!(!first.descending);
    /// let second = ActiveSort::after_click(Some(first), Column::Temperature);
    /// assert!(second.descending);
    /// let third = ActiveSort::after_click(Some(second), Column::Station);
    /// assert_eq!(third, ActiveSort::ascending(Column::Station));
    /// ```
    pub fn after_click(current: Option<ActiveSort>, clicked: Column) -> ActiveSort {
        match current {
            Some(active) if active.column == clicked => ActiveSort {
                column: clicked,
                descending: !active.descending,
            },
            _ => ActiveSort::ascending(clicked),
        }
    }

    /// Arrow appended to the active column's header.
    pub fn glyph(&self) -> &'static str {
        if self.descending {
            "↓"
        } else {
            "↑"
        }
    }
}

/// Orders `records` by `column`'s sort key.
///
/// The sort is stable in both directions: descending reverses the comparison, not the
/// output, so records with equal keys keep their input order either way.
pub fn sort_records(
    mut records: Vec<StationRecord>,
    column: Column,
    descending: bool,
) -> Vec<StationRecord> {
    if descending {
        records.sort_by_cached_key(|record| Reverse(column.sort_key(record)));
    } else {
        records.sort_by_cached_key(|record| column.sort_key(record));
    }
    records
}
