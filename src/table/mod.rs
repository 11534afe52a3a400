//! The table view abstraction the browser renders into.

pub mod text_table;

use crate::sorting::ActiveSort;
use crate::types::column::Column;
use crate::types::station::StationRecord;
use std::io;

/// A column header as currently displayed, with the sort arrow if it is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub column: Column,
    pub label: String,
}

/// Builds the header row for the given active sort.
///
/// Only the active column carries an arrow; every other header shows its plain label.
pub fn headers(active: Option<ActiveSort>) -> Vec<Header> {
    Column::ALL
        .into_iter()
        .map(|column| {
            let label = match active {
                Some(sort) if sort.column == column => {
                    format!("{} {}", column.label(), sort.glyph())
                }
                _ => column.label().to_string(),
            };
            Header { column, label }
        })
        .collect()
}

/// A widget that can display the station table.
///
/// Views hold no station state: every [`render`](TableView::render) call replaces the
/// displayed rows completely, in exactly the order given. Header clicks are reported
/// back to [`crate::StationBrowser::header_clicked`] by whatever drives the view.
pub trait TableView {
    /// Replaces the displayed rows.
    fn render(&mut self, headers: &[Header], records: &[StationRecord]) -> io::Result<()>;

    /// Notifies the user that something went wrong.
    fn show_error(&mut self, message: &str) -> io::Result<()>;

    /// Shows the detail card of a single station.
    fn show_station(&mut self, record: &StationRecord) -> io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_without_sort_are_plain_labels() {
        let headers = headers(None);
        assert_eq!(headers.len(), Column::ALL.len());
        assert!(headers.iter().all(|h| h.label == h.column.label()));
    }

    #[test]
    fn test_only_active_header_has_glyph() {
        let active = ActiveSort {
            column: Column::Pressure,
            descending: true,
        };
        let headers = headers(Some(active));

        for header in &headers {
            if header.column == Column::Pressure {
                assert_eq!(header.label, "Ciśnienie [hPa] ↓");
            } else {
                assert!(!header.label.contains('↓') && !header.label.contains('↑'));
            }
        }
    }
}
