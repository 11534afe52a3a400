//! The application shell: owns the fetched stations and drives the
//! fetch → filter → sort → render pipeline for every user action.

use crate::error::SynopError;
use crate::filtering::filter_by_name;
use crate::sorting::{sort_records, ActiveSort};
use crate::stations::fetch::StationSource;
use crate::table::{headers, TableView};
use crate::types::column::Column;
use crate::types::station::StationRecord;
use chrono::NaiveDateTime;
use log::{debug, info, warn};

/// Message prefix shown when a refresh fails.
pub const FETCH_FAILED: &str = "Nie udało się pobrać danych z API";

/// Interactive station table over any [`StationSource`] and [`TableView`].
///
/// State is `all_records` (the last successful fetch) plus the search text and active
/// sort. The visible rows are always recomputed from those, never edited in place.
/// All methods run on the caller's thread; a refresh blocks until the fetch finishes.
///
/// Methods only fail when the view cannot be written to. Fetch failures are shown to
/// the user through [`TableView::show_error`] and leave the previous rows in place.
pub struct StationBrowser<S: StationSource, V: TableView> {
    source: S,
    view: V,
    all_records: Vec<StationRecord>,
    visible: Vec<StationRecord>,
    query: String,
    active_sort: Option<ActiveSort>,
}

impl<S: StationSource, V: TableView> StationBrowser<S, V> {
    /// Creates an empty browser. Nothing is fetched until [`refresh`](Self::refresh).
    pub fn new(source: S, view: V) -> Self {
        Self {
            source,
            view,
            all_records: Vec::new(),
            visible: Vec::new(),
            query: String::new(),
            active_sort: None,
        }
    }

    /// Re-fetches every station.
    ///
    /// On success the station list is replaced, the search text is kept and the active
    /// sort is cleared. On failure the error is shown and nothing else changes.
    pub fn refresh(&mut self) -> Result<(), SynopError> {
        match self.source.fetch() {
            Ok(records) => {
                info!("Refreshed {} stations", records.len());
                self.all_records = records;
                self.active_sort = None;
                self.update()
            }
            Err(e) => {
                warn!("Refresh failed, keeping {} stations: {}", self.all_records.len(), e);
                // `{:#}` prints the error followed by its sources
                let message = format!("{}:\n{:#}", FETCH_FAILED, anyhow::Error::new(e));
                self.view.show_error(&message)?;
                Ok(())
            }
        }
    }

    /// Applies new search text and re-renders.
    pub fn set_query(&mut self, text: &str) -> Result<(), SynopError> {
        self.query = text.to_string();
        self.update()
    }

    /// Handles a click on `column`'s header: select it, or flip its direction if it is
    /// already the active one. Re-renders.
    pub fn header_clicked(&mut self, column: Column) -> Result<(), SynopError> {
        self.active_sort = Some(ActiveSort::after_click(self.active_sort, column));
        self.update()
    }

    /// Shows the detail card of the station named `name` (case-insensitive).
    pub fn show_station(&mut self, name: &str) -> Result<(), SynopError> {
        match self.station(name).cloned() {
            Some(record) => self.view.show_station(&record)?,
            None => {
                let message = format!("Nie znaleziono danych dla stacji '{}'.", name.trim());
                self.view.show_error(&message)?;
            }
        }
        Ok(())
    }

    /// Looks a station up by name among all fetched stations, ignoring case.
    pub fn station(&self, name: &str) -> Option<&StationRecord> {
        let name = name.trim().to_lowercase();
        self.all_records
            .iter()
            .find(|record| record.name.to_lowercase() == name)
    }

    /// The most recent measurement time among the fetched stations.
    pub fn latest_measurement(&self) -> Option<NaiveDateTime> {
        self.all_records
            .iter()
            .filter_map(StationRecord::measured_at)
            .max()
    }

    pub fn all_records(&self) -> &[StationRecord] {
        &self.all_records
    }

    /// The rows currently on display, filtered then sorted.
    pub fn visible_records(&self) -> &[StationRecord] {
        &self.visible
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn active_sort(&self) -> Option<ActiveSort> {
        self.active_sort
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    fn update(&mut self) -> Result<(), SynopError> {
        let filtered = filter_by_name(&self.all_records, &self.query);
        self.visible = match self.active_sort {
            Some(sort) => sort_records(filtered, sort.column, sort.descending),
            None => filtered,
        };
        debug!(
            "Showing {} of {} stations (query '{}', sort {:?})",
            self.visible.len(),
            self.all_records.len(),
            self.query,
            self.active_sort
        );
        self.view.render(&headers(self.active_sort), &self.visible)?;
        Ok(())
    }
}
