mod browser;
mod error;
mod filtering;
mod sorting;
mod stations;
mod table;
mod types;

pub mod console;

pub use browser::*;
pub use error::SynopError;
pub use filtering::filter_by_name;
pub use sorting::{sort_records, ActiveSort};

pub use stations::error::FetchError;
pub use stations::fetch::{ImgwClient, StationSource, DATA_URL, DEFAULT_TIMEOUT};

pub use table::text_table::TextTable;
pub use table::{headers, Header, TableView};

pub use types::column::{Column, ColumnKind, SortKey, PLACEHOLDER};
pub use types::station::{Measurement, StationRecord, NO_DATA};
