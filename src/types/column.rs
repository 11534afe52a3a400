//! The fixed set of table columns and the comparison policy each one declares.

use crate::types::station::{Measurement, StationRecord};
use ordered_float::OrderedFloat;
use std::fmt;

/// Cell text for an absent or non-numeric value. Distinct from a legitimate `0.0`.
pub const PLACEHOLDER: &str = "-";

/// How values of a column are compared when sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Coerce to a number; values that don't coerce fall back to their text.
    Numeric,
    /// Compare the text as-is.
    Text,
}

/// A comparable sort key.
///
/// Numbers and text share one key space: every number orders before every text, so a
/// column holding a few unparsable values still sorts without mixed-type comparisons.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortKey {
    Number(OrderedFloat<f64>),
    Text(String),
}

/// One column of the station table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Station,
    Temperature,
    Pressure,
    Humidity,
    WindSpeed,
    WindDirection,
    Precipitation,
    Date,
    Hour,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 9] = [
        Column::Station,
        Column::Temperature,
        Column::Pressure,
        Column::Humidity,
        Column::WindSpeed,
        Column::WindDirection,
        Column::Precipitation,
        Column::Date,
        Column::Hour,
    ];

    /// Stable short key, used to address the column from the console.
    pub fn key(self) -> &'static str {
        match self {
            Column::Station => "stacja",
            Column::Temperature => "temp",
            Column::Pressure => "cisnienie",
            Column::Humidity => "wilg",
            Column::WindSpeed => "wiatr",
            Column::WindDirection => "kier",
            Column::Precipitation => "opad",
            Column::Date => "data",
            Column::Hour => "godzina",
        }
    }

    /// Header label.
    pub fn label(self) -> &'static str {
        match self {
            Column::Station => "Stacja",
            Column::Temperature => "Temperatura [°C]",
            Column::Pressure => "Ciśnienie [hPa]",
            Column::Humidity => "Wilgotność [%]",
            Column::WindSpeed => "Wiatr [m/s]",
            Column::WindDirection => "Kierunek [°]",
            Column::Precipitation => "Opady [mm]",
            Column::Date => "Data",
            Column::Hour => "Godzina",
        }
    }

    /// The comparison policy for this column, declared once here rather than per cell.
    pub fn kind(self) -> ColumnKind {
        match self {
            Column::Station | Column::Date => ColumnKind::Text,
            _ => ColumnKind::Numeric,
        }
    }

    /// Looks a column up by its [`key`](Column::key), ignoring case.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|column| column.key().eq_ignore_ascii_case(key))
    }

    /// Looks a column up by its 1-based display position.
    pub fn from_position(position: usize) -> Option<Self> {
        position
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    fn measurement(self, record: &StationRecord) -> Option<&Measurement> {
        match self {
            Column::Temperature => record.temperature_c.as_ref(),
            Column::Pressure => record.pressure_hpa.as_ref(),
            Column::Humidity => record.humidity_pct.as_ref(),
            Column::WindSpeed => record.wind_speed_mps.as_ref(),
            Column::WindDirection => record.wind_direction_deg.as_ref(),
            Column::Precipitation => record.precipitation_mm.as_ref(),
            Column::Station | Column::Date | Column::Hour => None,
        }
    }

    fn number(self, record: &StationRecord) -> Option<f64> {
        match self {
            Column::Hour => record
                .measurement_hour
                .as_deref()
                .and_then(|hour| hour.trim().parse::<f64>().ok())
                .filter(|hour| hour.is_finite()),
            _ => self.measurement(record).and_then(Measurement::value),
        }
    }

    fn text(self, record: &StationRecord) -> String {
        match self {
            Column::Station => record.name.clone(),
            Column::Date => record.measurement_date.clone().unwrap_or_default(),
            Column::Hour => record.measurement_hour.clone().unwrap_or_default(),
            _ => self
                .measurement(record)
                .map(Measurement::raw_text)
                .unwrap_or_default(),
        }
    }

    /// The key this column sorts `record` by.
    ///
    /// Uses the raw value, never the rounded display text. Absent values become the
    /// empty text key.
    pub fn sort_key(self, record: &StationRecord) -> SortKey {
        match self.kind() {
            ColumnKind::Numeric => match self.number(record) {
                Some(value) => SortKey::Number(OrderedFloat(value)),
                None => SortKey::Text(self.text(record)),
            },
            ColumnKind::Text => SortKey::Text(self.text(record)),
        }
    }

    /// Display text of this column's cell for `record`.
    pub fn cell(self, record: &StationRecord) -> String {
        match self {
            Column::Station => record.name.clone(),
            Column::Date => record
                .measurement_date
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            Column::Hour => record
                .hour_label()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            _ => match self.measurement(record) {
                Some(measurement) if measurement.value().is_some() => measurement.to_string(),
                _ => PLACEHOLDER.to_string(),
            },
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_temperature(name: &str, temperature: Option<Measurement>) -> StationRecord {
        let mut record = StationRecord::named(name);
        record.temperature_c = temperature;
        record
    }

    #[test]
    fn test_keys_round_trip_and_positions() {
        for (index, column) in Column::ALL.into_iter().enumerate() {
            assert_eq!(Column::from_key(column.key()), Some(column));
            assert_eq!(Column::from_position(index + 1), Some(column));
        }
        assert_eq!(Column::from_key("TEMP"), Some(Column::Temperature));
        assert_eq!(Column::from_key("nope"), None);
        assert_eq!(Column::from_position(0), None);
        assert_eq!(Column::from_position(10), None);
    }

    #[test]
    fn test_numeric_key_uses_raw_value_not_rounded_text() {
        let a = record_with_temperature("A", Some(Measurement::Value(15.24)));
        let b = record_with_temperature("B", Some(Measurement::Value(15.21)));

        assert_eq!(Column::Temperature.cell(&a), Column::Temperature.cell(&b));
        assert!(Column::Temperature.sort_key(&b) < Column::Temperature.sort_key(&a));
    }

    #[test]
    fn test_non_numeric_values_fall_back_to_text_keys() {
        let number = record_with_temperature("A", Some(Measurement::Value(-40.0)));
        let text = record_with_temperature("B", Some(Measurement::Unparsed("abc".into())));
        let missing = record_with_temperature("C", None);

        assert_eq!(
            Column::Temperature.sort_key(&text),
            SortKey::Text("abc".into())
        );
        assert_eq!(
            Column::Temperature.sort_key(&missing),
            SortKey::Text(String::new())
        );
        assert!(Column::Temperature.sort_key(&number) < Column::Temperature.sort_key(&missing));
        assert!(Column::Temperature.sort_key(&missing) < Column::Temperature.sort_key(&text));
    }

    #[test]
    fn test_hour_sorts_numerically() {
        let mut early = StationRecord::named("A");
        early.measurement_hour = Some("6".into());
        let mut late = StationRecord::named("B");
        late.measurement_hour = Some("12".into());

        assert!(Column::Hour.sort_key(&early) < Column::Hour.sort_key(&late));
        assert_eq!(Column::Hour.cell(&early), "6:00");
    }

    #[test]
    fn test_cells_use_placeholder_distinct_from_zero() {
        let zero = record_with_temperature("A", Some(Measurement::Value(0.0)));
        let missing = record_with_temperature("B", None);
        let garbage = record_with_temperature("C", Some(Measurement::Unparsed("?".into())));

        assert_eq!(Column::Temperature.cell(&zero), "0.0");
        assert_eq!(Column::Temperature.cell(&missing), PLACEHOLDER);
        assert_eq!(Column::Temperature.cell(&garbage), PLACEHOLDER);
        assert_eq!(Column::Date.cell(&missing), PLACEHOLDER);
        assert_eq!(Column::Hour.cell(&missing), PLACEHOLDER);
    }

    #[test]
    fn test_text_columns_never_coerce() {
        assert_eq!(Column::Station.kind(), ColumnKind::Text);
        assert_eq!(Column::Date.kind(), ColumnKind::Text);

        let record = StationRecord::named("123");
        assert_eq!(Column::Station.sort_key(&record), SortKey::Text("123".into()));
    }
}
