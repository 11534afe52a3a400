//! Defines the data structures representing one IMGW synoptic station's latest reading,
//! together with the lenient wire format the public API delivers them in.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fmt;

/// Text shown in the station detail card in place of an absent value.
pub const NO_DATA: &str = "brak danych";

// --- Data Structures ---

/// A single measured quantity as reported by the API.
///
/// The IMGW endpoint encodes numbers as JSON strings (e.g. `"15.2"`), so every value
/// goes through numeric coercion once, at decode time. Values that do not parse as a
/// finite number are kept verbatim so they can still be shown and compared as text.
#[derive(Debug, Clone, PartialEq)]
pub enum Measurement {
    /// A value that parsed as a finite number.
    Value(f64),
    /// Non-empty text that is not a number.
    Unparsed(String),
}

impl Measurement {
    /// Coerces raw text into a measurement.
    ///
    /// Returns `None` for blank text, which the API uses for "not measured".
    ///
    /// # Examples
    ///
    /// ```
    /// use synop::Measurement;
    ///
    /// assert_eq!(Measurement::from_text(" 15.2 "), Some(Measurement::Value(15.2)));
    /// assert_eq!(Measurement::from_text("n/a"), Some(Measurement::Unparsed("n/a".into())));
    /// assert_eq!(Measurement::from_text("   "), None);
    /// ```
    pub fn from_text(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Measurement::Value(value),
            _ => Measurement::Unparsed(trimmed.to_string()),
        })
    }

    /// The numeric value, if the measurement parsed as a number.
    pub fn value(&self) -> Option<f64> {
        match self {
            Measurement::Value(value) => Some(*value),
            Measurement::Unparsed(_) => None,
        }
    }

    /// The untouched string form, used when a comparison has to fall back to text.
    pub fn raw_text(&self) -> String {
        match self {
            Measurement::Value(value) => value.to_string(),
            Measurement::Unparsed(text) => text.clone(),
        }
    }
}

/// Numbers are rounded to one decimal place; unparsed text is shown as-is.
impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Value(value) => write!(f, "{:.1}", value),
            Measurement::Unparsed(text) => f.write_str(text),
        }
    }
}

/// The latest reading of one synoptic station.
///
/// Records are created by the data source on every fetch and replaced wholesale on the
/// next one; the station name is the only identity they carry between renders.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    /// IMGW station identifier (e.g. "12375"), if reported.
    pub id: Option<String>,
    /// Station name (e.g. "Warszawa"). Never empty, unique within one fetch.
    pub name: String,
    /// Air temperature in °C.
    pub temperature_c: Option<Measurement>,
    /// Atmospheric pressure in hPa.
    pub pressure_hpa: Option<Measurement>,
    /// Relative humidity in percent.
    pub humidity_pct: Option<Measurement>,
    /// Wind speed in m/s.
    pub wind_speed_mps: Option<Measurement>,
    /// Wind direction in degrees.
    pub wind_direction_deg: Option<Measurement>,
    /// Precipitation total in mm.
    pub precipitation_mm: Option<Measurement>,
    /// Measurement date as reported (`YYYY-MM-DD`).
    pub measurement_date: Option<String>,
    /// Measurement hour as reported (e.g. "6" or "14").
    pub measurement_hour: Option<String>,
}

impl StationRecord {
    /// Creates a record with only a name set. Every other field is absent.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            temperature_c: None,
            pressure_hpa: None,
            humidity_pct: None,
            wind_speed_mps: None,
            wind_direction_deg: None,
            precipitation_mm: None,
            measurement_date: None,
            measurement_hour: None,
        }
    }

    /// The measurement hour with its fixed `:00` minute suffix, e.g. "14:00".
    pub fn hour_label(&self) -> Option<String> {
        self.measurement_hour.as_ref().map(|hour| format!("{}:00", hour))
    }

    /// Combines the reported date and hour into a timestamp.
    ///
    /// Returns `None` unless the date is `YYYY-MM-DD` and the hour is an integer in `0..=23`.
    pub fn measured_at(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(self.measurement_date.as_deref()?, "%Y-%m-%d").ok()?;
        let hour = self.measurement_hour.as_deref()?.trim().parse::<u32>().ok()?;
        date.and_hms_opt(hour, 0, 0)
    }

    /// A multi-line detail card for this station, with [`NO_DATA`] for absent values.
    pub fn summary(&self) -> String {
        fn show(value: &Option<Measurement>) -> String {
            value
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| NO_DATA.to_string())
        }

        let measured = match (&self.measurement_date, self.hour_label()) {
            (Some(date), Some(hour)) => format!("{} {}", date, hour),
            (Some(date), None) => date.clone(),
            (None, Some(hour)) => hour,
            (None, None) => NO_DATA.to_string(),
        };

        format!(
            "{}\n\nTemperatura: {} °C\nCiśnienie: {} hPa\nWilgotność: {} %\nWiatr: {} m/s\nKierunek wiatru: {}°\nOpady: {} mm\nData pomiaru: {}",
            self.name,
            show(&self.temperature_c),
            show(&self.pressure_hpa),
            show(&self.humidity_pct),
            show(&self.wind_speed_mps),
            show(&self.wind_direction_deg),
            show(&self.precipitation_mm),
            measured,
        )
    }
}

// --- Wire format ---

/// A field value as it appears in the API payload: usually a string, sometimes a bare
/// number. Any other JSON shape is kept as-is so one odd field never costs the station.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawValue {
    fn into_text(self) -> Option<String> {
        let text = match self {
            RawValue::Number(value) => value.to_string(),
            RawValue::Text(text) => text.trim().to_string(),
            RawValue::Other(_) => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    fn into_measurement(self) -> Option<Measurement> {
        match self {
            RawValue::Number(value) if value.is_finite() => Some(Measurement::Value(value)),
            RawValue::Number(value) => Some(Measurement::Unparsed(value.to_string())),
            RawValue::Text(text) => Measurement::from_text(&text),
            RawValue::Other(value) => Some(Measurement::Unparsed(value.to_string())),
        }
    }
}

/// One element of the `/api/data/synop/` array. Every field is optional on the wire.
#[derive(Debug, Deserialize)]
pub(crate) struct RawStation {
    #[serde(rename = "id_stacji")]
    id: Option<RawValue>,
    #[serde(rename = "stacja")]
    name: Option<RawValue>,
    #[serde(rename = "temperatura")]
    temperature: Option<RawValue>,
    #[serde(rename = "cisnienie")]
    pressure: Option<RawValue>,
    #[serde(rename = "wilgotnosc_wzgledna")]
    humidity: Option<RawValue>,
    #[serde(rename = "predkosc_wiatru")]
    wind_speed: Option<RawValue>,
    #[serde(rename = "kierunek_wiatru")]
    wind_direction: Option<RawValue>,
    #[serde(rename = "suma_opadu")]
    precipitation: Option<RawValue>,
    #[serde(rename = "data_pomiaru")]
    date: Option<RawValue>,
    #[serde(rename = "godzina_pomiaru")]
    hour: Option<RawValue>,
}

impl RawStation {
    /// Normalizes the wire element. Returns `None` when the station name is missing or blank.
    pub(crate) fn into_record(self) -> Option<StationRecord> {
        let name = self.name.and_then(RawValue::into_text)?;
        Some(StationRecord {
            id: self.id.and_then(RawValue::into_text),
            name,
            temperature_c: self.temperature.and_then(RawValue::into_measurement),
            pressure_hpa: self.pressure.and_then(RawValue::into_measurement),
            humidity_pct: self.humidity.and_then(RawValue::into_measurement),
            wind_speed_mps: self.wind_speed.and_then(RawValue::into_measurement),
            wind_direction_deg: self.wind_direction.and_then(RawValue::into_measurement),
            precipitation_mm: self.precipitation.and_then(RawValue::into_measurement),
            measurement_date: self.date.and_then(RawValue::into_text),
            measurement_hour: self.hour.and_then(RawValue::into_text),
        })
    }
}
