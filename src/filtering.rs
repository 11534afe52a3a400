use crate::types::station::StationRecord;

/// Keeps the records whose station name contains `query`, ignoring case.
///
/// The query is trimmed and lower-cased once. A blank query returns every record.
/// Matches keep their input order.
///
/// # Examples
///
/// ```
/// use synop::{filter_by_name, StationRecord};
///
/// let records = vec![StationRecord::named("Warszawa"), StationRecord::named("Kraków")];
/// let found = filter_by_name(&records, "RAK");
/// assert_eq!(found, vec![StationRecord::named("Kraków")]);
/// ```
pub fn filter_by_name(records: &[StationRecord], query: &str) -> Vec<StationRecord> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| record.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
