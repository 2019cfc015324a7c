//! Case-insensitive search over title and description.

use shared_types::Record;

/// Whether `record` contains `term` in its title or description,
/// ignoring case. An empty term matches everything.
pub fn matches_term(record: &Record, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    record.title.to_lowercase().contains(&term)
        || record.description.to_lowercase().contains(&term)
}

/// Records matching `term`, in input order.
pub fn filter_records<'a>(records: &'a [Record], term: &str) -> Vec<&'a Record> {
    records.iter().filter(|r| matches_term(r, term)).collect()
}
