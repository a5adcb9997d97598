//! Status and name filtering for the transactions table.

use crate::revenue::record::TransactionRecord;

/// The status dropdown selection on the transactions page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No status filter ("All" in the dropdown).
    #[default]
    All,
    /// Keep only records whose status equals this label, ignoring case.
    Only(String),
}

impl StatusFilter {
    /// Parses the dropdown's query value. The empty string and "all" both
    /// mean no filter.
    pub fn from_query_value(value: &str) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(value.to_owned())
        }
    }

    fn matches(&self, record: &TransactionRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => record.status.trim().eq_ignore_ascii_case(status),
        }
    }
}

/// Lazily filters `records` by status and customer name.
///
/// The iterator preserves input order, copies nothing, and can be restarted
/// by calling this function again over the same snapshot. With
/// [StatusFilter::All] and an empty `name_query` it yields the input
/// unchanged.
pub fn filter_by_search<'a>(
    records: &'a [TransactionRecord],
    status: &'a StatusFilter,
    name_query: &str,
) -> impl Iterator<Item = &'a TransactionRecord> {
    let name_query = name_query.trim().to_lowercase();

    records.iter().filter(move |record| {
        status.matches(record)
            && (name_query.is_empty() || record.name.to_lowercase().contains(&name_query))
    })
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::revenue::record::{RecordId, TransactionRecord};

    use super::{StatusFilter, filter_by_search};

    fn create_test_record(id: i64, name: &str, status: &str) -> TransactionRecord {
        TransactionRecord {
            id: RecordId::Membership(id),
            name: name.to_owned(),
            amount: 100.0,
            date: Some(date!(2025 - 06 - 02)),
            status: status.to_owned(),
            plan: "VIP".to_owned(),
        }
    }

    fn test_snapshot() -> Vec<TransactionRecord> {
        vec![
            create_test_record(1, "Juan Dela Cruz", "Paid"),
            create_test_record(2, "Maria Santos", "Pending"),
            create_test_record(3, "Juanito Reyes", "Paid"),
        ]
    }

    #[test]
    fn no_filter_and_empty_query_is_identity() {
        let records = test_snapshot();

        let filtered: Vec<_> = filter_by_search(&records, &StatusFilter::All, "").collect();

        assert_eq!(
            filtered,
            records.iter().collect::<Vec<_>>(),
            "want input unchanged and in the same order"
        );
    }

    #[test]
    fn status_filter_is_case_insensitive_equality() {
        let records = test_snapshot();
        let status = StatusFilter::Only("paid".to_owned());

        let filtered: Vec<_> = filter_by_search(&records, &status, "").collect();

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|record| record.status == "Paid"));
    }

    #[test]
    fn name_query_matches_substrings_ignoring_case() {
        let records = test_snapshot();

        let filtered: Vec<_> = filter_by_search(&records, &StatusFilter::All, "juan").collect();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].name, "Juan Dela Cruz");
        assert_eq!(filtered[1].name, "Juanito Reyes");
    }

    #[test]
    fn status_and_name_filters_combine() {
        let records = test_snapshot();
        let status = StatusFilter::Only("Paid".to_owned());

        let filtered: Vec<_> = filter_by_search(&records, &status, "reyes").collect();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Juanito Reyes");
    }

    #[test]
    fn filter_is_restartable() {
        let records = test_snapshot();
        let status = StatusFilter::Only("Paid".to_owned());

        let first_pass = filter_by_search(&records, &status, "").count();
        let second_pass = filter_by_search(&records, &status, "").count();

        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn from_query_value_treats_all_as_no_filter() {
        assert_eq!(StatusFilter::from_query_value(""), StatusFilter::All);
        assert_eq!(StatusFilter::from_query_value("All"), StatusFilter::All);
        assert_eq!(
            StatusFilter::from_query_value("Pending"),
            StatusFilter::Only("Pending".to_owned())
        );
    }
}
