use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::TransactionTable;

// ---------------------------------------------------------------------------
// Filter predicates
// ---------------------------------------------------------------------------

/// Inclusive calendar-date range. Either end may be unset while the user is
/// still picking; a half-open range does not filter at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Both endpoints, if the range is complete.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }
}

/// The user's current selections in the filter panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub date_range: DateRange,
    /// Selected expense types. Empty means nothing is shown.
    pub expense_types: BTreeSet<String>,
}

impl FilterState {
    /// Default selection for a table: its full date span and every expense type.
    pub fn for_table(table: &TransactionTable) -> Self {
        let date_range = table
            .date_bounds()
            .map(|(lo, hi)| DateRange::new(lo, hi))
            .unwrap_or_default();
        Self {
            date_range,
            expense_types: table.expense_types().clone(),
        }
    }

    /// Whether a reset would leave the selection unchanged.
    pub fn is_default_for(&self, table: &TransactionTable) -> bool {
        *self == Self::for_table(table)
    }

    pub fn apply(&self, table: &TransactionTable) -> TransactionTable {
        filter(table, &self.date_range, &self.expense_types)
    }
}

/// Return the rows of `table` matching the selection, as a new table.
///
/// The expense-type predicate always applies. The date predicate applies only
/// when both ends of `date_range` are set, and is inclusive on both ends.
pub fn filter(
    table: &TransactionTable,
    date_range: &DateRange,
    expense_types: &BTreeSet<String>,
) -> TransactionTable {
    let bounds = date_range.bounds();

    table
        .records()
        .iter()
        .filter(|rec| expense_types.contains(&rec.expense_type))
        .filter(|rec| match bounds {
            Some((start, end)) => start <= rec.transaction_date && rec.transaction_date <= end,
            None => true,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::TransactionRecord;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn types(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn three_rows() -> TransactionTable {
        TransactionTable::from_records(vec![
            TransactionRecord::new(date(1), "521211", "A", 100.0),
            TransactionRecord::new(date(2), "521211", "A", 200.0),
            TransactionRecord::new(date(3), "524111", "B", 300.0),
        ])
    }

    fn mixed_rows() -> TransactionTable {
        TransactionTable::from_records(
            (1..=28)
                .map(|d| {
                    let kind = ["Barang", "Modal", "Pegawai"][d as usize % 3];
                    TransactionRecord::new(date(d), format!("52{}", d % 4), kind, d as f64 * 10.0)
                })
                .collect(),
        )
    }

    #[test]
    fn default_state_returns_the_whole_table() {
        for table in [three_rows(), mixed_rows(), TransactionTable::default()] {
            let state = FilterState::for_table(&table);
            assert_eq!(state.apply(&table), table);
        }
    }

    #[test]
    fn range_and_type_scenario() {
        let table = three_rows();
        let out = filter(&table, &DateRange::new(date(1), date(2)), &types(&["A"]));

        assert_eq!(out.len(), 2);
        assert_eq!(
            out.records().iter().map(|r| r.transaction_value).sum::<f64>(),
            300.0
        );
        assert_eq!(out.expense_types(), &types(&["A"]));
    }

    #[test]
    fn only_selected_types_are_returned() {
        let table = mixed_rows();
        let selected = types(&["Modal", "Pegawai"]);
        let out = filter(&table, &DateRange::default(), &selected);

        assert!(!out.is_empty());
        assert!(out.records().iter().all(|r| selected.contains(&r.expense_type)));
        assert_eq!(
            out.len(),
            table
                .records()
                .iter()
                .filter(|r| r.expense_type != "Barang")
                .count()
        );
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let table = mixed_rows();
        let all = table.expense_types().clone();
        let out = filter(&table, &DateRange::new(date(5), date(9)), &all);

        let dates: Vec<_> = out.records().iter().map(|r| r.transaction_date).collect();
        assert_eq!(dates, (5..=9).map(date).collect::<Vec<_>>());
    }

    #[test]
    fn half_open_range_does_not_filter_dates() {
        let table = mixed_rows();
        let all = table.expense_types().clone();

        let start_only = DateRange {
            start: Some(date(20)),
            end: None,
        };
        let end_only = DateRange {
            start: None,
            end: Some(date(2)),
        };

        assert_eq!(filter(&table, &start_only, &all), table);
        assert_eq!(filter(&table, &end_only, &all), table);
    }

    #[test]
    fn reversed_range_matches_nothing() {
        let table = mixed_rows();
        let all = table.expense_types().clone();
        let out = filter(&table, &DateRange::new(date(9), date(5)), &all);
        assert!(out.is_empty());
    }

    #[test]
    fn empty_selection_is_an_empty_view() {
        let table = three_rows();
        let out = filter(&table, &DateRange::default(), &BTreeSet::new());
        assert!(out.is_empty());
    }

    #[test]
    fn input_table_is_untouched() {
        let table = three_rows();
        let before = table.clone();
        let _ = filter(&table, &DateRange::new(date(3), date(3)), &types(&["B"]));
        assert_eq!(table, before);
    }

    #[test]
    fn is_default_tracks_changes() {
        let table = three_rows();
        let mut state = FilterState::for_table(&table);
        assert!(state.is_default_for(&table));

        state.expense_types.remove("B");
        assert!(!state.is_default_for(&table));
    }
}
