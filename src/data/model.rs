use std::collections::BTreeSet;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Source column names
// ---------------------------------------------------------------------------

/// Header of the transaction date column.
pub const COL_DATE: &str = "Tanggal Transaksi";
/// Header of the expense account (budget code) column.
pub const COL_ACCOUNT: &str = "Akun Belanja";
/// Header of the expense type (category label) column.
pub const COL_TYPE: &str = "Jenis Belanja";
/// Header of the transaction value column.
pub const COL_VALUE: &str = "Nilai Transaksi";

/// All required columns, in source/export order.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_DATE, COL_ACCOUNT, COL_TYPE, COL_VALUE];

// ---------------------------------------------------------------------------
// TransactionRecord – one row of the source sheet
// ---------------------------------------------------------------------------

/// A single realized spending transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Calendar date; any time-of-day in the source is dropped on load.
    pub transaction_date: NaiveDate,
    /// Budget account code, always text even when it looks numeric.
    pub expense_account: String,
    /// Expense category label.
    pub expense_type: String,
    pub transaction_value: f64,
}

impl TransactionRecord {
    pub fn new(
        transaction_date: NaiveDate,
        expense_account: impl Into<String>,
        expense_type: impl Into<String>,
        transaction_value: f64,
    ) -> Self {
        Self {
            transaction_date,
            expense_account: expense_account.into(),
            expense_type: expense_type.into(),
            transaction_value,
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionTable – an ordered set of records with pre-computed indices
// ---------------------------------------------------------------------------

/// The loaded (or filtered) transactions plus the indices the filter panel needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionTable {
    records: Vec<TransactionRecord>,
    expense_types: BTreeSet<String>,
    date_bounds: Option<(NaiveDate, NaiveDate)>,
}

impl TransactionTable {
    /// Build the table and its indices from records, keeping their order.
    pub fn from_records(records: Vec<TransactionRecord>) -> Self {
        let mut expense_types = BTreeSet::new();
        let mut date_bounds: Option<(NaiveDate, NaiveDate)> = None;

        for rec in &records {
            expense_types.insert(rec.expense_type.clone());
            let d = rec.transaction_date;
            date_bounds = Some(match date_bounds {
                Some((lo, hi)) => (lo.min(d), hi.max(d)),
                None => (d, d),
            });
        }

        Self {
            records,
            expense_types,
            date_bounds,
        }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Sorted unique expense types.
    pub fn expense_types(&self) -> &BTreeSet<String> {
        &self.expense_types
    }

    /// Earliest and latest transaction date, `None` for an empty table.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.date_bounds
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<TransactionRecord> for TransactionTable {
    fn from_iter<I: IntoIterator<Item = TransactionRecord>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn indices_cover_all_records() {
        let table = TransactionTable::from_records(vec![
            TransactionRecord::new(day(5), "521211", "Belanja Barang", 10.0),
            TransactionRecord::new(day(2), "524111", "Perjalanan Dinas", 20.0),
            TransactionRecord::new(day(9), "521211", "Belanja Barang", 30.0),
        ]);

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.expense_types().iter().collect::<Vec<_>>(),
            vec!["Belanja Barang", "Perjalanan Dinas"]
        );
        assert_eq!(table.date_bounds(), Some((day(2), day(9))));
    }

    #[test]
    fn empty_table_has_no_bounds() {
        let table = TransactionTable::default();
        assert!(table.is_empty());
        assert!(table.expense_types().is_empty());
        assert_eq!(table.date_bounds(), None);
    }

    #[test]
    fn record_order_is_preserved() {
        let table: TransactionTable = [day(3), day(1), day(2)]
            .into_iter()
            .map(|d| TransactionRecord::new(d, "1", "A", 1.0))
            .collect();

        let dates: Vec<_> = table.records().iter().map(|r| r.transaction_date).collect();
        assert_eq!(dates, vec![day(3), day(1), day(2)]);
    }
}
