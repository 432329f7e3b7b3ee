//! Summary statistics over a filtered view, feeding the KPI row and charts.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use super::model::TransactionTable;

/// Aggregates computed from one filtered view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total_value: f64,
    pub transaction_count: usize,
    /// `None` for an empty view; the dashboard shows it as "0".
    pub mean_value: Option<f64>,
    /// Per-account sums, ascending by sum (ties by account code).
    pub by_account: Vec<(String, f64)>,
    pub by_type: BTreeMap<String, f64>,
    /// Per-day sums in chronological order.
    pub by_day: BTreeMap<NaiveDate, f64>,
}

impl Summary {
    /// Each expense type's fraction of the total, for the composition chart.
    ///
    /// Empty when the total is zero.
    pub fn type_shares(&self) -> Vec<(String, f64)> {
        if self.total_value == 0.0 {
            return Vec::new();
        }
        self.by_type
            .iter()
            .map(|(t, v)| (t.clone(), v / self.total_value))
            .collect()
    }
}

/// Compute the [`Summary`] of a (filtered) table.
pub fn summarize(table: &TransactionTable) -> Summary {
    let mut total_value = 0.0;
    let mut accounts: HashMap<&str, f64> = HashMap::new();
    let mut by_type: BTreeMap<String, f64> = BTreeMap::new();
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for rec in table.records() {
        let v = rec.transaction_value;
        total_value += v;
        *accounts.entry(rec.expense_account.as_str()).or_insert(0.0) += v;
        *by_type.entry(rec.expense_type.clone()).or_insert(0.0) += v;
        *by_day.entry(rec.transaction_date).or_insert(0.0) += v;
    }

    let mut by_account: Vec<(String, f64)> = accounts
        .into_iter()
        .map(|(acc, v)| (acc.to_owned(), v))
        .collect();
    by_account.sort_by(|(a_acc, a_sum), (b_acc, b_sum)| {
        a_sum.total_cmp(b_sum).then_with(|| a_acc.cmp(b_acc))
    });

    let transaction_count = table.len();
    let mean_value = (transaction_count > 0).then(|| total_value / transaction_count as f64);

    Summary {
        total_value,
        transaction_count,
        mean_value,
        by_account,
        by_type,
        by_day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::TransactionRecord;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn sample_records() -> Vec<TransactionRecord> {
        vec![
            TransactionRecord::new(date(1), "521211", "Belanja Barang", 100.0),
            TransactionRecord::new(date(2), "521211", "Belanja Barang", 200.0),
            TransactionRecord::new(date(2), "524111", "Perjalanan Dinas", 50.0),
            TransactionRecord::new(date(3), "532111", "Belanja Modal", 300.0),
            TransactionRecord::new(date(5), "524111", "Perjalanan Dinas", 25.0),
        ]
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn totals_counts_and_mean() {
        let summary = summarize(&TransactionTable::from_records(sample_records()));

        assert_eq!(summary.total_value, 675.0);
        assert_eq!(summary.transaction_count, 5);
        assert_eq!(summary.mean_value, Some(135.0));
    }

    #[test]
    fn empty_view_has_zero_total_and_no_mean() {
        let summary = summarize(&TransactionTable::default());

        assert_eq!(summary.total_value, 0.0);
        assert_eq!(summary.transaction_count, 0);
        assert_eq!(summary.mean_value, None);
        assert!(summary.by_account.is_empty());
        assert!(summary.type_shares().is_empty());
    }

    #[test]
    fn accounts_sorted_ascending_by_sum() {
        let summary = summarize(&TransactionTable::from_records(sample_records()));

        assert_eq!(
            summary.by_account,
            vec![
                ("524111".to_string(), 75.0),
                ("521211".to_string(), 300.0),
                ("532111".to_string(), 300.0),
            ]
        );
    }

    #[test]
    fn days_are_chronological() {
        let summary = summarize(&TransactionTable::from_records(sample_records()));

        let days: Vec<_> = summary.by_day.into_iter().collect();
        assert_eq!(
            days,
            vec![
                (date(1), 100.0),
                (date(2), 250.0),
                (date(3), 300.0),
                (date(5), 25.0)
            ]
        );
    }

    #[test]
    fn partitions_add_up_to_total() {
        let summary = summarize(&TransactionTable::from_records(sample_records()));

        let by_type: f64 = summary.by_type.values().sum();
        let by_day: f64 = summary.by_day.values().sum();
        let by_account: f64 = summary.by_account.iter().map(|(_, v)| v).sum();

        assert!(approx_eq(by_type, summary.total_value));
        assert!(approx_eq(by_day, summary.total_value));
        assert!(approx_eq(by_account, summary.total_value));
    }

    #[test]
    fn row_order_does_not_matter() {
        let forward = summarize(&TransactionTable::from_records(sample_records()));
        let mut reversed_rows = sample_records();
        reversed_rows.reverse();
        let reversed = summarize(&TransactionTable::from_records(reversed_rows));

        assert_eq!(forward, reversed);
    }

    #[test]
    fn type_shares_sum_to_one() {
        let summary = summarize(&TransactionTable::from_records(sample_records()));
        let shares = summary.type_shares();

        assert_eq!(shares.len(), 3);
        assert!(approx_eq(shares.iter().map(|(_, s)| s).sum(), 1.0));
        let modal = shares.iter().find(|(t, _)| t == "Belanja Modal").unwrap();
        assert!(approx_eq(modal.1, 300.0 / 675.0));
    }
}
