//! Descriptive aggregates of the loaded transactions for charting.
//!
//! Provides functions to group transactions by card type, city and risk
//! level, and to bucket them by the time of day they happened. All functions
//! are pure and deterministic.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    risk::{NO_RISK_LABEL, RiskLevel},
    transaction::Transaction,
};

/// The number of transactions in a category and their share of the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    /// The category name.
    pub label: String,
    /// How many transactions fall in the category.
    pub count: usize,
    /// The category's percentage of all transactions to two decimal places.
    ///
    /// The percentages of a distribution always sum to exactly 100.
    pub percent: f64,
}

/// A six hour window of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HourBucket {
    /// 00:00 to 06:00.
    Night,
    /// 06:00 to 12:00.
    Morning,
    /// 12:00 to 18:00.
    Afternoon,
    /// 18:00 to 24:00.
    Evening,
}

impl HourBucket {
    /// The buckets in chronological order.
    pub const ALL: [HourBucket; 4] = [
        HourBucket::Night,
        HourBucket::Morning,
        HourBucket::Afternoon,
        HourBucket::Evening,
    ];

    /// The bucket containing `hour`, where `hour` is in `0..24`.
    pub fn for_hour(hour: u8) -> Self {
        match hour {
            0..6 => HourBucket::Night,
            6..12 => HourBucket::Morning,
            12..18 => HourBucket::Afternoon,
            _ => HourBucket::Evening,
        }
    }

    /// The window as shown on the chart axis, e.g. "06:00 - 12:00".
    pub fn label(self) -> &'static str {
        match self {
            HourBucket::Night => "00:00 - 06:00",
            HourBucket::Morning => "06:00 - 12:00",
            HourBucket::Afternoon => "12:00 - 18:00",
            HourBucket::Evening => "18:00 - 24:00",
        }
    }
}

/// Every distribution shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Transactions grouped by card type.
    pub card_types: Vec<Share>,
    /// Transactions grouped by city.
    pub cities: Vec<Share>,
    /// Transactions grouped by risk level, unlabelled ones under [NO_RISK_LABEL].
    pub risk_levels: Vec<Share>,
    /// Transactions bucketed by time of day, always one entry per [HourBucket].
    pub hour_buckets: Vec<Share>,
}

/// Compute every dashboard distribution for `transactions`.
pub fn summarize(transactions: &[Transaction]) -> DashboardSummary {
    DashboardSummary {
        card_types: card_type_shares(transactions),
        cities: city_shares(transactions),
        risk_levels: risk_level_shares(transactions),
        hour_buckets: hour_bucket_shares(transactions),
    }
}

/// Groups by card type, e.g. "VISA".
pub fn card_type_shares(transactions: &[Transaction]) -> Vec<Share> {
    shares_by(transactions, |transaction| transaction.card_type.as_str())
}

/// Groups by the city the transaction happened in.
pub fn city_shares(transactions: &[Transaction]) -> Vec<Share> {
    shares_by(transactions, |transaction| transaction.city.as_str())
}

/// Groups by risk level, with unlabelled transactions counted under [NO_RISK_LABEL].
pub fn risk_level_shares(transactions: &[Transaction]) -> Vec<Share> {
    shares_by(transactions, |transaction| {
        transaction
            .risk_level
            .map(RiskLevel::label)
            .unwrap_or(NO_RISK_LABEL)
    })
}

/// The share of transactions in each [HourBucket], in chronological order.
///
/// Buckets without transactions are included with a count of zero.
pub fn hour_bucket_shares(transactions: &[Transaction]) -> Vec<Share> {
    let mut counts: HashMap<HourBucket, usize> = HashMap::new();

    for transaction in transactions {
        let bucket = HourBucket::for_hour(transaction.occurred_at.hour());
        *counts.entry(bucket).or_insert(0) += 1;
    }

    let counts: Vec<usize> = HourBucket::ALL
        .iter()
        .map(|bucket| counts.get(bucket).copied().unwrap_or(0))
        .collect();
    let percents = apportion_percents(&counts, transactions.len());

    HourBucket::ALL
        .iter()
        .zip(counts)
        .zip(percents)
        .map(|((bucket, count), percent)| Share {
            label: bucket.label().to_owned(),
            count,
            percent,
        })
        .collect()
}

/// Counts transactions per key, sorted by count (largest first) then label.
fn shares_by<'a, F>(transactions: &'a [Transaction], key: F) -> Vec<Share>
where
    F: Fn(&'a Transaction) -> &'a str,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions {
        *counts.entry(key(transaction)).or_insert(0) += 1;
    }

    let mut counts: Vec<(&str, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let percents = apportion_percents(
        &counts.iter().map(|(_, count)| *count).collect::<Vec<_>>(),
        transactions.len(),
    );

    counts
        .into_iter()
        .zip(percents)
        .map(|((label, count), percent)| Share {
            label: label.to_owned(),
            count,
            percent,
        })
        .collect()
}

/// Hundredths of a percent in a whole.
const BASIS_POINTS: usize = 10_000;

/// Converts `counts` into percentages with two decimal places that sum to
/// exactly 100 (or are all zero when `total` is zero).
///
/// Each share is rounded down to the nearest hundredth of a percent, then the
/// leftover hundredths go to the shares with the largest remainders. Ties go
/// to the earlier share.
fn apportion_percents(counts: &[usize], total: usize) -> Vec<f64> {
    if total == 0 {
        return vec![0.0; counts.len()];
    }

    let mut basis_points: Vec<usize> = counts
        .iter()
        .map(|count| count * BASIS_POINTS / total)
        .collect();
    let assigned: usize = basis_points.iter().sum();

    let mut by_remainder: Vec<usize> = (0..counts.len()).collect();
    by_remainder.sort_by_key(|&index| std::cmp::Reverse(counts[index] * BASIS_POINTS % total));

    for &index in by_remainder.iter().take(BASIS_POINTS.saturating_sub(assigned)) {
        basis_points[index] += 1;
    }

    basis_points
        .into_iter()
        .map(|points| points as f64 / 100.0)
        .collect()
}
