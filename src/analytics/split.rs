// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::StockSplit;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Multiplier that rebases units bought on `transaction_date` to their
/// equivalent count on `observation_date`.
///
/// Only splits strictly after the transaction date and on or before the
/// observation date count; a same-day split is already reflected in the
/// transaction's units. Input order does not matter.
pub fn rebase_multiplier(
    transaction_date: NaiveDate,
    observation_date: NaiveDate,
    splits: &[StockSplit],
) -> Decimal {
    splits
        .iter()
        .filter(|s| s.date > transaction_date && s.date <= observation_date)
        .fold(Decimal::ONE, |acc, s| acc * s.ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn split(date: NaiveDate, ratio: i64) -> StockSplit {
        StockSplit {
            date,
            ratio: Decimal::from(ratio),
        }
    }

    #[test]
    fn no_splits_means_no_rebase() {
        assert_eq!(
            rebase_multiplier(d(2020, 1, 1), d(2024, 1, 1), &[]),
            Decimal::ONE
        );
    }

    #[test]
    fn splits_compose_multiplicatively() {
        let splits = [split(d(2021, 1, 1), 2), split(d(2022, 1, 1), 3)];
        assert_eq!(
            rebase_multiplier(d(2020, 1, 1), d(2024, 1, 1), &splits),
            Decimal::from(6)
        );
    }

    #[test]
    fn split_window_is_exclusive_then_inclusive() {
        let splits = [split(d(2021, 6, 1), 5)];
        assert_eq!(
            rebase_multiplier(d(2021, 5, 31), d(2021, 6, 1), &splits),
            Decimal::from(5)
        );
        assert_eq!(
            rebase_multiplier(d(2021, 6, 1), d(2022, 1, 1), &splits),
            Decimal::ONE,
            "same-day split must not rebase the transaction"
        );
        assert_eq!(
            rebase_multiplier(d(2021, 1, 1), d(2021, 5, 31), &splits),
            Decimal::ONE
        );
    }
}
