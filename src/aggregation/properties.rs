//! Tests for the properties that hold across all the aggregation functions.

use rust_decimal::Decimal;
use time::{Duration, macros::date};

use crate::{
    aggregation::{
        Granularity, PeriodCursor, PeriodKey, Quotas, bucket_by_period, category_totals,
        quota_status,
    },
    amount::parse_non_negative_amount,
    receipt::{Category, Receipt, parse_receipt_date},
};

fn create_test_receipt(id: i64, date: &str, total: Option<&str>, category: Option<&str>) -> Receipt {
    Receipt {
        id,
        store_name: format!("Store {id}"),
        date: date.to_owned(),
        category: category.map(str::to_owned),
        description: None,
        line_items: Vec::new(),
        total: total.map(str::to_owned),
        image_url: None,
    }
}

/// A spread of receipts over two years, with the occasional bad date, bad total and unknown
/// category mixed in.
fn mixed_receipts() -> Vec<Receipt> {
    let categories = [Some("Home"), Some("Personal"), Some("Food"), Some("Travel"), None];
    let start = date!(2020 - 11 - 20);

    (0..240)
        .map(|i: i64| {
            let date = start + Duration::days((i * 37) % 400);
            let date_text = match i % 23 {
                0 => "31/02/2021".to_owned(),
                11 => format!("{}-{}-{}", date.year(), u8::from(date.month()), date.day()),
                _ => format!("{:02}/{:02}/{}", date.day(), u8::from(date.month()), date.year()),
            };
            let total = match i % 17 {
                0 => None,
                5 => Some("twelve dollars".to_owned()),
                9 => Some("-3.00".to_owned()),
                _ => Some(format!("{}.{:02}", (i * 13) % 150, (i * 7) % 100)),
            };
            let category = categories[(i as usize) % categories.len()];

            create_test_receipt(i, &date_text, total.as_deref(), category)
        })
        .collect()
}

fn parsed_total(receipt: &Receipt) -> Decimal {
    receipt
        .total
        .as_deref()
        .and_then(|total| parse_non_negative_amount(total).ok())
        .unwrap_or(Decimal::ZERO)
}

fn receipts_with_valid_dates(receipts: &[Receipt]) -> Vec<&Receipt> {
    receipts
        .iter()
        .filter(|receipt| parse_receipt_date(&receipt.date).is_ok())
        .collect()
}

#[test]
fn bucket_totals_sum_to_total_of_dated_receipts() {
    let receipts = mixed_receipts();
    let expected: Decimal = receipts_with_valid_dates(&receipts)
        .into_iter()
        .map(parsed_total)
        .sum();

    for granularity in Granularity::ALL {
        let buckets = bucket_by_period(&receipts, granularity);
        let bucket_sum: Decimal = buckets.iter().map(|bucket| bucket.total).sum();

        assert_eq!(bucket_sum, expected, "sum mismatch for {granularity:?}");
    }
}

#[test]
fn every_dated_receipt_lands_in_exactly_one_bucket() {
    let receipts = mixed_receipts();
    let dated = receipts_with_valid_dates(&receipts);

    for granularity in Granularity::ALL {
        let buckets = bucket_by_period(&receipts, granularity);

        for receipt in &dated {
            let date = parse_receipt_date(&receipt.date).unwrap();
            let matching = buckets
                .iter()
                .filter(|bucket| bucket.period_key.contains(date))
                .count();

            assert_eq!(matching, 1, "receipt {} in {granularity:?}", receipt.id);
        }

        let period_count = dated
            .iter()
            .map(|receipt| PeriodKey::new(parse_receipt_date(&receipt.date).unwrap(), granularity))
            .collect::<std::collections::HashSet<_>>()
            .len();
        assert_eq!(buckets.len(), period_count);
    }
}

#[test]
fn buckets_are_strictly_descending() {
    let receipts = mixed_receipts();

    for granularity in Granularity::ALL {
        let buckets = bucket_by_period(&receipts, granularity);

        assert!(
            buckets
                .windows(2)
                .all(|pair| pair[0].period_key.start() > pair[1].period_key.start()),
            "buckets out of order for {granularity:?}"
        );
    }
}

#[test]
fn december_comes_after_january_of_the_next_year() {
    let receipts = vec![
        create_test_receipt(1, "15/12/2020", Some("1.00"), Some("Food")),
        create_test_receipt(2, "15/01/2021", Some("2.00"), Some("Food")),
    ];

    let buckets = bucket_by_period(&receipts, Granularity::Monthly);

    assert_eq!(buckets[0].period_key.to_string(), "2021-01");
    assert_eq!(buckets[1].period_key.to_string(), "2020-12");
}

#[test]
fn bucketing_is_idempotent() {
    let receipts = mixed_receipts();

    for granularity in Granularity::ALL {
        assert_eq!(
            bucket_by_period(&receipts, granularity),
            bucket_by_period(&receipts, granularity)
        );
    }
}

#[test]
fn category_totals_of_buckets_match_all_time_category_totals() {
    let receipts = mixed_receipts();
    let all_time = category_totals(&receipts, None);

    for granularity in Granularity::ALL {
        let buckets = bucket_by_period(&receipts, granularity);

        for category in Category::ALL {
            let from_buckets: Decimal = buckets
                .iter()
                .map(|bucket| bucket.category_totals.get(category))
                .sum();

            assert_eq!(from_buckets, all_time.get(category));
        }
    }
}

#[test]
fn quota_boundary() {
    let quotas = Quotas::default();

    for granularity in Granularity::ALL {
        let quota = quotas.for_granularity(granularity);

        assert!(!quota_status(quota, granularity, &quotas).exceeded);
        assert!(quota_status(quota + Decimal::new(1, 2), granularity, &quotas).exceeded);
    }
}

#[test]
fn neighbouring_days_get_their_own_daily_buckets() {
    let receipts = vec![
        create_test_receipt(1, "14/03/2021", Some("53.95"), Some("Food")),
        create_test_receipt(2, "15/03/2021", Some("10.00"), Some("Food")),
    ];

    let buckets = bucket_by_period(&receipts, Granularity::Daily);

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].period_key.to_string(), "2021-03-15");
    assert_eq!(buckets[0].total, Decimal::new(1000, 2));
    assert_eq!(buckets[1].period_key.to_string(), "2021-03-14");
    assert_eq!(buckets[1].total, Decimal::new(5395, 2));
}

#[test]
fn sunday_and_monday_share_a_week() {
    // 14 March 2021 is a Sunday.
    let receipts = vec![
        create_test_receipt(1, "14/03/2021", Some("53.95"), Some("Food")),
        create_test_receipt(2, "15/03/2021", Some("10.00"), Some("Food")),
    ];

    let buckets = bucket_by_period(&receipts, Granularity::Weekly);

    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].period_key.to_string(), "2021-03-15");
    assert_eq!(buckets[0].total, Decimal::new(6395, 2));
    assert_eq!(buckets[0].category_totals.get(Category::Food), Decimal::new(6395, 2));
}

#[test]
fn saturday_and_sunday_fall_in_different_weeks() {
    let receipts = vec![
        create_test_receipt(1, "13/03/2021", Some("53.95"), Some("Food")),
        create_test_receipt(2, "14/03/2021", Some("10.00"), Some("Food")),
    ];

    let buckets = bucket_by_period(&receipts, Granularity::Weekly);

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].period_key.to_string(), "2021-03-15");
    assert_eq!(buckets[1].period_key.to_string(), "2021-03-08");
}

#[test]
fn impossible_day_of_month_is_excluded() {
    let receipts = vec![
        create_test_receipt(1, "31/02/2021", Some("40.00"), Some("Food")),
        create_test_receipt(2, "01/03/2021", Some("5.00"), Some("Food")),
        create_test_receipt(3, "02/03/2021", Some("6.00"), Some("Home")),
    ];

    for granularity in Granularity::ALL {
        let buckets = bucket_by_period(&receipts, granularity);
        let bucket_sum: Decimal = buckets.iter().map(|bucket| bucket.total).sum();

        assert_eq!(bucket_sum, Decimal::new(11, 0));
        assert!(
            buckets
                .iter()
                .all(|bucket| bucket.period_key.start() >= date!(2021 - 03 - 01))
        );
    }
}

#[test]
fn spending_over_the_daily_quota_leaves_negative_remaining() {
    let receipts = vec![create_test_receipt(1, "14/03/2021", Some("76.23"), Some("Food"))];
    let quotas = Quotas {
        daily: Decimal::new(70, 0),
        ..Quotas::default()
    };

    let buckets = bucket_by_period(&receipts, Granularity::Daily);
    let status = quota_status(buckets[0].total, Granularity::Daily, &quotas);

    assert_eq!(status.remaining, Decimal::new(-623, 2));
    assert!(status.exceeded);
}

#[test]
fn totals_near_the_decimal_limit_never_panic() {
    let receipts = vec![
        create_test_receipt(1, "14/03/2021", Some("50000000000000000000000000000"), Some("Food")),
        create_test_receipt(2, "15/03/2021", Some("50000000000000000000000000000"), Some("Food")),
        create_test_receipt(3, "16/03/2021", Some("50000000000000000000000000000"), None),
    ];

    for granularity in Granularity::ALL {
        let buckets = bucket_by_period(&receipts, granularity);
        let newest = buckets[0].total;

        assert!(quota_status(newest, granularity, &Quotas::default()).exceeded);
    }

    let monthly = bucket_by_period(&receipts, Granularity::Monthly);
    assert_eq!(monthly[0].total, Decimal::MAX);
    assert_eq!(category_totals(&receipts, None).get(Category::Food), Decimal::MAX);
}

#[test]
fn stepping_older_skips_periods_without_spending() {
    let receipts = vec![
        create_test_receipt(1, "04/01/2021", Some("1.00"), Some("Food")),
        create_test_receipt(2, "22/03/2021", Some("2.00"), Some("Food")),
    ];
    let buckets = bucket_by_period(&receipts, Granularity::Weekly);
    let mut cursor = PeriodCursor::new(Granularity::Weekly);

    assert_eq!(cursor.step_older(buckets.len()), Ok(1));

    let previous = cursor.current(&buckets).expect("Expected a bucket");
    assert_eq!(previous.period_key, PeriodKey::Week(date!(2021 - 01 - 04)));
    assert!(cursor.step_older(buckets.len()).is_err());
}
