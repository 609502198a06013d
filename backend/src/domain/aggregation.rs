//! Summary statistics and chart data for the current expense list.
//!
//! Everything here is recomputed from scratch on every call; nothing is
//! cached between reads.

use std::collections::HashMap;

use shared::{BarDatum, BucketKey, CategoryBucket, ExpenseItem, ExpenseSummary, PieSegment};

#[derive(Debug, Clone)]
pub struct AggregationEngine {
    bucket_key: BucketKey,
}

impl AggregationEngine {
    pub fn new() -> Self {
        Self {
            bucket_key: BucketKey::default(),
        }
    }

    pub fn with_bucket_key(bucket_key: BucketKey) -> Self {
        Self { bucket_key }
    }

    pub fn bucket_key(&self) -> BucketKey {
        self.bucket_key
    }

    pub fn summarize(&self, items: &[ExpenseItem]) -> ExpenseSummary {
        let total = Self::total(items);
        let buckets = self.buckets(items, total);
        let pie_segments = Self::pie_segments(&buckets, total);
        let bars = Self::bars(&buckets);

        ExpenseSummary {
            total,
            count: items.len(),
            average: Self::average(items),
            largest: Self::largest(items).cloned(),
            buckets,
            pie_segments,
            bars,
        }
    }

    pub fn total(items: &[ExpenseItem]) -> f64 {
        items.iter().map(|item| item.amount).sum()
    }

    pub fn average(items: &[ExpenseItem]) -> f64 {
        if items.is_empty() {
            0.0
        } else {
            Self::total(items) / items.len() as f64
        }
    }

    /// Item with the highest amount; the earliest one wins ties
    pub fn largest(items: &[ExpenseItem]) -> Option<&ExpenseItem> {
        let mut largest: Option<&ExpenseItem> = None;
        for item in items {
            match largest {
                Some(current) if item.amount <= current.amount => {}
                _ => largest = Some(item),
            }
        }
        largest
    }

    /// Group items by the configured key, ordered by descending total.
    ///
    /// Icon and color come from the first item seen for a key. Equal totals
    /// keep the order in which their keys first appeared.
    pub fn buckets(&self, items: &[ExpenseItem], grand_total: f64) -> Vec<CategoryBucket> {
        let mut buckets: Vec<CategoryBucket> = Vec::new();
        let mut index_by_key: HashMap<&str, usize> = HashMap::new();

        for item in items {
            let key = self.key_for(item);
            match index_by_key.get(key) {
                Some(&index) => {
                    let bucket = &mut buckets[index];
                    bucket.total += item.amount;
                    bucket.count += 1;
                }
                None => {
                    index_by_key.insert(key, buckets.len());
                    buckets.push(CategoryBucket {
                        key: key.to_string(),
                        total: item.amount,
                        count: 1,
                        icon: item.icon.clone(),
                        color: item.color.clone(),
                        percentage: 0.0,
                    });
                }
            }
        }

        let totals: Vec<f64> = buckets.iter().map(|bucket| bucket.total).collect();
        for (bucket, percentage) in buckets.iter_mut().zip(bucket_percentages(&totals, grand_total)) {
            bucket.percentage = percentage;
        }

        // stable: equal totals stay in first-seen order
        buckets.sort_by(|a, b| b.total.total_cmp(&a.total));
        buckets
    }

    /// Cumulative slices for a conic-gradient pie. Empty when the total is 0.
    pub fn pie_segments(buckets: &[CategoryBucket], grand_total: f64) -> Vec<PieSegment> {
        if grand_total <= 0.0 {
            return Vec::new();
        }

        let mut running_total = 0.0;
        buckets
            .iter()
            .map(|bucket| {
                let start_percent = percentage_of(running_total, grand_total);
                running_total += bucket.total;
                PieSegment {
                    key: bucket.key.clone(),
                    color: bucket.color.clone(),
                    start_percent,
                    end_percent: percentage_of(running_total, grand_total),
                }
            })
            .collect()
    }

    /// Bar heights relative to the largest bucket
    pub fn bars(buckets: &[CategoryBucket]) -> Vec<BarDatum> {
        let max_total = buckets.iter().map(|bucket| bucket.total).fold(0.0, f64::max);

        buckets
            .iter()
            .map(|bucket| BarDatum {
                key: bucket.key.clone(),
                color: bucket.color.clone(),
                total: bucket.total,
                ratio: if max_total > 0.0 { bucket.total / max_total } else { 0.0 },
            })
            .collect()
    }

    fn key_for<'a>(&self, item: &'a ExpenseItem) -> &'a str {
        match self.bucket_key {
            BucketKey::Name => &item.name,
            BucketKey::Category => &item.category,
        }
    }
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Tenths of a percent in a whole
const TENTHS_IN_WHOLE: u64 = 1000;

/// One-decimal shares of `grand_total` that add up to exactly 100.
///
/// Largest-remainder rounding: every share is floored to a tenth, then the
/// leftover tenths go to the largest fractional parts, earlier entries first
/// on ties. Each share stays within 0.1 of its exact value. All zeros when
/// the grand total is 0.
fn bucket_percentages(totals: &[f64], grand_total: f64) -> Vec<f64> {
    if grand_total <= 0.0 || !grand_total.is_finite() {
        return vec![0.0; totals.len()];
    }

    let exact: Vec<f64> = totals
        .iter()
        .map(|total| (total / grand_total * TENTHS_IN_WHOLE as f64).max(0.0))
        .collect();
    let mut tenths: Vec<u64> = exact.iter().map(|share| share.floor() as u64).collect();

    let assigned: u64 = tenths.iter().sum();
    let leftover = TENTHS_IN_WHOLE.saturating_sub(assigned) as usize;

    let mut by_remainder: Vec<usize> = (0..exact.len()).collect();
    // stable: equal remainders keep their original order
    by_remainder.sort_by(|&a, &b| (exact[b] - exact[b].floor()).total_cmp(&(exact[a] - exact[a].floor())));
    for &index in by_remainder.iter().take(leftover) {
        tenths[index] += 1;
    }

    tenths.into_iter().map(|tenth| tenth as f64 / 10.0).collect()
}

/// `part / whole * 100` rounded to one decimal, or 0 when `whole` is 0
fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    round_to_one_decimal(part / whole * 100.0)
}

fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
