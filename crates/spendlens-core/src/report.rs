use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::classify::UNCATEGORIZED;
use crate::ingest::NormalizedRecord;

/// The aggregate outputs for one pipeline run. Recomputed fresh each run,
/// never mutated in place.
#[derive(Debug, Clone)]
pub(crate) struct ReportBundle {
    pub total_amount: f64,
    pub monthly_totals: Vec<(NaiveDate, f64)>,
    pub category_totals: Vec<(String, f64)>,
    pub pivot: Pivot,
}

/// Sparse month × category matrix. Pairs with no records are not stored;
/// they read as zero through `amount`.
#[derive(Debug, Clone)]
pub(crate) struct Pivot {
    cells: HashMap<(NaiveDate, String), f64>,
}

impl Pivot {
    pub(crate) fn amount(&self, month: NaiveDate, category: &str) -> f64 {
        self.cells
            .get(&(month, category.to_string()))
            .copied()
            .unwrap_or(0.0)
    }
}

impl ReportBundle {
    /// Mean of the monthly sums over observed months; deliberately not
    /// total divided by record count, and not divided by a fixed 12.
    pub(crate) fn average_monthly(&self) -> f64 {
        if self.monthly_totals.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.monthly_totals.iter().map(|(_, amount)| amount).sum();
        sum / self.monthly_totals.len() as f64
    }

    pub(crate) fn top_category(&self) -> Option<&(String, f64)> {
        self.category_totals.first()
    }
}

pub(crate) fn aggregate(records: &[NormalizedRecord]) -> ReportBundle {
    let mut total_amount = 0.0;
    let mut monthly: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut category_order: Vec<String> = Vec::new();
    let mut category_sums: HashMap<String, f64> = HashMap::new();
    let mut cells: HashMap<(NaiveDate, String), f64> = HashMap::new();

    for record in records {
        let category = record
            .category
            .as_deref()
            .unwrap_or(UNCATEGORIZED)
            .to_string();

        total_amount += record.amount;
        *monthly.entry(record.month).or_insert(0.0) += record.amount;

        if !category_sums.contains_key(&category) {
            category_order.push(category.clone());
        }
        *category_sums.entry(category.clone()).or_insert(0.0) += record.amount;
        *cells.entry((record.month, category)).or_insert(0.0) += record.amount;
    }

    // First-seen order is the tie-break base so identical inputs always
    // produce identical category ordering; the stable sort then ranks by
    // summed amount descending.
    let mut category_totals = category_order
        .into_iter()
        .map(|category| {
            let sum = category_sums.get(&category).copied().unwrap_or(0.0);
            (category, sum)
        })
        .collect::<Vec<(String, f64)>>();
    category_totals.sort_by(|left, right| {
        right
            .1
            .partial_cmp(&left.1)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ReportBundle {
        total_amount,
        monthly_totals: monthly.into_iter().collect(),
        category_totals,
        pivot: Pivot { cells },
    }
}
