pub(crate) mod decode;
pub(crate) mod input;
pub(crate) mod normalize;
pub(crate) mod resolve;

use chrono::NaiveDate;

/// One transaction that survived date and amount coercion. `category` is
/// filled by the classifier and never rewritten afterwards.
#[derive(Debug, Clone)]
pub(crate) struct NormalizedRecord {
    pub date: NaiveDate,
    pub month: NaiveDate,
    pub amount: f64,
    pub description: String,
    pub category: Option<String>,
}
