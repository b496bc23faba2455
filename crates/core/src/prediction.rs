//! Single-query classification.

use crate::classifier::Classifier;
use crate::{DashboardError, DashboardResult};
use api_shared::{CategoryLabel, ClassifyRes};

/// Classify `query` as a one-element batch and pair the labels with `categories`.
///
/// The query is passed through untouched: an empty query is still classified.
///
/// # Errors
/// Returns an error if the classifier fails or its output does not hold exactly one label per
/// category.
pub fn classify_query(
    classifier: &dyn Classifier,
    categories: &[String],
    query: &str,
) -> DashboardResult<ClassifyRes> {
    let mut predictions = classifier.predict(&[query])?;
    if predictions.len() != 1 {
        return Err(DashboardError::PredictionCount {
            expected: 1,
            actual: predictions.len(),
        });
    }
    let labels = predictions.remove(0);
    if labels.len() != categories.len() {
        return Err(DashboardError::PredictionWidth {
            expected: categories.len(),
            actual: labels.len(),
        });
    }

    Ok(ClassifyRes {
        query: query.to_string(),
        labels: categories
            .iter()
            .zip(labels)
            .map(|(category, label)| CategoryLabel {
                category: category.clone(),
                label: u8::from(label != 0),
            })
            .collect(),
    })
}
