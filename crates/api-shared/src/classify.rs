use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Predicted flag for one category column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryLabel {
    pub category: String,
    /// `0` or `1`.
    pub label: u8,
}

/// Result of classifying a single query, with labels in category column order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClassifyRes {
    pub query: String,
    pub labels: Vec<CategoryLabel>,
}

impl ClassifyRes {
    /// Names of the categories predicted as `1`.
    pub fn positive_categories(&self) -> impl Iterator<Item = &str> {
        self.labels
            .iter()
            .filter(|l| l.label == 1)
            .map(|l| l.category.as_str())
    }
}
