//! Aggregate views of the dataset for the landing page charts.
//!
//! Both views are recomputed from the in-memory records on every call.

use crate::constants::{
    COUNT_AXIS_TITLE, GENRE_AXIS_TITLE, GENRE_CHART_TITLE, TOP_CATEGORIES_CHART_TITLE,
    TOP_CATEGORY_COUNT,
};
use crate::dataset::Dataset;
use api_shared::{Axis, BarMode, BarTrace, Graph, GraphsRes, Layout};
use std::collections::BTreeMap;

/// Number of messages per genre, in sorted genre order.
///
/// Rows without a genre are skipped; rows without a message keep their genre listed but are not
/// counted.
pub fn genre_counts(dataset: &Dataset) -> Vec<(String, i64)> {
    let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
    for record in dataset.records() {
        let Some(genre) = record.genre.as_deref() else {
            continue;
        };
        *counts.entry(genre).or_default() += i64::from(record.message.is_some());
    }
    counts
        .into_iter()
        .map(|(genre, count)| (genre.to_string(), count))
        .collect()
}

/// Per-genre sums of every category column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySums {
    /// Distinct genres in sorted order.
    pub genres: Vec<String>,
    /// `by_category[c][g]` is the sum of category `c` over messages of genre `g`.
    pub by_category: Vec<Vec<i64>>,
}

impl CategorySums {
    pub fn compute(dataset: &Dataset) -> Self {
        let genres = dataset.genres();
        let genre_index: BTreeMap<&str, usize> = genres
            .iter()
            .enumerate()
            .map(|(i, g)| (g.as_str(), i))
            .collect();

        let mut by_category = vec![vec![0i64; genres.len()]; dataset.categories().len()];
        for record in dataset.records() {
            let Some(genre) = record.genre.as_deref() else {
                continue;
            };
            let g = genre_index[genre];
            for (c, value) in record.categories.iter().enumerate() {
                by_category[c][g] += value;
            }
        }

        Self {
            genres,
            by_category,
        }
    }

    /// Total of category `c` across all genres.
    pub fn total(&self, c: usize) -> i64 {
        self.by_category[c].iter().sum()
    }

    /// Indices of the `n` categories with the highest totals, highest first.
    ///
    /// Equal totals keep column order, so the earlier column wins a tie at the cut-off.
    pub fn top(&self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.by_category.len()).collect();
        order.sort_by(|&a, &b| self.total(b).cmp(&self.total(a)));
        order.truncate(n);
        order
    }
}

/// Bar chart of message counts per genre.
pub fn genre_chart(dataset: &Dataset) -> Graph {
    let (genres, counts): (Vec<String>, Vec<i64>) = genre_counts(dataset).into_iter().unzip();

    Graph {
        data: vec![BarTrace::new(genres, counts)],
        layout: Layout {
            title: GENRE_CHART_TITLE.into(),
            xaxis: Axis::titled(GENRE_AXIS_TITLE),
            yaxis: Axis::titled(COUNT_AXIS_TITLE),
            barmode: None,
        },
    }
}

/// Grouped bar chart of the most frequent categories, one series per category, split by genre.
pub fn top_categories_chart(dataset: &Dataset) -> Graph {
    let sums = CategorySums::compute(dataset);
    let data = sums
        .top(TOP_CATEGORY_COUNT)
        .into_iter()
        .map(|c| {
            BarTrace::new(sums.genres.clone(), sums.by_category[c].clone())
                .named(dataset.categories()[c].clone())
        })
        .collect();

    Graph {
        data,
        layout: Layout {
            title: TOP_CATEGORIES_CHART_TITLE.into(),
            xaxis: Axis::titled(GENRE_AXIS_TITLE),
            yaxis: Axis::titled(COUNT_AXIS_TITLE),
            barmode: Some(BarMode::Group),
        },
    }
}

/// All landing page charts with their element ids.
pub fn dashboard_graphs(dataset: &Dataset) -> GraphsRes {
    GraphsRes::new(vec![genre_chart(dataset), top_categories_chart(dataset)])
}
