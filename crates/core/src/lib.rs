//! # Dashboard Core
//!
//! Core logic for the disaster response dashboard.
//!
//! This crate loads the message dataset and the pre-trained classifier, and shapes both into
//! the values the dashboard serves:
//! - Dataset loading from SQLite (`dataset`)
//! - Tokenization and the serialized NB-SVM classifier (`tokenizer`, `classifier`)
//! - Genre and top-category chart views (`summary`)
//! - Single-query classification (`prediction`)
//!
//! **No API concerns**: HTTP routing and page rendering belong in `api-rest`.

pub mod classifier;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod prediction;
pub mod summary;
pub mod tokenizer;

pub use api_shared::{ClassifyRes, GraphsRes};
pub use classifier::{Classifier, NbSvmModel};
pub use config::CoreConfig;
pub use dataset::{Dataset, MessageRecord};
pub use error::{DashboardError, DashboardResult};

use std::sync::Arc;

/// Everything loaded at startup: the message table and the classifier.
///
/// Built once and shared read-only between request handlers.
#[derive(Clone)]
pub struct DashboardContext {
    dataset: Dataset,
    classifier: Arc<dyn Classifier>,
}

impl DashboardContext {
    /// Pair a dataset with a classifier.
    ///
    /// # Errors
    /// Returns `LabelMismatch` unless the classifier's labels are exactly the dataset's category
    /// columns, in the same order.
    pub fn new(dataset: Dataset, classifier: Arc<dyn Classifier>) -> DashboardResult<Self> {
        if classifier.labels() != dataset.categories() {
            return Err(DashboardError::LabelMismatch {
                model: classifier.labels().to_vec(),
                dataset: dataset.categories().to_vec(),
            });
        }
        Ok(Self {
            dataset,
            classifier,
        })
    }

    /// Load the dataset and model named in `cfg`.
    pub fn load(cfg: &CoreConfig) -> DashboardResult<Self> {
        let dataset = Dataset::load(cfg)?;
        let model = NbSvmModel::load(cfg.model_path())?;

        tracing::info!(
            "loaded {} messages and a {}-label model",
            dataset.len(),
            model.labels().len()
        );
        Self::new(dataset, Arc::new(model))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Landing page charts, recomputed on every call.
    pub fn graphs(&self) -> GraphsRes {
        summary::dashboard_graphs(&self.dataset)
    }

    /// Classify a single query against the dataset's categories.
    pub fn classify(&self, query: &str) -> DashboardResult<ClassifyRes> {
        prediction::classify_query(self.classifier(), self.dataset.categories(), query)
    }
}
